pub mod angle_format;
pub mod astro_util;
pub mod coordinate_format;
pub mod coordinate_service;
pub mod grid_interpolation;
pub mod interpolation_gateway;
pub mod pixel_mapper;
pub mod plate_solution;
pub mod ruler;
pub mod solver_trait;
pub mod value_stabilizer;
