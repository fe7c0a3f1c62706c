// Copyright (c) 2025 Steven Rosenthal smr@dt3.org
// See LICENSE file in root directory for license terms.

// On-image measurement between two points.

use crate::angle_format::format_astronomical_angle;
use crate::astro_util::angular_distance;
use crate::coordinate_service::{DecimalCoordinates,
                                compute_decimal_coordinates};
use crate::interpolation_gateway::InterpolationGateway;
use crate::pixel_mapper::ImageGeometry;
use crate::solver_trait::CoordinateInterpolation;
use crate::value_stabilizer::{DEFAULT_DECIMALS, stabilize};

#[derive(Clone, Debug, PartialEq)]
pub struct Measurement {
    pub start: DecimalCoordinates,
    pub end: DecimalCoordinates,
    // Degrees.
    pub distance: f64,
    pub label: String,
}

/// Display string for an angular distance in decimal degrees. The value is
/// stabilized first so that redrawing the ruler for nearly identical
/// distances does not flicker between adjacent arcseconds.
pub fn format_distance(decimal_degrees: f64) -> String {
    let stabilized = stabilize(decimal_degrees, DEFAULT_DECIMALS);
    format_astronomical_angle(stabilized * 3600.0)
}

/// Measures the sky distance between two points in rendered image
/// coordinates. None if either end has no sky position.
pub fn measure_between_points<S: CoordinateInterpolation>(
    start: (f64, f64), end: (f64, f64),
    gateway: &InterpolationGateway<S>,
    geometry: Option<&ImageGeometry>,
    explicit_scale: Option<f64>) -> Option<Measurement> {
    let start = compute_decimal_coordinates(
        start.0, start.1, gateway, geometry, explicit_scale)?;
    let end = compute_decimal_coordinates(
        end.0, end.1, gateway, geometry, explicit_scale)?;
    let distance = angular_distance(start.ra, start.dec, end.ra, end.dec);
    Some(Measurement{start, end, distance, label: format_distance(distance)})
}

// mod tests.
