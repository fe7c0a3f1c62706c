// Copyright (c) 2025 Steven Rosenthal smr@dt3.org
// See LICENSE file in root directory for license terms.

// Pixel -> sky lookups for a displayed, plate-solved image.
//
// Both entry points share one pipeline: map the point into solver space,
// query the gateway, then format or decode the result. Ok(None) means "no
// astrometric data here" (no usable solution, no image, pointer off the
// image) and is expected on every mouse move; Err is reserved for real
// defects such as a failing solver.

use canonical_error::CanonicalError;
use log::warn;

use crate::coordinate_format::{FormattedCoordinates, format_from_components,
                               split_components};
use crate::interpolation_gateway::InterpolationGateway;
use crate::pixel_mapper::{ImageGeometry, MappingOptions, PointerEvent,
                          map_pointer, map_unbounded};
use crate::solver_trait::{CelestialComponents, CoordinateInterpolation};

#[derive(Clone, Debug, PartialEq)]
pub struct PointerCoordinates {
    pub coordinates: FormattedCoordinates,
    // The event's own element-relative offset, for positioning the overlay.
    // Not the solver-space position.
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DecimalCoordinates {
    // Hours.
    pub ra: f64,
    // Degrees.
    pub dec: f64,
}

/// Formatted coordinates under the pointer. Called on every pointer move.
pub fn compute_for_pointer_event<S: CoordinateInterpolation>(
    event: &PointerEvent,
    geometry: Option<&ImageGeometry>,
    gateway: &InterpolationGateway<S>,
    options: &MappingOptions)
    -> Result<Option<PointerCoordinates>, CanonicalError> {
    if !gateway.has_solution() {
        return Ok(None);
    }
    let Some(geometry) = geometry else {
        return Ok(None);
    };
    let Some(point) = map_pointer(event, geometry, options) else {
        return Ok(None);
    };
    let Some(components) = gateway.query_text(&point)? else {
        return Ok(None);
    };
    Ok(Some(PointerCoordinates {
        coordinates: format_from_components(&components)?,
        x: event.offset_x,
        y: event.offset_y,
    }))
}

/// Decimal RA (hours) and Dec (degrees) at (x, y) in rendered image
/// coordinates. Points outside the element are allowed.
///
/// Best effort: failures are logged and reported as None, never returned to
/// the caller.
pub fn compute_decimal_coordinates<S: CoordinateInterpolation>(
    x: f64, y: f64,
    gateway: &InterpolationGateway<S>,
    geometry: Option<&ImageGeometry>,
    explicit_scale: Option<f64>) -> Option<DecimalCoordinates> {
    match try_decimal_coordinates(x, y, gateway, geometry, explicit_scale) {
        Ok(coordinates) => coordinates,
        Err(e) => {
            warn!("Could not resolve sky position at {},{}: {:?}", x, y, e);
            None
        }
    }
}

fn try_decimal_coordinates<S: CoordinateInterpolation>(
    x: f64, y: f64,
    gateway: &InterpolationGateway<S>,
    geometry: Option<&ImageGeometry>,
    explicit_scale: Option<f64>)
    -> Result<Option<DecimalCoordinates>, CanonicalError> {
    if !gateway.has_solution() {
        return Ok(None);
    }
    let Some(geometry) = geometry else {
        return Ok(None);
    };
    let Some(point) = map_unbounded(x, y, geometry, explicit_scale) else {
        return Ok(None);
    };
    let Some(components) = gateway.query_text(&point)? else {
        return Ok(None);
    };
    decimal_from_components(&components).map(Some)
}

/// Decodes solver text: RA = H + M/60 + S/3600, Dec = sign * (D + M/60 +
/// S/3600).
pub fn decimal_from_components(components: &CelestialComponents)
                               -> Result<DecimalCoordinates, CanonicalError> {
    let alpha = split_components(&components.alpha)?;
    let delta = split_components(&components.delta)?;
    let dec = delta.magnitude()?;
    let negative = delta.is_negative() || components.delta_negative;
    Ok(DecimalCoordinates {
        ra: alpha.magnitude()?,
        dec: if negative { -dec } else { dec },
    })
}

// mod tests.
