// Copyright (c) 2025 Steven Rosenthal smr@dt3.org
// See LICENSE file in root directory for license terms.

use canonical_error::CanonicalError;

use crate::angle_format::Sexagesimal;
use crate::astro_util::degrees_to_hours;
use crate::plate_solution::PlateSolutionMatrix;

/// Interpolated sky position of a solver-space point. Degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SkyPosition {
    pub ra: f64,
    pub dec: f64,
    // Galactic longitude and latitude.
    pub l: f64,
    pub b: f64,
}

impl SkyPosition {
    pub fn is_finite(&self) -> bool {
        self.ra.is_finite() && self.dec.is_finite()
            && self.l.is_finite() && self.b.is_finite()
    }
}

/// Text form of a solver result. Each field holds three whitespace
/// separated components.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CelestialComponents {
    // "HH MM SS".
    pub alpha: String,
    // "DD MM SS". Unsigned when the sign was requested separately via
    // `TextRequest::dec_sign` (see `delta_negative`), otherwise with a
    // leading '-' when negative.
    pub delta: String,
    // Dec is below the equator. Defaults to false, so an unsigned `delta`
    // with no flag reads as positive.
    pub delta_negative: bool,
    // "DDD MM SS"; present when requested via `TextRequest::galactic`.
    pub l: Option<String>,
    // Signed "+DD MM SS" / "-DD MM SS".
    pub b: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextRequest {
    pub galactic: bool,
    pub dec_sign: bool,
}

/// A pixel-to-sky interpolation solver. One is constructed per plate
/// solution and then queried for many points; queries take `&self` and may
/// run concurrently.
///
/// `scale`, when given, is a rendered/reference ratio that the solver must
/// divide x and y by before interpolating.
pub trait CoordinateInterpolation: Sized {
    /// Returns an error if the matrix data is unusable for this solver.
    fn new(matrix: &PlateSolutionMatrix) -> Result<Self, CanonicalError>;

    fn interpolate(&self, x: f64, y: f64, scale: Option<f64>)
                   -> Result<SkyPosition, CanonicalError>;

    /// Ok(None) if the solver has no finite answer for this point.
    fn interpolate_text(&self, x: f64, y: f64, scale: Option<f64>,
                        request: TextRequest)
                        -> Result<Option<CelestialComponents>, CanonicalError> {
        let position = self.interpolate(x, y, scale)?;
        if !position.is_finite() {
            return Ok(None);
        }
        Ok(Some(components_from_position(&position, request)))
    }
}

/// Renders `position` in the solver text form, rounded to whole seconds.
pub fn components_from_position(position: &SkyPosition,
                                request: TextRequest) -> CelestialComponents {
    let mut alpha = Sexagesimal::from_value(degrees_to_hours(position.ra));
    alpha.units %= 24;
    let dec = Sexagesimal::from_value(position.dec);
    let delta = if request.dec_sign || !dec.negative {
        dec.padded(2)
    } else {
        format!("-{}", dec.padded(2))
    };

    let (l, b) = if request.galactic {
        let mut l = Sexagesimal::from_value(position.l);
        l.units %= 360;
        let b = Sexagesimal::from_value(position.b);
        let b_sign = if b.negative { '-' } else { '+' };
        (Some(l.padded(3)), Some(format!("{}{}", b_sign, b.padded(2))))
    } else {
        (None, None)
    };

    CelestialComponents {
        alpha: alpha.padded(2),
        delta,
        delta_negative: dec.negative,
        l,
        b,
    }
}

// mod tests.
