// Copyright (c) 2025 Steven Rosenthal smr@dt3.org
// See LICENSE file in root directory for license terms.

use canonical_error::CanonicalError;
use log::debug;

use crate::pixel_mapper::SolverPoint;
use crate::plate_solution::{PlateSolutionMatrix, PlateSolutionRecord};
use crate::solver_trait::{CelestialComponents, CoordinateInterpolation,
                          SkyPosition, TextRequest};

/// Owns the solver built from one plate solution record. A record that is
/// incomplete or malformed yields a gateway without a solver, which answers
/// every query with Ok(None) instead of interpolating garbage.
///
/// Parsing and solver construction happen once, in `new()`; queries are
/// cheap and take `&self`.
pub struct InterpolationGateway<S: CoordinateInterpolation> {
    solver: Option<S>,
}

impl<S: CoordinateInterpolation> InterpolationGateway<S> {
    pub fn new(record: &PlateSolutionRecord) -> Self {
        let solver = PlateSolutionMatrix::parse(record)
            .and_then(|matrix| S::new(&matrix));
        match solver {
            Ok(solver) => InterpolationGateway{solver: Some(solver)},
            Err(e) => {
                debug!("No usable plate solution: {:?}", e);
                InterpolationGateway{solver: None}
            }
        }
    }

    /// Wraps an already constructed solver.
    pub fn from_solver(solver: S) -> Self {
        InterpolationGateway{solver: Some(solver)}
    }

    pub fn has_solution(&self) -> bool {
        self.solver.is_some()
    }

    /// Queries the solver for the text form of `point`, with galactic
    /// coordinates and the declination sign reported separately. The point
    /// is not range checked here; that is the solver's business.
    pub fn query_text(&self, point: &SolverPoint)
                      -> Result<Option<CelestialComponents>, CanonicalError> {
        let Some(solver) = &self.solver else {
            return Ok(None);
        };
        solver.interpolate_text(point.x, point.y, point.scale,
                                TextRequest{galactic: true, dec_sign: true})
    }

    pub fn query_position(&self, point: &SolverPoint)
                          -> Result<Option<SkyPosition>, CanonicalError> {
        let Some(solver) = &self.solver else {
            return Ok(None);
        };
        let position = solver.interpolate(point.x, point.y, point.scale)?;
        Ok(position.is_finite().then_some(position))
    }
}

/// One-shot form: validates `record`, builds a solver and queries `point`.
/// Returns Ok(None) without constructing a solver if `record` is unusable.
pub fn build_and_query<S: CoordinateInterpolation>(
    record: &PlateSolutionRecord, point: &SolverPoint)
    -> Result<Option<CelestialComponents>, CanonicalError> {
    InterpolationGateway::<S>::new(record).query_text(point)
}

// mod tests.
