// Copyright (c) 2025 Steven Rosenthal smr@dt3.org
// See LICENSE file in root directory for license terms.

// Bilinear interpolation over a plate solution sampled on a regular grid.
//
// `ra_matrix` and `dec_matrix` hold RA and Dec (degrees) sampled every
// `delta` solver-space pixels across the reference rect, row-major, rows
// running down from y0 and columns across from x0.

use astro::angle::limit_to_360;
use canonical_error::{CanonicalError, invalid_argument_error};

use crate::astro_util::galactic_from_equatorial;
use crate::plate_solution::{PlateSolutionMatrix, ReferenceRect};
use crate::solver_trait::{CoordinateInterpolation, SkyPosition};

#[derive(Clone, Debug)]
pub struct GridInterpolation {
    ra: Vec<f64>,
    dec: Vec<f64>,
    rect: ReferenceRect,
    delta: f64,
    cols: usize,
    rows: usize,
}

impl GridInterpolation {
    pub fn dimensions(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    // Corner values of the cell at (row, col): [v00, v01, v10, v11], first
    // index down, second across.
    fn cell(&self, values: &[f64], row: usize, col: usize) -> [f64; 4] {
        let i = row * self.cols + col;
        [values[i], values[i + 1], values[i + self.cols],
         values[i + self.cols + 1]]
    }
}

impl CoordinateInterpolation for GridInterpolation {
    fn new(matrix: &PlateSolutionMatrix) -> Result<Self, CanonicalError> {
        let rect = matrix.rect;
        let delta = matrix.delta;
        if !(delta > 0.0) {
            return Err(invalid_argument_error(
                format!("Grid step must be positive, got {}", delta).as_str()));
        }
        let width = rect.x1 - rect.x0;
        let height = rect.y1 - rect.y0;
        if !(width > 0.0 && height > 0.0) {
            return Err(invalid_argument_error(
                format!("Empty reference rect {:?}", rect).as_str()));
        }
        // Shape is checked in f64; usize arithmetic overflows on a huge rect
        // or a tiny step.
        let cols_f = (width / delta).floor() + 1.0;
        let rows_f = (height / delta).floor() + 1.0;
        if !(cols_f >= 2.0 && rows_f >= 2.0) {
            return Err(invalid_argument_error(
                format!("Grid of {}x{} is too small to interpolate",
                        cols_f, rows_f).as_str()));
        }
        let expected = cols_f * rows_f;
        for (name, values) in [("ra_matrix", &matrix.ra_matrix),
                               ("dec_matrix", &matrix.dec_matrix)] {
            if values.len() as f64 != expected {
                return Err(invalid_argument_error(
                    format!("{} has {} values, expected {} ({}x{})",
                            name, values.len(), expected, cols_f, rows_f)
                        .as_str()));
            }
        }
        let cols = cols_f as usize;
        let rows = rows_f as usize;
        Ok(GridInterpolation {
            ra: matrix.ra_matrix.clone(),
            dec: matrix.dec_matrix.clone(),
            rect,
            delta,
            cols,
            rows,
        })
    }

    fn interpolate(&self, x: f64, y: f64, scale: Option<f64>)
                   -> Result<SkyPosition, CanonicalError> {
        let (x, y) = match scale {
            None => (x, y),
            Some(s) if s > 0.0 => (x / s, y / s),
            Some(s) => {
                return Err(invalid_argument_error(
                    format!("Scale must be positive, got {}", s).as_str()));
            }
        };
        let gx = (x - self.rect.x0) / self.delta;
        let gy = (y - self.rect.y0) / self.delta;
        // Points beyond the grid use the nearest edge cell, extrapolating
        // linearly.
        let col = (gx.floor().max(0.0) as usize).min(self.cols - 2);
        let row = (gy.floor().max(0.0) as usize).min(self.rows - 2);
        let fx = gx - col as f64;
        let fy = gy - row as f64;

        let mut ra_corners = self.cell(&self.ra, row, col);
        let reference = ra_corners[0];
        for v in ra_corners.iter_mut().skip(1) {
            *v = unwrap_ra(*v, reference);
        }
        let ra = limit_to_360(bilinear(&ra_corners, fx, fy));
        let dec = bilinear(&self.cell(&self.dec, row, col), fx, fy)
            .clamp(-90.0, 90.0);
        let (l, b) = galactic_from_equatorial(ra, dec);
        Ok(SkyPosition{ra, dec, l, b})
    }
}

// Moves `ra` by a full turn if that brings it within 180 degrees of
// `reference`.
fn unwrap_ra(ra: f64, reference: f64) -> f64 {
    let diff = ra - reference;
    if diff > 180.0 {
        ra - 360.0
    } else if diff < -180.0 {
        ra + 360.0
    } else {
        ra
    }
}

fn bilinear(corners: &[f64; 4], fx: f64, fy: f64) -> f64 {
    let [v00, v01, v10, v11] = *corners;
    v00 * (1.0 - fx) * (1.0 - fy)
        + v01 * fx * (1.0 - fy)
        + v10 * (1.0 - fx) * fy
        + v11 * fx * fy
}

// mod tests.
