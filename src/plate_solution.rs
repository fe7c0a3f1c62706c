// Copyright (c) 2025 Steven Rosenthal smr@dt3.org
// See LICENSE file in root directory for license terms.

use canonical_error::{CanonicalError,
                      failed_precondition_error, invalid_argument_error};

/// Plate-solving metadata for one image revision, as supplied by the
/// backend. Every field must be present for the solution to be usable.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlateSolutionRecord {
    // Comma-separated floats.
    pub ra_matrix: Option<String>,
    pub dec_matrix: Option<String>,
    // Comma-separated x0,y0,x1,y1 (solver space pixels).
    pub matrix_rect: Option<String>,
    pub matrix_delta: Option<f64>,
}

/// The solver-space pixel rectangle a plate solution was fitted over.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ReferenceRect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

/// A parsed, immutable plate solution. Build one per image revision with
/// `parse()`; it is never mutated afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct PlateSolutionMatrix {
    pub ra_matrix: Vec<f64>,
    pub dec_matrix: Vec<f64>,
    pub rect: ReferenceRect,
    pub delta: f64,
}

impl PlateSolutionMatrix {
    /// Returns FailedPrecondition if any field is missing, InvalidArgument
    /// if a field is present but not parseable.
    pub fn parse(record: &PlateSolutionRecord)
                 -> Result<Self, CanonicalError> {
        let (Some(ra_matrix), Some(dec_matrix), Some(matrix_rect),
             Some(delta)) = (&record.ra_matrix, &record.dec_matrix,
                             &record.matrix_rect, record.matrix_delta)
        else {
            return Err(failed_precondition_error(
                format!("Incomplete plate solution: {}",
                        missing_fields(record).join(", ")).as_str()));
        };

        let ra_matrix = parse_floats(ra_matrix, "ra_matrix")?;
        let dec_matrix = parse_floats(dec_matrix, "dec_matrix")?;
        let rect_values = parse_floats(matrix_rect, "matrix_rect")?;
        let rect = match rect_values[..] {
            [x0, y0, x1, y1] => ReferenceRect{x0, y0, x1, y1},
            _ => {
                return Err(invalid_argument_error(
                    format!("matrix_rect needs 4 values, got {}",
                            rect_values.len()).as_str()));
            }
        };
        if !delta.is_finite() {
            return Err(invalid_argument_error(
                format!("Bad matrix_delta {}", delta).as_str()));
        }
        Ok(PlateSolutionMatrix{ra_matrix, dec_matrix, rect, delta})
    }
}

fn missing_fields(record: &PlateSolutionRecord) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if record.ra_matrix.is_none() { missing.push("ra_matrix"); }
    if record.dec_matrix.is_none() { missing.push("dec_matrix"); }
    if record.matrix_rect.is_none() { missing.push("matrix_rect"); }
    if record.matrix_delta.is_none() { missing.push("matrix_delta"); }
    missing
}

fn parse_floats(text: &str, field: &str) -> Result<Vec<f64>, CanonicalError> {
    text.split(',')
        .map(|item| {
            let item = item.trim();
            match item.parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(value),
                _ => Err(invalid_argument_error(
                    format!("Bad value '{}' in {}", item, field).as_str())),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use canonical_error::CanonicalErrorCode;

    use super::*;

    fn full_record() -> PlateSolutionRecord {
        PlateSolutionRecord {
            ra_matrix: Some("1,0,0,0,0,0".to_string()),
            dec_matrix: Some("0, 1, 0, 0, 0, 0".to_string()),
            matrix_rect: Some("0,0,1824,1824".to_string()),
            matrix_delta: Some(1.0),
        }
    }

    #[test]
    fn test_parse() {
        let matrix = PlateSolutionMatrix::parse(&full_record()).unwrap();
        assert_eq!(matrix.ra_matrix, vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(matrix.dec_matrix, vec![0.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(matrix.rect, ReferenceRect{x0: 0.0, y0: 0.0,
                                              x1: 1824.0, y1: 1824.0});
        assert_eq!(matrix.delta, 1.0);
    }

    #[test]
    fn test_each_field_required() {
        let clears: [fn(&mut PlateSolutionRecord); 4] = [
            |r| r.ra_matrix = None,
            |r| r.dec_matrix = None,
            |r| r.matrix_rect = None,
            |r| r.matrix_delta = None,
        ];
        for clear in clears {
            let mut record = full_record();
            clear(&mut record);
            let err = PlateSolutionMatrix::parse(&record).unwrap_err();
            assert!(matches!(err.code, CanonicalErrorCode::FailedPrecondition));
        }
    }

    #[test]
    fn test_malformed_fields() {
        let mut record = full_record();
        record.ra_matrix = Some("1,two,3".to_string());
        let err = PlateSolutionMatrix::parse(&record).unwrap_err();
        assert!(matches!(err.code, CanonicalErrorCode::InvalidArgument));

        let mut record = full_record();
        record.dec_matrix = Some("".to_string());
        assert!(PlateSolutionMatrix::parse(&record).is_err());

        let mut record = full_record();
        record.matrix_rect = Some("0,0,1824".to_string());
        let err = PlateSolutionMatrix::parse(&record).unwrap_err();
        assert!(matches!(err.code, CanonicalErrorCode::InvalidArgument));

        let mut record = full_record();
        record.ra_matrix = Some("1,NaN".to_string());
        assert!(PlateSolutionMatrix::parse(&record).is_err());

        let mut record = full_record();
        record.matrix_delta = Some(f64::NAN);
        assert!(PlateSolutionMatrix::parse(&record).is_err());
    }
} // mod tests.
