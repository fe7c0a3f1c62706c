// Copyright (c) 2025 Steven Rosenthal smr@dt3.org
// See LICENSE file in root directory for license terms.

// Sexagesimal display strings for right ascension, declination and angular
// sizes.

/// A value (degrees or hours) split into whole units, minutes and whole
/// seconds. Seconds are rounded, with carry into minutes and units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sexagesimal {
    pub negative: bool,
    pub units: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Sexagesimal {
    pub fn from_value(value: f64) -> Self {
        let total_seconds = (value.abs() * 3600.0).round() as u64;
        Sexagesimal {
            // A value that rounds to zero carries no sign.
            negative: value < 0.0 && total_seconds > 0,
            units: (total_seconds / 3600) as u32,
            minutes: ((total_seconds % 3600) / 60) as u32,
            seconds: (total_seconds % 60) as u32,
        }
    }

    pub fn to_value(&self) -> f64 {
        let magnitude = self.units as f64
            + self.minutes as f64 / 60.0
            + self.seconds as f64 / 3600.0;
        if self.negative { -magnitude } else { magnitude }
    }

    /// Unsigned "UU MM SS" form, units zero-padded to `units_width`.
    pub fn padded(&self, units_width: usize) -> String {
        format!("{:0w$} {:02} {:02}",
                self.units, self.minutes, self.seconds, w = units_width)
    }
}

// Two decimals, except that an exact ".00" tail is dropped.
fn two_decimals(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    match formatted.strip_suffix(".00") {
        Some(whole) => whole.to_string(),
        None => formatted,
    }
}

/// Formats a right ascension given as total minutes of time, e.g. 90 ->
/// "1h 30m". Returns an empty string for `None`.
///
/// Negative input is not normalized: the hours are floored and the minutes
/// keep the sign of the remainder, so -90 yields "-2h -30m".
pub fn format_ra(total_minutes: Option<f64>) -> String {
    let Some(total_minutes) = total_minutes else {
        return String::new();
    };
    let hours = (total_minutes / 60.0).floor();
    let minutes = total_minutes % 60.0;
    format!("{}h {}m", hours as i64, two_decimals(minutes))
}

/// Formats a declination given in decimal degrees, e.g. 40.5 -> "40° 30'".
/// Returns an empty string for `None`.
///
/// The degrees are `floor(value)` and no sign handling is done beyond that:
/// -40.5 yields "-41° 30'". Callers wanting "-40° 30'" must split the sign
/// off themselves.
pub fn format_dec(value: Option<f64>) -> String {
    let Some(value) = value else {
        return String::new();
    };
    let degrees = value.floor();
    let minutes = (value - degrees).abs() * 60.0;
    format!("{}° {}'", degrees as i64, two_decimals(minutes))
}

/// Formats an angular size given in arcseconds using the coarsest units
/// that fit: "45″", "2′ 5″" or "1° 2′ 5″". The value is rounded to whole
/// arcseconds first.
pub fn format_astronomical_angle(arcseconds: f64) -> String {
    // Halves round up.
    let total = (arcseconds + 0.5).floor() as i64;
    if total < 60 {
        format!("{}″", total)
    } else if total < 3600 {
        format!("{}′ {}″", total / 60, total % 60)
    } else {
        format!("{}° {}′ {}″", total / 3600, (total % 3600) / 60, total % 60)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use astro::angle::{deg_frm_dms, deg_frm_hms};

    use super::*;

    #[test]
    fn test_format_ra() {
        assert_eq!(format_ra(None), "");
        assert_eq!(format_ra(Some(90.0)), "1h 30m");
        assert_eq!(format_ra(Some(0.0)), "0h 0m");
        assert_eq!(format_ra(Some(125.5)), "2h 5.50m");
        assert_eq!(format_ra(Some(1439.0)), "23h 59m");
    }

    #[test]
    fn test_format_dec() {
        assert_eq!(format_dec(None), "");
        assert_eq!(format_dec(Some(40.5)), "40° 30'");
        assert_eq!(format_dec(Some(0.0)), "0° 0'");
        assert_eq!(format_dec(Some(12.25)), "12° 15'");
        assert_eq!(format_dec(Some(10.1)), "10° 6'");
        assert_eq!(format_dec(Some(10.01)), "10° 0.60'");
    }

    #[test]
    fn test_format_ra_negative_keeps_remainder_sign() {
        assert_eq!(format_ra(Some(-90.0)), "-2h -30m");
        assert_eq!(format_ra(Some(-30.0)), "-1h -30m");
    }

    #[test]
    fn test_format_dec_negative_uses_floor() {
        // No explicit sign handling; floor() moves the degrees down.
        assert_eq!(format_dec(Some(-40.5)), "-41° 30'");
    }

    #[test]
    fn test_format_astronomical_angle() {
        assert_eq!(format_astronomical_angle(45.0), "45″");
        assert_eq!(format_astronomical_angle(125.0), "2′ 5″");
        assert_eq!(format_astronomical_angle(3725.0), "1° 2′ 5″");
        assert_eq!(format_astronomical_angle(0.0), "0″");
        assert_eq!(format_astronomical_angle(59.4), "59″");
        // Rounding can promote to the next unit.
        assert_eq!(format_astronomical_angle(59.5), "1′ 0″");
        assert_eq!(format_astronomical_angle(3599.6), "1° 0′ 0″");
        assert_eq!(format_astronomical_angle(7200.0), "2° 0′ 0″");
    }

    #[test]
    fn test_sexagesimal_split() {
        let s = Sexagesimal::from_value(deg_frm_dms(54, 55, 31.0));
        assert_eq!(s, Sexagesimal{negative: false, units: 54, minutes: 55,
                                  seconds: 31});
        assert_eq!(s.padded(2), "54 55 31");
        assert_eq!(s.padded(3), "054 55 31");

        // Hours, via degrees.
        let s = Sexagesimal::from_value(deg_frm_hms(13, 23, 55.0) / 15.0);
        assert_eq!(s.padded(2), "13 23 55");

        let s = Sexagesimal::from_value(-5.5);
        assert!(s.negative);
        assert_eq!(s.padded(2), "05 30 00");
        assert_abs_diff_eq!(s.to_value(), -5.5, epsilon = 1e-9);
    }

    #[test]
    fn test_sexagesimal_carry() {
        // 59.6 seconds rounds into the next minute, and on into the next
        // unit.
        let s = Sexagesimal::from_value(10.0 + 59.0 / 60.0 + 59.6 / 3600.0);
        assert_eq!(s.padded(2), "11 00 00");

        let s = Sexagesimal::from_value(-0.00001);
        assert!(!s.negative);
        assert_eq!(s.padded(2), "00 00 00");
    }
} // mod tests.
