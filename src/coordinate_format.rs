// Copyright (c) 2025 Steven Rosenthal smr@dt3.org
// See LICENSE file in root directory for license terms.

// Display markup for equatorial and galactic coordinates. The output is
// injected directly into overlay tooltips, so only digit/period components
// are accepted from solver text.

use std::fmt::Display;

use canonical_error::{CanonicalError, invalid_argument_error};

use crate::solver_trait::CelestialComponents;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EquatorialHtml {
    pub ra_html: String,
    pub dec_html: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GalacticHtml {
    pub galactic_ra_html: String,
    pub galactic_dec_html: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormattedCoordinates {
    pub ra_html: String,
    pub dec_html: String,
    // Empty when the solver reported no galactic coordinates.
    pub galactic_ra_html: String,
    pub galactic_dec_html: String,
}

fn pad(value: impl Display, width: usize) -> String {
    format!("{:0>w$}", value.to_string(), w = width)
}

fn symbol(name: &str) -> String {
    format!("<span class=\"symbol\">{}</span>", name)
}

fn unit(name: &str) -> String {
    format!("<span class=\"unit\">{}</span>", name)
}

/// Equatorial markup from h/m/s and d/m/s components. All components are
/// zero-padded to width 2, Dec degrees included. `dec_sign` is prefixed to
/// the degrees with no space.
pub fn format_equatorial<R: Display, D: Display>(
    ra: [R; 3], dec: [D; 3], dec_sign: &str) -> EquatorialHtml {
    let [ra_h, ra_m, ra_s] = ra;
    let [dec_d, dec_m, dec_s] = dec;
    EquatorialHtml {
        ra_html: format!("{}&nbsp;{}{} {}{} {}{}",
                         symbol("α"),
                         pad(ra_h, 2), unit("h"),
                         pad(ra_m, 2), unit("m"),
                         pad(ra_s, 2), unit("s")),
        dec_html: format!("{}&nbsp;{}{}{} {}{} {}{}",
                          symbol("δ"),
                          dec_sign, pad(dec_d, 2), unit("°"),
                          pad(dec_m, 2), unit("'"),
                          pad(dec_s, 2), unit("\"")),
    }
}

/// Galactic markup. Longitude degrees are padded to width 3 (0..360), all
/// other components to width 2.
pub fn format_galactic<L: Display, B: Display>(
    l: [L; 3], b: [B; 3], b_sign: &str) -> GalacticHtml {
    let [l_d, l_m, l_s] = l;
    let [b_d, b_m, b_s] = b;
    GalacticHtml {
        galactic_ra_html: format!("{}&nbsp;{}{} {}{} {}{}",
                                  symbol("l"),
                                  pad(l_d, 3), unit("°"),
                                  pad(l_m, 2), unit("'"),
                                  pad(l_s, 2), unit("\"")),
        galactic_dec_html: format!("{}&nbsp;{}{}{} {}{} {}{}",
                                   symbol("b"),
                                   b_sign, pad(b_d, 2), unit("°"),
                                   pad(b_m, 2), unit("'"),
                                   pad(b_s, 2), unit("\"")),
    }
}

/// A solver text field split into its optional leading sign and three
/// components.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SplitComponents<'a> {
    pub sign: Option<char>,
    pub parts: [&'a str; 3],
}

impl SplitComponents<'_> {
    pub fn is_negative(&self) -> bool {
        self.sign == Some('-')
    }

    /// `units + minutes/60 + seconds/3600`, unsigned.
    pub fn magnitude(&self) -> Result<f64, CanonicalError> {
        let mut value = 0.0;
        for (part, divisor) in self.parts.iter().zip([1.0, 60.0, 3600.0]) {
            let parsed: f64 = part.parse().map_err(|_| invalid_argument_error(
                format!("Bad coordinate component '{}'", part).as_str()))?;
            value += parsed / divisor;
        }
        Ok(value)
    }
}

/// Splits e.g. "-05 46 00" into sign '-' and ["05", "46", "00"]. Errors
/// unless there are exactly three components of digits and periods.
pub fn split_components(text: &str)
                        -> Result<SplitComponents<'_>, CanonicalError> {
    let trimmed = text.trim_start();
    let (sign, rest) = match trimmed.chars().next() {
        Some(c @ ('+' | '-')) => (Some(c), &trimmed[1..]),
        _ => (None, trimmed),
    };
    let parts: Vec<&str> = rest.split_whitespace().collect();
    let valid = |p: &&str| {
        p.chars().all(|c| c.is_ascii_digit() || c == '.')
            && p.chars().any(|c| c.is_ascii_digit())
    };
    match parts[..] {
        [a, b, c] if parts.iter().all(valid) => {
            Ok(SplitComponents{sign, parts: [a, b, c]})
        }
        _ => Err(invalid_argument_error(
            format!("Expected three numeric components in '{}'", text)
                .as_str())),
    }
}

/// Formats the solver's text result. Dec is negative if `delta` carries a
/// leading '-' or the solver flagged it negative; otherwise it is positive
/// and gets no sign. Galactic latitude always gets a normalized '+' or '-'.
pub fn format_from_components(components: &CelestialComponents)
                              -> Result<FormattedCoordinates, CanonicalError> {
    let alpha = split_components(&components.alpha)?;
    let delta = split_components(&components.delta)?;
    let dec_negative = delta.is_negative() || components.delta_negative;
    let equatorial = format_equatorial(
        alpha.parts.map(|p| pad(p, 2)),
        delta.parts.map(|p| pad(p, 2)),
        if dec_negative { "-" } else { "" });

    let galactic = match (&components.l, &components.b) {
        (Some(l), Some(b)) => {
            let l = split_components(l)?;
            let b = split_components(b)?;
            format_galactic(l.parts.map(|p| pad(p, 2)),
                            b.parts.map(|p| pad(p, 2)),
                            if b.is_negative() { "-" } else { "+" })
        }
        _ => GalacticHtml::default(),
    };

    Ok(FormattedCoordinates {
        ra_html: equatorial.ra_html,
        dec_html: equatorial.dec_html,
        galactic_ra_html: galactic.galactic_ra_html,
        galactic_dec_html: galactic.galactic_dec_html,
    })
}

#[cfg(test)]
mod tests {
    use canonical_error::CanonicalErrorCode;

    use super::*;

    fn orion_components() -> CelestialComponents {
        CelestialComponents {
            alpha: "05 34 31".to_string(),
            delta: "22 00 52".to_string(),
            delta_negative: false,
            l: Some("184 33 00".to_string()),
            b: Some("-05 46 00".to_string()),
        }
    }

    // Pulls the numeric values (each followed by a unit span) back out of
    // the markup.
    fn values(html: &str) -> Vec<String> {
        let chunks: Vec<&str> = html.split("<span class=\"unit\">").collect();
        chunks[..chunks.len() - 1].iter()
            .filter_map(|chunk| {
                chunk.rsplit(|c: char| c == ';' || c == '>').next()
            })
            .map(|s| s.trim().to_string())
            .collect()
    }

    #[test]
    fn test_format_equatorial() {
        let html = format_equatorial([5, 4, 3], [7, 0, 9], "-");
        assert_eq!(html.ra_html,
                   "<span class=\"symbol\">α</span>&nbsp;\
                    05<span class=\"unit\">h</span> \
                    04<span class=\"unit\">m</span> \
                    03<span class=\"unit\">s</span>");
        assert_eq!(html.dec_html,
                   "<span class=\"symbol\">δ</span>&nbsp;\
                    -07<span class=\"unit\">°</span> \
                    00<span class=\"unit\">'</span> \
                    09<span class=\"unit\">\"</span>");
    }

    #[test]
    fn test_dec_degrees_pad_to_two() {
        let html = format_equatorial([0, 0, 0], [5, 0, 0], "");
        assert!(html.dec_html.contains("&nbsp;05<"));
        assert!(!html.dec_html.contains("005"));
    }

    #[test]
    fn test_format_galactic_pads_longitude_to_three() {
        let html = format_galactic([5, 3, 0], [1, 2, 3], "+");
        assert!(html.galactic_ra_html.contains("&nbsp;005<"));
        assert!(html.galactic_dec_html.contains("&nbsp;+01<"));
        let html = format_galactic(["184", "33", "00"], ["05", "46", "00"],
                                   "-");
        assert!(html.galactic_ra_html.contains("&nbsp;184<"));
        assert!(html.galactic_dec_html.contains("&nbsp;-05<"));
    }

    #[test]
    fn test_format_from_components() {
        let formatted = format_from_components(&orion_components()).unwrap();
        assert_eq!(values(&formatted.ra_html), ["05", "34", "31"]);
        assert_eq!(values(&formatted.dec_html), ["22", "00", "52"]);
        assert_eq!(values(&formatted.galactic_ra_html), ["184", "33", "00"]);
        assert_eq!(values(&formatted.galactic_dec_html), ["-05", "46", "00"]);
    }

    #[test]
    fn test_dec_sign_sources() {
        // Separate flag.
        let mut c = orion_components();
        c.delta_negative = true;
        let formatted = format_from_components(&c).unwrap();
        assert_eq!(values(&formatted.dec_html), ["-22", "00", "52"]);

        // Leading '-' in the text.
        let mut c = orion_components();
        c.delta = "-1 2 3".to_string();
        let formatted = format_from_components(&c).unwrap();
        assert_eq!(values(&formatted.dec_html), ["-01", "02", "03"]);

        // Explicit '+' is dropped for Dec, normalized for galactic b.
        let mut c = orion_components();
        c.delta = "+1 2 3".to_string();
        c.b = Some("+7 8 9".to_string());
        let formatted = format_from_components(&c).unwrap();
        assert_eq!(values(&formatted.dec_html), ["01", "02", "03"]);
        assert_eq!(values(&formatted.galactic_dec_html), ["+07", "08", "09"]);

        c.b = Some("7 8 9".to_string());
        let formatted = format_from_components(&c).unwrap();
        assert_eq!(values(&formatted.galactic_dec_html), ["+07", "08", "09"]);
    }

    #[test]
    fn test_unflagged_dec_is_positive() {
        let c = CelestialComponents {
            alpha: "05 34 31".to_string(),
            delta: "22 00 52".to_string(),
            l: Some("184 33 00".to_string()),
            b: Some("-05 46 00".to_string()),
            ..Default::default()
        };
        let formatted = format_from_components(&c).unwrap();
        assert_eq!(values(&formatted.dec_html), ["22", "00", "52"]);
        assert!(!formatted.dec_html.contains('-'));
        assert_eq!(values(&formatted.galactic_dec_html), ["-05", "46", "00"]);
    }

    #[test]
    fn test_no_galactic() {
        let mut c = orion_components();
        c.l = None;
        c.b = None;
        let formatted = format_from_components(&c).unwrap();
        assert_eq!(formatted.galactic_ra_html, "");
        assert_eq!(formatted.galactic_dec_html, "");
    }

    #[test]
    fn test_malformed_components() {
        for bad in ["05 34", "05 34 31 00", "", "05 <b> 31", "NaN 1 2",
                    "05 34 3x"] {
            let mut c = orion_components();
            c.alpha = bad.to_string();
            let err = format_from_components(&c).unwrap_err();
            assert!(matches!(err.code, CanonicalErrorCode::InvalidArgument),
                    "{}", bad);
        }
    }

    #[test]
    fn test_split_components() {
        let split = split_components("-05 46 00.5").unwrap();
        assert!(split.is_negative());
        assert_eq!(split.parts, ["05", "46", "00.5"]);
        let magnitude = split.magnitude().unwrap();
        assert!((magnitude - (5.0 + 46.0 / 60.0 + 0.5 / 3600.0)).abs()
                < 1e-12);
        assert_eq!(split_components("12 0 0").unwrap().sign, None);
    }

    #[test]
    fn test_padding_round_trip() {
        for v in 0..100 {
            let html = format_equatorial([v, v, v], [v, v, v], "");
            for s in values(&html.ra_html).iter()
                .chain(values(&html.dec_html).iter()) {
                assert_eq!(s.parse::<u32>().unwrap(), v);
            }
        }
        for v in 0..1000 {
            let html = format_galactic([v, 0, 0], [0, 0, 0], "+");
            let l = values(&html.galactic_ra_html);
            assert_eq!(l[0].len(), 3);
            assert_eq!(l[0].parse::<u32>().unwrap(), v);
        }
    }
} // mod tests.
