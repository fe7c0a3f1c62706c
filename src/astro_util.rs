// Copyright (c) 2024 Steven Rosenthal smr@dt3.org
// See LICENSE file in root directory for license terms.

use std::f64::consts::PI;

extern crate nalgebra as na;

// Rotation from J2000 equatorial (ESA convention, FK5 ~ ICRS) to galactic
// unit vectors. Row-major.
const EQUATORIAL_TO_GALACTIC: [f64; 9] = [
    -0.054_875_560_416_215_368,
    -0.873_437_090_234_885,
    -0.483_835_015_548_713_2,
    0.494_109_427_875_583_65,
    -0.444_829_629_960_011_2,
    0.746_982_244_497_218_8,
    -0.867_666_149_019_004_7,
    -0.198_076_373_431_201_52,
    0.455_983_776_175_066_9,
];

/// Convert ra/dec (radians) to x/y/z on unit sphere.
pub fn to_unit_vector(ra: f64, dec: f64) -> [f64; 3] {
    [
        (ra.cos() * dec.cos()), // x
        (ra.sin() * dec.cos()), // y
        dec.sin(),
    ] // z
}

/// Convert x/y/z on unit sphere to ra/dec (radians). Returned ra is 0..2pi.
pub fn from_unit_vector(v: &[f64; 3]) -> (f64, f64) {
    let x = v[0];
    let y = v[1];
    // Rotation can leave z a hair outside of -1..1.
    let z = v[2].clamp(-1.0, 1.0);
    let dec = z.asin();
    let mut ra = y.atan2(x);
    if ra < 0.0 {
        ra += 2.0 * PI;
    }
    (ra, dec)
}

/// Converts right ascension in degrees to minutes of time (360 degrees is
/// 1440 minutes).
pub fn ra_degrees_to_minutes(ra_degrees: f64) -> f64 {
    ra_degrees * 4.0
}

pub fn hours_to_degrees(hours: f64) -> f64 {
    hours * 15.0
}

pub fn degrees_to_hours(degrees: f64) -> f64 {
    degrees / 15.0
}

/// Returns the great-circle separation, in degrees, between two celestial
/// positions given as ra (hours, 0..24) and dec (degrees).
/// Uses the haversine formula with atan2, which stays well conditioned for
/// nearly antipodal points.
pub fn angular_distance(ra1_hours: f64, dec1_deg: f64,
                        ra2_hours: f64, dec2_deg: f64) -> f64 {
    let ra1 = ra1_hours * PI / 12.0;
    let ra2 = ra2_hours * PI / 12.0;
    let dec1 = dec1_deg * PI / 180.0;
    let dec2 = dec2_deg * PI / 180.0;

    let sin_half_ddec = ((dec2 - dec1) / 2.0).sin();
    let sin_half_dra = ((ra2 - ra1) / 2.0).sin();
    let a = (sin_half_ddec * sin_half_ddec
             + dec1.cos() * dec2.cos() * sin_half_dra * sin_half_dra)
        .clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    c * 180.0 / PI
}

/// Converts J2000 equatorial ra/dec (degrees) to galactic (l, b), degrees.
/// Returned l is 0..360.
pub fn galactic_from_equatorial(ra: f64, dec: f64) -> (f64, f64) {
    let rot_matrix = na::Matrix3::from_row_slice(&EQUATORIAL_TO_GALACTIC);
    let v = to_unit_vector(ra.to_radians(), dec.to_radians());
    let g = rot_matrix * na::Vector3::new(v[0], v[1], v[2]);
    let (l, b) = from_unit_vector(&[g[0], g[1], g[2]]);
    (l.to_degrees(), b.to_degrees())
}

// mod tests.
