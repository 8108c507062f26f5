// Copyright (c) 2025 Ken Barker

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! The `rhumb` module contains functions for calculating distances, bearings
//! and positions along rhumb lines (loxodromes) on the surface of a sphere.
//!
//! A rhumb line crosses every meridian at the same angle, so it is a straight
//! line on a Mercator projection. The calculations use the difference in
//! Mercator "stretched" latitude between positions: `delta_phi`.
//!
//! All angles are in `Radians` and all distances are angular distances.

use crate::angle::normalise_longitude;
use angle_sc::Radians;
use core::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

/// The smallest latitude change that a rhumb line destination resolves,
/// approximately 1mm on the Earth. Smaller changes are ill-conditioned.
pub const MIN_DELTA_LATITUDE: f64 = 1e-10;

/// Calculate the difference in Mercator projected latitude between a pair of
/// latitudes.
/// * `lat1`, `lat2` - the latitudes.
///
/// returns `ln(tan(lat2/2 + π/4) / tan(lat1/2 + π/4))`.
#[must_use]
pub fn calculate_delta_phi(lat1: Radians, lat2: Radians) -> f64 {
    libm::log(libm::tan(0.5 * lat2.0 + FRAC_PI_4) / libm::tan(0.5 * lat1.0 + FRAC_PI_4))
}

/// Calculate the ratio between the latitude change and the Mercator latitude
/// change along a rhumb line.
///
/// On an East-West rhumb line `delta_phi` is zero so the ratio is undefined,
/// the cosine of the latitude is used instead.
#[must_use]
fn calculate_stretch_factor(delta_lat: f64, delta_phi: f64, lat1: Radians) -> f64 {
    let q = delta_lat / delta_phi;
    if q.is_finite() {
        q
    } else {
        libm::cos(lat1.0)
    }
}

/// Calculate the length of the rhumb line between a pair of positions.
/// * `lat1`, `lat2` - the latitudes of the positions.
/// * `delta_lon` - the longitude difference from the first position to the second.
///
/// returns the angular distance along the shorter rhumb line, i.e. the one
/// that crosses the antimeridian if the longitude difference exceeds π.
#[must_use]
pub fn calculate_rhumb_distance(lat1: Radians, lat2: Radians, delta_lon: Radians) -> Radians {
    let delta_lat = lat2.0 - lat1.0;
    let delta_phi = calculate_delta_phi(lat1, lat2);
    let q = calculate_stretch_factor(delta_lat, delta_phi, lat1);

    let mut delta_lon = libm::fabs(delta_lon.0);
    if PI < delta_lon {
        delta_lon = TAU - delta_lon;
    }
    Radians(libm::sqrt(delta_lat * delta_lat + q * q * delta_lon * delta_lon))
}

/// Calculate the bearing of the rhumb line between a pair of positions.
/// * `lat1`, `lat2` - the latitudes of the positions.
/// * `delta_lon` - the longitude difference from the first position to the second.
///
/// returns the bearing from North in the range (-π, π].
#[must_use]
pub fn calculate_rhumb_bearing(lat1: Radians, lat2: Radians, delta_lon: Radians) -> Radians {
    let delta_phi = calculate_delta_phi(lat1, lat2);

    // take the shorter rhumb line across the antimeridian
    let mut delta_lon = delta_lon.0;
    if PI < libm::fabs(delta_lon) {
        delta_lon = if 0.0 < delta_lon {
            delta_lon - TAU
        } else {
            TAU + delta_lon
        };
    }
    Radians(libm::atan2(delta_lon, delta_phi))
}

/// Calculate the position at an angular distance along a rhumb line.
/// * `lat1`, `lon1` - the start position.
/// * `bearing` - the constant bearing of the rhumb line.
/// * `distance` - the angular distance along the rhumb line.
///
/// returns the latitude and longitude of the destination, the longitude is
/// normalised to the range [-π, π).
#[must_use]
pub fn calculate_rhumb_destination(
    lat1: Radians,
    lon1: Radians,
    bearing: Radians,
    distance: Radians,
) -> (Radians, Radians) {
    let mut delta_lat = distance.0 * libm::cos(bearing.0);
    if libm::fabs(delta_lat) < MIN_DELTA_LATITUDE {
        delta_lat = 0.0;
    }
    let mut lat2 = lat1.0 + delta_lat;

    let delta_phi = calculate_delta_phi(lat1, Radians(lat2));
    let q = calculate_stretch_factor(delta_lat, delta_phi, lat1);
    let delta_lon = distance.0 * libm::sin(bearing.0) / q;

    // reflect a latitude that has passed over a pole
    if FRAC_PI_2 < libm::fabs(lat2) {
        lat2 = if 0.0 < lat2 { PI - lat2 } else { -PI - lat2 };
    }
    (
        Radians(lat2),
        normalise_longitude(Radians(lon1.0 + delta_lon)),
    )
}

/// Calculate the mid point of the rhumb line between a pair of positions.
/// * `lat1`, `lon1` - the first position.
/// * `lat2`, `lon2` - the second position.
///
/// returns the latitude and longitude of the mid point, the longitude is
/// normalised to the range [-π, π).
#[must_use]
pub fn calculate_rhumb_midpoint(
    lat1: Radians,
    lon1: Radians,
    lat2: Radians,
    lon2: Radians,
) -> (Radians, Radians) {
    let mut lon1 = lon1.0;
    if PI < libm::fabs(lon2.0 - lon1) {
        // crossing the antimeridian
        lon1 += TAU;
    }
    let lat3 = 0.5 * (lat1.0 + lat2.0);

    let f1 = libm::tan(FRAC_PI_4 + 0.5 * lat1.0);
    let f2 = libm::tan(FRAC_PI_4 + 0.5 * lat2.0);
    let f3 = libm::tan(FRAC_PI_4 + 0.5 * lat3);
    let mut lon3 = ((lon2.0 - lon1) * libm::log(f3) + lon1 * libm::log(f2)
        - lon2.0 * libm::log(f1))
        / libm::log(f2 / f1);
    if !lon3.is_finite() {
        // along a parallel of latitude
        lon3 = 0.5 * (lon1 + lon2.0);
    }
    (Radians(lat3), normalise_longitude(Radians(lon3)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::{to_degrees, to_radians};
    use angle_sc::{is_within_tolerance, Degrees};

    fn rad(degrees: f64) -> Radians {
        to_radians(Degrees(degrees))
    }

    #[test]
    fn test_calculate_delta_phi() {
        assert_eq!(0.0, calculate_delta_phi(rad(10.0), rad(10.0)));
        assert!(0.0 < calculate_delta_phi(rad(10.0), rad(20.0)));
        assert!(calculate_delta_phi(rad(20.0), rad(10.0)) < 0.0);
        // Mercator latitude is further stretched away from the Equator
        let polar = calculate_delta_phi(rad(60.0), rad(70.0));
        assert!(rad(10.0).0 < polar);
        assert!(calculate_delta_phi(rad(0.0), rad(10.0)) < polar);
    }

    #[test]
    fn test_calculate_rhumb_distance_meridian_and_parallel() {
        // along a meridian a rhumb line is a great circle
        let result = calculate_rhumb_distance(rad(10.0), rad(30.0), rad(0.0));
        assert!(is_within_tolerance(20.0, to_degrees(result).0, 1e-12));

        // along a parallel the distance is scaled by the cosine of the latitude
        let result = calculate_rhumb_distance(rad(60.0), rad(60.0), rad(10.0));
        assert!(is_within_tolerance(5.0, to_degrees(result).0, 1e-12));

        // the shorter way across the antimeridian
        let result = calculate_rhumb_distance(rad(0.0), rad(0.0), rad(-340.0));
        assert!(is_within_tolerance(20.0, to_degrees(result).0, 1e-12));
    }

    #[test]
    fn test_calculate_rhumb_bearing() {
        let result = calculate_rhumb_bearing(rad(0.0), rad(0.0), rad(10.0));
        assert!(is_within_tolerance(90.0, to_degrees(result).0, 1e-12));

        let result = calculate_rhumb_bearing(rad(10.0), rad(0.0), rad(0.0));
        assert!(is_within_tolerance(180.0, to_degrees(result).0, 1e-12));

        // Eastbound across the antimeridian
        let result = calculate_rhumb_bearing(rad(0.0), rad(0.0), rad(-340.0));
        assert!(is_within_tolerance(90.0, to_degrees(result).0, 1e-12));

        // Westbound across the antimeridian
        let result = calculate_rhumb_bearing(rad(0.0), rad(0.0), rad(340.0));
        assert!(is_within_tolerance(-90.0, to_degrees(result).0, 1e-12));
    }

    #[test]
    fn test_calculate_rhumb_destination() {
        // due East along a parallel
        let distance = Radians(100.0 / 6371.0);
        let (lat, lon) = calculate_rhumb_destination(rad(10.0), rad(0.0), rad(90.0), distance);
        assert_eq!(10.0, to_degrees(lat).0);
        assert!(is_within_tolerance(0.913_195_091_293_656, to_degrees(lon).0, 1e-12));

        // due North over the pole
        let distance = Radians(500.0 / 6371.0);
        let (lat, lon) = calculate_rhumb_destination(rad(89.0), rad(0.0), rad(0.0), distance);
        assert!(is_within_tolerance(86.503_391_970_406_33, to_degrees(lat).0, 1e-9));
        assert_eq!(0.0, to_degrees(lon).0);
    }

    #[test]
    fn test_calculate_rhumb_midpoint() {
        let (lat, lon) = calculate_rhumb_midpoint(rad(10.0), rad(0.0), rad(10.0), rad(20.0));
        assert!(is_within_tolerance(10.0, to_degrees(lat).0, 1e-12));
        assert!(is_within_tolerance(10.0, to_degrees(lon).0, 1e-12));

        let (lat, lon) = calculate_rhumb_midpoint(rad(0.0), rad(170.0), rad(0.0), rad(-170.0));
        assert_eq!(0.0, to_degrees(lat).0);
        assert!(is_within_tolerance(180.0, libm::fabs(to_degrees(lon).0), 1e-12));

        let (lat, lon) =
            calculate_rhumb_midpoint(rad(51.5136), rad(-0.0983), rad(51.4778), rad(-0.0015));
        assert!(is_within_tolerance(51.4957, to_degrees(lat).0, 1e-12));
        assert!(is_within_tolerance(-0.049_890_496_716_404_55, to_degrees(lon).0, 1e-9));
    }
}
