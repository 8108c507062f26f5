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

//! The `great_circle` module contains functions for calculating distances,
//! bearings and positions along great circle paths on the surface of a sphere.
//!
//! All angles are in `Radians` and all distances are angular distances, i.e.
//! the distance on the sphere divided by its radius.
//!
//! The formulae are from Ed Williams'
//! [Aviation Formulary](https://edwilliams.org/avform147.htm).

use crate::angle::{normalise_difference, normalise_longitude};
use angle_sc::Radians;
use core::f64::consts::TAU;
use unit_sphere::great_circle;

/// The minimum sine of the angle between a path and the great circle
/// through both start points, below which the paths are on the same great
/// circle.
pub const MIN_SIN_ANGLE: f64 = 16.0 * f64::EPSILON;

/// The reasons why a pair of great circle paths do not have a unique
/// intersection point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoIntersection {
    /// The start points of the paths are the same point.
    Coincident,
    /// The paths lie on the same great circle.
    Infinite,
    /// The paths diverge, so either antipodal intersection is equally valid.
    Ambiguous,
}

/// Calculate the great circle distance between a pair of positions using
/// the haversine formula.
/// * `lat1`, `lat2` - the latitudes of the positions.
/// * `delta_lon` - the longitude difference from the first position to the second.
///
/// returns the angular distance between the positions.
#[must_use]
pub fn calculate_haversine_distance(lat1: Radians, lat2: Radians, delta_lon: Radians) -> Radians {
    let sin_half_delta_lat = libm::sin(0.5 * (lat2.0 - lat1.0));
    let sin_half_delta_lon = libm::sin(0.5 * delta_lon.0);
    let a = sin_half_delta_lat * sin_half_delta_lat
        + libm::cos(lat1.0) * libm::cos(lat2.0) * sin_half_delta_lon * sin_half_delta_lon;
    Radians(2.0 * libm::atan2(libm::sqrt(a), libm::sqrt(1.0 - a)))
}

/// Calculate the initial bearing of the great circle path between a pair of
/// positions.
/// * `lat1`, `lat2` - the latitudes of the positions.
/// * `delta_lon` - the longitude difference from the first position to the second.
///
/// returns the bearing from North in the range (-π, π].
#[must_use]
pub fn calculate_initial_bearing(lat1: Radians, lat2: Radians, delta_lon: Radians) -> Radians {
    let cos_lat2 = libm::cos(lat2.0);
    let y = libm::sin(delta_lon.0) * cos_lat2;
    let x = libm::cos(lat1.0) * libm::sin(lat2.0)
        - libm::sin(lat1.0) * cos_lat2 * libm::cos(delta_lon.0);
    Radians(libm::atan2(y, x))
}

/// Calculate the mid point of the great circle path between a pair of positions.
/// * `lat1`, `lon1` - the first position.
/// * `lat2` - the latitude of the second position.
/// * `delta_lon` - the longitude difference from the first position to the second.
///
/// returns the latitude and longitude of the mid point, the longitude is
/// normalised to the range [-π, π).
#[must_use]
pub fn calculate_midpoint(
    lat1: Radians,
    lon1: Radians,
    lat2: Radians,
    delta_lon: Radians,
) -> (Radians, Radians) {
    let cos_lat1 = libm::cos(lat1.0);
    let cos_lat2 = libm::cos(lat2.0);
    let bx = cos_lat2 * libm::cos(delta_lon.0);
    let by = cos_lat2 * libm::sin(delta_lon.0);

    let lat3 = libm::atan2(
        libm::sin(lat1.0) + libm::sin(lat2.0),
        libm::sqrt((cos_lat1 + bx) * (cos_lat1 + bx) + by * by),
    );
    let lon3 = lon1.0 + libm::atan2(by, cos_lat1 + bx);
    (Radians(lat3), normalise_longitude(Radians(lon3)))
}

/// Calculate the position at an angular distance along a great circle path.
/// * `lat1`, `lon1` - the start position.
/// * `bearing` - the initial bearing from the start position.
/// * `distance` - the angular distance along the path.
///
/// returns the latitude and longitude of the destination, the longitude is
/// normalised to the range [-π, π).
#[must_use]
pub fn calculate_destination(
    lat1: Radians,
    lon1: Radians,
    bearing: Radians,
    distance: Radians,
) -> (Radians, Radians) {
    let (sin_lat1, cos_lat1) = (libm::sin(lat1.0), libm::cos(lat1.0));
    let (sin_d, cos_d) = (libm::sin(distance.0), libm::cos(distance.0));

    let lat2 = libm::asin(sin_lat1 * cos_d + cos_lat1 * sin_d * libm::cos(bearing.0));
    let lon2 = lon1.0
        + libm::atan2(
            libm::sin(bearing.0) * sin_d * cos_lat1,
            cos_d - sin_lat1 * libm::sin(lat2),
        );
    (Radians(lat2), normalise_longitude(Radians(lon2)))
}

/// Calculate the intersection point of a pair of great circle paths, each
/// defined by a start position and an initial bearing.
/// * `lat1`, `lon1`, `bearing1` - the start position and bearing of the first path.
/// * `lat2`, `lon2`, `bearing2` - the start position and bearing of the second path.
///
/// returns the latitude and longitude of the intersection point, the
/// longitude is normalised to the range [-π, π).
///
/// # Errors
///
/// Returns `NoIntersection::Coincident` if the start positions are the same,
/// `NoIntersection::Infinite` if the paths are on the same great circle and
/// `NoIntersection::Ambiguous` if the paths lead away from each other.
#[allow(clippy::similar_names)]
pub fn calculate_intersection(
    lat1: Radians,
    lon1: Radians,
    bearing1: Radians,
    lat2: Radians,
    lon2: Radians,
    bearing2: Radians,
) -> Result<(Radians, Radians), NoIntersection> {
    let (sin_lat1, cos_lat1) = (libm::sin(lat1.0), libm::cos(lat1.0));
    let (sin_lat2, cos_lat2) = (libm::sin(lat2.0), libm::cos(lat2.0));
    let sin_half_delta_lat = libm::sin(0.5 * (lat2.0 - lat1.0));
    let sin_half_delta_lon = libm::sin(0.5 * (lon2.0 - lon1.0));
    let dist12 = 2.0
        * libm::asin(libm::sqrt(
            sin_half_delta_lat * sin_half_delta_lat
                + cos_lat1 * cos_lat2 * sin_half_delta_lon * sin_half_delta_lon,
        ));
    if dist12 < great_circle::MIN_VALUE {
        return Err(NoIntersection::Coincident);
    }
    let (sin_dist12, cos_dist12) = (libm::sin(dist12), libm::cos(dist12));

    // the initial and final bearings between the start positions
    let mut bearing_a =
        libm::acos((sin_lat2 - sin_lat1 * cos_dist12) / (sin_dist12 * cos_lat1));
    if bearing_a.is_nan() {
        // rounding pushed the cosine outside [-1, 1]
        bearing_a = 0.0;
    }
    let bearing_b = libm::acos((sin_lat1 - sin_lat2 * cos_dist12) / (sin_dist12 * cos_lat2));
    let (bearing12, bearing21) = if 0.0 < libm::sin(lon2.0 - lon1.0) {
        (bearing_a, TAU - bearing_b)
    } else {
        (TAU - bearing_a, bearing_b)
    };

    // the angles at the start positions: 2-1-3 and 1-2-3
    let alpha1 = normalise_difference(Radians(bearing1.0 - bearing12)).0;
    let alpha2 = normalise_difference(Radians(bearing21 - bearing2.0)).0;
    let (sin_alpha1, cos_alpha1) = (libm::sin(alpha1), libm::cos(alpha1));
    let (sin_alpha2, cos_alpha2) = (libm::sin(alpha2), libm::cos(alpha2));

    if libm::fabs(sin_alpha1) < MIN_SIN_ANGLE && libm::fabs(sin_alpha2) < MIN_SIN_ANGLE {
        return Err(NoIntersection::Infinite);
    }
    if sin_alpha1 * sin_alpha2 < 0.0 {
        return Err(NoIntersection::Ambiguous);
    }

    let alpha3 = libm::acos(-cos_alpha1 * cos_alpha2 + sin_alpha1 * sin_alpha2 * cos_dist12);
    let dist13 = libm::atan2(
        sin_dist12 * sin_alpha1 * sin_alpha2,
        cos_alpha2 + cos_alpha1 * libm::cos(alpha3),
    );
    Ok(calculate_destination(lat1, lon1, bearing1, Radians(dist13)))
}

/// Calculate the across track distance of a position from a great circle path.
/// * `distance13` - the angular distance from the path start to the position.
/// * `bearing13` - the initial bearing from the path start to the position.
/// * `bearing12` - the initial bearing of the path.
///
/// returns the angular across track distance, negative if the position is
/// to the left of the path.
#[must_use]
pub fn calculate_cross_track_distance(
    distance13: Radians,
    bearing13: Radians,
    bearing12: Radians,
) -> Radians {
    Radians(libm::asin(
        libm::sin(distance13.0) * libm::sin(bearing13.0 - bearing12.0),
    ))
}
