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

//! The `angle` module contains functions for converting between `Degrees` and
//! `Radians` and for normalising bearings and longitudes.
//!
//! The normalisation functions use a floating point remainder, so a value
//! that is already in range is returned unchanged (to the last bit) and a
//! `NaN` input produces a `NaN` output.

use angle_sc::{Degrees, Radians};
use core::f64::consts::{PI, TAU};

/// Convert an angle in `Degrees` to `Radians`.
/// # Examples
/// ```
/// use latlon_sphere::angle::to_radians;
/// use latlon_sphere::{Degrees, Radians};
///
/// assert_eq!(core::f64::consts::PI, to_radians(Degrees(180.0)).0);
/// ```
#[must_use]
pub fn to_radians(angle: Degrees) -> Radians {
    Radians(angle.0 * PI / 180.0)
}

/// Convert an angle in `Radians` to `Degrees`.
/// # Examples
/// ```
/// use latlon_sphere::angle::to_degrees;
/// use latlon_sphere::Radians;
///
/// assert_eq!(180.0, to_degrees(Radians(core::f64::consts::PI)).0);
/// ```
#[must_use]
pub fn to_degrees(angle: Radians) -> Degrees {
    Degrees(angle.0 * 180.0 / PI)
}

/// Normalise a bearing to the range [0, 360) degrees.
/// * `bearing` - a bearing in the range (-360, 360).
#[must_use]
pub fn normalise_bearing(bearing: Degrees) -> Degrees {
    Degrees(libm::fmod(bearing.0 + 360.0, 360.0))
}

/// Reverse a bearing, i.e. add 180° and normalise to the range [0, 360).
/// * `bearing` - a bearing in the range (-180, 180].
#[must_use]
pub fn reverse_bearing(bearing: Degrees) -> Degrees {
    Degrees(libm::fmod(bearing.0 + 180.0, 360.0))
}

/// Normalise a longitude to the range [-π, π).
/// * `lon` - a longitude in the range (-3π, 3π).
#[must_use]
pub fn normalise_longitude(lon: Radians) -> Radians {
    Radians(libm::fmod(lon.0 + 3.0 * PI, TAU) - PI)
}

/// Normalise an angle between a pair of directions to the range [-π, π).
/// * `angle` - the difference between two directions.
#[must_use]
pub fn normalise_difference(angle: Radians) -> Radians {
    Radians(libm::fmod(angle.0 + PI, TAU) - PI)
}
