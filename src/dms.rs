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

//! The `dms` module formats latitudes and longitudes as degrees, minutes and
//! seconds.
//!
//! `GeoPoint` formats its coordinates through the `CoordinateFormatter` trait,
//! so that an application may substitute its own notation. `Dms` is the
//! default implementation.

use crate::error::Error;
use crate::numeric::round_to;
use alloc::format;
use alloc::string::{String, ToString};
use angle_sc::Degrees;
use core::str::FromStr;

/// The text shown for a coordinate that is not a number.
pub const NOT_A_NUMBER: &str = "\u{2013}";

/// The degrees, minutes and seconds notations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DmsFormat {
    /// Decimal degrees, e.g. `51.4778°N`.
    D,
    /// Degrees and decimal minutes, e.g. `51°28.67′N`.
    Dm,
    /// Degrees, minutes and seconds, e.g. `51°28′40″N`.
    #[default]
    Dms,
}

impl DmsFormat {
    /// The number of decimal places of the smallest unit, when none is given.
    #[must_use]
    pub const fn default_decimal_places(self) -> usize {
        match self {
            Self::D => 4,
            Self::Dm => 2,
            Self::Dms => 0,
        }
    }
}

impl FromStr for DmsFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "d" => Ok(Self::D),
            "dm" => Ok(Self::Dm),
            "dms" => Ok(Self::Dms),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}

/// Formats coordinate values in degrees as text.
pub trait CoordinateFormatter {
    /// Format a latitude.
    /// * `value` - the latitude.
    /// * `format` - the notation.
    /// * `decimal_places` - the decimal places of the smallest unit.
    fn format_as_latitude(
        &self,
        value: Degrees,
        format: DmsFormat,
        decimal_places: Option<usize>,
    ) -> String;

    /// Format a longitude.
    /// * `value` - the longitude.
    /// * `format` - the notation.
    /// * `decimal_places` - the decimal places of the smallest unit.
    fn format_as_longitude(
        &self,
        value: Degrees,
        format: DmsFormat,
        decimal_places: Option<usize>,
    ) -> String;
}

/// The width of a zero padded number with `digits` integer digits.
const fn padded_width(digits: usize, decimal_places: usize) -> usize {
    if decimal_places == 0 {
        digits
    } else {
        digits + 1 + decimal_places
    }
}

/// Format the magnitude of an angle with three degree digits, two minute
/// digits and two second digits.
/// * `value` - the angle.
/// * `format` - the notation.
/// * `decimal_places` - the decimal places of the smallest unit.
///
/// returns None if `value` is not a number.
///
/// # Examples
/// ```
/// use latlon_sphere::dms::to_dms;
/// use latlon_sphere::{Degrees, DmsFormat};
///
/// assert_eq!(Some("051.4778°".to_string()), to_dms(Degrees(51.4778), DmsFormat::D, None));
/// assert_eq!(Some("000°05′54″".to_string()), to_dms(Degrees(-0.0983), DmsFormat::Dms, None));
/// ```
#[must_use]
pub fn to_dms(value: Degrees, format: DmsFormat, decimal_places: Option<usize>) -> Option<String> {
    if value.0.is_nan() {
        return None;
    }

    let dp = decimal_places.unwrap_or_else(|| format.default_decimal_places());
    let degrees = libm::fabs(value.0);
    let text = match format {
        DmsFormat::D => {
            let width = padded_width(3, dp);
            format!("{degrees:0width$.dp$}\u{b0}")
        }
        DmsFormat::Dm => {
            // round before splitting, so minutes never display as 60
            let minutes = round_to(degrees * 60.0, dp);
            let d = libm::floor(minutes / 60.0);
            let m = libm::fmod(minutes, 60.0);
            let width = padded_width(2, dp);
            format!("{d:03.0}\u{b0}{m:0width$.dp$}\u{2032}")
        }
        DmsFormat::Dms => {
            let seconds = round_to(degrees * 3600.0, dp);
            let d = libm::floor(seconds / 3600.0);
            let m = libm::fmod(libm::floor(seconds / 60.0), 60.0);
            let s = libm::fmod(seconds, 60.0);
            let width = padded_width(2, dp);
            format!("{d:03.0}\u{b0}{m:02.0}\u{2032}{s:0width$.dp$}\u{2033}")
        }
    };
    Some(text)
}

/// The default `CoordinateFormatter`: degrees, minutes and seconds with a
/// compass point suffix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dms;

impl CoordinateFormatter for Dms {
    /// Format a latitude with two degree digits and an `N` or `S` suffix.
    fn format_as_latitude(
        &self,
        value: Degrees,
        format: DmsFormat,
        decimal_places: Option<usize>,
    ) -> String {
        to_dms(value, format, decimal_places).map_or_else(
            || String::from(NOT_A_NUMBER),
            |text| {
                let hemisphere = if value.0 < 0.0 { 'S' } else { 'N' };
                // latitudes only need two degree digits
                let text = text.strip_prefix('0').unwrap_or(&text);
                format!("{text}{hemisphere}")
            },
        )
    }

    /// Format a longitude with three degree digits and an `E` or `W` suffix.
    fn format_as_longitude(
        &self,
        value: Degrees,
        format: DmsFormat,
        decimal_places: Option<usize>,
    ) -> String {
        to_dms(value, format, decimal_places).map_or_else(
            || String::from(NOT_A_NUMBER),
            |text| {
                let hemisphere = if value.0 < 0.0 { 'W' } else { 'E' };
                format!("{text}{hemisphere}")
            },
        )
    }
}
