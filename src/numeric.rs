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

//! The `numeric` module converts loosely typed input values into `f64`s and
//! formats distances to a number of significant figures.
//!
//! Positions, bearings and distances may be given either as numbers or as
//! numeric strings. A value that cannot be converted to a finite number is
//! rejected with an [`Error`], which the geodesy functions replace with `NaN`.

use crate::error::Error;
use alloc::format;
use alloc::string::{String, ToString};

/// A value that may be converted into a finite `f64`.
pub trait ToNumeric {
    /// Convert the value into a finite `f64`.
    ///
    /// # Errors
    ///
    /// Returns an `Error` if the value is not numeric, cannot be parsed or is
    /// not finite.
    fn to_numeric(&self) -> Result<f64, Error>;
}

/// Parse a numeric string.
/// * `text` - the string, leading and trailing whitespace is ignored.
///
/// # Errors
///
/// `Error::Empty` if `text` is blank, `Error::InvalidNumber` if it does not
/// parse and `Error::NonFinite` if it parses to `NaN` or infinity.
///
/// # Examples
/// ```
/// use latlon_sphere::numeric::parse_numeric;
/// use latlon_sphere::Error;
///
/// assert_eq!(Ok(51.5), parse_numeric(" 51.5 "));
/// assert_eq!(Err(Error::Empty), parse_numeric("  "));
/// assert!(parse_numeric("north").is_err());
/// ```
pub fn parse_numeric(text: &str) -> Result<f64, Error> {
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::Empty);
    }
    let value = text
        .parse::<f64>()
        .map_err(|_| Error::InvalidNumber(text.to_string()))?;
    finite(value)
}

fn finite(value: f64) -> Result<f64, Error> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::NonFinite)
    }
}

/// Convert a value into an `f64`, substituting `NaN` if it is invalid.
/// * `value` - the value to convert.
#[must_use]
pub fn to_f64_or_nan<T: ToNumeric + ?Sized>(value: &T) -> f64 {
    value.to_numeric().unwrap_or_else(|error| {
        tracing::trace!("replacing invalid value with NaN: {}", error);
        f64::NAN
    })
}

/// Round a value to a number of decimal places.
/// * `value` - the value to round.
/// * `decimal_places` - the number of decimal places to keep.
#[must_use]
pub fn round_to(value: f64, decimal_places: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let scale = libm::pow(10.0, decimal_places as f64);
    libm::round(value * scale) / scale
}

impl ToNumeric for f64 {
    fn to_numeric(&self) -> Result<f64, Error> {
        finite(*self)
    }
}

impl ToNumeric for f32 {
    fn to_numeric(&self) -> Result<f64, Error> {
        finite(f64::from(*self))
    }
}

macro_rules! impl_to_numeric_for_integer {
    ($($t:ty),*) => {
        $(
            impl ToNumeric for $t {
                fn to_numeric(&self) -> Result<f64, Error> {
                    Ok(f64::from(*self))
                }
            }
        )*
    };
}

impl_to_numeric_for_integer!(i8, i16, i32, u8, u16, u32);

impl ToNumeric for str {
    fn to_numeric(&self) -> Result<f64, Error> {
        parse_numeric(self)
    }
}

impl ToNumeric for String {
    fn to_numeric(&self) -> Result<f64, Error> {
        parse_numeric(self)
    }
}

impl ToNumeric for bool {
    fn to_numeric(&self) -> Result<f64, Error> {
        Err(Error::NotANumber)
    }
}

impl<T: ToNumeric> ToNumeric for Option<T> {
    fn to_numeric(&self) -> Result<f64, Error> {
        self.as_ref()
            .map_or(Err(Error::NotANumber), |value| value.to_numeric())
    }
}

impl<T: ToNumeric + ?Sized> ToNumeric for &T {
    fn to_numeric(&self) -> Result<f64, Error> {
        (**self).to_numeric()
    }
}

/// Round a positive value to an integer number of `10^-decimals` and return
/// its digits.
fn rounded_digits(magnitude: f64, decimals: i32) -> String {
    // scale in two steps, 10^decimals overflows for subnormal magnitudes
    let half = decimals / 2;
    let scaled = magnitude
        * libm::pow(10.0, f64::from(half))
        * libm::pow(10.0, f64::from(decimals - half));
    format!("{:.0}", libm::round(scaled))
}

/// Format a value to `precision` significant figures, using fixed point
/// notation only.
/// * `value` - the value to format.
/// * `precision` - the number of significant figures.
///
/// A zero value is formatted as `0.` followed by `precision` zeros and `NaN`
/// is formatted as `NaN`.
///
/// # Examples
/// ```
/// use latlon_sphere::numeric::format_fixed_precision;
///
/// assert_eq!("0.0000", format_fixed_precision(0.0, 4));
/// assert_eq!("1235", format_fixed_precision(1234.5678, 4));
/// assert_eq!("0.0123", format_fixed_precision(0.012345, 3));
/// assert_eq!("-4.833", format_fixed_precision(-4.83321, 4));
/// assert_eq!("NaN", format_fixed_precision(f64::NAN, 4));
/// ```
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
#[must_use]
pub fn format_fixed_precision(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return String::from("NaN");
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = libm::fabs(value);
    if magnitude == 0.0 {
        return format!("0.{}", "0".repeat(precision));
    }
    if magnitude.is_infinite() {
        return format!("{sign}Infinity");
    }

    // the number of digits before the decimal point
    let mut scale = libm::ceil(libm::log10(magnitude)) as i32;
    let mut digits = rounded_digits(magnitude, precision as i32 - scale);

    // a rounding carry or an exact power of ten adds an integer digit
    if 0 < precision && precision < digits.len() {
        scale += 1;
        digits = rounded_digits(magnitude, precision as i32 - scale);
    }

    let fixed = if 0 < scale {
        let scale = scale as usize;
        if digits.len() < scale {
            digits.push_str(&"0".repeat(scale - digits.len()));
        }
        if scale < digits.len() {
            digits.insert(scale, '.');
        }
        digits
    } else {
        let zeros = "0".repeat(scale.unsigned_abs() as usize);
        format!("0.{zeros}{digits}")
    };
    format!("{sign}{fixed}")
}
