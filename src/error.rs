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

//! The `error` module contains the errors raised when converting text or
//! other loosely typed values into numbers and formats.

use alloc::string::String;

/// The errors raised at the input boundary of the library.
///
/// Geodesy calculations never return an `Error`: an invalid value is replaced
/// by `NaN`, which propagates through every calculation that uses it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The text was empty after trimming.
    #[error("empty numeric string")]
    Empty,

    /// The text could not be parsed as a number.
    #[error("invalid number: {0:?}")]
    InvalidNumber(String),

    /// The value is `NaN` or infinite.
    #[error("number is not finite")]
    NonFinite,

    /// The value is not of a numeric type.
    #[error("value is not a number")]
    NotANumber,

    /// The text is not one of the `d`, `dm` or `dms` formats.
    #[error("unknown coordinate format: {0:?}")]
    UnknownFormat(String),
}
