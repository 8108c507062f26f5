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

//! latlon-sphere
//!
//! A library for performing great-circle and rhumb-line calculations between
//! latitude/longitude positions on a spherical model of the Earth.
//!
//! A sphere is not an exact model of the Earth, distances calculated by this
//! library are typically within 0.3% of their geodesic values on the
//! [WGS-84](https://www.icao.int/NACC/Documents/Meetings/2014/ECARAIM/REF08-Doc9674.pdf)
//! ellipsoid. That is sufficient for displaying maps, filtering by location
//! and most navigation tools.
//!
//! ## Great circles and rhumb lines
//!
//! The shortest path between two points on the surface of a sphere is a
//! [great circle](https://en.wikipedia.org/wiki/Great_circle) arc.
//! The bearing along a great circle arc changes continuously, except along
//! a meridian or the Equator.
//!
//! A [rhumb line](https://en.wikipedia.org/wiki/Rhumb_line) crosses every
//! meridian at the same angle, so it can be followed on a constant compass
//! bearing. It is a straight line on a Mercator projection and it is usually
//! longer than the great circle arc between the same positions.
//!
//! This library calculates:
//!
//! - the distance, initial bearing and final bearing between positions;
//! - the mid point of, and destinations along, great circle arcs and rhumb lines;
//! - the intersection of two great circle paths;
//! - the across track distance of a position from a great circle path.
//!
//! See: [Calculate distance, bearing and more between Latitude/Longitude points](https://www.movable-type.co.uk/scripts/latlong.html).
//!
//! ## Design
//!
//! `GeoPoint` is an immutable position on a sphere with a configurable
//! radius in kilometres; the default is the mean Earth radius: `EARTH_RADIUS`.
//! Every operation returns a new value.
//!
//! Positions, bearings and distances may be given as numbers or as numeric
//! strings, see `ToNumeric`. A value that is not a finite number is replaced
//! by `NaN`: no operation fails, instead the `NaN` propagates into its
//! results. Distances formatted as text are `"NaN"` in that case.
//!
//! The `great_circle` and `rhumb` modules contain the underlying formulae
//! operating on `Radians`.
//!
//! The library depends upon the following crates:
//!
//! - [angle-sc](https://crates.io/crates/angle-sc) - to define `Degrees` and
//!   `Radians`;
//! - [unit-sphere](https://crates.io/crates/unit-sphere) - to define `LatLong`
//!   and the great-circle tolerances.
//! - [icao_units](https://crates.io/crates/icao-units) - to define `Metres` and
//!   `NauticalMiles` and perform conversions between them.
//!
//! The library is declared [no_std](https://docs.rust-embedded.org/book/intro/no-std.html)
//! so it can be used in embedded applications.
//!
//! ## Example
//! ```
//! use latlon_sphere::GeoPoint;
//!
//! let a = GeoPoint::new(-0.0983, 51.5136);
//! let b = GeoPoint::new("-0.0015", "51.4778");
//!
//! assert_eq!("7.794", a.distance_to(&b, 4));
//! assert_eq!("7.794", a.rhumb_distance_to(&b));
//! ```

#![cfg_attr(not(test), no_std)]

extern crate alloc;
extern crate angle_sc;
extern crate icao_units;
extern crate unit_sphere;

pub mod angle;
pub mod dms;
pub mod error;
pub mod great_circle;
pub mod numeric;
pub mod rhumb;

pub use angle_sc::{Degrees, Radians, Validate};
pub use dms::{CoordinateFormatter, Dms, DmsFormat};
pub use error::Error;
pub use great_circle::NoIntersection;
pub use icao_units::non_si::NauticalMiles;
pub use icao_units::si::Metres;
pub use numeric::{format_fixed_precision, ToNumeric};
pub use unit_sphere::LatLong;

use alloc::format;
use alloc::string::String;
use angle::{normalise_bearing, reverse_bearing, to_degrees, to_radians};
use numeric::{round_to, to_f64_or_nan};

/// The mean radius of the Earth in kilometres.
pub const EARTH_RADIUS: f64 = 6371.0;

/// The default number of significant figures of a formatted distance.
pub const DEFAULT_PRECISION: usize = 4;

/// The bearings of the `SquarePoints` around a position, in degrees.
pub const SQUARE_BEARINGS: [f64; 8] = [0.0, 45.0, 90.0, 135.0, 180.0, 225.0, 270.0, 315.0];

/// A position on the surface of a sphere.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    /// The longitude in degrees.
    lon: f64,
    /// The latitude in degrees.
    lat: f64,
    /// The radius of the sphere in kilometres.
    radius: f64,
}

impl Validate for GeoPoint {
    /// Test whether a `GeoPoint` is valid.
    /// Whether -90° <= `latitude` <= 90°, -180° <= `longitude` <= 180° and
    /// the `radius` is finite and positive.
    fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
            && self.radius.is_finite()
            && 0.0 < self.radius
    }
}

impl GeoPoint {
    /// Construct a `GeoPoint` on a sphere with the mean Earth radius.
    /// * `lon` - the longitude in degrees, a number or numeric string.
    /// * `lat` - the latitude in degrees, a number or numeric string.
    ///
    /// An invalid `lon` or `lat` is stored as `NaN`.
    ///
    /// # Examples
    /// ```
    /// use latlon_sphere::GeoPoint;
    ///
    /// let point = GeoPoint::new(" -0.0983 ", 51.5136);
    /// assert_eq!(-0.0983, point.lon());
    /// assert_eq!(51.5136, point.lat());
    /// assert_eq!(6371.0, point.radius());
    ///
    /// assert!(GeoPoint::new(0, "north").lat().is_nan());
    /// ```
    #[must_use]
    pub fn new(lon: impl ToNumeric, lat: impl ToNumeric) -> Self {
        Self::with_radius(lon, lat, EARTH_RADIUS)
    }

    /// Construct a `GeoPoint` on a sphere with the given radius.
    /// * `lon` - the longitude in degrees, a number or numeric string.
    /// * `lat` - the latitude in degrees, a number or numeric string.
    /// * `radius` - the radius of the sphere in kilometres, a number or numeric string.
    ///
    /// An invalid `lon`, `lat` or `radius` is stored as `NaN`.
    #[must_use]
    pub fn with_radius(lon: impl ToNumeric, lat: impl ToNumeric, radius: impl ToNumeric) -> Self {
        Self {
            lon: to_f64_or_nan(&lon),
            lat: to_f64_or_nan(&lat),
            radius: to_f64_or_nan(&radius),
        }
    }

    /// Accessor for the longitude in degrees.
    #[must_use]
    pub const fn lon(&self) -> f64 {
        self.lon
    }

    /// Accessor for the latitude in degrees.
    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.lat
    }

    /// Accessor for the radius of the sphere in kilometres.
    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.radius
    }

    fn lat_radians(&self) -> Radians {
        to_radians(Degrees(self.lat))
    }

    fn lon_radians(&self) -> Radians {
        to_radians(Degrees(self.lon))
    }

    /// The longitude difference from this position to `other`.
    fn delta_lon(&self, other: &Self) -> Radians {
        to_radians(Degrees(other.lon - self.lon))
    }

    /// Format the latitude.
    /// * `formatter` - the `CoordinateFormatter`.
    /// * `format` - the notation.
    /// * `decimal_places` - the decimal places of the smallest unit.
    #[must_use]
    pub fn format_lat(
        &self,
        formatter: &impl CoordinateFormatter,
        format: DmsFormat,
        decimal_places: Option<usize>,
    ) -> String {
        formatter.format_as_latitude(Degrees(self.lat), format, decimal_places)
    }

    /// Format the longitude.
    /// * `formatter` - the `CoordinateFormatter`.
    /// * `format` - the notation.
    /// * `decimal_places` - the decimal places of the smallest unit.
    #[must_use]
    pub fn format_lon(
        &self,
        formatter: &impl CoordinateFormatter,
        format: DmsFormat,
        decimal_places: Option<usize>,
    ) -> String {
        formatter.format_as_longitude(Degrees(self.lon), format, decimal_places)
    }

    /// Format the position as `"<longitude>, <latitude>"`.
    /// * `formatter` - the `CoordinateFormatter`.
    /// * `format` - the notation.
    /// * `decimal_places` - the decimal places of the smallest unit.
    ///
    /// returns `"-,-"` if either coordinate is not a number.
    ///
    /// # Examples
    /// ```
    /// use latlon_sphere::{Dms, DmsFormat, GeoPoint};
    ///
    /// let point = GeoPoint::new(-0.0983, 51.5136);
    /// assert_eq!("000.0983°W, 51.5136°N", point.to_string_with(&Dms, DmsFormat::D, None));
    ///
    /// let invalid = GeoPoint::new("west", 51.5136);
    /// assert_eq!("-,-", invalid.to_string_with(&Dms, DmsFormat::D, None));
    /// ```
    #[must_use]
    pub fn to_string_with(
        &self,
        formatter: &impl CoordinateFormatter,
        format: DmsFormat,
        decimal_places: Option<usize>,
    ) -> String {
        if self.lat.is_nan() || self.lon.is_nan() {
            String::from("-,-")
        } else {
            format!(
                "{}, {}",
                self.format_lon(formatter, format, decimal_places),
                self.format_lat(formatter, format, decimal_places)
            )
        }
    }

    /// Calculate the great circle distance to another position, using the
    /// haversine formula.
    /// * `other` - the other position.
    ///
    /// returns the distance in kilometres on a sphere of this position's radius.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        let distance = great_circle::calculate_haversine_distance(
            self.lat_radians(),
            other.lat_radians(),
            self.delta_lon(other),
        );
        self.radius * distance.0
    }

    /// Calculate the great circle distance to another position, formatted to
    /// `precision` significant figures.
    /// * `other` - the other position.
    /// * `precision` - the number of significant figures, see `DEFAULT_PRECISION`.
    ///
    /// returns the distance in kilometres, or `"NaN"`.
    ///
    /// # Examples
    /// ```
    /// use latlon_sphere::GeoPoint;
    ///
    /// let paris = GeoPoint::new(2.3522, 48.8566);
    /// let london = GeoPoint::new(-0.1278, 51.5074);
    /// assert_eq!("343.6", paris.distance_to(&london, 4));
    /// assert_eq!("0.0000", paris.distance_to(&paris, 4));
    /// ```
    #[must_use]
    pub fn distance_to(&self, other: &Self, precision: usize) -> String {
        format_fixed_precision(self.distance(other), precision)
    }

    /// Calculate the great circle distance to another position in `Metres`.
    /// * `other` - the other position.
    #[must_use]
    pub fn length(&self, other: &Self) -> Metres {
        Metres(1000.0 * self.distance(other))
    }

    /// Calculate the great circle distance to another position in `NauticalMiles`.
    /// * `other` - the other position.
    #[must_use]
    pub fn nautical_miles(&self, other: &Self) -> NauticalMiles {
        NauticalMiles::from(self.length(other))
    }

    /// Calculate the initial bearing of the great circle path to another position.
    /// * `other` - the other position.
    ///
    /// returns the bearing in degrees in the range [0, 360).
    #[must_use]
    pub fn bearing_to(&self, other: &Self) -> f64 {
        let bearing = great_circle::calculate_initial_bearing(
            self.lat_radians(),
            other.lat_radians(),
            self.delta_lon(other),
        );
        normalise_bearing(to_degrees(bearing)).0
    }

    /// Calculate the final bearing of the great circle path to another
    /// position, i.e. the reverse of the initial bearing from `other`.
    /// * `other` - the other position.
    ///
    /// returns the bearing in degrees in the range [0, 360).
    #[must_use]
    pub fn final_bearing_to(&self, other: &Self) -> f64 {
        let bearing = great_circle::calculate_initial_bearing(
            other.lat_radians(),
            self.lat_radians(),
            other.delta_lon(self),
        );
        reverse_bearing(to_degrees(bearing)).0
    }

    /// Calculate the mid point of the great circle path to another position.
    /// * `other` - the other position.
    ///
    /// returns the mid point on a sphere of this position's radius.
    #[must_use]
    pub fn midpoint_to(&self, other: &Self) -> Self {
        let (lat, lon) = great_circle::calculate_midpoint(
            self.lat_radians(),
            self.lon_radians(),
            other.lat_radians(),
            self.delta_lon(other),
        );
        self.at(lat, lon)
    }

    /// Calculate the destination along a great circle path.
    /// * `bearing` - the initial bearing in degrees, a number or numeric string.
    /// * `distance` - the distance in kilometres, a number or numeric string.
    ///
    /// returns the destination on a sphere of this position's radius, with
    /// its longitude in the range [-180, 180).
    ///
    /// # Examples
    /// ```
    /// use latlon_sphere::GeoPoint;
    ///
    /// let start = GeoPoint::new(0, 0);
    /// let destination = start.destination_point(90, "1000");
    /// assert_eq!("1000", start.distance_to(&destination, 4));
    /// ```
    #[must_use]
    pub fn destination_point(&self, bearing: impl ToNumeric, distance: impl ToNumeric) -> Self {
        let bearing = to_radians(Degrees(to_f64_or_nan(&bearing)));
        let distance = Radians(to_f64_or_nan(&distance) / self.radius);
        let (lat, lon) = great_circle::calculate_destination(
            self.lat_radians(),
            self.lon_radians(),
            bearing,
            distance,
        );
        self.at(lat, lon)
    }

    /// Calculate the intersection of two great circle paths, each defined by
    /// a start position and an initial bearing.
    /// * `p1`, `bearing1` - the start and bearing (in degrees) of the first path.
    /// * `p2`, `bearing2` - the start and bearing (in degrees) of the second path.
    ///
    /// returns the intersection point on a sphere of the mean Earth radius,
    /// or `NoIntersection` describing why the paths do not have a unique
    /// intersection.
    ///
    /// # Errors
    ///
    /// `NoIntersection::Coincident` if `p1` and `p2` are the same position,
    /// `NoIntersection::Infinite` if the paths lie on the same great circle
    /// and `NoIntersection::Ambiguous` if the paths lead away from each other.
    pub fn try_intersection(
        p1: &Self,
        bearing1: impl ToNumeric,
        p2: &Self,
        bearing2: impl ToNumeric,
    ) -> Result<Self, NoIntersection> {
        great_circle::calculate_intersection(
            p1.lat_radians(),
            p1.lon_radians(),
            to_radians(Degrees(to_f64_or_nan(&bearing1))),
            p2.lat_radians(),
            p2.lon_radians(),
            to_radians(Degrees(to_f64_or_nan(&bearing2))),
        )
        .map(|(lat, lon)| Self::new(to_degrees(lon).0, to_degrees(lat).0))
        .inspect_err(|reason| tracing::debug!("paths do not intersect: {:?}", reason))
    }

    /// Calculate the intersection of two great circle paths, each defined by
    /// a start position and an initial bearing.
    /// * `p1`, `bearing1` - the start and bearing (in degrees) of the first path.
    /// * `p2`, `bearing2` - the start and bearing (in degrees) of the second path.
    ///
    /// returns the intersection point or None if the start positions are the
    /// same, the paths are on the same great circle or the paths diverge.
    ///
    /// # Examples
    /// ```
    /// use latlon_sphere::GeoPoint;
    ///
    /// let stansted = GeoPoint::new(0.2545, 51.8853);
    /// let cdg = GeoPoint::new(2.5735, 49.0034);
    /// let point = GeoPoint::intersection(&stansted, 108.55, &cdg, "32.44").unwrap();
    /// assert_eq!("4.5086,50.9076", point.to_lng_lat(Some(4)));
    ///
    /// assert!(GeoPoint::intersection(&stansted, 90, &stansted, 0).is_none());
    /// ```
    #[must_use]
    pub fn intersection(
        p1: &Self,
        bearing1: impl ToNumeric,
        p2: &Self,
        bearing2: impl ToNumeric,
    ) -> Option<Self> {
        Self::try_intersection(p1, bearing1, p2, bearing2).ok()
    }

    /// Calculate the across track distance of this position from the great
    /// circle path from `start` to `end`.
    /// * `start`, `end` - positions on the great circle path.
    ///
    /// returns the distance in kilometres on a sphere of `start`'s radius,
    /// negative if this position is to the left of the path.
    #[must_use]
    pub fn cross_track_distance_to(&self, start: &Self, end: &Self) -> f64 {
        let (lat1, lat3) = (start.lat_radians(), self.lat_radians());
        let delta_lon13 = start.delta_lon(self);
        let distance13 = great_circle::calculate_haversine_distance(lat1, lat3, delta_lon13);
        let bearing13 = great_circle::calculate_initial_bearing(lat1, lat3, delta_lon13);
        let bearing12 =
            great_circle::calculate_initial_bearing(lat1, end.lat_radians(), start.delta_lon(end));
        let xtd = great_circle::calculate_cross_track_distance(distance13, bearing13, bearing12);
        start.radius * xtd.0
    }

    /// Calculate the rhumb line distance to another position.
    /// * `other` - the other position.
    ///
    /// returns the distance in kilometres on a sphere of this position's radius.
    #[must_use]
    pub fn rhumb_distance(&self, other: &Self) -> f64 {
        let distance = rhumb::calculate_rhumb_distance(
            self.lat_radians(),
            other.lat_radians(),
            self.delta_lon(other),
        );
        self.radius * distance.0
    }

    /// Calculate the rhumb line distance to another position, formatted to
    /// `DEFAULT_PRECISION` significant figures.
    /// * `other` - the other position.
    ///
    /// returns the distance in kilometres, or `"NaN"`.
    #[must_use]
    pub fn rhumb_distance_to(&self, other: &Self) -> String {
        format_fixed_precision(self.rhumb_distance(other), DEFAULT_PRECISION)
    }

    /// Calculate the bearing of the rhumb line to another position.
    /// * `other` - the other position.
    ///
    /// returns the bearing in degrees in the range [0, 360).
    #[must_use]
    pub fn rhumb_bearing_to(&self, other: &Self) -> f64 {
        let bearing = rhumb::calculate_rhumb_bearing(
            self.lat_radians(),
            other.lat_radians(),
            self.delta_lon(other),
        );
        normalise_bearing(to_degrees(bearing)).0
    }

    /// Calculate the destination along a rhumb line.
    /// * `bearing` - the constant bearing in degrees, a number or numeric string.
    /// * `distance` - the distance in kilometres, a number or numeric string.
    ///
    /// returns the destination on a sphere of this position's radius, with
    /// its longitude in the range [-180, 180).
    #[must_use]
    pub fn rhumb_destination_point(
        &self,
        bearing: impl ToNumeric,
        distance: impl ToNumeric,
    ) -> Self {
        let bearing = to_radians(Degrees(to_f64_or_nan(&bearing)));
        let distance = Radians(to_f64_or_nan(&distance) / self.radius);
        let (lat, lon) = rhumb::calculate_rhumb_destination(
            self.lat_radians(),
            self.lon_radians(),
            bearing,
            distance,
        );
        self.at(lat, lon)
    }

    /// Calculate the mid point of the rhumb line to another position.
    /// * `other` - the other position.
    ///
    /// returns the mid point on a sphere of this position's radius.
    #[must_use]
    pub fn rhumb_midpoint_to(&self, other: &Self) -> Self {
        let (lat, lon) = rhumb::calculate_rhumb_midpoint(
            self.lat_radians(),
            self.lon_radians(),
            other.lat_radians(),
            other.lon_radians(),
        );
        self.at(lat, lon)
    }

    /// Calculate the eight compass points at `distance` around this position.
    /// * `distance` - the distance in kilometres, a number or numeric string.
    ///
    /// returns the great circle destinations at `SQUARE_BEARINGS`.
    ///
    /// # Examples
    /// ```
    /// use latlon_sphere::GeoPoint;
    ///
    /// let centre = GeoPoint::new(0, 0);
    /// let points = centre.square_points(100);
    /// assert_eq!("100.0", centre.distance_to(&points.ne, 4));
    /// assert!(points.e.lon() > 0.0 && points.w.lon() < 0.0);
    /// ```
    #[must_use]
    pub fn square_points(&self, distance: impl ToNumeric) -> SquarePoints<Self> {
        let distance = to_f64_or_nan(&distance);
        let [n, ne, e, es, s, sw, w, wn] =
            SQUARE_BEARINGS.map(|bearing| self.destination_point(bearing, distance));
        SquarePoints {
            n,
            ne,
            e,
            es,
            s,
            sw,
            w,
            wn,
        }
    }

    /// Calculate the eight compass points at `distance` around this position
    /// as `"lon,lat"` strings.
    /// * `distance` - the distance in kilometres, a number or numeric string.
    #[must_use]
    pub fn square_points_as_strings(&self, distance: impl ToNumeric) -> SquarePoints<String> {
        self.square_points(distance).map(|point| point.to_lng_lat(None))
    }

    /// Whether this position is inside the box defined by its South West and
    /// North East corners, the box edges are inside.
    /// * `south_west`, `north_east` - the corners of the box.
    ///
    /// Note: the box is not wrapped around the antimeridian.
    ///
    /// # Examples
    /// ```
    /// use latlon_sphere::GeoPoint;
    ///
    /// let south_west = GeoPoint::new(-1, 50);
    /// let north_east = GeoPoint::new(1, 52);
    /// assert!(GeoPoint::new(0, 51).in_square(&south_west, &north_east));
    /// assert!(GeoPoint::new(1, 50).in_square(&south_west, &north_east));
    /// assert!(!GeoPoint::new(1.5, 51).in_square(&south_west, &north_east));
    /// ```
    #[must_use]
    pub fn in_square(&self, south_west: &Self, north_east: &Self) -> bool {
        (south_west.lat..=north_east.lat).contains(&self.lat)
            && (south_west.lon..=north_east.lon).contains(&self.lon)
    }

    /// The position as a `[longitude, latitude]` array.
    /// * `fixed_digits` - the number of decimal places to round to, if any.
    #[must_use]
    pub fn to_array(&self, fixed_digits: Option<usize>) -> [f64; 2] {
        fixed_digits.map_or([self.lon, self.lat], |digits| {
            [round_to(self.lon, digits), round_to(self.lat, digits)]
        })
    }

    /// The position as a `"longitude,latitude"` string.
    /// * `fixed_digits` - the number of decimal places to format with, if any.
    ///
    /// # Examples
    /// ```
    /// use latlon_sphere::GeoPoint;
    ///
    /// let point = GeoPoint::new(-0.0983, 51.5136);
    /// assert_eq!("-0.0983,51.5136", point.to_lng_lat(None));
    /// assert_eq!("-0.10,51.51", point.to_lng_lat(Some(2)));
    /// ```
    #[must_use]
    pub fn to_lng_lat(&self, fixed_digits: Option<usize>) -> String {
        fixed_digits.map_or_else(
            || format!("{},{}", self.lon, self.lat),
            |digits| {
                let [lon, lat] = self.to_array(Some(digits));
                format!("{lon:.digits$},{lat:.digits$}")
            },
        )
    }

    /// A position on the same sphere as this position.
    fn at(&self, lat: Radians, lon: Radians) -> Self {
        Self::with_radius(to_degrees(lon).0, to_degrees(lat).0, self.radius)
    }
}

impl core::fmt::Display for GeoPoint {
    /// Formats the position in degrees, minutes and seconds.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.to_string_with(&Dms, DmsFormat::Dms, None))
    }
}

impl From<&GeoPoint> for LatLong {
    /// Convert a `GeoPoint` to a `LatLong`, the radius is discarded.
    fn from(point: &GeoPoint) -> Self {
        Self::new(Degrees(point.lat), Degrees(point.lon))
    }
}

impl From<&LatLong> for GeoPoint {
    /// Convert a `LatLong` to a `GeoPoint` on a sphere with the mean Earth radius.
    fn from(lat_long: &LatLong) -> Self {
        Self::new(lat_long.lon().0, lat_long.lat().0)
    }
}

/// The positions at the eight compass points around a position.
///
/// Note: the South East and North West fields are named `es` and `wn`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SquarePoints<T> {
    pub n: T,
    pub ne: T,
    pub e: T,
    pub es: T,
    pub s: T,
    pub sw: T,
    pub w: T,
    pub wn: T,
}

impl<T> SquarePoints<T> {
    /// Apply a function to each of the compass points.
    #[must_use]
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> SquarePoints<U> {
        SquarePoints {
            n: f(self.n),
            ne: f(self.ne),
            e: f(self.e),
            es: f(self.es),
            s: f(self.s),
            sw: f(self.sw),
            w: f(self.w),
            wn: f(self.wn),
        }
    }

    /// The compass points in clockwise order, starting from North.
    #[must_use]
    pub fn into_array(self) -> [T; 8] {
        [
            self.n, self.ne, self.e, self.es, self.s, self.sw, self.w, self.wn,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use angle_sc::is_within_tolerance;

    fn bank() -> GeoPoint {
        GeoPoint::new(-0.0983, 51.5136)
    }

    fn greenwich() -> GeoPoint {
        GeoPoint::new(-0.0015, 51.4778)
    }

    #[test]
    fn test_geopoint_new() {
        let point = GeoPoint::new(-0.0983, 51.5136);
        assert_eq!(-0.0983, point.lon());
        assert_eq!(51.5136, point.lat());
        assert_eq!(EARTH_RADIUS, point.radius());
        assert!(point.is_valid());

        let point = GeoPoint::new(" -0.0983", "51.5136 ");
        assert_eq!(bank(), point);

        let point = GeoPoint::with_radius(10, -20, "3390");
        assert_eq!(10.0, point.lon());
        assert_eq!(-20.0, point.lat());
        assert_eq!(3390.0, point.radius());

        // unnormalised longitudes are accepted
        let point = GeoPoint::new(190.0, 0.0);
        assert_eq!(190.0, point.lon());
        assert!(!point.is_valid());
    }

    #[test]
    fn test_geopoint_new_invalid() {
        let point = GeoPoint::new(0.0, "fifty");
        assert!(point.lat().is_nan());
        assert_eq!(0.0, point.lon());
        assert!(!point.is_valid());

        assert!(GeoPoint::new("", 0.0).lon().is_nan());
        assert!(GeoPoint::new("  ", 0.0).lon().is_nan());
        assert!(GeoPoint::new(true, 0.0).lon().is_nan());
        assert!(GeoPoint::new(None::<f64>, 0.0).lon().is_nan());
        assert!(GeoPoint::with_radius(0.0, 0.0, "big").radius().is_nan());

        // NaN propagates into every calculation
        let other = bank();
        assert_eq!("NaN", point.distance_to(&other, 4));
        assert_eq!("NaN", other.distance_to(&point, 4));
        assert_eq!("NaN", point.rhumb_distance_to(&other));
        assert!(point.bearing_to(&other).is_nan());
        assert!(point.final_bearing_to(&other).is_nan());
        assert!(point.rhumb_bearing_to(&other).is_nan());
        assert!(point.midpoint_to(&other).lat().is_nan());
        assert!(point.destination_point(90, 10).lat().is_nan());
        assert!(point.rhumb_destination_point(90, 10).lat().is_nan());
        assert_eq!("-,-", point.to_string());
    }

    #[test]
    fn test_distance_to() {
        let a = bank();
        let b = greenwich();
        assert_eq!("7.794", a.distance_to(&b, 4));
        assert_eq!("7.794", b.distance_to(&a, 4));
        assert_eq!("7.79", a.distance_to(&b, 3));
        assert_eq!("7.794377", a.distance_to(&b, 7));
        assert!(is_within_tolerance(7.794_376_772_579_707, a.distance(&b), 1e-9));

        assert_eq!("0.0000", a.distance_to(&a, DEFAULT_PRECISION));

        let paris = GeoPoint::new(2.3522, 48.8566);
        let london = GeoPoint::new(-0.1278, 51.5074);
        assert_eq!("343.6", paris.distance_to(&london, 4));

        let new_york = GeoPoint::new(-74.0060, 40.7128);
        assert_eq!("5570", new_york.distance_to(&london, 4));
    }

    #[test]
    fn test_distance_radius() {
        let a = GeoPoint::with_radius(0, 0, 3959);
        let b = GeoPoint::new(1, 0);
        assert_eq!("69.10", a.distance_to(&b, 4));
        assert_eq!("111.2", b.distance_to(&a, 4));
    }

    #[test]
    fn test_length_and_nautical_miles() {
        let a = GeoPoint::new(0, 0);
        let b = GeoPoint::new(1, 0);
        assert!(is_within_tolerance(111_194.926_644_558_73, a.length(&b).0, 1e-6));
        assert!(is_within_tolerance(
            111_194.926_644_558_73 / 1852.0,
            a.nautical_miles(&b).0,
            1e-9
        ));
    }

    #[test]
    fn test_distance_symmetry() {
        for i in -8..9 {
            let lat = f64::from(i) * 10.0;
            let a = GeoPoint::new(f64::from(i) * 20.0, lat);
            let b = GeoPoint::new(-f64::from(i) * 7.0, -0.5 * lat + 3.0);
            assert_eq!(a.distance_to(&b, 4), b.distance_to(&a, 4));
        }
    }

    #[test]
    fn test_bearing_to() {
        let a = bank();
        let b = greenwich();
        assert!(is_within_tolerance(120.674_206_934_551_65, a.bearing_to(&b), 1e-9));
        assert!(is_within_tolerance(120.749_958_892_184_58, a.final_bearing_to(&b), 1e-9));

        let paris = GeoPoint::new(2.3522, 48.8566);
        let london = GeoPoint::new(-0.1278, 51.5074);
        assert!(is_within_tolerance(330.021_092_856_063_4, paris.bearing_to(&london), 1e-9));
        assert!(is_within_tolerance(328.115_616_871_053_25, paris.final_bearing_to(&london), 1e-9));

        // due North and due South
        let south = GeoPoint::new(10, -10);
        let north = GeoPoint::new(10, 10);
        assert_eq!(0.0, south.bearing_to(&north));
        assert_eq!(0.0, south.final_bearing_to(&north));
        assert_eq!(180.0, north.bearing_to(&south));
    }

    #[test]
    fn test_bearing_range() {
        let origin = GeoPoint::new(5, 5);
        for i in -18..18 {
            for j in -8..9 {
                let other = GeoPoint::new(f64::from(i) * 10.0, f64::from(j) * 10.0);
                for bearing in [
                    origin.bearing_to(&other),
                    origin.final_bearing_to(&other),
                    origin.rhumb_bearing_to(&other),
                ] {
                    assert!((0.0..360.0).contains(&bearing));
                }
            }
        }
    }

    #[test]
    fn test_midpoint_to() {
        let a = bank();
        let b = greenwich();
        let mid = a.midpoint_to(&b);
        assert!(is_within_tolerance(51.495_709_959_718_056, mid.lat(), 1e-9));
        assert!(is_within_tolerance(-0.049_880_993_428_678_5, mid.lon(), 1e-9));
        assert_eq!(a.radius(), mid.radius());

        // the mid point is half way along the path
        let half = a.distance(&mid);
        assert!(is_within_tolerance(half, mid.distance(&b), 1e-9));
        assert!(is_within_tolerance(a.distance(&b), half + mid.distance(&b), 1e-9));

        // the radius is inherited
        let mars = GeoPoint::with_radius(0, 0, 3390);
        assert_eq!(3390.0, mars.midpoint_to(&GeoPoint::new(10, 10)).radius());
    }

    #[test]
    fn test_destination_point() {
        let a = bank();
        let destination = a.destination_point(120, 10);
        assert!(is_within_tolerance(51.468_567_419_040_17, destination.lat(), 1e-9));
        assert!(is_within_tolerance(0.026_725_010_434_458_456, destination.lon(), 1e-9));
        assert_eq!("10.00", a.distance_to(&destination, 4));

        // bearing and distance may be numeric strings
        assert_eq!(destination, a.destination_point("120", " 10 "));
        assert!(a.destination_point(120, "far").lat().is_nan());
        assert!(a.destination_point("east", 10).lon().is_nan());

        // the radius is inherited
        let small = GeoPoint::with_radius(0, 0, 1000);
        assert_eq!(1000.0, small.destination_point(0, 10).radius());
    }

    #[test]
    fn test_destination_round_trip() {
        let origin = GeoPoint::new(-3.2, 55.9);
        for i in 0..36 {
            let bearing = f64::from(i) * 10.0;
            for distance in [1.0, 50.0, 1000.0, 5000.0] {
                let destination = origin.destination_point(bearing, distance);
                assert!((-180.0..=180.0).contains(&destination.lon()));
                let result = origin.distance(&destination);
                assert!(is_within_tolerance(distance, result, 0.003 * distance));
            }
        }
    }

    #[test]
    fn test_destination_antimeridian() {
        let start = GeoPoint::new(179.5, 0);
        let destination = start.destination_point(90, 111.194_926_644_558_73);
        assert!(is_within_tolerance(-179.5, destination.lon(), 1e-9));
    }

    #[test]
    fn test_intersection() {
        let stansted = GeoPoint::new(0.2545, 51.8853);
        let cdg = GeoPoint::new(2.5735, 49.0034);
        let point = GeoPoint::intersection(&stansted, 108.55, &cdg, 32.44).expect("intersects");
        assert!(is_within_tolerance(50.907_607_500_474_306, point.lat(), 1e-9));
        assert!(is_within_tolerance(4.508_574_645_770_443, point.lon(), 1e-9));
        assert_eq!(EARTH_RADIUS, point.radius());

        let strings = GeoPoint::intersection(&stansted, "108.55", &cdg, "32.44");
        assert_eq!(Some(point), strings);
    }

    #[test]
    fn test_intersection_coincident() {
        let a = GeoPoint::new(10, 10);
        assert_eq!(None, GeoPoint::intersection(&a, 45, &a, 135));
        assert_eq!(
            Err(NoIntersection::Coincident),
            GeoPoint::try_intersection(&a, 45, &a, 135)
        );
    }

    #[test]
    fn test_intersection_infinite() {
        let a = GeoPoint::new(0, 0);
        let b = GeoPoint::new(10, 0);
        assert_eq!(None, GeoPoint::intersection(&a, 90, &b, 90));
        assert_eq!(
            Err(NoIntersection::Infinite),
            GeoPoint::try_intersection(&a, 90, &b, 90)
        );
    }

    #[test]
    fn test_intersection_ambiguous() {
        let a = GeoPoint::new(0, 0);
        let b = GeoPoint::new(10, 0);
        assert_eq!(None, GeoPoint::intersection(&a, 0, &b, 180));
        assert_eq!(
            Err(NoIntersection::Ambiguous),
            GeoPoint::try_intersection(&a, 0, &b, 180)
        );
    }

    #[test]
    fn test_intersection_invalid_bearing() {
        let a = GeoPoint::new(0, 0);
        let b = GeoPoint::new(10, 0);
        let point = GeoPoint::intersection(&a, "north", &b, 0).expect("NaN propagates");
        assert!(point.lat().is_nan());
        assert!(point.lon().is_nan());
    }

    #[test]
    fn test_cross_track_distance_to() {
        let start = GeoPoint::new(0, 0);
        let end = GeoPoint::new(10, 0);
        let north = GeoPoint::new(5, 1);
        let south = GeoPoint::new(5, -1);
        let one_degree = EARTH_RADIUS * core::f64::consts::PI / 180.0;
        let xtd = north.cross_track_distance_to(&start, &end);
        assert!(is_within_tolerance(-one_degree, xtd, 1e-9));
        let xtd = south.cross_track_distance_to(&start, &end);
        assert!(is_within_tolerance(one_degree, xtd, 1e-9));
        let xtd = end.cross_track_distance_to(&start, &end);
        assert!(is_within_tolerance(0.0, xtd, 1e-9));
    }

    #[test]
    fn test_rhumb_distance_to() {
        let a = bank();
        let b = greenwich();
        assert_eq!("7.794", a.rhumb_distance_to(&b));

        let new_york = GeoPoint::new(-74.0060, 40.7128);
        let london = GeoPoint::new(-0.1278, 51.5074);
        assert_eq!("5794", new_york.rhumb_distance_to(&london));
        // a rhumb line is never shorter than a great circle
        assert!(new_york.distance(&london) < new_york.rhumb_distance(&london));

        // East-West along a parallel
        let a = GeoPoint::new(0, 10);
        let b = GeoPoint::new(10, 10);
        assert_eq!("1095", a.rhumb_distance_to(&b));

        // the shorter way across the antimeridian
        let a = GeoPoint::new(170, 0);
        let b = GeoPoint::new(-170, 0);
        assert_eq!("2224", a.rhumb_distance_to(&b));
        assert_eq!("0.0000", a.rhumb_distance_to(&a));
    }

    #[test]
    fn test_rhumb_bearing_to() {
        let a = bank();
        let b = greenwich();
        assert!(is_within_tolerance(120.712_091_009_242_56, a.rhumb_bearing_to(&b), 1e-9));

        let west = GeoPoint::new(170, 0);
        let east = GeoPoint::new(-170, 0);
        assert!(is_within_tolerance(90.0, west.rhumb_bearing_to(&east), 1e-9));
        assert!(is_within_tolerance(270.0, east.rhumb_bearing_to(&west), 1e-9));
    }

    #[test]
    fn test_rhumb_destination_point() {
        let a = bank();
        let destination = a.rhumb_destination_point(116.7, "40.23");
        assert!(is_within_tolerance(51.351_037_697_386_15, destination.lat(), 1e-9));
        assert!(is_within_tolerance(0.420_146_527_455_241_1, destination.lon(), 1e-9));
        assert_eq!("40.23", a.rhumb_distance_to(&destination));

        // due East along a parallel
        let a = GeoPoint::new(0, 10);
        let destination = a.rhumb_destination_point(90, 100);
        assert_eq!(10.0, destination.lat());
        assert!(is_within_tolerance(0.913_195_091_293_656_2, destination.lon(), 1e-9));

        // over the North pole
        let a = GeoPoint::new(0, 89);
        let destination = a.rhumb_destination_point(0, 500);
        assert!(is_within_tolerance(86.503_391_970_406_33, destination.lat(), 1e-9));
    }

    #[test]
    fn test_rhumb_midpoint_to() {
        let mid = bank().rhumb_midpoint_to(&greenwich());
        assert!(is_within_tolerance(51.4957, mid.lat(), 1e-9));
        assert!(is_within_tolerance(-0.049_890_496_716_404_55, mid.lon(), 1e-9));

        let mid = GeoPoint::new(170, 0).rhumb_midpoint_to(&GeoPoint::new(-170, 0));
        assert!(is_within_tolerance(180.0, libm::fabs(mid.lon()), 1e-9));
    }

    #[test]
    fn test_square_points() {
        let centre = GeoPoint::new(0, 0);
        let points = centre.square_points(100);
        assert!(is_within_tolerance(0.899_321_605_918_730_6, points.n.lat(), 1e-9));
        assert!(is_within_tolerance(0.0, points.n.lon(), 1e-9));
        assert!(is_within_tolerance(0.899_321_605_918_752_2, points.e.lon(), 1e-9));
        assert!(is_within_tolerance(-0.635_903_349_647_258, points.es.lat(), 1e-9));
        assert!(is_within_tolerance(0.635_942_518_261_101_5, points.es.lon(), 1e-9));
        assert!(is_within_tolerance(-0.899_321_605_918_730_6, points.s.lat(), 1e-9));
        assert!(is_within_tolerance(-0.899_321_605_918_752_2, points.w.lon(), 1e-9));
        assert!(0.0 < points.wn.lat() && points.wn.lon() < 0.0);
        assert!(points.ne.lat() > 0.0 && points.ne.lon() > 0.0);
        assert!(points.sw.lat() < 0.0 && points.sw.lon() < 0.0);

        for point in points.into_array() {
            assert_eq!("100.0", centre.distance_to(&point, 4));
        }
    }

    #[test]
    fn test_square_points_as_strings() {
        let centre = GeoPoint::new(0, 0);
        let points = centre.square_points(100);
        let strings = centre.square_points_as_strings("100");
        assert_eq!(points.n.to_lng_lat(None), strings.n);
        assert_eq!(points.es.to_lng_lat(None), strings.es);
        assert_eq!(points.wn.to_lng_lat(None), strings.wn);
        assert_eq!(points.map(|point| point.to_lng_lat(None)), strings);
    }

    #[test]
    fn test_in_square() {
        let south_west = GeoPoint::new(-1, 50);
        let north_east = GeoPoint::new(1, 52);
        assert!(bank().in_square(&south_west, &north_east));

        // the edges and corners are inside
        assert!(GeoPoint::new(-1, 51).in_square(&south_west, &north_east));
        assert!(GeoPoint::new(0, 52).in_square(&south_west, &north_east));
        assert!(GeoPoint::new(1, 50).in_square(&south_west, &north_east));

        assert!(!GeoPoint::new(0, 49.999).in_square(&south_west, &north_east));
        assert!(!GeoPoint::new(1.001, 51).in_square(&south_west, &north_east));
        assert!(!GeoPoint::new(0, "x").in_square(&south_west, &north_east));
    }

    #[test]
    fn test_to_array_and_to_lng_lat() {
        let point = bank();
        assert_eq!([-0.0983, 51.5136], point.to_array(None));
        assert_eq!([-0.1, 51.51], point.to_array(Some(2)));
        assert_eq!([0.0, 52.0], point.to_array(Some(0)));

        assert_eq!("-0.0983,51.5136", point.to_lng_lat(None));
        assert_eq!("-0.098,51.514", point.to_lng_lat(Some(3)));
        assert_eq!("NaN,51.5136", GeoPoint::new("", 51.5136).to_lng_lat(None));
    }

    #[test]
    fn test_to_array_and_to_lng_lat_ties() {
        // halves round away from zero in both exports
        let point = GeoPoint::new(0.125, 2.5);
        assert_eq!([0.13, 2.5], point.to_array(Some(2)));
        assert_eq!("0.13,2.50", point.to_lng_lat(Some(2)));
        assert_eq!([0.0, 3.0], point.to_array(Some(0)));
        assert_eq!("0,3", point.to_lng_lat(Some(0)));

        let point = GeoPoint::new(-0.125, -2.5);
        assert_eq!("-0.13,-2.50", point.to_lng_lat(Some(2)));
    }

    #[test]
    fn test_format_lat_lon() {
        let point = bank();
        assert_eq!("51\u{b0}30\u{2032}49\u{2033}N", point.format_lat(&Dms, DmsFormat::Dms, None));
        assert_eq!("000\u{b0}05.90\u{2032}W", point.format_lon(&Dms, DmsFormat::Dm, None));
        assert_eq!("51.51\u{b0}N", point.format_lat(&Dms, DmsFormat::D, Some(2)));
    }

    #[test]
    fn test_to_string_with_formatter() {
        struct Decimal;

        impl CoordinateFormatter for Decimal {
            fn format_as_latitude(&self, lat: Degrees, _: DmsFormat, dp: Option<usize>) -> String {
                format!("{:.*}", dp.unwrap_or(2), lat.0)
            }

            fn format_as_longitude(&self, lon: Degrees, _: DmsFormat, dp: Option<usize>) -> String {
                format!("{:.*}", dp.unwrap_or(2), lon.0)
            }
        }

        let point = bank();
        assert_eq!("-0.10, 51.51", point.to_string_with(&Decimal, DmsFormat::D, None));
        assert_eq!("-0.098, 51.514", point.to_string_with(&Decimal, DmsFormat::D, Some(3)));
        assert_eq!("-,-", GeoPoint::new(0, "").to_string_with(&Decimal, DmsFormat::D, None));
    }

    #[test]
    fn test_geopoint_traits() {
        let point = bank();
        assert_eq!(
            "000\u{b0}05\u{2032}54\u{2033}W, 51\u{b0}30\u{2032}49\u{2033}N",
            point.to_string()
        );

        let point_copy = point;
        assert!(point_copy == point);

        println!("GeoPoint: {:?}", point);
    }

    #[test]
    fn test_lat_long_conversion() {
        let point = bank();
        let lat_long = LatLong::from(&point);
        assert_eq!(51.5136, lat_long.lat().0);
        assert_eq!(-0.0983, lat_long.lon().0);
        assert_eq!(point, GeoPoint::from(&lat_long));
    }
}
