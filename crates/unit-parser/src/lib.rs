//! UDUNITS style unit strings.
//!
//! Parses the unit strings found in CF metadata (`m s-1`, `degrees_C`,
//! `kg m-3`, `seconds since 1970-01-01T00:00:00Z`) into a scale, an offset
//! and a vector of base dimension exponents. Two units are convertible when
//! their dimension vectors match.
//!
//! Angles and counts are dimensionless, as in UDUNITS, so `degrees_north` is
//! convertible to `radian` and to `1`.

mod error;
mod parser;
mod table;

use std::fmt;

use chrono::NaiveDateTime;

pub use error::{UnitError, UnitResult};

/// Exponents of the SI base dimensions.
///
/// Order: length, mass, time, electric current, temperature, amount of
/// substance, luminous intensity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Dimensions(pub [i8; 7]);

impl Dimensions {
    pub const NONE: Dimensions = Dimensions([0; 7]);
    pub const LENGTH: Dimensions = Dimensions([1, 0, 0, 0, 0, 0, 0]);
    pub const MASS: Dimensions = Dimensions([0, 1, 0, 0, 0, 0, 0]);
    pub const TIME: Dimensions = Dimensions([0, 0, 1, 0, 0, 0, 0]);
    pub const CURRENT: Dimensions = Dimensions([0, 0, 0, 1, 0, 0, 0]);
    pub const TEMPERATURE: Dimensions = Dimensions([0, 0, 0, 0, 1, 0, 0]);
    pub const AMOUNT: Dimensions = Dimensions([0, 0, 0, 0, 0, 1, 0]);
    pub const LUMINOSITY: Dimensions = Dimensions([0, 0, 0, 0, 0, 0, 1]);

    pub fn is_dimensionless(&self) -> bool {
        *self == Dimensions::NONE
    }

    /// Every exponent multiplied by `power`, or `None` when an exponent
    /// leaves the `i8` range.
    pub fn checked_powi(self, power: i32) -> Option<Dimensions> {
        let mut out = self.0;
        for exp in out.iter_mut() {
            *exp = i32::from(*exp)
                .checked_mul(power)
                .and_then(|p| i8::try_from(p).ok())?;
        }
        Some(Dimensions(out))
    }

    /// Exponent-wise sum, or `None` on overflow.
    pub fn checked_add(self, other: Dimensions) -> Option<Dimensions> {
        let mut out = self.0;
        for (exp, rhs) in out.iter_mut().zip(other.0) {
            *exp = exp.checked_add(rhs)?;
        }
        Some(Dimensions(out))
    }
}

/// A parsed unit.
///
/// A value `v` expressed in this unit equals `v * scale + offset` in the
/// coherent SI unit of its dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    text: String,
    scale: f64,
    offset: f64,
    dims: Dimensions,
    reference: Option<NaiveDateTime>,
}

impl Unit {
    pub(crate) fn new(scale: f64, dims: Dimensions) -> Self {
        Self {
            text: String::new(),
            scale,
            offset: 0.0,
            dims,
            reference: None,
        }
    }

    pub(crate) fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Parse a unit string.
    pub fn parse(s: &str) -> UnitResult<Unit> {
        let mut unit = parser::parse_unit(s)?;
        unit.text = s.trim().to_string();
        Ok(unit)
    }

    /// Whether values in this unit can be converted to `other`.
    pub fn is_convertible(&self, other: &Unit) -> bool {
        self.dims == other.dims
    }

    /// Convert `value` from this unit into `other`.
    pub fn convert(&self, value: f64, other: &Unit) -> UnitResult<f64> {
        if !self.is_convertible(other) {
            return Err(UnitError::NotConvertible {
                from: self.text.clone(),
                to: other.text.clone(),
            });
        }
        let si = value * self.scale + self.offset;
        Ok((si - other.offset) / other.scale)
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn is_dimensionless(&self) -> bool {
        self.dims.is_dimensionless()
    }

    /// Origin of a `<unit> since <timestamp>` unit.
    pub fn reference_time(&self) -> Option<NaiveDateTime> {
        self.reference
    }

    pub fn is_time_reference(&self) -> bool {
        self.reference.is_some()
    }

    /// Raise to an integer power. Offsets only survive a power of one.
    pub(crate) fn checked_powi(&self, power: i32) -> Option<Unit> {
        if power == 1 {
            return Some(self.clone());
        }
        let dims = self.dims.checked_powi(power)?;
        Some(Unit::new(self.scale.powi(power), dims))
    }

    /// Product of two units. Products drop offsets, so `degC m` is a plain
    /// kelvin metre.
    pub(crate) fn checked_product(&self, other: &Unit) -> Option<Unit> {
        let dims = self.dims.checked_add(other.dims)?;
        Some(Unit::new(self.scale * other.scale, dims))
    }

    /// Shift the origin to a reference time.
    pub(crate) fn since(mut self, reference: NaiveDateTime) -> Unit {
        let origin = reference.and_utc();
        let seconds = origin.timestamp() as f64 + f64::from(origin.timestamp_subsec_nanos()) * 1e-9;
        self.offset = seconds;
        self.reference = Some(reference);
        self
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl std::str::FromStr for Unit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Unit::parse(s)
    }
}

/// Parse both strings and report whether they are convertible.
///
/// Errors when either string is not a valid unit.
pub fn are_convertible(from: &str, to: &str) -> UnitResult<bool> {
    Ok(Unit::parse(from)?.is_convertible(&Unit::parse(to)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_arithmetic() {
        let per_second = Dimensions::TIME.checked_powi(-1).unwrap();
        let velocity = Dimensions::LENGTH.checked_add(per_second).unwrap();
        assert_eq!(velocity, Dimensions([1, 0, -1, 0, 0, 0, 0]));
        assert!(Dimensions::NONE.is_dimensionless());
    }

    #[test]
    fn test_dimension_overflow() {
        assert_eq!(Dimensions::LENGTH.checked_powi(128), None);
        assert_eq!(Dimensions::LENGTH.checked_powi(256), None);
        assert_eq!(Dimensions::LENGTH.checked_powi(i32::MIN), None);
        assert_eq!(Dimensions::NONE.checked_powi(i32::MAX), Some(Dimensions::NONE));
        let big = Dimensions::LENGTH.checked_powi(100).unwrap();
        assert_eq!(big.checked_add(big), None);
    }

    #[test]
    fn test_product_drops_offset() {
        let celsius = Unit::parse("degC").unwrap();
        assert!(celsius.offset() > 273.0);
        let product = celsius.checked_product(&Unit::parse("m").unwrap()).unwrap();
        assert_eq!(product.offset(), 0.0);
    }

    #[test]
    fn test_display_keeps_source_text() {
        let unit = Unit::parse("  m s-1 ").unwrap();
        assert_eq!(unit.to_string(), "m s-1");
    }
}
