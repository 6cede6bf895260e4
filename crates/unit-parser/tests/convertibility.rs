//! Convertibility of the unit strings found in glider files.

use test_utils::assert_approx_eq;
use unit_parser::{are_convertible, Unit, UnitError};

// ============================================================================
// Glider DAC units
// ============================================================================

#[test]
fn test_glider_units_parse() {
    for s in [
        "m s-1",
        "S m-1",
        "kg m-3",
        "dbar",
        "m",
        "1",
        "degrees_C",
        "Celsius",
        "degrees_north",
        "degrees_east",
        "seconds since 1970-01-01T00:00:00Z",
    ] {
        assert!(Unit::parse(s).is_ok(), "failed to parse '{}'", s);
    }
}

#[test]
fn test_temperature_aliases_are_convertible() {
    assert!(are_convertible("Celsius", "degrees_C").unwrap());
    assert!(are_convertible("degC", "K").unwrap());
    assert!(are_convertible("degree_Celsius", "degF").unwrap());
}

#[test]
fn test_pressure_units() {
    assert!(are_convertible("dbar", "Pa").unwrap());
    assert!(are_convertible("decibar", "bar").unwrap());
    assert!(!are_convertible("dbar", "m").unwrap());
}

#[test]
fn test_conductivity_and_density() {
    assert!(are_convertible("S m-1", "mS/cm").unwrap());
    assert!(are_convertible("kg m-3", "g/cm3").unwrap());
    assert!(!are_convertible("S m-1", "kg m-3").unwrap());
}

#[test]
fn test_velocity_units() {
    assert!(are_convertible("m s-1", "cm/s").unwrap());
    assert!(are_convertible("m s-1", "km per hour").unwrap());
    assert!(!are_convertible("m s-1", "m").unwrap());
}

#[test]
fn test_time_reference_units() {
    assert!(are_convertible("seconds since 1970-01-01T00:00:00Z", "days since 2000-01-01").unwrap());
    assert!(are_convertible("seconds since 1970-01-01T00:00:00Z", "s").unwrap());
    assert!(!are_convertible("seconds since 1970-01-01T00:00:00Z", "m").unwrap());
}

#[test]
fn test_angles_are_dimensionless() {
    assert!(are_convertible("degrees_north", "radian").unwrap());
    assert!(are_convertible("degrees_east", "1").unwrap());
}

// ============================================================================
// Value conversion
// ============================================================================

#[test]
fn test_convert_temperature() {
    let celsius = Unit::parse("degrees_C").unwrap();
    let kelvin = Unit::parse("K").unwrap();
    let fahrenheit = Unit::parse("degF").unwrap();

    assert_approx_eq!(celsius.convert(0.0, &kelvin).unwrap(), 273.15, 1e-9);
    assert_approx_eq!(celsius.convert(100.0, &fahrenheit).unwrap(), 212.0, 1e-9);
}

#[test]
fn test_convert_time_reference() {
    let seconds = Unit::parse("seconds since 1970-01-01T00:00:00Z").unwrap();
    let days = Unit::parse("days since 1970-01-02").unwrap();
    assert_approx_eq!(seconds.convert(172_800.0, &days).unwrap(), 1.0, 1e-9);
}

#[test]
fn test_convert_scaled_units() {
    let dbar = Unit::parse("dbar").unwrap();
    let pascal = Unit::parse("Pa").unwrap();
    assert_approx_eq!(dbar.convert(1.0, &pascal).unwrap(), 1e4, 1e-6);

    let conductivity = Unit::parse("S m-1").unwrap();
    let millis = Unit::parse("mS/cm").unwrap();
    assert_approx_eq!(conductivity.convert(4.2, &millis).unwrap(), 42.0, 1e-9);
}

#[test]
fn test_convert_rejects_mismatch() {
    let metre = Unit::parse("m").unwrap();
    let second = Unit::parse("s").unwrap();
    assert!(matches!(
        metre.convert(1.0, &second),
        Err(UnitError::NotConvertible { .. })
    ));
}

// ============================================================================
// Invalid strings
// ============================================================================

#[test]
fn test_invalid_strings_error() {
    assert!(are_convertible("", "m").is_err());
    assert!(are_convertible("m", "not a unit").is_err());
    assert!(are_convertible("m s-", "m").is_err());
}

#[test]
fn test_out_of_range_exponents_error() {
    assert_eq!(
        are_convertible("m^256", "1"),
        Err(UnitError::ExponentOverflow("m^256".to_string()))
    );
    assert!(matches!(
        are_convertible("m^257", "m"),
        Err(UnitError::ExponentOverflow(_))
    ));
    assert!(matches!(
        Unit::parse("m^100 m^100"),
        Err(UnitError::ExponentOverflow(_))
    ));
    assert!(matches!(
        Unit::parse("(m^64)^2"),
        Err(UnitError::ExponentOverflow(_))
    ));
    assert!(are_convertible("m^127", "m^100 m^27").unwrap());
}
