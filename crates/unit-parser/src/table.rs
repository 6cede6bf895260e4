//! Unit definitions and prefix resolution.

use std::f64::consts::PI;

use crate::{Dimensions, Unit};

const fn dims(l: i8, m: i8, t: i8, i: i8, th: i8) -> Dimensions {
    Dimensions([l, m, t, i, th, 0, 0])
}

const CELSIUS_OFFSET: f64 = 273.15;
const FAHRENHEIT_SCALE: f64 = 5.0 / 9.0;
const FAHRENHEIT_OFFSET: f64 = 459.67 * 5.0 / 9.0;

/// Prefixes usable with unit symbols, longest first.
const SYMBOL_PREFIXES: &[(&str, f64)] = &[
    ("da", 1e1),
    ("Y", 1e24),
    ("Z", 1e21),
    ("E", 1e18),
    ("P", 1e15),
    ("T", 1e12),
    ("G", 1e9),
    ("M", 1e6),
    ("k", 1e3),
    ("h", 1e2),
    ("d", 1e-1),
    ("c", 1e-2),
    ("m", 1e-3),
    ("u", 1e-6),
    ("µ", 1e-6),
    ("n", 1e-9),
    ("p", 1e-12),
    ("f", 1e-15),
    ("a", 1e-18),
    ("z", 1e-21),
    ("y", 1e-24),
];

/// Prefixes usable with unit names.
const NAME_PREFIXES: &[(&str, f64)] = &[
    ("yotta", 1e24),
    ("zetta", 1e21),
    ("exa", 1e18),
    ("peta", 1e15),
    ("tera", 1e12),
    ("giga", 1e9),
    ("mega", 1e6),
    ("kilo", 1e3),
    ("hecto", 1e2),
    ("deka", 1e1),
    ("deca", 1e1),
    ("deci", 1e-1),
    ("centi", 1e-2),
    ("milli", 1e-3),
    ("micro", 1e-6),
    ("nano", 1e-9),
    ("pico", 1e-12),
    ("femto", 1e-15),
    ("atto", 1e-18),
    ("zepto", 1e-21),
    ("yocto", 1e-24),
];

/// Units that take neither prefixes nor plurals.
fn special(name: &str) -> Option<Unit> {
    let unit = match name {
        "Celsius" | "celsius" | "degree_Celsius" | "degrees_Celsius" | "degree_C"
        | "degrees_C" | "degreeC" | "degreesC" | "degC" | "deg_C" | "°C" => {
            Unit::new(1.0, Dimensions::TEMPERATURE).with_offset(CELSIUS_OFFSET)
        }
        "fahrenheit" | "Fahrenheit" | "degree_Fahrenheit" | "degrees_Fahrenheit"
        | "degree_F" | "degrees_F" | "degreeF" | "degreesF" | "degF" | "deg_F" | "°F" => {
            Unit::new(FAHRENHEIT_SCALE, Dimensions::TEMPERATURE).with_offset(FAHRENHEIT_OFFSET)
        }
        "rankine" | "degree_Rankine" | "degrees_Rankine" | "degR" | "°R" => {
            Unit::new(FAHRENHEIT_SCALE, Dimensions::TEMPERATURE)
        }
        "degree_north" | "degrees_north" | "degree_N" | "degrees_N" | "degreeN"
        | "degreesN" | "degree_east" | "degrees_east" | "degree_E" | "degrees_E"
        | "degreeE" | "degreesE" | "degree_south" | "degrees_south" | "degree_S"
        | "degrees_S" | "degree_west" | "degrees_west" | "degree_W" | "degrees_W"
        | "degree_true" | "degrees_true" | "°" => Unit::new(PI / 180.0, Dimensions::NONE),
        "%" | "percent" => Unit::new(1e-2, Dimensions::NONE),
        "ppm" => Unit::new(1e-6, Dimensions::NONE),
        "ppb" => Unit::new(1e-9, Dimensions::NONE),
        _ => return None,
    };
    Some(unit)
}

/// Unit symbols, combinable with [`SYMBOL_PREFIXES`].
fn symbol(name: &str) -> Option<Unit> {
    let unit = match name {
        "m" => Unit::new(1.0, Dimensions::LENGTH),
        "g" => Unit::new(1e-3, Dimensions::MASS),
        "s" => Unit::new(1.0, Dimensions::TIME),
        "A" => Unit::new(1.0, Dimensions::CURRENT),
        "K" => Unit::new(1.0, Dimensions::TEMPERATURE),
        "mol" => Unit::new(1.0, Dimensions::AMOUNT),
        "cd" => Unit::new(1.0, Dimensions::LUMINOSITY),
        "Hz" => Unit::new(1.0, dims(0, 0, -1, 0, 0)),
        "N" => Unit::new(1.0, dims(1, 1, -2, 0, 0)),
        "Pa" => Unit::new(1.0, dims(-1, 1, -2, 0, 0)),
        "bar" => Unit::new(1e5, dims(-1, 1, -2, 0, 0)),
        "atm" => Unit::new(101_325.0, dims(-1, 1, -2, 0, 0)),
        "J" => Unit::new(1.0, dims(2, 1, -2, 0, 0)),
        "W" => Unit::new(1.0, dims(2, 1, -3, 0, 0)),
        "C" => Unit::new(1.0, dims(0, 0, 1, 1, 0)),
        "V" => Unit::new(1.0, dims(2, 1, -3, -1, 0)),
        "F" => Unit::new(1.0, dims(-2, -1, 4, 2, 0)),
        "ohm" | "Ω" => Unit::new(1.0, dims(2, 1, -3, -2, 0)),
        "S" => Unit::new(1.0, dims(-2, -1, 3, 2, 0)),
        "Wb" => Unit::new(1.0, dims(2, 1, -2, -1, 0)),
        "T" => Unit::new(1.0, dims(0, 1, -2, -1, 0)),
        "H" => Unit::new(1.0, dims(2, 1, -2, -2, 0)),
        "L" | "l" => Unit::new(1e-3, dims(3, 0, 0, 0, 0)),
        "rad" => Unit::new(1.0, Dimensions::NONE),
        "sr" => Unit::new(1.0, Dimensions::NONE),
        "deg" => Unit::new(PI / 180.0, Dimensions::NONE),
        "min" => Unit::new(60.0, Dimensions::TIME),
        "h" | "hr" => Unit::new(3600.0, Dimensions::TIME),
        "d" => Unit::new(86_400.0, Dimensions::TIME),
        "yr" => Unit::new(3.155_692_597_47e7, Dimensions::TIME),
        _ => return None,
    };
    Some(unit)
}

/// Unit names, combinable with [`NAME_PREFIXES`] and pluralised with `s`.
fn named(name: &str) -> Option<Unit> {
    let unit = match name {
        "meter" | "metre" => Unit::new(1.0, Dimensions::LENGTH),
        "gram" => Unit::new(1e-3, Dimensions::MASS),
        "second" | "sec" => Unit::new(1.0, Dimensions::TIME),
        "ampere" => Unit::new(1.0, Dimensions::CURRENT),
        "kelvin" => Unit::new(1.0, Dimensions::TEMPERATURE),
        "mole" => Unit::new(1.0, Dimensions::AMOUNT),
        "candela" => Unit::new(1.0, Dimensions::LUMINOSITY),
        "hertz" => Unit::new(1.0, dims(0, 0, -1, 0, 0)),
        "newton" => Unit::new(1.0, dims(1, 1, -2, 0, 0)),
        "pascal" => Unit::new(1.0, dims(-1, 1, -2, 0, 0)),
        "bar" => Unit::new(1e5, dims(-1, 1, -2, 0, 0)),
        "atmosphere" => Unit::new(101_325.0, dims(-1, 1, -2, 0, 0)),
        "joule" => Unit::new(1.0, dims(2, 1, -2, 0, 0)),
        "watt" => Unit::new(1.0, dims(2, 1, -3, 0, 0)),
        "coulomb" => Unit::new(1.0, dims(0, 0, 1, 1, 0)),
        "volt" => Unit::new(1.0, dims(2, 1, -3, -1, 0)),
        "farad" => Unit::new(1.0, dims(-2, -1, 4, 2, 0)),
        "ohm" => Unit::new(1.0, dims(2, 1, -3, -2, 0)),
        "siemens" => Unit::new(1.0, dims(-2, -1, 3, 2, 0)),
        "weber" => Unit::new(1.0, dims(2, 1, -2, -1, 0)),
        "tesla" => Unit::new(1.0, dims(0, 1, -2, -1, 0)),
        "henry" => Unit::new(1.0, dims(2, 1, -2, -2, 0)),
        "liter" | "litre" => Unit::new(1e-3, dims(3, 0, 0, 0, 0)),
        "radian" => Unit::new(1.0, Dimensions::NONE),
        "steradian" => Unit::new(1.0, Dimensions::NONE),
        "degree" | "arc_degree" | "angular_degree" => Unit::new(PI / 180.0, Dimensions::NONE),
        "minute" => Unit::new(60.0, Dimensions::TIME),
        "hour" => Unit::new(3600.0, Dimensions::TIME),
        "day" => Unit::new(86_400.0, Dimensions::TIME),
        "week" => Unit::new(604_800.0, Dimensions::TIME),
        "year" => Unit::new(3.155_692_597_47e7, Dimensions::TIME),
        "common_year" => Unit::new(31_536_000.0, Dimensions::TIME),
        "count" => Unit::new(1.0, Dimensions::NONE),
        _ => return None,
    };
    Some(unit)
}

fn named_or_plural(name: &str) -> Option<Unit> {
    named(name).or_else(|| name.strip_suffix('s').and_then(named))
}

fn scaled(unit: Unit, factor: f64) -> Unit {
    Unit::new(unit.scale() * factor, unit.dimensions())
}

/// Resolve a unit identifier.
pub(crate) fn lookup(name: &str) -> Option<Unit> {
    if let Some(unit) = special(name).or_else(|| symbol(name)).or_else(|| named_or_plural(name)) {
        return Some(unit);
    }

    for (prefix, factor) in NAME_PREFIXES {
        if let Some(rest) = name.strip_prefix(prefix) {
            if let Some(unit) = named_or_plural(rest) {
                return Some(scaled(unit, *factor));
            }
        }
    }

    for (prefix, factor) in SYMBOL_PREFIXES {
        if let Some(rest) = name.strip_prefix(prefix) {
            if let Some(unit) = symbol(rest) {
                return Some(scaled(unit, *factor));
            }
        }
    }

    None
}
