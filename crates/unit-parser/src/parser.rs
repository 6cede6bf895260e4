//! Grammar for unit strings.
//!
//! ```text
//! unit    := product [ ' ' shift ' ' timestamp ]
//! product := factor { op factor }
//! factor  := term [ exponent ]
//! term    := number | identifier | '(' product ')'
//! op      := '/' | 'per' | '*' | '.' | '·' | ' '
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, digit1, one_of, space0, space1},
    combinator::{all_consuming, map, map_res, not, opt, recognize, rest, value},
    multi::many0,
    number::complete::recognize_float,
    sequence::{delimited, pair, preceded, terminated},
    IResult,
};

use crate::error::{UnitError, UnitResult};
use crate::{table, Dimensions, Unit};

#[derive(Debug, Clone, PartialEq)]
enum Term<'a> {
    Number(f64),
    Symbol(&'a str),
    Group(Vec<Factor<'a>>),
}

#[derive(Debug, Clone, PartialEq)]
struct Factor<'a> {
    term: Term<'a>,
    exponent: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Op {
    Mul,
    Div,
}

fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphabetic() || matches!(c, '_' | '%' | '°' | 'µ'))(input)
}

fn integer(input: &str) -> IResult<&str, i32> {
    map_res(recognize(pair(opt(one_of("+-")), digit1)), str::parse)(input)
}

/// `^2`, `**-1`
fn caret_exponent(input: &str) -> IResult<&str, i32> {
    preceded(alt((tag("**"), tag("^"))), integer)(input)
}

fn number(input: &str) -> IResult<&str, f64> {
    map_res(recognize_float, str::parse)(input)
}

fn group(input: &str) -> IResult<&str, Vec<Factor<'_>>> {
    delimited(
        pair(char('('), space0),
        product,
        pair(space0, char(')')),
    )(input)
}

fn term(input: &str) -> IResult<&str, Term<'_>> {
    alt((
        map(group, Term::Group),
        map(number, Term::Number),
        map(identifier, Term::Symbol),
    ))(input)
}

fn factor(input: &str) -> IResult<&str, Factor<'_>> {
    let (input, term) = term(input)?;
    // numbers only take an explicit exponent, "10-3" is not a power
    let (input, exponent) = match term {
        Term::Number(_) => opt(caret_exponent)(input)?,
        _ => opt(alt((caret_exponent, integer)))(input)?,
    };
    Ok((
        input,
        Factor {
            term,
            exponent: exponent.unwrap_or(1),
        },
    ))
}

fn shift_keyword(input: &str) -> IResult<&str, &str> {
    terminated(
        alt((tag("since"), tag("from"), tag("after"), tag("ref"))),
        space1,
    )(input)
}

fn operator(input: &str) -> IResult<&str, Op> {
    alt((
        value(Op::Div, delimited(space0, char('/'), space0)),
        value(Op::Div, delimited(space1, tag("per"), space1)),
        value(Op::Mul, delimited(space0, one_of("*.·"), space0)),
        value(Op::Mul, terminated(space1, not(shift_keyword))),
    ))(input)
}

fn product(input: &str) -> IResult<&str, Vec<Factor<'_>>> {
    map(pair(factor, many0(pair(operator, factor))), |(first, others)| {
        let mut factors = vec![first];
        for (op, mut next) in others {
            if op == Op::Div {
                next.exponent = next.exponent.saturating_neg();
            }
            factors.push(next);
        }
        factors
    })(input)
}

fn unit_expr(input: &str) -> IResult<&str, (Vec<Factor<'_>>, Option<&str>)> {
    all_consuming(pair(
        product,
        opt(preceded(pair(space1, shift_keyword), rest)),
    ))(input)
}

fn factor_unit(factor: &Factor<'_>, text: &str) -> UnitResult<Unit> {
    let base = match &factor.term {
        Term::Number(n) => Unit::new(*n, Dimensions::NONE),
        Term::Symbol(name) => {
            table::lookup(name).ok_or_else(|| UnitError::UnknownUnit((*name).to_string()))?
        }
        Term::Group(inner) => evaluate(inner, text)?,
    };
    base.checked_powi(factor.exponent)
        .ok_or_else(|| UnitError::ExponentOverflow(text.to_string()))
}

/// Fold the factors into one unit. `text` is the whole unit string, for errors.
fn evaluate(factors: &[Factor<'_>], text: &str) -> UnitResult<Unit> {
    // a lone factor keeps its offset (degC), products drop it
    if let [single] = factors {
        return factor_unit(single, text);
    }
    factors
        .iter()
        .try_fold(Unit::new(1.0, Dimensions::NONE), |acc, f| {
            acc.checked_product(&factor_unit(f, text)?)
                .ok_or_else(|| UnitError::ExponentOverflow(text.to_string()))
        })
}

const ZONED_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%d %H:%M:%S %z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse the origin of a `since` unit. Zoned timestamps are shifted to UTC.
fn parse_timestamp(s: &str) -> UnitResult<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_utc());
    }
    for fmt in ZONED_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Ok(dt.naive_utc());
        }
    }

    let naive = s
        .strip_suffix('Z')
        .or_else(|| s.strip_suffix("UTC"))
        .unwrap_or(s)
        .trim_end();
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, fmt) {
            return Ok(dt);
        }
    }

    NaiveDate::parse_from_str(naive, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| UnitError::InvalidTimestamp(s.to_string()))
}

/// Parse a complete unit string.
pub(crate) fn parse_unit(s: &str) -> UnitResult<Unit> {
    let text = s.trim();
    if text.is_empty() {
        return Err(UnitError::Empty);
    }

    let (_, (factors, origin)) =
        unit_expr(text).map_err(|_| UnitError::Syntax(text.to_string()))?;
    let unit = evaluate(&factors, text)?;

    match origin {
        Some(timestamp) => {
            if unit.dimensions() != Dimensions::TIME {
                return Err(UnitError::Syntax(text.to_string()));
            }
            Ok(unit.since(parse_timestamp(timestamp)?))
        }
        None => Ok(unit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims_of(s: &str) -> Dimensions {
        parse_unit(s).unwrap().dimensions()
    }

    #[test]
    fn test_attached_exponents() {
        let (rest, f) = factor("s-1").unwrap();
        assert_eq!(rest, "");
        assert_eq!(f.term, Term::Symbol("s"));
        assert_eq!(f.exponent, -1);

        let (_, f) = factor("m^2").unwrap();
        assert_eq!(f.exponent, 2);
        let (_, f) = factor("m**3").unwrap();
        assert_eq!(f.exponent, 3);
    }

    #[test]
    fn test_separators() {
        let velocity = Dimensions([1, 0, -1, 0, 0, 0, 0]);
        for s in ["m s-1", "m/s", "m / s", "m per s", "m.s-1", "m*s^-1", "m·s-1"] {
            assert_eq!(dims_of(s), velocity, "{}", s);
        }
    }

    #[test]
    fn test_groups_and_numbers() {
        assert_eq!(dims_of("kg/(m s^2)"), Dimensions([-1, 1, -2, 0, 0, 0, 0]));
        let scaled = parse_unit("1e-3 m").unwrap();
        assert!((scaled.scale() - 1e-3).abs() < 1e-12);
        assert_eq!(dims_of("1"), Dimensions::NONE);
        assert!((parse_unit("10^3 m").unwrap().scale() - 1e3).abs() < 1e-9);
    }

    #[test]
    fn test_since_suffix() {
        let unit = parse_unit("seconds since 1970-01-01T00:00:00Z").unwrap();
        assert!(unit.is_time_reference());
        assert_eq!(unit.offset(), 0.0);

        let unit = parse_unit("days since 1970-01-02").unwrap();
        assert_eq!(unit.offset(), 86_400.0);
        assert_eq!(unit.scale(), 86_400.0);

        let unit = parse_unit("hours since 1970-01-01 01:00:00").unwrap();
        assert_eq!(unit.offset(), 3600.0);
    }

    #[test]
    fn test_since_requires_time() {
        assert!(matches!(
            parse_unit("m since 1970-01-01"),
            Err(UnitError::Syntax(_))
        ));
        assert!(matches!(
            parse_unit("seconds since yesterday"),
            Err(UnitError::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_unit("   "), Err(UnitError::Empty));
        assert_eq!(
            parse_unit("m furlong"),
            Err(UnitError::UnknownUnit("furlong".into()))
        );
        assert!(matches!(parse_unit("m //"), Err(UnitError::Syntax(_))));
        assert!(matches!(parse_unit("(m s"), Err(UnitError::Syntax(_))));
        assert_eq!(
            parse_unit("m^256"),
            Err(UnitError::ExponentOverflow("m^256".into()))
        );
        assert_eq!(
            parse_unit("m / s-2147483648"),
            Err(UnitError::ExponentOverflow("m / s-2147483648".into()))
        );
    }
}
