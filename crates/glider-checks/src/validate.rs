//! Attribute and data type validation of a single variable.

use std::collections::HashSet;

use glider_common::{dtype_equal, AttrValue, Dataset, Tally};
use tracing::trace;
use unit_parser::Unit;

use crate::requirements::{AttributeSpec, AttributeSpecTable};

/// Key reserved for the expected data type, never checked as an attribute.
const DTYPE_KEY: &str = "dtype";

/// Check the attributes of `variable` against `spec`.
///
/// A variable missing from the dataset, or with no `spec`, contributes
/// nothing. Attributes named in `ignore` are skipped.
pub fn validate_attributes<D: Dataset + ?Sized>(
    dataset: &D,
    variable: &str,
    spec: Option<&AttributeSpec>,
    ignore: &HashSet<String>,
) -> Tally {
    let mut tally = Tally::new();
    let (Some(var), Some(spec)) = (dataset.variable(variable), spec) else {
        return tally;
    };

    for (attr, expected) in spec.attributes() {
        if attr == DTYPE_KEY || ignore.contains(attr) {
            continue;
        }

        let Some(actual) = var.attribute(attr) else {
            tally.fail(format!("Variable {} must contain attribute: {}", variable, attr));
            continue;
        };

        match expected {
            Some(expected) if !actual.matches(expected) => {
                if attr == "units" {
                    tally.assert_true(
                        units_convertible(actual, expected),
                        format!(
                            "Variable {} units attribute must be convertible to {}",
                            variable, expected
                        ),
                    );
                } else {
                    tally.fail(format!(
                        "Variable {} attribute {} must be {}",
                        variable, attr, expected
                    ));
                }
            }
            Some(_) => tally.pass(),
            None => tally.assert_true(
                actual.as_text().map_or(true, |text| !text.trim().is_empty()),
                format!("Variable {} attribute {} is empty", variable, attr),
            ),
        }
    }

    trace!(variable, score = tally.score, out_of = tally.out_of, "Validated attributes");
    tally
}

/// Unit strings that fail to parse are never convertible.
fn units_convertible(actual: &AttrValue, expected: &AttrValue) -> bool {
    let (Some(actual), Some(expected)) = (actual.as_text(), expected.as_text()) else {
        return false;
    };
    match (Unit::parse(actual), Unit::parse(expected)) {
        (Ok(actual), Ok(expected)) => actual.is_convertible(&expected),
        _ => false,
    }
}

/// Check the data type of `variable` against the table, and of its `_FillValue`.
///
/// A `_FillValue` whose type differs from the variable only grows `out_of`,
/// and a matching one adds nothing.
pub fn check_dtype<D: Dataset + ?Sized>(
    dataset: &D,
    variable: &str,
    table: &AttributeSpecTable,
) -> Tally {
    let mut tally = Tally::new();
    let Some(var) = dataset.variable(variable) else {
        return tally;
    };

    if let Some(expected) = table.get(variable).and_then(AttributeSpec::dtype) {
        tally.assert_true(
            dtype_equal(&var.dtype(), &expected),
            format!(
                "Variable {} is expected to have a dtype of {}, instead has a dtype of {}",
                variable,
                expected,
                var.dtype()
            ),
        );
    }

    if let Some(fill) = var.fill_value().filter(|fill| !fill.is_text()) {
        if !dtype_equal(&var.dtype(), &fill.dtype()) {
            tally.recommend(format!(
                "Variable {} _FillValue dtype does not match variable dtype",
                variable
            ));
        }
    }

    tally
}
