//! QARTOD flag variable checks.

use glider_common::{dtype_equal, AttrValue, CheckResult, DType, Dataset, Priority, Tally, Variable};

use crate::checker::GliderCheck;

/// Physical variables that may carry QARTOD flags.
pub const QARTOD_PARAMETERS: [&str; 4] = ["temperature", "conductivity", "density", "pressure"];

pub const QARTOD_TESTS: [&str; 5] = [
    "climatological",
    "flat_line",
    "gross_range",
    "rate_of_change",
    "spike",
];

const QARTOD_FILL_VALUE: f64 = 9.0;

fn is_byte(value: Option<&AttrValue>) -> bool {
    value.is_some_and(|v| dtype_equal(&v.dtype(), &DType::I8))
}

fn non_empty_text(value: Option<&AttrValue>) -> bool {
    value
        .and_then(AttrValue::as_text)
        .is_some_and(|text| !text.trim().is_empty())
}

fn check_flag_variable(name: &str, var: &Variable, tally: &mut Tally) {
    for bound in ["valid_min", "valid_max"] {
        if !var.has_attribute(bound) {
            tally.fail(format!("{} attribute for {} should be defined", bound, name));
        }
    }

    tally.assert_true(
        var.fill_value().and_then(AttrValue::as_f64) == Some(QARTOD_FILL_VALUE),
        format!("variable {} must have a _FillValue of 9b", name),
    );
    tally.assert_true(
        non_empty_text(var.attribute("long_name")),
        format!("attribute {}:long_name must be a non-empty string", name),
    );
    tally.assert_true(
        non_empty_text(var.attribute("flag_meanings")),
        format!("attribute {}:flag_meanings must be a non-empty string", name),
    );

    let flag_values = var.attribute("flag_values").filter(|v| v.is_array());
    tally.assert_true(
        flag_values.is_some(),
        format!("attribute {}:flag_values must be defined as an array of bytes", name),
    );
    if flag_values.is_some() {
        tally.assert_true(
            is_byte(flag_values),
            format!("attribute {}:flag_values has an illegal data-type, must be byte", name),
        );
    }

    for bound in ["valid_min", "valid_max"] {
        tally.assert_true(
            is_byte(var.attribute(bound)),
            format!("attribute {}:{} must be of type byte", name, bound),
        );
    }
}

impl GliderCheck {
    /// `None` when the dataset has no QARTOD flag variables.
    pub fn check_qartod<D: Dataset + ?Sized>(&self, dataset: &D) -> Option<CheckResult> {
        let mut tally = Tally::new();
        for param in QARTOD_PARAMETERS {
            for test in QARTOD_TESTS {
                let name = format!("qartod_{}_{}_flag", param, test);
                if let Some(var) = dataset.variable(&name) {
                    check_flag_variable(&name, var, &mut tally);
                }
            }
        }

        if tally.is_empty() {
            return None;
        }
        Some(tally.into_result(Priority::Medium, "QARTOD Variables"))
    }
}
