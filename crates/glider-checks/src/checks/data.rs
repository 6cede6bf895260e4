//! Checks on the data values of time, depth and longitude.

use glider_common::{CheckResult, Dataset, Priority, Tally};

use crate::checker::GliderCheck;

const PROFILE_DATA: &str = "Profile data is valid";

/// Smallest net depth change of a valid profile.
const MIN_DEPTH_SPAN: f64 = 1e-4;

impl GliderCheck {
    /// Masked times are skipped. Without a time variable nothing is scored.
    pub fn check_monotonically_increasing_time<D: Dataset + ?Sized>(
        &self,
        dataset: &D,
    ) -> CheckResult {
        let mut tally = Tally::new();
        if let Some(time) = dataset.variable("time") {
            let times: Vec<f64> = time.valid_values().collect();
            tally.assert_true(
                times.windows(2).all(|pair| pair[1] - pair[0] > 0.0),
                "Time variable is not monotonically increasing",
            );
        }
        tally.into_result(Priority::High, PROFILE_DATA)
    }

    pub fn check_dim_no_data<D: Dataset + ?Sized>(&self, dataset: &D) -> CheckResult {
        let mut tally = Tally::new();
        if let (Some(time), Some(depth)) = (dataset.variable("time"), dataset.variable("depth")) {
            tally.assert_true(
                time.valid_count() * depth.valid_count() >= 2,
                "Time and depth variables must have at least two valid data points together",
            );
        }
        tally.into_result(Priority::High, PROFILE_DATA)
    }

    /// The first differences of the valid depths must not cancel out.
    pub fn check_depth_array<D: Dataset + ?Sized>(&self, dataset: &D) -> CheckResult {
        let mut tally = Tally::new();
        if let Some(depth) = dataset.variable("depth") {
            let depths: Vec<f64> = depth.valid_values().collect();
            let span: f64 = depths.windows(2).map(|pair| pair[1] - pair[0]).sum();
            tally.assert_true(
                span.abs() > MIN_DEPTH_SPAN,
                "Depth array must be valid, ie  abs(Z0 - Zend) > 0",
            );
        }
        tally.into_result(Priority::High, PROFILE_DATA)
    }

    pub fn check_valid_lon<D: Dataset + ?Sized>(&self, dataset: &D) -> Option<CheckResult> {
        let lon = dataset.variable("lon")?;
        let mut tally = Tally::new();

        let mut bound = |name: &str| match lon.attribute(name) {
            None => {
                tally.fail(format!("{} attribute for longitude should be defined", name));
                None
            }
            Some(value) => {
                let number = value.as_f64();
                if number.is_none() {
                    tally.fail(format!(
                        "{} attribute for longitude should be a single number",
                        name
                    ));
                }
                number
            }
        };
        let valid_min = bound("valid_min");
        let valid_max = bound("valid_max");
        tally.assert_true(
            !(valid_min == Some(-90.0) && valid_max == Some(90.0)),
            "Longitude's valid_min and valid_max are [-90, 90], it's likely this was a mistake",
        );

        Some(tally.into_result(Priority::Low, "Longitude valid_min valid_max not [-90, 90]"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CheckerOptions;
    use authority_tables::AuthorityTables;
    use glider_common::{DType, MemoryDataset, Variable};

    fn checker() -> GliderCheck {
        GliderCheck::with_tables(CheckerOptions::new(), AuthorityTables::default())
    }

    fn with_var(name: &str, data: Vec<Option<f64>>) -> MemoryDataset {
        MemoryDataset::new().with_variable(Variable::new(name, DType::F64).with_data(data))
    }

    #[test]
    fn test_monotonic_time() {
        let check = checker();
        let ds = with_var("time", vec![Some(1.0), None, Some(2.0), Some(5.0)]);
        assert_eq!(check.check_monotonically_increasing_time(&ds).value(), (1, 1));

        let ds = with_var("time", vec![Some(1.0), Some(1.0), Some(2.0)]);
        let result = check.check_monotonically_increasing_time(&ds);
        assert_eq!(result.value(), (0, 1));
        assert_eq!(result.name, "Profile data is valid");
        assert_eq!(result.messages[0], "Time variable is not monotonically increasing");
    }

    #[test]
    fn test_monotonic_time_without_time() {
        let result = checker().check_monotonically_increasing_time(&MemoryDataset::new());
        assert_eq!(result.value(), (0, 0));
    }

    #[test]
    fn test_dim_no_data() {
        let check = checker();
        let ds = with_var("time", vec![Some(1.0), None])
            .with_variable(Variable::new("depth", DType::F64).with_data(vec![None, Some(3.0)]));
        let result = check.check_dim_no_data(&ds);
        assert_eq!(result.value(), (0, 1));
        assert_eq!(
            result.messages[0],
            "Time and depth variables must have at least two valid data points together"
        );

        let ds = with_var("time", vec![Some(1.0), Some(2.0)])
            .with_variable(Variable::new("depth", DType::F64).with_values([3.0]));
        assert_eq!(check.check_dim_no_data(&ds).value(), (1, 1));

        assert!(check.check_dim_no_data(&with_var("time", vec![Some(1.0)])).out_of == 0);
    }

    #[test]
    fn test_depth_array() {
        let check = checker();
        let ds = with_var("depth", vec![Some(0.0), None, Some(10.0), Some(25.0)]);
        assert_eq!(check.check_depth_array(&ds).value(), (1, 1));

        // goes down and comes back to the start
        let ds = with_var("depth", vec![Some(5.0), Some(30.0), Some(5.0)]);
        let result = check.check_depth_array(&ds);
        assert_eq!(result.value(), (0, 1));
        assert_eq!(result.messages[0], "Depth array must be valid, ie  abs(Z0 - Zend) > 0");
    }

    #[test]
    fn test_valid_lon() {
        let check = checker();
        assert!(check.check_valid_lon(&MemoryDataset::new()).is_none());

        let lon = |min: f64, max: f64| {
            MemoryDataset::new().with_variable(
                Variable::new("lon", DType::F64)
                    .with_attr("valid_min", min)
                    .with_attr("valid_max", max),
            )
        };
        assert_eq!(check.check_valid_lon(&lon(-180.0, 180.0)).unwrap().value(), (1, 1));

        let result = check.check_valid_lon(&lon(-90.0, 90.0)).unwrap();
        assert_eq!(result.value(), (0, 1));
        assert_eq!(
            result.messages[0],
            "Longitude's valid_min and valid_max are [-90, 90], it's likely this was a mistake"
        );
    }

    #[test]
    fn test_valid_lon_missing_bounds() {
        let ds = MemoryDataset::new()
            .with_variable(Variable::new("lon", DType::F64).with_attr("valid_min", -180.0f64));
        let result = checker().check_valid_lon(&ds).unwrap();
        assert_eq!(result.value(), (1, 2));
        assert_eq!(
            result.messages,
            vec!["valid_max attribute for longitude should be defined".to_string()]
        );
    }

    #[test]
    fn test_valid_lon_non_numeric_bounds() {
        let ds = MemoryDataset::new().with_variable(
            Variable::new("lon", DType::F64)
                .with_attr("valid_min", "-180")
                .with_attr("valid_max", vec![170.0f64, 180.0]),
        );
        let result = checker().check_valid_lon(&ds).unwrap();
        assert_eq!(result.value(), (1, 3));
        assert_eq!(
            result.messages,
            vec![
                "valid_min attribute for longitude should be a single number".to_string(),
                "valid_max attribute for longitude should be a single number".to_string(),
            ]
        );
    }
}
