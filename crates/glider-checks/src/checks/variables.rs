//! Variable presence, attribute and data type checks.

use std::collections::HashSet;

use glider_common::{dtype_equal, CheckResult, Dataset, Priority, Tally};

use crate::checker::GliderCheck;
use crate::requirements::AttributeSpec;
use crate::validate::{self, validate_attributes};

pub const REQUIRED_VARIABLES: [&str; 20] = [
    "trajectory",
    "time",
    "lat",
    "lon",
    "pressure",
    "depth",
    "temperature",
    "conductivity",
    "density",
    "profile_id",
    "profile_time",
    "profile_lat",
    "profile_lon",
    "time_uv",
    "lat_uv",
    "lon_uv",
    "u",
    "v",
    "platform",
    "instrument_ctd",
];

pub const REQUIRED_DIMENSIONS: [&str; 2] = ["time", "traj_strlen"];

/// Variables expected to have a `{name}_qc` companion.
pub const QC_VARIABLES: [&str; 16] = [
    "time",
    "lat",
    "lon",
    "pressure",
    "depth",
    "temperature",
    "conductivity",
    "density",
    "profile_time",
    "profile_lat",
    "profile_lon",
    "time_uv",
    "lat_uv",
    "lon_uv",
    "u",
    "v",
];

fn qc_spec() -> AttributeSpec {
    AttributeSpec::new()
        .present("flag_meanings")
        .present("flag_values")
        .present("long_name")
        .present("standard_name")
        .present("valid_max")
        .present("valid_min")
}

impl GliderCheck {
    pub fn check_required_variables<D: Dataset + ?Sized>(&self, dataset: &D) -> CheckResult {
        let mut tally = Tally::new();
        for variable in REQUIRED_VARIABLES {
            tally.assert_true(
                dataset.has_variable(variable),
                format!("Variable {} is missing", variable),
            );
        }
        tally.into_result(Priority::High, "Required Variables")
    }

    pub fn check_dimensions<D: Dataset + ?Sized>(&self, dataset: &D) -> CheckResult {
        let mut tally = Tally::new();
        for dimension in REQUIRED_DIMENSIONS {
            tally.assert_true(
                dataset.has_dimension(dimension),
                format!("{} is not a valid dimension", dimension),
            );
        }
        tally.into_result(Priority::High, "Required Dimensions")
    }

    pub fn check_lat_lon_attributes<D: Dataset + ?Sized>(&self, dataset: &D) -> CheckResult {
        self.table_attributes(dataset, &["lat", "lon"], true)
            .into_result(Priority::High, "Lat and Lon attributes")
    }

    /// The time variable is always checked against its full spec.
    pub fn check_time_attributes<D: Dataset + ?Sized>(&self, dataset: &D) -> CheckResult {
        self.table_attributes(dataset, &["time"], false)
            .into_result(Priority::High, "Time Variable")
    }

    pub fn check_pressure_depth_attributes<D: Dataset + ?Sized>(&self, dataset: &D) -> CheckResult {
        self.table_attributes(dataset, &["pressure", "depth"], true)
            .into_result(Priority::High, "Depth/Pressure variable attributes")
    }

    pub fn check_ctd_variable_attributes<D: Dataset + ?Sized>(&self, dataset: &D) -> CheckResult {
        self.table_attributes(
            dataset,
            &["temperature", "conductivity", "salinity", "density"],
            true,
        )
        .into_result(Priority::High, "CTD Variables")
    }

    pub fn check_profile_variable_attributes_and_types<D: Dataset + ?Sized>(
        &self,
        dataset: &D,
    ) -> CheckResult {
        self.table_attributes(
            dataset,
            &[
                "profile_id",
                "profile_time",
                "profile_lat",
                "profile_lon",
                "lat_uv",
                "lon_uv",
                "u",
                "v",
            ],
            true,
        )
        .into_result(Priority::High, "Profile Variables")
    }

    /// QC companions that are absent contribute nothing.
    pub fn check_qc_variables<D: Dataset + ?Sized>(&self, dataset: &D) -> CheckResult {
        let spec = qc_spec();
        let no_ignore = HashSet::new();
        QC_VARIABLES
            .iter()
            .map(|var| validate_attributes(dataset, &format!("{}_qc", var), Some(&spec), &no_ignore))
            .sum::<Tally>()
            .into_result(Priority::Medium, "QC Variables")
    }

    pub fn check_trajectory_variables<D: Dataset + ?Sized>(
        &self,
        dataset: &D,
    ) -> Option<CheckResult> {
        let trajectory = dataset.variable("trajectory")?;
        let mut tally = Tally::new();
        tally.assert_true(
            matches!(trajectory.dimensions(), [dim] if dim == "traj_strlen"),
            "trajectory has an invalid dimension",
        );
        tally += self.table_attributes(dataset, &["trajectory"], false);
        Some(tally.into_result(Priority::Medium, "Trajectory Variable"))
    }

    pub fn check_container_variables<D: Dataset + ?Sized>(&self, dataset: &D) -> CheckResult {
        self.table_attributes(dataset, &["platform", "instrument_ctd"], true)
            .into_result(Priority::Medium, "Container Variables")
    }

    pub fn check_ancillary_variables<D: Dataset + ?Sized>(&self, dataset: &D) -> CheckResult {
        let mut tally = Tally::new();
        for var in dataset.variables() {
            let Some(ancillary) = var.text_attribute("ancillary_variables") else {
                continue;
            };
            for name in ancillary.split_whitespace() {
                tally.assert_true(
                    dataset.has_variable(name),
                    format!(
                        "Invalid ancillary_variables attribute for {}, {} is not a variable",
                        var.name(),
                        name
                    ),
                );
            }
        }
        tally.into_result(Priority::Medium, "Ancillary Variables")
    }

    pub fn check_dtype<D: Dataset + ?Sized>(&self, dataset: &D) -> CheckResult {
        dataset
            .variables()
            .into_iter()
            .map(|var| validate::check_dtype(dataset, var.name(), self.specs()))
            .sum::<Tally>()
            .into_result(Priority::Medium, "Correct variable data types")
    }

    pub fn check_valid_min_dtype<D: Dataset + ?Sized>(&self, dataset: &D) -> CheckResult {
        valid_bound_dtype(dataset, "valid_min")
            .into_result(Priority::Medium, "Correct valid_min data types")
    }

    pub fn check_valid_max_dtype<D: Dataset + ?Sized>(&self, dataset: &D) -> CheckResult {
        valid_bound_dtype(dataset, "valid_max")
            .into_result(Priority::Medium, "Correct valid_max data types")
    }
}

/// The `bound` attribute of every variable must share the variable's type.
fn valid_bound_dtype<D: Dataset + ?Sized>(dataset: &D, bound: &str) -> Tally {
    let mut tally = Tally::new();
    for var in dataset.variables() {
        let Some(value) = var.attribute(bound) else {
            continue;
        };
        tally.assert_true(
            dtype_equal(&value.dtype(), &var.dtype()),
            format!(
                "{}:{} has a different data type, {}, than variable {}, {}",
                var.name(),
                bound,
                value.dtype(),
                var.name(),
                var.dtype()
            ),
        );
    }
    tally
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

    #[test]
    fn test_required_variables_on_empty_dataset() {
        let result = checker().check_required_variables(&MemoryDataset::new());
        assert_eq!(result.value(), (0, 20));
        assert_eq!(result.messages[0], "Variable trajectory is missing");
    }

    #[test]
    fn test_dimensions() {
        let ds = MemoryDataset::new().with_dimension("time", 10);
        let result = checker().check_dimensions(&ds);
        assert_eq!(result.value(), (1, 2));
        assert_eq!(result.messages, vec!["traj_strlen is not a valid dimension".to_string()]);
    }

    #[test]
    fn test_trajectory_absent_is_skipped() {
        assert!(checker().check_trajectory_variables(&MemoryDataset::new()).is_none());
    }

    #[test]
    fn test_trajectory_dimension() {
        let ds = MemoryDataset::new().with_variable(
            Variable::new("trajectory", DType::CHAR)
                .with_dimensions(["time", "traj_strlen"])
                .with_attr("cf_role", "trajectory_id")
                .with_attr("comment", "deployment")
                .with_attr("long_name", "Trajectory Name"),
        );
        let result = checker().check_trajectory_variables(&ds).unwrap();
        assert_eq!(result.value(), (3, 4));
        assert_eq!(result.messages, vec!["trajectory has an invalid dimension".to_string()]);
    }

    #[test]
    fn test_ancillary_variables() {
        let ds = MemoryDataset::new()
            .with_variable(
                Variable::new("temperature", DType::F64)
                    .with_attr("ancillary_variables", "temperature_qc qartod_temperature_spike_flag"),
            )
            .with_variable(Variable::new("temperature_qc", DType::I8));
        let result = checker().check_ancillary_variables(&ds);
        assert_eq!(result.value(), (1, 2));
        assert_eq!(
            result.messages[0],
            "Invalid ancillary_variables attribute for temperature, qartod_temperature_spike_flag is not a variable"
        );
    }

    #[test]
    fn test_valid_bound_dtypes() {
        let ds = MemoryDataset::new()
            .with_variable(
                Variable::new("temperature", DType::F64)
                    .with_attr("valid_min", -5.0f64)
                    .with_attr("valid_max", 40.0f32),
            )
            .with_variable(Variable::new("profile_id", DType::I32).with_attr("valid_min", "1"));

        let check = checker();
        let min = check.check_valid_min_dtype(&ds);
        assert_eq!(min.value(), (1, 2));
        assert_eq!(
            min.messages[0],
            "profile_id:valid_min has a different data type, str, than variable profile_id, int32"
        );

        let max = check.check_valid_max_dtype(&ds);
        assert_eq!(max.value(), (0, 1));
        assert_eq!(
            max.messages[0],
            "temperature:valid_max has a different data type, float32, than variable temperature, float64"
        );
    }

    #[test]
    fn test_qc_variables_only_scores_present_companions() {
        let ds = MemoryDataset::new().with_variable(
            Variable::new("depth_qc", DType::I8)
                .with_attr("flag_meanings", "good bad")
                .with_attr("flag_values", vec![1i8, 4])
                .with_attr("long_name", "depth Quality Flag")
                .with_attr("standard_name", "depth status_flag")
                .with_attr("valid_max", 4i8),
        );
        let result = checker().check_qc_variables(&ds);
        assert_eq!(result.value(), (5, 6));
        assert_eq!(
            result.messages,
            vec!["Variable depth_qc must contain attribute: valid_min".to_string()]
        );
    }
}
