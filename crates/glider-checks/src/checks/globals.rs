//! Global attribute and standard name checks.

use std::collections::HashSet;

use authority_tables::TableKind;
use glider_common::{AttrValue, CheckResult, Dataset, GliderResult, Priority, Tally};

use crate::checker::GliderCheck;
use crate::expected_format::EXPECTED_FORMAT;

/// Global attributes every DAC file carries, besides `sea_name` and
/// `platform_type` which are checked on their own.
pub const REQUIRED_GLOBAL_ATTRIBUTES: [&str; 31] = [
    "Conventions",
    "Metadata_Conventions",
    "comment",
    "contributor_name",
    "contributor_role",
    "creator_email",
    "creator_name",
    "creator_url",
    "date_created",
    "date_issued",
    "date_modified",
    "format_version",
    "history",
    "id",
    "institution",
    "keywords",
    "keywords_vocabulary",
    "license",
    "metadata_link",
    "naming_authority",
    "processing_level",
    "project",
    "publisher_email",
    "publisher_name",
    "publisher_url",
    "references",
    "source",
    "standard_name_vocabulary",
    "summary",
    "title",
    "wmo_id",
];

/// CF standard name modifiers.
const STANDARD_NAME_MODIFIERS: [&str; 4] = [
    "detection_minimum",
    "number_of_observations",
    "standard_error",
    "status_flag",
];

fn non_blank(value: &AttrValue) -> bool {
    value.as_text().map_or(true, |text| !text.trim().is_empty())
}

impl GliderCheck {
    /// Fails with `TableUnavailable` when the sea names table is missing.
    pub fn check_global_attributes<D: Dataset + ?Sized>(
        &self,
        dataset: &D,
    ) -> GliderResult<CheckResult> {
        let sea_names: HashSet<String> = self
            .tables()
            .get(TableKind::SeaName)?
            .iter()
            .map(|name| name.to_lowercase())
            .collect();

        let mut tally = Tally::new();
        for attr in REQUIRED_GLOBAL_ATTRIBUTES {
            let Some(value) = dataset.global_attribute(attr) else {
                tally.fail(format!("Attr {} not present", attr));
                continue;
            };
            tally.pass();
            tally.assert_true(non_blank(value), format!("Attr {} is empty", attr));
        }

        let sea_name = dataset.global_text("sea_name").unwrap_or_default();
        if sea_name.is_empty() {
            tally.fail("Attr sea_name not present");
        } else {
            tally.pass();
            for sea in sea_name.replace(", ", ",").split(',') {
                tally.assert_true(
                    sea_names.contains(&sea.to_lowercase()),
                    format!(
                        "sea_name attribute should be from the NODC sea names list: {} is not a valid sea name",
                        sea
                    ),
                );
            }
        }

        let platform_type = dataset.global_text("platform_type").unwrap_or_default();
        if platform_type.is_empty() {
            tally.fail("Attr platform_type not present");
        } else {
            tally.pass();
            tally.assert_true(
                Self::ACCEPTABLE_PLATFORM_TYPES
                    .iter()
                    .any(|accepted| *accepted == platform_type),
                format!(
                    "platform_type {} is not one of the NCEI accepted platforms for archiving: {}",
                    platform_type,
                    Self::ACCEPTABLE_PLATFORM_TYPES.join(",")
                ),
            );
        }

        Ok(tally.into_result(Priority::High, "Required Global Attributes"))
    }

    /// One result per variable with an expected standard name.
    ///
    /// A standard name may be followed by a single CF modifier.
    pub fn check_standard_names<D: Dataset + ?Sized>(&self, dataset: &D) -> Vec<CheckResult> {
        EXPECTED_FORMAT
            .iter()
            .filter_map(|(name, expected)| {
                let expected = (*expected)?;
                let var = dataset.variable(name)?;
                let mut tally = Tally::new();

                let Some(standard_name) = var.text_attribute("standard_name") else {
                    tally.fail(format!("Variable {} must have a standard_name attribute", name));
                    return Some(tally.into_result(Priority::High, "Standard Names"));
                };

                let mut parts = standard_name.split_whitespace();
                let base = parts.next().unwrap_or_default();
                tally.assert_true(
                    base == expected,
                    format!(
                        "Variable {} standard_name {} must be {}",
                        name, standard_name, expected
                    ),
                );
                let modifiers: Vec<&str> = parts.collect();
                if !modifiers.is_empty() {
                    tally.assert_true(
                        matches!(modifiers.as_slice(), [m] if STANDARD_NAME_MODIFIERS.iter().any(|valid| valid == m)),
                        format!(
                            "Variable {} standard_name modifier {} is not valid",
                            name,
                            modifiers.join(" ")
                        ),
                    );
                }
                Some(tally.into_result(Priority::High, "Standard Names"))
            })
            .collect()
    }

    pub fn check_ioos_ra<D: Dataset + ?Sized>(&self, dataset: &D) -> CheckResult {
        let mut tally = Tally::new();
        tally.assert_true(
            dataset
                .global_attribute("ioos_regional_association")
                .is_some_and(|value| value.as_text().map_or(true, |text| !text.is_empty())),
            "ioos_regional_association global attribute should be defined",
        );
        tally.into_result(Priority::Low, "IOOS Regional Association Attribute")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CheckerOptions;
    use authority_tables::AuthorityTables;
    use glider_common::{DType, GliderError, MemoryDataset, Variable};

    fn checker() -> GliderCheck {
        let tables = AuthorityTables::default().with_table(
            TableKind::SeaName,
            ["Mid-Atlantic Bight", "Gulf of Mexico"],
        );
        GliderCheck::with_tables(CheckerOptions::new(), tables)
    }

    fn all_globals() -> MemoryDataset {
        REQUIRED_GLOBAL_ATTRIBUTES
            .iter()
            .fold(MemoryDataset::new(), |ds, attr| ds.with_global_attr(*attr, "value"))
    }

    #[test]
    fn test_global_attributes_pass() {
        let ds = all_globals()
            .with_global_attr("sea_name", "mid-atlantic bight, Gulf of Mexico")
            .with_global_attr("platform_type", "Slocum Glider");
        let result = checker().check_global_attributes(&ds).unwrap();
        assert!(result.passed(), "{:?}", result.messages);
        assert_eq!(result.out_of, 62 + 3 + 2);
    }

    #[test]
    fn test_global_attributes_missing_and_empty() {
        let mut ds = all_globals().with_global_attr("title", "   ");
        ds.remove_global_attr("wmo_id");
        let result = checker().check_global_attributes(&ds).unwrap();
        assert_eq!(result.value(), (59, 63));
        assert_eq!(
            result.messages,
            vec![
                "Attr title is empty".to_string(),
                "Attr wmo_id not present".to_string(),
                "Attr sea_name not present".to_string(),
                "Attr platform_type not present".to_string(),
            ]
        );
    }

    #[test]
    fn test_invalid_sea_name_and_platform_type() {
        let ds = all_globals()
            .with_global_attr("sea_name", "Atlantis")
            .with_global_attr("platform_type", "Wave Glider");
        let result = checker().check_global_attributes(&ds).unwrap();
        assert_eq!(result.value(), (64, 66));
        assert_eq!(
            result.messages,
            vec![
                "sea_name attribute should be from the NODC sea names list: Atlantis is not a valid sea name".to_string(),
                "platform_type Wave Glider is not one of the NCEI accepted platforms for archiving: Seaglider,Spray Glider,Slocum Glider".to_string(),
            ]
        );
    }

    #[test]
    fn test_global_attributes_without_sea_names_table() {
        let check = GliderCheck::with_tables(CheckerOptions::new(), AuthorityTables::default());
        let err = check.check_global_attributes(&all_globals()).unwrap_err();
        assert!(matches!(err, GliderError::TableUnavailable(_)));
        assert_eq!(err.to_string(), "Was unable to fetch sea_name table");
    }

    #[test]
    fn test_standard_names() {
        let ds = MemoryDataset::new()
            .with_variable(
                Variable::new("temperature", DType::F64)
                    .with_attr("standard_name", "sea_water_temperature"),
            )
            .with_variable(
                Variable::new("depth", DType::F64).with_attr("standard_name", "depth standard_error"),
            )
            .with_variable(Variable::new("u", DType::F64).with_attr("standard_name", "northward_sea_water_velocity"))
            .with_variable(Variable::new("lat", DType::F64))
            .with_variable(Variable::new("platform", DType::I32));

        let results = checker().check_standard_names(&ds);
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| r.name == "Standard Names"));

        let failures: Vec<&String> = results.iter().flat_map(|r| &r.messages).collect();
        assert_eq!(
            failures,
            vec![
                "Variable lat must have a standard_name attribute",
                "Variable u standard_name northward_sea_water_velocity must be eastward_sea_water_velocity",
            ]
        );
    }

    #[test]
    fn test_bad_standard_name_modifier() {
        let ds = MemoryDataset::new().with_variable(
            Variable::new("depth", DType::F64).with_attr("standard_name", "depth maximum"),
        );
        let results = checker().check_standard_names(&ds);
        assert_eq!(results[0].value(), (1, 2));
        assert_eq!(results[0].messages[0], "Variable depth standard_name modifier maximum is not valid");
    }

    #[test]
    fn test_ioos_ra() {
        let check = checker();
        assert_eq!(check.check_ioos_ra(&MemoryDataset::new()).value(), (0, 1));
        let ds = MemoryDataset::new().with_global_attr("ioos_regional_association", "MARACOOS");
        assert_eq!(check.check_ioos_ra(&ds).value(), (1, 1));

        // only an empty string counts as undefined, whitespace does not
        let ds = MemoryDataset::new().with_global_attr("ioos_regional_association", "  ");
        assert_eq!(check.check_ioos_ra(&ds).value(), (1, 1));
        let ds = MemoryDataset::new().with_global_attr("ioos_regional_association", "");
        assert_eq!(check.check_ioos_ra(&ds).value(), (0, 1));
    }
}
