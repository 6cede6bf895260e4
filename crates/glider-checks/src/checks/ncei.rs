//! NCEI authority table check.

use std::collections::BTreeSet;

use authority_tables::TableKind;
use glider_common::{CheckResult, Dataset, GliderResult, Priority, Tally};

use crate::checker::GliderCheck;

impl GliderCheck {
    /// Check the `project` and `institution` global attributes, and the
    /// platform `id` and instrument `make_model` of the variables referenced
    /// through `platform` and `instrument` attributes, against the NCEI
    /// authority tables.
    ///
    /// A table that is needed but unavailable aborts the check.
    pub fn check_ncei_tables<D: Dataset + ?Sized>(
        &self,
        dataset: &D,
    ) -> GliderResult<CheckResult> {
        let mut tally = Tally::new();
        for kind in [
            TableKind::Project,
            TableKind::Platform,
            TableKind::Instrument,
            TableKind::Institution,
        ] {
            match referenced_attribute(kind) {
                Some(attr) => self.check_referenced_variables(dataset, kind, attr, &mut tally)?,
                None => self.check_global_value(dataset, kind, &mut tally)?,
            }
        }
        Ok(tally.into_result(
            Priority::Low,
            "File has NCEI approved project, institution, platform_type, and instrument",
        ))
    }

    fn check_global_value<D: Dataset + ?Sized>(
        &self,
        dataset: &D,
        kind: TableKind,
        tally: &mut Tally,
    ) -> GliderResult<()> {
        let name = kind.as_str();
        let Some(value) = dataset.global_attribute(name) else {
            tally.fail(format!("Attribute {} not in dataset", name));
            return Ok(());
        };
        tally.pass();

        let table = self.tables().get(kind)?;
        let value = value.to_string();
        tally.assert_true(
            table.contains(&value),
            format!(
                "Global attribute {} value '{}' not contained in {} authority table",
                name, value, name
            ),
        );
        Ok(())
    }

    fn check_referenced_variables<D: Dataset + ?Sized>(
        &self,
        dataset: &D,
        kind: TableKind,
        attr: &str,
        tally: &mut Tally,
    ) -> GliderResult<()> {
        let name = kind.as_str();
        let table = self.tables().get(kind)?;

        let referenced: BTreeSet<String> = dataset
            .variables_with_attribute(name)
            .into_iter()
            .filter_map(|var| var.attribute(name))
            .map(|value| value.to_string())
            .collect();
        tally.assert_true(
            !referenced.is_empty(),
            format!("Cannot find any {} attributes in dataset", name),
        );

        for var_name in &referenced {
            let Some(var) = dataset.variable(var_name) else {
                tally.fail(format!(
                    "Referenced {} variable {} does not exist",
                    name, var_name
                ));
                continue;
            };
            let Some(value) = var.attribute(attr) else {
                tally.fail(format!(
                    "Attribute {} should exist in variable {}",
                    attr, var_name
                ));
                continue;
            };
            tally.pass();

            let value = value.to_string();
            tally.assert_true(
                table.contains(&value),
                format!(
                    "Attribute {} '{}' for variable {} not contained in {} authority table",
                    attr, value, var_name, name
                ),
            );
        }
        Ok(())
    }
}

/// Attribute of the referenced variable looked up in the table, `None` for
/// tables matched against a global attribute.
fn referenced_attribute(kind: TableKind) -> Option<&'static str> {
    match kind {
        TableKind::Platform => Some("id"),
        TableKind::Instrument => Some("make_model"),
        _ => None,
    }
}
