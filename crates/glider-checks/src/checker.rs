//! The glider DAC checker and its suite runner.

use std::time::Instant;

use authority_tables::{AuthorityTables, ResourceFetcher, TableSources};
use glider_common::{CheckResult, Dataset, GliderResult, Tally};
use tracing::{debug, info, warn};

use crate::config::{CheckerConfig, CheckerOptions};
use crate::report::SuiteReport;
use crate::requirements::AttributeSpecTable;
use crate::validate::validate_attributes;

/// Compliance checks for IOOS glider DAC NetCDF files.
///
/// Holds the checker options, the attribute requirement table and the
/// authority tables, all fixed at construction.
#[derive(Debug, Clone)]
pub struct GliderCheck {
    options: CheckerOptions,
    specs: AttributeSpecTable,
    tables: AuthorityTables,
}

impl GliderCheck {
    /// Checker name registered with the host.
    pub const NAME: &'static str = "gliderdac";
    /// Version of the DAC file format checked.
    pub const FORMAT_VERSION: &'static str = "3.0";
    pub const CHECKER_VERSION: &'static str = env!("CARGO_PKG_VERSION");
    pub const REFERENCE_URL: &'static str =
        "https://ioos.github.io/glider-dac/ngdac-netcdf-file-format-version-2.html";
    /// Platform types NCEI accepts for archiving.
    pub const ACCEPTABLE_PLATFORM_TYPES: [&'static str; 3] =
        ["Seaglider", "Spray Glider", "Slocum Glider"];

    /// Build a checker, loading the authority tables from the configured
    /// sources.
    pub fn new(config: &CheckerConfig) -> GliderResult<Self> {
        let sources = config.table_sources()?;
        Self::from_sources(config.checker_options(), &sources)
    }

    pub fn from_sources(options: CheckerOptions, sources: &TableSources) -> GliderResult<Self> {
        let fetcher = ResourceFetcher::new(sources.timeout)?;
        let tables = AuthorityTables::load(sources, &fetcher);
        Ok(Self::with_tables(options, tables))
    }

    /// Build a checker around already loaded tables.
    pub fn with_tables(options: CheckerOptions, tables: AuthorityTables) -> Self {
        Self {
            options,
            specs: AttributeSpecTable::glider_dac(),
            tables,
        }
    }

    /// Replace the attribute requirement table.
    pub fn with_specs(mut self, specs: AttributeSpecTable) -> Self {
        self.specs = specs;
        self
    }

    pub fn options(&self) -> &CheckerOptions {
        &self.options
    }

    pub fn specs(&self) -> &AttributeSpecTable {
        &self.specs
    }

    pub fn tables(&self) -> &AuthorityTables {
        &self.tables
    }

    /// Sum of the attribute checks of `variables` against the table.
    pub(crate) fn table_attributes<D: Dataset + ?Sized>(
        &self,
        dataset: &D,
        variables: &[&str],
        honour_ignore: bool,
    ) -> Tally {
        let no_ignore = Default::default();
        let ignore = if honour_ignore {
            self.options.ignore_attributes()
        } else {
            &no_ignore
        };
        variables
            .iter()
            .map(|var| validate_attributes(dataset, var, self.specs.get(var), ignore))
            .sum()
    }

    /// Run every check. A check that errors is recorded and the rest still run.
    pub fn run_all<D: Dataset + ?Sized>(&self, dataset: &D) -> SuiteReport {
        let started = Instant::now();
        let mut report = SuiteReport::default();

        // required
        run(&mut report, "check_required_variables", || {
            Ok(vec![self.check_required_variables(dataset)])
        });
        run(&mut report, "check_dimensions", || Ok(vec![self.check_dimensions(dataset)]));
        run(&mut report, "check_lat_lon_attributes", || {
            Ok(vec![self.check_lat_lon_attributes(dataset)])
        });
        run(&mut report, "check_time_attributes", || {
            Ok(vec![self.check_time_attributes(dataset)])
        });
        run(&mut report, "check_pressure_depth_attributes", || {
            Ok(vec![self.check_pressure_depth_attributes(dataset)])
        });
        run(&mut report, "check_ctd_variable_attributes", || {
            Ok(vec![self.check_ctd_variable_attributes(dataset)])
        });
        run(&mut report, "check_profile_variable_attributes_and_types", || {
            Ok(vec![self.check_profile_variable_attributes_and_types(dataset)])
        });
        run(&mut report, "check_global_attributes", || {
            Ok(vec![self.check_global_attributes(dataset)?])
        });
        run(&mut report, "check_standard_names", || Ok(self.check_standard_names(dataset)));
        run(&mut report, "check_monotonically_increasing_time", || {
            Ok(vec![self.check_monotonically_increasing_time(dataset)])
        });
        run(&mut report, "check_dim_no_data", || Ok(vec![self.check_dim_no_data(dataset)]));
        run(&mut report, "check_depth_array", || Ok(vec![self.check_depth_array(dataset)]));

        // recommended
        run(&mut report, "check_qc_variables", || Ok(vec![self.check_qc_variables(dataset)]));
        run(&mut report, "check_trajectory_variables", || {
            Ok(self.check_trajectory_variables(dataset).into_iter().collect())
        });
        run(&mut report, "check_container_variables", || {
            Ok(vec![self.check_container_variables(dataset)])
        });
        run(&mut report, "check_qartod", || Ok(self.check_qartod(dataset).into_iter().collect()));
        run(&mut report, "check_ancillary_variables", || {
            Ok(vec![self.check_ancillary_variables(dataset)])
        });
        run(&mut report, "check_dtype", || Ok(vec![self.check_dtype(dataset)]));
        run(&mut report, "check_valid_min_dtype", || {
            Ok(vec![self.check_valid_min_dtype(dataset)])
        });
        run(&mut report, "check_valid_max_dtype", || {
            Ok(vec![self.check_valid_max_dtype(dataset)])
        });

        // suggested
        run(&mut report, "check_ioos_ra", || Ok(vec![self.check_ioos_ra(dataset)]));
        run(&mut report, "check_valid_lon", || {
            Ok(self.check_valid_lon(dataset).into_iter().collect())
        });
        run(&mut report, "check_ncei_tables", || Ok(vec![self.check_ncei_tables(dataset)?]));

        let (score, out_of) = report.total();
        info!(
            checks = report.entries.len(),
            errors = report.errors().count(),
            score,
            out_of,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Glider DAC checks complete"
        );
        report
    }
}

fn run<F>(report: &mut SuiteReport, check: &'static str, f: F)
where
    F: FnOnce() -> GliderResult<Vec<CheckResult>>,
{
    let started = Instant::now();
    let outcome = f();
    debug!(
        check,
        elapsed_us = started.elapsed().as_micros() as u64,
        "Check finished"
    );
    if let Err(e) = &outcome {
        warn!(check, error = %e, "Check aborted");
    }
    report.record(check, outcome);
}
