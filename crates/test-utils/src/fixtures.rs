//! Glider dataset fixtures.
//!
//! [`glider_dataset`] builds a small single-profile glider file that passes
//! every DAC check against the fixture authority tables in
//! [`crate::tables`]. Tests break it in one place and look at the result.

use glider_common::{DType, MemoryDataset, Variable};

/// Length of the `time` dimension of [`glider_dataset`].
pub const PROFILE_LEN: usize = 10;

/// Length of the `time` dimension of [`mock_time_series`].
pub const TIME_SERIES_LEN: usize = 500;

/// Length of the `traj_strlen` dimension.
pub const TRAJ_STRLEN: usize = 19;

pub const TIME_UNITS: &str = "seconds since 1970-01-01T00:00:00Z";

/// 2023-11-14T22:13:20Z
const PROFILE_START: f64 = 1_700_000_000.0;

const DOUBLE_FILL: f64 = -999.0;

/// Global attributes of [`glider_dataset`].
pub const GLOBAL_ATTRIBUTES: &[(&str, &str)] = &[
    ("Conventions", "CF-1.6"),
    ("Metadata_Conventions", "CF-1.6, Unidata Dataset Discovery v1.0"),
    ("comment", "Fixture glider profile"),
    ("contributor_name", "Glider Operator"),
    ("contributor_role", "Principal Investigator"),
    ("creator_email", "operator@example.org"),
    ("creator_name", "Glider Operator"),
    ("creator_url", "https://example.org"),
    ("date_created", "2023-11-15T00:00:00Z"),
    ("date_issued", "2023-11-15T00:00:00Z"),
    ("date_modified", "2023-11-15T00:00:00Z"),
    ("format_version", "IOOS_Glider_NetCDF_v2.0.nc"),
    ("history", "Created for tests"),
    ("id", "ru29-20231114T2213"),
    ("institution", "MARACOOS"),
    ("keywords", "AUVS, Autonomous Underwater Vehicles, Oceans, Ocean Temperature"),
    ("keywords_vocabulary", "GCMD Science Keywords"),
    ("license", "This data may be redistributed and used without restriction."),
    ("metadata_link", "https://example.org/metadata"),
    ("naming_authority", "org.example"),
    ("processing_level", "Dataset taken from glider native file format"),
    ("project", "MARACOOS"),
    ("publisher_email", "publisher@example.org"),
    ("publisher_name", "Glider Publisher"),
    ("publisher_url", "https://example.org/publisher"),
    ("references", "https://ioos.github.io/glider-dac/"),
    ("source", "Observational data from a profiling glider"),
    ("standard_name_vocabulary", "CF-v25"),
    ("summary", "A single glider profile used by the test suite."),
    ("title", "ru29-20231114T2213"),
    ("wmo_id", "4801516"),
    ("sea_name", "Mid-Atlantic Bight"),
    ("platform_type", "Slocum Glider"),
    ("ioos_regional_association", "MARACOOS"),
];

fn profile_values(start: f64, step: f64) -> Vec<f64> {
    (0..PROFILE_LEN).map(|i| start + step * i as f64).collect()
}

/// A measured CTD variable in the `time` dimension.
fn measured(
    name: &str,
    standard_name: &str,
    units: &str,
    bounds: (f64, f64),
    values: Vec<f64>,
) -> Variable {
    Variable::new(name, DType::F64)
        .with_dimensions(["time"])
        .with_attr("_FillValue", DOUBLE_FILL)
        .with_attr("accuracy", 0.01f64)
        .with_attr("ancillary_variables", format!("{}_qc", name))
        .with_attr("instrument", "instrument_ctd")
        .with_attr("long_name", name.replace('_', " "))
        .with_attr("observation_type", "measured")
        .with_attr("platform", "platform")
        .with_attr("precision", 0.001f64)
        .with_attr("resolution", 0.001f64)
        .with_attr("standard_name", standard_name)
        .with_attr("units", units)
        .with_attr("valid_min", bounds.0)
        .with_attr("valid_max", bounds.1)
        .with_values(values)
}

fn position(name: &str, standard_name: &str, units: &str, bound: f64, values: Vec<f64>) -> Variable {
    Variable::new(name, DType::F64)
        .with_dimensions(["time"])
        .with_attr("_FillValue", DOUBLE_FILL)
        .with_attr("ancillary_variables", format!("{}_qc", name))
        .with_attr("comment", "Interpolated GPS fix")
        .with_attr("coordinate_reference_frame", "urn:ogc:crs:EPSG::4326")
        .with_attr("long_name", standard_name)
        .with_attr("observation_type", "measured")
        .with_attr("platform", "platform")
        .with_attr("reference", "WGS84")
        .with_attr("standard_name", standard_name)
        .with_attr("units", units)
        .with_attr("valid_min", -bound)
        .with_attr("valid_max", bound)
        .with_values(values)
}

/// A scalar variable calculated once per profile.
fn calculated(name: &str, standard_name: &str, units: &str, bound: f64, value: f64) -> Variable {
    Variable::new(name, DType::F64)
        .with_attr("_FillValue", DOUBLE_FILL)
        .with_attr("comment", "Calculated over the profile")
        .with_attr("long_name", name.replace('_', " "))
        .with_attr("observation_type", "calculated")
        .with_attr("platform", "platform")
        .with_attr("standard_name", standard_name)
        .with_attr("units", units)
        .with_attr("valid_min", -bound)
        .with_attr("valid_max", bound)
        .with_values([value])
}

fn calculated_time(name: &str, value: f64) -> Variable {
    Variable::new(name, DType::F64)
        .with_attr("_FillValue", DOUBLE_FILL)
        .with_attr("comment", "Calculated over the profile")
        .with_attr("long_name", name.replace('_', " "))
        .with_attr("observation_type", "calculated")
        .with_attr("platform", "platform")
        .with_attr("standard_name", "time")
        .with_attr("units", TIME_UNITS)
        .with_values([value])
}

/// The `{name}_qc` flag variable of `name`.
pub fn qc_variable(name: &str) -> Variable {
    Variable::new(format!("{}_qc", name), DType::I8)
        .with_attr("_FillValue", -127i8)
        .with_attr("flag_meanings", "no_qc_performed good_data probably_good_data")
        .with_attr("flag_values", vec![0i8, 1, 2])
        .with_attr("long_name", format!("{} Quality Flag", name))
        .with_attr("standard_name", "status_flag")
        .with_attr("valid_min", 0i8)
        .with_attr("valid_max", 2i8)
}

/// A valid QARTOD flag variable.
pub fn qartod_variable(name: &str) -> Variable {
    Variable::new(name, DType::I8)
        .with_dimensions(["time"])
        .with_attr("_FillValue", 9i8)
        .with_attr("long_name", "Spike Test Quality Flag")
        .with_attr("flag_meanings", "GOOD NOT_EVALUATED SUSPECT BAD MISSING")
        .with_attr("flag_values", vec![1i8, 2, 3, 4, 9])
        .with_attr("valid_min", 1i8)
        .with_attr("valid_max", 9i8)
        .with_values(vec![1.0; PROFILE_LEN])
}

/// A single profile glider dataset conforming to the DAC format.
pub fn glider_dataset() -> MemoryDataset {
    let end = PROFILE_START + 10.0 * (PROFILE_LEN - 1) as f64;
    let mid = (PROFILE_START + end) / 2.0;

    let mut ds = MemoryDataset::new()
        .with_dimension("time", PROFILE_LEN)
        .with_dimension("traj_strlen", TRAJ_STRLEN)
        .with_variable(
            Variable::new("trajectory", DType::CHAR)
                .with_dimensions(["traj_strlen"])
                .with_attr("cf_role", "trajectory_id")
                .with_attr("comment", "A trajectory is one deployment of a glider")
                .with_attr("long_name", "Trajectory Name"),
        )
        .with_variable(
            Variable::new("time", DType::F64)
                .with_dimensions(["time"])
                .with_attr("_FillValue", DOUBLE_FILL)
                .with_attr("ancillary_variables", "time_qc")
                .with_attr("calendar", "gregorian")
                .with_attr("long_name", "Time")
                .with_attr("observation_type", "measured")
                .with_attr("standard_name", "time")
                .with_attr("units", TIME_UNITS)
                .with_values(profile_values(PROFILE_START, 10.0)),
        )
        .with_variable(position(
            "lat",
            "latitude",
            "degrees_north",
            90.0,
            profile_values(39.5, 0.0001),
        ))
        .with_variable(position(
            "lon",
            "longitude",
            "degrees_east",
            180.0,
            profile_values(-73.5, 0.0001),
        ))
        .with_variable(
            measured("pressure", "sea_water_pressure", "dbar", (0.0, 2000.0), profile_values(0.0, 5.0))
                .with_attr("positive", "down")
                .with_attr("reference_datum", "sea-surface"),
        )
        .with_variable(
            measured("depth", "depth", "m", (0.0, 2000.0), profile_values(0.0, 4.9))
                .with_attr("positive", "down")
                .with_attr("reference_datum", "sea-surface"),
        )
        .with_variable(measured(
            "temperature",
            "sea_water_temperature",
            "degrees_C",
            (-5.0, 40.0),
            profile_values(18.0, -0.5),
        ))
        .with_variable(measured(
            "conductivity",
            "sea_water_electrical_conductivity",
            "S m-1",
            (0.0, 10.0),
            profile_values(4.5, -0.01),
        ))
        .with_variable(measured(
            "salinity",
            "sea_water_practical_salinity",
            "1",
            (0.0, 40.0),
            profile_values(33.0, 0.02),
        ))
        .with_variable(measured(
            "density",
            "sea_water_density",
            "kg m-3",
            (1015.0, 1040.0),
            profile_values(1024.0, 0.05),
        ))
        .with_variable(
            Variable::new("profile_id", DType::I32)
                .with_attr("_FillValue", -999i32)
                .with_attr("comment", "Sequential profile number within the trajectory")
                .with_attr("long_name", "Profile ID")
                .with_attr("valid_min", 1i32)
                .with_attr("valid_max", 2_147_483_647i32)
                .with_values([1.0]),
        )
        .with_variable(calculated_time("profile_time", mid))
        .with_variable(calculated("profile_lat", "latitude", "degrees_north", 90.0, 39.5))
        .with_variable(calculated("profile_lon", "longitude", "degrees_east", 180.0, -73.5))
        .with_variable(calculated_time("time_uv", mid))
        .with_variable(calculated("lat_uv", "latitude", "degrees_north", 90.0, 39.5))
        .with_variable(calculated("lon_uv", "longitude", "degrees_east", 180.0, -73.5))
        .with_variable(calculated("u", "eastward_sea_water_velocity", "m s-1", 10.0, 0.12))
        .with_variable(calculated("v", "northward_sea_water_velocity", "m s-1", 10.0, -0.03))
        .with_variable(
            Variable::new("platform", DType::I32)
                .with_attr("comment", "Slocum glider ru29")
                .with_attr("id", "Test123")
                .with_attr("instrument", "instrument_ctd")
                .with_attr("long_name", "Slocum Glider ru29")
                .with_attr("type", "platform")
                .with_attr("wmo_id", "4801516"),
        )
        .with_variable(
            Variable::new("instrument_ctd", DType::I32)
                .with_attr("calibration_date", "2023-06-01")
                .with_attr("calibration_report", "ru29_ctd_calibration.pdf")
                .with_attr("comment", "Pumped CTD")
                .with_attr("factory_calibrated", "2023-06-01")
                .with_attr("long_name", "Seabird Glider Payload CTD")
                .with_attr("make_model", "Sea-Bird GCTD")
                .with_attr("platform", "platform")
                .with_attr("serial_number", "0123")
                .with_attr("type", "instrument"),
        );

    for name in [
        "time",
        "lat",
        "lon",
        "pressure",
        "depth",
        "temperature",
        "conductivity",
        "salinity",
        "density",
        "profile_time",
        "profile_lat",
        "profile_lon",
        "time_uv",
        "lat_uv",
        "lon_uv",
        "u",
        "v",
    ] {
        ds.add_variable(qc_variable(name));
    }

    ds.add_variable(qartod_variable("qartod_temperature_spike_flag"));
    if let Some(temperature) = ds.variable_mut("temperature") {
        temperature.set_attr(
            "ancillary_variables",
            "temperature_qc qartod_temperature_spike_flag",
        );
    }

    for (name, value) in GLOBAL_ATTRIBUTES {
        ds.set_global_attr(*name, *value);
    }
    ds
}

/// A bare time series of fully masked `time`, `lat`, `lon` and `depth`
/// values over [`TIME_SERIES_LEN`] steps.
pub fn mock_time_series() -> MemoryDataset {
    let masked = vec![None; TIME_SERIES_LEN];
    let coordinate = |name: &str, standard_name: &str, units: &str| {
        Variable::new(name, DType::F64)
            .with_dimensions(["time"])
            .with_attr("_FillValue", DOUBLE_FILL)
            .with_attr("standard_name", standard_name)
            .with_attr("units", units)
            .with_data(masked.clone())
    };

    MemoryDataset::new()
        .with_dimension("time", TIME_SERIES_LEN)
        .with_variable(coordinate("time", "time", TIME_UNITS))
        .with_variable(coordinate("lat", "latitude", "degrees_north"))
        .with_variable(coordinate("lon", "longitude", "degrees_east"))
        .with_variable(
            coordinate("depth", "depth", "m")
                .with_attr("positive", "down"),
        )
}
