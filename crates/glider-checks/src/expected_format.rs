//! Standard names expected of the DAC variables.

/// `(variable, standard_name)`; `None` where the format leaves it open.
pub const EXPECTED_FORMAT: &[(&str, Option<&str>)] = &[
    ("trajectory", None),
    ("wmo_id", None),
    ("profile_id", None),
    ("profile_time", Some("time")),
    ("profile_lat", Some("latitude")),
    ("profile_lon", Some("longitude")),
    ("time", Some("time")),
    ("depth", Some("depth")),
    ("pressure", Some("sea_water_pressure")),
    ("temperature", Some("sea_water_temperature")),
    ("conductivity", Some("sea_water_electrical_conductivity")),
    ("salinity", Some("sea_water_practical_salinity")),
    ("density", Some("sea_water_density")),
    ("lat", Some("latitude")),
    ("lon", Some("longitude")),
    ("time_uv", Some("time")),
    ("lat_uv", Some("latitude")),
    ("lon_uv", Some("longitude")),
    ("u", Some("eastward_sea_water_velocity")),
    ("v", Some("northward_sea_water_velocity")),
    ("platform", None),
    ("instrument_ctd", None),
];
