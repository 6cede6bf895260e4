//! Required attributes and data types of the DAC variables.

use std::collections::HashMap;

use glider_common::{AttrValue, DType};

/// Attributes a variable must carry.
///
/// Each entry is either an expected value or `None`, meaning the attribute
/// must be present and, when it is text, non-blank.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeSpec {
    attributes: Vec<(String, Option<AttrValue>)>,
    dtype: Option<DType>,
}

impl AttributeSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `name` to equal `value`.
    pub fn expect(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.insert(name.into(), Some(value.into()));
        self
    }

    /// Require `name` to be present and non-empty.
    pub fn present(mut self, name: impl Into<String>) -> Self {
        self.insert(name.into(), None);
        self
    }

    pub fn with_dtype(mut self, dtype: DType) -> Self {
        self.dtype = Some(dtype);
        self
    }

    fn insert(&mut self, name: String, value: Option<AttrValue>) {
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Attribute requirements in definition order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, Option<&AttrValue>)> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_ref()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attributes.iter().any(|(key, _)| key == name)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Expected data type of the variable.
    pub fn dtype(&self) -> Option<DType> {
        self.dtype
    }
}

/// Attribute requirements keyed by variable name. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeSpecTable {
    specs: HashMap<String, AttributeSpec>,
}

const TIME_UNITS: &str = "seconds since 1970-01-01T00:00:00Z";

fn measured(standard_name: &str, units: &str) -> AttributeSpec {
    AttributeSpec::new()
        .present("accuracy")
        .present("ancillary_variables")
        .expect("instrument", "instrument_ctd")
        .present("long_name")
        .expect("observation_type", "measured")
        .expect("platform", "platform")
        .present("precision")
        .present("resolution")
        .expect("standard_name", standard_name)
        .expect("units", units)
        .present("valid_max")
        .present("valid_min")
        .with_dtype(DType::F64)
}

fn position(standard_name: &str, units: &str) -> AttributeSpec {
    AttributeSpec::new()
        .present("ancillary_variables")
        .present("comment")
        .expect("coordinate_reference_frame", "urn:ogc:crs:EPSG::4326")
        .present("long_name")
        .expect("observation_type", "measured")
        .expect("platform", "platform")
        .expect("reference", "WGS84")
        .expect("standard_name", standard_name)
        .expect("units", units)
        .present("valid_max")
        .present("valid_min")
        .with_dtype(DType::F64)
}

fn calculated(standard_name: &str, units: &str) -> AttributeSpec {
    AttributeSpec::new()
        .present("comment")
        .present("long_name")
        .expect("observation_type", "calculated")
        .expect("platform", "platform")
        .expect("standard_name", standard_name)
        .expect("units", units)
        .present("valid_max")
        .present("valid_min")
        .with_dtype(DType::F64)
}

fn calculated_time() -> AttributeSpec {
    AttributeSpec::new()
        .present("comment")
        .present("long_name")
        .expect("observation_type", "calculated")
        .expect("standard_name", "time")
        .expect("units", TIME_UNITS)
        .with_dtype(DType::F64)
}

impl AttributeSpecTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_spec(mut self, variable: impl Into<String>, spec: AttributeSpec) -> Self {
        self.specs.insert(variable.into(), spec);
        self
    }

    pub fn get(&self, variable: &str) -> Option<&AttributeSpec> {
        self.specs.get(variable)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Requirements of the IOOS glider DAC NetCDF format.
    pub fn glider_dac() -> Self {
        Self::new()
            .with_spec(
                "trajectory",
                AttributeSpec::new()
                    .expect("cf_role", "trajectory_id")
                    .present("comment")
                    .present("long_name")
                    .with_dtype(DType::CHAR),
            )
            .with_spec(
                "time",
                AttributeSpec::new()
                    .present("ancillary_variables")
                    .expect("calendar", "gregorian")
                    .present("long_name")
                    .expect("observation_type", "measured")
                    .expect("standard_name", "time")
                    .expect("units", TIME_UNITS)
                    .with_dtype(DType::F64),
            )
            .with_spec("lat", position("latitude", "degrees_north"))
            .with_spec("lon", position("longitude", "degrees_east"))
            .with_spec(
                "pressure",
                measured("sea_water_pressure", "dbar")
                    .expect("positive", "down")
                    .expect("reference_datum", "sea-surface"),
            )
            .with_spec(
                "depth",
                measured("depth", "m")
                    .expect("positive", "down")
                    .expect("reference_datum", "sea-surface"),
            )
            .with_spec("temperature", measured("sea_water_temperature", "degrees_C"))
            .with_spec(
                "conductivity",
                measured("sea_water_electrical_conductivity", "S m-1"),
            )
            .with_spec("salinity", measured("sea_water_practical_salinity", "1"))
            .with_spec("density", measured("sea_water_density", "kg m-3"))
            .with_spec(
                "profile_id",
                AttributeSpec::new()
                    .present("comment")
                    .present("long_name")
                    .present("valid_max")
                    .present("valid_min")
                    .with_dtype(DType::I32),
            )
            .with_spec("profile_time", calculated_time().expect("platform", "platform"))
            .with_spec("profile_lat", calculated("latitude", "degrees_north"))
            .with_spec("profile_lon", calculated("longitude", "degrees_east"))
            .with_spec("time_uv", calculated_time())
            .with_spec("lat_uv", calculated("latitude", "degrees_north"))
            .with_spec("lon_uv", calculated("longitude", "degrees_east"))
            .with_spec("u", calculated("eastward_sea_water_velocity", "m s-1"))
            .with_spec("v", calculated("northward_sea_water_velocity", "m s-1"))
            .with_spec(
                "platform",
                AttributeSpec::new()
                    .present("comment")
                    .present("id")
                    .expect("instrument", "instrument_ctd")
                    .present("long_name")
                    .expect("type", "platform")
                    .present("wmo_id")
                    .with_dtype(DType::I32),
            )
            .with_spec(
                "instrument_ctd",
                AttributeSpec::new()
                    .present("calibration_date")
                    .present("calibration_report")
                    .present("comment")
                    .present("factory_calibrated")
                    .present("long_name")
                    .present("make_model")
                    .expect("platform", "platform")
                    .present("serial_number")
                    .expect("type", "instrument")
                    .with_dtype(DType::I32),
            )
    }
}
