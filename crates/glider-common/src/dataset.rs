//! Read-only dataset access.

use crate::attribute::AttrValue;
use crate::dtype::DType;

/// A variable of an opened dataset.
///
/// Data values are widened to `f64`; masked or fill values are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    name: String,
    dtype: DType,
    dimensions: Vec<String>,
    attributes: Vec<(String, AttrValue)>,
    data: Vec<Option<f64>>,
}

impl Variable {
    pub fn new(name: impl Into<String>, dtype: DType) -> Self {
        Self {
            name: name.into(),
            dtype,
            dimensions: Vec::new(),
            attributes: Vec::new(),
            data: Vec::new(),
        }
    }

    pub fn with_dimensions<I, S>(mut self, dimensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dimensions = dimensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Replace the data with possibly masked values.
    pub fn with_data(mut self, data: Vec<Option<f64>>) -> Self {
        self.data = data;
        self
    }

    /// Replace the data with unmasked values.
    pub fn with_values<I: IntoIterator<Item = f64>>(mut self, values: I) -> Self {
        self.data = values.into_iter().map(Some).collect();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    pub fn dimensions(&self) -> &[String] {
        &self.dimensions
    }

    pub fn attribute(&self, name: &str) -> Option<&AttrValue> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Text value of an attribute, `None` if absent or numeric.
    pub fn text_attribute(&self, name: &str) -> Option<&str> {
        self.attribute(name).and_then(AttrValue::as_text)
    }

    pub fn fill_value(&self) -> Option<&AttrValue> {
        self.attribute("_FillValue")
    }

    pub fn data(&self) -> &[Option<f64>] {
        &self.data
    }

    /// Unmasked data values in order.
    pub fn valid_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().flatten().copied()
    }

    /// Number of unmasked values.
    pub fn valid_count(&self) -> usize {
        self.data.iter().filter(|v| v.is_some()).count()
    }

    /// Set or replace an attribute, keeping its original position.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<AttrValue> {
        let index = self.attributes.iter().position(|(key, _)| key == name)?;
        Some(self.attributes.remove(index).1)
    }

    pub fn set_data(&mut self, data: Vec<Option<f64>>) {
        self.data = data;
    }
}

/// Read-only view of an opened dataset.
///
/// Implemented by the host for its own file handles. The checks only ever
/// read through this trait and never open or close anything.
pub trait Dataset {
    fn variable(&self, name: &str) -> Option<&Variable>;

    /// All variables in definition order.
    fn variables(&self) -> Vec<&Variable>;

    /// Length of a named dimension.
    fn dimension_len(&self, name: &str) -> Option<usize>;

    fn global_attribute(&self, name: &str) -> Option<&AttrValue>;

    fn has_variable(&self, name: &str) -> bool {
        self.variable(name).is_some()
    }

    fn has_dimension(&self, name: &str) -> bool {
        self.dimension_len(name).is_some()
    }

    /// Text value of a global attribute, `None` if absent or numeric.
    fn global_text(&self, name: &str) -> Option<&str> {
        self.global_attribute(name).and_then(AttrValue::as_text)
    }

    /// Variables carrying the named attribute.
    fn variables_with_attribute(&self, attr: &str) -> Vec<&Variable> {
        self.variables()
            .into_iter()
            .filter(|var| var.has_attribute(attr))
            .collect()
    }
}

/// In-memory dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryDataset {
    dimensions: Vec<(String, usize)>,
    variables: Vec<Variable>,
    attributes: Vec<(String, AttrValue)>,
}

impl MemoryDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dimension(mut self, name: impl Into<String>, len: usize) -> Self {
        self.add_dimension(name, len);
        self
    }

    pub fn with_variable(mut self, variable: Variable) -> Self {
        self.add_variable(variable);
        self
    }

    pub fn with_global_attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.set_global_attr(name, value);
        self
    }

    pub fn add_dimension(&mut self, name: impl Into<String>, len: usize) {
        let name = name.into();
        match self.dimensions.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = len,
            None => self.dimensions.push((name, len)),
        }
    }

    /// Add a variable, replacing any variable of the same name.
    pub fn add_variable(&mut self, variable: Variable) {
        match self.variables.iter_mut().find(|v| v.name == variable.name) {
            Some(slot) => *slot = variable,
            None => self.variables.push(variable),
        }
    }

    pub fn remove_variable(&mut self, name: &str) -> Option<Variable> {
        let index = self.variables.iter().position(|v| v.name == name)?;
        Some(self.variables.remove(index))
    }

    pub fn variable_mut(&mut self, name: &str) -> Option<&mut Variable> {
        self.variables.iter_mut().find(|v| v.name == name)
    }

    pub fn set_global_attr(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn remove_global_attr(&mut self, name: &str) -> Option<AttrValue> {
        let index = self.attributes.iter().position(|(key, _)| key == name)?;
        Some(self.attributes.remove(index).1)
    }
}

impl Dataset for MemoryDataset {
    fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }

    fn variables(&self) -> Vec<&Variable> {
        self.variables.iter().collect()
    }

    fn dimension_len(&self, name: &str) -> Option<usize> {
        self.dimensions
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, len)| *len)
    }

    fn global_attribute(&self, name: &str) -> Option<&AttrValue> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MemoryDataset {
        MemoryDataset::new()
            .with_dimension("time", 3)
            .with_variable(
                Variable::new("time", DType::F64)
                    .with_dimensions(["time"])
                    .with_attr("units", "seconds since 1970-01-01T00:00:00Z")
                    .with_data(vec![Some(1.0), None, Some(3.0)]),
            )
            .with_variable(Variable::new("depth", DType::F32).with_attr("instrument", "instrument_ctd"))
            .with_global_attr("title", "glider")
    }

    #[test]
    fn test_lookup() {
        let ds = sample();
        assert!(ds.has_variable("time"));
        assert!(!ds.has_variable("lat"));
        assert_eq!(ds.dimension_len("time"), Some(3));
        assert_eq!(ds.global_text("title"), Some("glider"));
        assert_eq!(ds.variables().len(), 2);
    }

    #[test]
    fn test_valid_values_skip_masked() {
        let ds = sample();
        let time = ds.variable("time").unwrap();
        assert_eq!(time.valid_values().collect::<Vec<_>>(), vec![1.0, 3.0]);
        assert_eq!(time.valid_count(), 2);
    }

    #[test]
    fn test_set_attr_replaces_in_place() {
        let mut var = Variable::new("v", DType::F64)
            .with_attr("a", "1")
            .with_attr("b", "2");
        var.set_attr("a", "3");
        assert_eq!(var.text_attribute("b"), Some("2"));
        assert_eq!(var.text_attribute("a"), Some("3"));
        assert!(var.remove_attr("a").is_some());
        assert!(!var.has_attribute("a"));
    }

    #[test]
    fn test_variables_with_attribute() {
        let ds = sample();
        let vars = ds.variables_with_attribute("instrument");
        assert_eq!(vars.len(), 1);
        assert_eq!(vars[0].name(), "depth");
    }
}
