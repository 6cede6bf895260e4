//! Attribute values attached to variables and datasets.

use std::fmt;

use num_traits::ToPrimitive;
use serde::Serialize;

use crate::dtype::DType;

/// Value of a NetCDF attribute.
///
/// Numeric attributes are always stored as arrays; a scalar attribute is an
/// array of length one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    Text(String),
    I8(Vec<i8>),
    U8(Vec<u8>),
    I16(Vec<i16>),
    U16(Vec<u16>),
    I32(Vec<i32>),
    U32(Vec<u32>),
    I64(Vec<i64>),
    U64(Vec<u64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

fn to_f64s<T: ToPrimitive>(values: &[T]) -> Vec<f64> {
    values.iter().filter_map(ToPrimitive::to_f64).collect()
}

impl AttrValue {
    pub fn text(s: impl Into<String>) -> Self {
        AttrValue::Text(s.into())
    }

    /// Data type of the stored value. Text maps to the variable-length string type.
    pub fn dtype(&self) -> DType {
        match self {
            AttrValue::Text(_) => DType::VarString,
            AttrValue::I8(_) => DType::I8,
            AttrValue::U8(_) => DType::U8,
            AttrValue::I16(_) => DType::I16,
            AttrValue::U16(_) => DType::U16,
            AttrValue::I32(_) => DType::I32,
            AttrValue::U32(_) => DType::U32,
            AttrValue::I64(_) => DType::I64,
            AttrValue::U64(_) => DType::U64,
            AttrValue::F32(_) => DType::F32,
            AttrValue::F64(_) => DType::F64,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, AttrValue::Text(_))
    }

    /// Number of elements; the character count is not meaningful, text is one element.
    pub fn len(&self) -> usize {
        match self {
            AttrValue::Text(_) => 1,
            AttrValue::I8(v) => v.len(),
            AttrValue::U8(v) => v.len(),
            AttrValue::I16(v) => v.len(),
            AttrValue::U16(v) => v.len(),
            AttrValue::I32(v) => v.len(),
            AttrValue::U32(v) => v.len(),
            AttrValue::I64(v) => v.len(),
            AttrValue::U64(v) => v.len(),
            AttrValue::F32(v) => v.len(),
            AttrValue::F64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A numeric attribute holding more than one element.
    pub fn is_array(&self) -> bool {
        !self.is_text() && self.len() > 1
    }

    /// Numeric elements widened to f64, `None` for text.
    pub fn to_f64_vec(&self) -> Option<Vec<f64>> {
        let values = match self {
            AttrValue::Text(_) => return None,
            AttrValue::I8(v) => to_f64s(v),
            AttrValue::U8(v) => to_f64s(v),
            AttrValue::I16(v) => to_f64s(v),
            AttrValue::U16(v) => to_f64s(v),
            AttrValue::I32(v) => to_f64s(v),
            AttrValue::U32(v) => to_f64s(v),
            AttrValue::I64(v) => to_f64s(v),
            AttrValue::U64(v) => to_f64s(v),
            AttrValue::F32(v) => to_f64s(v),
            AttrValue::F64(v) => v.clone(),
        };
        Some(values)
    }

    /// Value of a single element numeric attribute.
    pub fn as_f64(&self) -> Option<f64> {
        match self.to_f64_vec()?.as_slice() {
            [value] => Some(*value),
            _ => None,
        }
    }

    /// Whether this value equals an expected one.
    ///
    /// Text compares exactly. Numbers compare element-wise by value, so an
    /// `i8` 9 matches an `i32` 9. Text never matches a number.
    pub fn matches(&self, expected: &AttrValue) -> bool {
        match (self, expected) {
            (AttrValue::Text(a), AttrValue::Text(b)) => a == b,
            (AttrValue::Text(_), _) | (_, AttrValue::Text(_)) => false,
            _ => self.to_f64_vec() == expected.to_f64_vec(),
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let AttrValue::Text(s) = self {
            return write!(f, "{}", s);
        }
        let values = self.to_f64_vec().unwrap_or_default();
        let parts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        if parts.len() == 1 {
            write!(f, "{}", parts[0])
        } else {
            write!(f, "[{}]", parts.join(" "))
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Text(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Text(s)
    }
}

macro_rules! numeric_attr_from {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$ty> for AttrValue {
                fn from(value: $ty) -> Self {
                    AttrValue::$variant(vec![value])
                }
            }

            impl From<Vec<$ty>> for AttrValue {
                fn from(values: Vec<$ty>) -> Self {
                    AttrValue::$variant(values)
                }
            }
        )+
    };
}

numeric_attr_from!(
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    f32 => F32,
    f64 => F64,
);
