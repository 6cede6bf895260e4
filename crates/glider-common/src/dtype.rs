//! Variable and attribute data types.
//!
//! Types follow the numpy naming the DAC documentation uses (`f8`, `<i4`,
//! `|S1`). Equivalence between two types ignores byte order, see
//! [`dtype_equal`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GliderError;

/// Kind of a fixed-width type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    Bool,
    Int,
    UInt,
    Float,
    /// Single byte character (NetCDF `char`)
    Char,
}

impl TypeKind {
    /// numpy kind character.
    pub fn code(self) -> char {
        match self {
            TypeKind::Bool => 'b',
            TypeKind::Int => 'i',
            TypeKind::UInt => 'u',
            TypeKind::Float => 'f',
            TypeKind::Char => 'S',
        }
    }

    fn from_code(code: char) -> Option<Self> {
        match code {
            'b' | '?' => Some(TypeKind::Bool),
            'i' => Some(TypeKind::Int),
            'u' => Some(TypeKind::UInt),
            'f' => Some(TypeKind::Float),
            'S' | 'c' => Some(TypeKind::Char),
            _ => None,
        }
    }
}

/// Byte order of a fixed-width type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ByteOrder {
    Little,
    Big,
    /// Single byte types have no byte order (`|` in numpy notation)
    NotApplicable,
}

/// Data type of a variable or attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DType {
    /// Variable-length string
    VarString,
    Fixed {
        kind: TypeKind,
        size: u8,
        order: ByteOrder,
    },
}

impl DType {
    pub const BOOL: DType = DType::single(TypeKind::Bool);
    pub const CHAR: DType = DType::single(TypeKind::Char);
    pub const I8: DType = DType::single(TypeKind::Int);
    pub const U8: DType = DType::single(TypeKind::UInt);
    pub const I16: DType = DType::little(TypeKind::Int, 2);
    pub const U16: DType = DType::little(TypeKind::UInt, 2);
    pub const I32: DType = DType::little(TypeKind::Int, 4);
    pub const U32: DType = DType::little(TypeKind::UInt, 4);
    pub const I64: DType = DType::little(TypeKind::Int, 8);
    pub const U64: DType = DType::little(TypeKind::UInt, 8);
    pub const F32: DType = DType::little(TypeKind::Float, 4);
    pub const F64: DType = DType::little(TypeKind::Float, 8);

    const fn single(kind: TypeKind) -> Self {
        DType::Fixed {
            kind,
            size: 1,
            order: ByteOrder::NotApplicable,
        }
    }

    const fn little(kind: TypeKind, size: u8) -> Self {
        DType::Fixed {
            kind,
            size,
            order: ByteOrder::Little,
        }
    }

    /// Same kind and width with a different byte order.
    ///
    /// Single byte types keep [`ByteOrder::NotApplicable`].
    pub fn with_order(self, order: ByteOrder) -> Self {
        match self {
            DType::Fixed { kind, size, .. } if size > 1 => DType::Fixed { kind, size, order },
            other => other,
        }
    }

    /// `(kind, size)` pair, `None` for variable-length strings.
    pub fn kind_and_size(&self) -> Option<(TypeKind, u8)> {
        match self {
            DType::VarString => None,
            DType::Fixed { kind, size, .. } => Some((*kind, *size)),
        }
    }

    pub fn is_var_string(&self) -> bool {
        matches!(self, DType::VarString)
    }

    /// Parse a numpy style type code or name.
    ///
    /// Accepts codes with an optional byte order prefix (`<f8`, `>i4`,
    /// `|i1`, `S1`), numpy names (`float64`, `int8`), NetCDF names
    /// (`double`, `byte`, `char`) and `str` / `string` for variable-length
    /// strings.
    pub fn parse(s: &str) -> Result<DType, GliderError> {
        let s = s.trim();
        let named = match s {
            "str" | "string" | "vlen_str" => Some(DType::VarString),
            "bool" => Some(DType::BOOL),
            "char" => Some(DType::CHAR),
            "int8" | "byte" => Some(DType::I8),
            "uint8" | "ubyte" => Some(DType::U8),
            "int16" | "short" => Some(DType::I16),
            "uint16" | "ushort" => Some(DType::U16),
            "int32" | "int" => Some(DType::I32),
            "uint32" | "uint" => Some(DType::U32),
            "int64" => Some(DType::I64),
            "uint64" => Some(DType::U64),
            "float32" | "float" => Some(DType::F32),
            "float64" | "double" => Some(DType::F64),
            _ => None,
        };
        if let Some(dtype) = named {
            return Ok(dtype);
        }

        let invalid = || GliderError::InvalidDType(s.to_string());
        let (order, rest) = match s.chars().next() {
            Some('<') | Some('=') => (ByteOrder::Little, &s[1..]),
            Some('>') | Some('!') => (ByteOrder::Big, &s[1..]),
            Some('|') => (ByteOrder::NotApplicable, &s[1..]),
            _ => (ByteOrder::Little, s),
        };
        let mut chars = rest.chars();
        let kind = chars
            .next()
            .and_then(TypeKind::from_code)
            .ok_or_else(invalid)?;
        let digits = chars.as_str();
        let size: u8 = if digits.is_empty() {
            1
        } else {
            digits.parse().map_err(|_| invalid())?
        };
        let valid_size = match kind {
            TypeKind::Bool | TypeKind::Char => size == 1,
            TypeKind::Int | TypeKind::UInt => matches!(size, 1 | 2 | 4 | 8),
            TypeKind::Float => matches!(size, 2 | 4 | 8),
        };
        if !valid_size {
            return Err(invalid());
        }

        let order = if size == 1 {
            ByteOrder::NotApplicable
        } else if order == ByteOrder::NotApplicable {
            ByteOrder::Little
        } else {
            order
        };
        Ok(DType::Fixed { kind, size, order })
    }
}

impl FromStr for DType {
    type Err = GliderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DType::parse(s)
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DType::VarString => write!(f, "str"),
            DType::Fixed { kind, size, order } => {
                if *order == ByteOrder::Big {
                    return write!(f, ">{}{}", kind.code(), size);
                }
                match kind {
                    TypeKind::Bool => write!(f, "bool"),
                    TypeKind::Char => write!(f, "|S{}", size),
                    TypeKind::Int => write!(f, "int{}", u32::from(*size) * 8),
                    TypeKind::UInt => write!(f, "uint{}", u32::from(*size) * 8),
                    TypeKind::Float => write!(f, "float{}", u32::from(*size) * 8),
                }
            }
        }
    }
}

/// Compare two data types for equivalence aside from byte order.
///
/// Two variable-length strings are equal. Fixed-width types are equal when
/// their kind and width match. A variable-length string never equals a
/// fixed-width type, including a `char` type.
pub fn dtype_equal(a: &DType, b: &DType) -> bool {
    match (a, b) {
        (DType::VarString, DType::VarString) => true,
        (DType::VarString, _) | (_, DType::VarString) => false,
        _ => a.kind_and_size() == b.kind_and_size(),
    }
}
