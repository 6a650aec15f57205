//! Element data types for tensors.
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum DatumType {
    Bool,
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F16,
    F32,
    F64,
}

impl DatumType {
    pub fn is_unsigned(&self) -> bool {
        matches!(self, DatumType::U8 | DatumType::U16 | DatumType::U32 | DatumType::U64)
    }

    pub fn is_signed(&self) -> bool {
        matches!(self, DatumType::I8 | DatumType::I16 | DatumType::I32 | DatumType::I64)
    }

    pub fn is_float(&self) -> bool {
        matches!(self, DatumType::F16 | DatumType::F32 | DatumType::F64)
    }

    pub fn is_integer(&self) -> bool {
        self.is_signed() || self.is_unsigned()
    }

    pub fn size_of(&self) -> usize {
        use DatumType::*;
        match self {
            Bool | U8 | I8 => 1,
            U16 | I16 | F16 => 2,
            U32 | I32 | F32 => 4,
            U64 | I64 | F64 => 8,
        }
    }
}

impl fmt::Display for DatumType {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{self:?}")
    }
}
