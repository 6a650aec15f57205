//! Tensor dimension expressions, concrete or symbolic.
use crate::internal::*;
use std::fmt;

/// A single tensor dimension: either a concrete value or a named symbol.
///
/// Shapes flowing through the graph may carry symbols (batch size, sequence
/// length) that only get a value at load time. Operations that need an
/// actual integer (`to_i64`, `divceil`) fail cleanly on symbols instead of
/// guessing.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Dim {
    Val(i64),
    Sym(String),
}

impl Dim {
    pub fn sym(name: impl Into<String>) -> Dim {
        Dim::Sym(name.into())
    }

    pub fn is_concrete(&self) -> bool {
        matches!(self, Dim::Val(_))
    }

    pub fn to_i64(&self) -> BasaltResult<i64> {
        match self {
            Dim::Val(v) => Ok(*v),
            Dim::Sym(s) => bail!("Symbolic dimension '{s}' used in a concrete context"),
        }
    }

    pub fn to_usize(&self) -> BasaltResult<usize> {
        Ok(self.to_i64()? as usize)
    }

    /// Integer division, rounding up to the next integer.
    pub fn divceil(&self, q: usize) -> BasaltResult<Dim> {
        let v = self.to_i64()?;
        Ok(Dim::Val((v + q as i64 - 1) / q as i64))
    }
}

impl fmt::Display for Dim {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Dim::Val(v) => write!(fmt, "{v}"),
            Dim::Sym(s) => write!(fmt, "{s}"),
        }
    }
}

impl fmt::Debug for Dim {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{self}")
    }
}

impl From<i64> for Dim {
    fn from(v: i64) -> Dim {
        Dim::Val(v)
    }
}

impl From<i32> for Dim {
    fn from(v: i32) -> Dim {
        Dim::Val(v as i64)
    }
}

impl From<usize> for Dim {
    fn from(v: usize) -> Dim {
        Dim::Val(v as i64)
    }
}

/// Convenience conversion to a dimension expression.
pub trait ToDim {
    fn to_dim(self) -> Dim;
}

impl<I: Into<Dim>> ToDim for I {
    fn to_dim(self) -> Dim {
        self.into()
    }
}
