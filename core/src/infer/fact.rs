use crate::internal::*;
use itertools::Itertools;
use std::fmt;

/// A fully resolved tensor type: element type and shape.
///
/// Shapes are ordered dimension expressions and may still contain symbols;
/// "resolved" means the rank and the element type are known, not that every
/// dimension is a concrete integer.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TypedFact {
    pub datum_type: DatumType,
    pub shape: TVec<Dim>,
}

impl TypedFact {
    pub fn dt_shape(
        datum_type: DatumType,
        shape: impl IntoIterator<Item = impl ToDim>,
    ) -> TypedFact {
        TypedFact { datum_type, shape: shape.into_iter().map(|d| d.to_dim()).collect() }
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }
}

impl fmt::Debug for TypedFact {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}x{:?}", self.shape.iter().join("x"), self.datum_type)
    }
}

/// Partial knowledge about the tensor flowing through an edge.
///
/// Every edge starts `Any` and gets refined by inference passes until it
/// is (hopefully) `Typed`. Rules never mutate facts in place; they derive
/// fresh ones and let the analyser unify.
#[derive(Clone, Default, PartialEq)]
pub enum InferenceFact {
    #[default]
    Any,
    Typed(TypedFact),
}

impl InferenceFact {
    pub fn any() -> InferenceFact {
        InferenceFact::Any
    }

    pub fn dt_shape(
        datum_type: DatumType,
        shape: impl IntoIterator<Item = impl ToDim>,
    ) -> InferenceFact {
        InferenceFact::Typed(TypedFact::dt_shape(datum_type, shape))
    }

    pub fn as_typed(&self) -> Option<&TypedFact> {
        match self {
            InferenceFact::Any => None,
            InferenceFact::Typed(t) => Some(t),
        }
    }

    pub fn is_concrete(&self) -> bool {
        self.as_typed().is_some()
    }

    /// Merges two facts about the same edge, failing on contradiction.
    pub fn unify(&self, other: &InferenceFact) -> BasaltResult<InferenceFact> {
        use InferenceFact::*;
        match (self, other) {
            (Any, x) | (x, Any) => Ok(x.clone()),
            (Typed(a), Typed(b)) if a == b => Ok(self.clone()),
            (Typed(a), Typed(b)) => bail!("Impossible to unify {a:?} with {b:?}"),
        }
    }
}

impl fmt::Debug for InferenceFact {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InferenceFact::Any => write!(fmt, "?"),
            InferenceFact::Typed(t) => write!(fmt, "{t:?}"),
        }
    }
}

impl From<TypedFact> for InferenceFact {
    fn from(t: TypedFact) -> InferenceFact {
        InferenceFact::Typed(t)
    }
}
