#[macro_use]
mod macros;

/// A Smallvec instantiation with 4 embeddable values.
///
/// Used about everywhere in basalt, for node operands and tensor dimensions.
pub type TVec<T> = smallvec::SmallVec<[T; 4]>;

pub type BasaltError = anyhow::Error;
pub type BasaltResult<T> = anyhow::Result<T>;

pub mod prelude {
    pub use crate::TVec;
    pub use crate::datum::DatumType;
    pub use crate::dim::{Dim, ToDim};
    pub use crate::tvec;
    pub use crate::{BasaltError, BasaltResult};
}

pub mod internal {
    pub use crate::prelude::*;
    pub use anyhow::{Context, anyhow, bail, ensure, format_err};
}

pub use anyhow;

pub mod datum;
pub mod dim;
