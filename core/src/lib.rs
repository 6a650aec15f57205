#[macro_use]
extern crate derive_new;
#[macro_use]
extern crate log;

pub mod diagnostics;
pub mod infer;
pub mod model;
pub mod ops;
pub mod registry;

pub use basalt_data;

pub mod prelude {
    pub use crate::diagnostics::{Diagnostic, DiagnosticReporter, Diagnostics, Span};
    pub use crate::infer::fact::{InferenceFact, TypedFact};
    pub use crate::infer::{Analyser, TypeInference};
    pub use crate::model::Graph;
    pub use crate::registry::{OpRegistry, OpSpec};
    pub use basalt_data::prelude::*;
}

pub mod internal {
    pub use crate::ops::OpAttrs;
    pub use crate::prelude::*;
    pub use crate::registry::TypeRel;
    pub use basalt_data::internal::*;
}

#[cfg(test)]
#[allow(dead_code)]
fn setup_test_logger() {
    let _ = env_logger::Builder::from_env("BASALT_LOG").try_init();
}
