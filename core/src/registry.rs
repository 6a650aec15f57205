//! The operator registry.
//!
//! A registry is an explicit value, built once when a compiler session
//! starts and owned by it. There is no process-global table: everything
//! that needs operator specs gets handed a registry.
use std::collections::HashMap;

use crate::internal::*;

/// A type inference rule.
///
/// `types` holds one slot per input followed by the result placeholder.
/// The rule reads the slots and the attribute record, and answers with an
/// output type, a deferral, or a diagnostic. It owns nothing and mutates
/// nothing.
pub type TypeRel = fn(&[InferenceFact], usize, &dyn OpAttrs, &Span) -> TypeInference;

/// Documentation for one positional operand.
#[derive(Clone, Debug, new)]
pub struct ArgSpec {
    pub name: &'static str,
    pub description: &'static str,
}

/// Everything the session knows about one operator.
#[derive(Clone, Debug)]
pub struct OpSpec {
    pub name: &'static str,
    pub num_inputs: usize,
    pub arguments: Vec<ArgSpec>,
    pub support_level: u8,
    pub doc: &'static str,
    pub type_rel: TypeRel,
}

impl OpSpec {
    pub fn new(name: &'static str, num_inputs: usize, type_rel: TypeRel) -> OpSpec {
        OpSpec { name, num_inputs, arguments: vec![], support_level: 1, doc: "", type_rel }
    }

    pub fn with_argument(mut self, name: &'static str, description: &'static str) -> OpSpec {
        self.arguments.push(ArgSpec::new(name, description));
        self
    }

    pub fn with_doc(mut self, doc: &'static str) -> OpSpec {
        self.doc = doc;
        self
    }

    pub fn with_support_level(mut self, level: u8) -> OpSpec {
        self.support_level = level;
        self
    }
}

/// Maps stable operator names to their specs.
#[derive(Clone, Debug, Default)]
pub struct OpRegistry(HashMap<&'static str, OpSpec>);

impl OpRegistry {
    /// The registry for the NPU operator set.
    pub fn npu() -> OpRegistry {
        let mut reg = OpRegistry::default();
        crate::ops::register_all_ops(&mut reg);
        reg
    }

    pub fn insert(&mut self, spec: OpSpec) {
        self.0.insert(spec.name, spec);
    }

    pub fn get(&self, name: &str) -> Option<&OpSpec> {
        self.0.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::unary_elementwise::UNARY_ELEMENTWISE;

    #[test]
    fn npu_registry_exposes_unary_elementwise() {
        let reg = OpRegistry::npu();
        let spec = reg.get(UNARY_ELEMENTWISE).unwrap();
        assert_eq!(spec.num_inputs, 2);
        assert_eq!(spec.support_level, 11);
        let args: Vec<&str> = spec.arguments.iter().map(|a| a.name).collect();
        assert_eq!(args, ["ifm", "lut"]);
    }

    #[test]
    fn unknown_names_are_absent() {
        assert!(OpRegistry::npu().get("npu.made_up").is_none());
    }
}
