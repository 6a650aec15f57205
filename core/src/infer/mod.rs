//! Graph validation: the fixed-point type inference pass.
pub mod fact;

use std::collections::HashSet;

use crate::internal::*;

/// Outcome of applying a type inference rule to one node.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeInference {
    /// The output type is fully determined.
    Resolved(TypedFact),
    /// Some input is not resolved yet. Try again once the rest of the
    /// graph has made progress.
    Pending,
    /// The node configuration violates the operator contract.
    Failed(Diagnostic),
}

/// A graph analyser borrowing the session's operator registry.
#[derive(new)]
pub struct Analyser<'r> {
    registry: &'r OpRegistry,
}

impl Analyser<'_> {
    /// Runs type inference over the whole graph until no edge is refined
    /// anymore.
    ///
    /// Rules only see resolved facts and their node's attribute record, so
    /// visiting order does not matter; the loop just re-visits until a
    /// pass refines nothing. Configuration failures go to `reporter`, one
    /// per violating node, and do not stop the pass. Returns true if any
    /// edge was refined.
    pub fn analyse(
        &self,
        model: &mut Graph,
        reporter: &mut dyn DiagnosticReporter,
    ) -> BasaltResult<bool> {
        let mut failed: HashSet<usize> = HashSet::new();
        let mut done_something = false;
        loop {
            let mut progress = false;
            for id in 0..model.nodes().len() {
                if failed.contains(&id) {
                    continue;
                }
                let inference = {
                    let node = model.node(id);
                    let Some(call) = &node.op else { continue };
                    let spec = self
                        .registry
                        .get(&call.operator)
                        .with_context(|| format!("Operator {} not registered", call.operator))?;
                    let mut types: TVec<InferenceFact> =
                        node.inputs.iter().map(|&i| model.node(i).output.clone()).collect();
                    types.push(node.output.clone());
                    trace!("Inferring node {}", node.span);
                    (spec.type_rel)(&types, spec.num_inputs, &*call.attrs, &node.span)
                };
                match inference {
                    TypeInference::Resolved(fact) => {
                        let node = model.node(id);
                        let unified = node
                            .output
                            .unify(&fact.into())
                            .with_context(|| format!("while unifying the output of node {}", node.span))?;
                        if unified != node.output {
                            debug!("  Refined node {}: {:?}", node.span, unified);
                            model.set_fact(id, unified);
                            progress = true;
                        }
                    }
                    TypeInference::Pending => trace!("  Deferred node {}", model.node(id).span),
                    TypeInference::Failed(diag) => {
                        reporter.emit(diag);
                        failed.insert(id);
                    }
                }
            }
            if !progress {
                break;
            }
            done_something = true;
        }
        Ok(done_something)
    }
}
