//! The graph of call nodes: the construction side of the IR.
use crate::internal::*;

/// A call binding a registered operator name to an attribute record.
///
/// The record is built once at construction time and never mutated; the
/// node owns it exclusively for its whole life.
#[derive(Clone, Debug)]
pub struct CallOp {
    pub operator: String,
    pub attrs: Box<dyn OpAttrs>,
}

/// A node in the graph: either a source (graph input) or an operator call.
///
/// Every node has exactly one output edge, carrying an [InferenceFact].
#[derive(Clone, Debug)]
pub struct Node {
    pub id: usize,
    pub name: String,
    pub op: Option<CallOp>,
    pub inputs: TVec<usize>,
    pub output: InferenceFact,
    pub span: Span,
}

#[derive(Clone, Debug, Default)]
pub struct Graph {
    nodes: Vec<Node>,
}

impl Graph {
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: usize) -> &Node {
        &self.nodes[id]
    }

    /// Adds a graph input, with whatever is known of its type.
    pub fn add_source(&mut self, name: impl Into<String>, fact: InferenceFact) -> usize {
        let id = self.nodes.len();
        let name = name.into();
        let span = Span::new(id, name.clone());
        self.nodes.push(Node { id, name, op: None, inputs: tvec!(), output: fact, span });
        id
    }

    /// Appends a call node bound to a registered operator name.
    ///
    /// Construction does not type-check anything; validation is a separate
    /// pass (see [crate::infer::Analyser]).
    pub fn wire_node(
        &mut self,
        name: impl Into<String>,
        operator: &str,
        attrs: Box<dyn OpAttrs>,
        inputs: &[usize],
    ) -> BasaltResult<usize> {
        let name = name.into();
        for &i in inputs {
            ensure!(i < self.nodes.len(), "Unknown input node {i} wiring \"{name}\"");
        }
        let id = self.nodes.len();
        let span = Span::new(id, name.clone());
        self.nodes.push(Node {
            id,
            name,
            op: Some(CallOp { operator: operator.to_string(), attrs }),
            inputs: inputs.iter().copied().collect(),
            output: InferenceFact::any(),
            span,
        });
        Ok(id)
    }

    pub fn outlet_fact(&self, id: usize) -> &InferenceFact {
        &self.nodes[id].output
    }

    pub fn set_fact(&mut self, id: usize, fact: InferenceFact) {
        self.nodes[id].output = fact;
    }
}
