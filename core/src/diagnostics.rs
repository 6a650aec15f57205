//! Structured failure reporting for graph validation.
use std::fmt;

/// Location of a node in the graph, for diagnostics.
#[derive(Clone, Debug, PartialEq, Eq, Hash, new)]
pub struct Span {
    pub node: usize,
    pub name: String,
}

impl fmt::Display for Span {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "#{} \"{}\"", self.node, self.name)
    }
}

/// A validation failure tied to a span.
///
/// Terminal for the node it concerns; the enclosing pass carries on with
/// the rest of the graph.
#[derive(Clone, Debug, PartialEq, Eq, Hash, new)]
pub struct Diagnostic {
    pub span: Span,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}: {}", self.span, self.message)
    }
}

/// Where validation failures end up.
pub trait DiagnosticReporter {
    fn emit(&mut self, diag: Diagnostic);
}

/// A reporter collecting diagnostics in memory.
#[derive(Clone, Debug, Default)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }
}

impl DiagnosticReporter for Diagnostics {
    fn emit(&mut self, diag: Diagnostic) {
        debug!("{diag}");
        self.0.push(diag);
    }
}
