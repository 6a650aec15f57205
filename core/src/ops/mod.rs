use downcast_rs::{Downcast, impl_downcast};
use dyn_clone::DynClone;
use std::fmt;

use crate::registry::OpRegistry;

pub mod layout;
pub mod unary_elementwise;

/// An immutable attribute record attached to a call node.
///
/// Each operator defines its own record type; its type inference rule
/// downcasts at the boundary. A failed downcast is a wiring bug, never a
/// user error.
pub trait OpAttrs: fmt::Debug + DynClone + Downcast + Send + Sync {}
impl_downcast!(OpAttrs);
dyn_clone::clone_trait_object!(OpAttrs);

pub fn register_all_ops(reg: &mut OpRegistry) {
    unary_elementwise::register(reg);
}
