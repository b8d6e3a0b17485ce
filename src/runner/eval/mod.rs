//! Call resolution and invocation.
//!
//! [`ContextResolver`] decides which object a call binds as its context and runs
//! the routine with that binding visible through a [`Frame`].

pub mod frame;
pub mod resolver;
pub mod types;

pub use frame::Frame;
pub use resolver::ContextResolver;
pub use types::{CallDescriptor, CallForm, CallFormKind, CallOutcome, CallSite, ThisBinding};
