//! Execution side of the crate.
//!
//! - **[`ds`]** - values, objects and routines
//! - **[`eval`]** - the context resolver and call frames
//! - **[`jobs`]** - deferred callbacks
//! - **[`config`]** - resolver configuration

pub mod config;
pub mod ds;
pub mod eval;
pub mod jobs;
