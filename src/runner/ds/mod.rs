//! Runtime data structures: values, objects, routines and the execution context stack.

pub mod error;
pub mod execution_context;
pub mod function_object;
pub mod object;
pub mod operations;
pub mod realm;
pub mod value;
