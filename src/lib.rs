//! # just-bind - context resolution for `this`-style bindings
//!
//! A small evaluator that decides which object a routine sees as its implicit
//! context (`this`) depending on how the routine is called, and then runs it
//! with that context.
//!
//! ## Resolution Rules
//!
//! Evaluated in order, first match wins:
//!
//! 1. **Explicit bind** (`f.call(ctx)`): the context is `ctx`.
//! 2. **Method call** (`obj.f()`): the context is `obj`, the object used at the
//!    call site, wherever `f` was first defined.
//! 3. **Plain call** (`f()`): the context is the default sentinel. In strict mode
//!    that is "no context", and touching a field on it fails. In permissive mode
//!    it is a shared global object, so field writes silently land there.
//!
//! A nested call never inherits its caller's context. To pass it on, the body
//! must re-bind explicitly (`identify.call(this)`).
//!
//! ## Quick Start
//!
//! ```
//! use just_bind::runner::ds::function_object::new_routine;
//! use just_bind::runner::ds::object::object_from;
//! use just_bind::runner::ds::operations::type_conversion::expect_string;
//! use just_bind::runner::ds::value::JsValue;
//! use just_bind::runner::eval::{CallDescriptor, ContextResolver};
//!
//! let identify = new_routine("identify", |frame, _args| {
//!     let name = frame.get_field("name")?;
//!     Ok(JsValue::String(expect_string(&name, "toUpperCase")?.to_uppercase()))
//! });
//! let me = object_from(vec![("name", JsValue::str("ibrahem ghaemi"))]);
//!
//! let resolver = ContextResolver::strict();
//! let outcome = resolver
//!     .invoke(CallDescriptor::explicit(identify.clone(), &me, vec![]))
//!     .unwrap();
//! assert_eq!(outcome.value, JsValue::str("IBRAHEM GHAEMI"));
//!
//! // The same routine called plainly has no context to read from.
//! let err = resolver
//!     .invoke(CallDescriptor::plain(identify, vec![]))
//!     .unwrap_err();
//! assert!(err.is_null_context());
//! ```
//!
//! ## Deferred Callbacks
//!
//! [`runner::jobs::JobQueue`] stands in for `setTimeout`. A method passed as a
//! callback is stored as a bare routine value, so it runs as a plain call:
//!
//! ```
//! use just_bind::runner::ds::function_object::new_routine;
//! use just_bind::runner::ds::object::{get_property, object_create, set_property};
//! use just_bind::runner::ds::value::JsValue;
//! use just_bind::runner::eval::ContextResolver;
//! use just_bind::runner::jobs::JobQueue;
//!
//! let obj = object_create();
//! let who = new_routine("who", |frame, _args| Ok(JsValue::Boolean(frame.this().is_default())));
//! set_property(&obj, "who", JsValue::Object(who));
//!
//! let mut queue = JobQueue::new();
//! queue.set_timeout(get_property(&obj, "who"), 10, vec![]);
//!
//! let results = queue.run(&ContextResolver::strict());
//! assert_eq!(results[0].as_ref().unwrap().value, JsValue::Boolean(true));
//! ```
//!
//! ## Architecture
//!
//! - **[`runner::ds`]** - values, objects (shared by reference), routines
//! - **[`runner::eval`]** - [`ContextResolver`](runner::eval::ContextResolver),
//!   call descriptors and the [`Frame`](runner::eval::Frame) a body runs with
//! - **[`runner::jobs`]** - virtual-time callback queue
//! - **[`runner::config`]** - strict/permissive mode and call depth limit

#[macro_use]
extern crate lazy_static;

pub mod runner;
