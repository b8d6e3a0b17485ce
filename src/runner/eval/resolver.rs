//! The context resolver.
//!
//! Resolution order for a [`CallDescriptor`], first match wins:
//!
//! ```text
//! 1. ExplicitBind   f.call(ctx)   → ctx
//! 2. MethodOnObject obj.f()       → obj (the call-site receiver)
//! 3. Plain          f()           → default sentinel
//!                                     strict:     Unbound
//!                                     permissive: the realm's global object
//! ```
//!
//! `resolve` is a pure function of the descriptor and the resolver's mode. Nothing
//! is remembered between calls; a nested call never inherits its caller's binding.

use std::cell::RefCell;

use crate::runner::config::{BindingMode, ResolverConfig};
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::execution_context::{ExecutionContext, ExecutionContextStack};
use crate::runner::ds::function_object::routine_parts;
use crate::runner::ds::object::{same_object, JsObjectType};
use crate::runner::ds::realm::CodeRealm;
use crate::runner::eval::frame::Frame;
use crate::runner::eval::types::{CallDescriptor, CallForm, CallOutcome, CallResult, ThisBinding};

pub struct ContextResolver {
    config: ResolverConfig,
    realm: CodeRealm,
    stack: RefCell<ExecutionContextStack>,
}

impl ContextResolver {
    pub fn new(config: ResolverConfig) -> Self {
        ContextResolver {
            config,
            realm: CodeRealm::new(),
            stack: RefCell::new(ExecutionContextStack::new()),
        }
    }

    pub fn strict() -> Self {
        Self::new(ResolverConfig::strict())
    }

    pub fn permissive() -> Self {
        Self::new(ResolverConfig::permissive())
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn mode(&self) -> BindingMode {
        self.config.mode
    }

    /// The shared object plain calls bind to in permissive mode. It exists in
    /// strict mode too but is never bound there.
    pub fn global_object(&self) -> JsObjectType {
        self.realm.get_global_object()
    }

    /// The sentinel a plain call resolves to under the configured mode.
    pub fn default_binding(&self) -> ThisBinding {
        match self.config.mode {
            BindingMode::Strict => ThisBinding::Unbound,
            BindingMode::Permissive => ThisBinding::Global(self.realm.get_global_object()),
        }
    }

    /// Computes the binding `descriptor` would run with.
    pub fn resolve(&self, descriptor: &CallDescriptor) -> ThisBinding {
        let binding = match &descriptor.form {
            CallForm::ExplicitBind { context: Some(context) } => self.bind_object(context),
            CallForm::ExplicitBind { context: None } => self.default_binding(),
            CallForm::MethodOnObject { receiver, .. } => self.bind_object(receiver),
            CallForm::Plain => self.default_binding(),
        };
        tracing::debug!(
            "resolved {} to {:?} ({} mode)",
            descriptor.call_site(),
            binding,
            self.config.mode
        );
        binding
    }

    fn bind_object(&self, o: &JsObjectType) -> ThisBinding {
        let global = self.realm.get_global_object();
        if same_object(o, &global) {
            ThisBinding::Global(global)
        } else {
            ThisBinding::Object(o.clone())
        }
    }

    /// Resolves the binding and runs the routine with it installed for the
    /// duration of this call only.
    pub fn invoke(&self, descriptor: CallDescriptor) -> CallResult {
        let call = descriptor.call_site();
        let (name, body) = match routine_parts(&descriptor.callee()) {
            Some(parts) => parts,
            None => {
                tracing::warn!("{} is not a function ({})", descriptor.label(), call);
                return Err(JErrorType::NotInvocable {
                    callee: descriptor.label().to_string(),
                    call,
                });
            }
        };
        if self.depth() >= self.config.max_call_depth {
            return Err(JErrorType::RangeError {
                message: format!(
                    "Maximum call stack size exceeded ({} frames)",
                    self.config.max_call_depth
                ),
                call,
            });
        }

        let binding = self.resolve(&descriptor);
        let _guard = self.push_context(ExecutionContext {
            function_name: name,
            this_binding: binding.clone(),
            call: call.clone(),
        });

        let mut frame = Frame::new(self, binding.clone(), call.clone());
        let result = (*body)(&mut frame, &descriptor.arguments);
        match result {
            Ok(value) => {
                tracing::trace!("{} returned {}", call, value);
                Ok(CallOutcome {
                    value,
                    binding,
                    call,
                })
            }
            Err(e) => {
                let e = e.at_call_site(&call);
                tracing::warn!("{} failed: {}", call, e);
                Err(e)
            }
        }
    }

    /// Number of invocations currently running.
    pub fn depth(&self) -> usize {
        self.stack.borrow().len()
    }

    /// Binding of the innermost running invocation, if any.
    pub fn current_binding(&self) -> Option<ThisBinding> {
        self.stack
            .borrow()
            .get_running_execution_ctx()
            .map(|ctx| ctx.this_binding.clone())
    }

    /// Name of the innermost running routine, if any.
    pub fn current_function(&self) -> Option<String> {
        self.stack
            .borrow()
            .get_running_execution_ctx()
            .map(|ctx| ctx.function_name.clone())
    }

    fn push_context(&self, ctx: ExecutionContext) -> ContextGuard<'_> {
        tracing::trace!("enter {} at depth {}", ctx.call, self.depth());
        self.stack.borrow_mut().push_execution_ctx(ctx);
        ContextGuard { stack: &self.stack }
    }
}

impl Default for ContextResolver {
    fn default() -> Self {
        Self::strict()
    }
}

/// Pops the execution context when the invocation ends, even by unwinding.
struct ContextGuard<'a> {
    stack: &'a RefCell<ExecutionContextStack>,
}
impl Drop for ContextGuard<'_> {
    fn drop(&mut self) {
        self.stack.borrow_mut().pop_running_execution_ctx();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::ds::function_object::new_routine;
    use crate::runner::ds::object::object_create;
    use crate::runner::ds::value::JsValue;

    fn noop() -> JsObjectType {
        new_routine("noop", |_frame, _args| Ok(JsValue::Undefined))
    }

    #[test]
    fn explicit_null_falls_back_to_default() {
        let resolver = ContextResolver::strict();
        let d = CallDescriptor::explicit_null(noop(), vec![]);
        assert_eq!(resolver.resolve(&d), ThisBinding::Unbound);
    }

    #[test]
    fn binding_the_global_object_explicitly_is_still_default() {
        let resolver = ContextResolver::permissive();
        let global = resolver.global_object();
        let d = CallDescriptor::explicit(noop(), &global, vec![]);
        assert!(resolver.resolve(&d).is_default());
    }

    #[test]
    fn stack_is_empty_after_invoke() {
        let resolver = ContextResolver::strict();
        let ctx = object_create();
        resolver
            .invoke(CallDescriptor::explicit(noop(), &ctx, vec![]))
            .unwrap();
        assert_eq!(resolver.depth(), 0);
        assert!(resolver.current_binding().is_none());
    }

    #[test]
    fn stack_is_popped_after_failure() {
        let resolver = ContextResolver::strict();
        let touch = new_routine("touch", |frame, _args| frame.get_field("missing"));
        assert!(resolver.invoke(CallDescriptor::plain(touch, vec![])).is_err());
        assert_eq!(resolver.depth(), 0);
    }
}
