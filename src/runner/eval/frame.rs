//! The view a running routine has of its own invocation.

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::{get_property, has_property, set_property, JsObjectType};
use crate::runner::ds::operations::type_conversion::increment;
use crate::runner::ds::value::JsValue;
use crate::runner::eval::resolver::ContextResolver;
use crate::runner::eval::types::{CallDescriptor, CallResult, CallSite, ThisBinding, ValueResult};

/// Handed to a routine body for the duration of one call.
///
/// Field access goes through the resolved binding only. A key that is missing
/// on the binding is never looked up anywhere else.
pub struct Frame<'a> {
    resolver: &'a ContextResolver,
    binding: ThisBinding,
    call: CallSite,
}

impl<'a> Frame<'a> {
    pub(crate) fn new(resolver: &'a ContextResolver, binding: ThisBinding, call: CallSite) -> Self {
        Frame {
            resolver,
            binding,
            call,
        }
    }

    pub fn this(&self) -> &ThisBinding {
        &self.binding
    }

    /// `this` as a value: the bound object, or `undefined` when unbound.
    pub fn this_value(&self) -> JsValue {
        self.binding.as_value()
    }

    pub fn call_site(&self) -> &CallSite {
        &self.call
    }

    pub fn resolver(&self) -> &'a ContextResolver {
        self.resolver
    }

    fn context_for(&self, field: &str) -> Result<&JsObjectType, JErrorType> {
        self.binding.context().ok_or_else(|| JErrorType::NullContext {
            field: field.to_string(),
            call: self.call.clone(),
        })
    }

    /// `this[key]`
    pub fn get_field(&self, key: &str) -> ValueResult {
        Ok(get_property(self.context_for(key)?, key))
    }

    /// `this[key] = value`
    pub fn set_field(&self, key: &str, value: JsValue) -> Result<(), JErrorType> {
        set_property(self.context_for(key)?, key, value);
        Ok(())
    }

    /// `key in this`
    pub fn has_field(&self, key: &str) -> Result<bool, JErrorType> {
        Ok(has_property(self.context_for(key)?, key))
    }

    /// `this[key]++`, returning the new value. A missing field becomes `NaN`.
    pub fn increment_field(&self, key: &str) -> ValueResult {
        let context = self.context_for(key)?;
        let next = increment(&get_property(context, key));
        set_property(context, key, next.clone());
        Ok(next)
    }

    /// Runs a nested descriptor. Its binding is resolved on its own.
    pub fn invoke(&self, descriptor: CallDescriptor) -> CallResult {
        self.resolver.invoke(descriptor)
    }

    /// `routine(args)` from inside this body. The callee does not see this
    /// frame's binding.
    pub fn call_plain(&self, routine: impl Into<JsValue>, args: Vec<JsValue>) -> ValueResult {
        Ok(self.invoke(CallDescriptor::plain(routine, args))?.value)
    }

    /// `receiver.key(args)`
    pub fn call_method(&self, receiver: &JsObjectType, key: &str, args: Vec<JsValue>) -> ValueResult {
        Ok(self.invoke(CallDescriptor::method(receiver, key, args))?.value)
    }

    /// `this.key(args)`. With no context there is nothing to look the routine
    /// up on, so the call target is not a function.
    pub fn call_this_method(&self, key: &str, args: Vec<JsValue>) -> ValueResult {
        let label = format!("this.{}", key);
        let descriptor = match self.binding.context() {
            Some(context) => CallDescriptor::method(context, key, args),
            None => CallDescriptor::plain(JsValue::Undefined, args),
        };
        Ok(self.invoke(descriptor.with_label(label))?.value)
    }

    /// `routine.call(context, args)`
    pub fn call_with(
        &self,
        routine: impl Into<JsValue>,
        context: &JsObjectType,
        args: Vec<JsValue>,
    ) -> ValueResult {
        Ok(self
            .invoke(CallDescriptor::explicit(routine, context, args))?
            .value)
    }

    /// `routine.call(this, args)`: hands this frame's own binding on.
    pub fn call_with_this(&self, routine: impl Into<JsValue>, args: Vec<JsValue>) -> ValueResult {
        let descriptor = match self.binding.context() {
            Some(context) => CallDescriptor::explicit(routine, context, args),
            None => CallDescriptor::explicit_null(routine, args),
        };
        Ok(self.invoke(descriptor)?.value)
    }
}
