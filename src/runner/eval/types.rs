//! Core types for call resolution.

use std::fmt;

use uuid::Uuid;

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::{get_property, same_object, JsObjectType};
use crate::runner::ds::value::JsValue;

/// The syntactic shape of a call, carrying whatever that shape supplies.
#[derive(Clone)]
pub enum CallForm {
    /// `f(args)`
    Plain,
    /// `receiver.key(args)`. The receiver is the object used at the call site;
    /// `key` names the slot the routine is read from when the call runs.
    MethodOnObject { receiver: JsObjectType, key: String },
    /// `f.call(context, args)`. `None` stands for `f.call(null)`.
    ExplicitBind { context: Option<JsObjectType> },
}
impl CallForm {
    pub fn kind(&self) -> CallFormKind {
        match self {
            CallForm::Plain => CallFormKind::Plain,
            CallForm::MethodOnObject { .. } => CallFormKind::MethodOnObject,
            CallForm::ExplicitBind { .. } => CallFormKind::ExplicitBind,
        }
    }
}

/// Payload-free tag of a [`CallForm`], used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallFormKind {
    Plain,
    MethodOnObject,
    ExplicitBind,
}
impl fmt::Display for CallFormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallFormKind::Plain => write!(f, "plain call"),
            CallFormKind::MethodOnObject => write!(f, "method call"),
            CallFormKind::ExplicitBind => write!(f, "explicit-bind call"),
        }
    }
}

/// Identity of one call descriptor, attached to errors and log events.
#[derive(Debug, Clone, PartialEq)]
pub struct CallSite {
    pub id: Uuid,
    pub label: String,
    pub form: CallFormKind,
}
impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}' [{}]", self.form, self.label, self.id)
    }
}

/// Describes exactly one invocation. `invoke` consumes it, so a descriptor is
/// never run twice.
pub struct CallDescriptor {
    id: Uuid,
    label: String,
    routine: JsValue,
    pub form: CallForm,
    pub arguments: Vec<JsValue>,
}
impl CallDescriptor {
    /// For a `MethodOnObject` form `routine` is unused: the callee is read from
    /// `receiver[key]` by [`CallDescriptor::callee`].
    pub fn new(routine: JsValue, form: CallForm, arguments: Vec<JsValue>) -> Self {
        let label = routine_label(&routine);
        CallDescriptor {
            id: Uuid::new_v4(),
            label,
            routine,
            form,
            arguments,
        }
    }

    /// `routine(args)`
    pub fn plain(routine: impl Into<JsValue>, arguments: Vec<JsValue>) -> Self {
        Self::new(routine.into(), CallForm::Plain, arguments)
    }

    /// `receiver.key(args)`: the routine is whatever sits at `key` when the
    /// descriptor is invoked, which may not be a routine at all.
    pub fn method(receiver: &JsObjectType, key: &str, arguments: Vec<JsValue>) -> Self {
        Self::new(
            JsValue::Undefined,
            CallForm::MethodOnObject {
                receiver: receiver.clone(),
                key: key.to_string(),
            },
            arguments,
        )
        .with_label(key)
    }

    /// `routine.call(context, args)`
    pub fn explicit(
        routine: impl Into<JsValue>,
        context: &JsObjectType,
        arguments: Vec<JsValue>,
    ) -> Self {
        Self::new(
            routine.into(),
            CallForm::ExplicitBind {
                context: Some(context.clone()),
            },
            arguments,
        )
    }

    /// `routine.call(null, args)`
    pub fn explicit_null(routine: impl Into<JsValue>, arguments: Vec<JsValue>) -> Self {
        Self::new(
            routine.into(),
            CallForm::ExplicitBind { context: None },
            arguments,
        )
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// The value this descriptor would call right now. A method call reads its
    /// receiver's slot on every lookup, so a slot replaced after the descriptor
    /// was built is seen here.
    pub fn callee(&self) -> JsValue {
        match &self.form {
            CallForm::MethodOnObject { receiver, key } => get_property(receiver, key),
            CallForm::Plain | CallForm::ExplicitBind { .. } => self.routine.clone(),
        }
    }

    pub fn call_site(&self) -> CallSite {
        CallSite {
            id: self.id,
            label: self.label.clone(),
            form: self.form.kind(),
        }
    }
}

fn routine_label(routine: &JsValue) -> String {
    match routine {
        JsValue::Object(o) => match (**o).borrow().as_function() {
            Some(f) if !f.name().is_empty() => f.name().to_string(),
            Some(_) => "<anonymous>".to_string(),
            None => "<object>".to_string(),
        },
        other => other.to_string(),
    }
}

/// The context in effect for one invocation.
#[derive(Clone)]
pub enum ThisBinding {
    /// Strict-mode default: there is no context at all.
    Unbound,
    /// Permissive-mode default: the realm's shared global object.
    Global(JsObjectType),
    /// A receiver or an explicitly supplied context.
    Object(JsObjectType),
}
impl ThisBinding {
    /// The bound object, if any. `Unbound` has none.
    pub fn context(&self) -> Option<&JsObjectType> {
        match self {
            ThisBinding::Unbound => None,
            ThisBinding::Global(o) | ThisBinding::Object(o) => Some(o),
        }
    }

    /// Whether no meaningful context was bound.
    pub fn is_default(&self) -> bool {
        matches!(self, ThisBinding::Unbound | ThisBinding::Global(_))
    }

    pub fn as_value(&self) -> JsValue {
        match self.context() {
            Some(o) => JsValue::Object(o.clone()),
            None => JsValue::Undefined,
        }
    }
}
/// Bindings are equal when they refer to the same context object (or both to none).
impl PartialEq for ThisBinding {
    fn eq(&self, other: &Self) -> bool {
        match (self.context(), other.context()) {
            (None, None) => true,
            (Some(a), Some(b)) => same_object(a, b),
            _ => false,
        }
    }
}
impl fmt::Debug for ThisBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThisBinding::Unbound => write!(f, "ThisBinding::Unbound"),
            ThisBinding::Global(_) => write!(f, "ThisBinding::Global(...)"),
            ThisBinding::Object(_) => write!(f, "ThisBinding::Object(...)"),
        }
    }
}

/// Result of a completed invocation. Side effects are already applied to
/// whatever objects the body touched.
#[derive(Debug, Clone)]
pub struct CallOutcome {
    pub value: JsValue,
    pub binding: ThisBinding,
    pub call: CallSite,
}

/// Result type for value-returning operations.
pub type ValueResult = Result<JsValue, JErrorType>;

/// Result type for a whole invocation.
pub type CallResult = Result<CallOutcome, JErrorType>;
