use thiserror::Error;

use crate::runner::eval::types::CallSite;

/// Errors raised while resolving or running a call.
///
/// The call-related variants carry the [`CallSite`] of the descriptor that failed
/// so a caller can report which invocation form triggered it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum JErrorType {
    /// A field was read or written on the strict-mode "no context" sentinel.
    #[error("Uncaught null context error: cannot access '{field}' of an unbound context in {call}.")]
    NullContext { field: String, call: CallSite },

    /// The call target was not a routine at call time.
    #[error("Uncaught type error: {callee} is not a function in {call}.")]
    NotInvocable { callee: String, call: CallSite },

    /// A value had the wrong type for an operation. `call` is filled in by the
    /// invocation the error escapes from, if the raiser did not know it.
    #[error("Uncaught type error: {}{}.", .message, in_call(.call))]
    TypeError {
        message: String,
        call: Option<CallSite>,
    },

    #[error("Uncaught range error: {message} in {call}.")]
    RangeError { message: String, call: CallSite },
}

fn in_call(call: &Option<CallSite>) -> String {
    match call {
        Some(call) => format!(" in {}", call),
        None => String::new(),
    }
}

impl JErrorType {
    /// A type error not yet tied to a call.
    pub fn type_error(message: impl Into<String>) -> Self {
        JErrorType::TypeError {
            message: message.into(),
            call: None,
        }
    }

    /// The call site that produced the error, when it came from a call.
    pub fn call_site(&self) -> Option<&CallSite> {
        match self {
            JErrorType::NullContext { call, .. }
            | JErrorType::NotInvocable { call, .. }
            | JErrorType::RangeError { call, .. } => Some(call),
            JErrorType::TypeError { call, .. } => call.as_ref(),
        }
    }

    /// Ties an error raised inside a call to that call, unless it already
    /// names a more specific one.
    pub fn at_call_site(self, site: &CallSite) -> Self {
        match self {
            JErrorType::TypeError {
                message,
                call: None,
            } => JErrorType::TypeError {
                message,
                call: Some(site.clone()),
            },
            other => other,
        }
    }

    pub fn is_null_context(&self) -> bool {
        matches!(self, JErrorType::NullContext { .. })
    }

    pub fn is_not_invocable(&self) -> bool {
        matches!(self, JErrorType::NotInvocable { .. })
    }

    pub fn is_type_error(&self) -> bool {
        matches!(self, JErrorType::TypeError { .. })
    }

    pub fn is_range_error(&self) -> bool {
        matches!(self, JErrorType::RangeError { .. })
    }
}
