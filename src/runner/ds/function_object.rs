use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::runner::ds::object::{JsObjectType, ObjectBase, ObjectType};
use crate::runner::ds::value::JsValue;
use crate::runner::eval::frame::Frame;
use crate::runner::eval::types::ValueResult;

/// Body of a routine. It sees the resolved context only through the [`Frame`],
/// never through the object it happens to be stored on.
pub type RoutineBody = Rc<dyn Fn(&mut Frame<'_>, &[JsValue]) -> ValueResult>;

/// A first-class routine. Being an object, it has its own field table and can
/// itself be used as a context.
pub struct JsFunctionObject {
    name: String,
    body: RoutineBody,
    object_base: ObjectBase,
}
impl JsFunctionObject {
    pub fn new(name: impl Into<String>, body: RoutineBody) -> Self {
        JsFunctionObject {
            name: name.into(),
            body,
            object_base: ObjectBase::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body(&self) -> RoutineBody {
        self.body.clone()
    }

    pub fn get_object_base(&self) -> &ObjectBase {
        &self.object_base
    }

    pub fn get_object_base_mut(&mut self) -> &mut ObjectBase {
        &mut self.object_base
    }
}
impl fmt::Debug for JsFunctionObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsFunctionObject")
            .field("name", &self.name)
            .finish()
    }
}

/// Creates a routine object from a closure.
///
/// ```
/// use just_bind::runner::ds::function_object::new_routine;
/// use just_bind::runner::ds::value::JsValue;
///
/// let greet = new_routine("greet", |_frame, _args| Ok(JsValue::str("hi")));
/// assert!(JsValue::Object(greet).is_callable());
/// ```
pub fn new_routine<F>(name: impl Into<String>, body: F) -> JsObjectType
where
    F: Fn(&mut Frame<'_>, &[JsValue]) -> ValueResult + 'static,
{
    Rc::new(RefCell::new(ObjectType::Function(JsFunctionObject::new(
        name,
        Rc::new(body),
    ))))
}

/// Body and name of `value` if it is a routine. The borrow is released before
/// returning so the body may freely mutate the routine's own fields.
pub fn routine_parts(value: &JsValue) -> Option<(String, RoutineBody)> {
    match value {
        JsValue::Object(o) => (**o)
            .borrow()
            .as_function()
            .map(|f| (f.name().to_string(), f.body())),
        _ => None,
    }
}
