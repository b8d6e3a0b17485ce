use crate::runner::ds::function_object::JsFunctionObject;
use crate::runner::ds::value::JsValue;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Objects are shared by reference. Every holder of a `JsObjectType` sees
/// mutations made through any other holder.
pub type JsObjectType = Rc<RefCell<ObjectType>>;

pub enum ObjectType {
    Ordinary(ObjectBase),
    Function(JsFunctionObject),
}
impl ObjectType {
    pub fn is_callable(&self) -> bool {
        match self {
            ObjectType::Function(_) => true,
            _ => false,
        }
    }

    pub fn as_object_base(&self) -> &ObjectBase {
        match self {
            ObjectType::Ordinary(o) => o,
            ObjectType::Function(f) => f.get_object_base(),
        }
    }

    pub fn as_object_base_mut(&mut self) -> &mut ObjectBase {
        match self {
            ObjectType::Ordinary(o) => o,
            ObjectType::Function(f) => f.get_object_base_mut(),
        }
    }

    pub fn as_function(&self) -> Option<&JsFunctionObject> {
        match self {
            ObjectType::Function(f) => Some(f),
            _ => None,
        }
    }
}

/// Own-property table. There is no prototype chain: a missing key reads as
/// `undefined`.
pub struct ObjectBase {
    properties: HashMap<String, JsValue>,
}
impl ObjectBase {
    pub fn new() -> Self {
        ObjectBase {
            properties: HashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> JsValue {
        self.properties
            .get(key)
            .cloned()
            .unwrap_or(JsValue::Undefined)
    }

    pub fn set(&mut self, key: impl Into<String>, value: JsValue) {
        self.properties.insert(key.into(), value);
    }

    pub fn has(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.properties.keys().cloned().collect();
        keys.sort();
        keys
    }
}
impl Default for ObjectBase {
    fn default() -> Self {
        Self::new()
    }
}

pub fn object_create() -> JsObjectType {
    Rc::new(RefCell::new(ObjectType::Ordinary(ObjectBase::new())))
}

/// Builds an ordinary object from `(key, value)` pairs, e.g. `{ name: "fatemeh" }`.
pub fn object_from<K, I>(entries: I) -> JsObjectType
where
    K: Into<String>,
    I: IntoIterator<Item = (K, JsValue)>,
{
    let mut base = ObjectBase::new();
    for (k, v) in entries {
        base.set(k, v);
    }
    Rc::new(RefCell::new(ObjectType::Ordinary(base)))
}

pub fn get_property(o: &JsObjectType, key: &str) -> JsValue {
    (**o).borrow().as_object_base().get(key)
}

pub fn set_property(o: &JsObjectType, key: impl Into<String>, value: JsValue) {
    (**o).borrow_mut().as_object_base_mut().set(key, value);
}

pub fn has_property(o: &JsObjectType, key: &str) -> bool {
    (**o).borrow().as_object_base().has(key)
}

pub fn same_object(a: &JsObjectType, b: &JsObjectType) -> bool {
    Rc::ptr_eq(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_property_reads_undefined() {
        let o = object_create();
        assert_eq!(get_property(&o, "count"), JsValue::Undefined);
        assert!(!has_property(&o, "count"));
    }

    #[test]
    fn aliases_observe_mutation() {
        let data = object_from(vec![("count", JsValue::int(0))]);
        let alias = data.clone();
        set_property(&alias, "count", JsValue::int(3));
        assert_eq!(get_property(&data, "count"), JsValue::int(3));
        assert!(same_object(&data, &alias));
    }

    #[test]
    fn keys_are_sorted() {
        let o = object_from(vec![("b", JsValue::Null), ("a", JsValue::Null)]);
        assert_eq!((*o).borrow().as_object_base().keys(), vec!["a", "b"]);
    }
}
