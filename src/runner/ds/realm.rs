use crate::runner::ds::object::{object_create, JsObjectType};

/// Holds the shared global object that permissive-mode plain calls bind to.
///
/// Each resolver owns its own realm, so state written through the global object
/// by one resolver is never visible to another.
pub struct CodeRealm {
    global_object: JsObjectType,
}
impl CodeRealm {
    pub fn new() -> Self {
        CodeRealm {
            global_object: object_create(),
        }
    }

    pub fn get_global_object(&self) -> JsObjectType {
        self.global_object.clone()
    }
}
impl Default for CodeRealm {
    fn default() -> Self {
        Self::new()
    }
}
