//! Tests for deferred callbacks.

extern crate just_bind;

use just_bind::runner::ds::function_object::new_routine;
use just_bind::runner::ds::object::{get_property, object_from, set_property, JsObjectType};
use just_bind::runner::ds::value::JsValue;
use just_bind::runner::eval::{CallDescriptor, ContextResolver, ThisBinding};
use just_bind::runner::jobs::JobQueue;

fn echo_this() -> JsObjectType {
    new_routine("echoThis", |frame, _args| Ok(frame.this_value()))
}

#[test]
fn test_callback_loses_method_binding() {
    let resolver = ContextResolver::strict();
    let obj = object_from(vec![("name", JsValue::str("owner"))]);
    set_property(&obj, "show", JsValue::Object(echo_this()));

    let mut queue = JobQueue::new();
    queue.set_timeout(get_property(&obj, "show"), 10, vec![]);
    let results = queue.run(&resolver);

    assert_eq!(results.len(), 1);
    let outcome = results[0].as_ref().unwrap();
    assert_eq!(outcome.binding, ThisBinding::Unbound);
    assert_eq!(outcome.value, JsValue::Undefined);
}

#[test]
fn test_callback_binds_global_in_permissive_mode() {
    let resolver = ContextResolver::permissive();
    let mut queue = JobQueue::new();
    queue.set_timeout(echo_this(), 0, vec![]);
    let results = queue.run(&resolver);
    let outcome = results[0].as_ref().unwrap();
    assert!(outcome.binding.is_default());
    assert_eq!(outcome.value, JsValue::Object(resolver.global_object()));
}

#[test]
fn test_explicit_descriptor_keeps_binding_across_deferral() {
    let resolver = ContextResolver::strict();
    let obj = object_from(vec![("name", JsValue::str("owner"))]);
    let mut queue = JobQueue::new();
    queue.enqueue(CallDescriptor::explicit(echo_this(), &obj, vec![]), 5);
    let results = queue.run(&resolver);
    assert_eq!(
        results[0].as_ref().unwrap().value,
        JsValue::Object(obj)
    );
}

#[test]
fn test_jobs_run_in_due_time_then_insertion_order() {
    let resolver = ContextResolver::strict();
    let echo = new_routine("echo", |_frame, args| {
        Ok(args.first().cloned().unwrap_or(JsValue::Undefined))
    });
    let mut queue = JobQueue::new();
    queue.set_timeout(echo.clone(), 30, vec![JsValue::str("late")]);
    queue.set_timeout(echo.clone(), 10, vec![JsValue::str("first")]);
    queue.set_timeout(echo, 10, vec![JsValue::str("second")]);
    assert_eq!(queue.len(), 3);

    let order: Vec<JsValue> = queue
        .run(&resolver)
        .into_iter()
        .map(|r| r.unwrap().value)
        .collect();
    assert_eq!(
        order,
        vec![JsValue::str("first"), JsValue::str("second"), JsValue::str("late")]
    );
    assert_eq!(queue.now(), 30);
    assert!(queue.is_empty());
}

#[test]
fn test_failing_job_does_not_stop_the_queue() {
    let resolver = ContextResolver::strict();
    let mut queue = JobQueue::new();
    let id = queue.set_timeout(JsValue::Undefined, 0, vec![]);
    queue.set_timeout(echo_this(), 1, vec![]);

    let results = queue.run(&resolver);
    assert_eq!(results.len(), 2);
    let err = results[0].as_ref().unwrap_err();
    assert!(err.is_not_invocable());
    assert_eq!(err.call_site().unwrap().id, id);
    assert!(results[1].is_ok());
}

// ── Deferred method lookup ──────────────────────────────────────────

#[test]
fn test_scheduled_method_sees_slot_replaced_by_non_routine() {
    let resolver = ContextResolver::strict();
    let old = new_routine("old", |_frame, _args| Ok(JsValue::str("old")));
    let obj = object_from(vec![("m", JsValue::Object(old))]);

    let mut queue = JobQueue::new();
    let id = queue.enqueue(CallDescriptor::method(&obj, "m", vec![]), 10);
    set_property(&obj, "m", JsValue::str("not a function"));

    let results = queue.run(&resolver);
    let err = results[0].as_ref().unwrap_err();
    assert!(err.is_not_invocable());
    assert_eq!(err.call_site().unwrap().id, id);
}

#[test]
fn test_scheduled_method_runs_the_routine_in_the_slot_at_run_time() {
    let resolver = ContextResolver::strict();
    let old = new_routine("old", |_frame, _args| Ok(JsValue::str("old")));
    let obj = object_from(vec![("m", JsValue::Object(old))]);

    let mut queue = JobQueue::new();
    queue.enqueue(CallDescriptor::method(&obj, "m", vec![]), 10);
    let replacement = new_routine("new", |frame, _args| frame.get_field("name"));
    set_property(&obj, "m", JsValue::Object(replacement));
    set_property(&obj, "name", JsValue::str("receiver"));

    let results = queue.run(&resolver);
    let outcome = results[0].as_ref().unwrap();
    assert_eq!(outcome.value, JsValue::str("receiver"));
    assert_eq!(outcome.binding, ThisBinding::Object(obj));
}
