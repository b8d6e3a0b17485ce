//! Deferred callbacks, the `setTimeout` of this runtime.
//!
//! Time is virtual: `run` drains the queue in due-time order without sleeping.
//! A callback keeps only the routine value it was given, so `obj.method` passed
//! as a callback runs as a plain call and loses `obj` as its context.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use uuid::Uuid;

use crate::runner::ds::value::JsValue;
use crate::runner::eval::resolver::ContextResolver;
use crate::runner::eval::types::{CallDescriptor, CallResult};

struct Job {
    due: u64,
    seq: u64,
    descriptor: CallDescriptor,
}
impl PartialEq for Job {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}
impl Eq for Job {}
impl PartialOrd for Job {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Job {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

pub struct JobQueue {
    now: u64,
    next_seq: u64,
    jobs: BinaryHeap<Reverse<Job>>,
}

impl JobQueue {
    pub fn new() -> Self {
        JobQueue {
            now: 0,
            next_seq: 0,
            jobs: BinaryHeap::new(),
        }
    }

    /// Schedules `routine(args)` as a plain call `delay_ms` from now.
    pub fn set_timeout(
        &mut self,
        routine: impl Into<JsValue>,
        delay_ms: u64,
        args: Vec<JsValue>,
    ) -> Uuid {
        self.enqueue(CallDescriptor::plain(routine, args), delay_ms)
    }

    /// Schedules an arbitrary descriptor. Use an explicit-bind descriptor to keep
    /// a context across the deferral. A method-form descriptor reads its
    /// receiver's slot when the job runs, not when it is scheduled.
    pub fn enqueue(&mut self, descriptor: CallDescriptor, delay_ms: u64) -> Uuid {
        let id = descriptor.id();
        let due = self.now.saturating_add(delay_ms);
        tracing::debug!("scheduled '{}' [{}] at t={}ms", descriptor.label(), id, due);
        self.jobs.push(Reverse(Job {
            due,
            seq: self.next_seq,
            descriptor,
        }));
        self.next_seq += 1;
        id
    }

    /// Virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Runs every pending job, earliest first, ties in scheduling order. A
    /// failing job does not stop the ones after it.
    pub fn run(&mut self, resolver: &ContextResolver) -> Vec<CallResult> {
        let mut results = Vec::with_capacity(self.jobs.len());
        while let Some(Reverse(job)) = self.jobs.pop() {
            self.now = self.now.max(job.due);
            results.push(resolver.invoke(job.descriptor));
        }
        results
    }
}
impl Default for JobQueue {
    fn default() -> Self {
        Self::new()
    }
}
