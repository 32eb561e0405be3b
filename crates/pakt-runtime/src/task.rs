// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The task contract: a named, stateful unit of cooperative work.

use std::any::Any;

/// The lifecycle state of a task.
///
/// Normal path: `Free → Executing → Done`. Tasks that depend on another
/// task's completion may detour through `WaitOther` from either side.
/// `Done` is terminal; once the scheduler observes it, the task is queued
/// for removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// Created but not yet started.
    Free,
    /// Blocked on another task's completion; polled without consuming
    /// execution budget.
    WaitOther,
    /// Actively making progress.
    Executing,
    /// Finished. Terminal.
    Done,
}

/// Callback invoked by a task when it reaches [`TaskState::Done`],
/// receiving the task's result payload.
pub type TaskCompleted = Box<dyn FnMut(Option<&dyn Any>)>;

/// The completion-notification list registered against a task.
///
/// Duplicate-name submissions merge their completion interest here, so one
/// physical task can notify every caller that asked for it. The task itself
/// invokes the list on reaching `Done`; the scheduler only merges and
/// appends.
#[derive(Default)]
pub struct CompletionList {
    callbacks: Vec<TaskCompleted>,
}

impl CompletionList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one callback.
    pub fn push(&mut self, callback: TaskCompleted) {
        self.callbacks.push(callback);
    }

    /// Moves every callback out of `other` into this list.
    pub fn merge(&mut self, other: &mut CompletionList) {
        self.callbacks.append(&mut other.callbacks);
    }

    /// Invokes every registered callback with the given result payload.
    pub fn invoke(&mut self, payload: Option<&dyn Any>) {
        for callback in &mut self.callbacks {
            callback(payload);
        }
    }

    /// Returns the number of registered callbacks.
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Returns `true` if no callbacks are registered.
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl std::fmt::Debug for CompletionList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionList")
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

/// A named unit of asynchronous work advanced by the scheduler.
///
/// The scheduler knows nothing about a task beyond its name, its state, and
/// the two lifecycle hooks. A task representing external work (I/O,
/// network) must expose that as state transitions — `Executing` polled
/// until ready — rather than blocking inside [`Task::update`]. Cancellation,
/// if needed, is the task's own capability: observe a flag in `update` and
/// transition to `Done`.
pub trait Task {
    /// The unique name identifying this task within a scheduler.
    fn name(&self) -> &str;

    /// The task's current lifecycle state.
    fn state(&self) -> TaskState;

    /// One-time start hook, invoked when the scheduler first picks the task
    /// up in the `Free` state.
    fn execute(&mut self);

    /// Per-tick update hook.
    fn update(&mut self);

    /// Access to the task's completion-notification list.
    ///
    /// The scheduler uses this to merge duplicate-name submissions and to
    /// append completion interest from later callers.
    fn completed_mut(&mut self) -> &mut CompletionList;
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn completion_list_merge_moves_callbacks() {
        let fired = Rc::new(RefCell::new(0u32));

        let mut first = CompletionList::new();
        let mut second = CompletionList::new();
        for list in [&mut first, &mut second] {
            let fired = Rc::clone(&fired);
            list.push(Box::new(move |_| *fired.borrow_mut() += 1));
        }

        first.merge(&mut second);
        assert_eq!(first.len(), 2);
        assert!(second.is_empty());

        first.invoke(None);
        assert_eq!(*fired.borrow(), 2);
    }

    #[test]
    fn invoke_passes_the_payload_through() {
        let seen = Rc::new(RefCell::new(None));
        let mut list = CompletionList::new();
        {
            let seen = Rc::clone(&seen);
            list.push(Box::new(move |payload| {
                *seen.borrow_mut() = payload.and_then(|p| p.downcast_ref::<u32>()).copied();
            }));
        }

        let payload: u32 = 7;
        list.invoke(Some(&payload));
        assert_eq!(*seen.borrow(), Some(7));
    }
}
