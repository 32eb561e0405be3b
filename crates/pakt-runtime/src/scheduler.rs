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

//! The cooperative task scheduler.
//!
//! One [`TaskScheduler::update`] call is one tick. The live registry is
//! mutated only at well-defined points — pending adds are drained at tick
//! start, removals happen at tick end — so the main iteration walks a
//! registry that nothing else is touching. Submissions and removals landing
//! mid-tick wait in their queues until the next safe point.

use indexmap::IndexMap;

use crate::error::TaskError;
use crate::task::{Task, TaskCompleted, TaskState};

/// Default number of budget-consuming task advances per tick.
pub const DEFAULT_MAX_EXECUTE_COUNT: usize = 10;

/// Schedules named, stateful tasks under a per-tick execution budget.
///
/// Task names are unique within the live registry: re-adding a name that is
/// already live does not create a second task, it merges the new caller's
/// completion interest into the existing one. Tasks are advanced in
/// insertion order, at most `max_execute_count` budget-consuming advances
/// per tick; `WaitOther` tasks are polled for free so blocked tasks cannot
/// starve runnable ones.
pub struct TaskScheduler {
    /// Live tasks, iterated in insertion order.
    tasks: IndexMap<String, Box<dyn Task>>,
    /// Tasks submitted since the last tick, promoted at the next tick start.
    pending_add: Vec<Box<dyn Task>>,
    /// Names observed `Done` this tick, removed at tick end.
    pending_remove: Vec<String>,
    max_execute_count: usize,
}

impl TaskScheduler {
    /// Creates a scheduler with the default per-tick budget.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tasks: IndexMap::new(),
            pending_add: Vec::new(),
            pending_remove: Vec::new(),
            max_execute_count: DEFAULT_MAX_EXECUTE_COUNT,
        }
    }

    /// Overrides the per-tick execution budget.
    #[must_use]
    pub fn with_max_execute_count(mut self, max_execute_count: usize) -> Self {
        self.max_execute_count = max_execute_count;
        self
    }

    /// Returns the per-tick execution budget.
    #[must_use]
    pub fn max_execute_count(&self) -> usize {
        self.max_execute_count
    }

    /// Submits a task. It joins the live registry at the next tick; until
    /// then it is not visible to [`has_task`](Self::has_task) or the query
    /// methods.
    pub fn add_task(&mut self, task: impl Task + 'static) {
        self.pending_add.push(Box::new(task));
    }

    /// Returns `true` if a live task has the given name.
    #[must_use]
    pub fn has_task(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }

    /// Returns the number of live tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` if no tasks are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns the state of the named live task.
    ///
    /// # Errors
    /// [`TaskError::NotFound`] if no live task has the name — including a
    /// task still sitting in the pending-add queue.
    pub fn task_state(&self, name: &str) -> Result<TaskState, TaskError> {
        self.tasks
            .get(name)
            .map(|task| task.state())
            .ok_or_else(|| TaskError::NotFound {
                name: name.to_string(),
            })
    }

    /// Appends a completion callback to the named live task.
    ///
    /// # Errors
    /// [`TaskError::NotFound`] if no live task has the name. Completion
    /// interest for a task submitted this tick must travel with the task
    /// through [`add_task`](Self::add_task) instead.
    pub fn append_task_completed(
        &mut self,
        name: &str,
        callback: TaskCompleted,
    ) -> Result<(), TaskError> {
        let task = self.tasks.get_mut(name).ok_or_else(|| TaskError::NotFound {
            name: name.to_string(),
        })?;
        task.completed_mut().push(callback);
        Ok(())
    }

    /// Advances the scheduler by one tick.
    ///
    /// Drains the pending-add queue, walks the live registry in insertion
    /// order advancing tasks under the execution budget, then removes every
    /// task observed `Done`. A task observed `Done` this tick stays
    /// queryable until the removal at tick end, which is why completion has
    /// a one-tick removal latency from the caller's point of view.
    pub fn update(&mut self) {
        self.drain_pending_adds();

        let mut execute_count = 0;
        for (name, task) in self.tasks.iter_mut() {
            match task.state() {
                TaskState::Free => {
                    if execute_count < self.max_execute_count {
                        log::trace!("Starting task '{name}'");
                        task.execute();
                        task.update();
                        execute_count += 1;
                    }
                }
                TaskState::Executing => {
                    if execute_count < self.max_execute_count {
                        task.update();
                        execute_count += 1;
                    }
                }
                // Polling a blocked task is free: it must keep observing the
                // task it waits on even when the budget is spent.
                TaskState::WaitOther => {
                    task.update();
                }
                TaskState::Done => {
                    log::trace!("Task '{name}' done, queued for removal");
                    self.pending_remove.push(name.clone());
                }
            }
        }

        for name in self.pending_remove.drain(..) {
            self.tasks.shift_remove(&name);
        }
    }

    /// Promotes pending submissions into the live registry, merging
    /// duplicate names instead of inserting twice.
    fn drain_pending_adds(&mut self) {
        for mut task in self.pending_add.drain(..) {
            match self.tasks.get_mut(task.name()) {
                Some(existing) => {
                    log::trace!("Task '{}' already live, merging completion", task.name());
                    let incoming = task.completed_mut();
                    existing.completed_mut().merge(incoming);
                }
                None => {
                    let name = task.name().to_string();
                    self.tasks.insert(name, task);
                }
            }
        }
    }
}

impl Default for TaskScheduler {
    fn default() -> Self {
        Self::new()
    }
}
