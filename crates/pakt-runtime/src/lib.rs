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

//! Cooperative, budgeted task scheduling.
//!
//! The [`TaskScheduler`] owns a registry of named, stateful tasks and
//! advances them once per external tick under a fixed per-tick execution
//! budget. It is single-threaded by design: tasks representing long-running
//! external operations expose progress as state transitions and are polled,
//! never blocked on. The scheduler is an explicitly constructed,
//! caller-owned object — construct it at startup, tick it from the host
//! loop, drop it at shutdown.

pub mod error;
pub mod scheduler;
pub mod task;

pub use error::TaskError;
pub use scheduler::TaskScheduler;
pub use task::{CompletionList, Task, TaskCompleted, TaskState};
