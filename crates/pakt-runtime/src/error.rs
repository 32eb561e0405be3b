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

//! Defines the error type for scheduler queries.

use std::fmt;

/// A scheduler query against an unknown task name.
///
/// Querying state or appending completion interest for a name with no live
/// task is a caller error, surfaced instead of silently no-opping so
/// callers can detect submission races: a task sitting in the pending-add
/// queue is not live until the next tick, and completion interest for it
/// must go through `add_task`, never `append_task_completed`.
#[derive(Debug)]
pub enum TaskError {
    /// No live task has the given name.
    NotFound {
        /// The name that was queried.
        name: String,
    },
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskError::NotFound { name } => {
                write!(f, "No live task named '{name}'")
            }
        }
    }
}

impl std::error::Error for TaskError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_error_display() {
        let err = TaskError::NotFound {
            name: "load:a/x.bundle".to_string(),
        };
        assert_eq!(format!("{err}"), "No live task named 'load:a/x.bundle'");
    }
}
