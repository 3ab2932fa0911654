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

//! Acts as the **[A]gent** for the tagging subsystem.
//!
//! This module sequences the lanes of a packaging run. Reset always completes
//! before any partition lane starts, the independent directory is processed
//! before the shared ones, and the index is saved once at the end.

mod agent;
mod handoff;
mod summary;

pub use agent::TaggingAgent;
pub use handoff::BuildHandoff;
pub use summary::RunSummary;
