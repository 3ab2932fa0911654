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

//! # Satchel Agents
//!
//! Agents own the order in which lanes run. The [`TaggingAgent`] is the only
//! one: it clears the managed areas, partitions every configured directory
//! and hands the resulting manifest to a [`BuildHandoff`].

#![warn(missing_docs)]

pub mod tagging_agent;

pub use tagging_agent::{BuildHandoff, RunSummary, TaggingAgent};
