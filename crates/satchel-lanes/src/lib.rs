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

//! # Satchel Lanes
//!
//! The strategies of the packaging pipeline. Each lane is a small, stateless
//! unit configured once and executed against an
//! [`AssetDatabase`](satchel_core::index::AssetDatabase):
//!
//! - [`TagResetLane`] clears every tag under the managed areas.
//! - [`IndependentPartitionLane`] packs every dependency with its root.
//! - [`SharedPartitionLane`] consolidates dependencies used by several roots
//!   into one shared bundle per directory.

pub mod assigner;
pub mod classifier;
pub mod ownership;
pub mod partition;
pub mod reset;

pub use assigner::{Assignment, BundleAssigner};
pub use classifier::{AssetClassifier, Exclusion};
pub use ownership::{OwnershipRecord, OwnershipTracker};
pub use partition::{
    IndependentPartitionLane, PartitionError, PartitionLane, SharedPartitionLane,
};
pub use reset::TagResetLane;
