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

use satchel_core::build::BuildRequest;
use satchel_io::BundleManifest;

/// The external step that compiles bundles and packages the executable.
///
/// Implementations receive the tagging decisions of a completed run. Nothing
/// is compiled in-process.
pub trait BuildHandoff {
    /// Hands the build parameters and the bundle manifest over.
    fn hand_off(
        &mut self,
        request: &BuildRequest,
        manifest: &BundleManifest,
    ) -> anyhow::Result<()>;
}
