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

//! The parameters handed to the external bundle compiler after tagging.
//!
//! Compilation itself happens outside of this workspace. The request only
//! records what the user asked for: the target platform, whether a player
//! executable should be produced, and two option bitmasks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The platform bundles are compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Platform {
    /// Android devices.
    #[default]
    Android,
    /// iOS devices.
    Ios,
    /// Desktop builds.
    Pc,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Android => write!(f, "Android"),
            Platform::Ios => write!(f, "IOS"),
            Platform::Pc => write!(f, "PC"),
        }
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "android" => Ok(Platform::Android),
            "ios" => Ok(Platform::Ios),
            "pc" => Ok(Platform::Pc),
            other => Err(format!("unknown platform '{other}'")),
        }
    }
}

macro_rules! option_flags {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$flag_meta:meta])* $flag:ident = $bit:expr, $label:literal; )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name {
            bits: u32,
        }

        impl $name {
            /// No option set.
            pub const NONE: Self = Self { bits: 0 };
            $( $(#[$flag_meta])* pub const $flag: Self = Self { bits: $bit }; )*

            const NAMED: &'static [(&'static str, Self)] = &[ $( ($label, Self::$flag), )* ];

            /// Creates a set of options from raw bits.
            pub const fn from_bits(bits: u32) -> Self {
                Self { bits }
            }

            /// Returns the raw bits.
            pub const fn bits(&self) -> u32 {
                self.bits
            }

            /// Combines two sets of options.
            pub const fn union(self, other: Self) -> Self {
                Self {
                    bits: self.bits | other.bits,
                }
            }

            /// Checks if all options of `other` are set.
            pub const fn contains(&self, other: Self) -> bool {
                (self.bits & other.bits) == other.bits
            }

            /// Checks if no option is set.
            pub const fn is_empty(&self) -> bool {
                self.bits == 0
            }

            /// Looks up a single option by its kebab-case name.
            pub fn from_name(name: &str) -> Option<Self> {
                Self::NAMED
                    .iter()
                    .find(|(label, _)| label.eq_ignore_ascii_case(name))
                    .map(|(_, flag)| *flag)
            }

            /// Returns the names of every option that is set.
            pub fn names(&self) -> Vec<&'static str> {
                Self::NAMED
                    .iter()
                    .filter(|(_, flag)| self.contains(*flag))
                    .map(|(label, _)| *label)
                    .collect()
            }
        }

        impl std::ops::BitOr for $name {
            type Output = Self;

            fn bitor(self, rhs: Self) -> Self::Output {
                self.union(rhs)
            }
        }

        impl std::ops::BitOrAssign for $name {
            fn bitor_assign(&mut self, rhs: Self) {
                *self = self.union(rhs);
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let names = self.names();
                if names.is_empty() {
                    write!(f, "none")
                } else {
                    write!(f, "{}", names.join("|"))
                }
            }
        }
    };
}

option_flags! {
    /// Options for building the player executable.
    BuildOptions {
        /// Development build.
        DEVELOPMENT = 1 << 0, "development";
        /// Run the player after building it.
        AUTO_RUN_PLAYER = 1 << 2, "auto-run-player";
        /// Reveal the built player in the file browser.
        SHOW_BUILT_PLAYER = 1 << 3, "show-built-player";
        /// Auto-connect the profiler to the player.
        CONNECT_WITH_PROFILER = 1 << 8, "connect-with-profiler";
        /// Allow script debuggers to attach.
        ALLOW_DEBUGGING = 1 << 9, "allow-debugging";
        /// Build scripts only.
        BUILD_SCRIPTS_ONLY = 1 << 15, "build-scripts-only";
    }
}

option_flags! {
    /// Options for compiling the asset bundles.
    BundleOptions {
        /// Skip compression entirely.
        UNCOMPRESSED = 1 << 0, "uncompressed";
        /// Do not embed type information.
        DISABLE_WRITE_TYPE_TREE = 1 << 3, "disable-write-type-tree";
        /// Rebuild bundles even if nothing changed.
        FORCE_REBUILD = 1 << 5, "force-rebuild";
        /// Ignore type tree changes for incremental checks.
        IGNORE_TYPE_TREE_CHANGES = 1 << 6, "ignore-type-tree-changes";
        /// Append the content hash to each bundle name.
        APPEND_HASH = 1 << 7, "append-hash";
        /// Use chunk-based (LZ4) compression.
        CHUNK_BASED_COMPRESSION = 1 << 8, "chunk-based-compression";
        /// Fail the build on any error.
        STRICT_MODE = 1 << 9, "strict-mode";
        /// Report what would be built without writing bundles.
        DRY_RUN = 1 << 10, "dry-run";
    }
}

/// Everything the external compilation step needs to start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRequest {
    /// The target platform.
    pub platform: Platform,
    /// Whether a player executable should be built as well.
    pub build_exe: bool,
    /// Player build options.
    pub build_options: BuildOptions,
    /// Bundle compilation options.
    pub bundle_options: BundleOptions,
}

impl Default for BuildRequest {
    fn default() -> Self {
        Self {
            platform: Platform::default(),
            build_exe: false,
            build_options: BuildOptions::DEVELOPMENT | BuildOptions::ALLOW_DEBUGGING,
            bundle_options: BundleOptions::NONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_request_is_a_debuggable_development_build() {
        let request = BuildRequest::default();
        assert!(request.build_options.contains(BuildOptions::DEVELOPMENT));
        assert!(request.build_options.contains(BuildOptions::ALLOW_DEBUGGING));
        assert!(request.bundle_options.is_empty());
        assert!(!request.build_exe);
    }

    #[test]
    fn options_lookup_by_name() {
        let mut options = BundleOptions::NONE;
        options |= BundleOptions::from_name("chunk-based-compression").unwrap();
        options |= BundleOptions::from_name("STRICT-MODE").unwrap();
        assert_eq!(options.bits(), (1 << 8) | (1 << 9));
        assert_eq!(options.to_string(), "chunk-based-compression|strict-mode");
        assert!(BundleOptions::from_name("zip").is_none());
        assert_eq!(BundleOptions::NONE.to_string(), "none");
    }

    #[test]
    fn platform_parsing() {
        assert_eq!("iOS".parse::<Platform>(), Ok(Platform::Ios));
        assert!("switch".parse::<Platform>().is_err());
        assert_eq!(Platform::Pc.to_string(), "PC");
    }

    #[test]
    fn options_serialize_as_bits() {
        let json = serde_json::to_string(&(BuildOptions::DEVELOPMENT | BuildOptions::ALLOW_DEBUGGING)).unwrap();
        assert_eq!(json, "513");
    }
}
