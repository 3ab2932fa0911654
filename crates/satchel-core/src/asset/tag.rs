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

use serde::{Deserialize, Serialize};
use std::fmt;

/// A write-once tag value stored on an asset.
///
/// A tag is either unset or holds a non-empty string. Once set, it can only be
/// changed by [`clear`](Tag::clear)ing it first: every assignment goes through
/// [`set_if_unset`](Tag::set_if_unset), which gives the packaging passes their
/// first-writer-wins behaviour.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub struct Tag(Option<String>);

impl Tag {
    /// Creates an unset tag.
    pub const fn unset() -> Self {
        Self(None)
    }

    /// Returns the current value, if any.
    pub fn get(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Returns `true` if the tag holds a value.
    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }

    /// Stores `value` if the tag is currently unset and `value` is not empty.
    ///
    /// Returns `true` if the tag was written.
    pub fn set_if_unset(&mut self, value: impl Into<String>) -> bool {
        if self.0.is_some() {
            return false;
        }
        let value = value.into();
        if value.is_empty() {
            return false;
        }
        self.0 = Some(value);
        true
    }

    /// Unsets the tag. Returns `true` if a value was removed.
    pub fn clear(&mut self) -> bool {
        self.0.take().is_some()
    }
}

impl From<Option<String>> for Tag {
    fn from(value: Option<String>) -> Self {
        Self(value.filter(|v| !v.is_empty()))
    }
}

impl From<Tag> for Option<String> {
    fn from(value: Tag) -> Self {
        value.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(value) => f.write_str(value),
            None => f.write_str("<unset>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_writer_wins() {
        let mut tag = Tag::unset();
        assert!(tag.set_if_unset("Hero"));
        assert!(!tag.set_if_unset("UI-share"));
        assert_eq!(tag.get(), Some("Hero"));
    }

    #[test]
    fn empty_values_are_never_stored() {
        let mut tag = Tag::unset();
        assert!(!tag.set_if_unset(""));
        assert!(!tag.is_set());
        assert_eq!(Tag::from(Some(String::new())), Tag::unset());
    }

    #[test]
    fn clear_reopens_the_tag() {
        let mut tag = Tag::from(Some("A".to_string()));
        assert!(tag.clear());
        assert!(!tag.clear());
        assert!(tag.set_if_unset("B"));
        assert_eq!(tag.to_string(), "B");
    }
}
