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

use satchel_core::lane::LaneReport;
use std::fmt;

/// The reports of every lane of one run, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// One report per executed lane.
    pub reports: Vec<LaneReport>,
}

impl RunSummary {
    /// Total bundle and group writes.
    pub fn tags_written(&self) -> usize {
        self.reports.iter().map(LaneReport::tags_written).sum()
    }

    /// Total tags cleared by the reset lane.
    pub fn tags_cleared(&self) -> usize {
        self.reports.iter().map(|r| r.tags_cleared).sum()
    }

    /// Total roots and assets skipped.
    pub fn skipped(&self) -> usize {
        self.reports.iter().map(LaneReport::skipped).sum()
    }

    /// Total dependencies escalated to a shared bundle.
    pub fn escalations(&self) -> usize {
        self.reports.iter().map(|r| r.escalations).sum()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for report in &self.reports {
            writeln!(f, "{report}")?;
        }
        write!(
            f,
            "total: cleared={} written={} shared={} skipped={}",
            self.tags_cleared(),
            self.tags_written(),
            self.escalations(),
            self.skipped()
        )
    }
}
