//! Register of open host security issues.

use tracing::debug;

use bulwark_core::{SecurityIssue, Status};

/// Open issues reported by the last system scan.
#[derive(Debug, Clone, Default)]
pub struct IssueRegister {
    issues: Vec<SecurityIssue>,
}

impl IssueRegister {
    /// Empty register
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every issue with a fresh scan result
    pub fn replace(&mut self, issues: Vec<SecurityIssue>) {
        self.issues = issues;
    }

    /// Remove the issue with `id` and return the re-derived status.
    ///
    /// Returns `None`, leaving the register untouched, for unknown ids.
    pub fn resolve(&mut self, id: &str) -> Option<Status> {
        let before = self.issues.len();
        self.issues.retain(|issue| issue.id != id);
        if self.issues.len() == before {
            debug!(id, "no open issue with this id");
            return None;
        }
        Some(self.status())
    }

    /// Open issues
    #[must_use]
    pub fn issues(&self) -> &[SecurityIssue] {
        &self.issues
    }

    /// Severity roll-up over the open issues
    #[must_use]
    pub fn status(&self) -> Status {
        Status::worst_of(self.issues.iter().map(|i| i.severity))
    }
}
