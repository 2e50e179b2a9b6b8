//! Human-readable listing of the diagnostics reachable for an identifier.
//!
//! This is deliberately thin glue over the slot machinery: a
//! [`DiagnosticReport`] snapshots whatever
//! [`ExecContext::diagnostics`](crate::ExecContext::diagnostics) could reach
//! at the moment it was built, rendered through each value's `Debug`
//! implementation. Richer presentation belongs to whatever sink finally
//! consumes the error.
use core::fmt;

use crate::types::alloc_type::{String, Vec};
use crate::types::ErrorId;

#[cfg(feature = "serde")]
use serde::Serialize;

/// One reachable diagnostic: its type name and `Debug` rendering.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    type_name: &'static str,
    rendered: String,
}

impl ReportEntry {
    pub(crate) fn new(type_name: &'static str, rendered: String) -> Self {
        Self { type_name, rendered }
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    pub fn rendered(&self) -> &str {
        &self.rendered
    }
}

/// Snapshot of every diagnostic reachable for one identifier.
///
/// Entries appear outermost first within each diagnostic type, mirroring
/// activation order of the slots that hold them.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticReport {
    id: ErrorId,
    entries: Vec<ReportEntry>,
}

impl DiagnosticReport {
    pub(crate) fn new(id: ErrorId, entries: Vec<ReportEntry>) -> Self {
        Self { id, entries }
    }

    /// The identifier this report describes.
    #[inline]
    #[must_use]
    pub fn id(&self) -> ErrorId {
        self.id
    }

    #[inline]
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for DiagnosticReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return write!(f, "error {}: no diagnostics reachable", self.id);
        }
        write!(f, "error {}:", self.id)?;
        for entry in &self.entries {
            write!(f, "\n  {}: {}", entry.type_name, entry.rendered)?;
        }
        Ok(())
    }
}
