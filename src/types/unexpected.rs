//! Accounting for diagnostics nobody was listening for.
//!
//! A diagnostic is *unexpected* when it is written for an identifier but no
//! slot of its type can receive it: either nothing was listening at load
//! time, or a failure exit found every outer slot missing or already
//! occupied. Such values are counted rather than silently discarded, so
//! operators can detect "nobody was listening for this" without crashing.
use core::fmt;

use crate::types::alloc_type::{BTreeSet, String, Vec};

#[cfg(feature = "serde")]
use serde::Serialize;

/// One rendered unexpected diagnostic (first occurrence of its type).
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnexpectedEntry {
    type_name: &'static str,
    rendered: String,
}

impl UnexpectedEntry {
    /// Type name of the dropped diagnostic.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Debug rendering captured when the value was dropped.
    #[inline]
    pub fn rendered(&self) -> &str {
        &self.rendered
    }
}

/// Snapshot of an execution context's unexpected-diagnostic accounting.
///
/// The count and the first type seen are always maintained; the per-type
/// rendered entries are only populated while detail collection is switched on
/// via [`ExecContext::set_collect_unexpected`](crate::ExecContext::set_collect_unexpected).
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnexpectedReport {
    count: u32,
    first_type: Option<&'static str>,
    entries: Vec<UnexpectedEntry>,
}

impl UnexpectedReport {
    /// Total number of unexpected diagnostics recorded.
    #[inline]
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Type name of the first unexpected diagnostic seen, if any.
    #[inline]
    #[must_use]
    pub fn first_type(&self) -> Option<&'static str> {
        self.first_type
    }

    /// Rendered entries, one per diagnostic type, in first-seen order.
    ///
    /// Empty unless detail collection was enabled when the values arrived.
    #[inline]
    pub fn entries(&self) -> &[UnexpectedEntry] {
        &self.entries
    }

    /// `true` when nothing unexpected was recorded.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl fmt::Display for UnexpectedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.count, self.first_type) {
            (0, _) | (_, None) => write!(f, "no unexpected diagnostics")?,
            (1, Some(first)) => write!(
                f,
                "detected 1 attempt to communicate an unexpected diagnostic of type {first}"
            )?,
            (n, Some(first)) => write!(
                f,
                "detected {n} attempts to communicate unexpected diagnostics, \
                 the first one of type {first}"
            )?,
        }
        for entry in &self.entries {
            write!(f, "\n  {}: {}", entry.type_name, entry.rendered)?;
        }
        Ok(())
    }
}

/// Mutable tracker owned by the execution context.
pub(crate) struct UnexpectedTracker {
    count: u32,
    first_type: Option<&'static str>,
    collect: bool,
    seen: BTreeSet<&'static str>,
    entries: Vec<UnexpectedEntry>,
}

impl UnexpectedTracker {
    pub(crate) const fn new() -> Self {
        Self {
            count: 0,
            first_type: None,
            collect: false,
            seen: BTreeSet::new(),
            entries: Vec::new(),
        }
    }

    pub(crate) fn set_collect(&mut self, collect: bool) {
        self.collect = collect;
    }

    pub(crate) fn record(
        &mut self,
        type_name: &'static str,
        render: impl FnOnce() -> String,
    ) {
        self.count = self.count.saturating_add(1);
        if self.first_type.is_none() {
            self.first_type = Some(type_name);
        }
        if self.collect && self.seen.insert(type_name) {
            self.entries.push(UnexpectedEntry {
                type_name,
                rendered: render(),
            });
        }
    }

    pub(crate) fn snapshot(&self) -> UnexpectedReport {
        UnexpectedReport {
            count: self.count,
            first_type: self.first_type,
            entries: self.entries.clone(),
        }
    }

    pub(crate) fn take(&mut self) -> UnexpectedReport {
        let report = self.snapshot();
        self.count = 0;
        self.first_type = None;
        self.seen.clear();
        self.entries.clear();
        report
    }
}
