//! Contract for transporting an error's diagnostics across execution contexts.
//!
//! A captured context retains the diagnostics of a failed operation so they
//! can be replayed into whatever context is listening on a different thread
//! of control, typically a worker handing a failure back to its coordinator.
//! This crate consumes the contract; it does not ship an implementation.
use core::fmt;

use crate::exec::ExecContext;
use crate::types::alloc_type::Arc;
use crate::types::{ErrorId, ScopeExit};

/// Operations a captured context must expose.
///
/// Ownership is shared: any number of holders may reference one captured
/// context through [`SharedCapturedContext`], and it is destroyed when the
/// last reference drops. After a cross-context handoff the holder on the
/// target context is the single writer; replaying mutates only the target
/// context's slots.
pub trait CapturedContext {
    /// Replays the retained diagnostics into the slots currently active on
    /// `cx`, returning the identifier they belong to.
    fn replay_into_current(&self, cx: &ExecContext) -> ErrorId;

    /// Activates the captured slots on `cx`.
    fn activate(&self, cx: &ExecContext);

    /// Deactivates the captured slots, propagating on a failure exit.
    fn deactivate(&self, cx: &ExecContext, exit: ScopeExit);

    /// `true` while this is the active context for the calling scope.
    fn is_active(&self) -> bool;

    /// Writes a human-readable listing of the retained diagnostics.
    fn fmt_diagnostics(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

/// Reference-counted handle to a captured context.
pub type SharedCapturedContext = Arc<dyn CapturedContext>;
