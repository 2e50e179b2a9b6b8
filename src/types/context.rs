//! Scope-level grouping of diagnostic slots.
//!
//! A [`Context`] owns one [`Slot`] per diagnostic type its scope wants to
//! intercept and moves them through activation as a unit: all slots activate
//! in a fixed order on scope entry, and deactivate in reverse on scope exit.
//! The owning scope tells teardown *how* it is exiting through a
//! [`ScopeExit`] signal; a failure exit runs each slot's propagation step
//! right before the slot unlinks, so diagnostics climb to whatever outer
//! scope is listening.
//!
//! [`ContextActivator`] is the guard form: construction activates, drop
//! deactivates on every exit path, and [`mark_failure`](ContextActivator::mark_failure)
//! or [`finish`](ContextActivator::finish) records the exit signal.
//!
//! # Examples
//!
//! ```
//! use error_relay::{Attach, Context, ContextActivator, ExecContext, ScopeExit};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Endpoint(&'static str);
//!
//! let cx = ExecContext::new();
//! let ctx: Context<(Endpoint,)> = Context::new();
//!
//! let guard = ContextActivator::new(&cx, &ctx);
//! let id = cx.new_error_with(Attach(Endpoint("db-primary")));
//! drop(guard); // normal exit: this scope consumes the error itself
//!
//! assert_eq!(ctx.slots().0.get(id), Some(Endpoint("db-primary")));
//! ```
use core::cell::Cell;

use crate::exec::ExecContext;
use crate::traits::Diagnostic;
use crate::types::slot::Slot;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a scope is being left.
///
/// `Failure` marks an exit caused by a propagating error, the signal that
/// triggers slot propagation. Any control-flow mechanism can drive it: an
/// early return of an error value, a cooperative cancellation, or an explicit
/// jump; teardown never inspects the host's control flow on its own.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeExit {
    Normal,
    Failure,
}

/// A fixed set of diagnostic types a scope listens for.
///
/// Implemented for tuples of one through eight [`Diagnostic`] types. The
/// associated `Slots` tuple mirrors the set with one [`Slot`] per type;
/// activation walks it left to right, deactivation right to left.
pub trait DiagnosticSet {
    type Slots;

    fn new_slots() -> Self::Slots;
    fn activate_slots(slots: &Self::Slots, cx: &ExecContext);
    fn deactivate_slots(slots: &Self::Slots, cx: &ExecContext, exit: ScopeExit);
}

macro_rules! deactivate_in_reverse {
    ($cx:expr, $exit:expr;) => {};
    ($cx:expr, $exit:expr; $head:ident $(, $tail:ident)*) => {
        deactivate_in_reverse!($cx, $exit; $($tail),*);
        if $exit == ScopeExit::Failure {
            $head.propagate($cx);
        }
        $head.deactivate($cx);
    };
}

macro_rules! impl_diagnostic_set {
    ($($ty:ident),+) => {
        impl<$($ty: Diagnostic),+> DiagnosticSet for ($($ty,)+) {
            type Slots = ($(Slot<$ty>,)+);

            fn new_slots() -> Self::Slots {
                ($(Slot::<$ty>::new(),)+)
            }

            #[allow(non_snake_case)]
            fn activate_slots(slots: &Self::Slots, cx: &ExecContext) {
                let ($($ty,)+) = slots;
                $($ty.activate(cx);)+
            }

            #[allow(non_snake_case)]
            fn deactivate_slots(slots: &Self::Slots, cx: &ExecContext, exit: ScopeExit) {
                let ($($ty,)+) = slots;
                deactivate_in_reverse!(cx, exit; $($ty),+);
            }
        }
    };
}

impl_diagnostic_set!(E1);
impl_diagnostic_set!(E1, E2);
impl_diagnostic_set!(E1, E2, E3);
impl_diagnostic_set!(E1, E2, E3, E4);
impl_diagnostic_set!(E1, E2, E3, E4, E5);
impl_diagnostic_set!(E1, E2, E3, E4, E5, E6);
impl_diagnostic_set!(E1, E2, E3, E4, E5, E6, E7);
impl_diagnostic_set!(E1, E2, E3, E4, E5, E6, E7, E8);

/// Ownership group of slots for the diagnostic types in `S`.
///
/// A context is active for at most one nested scope at a time on its
/// execution context; activating an already-active context is a guarded
/// no-op, so recursive reentry degrades gracefully instead of corrupting the
/// slot stacks. Slot values survive deactivation, which is how the consumer
/// that finally handles the error reads them through [`slots`](Context::slots).
pub struct Context<S: DiagnosticSet> {
    slots: S::Slots,
    active: Cell<bool>,
}

impl<S: DiagnosticSet> Context<S> {
    /// Creates an inactive context with empty slots.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: S::new_slots(),
            active: Cell::new(false),
        }
    }

    /// `true` while this context's slots are linked into `cx`'s chains.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Activates every contained slot in declaration order.
    ///
    /// No-op if the context is already active.
    pub fn activate(&self, cx: &ExecContext) {
        if self.active.get() {
            return;
        }
        S::activate_slots(&self.slots, cx);
        self.active.set(true);
    }

    /// Deactivates every contained slot in reverse declaration order.
    ///
    /// On a [`ScopeExit::Failure`] exit each slot propagates immediately
    /// before it unlinks, while its link to the enclosing slot is still in
    /// place. No-op if the context is not active.
    pub fn deactivate(&self, cx: &ExecContext, exit: ScopeExit) {
        if !self.active.get() {
            return;
        }
        S::deactivate_slots(&self.slots, cx, exit);
        self.active.set(false);
    }

    /// The contained slots, for reading diagnostics out after the scope has
    /// settled.
    #[inline]
    pub fn slots(&self) -> &S::Slots {
        &self.slots
    }
}

impl<S: DiagnosticSet> Default for Context<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Guard tying a [`Context`]'s activation to a scope.
///
/// Construction activates the context unless it is already active, in which
/// case the guard is inert and the outer activation stays in charge. Dropping
/// the guard deactivates with the recorded exit signal, which defaults to
/// [`ScopeExit::Normal`]; call [`mark_failure`](Self::mark_failure) before
/// any early return that propagates an error, or hand the signal over
/// explicitly with [`finish`](Self::finish).
pub struct ContextActivator<'a, S: DiagnosticSet> {
    cx: &'a ExecContext,
    ctx: Option<&'a Context<S>>,
    exit: Cell<ScopeExit>,
}

impl<'a, S: DiagnosticSet> ContextActivator<'a, S> {
    #[must_use]
    pub fn new(cx: &'a ExecContext, ctx: &'a Context<S>) -> Self {
        let ctx = if ctx.is_active() {
            None
        } else {
            ctx.activate(cx);
            Some(ctx)
        };
        Self {
            cx,
            ctx,
            exit: Cell::new(ScopeExit::Normal),
        }
    }

    /// Records that the scope is exiting because of a propagating failure.
    pub fn mark_failure(&self) {
        self.exit.set(ScopeExit::Failure);
    }

    /// Consumes the guard, deactivating with an explicit exit signal.
    pub fn finish(self, exit: ScopeExit) {
        self.exit.set(exit);
    }
}

impl<S: DiagnosticSet> Drop for ContextActivator<'_, S> {
    fn drop(&mut self) {
        if let Some(ctx) = self.ctx {
            ctx.deactivate(self.cx, self.exit.get());
        }
    }
}
