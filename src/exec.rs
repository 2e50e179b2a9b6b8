//! Identifier allocation and the per-execution-context state.
//!
//! Exactly one piece of state is shared process-wide: the atomic counter that
//! mints [`ErrorId`]s. Everything else, from the ambient "current error" to
//! the per-type active-slot chains, lives in an [`ExecContext`] that is
//! passed explicitly to every operation. One
//! `ExecContext` serves one thread of control; the type is neither `Send` nor
//! `Sync`, which turns the single-owner contract into a compile-time fact
//! instead of a convention.
//!
//! # Examples
//!
//! ```
//! use error_relay::ExecContext;
//!
//! let cx = ExecContext::new();
//! assert!(cx.current_error().is_none());
//!
//! let id = cx.new_error();
//! assert_eq!(cx.current_error(), id);
//! ```
use core::any::{type_name, Any, TypeId};
use core::cell::{Cell, RefCell};
use core::fmt;
use core::sync::atomic::{AtomicU32, Ordering};

#[cfg(not(feature = "std"))]
use alloc::format;

use crate::report::{DiagnosticReport, ReportEntry};
use crate::traits::{Diagnostic, LoadItem};
use crate::types::alloc_type::{BTreeMap, Rc, String, Vec};
use crate::types::slot::SlotCell;
use crate::types::unexpected::UnexpectedTracker;
use crate::types::{EntryVec, ErrorId, UnexpectedReport};

/// Seed chosen so the first allocation wraps to raw value `1`, and every
/// subsequent one stays congruent to the reserved tag modulo the stride.
const ID_COUNTER_SEED: u32 = u32::MAX - 2;

static ID_COUNTER: AtomicU32 = AtomicU32::new(ID_COUNTER_SEED);

/// Mints the next process-wide unique identifier.
///
/// Safe under concurrent callers; the counter is the only shared state in the
/// crate and advances with a single relaxed atomic add. Sequence values are
/// unique for the process lifetime; a process that allocates more than 2^30
/// identifiers wraps the counter and may observe reuse, which is an accepted
/// limitation rather than an error.
///
/// Does not touch any execution context's "current error"; that is
/// [`ExecContext::new_error`]'s job.
#[must_use]
pub fn allocate_next() -> ErrorId {
    let raw = ID_COUNTER
        .fetch_add(ErrorId::TAG_STRIDE, Ordering::Relaxed)
        .wrapping_add(ErrorId::TAG_STRIDE);
    ErrorId::from_raw(raw)
}

/// One entry in a type's active-slot chain: the shared storage cell plus the
/// monomorphized hooks that let type-erased code name and render it.
pub(crate) struct ChainEntry {
    cell: Rc<dyn Any>,
    type_name: &'static str,
    render: fn(&dyn Any, u32) -> Option<String>,
}

impl ChainEntry {
    pub(crate) fn for_cell<E: Diagnostic>(cell: Rc<RefCell<SlotCell<E>>>) -> Self {
        Self {
            cell,
            type_name: type_name::<E>(),
            render: render_cell::<E>,
        }
    }
}

fn render_cell<E: Diagnostic>(cell: &dyn Any, raw: u32) -> Option<String> {
    let cell = cell.downcast_ref::<RefCell<SlotCell<E>>>()?;
    let guard = cell.borrow();
    guard.get(raw).map(|value| format!("{value:?}"))
}

type Chain = EntryVec<ChainEntry>;

/// Per-thread-of-control home of the diagnostic side channel.
///
/// Owns the most recently minted identifier on this context's call path and
/// one active-slot stack per diagnostic type. All operations are synchronous,
/// bounded-time, and allocation-free on the success path; the only allocation
/// a failure pays for is the diagnostic payload itself.
///
/// `ExecContext` is deliberately `!Send + !Sync`. Hand a
/// [`SharedCapturedContext`](crate::SharedCapturedContext) across threads
/// instead of the context itself.
pub struct ExecContext {
    current_id: Cell<u32>,
    chains: RefCell<BTreeMap<TypeId, Chain>>,
    unexpected: RefCell<UnexpectedTracker>,
}

impl ExecContext {
    /// Creates a fresh context with no current error and no active slots.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current_id: Cell::new(0),
            chains: RefCell::new(BTreeMap::new()),
            unexpected: RefCell::new(UnexpectedTracker::new()),
        }
    }

    /// Mints a new identifier and records it as this context's current error.
    ///
    /// The returned identifier is always non-zero.
    #[must_use]
    pub fn new_error(&self) -> ErrorId {
        let id = allocate_next();
        self.current_id.set(id.value());
        #[cfg(feature = "tracing")]
        tracing::trace!(id = id.value(), "allocated error id");
        id
    }

    /// Mints a new identifier and attaches `items` to it in one step.
    #[must_use]
    pub fn new_error_with<I: LoadItem>(&self, items: I) -> ErrorId {
        self.new_error().load(self, items)
    }

    /// The identifier most recently minted on this context's call path, or
    /// [`ErrorId::NONE`] when nothing is propagating.
    ///
    /// Lets a failure site annotate "whatever error is presently unwinding"
    /// without threading the handle through every signature.
    #[must_use]
    pub fn current_error(&self) -> ErrorId {
        ErrorId::from_raw(self.current_id.get())
    }

    /// Overwrites this context's current identifier.
    ///
    /// Used when an error is transported in from elsewhere, for example by a
    /// captured context replaying a worker's failure.
    pub fn set_current(&self, id: ErrorId) {
        self.current_id.set(id.value());
    }

    /// Switches accumulation of rendered unexpected-diagnostic details on or
    /// off. The count and first-type tracking are always maintained.
    pub fn set_collect_unexpected(&self, collect: bool) {
        self.unexpected.borrow_mut().set_collect(collect);
    }

    /// Snapshot of the unexpected-diagnostic accounting so far.
    #[must_use]
    pub fn unexpected_report(&self) -> UnexpectedReport {
        self.unexpected.borrow().snapshot()
    }

    /// Returns the unexpected-diagnostic accounting and resets it.
    #[must_use]
    pub fn take_unexpected_report(&self) -> UnexpectedReport {
        self.unexpected.borrow_mut().take()
    }

    /// Lists every diagnostic currently reachable for `id` across this
    /// context's active slots, outermost first within each type.
    #[must_use]
    pub fn diagnostics(&self, id: ErrorId) -> DiagnosticReport {
        let mut entries = Vec::new();
        if !id.is_none() {
            let chains = self.chains.borrow();
            for chain in chains.values() {
                for entry in chain.iter() {
                    if let Some(rendered) = (entry.render)(entry.cell.as_ref(), id.value()) {
                        entries.push(ReportEntry::new(entry.type_name, rendered));
                    }
                }
            }
        }
        DiagnosticReport::new(id, entries)
    }

    /// Stores `value` in the top active slot for its type, if one exists;
    /// otherwise records it as unexpected.
    pub(crate) fn load_slot<E: Diagnostic>(&self, id: ErrorId, value: E) {
        debug_assert!(!id.is_none(), "load dispatched for the no-error identifier");
        debug_assert_eq!(id.tag(), ErrorId::RESERVED_TAG);
        match self.chain_top(TypeId::of::<E>()) {
            Some(cell) => {
                if let Some(cell) = cell.downcast_ref::<RefCell<SlotCell<E>>>() {
                    cell.borrow_mut().put(id.value(), value);
                }
            }
            None => self.record_unexpected::<E>(&value),
        }
    }

    /// Applies `f` to the value the top active slot holds for `id`, or to a
    /// freshly default-constructed value that is then stored. With no active
    /// slot for the type, the accumulator is dropped without running.
    ///
    /// `f` must not load diagnostics of the same type back into this context;
    /// the slot is borrowed for the duration of the call.
    pub(crate) fn accumulate_slot<E: Diagnostic + Default>(
        &self,
        id: ErrorId,
        f: impl FnOnce(&mut E),
    ) {
        debug_assert!(!id.is_none(), "accumulate dispatched for the no-error identifier");
        debug_assert_eq!(id.tag(), ErrorId::RESERVED_TAG);
        let Some(cell) = self.chain_top(TypeId::of::<E>()) else {
            return;
        };
        let Some(cell) = cell.downcast_ref::<RefCell<SlotCell<E>>>() else {
            return;
        };
        let mut guard = cell.borrow_mut();
        match guard.get_mut(id.value()) {
            Some(value) => f(value),
            None => f(guard.put(id.value(), E::default())),
        }
    }

    pub(crate) fn record_unexpected<E: Diagnostic>(&self, value: &E) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            diagnostic = type_name::<E>(),
            "dropped diagnostic with nothing listening"
        );
        self.unexpected
            .borrow_mut()
            .record(type_name::<E>(), || format!("{value:?}"));
    }

    pub(crate) fn chain_push<E: Diagnostic>(&self, entry: ChainEntry) {
        self.chains
            .borrow_mut()
            .entry(TypeId::of::<E>())
            .or_default()
            .push(entry);
    }

    pub(crate) fn chain_pop<E: Diagnostic>(&self, cell: &Rc<dyn Any>) {
        let mut chains = self.chains.borrow_mut();
        let type_id = TypeId::of::<E>();
        match chains.get_mut(&type_id) {
            Some(chain) => {
                let popped = chain.pop();
                debug_assert!(
                    matches!(&popped, Some(entry) if Rc::ptr_eq(&entry.cell, cell)),
                    "slot deactivated out of stack order"
                );
                let _ = popped;
                if chain.is_empty() {
                    chains.remove(&type_id);
                }
            }
            None => debug_assert!(false, "slot deactivated with no active chain"),
        }
    }

    /// The chain entry directly below `top`, which must be the current top of
    /// its type's chain. `None` when `top` is the outermost listener.
    pub(crate) fn chain_prev_of_top<E: Diagnostic>(&self, top: &Rc<dyn Any>) -> Option<Rc<dyn Any>> {
        let chains = self.chains.borrow();
        let chain = chains.get(&TypeId::of::<E>())?;
        debug_assert!(
            matches!(chain.last(), Some(entry) if Rc::ptr_eq(&entry.cell, top)),
            "propagate on a slot that is not the chain top"
        );
        if chain.len() >= 2 {
            Some(chain[chain.len() - 2].cell.clone())
        } else {
            None
        }
    }

    fn chain_top(&self, type_id: TypeId) -> Option<Rc<dyn Any>> {
        let chains = self.chains.borrow();
        chains
            .get(&type_id)
            .and_then(|chain| chain.last())
            .map(|entry| entry.cell.clone())
    }
}

impl Default for ExecContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ExecContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecContext")
            .field("current", &self.current_id.get())
            .field("active_types", &self.chains.borrow().len())
            .field("unexpected", &self.unexpected.borrow().snapshot().count())
            .finish()
    }
}
