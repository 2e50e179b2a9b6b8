//! Per-type, per-scope diagnostic storage.
//!
//! A [`Slot<E>`] holds at most one value of its diagnostic type, tagged by the
//! [`ErrorId`] it belongs to. While active, slots of the same type form a
//! stack per execution context; a failure exit offers each slot's value to the
//! next outer slot of the same type, so diagnostics climb from the innermost
//! failing scope to the first outer scope that is listening.
//!
//! Slots are normally owned and driven by a [`Context`](crate::Context);
//! consumers interact with them through
//! [`Context::slots`](crate::Context::slots) after the scope has settled.
use core::any::Any;
use core::cell::{Cell, RefCell, RefMut};

use crate::exec::{ChainEntry, ExecContext};
use crate::traits::Diagnostic;
use crate::types::alloc_type::Rc;
use crate::types::ErrorId;

/// Storage cell shared between a [`Slot`] and the execution context's active
/// chain. Holds the raw identifier alongside the value; "empty" is distinct
/// from "holds a value for some other identifier".
pub(crate) struct SlotCell<E> {
    stored: Option<(u32, E)>,
}

impl<E> SlotCell<E> {
    pub(crate) const fn new() -> Self {
        Self { stored: None }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.stored.is_none()
    }

    pub(crate) fn put(&mut self, raw: u32, value: E) -> &mut E {
        &mut self.stored.insert((raw, value)).1
    }

    pub(crate) fn get(&self, raw: u32) -> Option<&E> {
        match &self.stored {
            Some((key, value)) if *key == raw => Some(value),
            _ => None,
        }
    }

    pub(crate) fn get_mut(&mut self, raw: u32) -> Option<&mut E> {
        match &mut self.stored {
            Some((key, value)) if *key == raw => Some(value),
            _ => None,
        }
    }

    pub(crate) fn take(&mut self, raw: u32) -> Option<E> {
        if matches!(&self.stored, Some((key, _)) if *key == raw) {
            self.stored.take().map(|(_, value)| value)
        } else {
            None
        }
    }

    pub(crate) fn take_any(&mut self) -> Option<(u32, E)> {
        self.stored.take()
    }

    pub(crate) fn replace_from(&mut self, moved: (u32, E)) {
        debug_assert!(self.stored.is_none());
        self.stored = Some(moved);
    }
}

/// Single-value storage for diagnostics of type `E`, keyed by [`ErrorId`].
///
/// A slot is either inactive or linked as the top of its type's active-slot
/// stack on one execution context. Activation and deactivation follow strict
/// stack discipline: every `activate` is matched by exactly one `deactivate`
/// on every exit path, and only the current top may deactivate.
pub struct Slot<E: Diagnostic> {
    cell: Rc<RefCell<SlotCell<E>>>,
    active: Cell<bool>,
}

impl<E: Diagnostic> Slot<E> {
    /// Creates an inactive, empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cell: Rc::new(RefCell::new(SlotCell::new())),
            active: Cell::new(false),
        }
    }

    /// `true` while this slot is linked into its type's active chain.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Links this slot as the new top of the type's active chain on `cx`.
    ///
    /// Must not be called on an already active slot.
    pub fn activate(&self, cx: &ExecContext) {
        debug_assert!(!self.active.get(), "slot activated twice");
        cx.chain_push::<E>(ChainEntry::for_cell(self.cell.clone()));
        self.active.set(true);
    }

    /// Unlinks this slot, restoring whatever was active before it.
    ///
    /// Must only be called on the current top of the chain.
    pub fn deactivate(&self, cx: &ExecContext) {
        debug_assert!(self.active.get(), "slot deactivated while inactive");
        let this: Rc<dyn Any> = self.cell.clone();
        cx.chain_pop::<E>(&this);
        self.active.set(false);
    }

    /// Moves the stored value toward the enclosing scope on a failure exit.
    ///
    /// Runs while this slot is still the top of its chain. If an outer slot of
    /// the same type exists and holds nothing, the value moves there (first
    /// writer wins, innermost takes precedence). A value with nowhere to go,
    /// because this was the outermost listener or the outer slot is already
    /// occupied, is recorded as an unexpected diagnostic. Either way the slot
    /// ends empty.
    pub fn propagate(&self, cx: &ExecContext) {
        debug_assert!(self.active.get(), "propagate on inactive slot");
        let this: Rc<dyn Any> = self.cell.clone();
        if let Some(prev) = cx.chain_prev_of_top::<E>(&this) {
            if let Some(prev) = prev.downcast_ref::<RefCell<SlotCell<E>>>() {
                let mut outer = prev.borrow_mut();
                if outer.is_empty() {
                    if let Some(moved) = self.cell.borrow_mut().take_any() {
                        outer.replace_from(moved);
                    }
                    return;
                }
            }
        }
        if let Some((_, value)) = self.cell.borrow_mut().take_any() {
            cx.record_unexpected::<E>(&value);
        }
    }

    /// Stores `value` for `id`, overwriting a value held for a different
    /// identifier, and returns a mutable borrow for in-place adjustment.
    ///
    /// `id` must be an allocated (non-zero, tagged) identifier.
    pub fn put(&self, id: ErrorId, value: E) -> RefMut<'_, E> {
        debug_assert!(!id.is_none(), "put with the no-error identifier");
        debug_assert_eq!(id.tag(), ErrorId::RESERVED_TAG);
        RefMut::map(self.cell.borrow_mut(), |cell| cell.put(id.value(), value))
    }

    /// `true` if the slot holds a value stored for exactly `id`.
    ///
    /// A value held for any other identifier reports absent, so diagnostics
    /// never leak across unrelated errors sharing a slot instance.
    #[must_use]
    pub fn has_value(&self, id: ErrorId) -> bool {
        self.cell.borrow().get(id.value()).is_some()
    }

    /// Borrows the value stored for `id`, if any, for the duration of `f`.
    pub fn with_value<R>(&self, id: ErrorId, f: impl FnOnce(&E) -> R) -> Option<R> {
        self.cell.borrow().get(id.value()).map(f)
    }

    /// Returns a copy of the value stored for `id`, if any.
    #[must_use]
    pub fn get(&self, id: ErrorId) -> Option<E>
    where
        E: Clone,
    {
        self.cell.borrow().get(id.value()).cloned()
    }

    /// Moves the value stored for `id` out of the slot, if any.
    #[must_use]
    pub fn take(&self, id: ErrorId) -> Option<E> {
        self.cell.borrow_mut().take(id.value())
    }
}

impl<E: Diagnostic> Default for Slot<E> {
    fn default() -> Self {
        Self::new()
    }
}
