//! Uniform dispatch for attaching diagnostics to an error identifier.
//!
//! A [`LoadItem`] is anything that [`ErrorId::load`](crate::ErrorId::load)
//! accepts. Three wrapper types name the storage mode at the call site:
//!
//! - [`Attach`] stores a concrete value verbatim.
//! - [`Lazy`] defers construction to a zero-argument closure, invoked only
//!   when the identifier actually denotes an error.
//! - [`Accum`] applies a closure to the value already stored for the
//!   identifier, or to a freshly default-constructed one.
//!
//! Tuples of items (up to eight) are applied left to right; each item is
//! independent, so there is no atomicity across a batch.
//!
//! # Examples
//!
//! ```
//! use error_relay::{Accum, Attach, Context, ContextActivator, ExecContext, Lazy};
//!
//! #[derive(Debug, Clone, PartialEq, Default)]
//! struct Attempts(Vec<&'static str>);
//!
//! let cx = ExecContext::new();
//! let ctx: Context<(Attempts, u32)> = Context::new();
//! let guard = ContextActivator::new(&cx, &ctx);
//!
//! let id = cx.new_error_with((
//!     Attach(503u32),
//!     Lazy(|| Attempts(vec!["primary"])),
//!     Accum(|a: &mut Attempts| a.0.push("replica")),
//! ));
//!
//! drop(guard);
//! assert_eq!(ctx.slots().1.get(id), Some(503));
//! assert_eq!(ctx.slots().0.get(id), Some(Attempts(vec!["primary", "replica"])));
//! ```
use crate::exec::ExecContext;
use crate::traits::Diagnostic;
use crate::types::ErrorId;

/// One diagnostic payload (or a tuple of them) routed by
/// [`ErrorId::load`](crate::ErrorId::load).
///
/// Callers never invoke [`load_into`](LoadItem::load_into) directly; the
/// identifier's `load` entry point skips dispatch entirely for
/// [`ErrorId::NONE`], which is what keeps the success path free.
pub trait LoadItem {
    /// Routes this item to the slot machinery for `id`.
    ///
    /// `id` is guaranteed non-zero by the caller.
    fn load_into(self, cx: &ExecContext, id: ErrorId);
}

/// Stores a concrete diagnostic value verbatim.
#[repr(transparent)]
pub struct Attach<E>(pub E);

impl<E: Diagnostic> LoadItem for Attach<E> {
    #[inline]
    fn load_into(self, cx: &ExecContext, id: ErrorId) {
        cx.load_slot(id, self.0);
    }
}

/// Defers diagnostic construction until a failure is being annotated.
///
/// The closure runs at most once, and never for a success identifier.
#[repr(transparent)]
pub struct Lazy<F>(pub F);

impl<E, F> LoadItem for Lazy<F>
where
    E: Diagnostic,
    F: FnOnce() -> E,
{
    #[inline]
    fn load_into(self, cx: &ExecContext, id: ErrorId) {
        cx.load_slot(id, (self.0)());
    }
}

/// Mutates the diagnostic already stored for the identifier in place.
///
/// If the listening slot holds nothing for this identifier yet, the closure
/// runs against a default-constructed value which is then stored. Useful for
/// "append one more step to a running trace" updates without a read-then-write
/// round trip.
#[repr(transparent)]
pub struct Accum<F>(pub F);

impl<E, F> LoadItem for Accum<F>
where
    E: Diagnostic + Default,
    F: FnOnce(&mut E),
{
    #[inline]
    fn load_into(self, cx: &ExecContext, id: ErrorId) {
        cx.accumulate_slot(id, self.0);
    }
}

impl LoadItem for () {
    #[inline]
    fn load_into(self, _cx: &ExecContext, _id: ErrorId) {}
}

macro_rules! impl_load_item_tuple {
    ($($item:ident),+) => {
        impl<$($item: LoadItem),+> LoadItem for ($($item,)+) {
            #[inline]
            #[allow(non_snake_case)]
            fn load_into(self, cx: &ExecContext, id: ErrorId) {
                let ($($item,)+) = self;
                $($item.load_into(cx, id);)+
            }
        }
    };
}

impl ErrorId {
    /// Attaches `items` to this identifier and returns it unchanged.
    ///
    /// A no-op for [`ErrorId::NONE`]: nothing is stored, producers are never
    /// invoked, and the success path stays free of allocation and dispatch.
    /// Items are applied in the order given, each independently; a panic
    /// mid-batch leaves a partially annotated error, which is acceptable
    /// because annotating an already-failed operation cannot itself fail it.
    #[inline]
    pub fn load<I: LoadItem>(self, cx: &ExecContext, items: I) -> Self {
        if !self.is_none() {
            items.load_into(cx, self);
        }
        self
    }

    /// Stores one concrete diagnostic value. Shorthand for
    /// `load(cx, Attach(value))`.
    #[inline]
    pub fn attach<E: Diagnostic>(self, cx: &ExecContext, value: E) -> Self {
        self.load(cx, Attach(value))
    }

    /// Stores the diagnostic produced by `f`, invoking `f` only when this
    /// identifier denotes an error. Shorthand for `load(cx, Lazy(f))`.
    #[inline]
    pub fn attach_with<E, F>(self, cx: &ExecContext, f: F) -> Self
    where
        E: Diagnostic,
        F: FnOnce() -> E,
    {
        self.load(cx, Lazy(f))
    }

    /// Adjusts the stored diagnostic for this identifier in place. Shorthand
    /// for `load(cx, Accum(f))`.
    #[inline]
    pub fn accumulate<E, F>(self, cx: &ExecContext, f: F) -> Self
    where
        E: Diagnostic + Default,
        F: FnOnce(&mut E),
    {
        self.load(cx, Accum(f))
    }
}

impl_load_item_tuple!(I1);
impl_load_item_tuple!(I1, I2);
impl_load_item_tuple!(I1, I2, I3);
impl_load_item_tuple!(I1, I2, I3, I4);
impl_load_item_tuple!(I1, I2, I3, I4, I5);
impl_load_item_tuple!(I1, I2, I3, I4, I5, I6);
impl_load_item_tuple!(I1, I2, I3, I4, I5, I6, I7);
impl_load_item_tuple!(I1, I2, I3, I4, I5, I6, I7, I8);
