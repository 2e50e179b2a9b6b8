//! Core traits of the diagnostic side channel.
//!
//! - [`Diagnostic`]: marker bound for storable payload types
//! - [`LoadItem`]: uniform dispatch for [`ErrorId::load`](crate::ErrorId::load)
//!   items, with the [`Attach`] / [`Lazy`] / [`Accum`] call-site modes
//! - [`CapturedContext`]: contract for replaying diagnostics across execution
//!   contexts

pub mod captured;
pub mod diagnostic;
pub mod load_item;

pub use captured::{CapturedContext, SharedCapturedContext};
pub use diagnostic::Diagnostic;
pub use load_item::{Accum, Attach, Lazy, LoadItem};
