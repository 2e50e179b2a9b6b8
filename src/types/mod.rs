//! Core types of the diagnostic side channel.
//!
//! # Examples
//!
//! ```
//! use error_relay::{Attach, Context, ContextActivator, ExecContext, ScopeExit};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct FailedHost(&'static str);
//!
//! let cx = ExecContext::new();
//! let outer: Context<(FailedHost,)> = Context::new();
//! let outer_guard = ContextActivator::new(&cx, &outer);
//!
//! let id = {
//!     let inner: Context<(FailedHost,)> = Context::new();
//!     let inner_guard = ContextActivator::new(&cx, &inner);
//!     let id = cx.new_error_with(Attach(FailedHost("10.0.0.7")));
//!     inner_guard.finish(ScopeExit::Failure); // failure exit: value climbs out
//!     id
//! };
//!
//! drop(outer_guard);
//! assert_eq!(outer.slots().0.get(id), Some(FailedHost("10.0.0.7")));
//! ```
use smallvec::SmallVec;

pub mod alloc_type;
pub mod context;
pub mod error_code;
pub mod error_id;
pub mod slot;
pub mod source_location;
pub mod unexpected;

pub use context::{Context, ContextActivator, DiagnosticSet, ScopeExit};
pub use error_code::{Domain, ErrorCode};
pub use error_id::ErrorId;
pub use slot::Slot;
pub use source_location::SourceLocation;
pub use unexpected::{UnexpectedEntry, UnexpectedReport};

/// SmallVec-backed collection used where a handful of entries is the norm.
///
/// Inline storage keeps the common one-or-two-element case off the heap.
pub type EntryVec<T> = SmallVec<[T; 2]>;
