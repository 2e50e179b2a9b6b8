//! Slot-based propagation of typed error diagnostics through nested scopes.
//!
//! A failure is signalled by a lightweight [`ErrorId`], a copyable integer
//! handle with no payload. Any caller up the stack can attach, inspect, or
//! consume richly-typed diagnostic data associated with that failure through
//! per-type [`Slot`]s, without the failure's origin knowing in advance which
//! diagnostic types its callers care about, and without the success path
//! paying for allocation or dispatch.
//!
//! Each submodule re-exports its public surface from here, so consumers can
//! depend on `error_relay::*` or pick focused pieces as needed.
//!
//! # Examples
//!
//! ## Attaching and reading diagnostics
//!
//! ```
//! use error_relay::{Attach, Context, ContextActivator, ExecContext};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct FailedQuery(&'static str);
//!
//! let cx = ExecContext::new();
//! let ctx: Context<(FailedQuery,)> = Context::new();
//!
//! let guard = ContextActivator::new(&cx, &ctx);
//! let id = cx.new_error_with(Attach(FailedQuery("SELECT 1")));
//! drop(guard);
//!
//! assert_eq!(ctx.slots().0.get(id), Some(FailedQuery("SELECT 1")));
//! ```
//!
//! ## Diagnostics climb to the nearest listener
//!
//! ```
//! use error_relay::{Attach, Context, ContextActivator, ExecContext, ScopeExit};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Stage(&'static str);
//!
//! let cx = ExecContext::new();
//! let outer: Context<(Stage,)> = Context::new();
//! let outer_guard = ContextActivator::new(&cx, &outer);
//!
//! let id = {
//!     let inner: Context<(Stage,)> = Context::new();
//!     let inner_guard = ContextActivator::new(&cx, &inner);
//!     let id = cx.new_error_with(Attach(Stage("decode")));
//!     // The inner scope exits because the error keeps propagating.
//!     inner_guard.finish(ScopeExit::Failure);
//!     id
//! };
//!
//! drop(outer_guard);
//! assert_eq!(outer.slots().0.get(id), Some(Stage("decode")));
//! ```
//!
//! ## Deferred and accumulated payloads
//!
//! ```
//! use error_relay::{Accum, Context, ContextActivator, ExecContext, Lazy};
//!
//! #[derive(Debug, Clone, Default, PartialEq)]
//! struct Trace(Vec<&'static str>);
//!
//! let cx = ExecContext::new();
//! let ctx: Context<(Trace,)> = Context::new();
//! let guard = ContextActivator::new(&cx, &ctx);
//!
//! let id = cx
//!     .new_error_with(Lazy(|| Trace(vec!["open"])))
//!     .accumulate(&cx, |t: &mut Trace| t.0.push("parse"));
//!
//! drop(guard);
//! assert_eq!(ctx.slots().0.get(id), Some(Trace(vec!["open", "parse"])));
//! ```
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

/// Identifier allocation and the per-execution-context state
pub mod exec;
/// Capture-site macros for minting annotated errors
pub mod macros;
/// Convenience re-exports for quick starts
pub mod prelude;
/// Listing of the diagnostics reachable for an identifier
pub mod report;
/// Core traits: diagnostic payloads, load dispatch, captured contexts
pub mod traits;
/// Core types: identifiers, slots, contexts, interop codes
pub mod types;

pub use exec::{allocate_next, ExecContext};
pub use report::{DiagnosticReport, ReportEntry};
pub use traits::{
    Accum, Attach, CapturedContext, Diagnostic, Lazy, LoadItem, SharedCapturedContext,
};
pub use types::{
    Context, ContextActivator, DiagnosticSet, Domain, ErrorCode, ErrorId, ScopeExit, Slot,
    SourceLocation, UnexpectedEntry, UnexpectedReport,
};
