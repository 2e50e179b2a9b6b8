//! Convenience re-exports for common usage patterns.
//!
//! Import everything with:
//!
//! ```
//! use error_relay::prelude::*;
//! ```
//!
//! # What's Included
//!
//! - **Context plumbing**: [`ExecContext`], [`Context`], [`ContextActivator`],
//!   [`ScopeExit`]
//! - **Identifiers and payloads**: [`ErrorId`], [`Slot`], [`Diagnostic`],
//!   [`SourceLocation`]
//! - **Load items**: [`Attach`], [`Lazy`], [`Accum`], [`LoadItem`]
//! - **Interop**: [`Domain`], [`ErrorCode`], [`CapturedContext`],
//!   [`SharedCapturedContext`]
//!
//! # Examples
//!
//! ```
//! use error_relay::prelude::*;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct FailedPath(&'static str);
//!
//! fn read_settings(cx: &ExecContext) -> Result<(), ErrorId> {
//!     Err(cx.new_error_with(Attach(FailedPath("settings.toml"))))
//! }
//!
//! let cx = ExecContext::new();
//! let ctx: Context<(FailedPath,)> = Context::new();
//! let guard = ContextActivator::new(&cx, &ctx);
//!
//! let id = read_settings(&cx).unwrap_err();
//! drop(guard);
//!
//! assert_eq!(ctx.slots().0.get(id), Some(FailedPath("settings.toml")));
//! ```

pub use crate::exec::{allocate_next, ExecContext};
pub use crate::report::DiagnosticReport;
pub use crate::traits::{
    Accum, Attach, CapturedContext, Diagnostic, Lazy, LoadItem, SharedCapturedContext,
};
pub use crate::types::{
    Context, ContextActivator, DiagnosticSet, Domain, ErrorCode, ErrorId, ScopeExit, Slot,
    SourceLocation, UnexpectedReport,
};
