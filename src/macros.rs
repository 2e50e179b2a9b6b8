//! Capture-site macros for minting annotated errors.
//!
//! - [`macro@crate::source_location`] - Captures the current file, line, and
//!   module path as a [`SourceLocation`](crate::SourceLocation) diagnostic.
//! - [`macro@crate::new_error`] - Mints a fresh identifier with the capture
//!   site attached, plus any further load items given.
//!
//! # Examples
//!
//! ```
//! use error_relay::{new_error, Attach, Context, ContextActivator, ExecContext, SourceLocation};
//!
//! let cx = ExecContext::new();
//! let ctx: Context<(SourceLocation, u32)> = Context::new();
//! let guard = ContextActivator::new(&cx, &ctx);
//!
//! let id = new_error!(&cx, Attach(404u32));
//!
//! drop(guard);
//! assert!(ctx.slots().0.has_value(id));
//! assert_eq!(ctx.slots().1.get(id), Some(404));
//! ```

/// Captures the current source position as a
/// [`SourceLocation`](crate::SourceLocation).
///
/// Expands to a constant expression built from `file!()`, `line!()`, and
/// `module_path!()`.
///
/// # Examples
///
/// ```
/// let loc = error_relay::source_location!();
/// assert!(loc.line > 0);
/// ```
#[macro_export]
macro_rules! source_location {
    () => {
        $crate::types::SourceLocation::new(file!(), line!(), module_path!())
    };
}

/// Mints a new error identifier with the capture site attached.
///
/// The first argument is the [`ExecContext`](crate::ExecContext); any further
/// arguments are load items ([`Attach`](crate::Attach), [`Lazy`](crate::Lazy),
/// [`Accum`](crate::Accum)) applied after the
/// [`SourceLocation`](crate::SourceLocation).
///
/// # Examples
///
/// ```
/// use error_relay::{new_error, ExecContext};
///
/// let cx = ExecContext::new();
/// let id = new_error!(&cx);
/// assert_eq!(cx.current_error(), id);
/// ```
#[macro_export]
macro_rules! new_error {
    ($cx:expr $(,)?) => {{
        let cx = $cx;
        cx.new_error_with($crate::Attach($crate::source_location!()))
    }};
    ($cx:expr, $($item:expr),+ $(,)?) => {{
        let cx = $cx;
        cx.new_error_with(($crate::Attach($crate::source_location!()), $($item),+))
    }};
}
