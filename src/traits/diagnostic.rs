//! Marker bound for values that can ride the diagnostic side channel.
use core::any::Any;
use core::fmt::Debug;

/// Types storable in a [`Slot`](crate::Slot) and attachable to an
/// [`ErrorId`](crate::ErrorId).
///
/// Blanket-implemented for every `'static` type with a `Debug`
/// representation, so ordinary structs and enums qualify by deriving `Debug`.
/// The `Debug` bound is what lets unexpected-diagnostic tracking and
/// [`DiagnosticReport`](crate::DiagnosticReport) render values they were never
/// told the concrete type of.
///
/// # Examples
///
/// ```
/// #[derive(Debug)]
/// struct FailedQuery(String);
///
/// fn assert_diagnostic<E: error_relay::Diagnostic>() {}
/// assert_diagnostic::<FailedQuery>();
/// ```
pub trait Diagnostic: Any + Debug {}

impl<T: Any + Debug> Diagnostic for T {}
