//! Capture-site diagnostic recording where an error was minted.
use core::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

/// File, line, and module path of the point that raised an error.
///
/// Usually produced by the [`source_location!`](crate::source_location) or
/// [`new_error!`](crate::new_error) macros rather than written out by hand.
///
/// # Examples
///
/// ```
/// use error_relay::{source_location, SourceLocation};
///
/// let loc: SourceLocation = source_location!();
/// assert!(loc.file.ends_with(".rs"));
/// ```
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub file: &'static str,
    pub line: u32,
    pub module: &'static str,
}

impl SourceLocation {
    #[inline]
    pub const fn new(file: &'static str, line: u32, module: &'static str) -> Self {
        Self { file, line, module }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} in {}", self.file, self.line, self.module)
    }
}
