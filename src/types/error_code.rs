//! Interop with flat `(domain, code)` error representations.
//!
//! An [`ErrorCode`] pairs a small integer with a [`Domain`] marker compared
//! by identity, the shape foreign subsystems usually traffic in. Identifiers
//! minted here round-trip through the crate's own domain bit-identically;
//! codes from any other domain are imported by minting a fresh identifier and
//! attaching the original code as an ordinary diagnostic, so foreign errors
//! become first class without losing information.
//!
//! # Examples
//!
//! ```
//! use error_relay::{Domain, ErrorCode, ErrorId, ExecContext};
//!
//! let cx = ExecContext::new();
//! let id = cx.new_error();
//!
//! // Round trip through the native domain is exact.
//! assert_eq!(ErrorId::from_code(&cx, id.to_code()), id);
//!
//! // A foreign code becomes a brand-new identifier.
//! static POSIX: Domain = Domain::new("posix");
//! let imported = ErrorId::from_code(&cx, ErrorCode::new(13, &POSIX));
//! assert_ne!(imported, id);
//! assert!(!imported.is_none());
//! ```
use core::fmt;
use core::ptr;

use crate::exec::ExecContext;
use crate::types::ErrorId;

/// Namespace marker for [`ErrorCode`] values.
///
/// Domains are compared by reference identity, not by name, so declare each
/// one as a `static` and hand out `&'static` references to it. Two domains
/// with the same name are still distinct domains.
#[derive(Debug)]
pub struct Domain {
    name: &'static str,
}

impl Domain {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// The domain of identifiers minted by this crate.
static NATIVE_DOMAIN: Domain = Domain::new("error-relay");

/// A small integer error code qualified by its [`Domain`].
#[derive(Clone, Copy)]
pub struct ErrorCode {
    value: u32,
    domain: &'static Domain,
}

impl ErrorCode {
    #[must_use]
    pub const fn new(value: u32, domain: &'static Domain) -> Self {
        Self { value, domain }
    }

    #[inline]
    #[must_use]
    pub fn value(self) -> u32 {
        self.value
    }

    #[inline]
    #[must_use]
    pub fn domain(self) -> &'static Domain {
        self.domain
    }

    /// `true` when this code carries an identifier minted by this crate.
    #[must_use]
    pub fn is_native(self) -> bool {
        let native = ptr::eq(self.domain, &NATIVE_DOMAIN);
        debug_assert!(
            !native || self.value == 0 || self.value & ErrorId::TAG_MASK == ErrorId::RESERVED_TAG
        );
        native
    }
}

impl PartialEq for ErrorCode {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && ptr::eq(self.domain, other.domain)
    }
}

impl Eq for ErrorCode {}

impl fmt::Debug for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorCode")
            .field("value", &self.value)
            .field("domain", &self.domain.name)
            .finish()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.domain.name, self.value)
    }
}

impl ErrorId {
    /// Converts this identifier into a code tagged with the crate's own
    /// domain. [`from_code`](ErrorId::from_code) recovers it exactly.
    #[must_use]
    pub fn to_code(self) -> ErrorCode {
        ErrorCode::new(self.value(), &NATIVE_DOMAIN)
    }

    /// Recovers an identifier from a `(domain, code)` pair.
    ///
    /// A zero value maps to [`ErrorId::NONE`] regardless of domain. A native
    /// code converts back bit-identically. A foreign code mints a new
    /// identifier, records it as `cx`'s current error, and attaches the
    /// foreign [`ErrorCode`] itself as a diagnostic reachable through the
    /// normal slot mechanism.
    #[must_use]
    pub fn from_code(cx: &ExecContext, code: ErrorCode) -> ErrorId {
        if code.value() == 0 {
            ErrorId::NONE
        } else if code.is_native() {
            ErrorId::from_raw(code.value())
        } else {
            cx.new_error().attach(cx, code)
        }
    }
}
