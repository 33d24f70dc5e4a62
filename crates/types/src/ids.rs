//! Newtype wrapper for page identifiers.
//!
//! Repeated pages carry a `-Rep<n>` suffix on their `ID` attribute. Keeping
//! the suffix handling on the type prevents callers from mixing up the
//! stored identifier with the identifier of the original page.

use std::fmt;
use std::sync::Arc;

const REP_MARKER: &str = "-Rep";

/// The `ID` attribute of a page.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct PageId(Arc<str>);

impl PageId {
    /// Creates a new PageId from a string
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation of this page ID
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The identifier without a trailing `-Rep<n>` suffix.
    ///
    /// Only a suffix made of the marker followed by at least one digit is
    /// removed; `"Intro-Report"` stays untouched.
    pub fn base(&self) -> &str {
        match self.0.rfind(REP_MARKER) {
            Some(pos) => {
                let digits = &self.0[pos + REP_MARKER.len()..];
                if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                    &self.0[..pos]
                } else {
                    &self.0
                }
            }
            None => &self.0,
        }
    }

    /// The identifier a repetition with number `rep` should carry.
    pub fn with_rep(&self, rep: u32) -> PageId {
        PageId::new(format!("{}{}{}", self.base(), REP_MARKER, rep))
    }
}

impl From<String> for PageId {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl From<&str> for PageId {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl AsRef<str> for PageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
