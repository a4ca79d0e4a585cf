//! Page identifier type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies a page in a reference string.
///
/// Page identifiers are positive integers; zero never names a page.
///
/// # Example
/// ```
/// use pagesim::PageId;
///
/// let page_id = PageId::new(42);
/// assert_eq!(page_id.0, 42);
/// assert_eq!(PageId::from_raw(7), Some(PageId::new(7)));
/// assert_eq!(PageId::from_raw(0), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(pub u64);

impl PageId {
    /// Create a new PageId.
    #[inline]
    pub fn new(id: u64) -> Self {
        PageId(id)
    }

    /// Convert an untrusted integer into a page id.
    ///
    /// Returns `None` for zero and negative values.
    pub fn from_raw(value: i64) -> Option<Self> {
        match u64::try_from(value) {
            Ok(0) | Err(_) => None,
            Ok(id) => Some(PageId(id)),
        }
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
