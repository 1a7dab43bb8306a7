//! Newtype identifiers.
//!
//! Products are keyed by name, so the name itself is the identifier.
//! Wrapping it keeps product names from being confused with free text
//! such as descriptions.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Macro to generate string-backed newtype IDs.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Unique product name; the catalog key.
    ProductName
);
define_id!(
    /// Identifier printed on a generated bill.
    BillId
);

impl BillId {
    /// Generate a new bill number from the current time and a process-local sequence.
    pub fn generate() -> Self {
        use std::sync::atomic::{AtomicU32, Ordering};

        static SEQUENCE: AtomicU32 = AtomicU32::new(1);

        let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
        let stamp = chrono::Utc::now().format("%Y%m%d-%H%M%S");
        Self(format!("BILL-{}-{:04}", stamp, seq))
    }
}
