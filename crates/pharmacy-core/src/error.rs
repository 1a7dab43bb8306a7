//! Pharmacy error types.

use thiserror::Error;

/// Errors that can occur in inventory, cart and persistence operations.
///
/// A failed operation never leaves partial changes behind: the state is
/// exactly what it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PharmacyError {
    /// Attempted to take a unit of a product with zero stock.
    #[error("No more {0} in stock.")]
    OutOfStock(String),

    /// Product is not part of the catalog.
    #[error("{0} not found in stock.")]
    UnknownProduct(String),

    /// Checkout requested with nothing in the cart.
    #[error("Cart is empty, nothing to bill")]
    EmptyCart,

    /// Invalid catalog or configuration data.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Arithmetic overflow in a stock counter or money amount.
    #[error("Arithmetic overflow")]
    Overflow,

    /// Storage could not be read or written.
    #[error("I/O error: {0}")]
    Io(String),

    /// Snapshot could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PharmacyError {
    /// Whether the error is an operator-facing notice rather than a fault.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PharmacyError::OutOfStock(_) | PharmacyError::UnknownProduct(_) | PharmacyError::EmptyCart
        )
    }
}

impl From<std::io::Error> for PharmacyError {
    fn from(e: std::io::Error) -> Self {
        PharmacyError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for PharmacyError {
    fn from(e: serde_json::Error) -> Self {
        PharmacyError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_operator_notices() {
        let err = PharmacyError::OutOfStock("Paracetamol".to_string());
        assert_eq!(err.to_string(), "No more Paracetamol in stock.");

        let err = PharmacyError::UnknownProduct("Aspirin".to_string());
        assert_eq!(err.to_string(), "Aspirin not found in stock.");
    }

    #[test]
    fn test_recoverable_kinds() {
        assert!(PharmacyError::OutOfStock("x".into()).is_recoverable());
        assert!(PharmacyError::UnknownProduct("x".into()).is_recoverable());
        assert!(PharmacyError::EmptyCart.is_recoverable());
        assert!(!PharmacyError::Io("disk full".into()).is_recoverable());
        assert!(!PharmacyError::Overflow.is_recoverable());
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: PharmacyError = io.into();
        assert!(matches!(err, PharmacyError::Io(msg) if msg.contains("denied")));
    }
}
