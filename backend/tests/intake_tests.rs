//! Incoming shipment tests
//!
//! Tests for how a receive drains the shipment it accepts from: partial
//! accepts decrement the queue row, full accepts delete it, and a receive
//! can never take more than the shipment holds.

use proptest::prelude::*;

use wims_backend::error::AppError;
use wims_backend::services::ledger::{drain_outcome, DrainOutcome};

/// What a receive does to the shipment row it drains.
#[derive(Debug, PartialEq, Eq)]
enum QueueEffect {
    Deleted,
    Decremented { remaining: i32 },
}

/// Mirror of the receive's queue handling: an over-accept is a validation
/// failure on the requested quantity, caught before the shipment changes.
fn accept(shipment_quantity: i32, accepted: i32) -> Result<QueueEffect, AppError> {
    if accepted > shipment_quantity {
        return Err(AppError::validation(
            "quantity",
            format!(
                "Cannot accept {} from a shipment of {}",
                accepted, shipment_quantity
            ),
        ));
    }
    match drain_outcome(shipment_quantity, accepted)? {
        DrainOutcome::Emptied => Ok(QueueEffect::Deleted),
        DrainOutcome::Partial { remaining } => Ok(QueueEffect::Decremented { remaining }),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Accepting the whole shipment removes it from the queue.
    #[test]
    fn test_full_accept_deletes_shipment() {
        assert_eq!(accept(50, 50).unwrap(), QueueEffect::Deleted);
    }

    /// Accepting part of a shipment leaves the rest queued.
    #[test]
    fn test_partial_accept_decrements_shipment() {
        assert_eq!(
            accept(50, 20).unwrap(),
            QueueEffect::Decremented { remaining: 30 }
        );
    }

    /// Accepting more than was shipped fails validation before the queue
    /// changes.
    #[test]
    fn test_over_accept_rejected() {
        let err = accept(10, 15).unwrap_err();
        match err {
            AppError::Validation { field, .. } => assert_eq!(field, "quantity"),
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    /// A shipment can be worked down over several receives.
    #[test]
    fn test_shipment_drained_across_receives() {
        let mut remaining = 100;

        for accepted in [40, 35] {
            match accept(remaining, accepted).unwrap() {
                QueueEffect::Decremented { remaining: r } => remaining = r,
                QueueEffect::Deleted => remaining = 0,
            }
        }
        assert_eq!(remaining, 25);

        assert_eq!(accept(remaining, 25).unwrap(), QueueEffect::Deleted);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// The queue effect accounts for every accepted item: remaining
        /// plus accepted always equals the shipment quantity.
        #[test]
        fn prop_queue_effect_accounts_for_quantity(
            shipment in 1i32..1000,
            accepted in 1i32..1000
        ) {
            match accept(shipment, accepted) {
                Ok(QueueEffect::Deleted) => prop_assert_eq!(accepted, shipment),
                Ok(QueueEffect::Decremented { remaining }) => {
                    prop_assert_eq!(remaining + accepted, shipment);
                    prop_assert!(remaining > 0);
                }
                Err(AppError::Validation { ref field, .. }) => {
                    prop_assert_eq!(field, "quantity");
                    prop_assert!(accepted > shipment);
                }
                Err(other) => prop_assert!(false, "unexpected error: {:?}", other),
            }
        }

        /// Draining a shipment one accept at a time always ends with a
        /// delete, never a negative remainder.
        #[test]
        fn prop_shipment_never_negative(
            shipment in 1i32..200,
            accepts in prop::collection::vec(1i32..50, 1..20)
        ) {
            let mut remaining = shipment;

            for accepted in accepts {
                if remaining == 0 {
                    break;
                }
                match accept(remaining, accepted) {
                    Ok(QueueEffect::Deleted) => remaining = 0,
                    Ok(QueueEffect::Decremented { remaining: r }) => remaining = r,
                    Err(_) => {}
                }
                prop_assert!(remaining >= 0);
            }
        }
    }
}
