//! # Visit and Payment Stores
//!
//! The checkout flow reads visits and writes payments through these traits.
//! Persistence lives outside this crate; [`MemoryStore`] backs tests and the
//! command-line tool.
//!
//! ## Payment Write Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     record_payment()                                    │
//! │                                                                         │
//! │  1. Payment id must be a UUID            ── else Validation            │
//! │  2. Payment id must be new               ── else StorageFailed         │
//! │  3. Visit must not already have a payment ── else AlreadySettled       │
//! │  4. Append payment, mark visit Settled (one write lock)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use venue_core::validation::validate_uuid;
use venue_core::{PaymentRecord, Visit, VisitStatus};

use crate::error::{CheckoutError, CheckoutResult};

// =============================================================================
// Store Traits
// =============================================================================
//
// Implementations report a backend that cannot be reached (timeout, dropped
// connection) as `CheckoutError::StorageUnavailable`, which callers may retry,
// and a rejected operation as `CheckoutError::StorageFailed`, which they may not.

/// Read access to seated visits.
#[async_trait]
pub trait VisitStore: Send + Sync {
    /// Gets a visit by ID.
    async fn get_visit(&self, id: &str) -> CheckoutResult<Option<Visit>>;
}

/// Write access for confirmed payments.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Persists a confirmed payment and settles its visit.
    async fn record_payment(&self, payment: &PaymentRecord) -> CheckoutResult<()>;

    /// Lists payments recorded for a visit, oldest first.
    async fn payments_for(&self, visit_id: &str) -> CheckoutResult<Vec<PaymentRecord>>;
}

// =============================================================================
// In-Memory Store
// =============================================================================

#[derive(Debug, Default)]
struct Tables {
    visits: HashMap<String, Visit>,
    payments: Vec<PaymentRecord>,
}

/// Process-local store implementing both traits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a visit.
    pub async fn insert_visit(&self, visit: Visit) {
        debug!(id = %visit.id, plan = %visit.plan, "Inserting visit");
        let mut tables = self.tables.write().await;
        tables.visits.insert(visit.id.clone(), visit);
    }

    /// Returns the number of recorded payments.
    pub async fn payment_count(&self) -> usize {
        self.tables.read().await.payments.len()
    }
}

#[async_trait]
impl VisitStore for MemoryStore {
    async fn get_visit(&self, id: &str) -> CheckoutResult<Option<Visit>> {
        Ok(self.tables.read().await.visits.get(id).cloned())
    }
}

#[async_trait]
impl PaymentStore for MemoryStore {
    async fn record_payment(&self, payment: &PaymentRecord) -> CheckoutResult<()> {
        validate_uuid(&payment.id)?;

        let mut tables = self.tables.write().await;

        if tables.payments.iter().any(|p| p.id == payment.id) {
            return Err(CheckoutError::StorageFailed(format!(
                "payment {} already exists",
                payment.id
            )));
        }
        if tables.payments.iter().any(|p| p.visit_id == payment.visit_id) {
            return Err(CheckoutError::AlreadySettled(payment.visit_id.clone()));
        }

        debug!(
            id = %payment.id,
            visit_id = %payment.visit_id,
            amount = %payment.amount,
            "Inserting payment"
        );
        tables.payments.push(payment.clone());
        if let Some(visit) = tables.visits.get_mut(&payment.visit_id) {
            visit.status = VisitStatus::Settled;
        }

        Ok(())
    }

    async fn payments_for(&self, visit_id: &str) -> CheckoutResult<Vec<PaymentRecord>> {
        let tables = self.tables.read().await;
        Ok(tables
            .payments
            .iter()
            .filter(|p| p.visit_id == visit_id)
            .cloned()
            .collect())
    }
}
