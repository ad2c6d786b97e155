//! # Checkout Service
//!
//! Turns a seated visit into a quote, and a staff-confirmed quote into a
//! payment record.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Checkout Flow                                   │
//! │                                                                         │
//! │  Staff Action           Service Call            Effect                  │
//! │  ────────────           ────────────            ──────                  │
//! │                                                                         │
//! │  Open bill ───────────► preview(visit, now) ──► Quote (nothing written) │
//! │                                                                         │
//! │  Take payment ────────► confirm(visit, now,  ─► re-quote                │
//! │                           tender)                check expected total   │
//! │                                                  check cash covers it   │
//! │                                                  record_payment()       │
//! │                                                                         │
//! │  A party still seated is priced up to `as_of`; a checked-out party is   │
//! │  priced up to its recorded check-out time.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;
use venue_core::validation::{validate_notes, validate_payment_amount, validate_visit_id};
use venue_core::{Money, PaymentMethod, PaymentRecord, Quote, ValidationError, Visit};

use crate::error::{CheckoutError, CheckoutResult};
use crate::store::{PaymentStore, VisitStore};
use crate::tariff::TariffHandle;

// =============================================================================
// Request / Response Types
// =============================================================================

/// How the guest is paying, as entered by staff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tender {
    pub method: PaymentMethod,

    /// Cash handed over. Required for cash, ignored for card.
    #[serde(default)]
    pub cash_received: Option<Money>,

    /// The total staff showed the guest. When set, confirmation fails if
    /// the fresh quote differs.
    #[serde(default)]
    pub expected_total: Option<Money>,

    #[serde(default)]
    pub notes: Option<String>,
}

impl Tender {
    /// Cash payment with the amount handed over.
    pub fn cash(received: Money) -> Self {
        Tender {
            method: PaymentMethod::Cash,
            cash_received: Some(received),
            expected_total: None,
            notes: None,
        }
    }

    /// Card payment on the external terminal.
    pub fn card() -> Self {
        Tender {
            method: PaymentMethod::ExternalCard,
            cash_received: None,
            expected_total: None,
            notes: None,
        }
    }

    pub fn with_expected_total(mut self, total: Money) -> Self {
        self.expected_total = Some(total);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// A quote shown to staff before payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutPreview {
    pub visit_id: String,
    /// The time the session was priced up to.
    pub priced_until: DateTime<Utc>,
    pub quote: Quote,
}

// =============================================================================
// Checkout Service
// =============================================================================

/// Coordinates the quotation engine with the visit and payment stores.
#[derive(Clone)]
pub struct CheckoutService {
    tariff: TariffHandle,
    visits: Arc<dyn VisitStore>,
    payments: Arc<dyn PaymentStore>,
}

impl CheckoutService {
    pub fn new(
        tariff: TariffHandle,
        visits: Arc<dyn VisitStore>,
        payments: Arc<dyn PaymentStore>,
    ) -> Self {
        CheckoutService {
            tariff,
            visits,
            payments,
        }
    }

    /// Returns the shared tariff handle.
    pub fn tariff(&self) -> &TariffHandle {
        &self.tariff
    }

    /// Prices an open visit without writing anything.
    pub async fn preview(&self, visit_id: &str, as_of: DateTime<Utc>) -> CheckoutResult<CheckoutPreview> {
        debug!(visit_id = %visit_id, "preview checkout");

        let visit = self.open_visit(visit_id).await?;
        let input = visit.session_input(as_of);
        let quote = self.tariff.quote(&input)?;

        debug!(
            visit_id = %visit_id,
            plan = %quote.plan,
            elapsed_minutes = quote.elapsed_minutes,
            total = %quote.total,
            "Checkout previewed"
        );

        Ok(CheckoutPreview {
            visit_id: visit.id,
            priced_until: input.end_at,
            quote,
        })
    }

    /// Re-prices the visit and records the payment.
    ///
    /// Exactly one payment record is written on success; nothing is written
    /// on error.
    pub async fn confirm(
        &self,
        visit_id: &str,
        as_of: DateTime<Utc>,
        tender: Tender,
    ) -> CheckoutResult<PaymentRecord> {
        debug!(visit_id = %visit_id, method = ?tender.method, "confirm checkout");

        let visit = self.open_visit(visit_id).await?;
        let quote = self.tariff.quote(&visit.session_input(as_of))?;

        if let Some(expected) = tender.expected_total {
            if expected != quote.total {
                return Err(CheckoutError::QuoteChanged {
                    expected,
                    actual: quote.total,
                });
            }
        }

        let (cash_received, change_amount) = settle_tender(&tender, quote.total)?;
        let notes = validate_notes(tender.notes.as_deref())?;

        let payment = PaymentRecord {
            id: Uuid::new_v4().to_string(),
            visit_id: visit.id,
            method: tender.method,
            amount: quote.total,
            cash_received,
            change_amount,
            notes,
            quote,
            created_at: Utc::now(),
        };

        self.payments.record_payment(&payment).await?;

        info!(
            visit_id = %payment.visit_id,
            payment_id = %payment.id,
            method = ?payment.method,
            amount = %payment.amount,
            change = %change_amount.unwrap_or_default(),
            "Payment recorded"
        );

        Ok(payment)
    }

    /// Loads a visit that can still be checked out.
    async fn open_visit(&self, visit_id: &str) -> CheckoutResult<Visit> {
        validate_visit_id(visit_id)?;

        let visit = self
            .visits
            .get_visit(visit_id)
            .await?
            .ok_or_else(|| CheckoutError::VisitNotFound(visit_id.to_string()))?;

        if visit.is_settled() || !self.payments.payments_for(visit_id).await?.is_empty() {
            return Err(CheckoutError::AlreadySettled(visit_id.to_string()));
        }

        Ok(visit)
    }
}

/// Returns `(cash_received, change)` for the tender.
fn settle_tender(tender: &Tender, total: Money) -> CheckoutResult<(Option<Money>, Option<Money>)> {
    match tender.method {
        PaymentMethod::ExternalCard => Ok((None, None)),
        PaymentMethod::Cash => {
            let received = tender.cash_received.ok_or_else(|| ValidationError::Required {
                field: "cashReceived".to_string(),
            })?;
            validate_payment_amount(received)?;

            if received < total {
                return Err(CheckoutError::InsufficientCash { total, received });
            }
            Ok((Some(received), Some(received - total)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cash_change() {
        let (received, change) =
            settle_tender(&Tender::cash(Money::from_yen(5000)), Money::from_yen(4800)).unwrap();
        assert_eq!(received, Some(Money::from_yen(5000)));
        assert_eq!(change, Some(Money::from_yen(200)));
    }

    #[test]
    fn test_exact_cash_has_zero_change() {
        let (_, change) =
            settle_tender(&Tender::cash(Money::from_yen(3600)), Money::from_yen(3600)).unwrap();
        assert_eq!(change, Some(Money::zero()));
    }

    #[test]
    fn test_short_cash_is_rejected() {
        let err = settle_tender(&Tender::cash(Money::from_yen(3000)), Money::from_yen(3600))
            .unwrap_err();
        assert!(matches!(err, CheckoutError::InsufficientCash { .. }));
    }

    #[test]
    fn test_cash_requires_amount() {
        let tender = Tender {
            cash_received: None,
            ..Tender::cash(Money::zero())
        };
        let err = settle_tender(&tender, Money::from_yen(3600)).unwrap_err();
        assert!(matches!(err, CheckoutError::Validation(ValidationError::Required { .. })));

        let err = settle_tender(&Tender::cash(Money::zero()), Money::from_yen(3600)).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_card_ignores_cash_fields() {
        let tender = Tender {
            cash_received: Some(Money::from_yen(10000)),
            ..Tender::card()
        };
        assert_eq!(settle_tender(&tender, Money::from_yen(3600)).unwrap(), (None, None));
    }

    #[test]
    fn test_tender_from_json() {
        let tender: Tender =
            serde_json::from_str(r#"{"method":"cash","cashReceived":5000,"expectedTotal":4800}"#)
                .unwrap();
        assert_eq!(
            tender,
            Tender::cash(Money::from_yen(5000)).with_expected_total(Money::from_yen(4800))
        );
    }
}
