use chrono::Utc;
use thiserror::Error;
use tracing::info;

use super::booking::random_code;
use crate::models::{Payment, PaymentRequest, PaymentStatus};

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Approves every well-formed payment without contacting a provider.
pub struct MockPaymentGateway {
    default_currency: String,
}

impl MockPaymentGateway {
    #[must_use]
    pub fn new(default_currency: impl Into<String>) -> Self {
        Self {
            default_currency: default_currency.into(),
        }
    }

    pub fn process(&self, request: PaymentRequest) -> Result<Payment, PaymentError> {
        let amount = request
            .amount
            .filter(|amount| amount.is_finite() && *amount > 0.0)
            .ok_or_else(|| PaymentError::Validation("amount must be a positive number".to_string()))?;

        let payment = Payment {
            payment_id: format!("PAY-{}", random_code(&mut rand::rng(), 12)),
            status: PaymentStatus::Approved,
            amount,
            currency: request
                .currency
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| self.default_currency.clone()),
            order_id: request.order_id,
            processed_at: Utc::now(),
        };

        info!(
            payment_id = %payment.payment_id,
            amount = payment.amount,
            currency = %payment.currency,
            "Mock payment approved"
        );
        Ok(payment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approves_positive_amount() {
        let gateway = MockPaymentGateway::new("USD");
        let payment = gateway
            .process(PaymentRequest {
                amount: Some(199.99),
                order_id: Some("ORDER-7".to_string()),
                ..Default::default()
            })
            .unwrap();

        assert!(payment.payment_id.starts_with("PAY-"));
        assert_eq!(payment.status, PaymentStatus::Approved);
        assert_eq!(payment.currency, "USD");
        assert_eq!(payment.order_id.as_deref(), Some("ORDER-7"));
    }

    #[test]
    fn test_rejects_missing_or_non_positive_amount() {
        let gateway = MockPaymentGateway::new("USD");
        for amount in [None, Some(0.0), Some(-5.0), Some(f64::NAN)] {
            let result = gateway.process(PaymentRequest {
                amount,
                ..Default::default()
            });
            assert!(matches!(result, Err(PaymentError::Validation(_))));
        }
    }
}
