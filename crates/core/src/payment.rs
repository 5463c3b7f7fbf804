//! Payments

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned when a value is not one of the accepted payment methods.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid payment method: {0:?}")]
pub struct ParsePaymentMethodError(String);

/// Returned when a stored payment status is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid payment status: {0:?}")]
pub struct ParsePaymentStatusError(String);

/// Accepted payment methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Credit card
    CreditCard,

    /// Debit card
    DebitCard,

    /// Unified Payments Interface
    Upi,

    /// Paid in cash to the rider
    CashOnDelivery,
}

impl PaymentMethod {
    /// Every accepted method.
    pub const ALL: [Self; 4] = [
        Self::CreditCard,
        Self::DebitCard,
        Self::Upi,
        Self::CashOnDelivery,
    ];

    /// Storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreditCard => "credit_card",
            Self::DebitCard => "debit_card",
            Self::Upi => "upi",
            Self::CashOnDelivery => "cash_on_delivery",
        }
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::CreditCard => "Credit Card",
            Self::DebitCard => "Debit Card",
            Self::Upi => "UPI",
            Self::CashOnDelivery => "Cash on Delivery",
        }
    }

    /// Whether the method needs card details up front.
    pub const fn is_card(self) -> bool {
        matches!(self, Self::CreditCard | Self::DebitCard)
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.label())
    }
}

/// Accepts the storage form (`cash_on_delivery`) as well as labels such as
/// `Cash on Delivery` or `debit-card`.
impl FromStr for PaymentMethod {
    type Err = ParsePaymentMethodError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalised = value.trim().to_ascii_lowercase().replace([' ', '-'], "_");

        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == normalised)
            .ok_or_else(|| ParsePaymentMethodError(value.to_owned()))
    }
}

/// Settlement state of a payment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Awaiting settlement.
    #[default]
    Pending,

    /// Settled.
    Completed,
}

impl PaymentStatus {
    /// Storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = ParsePaymentStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            other => Err(ParsePaymentStatusError(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_storage_and_label_forms() -> TestResult {
        assert_eq!(
            "cash_on_delivery".parse::<PaymentMethod>()?,
            PaymentMethod::CashOnDelivery
        );
        assert_eq!(
            "Cash on Delivery".parse::<PaymentMethod>()?,
            PaymentMethod::CashOnDelivery
        );
        assert_eq!("UPI".parse::<PaymentMethod>()?, PaymentMethod::Upi);
        assert_eq!(
            "debit-card".parse::<PaymentMethod>()?,
            PaymentMethod::DebitCard
        );

        Ok(())
    }

    #[test]
    fn rejects_unknown_method() {
        let result = "bitcoin".parse::<PaymentMethod>();

        assert_eq!(
            result,
            Err(ParsePaymentMethodError("bitcoin".to_string())),
            "unsupported methods must be rejected"
        );
    }

    #[test]
    fn only_cards_need_card_details() {
        let cards: Vec<PaymentMethod> = PaymentMethod::ALL
            .into_iter()
            .filter(|method| method.is_card())
            .collect();

        assert_eq!(cards, [PaymentMethod::CreditCard, PaymentMethod::DebitCard]);
    }

    #[test]
    fn payment_status_round_trips_storage_form() -> TestResult {
        assert_eq!(
            PaymentStatus::Completed.as_str().parse::<PaymentStatus>()?,
            PaymentStatus::Completed
        );
        assert!("refunded".parse::<PaymentStatus>().is_err());

        Ok(())
    }
}
