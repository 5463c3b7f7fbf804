//! Order Status

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned when a value is not one of the recognised order statuses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid order status: {0:?}")]
pub struct ParseOrderStatusError(String);

/// Lifecycle stage of an order.
///
/// The forward track is `pending → scheduled → shipped → delivered`. `cancelled`
/// sits outside the track and is only reached through an administrative override.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Placed at checkout.
    #[default]
    Pending,

    /// Accepted by the restaurant.
    Scheduled,

    /// Out for delivery.
    Shipped,

    /// Handed to the customer.
    Delivered,

    /// Cancelled by a restaurant administrator.
    Cancelled,
}

impl OrderStatus {
    /// Every recognised status.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Scheduled,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// The forward track shown when an order is tracked.
    pub const TRACK: [Self; 4] = [
        Self::Pending,
        Self::Scheduled,
        Self::Shipped,
        Self::Delivered,
    ];

    /// Storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Scheduled => "scheduled",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Terminal statuses never change on their own.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// The next status on the forward track, if any.
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::Scheduled),
            Self::Scheduled => Some(Self::Shipped),
            Self::Shipped => Some(Self::Delivered),
            Self::Delivered | Self::Cancelled => None,
        }
    }

    /// Position on the forward track, `None` for cancelled orders.
    pub fn progress(self) -> Option<usize> {
        Self::TRACK.iter().position(|status| *status == self)
    }

    /// Status an order moves to when it is inspected at `point_in_time`.
    ///
    /// Returns `None` when inspection leaves the order untouched. Orders older than
    /// `delivery_window` jump straight to [`OrderStatus::Delivered`]; otherwise a
    /// pending order becomes scheduled.
    pub fn on_inspection(
        self,
        placed_at: Timestamp,
        point_in_time: Timestamp,
        delivery_window: SignedDuration,
    ) -> Option<Self> {
        if self.is_terminal() {
            return None;
        }

        if point_in_time.duration_since(placed_at) > delivery_window {
            return Some(Self::Delivered);
        }

        match self {
            Self::Pending => Some(Self::Scheduled),
            Self::Scheduled | Self::Shipped | Self::Delivered | Self::Cancelled => None,
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ParseOrderStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalised = value.trim().to_ascii_lowercase();

        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalised)
            .ok_or_else(|| ParseOrderStatusError(value.to_owned()))
    }
}
