//! Ordering Policy

use jiff::{SignedDuration, Timestamp};

/// Flat shipping fee charged per restaurant order, in minor units.
pub const DEFAULT_SHIPPING_COST: u64 = 30_00;

/// Age after which a tracked order is considered delivered.
pub const DEFAULT_DELIVERY_WINDOW: SignedDuration = SignedDuration::from_hours(24);

/// Delivery estimate quoted on the checkout confirmation.
pub const DEFAULT_CONFIRMATION_ETA: SignedDuration = SignedDuration::from_mins(45);

/// Policy values applied when aggregating carts and tracking orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderPolicy {
    /// Flat shipping fee per restaurant group, in minor units.
    pub shipping_cost: u64,

    /// Age after which inspection marks an order delivered.
    pub delivery_window: SignedDuration,

    /// Offset from checkout used for the confirmation estimate.
    pub confirmation_eta: SignedDuration,
}

impl Default for OrderPolicy {
    fn default() -> Self {
        Self {
            shipping_cost: DEFAULT_SHIPPING_COST,
            delivery_window: DEFAULT_DELIVERY_WINDOW,
            confirmation_eta: DEFAULT_CONFIRMATION_ETA,
        }
    }
}

impl OrderPolicy {
    /// Latest expected delivery for an order placed at `placed_at`.
    ///
    /// # Errors
    ///
    /// Returns an error when the result overflows the supported timestamp range.
    pub fn delivery_deadline(&self, placed_at: Timestamp) -> Result<Timestamp, jiff::Error> {
        placed_at.checked_add(self.delivery_window)
    }

    /// Delivery estimate quoted to the customer at checkout.
    ///
    /// # Errors
    ///
    /// Returns an error when the result overflows the supported timestamp range.
    pub fn confirmation_estimate(&self, placed_at: Timestamp) -> Result<Timestamp, jiff::Error> {
        placed_at.checked_add(self.confirmation_eta)
    }
}
