//! Ordering Policy Config

use clap::Args;
use jiff::SignedDuration;
use tiffin::policy::{DEFAULT_SHIPPING_COST, OrderPolicy};

/// Ordering policy settings.
#[derive(Debug, Args)]
pub(crate) struct PolicyConfig {
    /// Flat shipping charged per restaurant, in paise
    #[arg(long, env = "TIFFIN_SHIPPING_COST", default_value_t = DEFAULT_SHIPPING_COST)]
    pub shipping_cost: u64,

    /// Hours after which a tracked order counts as delivered
    #[arg(long, env = "TIFFIN_DELIVERY_WINDOW_HOURS", default_value_t = 24)]
    pub delivery_window_hours: u32,

    /// Minutes quoted as the delivery estimate at checkout
    #[arg(long, env = "TIFFIN_CONFIRMATION_ETA_MINUTES", default_value_t = 45)]
    pub confirmation_eta_minutes: u32,
}

impl PolicyConfig {
    pub(crate) fn order_policy(&self) -> OrderPolicy {
        OrderPolicy {
            shipping_cost: self.shipping_cost,
            delivery_window: SignedDuration::from_hours(i64::from(self.delivery_window_hours)),
            confirmation_eta: SignedDuration::from_mins(i64::from(self.confirmation_eta_minutes)),
        }
    }
}
