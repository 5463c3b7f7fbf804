//! Terminal rendering for command output.

use std::io;

use jiff::Timestamp;
use rusty_money::{Money, iso};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;
use tiffin::status::OrderStatus;
use tiffin_app::domain::{
    carts::records::{CartAggregation, CartLineRecord},
    orders::records::{OrderSummary, OrderView, RestaurantOrderStats},
    restaurants::records::{MenuCategoryRecord, MenuItemRecord, RestaurantRecord},
    users::records::UserRecord,
};

#[derive(Debug, Error)]
pub(crate) enum RenderError {
    #[error("failed to write output")]
    Io(#[from] io::Error),

    #[error("amount {0} is too large to display")]
    AmountOutOfRange(u64),
}

/// Format paise as rupees.
pub(crate) fn money(amount: u64) -> Result<String, RenderError> {
    let minor = i64::try_from(amount).map_err(|_err| RenderError::AmountOutOfRange(amount))?;

    Ok(Money::from_minor(minor, iso::INR).to_string())
}

fn when(point_in_time: Timestamp) -> String {
    point_in_time.strftime("%Y-%m-%d %H:%M").to_string()
}

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    money_columns: usize,
) -> Result<(), RenderError> {
    let mut table = builder.build();

    table.with(Style::modern_rounded());

    if money_columns > 0 {
        let count = table.count_columns();

        table.modify(
            Columns::new(count.saturating_sub(money_columns)..count),
            Alignment::right(),
        );
    }

    writeln!(out, "{table}")?;

    Ok(())
}

pub(crate) fn write_user(out: &mut impl io::Write, user: &UserRecord) -> Result<(), RenderError> {
    writeln!(out, "user_uuid: {}", user.uuid)?;
    writeln!(out, "username: {}", user.username)?;
    writeln!(out, "email: {}", user.email)?;

    if let Some(phone_number) = &user.phone_number {
        writeln!(out, "phone_number: {phone_number}")?;
    }

    Ok(())
}

pub(crate) fn write_restaurants(
    out: &mut impl io::Write,
    restaurants: &[RestaurantRecord],
) -> Result<(), RenderError> {
    let mut builder = Builder::default();

    builder.push_record(["Restaurant", "Address", "Rating", "UUID"]);

    for restaurant in restaurants {
        let rating = restaurant.average_rating().map_or_else(
            || "unrated".to_string(),
            |rating| format!("{rating:.1} ({})", restaurant.ratings_count),
        );

        builder.push_record([
            restaurant.name.clone(),
            restaurant.address.clone().unwrap_or_default(),
            rating,
            restaurant.uuid.to_string(),
        ]);
    }

    write_table(out, builder, 0)
}

pub(crate) fn write_categories(
    out: &mut impl io::Write,
    categories: &[MenuCategoryRecord],
) -> Result<(), RenderError> {
    let mut builder = Builder::default();

    builder.push_record(["Category", "UUID"]);

    for category in categories {
        builder.push_record([category.name.clone(), category.uuid.to_string()]);
    }

    write_table(out, builder, 0)
}

pub(crate) fn write_menu(
    out: &mut impl io::Write,
    items: &[MenuItemRecord],
) -> Result<(), RenderError> {
    let mut builder = Builder::default();

    builder.push_record(["Item", "Description", "UUID", "Price"]);

    for item in items {
        builder.push_record([
            item.name.clone(),
            item.description.clone().unwrap_or_default(),
            item.uuid.to_string(),
            money(item.price)?,
        ]);
    }

    write_table(out, builder, 1)
}

/// Cart lines followed by per-restaurant totals.
pub(crate) fn write_cart(
    out: &mut impl io::Write,
    lines: &[CartLineRecord],
    aggregation: &CartAggregation,
) -> Result<(), RenderError> {
    let CartAggregation::Groups(aggregate) = aggregation else {
        writeln!(out, "cart is empty")?;

        return Ok(());
    };

    let mut builder = Builder::default();

    builder.push_record(["Line", "Item", "Restaurant", "Qty", "Unit Price"]);

    for line in lines {
        builder.push_record([
            line.cart_item_uuid.to_string(),
            line.item_name.clone(),
            line.restaurant_name.clone(),
            line.quantity.to_string(),
            money(line.unit_price)?,
        ]);
    }

    write_table(out, builder, 1)?;

    let mut totals = Builder::default();

    totals.push_record(["Restaurant", "Subtotal", "Shipping", "Total"]);

    for group in aggregate.groups() {
        let name = lines
            .iter()
            .find(|line| line.restaurant_uuid == *group.restaurant())
            .map_or_else(|| group.restaurant().to_string(), |line| line.restaurant_name.clone());

        totals.push_record([
            name,
            money(group.subtotal())?,
            money(group.shipping_cost())?,
            money(group.total())?,
        ]);
    }

    write_table(out, totals, 3)?;

    writeln!(out, "grand total: {}", money(aggregate.grand_total())?)?;

    Ok(())
}

pub(crate) fn write_orders(
    out: &mut impl io::Write,
    orders: &[OrderSummary],
) -> Result<(), RenderError> {
    if orders.is_empty() {
        writeln!(out, "no orders found")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Placed", "Order", "Restaurant", "Status", "Total", "Shipping"]);

    for summary in orders {
        builder.push_record([
            when(summary.order.created_at),
            summary.order.uuid.to_string(),
            summary.restaurant_name.clone(),
            summary.order.status.to_string(),
            money(summary.order.total_amount)?,
            money(summary.order.shipping_cost)?,
        ]);
    }

    write_table(out, builder, 2)
}

/// The forward track with the current step marked, e.g. `[pending] > scheduled > ...`.
pub(crate) fn progress_line(status: OrderStatus) -> String {
    let Some(position) = status.progress() else {
        return format!("{status}");
    };

    OrderStatus::TRACK
        .iter()
        .enumerate()
        .map(|(index, step)| {
            if index == position {
                format!("[{step}]")
            } else {
                step.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" > ")
}

pub(crate) fn write_order_view(
    out: &mut impl io::Write,
    view: &OrderView,
) -> Result<(), RenderError> {
    let order = view.order();

    writeln!(out, "order_uuid: {}", order.uuid)?;
    writeln!(out, "restaurant: {}", view.summary.restaurant_name)?;
    writeln!(out, "placed_at: {}", when(order.created_at))?;
    writeln!(out, "status: {}", progress_line(order.status))?;
    writeln!(out, "estimated_delivery: {}", when(view.estimated_delivery_at))?;

    let mut builder = Builder::default();

    builder.push_record(["Item", "Qty", "Price"]);

    for item in &view.items {
        builder.push_record([
            item.item_name.clone(),
            item.quantity.to_string(),
            money(item.price)?,
        ]);
    }

    write_table(out, builder, 1)?;

    writeln!(out, "subtotal: {}", money(order.total_amount)?)?;
    writeln!(out, "shipping: {}", money(order.shipping_cost)?)?;

    match &view.payment {
        Some(payment) => writeln!(
            out,
            "paid: {} by {} ({}, transaction {})",
            money(payment.amount)?,
            payment.payment_method.label(),
            payment.status,
            payment.transaction_uuid
        )?,
        None => writeln!(out, "paid: no payment recorded")?,
    }

    Ok(())
}

pub(crate) fn write_stats(
    out: &mut impl io::Write,
    stats: &RestaurantOrderStats,
    revenue_since: Timestamp,
) -> Result<(), RenderError> {
    writeln!(out, "total_orders: {}", stats.total_orders)?;
    writeln!(out, "pending_orders: {}", stats.pending_orders)?;
    writeln!(out, "delivered_orders: {}", stats.delivered_orders)?;
    writeln!(
        out,
        "revenue_since_{}: {}",
        revenue_since.strftime("%Y-%m-%d"),
        money(stats.revenue)?
    )?;

    Ok(())
}
