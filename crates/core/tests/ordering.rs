//! Cart-to-order walkthroughs

use jiff::{SignedDuration, Timestamp};
use testresult::TestResult;
use tiffin::prelude::*;

fn line(item: u32, restaurant: char, quantity: u32, unit_price: u64) -> CartLine<u32, char> {
    CartLine {
        item,
        restaurant,
        quantity,
        unit_price,
    }
}

#[test]
fn two_restaurant_cart_plans_two_paid_orders() -> TestResult {
    let lines = [line(1, 'a', 2, 100_00), line(2, 'b', 1, 50_00)];

    let CartAggregation::Groups(aggregate) = aggregate(lines, DEFAULT_SHIPPING_COST)? else {
        return Err("expected restaurant groups".into());
    };

    assert_eq!(aggregate.grand_total(), 310_00);

    let plan = CheckoutPlan::new(aggregate.groups(), "Cash on Delivery".parse()?);

    let orders: Vec<(char, u64, u64, u64)> = plan
        .orders()
        .iter()
        .map(|order| {
            (
                order.restaurant,
                order.total_amount,
                order.shipping_cost,
                order.payment_amount,
            )
        })
        .collect();

    assert_eq!(
        orders,
        [('a', 200_00, 30_00, 230_00), ('b', 50_00, 30_00, 80_00)]
    );
    assert_eq!(plan.payment_method(), PaymentMethod::CashOnDelivery);

    Ok(())
}

#[test]
fn empty_cart_plans_nothing() -> TestResult {
    let aggregation = aggregate(Vec::<CartLine<u32, char>>::new(), DEFAULT_SHIPPING_COST)?;

    assert!(aggregation.is_empty());

    Ok(())
}

#[test]
fn placed_order_walks_the_tracking_track() -> TestResult {
    let policy = OrderPolicy::default();
    let placed_at: Timestamp = "2025-04-17T12:00:00Z".parse()?;
    let soon = placed_at.checked_add(SignedDuration::from_mins(10))?;
    let next_day = placed_at.checked_add(SignedDuration::from_hours(25))?;

    let mut status = OrderStatus::default();

    status = status
        .on_inspection(placed_at, soon, policy.delivery_window)
        .unwrap_or(status);

    assert_eq!(status, OrderStatus::Scheduled);
    assert_eq!(
        status.on_inspection(placed_at, soon, policy.delivery_window),
        None,
        "scheduled orders wait for the restaurant"
    );

    status = status
        .on_inspection(placed_at, next_day, policy.delivery_window)
        .unwrap_or(status);

    assert_eq!(status, OrderStatus::Delivered);
    assert_eq!(
        OrderStatus::Cancelled.on_inspection(placed_at, next_day, policy.delivery_window),
        None
    );

    Ok(())
}
