use std::io;

use clap::Args;
use tiffin::payment::PaymentMethod;
use tiffin_app::{
    context::AppContext,
    domain::{
        carts::records::CartAggregation,
        orders::{CheckoutError, data::CheckoutOutcome},
        users::records::UserUuid,
    },
};

use super::{failure, render};

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    #[arg(long)]
    user: UserUuid,

    /// credit_card, debit_card, upi or cash_on_delivery
    #[arg(long)]
    payment_method: String,
}

pub(crate) async fn run(
    args: CheckoutArgs,
    ctx: &AppContext,
    out: &mut impl io::Write,
) -> Result<(), String> {
    let payment_method = args
        .payment_method
        .parse::<PaymentMethod>()
        .map_err(CheckoutError::from)
        .map_err(|error| failure("check out", &error))?;

    let aggregation = ctx
        .carts
        .aggregate_cart(args.user)
        .await
        .map_err(|error| failure("read cart", &error))?;

    let CartAggregation::Groups(aggregate) = aggregation else {
        return write(out, format_args!("cart is empty, nothing to check out"));
    };

    let grand_total = render::money(aggregate.grand_total())
        .map_err(|error| failure("write output", &error))?;

    let outcome = ctx
        .orders
        .checkout(args.user, aggregate.into_groups(), payment_method)
        .await
        .map_err(|error| failure("check out", &error))?;

    let CheckoutOutcome::Placed(receipt) = outcome else {
        return write(out, format_args!("cart is empty, nothing to check out"));
    };

    let confirmation = &receipt.confirmation;

    write(out, format_args!("order_number: {}", confirmation.order_number))?;
    write(
        out,
        format_args!("paid: {grand_total} by {}", payment_method.label()),
    )?;
    write(
        out,
        format_args!(
            "estimated_delivery: {}",
            confirmation.estimated_delivery_at.strftime("%Y-%m-%d %H:%M")
        ),
    )?;

    for order_uuid in &receipt.order_uuids {
        write(out, format_args!("order_uuid: {order_uuid}"))?;
    }

    Ok(())
}

fn write(out: &mut impl io::Write, line: std::fmt::Arguments<'_>) -> Result<(), String> {
    writeln!(out, "{line}").map_err(|error| failure("write output", &error))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use testresult::TestResult;
    use tiffin::policy::OrderPolicy;
    use tiffin_app::domain::{
        carts::MockCartsService, orders::MockOrdersService, restaurants::MockRestaurantsService,
        users::MockUsersService,
    };

    use super::*;

    fn context(carts: MockCartsService, orders: MockOrdersService) -> AppContext {
        AppContext {
            users: Arc::new(MockUsersService::new()),
            restaurants: Arc::new(MockRestaurantsService::new()),
            carts: Arc::new(carts),
            orders: Arc::new(orders),
            policy: OrderPolicy::default(),
        }
    }

    #[tokio::test]
    async fn unknown_payment_method_never_reaches_checkout() -> TestResult {
        let mut carts = MockCartsService::new();
        let mut orders = MockOrdersService::new();

        carts.expect_aggregate_cart().never();
        orders.expect_checkout().never();

        let ctx = context(carts, orders);
        let mut out = Vec::new();

        let result = run(
            CheckoutArgs {
                user: UserUuid::new(),
                payment_method: "bitcoin".to_string(),
            },
            &ctx,
            &mut out,
        )
        .await;

        let error = result.err().ok_or("expected an error")?;

        assert!(error.contains("invalid payment method"), "got {error}");
        assert!(out.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn empty_cart_skips_checkout() -> TestResult {
        let mut carts = MockCartsService::new();
        let mut orders = MockOrdersService::new();

        carts
            .expect_aggregate_cart()
            .times(1)
            .returning(|_| Ok(CartAggregation::Empty));
        orders.expect_checkout().never();

        let ctx = context(carts, orders);
        let mut out = Vec::new();

        run(
            CheckoutArgs {
                user: UserUuid::new(),
                payment_method: "UPI".to_string(),
            },
            &ctx,
            &mut out,
        )
        .await?;

        assert_eq!(
            String::from_utf8(out)?,
            "cart is empty, nothing to check out\n"
        );

        Ok(())
    }
}
