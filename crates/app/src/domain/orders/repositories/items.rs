//! Order Items Repository

use sqlx::{FromRow, Row, Sqlite, Transaction, query, query_as, sqlite::SqliteRow};
use tiffin::checkout::PlannedItem;

use crate::{
    database::{amount_param, try_get_amount, try_get_count},
    domain::{
        orders::records::{OrderItemRecord, OrderItemUuid, OrderUuid},
        restaurants::records::MenuItemUuid,
    },
};

const CREATE_ORDER_ITEM_SQL: &str = include_str!("../sql/create_order_item.sql");
const LIST_ORDER_ITEMS_SQL: &str = include_str!("../sql/list_order_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteOrderItemsRepository;

impl SqliteOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Write the order's items with the prices captured at checkout.
    #[tracing::instrument(
        name = "orders.repository.create_order_items",
        skip(self, tx, items),
        fields(order_uuid = %order, item_count = items.len()),
        err
    )]
    pub(crate) async fn create_order_items(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        order: OrderUuid,
        items: &[PlannedItem<MenuItemUuid>],
    ) -> Result<(), sqlx::Error> {
        for item in items {
            query(CREATE_ORDER_ITEM_SQL)
                .bind(OrderItemUuid::new().into_uuid())
                .bind(order.into_uuid())
                .bind(item.item.into_uuid())
                .bind(i64::from(item.quantity))
                .bind(amount_param(item.price, "price")?)
                .execute(&mut **tx)
                .await?;
        }

        Ok(())
    }

    pub(crate) async fn list_order_items(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        order: OrderUuid,
    ) -> Result<Vec<OrderItemRecord>, sqlx::Error> {
        query_as::<Sqlite, OrderItemRecord>(LIST_ORDER_ITEMS_SQL)
            .bind(order.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, SqliteRow> for OrderItemRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
            item_uuid: MenuItemUuid::from_uuid(row.try_get("item_uuid")?),
            item_name: row.try_get("item_name")?,
            quantity: try_get_count(row, "quantity")?,
            price: try_get_amount(row, "price")?,
        })
    }
}
