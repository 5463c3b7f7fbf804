//! Payments Repository

use jiff::Timestamp;
use sqlx::{FromRow, Row, Sqlite, Transaction, query_as, sqlite::SqliteRow};
use tiffin::payment::{PaymentMethod, PaymentStatus};
use uuid::Uuid;

use crate::{
    database::{amount_param, timestamp_param, try_get_amount, try_get_timestamp},
    domain::orders::records::{OrderUuid, PaymentRecord, PaymentUuid},
};

const CREATE_PAYMENT_SQL: &str = include_str!("../sql/create_payment.sql");
const GET_ORDER_PAYMENT_SQL: &str = include_str!("../sql/get_order_payment.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqlitePaymentsRepository;

impl SqlitePaymentsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Record a settled payment for an order.
    pub(crate) async fn create_payment(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        order: OrderUuid,
        method: PaymentMethod,
        transaction_uuid: Uuid,
        amount: u64,
        point_in_time: Timestamp,
    ) -> Result<PaymentRecord, sqlx::Error> {
        query_as::<Sqlite, PaymentRecord>(CREATE_PAYMENT_SQL)
            .bind(PaymentUuid::new().into_uuid())
            .bind(order.into_uuid())
            .bind(method.as_str())
            .bind(transaction_uuid)
            .bind(amount_param(amount, "amount")?)
            .bind(PaymentStatus::Completed.as_str())
            .bind(timestamp_param(point_in_time))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order_payment(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        order: OrderUuid,
    ) -> Result<Option<PaymentRecord>, sqlx::Error> {
        query_as::<Sqlite, PaymentRecord>(GET_ORDER_PAYMENT_SQL)
            .bind(order.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, SqliteRow> for PaymentRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let method: String = row.try_get("payment_method")?;
        let status: String = row.try_get("status")?;

        let payment_method =
            method
                .parse::<PaymentMethod>()
                .map_err(|e| sqlx::Error::ColumnDecode {
                    index: "payment_method".to_string(),
                    source: Box::new(e),
                })?;

        let status = status
            .parse::<PaymentStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: PaymentUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            payment_method,
            transaction_uuid: row.try_get("transaction_uuid")?,
            amount: try_get_amount(row, "amount")?,
            status,
            created_at: try_get_timestamp(row, "created_at")?,
        })
    }
}
