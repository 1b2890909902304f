//! Payments Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    orders::records::{OrderStatus, OrderUuid},
    payments::records::PaymentStatus,
    users::records::UserUuid,
};

const GET_ORDER_PAYMENT_SQL: &str = include_str!("sql/get_order_payment.sql");
const LOCK_ORDER_PAYMENT_SQL: &str = include_str!("sql/lock_order_payment.sql");
const MARK_ORDER_PAID_SQL: &str = include_str!("sql/mark_order_paid.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPaymentsRepository;

impl PgPaymentsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_order_payment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<PaymentStatus, sqlx::Error> {
        query_as::<Postgres, PaymentStatus>(GET_ORDER_PAYMENT_SQL)
            .bind(order.into_uuid())
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn lock_order_payment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<PaymentStatus, sqlx::Error> {
        query_as::<Postgres, PaymentStatus>(LOCK_ORDER_PAYMENT_SQL)
            .bind(order.into_uuid())
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Returns `None` when the order was no longer pending.
    pub(crate) async fn mark_order_paid(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<Option<PaymentStatus>, sqlx::Error> {
        query_as::<Postgres, PaymentStatus>(MARK_ORDER_PAID_SQL)
            .bind(order.into_uuid())
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for PaymentStatus {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            order_uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            order_no: row.try_get("order_no")?,
            status: row.try_get::<OrderStatus, _>("status")?,
            amount: row.try_get("actual_amount")?,
            paid_at: row
                .try_get::<Option<SqlxTimestamp>, _>("paid_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
