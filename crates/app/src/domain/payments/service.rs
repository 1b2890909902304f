//! Payments service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        orders::{
            numbers,
            records::{OrderStatus, OrderUuid},
        },
        payments::{
            errors::PaymentsServiceError,
            records::{PaymentIntent, PaymentMethod, PaymentReceipt, PaymentStatus},
            repository::PgPaymentsRepository,
        },
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgPaymentsService {
    db: Db,
    repository: PgPaymentsRepository,
}

impl PgPaymentsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgPaymentsRepository::new(),
        }
    }
}

fn ensure_payable(status: OrderStatus) -> Result<(), PaymentsServiceError> {
    if status.can_transition_to(OrderStatus::Paid) {
        Ok(())
    } else {
        Err(PaymentsServiceError::InvalidState { status })
    }
}

#[async_trait]
impl PaymentsService for PgPaymentsService {
    async fn initiate_payment(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<PaymentIntent, PaymentsServiceError> {
        let mut tx = self.db.begin_user_transaction(user).await?;

        let current = self.repository.get_order_payment(&mut tx, user, order).await?;

        tx.commit().await?;

        ensure_payable(current.status)?;

        let created_at = Timestamp::now();

        Ok(PaymentIntent {
            payment_no: numbers::payment_no(created_at, &mut rand::thread_rng()),
            order_uuid: current.order_uuid,
            order_no: current.order_no,
            amount: current.amount,
            status: current.status,
            created_at,
        })
    }

    async fn confirm_payment(
        &self,
        user: UserUuid,
        order: OrderUuid,
        method: PaymentMethod,
    ) -> Result<PaymentReceipt, PaymentsServiceError> {
        let mut tx = self.db.begin_user_transaction(user).await?;

        let current = self
            .repository
            .lock_order_payment(&mut tx, user, order)
            .await?;

        ensure_payable(current.status)?;

        let paid = self
            .repository
            .mark_order_paid(&mut tx, user, order)
            .await?
            .ok_or(PaymentsServiceError::InvalidState {
                status: current.status,
            })?;

        tx.commit().await?;

        info!(order_no = %paid.order_no, %method, "order paid");

        Ok(PaymentReceipt {
            order_uuid: paid.order_uuid,
            order_no: paid.order_no,
            amount: paid.amount,
            status: paid.status,
            method,
            paid_at: paid.paid_at,
        })
    }

    async fn payment_status(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<PaymentStatus, PaymentsServiceError> {
        let mut tx = self.db.begin_user_transaction(user).await?;

        let status = self.repository.get_order_payment(&mut tx, user, order).await?;

        tx.commit().await?;

        Ok(status)
    }
}

#[automock]
#[async_trait]
pub trait PaymentsService: Send + Sync {
    /// Issue a payment number for a pending order.
    async fn initiate_payment(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<PaymentIntent, PaymentsServiceError>;

    /// Record a (simulated) successful payment, moving the order to `paid`.
    async fn confirm_payment(
        &self,
        user: UserUuid,
        order: OrderUuid,
        method: PaymentMethod,
    ) -> Result<PaymentReceipt, PaymentsServiceError>;

    /// Current payment state of an order.
    async fn payment_status(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<PaymentStatus, PaymentsServiceError>;
}
