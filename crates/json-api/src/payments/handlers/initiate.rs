//! Initiate Payment Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    payments::{errors::into_status_error, models::PaymentIntentResponse},
    state::State,
};

/// Initiate Payment Handler
///
/// Issues a payment number for a pending order. Nothing is persisted.
#[endpoint(
    tags("payments"),
    summary = "Initiate Payment",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Payment number issued"),
        (status_code = StatusCode::BAD_REQUEST, description = "Order is not pending"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<PaymentIntentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let intent = state
        .app
        .payments
        .initiate_payment(user, order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(intent.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::{
        orders::records::{OrderStatus, OrderUuid},
        payments::{MockPaymentsService, PaymentsServiceError, records::PaymentIntent},
    };

    use crate::test_helpers::{TEST_USER_UUID, payments_service};

    use super::*;

    fn make_service(payments: MockPaymentsService) -> Service {
        payments_service(
            payments,
            Router::with_path("orders/{order}/payment").post(handler),
        )
    }

    #[tokio::test]
    async fn test_initiate_returns_payment_number() -> TestResult {
        let uuid = OrderUuid::new();

        let mut payments = MockPaymentsService::new();

        payments
            .expect_initiate_payment()
            .once()
            .withf(move |user, u| *user == TEST_USER_UUID && *u == uuid)
            .return_once(move |_, _| {
                Ok(PaymentIntent {
                    payment_no: "PAY1792152000AB12CD34".to_string(),
                    order_uuid: uuid,
                    order_no: "ORD20261016120000K7Q2ZD".to_string(),
                    amount: Decimal::new(20000, 2),
                    status: OrderStatus::Pending,
                    created_at: Timestamp::UNIX_EPOCH,
                })
            });

        let mut res = TestClient::post(format!("http://example.com/orders/{uuid}/payment"))
            .send(&make_service(payments))
            .await;

        let body: PaymentIntentResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.payment_no, "PAY1792152000AB12CD34");
        assert_eq!(body.amount, "200.00");

        Ok(())
    }

    #[tokio::test]
    async fn test_initiate_on_paid_order_returns_400() -> TestResult {
        let mut payments = MockPaymentsService::new();

        payments.expect_initiate_payment().once().return_once(|_, _| {
            Err(PaymentsServiceError::InvalidState {
                status: OrderStatus::Paid,
            })
        });

        let res = TestClient::post(format!(
            "http://example.com/orders/{}/payment",
            Uuid::now_v7()
        ))
        .send(&make_service(payments))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
