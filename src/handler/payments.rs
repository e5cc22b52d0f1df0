use std::sync::Arc;

use axum::{
    extract::Query,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use bigdecimal::BigDecimal;
use validator::Validate;

use crate::{
    db::paymentdb::PaymentExt,
    dtos::paymentdtos::{InitiatePaymentDto, VerifyPaymentQueryDto},
    error::HttpError,
    mail::mails::send_payment_confirmation_email,
    models::paymentmodel::PaymentStatus,
    service::{error::ServiceError, reconciliation},
    AppState,
};

pub fn payment_handler() -> Router {
    Router::new()
        .route("/initiate", post(initiate_payment))
        .route("/verify", get(verify_payment))
}

pub async fn initiate_payment(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<InitiatePaymentDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if body.amount <= BigDecimal::from(0) {
        return Err(HttpError::bad_request("Amount must be positive"));
    }

    // Initiation is not safely retryable against the gateway, so dedupe
    // by booking reference; only a failed attempt may be retried.
    let existing = app_state
        .db_client
        .get_payment_by_booking_reference(&body.booking_reference)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if let Some(payment) = existing {
        if payment.status != PaymentStatus::Failed {
            return Err(
                ServiceError::DuplicatePaymentInitiation(body.booking_reference).into(),
            );
        }
    }

    let session = app_state
        .chapa
        .initialize_payment(&body.booking_reference, &body.amount, &body.email)
        .await?;

    // The gateway-returned tx_ref is authoritative, not the reference we sent.
    let payment = app_state
        .db_client
        .create_payment(
            &body.booking_reference,
            &body.email,
            &body.amount,
            &session.tx_ref,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Payment initiated successfully",
        "data": {
            "payment_url": session.checkout_url,
            "tx_ref": payment.transaction_id
        }
    })))
}

pub async fn verify_payment(
    Query(query): Query<VerifyPaymentQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let payment = app_state
        .db_client
        .get_payment_by_transaction_id(&query.tx_ref)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(ServiceError::UnknownTransaction(query.tx_ref.clone()))?;

    // On gateway failure this returns before any local write.
    let gateway_status = app_state.chapa.verify_payment(&query.tx_ref).await?;

    // Re-verifying a completed payment is a no-op; in particular it must
    // not send a second confirmation.
    let outcome = reconciliation::reconcile(payment.status, &gateway_status);
    let new_status = match outcome.new_status {
        None => {
            return Ok(Json(serde_json::json!({
                "status": "success",
                "data": {
                    "payment_status": payment.status
                }
            })));
        }
        Some(new_status) => new_status,
    };

    let updated = app_state
        .db_client
        .update_payment_status(payment.id, new_status)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    // A miss means a concurrent verification settled the record first; that
    // run owns the confirmation, so report the stored state and stop.
    let updated = match updated {
        Some(updated) => updated,
        None => {
            let settled = app_state
                .db_client
                .get_payment_by_transaction_id(&query.tx_ref)
                .await
                .map_err(|e| HttpError::server_error(e.to_string()))?
                .ok_or(ServiceError::UnknownTransaction(query.tx_ref.clone()))?;

            return Ok(Json(serde_json::json!({
                "status": "success",
                "data": {
                    "payment_status": settled.status
                }
            })));
        }
    };

    if outcome.notify {
        let email = updated.email.clone();
        let booking_reference = updated.booking_reference.clone();
        tokio::spawn(async move {
            if let Err(e) = send_payment_confirmation_email(&email, &booking_reference).await {
                tracing::error!(
                    "Failed to send payment confirmation for booking {}: {}",
                    booking_reference,
                    e
                );
            }
        });
    }

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "payment_status": updated.status
        }
    })))
}
