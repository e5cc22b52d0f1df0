use super::sendmail::send_email;

/// Confirmation mail sent once a payment transitions into completed.
/// Callers treat this as fire-and-forget; failures are logged, never
/// surfaced to the verification flow.
pub async fn send_payment_confirmation_email(
    to_email: &str,
    booking_reference: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let subject = "Payment Confirmation";
    let html_body = format!(
        "<p>Your payment for booking {} was successful!</p>",
        booking_reference
    );

    send_email(to_email, subject, &html_body).await
}
