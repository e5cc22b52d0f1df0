use crate::models::paymentmodel::PaymentStatus;

/// What a verification run should do with the local payment record.
/// `new_status: None` means the record is already settled and nothing may
/// change; `notify` is only ever true for a transition into completed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReconcileOutcome {
    pub new_status: Option<PaymentStatus>,
    pub notify: bool,
}

/// Maps the gateway-reported status onto the local record. Completed is
/// terminal: re-verifying a completed payment changes nothing and must not
/// trigger a second confirmation.
pub fn reconcile(current: PaymentStatus, gateway_status: &str) -> ReconcileOutcome {
    if current == PaymentStatus::Completed {
        return ReconcileOutcome {
            new_status: None,
            notify: false,
        };
    }

    let new_status = if gateway_status == "success" {
        PaymentStatus::Completed
    } else {
        PaymentStatus::Failed
    };

    ReconcileOutcome {
        new_status: Some(new_status),
        notify: new_status == PaymentStatus::Completed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PaymentStatus::*;

    #[test]
    fn test_successful_verification_completes_and_notifies() {
        let outcome = reconcile(Pending, "success");
        assert_eq!(outcome.new_status, Some(Completed));
        assert!(outcome.notify);
    }

    #[test]
    fn test_failed_verification_never_notifies() {
        let outcome = reconcile(Pending, "failed");
        assert_eq!(outcome.new_status, Some(Failed));
        assert!(!outcome.notify);
    }

    #[test]
    fn test_reverifying_completed_payment_is_a_no_op() {
        let outcome = reconcile(Completed, "success");
        assert_eq!(outcome.new_status, None);
        assert!(!outcome.notify);
    }

    #[test]
    fn test_failed_payment_can_still_settle_successfully() {
        let outcome = reconcile(Failed, "success");
        assert_eq!(outcome.new_status, Some(Completed));
        assert!(outcome.notify);
    }
}
