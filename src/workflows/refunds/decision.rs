use rust_decimal::Decimal;
use std::fmt;

/// Adjudication outcome for a pending refund request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefundDecision {
    Approved,
    ManualReview,
}

impl RefundDecision {
    /// Label understood by the portal's decision dropdown; also the value
    /// written to the results file.
    pub fn portal_label(&self) -> &'static str {
        match self {
            Self::Approved => "Approved",
            Self::ManualReview => "Manual Review",
        }
    }
}

impl fmt::Display for RefundDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.portal_label())
    }
}

/// Approval policy: amounts up to 100 are auto-approved, anything larger is
/// routed to a human reviewer.
pub fn decide(amount: Decimal) -> RefundDecision {
    if amount <= Decimal::ONE_HUNDRED {
        RefundDecision::Approved
    } else {
        RefundDecision::ManualReview
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn approves_amounts_up_to_the_threshold() {
        assert_eq!(decide(Decimal::ZERO), RefundDecision::Approved);
        assert_eq!(decide(Decimal::from(50)), RefundDecision::Approved);
        assert_eq!(decide(Decimal::from(100)), RefundDecision::Approved);
    }

    #[test]
    fn routes_larger_amounts_to_manual_review() {
        assert_eq!(
            decide(Decimal::from_str("100.01").unwrap()),
            RefundDecision::ManualReview
        );
        assert_eq!(decide(Decimal::from(150)), RefundDecision::ManualReview);
    }

    #[test]
    fn decision_is_stable_across_calls() {
        let amount = Decimal::from_str("99.95").unwrap();
        assert_eq!(decide(amount), decide(amount));
    }

    #[test]
    fn portal_labels_match_the_dropdown_options() {
        assert_eq!(RefundDecision::Approved.portal_label(), "Approved");
        assert_eq!(RefundDecision::ManualReview.portal_label(), "Manual Review");
    }
}
