use super::parser::RefundRow;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// A refund request that has passed row validation. Instances only exist for
/// rows whose five fields were present, whose amount parsed as a non-negative
/// decimal, and whose status matched a recognized literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefundRequest {
    pub request_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub amount: Decimal,
    pub status: RequestStatus,
}

/// Workflow status carried on the inbound row. Matching is case-sensitive on
/// the exact CSV literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    fn from_literal(value: &str) -> Option<Self> {
        match value {
            "Pending" => Some(Self::Pending),
            "Approved" => Some(Self::Approved),
            "Rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing field '{0}'")]
    MissingField(&'static str),
    #[error("amount is not numeric")]
    NonNumericAmount,
    #[error("negative amount")]
    NegativeAmount,
    #[error("invalid status '{0}'")]
    InvalidStatus(String),
}

/// Validates one raw row into a typed [`RefundRequest`].
///
/// Checks run in column order and short-circuit on the first failure:
/// presence of all five fields, then the decimal amount parse, then
/// non-negativity, then the status literal.
pub fn validate(row: &RefundRow) -> Result<RefundRequest, ValidationError> {
    let request_id = present(&row.request_id, "RequestId")?;
    let customer_name = present(&row.customer_name, "CustomerName")?;
    let customer_email = present(&row.customer_email, "CustomerEmail")?;
    let raw_amount = present(&row.amount, "Amount")?;
    let raw_status = present(&row.status, "Status")?;

    let amount = Decimal::from_str(raw_amount).map_err(|_| ValidationError::NonNumericAmount)?;
    if amount < Decimal::ZERO {
        return Err(ValidationError::NegativeAmount);
    }

    let status = RequestStatus::from_literal(raw_status)
        .ok_or_else(|| ValidationError::InvalidStatus(raw_status.to_string()))?;

    Ok(RefundRequest {
        request_id: request_id.to_string(),
        customer_name: customer_name.to_string(),
        customer_email: customer_email.to_string(),
        amount,
        status,
    })
}

fn present<'a>(
    value: &'a Option<String>,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    match value.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ValidationError::MissingField(field)),
    }
}
