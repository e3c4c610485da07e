use serde::{Deserialize, Deserializer};
use std::io::Read;

/// Raw projection of one refund batch row, before validation.
///
/// Blank-after-trim values collapse to `None` so the validator can report a
/// missing field regardless of whether the column was absent or empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RefundRow {
    #[serde(
        rename = "RequestId",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub request_id: Option<String>,
    #[serde(
        rename = "CustomerName",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub customer_name: Option<String>,
    #[serde(
        rename = "CustomerEmail",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub customer_email: Option<String>,
    #[serde(rename = "Amount", default, deserialize_with = "empty_string_as_none")]
    pub amount: Option<String>,
    #[serde(rename = "Status", default, deserialize_with = "empty_string_as_none")]
    pub status: Option<String>,
}

/// Reads the full batch up front. Short rows deserialize with the missing
/// columns as `None` rather than failing the file.
pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<RefundRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut rows = Vec::new();

    for row in csv_reader.deserialize::<RefundRow>() {
        rows.push(row?);
    }

    Ok(rows)
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_rows_in_input_order() {
        let csv = "RequestId,CustomerName,CustomerEmail,Amount,Status\n\
R1,Alice,a@x.com,50,Pending\n\
R2,Bob,b@x.com,150,Pending\n";
        let rows = parse_rows(Cursor::new(csv)).expect("parse");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].request_id.as_deref(), Some("R1"));
        assert_eq!(rows[1].customer_name.as_deref(), Some("Bob"));
        assert_eq!(rows[1].amount.as_deref(), Some("150"));
    }

    #[test]
    fn blank_values_collapse_to_none() {
        let csv = "RequestId,CustomerName,CustomerEmail,Amount,Status\n\
R1,   ,a@x.com,50,Pending\n";
        let rows = parse_rows(Cursor::new(csv)).expect("parse");
        assert!(rows[0].customer_name.is_none());
        assert_eq!(rows[0].request_id.as_deref(), Some("R1"));
    }

    #[test]
    fn short_rows_do_not_fail_the_file() {
        let csv = "RequestId,CustomerName,CustomerEmail,Amount,Status\n\
R1,Alice\n\
R2,Bob,b@x.com,75,Pending\n";
        let rows = parse_rows(Cursor::new(csv)).expect("parse");
        assert_eq!(rows.len(), 2);
        assert!(rows[0].amount.is_none());
        assert!(rows[0].status.is_none());
        assert_eq!(rows[1].status.as_deref(), Some("Pending"));
    }

    #[test]
    fn values_are_trimmed() {
        let csv = "RequestId,CustomerName,CustomerEmail,Amount,Status\n\
  R1  ,  Alice  ,a@x.com,  50 , Pending \n";
        let rows = parse_rows(Cursor::new(csv)).expect("parse");
        assert_eq!(rows[0].request_id.as_deref(), Some("R1"));
        assert_eq!(rows[0].status.as_deref(), Some("Pending"));
    }
}
