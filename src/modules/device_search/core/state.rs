use crate::modules::device_search::core::view_record::{ViewRecord, format_amount};
use rust_decimal::Decimal;
use crate::shared::core::errors::ControllerError;

#[derive(Debug, Default)]
pub struct SearchState {
    pub rows: Vec<ViewRecord>,
    pub error: Option<ControllerError>,
    pub last_key: Option<String>,
    pub searches_in_flight: usize,
    /// Number of scoped searches started so far; each one takes the next value as its ticket.
    pub searches_started: u64,
    /// Searches with a ticket up to this value started before the list was last cleared.
    pub cleared_through: u64,
}

impl SearchState {
    pub fn snapshot(&self) -> SearchSnapshot {
        SearchSnapshot {
            rows: self.rows.clone(),
            error: self.error.clone(),
            last_key: self.last_key.clone(),
            searching: self.searches_in_flight > 0,
        }
    }
}

/// "No matches" is `rows` empty with `error == None`. A failed search keeps the rows
/// of the previous one and sets `error`.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSnapshot {
    pub rows: Vec<ViewRecord>,
    pub error: Option<ControllerError>,
    pub last_key: Option<String>,
    pub searching: bool,
}

impl SearchSnapshot {
    /// Sum of the rows not flagged as returned.
    pub fn total(&self) -> Decimal {
        self.rows
            .iter()
            .filter(|r| !r.returned)
            .map(|r| r.amount)
            .sum()
    }

    pub fn total_display(&self) -> String {
        format_amount(self.total())
    }
}

#[cfg(test)]
mod search_snapshot_tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    fn hit(device_id: i64, amount: &str, returned: bool) -> ViewRecord {
        ViewRecord {
            device_id,
            lookup_key: "DEV1".to_string(),
            sale_id: device_id,
            receipt_number: None,
            sold_at: None,
            product_id: 1,
            product_name: "Phone".to_string(),
            amount: Decimal::from_str(amount).unwrap(),
            returned,
        }
    }

    fn snapshot(rows: Vec<ViewRecord>) -> SearchSnapshot {
        SearchSnapshot {
            rows,
            error: None,
            last_key: Some("DEV1".to_string()),
            searching: false,
        }
    }

    #[rstest]
    fn it_should_sum_decimal_amounts_exactly() {
        let snapshot = snapshot(vec![hit(1, "0.1", false), hit(2, "0.2", false)]);
        assert_eq!(snapshot.total(), Decimal::from_str("0.3").unwrap());
        assert_eq!(snapshot.total_display(), "0.30");
    }

    #[rstest]
    fn it_should_round_the_total_half_away_from_zero() {
        let snapshot = snapshot(vec![hit(1, "1.000", false), hit(2, "0.005", false)]);
        assert_eq!(snapshot.total_display(), "1.01");
    }

    #[rstest]
    fn it_should_leave_returned_rows_out_of_the_total() {
        let snapshot = snapshot(vec![hit(1, "10", false), hit(2, "25", true)]);
        assert_eq!(snapshot.total_display(), "10.00");
        assert_eq!(SearchState::default().snapshot().total_display(), "0.00");
    }
}
