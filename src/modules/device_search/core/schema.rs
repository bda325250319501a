// Where the device lookup reads from and how a joined row maps onto a ViewRecord.
//
// The join columns on the primary table are configuration. Deployments have used
// different names for the sale reference, so nothing here guesses between them:
// a wrong name fails the read, and every projected row is checked against its joins.

use crate::modules::device_search::core::view_record::ViewRecord;
use crate::shared::core::errors::ControllerError;
use crate::shared::core::primitives::Row;
use crate::shared::infrastructure::remote_store::{JoinQuery, JoinSpec, JoinedRow, KeyFilter};
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceJoinSchema {
    pub primary_table: String,
    pub scope_column: String,
    pub lookup_column: String,
    pub sale_table: String,
    pub sale_key: String,
    pub product_table: String,
    pub product_key: String,
    pub amount_column: String,
}

impl Default for DeviceJoinSchema {
    fn default() -> Self {
        Self {
            primary_table: "devices".to_string(),
            scope_column: "store_id".to_string(),
            lookup_column: "imei".to_string(),
            sale_table: "sales".to_string(),
            sale_key: "sales_id".to_string(),
            product_table: "products".to_string(),
            product_key: "product_id".to_string(),
            amount_column: "price".to_string(),
        }
    }
}

impl DeviceJoinSchema {
    pub fn query(&self, store_id: i64, lookup_key: &str) -> JoinQuery {
        JoinQuery {
            table: self.primary_table.clone(),
            filters: vec![
                KeyFilter::new(self.scope_column.clone(), store_id),
                KeyFilter::new(self.lookup_column.clone(), lookup_key),
            ],
            joins: vec![
                JoinSpec {
                    table: self.sale_table.clone(),
                    local_column: self.sale_key.clone(),
                    foreign_column: "id".to_string(),
                },
                JoinSpec {
                    table: self.product_table.clone(),
                    local_column: self.product_key.clone(),
                    foreign_column: "id".to_string(),
                },
            ],
        }
    }

    pub fn project(&self, row: &JoinedRow) -> Result<ViewRecord, ControllerError> {
        let primary = &row.primary;
        let sale = self.joined(row, &self.sale_table)?;
        let product = self.joined(row, &self.product_table)?;

        let sale_id = int(sale, &self.sale_table, "id")?;
        let product_id = int(product, &self.product_table, "id")?;
        if int(primary, &self.primary_table, &self.sale_key)? != sale_id
            || int(primary, &self.primary_table, &self.product_key)? != product_id
        {
            return Err(self.integrity("joined rows do not match their references".to_string()));
        }

        Ok(ViewRecord {
            device_id: int(primary, &self.primary_table, "id")?,
            lookup_key: text(primary, &self.primary_table, &self.lookup_column)?,
            sale_id,
            receipt_number: optional_text(sale, "receipt_number"),
            sold_at: optional_text(sale, "created_at"),
            product_id,
            product_name: text(product, &self.product_table, "name")?,
            amount: amount(sale.get(&self.amount_column), &self.sale_table, &self.amount_column)?,
            returned: false,
        })
    }

    fn joined<'a>(&self, row: &'a JoinedRow, table: &str) -> Result<&'a Row, ControllerError> {
        row.joined
            .get(table)
            .ok_or_else(|| self.integrity(format!("row without a joined {table} record")))
    }

    fn integrity(&self, reason: String) -> ControllerError {
        ControllerError::read(&self.primary_table, reason)
    }
}

fn int(row: &Row, table: &str, column: &str) -> Result<i64, ControllerError> {
    row.get(column)
        .and_then(Value::as_i64)
        .ok_or_else(|| ControllerError::read(table, format!("{column} is missing or not an integer")))
}

fn text(row: &Row, table: &str, column: &str) -> Result<String, ControllerError> {
    match row.get(column) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(ControllerError::read(table, format!("{column} is missing or not text"))),
    }
}

fn optional_text(row: &Row, column: &str) -> Option<String> {
    match row.get(column) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Amounts arrive either as JSON numbers or as numeric strings (decimal columns). Both are
/// read from their decimal text so no binary rounding creeps in.
pub fn amount(value: Option<&Value>, table: &str, column: &str) -> Result<Decimal, ControllerError> {
    let parsed = match value {
        Some(Value::Number(n)) => parse_decimal(&n.to_string()),
        Some(Value::String(s)) => parse_decimal(s.trim()),
        _ => None,
    };
    parsed.ok_or_else(|| {
        ControllerError::InvalidInput(format!(
            "{table}.{column} is not numeric: {}",
            value.unwrap_or(&Value::Null)
        ))
    })
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}
