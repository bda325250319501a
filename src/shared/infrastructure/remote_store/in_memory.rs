// In memory implementation of the RemoteStore port.
//
// Purpose
// - Support controller tests and local development without a database.
//
// Responsibilities
// - Store rows per table in insertion order.
// - Evaluate equality filters, ordering and inner joins.
// - Simulate an unreachable store, failing writes and slow round trips.

use crate::shared::core::primitives::{OrderBy, Row, SortDirection, project};
use crate::shared::infrastructure::remote_store::{
    JoinQuery, JoinedRow, KeyFilter, RemoteStore, RemoteStoreError, SelectQuery,
};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering as AtomicOrdering};
use std::time::Duration;
use tokio::sync::RwLock;

#[derive(Debug, Default, Clone)]
struct Table {
    key_column: Option<String>,
    rows: Vec<Row>,
}

#[derive(Default)]
pub struct InMemoryRemoteStore {
    tables: RwLock<HashMap<String, Table>>,
    is_offline: AtomicBool,
    writes_failing: AtomicBool,
    delay_ms: AtomicU64,
    calls: AtomicUsize,
}

impl InMemoryRemoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a table. Rows that are not JSON objects are ignored.
    pub fn with_table(
        mut self,
        table: &str,
        key_column: &str,
        rows: impl IntoIterator<Item = Value>,
    ) -> Self {
        let rows = rows
            .into_iter()
            .filter_map(|v| v.as_object().cloned())
            .collect();
        self.tables.get_mut().insert(
            table.to_string(),
            Table {
                key_column: Some(key_column.to_string()),
                rows,
            },
        );
        self
    }

    /// Every operation fails while offline.
    pub fn toggle_offline(&self) {
        self.is_offline.fetch_xor(true, AtomicOrdering::SeqCst);
    }

    /// Writes (update, delete, insert) fail while reads keep working.
    pub fn toggle_failing_writes(&self) {
        self.writes_failing.fetch_xor(true, AtomicOrdering::SeqCst);
    }

    pub fn set_delay_ms(&self, ms: u64) {
        self.delay_ms.store(ms, AtomicOrdering::SeqCst);
    }

    /// Number of operations issued against the store so far.
    pub fn calls(&self) -> usize {
        self.calls.load(AtomicOrdering::SeqCst)
    }

    pub async fn rows(&self, table: &str) -> Vec<Row> {
        self.tables
            .read()
            .await
            .get(table)
            .map(|t| t.rows.clone())
            .unwrap_or_default()
    }

    async fn round_trip(&self, write: bool) -> Result<(), RemoteStoreError> {
        self.calls.fetch_add(1, AtomicOrdering::SeqCst);
        let delay = self.delay_ms.load(AtomicOrdering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        if self.is_offline.load(AtomicOrdering::SeqCst) {
            return Err(RemoteStoreError::Backend("Remote store offline".into()));
        }
        if write && self.writes_failing.load(AtomicOrdering::SeqCst) {
            return Err(RemoteStoreError::Backend("Remote store rejected the write".into()));
        }
        Ok(())
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), Some(_)) => Ordering::Less,
        (Some(_), None | Some(Value::Null)) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

fn sort_rows(rows: &mut [Row], order_by: &OrderBy) {
    rows.sort_by(|a, b| {
        let ordering = compare_values(a.get(&order_by.column), b.get(&order_by.column));
        match order_by.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

fn next_key(rows: &[Row], column: &str) -> Value {
    let max = rows
        .iter()
        .filter_map(|r| r.get(column).and_then(Value::as_i64))
        .max()
        .unwrap_or(0);
    Value::from(max + 1)
}

#[async_trait::async_trait]
impl RemoteStore for InMemoryRemoteStore {
    async fn select(&self, query: SelectQuery) -> Result<Vec<Row>, RemoteStoreError> {
        self.round_trip(false).await?;
        let guard = self.tables.read().await;
        let table = guard
            .get(&query.table)
            .ok_or_else(|| RemoteStoreError::Backend(format!("unknown table {}", query.table)))?;
        let columns: Vec<&str> = query.columns.iter().map(String::as_str).collect();
        let mut rows: Vec<Row> = table.rows.iter().map(|r| project(r, &columns)).collect();
        if let Some(order_by) = &query.order_by {
            sort_rows(&mut rows, order_by);
        }
        Ok(rows)
    }

    async fn update(&self, table: &str, key: &KeyFilter, patch: Row) -> Result<(), RemoteStoreError> {
        self.round_trip(true).await?;
        let mut guard = self.tables.write().await;
        let target = guard
            .get_mut(table)
            .and_then(|t| t.rows.iter_mut().find(|r| key.matches(r)))
            .ok_or_else(|| RemoteStoreError::NotFound {
                table: table.to_string(),
                column: key.column.clone(),
                value: key.value.clone(),
            })?;
        target.extend(patch);
        Ok(())
    }

    async fn delete(&self, table: &str, key: &KeyFilter) -> Result<(), RemoteStoreError> {
        self.round_trip(true).await?;
        let mut guard = self.tables.write().await;
        let rows = guard.get_mut(table).map(|t| &mut t.rows);
        let position = rows
            .as_ref()
            .and_then(|rows| rows.iter().position(|r| key.matches(r)));
        match (rows, position) {
            (Some(rows), Some(index)) => {
                rows.remove(index);
                Ok(())
            }
            _ => Err(RemoteStoreError::NotFound {
                table: table.to_string(),
                column: key.column.clone(),
                value: key.value.clone(),
            }),
        }
    }

    async fn insert(&self, table: &str, mut row: Row) -> Result<Row, RemoteStoreError> {
        self.round_trip(true).await?;
        let mut guard = self.tables.write().await;
        let entry = guard.entry(table.to_string()).or_default();
        if let Some(column) = entry.key_column.clone() {
            match row.get(&column).filter(|v| !v.is_null()).cloned() {
                None => {
                    let key = next_key(&entry.rows, &column);
                    row.insert(column, key);
                }
                Some(value) => {
                    if entry.rows.iter().any(|r| r.get(&column) == Some(&value)) {
                        return Err(RemoteStoreError::Duplicate {
                            table: table.to_string(),
                            column,
                            value,
                        });
                    }
                }
            }
        }
        entry.rows.push(row.clone());
        Ok(row)
    }

    async fn select_joined(&self, query: JoinQuery) -> Result<Vec<JoinedRow>, RemoteStoreError> {
        self.round_trip(false).await?;
        let guard = self.tables.read().await;
        let primary = guard
            .get(&query.table)
            .ok_or_else(|| RemoteStoreError::Backend(format!("unknown table {}", query.table)))?;

        let mut result = Vec::new();
        'rows: for row in primary
            .rows
            .iter()
            .filter(|r| query.filters.iter().all(|f| f.matches(r)))
        {
            let mut joined = HashMap::new();
            for join in &query.joins {
                let local = match row.get(&join.local_column) {
                    None => {
                        return Err(RemoteStoreError::Backend(format!(
                            "column {}.{} does not exist",
                            query.table, join.local_column
                        )));
                    }
                    Some(Value::Null) => continue 'rows,
                    Some(value) => value,
                };
                let matched = guard.get(&join.table).and_then(|t| {
                    t.rows
                        .iter()
                        .find(|r| r.get(&join.foreign_column) == Some(local))
                });
                match matched {
                    Some(secondary) => {
                        joined.insert(join.table.clone(), secondary.clone());
                    }
                    None => continue 'rows,
                }
            }
            result.push(JoinedRow {
                primary: row.clone(),
                joined,
            });
        }
        Ok(result)
    }
}
