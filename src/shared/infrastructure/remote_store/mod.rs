// Port describing what the controllers need from the remote relational store.
//
// Purpose
// - Keep both controllers independent of the concrete transport by coding against a trait.
//
// Boundaries
// - Rows travel as JSON objects. Typed decoding happens in the controllers.
// - The in memory adapter backs tests and local development.

pub mod in_memory;

use crate::shared::core::primitives::{OrderBy, Row};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum RemoteStoreError {
    #[error("backend error: {0}")]
    Backend(String),

    #[error("no row in {table} where {column} = {value}")]
    NotFound {
        table: String,
        column: String,
        value: Value,
    },

    #[error("duplicate key in {table}: {column} = {value}")]
    Duplicate {
        table: String,
        column: String,
        value: Value,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    pub table: String,
    pub columns: Vec<String>,
    pub order_by: Option<OrderBy>,
}

/// Equality predicate identifying rows, used both as a write key and as a read filter.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyFilter {
    pub column: String,
    pub value: Value,
}

impl KeyFilter {
    pub fn new(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }

    pub fn matches(&self, row: &Row) -> bool {
        row.get(&self.column) == Some(&self.value)
    }
}

/// Inner join of the primary table against a secondary one:
/// `primary.local_column == secondary.foreign_column`.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinSpec {
    pub table: String,
    pub local_column: String,
    pub foreign_column: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JoinQuery {
    pub table: String,
    pub filters: Vec<KeyFilter>,
    pub joins: Vec<JoinSpec>,
}

/// A primary row together with the matching row of every joined table, keyed by table name.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedRow {
    pub primary: Row,
    pub joined: HashMap<String, Row>,
}

#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn select(&self, query: SelectQuery) -> Result<Vec<Row>, RemoteStoreError>;
    async fn update(&self, table: &str, key: &KeyFilter, patch: Row) -> Result<(), RemoteStoreError>;
    async fn delete(&self, table: &str, key: &KeyFilter) -> Result<(), RemoteStoreError>;
    async fn insert(&self, table: &str, row: Row) -> Result<Row, RemoteStoreError>;
    async fn select_joined(&self, query: JoinQuery) -> Result<Vec<JoinedRow>, RemoteStoreError>;
}
