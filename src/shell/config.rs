// Console configuration, read once at startup.
//
// The store id normally comes from the operator's session. Here it is an environment
// value; a missing or non-numeric id does not stop the console, searches simply
// match nothing.

use crate::modules::device_search::core::schema::DeviceJoinSchema;
use crate::modules::device_search::core::scope::Scope;
use anyhow::Context;
use std::net::SocketAddr;

pub const BIND_ADDR: &str = "CONSOLE_BIND_ADDR";
pub const STORE_ID: &str = "CONSOLE_STORE_ID";
pub const SALE_KEY: &str = "CONSOLE_SALE_KEY";
pub const PRODUCT_KEY: &str = "CONSOLE_PRODUCT_KEY";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleConfig {
    pub bind_addr: SocketAddr,
    pub scope: Scope,
    pub join_schema: DeviceJoinSchema,
}

impl ConsoleConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let raw_addr = lookup(BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .parse()
            .with_context(|| format!("{BIND_ADDR}={raw_addr} is not a socket address"))?;

        let mut join_schema = DeviceJoinSchema::default();
        if let Some(sale_key) = lookup(SALE_KEY) {
            join_schema.sale_key = sale_key;
        }
        if let Some(product_key) = lookup(PRODUCT_KEY) {
            join_schema.product_key = product_key;
        }

        Ok(Self {
            bind_addr,
            scope: Scope::from_setting(lookup(STORE_ID).as_deref()),
            join_schema,
        })
    }
}

#[cfg(test)]
mod console_config_tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[rstest]
    fn it_should_fall_back_to_defaults() {
        let config = ConsoleConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.scope, Scope::Unresolved);
        assert_eq!(config.join_schema, DeviceJoinSchema::default());
    }

    #[rstest]
    fn it_should_read_every_setting() {
        let config = ConsoleConfig::from_lookup(lookup(&[
            (BIND_ADDR, "127.0.0.1:9000"),
            (STORE_ID, "42"),
            (SALE_KEY, "sale_id"),
            (PRODUCT_KEY, "item_id"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.scope, Scope::Store(42));
        assert_eq!(config.join_schema.sale_key, "sale_id");
        assert_eq!(config.join_schema.product_key, "item_id");
    }

    #[rstest]
    fn it_should_treat_a_non_numeric_store_id_as_unresolved() {
        let config = ConsoleConfig::from_lookup(lookup(&[(STORE_ID, "main-street")])).unwrap();
        assert_eq!(config.scope, Scope::Unresolved);
    }

    #[rstest]
    fn it_should_fail_on_an_invalid_bind_address() {
        let result = ConsoleConfig::from_lookup(lookup(&[(BIND_ADDR, "localhost")]));
        assert!(result.unwrap_err().to_string().contains(BIND_ADDR));
    }
}
