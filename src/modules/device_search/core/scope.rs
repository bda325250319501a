use crate::shared::core::errors::ControllerError;
use std::fmt;

/// Store the console is operating for. Resolved once from configuration; an
/// unresolved scope matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Store(i64),
    Unresolved,
}

impl Scope {
    pub fn parse(raw: &str) -> Result<Self, ControllerError> {
        raw.trim()
            .parse::<i64>()
            .map(Scope::Store)
            .map_err(|_| ControllerError::InvalidInput(format!("store id {raw:?} is not numeric")))
    }

    /// Lenient variant for configuration values: absent or non-numeric becomes `Unresolved`.
    pub fn from_setting(raw: Option<&str>) -> Self {
        match raw.map(Scope::parse) {
            Some(Ok(scope)) => scope,
            Some(Err(error)) => {
                tracing::warn!(%error, "store id ignored, searches will match nothing");
                Scope::Unresolved
            }
            None => Scope::Unresolved,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Store(id) => write!(f, "store {id}"),
            Scope::Unresolved => f.write_str("unresolved store"),
        }
    }
}
