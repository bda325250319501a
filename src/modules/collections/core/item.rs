// Contract every record managed by a collection controller fulfils.
//
// Purpose
// - Fix per entity kind: the remote table, the key column, the projection and the
//   two-state column a mutation may flip.

use crate::shared::core::primitives::OrderBy;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::str::FromStr;

/// A column with exactly two values, e.g. active/inactive or approved/not approved.
pub trait TwoStateStatus:
    Debug + Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// The enumerated values a dropdown may offer.
    const OPTIONS: [Self; 2];

    fn complement(&self) -> Self;

    fn label(&self) -> &'static str;
}

pub trait CollectionItem:
    Debug + Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    type Id: Debug + Display + Clone + Eq + Hash + FromStr + Serialize + Send + Sync + 'static;
    type Status: TwoStateStatus;

    const KIND: &'static str;
    const ID_FIELD: &'static str;
    const STATUS_FIELD: &'static str;
    const PROJECTION: &'static [&'static str];

    fn order_by() -> Option<OrderBy> {
        None
    }

    fn id(&self) -> &Self::Id;
    fn status(&self) -> &Self::Status;
    fn set_status(&mut self, status: Self::Status);
}
