/// The remote write a confirmed mutation translates into.
#[derive(Debug, Clone, PartialEq)]
pub enum PlannedWrite<S> {
    Remove,
    SetStatus { from: S, to: S },
}
