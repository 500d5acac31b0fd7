/// A persisted shipping-class taxonomy record.
///
/// `slug` is the natural key: the store holds at most one record per slug.
/// Records are created the first time a derived identity is seen and updated
/// in place when the derived name or description drifts; the sync path never
/// deletes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingClass {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: String,
}

/// What `get_or_create` did to arrive at the returned record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// No record carried the slug; a new one was inserted.
    Created,
    /// A record existed but its name or description differed; it was rewritten.
    Updated,
    /// The stored record already matched the derived values. No write issued.
    Unchanged,
}

/// A shipping class paired with the action taken to reconcile it.
#[derive(Debug, Clone)]
pub struct Reconciled {
    pub class: ShippingClass,
    pub outcome: ReconcileOutcome,
}
