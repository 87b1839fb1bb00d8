use std::cmp::Ordering;
use std::fmt::Debug;

use async_trait::async_trait;

use crate::database::manager::DatabaseError;

/// A row type owned by the relational store.
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Copy + Eq + Debug + Send + Sync + 'static;
    /// Criteria accepted by `Repository::find_all`; `Default` selects everything.
    type Filter: Default + Send + Sync;

    /// Singular noun used in error messages
    const KIND: &'static str;

    fn id(&self) -> Self::Id;

    /// Called by stores that generate surrogate keys. Entities with natural
    /// identity keep the default no-op.
    fn assign_id(&mut self, _generated: i64) {}

    fn matches(&self, filter: &Self::Filter) -> bool;

    /// Value that must be unique across the table, if any
    fn unique_key(&self) -> Option<&str> {
        None
    }

    /// Default ordering of `find_all` results
    fn order(_a: &Self, _b: &Self) -> Ordering {
        Ordering::Equal
    }
}

/// Data-access capability for one entity type.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Every row matching `filter`, in the store's default order
    async fn find_all(&self, filter: &E::Filter) -> Result<Vec<E>, DatabaseError>;

    async fn find_by_id(&self, id: E::Id) -> Result<Option<E>, DatabaseError>;

    /// Persist a new row and return it as stored (with generated keys)
    async fn insert(&self, entity: E) -> Result<E, DatabaseError>;

    /// Replace the row with the same id; `NotFound` if there is none
    async fn update(&self, entity: E) -> Result<E, DatabaseError>;

    /// Remove the row with `id`. Returns `false` and leaves the store
    /// untouched when no such row exists.
    async fn delete(&self, id: E::Id) -> Result<bool, DatabaseError>;

    async fn find_404(&self, id: E::Id) -> Result<E, DatabaseError> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("{} {:?} not found", E::KIND, id)))
    }
}
