use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::database::repository::Entity;
use crate::types::DbId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: DbId,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
}

impl Category {
    pub fn new(kind: impl Into<String>) -> Self {
        Self { id: 0, kind: kind.into() }
    }
}

impl Entity for Category {
    type Id = DbId;
    type Filter = ();

    const KIND: &'static str = "category";

    fn id(&self) -> DbId {
        self.id
    }

    fn assign_id(&mut self, generated: i64) {
        self.id = generated;
    }

    fn matches(&self, _filter: &()) -> bool {
        true
    }
}
