use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::database::repository::Entity;
use crate::types::DbId;

/// A booking of an artist at a venue. The (artist, venue) pair is the identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Show {
    pub artist_id: DbId,
    pub venue_id: DbId,
    pub start_time: DateTime<Utc>,
}

impl Show {
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.start_time > now
    }
}

#[derive(Debug, Clone, Default)]
pub struct ShowFilter {
    pub artist_id: Option<DbId>,
    pub venue_id: Option<DbId>,
}

impl Entity for Show {
    type Id = (DbId, DbId);
    type Filter = ShowFilter;

    const KIND: &'static str = "show";

    fn id(&self) -> (DbId, DbId) {
        (self.artist_id, self.venue_id)
    }

    fn matches(&self, filter: &ShowFilter) -> bool {
        filter.artist_id.map_or(true, |id| id == self.artist_id)
            && filter.venue_id.map_or(true, |id| id == self.venue_id)
    }

    fn order(a: &Self, b: &Self) -> Ordering {
        a.start_time
            .cmp(&b.start_time)
            .then(a.artist_id.cmp(&b.artist_id))
            .then(a.venue_id.cmp(&b.venue_id))
    }
}
