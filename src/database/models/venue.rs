use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::genres;
use crate::database::repository::Entity;
use crate::filter::contains_ignore_case;
use crate::types::DbId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    pub id: DbId,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub genres: Vec<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct VenueFilter {
    pub name_contains: Option<String>,
}

/// Storage shape: genres live in one delimited column
#[derive(Debug, Clone, FromRow)]
pub struct VenueRow {
    pub id: DbId,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub genres: String,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl From<VenueRow> for Venue {
    fn from(row: VenueRow) -> Self {
        Venue {
            id: row.id,
            name: row.name,
            city: row.city,
            state: row.state,
            address: row.address,
            phone: row.phone,
            image_link: row.image_link,
            facebook_link: row.facebook_link,
            website: row.website,
            genres: genres::split(&row.genres),
            seeking_talent: row.seeking_talent,
            seeking_description: row.seeking_description,
        }
    }
}

impl Entity for Venue {
    type Id = DbId;
    type Filter = VenueFilter;

    const KIND: &'static str = "venue";

    fn id(&self) -> DbId {
        self.id
    }

    fn assign_id(&mut self, generated: i64) {
        self.id = generated;
    }

    fn matches(&self, filter: &VenueFilter) -> bool {
        filter
            .name_contains
            .as_deref()
            .map_or(true, |term| contains_ignore_case(&self.name, term))
    }
}
