use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::genres;
use crate::database::repository::Entity;
use crate::filter::contains_ignore_case;
use crate::types::DbId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: DbId,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub genres: Vec<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ArtistFilter {
    pub name_contains: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct ArtistRow {
    pub id: DbId,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub genres: String,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl From<ArtistRow> for Artist {
    fn from(row: ArtistRow) -> Self {
        Artist {
            id: row.id,
            name: row.name,
            city: row.city,
            state: row.state,
            phone: row.phone,
            image_link: row.image_link,
            facebook_link: row.facebook_link,
            website: row.website,
            genres: genres::split(&row.genres),
            seeking_venue: row.seeking_venue,
            seeking_description: row.seeking_description,
        }
    }
}

impl Entity for Artist {
    type Id = DbId;
    type Filter = ArtistFilter;

    const KIND: &'static str = "artist";

    fn id(&self) -> DbId {
        self.id
    }

    fn assign_id(&mut self, generated: i64) {
        self.id = generated;
    }

    fn matches(&self, filter: &ArtistFilter) -> bool {
        filter
            .name_contains
            .as_deref()
            .map_or(true, |term| contains_ignore_case(&self.name, term))
    }
}
