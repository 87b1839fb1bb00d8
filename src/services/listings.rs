//! Venues, artists and the shows that connect them.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::{Validate, ValidationError};

use crate::database::models::genres;
use crate::database::models::{
    Artist, ArtistFilter, Show, ShowFilter, Venue, VenueFilter,
};
use crate::database::{DatabaseError, Repository, Stores};
use crate::error::ApiError;
use crate::middleware::{not_blank, InputBody};
use crate::types::DbId;

fn valid_genres(list: &[String]) -> Result<(), ValidationError> {
    let normalized = genres::normalize(list).map_err(|_| ValidationError::new("genres"))?;
    if genres::join(&normalized).chars().count() > genres::MAX_STORED_LEN {
        return Err(ValidationError::new("genres_too_long"));
    }
    Ok(())
}

fn clean_genres(list: &[String]) -> Result<Vec<String>, ApiError> {
    genres::normalize(list).map_err(ApiError::validation)
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewVenue {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(length(max = 120), custom(function = "not_blank"))]
    pub city: String,
    #[validate(length(max = 120), custom(function = "not_blank"))]
    pub state: String,
    #[validate(length(max = 120), custom(function = "not_blank"))]
    pub address: String,
    #[validate(length(max = 120))]
    pub phone: Option<String>,
    #[validate(length(max = 500))]
    pub image_link: Option<String>,
    #[validate(length(max = 120))]
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "valid_genres"))]
    pub genres: Vec<String>,
    #[serde(default)]
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl InputBody for NewVenue {}

/// Same limits as `NewVenue`; absent fields are left alone
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct VenuePatch {
    #[validate(custom(function = "not_blank"))]
    pub name: Option<String>,
    #[validate(length(max = 120), custom(function = "not_blank"))]
    pub city: Option<String>,
    #[validate(length(max = 120), custom(function = "not_blank"))]
    pub state: Option<String>,
    #[validate(length(max = 120), custom(function = "not_blank"))]
    pub address: Option<String>,
    #[validate(length(max = 120))]
    pub phone: Option<String>,
    #[validate(length(max = 500))]
    pub image_link: Option<String>,
    #[validate(length(max = 120))]
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    #[validate(custom(function = "valid_genres"))]
    pub genres: Option<Vec<String>>,
    pub seeking_talent: Option<bool>,
    pub seeking_description: Option<String>,
}

impl InputBody for VenuePatch {}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewArtist {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(length(max = 120), custom(function = "not_blank"))]
    pub city: String,
    #[validate(length(max = 120), custom(function = "not_blank"))]
    pub state: String,
    #[validate(length(max = 120))]
    pub phone: Option<String>,
    #[validate(length(max = 500))]
    pub image_link: Option<String>,
    #[validate(length(max = 120))]
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "valid_genres"))]
    pub genres: Vec<String>,
    #[serde(default)]
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl InputBody for NewArtist {}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ArtistPatch {
    #[validate(custom(function = "not_blank"))]
    pub name: Option<String>,
    #[validate(length(max = 120), custom(function = "not_blank"))]
    pub city: Option<String>,
    #[validate(length(max = 120), custom(function = "not_blank"))]
    pub state: Option<String>,
    #[validate(length(max = 120))]
    pub phone: Option<String>,
    #[validate(length(max = 500))]
    pub image_link: Option<String>,
    #[validate(length(max = 120))]
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    #[validate(custom(function = "valid_genres"))]
    pub genres: Option<Vec<String>>,
    pub seeking_venue: Option<bool>,
    pub seeking_description: Option<String>,
}

impl InputBody for ArtistPatch {}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewShow {
    #[validate(range(min = 1))]
    pub artist_id: DbId,
    #[validate(range(min = 1))]
    pub venue_id: DbId,
    pub start_time: DateTime<Utc>,
}

impl InputBody for NewShow {}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SearchTerm {
    #[serde(default)]
    pub search_term: String,
}

impl InputBody for SearchTerm {}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Summary {
    pub id: DbId,
    pub name: String,
    pub num_upcoming_shows: usize,
}

#[derive(Debug, Serialize)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<Summary>,
}

#[derive(Debug, Serialize)]
pub struct VenueAreas {
    pub areas: Vec<Area>,
}

#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<Summary>,
}

#[derive(Debug, Serialize)]
pub struct ArtistLink {
    pub id: DbId,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ArtistList {
    pub artists: Vec<ArtistLink>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShowAtVenue {
    pub artist_id: DbId,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShowByArtist {
    pub venue_id: DbId,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct VenueDetail {
    #[serde(flatten)]
    pub venue: Venue,
    pub past_shows: Vec<ShowAtVenue>,
    pub upcoming_shows: Vec<ShowAtVenue>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Debug, Serialize)]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub artist: Artist,
    pub past_shows: Vec<ShowByArtist>,
    pub upcoming_shows: Vec<ShowByArtist>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Debug, Serialize)]
pub struct ShowListing {
    pub venue_id: DbId,
    pub venue_name: String,
    pub artist_id: DbId,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ShowList {
    pub shows: Vec<ShowListing>,
}

#[derive(Debug, Serialize)]
pub struct VenueBody {
    pub venue: Venue,
}

#[derive(Debug, Serialize)]
pub struct ArtistBody {
    pub artist: Artist,
}

#[derive(Debug, Serialize)]
pub struct ShowBody {
    pub show: Show,
}

#[derive(Debug, Serialize)]
pub struct Deleted {
    pub deleted: DbId,
}

/// Split `shows` at `now` into (past, upcoming), keeping order
fn split_at_now<T>(shows: Vec<(Show, T)>, now: DateTime<Utc>) -> (Vec<T>, Vec<T>) {
    let mut past = Vec::new();
    let mut upcoming = Vec::new();
    for (show, item) in shows {
        if show.is_upcoming(now) {
            upcoming.push(item);
        } else {
            past.push(item);
        }
    }
    (past, upcoming)
}

fn upcoming_counts(shows: &[Show], now: DateTime<Utc>, key: impl Fn(&Show) -> DbId) -> HashMap<DbId, usize> {
    let mut counts = HashMap::new();
    for show in shows.iter().filter(|s| s.is_upcoming(now)) {
        *counts.entry(key(show)).or_insert(0) += 1;
    }
    counts
}

#[derive(Clone)]
pub struct ListingService {
    venues: Arc<dyn Repository<Venue>>,
    artists: Arc<dyn Repository<Artist>>,
    shows: Arc<dyn Repository<Show>>,
}

impl ListingService {
    pub fn new(stores: &Stores) -> Self {
        Self {
            venues: stores.venues.clone(),
            artists: stores.artists.clone(),
            shows: stores.shows.clone(),
        }
    }

    async fn all_shows(&self) -> Result<Vec<Show>, ApiError> {
        Ok(self.shows.find_all(&ShowFilter::default()).await?)
    }

    /// Venues grouped by (city, state), areas ordered by state then city
    pub async fn venue_areas(&self, now: DateTime<Utc>) -> Result<VenueAreas, ApiError> {
        let venues = self.venues.find_all(&VenueFilter::default()).await?;
        let counts = upcoming_counts(&self.all_shows().await?, now, |s| s.venue_id);

        let mut areas: BTreeMap<(String, String), Vec<Summary>> = BTreeMap::new();
        for venue in venues {
            areas
                .entry((venue.state.clone(), venue.city.clone()))
                .or_default()
                .push(Summary {
                    id: venue.id,
                    num_upcoming_shows: counts.get(&venue.id).copied().unwrap_or(0),
                    name: venue.name,
                });
        }

        Ok(VenueAreas {
            areas: areas
                .into_iter()
                .map(|((state, city), mut venues)| {
                    venues.sort_by_key(|v| v.id);
                    Area { city, state, venues }
                })
                .collect(),
        })
    }

    pub async fn venue(&self, id: DbId, now: DateTime<Utc>) -> Result<VenueDetail, ApiError> {
        let venue = self.venues.find_404(id).await?;
        let shows = self
            .shows
            .find_all(&ShowFilter { venue_id: Some(id), artist_id: None })
            .await?;

        let mut decorated = Vec::with_capacity(shows.len());
        for show in shows {
            // a show always references an existing artist; skip if it vanished mid-request
            if let Some(artist) = self.artists.find_by_id(show.artist_id).await? {
                let item = ShowAtVenue {
                    artist_id: artist.id,
                    artist_name: artist.name,
                    artist_image_link: artist.image_link,
                    start_time: show.start_time,
                };
                decorated.push((show, item));
            }
        }
        let (past_shows, upcoming_shows) = split_at_now(decorated, now);

        Ok(VenueDetail {
            venue,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        })
    }

    pub async fn search_venues(&self, term: &str, now: DateTime<Utc>) -> Result<SearchResults, ApiError> {
        let filter = VenueFilter { name_contains: Some(term.trim().to_string()) };
        let venues = self.venues.find_all(&filter).await?;
        let counts = upcoming_counts(&self.all_shows().await?, now, |s| s.venue_id);
        let data: Vec<Summary> = venues
            .into_iter()
            .map(|v| Summary {
                id: v.id,
                num_upcoming_shows: counts.get(&v.id).copied().unwrap_or(0),
                name: v.name,
            })
            .collect();
        Ok(SearchResults { count: data.len(), data })
    }

    pub async fn create_venue(&self, input: NewVenue) -> Result<VenueBody, ApiError> {
        let venue = self
            .venues
            .insert(Venue {
                id: 0,
                name: input.name.trim().to_string(),
                city: input.city.trim().to_string(),
                state: input.state.trim().to_string(),
                address: input.address.trim().to_string(),
                phone: input.phone,
                image_link: input.image_link,
                facebook_link: input.facebook_link,
                website: input.website,
                genres: clean_genres(&input.genres)?,
                seeking_talent: input.seeking_talent,
                seeking_description: input.seeking_description,
            })
            .await?;
        info!(id = venue.id, name = %venue.name, "Venue was successfully listed");
        Ok(VenueBody { venue })
    }

    pub async fn update_venue(&self, id: DbId, patch: VenuePatch) -> Result<VenueBody, ApiError> {
        let mut venue = self.venues.find_404(id).await?;
        if let Some(v) = patch.name {
            venue.name = v.trim().to_string();
        }
        if let Some(v) = patch.city {
            venue.city = v.trim().to_string();
        }
        if let Some(v) = patch.state {
            venue.state = v.trim().to_string();
        }
        if let Some(v) = patch.address {
            venue.address = v.trim().to_string();
        }
        if patch.phone.is_some() {
            venue.phone = patch.phone;
        }
        if patch.image_link.is_some() {
            venue.image_link = patch.image_link;
        }
        if patch.facebook_link.is_some() {
            venue.facebook_link = patch.facebook_link;
        }
        if patch.website.is_some() {
            venue.website = patch.website;
        }
        if let Some(list) = patch.genres {
            venue.genres = clean_genres(&list)?;
        }
        if let Some(v) = patch.seeking_talent {
            venue.seeking_talent = v;
        }
        if patch.seeking_description.is_some() {
            venue.seeking_description = patch.seeking_description;
        }
        let venue = self.venues.update(venue).await?;
        info!(id, "Updated venue");
        Ok(VenueBody { venue })
    }

    /// Removes the venue and, with it, its shows
    pub async fn delete_venue(&self, id: DbId) -> Result<Deleted, ApiError> {
        if !self.venues.delete(id).await? {
            return Err(ApiError::not_found("resource not found"));
        }
        info!(id, "Deleted venue");
        Ok(Deleted { deleted: id })
    }

    pub async fn artists(&self) -> Result<ArtistList, ApiError> {
        let artists = self.artists.find_all(&ArtistFilter::default()).await?;
        Ok(ArtistList {
            artists: artists
                .into_iter()
                .map(|a| ArtistLink { id: a.id, name: a.name })
                .collect(),
        })
    }

    pub async fn artist(&self, id: DbId, now: DateTime<Utc>) -> Result<ArtistDetail, ApiError> {
        let artist = self.artists.find_404(id).await?;
        let shows = self
            .shows
            .find_all(&ShowFilter { artist_id: Some(id), venue_id: None })
            .await?;

        let mut decorated = Vec::with_capacity(shows.len());
        for show in shows {
            if let Some(venue) = self.venues.find_by_id(show.venue_id).await? {
                let item = ShowByArtist {
                    venue_id: venue.id,
                    venue_name: venue.name,
                    venue_image_link: venue.image_link,
                    start_time: show.start_time,
                };
                decorated.push((show, item));
            }
        }
        let (past_shows, upcoming_shows) = split_at_now(decorated, now);

        Ok(ArtistDetail {
            artist,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        })
    }

    pub async fn search_artists(&self, term: &str, now: DateTime<Utc>) -> Result<SearchResults, ApiError> {
        let filter = ArtistFilter { name_contains: Some(term.trim().to_string()) };
        let artists = self.artists.find_all(&filter).await?;
        let counts = upcoming_counts(&self.all_shows().await?, now, |s| s.artist_id);
        let data: Vec<Summary> = artists
            .into_iter()
            .map(|a| Summary {
                id: a.id,
                num_upcoming_shows: counts.get(&a.id).copied().unwrap_or(0),
                name: a.name,
            })
            .collect();
        Ok(SearchResults { count: data.len(), data })
    }

    pub async fn create_artist(&self, input: NewArtist) -> Result<ArtistBody, ApiError> {
        let artist = self
            .artists
            .insert(Artist {
                id: 0,
                name: input.name.trim().to_string(),
                city: input.city.trim().to_string(),
                state: input.state.trim().to_string(),
                phone: input.phone,
                image_link: input.image_link,
                facebook_link: input.facebook_link,
                website: input.website,
                genres: clean_genres(&input.genres)?,
                seeking_venue: input.seeking_venue,
                seeking_description: input.seeking_description,
            })
            .await?;
        info!(id = artist.id, name = %artist.name, "Artist was successfully listed");
        Ok(ArtistBody { artist })
    }

    pub async fn update_artist(&self, id: DbId, patch: ArtistPatch) -> Result<ArtistBody, ApiError> {
        let mut artist = self.artists.find_404(id).await?;
        if let Some(v) = patch.name {
            artist.name = v.trim().to_string();
        }
        if let Some(v) = patch.city {
            artist.city = v.trim().to_string();
        }
        if let Some(v) = patch.state {
            artist.state = v.trim().to_string();
        }
        if patch.phone.is_some() {
            artist.phone = patch.phone;
        }
        if patch.image_link.is_some() {
            artist.image_link = patch.image_link;
        }
        if patch.facebook_link.is_some() {
            artist.facebook_link = patch.facebook_link;
        }
        if patch.website.is_some() {
            artist.website = patch.website;
        }
        if let Some(list) = patch.genres {
            artist.genres = clean_genres(&list)?;
        }
        if let Some(v) = patch.seeking_venue {
            artist.seeking_venue = v;
        }
        if patch.seeking_description.is_some() {
            artist.seeking_description = patch.seeking_description;
        }
        let artist = self.artists.update(artist).await?;
        info!(id, "Updated artist");
        Ok(ArtistBody { artist })
    }

    pub async fn delete_artist(&self, id: DbId) -> Result<Deleted, ApiError> {
        if !self.artists.delete(id).await? {
            return Err(ApiError::not_found("resource not found"));
        }
        info!(id, "Deleted artist");
        Ok(Deleted { deleted: id })
    }

    /// Every show, soonest first, with both sides' names
    pub async fn shows(&self) -> Result<ShowList, ApiError> {
        let venues: HashMap<DbId, Venue> = self
            .venues
            .find_all(&VenueFilter::default())
            .await?
            .into_iter()
            .map(|v| (v.id, v))
            .collect();
        let artists: HashMap<DbId, Artist> = self
            .artists
            .find_all(&ArtistFilter::default())
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect();

        let shows = self
            .all_shows()
            .await?
            .into_iter()
            .filter_map(|show| {
                let venue = venues.get(&show.venue_id)?;
                let artist = artists.get(&show.artist_id)?;
                Some(ShowListing {
                    venue_id: venue.id,
                    venue_name: venue.name.clone(),
                    artist_id: artist.id,
                    artist_name: artist.name.clone(),
                    artist_image_link: artist.image_link.clone(),
                    start_time: show.start_time,
                })
            })
            .collect();
        Ok(ShowList { shows })
    }

    /// Book an artist at a venue. Both must exist (else 422, also when one is
    /// deleted between the check and the insert); a second booking of the
    /// same pair is a conflict.
    pub async fn create_show(&self, input: NewShow) -> Result<ShowBody, ApiError> {
        if self.artists.find_by_id(input.artist_id).await?.is_none() {
            return Err(ApiError::unprocessable(format!("artist {} does not exist", input.artist_id)));
        }
        if self.venues.find_by_id(input.venue_id).await?.is_none() {
            return Err(ApiError::unprocessable(format!("venue {} does not exist", input.venue_id)));
        }

        let show = self
            .shows
            .insert(Show {
                artist_id: input.artist_id,
                venue_id: input.venue_id,
                start_time: input.start_time,
            })
            .await
            .map_err(|e| match e {
                DatabaseError::Conflict(_) => {
                    ApiError::conflict("This artist is already booked at this venue")
                }
                other => other.into(),
            })?;
        info!(artist_id = show.artist_id, venue_id = show.venue_id, "Show was successfully listed");
        Ok(ShowBody { show })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::database::MemoryStore;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 6, 1, 12, 0, 0).unwrap()
    }

    fn venue(name: &str, city: &str, state: &str) -> Venue {
        Venue {
            id: 0,
            name: name.into(),
            city: city.into(),
            state: state.into(),
            address: "1 Main St".into(),
            phone: None,
            image_link: Some(format!("https://img.test/{}.png", name.len())),
            facebook_link: None,
            website: None,
            genres: vec!["Jazz".into()],
            seeking_talent: true,
            seeking_description: None,
        }
    }

    fn artist(name: &str) -> Artist {
        Artist {
            id: 0,
            name: name.into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            phone: None,
            image_link: None,
            facebook_link: None,
            website: None,
            genres: vec![],
            seeking_venue: false,
            seeking_description: None,
        }
    }

    fn seeded() -> (MemoryStore, ListingService) {
        let store = MemoryStore::new();
        store.venues.seed([
            venue("The Musical Hop", "San Francisco", "CA"),
            venue("The Dueling Pianos Bar", "New York", "NY"),
            venue("Park Square Live Music & Coffee", "San Francisco", "CA"),
        ]);
        store.artists.seed([artist("Guns N Petals"), artist("Matt Quevedo"), artist("The Wild Sax Band")]);
        store.shows.seed([
            Show { artist_id: 1, venue_id: 1, start_time: now() - Duration::days(30) },
            Show { artist_id: 2, venue_id: 3, start_time: now() + Duration::days(3) },
            Show { artist_id: 3, venue_id: 3, start_time: now() + Duration::days(10) },
            Show { artist_id: 1, venue_id: 3, start_time: now() - Duration::days(1) },
        ]);
        let service = ListingService::new(&Stores::memory(&store));
        (store, service)
    }

    #[tokio::test]
    async fn areas_are_grouped_and_ordered_by_state() {
        let (_, service) = seeded();
        let areas = service.venue_areas(now()).await.unwrap().areas;
        assert_eq!(areas.len(), 2);
        assert_eq!((areas[0].state.as_str(), areas[0].city.as_str()), ("CA", "San Francisco"));
        assert_eq!(areas[0].venues.iter().map(|v| v.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(areas[0].venues[1].num_upcoming_shows, 2);
        assert_eq!(areas[1].state, "NY");
    }

    #[tokio::test]
    async fn venue_detail_splits_past_and_upcoming() {
        let (_, service) = seeded();
        let detail = service.venue(3, now()).await.unwrap();
        assert_eq!(detail.past_shows_count, 1);
        assert_eq!(detail.upcoming_shows_count, 2);
        assert_eq!(detail.upcoming_shows[0].artist_name, "Matt Quevedo");
        assert_eq!(detail.past_shows[0].artist_id, 1);

        assert!(service.venue(99, now()).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn artist_detail_lists_venues() {
        let (_, service) = seeded();
        let detail = service.artist(1, now()).await.unwrap();
        assert_eq!(detail.past_shows_count, 2);
        assert_eq!(detail.upcoming_shows_count, 0);
        assert!(detail.past_shows.iter().any(|s| s.venue_name == "The Musical Hop"));
    }

    #[tokio::test]
    async fn search_is_case_insensitive_and_empty_matches_all() {
        let (_, service) = seeded();
        let hop = service.search_venues("hop", now()).await.unwrap();
        assert_eq!(hop.count, 1);
        assert_eq!(hop.data[0].name, "The Musical Hop");

        let music = service.search_venues("Music", now()).await.unwrap();
        assert_eq!(music.count, 2);

        assert_eq!(service.search_artists("", now()).await.unwrap().count, 3);
        assert_eq!(service.search_artists("band", now()).await.unwrap().data[0].num_upcoming_shows, 1);
    }

    #[tokio::test]
    async fn deleting_an_artist_drops_their_shows() {
        let (store, service) = seeded();
        service.delete_artist(1).await.unwrap();
        assert_eq!(store.shows.len(), 2);
        assert!(service.delete_artist(1).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn shows_need_both_sides_and_are_unique() {
        let (store, service) = seeded();
        let when = now() + Duration::days(60);

        let err = service
            .create_show(NewShow { artist_id: 99, venue_id: 1, start_time: when })
            .await
            .unwrap_err();
        assert_eq!(err.status_code().as_u16(), 422);

        service
            .create_show(NewShow { artist_id: 2, venue_id: 2, start_time: when })
            .await
            .unwrap();
        let dup = service
            .create_show(NewShow { artist_id: 2, venue_id: 2, start_time: when })
            .await
            .unwrap_err();
        assert_eq!(dup.error_code(), "CONFLICT");
        assert_eq!(store.shows.len(), 5);

        let listing = service.shows().await.unwrap().shows;
        assert_eq!(listing.len(), 5);
        assert_eq!(listing[0].artist_name, "Guns N Petals");
    }

    #[tokio::test]
    async fn venue_patch_and_genres() {
        let (_, service) = seeded();
        let patched = service
            .update_venue(
                2,
                VenuePatch {
                    genres: Some(vec![" Classical ".into(), "R&B".into()]),
                    seeking_talent: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .venue;
        assert_eq!(patched.genres, vec!["Classical", "R&B"]);
        assert!(!patched.seeking_talent);
        assert_eq!(patched.name, "The Dueling Pianos Bar");

        let bad = VenuePatch { genres: Some(vec!["Rock, Pop".into()]), ..Default::default() };
        assert!(bad.validate().is_err());

        let crowded = VenuePatch {
            genres: Some((0..20).map(|i| format!("Genre {i}")).collect()),
            ..Default::default()
        };
        assert!(crowded.validate().is_err());

        let blank = VenuePatch { city: Some("  ".into()), ..Default::default() };
        assert!(blank.validate().is_err());
        let long_phone = ArtistPatch { phone: Some("5".repeat(121)), ..Default::default() };
        assert!(long_phone.validate().is_err());
    }
}
