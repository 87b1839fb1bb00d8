//! PostgreSQL implementations of the repositories.
//!
//! Reads go straight to the pool. Every write runs in its own transaction:
//! the transaction commits on success and is rolled back when dropped on any
//! other exit path.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::artist::ArtistRow;
use crate::database::models::drink::DrinkRow;
use crate::database::models::genres;
use crate::database::models::venue::VenueRow;
use crate::database::models::{
    Artist, ArtistFilter, Category, Drink, Question, QuestionFilter, Show, ShowFilter, Venue,
    VenueFilter,
};
use crate::database::repository::Repository;
use crate::types::DbId;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const QUESTION_COLUMNS: &str = "id, question, answer, category, difficulty";
const VENUE_COLUMNS: &str = "id, name, city, state, address, phone, image_link, facebook_link, \
     website, genres, seeking_talent, seeking_description";
const ARTIST_COLUMNS: &str = "id, name, city, state, phone, image_link, facebook_link, website, \
     genres, seeking_venue, seeking_description";

#[async_trait]
impl Repository<Question> for PgStore {
    async fn find_all(&self, filter: &QuestionFilter) -> Result<Vec<Question>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM questions \
             WHERE ($1::BIGINT IS NULL OR category = $1) \
               AND ($2::TEXT IS NULL OR strpos(lower(question), lower($2)) > 0) \
             ORDER BY id",
            QUESTION_COLUMNS
        );
        let rows = sqlx::query_as::<_, Question>(&sql)
            .bind(filter.category)
            .bind(filter.search.as_deref())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Question>, DatabaseError> {
        let sql = format!("SELECT {} FROM questions WHERE id = $1", QUESTION_COLUMNS);
        let row = sqlx::query_as::<_, Question>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert(&self, question: Question) -> Result<Question, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        let sql = format!(
            "INSERT INTO questions (question, answer, category, difficulty) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            QUESTION_COLUMNS
        );
        let row = sqlx::query_as::<_, Question>(&sql)
            .bind(&question.question)
            .bind(&question.answer)
            .bind(question.category)
            .bind(question.difficulty)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| DatabaseError::from_write(e, "question"))?;
        tx.commit().await?;
        Ok(row)
    }

    async fn update(&self, question: Question) -> Result<Question, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        let sql = format!(
            "UPDATE questions SET question = $2, answer = $3, category = $4, difficulty = $5 \
             WHERE id = $1 RETURNING {}",
            QUESTION_COLUMNS
        );
        let row = sqlx::query_as::<_, Question>(&sql)
            .bind(question.id)
            .bind(&question.question)
            .bind(&question.answer)
            .bind(question.category)
            .bind(question.difficulty)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| DatabaseError::from_write(e, "question"))?
            .ok_or_else(|| DatabaseError::NotFound(format!("question {} not found", question.id)))?;
        tx.commit().await?;
        Ok(row)
    }

    async fn delete(&self, id: DbId) -> Result<bool, DatabaseError> {
        delete_where(&self.pool, "DELETE FROM questions WHERE id = $1", id).await
    }
}

#[async_trait]
impl Repository<Category> for PgStore {
    async fn find_all(&self, _filter: &()) -> Result<Vec<Category>, DatabaseError> {
        let rows = sqlx::query_as::<_, Category>("SELECT id, type FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Category>, DatabaseError> {
        let row = sqlx::query_as::<_, Category>("SELECT id, type FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert(&self, category: Category) -> Result<Category, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (type) VALUES ($1) RETURNING id, type",
        )
        .bind(&category.kind)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| DatabaseError::from_write(e, "category"))?;
        tx.commit().await?;
        Ok(row)
    }

    async fn update(&self, category: Category) -> Result<Category, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query_as::<_, Category>(
            "UPDATE categories SET type = $2 WHERE id = $1 RETURNING id, type",
        )
        .bind(category.id)
        .bind(&category.kind)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DatabaseError::NotFound(format!("category {} not found", category.id)))?;
        tx.commit().await?;
        Ok(row)
    }

    async fn delete(&self, id: DbId) -> Result<bool, DatabaseError> {
        delete_where(&self.pool, "DELETE FROM categories WHERE id = $1", id).await
    }
}

#[async_trait]
impl Repository<Drink> for PgStore {
    async fn find_all(&self, _filter: &()) -> Result<Vec<Drink>, DatabaseError> {
        sqlx::query_as::<_, DrinkRow>("SELECT id, title, recipe FROM drinks ORDER BY id")
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Drink::try_from)
            .collect()
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Drink>, DatabaseError> {
        sqlx::query_as::<_, DrinkRow>("SELECT id, title, recipe FROM drinks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Drink::try_from)
            .transpose()
    }

    async fn insert(&self, drink: Drink) -> Result<Drink, DatabaseError> {
        let recipe = drink.recipe.to_text()?;
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query_as::<_, DrinkRow>(
            "INSERT INTO drinks (title, recipe) VALUES ($1, $2) RETURNING id, title, recipe",
        )
        .bind(&drink.title)
        .bind(&recipe)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| DatabaseError::from_write(e, "drink"))?;
        tx.commit().await?;
        Drink::try_from(row)
    }

    async fn update(&self, drink: Drink) -> Result<Drink, DatabaseError> {
        let recipe = drink.recipe.to_text()?;
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query_as::<_, DrinkRow>(
            "UPDATE drinks SET title = $2, recipe = $3 WHERE id = $1 RETURNING id, title, recipe",
        )
        .bind(drink.id)
        .bind(&drink.title)
        .bind(&recipe)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| DatabaseError::from_write(e, "drink"))?
        .ok_or_else(|| DatabaseError::NotFound(format!("drink {} not found", drink.id)))?;
        tx.commit().await?;
        Drink::try_from(row)
    }

    async fn delete(&self, id: DbId) -> Result<bool, DatabaseError> {
        delete_where(&self.pool, "DELETE FROM drinks WHERE id = $1", id).await
    }
}

#[async_trait]
impl Repository<Venue> for PgStore {
    async fn find_all(&self, filter: &VenueFilter) -> Result<Vec<Venue>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM venues \
             WHERE ($1::TEXT IS NULL OR strpos(lower(name), lower($1)) > 0) \
             ORDER BY id",
            VENUE_COLUMNS
        );
        let rows = sqlx::query_as::<_, VenueRow>(&sql)
            .bind(filter.name_contains.as_deref())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Venue::from).collect())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Venue>, DatabaseError> {
        let sql = format!("SELECT {} FROM venues WHERE id = $1", VENUE_COLUMNS);
        let row = sqlx::query_as::<_, VenueRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Venue::from))
    }

    async fn insert(&self, venue: Venue) -> Result<Venue, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        let sql = format!(
            "INSERT INTO venues (name, city, state, address, phone, image_link, facebook_link, \
             website, genres, seeking_talent, seeking_description) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING {}",
            VENUE_COLUMNS
        );
        let row = sqlx::query_as::<_, VenueRow>(&sql)
            .bind(&venue.name)
            .bind(&venue.city)
            .bind(&venue.state)
            .bind(&venue.address)
            .bind(&venue.phone)
            .bind(&venue.image_link)
            .bind(&venue.facebook_link)
            .bind(&venue.website)
            .bind(genres::join(&venue.genres))
            .bind(venue.seeking_talent)
            .bind(&venue.seeking_description)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| DatabaseError::from_write(e, "venue"))?;
        tx.commit().await?;
        Ok(row.into())
    }

    async fn update(&self, venue: Venue) -> Result<Venue, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        let sql = format!(
            "UPDATE venues SET name = $2, city = $3, state = $4, address = $5, phone = $6, \
             image_link = $7, facebook_link = $8, website = $9, genres = $10, \
             seeking_talent = $11, seeking_description = $12 \
             WHERE id = $1 RETURNING {}",
            VENUE_COLUMNS
        );
        let row = sqlx::query_as::<_, VenueRow>(&sql)
            .bind(venue.id)
            .bind(&venue.name)
            .bind(&venue.city)
            .bind(&venue.state)
            .bind(&venue.address)
            .bind(&venue.phone)
            .bind(&venue.image_link)
            .bind(&venue.facebook_link)
            .bind(&venue.website)
            .bind(genres::join(&venue.genres))
            .bind(venue.seeking_talent)
            .bind(&venue.seeking_description)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| DatabaseError::from_write(e, "venue"))?
            .ok_or_else(|| DatabaseError::NotFound(format!("venue {} not found", venue.id)))?;
        tx.commit().await?;
        Ok(row.into())
    }

    async fn delete(&self, id: DbId) -> Result<bool, DatabaseError> {
        // shows go with it through ON DELETE CASCADE
        delete_where(&self.pool, "DELETE FROM venues WHERE id = $1", id).await
    }
}

#[async_trait]
impl Repository<Artist> for PgStore {
    async fn find_all(&self, filter: &ArtistFilter) -> Result<Vec<Artist>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM artists \
             WHERE ($1::TEXT IS NULL OR strpos(lower(name), lower($1)) > 0) \
             ORDER BY id",
            ARTIST_COLUMNS
        );
        let rows = sqlx::query_as::<_, ArtistRow>(&sql)
            .bind(filter.name_contains.as_deref())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Artist::from).collect())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Artist>, DatabaseError> {
        let sql = format!("SELECT {} FROM artists WHERE id = $1", ARTIST_COLUMNS);
        let row = sqlx::query_as::<_, ArtistRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Artist::from))
    }

    async fn insert(&self, artist: Artist) -> Result<Artist, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        let sql = format!(
            "INSERT INTO artists (name, city, state, phone, image_link, facebook_link, website, \
             genres, seeking_venue, seeking_description) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING {}",
            ARTIST_COLUMNS
        );
        let row = sqlx::query_as::<_, ArtistRow>(&sql)
            .bind(&artist.name)
            .bind(&artist.city)
            .bind(&artist.state)
            .bind(&artist.phone)
            .bind(&artist.image_link)
            .bind(&artist.facebook_link)
            .bind(&artist.website)
            .bind(genres::join(&artist.genres))
            .bind(artist.seeking_venue)
            .bind(&artist.seeking_description)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| DatabaseError::from_write(e, "artist"))?;
        tx.commit().await?;
        Ok(row.into())
    }

    async fn update(&self, artist: Artist) -> Result<Artist, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        let sql = format!(
            "UPDATE artists SET name = $2, city = $3, state = $4, phone = $5, image_link = $6, \
             facebook_link = $7, website = $8, genres = $9, seeking_venue = $10, \
             seeking_description = $11 \
             WHERE id = $1 RETURNING {}",
            ARTIST_COLUMNS
        );
        let row = sqlx::query_as::<_, ArtistRow>(&sql)
            .bind(artist.id)
            .bind(&artist.name)
            .bind(&artist.city)
            .bind(&artist.state)
            .bind(&artist.phone)
            .bind(&artist.image_link)
            .bind(&artist.facebook_link)
            .bind(&artist.website)
            .bind(genres::join(&artist.genres))
            .bind(artist.seeking_venue)
            .bind(&artist.seeking_description)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| DatabaseError::from_write(e, "artist"))?
            .ok_or_else(|| DatabaseError::NotFound(format!("artist {} not found", artist.id)))?;
        tx.commit().await?;
        Ok(row.into())
    }

    async fn delete(&self, id: DbId) -> Result<bool, DatabaseError> {
        delete_where(&self.pool, "DELETE FROM artists WHERE id = $1", id).await
    }
}

#[async_trait]
impl Repository<Show> for PgStore {
    async fn find_all(&self, filter: &ShowFilter) -> Result<Vec<Show>, DatabaseError> {
        let rows = sqlx::query_as::<_, Show>(
            "SELECT artist_id, venue_id, start_time FROM shows \
             WHERE ($1::BIGINT IS NULL OR artist_id = $1) \
               AND ($2::BIGINT IS NULL OR venue_id = $2) \
             ORDER BY start_time, artist_id, venue_id",
        )
        .bind(filter.artist_id)
        .bind(filter.venue_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, (artist_id, venue_id): (DbId, DbId)) -> Result<Option<Show>, DatabaseError> {
        let row = sqlx::query_as::<_, Show>(
            "SELECT artist_id, venue_id, start_time FROM shows \
             WHERE artist_id = $1 AND venue_id = $2",
        )
        .bind(artist_id)
        .bind(venue_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn insert(&self, show: Show) -> Result<Show, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query_as::<_, Show>(
            "INSERT INTO shows (artist_id, venue_id, start_time) VALUES ($1, $2, $3) \
             RETURNING artist_id, venue_id, start_time",
        )
        .bind(show.artist_id)
        .bind(show.venue_id)
        .bind(show.start_time)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| DatabaseError::from_write(e, "show"))?;
        tx.commit().await?;
        Ok(row)
    }

    async fn update(&self, show: Show) -> Result<Show, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query_as::<_, Show>(
            "UPDATE shows SET start_time = $3 WHERE artist_id = $1 AND venue_id = $2 \
             RETURNING artist_id, venue_id, start_time",
        )
        .bind(show.artist_id)
        .bind(show.venue_id)
        .bind(show.start_time)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            DatabaseError::NotFound(format!(
                "show ({}, {}) not found",
                show.artist_id, show.venue_id
            ))
        })?;
        tx.commit().await?;
        Ok(row)
    }

    async fn delete(&self, (artist_id, venue_id): (DbId, DbId)) -> Result<bool, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("DELETE FROM shows WHERE artist_id = $1 AND venue_id = $2")
            .bind(artist_id)
            .bind(venue_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() == 1)
    }
}

async fn delete_where(pool: &PgPool, sql: &str, id: DbId) -> Result<bool, DatabaseError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query(sql).bind(id).execute(&mut *tx).await?;
    if result.rows_affected() != 1 {
        // nothing matched; the dropped transaction rolls back
        return Ok(false);
    }
    tx.commit().await?;
    Ok(true)
}
