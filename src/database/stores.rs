use std::sync::Arc;

use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::memory::MemoryStore;
use crate::database::models::{Artist, Category, Drink, Question, Show, Venue};
use crate::database::postgres::PgStore;
use crate::database::repository::Repository;

#[derive(Clone)]
enum Backend {
    Postgres(PgPool),
    Memory,
}

/// The repositories handed to the services, one per entity type.
#[derive(Clone)]
pub struct Stores {
    pub questions: Arc<dyn Repository<Question>>,
    pub categories: Arc<dyn Repository<Category>>,
    pub drinks: Arc<dyn Repository<Drink>>,
    pub venues: Arc<dyn Repository<Venue>>,
    pub artists: Arc<dyn Repository<Artist>>,
    pub shows: Arc<dyn Repository<Show>>,
    backend: Backend,
}

impl Stores {
    pub fn postgres(pool: PgPool) -> Self {
        let store = Arc::new(PgStore::new(pool.clone()));
        Self {
            questions: store.clone(),
            categories: store.clone(),
            drinks: store.clone(),
            venues: store.clone(),
            artists: store.clone(),
            shows: store,
            backend: Backend::Postgres(pool),
        }
    }

    pub fn memory(store: &MemoryStore) -> Self {
        Self {
            questions: store.questions.clone(),
            categories: store.categories.clone(),
            drinks: store.drinks.clone(),
            venues: store.venues.clone(),
            artists: store.artists.clone(),
            shows: store.shows.clone(),
            backend: Backend::Memory,
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self.backend {
            Backend::Postgres(_) => "postgres",
            Backend::Memory => "memory",
        }
    }

    /// Round trip to the database, if there is one
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        match &self.backend {
            Backend::Postgres(pool) => {
                sqlx::query("SELECT 1").execute(pool).await?;
                Ok(())
            }
            Backend::Memory => Ok(()),
        }
    }
}
