//! In-process implementation of the repositories, used by tests and by
//! `--memory` runs. Each table sits behind one mutex, so every operation is
//! atomic and a failed write leaves the table as it was.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{Artist, Category, Drink, Question, Show, Venue};
use crate::database::repository::{Entity, Repository};

type DeleteHook<E> = Box<dyn Fn(<E as Entity>::Id) + Send + Sync>;

struct Table<E> {
    rows: Vec<E>,
    next_id: i64,
}

pub struct MemoryRepository<E: Entity> {
    table: Mutex<Table<E>>,
    calls: AtomicUsize,
    unavailable: AtomicBool,
    on_delete: Option<DeleteHook<E>>,
}

impl<E: Entity> Default for MemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> MemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            table: Mutex::new(Table { rows: Vec::new(), next_id: 1 }),
            calls: AtomicUsize::new(0),
            unavailable: AtomicBool::new(false),
            on_delete: None,
        }
    }

    /// Run `hook` after a row is removed (cascades to dependent tables)
    pub fn with_on_delete(mut self, hook: impl Fn(E::Id) + Send + Sync + 'static) -> Self {
        self.on_delete = Some(Box::new(hook));
        self
    }

    /// Number of repository calls made so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Make every subsequent call fail with `DatabaseError::Unavailable`
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Insert fixture rows without counting calls. Ids are assigned in order.
    pub fn seed(&self, rows: impl IntoIterator<Item = E>) -> Vec<E> {
        let mut table = self.lock();
        rows.into_iter()
            .map(|mut row| {
                row.assign_id(table.next_id);
                table.next_id += 1;
                table.rows.push(row.clone());
                row
            })
            .collect()
    }

    /// Keep only rows matching `keep`
    pub fn retain(&self, keep: impl Fn(&E) -> bool) {
        self.lock().rows.retain(|row| keep(row));
    }

    pub fn len(&self) -> usize {
        self.lock().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Table<E>> {
        // a panic while holding the lock cannot leave a half-applied row
        self.table.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn enter(&self) -> Result<MutexGuard<'_, Table<E>>, DatabaseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DatabaseError::Unavailable);
        }
        Ok(self.lock())
    }

    fn check_unique(table: &Table<E>, candidate: &E, skip: Option<E::Id>) -> Result<(), DatabaseError> {
        let Some(key) = candidate.unique_key() else {
            return Ok(());
        };
        let taken = table
            .rows
            .iter()
            .filter(|row| Some(row.id()) != skip)
            .any(|row| row.unique_key() == Some(key));
        if taken {
            return Err(DatabaseError::Conflict(format!("{} already exists", E::KIND)));
        }
        Ok(())
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for MemoryRepository<E> {
    async fn find_all(&self, filter: &E::Filter) -> Result<Vec<E>, DatabaseError> {
        let table = self.enter()?;
        let mut rows: Vec<E> = table.rows.iter().filter(|row| row.matches(filter)).cloned().collect();
        rows.sort_by(E::order);
        Ok(rows)
    }

    async fn find_by_id(&self, id: E::Id) -> Result<Option<E>, DatabaseError> {
        let table = self.enter()?;
        Ok(table.rows.iter().find(|row| row.id() == id).cloned())
    }

    async fn insert(&self, mut entity: E) -> Result<E, DatabaseError> {
        let mut table = self.enter()?;
        entity.assign_id(table.next_id);
        if table.rows.iter().any(|row| row.id() == entity.id()) {
            return Err(DatabaseError::Conflict(format!("{} already exists", E::KIND)));
        }
        Self::check_unique(&table, &entity, None)?;
        table.next_id += 1;
        table.rows.push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: E) -> Result<E, DatabaseError> {
        let mut table = self.enter()?;
        let id = entity.id();
        Self::check_unique(&table, &entity, Some(id))?;
        let slot = table
            .rows
            .iter_mut()
            .find(|row| row.id() == id)
            .ok_or_else(|| DatabaseError::NotFound(format!("{} {:?} not found", E::KIND, id)))?;
        *slot = entity.clone();
        Ok(entity)
    }

    async fn delete(&self, id: E::Id) -> Result<bool, DatabaseError> {
        let removed = {
            let mut table = self.enter()?;
            let before = table.rows.len();
            table.rows.retain(|row| row.id() != id);
            table.rows.len() != before
        };
        if removed {
            if let Some(hook) = &self.on_delete {
                hook(id);
            }
        }
        Ok(removed)
    }
}

/// One memory repository per table, with venue/artist deletes cascading to shows.
#[derive(Clone)]
pub struct MemoryStore {
    pub questions: Arc<MemoryRepository<Question>>,
    pub categories: Arc<MemoryRepository<Category>>,
    pub drinks: Arc<MemoryRepository<Drink>>,
    pub venues: Arc<MemoryRepository<Venue>>,
    pub artists: Arc<MemoryRepository<Artist>>,
    pub shows: Arc<MemoryRepository<Show>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        let shows = Arc::new(MemoryRepository::<Show>::new());

        let venue_shows = Arc::clone(&shows);
        let venues = MemoryRepository::<Venue>::new()
            .with_on_delete(move |venue_id| venue_shows.retain(|s| s.venue_id != venue_id));

        let artist_shows = Arc::clone(&shows);
        let artists = MemoryRepository::<Artist>::new()
            .with_on_delete(move |artist_id| artist_shows.retain(|s| s.artist_id != artist_id));

        Self {
            questions: Arc::new(MemoryRepository::new()),
            categories: Arc::new(MemoryRepository::new()),
            drinks: Arc::new(MemoryRepository::new()),
            venues: Arc::new(venues),
            artists: Arc::new(artists),
            shows,
        }
    }

    /// Total repository calls across every table
    pub fn calls(&self) -> usize {
        self.questions.calls()
            + self.categories.calls()
            + self.drinks.calls()
            + self.venues.calls()
            + self.artists.calls()
            + self.shows.calls()
    }
}
