use async_trait::async_trait;
use chrono::{Duration, Utc};
use meditation_backend::domain::meditation::Meditation;
use meditation_backend::error::{AppError, AppResult};
use meditation_backend::infrastructure::repositories::MeditationRepository;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Meditation store kept in memory so HTTP tests need no database
pub struct InMemoryMeditationRepository {
    rows: Mutex<Vec<Meditation>>,
    reachable: AtomicBool,
}

impl InMemoryMeditationRepository {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            reachable: AtomicBool::new(true),
        }
    }

    /// Insert a meditation directly, bypassing text generation
    pub fn seed(&self, prompt: &str, content: &str) -> Meditation {
        self.insert(prompt, content)
    }

    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn insert(&self, prompt: &str, content: &str) -> Meditation {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        // Strictly increasing timestamps keep list order deterministic
        let created_at = Utc::now() + Duration::milliseconds(id as i64);
        let meditation = Meditation {
            id,
            prompt: prompt.to_string(),
            content: content.to_string(),
            rating: None,
            created_at,
        };
        rows.push(meditation.clone());
        meditation
    }
}

#[async_trait]
impl MeditationRepository for InMemoryMeditationRepository {
    async fn create(&self, prompt: &str, content: &str) -> AppResult<Meditation> {
        Ok(self.insert(prompt, content))
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Meditation>> {
        Ok(self.rows.lock().unwrap().iter().find(|m| m.id == id).cloned())
    }

    async fn list(&self) -> AppResult<Vec<Meditation>> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by_key(|m| (m.created_at, m.id));
        Ok(rows)
    }

    async fn rate(&self, id: i32, rating: i32) -> AppResult<Option<Meditation>> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.iter_mut().find(|m| m.id == id).map(|m| {
            m.rating = Some(rating);
            m.clone()
        }))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|m| m.id != id);
        Ok(rows.len() != before)
    }

    async fn ping(&self) -> AppResult<()> {
        if self.reachable.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(AppError::Internal("store offline".to_string()))
        }
    }
}
