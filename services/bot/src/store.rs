//! Table of challenges waiting for an opponent
//!
//! Games live in process memory behind a single lock. The `GameStore` trait
//! is the seam for moving them to an external store.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::game::Choice;

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Challenge issued and not yet answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    pub challenger_id: String,
    pub choice: Choice,
    pub created_at: DateTime<Utc>,
}

/// Keyed store of in-progress games
#[async_trait]
pub trait GameStore: Send + Sync {
    /// Insert a game, replacing any game already stored under `session_id`
    async fn create(&self, session_id: &str, challenger_id: &str, choice: Choice) -> Result<()>;

    /// Game stored under `session_id`
    #[allow(dead_code)]
    async fn get(&self, session_id: &str) -> Result<Option<GameSession>>;

    /// Drop the game stored under `session_id`; missing ids are ignored
    #[allow(dead_code)]
    async fn remove(&self, session_id: &str) -> Result<()>;

    /// Remove and return the game stored under `session_id` in one step
    async fn take(&self, session_id: &str) -> Result<Option<GameSession>>;

    /// Number of games waiting for a result
    async fn len(&self) -> Result<usize>;
}

/// Process-local game store
#[derive(Clone)]
pub struct InMemoryGameStore {
    clock: Arc<dyn Clock>,
    games: Arc<Mutex<HashMap<String, GameSession>>>,
}

impl InMemoryGameStore {
    /// Create an empty store stamping games with the wall clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty store stamping games with `clock`
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            games: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryGameStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GameStore for InMemoryGameStore {
    async fn create(&self, session_id: &str, challenger_id: &str, choice: Choice) -> Result<()> {
        let session = GameSession {
            challenger_id: challenger_id.to_string(),
            choice,
            created_at: self.clock.now(),
        };

        let mut games = self.games.lock().await;
        if games.insert(session_id.to_string(), session).is_some() {
            warn!("Game {} replaced an existing game with the same id", session_id);
        }
        debug!("Game {} created, {} in progress", session_id, games.len());

        Ok(())
    }

    async fn get(&self, session_id: &str) -> Result<Option<GameSession>> {
        let games = self.games.lock().await;
        Ok(games.get(session_id).cloned())
    }

    async fn remove(&self, session_id: &str) -> Result<()> {
        let mut games = self.games.lock().await;
        games.remove(session_id);
        Ok(())
    }

    async fn take(&self, session_id: &str) -> Result<Option<GameSession>> {
        let mut games = self.games.lock().await;
        Ok(games.remove(session_id))
    }

    async fn len(&self) -> Result<usize> {
        let games = self.games.lock().await;
        Ok(games.len())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;

    /// Clock frozen at a fixed instant
    pub(crate) struct FixedClock(pub DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    pub(crate) fn fixed_store() -> InMemoryGameStore {
        let instant = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        InMemoryGameStore::with_clock(Arc::new(FixedClock(instant)))
    }

    #[tokio::test]
    async fn test_create_then_get() -> Result<()> {
        let store = fixed_store();
        store.create("S1", "A", Choice::Rock).await?;

        let session = store.get("S1").await?.expect("session stored");
        assert_eq!(session.challenger_id, "A");
        assert_eq!(session.choice, Choice::Rock);
        assert_eq!(
            session.created_at,
            Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_get_does_not_remove() -> Result<()> {
        let store = fixed_store();
        store.create("S1", "A", Choice::Paper).await?;

        store.get("S1").await?;
        assert!(store.get("S1").await?.is_some());
        assert_eq!(store.len().await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_remove_then_get_is_absent() -> Result<()> {
        let store = fixed_store();
        store.create("S1", "A", Choice::Rock).await?;
        store.remove("S1").await?;

        assert!(store.get("S1").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_remove_missing_is_noop() -> Result<()> {
        let store = fixed_store();
        store.remove("never").await?;
        store.remove("never").await?;
        assert_eq!(store.len().await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_overwrites() -> Result<()> {
        let store = fixed_store();
        store.create("S1", "A", Choice::Rock).await?;
        store.create("S1", "B", Choice::Scissors).await?;

        let session = store.get("S1").await?.expect("session stored");
        assert_eq!(session.challenger_id, "B");
        assert_eq!(session.choice, Choice::Scissors);
        assert_eq!(store.len().await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_take_returns_once() -> Result<()> {
        let store = fixed_store();
        store.create("S1", "A", Choice::Rock).await?;

        assert!(store.take("S1").await?.is_some());
        assert!(store.take("S1").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_concurrent_take_resolves_once() -> Result<()> {
        let store = fixed_store();
        store.create("S1", "A", Choice::Rock).await?;

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.take("S1").await })
            })
            .collect();

        let mut taken = 0;
        for handle in handles {
            if handle.await??.is_some() {
                taken += 1;
            }
        }
        assert_eq!(taken, 1);
        Ok(())
    }
}
