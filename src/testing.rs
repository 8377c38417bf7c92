// Test support: a Postgres pool for repository tests, plus in-memory fakes of
// the store and publisher ports for unit and HTTP tests

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::actors::models::{Actor, CreateActor, UpdateActor};
use crate::actors::repository::ActorStore;
use crate::audit::{AuditError, AuditEvent, EventPublisher};
use crate::auth::error::AuthError;
use crate::auth::models::{NewRefreshToken, NewUser, RefreshToken, User};
use crate::auth::repository::{TokenStore, UserRepository, UserStore};
use crate::error::ApiError;

#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
    calls: AtomicUsize,
}

impl InMemoryUserStore {
    pub fn get(&self, id: i64) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| u.id == id).cloned()
    }

    /// Number of store calls made so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, user: NewUser) -> Result<i64, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AuthError::EmailAlreadyExists);
        }

        let id = users.len() as i64 + 1;
        users.push(User {
            id,
            nickname: user.nickname,
            email: user.email,
            password_hash: user.password_hash,
            registered_at: user.registered_at,
        });
        Ok(id)
    }

    async fn find_by_credentials(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<User>, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email && u.password_hash == password_hash)
            .cloned())
    }
}

#[derive(Default)]
pub struct InMemoryTokenStore {
    tokens: Mutex<Vec<RefreshToken>>,
}

impl InMemoryTokenStore {
    pub fn live_tokens_for(&self, user_id: i64) -> Vec<String> {
        self.tokens
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.user_id == user_id)
            .map(|t| t.token.clone())
            .collect()
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn create(&self, token: NewRefreshToken) -> Result<(), AuthError> {
        let mut tokens = self.tokens.lock().unwrap();
        tokens.retain(|t| t.user_id != token.user_id);
        let id = tokens.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        tokens.push(RefreshToken {
            id,
            user_id: token.user_id,
            token: token.token,
            expires_at: token.expires_at,
        });
        Ok(())
    }

    async fn take(&self, token: &str) -> Result<Option<RefreshToken>, AuthError> {
        let mut tokens = self.tokens.lock().unwrap();
        let found = tokens.iter().find(|t| t.token == token).cloned();
        if let Some(found) = &found {
            tokens.retain(|t| t.user_id != found.user_id);
        }
        Ok(found)
    }
}

#[derive(Default)]
pub struct InMemoryActorStore {
    actors: Mutex<BTreeMap<i64, Actor>>,
    next_id: AtomicUsize,
    calls: Mutex<HashMap<&'static str, usize>>,
}

impl InMemoryActorStore {
    fn record(&self, op: &'static str) {
        *self.calls.lock().unwrap().entry(op).or_default() += 1;
    }

    fn count(&self, op: &'static str) -> usize {
        self.calls.lock().unwrap().get(op).copied().unwrap_or(0)
    }

    fn insert(&self, input: &CreateActor) -> Actor {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64 + 1;
        let actor = Actor {
            id,
            name: input.name.clone(),
            surname: input.surname.clone(),
            sex: input.sex.to_uppercase(),
            birth_year: input.birth_year,
            birth_place: input.birth_place.clone(),
            rest_year: input.rest_year,
            language: input.language.clone(),
        };
        self.actors.lock().unwrap().insert(id, actor.clone());
        actor
    }

    /// Insert directly, bypassing the call counters
    pub fn seed(&self, input: CreateActor) -> Actor {
        self.insert(&input)
    }

    pub fn create_calls(&self) -> usize {
        self.count("create")
    }

    pub fn find_by_id_calls(&self) -> usize {
        self.count("find_by_id")
    }

    pub fn find_all_calls(&self) -> usize {
        self.count("find_all")
    }

    pub fn update_calls(&self) -> usize {
        self.count("update")
    }
}

#[async_trait]
impl ActorStore for InMemoryActorStore {
    async fn create(&self, actor: &CreateActor) -> Result<Actor, ApiError> {
        self.record("create");
        Ok(self.insert(actor))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Actor>, ApiError> {
        self.record("find_by_id");
        Ok(self.actors.lock().unwrap().get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Actor>, ApiError> {
        self.record("find_all");
        Ok(self.actors.lock().unwrap().values().cloned().collect())
    }

    async fn update(&self, id: i64, update: &UpdateActor) -> Result<Option<Actor>, ApiError> {
        self.record("update");
        let mut actors = self.actors.lock().unwrap();
        Ok(actors.get_mut(&id).map(|actor| {
            let mut merged = update.apply_to(actor);
            merged.sex = merged.sex.to_uppercase();
            *actor = merged.clone();
            merged
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, ApiError> {
        self.record("delete");
        Ok(self.actors.lock().unwrap().remove(&id).is_some())
    }
}

/// Keeps every published event for inspection
#[derive(Default)]
pub struct RecordingPublisher {
    payloads: Mutex<Vec<Vec<u8>>>,
}

impl RecordingPublisher {
    pub fn events(&self) -> Vec<AuditEvent> {
        self.payloads
            .lock()
            .unwrap()
            .iter()
            .map(|p| serde_json::from_slice(p).unwrap())
            .collect()
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, payload: Vec<u8>) -> Result<(), AuditError> {
        self.payloads.lock().unwrap().push(payload);
        Ok(())
    }
}

/// Always fails to publish
pub struct FailingPublisher;

#[async_trait]
impl EventPublisher for FailingPublisher {
    async fn publish(&self, _payload: Vec<u8>) -> Result<(), AuditError> {
        Err(AuditError::Publish("queue unavailable".to_string()))
    }
}

// ============================================================================
// Database helpers
// ============================================================================

/// Pool against `TEST_DATABASE_URL` with migrations applied
///
/// Returns `None` when the variable is unset so database tests are skipped
/// on machines without Postgres.
pub async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL not set, skipping database test");
        return None;
    };

    let pool = crate::db::create_pool(&database_url)
        .await
        .expect("Failed to connect to test database");
    crate::db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    Some(pool)
}

static UNIQUE_SEQ: AtomicUsize = AtomicUsize::new(0);

/// Email no other test run will use
pub fn unique_email() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let seq = UNIQUE_SEQ.fetch_add(1, Ordering::SeqCst);
    format!("test{}-{}@example.com", nanos, seq)
}

/// Insert a user row and return its id
pub async fn create_test_user(pool: &PgPool) -> i64 {
    UserRepository::new(pool.clone())
        .create(NewUser {
            nickname: "tester".to_string(),
            email: unique_email(),
            password_hash: "test_hash".to_string(),
            registered_at: Utc::now(),
        })
        .await
        .expect("Failed to create test user")
}
