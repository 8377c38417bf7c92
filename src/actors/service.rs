// Actor service - cache-aside reads and write invalidation over an ActorStore

use std::sync::Arc;
use tracing::{debug, info};
use validator::Validate;

use crate::actors::models::{Actor, CreateActor, UpdateActor};
use crate::actors::repository::ActorStore;
use crate::audit::{Action, AuditLogger, Entity};
use crate::cache::TtlCache;
use crate::error::ApiError;
use crate::validation::validate_lifespan;

fn cache_key(id: i64) -> String {
    id.to_string()
}

fn check_lifespan(
    birth_year: i32,
    rest_year: Option<i32>,
) -> Result<(), validator::ValidationErrors> {
    validate_lifespan(birth_year, rest_year).map_err(|err| {
        let mut errors = validator::ValidationErrors::new();
        errors.add("rest_year", err);
        errors
    })
}

/// Actor operations backed by a store with a TTL cache in front of single reads
pub struct ActorService {
    store: Arc<dyn ActorStore>,
    cache: TtlCache<String, Actor>,
    audit: AuditLogger,
}

impl ActorService {
    pub fn new(store: Arc<dyn ActorStore>, cache: TtlCache<String, Actor>, audit: AuditLogger) -> Self {
        Self { store, cache, audit }
    }

    /// Validate, persist and cache a new actor
    pub async fn create(&self, input: CreateActor) -> Result<Actor, ApiError> {
        input.validate()?;
        check_lifespan(input.birth_year, input.rest_year)?;

        let actor = self.store.create(&input).await?;
        self.cache.insert(cache_key(actor.id), actor.clone()).await;

        info!(actor_id = actor.id, "Created actor");
        self.audit.log(Action::Create, Entity::Actor, actor.id).await;

        Ok(actor)
    }

    /// Cached read; falls back to the store on miss and repopulates the cache
    pub async fn get_by_id(&self, id: i64) -> Result<Actor, ApiError> {
        let key = cache_key(id);
        if let Some(actor) = self.cache.get(&key).await {
            debug!(actor_id = id, "Actor cache hit");
            return Ok(actor);
        }

        debug!(actor_id = id, "Actor cache miss");
        let actor = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::actor_not_found(id))?;

        self.cache.insert(key, actor.clone()).await;
        Ok(actor)
    }

    /// Always reads the store; every returned actor warms the cache
    pub async fn get_all(&self) -> Result<Vec<Actor>, ApiError> {
        let actors = self.store.find_all().await?;
        for actor in &actors {
            self.cache.insert(cache_key(actor.id), actor.clone()).await;
        }

        debug!(count = actors.len(), "Listed actors");
        Ok(actors)
    }

    /// Partial update followed by cache invalidation
    pub async fn update(&self, id: i64, input: UpdateActor) -> Result<Actor, ApiError> {
        if input.is_empty() {
            return Err(ApiError::BadRequest(
                "At least one field must be supplied".to_string(),
            ));
        }
        input.validate()?;

        if input.touches_lifespan() {
            let current = self
                .store
                .find_by_id(id)
                .await?
                .ok_or_else(|| ApiError::actor_not_found(id))?;
            let merged = input.apply_to(&current);
            check_lifespan(merged.birth_year, merged.rest_year)?;
        }

        let actor = self
            .store
            .update(id, &input)
            .await?
            .ok_or_else(|| ApiError::actor_not_found(id))?;
        self.cache.delete(&cache_key(id)).await;

        info!(actor_id = id, "Updated actor");
        self.audit.log(Action::Update, Entity::Actor, id).await;

        Ok(actor)
    }

    /// Delete followed by cache invalidation
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        if !self.store.delete(id).await? {
            return Err(ApiError::actor_not_found(id));
        }
        self.cache.delete(&cache_key(id)).await;

        info!(actor_id = id, "Deleted actor");
        self.audit.log(Action::Delete, Entity::Actor, id).await;

        Ok(())
    }
}
