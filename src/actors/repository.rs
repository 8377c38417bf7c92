use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::actors::models::{Actor, CreateActor, UpdateActor};
use crate::error::ApiError;

const ACTOR_COLUMNS: &str = "id, name, surname, sex, birth_year, birth_place, rest_year, language";

/// Persistence port for actors
#[async_trait]
pub trait ActorStore: Send + Sync {
    async fn create(&self, actor: &CreateActor) -> Result<Actor, ApiError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Actor>, ApiError>;

    /// All actors ordered by id
    async fn find_all(&self) -> Result<Vec<Actor>, ApiError>;

    /// Apply the supplied fields; `None` when the row does not exist
    async fn update(&self, id: i64, update: &UpdateActor) -> Result<Option<Actor>, ApiError>;

    /// Returns whether a row was removed
    async fn delete(&self, id: i64) -> Result<bool, ApiError>;
}

/// Repository for database operations on actors
#[derive(Clone)]
pub struct ActorRepository {
    pool: PgPool,
}

impl ActorRepository {
    /// Create a new ActorRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Build `UPDATE actors SET ... WHERE id = $n RETURNING ...` touching only supplied fields
fn build_update_query<'a>(id: i64, update: &'a UpdateActor) -> QueryBuilder<'a, Postgres> {
    let mut builder = QueryBuilder::new("UPDATE actors SET ");
    let mut fields = builder.separated(", ");

    if let Some(name) = &update.name {
        fields.push("name = ").push_bind_unseparated(name);
    }
    if let Some(surname) = &update.surname {
        fields.push("surname = ").push_bind_unseparated(surname);
    }
    if let Some(sex) = &update.sex {
        fields.push("sex = ").push_bind_unseparated(sex.to_uppercase());
    }
    if let Some(birth_year) = update.birth_year {
        fields.push("birth_year = ").push_bind_unseparated(birth_year);
    }
    if let Some(birth_place) = &update.birth_place {
        fields.push("birth_place = ").push_bind_unseparated(birth_place);
    }
    if let Some(rest_year) = update.rest_year {
        fields.push("rest_year = ").push_bind_unseparated(rest_year);
    }
    if let Some(language) = &update.language {
        fields.push("language = ").push_bind_unseparated(language);
    }

    builder.push(" WHERE id = ").push_bind(id);
    builder.push(" RETURNING ").push(ACTOR_COLUMNS);
    builder
}

#[async_trait]
impl ActorStore for ActorRepository {
    async fn create(&self, actor: &CreateActor) -> Result<Actor, ApiError> {
        let created = sqlx::query_as::<_, Actor>(&format!(
            r#"
            INSERT INTO actors (name, surname, sex, birth_year, birth_place, rest_year, language)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {ACTOR_COLUMNS}
            "#
        ))
        .bind(&actor.name)
        .bind(&actor.surname)
        .bind(actor.sex.to_uppercase())
        .bind(actor.birth_year)
        .bind(&actor.birth_place)
        .bind(actor.rest_year)
        .bind(&actor.language)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Actor>, ApiError> {
        let actor = sqlx::query_as::<_, Actor>(&format!(
            "SELECT {ACTOR_COLUMNS} FROM actors WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(actor)
    }

    async fn find_all(&self) -> Result<Vec<Actor>, ApiError> {
        let actors = sqlx::query_as::<_, Actor>(&format!(
            "SELECT {ACTOR_COLUMNS} FROM actors ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(actors)
    }

    async fn update(&self, id: i64, update: &UpdateActor) -> Result<Option<Actor>, ApiError> {
        if update.is_empty() {
            return self.find_by_id(id).await;
        }

        let mut builder = build_update_query(id, update);
        let actor = builder
            .build_query_as::<Actor>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(actor)
    }

    async fn delete(&self, id: i64) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM actors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
