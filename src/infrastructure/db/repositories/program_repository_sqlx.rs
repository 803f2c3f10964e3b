use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::application::ports::program_repository::ProgramRepository;
use crate::domain::program::HealthProgram;
use crate::infrastructure::db::PgPool;

pub struct SqlxProgramRepository {
    pub pool: PgPool,
}

impl SqlxProgramRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_program(r: &sqlx::postgres::PgRow) -> HealthProgram {
    HealthProgram {
        id: r.get("id"),
        name: r.get("name"),
        description: r.get("description"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}

#[async_trait]
impl ProgramRepository for SqlxProgramRepository {
    async fn list(&self, search: Option<String>) -> anyhow::Result<Vec<HealthProgram>> {
        let rows = if let Some(q) = search.filter(|s| !s.trim().is_empty()) {
            let like = format!("%{}%", q);
            sqlx::query(
                r#"SELECT id, name, description, created_at, updated_at
                   FROM health_programs
                   WHERE name ILIKE $1 OR description ILIKE $1
                   ORDER BY created_at ASC"#,
            )
            .bind(like)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query(
                r#"SELECT id, name, description, created_at, updated_at
                   FROM health_programs
                   ORDER BY created_at ASC"#,
            )
            .fetch_all(&self.pool)
            .await?
        };
        Ok(rows.iter().map(row_to_program).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<HealthProgram>> {
        let row = sqlx::query(
            r#"SELECT id, name, description, created_at, updated_at
               FROM health_programs WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(row_to_program))
    }

    async fn create(&self, name: &str, description: &str) -> anyhow::Result<HealthProgram> {
        let row = sqlx::query(
            r#"INSERT INTO health_programs (id, name, description)
               VALUES ($1, $2, $3)
               RETURNING id, name, description, created_at, updated_at"#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;
        Ok(row_to_program(&row))
    }

    async fn update(
        &self,
        id: Uuid,
        name: &str,
        description: &str,
    ) -> anyhow::Result<Option<HealthProgram>> {
        let row = sqlx::query(
            r#"UPDATE health_programs
               SET name = $2, description = $3, updated_at = now()
               WHERE id = $1
               RETURNING id, name, description, created_at, updated_at"#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(row_to_program))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM health_programs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
