use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::application::ports::enrollment_repository::{
    EnrollmentFields, EnrollmentFilter, EnrollmentRepository, EnrollmentWriteError, NewEnrollment,
};
use crate::domain::enrollment::{DEFAULT_STATUS, Enrollment};
use crate::infrastructure::db::PgPool;

pub struct SqlxEnrollmentRepository {
    pub pool: PgPool,
}

impl SqlxEnrollmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const UNIQUE_VIOLATION: &str = "23505";

fn map_write_err(e: sqlx::Error) -> EnrollmentWriteError {
    if let sqlx::Error::Database(db) = &e {
        if db.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return EnrollmentWriteError::Duplicate;
        }
    }
    EnrollmentWriteError::Other(e.into())
}

fn row_to_enrollment(r: &sqlx::postgres::PgRow) -> Enrollment {
    Enrollment {
        id: r.get("id"),
        client_id: r.get("client_id"),
        program_id: r.get("program_id"),
        program_name: r.get("program_name"),
        enrollment_date: r.get("enrollment_date"),
        status: r.get("status"),
        notes: r.get("notes"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}

// Every read resolves program_name through the join; it is never stored.
const SELECT_JOINED: &str = r#"SELECT e.id, e.client_id, e.program_id, p.name AS program_name,
              e.enrollment_date, e.status, e.notes, e.created_at, e.updated_at
       FROM enrollments e
       JOIN health_programs p ON p.id = e.program_id"#;

#[async_trait]
impl EnrollmentRepository for SqlxEnrollmentRepository {
    async fn list(&self, filter: EnrollmentFilter) -> anyhow::Result<Vec<Enrollment>> {
        let mut clauses: Vec<String> = Vec::new();
        if filter.client.is_some() {
            clauses.push(format!("e.client_id = ${}", clauses.len() + 1));
        }
        if filter.program.is_some() {
            clauses.push(format!("e.program_id = ${}", clauses.len() + 1));
        }
        if filter.status.is_some() {
            clauses.push(format!("e.status = ${}", clauses.len() + 1));
        }
        let mut sql = SELECT_JOINED.to_string();
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY e.created_at ASC");

        let mut query = sqlx::query(&sql);
        if let Some(client) = filter.client {
            query = query.bind(client);
        }
        if let Some(program) = filter.program {
            query = query.bind(program);
        }
        if let Some(status) = filter.status {
            query = query.bind(status);
        }
        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.iter().map(row_to_enrollment).collect())
    }

    async fn list_for_client(&self, client_id: Uuid) -> anyhow::Result<Vec<Enrollment>> {
        let sql = format!("{SELECT_JOINED} WHERE e.client_id = $1 ORDER BY e.created_at ASC");
        let rows = sqlx::query(&sql).bind(client_id).fetch_all(&self.pool).await?;
        Ok(rows.iter().map(row_to_enrollment).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Enrollment>> {
        let sql = format!("{SELECT_JOINED} WHERE e.id = $1");
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        Ok(row.as_ref().map(row_to_enrollment))
    }

    async fn find_by_client_and_program(
        &self,
        client_id: Uuid,
        program_id: Uuid,
    ) -> anyhow::Result<Option<Enrollment>> {
        let sql = format!("{SELECT_JOINED} WHERE e.client_id = $1 AND e.program_id = $2");
        let row = sqlx::query(&sql)
            .bind(client_id)
            .bind(program_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(row_to_enrollment))
    }

    async fn insert(&self, new: NewEnrollment) -> Result<Enrollment, EnrollmentWriteError> {
        // Single statement keeps the insert atomic and still returns the
        // joined representation.
        let row = sqlx::query(
            r#"WITH ins AS (
                 INSERT INTO enrollments (id, client_id, program_id, enrollment_date, status, notes)
                 VALUES ($1, $2, $3, COALESCE($4, CURRENT_DATE), COALESCE($5, $6), $7)
                 RETURNING id, client_id, program_id, enrollment_date, status, notes,
                           created_at, updated_at
               )
               SELECT ins.id, ins.client_id, ins.program_id, p.name AS program_name,
                      ins.enrollment_date, ins.status, ins.notes, ins.created_at, ins.updated_at
               FROM ins JOIN health_programs p ON p.id = ins.program_id"#,
        )
        .bind(Uuid::new_v4())
        .bind(new.client_id)
        .bind(new.program_id)
        .bind(new.enrollment_date)
        .bind(new.status)
        .bind(DEFAULT_STATUS)
        .bind(new.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_err)?;
        Ok(row_to_enrollment(&row))
    }

    async fn update(
        &self,
        id: Uuid,
        fields: EnrollmentFields,
    ) -> Result<Option<Enrollment>, EnrollmentWriteError> {
        let row = sqlx::query(
            r#"WITH upd AS (
                 UPDATE enrollments
                 SET client_id = $2, program_id = $3, enrollment_date = $4,
                     status = $5, notes = $6, updated_at = now()
                 WHERE id = $1
                 RETURNING id, client_id, program_id, enrollment_date, status, notes,
                           created_at, updated_at
               )
               SELECT upd.id, upd.client_id, upd.program_id, p.name AS program_name,
                      upd.enrollment_date, upd.status, upd.notes, upd.created_at, upd.updated_at
               FROM upd JOIN health_programs p ON p.id = upd.program_id"#,
        )
        .bind(id)
        .bind(fields.client_id)
        .bind(fields.program_id)
        .bind(fields.enrollment_date)
        .bind(fields.status)
        .bind(fields.notes)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_err)?;
        Ok(row.as_ref().map(row_to_enrollment))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM enrollments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
