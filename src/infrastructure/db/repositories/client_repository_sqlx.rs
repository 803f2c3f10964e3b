use anyhow::Context;
use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::application::ports::client_repository::{ClientFields, ClientRepository};
use crate::domain::client::{Client, Gender};
use crate::infrastructure::db::PgPool;

pub struct SqlxClientRepository {
    pub pool: PgPool,
}

impl SqlxClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const CLIENT_COLUMNS: &str = "id, first_name, last_name, date_of_birth, gender, \
                              contact_number, email, address, medical_history, \
                              created_at, updated_at";

fn row_to_client(r: &sqlx::postgres::PgRow) -> anyhow::Result<Client> {
    let gender: String = r.get("gender");
    let gender = Gender::from_code(&gender)
        .with_context(|| format!("unknown gender code in storage: {gender}"))?;
    Ok(Client {
        id: r.get("id"),
        first_name: r.get("first_name"),
        last_name: r.get("last_name"),
        date_of_birth: r.get("date_of_birth"),
        gender,
        contact_number: r.get("contact_number"),
        email: r.get("email"),
        address: r.get("address"),
        medical_history: r.get("medical_history"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    })
}

#[async_trait]
impl ClientRepository for SqlxClientRepository {
    async fn list(
        &self,
        search: Option<String>,
        gender: Option<Gender>,
    ) -> anyhow::Result<Vec<Client>> {
        let search = search.filter(|s| !s.trim().is_empty());
        let rows = match (search, gender) {
            (Some(q), Some(g)) => {
                let like = format!("%{}%", q);
                sqlx::query(&format!(
                    r#"SELECT {CLIENT_COLUMNS} FROM clients
                       WHERE gender = $2
                         AND (first_name ILIKE $1 OR last_name ILIKE $1
                              OR email ILIKE $1 OR contact_number ILIKE $1)
                       ORDER BY created_at ASC"#
                ))
                .bind(like)
                .bind(g.code())
                .fetch_all(&self.pool)
                .await?
            }
            (Some(q), None) => {
                let like = format!("%{}%", q);
                sqlx::query(&format!(
                    r#"SELECT {CLIENT_COLUMNS} FROM clients
                       WHERE first_name ILIKE $1 OR last_name ILIKE $1
                             OR email ILIKE $1 OR contact_number ILIKE $1
                       ORDER BY created_at ASC"#
                ))
                .bind(like)
                .fetch_all(&self.pool)
                .await?
            }
            (None, Some(g)) => {
                sqlx::query(&format!(
                    "SELECT {CLIENT_COLUMNS} FROM clients WHERE gender = $1 ORDER BY created_at ASC"
                ))
                .bind(g.code())
                .fetch_all(&self.pool)
                .await?
            }
            (None, None) => {
                sqlx::query(&format!(
                    "SELECT {CLIENT_COLUMNS} FROM clients ORDER BY created_at ASC"
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };
        rows.iter().map(row_to_client).collect()
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Client>> {
        let row = sqlx::query(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(row_to_client).transpose()
    }

    async fn create(&self, fields: ClientFields) -> anyhow::Result<Client> {
        let row = sqlx::query(&format!(
            r#"INSERT INTO clients
               (id, first_name, last_name, date_of_birth, gender,
                contact_number, email, address, medical_history)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
               RETURNING {CLIENT_COLUMNS}"#
        ))
        .bind(Uuid::new_v4())
        .bind(&fields.first_name)
        .bind(&fields.last_name)
        .bind(fields.date_of_birth)
        .bind(fields.gender.code())
        .bind(&fields.contact_number)
        .bind(&fields.email)
        .bind(&fields.address)
        .bind(&fields.medical_history)
        .fetch_one(&self.pool)
        .await?;
        row_to_client(&row)
    }

    async fn update(&self, id: Uuid, fields: ClientFields) -> anyhow::Result<Option<Client>> {
        let row = sqlx::query(&format!(
            r#"UPDATE clients
               SET first_name = $2, last_name = $3, date_of_birth = $4, gender = $5,
                   contact_number = $6, email = $7, address = $8, medical_history = $9,
                   updated_at = now()
               WHERE id = $1
               RETURNING {CLIENT_COLUMNS}"#
        ))
        .bind(id)
        .bind(&fields.first_name)
        .bind(&fields.last_name)
        .bind(fields.date_of_birth)
        .bind(fields.gender.code())
        .bind(&fields.contact_number)
        .bind(&fields.email)
        .bind(&fields.address)
        .bind(&fields.medical_history)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(row_to_client).transpose()
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
