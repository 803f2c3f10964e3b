use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct HealthProgram {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
