use chrono::NaiveDate;
use uuid::Uuid;

/// Enrollment row joined with the owning program's name.
///
/// `program_name` is resolved at read time; it is never stored and never
/// accepted on write.
#[derive(Debug, Clone)]
pub struct Enrollment {
    pub id: Uuid,
    pub client_id: Uuid,
    pub program_id: Uuid,
    pub program_name: String,
    pub enrollment_date: NaiveDate,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

pub const DEFAULT_STATUS: &str = "Active";
