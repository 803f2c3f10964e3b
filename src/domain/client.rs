use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Gender codes as stored and exposed on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "O")]
    Other,
}

impl Gender {
    pub fn code(self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
            Gender::Other => "O",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "M" => Some(Gender::Male),
            "F" => Some(Gender::Female),
            "O" => Some(Gender::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Client {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub contact_number: String,
    pub email: Option<String>,
    pub address: String,
    pub medical_history: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Client {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn age(&self, today: NaiveDate) -> i32 {
        age(self.date_of_birth, today)
    }
}

/// Whole years between `date_of_birth` and `today`; one year is subtracted
/// when the birthday has not yet occurred in the current year.
pub fn age(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let before_birthday =
        (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day());
    today.year() - date_of_birth.year() - i32::from(before_birthday)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn age_day_before_birthday() {
        assert_eq!(age(d(2000, 6, 15), d(2024, 6, 14)), 23);
    }

    #[test]
    fn age_on_birthday() {
        assert_eq!(age(d(2000, 6, 15), d(2024, 6, 15)), 24);
    }

    #[test]
    fn age_day_after_birthday() {
        assert_eq!(age(d(2000, 6, 15), d(2024, 6, 16)), 24);
    }

    #[test]
    fn age_leap_day_birth() {
        assert_eq!(age(d(2000, 2, 29), d(2023, 2, 28)), 22);
        assert_eq!(age(d(2000, 2, 29), d(2023, 3, 1)), 23);
    }

    #[test]
    fn gender_codes_round_trip() {
        for g in [Gender::Male, Gender::Female, Gender::Other] {
            assert_eq!(Gender::from_code(g.code()), Some(g));
        }
        assert_eq!(Gender::from_code("X"), None);
    }

    #[test]
    fn full_name_joins_with_single_space() {
        let c = Client {
            id: Uuid::new_v4(),
            first_name: "Amina".into(),
            last_name: "Okafor".into(),
            date_of_birth: d(1990, 1, 1),
            gender: Gender::Female,
            contact_number: "0700000000".into(),
            email: None,
            address: "12 Ridge Rd".into(),
            medical_history: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        assert_eq!(c.full_name(), "Amina Okafor");
    }
}
