//! Curriculum domain entities: the resume aggregate with its nested
//! work and education entries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Audit;

/// A work history entry within a curriculum.
///
/// `end_date` of None means the position is ongoing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Work {
    pub id: Uuid,
    pub curriculum_id: Uuid,
    pub company: String,
    pub position: String,
    pub description: String,
    pub start_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(flatten)]
    pub audit: Audit,
}

impl Work {
    pub fn is_ongoing(&self) -> bool {
        self.end_date.is_none()
    }

    /// start_date must not come after end_date when both are present
    pub fn has_valid_range(&self) -> bool {
        self.end_date.map_or(true, |end| self.start_date <= end)
    }
}

/// An education entry within a curriculum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Education {
    pub id: Uuid,
    pub curriculum_id: Uuid,
    pub institution: String,
    pub degree: String,
    pub field_of_study: String,
    pub start_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(flatten)]
    pub audit: Audit,
}

impl Education {
    pub fn is_ongoing(&self) -> bool {
        self.end_date.is_none()
    }

    pub fn has_valid_range(&self) -> bool {
        self.end_date.map_or(true, |end| self.start_date <= end)
    }
}

/// Curriculum aggregate root.
///
/// Belongs to exactly one user; nested works/educations are written
/// atomically with the curriculum row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Curriculum {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub summary: String,
    pub skills: String,
    pub job_description: String,
    #[serde(default)]
    pub works: Vec<Work>,
    #[serde(default)]
    pub educations: Vec<Education>,
    #[serde(flatten)]
    pub audit: Audit,
}

impl Curriculum {
    /// Check all nested date ranges
    pub fn has_valid_ranges(&self) -> bool {
        self.works.iter().all(Work::has_valid_range)
            && self.educations.iter().all(Education::has_valid_range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn work(start: NaiveDate, end: Option<NaiveDate>) -> Work {
        Work {
            id: Uuid::new_v4(),
            curriculum_id: Uuid::new_v4(),
            company: "Acme".into(),
            position: "Engineer".into(),
            description: String::new(),
            start_date: start,
            end_date: end,
            audit: Audit::now(),
        }
    }

    #[test]
    fn open_ended_range_is_ongoing_and_valid() {
        let w = work(date(2020, 1, 1), None);
        assert!(w.is_ongoing());
        assert!(w.has_valid_range());
    }

    #[test]
    fn inverted_range_is_invalid() {
        let w = work(date(2022, 6, 1), Some(date(2021, 1, 1)));
        assert!(!w.has_valid_range());
    }

    #[test]
    fn same_day_range_is_valid() {
        let w = work(date(2022, 6, 1), Some(date(2022, 6, 1)));
        assert!(w.has_valid_range());
    }
}
