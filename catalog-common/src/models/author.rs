//! Author entity

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::time::format_form_date;

/// Longest accepted first or family name
pub const MAX_NAME_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// New author with a freshly generated id
    pub fn new(
        first_name: String,
        family_name: String,
        date_of_birth: Option<NaiveDate>,
        date_of_death: Option<NaiveDate>,
    ) -> Self {
        Self {
            id: crate::uuid_utils::generate(),
            first_name,
            family_name,
            date_of_birth,
            date_of_death,
        }
    }

    /// "Family, First"; empty unless both parts are present
    pub fn name(&self) -> String {
        if self.first_name.is_empty() || self.family_name.is_empty() {
            return String::new();
        }
        format!("{}, {}", self.family_name, self.first_name)
    }

    pub fn url(&self) -> String {
        format!("/catalog/author/{}", self.id)
    }

    pub fn birth_date_formatted(&self) -> String {
        format_form_date(self.date_of_birth)
    }

    pub fn death_date_formatted(&self) -> String {
        format_form_date(self.date_of_death)
    }

    /// Years lived, e.g. "1920 - 1992", "1948 - " or "" when unknown
    pub fn lifespan(&self) -> String {
        let year = |d: Option<NaiveDate>| d.map(|d| d.year().to_string()).unwrap_or_default();
        if self.date_of_birth.is_none() && self.date_of_death.is_none() {
            return String::new();
        }
        format!("{} - {}", year(self.date_of_birth), year(self.date_of_death))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_name_is_family_then_first() {
        let author = Author::new("Isaac".into(), "Asimov".into(), None, None);
        assert_eq!(author.name(), "Asimov, Isaac");
    }

    #[test]
    fn test_name_empty_when_part_missing() {
        let author = Author::new(String::new(), "Asimov".into(), None, None);
        assert_eq!(author.name(), "");
    }

    #[test]
    fn test_url_uses_id() {
        let author = Author::new("Ben".into(), "Bova".into(), None, None);
        assert_eq!(author.url(), format!("/catalog/author/{}", author.id));
    }

    #[test]
    fn test_formatted_dates() {
        let author = Author::new("Isaac".into(), "Asimov".into(), date(1920, 1, 2), None);
        assert_eq!(author.birth_date_formatted(), "1920-01-02");
        assert_eq!(author.death_date_formatted(), "");
    }

    #[test]
    fn test_lifespan() {
        let mut author = Author::new("Isaac".into(), "Asimov".into(), date(1920, 1, 2), date(1992, 4, 6));
        assert_eq!(author.lifespan(), "1920 - 1992");

        author.date_of_death = None;
        assert_eq!(author.lifespan(), "1920 - ");

        author.date_of_birth = None;
        assert_eq!(author.lifespan(), "");
    }
}
