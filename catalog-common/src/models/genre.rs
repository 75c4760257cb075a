//! Genre entity

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MIN_NAME_LENGTH: usize = 3;
pub const MAX_NAME_LENGTH: usize = 100;

/// Lookup key under which genre names must be unique: the name lowercased
/// (Unicode-aware, unlike SQLite's NOCASE)
pub fn name_key(name: &str) -> String {
    name.to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
}

impl Genre {
    pub fn new(name: String) -> Self {
        Self {
            id: crate::uuid_utils::generate(),
            name,
        }
    }

    pub fn url(&self) -> String {
        format!("/catalog/genre/{}", self.id)
    }

    pub fn name_key(&self) -> String {
        name_key(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url() {
        let genre = Genre::new("Fantasy".into());
        assert_eq!(genre.url(), format!("/catalog/genre/{}", genre.id));
    }

    #[test]
    fn test_name_key_folds_non_ascii() {
        assert_eq!(name_key("Épopée"), name_key("épopée"));
        assert_eq!(Genre::new("Science Fiction".into()).name_key(), "science fiction");
        assert_ne!(name_key("Poetry"), name_key("Poetry Slam"));
    }
}
