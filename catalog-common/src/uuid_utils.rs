//! UUID utilities
//!
//! Entity ids are UUIDv4 values stored as TEXT.

use crate::{Error, Result};
use uuid::Uuid;

/// Generate a new entity id
pub fn generate() -> Uuid {
    Uuid::new_v4()
}

/// Parse an id taken from a path segment or form field
///
/// Surrounding whitespace is ignored. A malformed id is reported as
/// `NotFound` because no entity can carry it.
pub fn parse_id(s: &str) -> Result<Uuid> {
    Uuid::parse_str(s.trim()).map_err(|_| Error::NotFound(format!("No record with id '{}'", s)))
}

/// Parse a UUID stored in a TEXT column
pub fn parse_stored(s: &str) -> Result<Uuid> {
    Uuid::parse_str(s).map_err(|e| Error::Internal(format!("Corrupt id '{}' in database: {}", s, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_v4() {
        let id = generate();
        assert_eq!(id.get_version_num(), 4);
    }

    #[test]
    fn test_parse_id_trims_whitespace() {
        let id = generate();
        let parsed = parse_id(&format!("  {}\n", id)).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_parse_id_rejects_garbage() {
        assert!(matches!(parse_id("not-an-id"), Err(Error::NotFound(_))));
        assert!(matches!(parse_id(""), Err(Error::NotFound(_))));
    }
}
