//! Catalog entity models
//!
//! Each entity carries only its stored fields. Display values (names, URLs,
//! formatted dates) are derived on read by the methods on each type.

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;

pub use author::Author;
pub use book::{Book, BookListing, BookSummary};
pub use book_instance::{BookInstance, InstanceStatus};
pub use genre::Genre;
