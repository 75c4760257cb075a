//! Book instance (a physical copy of a book)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::time::{format_form_date, format_medium};
use crate::Error;

/// Lending status of a copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InstanceStatus {
    Available,
    #[default]
    Maintenance,
    Loaned,
    Reserved,
}

impl InstanceStatus {
    pub const ALL: [InstanceStatus; 4] = [
        InstanceStatus::Maintenance,
        InstanceStatus::Available,
        InstanceStatus::Loaned,
        InstanceStatus::Reserved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InstanceStatus::Available => "Available",
            InstanceStatus::Maintenance => "Maintenance",
            InstanceStatus::Loaned => "Loaned",
            InstanceStatus::Reserved => "Reserved",
        }
    }
}

impl fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstanceStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Available" => Ok(InstanceStatus::Available),
            "Maintenance" => Ok(InstanceStatus::Maintenance),
            "Loaned" => Ok(InstanceStatus::Loaned),
            "Reserved" => Ok(InstanceStatus::Reserved),
            other => Err(Error::InvalidInput(format!("Unknown status '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookInstance {
    pub id: Uuid,
    pub book_id: Uuid,
    pub imprint: String,
    pub status: InstanceStatus,
    pub due_back: NaiveDate,
}

impl BookInstance {
    pub fn new(book_id: Uuid, imprint: String, status: InstanceStatus, due_back: NaiveDate) -> Self {
        Self {
            id: crate::uuid_utils::generate(),
            book_id,
            imprint,
            status,
            due_back,
        }
    }

    pub fn url(&self) -> String {
        format!("/catalog/bookinstance/{}", self.id)
    }

    /// e.g. "Oct 19, 2026"
    pub fn due_back_formatted(&self) -> String {
        format_medium(self.due_back)
    }

    /// `YYYY-MM-DD`, the value an HTML date input expects
    pub fn due_back_form_value(&self) -> String {
        format_form_date(Some(self.due_back))
    }
}
