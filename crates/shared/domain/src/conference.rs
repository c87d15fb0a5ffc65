use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique, immutable identifier of a conference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConferenceId(pub u64);

impl fmt::Display for ConferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ConferenceId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl FromStr for ConferenceId {
    type Err = std::num::ParseIntError;

    /// Parses route-style ids such as `"7"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// A conference as shown on a listing card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceRecord {
    pub id: ConferenceId,
    pub title: String,
    pub description: String,
    pub category: String,
    /// Calendar day of the event, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub location: String,
    /// Ticket price; zero means free.
    pub price: f64,
    /// Remaining capacity. Only registration decrements it, never below zero.
    pub spaces: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ConferenceRecord {
    #[must_use]
    pub const fn is_sold_out(&self) -> bool {
        self.spaces == 0
    }

    #[must_use]
    pub fn is_free(&self) -> bool {
        self.price <= 0.0
    }
}
