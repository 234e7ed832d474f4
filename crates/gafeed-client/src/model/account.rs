use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A conversion goal configured on a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub active: bool,
    pub name: String,
    pub number: u32,
    pub value: f64,
}

/// A reporting profile together with its account name and goals.
///
/// Built from the profile feed; `goals` and `account_name` are filled in by
/// [`crate::accounts::AccountDirectoryBuilder`] from the goal and account
/// feeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub updated: DateTime<FixedOffset>,
    pub title: String,
    pub table_id: String,
    pub account_id: u64,
    pub account_name: Option<String>,
    pub profile_id: u64,
    pub web_property_id: String,
    pub goals: Vec<Goal>,
}
