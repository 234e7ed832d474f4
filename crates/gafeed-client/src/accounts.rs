//! Builds the account directory from the profile, goal, and account feeds.
//!
//! The profile feed yields one [`Account`] per entry. Two lookup tables are
//! built alongside it (`profile_id` and `account_id` to positions in the
//! account list) so that the goal feed and the account feed can each be
//! merged in a single pass without touching the profile feed again.

use std::collections::HashMap;

use crate::error::ClientError;
use crate::feed::{self, Element, FeedDocument, FeedEntry, PROPERTY};
use crate::model::{Account, Goal};

const PROFILE_CONTEXT: &str = "profile feed";
const GOAL_CONTEXT: &str = "goal feed";
const ACCOUNT_CONTEXT: &str = "account feed";

/// Three-phase merge producing the directory of [`Account`]s.
#[derive(Debug, Clone, Default)]
pub struct AccountDirectoryBuilder {
    accounts: Vec<Account>,
    by_profile: HashMap<u64, Vec<usize>>,
    by_account: HashMap<u64, Vec<usize>>,
}

impl AccountDirectoryBuilder {
    /// Parses the three raw feeds and merges them.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Xml`] or [`ClientError::Decode`] if any feed is
    /// malformed or an entry lacks a required property.
    pub fn build(
        profiles_xml: &str,
        goals_xml: &str,
        account_names_xml: &str,
    ) -> Result<Vec<Account>, ClientError> {
        let mut builder = Self::from_profiles(&FeedDocument::parse(profiles_xml)?)?;
        builder.merge_goals(&FeedDocument::parse(goals_xml)?)?;
        builder.merge_account_names(&FeedDocument::parse(account_names_xml)?)?;
        Ok(builder.finish())
    }

    /// Phase one: one account per profile-feed entry, goals empty and
    /// `account_name` unset.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Decode`] when an entry lacks a required property
    /// or has a malformed id or timestamp.
    pub fn from_profiles(profiles: &FeedDocument) -> Result<Self, ClientError> {
        let mut builder = Self::default();
        for entry in profiles.entries() {
            let account = decode_profile(entry)?;
            let position = builder.accounts.len();
            builder
                .by_profile
                .entry(account.profile_id)
                .or_default()
                .push(position);
            builder
                .by_account
                .entry(account.account_id)
                .or_default()
                .push(position);
            builder.accounts.push(account);
        }
        Ok(builder)
    }

    /// Phase two: appends each goal entry's goal to every account with the
    /// same `profile_id`. Returns how many entries matched no account.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Decode`] when an entry has no parsable
    /// `profileId`, or a matched entry's `ga:goal` is missing or malformed.
    pub fn merge_goals(&mut self, goals: &FeedDocument) -> Result<usize, ClientError> {
        let mut unmatched = 0;
        for entry in goals.entries() {
            let profile_id = require_id(entry, "profileId", GOAL_CONTEXT)?;
            let Some(positions) = self.by_profile.get(&profile_id) else {
                unmatched += 1;
                continue;
            };
            let element = entry.child("ga:goal").ok_or_else(|| {
                ClientError::decode(GOAL_CONTEXT, format!("entry {} has no ga:goal", entry.id()))
            })?;
            let goal = decode_goal(element)?;
            for &position in positions {
                self.accounts[position].goals.push(goal.clone());
            }
        }
        tracing::debug!(unmatched, "goal feed merged");
        Ok(unmatched)
    }

    /// Phase three: sets `account_name` on every account with the same
    /// `account_id`. Returns how many entries matched no account.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Decode`] when an entry has no parsable
    /// `accountId` or a matched entry has no `accountName`.
    pub fn merge_account_names(&mut self, names: &FeedDocument) -> Result<usize, ClientError> {
        let mut unmatched = 0;
        for entry in names.entries() {
            let account_id = require_id(entry, "accountId", ACCOUNT_CONTEXT)?;
            let Some(positions) = self.by_account.get(&account_id) else {
                unmatched += 1;
                continue;
            };
            let name = entry.require_field(PROPERTY, "accountName", ACCOUNT_CONTEXT)?;
            for &position in positions {
                self.accounts[position].account_name = Some(name.to_owned());
            }
        }
        tracing::debug!(unmatched, "account feed merged");
        Ok(unmatched)
    }

    /// The accounts in profile-feed order.
    #[must_use]
    pub fn finish(self) -> Vec<Account> {
        self.accounts
    }
}

fn decode_profile(entry: FeedEntry<'_>) -> Result<Account, ClientError> {
    let property = |name: &str| -> Result<String, ClientError> {
        entry
            .require_field(PROPERTY, name, PROFILE_CONTEXT)
            .map(str::to_owned)
    };

    let id = entry.self_link().unwrap_or_else(|| entry.id()).to_owned();

    Ok(Account {
        id,
        updated: feed::parse_timestamp(entry.updated(), PROFILE_CONTEXT)?,
        title: property("profileName")?,
        table_id: property("tableId")?,
        account_id: require_id(entry, "accountId", PROFILE_CONTEXT)?,
        account_name: None,
        profile_id: require_id(entry, "profileId", PROFILE_CONTEXT)?,
        web_property_id: property("webPropertyId")?,
        goals: Vec::new(),
    })
}

fn decode_goal(element: &Element) -> Result<Goal, ClientError> {
    let attr = |name: &str| {
        element.attr(name).ok_or_else(|| {
            ClientError::decode(GOAL_CONTEXT, format!("ga:goal has no {name} attribute"))
        })
    };

    Ok(Goal {
        active: attr("active")?.trim().eq_ignore_ascii_case("true"),
        name: attr("name")?.to_owned(),
        number: feed::parse_number(attr("number")?, GOAL_CONTEXT)?,
        value: feed::parse_number(attr("value")?, GOAL_CONTEXT)?,
    })
}

fn require_id(entry: FeedEntry<'_>, name: &str, context: &str) -> Result<u64, ClientError> {
    feed::parse_number(entry.require_field(PROPERTY, name, context)?, context)
}
