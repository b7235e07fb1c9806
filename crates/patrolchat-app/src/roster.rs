//! Roster projection.
//!
//! Flattens a status-grouped user map into the list shown in the user
//! directory. Buckets are visited in insertion order and records keep their
//! relative order; nothing is sorted or de-duplicated.

use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::state::UserId;

/// Role shown when a record carries neither rank nor role.
pub const DEFAULT_ROLE: &str = "Beamter";

/// Presence of a roster entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RosterStatus {
    /// Available.
    Online,
    /// Not connected.
    Offline,
    /// Connected but idle.
    Away,
    /// Do not disturb.
    Busy,
}

impl RosterStatus {
    /// Lowercase label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
            Self::Away => "away",
            Self::Busy => "busy",
        }
    }
}

impl fmt::Display for RosterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status label outside the known set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status {0:?}")]
pub struct UnknownStatus(pub String);

impl FromStr for RosterStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "online" => Ok(Self::Online),
            "offline" => Ok(Self::Offline),
            "away" => Ok(Self::Away),
            "busy" => Ok(Self::Busy),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

/// One user as delivered by the upstream status feed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserStatusRecord {
    /// User id.
    pub id: UserId,
    /// Display name.
    pub username: String,
    /// Service rank, preferred over `role`.
    #[serde(default)]
    pub rank: Option<String>,
    /// Free-form role.
    #[serde(default)]
    pub role: Option<String>,
    /// Presence flag.
    #[serde(default)]
    pub is_online: Option<bool>,
    /// Explicit presence label, trusted over `is_online` when it parses.
    #[serde(default)]
    pub status: Option<String>,
    /// Department name.
    #[serde(default)]
    pub department: Option<String>,
    /// Service number.
    #[serde(default)]
    pub service_number: Option<String>,
}

impl UserStatusRecord {
    /// Minimal record with only id and username.
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: UserId::new(id),
            username: username.into(),
            rank: None,
            role: None,
            is_online: None,
            status: None,
            department: None,
            service_number: None,
        }
    }

    /// Set the presence flag.
    #[must_use]
    pub fn online(mut self, is_online: bool) -> Self {
        self.is_online = Some(is_online);
        self
    }

    /// Set an explicit presence label.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Set the rank.
    #[must_use]
    pub fn with_rank(mut self, rank: impl Into<String>) -> Self {
        self.rank = Some(rank.into());
        self
    }

    fn resolved_status(&self) -> RosterStatus {
        self.status.as_deref().and_then(|s| s.parse().ok()).unwrap_or(
            if self.is_online.unwrap_or(false) {
                RosterStatus::Online
            } else {
                RosterStatus::Offline
            },
        )
    }

    fn resolved_role(&self) -> String {
        [self.rank.as_deref(), self.role.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .unwrap_or(DEFAULT_ROLE)
            .to_string()
    }
}

/// Status label mapped to the records listed under it, in feed order.
pub type StatusRoster = IndexMap<String, Vec<UserStatusRecord>>;

/// A user in the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    /// User id.
    pub id: UserId,
    /// Display name.
    pub username: String,
    /// Rank or role.
    pub role: String,
    /// Presence.
    pub status: RosterStatus,
    /// Up to two uppercase initials.
    pub avatar: String,
    /// Department name.
    pub department: Option<String>,
    /// Service number.
    pub service_number: Option<String>,
}

/// Initials for an avatar: first letter of the first and second
/// whitespace-delimited tokens, uppercased.
pub fn avatar_initials(username: &str) -> String {
    username
        .split_whitespace()
        .take(2)
        .filter_map(|token| token.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Flatten `source` into roster entries, dropping every record whose id is
/// the actor's.
pub fn project(source: &StatusRoster, actor: Option<&UserId>) -> Vec<RosterEntry> {
    source
        .values()
        .flatten()
        .filter(|record| actor != Some(&record.id))
        .map(|record| RosterEntry {
            id: record.id.clone(),
            username: record.username.clone(),
            role: record.resolved_role(),
            status: record.resolved_status(),
            avatar: avatar_initials(&record.username),
            department: record.department.clone(),
            service_number: record.service_number.clone(),
        })
        .collect()
}
