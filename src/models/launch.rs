use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque, stable identifier of a launch.
///
/// The server assigns these; the client never interprets them beyond
/// equality, so they stay plain strings on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LaunchId(String);

impl LaunchId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LaunchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LaunchId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for LaunchId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A scheduled rocket launch.
///
/// Only protocol-sourced fields live here. `isBooked` is the server's view of
/// the user's bookings and is unrelated to the local cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Launch {
    pub id: LaunchId,
    #[serde(default)]
    pub site: Option<String>,
    #[serde(default)]
    pub mission: Option<Mission>,
    #[serde(default)]
    pub rocket: Option<Rocket>,
    #[serde(default)]
    pub is_booked: bool,
}

impl Launch {
    /// A launch with only its identifier set.
    pub fn with_id(id: impl Into<LaunchId>) -> Self {
        Self {
            id: id.into(),
            site: None,
            mission: None,
            rocket: None,
            is_booked: false,
        }
    }

    pub fn mission_name(&self) -> Option<&str> {
        self.mission.as_ref().and_then(|m| m.name.as_deref())
    }

    pub fn rocket_name(&self) -> Option<&str> {
        self.rocket.as_ref().and_then(|r| r.name.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mission {
    #[serde(default)]
    pub name: Option<String>,
    /// URL of the mission patch image.
    #[serde(default)]
    pub mission_patch: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rocket {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}
