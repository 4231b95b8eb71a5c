// Actor context value object
// Identity is established upstream; the engine only reads it for attribution and gating.

use serde::{Deserialize, Serialize};

use super::ActorId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActorRole {
    #[default]
    Staff,
    Admin,
}

impl ActorRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActorRole::Staff => "staff",
            ActorRole::Admin => "admin",
        }
    }
}

impl From<&str> for ActorRole {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "admin" => ActorRole::Admin,
            _ => ActorRole::Staff,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub role: ActorRole,
}

impl Actor {
    pub fn staff(id: impl Into<ActorId>) -> Self {
        Self {
            id: id.into(),
            role: ActorRole::Staff,
        }
    }

    pub fn admin(id: impl Into<ActorId>) -> Self {
        Self {
            id: id.into(),
            role: ActorRole::Admin,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == ActorRole::Admin
    }
}
