//! Actor identities and free-text token lists.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// An external player/controller identity (e.g. a game server id).
///
/// Opaque to this system: only compared for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ActorId(String);

impl ActorId {
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the id is blank.
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Actor id cannot be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse a comma-separated list of actor ids (see [`parse_token_list`]).
    pub fn parse_list(input: &str) -> Vec<ActorId> {
        parse_token_list(input).into_iter().map(ActorId).collect()
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ActorId {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ActorId> for String {
    fn from(id: ActorId) -> String {
        id.0
    }
}

/// Split comma-separated text into trimmed, non-empty tokens, in order.
///
/// Blank input is an empty list, never an error.
pub fn parse_token_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
