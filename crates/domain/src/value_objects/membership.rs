//! Advanced group membership: who an entry applies to and what role it grants.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ActorId, Faction, Vec3};
use crate::error::DomainError;

/// The kind of a member selector, without its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectorKind {
    ActorId,
    Job,
    Faction,
    All,
}

impl SelectorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectorKind::ActorId => "actor_id",
            SelectorKind::Job => "job",
            SelectorKind::Faction => "faction",
            SelectorKind::All => "all",
        }
    }
}

impl fmt::Display for SelectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who a group member entry applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum MemberSelector {
    #[serde(rename = "actor_id")]
    Actor(ActorId),
    Job(String),
    Faction(Faction),
    All,
}

/// Outcome of testing one selector against an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorMatch {
    Matched,
    NoMatch,
    /// The selector kind has no resolution rule; it neither matches nor
    /// fails to match.
    Unsupported(SelectorKind),
}

impl MemberSelector {
    /// Build a selector from its wire form.
    ///
    /// `kind` accepts `actor_id` (alias `player_id`, `actor`), `job`,
    /// `faction` and `all`. Every kind except `all` requires a value.
    pub fn parse(kind: &str, value: Option<&str>) -> Result<Self, DomainError> {
        let value = value.map(str::trim).filter(|v| !v.is_empty());
        let require = |what: &str| {
            value.ok_or_else(|| {
                DomainError::validation(format!("Member of type {} requires a value", what))
            })
        };

        match kind.trim().to_lowercase().as_str() {
            "actor_id" | "actor" | "player_id" => Ok(Self::Actor(ActorId::new(require("actor_id")?)?)),
            "job" => Ok(Self::Job(require("job")?.to_string())),
            "faction" => Ok(Self::Faction(require("faction")?.parse()?)),
            "all" => Ok(Self::All),
            other => Err(DomainError::parse(format!("Unknown member type: {}", other))),
        }
    }

    pub fn kind(&self) -> SelectorKind {
        match self {
            MemberSelector::Actor(_) => SelectorKind::ActorId,
            MemberSelector::Job(_) => SelectorKind::Job,
            MemberSelector::Faction(_) => SelectorKind::Faction,
            MemberSelector::All => SelectorKind::All,
        }
    }

    /// The selector's value in wire form (`None` for `all`).
    pub fn value(&self) -> Option<String> {
        match self {
            MemberSelector::Actor(id) => Some(id.to_string()),
            MemberSelector::Job(job) => Some(job.clone()),
            MemberSelector::Faction(faction) => Some(faction.to_string()),
            MemberSelector::All => None,
        }
    }

    /// Test this selector against an actor.
    ///
    /// Job and faction selectors need the actor's job/faction, which this
    /// system does not track, so they report `Unsupported`.
    pub fn matches(&self, actor: &ActorId) -> SelectorMatch {
        match self {
            MemberSelector::Actor(id) => match_actor(id, actor),
            MemberSelector::All => SelectorMatch::Matched,
            MemberSelector::Job(_) => SelectorMatch::Unsupported(SelectorKind::Job),
            MemberSelector::Faction(_) => SelectorMatch::Unsupported(SelectorKind::Faction),
        }
    }
}

fn match_actor(member: &ActorId, actor: &ActorId) -> SelectorMatch {
    if member == actor {
        SelectorMatch::Matched
    } else {
        SelectorMatch::NoMatch
    }
}

/// Role of a member entry within an advanced group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    Owner,
    Leader,
    Friendly,
    Neutral,
    Enemy,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Owner => "owner",
            MemberRole::Leader => "leader",
            MemberRole::Friendly => "friendly",
            MemberRole::Neutral => "neutral",
            MemberRole::Enemy => "enemy",
        }
    }

    /// Whether a member with this role may command the group's NPCs.
    pub fn grants_control(&self) -> bool {
        matches!(self, MemberRole::Owner | MemberRole::Leader | MemberRole::Friendly)
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of an advanced group's member list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMember {
    pub selector: MemberSelector,
    pub role: MemberRole,
}

impl GroupMember {
    pub fn new(selector: MemberSelector, role: MemberRole) -> Self {
        Self { selector, role }
    }
}

/// Circular area a group patrols.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatrolArea {
    center: Vec3,
    radius: f64,
}

impl PatrolArea {
    /// # Errors
    ///
    /// Returns `DomainError::Validation` unless `radius` is finite and positive.
    pub fn new(center: Vec3, radius: f64) -> Result<Self, DomainError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(DomainError::validation(
                "Patrol area radius must be a positive number",
            ));
        }
        Ok(Self { center, radius })
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}
