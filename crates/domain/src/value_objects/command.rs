//! NPC behavioral states and the command verbs that drive them.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ActorId, Vec3};
use crate::error::DomainError;

/// Behavioral state of an NPC. There is no terminal state: an NPC keeps
/// existing in whatever state it is in until deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NpcState {
    #[default]
    Idle,
    Following,
    Attacking,
    Defending,
    Guarding,
    Peaceful,
    Combat,
}

impl NpcState {
    pub fn all() -> &'static [NpcState] {
        &[
            NpcState::Idle,
            NpcState::Following,
            NpcState::Attacking,
            NpcState::Defending,
            NpcState::Guarding,
            NpcState::Peaceful,
            NpcState::Combat,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NpcState::Idle => "idle",
            NpcState::Following => "following",
            NpcState::Attacking => "attacking",
            NpcState::Defending => "defending",
            NpcState::Guarding => "guarding",
            NpcState::Peaceful => "peaceful",
            NpcState::Combat => "combat",
        }
    }
}

impl fmt::Display for NpcState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for NpcState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_lowercase();
        NpcState::all()
            .iter()
            .copied()
            .find(|state| state.as_str() == tag)
            .ok_or_else(|| DomainError::parse(format!("Unknown NPC state: {}", s)))
    }
}

/// A command verb as received from a client.
///
/// Unknown verbs are kept rather than rejected: applying one is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CommandVerb {
    Follow,
    Stay,
    Attack,
    Defend,
    Guard,
    Peaceful,
    Combat,
    Patrol,
    Unrecognized(String),
}

impl CommandVerb {
    /// Classify a raw verb. Matching is case-insensitive and never fails.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "follow" => CommandVerb::Follow,
            "stay" => CommandVerb::Stay,
            "attack" => CommandVerb::Attack,
            "defend" => CommandVerb::Defend,
            "guard" => CommandVerb::Guard,
            "peaceful" => CommandVerb::Peaceful,
            "combat" => CommandVerb::Combat,
            "patrol" => CommandVerb::Patrol,
            _ => CommandVerb::Unrecognized(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CommandVerb::Follow => "follow",
            CommandVerb::Stay => "stay",
            CommandVerb::Attack => "attack",
            CommandVerb::Defend => "defend",
            CommandVerb::Guard => "guard",
            CommandVerb::Peaceful => "peaceful",
            CommandVerb::Combat => "combat",
            CommandVerb::Patrol => "patrol",
            CommandVerb::Unrecognized(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, CommandVerb::Unrecognized(_))
    }

    /// State an NPC ends up in after this verb, `None` for unknown verbs.
    pub fn target_state(&self) -> Option<NpcState> {
        match self {
            CommandVerb::Follow | CommandVerb::Patrol => Some(NpcState::Following),
            CommandVerb::Stay => Some(NpcState::Idle),
            CommandVerb::Attack => Some(NpcState::Attacking),
            CommandVerb::Defend => Some(NpcState::Defending),
            CommandVerb::Guard => Some(NpcState::Guarding),
            CommandVerb::Peaceful => Some(NpcState::Peaceful),
            CommandVerb::Combat => Some(NpcState::Combat),
            CommandVerb::Unrecognized(_) => None,
        }
    }

    /// Verbs that may be broadcast to a whole group.
    pub fn is_group_command(&self) -> bool {
        matches!(
            self,
            CommandVerb::Follow | CommandVerb::Stay | CommandVerb::Peaceful | CommandVerb::Combat
        )
    }
}

impl fmt::Display for CommandVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an NPC is currently focused on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum NpcTarget {
    Actor(ActorId),
    Position(Vec3),
}

/// A fully-parsed command for a single NPC.
#[derive(Debug, Clone, PartialEq)]
pub struct NpcCommand {
    pub verb: CommandVerb,
    pub issuer: ActorId,
    pub target_actor: Option<ActorId>,
    pub position: Option<Vec3>,
    pub patrol_route: Option<Vec<Vec3>>,
}

impl NpcCommand {
    pub fn new(verb: CommandVerb, issuer: ActorId) -> Self {
        Self {
            verb,
            issuer,
            target_actor: None,
            position: None,
            patrol_route: None,
        }
    }

    pub fn with_target_actor(mut self, target: ActorId) -> Self {
        self.target_actor = Some(target);
        self
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_patrol_route(mut self, route: Vec<Vec3>) -> Self {
        self.patrol_route = Some(route);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verb_parse_is_case_insensitive() {
        assert_eq!(CommandVerb::parse("FOLLOW"), CommandVerb::Follow);
        assert_eq!(CommandVerb::parse(" patrol "), CommandVerb::Patrol);
        assert_eq!(
            CommandVerb::parse("dance"),
            CommandVerb::Unrecognized("dance".to_string())
        );
    }

    #[test]
    fn test_transition_table() {
        let table = [
            ("follow", Some(NpcState::Following)),
            ("stay", Some(NpcState::Idle)),
            ("attack", Some(NpcState::Attacking)),
            ("defend", Some(NpcState::Defending)),
            ("guard", Some(NpcState::Guarding)),
            ("peaceful", Some(NpcState::Peaceful)),
            ("combat", Some(NpcState::Combat)),
            ("patrol", Some(NpcState::Following)),
            ("moonwalk", None),
        ];
        for (raw, expected) in table {
            assert_eq!(CommandVerb::parse(raw).target_state(), expected, "{raw}");
        }
    }

    #[test]
    fn test_group_verbs() {
        let group: Vec<&str> = ["follow", "stay", "attack", "defend", "guard", "peaceful", "combat", "patrol"]
            .into_iter()
            .filter(|v| CommandVerb::parse(v).is_group_command())
            .collect();
        assert_eq!(group, vec!["follow", "stay", "peaceful", "combat"]);
    }

    #[test]
    fn test_state_parse_and_serde() {
        assert_eq!("Guarding".parse::<NpcState>().unwrap(), NpcState::Guarding);
        assert!("asleep".parse::<NpcState>().is_err());
        assert_eq!(serde_json::to_string(&NpcState::Combat).unwrap(), "\"combat\"");
    }
}
