//! NPC aggregate - a spawned gang member and everything that controls it
//!
//! # Invariants
//!
//! - Stats are always in range (enforced by `Health`, `Armor`, `Accuracy`)
//! - `model` and `weapon` are members of the faction's catalog entry at the
//!   time they were set (enforced by [`NpcLoadout`] and [`Npc::apply_update`])
//! - Commands mutate state only for recognized verbs
//!
//! Mutations return outcome values instead of booleans so callers can log
//! and report what actually changed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{AdvancedGroupId, NpcId, SpawnGroupId};
use crate::value_objects::{
    Accuracy, ActorId, Armor, CombatStats, CommandVerb, Faction, FactionCatalog, Health,
    NpcCommand, NpcState, NpcTarget, Vec3,
};

/// A faction together with a catalog-checked model and weapon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NpcLoadout {
    faction: Faction,
    model: String,
    weapon: String,
}

impl NpcLoadout {
    /// Check a requested model/weapon against the faction catalog, filling
    /// in the faction's first entry for anything not requested.
    pub fn resolve(
        catalog: &FactionCatalog,
        faction: Faction,
        model: Option<&str>,
        weapon: Option<&str>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            faction,
            model: catalog.resolve_model(faction, model)?,
            weapon: catalog.resolve_weapon(faction, weapon)?,
        })
    }

    pub fn faction(&self) -> Faction {
        self.faction
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn weapon(&self) -> &str {
        &self.weapon
    }
}

/// A managed NPC.
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use gangnpc_domain::aggregates::{Npc, NpcLoadout};
/// use gangnpc_domain::value_objects::{CombatStats, Faction, FactionCatalog, NpcState, Vec3};
///
/// let catalog = FactionCatalog::builtin();
/// let loadout = NpcLoadout::resolve(&catalog, Faction::GroveStreet, None, None).unwrap();
/// let npc = Npc::new(loadout, CombatStats::default(), Vec3::new(1.0, 2.0, 3.0), Utc::now());
///
/// assert_eq!(npc.state(), NpcState::Idle);
/// assert_eq!(npc.weapon(), "WEAPON_PISTOL");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Npc {
    id: NpcId,
    faction: Faction,
    model: String,
    weapon: String,
    position: Vec3,
    #[serde(default)]
    heading: f64,
    #[serde(default)]
    state: NpcState,
    #[serde(flatten)]
    stats: CombatStats,

    // Grouping
    spawn_group_id: Option<SpawnGroupId>,
    advanced_group_id: Option<AdvancedGroupId>,

    // Permissions
    #[serde(default)]
    owner_ids: Vec<ActorId>,
    #[serde(default)]
    friendly_actor_ids: Vec<ActorId>,
    #[serde(default)]
    friendly_jobs: Vec<String>,

    // Behavior
    #[serde(default)]
    patrol_route: Vec<Vec3>,
    guard_position: Option<Vec3>,
    target: Option<NpcTarget>,
    last_command: Option<String>,
    last_command_by: Option<ActorId>,

    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Result of applying a command to an NPC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied {
        previous: NpcState,
        current: NpcState,
    },
    /// Unknown verb; the NPC was left untouched.
    Ignored { verb: String },
}

impl CommandOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, CommandOutcome::Applied { .. })
    }
}

/// Field changes for [`Npc::apply_update`]. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NpcUpdate {
    pub health: Option<Health>,
    pub armor: Option<Armor>,
    pub accuracy: Option<Accuracy>,
    pub model: Option<String>,
    pub weapon: Option<String>,
    pub state: Option<NpcState>,
    pub position: Option<Vec3>,
    pub heading: Option<f64>,
    pub owner_ids: Option<Vec<ActorId>>,
    pub friendly_actor_ids: Option<Vec<ActorId>>,
    pub friendly_jobs: Option<Vec<String>>,
}

impl Npc {
    // =========================================================================
    // Constructor
    // =========================================================================

    pub fn new(loadout: NpcLoadout, stats: CombatStats, position: Vec3, now: DateTime<Utc>) -> Self {
        Self {
            id: NpcId::new(),
            faction: loadout.faction,
            model: loadout.model,
            weapon: loadout.weapon,
            position,
            heading: 0.0,
            state: NpcState::Idle,
            stats,
            spawn_group_id: None,
            advanced_group_id: None,
            owner_ids: Vec::new(),
            friendly_actor_ids: Vec::new(),
            friendly_jobs: Vec::new(),
            patrol_route: Vec::new(),
            guard_position: None,
            target: None,
            last_command: None,
            last_command_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_heading(mut self, heading: f64) -> Self {
        self.heading = heading;
        self
    }

    pub fn with_spawn_group(mut self, group_id: SpawnGroupId) -> Self {
        self.spawn_group_id = Some(group_id);
        self
    }

    pub fn with_advanced_group(mut self, group_id: AdvancedGroupId) -> Self {
        self.advanced_group_id = Some(group_id);
        self
    }

    pub fn with_owners(mut self, owners: Vec<ActorId>) -> Self {
        self.owner_ids = owners;
        self
    }

    pub fn with_friendly_actors(mut self, actors: Vec<ActorId>) -> Self {
        self.friendly_actor_ids = actors;
        self
    }

    pub fn with_friendly_jobs(mut self, jobs: Vec<String>) -> Self {
        self.friendly_jobs = jobs;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> NpcId {
        self.id
    }

    #[inline]
    pub fn faction(&self) -> Faction {
        self.faction
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn weapon(&self) -> &str {
        &self.weapon
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn heading(&self) -> f64 {
        self.heading
    }

    #[inline]
    pub fn state(&self) -> NpcState {
        self.state
    }

    #[inline]
    pub fn stats(&self) -> CombatStats {
        self.stats
    }

    #[inline]
    pub fn spawn_group_id(&self) -> Option<SpawnGroupId> {
        self.spawn_group_id
    }

    #[inline]
    pub fn advanced_group_id(&self) -> Option<AdvancedGroupId> {
        self.advanced_group_id
    }

    pub fn owner_ids(&self) -> &[ActorId] {
        &self.owner_ids
    }

    pub fn friendly_actor_ids(&self) -> &[ActorId] {
        &self.friendly_actor_ids
    }

    pub fn friendly_jobs(&self) -> &[String] {
        &self.friendly_jobs
    }

    pub fn patrol_route(&self) -> &[Vec3] {
        &self.patrol_route
    }

    pub fn guard_position(&self) -> Option<Vec3> {
        self.guard_position
    }

    pub fn target(&self) -> Option<&NpcTarget> {
        self.target.as_ref()
    }

    pub fn last_command(&self) -> Option<&str> {
        self.last_command.as_deref()
    }

    pub fn last_command_by(&self) -> Option<&ActorId> {
        self.last_command_by.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Apply a partial update. Every catalog check runs before any field is
    /// written, so a rejected update leaves the NPC untouched.
    pub fn apply_update(
        &mut self,
        update: NpcUpdate,
        catalog: &FactionCatalog,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let profile = catalog.profile(self.faction)?;

        if let Some(model) = update.model.as_deref() {
            if !profile.allows_model(model) {
                return Err(DomainError::validation(format!(
                    "Model {} is not allowed for faction {}",
                    model, self.faction
                )));
            }
        }
        if let Some(weapon) = update.weapon.as_deref() {
            if !profile.allows_weapon(weapon) {
                return Err(DomainError::validation(format!(
                    "Weapon {} is not allowed for faction {}",
                    weapon, self.faction
                )));
            }
        }
        if let Some(heading) = update.heading {
            if !heading.is_finite() {
                return Err(DomainError::validation("Heading must be a finite number"));
            }
        }

        if let Some(health) = update.health {
            self.stats.health = health;
        }
        if let Some(armor) = update.armor {
            self.stats.armor = armor;
        }
        if let Some(accuracy) = update.accuracy {
            self.stats.accuracy = accuracy;
        }
        if let Some(model) = update.model {
            self.model = model;
        }
        if let Some(weapon) = update.weapon {
            self.weapon = weapon;
        }
        if let Some(state) = update.state {
            self.state = state;
        }
        if let Some(position) = update.position {
            self.position = position;
        }
        if let Some(heading) = update.heading {
            self.heading = heading;
        }
        if let Some(owners) = update.owner_ids {
            self.owner_ids = owners;
        }
        if let Some(friends) = update.friendly_actor_ids {
            self.friendly_actor_ids = friends;
        }
        if let Some(jobs) = update.friendly_jobs {
            self.friendly_jobs = jobs;
        }

        self.updated_at = now;
        Ok(())
    }

    /// Drive the behavioral state machine with one command.
    pub fn apply_command(&mut self, command: &NpcCommand, now: DateTime<Utc>) -> CommandOutcome {
        let Some(next) = command.verb.target_state() else {
            return CommandOutcome::Ignored {
                verb: command.verb.to_string(),
            };
        };

        match &command.verb {
            CommandVerb::Follow | CommandVerb::Defend => {
                self.target = Some(NpcTarget::Actor(command.issuer.clone()));
            }
            CommandVerb::Stay => {
                self.target = None;
            }
            CommandVerb::Attack => {
                if let Some(target) = &command.target_actor {
                    self.target = Some(NpcTarget::Actor(target.clone()));
                } else if let Some(position) = command.position {
                    self.target = Some(NpcTarget::Position(position));
                }
            }
            CommandVerb::Guard => {
                if let Some(position) = command.position {
                    self.guard_position = Some(position);
                }
            }
            CommandVerb::Patrol => {
                if let Some(route) = &command.patrol_route {
                    self.patrol_route = route.clone();
                }
            }
            CommandVerb::Peaceful | CommandVerb::Combat | CommandVerb::Unrecognized(_) => {}
        }

        let previous = self.state;
        self.state = next;
        self.last_command = Some(command.verb.to_string());
        self.last_command_by = Some(command.issuer.clone());
        self.updated_at = now;

        CommandOutcome::Applied {
            previous,
            current: next,
        }
    }

    pub fn join_advanced_group(&mut self, group_id: AdvancedGroupId, now: DateTime<Utc>) {
        self.advanced_group_id = Some(group_id);
        self.updated_at = now;
    }

    /// Returns the group the NPC was in, if any.
    pub fn leave_advanced_group(&mut self, now: DateTime<Utc>) -> Option<AdvancedGroupId> {
        let previous = self.advanced_group_id.take();
        if previous.is_some() {
            self.updated_at = now;
        }
        previous
    }
}
