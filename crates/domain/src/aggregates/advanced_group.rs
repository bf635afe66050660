//! Advanced group aggregate - a named, persistent NPC group with a member list
//!
//! Unlike spawn groups (which are just a shared id stamped on NPCs created
//! together), advanced groups are stored entities. NPCs point at them via
//! `advanced_group_id`; the group itself does not list its NPCs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::AdvancedGroupId;
use crate::value_objects::{ActorId, Description, Faction, GroupMember, GroupName, PatrolArea};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvancedGroup {
    id: AdvancedGroupId,
    name: GroupName,
    #[serde(default)]
    description: Description,
    faction: Faction,
    created_by: ActorId,
    #[serde(default)]
    auto_defend: bool,
    #[serde(default)]
    auto_attack_enemies: bool,
    patrol_area: Option<PatrolArea>,
    #[serde(default)]
    members: Vec<GroupMember>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Field changes for [`AdvancedGroup::apply_update`].
///
/// `patrol_area` is doubly optional: `Some(None)` clears the area.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdvancedGroupUpdate {
    pub name: Option<GroupName>,
    pub description: Option<Description>,
    pub faction: Option<Faction>,
    pub auto_defend: Option<bool>,
    pub auto_attack_enemies: Option<bool>,
    pub patrol_area: Option<Option<PatrolArea>>,
    pub members: Option<Vec<GroupMember>>,
}

impl AdvancedGroup {
    pub fn new(name: GroupName, faction: Faction, created_by: ActorId, now: DateTime<Utc>) -> Self {
        Self {
            id: AdvancedGroupId::new(),
            name,
            description: Description::empty(),
            faction,
            created_by,
            auto_defend: false,
            auto_attack_enemies: false,
            patrol_area: None,
            members: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: Description) -> Self {
        self.description = description;
        self
    }

    pub fn with_auto_defend(mut self, enabled: bool) -> Self {
        self.auto_defend = enabled;
        self
    }

    pub fn with_auto_attack_enemies(mut self, enabled: bool) -> Self {
        self.auto_attack_enemies = enabled;
        self
    }

    pub fn with_patrol_area(mut self, area: PatrolArea) -> Self {
        self.patrol_area = Some(area);
        self
    }

    pub fn with_members(mut self, members: Vec<GroupMember>) -> Self {
        self.members = members;
        self
    }

    #[inline]
    pub fn id(&self) -> AdvancedGroupId {
        self.id
    }

    pub fn name(&self) -> &GroupName {
        &self.name
    }

    pub fn description(&self) -> &Description {
        &self.description
    }

    #[inline]
    pub fn faction(&self) -> Faction {
        self.faction
    }

    pub fn created_by(&self) -> &ActorId {
        &self.created_by
    }

    pub fn auto_defend(&self) -> bool {
        self.auto_defend
    }

    pub fn auto_attack_enemies(&self) -> bool {
        self.auto_attack_enemies
    }

    pub fn patrol_area(&self) -> Option<&PatrolArea> {
        self.patrol_area.as_ref()
    }

    pub fn members(&self) -> &[GroupMember] {
        &self.members
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Apply a partial update. Values arrive pre-validated, so this cannot fail.
    pub fn apply_update(&mut self, update: AdvancedGroupUpdate, now: DateTime<Utc>) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(faction) = update.faction {
            self.faction = faction;
        }
        if let Some(auto_defend) = update.auto_defend {
            self.auto_defend = auto_defend;
        }
        if let Some(auto_attack) = update.auto_attack_enemies {
            self.auto_attack_enemies = auto_attack;
        }
        if let Some(area) = update.patrol_area {
            self.patrol_area = area;
        }
        if let Some(members) = update.members {
            self.members = members;
        }
        self.updated_at = now;
    }
}
