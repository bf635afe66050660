//! Factions ("gangs") and the catalog of models and weapons each may use.
//!
//! The catalog is static configuration: it is built once at startup and
//! handed to everything that validates a loadout. Nothing mutates it.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// One of the fixed NPC allegiances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    Ballas,
    GroveStreet,
    Vagos,
    LostMc,
    Triads,
    ArmenianMafia,
}

impl Faction {
    pub fn all() -> &'static [Faction] {
        &[
            Faction::Ballas,
            Faction::GroveStreet,
            Faction::Vagos,
            Faction::LostMc,
            Faction::Triads,
            Faction::ArmenianMafia,
        ]
    }

    /// The wire/storage tag for this faction.
    pub fn as_str(&self) -> &'static str {
        match self {
            Faction::Ballas => "ballas",
            Faction::GroveStreet => "grove_street",
            Faction::Vagos => "vagos",
            Faction::LostMc => "lost_mc",
            Faction::Triads => "triads",
            Faction::ArmenianMafia => "armenian_mafia",
        }
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Faction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_lowercase();
        Faction::all()
            .iter()
            .copied()
            .find(|f| f.as_str() == tag)
            .ok_or_else(|| DomainError::parse(format!("Unknown faction: {}", s)))
    }
}

/// Display data and allowed loadout for a faction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactionProfile {
    pub name: String,
    pub color: String,
    pub models: Vec<String>,
    pub weapons: Vec<String>,
}

impl FactionProfile {
    pub fn allows_model(&self, model: &str) -> bool {
        self.models.iter().any(|m| m == model)
    }

    pub fn allows_weapon(&self, weapon: &str) -> bool {
        self.weapons.iter().any(|w| w == weapon)
    }
}

/// Read-only lookup of faction profiles.
///
/// Serializes as a map keyed by faction tag. Deserialize the map and go
/// through [`FactionCatalog::new`] so completeness is checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FactionCatalog {
    profiles: BTreeMap<Faction, FactionProfile>,
}

impl FactionCatalog {
    /// Build a catalog, rejecting one that leaves a faction without a model
    /// or a weapon (spawns fall back to the first entry of each list).
    pub fn new(profiles: BTreeMap<Faction, FactionProfile>) -> Result<Self, DomainError> {
        for faction in Faction::all() {
            let profile = profiles.get(faction).ok_or_else(|| {
                DomainError::validation(format!("Catalog is missing faction {}", faction))
            })?;
            if profile.models.is_empty() {
                return Err(DomainError::validation(format!(
                    "Faction {} has no models",
                    faction
                )));
            }
            if profile.weapons.is_empty() {
                return Err(DomainError::validation(format!(
                    "Faction {} has no weapons",
                    faction
                )));
            }
        }
        Ok(Self { profiles })
    }

    /// The compiled-in catalog.
    pub fn builtin() -> Self {
        let profile = |name: &str, color: &str, models: &[&str], weapons: &[&str]| FactionProfile {
            name: name.to_string(),
            color: color.to_string(),
            models: models.iter().map(|m| m.to_string()).collect(),
            weapons: weapons.iter().map(|w| w.to_string()).collect(),
        };

        let profiles = BTreeMap::from([
            (
                Faction::Ballas,
                profile(
                    "Ballas",
                    "#800080",
                    &["g_m_y_ballaseast_01", "g_m_y_ballasorig_01", "g_m_y_ballasouth_01"],
                    &["WEAPON_PISTOL", "WEAPON_MICROSMG", "WEAPON_MACHETE", "WEAPON_PUMPSHOTGUN"],
                ),
            ),
            (
                Faction::GroveStreet,
                profile(
                    "Grove Street Families",
                    "#00FF00",
                    &["g_m_y_famca_01", "g_m_y_famdnf_01", "g_m_y_famfor_01"],
                    &["WEAPON_PISTOL", "WEAPON_SMG", "WEAPON_KNIFE", "WEAPON_ASSAULTRIFLE"],
                ),
            ),
            (
                Faction::Vagos,
                profile(
                    "Los Santos Vagos",
                    "#FFFF00",
                    &["g_m_y_mexgang_01", "g_m_y_mexgoon_01"],
                    &["WEAPON_PISTOL", "WEAPON_MICROSMG", "WEAPON_SAWNOFFSHOTGUN"],
                ),
            ),
            (
                Faction::LostMc,
                profile(
                    "Lost MC",
                    "#FF0000",
                    &["g_m_y_lost_01", "g_m_y_lost_02", "g_m_y_lost_03"],
                    &["WEAPON_PISTOL", "WEAPON_SAWNOFFSHOTGUN", "WEAPON_KNIFE", "WEAPON_SMG"],
                ),
            ),
            (
                Faction::Triads,
                profile(
                    "Triads",
                    "#0000FF",
                    &["g_m_m_chigoon_01", "g_m_m_chigoon_02", "g_m_m_chiboss_01"],
                    &["WEAPON_PISTOL", "WEAPON_MICROSMG", "WEAPON_SWITCHBLADE", "WEAPON_COMBATPISTOL"],
                ),
            ),
            (
                Faction::ArmenianMafia,
                profile(
                    "Armenian Mafia",
                    "#4B0082",
                    &["g_m_m_armboss_01", "g_m_m_armgoon_01", "g_m_m_armlieut_01"],
                    &["WEAPON_PISTOL", "WEAPON_SMG", "WEAPON_COMBATPISTOL", "WEAPON_ASSAULTRIFLE"],
                ),
            ),
        ]);

        Self { profiles }
    }

    pub fn profile(&self, faction: Faction) -> Result<&FactionProfile, DomainError> {
        self.profiles
            .get(&faction)
            .ok_or_else(|| DomainError::validation(format!("No catalog entry for {}", faction)))
    }

    pub fn profiles(&self) -> &BTreeMap<Faction, FactionProfile> {
        &self.profiles
    }

    /// Resolve the model for a faction: the requested one if allowed, the
    /// faction's first model if none was requested.
    pub fn resolve_model(&self, faction: Faction, requested: Option<&str>) -> Result<String, DomainError> {
        let profile = self.profile(faction)?;
        match requested.map(str::trim).filter(|m| !m.is_empty()) {
            Some(model) if profile.allows_model(model) => Ok(model.to_string()),
            Some(model) => Err(DomainError::validation(format!(
                "Model {} is not allowed for faction {}",
                model, faction
            ))),
            None => first(&profile.models, faction, "model"),
        }
    }

    /// Resolve the weapon for a faction, same rules as [`Self::resolve_model`].
    pub fn resolve_weapon(&self, faction: Faction, requested: Option<&str>) -> Result<String, DomainError> {
        let profile = self.profile(faction)?;
        match requested.map(str::trim).filter(|w| !w.is_empty()) {
            Some(weapon) if profile.allows_weapon(weapon) => Ok(weapon.to_string()),
            Some(weapon) => Err(DomainError::validation(format!(
                "Weapon {} is not allowed for faction {}",
                weapon, faction
            ))),
            None => first(&profile.weapons, faction, "weapon"),
        }
    }
}

impl Default for FactionCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn first(items: &[String], faction: Faction, what: &str) -> Result<String, DomainError> {
    items
        .first()
        .cloned()
        .ok_or_else(|| DomainError::validation(format!("Faction {} has no {}", faction, what)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_faction_tags_round_trip() {
        for faction in Faction::all() {
            assert_eq!(faction.as_str().parse::<Faction>().unwrap(), *faction);
            let json = serde_json::to_string(faction).unwrap();
            assert_eq!(json, format!("\"{}\"", faction.as_str()));
        }
        assert!("families".parse::<Faction>().is_err());
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = FactionCatalog::builtin();
        assert!(FactionCatalog::new(catalog.profiles().clone()).is_ok());
        assert_eq!(catalog.profiles().len(), 6);
        assert_eq!(
            catalog.profile(Faction::GroveStreet).unwrap().name,
            "Grove Street Families"
        );
    }

    #[test]
    fn test_resolve_defaults_to_first_entry() {
        let catalog = FactionCatalog::builtin();
        assert_eq!(
            catalog.resolve_model(Faction::Vagos, None).unwrap(),
            "g_m_y_mexgang_01"
        );
        assert_eq!(
            catalog.resolve_weapon(Faction::Vagos, Some("  ")).unwrap(),
            "WEAPON_PISTOL"
        );
    }

    #[test]
    fn test_resolve_rejects_other_factions_loadout() {
        let catalog = FactionCatalog::builtin();
        let err = catalog
            .resolve_weapon(Faction::Vagos, Some("WEAPON_ASSAULTRIFLE"))
            .unwrap_err();
        assert!(err.is_validation());
        assert!(catalog
            .resolve_model(Faction::Ballas, Some("g_m_y_lost_01"))
            .is_err());
        assert_eq!(
            catalog
                .resolve_model(Faction::Ballas, Some("g_m_y_ballasorig_01"))
                .unwrap(),
            "g_m_y_ballasorig_01"
        );
    }

    #[test]
    fn test_new_rejects_incomplete_catalog() {
        let mut profiles = FactionCatalog::builtin().profiles().clone();
        profiles.remove(&Faction::Triads);
        assert!(FactionCatalog::new(profiles).is_err());

        let mut profiles = FactionCatalog::builtin().profiles().clone();
        if let Some(p) = profiles.get_mut(&Faction::Ballas) {
            p.weapons.clear();
        }
        assert!(FactionCatalog::new(profiles).is_err());
    }
}
