//! Spawn one NPC or a formation of NPCs.

use std::sync::Arc;

use gangnpc_domain::{
    AdvancedGroupId, CombatStats, FactionCatalog, Npc, NpcLoadout, SpawnGroupId,
};
use gangnpc_shared::SpawnNpcRequest;

use super::NpcError;
use crate::infrastructure::ports::{AdvancedGroupRepo, ClockPort, NpcRepo, RandomPort};
use crate::use_cases::validation;

pub struct SpawnNpcs {
    npcs: Arc<dyn NpcRepo>,
    groups: Arc<dyn AdvancedGroupRepo>,
    catalog: Arc<FactionCatalog>,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
}

impl SpawnNpcs {
    pub fn new(
        npcs: Arc<dyn NpcRepo>,
        groups: Arc<dyn AdvancedGroupRepo>,
        catalog: Arc<FactionCatalog>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        Self {
            npcs,
            groups,
            catalog,
            clock,
            random,
        }
    }

    /// Validate the whole request, then insert `quantity` NPCs laid out in
    /// the requested formation. A batch of more than one shares a fresh
    /// spawn-group id.
    ///
    /// Inserts run one by one; a storage failure part-way leaves the NPCs
    /// inserted so far in place.
    pub async fn execute(&self, request: SpawnNpcRequest) -> Result<Vec<Npc>, NpcError> {
        let quantity = validation::require_quantity(request.quantity)?;
        let stats = CombatStats::from_raw(request.health, request.armor, request.accuracy)?;
        let loadout = NpcLoadout::resolve(
            &self.catalog,
            request.faction,
            request.model.as_deref(),
            request.weapon.as_deref(),
        )?;
        let center = validation::spawn_center(request.position, request.vec3_input.as_deref())?;
        let heading = request
            .heading
            .map(validation::heading)
            .transpose()?
            .unwrap_or_default();

        let owners = validation::actor_list(request.owner_ids.as_deref()).unwrap_or_default();
        let friends =
            validation::actor_list(request.friendly_actor_ids.as_deref()).unwrap_or_default();
        let jobs = validation::token_list(request.friendly_jobs.as_deref()).unwrap_or_default();

        let advanced_group = match request.advanced_group_id {
            Some(raw) => {
                let id = AdvancedGroupId::from_uuid(raw);
                if self.groups.get(id).await?.is_none() {
                    return Err(NpcError::AdvancedGroupNotFound(id));
                }
                Some(id)
            }
            None => None,
        };

        let spawn_group = (quantity > 1).then(|| SpawnGroupId::from_uuid(self.random.gen_uuid()));
        let positions = request
            .formation
            .layout(center, quantity, |min, max| self.random.gen_range(min, max));
        let now = self.clock.now();

        let mut spawned = Vec::with_capacity(quantity);
        for position in positions {
            let mut npc = Npc::new(loadout.clone(), stats, position, now)
                .with_heading(heading)
                .with_owners(owners.clone())
                .with_friendly_actors(friends.clone())
                .with_friendly_jobs(jobs.clone());
            if let Some(group_id) = spawn_group {
                npc = npc.with_spawn_group(group_id);
            }
            if let Some(group_id) = advanced_group {
                npc = npc.with_advanced_group(group_id);
            }

            self.npcs.insert(&npc).await?;
            spawned.push(npc);
        }

        tracing::info!(
            faction = %request.faction,
            quantity,
            formation = %request.formation,
            spawn_group_id = ?spawn_group,
            "Spawned NPCs"
        );
        Ok(spawned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::{FixedClock, FixedRandom};
    use crate::infrastructure::ports::{MockAdvancedGroupRepo, MockNpcRepo, MockRandomPort};
    use chrono::{TimeZone, Utc};
    use gangnpc_domain::{DomainError, Faction, Formation, Vec3};
    use gangnpc_shared::PositionData;
    use uuid::Uuid;

    fn clock() -> Arc<FixedClock> {
        Arc::new(FixedClock(Utc.timestamp_opt(1_700_000_000, 0).unwrap()))
    }

    fn use_case(npcs: MockNpcRepo, random: Arc<dyn RandomPort>) -> SpawnNpcs {
        SpawnNpcs::new(
            Arc::new(npcs),
            Arc::new(MockAdvancedGroupRepo::new()),
            Arc::new(FactionCatalog::builtin()),
            clock(),
            random,
        )
    }

    fn request_at(faction: Faction, x: f64, y: f64, z: f64) -> SpawnNpcRequest {
        let mut request = SpawnNpcRequest::new(faction);
        request.position = Some(PositionData { x, y, z });
        request
    }

    #[tokio::test]
    async fn when_line_of_five_spawns_shared_group_along_x() {
        let group_uuid = Uuid::new_v4();
        let mut random = MockRandomPort::new();
        random.expect_gen_uuid().times(1).returning(move || group_uuid);
        random.expect_gen_range().never();

        let mut npcs = MockNpcRepo::new();
        npcs.expect_insert().times(5).returning(|_| Ok(()));

        let mut request = request_at(Faction::GroveStreet, 100.0, 200.0, 30.0);
        request.quantity = 5;
        request.formation = Formation::Line;

        let spawned = use_case(npcs, Arc::new(random))
            .execute(request)
            .await
            .expect("spawn");

        assert_eq!(spawned.len(), 5);
        for (i, npc) in spawned.iter().enumerate() {
            let expected_x = 100.0 + (i as f64 - 2.5) * 2.0;
            assert_eq!(npc.position(), Vec3::new(expected_x, 200.0, 30.0));
            assert_eq!(npc.spawn_group_id(), Some(SpawnGroupId::from_uuid(group_uuid)));
            assert_eq!(npc.faction(), Faction::GroveStreet);
        }
    }

    #[tokio::test]
    async fn when_single_spawn_has_no_group_and_default_loadout() {
        let mut npcs = MockNpcRepo::new();
        npcs.expect_insert().times(1).returning(|_| Ok(()));

        let spawned = use_case(npcs, Arc::new(FixedRandom(0.0)))
            .execute(request_at(Faction::Ballas, 1.0, 2.0, 3.0))
            .await
            .expect("spawn");

        let npc = &spawned[0];
        assert_eq!(npc.spawn_group_id(), None);
        assert_eq!(npc.model(), "g_m_y_ballaseast_01");
        assert_eq!(npc.weapon(), "WEAPON_PISTOL");
        assert_eq!(npc.stats(), CombatStats::default());
        // A single circle member sits at angle 0
        assert_eq!(npc.position(), Vec3::new(3.0, 2.0, 3.0));
    }

    #[tokio::test]
    async fn when_scattered_samples_offsets_from_random_port() {
        let mut npcs = MockNpcRepo::new();
        npcs.expect_insert().times(2).returning(|_| Ok(()));

        let mut request = request_at(Faction::Triads, 0.0, 0.0, 10.0);
        request.quantity = 2;
        request.formation = Formation::Scattered;

        let spawned = use_case(npcs, Arc::new(FixedRandom(4.0)))
            .execute(request)
            .await
            .expect("spawn");

        for npc in &spawned {
            assert_eq!(npc.position(), Vec3::new(4.0, 4.0, 10.0));
        }
    }

    #[tokio::test]
    async fn when_permission_lists_given_they_are_parsed() {
        let mut npcs = MockNpcRepo::new();
        npcs.expect_insert()
            .withf(|npc| npc.owner_ids().len() == 2 && npc.friendly_jobs() == ["police"])
            .times(1)
            .returning(|_| Ok(()));

        let mut request = request_at(Faction::Vagos, 0.0, 0.0, 0.0);
        request.owner_ids = Some("1, 2,".to_string());
        request.friendly_jobs = Some(" police ".to_string());

        use_case(npcs, Arc::new(FixedRandom(0.0)))
            .execute(request)
            .await
            .expect("spawn");
    }

    mod rejected {
        use super::*;

        async fn rejected(request: SpawnNpcRequest) -> NpcError {
            // No insert expectation: any insert would panic the mock
            use_case(MockNpcRepo::new(), Arc::new(FixedRandom(0.0)))
                .execute(request)
                .await
                .unwrap_err()
        }

        fn is_validation(err: &NpcError) -> bool {
            matches!(err, NpcError::Domain(e) if e.is_validation())
        }

        #[tokio::test]
        async fn quantity_out_of_range() {
            let mut request = request_at(Faction::Vagos, 0.0, 0.0, 0.0);
            request.quantity = 21;
            assert!(is_validation(&rejected(request).await));

            let mut request = request_at(Faction::Vagos, 0.0, 0.0, 0.0);
            request.quantity = 0;
            assert!(is_validation(&rejected(request).await));
        }

        #[tokio::test]
        async fn health_out_of_range() {
            let mut request = request_at(Faction::Vagos, 0.0, 0.0, 0.0);
            request.health = Some(250);
            assert!(is_validation(&rejected(request).await));
        }

        #[tokio::test]
        async fn weapon_from_another_faction() {
            let mut request = request_at(Faction::Vagos, 0.0, 0.0, 0.0);
            request.weapon = Some("WEAPON_MACHETE".to_string());
            let err = rejected(request).await;
            assert!(matches!(err, NpcError::Domain(DomainError::Validation(_))));
        }

        #[tokio::test]
        async fn missing_position() {
            let mut request = SpawnNpcRequest::new(Faction::Vagos);
            request.vec3_input = Some("nowhere".to_string());
            assert!(is_validation(&rejected(request).await));
        }
    }

    #[tokio::test]
    async fn when_advanced_group_missing_nothing_is_inserted() {
        let mut groups = MockAdvancedGroupRepo::new();
        groups.expect_get().times(1).returning(|_| Ok(None));

        let use_case = SpawnNpcs::new(
            Arc::new(MockNpcRepo::new()),
            Arc::new(groups),
            Arc::new(FactionCatalog::builtin()),
            clock(),
            Arc::new(FixedRandom(0.0)),
        );

        let mut request = request_at(Faction::Vagos, 0.0, 0.0, 0.0);
        request.advanced_group_id = Some(Uuid::new_v4());

        let err = use_case.execute(request).await.unwrap_err();
        assert!(matches!(err, NpcError::AdvancedGroupNotFound(_)));
    }
}
