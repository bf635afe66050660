use std::sync::Arc;

use gangnpc_domain::{
    ActorId, CommandOutcome, CommandVerb, ControlLevel, Npc, NpcCommand, NpcId,
};
use gangnpc_shared::NpcCommandRequest;
use uuid::Uuid;

use super::{authorize, CommandError};
use crate::infrastructure::ports::{AdvancedGroupRepo, ClockPort, NpcRepo, RepoError};
use crate::use_cases::validation;

/// What happened to the NPC, and under which control level.
#[derive(Debug, Clone)]
pub struct NpcCommandReport {
    pub npc: Npc,
    pub outcome: CommandOutcome,
    pub level: ControlLevel,
}

/// Issue a command to a single NPC on behalf of an actor.
pub struct CommandNpc {
    npcs: Arc<dyn NpcRepo>,
    groups: Arc<dyn AdvancedGroupRepo>,
    clock: Arc<dyn ClockPort>,
}

impl CommandNpc {
    pub fn new(
        npcs: Arc<dyn NpcRepo>,
        groups: Arc<dyn AdvancedGroupRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            npcs,
            groups,
            clock,
        }
    }

    pub async fn execute(&self, request: NpcCommandRequest) -> Result<NpcCommandReport, CommandError> {
        let npc_id = Uuid::parse_str(request.npc_id.trim())
            .map(NpcId::from_uuid)
            .map_err(|_| CommandError::UnknownNpc(request.npc_id.clone()))?;
        let command = parse_command(&request)?;

        let mut npc = self
            .npcs
            .get(npc_id)
            .await?
            .ok_or(CommandError::NotFound(npc_id))?;

        let group = match npc.advanced_group_id() {
            Some(group_id) => self.groups.get(group_id).await?,
            None => None,
        };

        let decision = authorize(&npc, group.as_ref(), &command.issuer);
        if !decision.allowed {
            tracing::info!(npc_id = %npc_id, actor_id = %command.issuer, "Command refused");
            return Err(CommandError::Unauthorized {
                actor: command.issuer,
                npc: npc_id,
            });
        }

        let outcome = npc.apply_command(&command, self.clock.now());
        match &outcome {
            CommandOutcome::Applied { previous, current } => {
                self.npcs.save(&npc).await.map_err(|e| match e {
                    RepoError::NotFound { .. } => CommandError::NotFound(npc_id),
                    other => CommandError::Repo(other),
                })?;
                tracing::info!(
                    npc_id = %npc_id,
                    command = %command.verb,
                    actor_id = %command.issuer,
                    from = %previous,
                    to = %current,
                    "Command applied"
                );
            }
            CommandOutcome::Ignored { verb } => {
                tracing::debug!(npc_id = %npc_id, command = %verb, "Unknown command ignored");
            }
        }

        Ok(NpcCommandReport {
            npc,
            outcome,
            level: decision.level,
        })
    }
}

fn parse_command(request: &NpcCommandRequest) -> Result<NpcCommand, CommandError> {
    let issuer = validation::actor(&request.actor_id, "actor_id")?;
    let mut command = NpcCommand::new(CommandVerb::parse(&request.command), issuer);

    if let Some(target) = request.target_id.as_deref().filter(|t| !t.trim().is_empty()) {
        command = command.with_target_actor(validation::actor(target, "target_id")?);
    }
    if let Some(position) = request.position {
        command = command.with_position(validation::position(position, "position")?);
    }
    if let Some(route) = &request.patrol_route {
        let route = route
            .iter()
            .map(|point| validation::position(*point, "patrol_route"))
            .collect::<Result<Vec<_>, _>>()?;
        command = command.with_patrol_route(route);
    }
    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::{MockAdvancedGroupRepo, MockNpcRepo};
    use chrono::{TimeZone, Utc};
    use gangnpc_domain::{
        AdvancedGroup, CombatStats, Faction, FactionCatalog, GroupMember, GroupName, MemberRole,
        MemberSelector, NpcLoadout, NpcState, NpcTarget, Vec3,
    };
    use gangnpc_shared::PositionData;

    fn now() -> chrono::DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn actor(id: &str) -> ActorId {
        ActorId::new(id).unwrap()
    }

    fn owned_npc(owner: &str) -> Npc {
        let catalog = FactionCatalog::builtin();
        let loadout = NpcLoadout::resolve(&catalog, Faction::LostMc, None, None).unwrap();
        Npc::new(loadout, CombatStats::default(), Vec3::new(0.0, 0.0, 0.0), now())
            .with_owners(vec![actor(owner)])
    }

    fn request(npc: &Npc, command: &str, actor_id: &str) -> NpcCommandRequest {
        NpcCommandRequest {
            npc_id: npc.id().to_string(),
            command: command.to_string(),
            actor_id: actor_id.to_string(),
            target_id: None,
            position: None,
            patrol_route: None,
        }
    }

    fn use_case(npcs: MockNpcRepo, groups: MockAdvancedGroupRepo) -> CommandNpc {
        CommandNpc::new(Arc::new(npcs), Arc::new(groups), Arc::new(FixedClock(now())))
    }

    fn repo_with(npc: &Npc) -> MockNpcRepo {
        let stored = npc.clone();
        let mut repo = MockNpcRepo::new();
        repo.expect_get().returning(move |_| Ok(Some(stored.clone())));
        repo
    }

    #[tokio::test]
    async fn when_owner_follows_npc_targets_owner() {
        let npc = owned_npc("A");
        let mut npcs = repo_with(&npc);
        npcs.expect_save()
            .withf(|npc| npc.state() == NpcState::Following)
            .times(1)
            .returning(|_| Ok(()));

        let report = use_case(npcs, MockAdvancedGroupRepo::new())
            .execute(request(&npc, "follow", "A"))
            .await
            .expect("command");

        assert_eq!(report.level, ControlLevel::Owner);
        assert_eq!(report.npc.target(), Some(&NpcTarget::Actor(actor("A"))));
        assert_eq!(report.npc.last_command_by(), Some(&actor("A")));
        assert!(report.outcome.is_applied());
    }

    #[tokio::test]
    async fn when_actor_has_no_permission_returns_unauthorized() {
        let npc = owned_npc("A");
        let mut npcs = repo_with(&npc);
        npcs.expect_save().never();

        let err = use_case(npcs, MockAdvancedGroupRepo::new())
            .execute(request(&npc, "attack", "B"))
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn when_verb_unknown_nothing_is_saved() {
        let npc = owned_npc("A");
        let mut npcs = repo_with(&npc);
        npcs.expect_save().never();

        let report = use_case(npcs, MockAdvancedGroupRepo::new())
            .execute(request(&npc, "dance", "A"))
            .await
            .expect("command");

        assert!(!report.outcome.is_applied());
        assert_eq!(report.npc.state(), NpcState::Idle);
        assert_eq!(report.npc.last_command(), None);
    }

    #[tokio::test]
    async fn when_guard_has_position_it_is_recorded() {
        let npc = owned_npc("A");
        let mut npcs = repo_with(&npc);
        npcs.expect_save().times(1).returning(|_| Ok(()));

        let mut req = request(&npc, "guard", "A");
        req.position = Some(PositionData {
            x: 5.0,
            y: 6.0,
            z: 7.0,
        });
        let report = use_case(npcs, MockAdvancedGroupRepo::new())
            .execute(req)
            .await
            .expect("command");

        assert_eq!(report.npc.guard_position(), Some(Vec3::new(5.0, 6.0, 7.0)));
    }

    #[tokio::test]
    async fn when_actor_id_blank_request_is_invalid() {
        let npc = owned_npc("A");
        let err = use_case(MockNpcRepo::new(), MockAdvancedGroupRepo::new())
            .execute(request(&npc, "follow", "  "))
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::Domain(e) if e.is_validation()));
    }

    #[tokio::test]
    async fn when_npc_missing_returns_not_found() {
        let npc = owned_npc("A");
        let mut npcs = MockNpcRepo::new();
        npcs.expect_get().returning(|_| Ok(None));

        let err = use_case(npcs, MockAdvancedGroupRepo::new())
            .execute(request(&npc, "follow", "A"))
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::NotFound(id) if id == npc.id()));
    }

    #[tokio::test]
    async fn when_npc_id_is_not_a_uuid_returns_unknown_npc() {
        let npc = owned_npc("A");
        let mut npcs = MockNpcRepo::new();
        npcs.expect_get().never();

        let mut req = request(&npc, "follow", "A");
        req.npc_id = "abc".to_string();
        let err = use_case(npcs, MockAdvancedGroupRepo::new())
            .execute(req)
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::UnknownNpc(raw) if raw == "abc"));
    }

    #[tokio::test]
    async fn when_advanced_group_grants_leader_command_is_applied() {
        let group = AdvancedGroup::new(
            GroupName::new("Chapter").unwrap(),
            Faction::LostMc,
            actor("A"),
            now(),
        )
        .with_members(vec![GroupMember::new(
            MemberSelector::Actor(actor("C")),
            MemberRole::Leader,
        )]);
        let npc = owned_npc("A").with_advanced_group(group.id());

        let mut groups = MockAdvancedGroupRepo::new();
        let group_id = group.id();
        groups
            .expect_get()
            .withf(move |id| *id == group_id)
            .returning(move |_| Ok(Some(group.clone())));
        let mut npcs = repo_with(&npc);
        npcs.expect_save().times(1).returning(|_| Ok(()));

        let report = use_case(npcs, groups)
            .execute(request(&npc, "stay", "C"))
            .await
            .expect("command");
        assert_eq!(report.level, ControlLevel::Owner);
    }

    #[tokio::test]
    async fn when_group_uses_job_selector_actor_is_denied() {
        let group = AdvancedGroup::new(
            GroupName::new("Chapter").unwrap(),
            Faction::LostMc,
            actor("A"),
            now(),
        )
        .with_members(vec![GroupMember::new(
            MemberSelector::Job("mechanic".into()),
            MemberRole::Friendly,
        )]);
        let npc = owned_npc("A").with_advanced_group(group.id());

        let mut groups = MockAdvancedGroupRepo::new();
        groups.expect_get().returning(move |_| Ok(Some(group.clone())));

        let err = use_case(repo_with(&npc), groups)
            .execute(request(&npc, "follow", "mechanic-1"))
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::Unauthorized { .. }));
    }
}
