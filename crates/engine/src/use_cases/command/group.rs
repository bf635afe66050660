use std::collections::HashMap;
use std::sync::Arc;

use gangnpc_domain::{
    AdvancedGroup, AdvancedGroupId, CommandVerb, DomainError, NpcCommand,
};
use gangnpc_shared::GroupCommandRequest;
use uuid::Uuid;

use super::{authorize, CommandError};
use crate::infrastructure::ports::{AdvancedGroupRepo, ClockPort, NpcRepo, RepoError};
use crate::use_cases::validation;

/// Tally of a group command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCommandReport {
    pub group_key: Uuid,
    pub verb: CommandVerb,
    /// NPCs carrying the group key.
    pub matched: usize,
    /// NPCs the command was applied to.
    pub authorized: usize,
    /// NPCs skipped for lack of permission.
    pub unauthorized: usize,
    /// Authorized NPCs deleted before the command could be saved.
    pub vanished: usize,
}

impl GroupCommandReport {
    pub fn is_applied(&self) -> bool {
        self.verb.is_recognized()
    }
}

/// Broadcast a command to every NPC sharing a spawn-group or advanced-group
/// id. Each member is checked individually; members the actor may not
/// command are counted and skipped.
pub struct CommandGroup {
    npcs: Arc<dyn NpcRepo>,
    groups: Arc<dyn AdvancedGroupRepo>,
    clock: Arc<dyn ClockPort>,
}

impl CommandGroup {
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

    pub async fn execute(
        &self,
        request: GroupCommandRequest,
    ) -> Result<GroupCommandReport, CommandError> {
        let actor = validation::actor(&request.actor_id, "actor_id")?;
        let verb = CommandVerb::parse(&request.command);
        if verb.is_recognized() && !verb.is_group_command() {
            return Err(DomainError::validation(format!(
                "Command {} cannot be issued to a group",
                verb
            ))
            .into());
        }

        let key = Uuid::parse_str(request.group_id.trim())
            .map_err(|_| CommandError::GroupNotFound(request.group_id.clone()))?;
        let members = self.npcs.list_by_group_key(key).await?;
        if members.is_empty() {
            return Err(CommandError::GroupNotFound(key.to_string()));
        }

        let mut report = GroupCommandReport {
            group_key: key,
            verb: verb.clone(),
            matched: members.len(),
            authorized: 0,
            unauthorized: 0,
            vanished: 0,
        };

        if !verb.is_recognized() {
            tracing::debug!(group_key = %key, command = %verb, "Unknown group command ignored");
            return Ok(report);
        }

        let command = NpcCommand::new(verb, actor.clone());
        let now = self.clock.now();
        let mut loaded: HashMap<AdvancedGroupId, Option<AdvancedGroup>> = HashMap::new();

        for mut npc in members {
            let group = match npc.advanced_group_id() {
                Some(group_id) => {
                    if !loaded.contains_key(&group_id) {
                        loaded.insert(group_id, self.groups.get(group_id).await?);
                    }
                    loaded.get(&group_id).and_then(Option::as_ref)
                }
                None => None,
            };

            if !authorize(&npc, group, &actor).allowed {
                report.unauthorized += 1;
                continue;
            }

            npc.apply_command(&command, now);
            match self.npcs.save(&npc).await {
                Ok(()) => report.authorized += 1,
                Err(RepoError::NotFound { .. }) => {
                    report.vanished += 1;
                    tracing::debug!(npc_id = %npc.id(), "Group member vanished before save");
                }
                Err(e) => return Err(e.into()),
            }
        }

        tracing::info!(
            group_key = %key,
            command = %command.verb,
            actor_id = %actor,
            matched = report.matched,
            authorized = report.authorized,
            unauthorized = report.unauthorized,
            vanished = report.vanished,
            "Group command applied"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::{MockAdvancedGroupRepo, MockNpcRepo};
    use chrono::{TimeZone, Utc};
    use gangnpc_domain::{
        ActorId, CombatStats, Faction, FactionCatalog, GroupMember, GroupName, MemberRole,
        MemberSelector, Npc, NpcLoadout, NpcState, SpawnGroupId, Vec3,
    };

    fn now() -> chrono::DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn actor(id: &str) -> ActorId {
        ActorId::new(id).unwrap()
    }

    fn member(spawn_group: SpawnGroupId, owner: &str) -> Npc {
        let catalog = FactionCatalog::builtin();
        let loadout = NpcLoadout::resolve(&catalog, Faction::Ballas, None, None).unwrap();
        Npc::new(loadout, CombatStats::default(), Vec3::new(0.0, 0.0, 0.0), now())
            .with_spawn_group(spawn_group)
            .with_owners(vec![actor(owner)])
    }

    fn request(key: Uuid, command: &str, actor_id: &str) -> GroupCommandRequest {
        GroupCommandRequest {
            group_id: key.to_string(),
            command: command.to_string(),
            actor_id: actor_id.to_string(),
        }
    }

    fn use_case(npcs: MockNpcRepo, groups: MockAdvancedGroupRepo) -> CommandGroup {
        CommandGroup::new(Arc::new(npcs), Arc::new(groups), Arc::new(FixedClock(now())))
    }

    #[tokio::test]
    async fn when_some_members_unauthorized_they_are_skipped() {
        let spawn_group = SpawnGroupId::new();
        let members = vec![
            member(spawn_group, "A"),
            member(spawn_group, "B"),
            member(spawn_group, "A"),
        ];

        let mut npcs = MockNpcRepo::new();
        npcs.expect_list_by_group_key()
            .withf(move |key| *key == spawn_group.to_uuid())
            .returning(move |_| Ok(members.clone()));
        npcs.expect_save()
            .withf(|npc| npc.state() == NpcState::Peaceful)
            .times(2)
            .returning(|_| Ok(()));

        let report = use_case(npcs, MockAdvancedGroupRepo::new())
            .execute(request(spawn_group.to_uuid(), "peaceful", "A"))
            .await
            .expect("group command");

        assert_eq!(report.matched, 3);
        assert_eq!(report.authorized, 2);
        assert_eq!(report.unauthorized, 1);
        assert!(report.is_applied());
    }

    #[tokio::test]
    async fn when_verb_is_not_a_group_command_request_is_invalid() {
        let err = use_case(MockNpcRepo::new(), MockAdvancedGroupRepo::new())
            .execute(request(Uuid::new_v4(), "attack", "A"))
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::Domain(e) if e.is_validation()));
    }

    #[tokio::test]
    async fn when_no_npc_carries_key_returns_group_not_found() {
        let mut npcs = MockNpcRepo::new();
        npcs.expect_list_by_group_key().returning(|_| Ok(vec![]));

        let err = use_case(npcs, MockAdvancedGroupRepo::new())
            .execute(request(Uuid::new_v4(), "follow", "A"))
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::GroupNotFound(_)));
    }

    #[tokio::test]
    async fn when_group_id_is_not_a_uuid_returns_group_not_found() {
        let mut npcs = MockNpcRepo::new();
        npcs.expect_list_by_group_key().never();

        let mut req = request(Uuid::new_v4(), "follow", "A");
        req.group_id = "abc".to_string();
        let err = use_case(npcs, MockAdvancedGroupRepo::new())
            .execute(req)
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::GroupNotFound(raw) if raw == "abc"));
    }

    #[tokio::test]
    async fn when_member_deleted_mid_batch_it_is_counted_as_vanished() {
        let spawn_group = SpawnGroupId::new();
        let members = vec![member(spawn_group, "A"), member(spawn_group, "A")];
        let gone = members[1].id();

        let mut npcs = MockNpcRepo::new();
        npcs.expect_list_by_group_key().returning(move |_| Ok(members.clone()));
        npcs.expect_save().times(2).returning(move |npc| {
            if npc.id() == gone {
                Err(RepoError::not_found("Npc", gone.to_string()))
            } else {
                Ok(())
            }
        });

        let report = use_case(npcs, MockAdvancedGroupRepo::new())
            .execute(request(spawn_group.to_uuid(), "stay", "A"))
            .await
            .expect("group command");

        assert_eq!(report.matched, 2);
        assert_eq!(report.authorized, 1);
        assert_eq!(report.unauthorized, 0);
        assert_eq!(report.vanished, 1);
        assert_eq!(
            report.matched,
            report.authorized + report.unauthorized + report.vanished
        );
    }

    #[tokio::test]
    async fn when_verb_unknown_members_are_counted_but_untouched() {
        let spawn_group = SpawnGroupId::new();
        let members = vec![member(spawn_group, "A")];

        let mut npcs = MockNpcRepo::new();
        npcs.expect_list_by_group_key().returning(move |_| Ok(members.clone()));
        npcs.expect_save().never();

        let report = use_case(npcs, MockAdvancedGroupRepo::new())
            .execute(request(spawn_group.to_uuid(), "moonwalk", "A"))
            .await
            .expect("group command");

        assert_eq!(report.matched, 1);
        assert_eq!(report.authorized, 0);
        assert!(!report.is_applied());
    }

    #[tokio::test]
    async fn when_members_share_advanced_group_it_is_loaded_once() {
        let group = AdvancedGroup::new(
            GroupName::new("Eastside").unwrap(),
            Faction::Ballas,
            actor("A"),
            now(),
        )
        .with_members(vec![GroupMember::new(MemberSelector::All, MemberRole::Friendly)]);
        let group_id = group.id();

        let spawn_group = SpawnGroupId::new();
        let members: Vec<Npc> = (0..3)
            .map(|_| member(spawn_group, "A").with_advanced_group(group_id))
            .collect();

        let mut groups = MockAdvancedGroupRepo::new();
        groups
            .expect_get()
            .times(1)
            .returning(move |_| Ok(Some(group.clone())));
        let mut npcs = MockNpcRepo::new();
        npcs.expect_list_by_group_key().returning(move |_| Ok(members.clone()));
        npcs.expect_save().times(3).returning(|_| Ok(()));

        let report = use_case(npcs, groups)
            .execute(request(group_id.to_uuid(), "combat", "anyone"))
            .await
            .expect("group command");
        assert_eq!(report.authorized, 3);
    }
}
