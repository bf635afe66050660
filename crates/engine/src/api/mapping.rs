//! Domain -> wire conversions for HTTP responses.

use chrono::{DateTime, Utc};
use gangnpc_domain::{
    AdvancedGroup, CommandOutcome, FactionProfile, GroupMember, Npc, NpcTarget, PatrolArea, Vec3,
};
use gangnpc_shared::{
    AdvancedGroupResponse, CommandStatus, ControllableGroupData, ControllableNpcData,
    FactionProfileData, GroupCommandResponse, GroupMemberData, NpcCommandResponse, NpcResponse,
    PatrolAreaData, PositionData, SpawnGroupData, StatsResponse, TargetData,
};

use crate::infrastructure::ports::SpawnGroupSummary;
use crate::use_cases::command::{
    ControllableGroup, ControllableNpc, GroupCommandReport, NpcCommandReport,
};
use crate::use_cases::stats::StatsReport;

fn rfc3339(at: DateTime<Utc>) -> String {
    at.to_rfc3339()
}

fn position(v: Vec3) -> PositionData {
    PositionData {
        x: v.x,
        y: v.y,
        z: v.z,
    }
}

fn target(target: &NpcTarget) -> TargetData {
    match target {
        NpcTarget::Actor(actor) => TargetData::Actor {
            actor_id: actor.to_string(),
        },
        NpcTarget::Position(p) => TargetData::Position {
            x: p.x,
            y: p.y,
            z: p.z,
        },
    }
}

pub fn npc(npc: &Npc) -> NpcResponse {
    let stats = npc.stats();
    NpcResponse {
        id: npc.id().to_uuid(),
        faction: npc.faction(),
        model: npc.model().to_string(),
        weapon: npc.weapon().to_string(),
        position: position(npc.position()),
        heading: npc.heading(),
        state: npc.state(),
        health: stats.health.value(),
        armor: stats.armor.value(),
        accuracy: stats.accuracy.value(),
        spawn_group_id: npc.spawn_group_id().map(|id| id.to_uuid()),
        advanced_group_id: npc.advanced_group_id().map(|id| id.to_uuid()),
        owner_ids: npc.owner_ids().iter().map(ToString::to_string).collect(),
        friendly_actor_ids: npc
            .friendly_actor_ids()
            .iter()
            .map(ToString::to_string)
            .collect(),
        friendly_jobs: npc.friendly_jobs().to_vec(),
        patrol_route: npc.patrol_route().iter().copied().map(position).collect(),
        guard_position: npc.guard_position().map(position),
        target: npc.target().map(target),
        last_command: npc.last_command().map(str::to_string),
        last_command_by: npc.last_command_by().map(ToString::to_string),
        created_at: rfc3339(npc.created_at()),
        updated_at: rfc3339(npc.updated_at()),
    }
}

pub fn npcs(npcs: &[Npc]) -> Vec<NpcResponse> {
    npcs.iter().map(npc).collect()
}

fn member(member: &GroupMember) -> GroupMemberData {
    GroupMemberData {
        kind: member.selector.kind().as_str().to_string(),
        value: member.selector.value(),
        role: member.role,
    }
}

fn patrol_area(area: &PatrolArea) -> PatrolAreaData {
    PatrolAreaData {
        center: position(area.center()),
        radius: area.radius(),
    }
}

pub fn advanced_group(group: &AdvancedGroup) -> AdvancedGroupResponse {
    AdvancedGroupResponse {
        id: group.id().to_uuid(),
        name: group.name().to_string(),
        description: group.description().as_str().to_string(),
        faction: group.faction(),
        created_by: group.created_by().to_string(),
        auto_defend: group.auto_defend(),
        auto_attack_enemies: group.auto_attack_enemies(),
        patrol_area: group.patrol_area().map(patrol_area),
        members: group.members().iter().map(member).collect(),
        created_at: rfc3339(group.created_at()),
        updated_at: rfc3339(group.updated_at()),
    }
}

pub fn faction_profile(profile: &FactionProfile) -> FactionProfileData {
    FactionProfileData {
        name: profile.name.clone(),
        color: profile.color.clone(),
        models: profile.models.clone(),
        weapons: profile.weapons.clone(),
    }
}

pub fn npc_command(report: &NpcCommandReport) -> NpcCommandResponse {
    let npc_id = report.npc.id().to_uuid();
    match &report.outcome {
        CommandOutcome::Applied { previous, current } => NpcCommandResponse {
            npc_id,
            command: report.npc.last_command().unwrap_or_default().to_string(),
            status: CommandStatus::Applied,
            previous_state: *previous,
            state: *current,
            message: format!("NPC is now {}", current),
        },
        CommandOutcome::Ignored { verb } => NpcCommandResponse {
            npc_id,
            command: verb.clone(),
            status: CommandStatus::Ignored,
            previous_state: report.npc.state(),
            state: report.npc.state(),
            message: format!("Unknown command {} ignored", verb),
        },
    }
}

pub fn group_command(report: &GroupCommandReport) -> GroupCommandResponse {
    let (status, message) = if report.is_applied() {
        (
            CommandStatus::Applied,
            format!(
                "Command {} applied to {} of {} NPCs",
                report.verb, report.authorized, report.matched
            ),
        )
    } else {
        (
            CommandStatus::Ignored,
            format!("Unknown command {} ignored", report.verb),
        )
    };

    GroupCommandResponse {
        group_id: report.group_key,
        command: report.verb.to_string(),
        status,
        matched: report.matched,
        authorized: report.authorized,
        unauthorized: report.unauthorized,
        vanished: report.vanished,
        message,
    }
}

pub fn spawn_group(summary: &SpawnGroupSummary) -> SpawnGroupData {
    SpawnGroupData {
        group_id: summary.id.to_uuid(),
        faction: summary.faction,
        member_count: summary.member_count,
        created_at: rfc3339(summary.created_at),
    }
}

pub fn stats(report: StatsReport) -> StatsResponse {
    StatsResponse {
        total_npcs: report.total_npcs,
        spawn_groups: report.spawn_groups,
        advanced_groups: report.advanced_groups,
        faction_distribution: report
            .faction_distribution
            .into_iter()
            .map(|entry| (entry.faction.as_str().to_string(), entry.count))
            .collect(),
    }
}

pub fn controllable_npc(entry: &ControllableNpc) -> ControllableNpcData {
    ControllableNpcData {
        level: entry.level,
        npc: npc(&entry.npc),
    }
}

pub fn controllable_group(entry: &ControllableGroup) -> ControllableGroupData {
    ControllableGroupData {
        role: entry.role,
        level: entry.level,
        group: advanced_group(&entry.group),
    }
}
