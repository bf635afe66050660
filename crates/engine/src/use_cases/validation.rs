//! Conversions from raw request values into validated domain values.
//!
//! Everything here fails with `DomainError::Validation`, so a bad field in
//! any request maps to the same client error.

use gangnpc_domain::{
    ActorId, DomainError, GroupMember, MemberSelector, PatrolArea, Vec3,
};
use gangnpc_shared::{GroupMemberData, PatrolAreaData, PositionData, MAX_SPAWN_QUANTITY};

/// Validate a spawn quantity (1..=20).
pub fn require_quantity(quantity: i64) -> Result<usize, DomainError> {
    if !(1..=MAX_SPAWN_QUANTITY).contains(&quantity) {
        return Err(DomainError::validation(format!(
            "Quantity must be between 1 and {} (got {})",
            MAX_SPAWN_QUANTITY, quantity
        )));
    }
    usize::try_from(quantity).map_err(|e| DomainError::validation(e.to_string()))
}

/// Validate a wire position (finite coordinates).
pub fn position(data: PositionData, field_name: &str) -> Result<Vec3, DomainError> {
    if !(data.x.is_finite() && data.y.is_finite() && data.z.is_finite()) {
        return Err(DomainError::validation(format!(
            "{} must have finite coordinates",
            field_name
        )));
    }
    Ok(Vec3::new(data.x, data.y, data.z))
}

/// Pick the spawn center: pasted vector text wins when it yields a non-zero
/// vector, otherwise the structured position is used.
pub fn spawn_center(
    structured: Option<PositionData>,
    vec3_input: Option<&str>,
) -> Result<Vec3, DomainError> {
    if let Some(raw) = vec3_input.filter(|s| !s.trim().is_empty()) {
        let parsed = Vec3::parse_lenient(raw);
        if !parsed.is_zero() {
            return Ok(parsed);
        }
        tracing::debug!(input = %raw, "vec3_input did not parse, falling back to position");
    }

    match structured {
        Some(data) => position(data, "position"),
        None => Err(DomainError::validation(
            "A position or a parsable vec3_input is required",
        )),
    }
}

pub fn heading(value: f64) -> Result<f64, DomainError> {
    if !value.is_finite() {
        return Err(DomainError::validation("Heading must be a finite number"));
    }
    Ok(value)
}

pub fn actor(raw: &str, field_name: &str) -> Result<ActorId, DomainError> {
    ActorId::new(raw).map_err(|_| DomainError::validation(format!("{} is required", field_name)))
}

/// Comma-separated actor ids. `None` stays `None` so updates can tell
/// "omitted" from "cleared".
pub fn actor_list(raw: Option<&str>) -> Option<Vec<ActorId>> {
    raw.map(ActorId::parse_list)
}

pub fn token_list(raw: Option<&str>) -> Option<Vec<String>> {
    raw.map(gangnpc_domain::parse_token_list)
}

pub fn patrol_area(data: PatrolAreaData) -> Result<PatrolArea, DomainError> {
    PatrolArea::new(position(data.center, "patrol_area.center")?, data.radius)
}

pub fn members(data: Vec<GroupMemberData>) -> Result<Vec<GroupMember>, DomainError> {
    data.into_iter()
        .map(|m| {
            let selector = MemberSelector::parse(&m.kind, m.value.as_deref())
                .map_err(|e| DomainError::validation(e.to_string()))?;
            Ok(GroupMember::new(selector, m.role))
        })
        .collect()
}
