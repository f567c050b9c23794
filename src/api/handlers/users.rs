use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::str::FromStr;
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::domain::participant::{Email, Participant, Role, Semester};
use crate::domain::repositories::ParticipantRepository;
use crate::infrastructure::repositories::PostgresParticipantRepository;

/// Request body for participant registration
#[derive(Debug, Deserialize)]
pub struct RegisterParticipantRequest {
    pub name: String,
    pub email: String,
    pub semester: String,
}

/// Request body for editing a participant
#[derive(Debug, Deserialize)]
pub struct UpdateParticipantRequest {
    pub name: String,
    pub email: String,
    pub semester: String,
}

/// Participant as returned by the API
#[derive(Debug, Serialize)]
pub struct ParticipantResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub semester: String,
    pub role: String,
}

impl From<&Participant> for ParticipantResponse {
    fn from(participant: &Participant) -> Self {
        Self {
            id: participant.id,
            name: participant.name.clone(),
            email: participant.email.to_string(),
            semester: participant.semester.to_string(),
            role: participant.role.to_string(),
        }
    }
}

/// Roster overview counts
#[derive(Debug, Serialize)]
pub struct RosterStatsResponse {
    pub total_participants: usize,
    pub first_semester: usize,
    pub third_semester: usize,
}

fn validate_fields(
    name: &str,
    email: &str,
    semester: &str,
) -> Result<(String, Email, Semester), ApiError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::bad_request("Name is required"));
    }

    let email = Email::new(email).map_err(|e| ApiError::bad_request(e.to_string()))?;
    let semester = Semester::from_str(semester).map_err(|e| ApiError::bad_request(e.to_string()))?;

    Ok((name.to_string(), email, semester))
}

/// Register a new participant
///
/// POST /api/v1/users/register
pub async fn register(
    State(pool): State<PgPool>,
    Json(req): Json<RegisterParticipantRequest>,
) -> Result<(StatusCode, Json<ParticipantResponse>), ApiError> {
    let (name, email, semester) = validate_fields(&req.name, &req.email, &req.semester)?;

    let participant = Participant {
        id: Uuid::new_v4(),
        name,
        email,
        semester,
        role: Role::User,
    };

    let repo = PostgresParticipantRepository::new(pool);
    repo.create(participant.clone()).await.map_err(|e| {
        if e.contains("duplicate") || e.contains("unique") {
            ApiError::conflict("A participant with this email is already registered")
        } else {
            ApiError::internal_server_error(format!("Failed to register participant: {}", e))
        }
    })?;

    Ok((
        StatusCode::CREATED,
        Json(ParticipantResponse::from(&participant)),
    ))
}

/// List the full roster
///
/// GET /api/v1/users
pub async fn list_participants(
    State(pool): State<PgPool>,
) -> Result<Json<Vec<ParticipantResponse>>, ApiError> {
    let repo = PostgresParticipantRepository::new(pool);
    let participants = repo
        .find_all()
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?;

    let responses = participants.iter().map(ParticipantResponse::from).collect();

    Ok(Json(responses))
}

/// Roster overview counts by cohort
///
/// GET /api/v1/users/stats
pub async fn roster_stats(
    State(pool): State<PgPool>,
) -> Result<Json<RosterStatsResponse>, ApiError> {
    let repo = PostgresParticipantRepository::new(pool);
    let participants = repo
        .find_all()
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?;

    let first_semester = participants
        .iter()
        .filter(|p| p.semester == Semester::First)
        .count();
    let third_semester = participants.len() - first_semester;

    Ok(Json(RosterStatsResponse {
        total_participants: participants.len(),
        first_semester,
        third_semester,
    }))
}

/// Edit a participant
///
/// PUT /api/v1/users/:id
pub async fn update_participant(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateParticipantRequest>,
) -> Result<Json<ParticipantResponse>, ApiError> {
    let (name, email, semester) = validate_fields(&req.name, &req.email, &req.semester)?;

    let repo = PostgresParticipantRepository::new(pool);
    let existing = repo
        .find_by_id(id)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?
        .ok_or_else(|| ApiError::not_found(format!("Participant not found: {}", id)))?;

    let updated = Participant {
        id,
        name,
        email,
        semester,
        role: existing.role,
    };

    repo.update(&updated).await.map_err(|e| {
        if e.contains("not found") {
            ApiError::not_found(e)
        } else {
            ApiError::internal_server_error(format!("Failed to update participant: {}", e))
        }
    })?;

    Ok(Json(ParticipantResponse::from(&updated)))
}

/// Delete a participant
///
/// DELETE /api/v1/users/:id
pub async fn delete_participant(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = PostgresParticipantRepository::new(pool);
    repo.delete(id).await.map_err(|e| {
        if e.contains("not found") {
            ApiError::not_found(e)
        } else {
            ApiError::internal_server_error(format!("Failed to delete participant: {}", e))
        }
    })?;

    Ok(StatusCode::NO_CONTENT)
}

/// Health check endpoint
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}
