use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::domain::participant::Participant;
use crate::domain::repositories::{ParticipantRepository, TeamRecord, TeamRepository};
use crate::domain::team::{partition_teams, JudgingScore, Team};
use crate::infrastructure::repositories::{PostgresParticipantRepository, PostgresTeamRepository};

/// One team in a save request, as produced by the shuffle step
#[derive(Debug, Deserialize)]
pub struct SaveTeamPayload {
    pub id: u32,
    #[serde(default)]
    pub name: Option<String>,
    pub members: Vec<Participant>,
}

/// Request body for persisting a completed partition
#[derive(Debug, Deserialize)]
pub struct SaveTeamsRequest {
    pub teams: Vec<SaveTeamPayload>,
}

/// Request body for editing a saved team
#[derive(Debug, Deserialize)]
pub struct UpdateTeamRequest {
    pub number: i32,
    #[serde(default)]
    pub name: Option<String>,
    pub members: Vec<Participant>,
}

/// Request body for setting a team's judging score
#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub presentation: u8,
    pub uiux: u8,
    pub creativity: u8,
    pub qna: u8,
    pub teamwork: u8,
}

/// Saved team as returned by the API
#[derive(Debug, Serialize)]
pub struct TeamResponse {
    pub id: Uuid,
    pub number: i32,
    pub name: Option<String>,
    pub members: Vec<Participant>,
    pub score: Option<JudgingScore>,
    pub total_score: Option<u8>,
    pub created_at: DateTime<Utc>,
}

impl From<&TeamRecord> for TeamResponse {
    fn from(team: &TeamRecord) -> Self {
        Self {
            id: team.id,
            number: team.number,
            name: team.name.clone(),
            members: team.members.clone(),
            score: team.score,
            total_score: team.score.map(|s| s.total()),
            created_at: team.created_at,
        }
    }
}

/// One row of the leaderboard
#[derive(Debug, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub id: Uuid,
    pub number: i32,
    pub name: Option<String>,
    pub score: Option<JudgingScore>,
    pub total_score: Option<u8>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Shuffle the full roster into balanced teams without persisting them
///
/// POST /api/v1/teams/shuffle
pub async fn shuffle_teams(State(pool): State<PgPool>) -> Result<Json<Vec<Team>>, ApiError> {
    let repo = PostgresParticipantRepository::new(pool);
    let participants = repo
        .find_all()
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?;

    let mut rng = rand::rng();
    let teams = partition_teams(participants, &mut rng);

    Ok(Json(teams))
}

/// Persist a completed partition
///
/// POST /api/v1/teams/save
pub async fn save_teams(
    State(pool): State<PgPool>,
    Json(req): Json<SaveTeamsRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    if req.teams.is_empty() {
        return Err(ApiError::bad_request("No teams data provided"));
    }

    let now = Utc::now();
    let records: Vec<TeamRecord> = req
        .teams
        .into_iter()
        .map(|team| TeamRecord {
            id: Uuid::new_v4(),
            number: team.id as i32,
            name: team.name,
            members: team.members,
            score: None,
            created_at: now,
        })
        .collect();

    let repo = PostgresTeamRepository::new(pool);
    repo.save_all(&records)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Failed to save teams: {}", e)))?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Teams saved successfully".to_string(),
        }),
    ))
}

/// List all saved teams
///
/// GET /api/v1/teams
pub async fn list_teams(State(pool): State<PgPool>) -> Result<Json<Vec<TeamResponse>>, ApiError> {
    let repo = PostgresTeamRepository::new(pool);
    let teams = repo
        .find_all()
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?;

    let responses = teams.iter().map(TeamResponse::from).collect();

    Ok(Json(responses))
}

/// Teams ranked by total judging score, unscored teams last
///
/// GET /api/v1/teams/leaderboard
pub async fn leaderboard(
    State(pool): State<PgPool>,
) -> Result<Json<Vec<LeaderboardEntry>>, ApiError> {
    let repo = PostgresTeamRepository::new(pool);
    let mut teams = repo
        .find_all()
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?;

    teams.sort_by(|a, b| {
        let total_a = a.score.map(|s| s.total());
        let total_b = b.score.map(|s| s.total());
        total_b.cmp(&total_a).then(a.number.cmp(&b.number))
    });

    let entries = teams
        .iter()
        .enumerate()
        .map(|(i, team)| LeaderboardEntry {
            rank: i + 1,
            id: team.id,
            number: team.number,
            name: team.name.clone(),
            score: team.score,
            total_score: team.score.map(|s| s.total()),
        })
        .collect();

    Ok(Json(entries))
}

/// Edit a saved team
///
/// PUT /api/v1/teams/:id
pub async fn update_team(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTeamRequest>,
) -> Result<Json<TeamResponse>, ApiError> {
    if req.members.is_empty() {
        return Err(ApiError::bad_request("Members are required"));
    }

    let repo = PostgresTeamRepository::new(pool);
    let existing = repo
        .find_by_id(id)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?
        .ok_or_else(|| ApiError::not_found(format!("Team not found: {}", id)))?;

    let updated = TeamRecord {
        id,
        number: req.number,
        name: req.name,
        members: req.members,
        score: existing.score,
        created_at: existing.created_at,
    };

    repo.update(&updated).await.map_err(|e| {
        if e.contains("not found") {
            ApiError::not_found(e)
        } else {
            ApiError::internal_server_error(format!("Failed to update team: {}", e))
        }
    })?;

    Ok(Json(TeamResponse::from(&updated)))
}

/// Set a team's judging score
///
/// PUT /api/v1/teams/:id/score
pub async fn update_score(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
    Json(req): Json<ScoreRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let score = JudgingScore::new(
        req.presentation,
        req.uiux,
        req.creativity,
        req.qna,
        req.teamwork,
    )
    .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let repo = PostgresTeamRepository::new(pool);
    repo.update_score(id, &score).await.map_err(|e| {
        if e.contains("not found") {
            ApiError::not_found(e)
        } else {
            ApiError::internal_server_error(format!("Failed to update score: {}", e))
        }
    })?;

    Ok(Json(MessageResponse {
        message: "Score updated successfully".to_string(),
    }))
}

/// Delete a team
///
/// DELETE /api/v1/teams/:id
pub async fn delete_team(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = PostgresTeamRepository::new(pool);
    repo.delete(id).await.map_err(|e| {
        if e.contains("not found") {
            ApiError::not_found(e)
        } else {
            ApiError::internal_server_error(format!("Failed to delete team: {}", e))
        }
    })?;

    Ok(StatusCode::NO_CONTENT)
}
