use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::participant::Participant;
use crate::domain::team::JudgingScore;

/// Persisted form of a team
///
/// `number` carries the sequential id the partitioner assigned; `id` is
/// the row identity. Members are stored embedded, as a document.
#[derive(Debug, Clone)]
pub struct TeamRecord {
    pub id: Uuid,
    pub number: i32,
    pub name: Option<String>,
    pub members: Vec<Participant>,
    pub score: Option<JudgingScore>,
    pub created_at: DateTime<Utc>,
}

/// Repository trait for saved teams
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Persist a completed partition atomically: all teams are written
    /// together, or none are.
    async fn save_all(&self, teams: &[TeamRecord]) -> Result<(), String>;

    /// Load all saved teams
    async fn find_all(&self) -> Result<Vec<TeamRecord>, String>;

    /// Find a team by its row ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<TeamRecord>, String>;

    /// Update a team's number, name, and members
    async fn update(&self, team: &TeamRecord) -> Result<(), String>;

    /// Set a team's judging score
    async fn update_score(&self, id: Uuid, score: &JudgingScore) -> Result<(), String>;

    /// Delete a team by ID
    async fn delete(&self, id: Uuid) -> Result<(), String>;
}
