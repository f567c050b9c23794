use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::participant::Participant;
use crate::domain::repositories::{TeamRecord, TeamRepository};
use crate::domain::team::JudgingScore;

/// PostgreSQL implementation of TeamRepository
///
/// Team members are stored embedded in the row as a JSONB document array,
/// so a team reads and writes as one unit.
pub struct PostgresTeamRepository {
    pool: PgPool,
}

impl PostgresTeamRepository {
    /// Creates a new PostgresTeamRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_row(row: &PgRow) -> Result<TeamRecord, String> {
    let id: Uuid = row
        .try_get("id")
        .map_err(|e| format!("Failed to read team row: {}", e))?;
    let number: i32 = row
        .try_get("number")
        .map_err(|e| format!("Failed to read team row: {}", e))?;
    let name: Option<String> = row
        .try_get("name")
        .map_err(|e| format!("Failed to read team row: {}", e))?;
    let members: Json<Vec<Participant>> = row
        .try_get("members")
        .map_err(|e| format!("Invalid members document: {}", e))?;
    let score: Option<Json<JudgingScore>> = row
        .try_get("score")
        .map_err(|e| format!("Invalid score document: {}", e))?;
    let created_at: DateTime<Utc> = row
        .try_get("created_at")
        .map_err(|e| format!("Failed to read team row: {}", e))?;

    Ok(TeamRecord {
        id,
        number,
        name,
        members: members.0,
        score: score.map(|s| s.0),
        created_at,
    })
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn save_all(&self, teams: &[TeamRecord]) -> Result<(), String> {
        // One transaction for the whole partition: a failed insert rolls
        // everything back.
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| format!("Failed to begin transaction: {}", e))?;

        for team in teams {
            sqlx::query(
                r#"
                INSERT INTO teams (id, number, name, members, score, created_at)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(team.id)
            .bind(team.number)
            .bind(&team.name)
            .bind(Json(&team.members))
            .bind(team.score.as_ref().map(Json))
            .bind(team.created_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| format!("Failed to save team {}: {}", team.number, e))?;
        }

        tx.commit()
            .await
            .map_err(|e| format!("Failed to commit teams: {}", e))?;

        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<TeamRecord>, String> {
        let rows = sqlx::query(
            r#"
            SELECT id, number, name, members, score, created_at
            FROM teams
            ORDER BY number
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| format!("Failed to load teams: {}", e))?;

        rows.iter().map(map_row).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TeamRecord>, String> {
        let row = sqlx::query(
            r#"
            SELECT id, number, name, members, score, created_at
            FROM teams
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| format!("Failed to find team by id: {}", e))?;

        row.as_ref().map(map_row).transpose()
    }

    async fn update(&self, team: &TeamRecord) -> Result<(), String> {
        let result = sqlx::query(
            r#"
            UPDATE teams
            SET number = $2, name = $3, members = $4
            WHERE id = $1
            "#,
        )
        .bind(team.id)
        .bind(team.number)
        .bind(&team.name)
        .bind(Json(&team.members))
        .execute(&self.pool)
        .await
        .map_err(|e| format!("Failed to update team: {}", e))?;

        if result.rows_affected() == 0 {
            return Err(format!("Team not found: {}", team.id));
        }

        Ok(())
    }

    async fn update_score(&self, id: Uuid, score: &JudgingScore) -> Result<(), String> {
        let result = sqlx::query(
            r#"
            UPDATE teams
            SET score = $2
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(Json(score))
        .execute(&self.pool)
        .await
        .map_err(|e| format!("Failed to update score: {}", e))?;

        if result.rows_affected() == 0 {
            return Err(format!("Team not found: {}", id));
        }

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), String> {
        let result = sqlx::query(
            r#"
            DELETE FROM teams WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| format!("Failed to delete team: {}", e))?;

        if result.rows_affected() == 0 {
            return Err(format!("Team not found: {}", id));
        }

        Ok(())
    }
}
