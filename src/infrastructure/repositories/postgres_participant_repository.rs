use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::participant::{Email, Participant, Role, Semester};
use crate::domain::repositories::ParticipantRepository;

/// PostgreSQL implementation of ParticipantRepository
pub struct PostgresParticipantRepository {
    pool: PgPool,
}

impl PostgresParticipantRepository {
    /// Creates a new PostgresParticipantRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_row(row: &PgRow) -> Result<Participant, String> {
    let id: Uuid = row
        .try_get("id")
        .map_err(|e| format!("Failed to read participant row: {}", e))?;
    let name: String = row
        .try_get("name")
        .map_err(|e| format!("Failed to read participant row: {}", e))?;
    let email: String = row
        .try_get("email")
        .map_err(|e| format!("Failed to read participant row: {}", e))?;
    let semester: String = row
        .try_get("semester")
        .map_err(|e| format!("Failed to read participant row: {}", e))?;
    let role: String = row
        .try_get("role")
        .map_err(|e| format!("Failed to read participant row: {}", e))?;

    Ok(Participant {
        id,
        name,
        email: Email::new(email).map_err(|e| format!("Invalid email from database: {}", e))?,
        semester: Semester::from_str(&semester)
            .map_err(|e| format!("Invalid semester from database: {}", e))?,
        role: Role::from_str(&role).map_err(|e| format!("Invalid role from database: {}", e))?,
    })
}

#[async_trait]
impl ParticipantRepository for PostgresParticipantRepository {
    async fn create(&self, participant: Participant) -> Result<Uuid, String> {
        sqlx::query(
            r#"
            INSERT INTO participants (id, name, email, semester, role)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(participant.id)
        .bind(&participant.name)
        .bind(participant.email.as_str())
        .bind(participant.semester.as_str())
        .bind(participant.role.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| format!("Failed to create participant: {}", e))?;

        Ok(participant.id)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Participant>, String> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, semester, role
            FROM participants
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| format!("Failed to find participant by id: {}", e))?;

        row.as_ref().map(map_row).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Participant>, String> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, semester, role
            FROM participants
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| format!("Failed to find participant by email: {}", e))?;

        row.as_ref().map(map_row).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Participant>, String> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, email, semester, role
            FROM participants
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| format!("Failed to load roster: {}", e))?;

        rows.iter().map(map_row).collect()
    }

    async fn update(&self, participant: &Participant) -> Result<(), String> {
        let result = sqlx::query(
            r#"
            UPDATE participants
            SET name = $2, email = $3, semester = $4, role = $5
            WHERE id = $1
            "#,
        )
        .bind(participant.id)
        .bind(&participant.name)
        .bind(participant.email.as_str())
        .bind(participant.semester.as_str())
        .bind(participant.role.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| format!("Failed to update participant: {}", e))?;

        if result.rows_affected() == 0 {
            return Err(format!("Participant not found: {}", participant.id));
        }

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), String> {
        let result = sqlx::query(
            r#"
            DELETE FROM participants WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| format!("Failed to delete participant: {}", e))?;

        if result.rows_affected() == 0 {
            return Err(format!("Participant not found: {}", id));
        }

        Ok(())
    }
}
