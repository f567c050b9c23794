use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::participant::{Email, Participant};

/// Repository trait for participant records
///
/// Defines the contract for persisting and retrieving the roster.
/// Implementations should handle database-specific details.
#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    /// Create a new participant
    async fn create(&self, participant: Participant) -> Result<Uuid, String>;

    /// Find a participant by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Participant>, String>;

    /// Find a participant by email address
    async fn find_by_email(&self, email: &Email) -> Result<Option<Participant>, String>;

    /// Load the full roster
    async fn find_all(&self) -> Result<Vec<Participant>, String>;

    /// Update a participant's details
    async fn update(&self, participant: &Participant) -> Result<(), String>;

    /// Delete a participant by ID
    async fn delete(&self, id: Uuid) -> Result<(), String>;
}
