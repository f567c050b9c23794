// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod postgres_participant_repository;
pub mod postgres_team_repository;

pub use postgres_participant_repository::PostgresParticipantRepository;
pub use postgres_team_repository::PostgresTeamRepository;
