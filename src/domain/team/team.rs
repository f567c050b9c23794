use serde::Serialize;

use crate::domain::participant::{Participant, Semester};

/// Hard cap on team size. A topped-up team never exceeds this; overflow
/// participants open a new team instead.
pub const TEAM_CAPACITY: usize = 4;

/// A team produced by the partitioner
///
/// # Invariants
/// - Ids are sequential from 1 in creation order
/// - Member order is assignment order
/// - Never holds more than [`TEAM_CAPACITY`] members (enforced by the
///   partitioner's distribution rules)
#[derive(Debug, Clone, Serialize)]
pub struct Team {
    id: u32,
    members: Vec<Participant>,
}

impl Team {
    /// Creates an empty team with the given sequential id
    pub fn new(id: u32) -> Self {
        Self {
            id,
            members: Vec::new(),
        }
    }

    /// Creates a team from an existing member list
    pub fn with_members(id: u32, members: Vec<Participant>) -> Self {
        Self { id, members }
    }

    /// Returns the team's sequential id
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Returns the members in assignment order
    pub fn members(&self) -> &[Participant] {
        &self.members
    }

    /// Returns the current member count
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Whether the team has reached [`TEAM_CAPACITY`]
    pub fn is_at_capacity(&self) -> bool {
        self.members.len() >= TEAM_CAPACITY
    }

    /// Appends a member
    pub fn add_member(&mut self, participant: Participant) {
        self.members.push(participant);
    }

    /// Counts members belonging to the given cohort
    pub fn cohort_count(&self, semester: Semester) -> usize {
        self.members
            .iter()
            .filter(|member| member.semester == semester)
            .count()
    }
}
