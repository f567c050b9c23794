use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::{Email, Role, Semester};

/// A registered hackathon participant
///
/// Plain record created at registration time. The partitioner treats
/// participants as immutable input; it never mutates these fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: Uuid,
    pub name: String,
    pub email: Email,
    pub semester: Semester,
    #[serde(default)]
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_without_role() {
        let json = r#"{
            "id": "4b4b1c2e-6a1e-4a6e-9f6a-3c1d2e3f4a5b",
            "name": "Asha",
            "email": "asha@example.com",
            "semester": "First"
        }"#;

        let participant: Participant = serde_json::from_str(json).expect("valid participant");
        assert_eq!(participant.role, Role::User);
        assert_eq!(participant.semester, Semester::First);
    }

    #[test]
    fn rejects_unknown_semester() {
        let json = r#"{
            "id": "4b4b1c2e-6a1e-4a6e-9f6a-3c1d2e3f4a5b",
            "name": "Asha",
            "email": "asha@example.com",
            "semester": "Fifth"
        }"#;

        assert!(serde_json::from_str::<Participant>(json).is_err());
    }
}
