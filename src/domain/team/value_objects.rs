use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, DomainResult};

/// Maximum points a judge can award per criterion.
pub const MAX_CRITERION_SCORE: u8 = 5;

/// Judging scores for a team, one value per judging-sheet criterion
///
/// # Invariants
/// - Each criterion is between 0 and [`MAX_CRITERION_SCORE`] inclusive
/// - Validated at construction; out-of-range values are rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgingScore {
    presentation: u8,
    uiux: u8,
    creativity: u8,
    qna: u8,
    teamwork: u8,
}

impl JudgingScore {
    /// Creates a validated score sheet
    ///
    /// # Returns
    /// * `Ok(JudgingScore)` - If every criterion is within range
    /// * `Err(DomainError::ScoreOutOfRange)` - Naming the first offending criterion
    pub fn new(
        presentation: u8,
        uiux: u8,
        creativity: u8,
        qna: u8,
        teamwork: u8,
    ) -> DomainResult<Self> {
        let criteria = [
            ("presentation", presentation),
            ("uiux", uiux),
            ("creativity", creativity),
            ("qna", qna),
            ("teamwork", teamwork),
        ];

        for (criterion, value) in criteria {
            if value > MAX_CRITERION_SCORE {
                return Err(DomainError::ScoreOutOfRange { criterion, value });
            }
        }

        Ok(Self {
            presentation,
            uiux,
            creativity,
            qna,
            teamwork,
        })
    }

    /// Sum of all criteria (at most 25)
    pub fn total(&self) -> u8 {
        self.presentation + self.uiux + self.creativity + self.qna + self.teamwork
    }

    pub fn presentation(&self) -> u8 {
        self.presentation
    }

    pub fn uiux(&self) -> u8 {
        self.uiux
    }

    pub fn creativity(&self) -> u8 {
        self.creativity
    }

    pub fn qna(&self) -> u8 {
        self.qna
    }

    pub fn teamwork(&self) -> u8 {
        self.teamwork
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_scores_accepted() {
        let score = JudgingScore::new(5, 4, 3, 2, 1).expect("valid score");
        assert_eq!(score.total(), 15);
    }

    #[test]
    fn zero_scores_are_valid() {
        let score = JudgingScore::new(0, 0, 0, 0, 0).expect("valid score");
        assert_eq!(score.total(), 0);
    }

    #[test]
    fn full_marks_total_twenty_five() {
        let score = JudgingScore::new(5, 5, 5, 5, 5).expect("valid score");
        assert_eq!(score.total(), 25);
    }

    #[test]
    fn over_max_criterion_rejected() {
        let err = JudgingScore::new(3, 6, 2, 1, 0).unwrap_err();
        assert_eq!(
            err,
            DomainError::ScoreOutOfRange {
                criterion: "uiux",
                value: 6
            }
        );
    }
}
