use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::participant::{Participant, Semester};
use crate::domain::team::team::Team;

/// Members drawn from each cohort when forming a balanced team.
const COHORT_DRAW: usize = 2;

/// Splits a roster into randomized, cohort-balanced teams
///
/// Participants are bucketed by semester and each bucket is uniformly
/// shuffled (Fisher-Yates). While both buckets hold at least two members,
/// a team of four is formed with two members from each cohort. Whatever
/// remains is distributed one participant at a time to the open team with
/// the fewest members (ties broken by lowest team id); once every team is
/// at [`TEAM_CAPACITY`](crate::domain::team::TEAM_CAPACITY), a new team is
/// opened for the overflow. Freshly opened teams are themselves eligible
/// for later leftovers.
///
/// Every input participant lands in exactly one team; none are dropped or
/// duplicated. Empty input yields an empty team list. Team ids are
/// sequential from 1 in creation order.
///
/// The caller supplies the RNG: repeated calls over the same roster may
/// produce different assignments, but the team count for a given cohort
/// split never varies.
pub fn partition_teams<R: Rng + ?Sized>(participants: Vec<Participant>, rng: &mut R) -> Vec<Team> {
    let (mut first, mut third): (Vec<Participant>, Vec<Participant>) = participants
        .into_iter()
        .partition(|p| p.semester == Semester::First);

    first.shuffle(rng);
    third.shuffle(rng);

    let mut teams: Vec<Team> = Vec::new();
    while first.len() >= COHORT_DRAW && third.len() >= COHORT_DRAW {
        let mut team = Team::new(teams.len() as u32 + 1);
        for member in first.split_off(first.len() - COHORT_DRAW) {
            team.add_member(member);
        }
        for member in third.split_off(third.len() - COHORT_DRAW) {
            team.add_member(member);
        }
        teams.push(team);
    }

    // At most 3 participants remain here unless a whole cohort was empty.
    let mut leftovers = first;
    leftovers.append(&mut third);

    while let Some(participant) = leftovers.pop() {
        let open_team = teams
            .iter_mut()
            .filter(|team| !team.is_at_capacity())
            .min_by_key(|team| (team.member_count(), team.id()));

        match open_team {
            Some(team) => team.add_member(participant),
            None => {
                let mut team = Team::new(teams.len() as u32 + 1);
                team.add_member(participant);
                teams.push(team);
            }
        }
    }

    teams
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::participant::{Email, Role};
    use crate::domain::team::team::TEAM_CAPACITY;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::{HashMap, HashSet};
    use uuid::Uuid;

    fn participant(name: &str, semester: Semester) -> Participant {
        Participant {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: Email::new(format!("{}@example.com", name)).expect("valid email"),
            semester,
            role: Role::User,
        }
    }

    fn roster(first: usize, third: usize) -> Vec<Participant> {
        let mut participants = Vec::with_capacity(first + third);
        for i in 0..first {
            participants.push(participant(&format!("first-{}", i), Semester::First));
        }
        for i in 0..third {
            participants.push(participant(&format!("third-{}", i), Semester::Third));
        }
        participants
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn all_member_ids(teams: &[Team]) -> Vec<Uuid> {
        teams
            .iter()
            .flat_map(|team| team.members().iter().map(|m| m.id))
            .collect()
    }

    #[test]
    fn empty_roster_yields_no_teams() {
        let teams = partition_teams(Vec::new(), &mut rng());
        assert!(teams.is_empty());
    }

    #[test]
    fn single_participant_forms_singleton_team() {
        let teams = partition_teams(roster(1, 0), &mut rng());
        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].id(), 1);
        assert_eq!(teams[0].member_count(), 1);
    }

    #[test]
    fn eight_participants_form_two_balanced_teams() {
        let teams = partition_teams(roster(4, 4), &mut rng());

        assert_eq!(teams.len(), 2);
        for team in &teams {
            assert_eq!(team.member_count(), 4);
            assert_eq!(team.cohort_count(Semester::First), 2);
            assert_eq!(team.cohort_count(Semester::Third), 2);
        }
        assert_eq!(teams[0].id(), 1);
        assert_eq!(teams[1].id(), 2);
    }

    #[test]
    fn five_participants_form_one_full_team_and_a_singleton() {
        // 3 First + 2 Third: one balanced team absorbs four, the leftover
        // opens a new team because the first is at the cap.
        let teams = partition_teams(roster(3, 2), &mut rng());

        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0].member_count(), 4);
        assert_eq!(teams[0].cohort_count(Semester::First), 2);
        assert_eq!(teams[0].cohort_count(Semester::Third), 2);
        assert_eq!(teams[1].member_count(), 1);
        assert_eq!(teams[1].cohort_count(Semester::First), 1);
    }

    #[test]
    fn no_participant_dropped_or_duplicated() {
        let participants = roster(13, 9);
        let input_ids: HashSet<Uuid> = participants.iter().map(|p| p.id).collect();

        let teams = partition_teams(participants, &mut rng());
        let output_ids = all_member_ids(&teams);

        assert_eq!(output_ids.len(), 22, "member count must equal input count");
        let unique: HashSet<Uuid> = output_ids.iter().copied().collect();
        assert_eq!(unique, input_ids, "output ids must equal input ids");
        assert_eq!(unique.len(), output_ids.len(), "no participant duplicated");
    }

    #[test]
    fn member_records_pass_through_unchanged() {
        let participants = roster(5, 4);
        let by_id: HashMap<Uuid, Participant> =
            participants.iter().map(|p| (p.id, p.clone())).collect();

        let teams = partition_teams(participants, &mut rng());
        for team in &teams {
            for member in team.members() {
                assert_eq!(by_id[&member.id], *member);
            }
        }
    }

    #[test]
    fn cap_never_exceeded() {
        // Worst-case leftover distribution, including single-cohort rosters.
        let splits = [(3, 0), (0, 3), (4, 3), (7, 0), (51, 50), (101, 0)];

        for (first, third) in splits {
            let teams = partition_teams(roster(first, third), &mut rng());
            for team in &teams {
                assert!(
                    team.member_count() <= TEAM_CAPACITY,
                    "team {} holds {} members for split {}F/{}T",
                    team.id(),
                    team.member_count(),
                    first,
                    third
                );
            }
            let total: usize = teams.iter().map(Team::member_count).sum();
            assert_eq!(total, first + third);
        }
    }

    #[test]
    fn single_cohort_fills_teams_by_fewest_members() {
        // No balanced teams can form; everyone is a leftover. Teams fill to
        // the cap before a new one opens.
        let teams = partition_teams(roster(10, 0), &mut rng());

        let sizes: Vec<usize> = teams.iter().map(Team::member_count).collect();
        assert_eq!(sizes, vec![4, 4, 2]);
        let ids: Vec<u32> = teams.iter().map(Team::id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn team_count_is_stable_across_seeds() {
        let participants = roster(11, 6);

        let mut counts = HashSet::new();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let teams = partition_teams(participants.clone(), &mut rng);
            counts.insert(teams.len());

            let total: usize = teams.iter().map(Team::member_count).sum();
            assert_eq!(total, 17);
        }
        assert_eq!(counts.len(), 1, "team count must not depend on the seed");
    }

    #[test]
    fn assignments_vary_between_seeds() {
        let participants = roster(4, 4);

        let mut first_team_rosters = HashSet::new();
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let teams = partition_teams(participants.clone(), &mut rng);
            let mut ids: Vec<Uuid> = teams[0].members().iter().map(|m| m.id).collect();
            ids.sort();
            first_team_rosters.insert(ids);
        }
        assert!(
            first_team_rosters.len() > 1,
            "different seeds should produce different assignments"
        );
    }

    #[test]
    fn balanced_team_exists_whenever_cohorts_allow() {
        for (first, third) in [(2, 2), (5, 3), (6, 2), (2, 9)] {
            let teams = partition_teams(roster(first, third), &mut rng());
            assert!(
                teams.iter().any(|team| {
                    team.cohort_count(Semester::First) == 2
                        && team.cohort_count(Semester::Third) == 2
                }),
                "no balanced team for split {}F/{}T",
                first,
                third
            );
        }
    }

    #[test]
    fn shuffle_is_uniform_over_orderings() {
        // A single cohort of four ends up as one team whose member order is
        // a permutation of the bucket. Over many runs every one of the 24
        // orderings must show up with roughly equal frequency; a biased
        // shuffle (e.g. a random-comparator sort) fails this.
        let participants = roster(4, 0);
        let ids: Vec<Uuid> = participants.iter().map(|p| p.id).collect();

        let runs = 10_000;
        let mut counts: HashMap<Vec<usize>, u32> = HashMap::new();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..runs {
            let teams = partition_teams(participants.clone(), &mut rng);
            assert_eq!(teams.len(), 1);

            let ordering: Vec<usize> = teams[0]
                .members()
                .iter()
                .map(|m| ids.iter().position(|id| *id == m.id).expect("known member"))
                .collect();
            *counts.entry(ordering).or_insert(0) += 1;
        }

        assert_eq!(counts.len(), 24, "every permutation must be reachable");

        // Expected count is ~417 per ordering; the bounds sit several
        // standard deviations out, so a uniform shuffle passes reliably.
        for (ordering, count) in &counts {
            assert!(
                (300..=550).contains(count),
                "ordering {:?} appeared {} times in {} runs",
                ordering,
                count,
                runs
            );
        }
    }
}
