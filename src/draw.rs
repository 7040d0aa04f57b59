//! Secret-friend draw.
//!
//! A draw is a derangement of the roster: a permutation where nobody is assigned
//! to themselves. Candidates come from repeated Fisher–Yates shuffles of a
//! working buffer and are rejected while any slot still holds its own index.
//! Roughly 1/e of random permutations are derangements, so the expected number
//! of attempts is below 3 for any roster size.
//!
//! Nothing here touches the database; `ops::draw_ops` persists the outcome.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use rand::Rng;
use thiserror::Error;

use crate::error::{SantaError, SantaResult};
use crate::model::{Id, Participant};

/// Shuffles tried before giving up with [`SantaError::DrawFailed`].
pub const MAX_DRAW_ATTEMPTS: usize = 1000;

/// Anything that can be put into a draw.
pub trait Entrant {
    type Key: Clone + Eq + Hash;

    fn key(&self) -> Self::Key;
    fn display_name(&self) -> &str;
}

impl Entrant for Participant {
    type Key = Id<Participant>;

    fn key(&self) -> Self::Key {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

/// `giver` buys a present for `receiver`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pairing<K> {
    pub giver: K,
    pub receiver: K,
    pub receiver_name: String,
}

/// Index-level result: `targets[i]` is the slot that slot `i` gives to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derangement {
    pub targets: Vec<usize>,
    pub attempts: usize,
}

#[derive(Debug, Clone)]
pub struct DrawOutcome<K> {
    pub pairings: Vec<Pairing<K>>,
    pub attempts: usize,
}

/// Produces a fixed-point-free permutation of `0..n`.
///
/// `n == 2` always yields the swap. `n < 2` has no derangement and fails
/// without shuffling.
pub fn derangement_indices<R: Rng + ?Sized>(n: usize, rng: &mut R) -> SantaResult<Derangement> {
    if n < 2 {
        return Err(SantaError::DrawFailed { attempts: 0 });
    }

    let mut buffer: Vec<usize> = (0..n).collect();

    for attempt in 1..=MAX_DRAW_ATTEMPTS {
        fisher_yates(&mut buffer, rng);
        if first_fixed_point(&buffer).is_none() {
            return Ok(Derangement {
                targets: buffer,
                attempts: attempt,
            });
        }
    }

    Err(SantaError::DrawFailed {
        attempts: MAX_DRAW_ATTEMPTS,
    })
}

/// Draws secret friends for `entrants`, in input order.
///
/// The caller's slice is only read. Keys must be distinct; the roster-size
/// floor of the application is enforced by the caller, not here.
pub fn draw_pairings<P, R>(entrants: &[P], rng: &mut R) -> SantaResult<DrawOutcome<P::Key>>
where
    P: Entrant,
    R: Rng + ?Sized,
{
    let keys: Vec<P::Key> = entrants.iter().map(Entrant::key).collect();
    let mut seen = HashSet::with_capacity(keys.len());
    if let Some(dup) = keys.iter().position(|k| !seen.insert(k.clone())) {
        return Err(SantaError::InvalidAssignment(format!(
            "duplicate entrant '{}' at position {}",
            entrants[dup].display_name(),
            dup
        )));
    }

    let derangement = derangement_indices(entrants.len(), rng)?;

    let pairings = derangement
        .targets
        .iter()
        .enumerate()
        .map(|(giver, &receiver)| Pairing {
            giver: keys[giver].clone(),
            receiver: keys[receiver].clone(),
            receiver_name: entrants[receiver].display_name().to_string(),
        })
        .collect();

    Ok(DrawOutcome {
        pairings,
        attempts: derangement.attempts,
    })
}

/// [`draw_pairings`] with the thread-local generator.
pub fn draw<P: Entrant>(entrants: &[P]) -> SantaResult<DrawOutcome<P::Key>> {
    draw_pairings(entrants, &mut rand::rng())
}

fn fisher_yates<T, R: Rng + ?Sized>(buffer: &mut [T], rng: &mut R) {
    for i in (1..buffer.len()).rev() {
        let j = rng.random_range(0..=i);
        buffer.swap(i, j);
    }
}

fn first_fixed_point(targets: &[usize]) -> Option<usize> {
    targets.iter().enumerate().position(|(i, &t)| i == t)
}

/// Why a candidate assignment is not a valid draw.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignmentViolation {
    #[error("{givers} givers but {receivers} receivers")]
    LengthMismatch { givers: usize, receivers: usize },

    #[error("giver at position {index} is listed twice")]
    DuplicateGiver { index: usize },

    #[error("giver at position {index} is assigned to themselves")]
    FixedPoint { index: usize },

    #[error("receiver at position {index} is not in the roster")]
    UnknownReceiver { index: usize },

    #[error("receiver at position {index} is already receiving from someone else")]
    DuplicateReceiver { index: usize },
}

impl From<AssignmentViolation> for SantaError {
    fn from(v: AssignmentViolation) -> Self {
        SantaError::InvalidAssignment(v.to_string())
    }
}

/// Checks a finished assignment without knowing how it was produced:
/// `receivers[i]` must differ from `givers[i]` and every giver must be
/// received exactly once. Linear in the roster size.
pub fn verify_assignment<K: Eq + Hash>(
    givers: &[K],
    receivers: &[K],
) -> Result<(), AssignmentViolation> {
    if givers.len() != receivers.len() {
        return Err(AssignmentViolation::LengthMismatch {
            givers: givers.len(),
            receivers: receivers.len(),
        });
    }

    let mut roster: HashMap<&K, bool> = HashMap::with_capacity(givers.len());
    for (index, giver) in givers.iter().enumerate() {
        if roster.insert(giver, false).is_some() {
            return Err(AssignmentViolation::DuplicateGiver { index });
        }
    }

    for (index, (giver, receiver)) in givers.iter().zip(receivers).enumerate() {
        if giver == receiver {
            return Err(AssignmentViolation::FixedPoint { index });
        }
        match roster.get_mut(receiver) {
            None => return Err(AssignmentViolation::UnknownReceiver { index }),
            Some(taken) if *taken => {
                return Err(AssignmentViolation::DuplicateReceiver { index })
            }
            Some(taken) => *taken = true,
        }
    }

    Ok(())
}

/// [`verify_assignment`] over pairings, e.g. ones loaded back from storage.
pub fn verify_pairings<K: Eq + Hash + Clone>(
    pairings: &[Pairing<K>],
) -> Result<(), AssignmentViolation> {
    let givers: Vec<K> = pairings.iter().map(|p| p.giver.clone()).collect();
    let receivers: Vec<K> = pairings.iter().map(|p| p.receiver.clone()).collect();
    verify_assignment(&givers, &receivers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct Named(u32, &'static str);

    impl Entrant for Named {
        type Key = u32;

        fn key(&self) -> u32 {
            self.0
        }

        fn display_name(&self) -> &str {
            self.1
        }
    }

    #[test]
    fn fisher_yates_keeps_every_element() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut v: Vec<usize> = (0..20).collect();
        fisher_yates(&mut v, &mut rng);
        let mut sorted = v.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn first_fixed_point_finds_earliest() {
        assert_eq!(first_fixed_point(&[1, 0, 2, 3]), Some(2));
        assert_eq!(first_fixed_point(&[1, 2, 0]), None);
    }

    #[test]
    fn single_entrant_fails_without_shuffling() {
        let mut rng = StdRng::seed_from_u64(1);
        match derangement_indices(1, &mut rng) {
            Err(SantaError::DrawFailed { attempts }) => assert_eq!(attempts, 0),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn empty_roster_fails() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(derangement_indices(0, &mut rng).is_err());
    }

    #[test]
    fn two_entrants_always_swap() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..50 {
            let d = derangement_indices(2, &mut rng).unwrap();
            assert_eq!(d.targets, vec![1, 0]);
        }
    }

    #[test]
    fn attempts_are_counted_from_one() {
        let mut rng = StdRng::seed_from_u64(3);
        let d = derangement_indices(8, &mut rng).unwrap();
        assert!(d.attempts >= 1 && d.attempts <= MAX_DRAW_ATTEMPTS);
    }

    #[test]
    fn draw_pairings_rejects_duplicate_keys() {
        let entrants = [Named(1, "Ana"), Named(2, "Bia"), Named(1, "Ana de novo")];
        let mut rng = StdRng::seed_from_u64(5);
        assert!(matches!(
            draw_pairings(&entrants, &mut rng),
            Err(SantaError::InvalidAssignment(_))
        ));
    }

    #[test]
    fn draw_pairings_carries_receiver_names() {
        let entrants = [Named(1, "Ana"), Named(2, "Bia"), Named(3, "Caio")];
        let mut rng = StdRng::seed_from_u64(11);
        let outcome = draw_pairings(&entrants, &mut rng).unwrap();
        for p in &outcome.pairings {
            let expected = entrants.iter().find(|e| e.0 == p.receiver).unwrap().1;
            assert_eq!(p.receiver_name, expected);
        }
    }

    #[test]
    fn verify_flags_fixed_point() {
        assert_eq!(
            verify_assignment(&[1, 2, 3], &[2, 1, 3]),
            Err(AssignmentViolation::FixedPoint { index: 2 })
        );
    }

    #[test]
    fn verify_flags_duplicate_receiver() {
        assert_eq!(
            verify_assignment(&[1, 2, 3], &[2, 3, 2]),
            Err(AssignmentViolation::DuplicateReceiver { index: 2 })
        );
    }

    #[test]
    fn verify_flags_unknown_receiver() {
        assert_eq!(
            verify_assignment(&[1, 2, 3], &[2, 3, 9]),
            Err(AssignmentViolation::UnknownReceiver { index: 2 })
        );
    }

    #[test]
    fn verify_flags_length_mismatch() {
        assert!(matches!(
            verify_assignment(&[1, 2, 3], &[2, 3]),
            Err(AssignmentViolation::LengthMismatch { .. })
        ));
    }

    #[test]
    fn verify_flags_duplicate_giver() {
        assert_eq!(
            verify_assignment(&[1, 1, 3], &[3, 3, 1]),
            Err(AssignmentViolation::DuplicateGiver { index: 1 })
        );
    }

    #[test]
    fn verify_accepts_two_cycles() {
        assert!(verify_assignment(&[1, 2, 3, 4], &[2, 1, 4, 3]).is_ok());
    }
}
