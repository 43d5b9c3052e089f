use rand::{seq::SliceRandom, Rng};

use crate::models::{CandidateTrack, StrategyTag};

/// Splits candidates by strategy, groups ordered by first appearance
pub fn group_by_strategy(candidates: Vec<CandidateTrack>) -> Vec<(StrategyTag, Vec<CandidateTrack>)> {
    let mut groups: Vec<(StrategyTag, Vec<CandidateTrack>)> = Vec::new();

    for candidate in candidates {
        match groups.iter_mut().find(|(tag, _)| *tag == candidate.strategy) {
            Some((_, group)) => group.push(candidate),
            None => groups.push((candidate.strategy, vec![candidate])),
        }
    }

    groups
}

/// Takes the i-th element of every group that still has one, for i = 0, 1, ...
///
/// Every active strategy contributes one track before any contributes a second.
pub fn round_robin(groups: Vec<Vec<CandidateTrack>>) -> Vec<CandidateTrack> {
    let total = groups.iter().map(Vec::len).sum();
    let mut merged = Vec::with_capacity(total);
    let mut iters: Vec<_> = groups.into_iter().map(Vec::into_iter).collect();

    while merged.len() < total {
        for iter in iters.iter_mut() {
            if let Some(candidate) = iter.next() {
                merged.push(candidate);
            }
        }
    }

    merged
}

/// Diversity shuffle: shuffle inside each strategy group, merge the groups
/// round-robin, then shuffle the merged list once more.
///
/// Returns a permutation of the input; truncation is left to the caller.
pub fn interleave<R: Rng + ?Sized>(candidates: Vec<CandidateTrack>, rng: &mut R) -> Vec<CandidateTrack> {
    let groups: Vec<Vec<CandidateTrack>> = group_by_strategy(candidates)
        .into_iter()
        .map(|(_, mut group)| {
            group.shuffle(rng);
            group
        })
        .collect();

    let mut merged = round_robin(groups);
    merged.shuffle(rng);
    merged
}
