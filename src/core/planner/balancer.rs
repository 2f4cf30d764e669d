//! Post-allocation difficulty balancing
//!
//! Redistributes course load by swapping single courses between the hardest
//! and easiest terms until the gap between them is acceptable, a swap stops
//! paying for itself, or the iteration bound is hit. The pass never changes
//! which courses are scheduled, only where they sit.

use crate::core::models::{CoursePlan, PrerequisiteGraph, Term};
use crate::core::scorer;
use crate::debug;
use std::collections::{HashMap, HashSet};

/// Upper bound on balancing iterations
const MAX_ITERATIONS: usize = 10;
/// Difficulty gap below which the plan counts as balanced
const BALANCED_GAP: f64 = 15.0;
/// Minimum gap reduction required to commit a swap
const SWAP_IMPROVEMENT_THRESHOLD: f64 = 5.0;

/// Mean difficulty of a term's courses (0.0 when empty)
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average_difficulty(term: &Term) -> f64 {
    if term.is_empty() {
        return 0.0;
    }
    let total: f64 = term.courses().iter().map(scorer::difficulty).sum();
    total / term.course_count() as f64
}

/// Population variance of average difficulty across non-empty terms
///
/// 0.0 when fewer than two terms hold courses.
#[must_use]
pub fn difficulty_variance(plan: &CoursePlan) -> f64 {
    let difficulties: Vec<f64> = plan
        .terms()
        .iter()
        .filter(|t| !t.is_empty())
        .map(average_difficulty)
        .collect();

    if difficulties.len() < 2 {
        return 0.0;
    }

    #[allow(clippy::cast_precision_loss)]
    let n = difficulties.len() as f64;
    let mean = difficulties.iter().sum::<f64>() / n;
    difficulties.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n
}

/// Balance difficulty across the plan's terms by pairwise course swaps
///
/// Each iteration trades the easiest course of the hardest term for the
/// hardest course of the easiest term, committing only when the simulated
/// gap shrinks by more than the improvement threshold and prerequisite
/// ordering survives the move.
///
/// # Returns
/// The number of swaps committed.
pub fn balance(
    plan: &mut CoursePlan,
    graph: &PrerequisiteGraph,
    completed: &HashSet<String>,
) -> usize {
    let mut swaps_made = 0;

    for _ in 0..MAX_ITERATIONS {
        let Some((hard_idx, easy_idx, gap)) = extreme_terms(plan) else {
            break;
        };

        if gap < BALANCED_GAP {
            break;
        }

        if try_swap(plan, hard_idx, easy_idx, graph, completed) {
            swaps_made += 1;
            debug!(
                "Balancing swap #{swaps_made}: {} <-> {}",
                plan.terms()[hard_idx].label(),
                plan.terms()[easy_idx].label()
            );
        } else {
            break; // no further improving swap under this one-swap policy
        }
    }

    swaps_made
}

/// Indices of the hardest and easiest non-empty terms, plus their gap
fn extreme_terms(plan: &CoursePlan) -> Option<(usize, usize, f64)> {
    let mut hardest: Option<(usize, f64)> = None;
    let mut easiest: Option<(usize, f64)> = None;

    for (idx, term) in plan.terms().iter().enumerate() {
        if term.is_empty() {
            continue;
        }
        let diff = average_difficulty(term);

        if hardest.is_none_or(|(_, max)| diff > max) {
            hardest = Some((idx, diff));
        }
        if easiest.is_none_or(|(_, min)| diff < min) {
            easiest = Some((idx, diff));
        }
    }

    let (hard_idx, max_diff) = hardest?;
    let (easy_idx, min_diff) = easiest?;
    Some((hard_idx, easy_idx, max_diff - min_diff))
}

/// Attempt one swap between the hardest and easiest terms
fn try_swap(
    plan: &mut CoursePlan,
    hard_idx: usize,
    easy_idx: usize,
    graph: &PrerequisiteGraph,
    completed: &HashSet<String>,
) -> bool {
    let hard_term = &plan.terms()[hard_idx];
    let easy_term = &plan.terms()[easy_idx];

    // Easiest course of the hard term and hardest course of the easy term
    let Some(easy_from_hard) = hard_term
        .courses()
        .iter()
        .min_by(|a, b| scorer::difficulty(a).total_cmp(&scorer::difficulty(b)))
    else {
        return false;
    };
    let Some(hard_from_easy) = easy_term
        .courses()
        .iter()
        .max_by(|a, b| scorer::difficulty(a).total_cmp(&scorer::difficulty(b)))
    else {
        return false;
    };

    let current_gap = (average_difficulty(hard_term) - average_difficulty(easy_term)).abs();

    let new_hard = simulate_swap(
        hard_term,
        &easy_from_hard.code,
        scorer::difficulty(hard_from_easy),
    );
    let new_easy = simulate_swap(
        easy_term,
        &hard_from_easy.code,
        scorer::difficulty(easy_from_hard),
    );
    let new_gap = (new_hard - new_easy).abs();

    if current_gap - new_gap <= SWAP_IMPROVEMENT_THRESHOLD {
        return false;
    }

    let moving_to_easy = easy_from_hard.code.clone();
    let moving_to_hard = hard_from_easy.code.clone();

    if !swap_keeps_prerequisite_order(
        plan,
        (moving_to_easy.as_str(), easy_idx),
        (moving_to_hard.as_str(), hard_idx),
        graph,
        completed,
    ) {
        return false;
    }

    let Some(course_to_easy) = plan.terms_mut()[hard_idx].remove_course(&moving_to_easy) else {
        return false;
    };
    let Some(course_to_hard) = plan.terms_mut()[easy_idx].remove_course(&moving_to_hard) else {
        plan.terms_mut()[hard_idx].add_course(course_to_easy);
        return false;
    };

    plan.terms_mut()[hard_idx].add_course(course_to_hard);
    plan.terms_mut()[easy_idx].add_course(course_to_easy);

    true
}

/// Average difficulty of a term after replacing one course's difficulty
#[allow(clippy::cast_precision_loss)]
fn simulate_swap(term: &Term, removed_code: &str, added_difficulty: f64) -> f64 {
    if term.course_count() <= 1 {
        return added_difficulty;
    }

    let total: f64 = term
        .courses()
        .iter()
        .filter(|c| c.code != removed_code)
        .map(scorer::difficulty)
        .sum();

    (total + added_difficulty) / term.course_count() as f64
}

/// Verify prerequisite ordering across the whole plan as if the two courses
/// had already traded places
///
/// Prerequisites satisfied by the completed set are always fine; scheduled
/// prerequisites must sit strictly earlier than their dependents. A
/// prerequisite that is neither completed nor scheduled cannot be affected by
/// the swap and is ignored here.
fn swap_keeps_prerequisite_order(
    plan: &CoursePlan,
    to_easy: (&str, usize),
    to_hard: (&str, usize),
    graph: &PrerequisiteGraph,
    completed: &HashSet<String>,
) -> bool {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    for (idx, term) in plan.terms().iter().enumerate() {
        for course in term.courses() {
            let position = if course.code == to_easy.0 {
                to_easy.1
            } else if course.code == to_hard.0 {
                to_hard.1
            } else {
                idx
            };
            positions.insert(course.code.as_str(), position);
        }
    }

    for term in plan.terms() {
        for course in term.courses() {
            let Some(&course_pos) = positions.get(course.code.as_str()) else {
                continue;
            };
            for prereq in graph
                .get_course(&course.code)
                .map_or(&[][..], |c| c.prerequisites.as_slice())
            {
                if completed.contains(prereq) {
                    continue;
                }
                if let Some(&prereq_pos) = positions.get(prereq.as_str()) {
                    if prereq_pos >= course_pos {
                        return false;
                    }
                }
            }
        }
    }

    true
}
