//! Greedy term-by-term course allocation

use crate::core::models::{CoursePlan, Course, PrerequisiteGraph, StudentProfile, Term};
use crate::core::scorer;
use crate::{debug, warn};
use std::collections::HashSet;

/// Fills the 8 terms of a plan in fixed order with the best eligible courses
///
/// Single forward pass with no backtracking: a choice made in an early term
/// is never revisited, even if it starves a later term. This bounds the work
/// to one pass over terms times a sort of the candidate list, at the cost of
/// optimality.
pub struct TermAllocator<'a> {
    graph: &'a PrerequisiteGraph,
    profile: &'a StudentProfile,
}

impl<'a> TermAllocator<'a> {
    /// Create a new allocator over a prerequisite graph and student profile
    #[must_use]
    pub const fn new(graph: &'a PrerequisiteGraph, profile: &'a StudentProfile) -> Self {
        Self { graph, profile }
    }

    /// Allocate the required courses across a fresh 8-term plan
    ///
    /// Courses already in the profile's completed set seed the completed
    /// tracking set and are never scheduled.
    ///
    /// # Returns
    /// The filled plan plus the sorted codes of required courses that no term
    /// could accommodate.
    #[must_use]
    pub fn allocate(&self, required: &[String]) -> (CoursePlan, Vec<String>) {
        let mut plan = CoursePlan::new();

        let mut completed: HashSet<String> = self.profile.completed.clone();
        let mut remaining: HashSet<String> = required
            .iter()
            .filter(|code| !completed.contains(*code))
            .cloned()
            .collect();

        for term in plan.terms_mut() {
            self.fill_term(term, &mut completed, &mut remaining);
            debug!(
                "{}: {} courses, {} credits",
                term.label(),
                term.course_count(),
                term.total_credits()
            );
        }

        let mut unscheduled: Vec<String> = remaining.into_iter().collect();
        unscheduled.sort();

        (plan, unscheduled)
    }

    /// Fill a single term up to the credit cap
    ///
    /// The eligibility frontier is computed once per term, so a course whose
    /// prerequisite lands in the same term never becomes a candidate until
    /// the following term.
    fn fill_term(
        &self,
        term: &mut Term,
        completed: &mut HashSet<String>,
        remaining: &mut HashSet<String>,
    ) {
        let max_credits = self.profile.max_credits_per_term;

        let frontier = self.graph.available_courses(completed, remaining);
        if frontier.is_empty() {
            return;
        }

        let candidates = self.rank_candidates(&frontier);

        let mut current_credits = 0;
        for course in candidates {
            if current_credits + course.credits <= max_credits {
                current_credits += course.credits;
                completed.insert(course.code.clone());
                remaining.remove(&course.code);
                term.add_course(course.clone());
            }

            if current_credits >= max_credits {
                break;
            }
        }
    }

    /// Resolve frontier codes to course records, filter, and rank
    ///
    /// Ranking: in double-major mode, overlap courses (counting toward two or
    /// more of the student's majors) sort strictly before the rest; within a
    /// tier, descending score. The sort is stable and the frontier arrives
    /// sorted by code, so ties keep a deterministic order.
    fn rank_candidates(&self, frontier: &[String]) -> Vec<&'a Course> {
        let majors = self.profile.all_majors();
        let double_major = self.profile.has_double_major();

        let mut candidates: Vec<(&Course, f64, bool)> = frontier
            .iter()
            .filter_map(|code| {
                let Some(course) = self.graph.get_course(code) else {
                    warn!("Required course {code} is not in the catalog; skipping");
                    return None;
                };
                scorer::meets_preferences(course, self.profile).then_some(course)
            })
            .map(|course| {
                (
                    course,
                    scorer::score(course, self.profile),
                    double_major && course.is_overlap(&majors),
                )
            })
            .collect();

        candidates.sort_by(|(_, score_a, overlap_a), (_, score_b, overlap_b)| {
            overlap_b
                .cmp(overlap_a)
                .then_with(|| score_b.total_cmp(score_a))
        });

        candidates.into_iter().map(|(course, _, _)| course).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Catalog;

    fn course(code: &str, credits: u32, prereqs: &[&str]) -> Course {
        let mut c = Course::new(code.to_string(), format!("{code} name"), credits);
        c.a_rate = 0.5;
        c.avg_gpa = 3.0;
        c.instructor_rating = 3.5;
        for p in prereqs {
            c.add_prerequisite((*p).to_string());
        }
        c
    }

    fn profile(max_credits: u32) -> StudentProfile {
        let mut p = StudentProfile::new("CS".to_string());
        p.max_credits_per_term = max_credits;
        p
    }

    fn allocate(
        courses: Vec<Course>,
        profile: &StudentProfile,
        required: &[&str],
    ) -> (CoursePlan, Vec<String>) {
        let catalog = Catalog::from_courses(courses);
        let graph = PrerequisiteGraph::from_catalog(&catalog);
        let required: Vec<String> = required.iter().map(|c| (*c).to_string()).collect();
        TermAllocator::new(&graph, profile).allocate(&required)
    }

    #[test]
    fn test_prereq_chain_spreads_over_terms() {
        // Cap 12 forces one course per term: A then B
        let profile = profile(12);

        let (plan, unscheduled) = allocate(
            vec![course("A 100", 12, &[]), course("B 100", 12, &["A 100"])],
            &profile,
            &["A 100", "B 100"],
        );

        assert!(unscheduled.is_empty());
        assert_eq!(plan.term_of("A 100"), Some(0));
        assert_eq!(plan.term_of("B 100"), Some(1));
    }

    #[test]
    fn test_credit_cap_never_exceeded() {
        let profile = profile(15);
        let courses: Vec<Course> = (0..12)
            .map(|i| course(&format!("CS {i:03}"), 4, &[]))
            .collect();
        let required: Vec<&str> = courses.iter().map(|c| c.code.as_str()).collect();
        let required: Vec<String> = required.iter().map(|c| (*c).to_string()).collect();

        let catalog = Catalog::from_courses(courses);
        let graph = PrerequisiteGraph::from_catalog(&catalog);
        let (plan, _) = TermAllocator::new(&graph, &profile).allocate(&required);

        for term in plan.terms() {
            assert!(term.total_credits() <= profile.max_credits_per_term);
        }
    }

    #[test]
    fn test_overflowing_course_is_skipped_not_deferred() {
        // Two 5-credit courses fit under a 12-credit cap; the third would
        // push the total to 15 and is skipped, not deferred within the term
        let profile = profile(12);
        let (plan, unscheduled) = allocate(
            vec![
                course("A 100", 5, &[]),
                course("B 100", 5, &[]),
                course("C 100", 5, &[]),
            ],
            &profile,
            &["A 100", "B 100", "C 100"],
        );

        // Two fit in term 1, the third lands in term 2
        assert_eq!(plan.terms()[0].course_count(), 2);
        assert_eq!(plan.terms()[1].course_count(), 1);
        assert!(unscheduled.is_empty());
    }

    #[test]
    fn test_completed_courses_are_not_rescheduled() {
        let mut profile = profile(15);
        profile.completed.insert("A 100".to_string());

        let (plan, unscheduled) = allocate(
            vec![course("A 100", 3, &[]), course("B 100", 3, &["A 100"])],
            &profile,
            &["A 100", "B 100"],
        );

        assert!(unscheduled.is_empty());
        assert_eq!(plan.term_of("A 100"), None);
        // B's prerequisite is already satisfied, so it lands in term 1
        assert_eq!(plan.term_of("B 100"), Some(0));
    }

    #[test]
    fn test_unknown_required_code_reported_unscheduled() {
        let profile = profile(15);
        let (plan, unscheduled) = allocate(
            vec![course("A 100", 3, &[])],
            &profile,
            &["A 100", "GHOST 500"],
        );

        assert_eq!(plan.course_count(), 1);
        assert_eq!(unscheduled, vec!["GHOST 500"]);
    }

    #[test]
    fn test_hard_filter_excludes_avoided_slot() {
        let mut early = course("E 800", 3, &[]);
        early.early_morning = true;
        early.a_rate = 0.95;
        early.instructor_rating = 5.0;

        let mut profile = profile(15);
        profile.avoid_early_morning = true;

        let (plan, unscheduled) = allocate(
            vec![early, course("A 100", 3, &[])],
            &profile,
            &["E 800", "A 100"],
        );

        // The early course never appears in any term, no matter its score
        assert_eq!(plan.term_of("E 800"), None);
        assert_eq!(unscheduled, vec!["E 800"]);
    }

    #[test]
    fn test_higher_score_wins_within_term() {
        let mut strong = course("A 100", 3, &[]);
        strong.a_rate = 0.9;
        strong.instructor_rating = 4.8;

        let mut weak = course("B 100", 3, &[]);
        weak.a_rate = 0.3;
        weak.instructor_rating = 2.0;

        let profile = profile(15);
        let (plan, _) = allocate(vec![weak, strong], &profile, &["A 100", "B 100"]);

        let first_term = &plan.terms()[0];
        assert_eq!(first_term.course_codes()[0], "A 100");
    }

    #[test]
    fn test_overlap_courses_rank_first_in_double_major() {
        // Low-score overlap course must still beat a high-score single-major one
        let mut overlap = course("MATH 340", 3, &[]);
        overlap.a_rate = 0.2;
        overlap.instructor_rating = 2.0;
        overlap.add_major("CS".to_string());
        overlap.add_major("MATH".to_string());

        let mut single = course("CS 540", 3, &[]);
        single.a_rate = 0.9;
        single.instructor_rating = 5.0;
        single.add_major("CS".to_string());

        let mut profile = profile(12);
        profile.double_major = true;
        profile.second_major = Some("MATH".to_string());

        let (plan, _) = allocate(
            vec![single, overlap],
            &profile,
            &["MATH 340", "CS 540"],
        );

        assert_eq!(plan.terms()[0].course_codes()[0], "MATH 340");
    }

    #[test]
    fn test_allocation_is_deterministic() {
        let profile = profile(15);
        let make = || {
            allocate(
                vec![
                    course("CS 200", 3, &[]),
                    course("CS 300", 3, &["CS 200"]),
                    course("MATH 221", 5, &[]),
                    course("MATH 222", 4, &["MATH 221"]),
                    course("STAT 324", 3, &[]),
                ],
                &profile,
                &["CS 200", "CS 300", "MATH 221", "MATH 222", "STAT 324"],
            )
        };

        let (plan_a, unscheduled_a) = make();
        let (plan_b, unscheduled_b) = make();

        assert_eq!(plan_a.scheduled_codes(), plan_b.scheduled_codes());
        assert_eq!(unscheduled_a, unscheduled_b);
        for (ta, tb) in plan_a.terms().iter().zip(plan_b.terms()) {
            assert_eq!(ta.course_codes(), tb.course_codes());
        }
    }
}
