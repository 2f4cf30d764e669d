//! Plan generation: requirement resolution, greedy allocation, balancing
//!
//! The engine is synchronous and stateless between runs: every call builds a
//! fresh prerequisite graph and a fresh plan, and nothing is shared across
//! runs. It never aborts mid-plan - the result is always a complete
//! [`PlanOutcome`] carrying the plan plus structured warnings.

pub mod allocator;
pub mod balancer;

use crate::core::models::{Catalog, CoursePlan, PrerequisiteGraph, StudentProfile};
use crate::core::requirements::MajorRequirements;
use crate::{info, warn};

pub use allocator::TermAllocator;

/// Non-fatal conditions surfaced by a planning run
///
/// All of these leave the run intact; rendering them is the presenter's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanWarning {
    /// The prerequisite graph contains at least one cycle. Courses on a cycle
    /// can never become eligible and will surface as unscheduled.
    CyclicPrerequisites,
    /// The required credit total exceeds what 8 terms can hold. Allocation
    /// still runs best-effort.
    InfeasibleRequirements {
        /// Credit sum of the required courses found in the catalog
        required_credits: u32,
        /// Credit capacity of the full plan
        capacity: u32,
    },
    /// Required courses no term could accommodate, sorted by code.
    UnscheduledRequirements(Vec<String>),
}

impl std::fmt::Display for PlanWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CyclicPrerequisites => {
                write!(f, "prerequisite graph has circular dependencies")
            }
            Self::InfeasibleRequirements {
                required_credits,
                capacity,
            } => write!(
                f,
                "required courses total {required_credits} credits but only {capacity} fit in 8 terms"
            ),
            Self::UnscheduledRequirements(codes) => {
                write!(f, "could not schedule: {}", codes.join(", "))
            }
        }
    }
}

/// Result of a planning run: a complete plan plus any warnings
#[derive(Debug, Clone)]
pub struct PlanOutcome {
    /// The generated 8-term plan (possibly incomplete)
    pub plan: CoursePlan,
    /// Structured warnings collected along the way
    pub warnings: Vec<PlanWarning>,
}

/// Generates 4-year plans from a catalog and requirement tables
pub struct Planner<'a> {
    catalog: &'a Catalog,
    requirements: &'a MajorRequirements,
}

impl<'a> Planner<'a> {
    /// Create a planner over a catalog and requirement tables
    #[must_use]
    pub const fn new(catalog: &'a Catalog, requirements: &'a MajorRequirements) -> Self {
        Self {
            catalog,
            requirements,
        }
    }

    /// Generate a complete 8-term plan for a validated student profile
    ///
    /// Never fails: data-quality problems (cycles, infeasible requirement
    /// loads, courses that don't fit) are reported as warnings on the
    /// returned outcome, and allocation proceeds best-effort.
    #[must_use]
    pub fn generate_plan(&self, profile: &StudentProfile) -> PlanOutcome {
        let mut warnings = Vec::new();

        let graph = PrerequisiteGraph::from_catalog(self.catalog);

        if graph.has_cycle() {
            warn!("Prerequisite graph has circular dependencies");
            warnings.push(PlanWarning::CyclicPrerequisites);
        }

        let required = self.resolve_requirements(profile);
        info!("Total courses required: {}", required.len());

        let feasibility = MajorRequirements::feasibility(
            &required,
            self.catalog,
            profile.max_credits_per_term,
        );
        if !feasibility.is_feasible() {
            warn!(
                "Requirements need {} credits but capacity is {}",
                feasibility.required_credits, feasibility.capacity
            );
            warnings.push(PlanWarning::InfeasibleRequirements {
                required_credits: feasibility.required_credits,
                capacity: feasibility.capacity,
            });
        }

        let allocator = TermAllocator::new(&graph, profile);
        let (mut plan, unscheduled) = allocator.allocate(&required);

        if profile.balance_difficulty {
            let swaps = balancer::balance(&mut plan, &graph, &profile.completed);
            info!("Difficulty balancing made {swaps} swaps");
        }

        if !unscheduled.is_empty() {
            warn!("Could not fit all required courses: {}", unscheduled.join(", "));
            warnings.push(PlanWarning::UnscheduledRequirements(unscheduled));
        }

        PlanOutcome { plan, warnings }
    }

    /// Resolve the student's majors to the list of required course codes
    fn resolve_requirements(&self, profile: &StudentProfile) -> Vec<String> {
        if profile.has_double_major() {
            let second = profile.second_major.as_deref().unwrap_or_default();
            info!(
                "Planning for double major: {} + {}",
                profile.major, second
            );

            let merged = self.requirements.merge(&profile.major, second, self.catalog);
            info!(
                "Overlap courses counting toward both majors: {}",
                merged.overlap.len()
            );
            merged.required
        } else {
            info!("Planning for major: {}", profile.major);

            let required = self.requirements.required_for(&profile.major);
            if required.is_empty() {
                warn!("No requirement table for major '{}'", profile.major);
            }
            required.to_vec()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Course;
    use crate::core::requirements::MajorRequirements;

    fn course(code: &str, credits: u32, prereqs: &[&str]) -> Course {
        let mut c = Course::new(code.to_string(), format!("{code} name"), credits);
        c.a_rate = 0.6;
        c.avg_gpa = 3.2;
        c.instructor_rating = 4.0;
        for p in prereqs {
            c.add_prerequisite((*p).to_string());
        }
        c
    }

    fn small_tables() -> MajorRequirements {
        MajorRequirements::from_toml(
            r#"
[majors]
CS = ["CS 200", "CS 300"]
LOOP = ["A 100", "B 100"]
"#,
        )
        .expect("tables parse")
    }

    #[test]
    fn test_outcome_always_has_a_plan() {
        let catalog = Catalog::new();
        let tables = small_tables();
        let planner = Planner::new(&catalog, &tables);

        let profile = StudentProfile::new("CS".to_string());
        let outcome = planner.generate_plan(&profile);

        assert_eq!(outcome.plan.terms().len(), 8);
        // Both requirements are missing from the empty catalog
        assert!(outcome
            .warnings
            .iter()
            .any(|w| matches!(w, PlanWarning::UnscheduledRequirements(codes)
                if codes == &vec!["CS 200".to_string(), "CS 300".to_string()])));
    }

    #[test]
    fn test_successful_run_has_no_warnings() {
        let catalog = Catalog::from_courses(vec![
            course("CS 200", 3, &[]),
            course("CS 300", 3, &["CS 200"]),
        ]);
        let tables = small_tables();
        let planner = Planner::new(&catalog, &tables);

        let profile = StudentProfile::new("CS".to_string());
        let outcome = planner.generate_plan(&profile);

        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.plan.course_count(), 2);
        assert!(outcome.plan.term_of("CS 200") < outcome.plan.term_of("CS 300"));
    }

    #[test]
    fn test_cycle_is_warned_but_run_completes() {
        let catalog = Catalog::from_courses(vec![
            course("A 100", 3, &["B 100"]),
            course("B 100", 3, &["A 100"]),
        ]);
        let tables = small_tables();
        let planner = Planner::new(&catalog, &tables);

        let profile = StudentProfile::new("LOOP".to_string());
        let outcome = planner.generate_plan(&profile);

        assert!(outcome
            .warnings
            .contains(&PlanWarning::CyclicPrerequisites));
        // The cycle keeps both courses permanently ineligible
        assert!(outcome
            .warnings
            .iter()
            .any(|w| matches!(w, PlanWarning::UnscheduledRequirements(_))));
        assert_eq!(outcome.plan.course_count(), 0);
    }

    #[test]
    fn test_infeasible_load_is_warned_and_allocated_best_effort() {
        // Nine 12-credit requirements against 8 terms of 12: 108 > 96
        let heavy: Vec<Course> = (0..9)
            .map(|i| course(&format!("CS {i}"), 12, &[]))
            .collect();
        let catalog = Catalog::from_courses(heavy);

        let codes: Vec<String> = (0..9).map(|i| format!("\"CS {i}\"")).collect();
        let tables =
            MajorRequirements::from_toml(&format!("[majors]\nCS = [{}]\n", codes.join(", ")))
                .expect("tables parse");
        let planner = Planner::new(&catalog, &tables);

        let mut profile = StudentProfile::new("CS".to_string());
        profile.max_credits_per_term = 12;

        let outcome = planner.generate_plan(&profile);

        assert!(outcome.warnings.iter().any(|w| matches!(
            w,
            PlanWarning::InfeasibleRequirements {
                required_credits: 108,
                capacity: 96,
            }
        )));
        // Best effort: 8 terms of one course each, one left over
        assert_eq!(outcome.plan.course_count(), 8);
        assert!(outcome
            .warnings
            .iter()
            .any(|w| matches!(w, PlanWarning::UnscheduledRequirements(codes) if codes.len() == 1)));
    }

    #[test]
    fn test_double_major_merges_requirements() {
        let mut shared = course("MATH 340", 3, &[]);
        shared.add_major("CS".to_string());
        shared.add_major("MATH".to_string());

        let catalog = Catalog::from_courses(vec![
            course("CS 200", 3, &[]),
            course("MATH 221", 5, &[]),
            shared,
        ]);
        let tables = MajorRequirements::from_toml(
            r#"
[majors]
CS = ["CS 200", "MATH 340"]
MATH = ["MATH 221", "MATH 340"]
"#,
        )
        .expect("tables parse");
        let planner = Planner::new(&catalog, &tables);

        let mut profile = StudentProfile::new("CS".to_string());
        profile.double_major = true;
        profile.second_major = Some("MATH".to_string());

        let outcome = planner.generate_plan(&profile);

        assert!(outcome.warnings.is_empty());
        // MATH 340 appears exactly once despite being required by both majors
        let scheduled = outcome.plan.scheduled_codes();
        assert_eq!(
            scheduled.iter().filter(|c| c.as_str() == "MATH 340").count(),
            1
        );
        assert_eq!(outcome.plan.course_count(), 3);
    }

    #[test]
    fn test_determinism_across_runs() {
        let catalog = Catalog::from_courses(vec![
            course("CS 200", 3, &[]),
            course("CS 300", 3, &["CS 200"]),
            course("MATH 221", 5, &[]),
        ]);
        let tables = MajorRequirements::from_toml(
            r#"
[majors]
CS = ["CS 200", "CS 300", "MATH 221"]
"#,
        )
        .expect("tables parse");
        let planner = Planner::new(&catalog, &tables);
        let profile = StudentProfile::new("CS".to_string());

        let first = planner.generate_plan(&profile);
        let second = planner.generate_plan(&profile);

        for (a, b) in first.plan.terms().iter().zip(second.plan.terms()) {
            assert_eq!(a.course_codes(), b.course_codes());
        }
        assert_eq!(first.warnings.len(), second.warnings.len());
    }
}
