//! Plan model

use super::{Session, Term};
use serde::{Deserialize, Serialize};

/// Number of terms in a 4-year plan
pub const PLAN_TERMS: usize = 8;

/// A complete 4-year plan: exactly 8 terms in fixed order
///
/// Term index `i` always corresponds to year `i / 2 + 1`, Fall when `i` is
/// even and Spring when odd. Terms are created once and never added or
/// removed; only their course lists change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoursePlan {
    terms: Vec<Term>,
}

impl CoursePlan {
    /// Create a plan of 8 empty terms (4 years, Fall then Spring)
    #[must_use]
    pub fn new() -> Self {
        let mut terms = Vec::with_capacity(PLAN_TERMS);
        for year in 1..=4u8 {
            terms.push(Term::new(year, Session::Fall));
            terms.push(Term::new(year, Session::Spring));
        }
        Self { terms }
    }

    /// All terms in fixed order
    #[must_use]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Mutable access to the terms for the allocator and balancer
    pub fn terms_mut(&mut self) -> &mut [Term] {
        &mut self.terms
    }

    /// Total credits across all terms
    #[must_use]
    pub fn total_credits(&self) -> u32 {
        self.terms.iter().map(Term::total_credits).sum()
    }

    /// Total number of scheduled courses
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.terms.iter().map(Term::course_count).sum()
    }

    /// Number of terms holding at least one course
    #[must_use]
    pub fn terms_used(&self) -> usize {
        self.terms.iter().filter(|t| !t.is_empty()).count()
    }

    /// Codes of every scheduled course, in term order
    #[must_use]
    pub fn scheduled_codes(&self) -> Vec<String> {
        self.terms.iter().flat_map(Term::course_codes).collect()
    }

    /// Find the term index holding a course code
    #[must_use]
    pub fn term_of(&self, code: &str) -> Option<usize> {
        self.terms.iter().position(|t| t.has_course(code))
    }
}

impl Default for CoursePlan {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Course;

    #[test]
    fn test_fixed_term_layout() {
        let plan = CoursePlan::new();
        assert_eq!(plan.terms().len(), PLAN_TERMS);

        for (i, term) in plan.terms().iter().enumerate() {
            assert_eq!(usize::from(term.year), i / 2 + 1);
            let expected = if i % 2 == 0 {
                Session::Fall
            } else {
                Session::Spring
            };
            assert_eq!(term.session, expected);
        }
    }

    #[test]
    fn test_totals() {
        let mut plan = CoursePlan::new();
        plan.terms_mut()[0].add_course(Course::new("CS 200".to_string(), "P1".to_string(), 3));
        plan.terms_mut()[3].add_course(Course::new("CS 300".to_string(), "P2".to_string(), 4));

        assert_eq!(plan.total_credits(), 7);
        assert_eq!(plan.course_count(), 2);
        assert_eq!(plan.terms_used(), 2);
        assert_eq!(plan.scheduled_codes(), vec!["CS 200", "CS 300"]);
        assert_eq!(plan.term_of("CS 300"), Some(3));
        assert_eq!(plan.term_of("CS 999"), None);
    }
}
