//! Student profile model

use super::Relevance;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Career track the student is aiming for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareerGoal {
    /// Graduate school applications
    GradSchool,
    /// Industry positions
    Industry,
}

impl CareerGoal {
    /// Check whether a course relevance tag matches this goal exactly
    #[must_use]
    pub const fn matches(self, relevance: Relevance) -> bool {
        matches!(
            (self, relevance),
            (Self::GradSchool, Relevance::GradSchool) | (Self::Industry, Relevance::Industry)
        )
    }
}

/// Student preferences and goals for a planning run
///
/// Validated at the boundary via [`StudentProfile::validate`]; the engine
/// assumes a valid profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentProfile {
    /// Primary major id (e.g., "CS")
    pub major: String,

    /// Second major id for double-major planning
    #[serde(default)]
    pub second_major: Option<String>,

    /// Whether the student is pursuing a double major.
    /// Must be consistent with `second_major`: `true` requires a non-empty
    /// second major; when `false`, `second_major` is ignored.
    #[serde(default)]
    pub double_major: bool,

    /// Target GPA (0.0-4.0)
    pub gpa_goal: f64,

    /// Maximum credits per term (12-21)
    pub max_credits_per_term: u32,

    /// Avoid courses in the early-morning slot
    #[serde(default)]
    pub avoid_early_morning: bool,

    /// Prefer easier courses over other factors
    #[serde(default)]
    pub prioritize_gpa: bool,

    /// Run the difficulty balancing pass after allocation
    #[serde(default = "default_balance")]
    pub balance_difficulty: bool,

    /// Career track preference
    pub career_goal: CareerGoal,

    /// Courses already completed before the first planned term
    #[serde(default)]
    pub completed: HashSet<String>,
}

const fn default_balance() -> bool {
    true
}

impl StudentProfile {
    /// Create a profile with the given majors and reasonable defaults
    #[must_use]
    pub fn new(major: String) -> Self {
        Self {
            major,
            second_major: None,
            double_major: false,
            gpa_goal: 3.0,
            max_credits_per_term: 15,
            avoid_early_morning: false,
            prioritize_gpa: false,
            balance_difficulty: true,
            career_goal: CareerGoal::Industry,
            completed: HashSet::new(),
        }
    }

    /// All majors the student is pursuing (primary first)
    #[must_use]
    pub fn all_majors(&self) -> Vec<&str> {
        let mut majors = vec![self.major.as_str()];
        if self.double_major {
            if let Some(second) = self.second_major.as_deref() {
                majors.push(second);
            }
        }
        majors
    }

    /// Whether the profile requests double-major planning
    #[must_use]
    pub fn has_double_major(&self) -> bool {
        self.double_major && self.second_major.as_ref().is_some_and(|m| !m.is_empty())
    }

    /// Validate the profile before it reaches the engine
    ///
    /// # Errors
    /// Returns a description of the first violated invariant: empty major,
    /// out-of-range GPA goal, out-of-range credit limit, or a double-major
    /// flag without a second major.
    pub fn validate(&self) -> Result<(), String> {
        if self.major.trim().is_empty() {
            return Err("primary major must not be empty".to_string());
        }
        if !(0.0..=4.0).contains(&self.gpa_goal) {
            return Err(format!(
                "gpa_goal must be within 0.0-4.0, got {}",
                self.gpa_goal
            ));
        }
        if !(12..=21).contains(&self.max_credits_per_term) {
            return Err(format!(
                "max_credits_per_term must be within 12-21, got {}",
                self.max_credits_per_term
            ));
        }
        if self.double_major && self.second_major.as_deref().is_none_or(str::is_empty) {
            return Err("double_major is set but no second major was given".to_string());
        }
        Ok(())
    }
}
