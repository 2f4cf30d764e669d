//! Term model

use super::Course;
use serde::{Deserialize, Serialize};

/// Half-year session within an academic year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Session {
    /// First session of the year
    Fall,
    /// Second session of the year
    Spring,
}

impl std::fmt::Display for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fall => write!(f, "Fall"),
            Self::Spring => write!(f, "Spring"),
        }
    }
}

/// One of the 8 scheduling slots in a 4-year plan
///
/// Year and session are labels only. Course order is the order the allocator
/// placed them, kept for display. Total credits and expected GPA are derived
/// and recomputed on every add/remove.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Term {
    /// Year number (1-4)
    pub year: u8,
    /// Session within the year
    pub session: Session,
    /// Courses assigned to this term, in allocation order
    courses: Vec<Course>,
    /// Total credits of the assigned courses
    total_credits: u32,
    /// Mean historical grade-point value of the assigned courses (0.0 when empty)
    expected_gpa: f64,
}

impl Term {
    /// Create a new empty term
    #[must_use]
    pub const fn new(year: u8, session: Session) -> Self {
        Self {
            year,
            session,
            courses: Vec::new(),
            total_credits: 0,
            expected_gpa: 0.0,
        }
    }

    /// Add a course to this term, updating the derived statistics
    pub fn add_course(&mut self, course: Course) {
        self.total_credits += course.credits;
        self.courses.push(course);
        self.recalculate_gpa();
    }

    /// Remove a course by code, updating the derived statistics
    ///
    /// # Returns
    /// The removed course, or `None` if the code was not in this term
    pub fn remove_course(&mut self, code: &str) -> Option<Course> {
        let pos = self.courses.iter().position(|c| c.code == code)?;
        let removed = self.courses.remove(pos);
        self.total_credits -= removed.credits;
        self.recalculate_gpa();
        Some(removed)
    }

    #[allow(clippy::cast_precision_loss)]
    fn recalculate_gpa(&mut self) {
        if self.courses.is_empty() {
            self.expected_gpa = 0.0;
            return;
        }
        let total: f64 = self.courses.iter().map(|c| c.avg_gpa).sum();
        self.expected_gpa = total / self.courses.len() as f64;
    }

    /// Courses assigned to this term
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Total credits of the assigned courses
    #[must_use]
    pub const fn total_credits(&self) -> u32 {
        self.total_credits
    }

    /// Mean historical grade-point value of the assigned courses
    #[must_use]
    pub const fn expected_gpa(&self) -> f64 {
        self.expected_gpa
    }

    /// Number of courses in this term
    #[must_use]
    pub const fn course_count(&self) -> usize {
        self.courses.len()
    }

    /// Check if the term has no courses
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Check if the term contains a course code
    #[must_use]
    pub fn has_course(&self, code: &str) -> bool {
        self.courses.iter().any(|c| c.code == code)
    }

    /// Codes of all courses in this term, in allocation order
    #[must_use]
    pub fn course_codes(&self) -> Vec<String> {
        self.courses.iter().map(|c| c.code.clone()).collect()
    }

    /// Display label (e.g., "Year 1 - Fall")
    #[must_use]
    pub fn label(&self) -> String {
        format!("Year {} - {}", self.year, self.session)
    }
}
