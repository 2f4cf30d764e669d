//! Course model

use serde::{Deserialize, Serialize};

/// Which career track a course is most useful for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relevance {
    /// Primarily useful for graduate-school applicants
    GradSchool,
    /// Primarily useful for industry positions
    Industry,
    /// Useful for both tracks
    Both,
}

/// Represents a course in the catalog
///
/// Carries the historical grade and instructor signals the scorer consumes
/// alongside the prerequisite edges the graph is built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Course code (e.g., "CS 300") - unique within a catalog
    pub code: String,

    /// Course name (e.g., "Programming II")
    pub name: String,

    /// Credit value (positive)
    pub credits: u32,

    /// Prerequisites - stored as course codes (e.g., "CS 200").
    /// May reference codes absent from the catalog; such prerequisites are
    /// unsatisfiable until the catalog defines them.
    #[serde(default)]
    pub prerequisites: Vec<String>,

    /// Historical average grade-point value (0.0-4.0)
    #[serde(default)]
    pub avg_gpa: f64,

    /// Historical top-grade (A) rate (0.0-1.0)
    #[serde(default)]
    pub a_rate: f64,

    /// Instructor name
    #[serde(default)]
    pub instructor: String,

    /// Instructor quality rating (0.0-5.0)
    #[serde(default)]
    pub instructor_rating: f64,

    /// Whether the course sits in the undesirable early-morning slot
    #[serde(default)]
    pub early_morning: bool,

    /// Career-track relevance tag; `None` means untagged
    #[serde(default)]
    pub relevance: Option<Relevance>,

    /// Majors this course counts toward (empty = general elective)
    #[serde(default)]
    pub majors: Vec<String>,
}

impl Course {
    /// Create a new course with only the required attributes
    ///
    /// # Arguments
    /// * `code` - Course code
    /// * `name` - Full course name
    /// * `credits` - Credit value
    #[must_use]
    pub const fn new(code: String, name: String, credits: u32) -> Self {
        Self {
            code,
            name,
            credits,
            prerequisites: Vec::new(),
            avg_gpa: 0.0,
            a_rate: 0.0,
            instructor: String::new(),
            instructor_rating: 0.0,
            early_morning: false,
            relevance: None,
            majors: Vec::new(),
        }
    }

    /// Add a prerequisite by course code
    pub fn add_prerequisite(&mut self, prereq_code: String) {
        if !self.prerequisites.contains(&prereq_code) {
            self.prerequisites.push(prereq_code);
        }
    }

    /// Add a major this course counts toward
    pub fn add_major(&mut self, major: String) {
        if !self.majors.contains(&major) {
            self.majors.push(major);
        }
    }

    /// Check whether the course counts toward a specific major
    #[must_use]
    pub fn counts_toward(&self, major: &str) -> bool {
        self.majors.iter().any(|m| m == major)
    }

    /// Number of the given majors this course counts toward
    #[must_use]
    pub fn majors_matched(&self, majors: &[&str]) -> usize {
        majors.iter().filter(|m| self.counts_toward(m)).count()
    }

    /// Check whether the course counts toward two or more of the given majors
    ///
    /// Overlap courses are the high-value picks for double-major students.
    #[must_use]
    pub fn is_overlap(&self, majors: &[&str]) -> bool {
        self.majors_matched(majors) >= 2
    }
}
