//! Catalog model

use super::Course;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The course catalog for a planning run
///
/// Immutable once loaded; the engine only reads from it and rebuilds its
/// prerequisite graph from it on every run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// Courses indexed by course code
    courses: HashMap<String, Course>,
}

impl Catalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self {
            courses: HashMap::new(),
        }
    }

    /// Build a catalog from a list of courses
    ///
    /// Later duplicates replace earlier ones; codes are unique per catalog.
    #[must_use]
    pub fn from_courses(courses: Vec<Course>) -> Self {
        let mut catalog = Self::new();
        for course in courses {
            catalog.add_course(course);
        }
        catalog
    }

    /// Add a course to the catalog
    ///
    /// # Returns
    /// `true` if the course was added, `false` if it replaced an existing
    /// course with the same code
    pub fn add_course(&mut self, course: Course) -> bool {
        self.courses.insert(course.code.clone(), course).is_none()
    }

    /// Get a course by its code
    #[must_use]
    pub fn get_course(&self, code: &str) -> Option<&Course> {
        self.courses.get(code)
    }

    /// Check whether a code exists in the catalog
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.courses.contains_key(code)
    }

    /// Iterate over all courses
    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.values()
    }

    /// Number of courses in the catalog
    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Check if the catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}
