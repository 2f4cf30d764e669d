//! Prerequisite graph for eligibility queries

use super::{Catalog, Course};
use std::collections::{HashMap, HashSet};

/// Adjacency view of the catalog's prerequisite edges
///
/// Maps each course code to its prerequisite list and to its full course
/// record. Rebuilt fresh from the catalog at the start of every planning run;
/// nothing here outlives a run.
///
/// Queries against a code absent from the map are treated as "no
/// prerequisites". A prerequisite code absent from the catalog can still
/// appear in an edge list; it simply never becomes satisfiable until a course
/// with that code is registered.
#[derive(Debug, Clone, Default)]
pub struct PrerequisiteGraph {
    /// Maps course code -> list of prerequisite codes
    prereqs: HashMap<String, Vec<String>>,

    /// Maps course code -> course record
    courses: HashMap<String, Course>,
}

impl PrerequisiteGraph {
    /// Create a new empty graph
    #[must_use]
    pub fn new() -> Self {
        Self {
            prereqs: HashMap::new(),
            courses: HashMap::new(),
        }
    }

    /// Build a graph from a catalog
    #[must_use]
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut graph = Self::new();
        graph.add_courses(catalog);
        graph
    }

    /// Register a single course and its prerequisite edges
    ///
    /// Registration never fails, even for edges that form a cycle; cycles are
    /// surfaced later by [`Self::has_cycle`].
    pub fn add_course(&mut self, course: &Course) {
        self.prereqs
            .insert(course.code.clone(), course.prerequisites.clone());
        self.courses.insert(course.code.clone(), course.clone());
    }

    /// Register every course in the catalog
    pub fn add_courses(&mut self, catalog: &Catalog) {
        for course in catalog.courses() {
            self.add_course(course);
        }
    }

    /// Get a registered course record
    #[must_use]
    pub fn get_course(&self, code: &str) -> Option<&Course> {
        self.courses.get(code)
    }

    /// Number of registered courses
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    /// Detect whether the prerequisite edges contain a cycle
    ///
    /// Three-color depth-first traversal: unvisited (white), on the current
    /// path (gray), fully explored (black). Returns `true` on the first edge
    /// back into a gray node. Advisory only - planning proceeds on cyclic
    /// input and the unsatisfiable courses surface as unscheduled
    /// requirements.
    #[must_use]
    pub fn has_cycle(&self) -> bool {
        let mut visiting: HashSet<&str> = HashSet::new();
        let mut visited: HashSet<&str> = HashSet::new();

        for code in self.prereqs.keys() {
            if self.dfs_has_cycle(code, &mut visiting, &mut visited) {
                return true;
            }
        }

        false
    }

    fn dfs_has_cycle<'a>(
        &'a self,
        node: &'a str,
        visiting: &mut HashSet<&'a str>,
        visited: &mut HashSet<&'a str>,
    ) -> bool {
        if visited.contains(node) {
            return false;
        }
        if visiting.contains(node) {
            return true; // back-edge into the current path
        }

        visiting.insert(node);

        if let Some(prereqs) = self.prereqs.get(node) {
            for prereq in prereqs {
                if self.dfs_has_cycle(prereq, visiting, visited) {
                    return true;
                }
            }
        }

        visiting.remove(node);
        visited.insert(node);

        false
    }

    /// Check whether every prerequisite of `code` is in `completed`
    ///
    /// An empty (or unregistered) prerequisite list is vacuously satisfied.
    #[must_use]
    pub fn can_take(&self, code: &str, completed: &HashSet<String>) -> bool {
        self.prereqs
            .get(code)
            .is_none_or(|prereqs| prereqs.iter().all(|p| completed.contains(p)))
    }

    /// The eligibility frontier: every member of `remaining` whose
    /// prerequisites are satisfied by `completed`
    ///
    /// Returned sorted by course code so allocation is deterministic across
    /// runs regardless of set iteration order.
    #[must_use]
    pub fn available_courses(
        &self,
        completed: &HashSet<String>,
        remaining: &HashSet<String>,
    ) -> Vec<String> {
        let mut available: Vec<String> = remaining
            .iter()
            .filter(|code| self.can_take(code, completed))
            .cloned()
            .collect();
        available.sort();
        available
    }
}

impl std::fmt::Display for PrerequisiteGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Prerequisite graph ({} courses):", self.courses.len())?;

        let mut codes: Vec<&String> = self.prereqs.keys().collect();
        codes.sort();

        for code in codes {
            match self.prereqs.get(code) {
                Some(prereqs) if !prereqs.is_empty() => {
                    writeln!(f, "  {code} <- {}", prereqs.join(", "))?;
                }
                _ => writeln!(f, "  {code} <- (none)")?,
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(code: &str, prereqs: &[&str]) -> Course {
        let mut c = Course::new(code.to_string(), format!("{code} name"), 3);
        for p in prereqs {
            c.add_prerequisite((*p).to_string());
        }
        c
    }

    fn graph_of(courses: &[Course]) -> PrerequisiteGraph {
        let mut graph = PrerequisiteGraph::new();
        for c in courses {
            graph.add_course(c);
        }
        graph
    }

    fn set(codes: &[&str]) -> HashSet<String> {
        codes.iter().map(|c| (*c).to_string()).collect()
    }

    #[test]
    fn test_can_take_no_prereqs() {
        let graph = graph_of(&[course("CS 200", &[])]);
        assert!(graph.can_take("CS 200", &set(&[])));
    }

    #[test]
    fn test_can_take_unknown_code_is_permissive() {
        let graph = graph_of(&[]);
        assert!(graph.can_take("CS 999", &set(&[])));
    }

    #[test]
    fn test_can_take_requires_all_prereqs() {
        let graph = graph_of(&[course("CS 400", &["CS 300", "MATH 222"])]);

        assert!(!graph.can_take("CS 400", &set(&[])));
        assert!(!graph.can_take("CS 400", &set(&["CS 300"])));
        assert!(graph.can_take("CS 400", &set(&["CS 300", "MATH 222"])));
    }

    #[test]
    fn test_missing_prereq_course_never_satisfiable() {
        // GHOST 101 is referenced but never registered
        let graph = graph_of(&[course("CS 300", &["GHOST 101"])]);
        assert!(!graph.can_take("CS 300", &set(&["CS 200"])));
        assert!(graph.can_take("CS 300", &set(&["GHOST 101"])));
    }

    #[test]
    fn test_available_courses_frontier() {
        let graph = graph_of(&[
            course("CS 200", &[]),
            course("CS 300", &["CS 200"]),
            course("CS 400", &["CS 300"]),
        ]);

        let remaining = set(&["CS 200", "CS 300", "CS 400"]);

        let available = graph.available_courses(&set(&[]), &remaining);
        assert_eq!(available, vec!["CS 200"]);

        let available = graph.available_courses(&set(&["CS 200"]), &remaining);
        assert_eq!(available, vec!["CS 300"]);
    }

    #[test]
    fn test_frontier_is_sorted() {
        let graph = graph_of(&[
            course("MATH 221", &[]),
            course("CS 200", &[]),
            course("ECE 203", &[]),
        ]);

        let remaining = set(&["MATH 221", "CS 200", "ECE 203"]);
        let available = graph.available_courses(&set(&[]), &remaining);
        assert_eq!(available, vec!["CS 200", "ECE 203", "MATH 221"]);
    }

    #[test]
    fn test_frontier_only_returns_satisfied() {
        let graph = graph_of(&[course("CS 300", &["CS 200"]), course("CS 354", &["CS 300"])]);

        let completed = set(&["CS 200"]);
        let remaining = set(&["CS 300", "CS 354"]);

        for code in graph.available_courses(&completed, &remaining) {
            assert!(graph.can_take(&code, &completed));
        }
    }

    #[test]
    fn test_acyclic_graph_has_no_cycle() {
        let graph = graph_of(&[
            course("CS 200", &[]),
            course("CS 300", &["CS 200"]),
            course("CS 400", &["CS 300"]),
        ]);
        assert!(!graph.has_cycle());
    }

    #[test]
    fn test_direct_cycle_detected() {
        let graph = graph_of(&[course("A 100", &["B 100"]), course("B 100", &["A 100"])]);
        assert!(graph.has_cycle());
    }

    #[test]
    fn test_longer_cycle_detected() {
        let graph = graph_of(&[
            course("A 100", &["C 100"]),
            course("B 100", &["A 100"]),
            course("C 100", &["B 100"]),
            course("D 100", &[]),
        ]);
        assert!(graph.has_cycle());
    }

    #[test]
    fn test_shared_prereq_is_not_a_cycle() {
        // Diamond: both B and C require A; D requires B and C
        let graph = graph_of(&[
            course("A 100", &[]),
            course("B 100", &["A 100"]),
            course("C 100", &["A 100"]),
            course("D 100", &["B 100", "C 100"]),
        ]);
        assert!(!graph.has_cycle());
    }

    #[test]
    fn test_display_lists_edges() {
        let graph = graph_of(&[course("CS 300", &["CS 200"]), course("CS 200", &[])]);
        let rendered = format!("{graph}");
        assert!(rendered.contains("CS 300 <- CS 200"));
        assert!(rendered.contains("CS 200 <- (none)"));
    }
}
