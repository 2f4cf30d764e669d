//! Major requirement tables and feasibility checks
//!
//! Requirement tables are injected configuration: they deserialize from TOML
//! so new majors can be added without code changes. Built-in defaults are
//! compiled into the binary the same way the CLI config defaults are.

use crate::core::models::Catalog;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Built-in requirement tables used when no majors file is configured.
const DEFAULT_MAJORS: &str = include_str!("../assets/default_majors.toml");

/// Number of terms available for feasibility capacity
const FEASIBILITY_TERMS: u32 = 8;

/// Mapping from major id to its ordered list of required course codes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MajorRequirements {
    /// Major id -> required course codes
    majors: HashMap<String, Vec<String>>,
}

/// Result of merging two majors' requirements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedRequirements {
    /// Union of both requirement lists, first-seen order, duplicates removed
    pub required: Vec<String>,
    /// Courses whose catalog major membership contains both majors, sorted
    pub overlap: Vec<String>,
}

/// Result of the coarse credit-capacity feasibility check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feasibility {
    /// Credit sum of the required courses found in the catalog
    pub required_credits: u32,
    /// Total credit capacity over the 8-term plan
    pub capacity: u32,
}

impl Feasibility {
    /// Whether the required credits fit the capacity (equality is feasible)
    #[must_use]
    pub const fn is_feasible(self) -> bool {
        self.required_credits <= self.capacity
    }
}

impl MajorRequirements {
    /// Parse requirement tables from a TOML string
    ///
    /// # Errors
    /// Returns an error if the TOML cannot be parsed or doesn't match the
    /// `[majors]` table schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load the built-in requirement tables
    ///
    /// # Panics
    /// Panics if the embedded tables are invalid TOML; they are compiled into
    /// the binary, so this should never happen in practice.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(DEFAULT_MAJORS).expect("Failed to parse compiled-in major tables")
    }

    /// Required course codes for a major
    ///
    /// An unknown major id yields an empty list: a configuration gap, not a
    /// fault.
    #[must_use]
    pub fn required_for(&self, major: &str) -> &[String] {
        self.majors.get(major).map_or(&[], Vec::as_slice)
    }

    /// All major ids with a requirement table, sorted
    #[must_use]
    pub fn known_majors(&self) -> Vec<&str> {
        let mut majors: Vec<&str> = self.majors.keys().map(String::as_str).collect();
        majors.sort_unstable();
        majors
    }

    /// Merge the requirements of two majors
    ///
    /// The union keeps first-seen order (major1's list first) with duplicates
    /// removed. The overlap set holds every catalog course counting toward
    /// both majors, sorted by code.
    #[must_use]
    pub fn merge(&self, major1: &str, major2: &str, catalog: &Catalog) -> MergedRequirements {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut required = Vec::new();

        for code in self
            .required_for(major1)
            .iter()
            .chain(self.required_for(major2))
        {
            if seen.insert(code.as_str()) {
                required.push(code.clone());
            }
        }

        let mut overlap: Vec<String> = catalog
            .courses()
            .filter(|c| c.counts_toward(major1) && c.counts_toward(major2))
            .map(|c| c.code.clone())
            .collect();
        overlap.sort();

        MergedRequirements { required, overlap }
    }

    /// Credit sum of the required courses that exist in the catalog
    ///
    /// Codes missing from the catalog contribute zero; the gap is reported by
    /// the caller, not here.
    #[must_use]
    pub fn required_credits(required: &[String], catalog: &Catalog) -> u32 {
        required
            .iter()
            .filter_map(|code| catalog.get_course(code))
            .map(|c| c.credits)
            .sum()
    }

    /// Coarse capacity check: do the required credits fit in 8 terms?
    #[must_use]
    pub fn feasibility(
        required: &[String],
        catalog: &Catalog,
        max_credits_per_term: u32,
    ) -> Feasibility {
        Feasibility {
            required_credits: Self::required_credits(required, catalog),
            capacity: max_credits_per_term * FEASIBILITY_TERMS,
        }
    }
}

impl Default for MajorRequirements {
    fn default() -> Self {
        Self::from_defaults()
    }
}
