//! TOML loaders for catalogs, profiles, and requirement tables
//!
//! These implement the catalog-provider and preferences-source boundaries.
//! Profile validation happens here, before anything reaches the engine; the
//! engine itself never touches the filesystem.

use crate::core::models::{Catalog, Course, StudentProfile};
use crate::core::requirements::MajorRequirements;
use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

/// On-disk catalog layout: optional display name plus a course array
#[derive(Debug, Deserialize)]
struct CatalogFile {
    /// Catalog display name (unused by the engine, kept for tooling)
    #[serde(default)]
    #[allow(dead_code)]
    name: String,
    /// All courses in the catalog
    #[serde(default)]
    courses: Vec<Course>,
}

/// Load a course catalog from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read, the TOML cannot be parsed,
/// or a course carries a zero credit value.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog, Box<dyn Error>> {
    let content = fs::read_to_string(&path)
        .map_err(|e| format!("cannot read catalog {}: {e}", path.as_ref().display()))?;
    let file: CatalogFile = toml::from_str(&content)
        .map_err(|e| format!("cannot parse catalog {}: {e}", path.as_ref().display()))?;

    for course in &file.courses {
        if course.credits == 0 {
            return Err(format!("course {} has zero credits", course.code).into());
        }
    }

    Ok(Catalog::from_courses(file.courses))
}

/// Load and validate a student profile from a TOML file
///
/// Malformed preferences fail fast here so the engine can assume a valid
/// profile.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed, or if
/// [`StudentProfile::validate`] rejects it.
pub fn load_profile<P: AsRef<Path>>(path: P) -> Result<StudentProfile, Box<dyn Error>> {
    let content = fs::read_to_string(&path)
        .map_err(|e| format!("cannot read profile {}: {e}", path.as_ref().display()))?;
    let profile: StudentProfile = toml::from_str(&content)
        .map_err(|e| format!("cannot parse profile {}: {e}", path.as_ref().display()))?;

    profile
        .validate()
        .map_err(|e| format!("invalid profile {}: {e}", path.as_ref().display()))?;

    Ok(profile)
}

/// Load major requirement tables from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn load_majors<P: AsRef<Path>>(path: P) -> Result<MajorRequirements, Box<dyn Error>> {
    let content = fs::read_to_string(&path)
        .map_err(|e| format!("cannot read majors file {}: {e}", path.as_ref().display()))?;
    let tables = MajorRequirements::from_toml(&content)
        .map_err(|e| format!("cannot parse majors file {}: {e}", path.as_ref().display()))?;
    Ok(tables)
}
