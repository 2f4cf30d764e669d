//! Course scoring, grade prediction, and difficulty estimation
//!
//! Pure functions over course records and the student profile. The scorer
//! ranks candidates for the allocator; `meets_preferences` is the hard filter
//! that removes a course from consideration entirely, regardless of score.

use crate::core::models::{Course, Relevance, StudentProfile};

/// Weight of the instructor-quality component
pub const WEIGHT_INSTRUCTOR: f64 = 0.25;
/// Weight of the historical-ease (top-grade rate) component
pub const WEIGHT_A_RATE: f64 = 0.30;
/// Weight of the career-relevance component
pub const WEIGHT_RELEVANCE: f64 = 0.25;
/// Weight of the time-preference component
pub const WEIGHT_TIME: f64 = 0.20;

/// GPA goal at and above which risky courses are filtered out
const HIGH_GPA_GOAL: f64 = 3.7;
/// Top-grade rate below which a course is too risky for a high-GPA goal
const RISKY_A_RATE: f64 = 0.4;
/// Top-grade rate above which the grade prediction turns optimistic
const OPTIMISTIC_A_RATE: f64 = 0.7;

/// Composite desirability score for a course (0-100, higher is better)
///
/// Weighted sum of four independently bounded 0-100 sub-scores: instructor
/// quality, historical top-grade rate, career relevance, and time
/// preference. The weights sum to 1.0.
#[must_use]
pub fn score(course: &Course, profile: &StudentProfile) -> f64 {
    let instructor_score = (course.instructor_rating / 5.0) * 100.0;
    let a_rate_score = course.a_rate * 100.0;

    instructor_score * WEIGHT_INSTRUCTOR
        + a_rate_score * WEIGHT_A_RATE
        + relevance_score(course, profile) * WEIGHT_RELEVANCE
        + time_preference_score(course, profile) * WEIGHT_TIME
}

/// Predicted grade-point value for the student in this course (0.0-4.0)
///
/// Exactly one branch applies, in priority order: a GPA-prioritizing student
/// gets a conservative estimate, a course with a high top-grade rate gets an
/// optimistic one capped at 4.0, anything else the historical average.
#[must_use]
pub fn predict_grade(course: &Course, profile: &StudentProfile) -> f64 {
    let base = course.avg_gpa;

    if profile.prioritize_gpa {
        return base * 0.9;
    }

    if course.a_rate > OPTIMISTIC_A_RATE {
        return (base * 1.05).min(4.0);
    }

    base
}

/// Difficulty estimate for a course (0-100, higher is harder)
///
/// 70% inferred from the top-grade rate, 30% from the instructor rating.
/// Independent of student preferences.
#[must_use]
pub fn difficulty(course: &Course) -> f64 {
    let from_grades = (1.0 - course.a_rate) * 100.0;
    let from_instructor = ((5.0 - course.instructor_rating) / 5.0) * 100.0;

    from_grades * 0.7 + from_instructor * 0.3
}

/// Hard eligibility filter applied before scoring
///
/// Returns `false` when the student avoids the early-morning slot and the
/// course occupies it, or when a high GPA goal (>= 3.7) meets a top-grade
/// rate below 0.4. A course failing this filter is dropped for the term.
#[must_use]
pub fn meets_preferences(course: &Course, profile: &StudentProfile) -> bool {
    if profile.avoid_early_morning && course.early_morning {
        return false;
    }

    if profile.gpa_goal >= HIGH_GPA_GOAL && course.a_rate < RISKY_A_RATE {
        return false;
    }

    true
}

fn relevance_score(course: &Course, profile: &StudentProfile) -> f64 {
    match course.relevance {
        None => 50.0,
        Some(Relevance::Both) => 80.0,
        Some(tag) if profile.career_goal.matches(tag) => 100.0,
        Some(_) => 30.0,
    }
}

fn time_preference_score(course: &Course, profile: &StudentProfile) -> f64 {
    if profile.avoid_early_morning && course.early_morning {
        0.0
    } else {
        100.0
    }
}
