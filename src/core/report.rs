//! Plan statistics and report rendering
//!
//! Every function here is a pure transformation from a finished plan to
//! structured data or strings; nothing in the engine prints as a side
//! effect. The CLI decides what actually reaches the terminal or disk.

use crate::core::models::{Course, CoursePlan, StudentProfile, Term};
use crate::core::planner::balancer::{average_difficulty, difficulty_variance};
use crate::core::planner::PlanOutcome;
use crate::core::scorer;
use std::fmt::Write as _;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("templates/report.md");

/// Human label for a difficulty value
#[must_use]
pub fn difficulty_level(difficulty: f64) -> &'static str {
    if difficulty < 30.0 {
        "Very Easy"
    } else if difficulty < 45.0 {
        "Easy"
    } else if difficulty < 55.0 {
        "Moderate"
    } else if difficulty < 70.0 {
        "Hard"
    } else {
        "Very Hard"
    }
}

/// Human label for a plan's difficulty variance
#[must_use]
pub fn balance_quality(variance: f64) -> &'static str {
    if variance < 100.0 {
        "Excellent"
    } else if variance < 250.0 {
        "Good"
    } else if variance < 400.0 {
        "Fair"
    } else {
        "Poor"
    }
}

/// Derived statistics for a single term
#[derive(Debug, Clone)]
pub struct TermStatistics {
    /// Display label (e.g., "Year 1 - Fall")
    pub label: String,
    /// Number of courses
    pub course_count: usize,
    /// Total credits
    pub total_credits: u32,
    /// Expected GPA (0.0 when empty)
    pub expected_gpa: f64,
    /// Mean course difficulty (0.0 when empty)
    pub avg_difficulty: f64,
}

impl TermStatistics {
    fn from_term(term: &Term) -> Self {
        Self {
            label: term.label(),
            course_count: term.course_count(),
            total_credits: term.total_credits(),
            expected_gpa: term.expected_gpa(),
            avg_difficulty: average_difficulty(term),
        }
    }
}

/// Derived statistics for a whole plan
#[derive(Debug, Clone)]
pub struct PlanStatistics {
    /// Per-term statistics for non-empty terms, in plan order
    pub terms: Vec<TermStatistics>,
    /// Total credits across the plan
    pub total_credits: u32,
    /// Total scheduled courses
    pub total_courses: usize,
    /// Number of non-empty terms
    pub terms_used: usize,
    /// Mean of non-empty terms' expected GPA (0.0 when nothing scheduled)
    pub mean_gpa: f64,
    /// Population variance of per-term average difficulty
    pub difficulty_variance: f64,
}

impl PlanStatistics {
    /// Compute statistics for a plan
    #[must_use]
    pub fn from_plan(plan: &CoursePlan) -> Self {
        let terms: Vec<TermStatistics> = plan
            .terms()
            .iter()
            .filter(|t| !t.is_empty())
            .map(TermStatistics::from_term)
            .collect();

        let mean_gpa = if terms.is_empty() {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            let n = terms.len() as f64;
            terms.iter().map(|t| t.expected_gpa).sum::<f64>() / n
        };

        Self {
            terms_used: terms.len(),
            total_credits: plan.total_credits(),
            total_courses: plan.course_count(),
            mean_gpa,
            difficulty_variance: difficulty_variance(plan),
            terms,
        }
    }

    /// Quality label for the plan's difficulty balance
    #[must_use]
    pub fn balance_quality(&self) -> &'static str {
        balance_quality(self.difficulty_variance)
    }
}

/// The `n` hardest scheduled courses, hardest first
#[must_use]
pub fn hardest_courses(plan: &CoursePlan, n: usize) -> Vec<&Course> {
    let mut all: Vec<&Course> = plan.terms().iter().flat_map(Term::courses).collect();
    all.sort_by(|a, b| scorer::difficulty(b).total_cmp(&scorer::difficulty(a)));
    all.truncate(n);
    all
}

/// Render a plain-text summary of a plan outcome
///
/// This is what the CLI prints after a run: one line per non-empty term,
/// overall totals, and any warnings.
#[must_use]
pub fn render_summary(outcome: &PlanOutcome) -> String {
    let stats = PlanStatistics::from_plan(&outcome.plan);
    let mut out = String::new();

    for term in outcome.plan.terms() {
        if term.is_empty() {
            continue;
        }
        let _ = writeln!(
            out,
            "{}: {} credits, GPA {:.2}, difficulty {:.1} ({})",
            term.label(),
            term.total_credits(),
            term.expected_gpa(),
            average_difficulty(term),
            difficulty_level(average_difficulty(term)),
        );
        for course in term.courses() {
            let _ = writeln!(
                out,
                "  - {}: {} ({} credits)",
                course.code, course.name, course.credits
            );
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Total: {} credits, {} courses over {} terms",
        stats.total_credits, stats.total_courses, stats.terms_used
    );
    let _ = writeln!(out, "Expected GPA: {:.2}", stats.mean_gpa);
    let _ = writeln!(
        out,
        "Difficulty balance: {} (variance {:.1})",
        stats.balance_quality(),
        stats.difficulty_variance
    );

    if !outcome.warnings.is_empty() {
        let _ = writeln!(out);
        for warning in &outcome.warnings {
            let _ = writeln!(out, "warning: {warning}");
        }
    }

    out
}

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render a full Markdown report via template substitution
    #[must_use]
    pub fn render(&self, outcome: &PlanOutcome, profile: &StudentProfile) -> String {
        let stats = PlanStatistics::from_plan(&outcome.plan);

        let mut output = MARKDOWN_TEMPLATE.to_string();
        output = output.replace("{{majors}}", &profile.all_majors().join(" + "));
        output = output.replace("{{gpa_goal}}", &format!("{:.1}", profile.gpa_goal));
        output = output.replace(
            "{{career_goal}}",
            match profile.career_goal {
                crate::core::models::CareerGoal::GradSchool => "grad school",
                crate::core::models::CareerGoal::Industry => "industry",
            },
        );
        output = output.replace(
            "{{max_credits}}",
            &profile.max_credits_per_term.to_string(),
        );
        output = output.replace("{{total_credits}}", &stats.total_credits.to_string());
        output = output.replace("{{total_courses}}", &stats.total_courses.to_string());
        output = output.replace("{{terms_used}}", &stats.terms_used.to_string());
        output = output.replace("{{mean_gpa}}", &format!("{:.2}", stats.mean_gpa));
        output = output.replace(
            "{{variance}}",
            &format!("{:.1}", stats.difficulty_variance),
        );
        output = output.replace("{{balance_quality}}", stats.balance_quality());
        output = output.replace("{{term_sections}}", &Self::term_sections(outcome));
        output = output.replace("{{hardest_courses}}", &Self::hardest_list(outcome));
        output = output.replace("{{warnings}}", &Self::warning_list(outcome));

        output
    }

    fn term_sections(outcome: &PlanOutcome) -> String {
        let mut out = String::new();

        for term in outcome.plan.terms() {
            if term.is_empty() {
                continue;
            }
            let _ = writeln!(
                out,
                "### {} ({} credits, difficulty {:.1})\n",
                term.label(),
                term.total_credits(),
                average_difficulty(term)
            );
            let _ = writeln!(out, "| Course | Name | Credits | Difficulty |");
            let _ = writeln!(out, "|---|---|---|---|");
            for course in term.courses() {
                let _ = writeln!(
                    out,
                    "| {} | {} | {} | {:.1} |",
                    course.code,
                    course.name,
                    course.credits,
                    scorer::difficulty(course)
                );
            }
            let _ = writeln!(out);
        }

        out
    }

    fn hardest_list(outcome: &PlanOutcome) -> String {
        let top = hardest_courses(&outcome.plan, 3);
        if top.is_empty() {
            return "None scheduled.".to_string();
        }
        let mut out = String::new();
        for (i, course) in top.iter().enumerate() {
            let _ = writeln!(
                out,
                "{}. {}: {} (difficulty {:.1})",
                i + 1,
                course.code,
                course.name,
                scorer::difficulty(course)
            );
        }
        out
    }

    fn warning_list(outcome: &PlanOutcome) -> String {
        if outcome.warnings.is_empty() {
            return "None.".to_string();
        }
        let mut out = String::new();
        for warning in &outcome.warnings {
            let _ = writeln!(out, "- {warning}");
        }
        out
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}
