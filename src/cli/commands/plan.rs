//! Plan command handler

use std::path::{Path, PathBuf};
use uw_planner::config::Config;
use uw_planner::core::loader;
use uw_planner::core::planner::Planner;
use uw_planner::core::report::{render_summary, MarkdownReporter};
use uw_planner::core::requirements::MajorRequirements;
use uw_planner::{error, info};

/// Options collected from the `plan` subcommand
pub struct PlanOptions {
    /// Path to the catalog TOML file
    pub catalog: PathBuf,
    /// Path to the student profile TOML file
    pub profile: PathBuf,
    /// Optional majors file overriding the built-in tables
    pub majors: Option<PathBuf>,
    /// Optional report format ("markdown")
    pub report: Option<String>,
    /// Optional report output path
    pub output: Option<PathBuf>,
    /// Optional override of the profile's credit cap
    pub max_credits: Option<u32>,
    /// Skip the difficulty balancing pass
    pub no_balance: bool,
}

/// Run the plan command
pub fn run(options: &PlanOptions, config: &Config) {
    if let Err(err) = plan_single(options, config) {
        error!("Planning failed for {}: {err}", options.catalog.display());
        eprintln!("✗ {err}");
        std::process::exit(1);
    }
}

fn plan_single(options: &PlanOptions, config: &Config) -> Result<(), String> {
    let catalog = loader::load_catalog(&options.catalog).map_err(|e| e.to_string())?;
    info!(
        "Catalog loaded: {} ({} courses)",
        options.catalog.display(),
        catalog.len()
    );

    let mut profile = loader::load_profile(&options.profile).map_err(|e| e.to_string())?;

    if let Some(max_credits) = options.max_credits {
        profile.max_credits_per_term = max_credits;
        profile
            .validate()
            .map_err(|e| format!("invalid --max-credits override: {e}"))?;
    }
    if options.no_balance {
        profile.balance_difficulty = false;
    }

    let requirements = load_requirements(options, config)?;

    let planner = Planner::new(&catalog, &requirements);
    let outcome = planner.generate_plan(&profile);

    print!("{}", render_summary(&outcome));

    if let Some(format) = options.report.as_deref() {
        let report_path = write_report(format, &outcome, &profile, options, config)?;
        println!("✓ Report generated: {}", report_path.display());
    }

    Ok(())
}

/// Resolve requirement tables: CLI flag, then config, then built-ins
fn load_requirements(options: &PlanOptions, config: &Config) -> Result<MajorRequirements, String> {
    if let Some(path) = &options.majors {
        return loader::load_majors(path).map_err(|e| e.to_string());
    }

    if !config.paths.majors_file.is_empty() {
        return loader::load_majors(Path::new(&config.paths.majors_file))
            .map_err(|e| e.to_string());
    }

    Ok(MajorRequirements::from_defaults())
}

fn write_report(
    format: &str,
    outcome: &uw_planner::core::planner::PlanOutcome,
    profile: &uw_planner::core::models::StudentProfile,
    options: &PlanOptions,
    config: &Config,
) -> Result<PathBuf, String> {
    if !format.eq_ignore_ascii_case("markdown") && !format.eq_ignore_ascii_case("md") {
        return Err(format!("unsupported report format: '{format}'"));
    }

    let rendered = MarkdownReporter::new().render(outcome, profile);

    let report_path = match &options.output {
        Some(path) => path.clone(),
        None => {
            let reports_dir = PathBuf::from(&config.paths.reports_dir);
            std::fs::create_dir_all(&reports_dir).map_err(|e| {
                format!(
                    "cannot create reports directory {}: {e}",
                    reports_dir.display()
                )
            })?;

            let stem = options
                .profile
                .file_stem()
                .map_or_else(|| "plan".to_string(), |s| s.to_string_lossy().to_string());
            reports_dir.join(format!("{stem}_plan.md"))
        }
    };

    std::fs::write(&report_path, rendered)
        .map_err(|e| format!("cannot write report {}: {e}", report_path.display()))?;

    Ok(report_path)
}
