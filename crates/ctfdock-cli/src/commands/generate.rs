//! Turns parsed arguments into a deployment directory.
//!
//! Responsibility: build a `ScaffoldRequest`, pick the adapters, call the
//! core service, and display results. No business logic lives here.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use ctfdock_adapters::{
    FixedDecision, LocalFilesystem, TerminalPrompt, available_libc_versions, resolve_toolkit_dir,
};
use ctfdock_core::{
    application::{
        ApplicationError, OverwriteDecider, OverwriteDecision, ScaffoldOutcome, ScaffoldService,
    },
    domain::{ARTIFACT_FILES, ScaffoldPlan, ScaffoldRequest},
    error::CtfdockError,
};

use crate::{
    cli::Cli,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute a scaffold run.
///
/// 1. Resolve the toolkit directory (flag/env, config, executable dir)
/// 2. Build the request
/// 3. `--dry-run`: validate and describe, then stop
/// 4. Otherwise run the pipeline with a prompt (or `--yes`)
/// 5. Report the result
#[instrument(skip_all, fields(task_dir = %cli.task_dir.display()))]
pub fn execute(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let request = build_request(&cli, &config);
    debug!(toolkit = %request.toolkit_dir.display(), patchelf = request.patchelf, "Request built");

    let service = ScaffoldService::new(Box::new(LocalFilesystem::new()));

    if cli.dry_run {
        let plan = service
            .validate(&request)
            .map_err(|e| explain(e, &request))?;
        return describe_plan(&plan, &output);
    }

    let mut decider: Box<dyn OverwriteDecider> = if cli.yes {
        Box::new(FixedDecision(OverwriteDecision::Overwrite))
    } else {
        Box::new(TerminalPrompt::stdio())
    };

    let outcome = service
        .run(&request, decider.as_mut())
        .map_err(|e| explain(e, &request))?;

    match outcome {
        ScaffoldOutcome::Completed(report) => {
            info!(output_dir = %report.output_dir.display(), "Deployment generated");
            output.json(&report)?;

            for path in &report.artifacts {
                output.success(&format!("Create {} successfully!", file_label(path)))?;
            }
            output.print("")?;
            output.header(&format!("Deployment ready at {}", report.output_dir.display()))?;
            output.print(&format!("  cd {} && ./build_image.sh", report.output_dir.display()))?;
        }
        ScaffoldOutcome::Declined { output_dir } => {
            info!(output_dir = %output_dir.display(), "Existing output kept");
            output.json(&Declined {
                declined: true,
                output_dir: &output_dir,
            })?;
            output.warning(&format!(
                "Kept {}, nothing was generated",
                output_dir.display()
            ))?;
        }
    }

    Ok(())
}

/// Map CLI arguments and config onto a core request.
pub fn build_request(cli: &Cli, config: &AppConfig) -> ScaffoldRequest {
    let preferred = cli.toolkit_dir.as_deref().or(config.toolkit.dir.as_deref());
    let toolkit_dir = resolve_toolkit_dir(preferred);

    let mut request = ScaffoldRequest::new(
        cli.platform,
        &cli.task_dir,
        &cli.dest_dir,
        toolkit_dir,
    );
    // A libc version without -p is kept so the service can warn about it.
    request.patchelf = cli.patchelf;
    request.libc_version = cli.libc_version.clone();
    request
}

/// Attach toolkit context to a missing libc pair; everything else passes
/// through unchanged.
fn explain(err: CtfdockError, request: &ScaffoldRequest) -> CliError {
    let version = match &err {
        CtfdockError::Application(ApplicationError::LibraryPairNotFound { version, .. }) => {
            version.clone()
        }
        _ => return CliError::Core(err),
    };

    CliError::LibcUnavailable {
        version,
        available: available_libc_versions(&request.toolkit_dir),
        source: err,
    }
}

#[derive(Serialize)]
struct Declined<'a> {
    declined: bool,
    output_dir: &'a Path,
}

#[derive(Serialize)]
struct DryRun {
    dry_run: bool,
    output_dir: PathBuf,
    replaces_existing: bool,
    copies: Vec<PlannedCopy>,
    artifacts: Vec<PathBuf>,
}

#[derive(Serialize)]
struct PlannedCopy {
    from: PathBuf,
    to: PathBuf,
}

fn describe_plan(plan: &ScaffoldPlan, output: &OutputManager) -> CliResult<()> {
    let output_dir = plan.output_dir();
    let report = DryRun {
        dry_run: true,
        output_dir: output_dir.to_path_buf(),
        replaces_existing: output_dir.exists(),
        copies: plan
            .copies()
            .into_iter()
            .map(|(from, to)| PlannedCopy { from, to })
            .collect(),
        artifacts: ARTIFACT_FILES.iter().map(|f| output_dir.join(f)).collect(),
    };

    output.json(&report)?;

    output.header(&format!("Dry run: would create {}", output_dir.display()))?;
    if report.replaces_existing {
        output.warning("It already exists and would be replaced after confirmation")?;
    }
    for copy in &report.copies {
        output.print(&format!(
            "  copy  {} -> {}",
            copy.from.display(),
            relative(&copy.to, output_dir).display()
        ))?;
    }
    for name in ARTIFACT_FILES {
        output.print(&format!("  write {name}"))?;
    }

    Ok(())
}

fn relative<'a>(path: &'a Path, base: &Path) -> &'a Path {
    path.strip_prefix(base).unwrap_or(path)
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
