//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the entire workflow as an explicit pipeline:
//! 1. Validate the request against the filesystem → [`ScaffoldPlan`]
//! 2. Stage task + flag (and patchelf + libs) into the output directory
//! 3. Render the five artifacts and write them
//!
//! Each step returns a `Result`; nothing here terminates the process.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, OverwriteDecider, OverwriteDecision},
    },
    domain::{
        DomainError, LIBS_DIR, LibcVersion, PATCHELF_FILE, PatchBundle, ScaffoldPlan,
        ScaffoldRequest, TaskBundle, UbuntuVersion, render_all,
    },
    error::CtfdockResult,
};

/// Result of the staging step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    /// Output directory is fresh and holds the copied files.
    Staged { copied: Vec<PathBuf> },
    /// The user kept the existing output directory; nothing was touched.
    Declined,
}

/// Result of a full run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaffoldOutcome {
    Completed(ScaffoldReport),
    Declined { output_dir: PathBuf },
}

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaffoldReport {
    pub platform: UbuntuVersion,
    pub task_name: String,
    pub flag_name: String,
    pub output_dir: PathBuf,
    pub patchelf: bool,
    pub staged: Vec<PathBuf>,
    pub artifacts: Vec<PathBuf>,
}

/// Main scaffolding service.
pub struct ScaffoldService {
    filesystem: Box<dyn Filesystem>,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given filesystem adapter.
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Run the whole pipeline: validate, stage, render.
    ///
    /// Returns [`ScaffoldOutcome::Declined`] (not an error) when the output
    /// directory exists and the decider keeps it.
    #[instrument(
        skip_all,
        fields(
            platform = %request.platform,
            task_dir = %request.task_dir.display(),
            dest_dir = %request.dest_dir.display()
        )
    )]
    pub fn run(
        &self,
        request: &ScaffoldRequest,
        decider: &mut dyn OverwriteDecider,
    ) -> CtfdockResult<ScaffoldOutcome> {
        let plan = self.validate(request)?;

        let staged = match self.stage(&plan, decider)? {
            StageOutcome::Staged { copied } => copied,
            StageOutcome::Declined => {
                return Ok(ScaffoldOutcome::Declined {
                    output_dir: plan.output_dir().to_path_buf(),
                });
            }
        };

        let artifacts = self.write_artifacts(&plan)?;

        info!(output_dir = %plan.output_dir().display(), "Scaffold completed successfully");
        Ok(ScaffoldOutcome::Completed(ScaffoldReport {
            platform: plan.platform(),
            task_name: plan.task_name().to_owned(),
            flag_name: plan.flag_name().to_owned(),
            output_dir: plan.output_dir().to_path_buf(),
            patchelf: plan.uses_patchelf(),
            staged,
            artifacts,
        }))
    }

    /// Check the request against the filesystem without mutating it.
    #[instrument(skip_all)]
    pub fn validate(&self, request: &ScaffoldRequest) -> CtfdockResult<ScaffoldPlan> {
        info!(
            ubuntu = %request.platform,
            task_dir = %request.task_dir.display(),
            dest_dir = %request.dest_dir.display(),
            patchelf = request.patchelf,
            "Get args"
        );

        if !self.filesystem.is_dir(&request.task_dir) {
            return Err(ApplicationError::TaskDirNotFound {
                path: request.task_dir.clone(),
            }
            .into());
        }
        if !self.filesystem.is_dir(&request.dest_dir) {
            return Err(ApplicationError::DestDirNotFound {
                path: request.dest_dir.clone(),
            }
            .into());
        }

        let names = self.filesystem.list_files(&request.task_dir)?;
        debug!(files = ?names, "Task directory listed");
        let bundle = TaskBundle::discover(&names)?;

        let task_dir = self.filesystem.canonicalize(&request.task_dir)?;
        let output_dir = self
            .filesystem
            .canonicalize(&request.dest_dir)?
            .join(bundle.task_name());
        if task_dir.starts_with(&output_dir) {
            return Err(ApplicationError::OutputOverlapsTaskDir {
                output_dir,
                task_dir,
            }
            .into());
        }

        let patch = if request.patchelf {
            Some(self.resolve_patch(request)?)
        } else {
            if let Some(version) = &request.libc_version {
                warn!(libc_version = %version, "libc version given without patchelf, ignoring");
            }
            None
        };

        let plan = ScaffoldPlan::new(
            request.platform,
            request.task_dir.clone(),
            &request.dest_dir,
            bundle,
            patch,
        );

        info!(
            task = plan.task_name(),
            flag = plan.flag_name(),
            "Parse args successfully"
        );
        Ok(plan)
    }

    /// Make `plan.output_dir()` fresh and copy the inputs into it.
    #[instrument(skip_all, fields(output_dir = %plan.output_dir().display()))]
    pub fn stage(
        &self,
        plan: &ScaffoldPlan,
        decider: &mut dyn OverwriteDecider,
    ) -> CtfdockResult<StageOutcome> {
        let output_dir = plan.output_dir();

        if self.filesystem.exists(output_dir) {
            warn!("Output directory already exists");
            match decider.decide(output_dir)? {
                OverwriteDecision::Overwrite => {
                    self.filesystem.remove_dir_all(output_dir)?;
                    info!("Removed existing output directory");
                }
                OverwriteDecision::Keep => {
                    info!("Stop to generate these docker image files");
                    return Ok(StageOutcome::Declined);
                }
            }
        }

        self.filesystem.create_dir_all(output_dir)?;

        let mut copied = Vec::new();
        for (from, to) in plan.copies() {
            if let Some(parent) = to.parent() {
                self.filesystem.create_dir_all(parent)?;
            }
            self.filesystem.copy_file(&from, &to)?;
            debug!(from = %from.display(), to = %to.display(), "Copied");
            copied.push(to);
        }

        info!(files = copied.len(), "Make dir of docker and move files successfully");
        Ok(StageOutcome::Staged { copied })
    }

    /// Render the five artifacts into `plan.output_dir()`.
    #[instrument(skip_all)]
    pub fn write_artifacts(&self, plan: &ScaffoldPlan) -> CtfdockResult<Vec<PathBuf>> {
        let mut written = Vec::new();

        for artifact in render_all(plan) {
            let path = artifact.path_in(plan.output_dir());
            self.filesystem.write_file(&path, &artifact.content)?;
            if artifact.executable {
                self.filesystem.set_permissions(&path, true)?;
            }
            info!("Create {} successfully!", artifact.file_name);
            written.push(path);
        }

        Ok(written)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Locate patchelf and the `libc`/`ld` pair in the toolkit directory.
    fn resolve_patch(&self, request: &ScaffoldRequest) -> CtfdockResult<PatchBundle> {
        let raw = request
            .libc_version
            .as_deref()
            .ok_or(DomainError::MissingRequiredField {
                field: "libc_version",
            })?;
        let libc_version = LibcVersion::parse(raw)?;

        let patchelf_path = request.toolkit_dir.join(PATCHELF_FILE);
        if !self.filesystem.is_file(&patchelf_path) {
            return Err(ApplicationError::PatchToolNotFound {
                dir: request.toolkit_dir.clone(),
            }
            .into());
        }

        let libs_dir = request.toolkit_dir.join(LIBS_DIR);
        let found = [libc_version.libc_file(), libc_version.ld_file()]
            .iter()
            .filter(|name| self.filesystem.is_file(&libs_dir.join(name)))
            .count();
        if found != 2 {
            return Err(ApplicationError::LibraryPairNotFound {
                version: libc_version.to_string(),
                dir: libs_dir,
            }
            .into());
        }

        debug!(libs_dir = %libs_dir.display(), version = %libc_version, "Patch inputs found");
        Ok(PatchBundle {
            patchelf_path,
            libs_dir,
            libc_version,
        })
    }
}
