use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::{
    entities::task_bundle::TaskBundle,
    value_objects::{LibcVersion, UbuntuVersion},
};

/// File name of the patch tool inside the toolkit directory and in the
/// generated output.
pub const PATCHELF_FILE: &str = "patchelf";

/// Toolkit sub-directory holding the versioned `libc`/`ld` pairs.
pub const LIBS_DIR: &str = "libs";

/// Output sub-directory the task and flag are staged into.
pub const TASK_DIR: &str = "task";

/// Raw scaffold parameters, as collected by a driving adapter (the CLI).
///
/// Nothing here has been checked against the filesystem yet; validation
/// turns it into a [`ScaffoldPlan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldRequest {
    pub platform: UbuntuVersion,
    pub task_dir: PathBuf,
    pub dest_dir: PathBuf,
    pub patchelf: bool,
    pub libc_version: Option<String>,
    /// Directory holding `patchelf` and `libs/`.
    pub toolkit_dir: PathBuf,
}

impl ScaffoldRequest {
    pub fn new(
        platform: UbuntuVersion,
        task_dir: impl Into<PathBuf>,
        dest_dir: impl Into<PathBuf>,
        toolkit_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            platform,
            task_dir: task_dir.into(),
            dest_dir: dest_dir.into(),
            patchelf: false,
            libc_version: None,
            toolkit_dir: toolkit_dir.into(),
        }
    }

    /// Enable patching against the given libc version.
    pub fn with_patchelf(mut self, libc_version: Option<String>) -> Self {
        self.patchelf = true;
        self.libc_version = libc_version;
        self
    }
}

/// Resolved patch-tool inputs. Only exists once both the tool and the
/// library pair were found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchBundle {
    pub patchelf_path: PathBuf,
    pub libs_dir: PathBuf,
    pub libc_version: LibcVersion,
}

impl PatchBundle {
    pub fn libc_source(&self) -> PathBuf {
        self.libs_dir.join(self.libc_version.libc_file())
    }

    pub fn ld_source(&self) -> PathBuf {
        self.libs_dir.join(self.libc_version.ld_file())
    }
}

/// A validated scaffold. Immutable once built; every later pipeline step
/// only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaffoldPlan {
    platform: UbuntuVersion,
    task_dir: PathBuf,
    pub(crate) output_dir: PathBuf,
    bundle: TaskBundle,
    patch: Option<PatchBundle>,
}

impl ScaffoldPlan {
    /// `output_dir` is derived as `dest_dir/<task name>`.
    pub fn new(
        platform: UbuntuVersion,
        task_dir: impl Into<PathBuf>,
        dest_dir: impl AsRef<Path>,
        bundle: TaskBundle,
        patch: Option<PatchBundle>,
    ) -> Self {
        let output_dir = dest_dir.as_ref().join(bundle.task_name());
        Self {
            platform,
            task_dir: task_dir.into(),
            output_dir,
            bundle,
            patch,
        }
    }

    pub fn platform(&self) -> UbuntuVersion {
        self.platform
    }

    pub fn task_dir(&self) -> &Path {
        &self.task_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn bundle(&self) -> &TaskBundle {
        &self.bundle
    }

    pub fn task_name(&self) -> &str {
        self.bundle.task_name()
    }

    pub fn flag_name(&self) -> &str {
        self.bundle.flag_name()
    }

    pub fn patch(&self) -> Option<&PatchBundle> {
        self.patch.as_ref()
    }

    pub fn uses_patchelf(&self) -> bool {
        self.patch.is_some()
    }

    /// Every `(source, destination)` copy the stager performs, in order.
    pub fn copies(&self) -> Vec<(PathBuf, PathBuf)> {
        let task_out = self.output_dir.join(TASK_DIR);
        let mut copies = vec![
            (
                self.task_dir.join(self.task_name()),
                task_out.join(self.task_name()),
            ),
            (
                self.task_dir.join(self.flag_name()),
                task_out.join(self.flag_name()),
            ),
        ];

        if let Some(patch) = &self.patch {
            let libs_out = self.output_dir.join(LIBS_DIR);
            copies.push((
                patch.patchelf_path.clone(),
                self.output_dir.join(PATCHELF_FILE),
            ));
            copies.push((
                patch.libc_source(),
                libs_out.join(patch.libc_version.libc_file()),
            ));
            copies.push((
                patch.ld_source(),
                libs_out.join(patch.libc_version.ld_file()),
            ));
        }

        copies
    }
}
