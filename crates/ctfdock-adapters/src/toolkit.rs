//! Locating the toolkit directory that holds `patchelf` and `libs/`.

use std::path::{Path, PathBuf};

use ctfdock_core::domain::{LIBS_DIR, LibcVersion};
use tracing::debug;

/// Pick the toolkit directory.
///
/// Search order:
/// 1. `preferred` (from `--toolkit-dir`, `$CTFDOCK_TOOLKIT_DIR` or config)
/// 2. the directory holding the running executable
/// 3. `.`
pub fn resolve_toolkit_dir(preferred: Option<&Path>) -> PathBuf {
    if let Some(dir) = preferred {
        debug!(path = %dir.display(), "toolkit dir from arguments/config");
        return dir.to_path_buf();
    }

    if let Some(dir) = exe_dir() {
        debug!(path = %dir.display(), "toolkit dir from executable location");
        return dir;
    }

    debug!("toolkit dir falls back to current directory");
    PathBuf::from(".")
}

/// Directory of the current executable, symlinks resolved. `None` if the
/// platform or test runner can't tell us.
fn exe_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.canonicalize().ok())
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}

/// Versions under `<toolkit>/libs` that have both `libc-<v>.so` and
/// `ld-<v>.so`, sorted. Unreadable directories yield an empty list.
pub fn available_libc_versions(toolkit_dir: &Path) -> Vec<String> {
    let libs = toolkit_dir.join(LIBS_DIR);
    let Ok(entries) = std::fs::read_dir(&libs) else {
        debug!(path = %libs.display(), "libs directory not readable");
        return Vec::new();
    };

    let mut versions: Vec<String> = entries
        .filter_map(Result::ok)
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter_map(|name| {
            name.strip_prefix("libc-")
                .and_then(|rest| rest.strip_suffix(".so"))
                .map(str::to_owned)
        })
        .filter(|version| match LibcVersion::parse(version) {
            Ok(v) => libs.join(v.ld_file()).is_file() && libs.join(v.libc_file()).is_file(),
            Err(_) => false,
        })
        .collect();

    versions.sort();
    versions
}
