use std::path::{Path, PathBuf};

/// A rendered deployment file, ready to be written under the output
/// directory.
///
/// This is the output of the template rendering process.
/// It contains no business logic, only data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: &'static str,
    pub content: String,
    pub executable: bool,
}

impl Artifact {
    pub fn new(file_name: &'static str, content: String) -> Self {
        Self {
            file_name,
            content,
            executable: false,
        }
    }

    pub fn executable(mut self) -> Self {
        self.executable = true;
        self
    }

    pub fn path_in(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(self.file_name)
    }
}
