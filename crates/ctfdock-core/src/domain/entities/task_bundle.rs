use serde::Serialize;

use crate::domain::error::DomainError;

/// Substring that marks a file as the flag.
pub const FLAG_MARKER: &str = "flag";

/// The two files a task directory must contain: the challenge binary and
/// its flag.
///
/// Discovery is by naming convention only: the file whose name contains
/// `"flag"` is the flag, the other one is the binary. Contents are never
/// inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskBundle {
    task_name: String,
    flag_name: String,
}

impl TaskBundle {
    /// Classify the regular-file names found in a task directory.
    ///
    /// The result does not depend on listing order. Fails unless there is
    /// exactly one flag file and exactly one other file.
    pub fn discover<I, S>(file_names: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let (mut flags, mut others): (Vec<String>, Vec<String>) = file_names
            .into_iter()
            .map(|n| n.as_ref().to_owned())
            .partition(|n| n.contains(FLAG_MARKER));

        flags.sort();
        others.sort();

        if others.len() > 1 {
            return Err(DomainError::MultipleTaskFiles { names: others });
        }
        if flags.len() > 1 {
            return Err(DomainError::MultipleFlagFiles { names: flags });
        }

        let flag_name = flags.pop().ok_or(DomainError::MissingFlagFile)?;
        let task_name = others.pop().ok_or(DomainError::MissingTaskFile)?;

        Ok(Self {
            task_name,
            flag_name,
        })
    }

    pub fn task_name(&self) -> &str {
        &self.task_name
    }

    pub fn flag_name(&self) -> &str {
        &self.flag_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifies_roles_regardless_of_order() {
        let a = TaskBundle::discover(["chal", "flag.txt"]).unwrap();
        let b = TaskBundle::discover(["flag.txt", "chal"]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.task_name(), "chal");
        assert_eq!(a.flag_name(), "flag.txt");
    }

    #[test]
    fn flag_match_is_a_substring_match() {
        let bundle = TaskBundle::discover(["the_flag_file", "pwn"]).unwrap();
        assert_eq!(bundle.flag_name(), "the_flag_file");
        assert_eq!(bundle.task_name(), "pwn");
    }

    #[test]
    fn no_flag_file_is_an_error() {
        assert_eq!(
            TaskBundle::discover(["chal"]),
            Err(DomainError::MissingFlagFile)
        );
    }

    #[test]
    fn two_flag_files_is_an_error() {
        assert_eq!(
            TaskBundle::discover(["flag2", "chal", "flag1"]),
            Err(DomainError::MultipleFlagFiles {
                names: vec!["flag1".into(), "flag2".into()]
            })
        );
    }

    #[test]
    fn two_task_files_is_an_error() {
        assert!(matches!(
            TaskBundle::discover(["chal", "libc.so.6", "flag"]),
            Err(DomainError::MultipleTaskFiles { .. })
        ));
    }

    #[test]
    fn flag_without_binary_is_an_error() {
        assert_eq!(
            TaskBundle::discover(["flag"]),
            Err(DomainError::MissingTaskFile)
        );
    }

    #[test]
    fn empty_directory_reports_missing_flag() {
        let empty: [&str; 0] = [];
        assert_eq!(TaskBundle::discover(empty), Err(DomainError::MissingFlagFile));
    }
}
