//! Interactive y/n confirmation on a terminal.

use std::io::{self, BufRead, Write};
use std::path::Path;

use ctfdock_core::{
    application::{ApplicationError, OverwriteDecider, OverwriteDecision},
    error::{CtfdockError, CtfdockResult},
};

/// Asks the user before an existing output directory is replaced.
///
/// Reads one line per attempt from `input`. `y`/`n` (any case, surrounding
/// whitespace ignored) answer the question, anything else re-prompts. Running
/// out of input is an error rather than an implicit "no".
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, existing: &Path) -> io::Result<Option<OverwriteDecision>> {
        writeln!(
            self.output,
            "[#] WARN : Detect {} exists! Now it will be deleted, continue? [y/n]",
            existing.display()
        )?;
        self.output.flush()?;

        loop {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }

            match line.trim().to_ascii_lowercase().as_str() {
                "y" => return Ok(Some(OverwriteDecision::Overwrite)),
                "n" => return Ok(Some(OverwriteDecision::Keep)),
                _ => {
                    writeln!(self.output, "Wrong input! Input again!")?;
                    self.output.flush()?;
                }
            }
        }
    }
}

impl TerminalPrompt<io::StdinLock<'static>, io::Stderr> {
    /// Prompt on stderr, read answers from stdin.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> OverwriteDecider for TerminalPrompt<R, W> {
    fn decide(&mut self, existing: &Path) -> CtfdockResult<OverwriteDecision> {
        let answer = self.ask(existing).map_err(|e| {
            CtfdockError::from(ApplicationError::PromptFailed {
                reason: e.to_string(),
            })
        })?;

        match answer {
            Some(decision) => {
                tracing::debug!(?decision, path = %existing.display(), "Overwrite answered");
                Ok(decision)
            }
            None => Err(ApplicationError::PromptFailed {
                reason: "input closed before a y/n answer".into(),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(input: &str) -> (CtfdockResult<OverwriteDecision>, String) {
        let mut out = Vec::new();
        let result = {
            let mut prompt = TerminalPrompt::new(Cursor::new(input.as_bytes()), &mut out);
            prompt.decide(Path::new("/out/chal"))
        };
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn yes_overwrites() {
        let (result, out) = run("y\n");
        assert_eq!(result.unwrap(), OverwriteDecision::Overwrite);
        assert!(out.contains("Detect /out/chal exists!"));
    }

    #[test]
    fn answers_are_case_insensitive() {
        assert_eq!(run("Y\n").0.unwrap(), OverwriteDecision::Overwrite);
        assert_eq!(run("  N  \n").0.unwrap(), OverwriteDecision::Keep);
    }

    #[test]
    fn invalid_input_reprompts() {
        let (result, out) = run("maybe\nyes\nn\n");
        assert_eq!(result.unwrap(), OverwriteDecision::Keep);
        assert_eq!(out.matches("Wrong input! Input again!").count(), 2);
    }

    #[test]
    fn eof_is_an_error() {
        let (result, _) = run("what\n");
        assert!(matches!(
            result,
            Err(CtfdockError::Application(ApplicationError::PromptFailed { .. }))
        ));
    }
}
