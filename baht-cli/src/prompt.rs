//! Password resolution for the CLI: command-line and configured candidates
//! first, then the terminal.

use baht_ingest::{PasswordList, PasswordResolver};
use std::io::{self, IsTerminal, Write};

use crate::config::PasswordSection;

const PASSWORD_ENV: &str = "BAHT_PDF_PASSWORD";

// Called from the PDF adapter's unlock loop on a runtime worker; the stdin
// read must not hold that worker.
fn prompt(label: &str) -> io::Result<String> {
    tokio::task::block_in_place(|| {
        eprint!("{}: ", label);
        io::stderr().flush().ok();
        let mut s = String::new();
        io::stdin().read_line(&mut s)?;
        Ok(s.trim().to_string())
    })
}

pub struct CliPasswords {
    candidates: PasswordList,
    interactive_attempts: u32,
}

impl CliPasswords {
    /// Candidates in order: `--password` flags, `$BAHT_PDF_PASSWORD`, config.
    pub fn new(flags: Vec<String>, section: &PasswordSection, allow_prompt: bool) -> Self {
        let mut candidates = flags;
        if let Ok(p) = std::env::var(PASSWORD_ENV) {
            if !p.is_empty() {
                candidates.push(p);
            }
        }
        candidates.extend(section.candidates.iter().cloned());

        let interactive = allow_prompt && section.prompt && io::stdin().is_terminal();
        Self {
            candidates: PasswordList::new(candidates),
            interactive_attempts: if interactive { section.prompt_attempts } else { 0 },
        }
    }

    #[cfg(test)]
    fn fixed(candidates: &[&str]) -> Self {
        Self {
            candidates: PasswordList::new(candidates.iter().copied()),
            interactive_attempts: 0,
        }
    }
}

impl PasswordResolver for CliPasswords {
    fn resolve(&self, attempt: u32) -> Option<String> {
        if let Some(p) = self.candidates.resolve(attempt) {
            return Some(p);
        }

        let asked = attempt - self.candidates.len() as u32;
        if asked >= self.interactive_attempts {
            return None;
        }
        let label = if asked == 0 {
            "Statement password"
        } else {
            "Wrong password, try again"
        };
        prompt(label).ok().filter(|s| !s.is_empty())
    }
}
