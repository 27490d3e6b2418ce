//! Stylesheet compiler backed by an external command.
//!
//! The source is piped on stdin and the compiled CSS read from stdout,
//! which is how the `stylus` CLI behaves when given no file arguments:
//!
//! ```toml
//! [stylesheet]
//! command = ["stylus", "--use", "nib"]
//! ```

use std::path::Path;

use crate::debug;
use crate::utils::exec::Cmd;

use super::StylesheetCompiler;

/// Environment variable carrying the source path for the command.
pub const INPUT_ENV: &str = "PAGEASSETS_INPUT";

/// Runs `command` once per stylesheet.
#[derive(Debug, Clone)]
pub struct CommandCompiler {
    command: Vec<String>,
}

impl CommandCompiler {
    pub fn new<I, S>(command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            command: command.into_iter().map(Into::into).collect(),
        }
    }
}

impl StylesheetCompiler for CommandCompiler {
    fn compile(&self, source: &str, context: &Path) -> Result<String, String> {
        if self.command.is_empty() {
            return Err("no stylesheet compiler command configured".into());
        }

        debug!("compile"; "{} < {}", self.command.join(" "), context.display());

        let mut cmd = Cmd::from_slice(&self.command)
            .env(INPUT_ENV, context)
            .stdin(source);
        // Relative `@import`s resolve against the source's directory.
        if let Some(dir) = context.parent().filter(|d| d.is_dir()) {
            cmd = cmd.cwd(dir);
        }

        let output = cmd.run().map_err(|e| format!("{e:#}"))?;
        String::from_utf8(output.stdout).map_err(|e| format!("compiler emitted invalid UTF-8: {e}"))
    }
}
