//! Invocation configuration — the decisions of the host's SDK/gem resolver.
//!
//! rucop does not discover interpreters, gems, or project roots; the host
//! resolves those and hands the results over here. The runner only assembles
//! the final argument vector and enforces capture limits.

use std::path::PathBuf;

use serde::Deserialize;

/// Capture cap per stream. Matches the 5 MiB buffers the report and side
/// channel are drained into.
pub const DEFAULT_MAX_CAPTURE_BYTES: usize = 5 * 1024 * 1024;

fn default_command() -> String {
    "rubocop".to_string()
}

fn default_max_capture_bytes() -> usize {
    DEFAULT_MAX_CAPTURE_BYTES
}

/// Configuration for one analyzer invocation.
#[derive(Debug, Clone, Deserialize)]
pub struct RunnerConfig {
    /// Tool executable (path or name resolvable in the working directory).
    #[serde(default = "default_command")]
    pub command: String,
    /// Extra arguments appended after `--format json`.
    #[serde(default)]
    pub args: Vec<String>,
    /// Dependency-manager shim prepended to the tool invocation,
    /// e.g. `["bundle", "exec"]` when the gem lives in the bundle.
    #[serde(default)]
    pub shim: Vec<String>,
    /// Explicit interpreter the tool script is dispatched through, on
    /// platforms that need it (the original plugin does this on Windows).
    #[serde(default)]
    pub interpreter: Option<PathBuf>,
    /// Upper bound on bytes captured per output stream.
    #[serde(default = "default_max_capture_bytes")]
    pub max_capture_bytes: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            args: Vec::new(),
            shim: Vec::new(),
            interpreter: None,
            max_capture_bytes: DEFAULT_MAX_CAPTURE_BYTES,
        }
    }
}

impl RunnerConfig {
    /// Final program + argument vector:
    /// `[interpreter?] [shim...?] <tool> --format json [args...] <paths...>`.
    #[must_use]
    pub fn command_line(&self, paths: &[PathBuf]) -> (String, Vec<String>) {
        let mut argv: Vec<String> = Vec::new();

        if let Some(interpreter) = &self.interpreter {
            argv.push(interpreter.to_string_lossy().into_owned());
        }
        argv.extend(self.shim.iter().cloned());
        argv.push(self.command.clone());
        argv.push("--format".to_string());
        argv.push("json".to_string());
        argv.extend(self.args.iter().cloned());
        argv.extend(paths.iter().map(|p| p.to_string_lossy().into_owned()));

        let program = argv.remove(0);
        (program, argv)
    }
}
