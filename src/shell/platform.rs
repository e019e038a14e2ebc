//! Platform-specific interpreter detection.

use crate::config::ScriptType;

use super::command::ProgramSpec;

/// Interpreters able to run stage scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpreter {
    Bash,
    /// Windows PowerShell (`powershell.exe`).
    WindowsPowerShell,
    /// PowerShell 7+ (`pwsh`).
    Pwsh,
}

impl Interpreter {
    /// Pick the interpreter for a script flavor on the current platform.
    pub fn for_script_type(script_type: ScriptType) -> Self {
        match script_type {
            ScriptType::Posix => Interpreter::Bash,
            ScriptType::PowerShell if cfg!(target_os = "windows") => {
                Interpreter::WindowsPowerShell
            }
            ScriptType::PowerShell => Interpreter::Pwsh,
        }
    }

    /// Executable name looked up on PATH.
    pub fn program(self) -> &'static str {
        match self {
            Interpreter::Bash => "bash",
            Interpreter::WindowsPowerShell => "powershell",
            Interpreter::Pwsh => "pwsh",
        }
    }

    /// Flags placed before the script path.
    pub fn leading_args(self) -> &'static [&'static str] {
        match self {
            Interpreter::Bash => &[],
            Interpreter::WindowsPowerShell | Interpreter::Pwsh => {
                &["-NoProfile", "-ExecutionPolicy", "Bypass", "-File"]
            }
        }
    }

    /// Start a program spec that runs `script` with this interpreter.
    pub fn spec_for(self, script: &std::path::Path) -> ProgramSpec {
        ProgramSpec::new(self.program())
            .args(self.leading_args().iter().copied())
            .arg(script.as_os_str())
    }
}

/// Check if running in a CI environment.
///
/// Used to force non-interactive mode in `main()`. Checks common CI
/// environment variables: `CI`, `GITHUB_ACTIONS`, `GITLAB_CI`, `CIRCLECI`,
/// `TRAVIS`, `JENKINS_URL`.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}
