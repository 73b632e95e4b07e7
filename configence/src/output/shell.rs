//! Shell detection and export formatting.

use std::env;

use crate::{Error, Result};

/// Supported shell types for export formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellType {
    /// Bourne Again Shell (bash).
    Bash,
    /// Z Shell (zsh).
    Zsh,
    /// Friendly Interactive Shell (fish).
    Fish,
    /// `PowerShell`.
    PowerShell,
}

impl ShellType {
    /// Detect the current shell from environment variables.
    ///
    /// Detection precedence:
    /// 1. `ZSH_VERSION` - indicates zsh
    /// 2. `FISH_VERSION` - indicates fish
    /// 3. `PSModulePath` - indicates `PowerShell`
    /// 4. `SHELL` environment variable (path like `/bin/bash`)
    /// 5. Default to bash if unable to determine
    #[must_use]
    pub fn detect() -> Self {
        if env::var("ZSH_VERSION").is_ok() {
            return Self::Zsh;
        }
        if env::var("FISH_VERSION").is_ok() {
            return Self::Fish;
        }
        if env::var("PSModulePath").is_ok() {
            return Self::PowerShell;
        }

        match env::var("SHELL") {
            Ok(path) if path.contains("zsh") => Self::Zsh,
            Ok(path) if path.contains("fish") => Self::Fish,
            Ok(path) if path.contains("pwsh") || path.contains("powershell") => Self::PowerShell,
            _ => Self::Bash,
        }
    }

    /// Parse a shell type from a string.
    ///
    /// # Arguments
    ///
    /// * `s` - Shell name (case-insensitive): "bash", "zsh", "fish", "powershell", "pwsh"
    ///
    /// # Errors
    ///
    /// Returns an error if the shell name is not recognized.
    pub fn from_string(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "bash" | "sh" => Ok(Self::Bash),
            "zsh" => Ok(Self::Zsh),
            "fish" => Ok(Self::Fish),
            "powershell" | "pwsh" | "ps" => Ok(Self::PowerShell),
            _ => Err(Error::validation(
                "shell",
                format!("unknown shell type '{s}': supported shells are bash, zsh, fish, powershell"),
            )),
        }
    }

    /// Format an export statement for this shell type. The value is quoted
    /// so that spaces and shell metacharacters survive.
    ///
    /// # Examples
    ///
    /// ```
    /// use configence::output::ShellType;
    ///
    /// assert_eq!(ShellType::Bash.format_export("PORT", "5000"), "export PORT='5000'");
    /// assert_eq!(ShellType::Fish.format_export("PORT", "5000"), "set -gx PORT '5000'");
    /// assert_eq!(ShellType::PowerShell.format_export("PORT", "5000"), "$env:PORT=\"5000\"");
    /// ```
    #[must_use]
    pub fn format_export(&self, var: &str, value: &str) -> String {
        match self {
            Self::Bash | Self::Zsh => {
                format!("export {var}='{}'", value.replace('\'', r"'\''"))
            }
            Self::Fish => {
                let escaped = value.replace('\\', r"\\").replace('\'', r"\'");
                format!("set -gx {var} '{escaped}'")
            }
            Self::PowerShell => {
                let escaped = value
                    .replace('`', "``")
                    .replace('"', "`\"")
                    .replace('$', "`$");
                format!("$env:{var}=\"{escaped}\"")
            }
        }
    }
}
