//! Argument vector assembly.
use std::fmt;

use crate::config::flags::FlagTable;
use crate::error::ConfigError;
use crate::params::{ParamValue, Parameter};

/// A program and its arguments, in the order they are passed to the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
}

impl CommandLine {
    /// A command line with no arguments yet.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Render `params` after `program` using the switches from `flags`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FlagTable`] if a parameter has no switch.
    pub fn build(
        program: impl Into<String>,
        params: &[Parameter<'_>],
        flags: &FlagTable,
    ) -> Result<Self, ConfigError> {
        let mut cmd = Self::new(program);
        for param in params {
            let flag = flags.flag(param.name)?;
            cmd.push_parameter(flag, param.value);
        }
        Ok(cmd)
    }

    /// Append one parameter.
    ///
    /// Switches are emitted bare and only when true, lists become a single
    /// comma-joined argument and are dropped when empty, everything else is
    /// `flag value`.
    pub fn push_parameter(&mut self, flag: &str, value: ParamValue<'_>) {
        match value {
            ParamValue::Flag(true) => self.arg(flag),
            ParamValue::Flag(false) | ParamValue::List([]) => {}
            ParamValue::List(items) => {
                self.arg(flag);
                self.arg(items.join(","));
            }
            ParamValue::Path(path) => {
                self.arg(flag);
                self.arg(path.to_string_lossy());
            }
            ParamValue::Text(text) => {
                self.arg(flag);
                self.arg(text);
            }
            ParamValue::Number(n) => {
                self.arg(flag);
                self.arg(n.to_string());
            }
        }
    }

    /// Append a single argument verbatim.
    pub fn arg(&mut self, arg: impl Into<String>) {
        self.args.push(arg.into());
    }

    /// Program to launch.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments in launch order, without the program.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Program followed by arguments.
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }
}

/// Space-separated, with arguments that contain whitespace (or are empty)
/// wrapped in double quotes.
impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_quoted(f, &self.program)?;
        for arg in &self.args {
            f.write_str(" ")?;
            write_quoted(f, arg)?;
        }
        Ok(())
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    if s.is_empty() || s.contains(char::is_whitespace) {
        write!(f, "\"{s}\"")
    } else {
        f.write_str(s)
    }
}
