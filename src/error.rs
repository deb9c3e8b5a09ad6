use std::{ffi::OsString, process};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can go wrong while building a command tree or resolving
/// arguments against it.
///
/// Configuration errors are programmer mistakes and are reported at
/// registration. Input errors come from the arguments. `Help` and `Version`
/// are not failures: they carry the text the user asked for. Usage errors
/// carry the help text of the command that was active when they were raised;
/// [`Error::exit`] prints it before the message.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("flag `{name}` added to command `{command}` but it is already assigned")]
    DuplicateFlag { command: String, name: String },

    #[error("unable to add `{name}` to command `{command}`: position {position} is taken by {taken_by}")]
    DuplicatePosition { command: String, name: String, position: usize, taken_by: String },

    #[error("unable to add subcommand: `{command}` already has a subcommand named `{name}` at position {position}")]
    DuplicateSubcommand { command: String, name: String, position: usize },

    #[error("positions start at 1, `{name}` was given position 0")]
    InvalidPosition { name: String },

    #[error("can't attach `{child}` to `{parent}`: {reason}")]
    InvalidAttach { parent: String, child: String, reason: &'static str },

    #[error("parse was already called on parser `{0}`")]
    AlreadyParsed(String),

    #[error("invalid utf8 in argument: {0:?}")]
    InvalidUtf8(OsString),

    #[error("Can't parse `{flag}` from `{value}`, {reason}")]
    InvalidValue { flag: String, value: String, reason: String },

    #[error("Expected a following arg for flag `{flag}`, but it did not exist")]
    MissingValue { flag: String, help: String },

    #[error("Unexpected argument: `{token}`")]
    UnexpectedArgument { token: String, help: String },

    #[error("Subcommand or positional value not found: `{token}`. Available subcommands: {}", .available.join(", "))]
    SubcommandNotFound { token: String, available: Vec<String>, help: String },

    #[error("Required positional of command `{command}` named `{name}` not found at position {position}")]
    MissingPositional { command: String, name: String, position: usize, help: String },

    #[error("Unknown arguments supplied: {}", .tokens.join(" "))]
    UnexpectedTokens { tokens: Vec<String>, help: String },

    #[error("{0}")]
    Help(String),

    #[error("{0}")]
    Version(String),
}

impl Error {
    /// Whether this is a help request rather than a failure.
    pub fn is_help(&self) -> bool {
        matches!(self, Error::Help(_))
    }

    pub fn is_version(&self) -> bool {
        matches!(self, Error::Version(_))
    }

    /// Usage errors: the user should see the help text and the message.
    pub fn is_usage(&self) -> bool {
        self.help_text().is_some() && !self.is_help()
    }

    /// Help text of the command that was active when this error was raised.
    pub fn help_text(&self) -> Option<&str> {
        match self {
            Error::MissingValue { help, .. }
            | Error::UnexpectedArgument { help, .. }
            | Error::SubcommandNotFound { help, .. }
            | Error::MissingPositional { help, .. }
            | Error::UnexpectedTokens { help, .. } => Some(help),
            Error::Help(help) => Some(help),
            _ => None,
        }
    }

    /// Status to exit the process with.
    pub fn exit_code(&self) -> i32 {
        if self.is_help() || self.is_version() {
            0
        } else {
            2
        }
    }

    /// Prints help, version, or the failure and terminates the process.
    pub fn exit(&self) -> ! {
        match self {
            Error::Help(_) | Error::Version(_) => println!("{self}"),
            _ => match self.help_text() {
                Some(help) => eprintln!("{help}\n{self}"),
                None => eprintln!("{self}"),
            },
        }
        process::exit(self.exit_code())
    }
}
