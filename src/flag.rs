use crate::value::{Kind, Target};

/// A named flag and the storage its value is written to.
#[derive(Debug)]
pub struct Flag<'a> {
    pub(crate) short: String,
    pub(crate) long: String,
    pub(crate) description: String,
    pub(crate) hidden: bool,
    pub(crate) target: Target<'a>,
}

impl<'a> Flag<'a> {
    pub(crate) fn new(target: Target<'a>, short: &str, long: &str, description: &str) -> Flag<'a> {
        Flag {
            short: short.trim().to_string(),
            long: long.trim().to_string(),
            description: description.to_string(),
            hidden: false,
            target,
        }
    }

    pub fn short_name(&self) -> &str {
        &self.short
    }

    pub fn long_name(&self) -> &str {
        &self.long
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> Kind {
        self.target.kind()
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Leaves this flag out of help output.
    pub fn hide(&mut self) -> &mut Self {
        self.hidden = true;
        self
    }

    /// Whether `candidate` is this flag's short or long name.
    pub fn has_name(&self, candidate: &str) -> bool {
        let candidate = candidate.trim();
        !candidate.is_empty() && (candidate == self.short || candidate == self.long)
    }

    /// Boolean flags may appear without a value.
    pub fn is_bool(&self) -> bool {
        self.target.kind() == Kind::Bool
    }

    /// How the flag is spelled in messages: `--long`, or `-s` without a long name.
    pub(crate) fn display_name(&self) -> String {
        if self.long.is_empty() {
            format!("-{}", self.short)
        } else {
            format!("--{}", self.long)
        }
    }

    pub(crate) fn conflicts_with(&self, other: &Flag<'_>) -> Option<&str> {
        [&self.short, &self.long]
            .into_iter()
            .find(|name| !name.is_empty() && (**name == other.short || **name == other.long))
            .map(String::as_str)
    }
}
