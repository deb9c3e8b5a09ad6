use crate::{
    error::{Error, Result},
    flag::Flag,
    positional::Positional,
    value::Target,
};

/// Handle of a command inside its [`Parser`](crate::Parser).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandId(pub(crate) usize);

impl CommandId {
    /// The parser itself.
    pub const ROOT: CommandId = CommandId(0);
}

/// The root parser or a subcommand: owns flags, positional values and the
/// positions of its attached children.
#[derive(Debug)]
pub struct Command<'a> {
    pub(crate) name: String,
    pub(crate) short_name: String,
    pub(crate) description: String,
    pub(crate) help_prepend: String,
    pub(crate) help_append: String,
    pub(crate) hidden: bool,
    pub(crate) position: usize,
    pub(crate) parent: Option<CommandId>,
    pub(crate) children: Vec<(usize, CommandId)>,
    pub(crate) flags: Vec<Flag<'a>>,
    pub(crate) positionals: Vec<Positional<'a>>,
    pub(crate) used: bool,
}

impl<'a> Command<'a> {
    pub(crate) fn new(name: &str) -> Command<'a> {
        Command {
            name: name.to_string(),
            short_name: String::new(),
            description: String::new(),
            help_prepend: String::new(),
            help_append: String::new(),
            hidden: false,
            position: 0,
            parent: None,
            children: Vec::new(),
            flags: Vec::new(),
            positionals: Vec::new(),
            used: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// Alternate name the command is also matched by.
    pub fn set_short_name(&mut self, short_name: &str) -> &mut Self {
        self.short_name = short_name.to_string();
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: &str) -> &mut Self {
        self.description = description.to_string();
        self
    }

    /// Text shown right after the title line of this command's help.
    pub fn set_help_prepend(&mut self, text: &str) -> &mut Self {
        self.help_prepend = text.to_string();
        self
    }

    /// Text shown at the end of this command's help.
    pub fn set_help_append(&mut self, text: &str) -> &mut Self {
        self.help_append = text.to_string();
        self
    }

    /// Leaves this command out of its parent's help.
    pub fn hide(&mut self) -> &mut Self {
        self.hidden = true;
        self
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Position among the parent's non-flag arguments, 0 while unattached.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Whether the last parse entered this command.
    pub fn is_used(&self) -> bool {
        self.used
    }

    pub fn flags(&self) -> &[Flag<'a>] {
        &self.flags
    }

    pub fn positionals(&self) -> &[Positional<'a>] {
        &self.positionals
    }

    /// Registers a flag writing into `target`, which is either `&mut T`
    /// (overwritten) or `&mut Vec<T>` (appended to on every occurrence).
    ///
    /// Either name may be empty. Names are given without dashes: the flag
    /// answers to `-short`, `--short`, `-long` and `--long` alike.
    pub fn flag(
        &mut self,
        target: impl Into<Target<'a>>,
        short: &str,
        long: &str,
        description: &str,
    ) -> Result<&mut Flag<'a>> {
        let flag = Flag::new(target.into(), short, long, description);
        if let Some(name) = self.flags.iter().find_map(|it| flag.conflicts_with(it)) {
            return Err(Error::DuplicateFlag { command: self.name.clone(), name: name.to_string() });
        }
        tracing::trace!(command = %self.name, flag = %flag.display_name(), kind = %flag.kind(), "flag registered");
        let idx = self.flags.len();
        self.flags.push(flag);
        Ok(&mut self.flags[idx])
    }

    /// Registers a positional value at `position` (1-based, relative to this
    /// command). Positions are shared with attached subcommands.
    pub fn positional(
        &mut self,
        target: &'a mut String,
        name: &str,
        position: usize,
        required: bool,
        description: &str,
    ) -> Result<&mut Positional<'a>> {
        if position == 0 {
            return Err(Error::InvalidPosition { name: name.to_string() });
        }
        let taken_by = if let Some(other) = self.positionals.iter().find(|it| it.position == position) {
            Some(format!("positional value `{}`", other.name))
        } else if self.children.iter().any(|&(pos, _)| pos == position) {
            Some("a subcommand".to_string())
        } else {
            None
        };
        if let Some(taken_by) = taken_by {
            return Err(Error::DuplicatePosition {
                command: self.name.clone(),
                name: name.to_string(),
                position,
                taken_by,
            });
        }

        let idx = self.positionals.len();
        self.positionals.push(Positional {
            name: name.to_string(),
            description: description.to_string(),
            position,
            required,
            hidden: false,
            found: false,
            target,
        });
        Ok(&mut self.positionals[idx])
    }

    /// Whether a flag answers to `name` on this command (ancestors not included).
    pub fn flag_exists(&self, name: &str) -> bool {
        self.flags.iter().any(|it| it.has_name(name))
    }

    pub(crate) fn matches(&self, token: &str) -> bool {
        !token.is_empty() && (token == self.name || token == self.short_name)
    }

    /// Name used in messages, falling back to the short name.
    pub(crate) fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.short_name
        } else {
            &self.name
        }
    }
}
