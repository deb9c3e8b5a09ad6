use std::{
    ffi::OsString,
    ops::{Index, IndexMut},
};

use crate::{
    audit,
    command::{Command, CommandId},
    error::{Error, Result},
    flag::Flag,
    help,
    positional::Positional,
    rt, token,
    value::Target,
};

/// Order flags are listed in by help output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlagOrder {
    #[default]
    Declaration,
    LongName,
    LongNameReversed,
}

/// Behaviour switches of a [`Parser`].
#[derive(Debug, Clone)]
pub struct Settings {
    /// `-h` and `--help` request help, unless a flag of that name is registered.
    pub help_flag: bool,
    /// `--version` requests the version string, unless a flag of that name is registered.
    pub version_flag: bool,
    /// Fail when some argument was not consumed by any flag, positional or subcommand.
    pub reject_unexpected: bool,
    pub flag_order: FlagOrder,
    /// Arguments starting with one of these are never reported as unexpected.
    pub ignored_prefixes: Vec<String>,
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            help_flag: true,
            version_flag: true,
            reject_unexpected: true,
            flag_order: FlagOrder::Declaration,
            ignored_prefixes: Vec::new(),
        }
    }
}

/// A command tree and the state of resolving one argument list against it.
///
/// The parser is the root command. Subcommands are created with
/// [`Parser::subcommand`], configured through indexing, and attached with
/// [`Parser::attach`]:
///
/// ```
/// let (mut verbose, mut target) = (false, String::new());
///
/// let mut p = flagtree::Parser::new("deploy");
/// p.flag(&mut verbose, "v", "verbose", "Print every step.")?;
/// let push = p.subcommand("push");
/// p[push].positional(&mut target, "target", 1, true, "Where to push.")?;
/// p.attach(flagtree::CommandId::ROOT, push, 1)?;
///
/// p.parse_args(["push", "-v", "staging"])?;
/// assert!(p.is_used(push));
///
/// assert!(verbose);
/// assert_eq!(target, "staging");
/// # Ok::<(), flagtree::Error>(())
/// ```
#[derive(Debug)]
pub struct Parser<'a> {
    pub(crate) commands: Vec<Command<'a>>,
    pub(crate) settings: Settings,
    pub(crate) version: Option<String>,
    trailing: Vec<String>,
    parsed: bool,
}

impl<'a> Parser<'a> {
    pub fn new(name: &str) -> Parser<'a> {
        Parser {
            commands: vec![Command::new(name)],
            settings: Settings::default(),
            version: None,
            trailing: Vec::new(),
            parsed: false,
        }
    }

    pub fn name(&self) -> &str {
        self[CommandId::ROOT].name()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn set_version(&mut self, version: &str) -> &mut Self {
        self.version = Some(version.to_string());
        self
    }

    /// Creates a detached subcommand.
    pub fn subcommand(&mut self, name: &str) -> CommandId {
        self.commands.push(Command::new(name));
        CommandId(self.commands.len() - 1)
    }

    /// Attaches `child` under `parent` at `position` (1-based, counted among
    /// the non-flag arguments following `parent`).
    pub fn attach(&mut self, parent: CommandId, child: CommandId, position: usize) -> Result<()> {
        if child == CommandId::ROOT {
            return Err(self.invalid_attach(parent, child, "the parser can't be a subcommand"));
        }
        if self[child].parent.is_some() {
            return Err(self.invalid_attach(parent, child, "it is already attached"));
        }
        if parent == child || self.ancestors(parent).any(|it| it == child) {
            return Err(self.invalid_attach(parent, child, "it would contain itself"));
        }
        if position == 0 {
            return Err(Error::InvalidPosition { name: self[child].display_name().to_string() });
        }

        let (new, owner) = (&self[child], &self[parent]);
        if let Some(other) = owner.positionals.iter().find(|it| it.position == position) {
            return Err(Error::DuplicatePosition {
                command: owner.name.clone(),
                name: new.display_name().to_string(),
                position,
                taken_by: format!("positional value `{}`", other.name),
            });
        }
        for &(pos, sibling) in &owner.children {
            if pos != position {
                continue;
            }
            let sibling = &self[sibling];
            let clash = [&new.name, &new.short_name]
                .into_iter()
                .find(|name| !name.is_empty() && (**name == sibling.name || **name == sibling.short_name));
            if let Some(name) = clash {
                return Err(Error::DuplicateSubcommand {
                    command: owner.name.clone(),
                    name: name.clone(),
                    position,
                });
            }
        }

        tracing::trace!(parent = %owner.name, child = %new.display_name(), position, "subcommand attached");
        self[child].position = position;
        self[child].parent = Some(parent);
        self[parent].children.push((position, child));
        Ok(())
    }

    pub fn command(&self, id: CommandId) -> &Command<'a> {
        &self.commands[id.0]
    }

    pub fn command_mut(&mut self, id: CommandId) -> &mut Command<'a> {
        &mut self.commands[id.0]
    }

    /// Registers a flag on the root command; see [`Command::flag`].
    pub fn flag(
        &mut self,
        target: impl Into<Target<'a>>,
        short: &str,
        long: &str,
        description: &str,
    ) -> Result<&mut Flag<'a>> {
        self.command_mut(CommandId::ROOT).flag(target, short, long, description)
    }

    /// Registers a positional value on the root command; see [`Command::positional`].
    pub fn positional(
        &mut self,
        target: &'a mut String,
        name: &str,
        position: usize,
        required: bool,
        description: &str,
    ) -> Result<&mut Positional<'a>> {
        self.command_mut(CommandId::ROOT).positional(target, name, position, required, description)
    }

    /// Resolves `args` (without the program name) against the tree.
    ///
    /// Targets are written only if the whole parse succeeds. A parser can
    /// parse once; call [`Parser::reset`] to run it again.
    pub fn parse_args<I>(&mut self, args: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<OsString>,
    {
        if self.parsed {
            return Err(Error::AlreadyParsed(self.name().to_string()));
        }
        self.parsed = true;

        let args = args
            .into_iter()
            .map(|it| it.into().into_string().map_err(Error::InvalidUtf8))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(parser = %self.name(), ?args, "parsing");

        let (window, trailing) = token::split_trailing(args);
        let plan = rt::resolve(self, &window)?;

        if self.settings.reject_unexpected {
            let tokens = audit::unaccounted(&window, &plan.accounted, &self.settings.ignored_prefixes);
            if !tokens.is_empty() {
                return Err(Error::UnexpectedTokens { tokens, help: self.help(plan.last) });
            }
        }

        rt::apply(self, plan)?;
        self.trailing = trailing;
        Ok(())
    }

    /// Parses the arguments of the current process.
    pub fn parse_env(&mut self) -> Result<()> {
        self.parse_args(std::env::args_os().skip(1))
    }

    /// Parses the arguments of the current process, printing help, the
    /// version or the failure and exiting when that is the outcome.
    pub fn parse_env_or_exit(&mut self) {
        if let Err(err) = self.parse_env() {
            err.exit()
        }
    }

    /// Everything after the first `--`, verbatim. Empty until a parse succeeds.
    pub fn trailing_arguments(&self) -> &[String] {
        &self.trailing
    }

    pub fn is_used(&self, id: CommandId) -> bool {
        self[id].used
    }

    /// Help text for `id`.
    pub fn help(&self, id: CommandId) -> String {
        help::render(self, id)
    }

    /// Forgets the outcome of the previous parse so the tree can parse again.
    pub fn reset(&mut self) {
        self.parsed = false;
        self.trailing.clear();
        for cmd in &mut self.commands {
            cmd.used = false;
            for pos in &mut cmd.positionals {
                pos.found = false;
            }
        }
    }

    /// Ancestors of `id`, nearest first, not including `id`.
    pub(crate) fn ancestors(&self, id: CommandId) -> impl Iterator<Item = CommandId> + '_ {
        std::iter::successors(self[id].parent, move |&it| self[it].parent)
    }

    fn invalid_attach(&self, parent: CommandId, child: CommandId, reason: &'static str) -> Error {
        Error::InvalidAttach {
            parent: self[parent].display_name().to_string(),
            child: self[child].display_name().to_string(),
            reason,
        }
    }

    pub(crate) fn version_text(&self) -> String {
        match &self.version {
            Some(version) => version.clone(),
            None => format!("{}: version not set", self.name()),
        }
    }
}

impl<'a> Index<CommandId> for Parser<'a> {
    type Output = Command<'a>;

    fn index(&self, id: CommandId) -> &Command<'a> {
        self.command(id)
    }
}

impl<'a> IndexMut<CommandId> for Parser<'a> {
    fn index_mut(&mut self, id: CommandId) -> &mut Command<'a> {
        self.command_mut(id)
    }
}
