//! The resolution engine.
//!
//! Every command on the path from the root rescans the whole window (the
//! arguments before the terminator) for flags it can see, then walks the
//! remaining non-flag arguments at positions relative to itself. Nothing is
//! written while resolving: the outcome is a [`Plan`] that [`apply`] writes
//! into the caller's storage once every check has passed.

use std::collections::BTreeMap;

use crate::{
    command::CommandId,
    error::{Error, Result},
    parser::Parser,
    token::{self, Token},
};

/// What a successful resolution decided, keyed by argument index.
pub(crate) struct Plan {
    assignments: BTreeMap<usize, Assignment>,
    entered: Vec<CommandId>,
    /// Arguments consumed by a flag, a positional value or a subcommand name.
    pub(crate) accounted: Vec<bool>,
    /// Deepest command entered.
    pub(crate) last: CommandId,
}

/// A builtin flag seen where no command up the path registers its name.
/// A deeper command may still claim the argument as its own flag.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Builtin {
    Help,
    Version,
}

enum Assignment {
    Flag { command: CommandId, flag: usize, value: String },
    Positional { command: CommandId, positional: usize, value: String },
}

pub(crate) fn resolve(parser: &Parser<'_>, window: &[String]) -> Result<Plan> {
    let mut resolver = Resolver {
        parser,
        window,
        plan: Plan {
            assignments: BTreeMap::new(),
            entered: Vec::new(),
            accounted: vec![false; window.len()],
            last: CommandId::ROOT,
        },
        builtins: BTreeMap::new(),
    };
    resolver.command(CommandId::ROOT, 0)?;
    Ok(resolver.plan)
}

/// Writes a resolved plan through to the targets, in argument order.
pub(crate) fn apply(parser: &mut Parser<'_>, plan: Plan) -> Result<()> {
    for id in plan.entered {
        parser[id].used = true;
    }
    for assignment in plan.assignments.into_values() {
        match assignment {
            Assignment::Flag { command, flag, value } => {
                let flag = &mut parser[command].flags[flag];
                if let Err(reason) = flag.target.set(&value) {
                    return Err(Error::InvalidValue { flag: flag.display_name(), value, reason });
                }
            }
            Assignment::Positional { command, positional, value } => {
                let positional = &mut parser[command].positionals[positional];
                *positional.target = value;
                positional.found = true;
            }
        }
    }
    Ok(())
}

struct Resolver<'p, 'a> {
    parser: &'p Parser<'a>,
    window: &'p [String],
    plan: Plan,
    builtins: BTreeMap<usize, Builtin>,
}

impl Resolver<'_, '_> {
    fn command(&mut self, id: CommandId, depth: usize) -> Result<()> {
        let (parser, window) = (self.parser, self.window);
        let cmd = &parser[id];
        tracing::debug!(command = %cmd.display_name(), depth, "entering command");
        self.plan.entered.push(id);
        self.plan.last = id;

        let residue = self.scan_flags(id)?;
        for (pos, &idx) in residue.iter().enumerate() {
            // Arguments before `depth` belong to an ancestor.
            let relative = match (pos + 1).checked_sub(depth) {
                Some(it) if it >= 1 => it,
                _ => continue,
            };
            let arg = &window[idx];

            let child = cmd
                .children
                .iter()
                .find(|&&(position, child)| position == relative && parser[child].matches(arg));
            if let Some(&(_, child)) = child {
                self.plan.accounted[idx] = true;
                return self.command(child, depth + relative);
            }

            if let Some(positional) = cmd.positionals.iter().position(|it| it.position == relative) {
                tracing::debug!(
                    command = %cmd.display_name(),
                    positional = %cmd.positionals[positional].name,
                    value = %arg,
                    "positional value"
                );
                self.plan.accounted[idx] = true;
                self.plan
                    .assignments
                    .insert(idx, Assignment::Positional { command: id, positional, value: arg.clone() });
                continue;
            }

            let help = parser.help(id);
            let err = if cmd.children.iter().any(|&(position, _)| position == relative) {
                let available = cmd
                    .children
                    .iter()
                    .map(|&(_, child)| &parser[child])
                    .filter(|it| !it.hidden)
                    .map(|it| it.display_name().to_string())
                    .collect();
                Error::SubcommandNotFound { token: arg.clone(), available, help }
            } else {
                Error::UnexpectedArgument { token: arg.clone(), help }
            };
            return Err(self.unless_builtin(id, err));
        }

        if let Some(err) = self.builtin(id) {
            return Err(err);
        }
        for &entered in &self.plan.entered {
            self.check_required(entered, id)?;
        }
        Ok(())
    }

    /// Plans every flag of the window visible from `id` and returns the
    /// indices of the remaining non-flag arguments.
    fn scan_flags(&mut self, id: CommandId) -> Result<Vec<usize>> {
        let (parser, window) = (self.parser, self.window);
        let mut residue = Vec::new();
        let mut idx = 0;
        while idx < window.len() {
            let token = token::classify(&window[idx]);
            tracing::trace!(command = %parser[id].display_name(), idx, ?token);
            let (name, joined) = match token {
                Token::Terminator => break,
                Token::Positional(_) => {
                    residue.push(idx);
                    idx += 1;
                    continue;
                }
                Token::Long(name) | Token::Short(name) => (name, None),
                Token::Joined { name, value } => (name, Some(value)),
            };

            let Some((owner, flag)) = self.lookup(id, name) else {
                let settings = &parser.settings;
                let builtin = match token {
                    Token::Short("h") | Token::Long("help") if settings.help_flag => Some(Builtin::Help),
                    Token::Long("version") if settings.version_flag => Some(Builtin::Version),
                    _ => None,
                };
                if let Some(builtin) = builtin {
                    self.builtins.insert(idx, builtin);
                    self.plan.accounted[idx] = true;
                    idx += 1;
                    continue;
                }
                // Left for the audit. A following positional goes with it as
                // its value unless a deeper command knows the name as a boolean.
                let takes_next = joined.is_none()
                    && matches!(window.get(idx + 1).map(|it| token::classify(it)), Some(Token::Positional(_)))
                    && !self.bool_below(id, name);
                idx += if takes_next { 2 } else { 1 };
                continue;
            };

            // Claimed here, so not a builtin after all.
            self.builtins.remove(&idx);
            let flag_ref = &parser[owner].flags[flag];
            let next = window.get(idx + 1).map(String::as_str);
            let (value, width) = match (joined, next) {
                (Some(value), _) => (value, 1),
                (None, Some(value @ ("true" | "false"))) if flag_ref.is_bool() => (value, 2),
                (None, _) if flag_ref.is_bool() => ("true", 1),
                (None, Some(value)) => (value, 2),
                (None, None) => {
                    let err = Error::MissingValue { flag: flag_ref.display_name(), help: parser.help(id) };
                    return Err(self.unless_builtin(id, err));
                }
            };
            if let Err(reason) = flag_ref.target.check(value) {
                let err =
                    Error::InvalidValue { flag: flag_ref.display_name(), value: value.to_string(), reason };
                return Err(self.unless_builtin(id, err));
            }

            tracing::debug!(flag = %flag_ref.display_name(), value, "flag value");
            self.plan.accounted[idx..idx + width].fill(true);
            self.plan
                .assignments
                .insert(idx, Assignment::Flag { command: owner, flag, value: value.to_string() });
            idx += width;
        }
        Ok(residue)
    }

    /// Finds a flag named `name` on `id` or, failing that, its nearest ancestor.
    fn lookup(&self, id: CommandId, name: &str) -> Option<(CommandId, usize)> {
        std::iter::once(id).chain(self.parser.ancestors(id)).find_map(|cmd| {
            let flag = self.parser[cmd].flags.iter().position(|it| it.has_name(name))?;
            Some((cmd, flag))
        })
    }

    /// Whether some command below `id` that the window names declares a
    /// boolean flag `name`.
    fn bool_below(&self, id: CommandId, name: &str) -> bool {
        self.parser[id].children.iter().any(|&(_, child)| {
            let child_cmd = &self.parser[child];
            self.window.iter().any(|arg| child_cmd.matches(arg))
                && (child_cmd.flags.iter().any(|it| it.is_bool() && it.has_name(name))
                    || self.bool_below(child, name))
        })
    }

    fn check_required(&self, owner: CommandId, active: CommandId) -> Result<()> {
        let cmd = &self.parser[owner];
        for (idx, positional) in cmd.positionals.iter().enumerate() {
            if positional.required && !self.is_found(owner, idx) {
                return Err(Error::MissingPositional {
                    command: cmd.display_name().to_string(),
                    name: positional.name.clone(),
                    position: positional.position,
                    help: self.parser.help(active),
                });
            }
        }
        Ok(())
    }

    fn is_found(&self, owner: CommandId, idx: usize) -> bool {
        self.plan.assignments.values().any(|it| {
            matches!(*it, Assignment::Positional { command, positional, .. } if command == owner && positional == idx)
        })
    }

    /// The outcome of the builtin flags nobody claimed, version first.
    fn builtin(&self, id: CommandId) -> Option<Error> {
        if self.builtins.values().any(|&it| it == Builtin::Version) {
            return Some(Error::Version(self.parser.version_text()));
        }
        if self.builtins.values().any(|&it| it == Builtin::Help) {
            return Some(Error::Help(self.parser.help(id)));
        }
        None
    }

    /// A help or version request outranks whatever went wrong after it.
    fn unless_builtin(&self, id: CommandId, err: Error) -> Error {
        self.builtin(id).unwrap_or(err)
    }
}
