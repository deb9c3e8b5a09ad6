//! Plain-text help for one command of a tree.

use std::fmt::Write;

use crate::{
    command::CommandId,
    flag::Flag,
    parser::{FlagOrder, Parser},
};

macro_rules! w {
    ($($tt:tt)*) => {
        drop(write!($($tt)*))
    };
}

const HELP_DESCRIPTION: &str = "Displays help with available flag, subcommand, and positional value parameters.";
const VERSION_DESCRIPTION: &str = "Displays the program version string.";

struct FlagRow {
    short: String,
    long: String,
    description: String,
}

pub(crate) fn render(parser: &Parser<'_>, id: CommandId) -> String {
    let cmd = &parser[id];
    let mut buf = String::new();

    blank_line(&mut buf);
    w!(buf, "{}", cmd.display_name());
    if !cmd.description.is_empty() {
        w!(buf, " - {}", cmd.description);
    }
    blank_line(&mut buf);
    if !cmd.help_prepend.is_empty() {
        w!(buf, "{}\n", cmd.help_prepend);
    }

    let positionals = cmd
        .positionals
        .iter()
        .filter(|it| !it.hidden)
        .map(|it| {
            let mut right = format!("(Position {})", it.position);
            if it.required {
                right.push_str(" (Required)");
            }
            push_description(&mut right, &it.description);
            if !it.current().is_empty() {
                w!(right, " (default: {})", it.current());
            }
            (it.name.clone(), right)
        })
        .collect::<Vec<_>>();
    section(&mut buf, "Positional Variables", &positionals);

    let subcommands = cmd
        .children
        .iter()
        .map(|&(_, child)| &parser[child])
        .filter(|it| !it.hidden)
        .map(|it| {
            let mut left = it.display_name().to_string();
            if !it.name.is_empty() && !it.short_name.is_empty() {
                w!(left, " ({})", it.short_name);
            }
            let mut right = String::new();
            if it.position > 1 {
                w!(right, "(Position {})", it.position);
            }
            push_description(&mut right, &it.description);
            (left, right)
        })
        .collect::<Vec<_>>();
    section(&mut buf, "Subcommands", &subcommands);

    let builtins = builtin_rows(parser, id);
    let own = flag_rows(&cmd.flags, parser.settings.flag_order);
    if id == CommandId::ROOT {
        let rows = builtins.into_iter().chain(own).collect::<Vec<_>>();
        flag_section(&mut buf, "Flags", &rows);
    } else {
        flag_section(&mut buf, "Flags", &own);
        let inherited = parser.ancestors(id).flat_map(|it| flag_rows(&parser[it].flags, parser.settings.flag_order));
        let rows = builtins.into_iter().chain(inherited).collect::<Vec<_>>();
        flag_section(&mut buf, "Global Flags", &rows);
    }

    if !cmd.help_append.is_empty() {
        blank_line(&mut buf);
        w!(buf, "{}\n", cmd.help_append);
    }
    buf
}

/// Help and version lines, for the names the user did not claim.
fn builtin_rows(parser: &Parser<'_>, id: CommandId) -> Vec<FlagRow> {
    let claimed = |name: &str| {
        std::iter::once(id).chain(parser.ancestors(id)).any(|it| parser[it].flag_exists(name))
    };
    let mut rows = Vec::new();
    if parser.settings.version_flag && !claimed("version") {
        rows.push(FlagRow {
            short: String::new(),
            long: "--version".to_string(),
            description: VERSION_DESCRIPTION.to_string(),
        });
    }
    if parser.settings.help_flag {
        let short = if claimed("h") { "" } else { "-h" };
        let long = if claimed("help") { "" } else { "--help" };
        if !short.is_empty() || !long.is_empty() {
            rows.push(FlagRow {
                short: short.to_string(),
                long: long.to_string(),
                description: HELP_DESCRIPTION.to_string(),
            });
        }
    }
    rows
}

fn flag_rows(flags: &[Flag<'_>], order: FlagOrder) -> Vec<FlagRow> {
    let mut visible = flags.iter().filter(|it| !it.hidden).collect::<Vec<_>>();
    let key = |flag: &&Flag<'_>| if flag.long.is_empty() { flag.short.clone() } else { flag.long.clone() };
    match order {
        FlagOrder::Declaration => (),
        FlagOrder::LongName => visible.sort_by_key(key),
        FlagOrder::LongNameReversed => {
            visible.sort_by_key(key);
            visible.reverse();
        }
    }

    visible
        .into_iter()
        .map(|flag| {
            let mut description = flag.description.clone();
            if let Some(value) = flag.target.render() {
                w!(description, " (default: {})", value);
            }
            FlagRow {
                short: if flag.short.is_empty() { String::new() } else { format!("-{}", flag.short) },
                long: if flag.long.is_empty() { String::new() } else { format!("--{}", flag.long) },
                description: description.trim_start().to_string(),
            }
        })
        .collect()
}

fn section(buf: &mut String, title: &str, rows: &[(String, String)]) {
    if rows.is_empty() {
        return;
    }
    blank_line(buf);
    w!(buf, "  {}:\n", title);
    let width = rows.iter().map(|(left, _)| left.chars().count()).max().unwrap_or(0);
    for (left, right) in rows {
        let line = format!("    {:<width$}   {}", left, right, width = width);
        w!(buf, "{}\n", line.trim_end());
    }
}

fn flag_section(buf: &mut String, title: &str, rows: &[FlagRow]) {
    if rows.is_empty() {
        return;
    }
    blank_line(buf);
    w!(buf, "  {}:\n", title);
    let short_width = rows.iter().map(|it| it.short.chars().count()).max().unwrap_or(0);
    let long_width = rows.iter().map(|it| it.long.chars().count()).max().unwrap_or(0);
    for row in rows {
        let line = format!(
            "    {:<sw$}  {:<lw$}   {}",
            row.short,
            row.long,
            row.description,
            sw = short_width,
            lw = long_width
        );
        w!(buf, "{}\n", line.trim_end());
    }
}

fn push_description(buf: &mut String, description: &str) {
    if description.is_empty() {
        return;
    }
    if !buf.is_empty() {
        buf.push(' ');
    }
    buf.push_str(description);
}

fn blank_line(buf: &mut String) {
    w!(buf, "\n");
}
