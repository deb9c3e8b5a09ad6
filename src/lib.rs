//! Command line parsing over a tree of subcommands.
//!
//! Flags, positional values and subcommands are registered at runtime on a
//! [`Parser`], each flag writing into storage the caller owns. A subcommand is
//! recognized by its name at a position counted among the non-flag arguments
//! following its parent, and flags of every command on the path from the
//! root are visible to the commands below it.
//!
//! ```
//! use flagtree::{CommandId, Parser};
//!
//! let (mut labels, mut dry_run, mut path) = (Vec::<String>::new(), false, String::new());
//!
//! let mut p = Parser::new("archive");
//! p.flag(&mut dry_run, "n", "dry-run", "Only print what would happen.")?;
//! let add = p.subcommand("add");
//! p[add].set_description("Add a file to the archive.");
//! p[add].flag(&mut labels, "l", "label", "Label to attach, repeatable.")?;
//! p[add].positional(&mut path, "path", 1, true, "File to add.")?;
//! p.attach(CommandId::ROOT, add, 1)?;
//!
//! p.parse_args(["add", "notes.txt", "--label", "security", "-l=retention", "-n", "--", "-x"])?;
//! let trailing = p.trailing_arguments().to_vec();
//!
//! assert_eq!(path, "notes.txt");
//! assert_eq!(labels, ["security", "retention"]);
//! assert!(dry_run);
//! assert_eq!(trailing, ["-x"]);
//! # Ok::<(), flagtree::Error>(())
//! ```
//!
//! `-h`/`--help` and `--version` are handled unless the names are registered
//! by the program; both come back as [`Error::Help`] and [`Error::Version`]
//! so the caller decides whether to exit.

mod audit;
mod command;
mod error;
mod flag;
mod help;
mod net;
mod parser;
mod positional;
mod rt;
mod token;
mod value;

pub use crate::{
    command::{Command, CommandId},
    error::{Error, Result},
    flag::Flag,
    net::{AddrParseError, IpMask, MacAddr},
    parser::{FlagOrder, Parser, Settings},
    positional::Positional,
    token::{classify, Token, TERMINATOR},
    value::{format_duration, parse_duration, Kind, Target, Value},
};
