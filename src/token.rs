//! Classification of a single raw argument.

/// The literal token that ends flag and positional interpretation.
pub const TERMINATOR: &str = "--";

/// Shape of one raw argument, decided from its leading characters alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'t> {
    /// `--`; everything after it is a trailing argument.
    Terminator,
    /// `--name`, value (if any) is the next token.
    Long(&'t str),
    /// `-n`, value (if any) is the next token.
    Short(&'t str),
    /// `--name=value` or `-n=value`.
    Joined { name: &'t str, value: &'t str },
    /// Anything else: a positional value or a subcommand name.
    Positional(&'t str),
}

/// Classifies `arg`. Pure: the same input always yields the same token.
///
/// A lone `-` is positional, the usual spelling of "standard input".
pub fn classify(arg: &str) -> Token<'_> {
    if arg == TERMINATOR {
        return Token::Terminator;
    }
    let (body, long) = if let Some(body) = arg.strip_prefix("--") {
        (body, true)
    } else if let Some(body) = arg.strip_prefix('-').filter(|it| !it.is_empty()) {
        (body, false)
    } else {
        return Token::Positional(arg);
    };

    match body.split_once('=') {
        Some((name, value)) => Token::Joined { name, value },
        None if long => Token::Long(body),
        None => Token::Short(body),
    }
}

/// Splits `args` at the first terminator: the flag/positional window and the
/// verbatim trailing arguments.
pub(crate) fn split_trailing(mut args: Vec<String>) -> (Vec<String>, Vec<String>) {
    match args.iter().position(|it| it == TERMINATOR) {
        Some(idx) => {
            let trailing = args.split_off(idx + 1);
            args.pop();
            (args, trailing)
        }
        None => (args, Vec::new()),
    }
}
