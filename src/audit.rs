//! Post-resolution check for arguments nothing consumed.
//!
//! An argument counts as consumed when the engine used it as a flag, as a
//! flag value, as a positional value or as a subcommand name at any level.
//! The check only reads the window; it never touches a target.

/// Arguments of `window` that were not `accounted`, in input order, minus
/// those starting with one of `ignored_prefixes`.
pub(crate) fn unaccounted(window: &[String], accounted: &[bool], ignored_prefixes: &[String]) -> Vec<String> {
    window
        .iter()
        .zip(accounted)
        .filter(|&(_, &seen)| !seen)
        .map(|(arg, _)| arg)
        .filter(|arg| !ignored_prefixes.iter().any(|prefix| arg.starts_with(prefix.as_str())))
        .cloned()
        .collect()
}
