use expect_test::expect;
use flagtree::{CommandId, Error, Parser};

#[test]
fn parse_runs_once() {
    let mut verbose = false;
    let mut p = Parser::new("app");
    p.flag(&mut verbose, "v", "verbose", "").unwrap();

    p.parse_args(["-v"]).unwrap();
    let err = p.parse_args(["-v", "false"]).unwrap_err();
    assert!(matches!(err, Error::AlreadyParsed(_)));
    assert_eq!(err.to_string(), "parse was already called on parser `app`");

    p.reset();
    p.parse_args(["-v", "false"]).unwrap();
    assert!(!verbose);
}

#[test]
fn second_parse_writes_nothing() {
    let mut name = String::new();
    let mut p = Parser::new("app");
    p.flag(&mut name, "n", "name", "").unwrap();

    p.parse_args(["-n", "first"]).unwrap();
    assert!(p.parse_args(["-n", "second"]).is_err());
    assert_eq!(name, "first");
}

#[test]
fn failed_parse_writes_nothing() {
    let (mut count, mut names, mut target) = (7u32, vec!["kept".to_string()], String::from("old"));
    let mut p = Parser::new("app");
    p.flag(&mut count, "c", "count", "").unwrap();
    p.flag(&mut names, "n", "name", "").unwrap();
    p.positional(&mut target, "target", 1, true, "").unwrap();

    let err = p.parse_args(["-c", "1", "-n", "a,b", "new", "extra"]).unwrap_err();
    assert_eq!(err.to_string(), "Unexpected argument: `extra`");
    p.reset();
    let err = p.parse_args(["-n", "a", "new", "-c", "many"]).unwrap_err();
    assert_eq!(err.to_string(), "Can't parse `--count` from `many`, invalid digit found in string");
    p.reset();
    let err = p.parse_args(["-c", "1", "new", "--what"]).unwrap_err();
    assert_eq!(err.to_string(), "Unknown arguments supplied: --what");
    assert!(!p[CommandId::ROOT].is_used());
    assert!(!p[CommandId::ROOT].positionals()[0].is_found());

    assert_eq!(count, 7);
    assert_eq!(names, ["kept"]);
    assert_eq!(target, "old");
}

#[test]
fn missing_values() {
    let (mut name, mut level) = (String::new(), 0u8);
    let mut p = Parser::new("app");
    p.flag(&mut name, "n", "name", "").unwrap();
    p.flag(&mut level, "l", "", "").unwrap();

    let err = p.parse_args(["-n"]).unwrap_err();
    assert_eq!(err.to_string(), "Expected a following arg for flag `--name`, but it did not exist");
    assert!(err.is_usage());
    assert_eq!(err.exit_code(), 2);

    p.reset();
    let err = p.parse_args(["-n", "x", "-l"]).unwrap_err();
    assert_eq!(err.to_string(), "Expected a following arg for flag `-l`, but it did not exist");
}

#[test]
fn naked_bool_keeps_the_next_argument() {
    let (mut tidy, mut path) = (false, String::new());
    let mut p = Parser::new("app");
    p.flag(&mut tidy, "t", "tidy", "").unwrap();
    p.positional(&mut path, "path", 1, false, "").unwrap();

    p.parse_args(["-t", "src"]).unwrap();
    assert!(p[CommandId::ROOT].positionals()[0].is_found());

    assert!(tidy);
    assert_eq!(path, "src");
}

#[test]
fn required_positional() {
    let (mut from, mut to) = (String::new(), String::new());
    let mut p = Parser::new("cp");
    p.positional(&mut from, "from", 1, true, "").unwrap();
    p.positional(&mut to, "to", 2, true, "").unwrap();

    let err = p.parse_args(["a.txt"]).unwrap_err();
    expect![[r#"Required positional of command `cp` named `to` not found at position 2"#]]
        .assert_eq(&err.to_string());
    match &err {
        Error::MissingPositional { name, position, .. } => assert_eq!((name.as_str(), *position), ("to", 2)),
        _ => panic!("unexpected error: {err:?}"),
    }
}

#[test]
fn usage_errors_carry_help() {
    let mut p = Parser::new("app");
    p[CommandId::ROOT].set_description("Does things.");
    let err = p.parse_args(["stray"]).unwrap_err();
    assert!(err.is_usage());
    assert!(!err.is_help());
    assert!(err.help_text().unwrap().starts_with("\napp - Does things.\n"));
}

#[test]
fn help_request() {
    let (mut name, mut force) = (String::new(), false);
    let mut p = Parser::new("app");
    p.flag(&mut name, "n", "name", "").unwrap();
    let sub = p.subcommand("sub");
    p[sub].set_description("A subcommand.");
    p[sub].flag(&mut force, "f", "force", "").unwrap();
    p.attach(CommandId::ROOT, sub, 1).unwrap();

    let err = p.parse_args(["-h"]).unwrap_err();
    assert!(err.is_help());
    assert_eq!(err.exit_code(), 0);
    assert!(err.to_string().starts_with("\napp\n"));

    p.reset();
    let err = p.parse_args(["sub", "--help", "-n", "x"]).unwrap_err();
    assert!(err.to_string().starts_with("\nsub - A subcommand.\n"));

    // Help wins over a bad argument.
    p.reset();
    let err = p.parse_args(["--help", "nope"]).unwrap_err();
    assert!(err.is_help());
    p.reset();
    let err = p.parse_args(["-h", "sub", "-n"]).unwrap_err();
    assert!(err.is_help());

    assert_eq!(name, "");
    assert!(!force);
}

#[test]
fn user_flags_shadow_builtins() {
    let (mut host, mut version) = (String::new(), String::new());
    let mut p = Parser::new("app");
    p.flag(&mut host, "h", "host", "").unwrap();
    p.flag(&mut version, "", "version", "").unwrap();

    p.parse_args(["-h", "example.com", "--version", "2"]).unwrap();
    assert_eq!(host, "example.com");
    assert_eq!(version, "2");
}

#[test]
fn subcommand_flags_shadow_builtins() {
    let (mut host, mut version, mut verbose) = (String::new(), String::new(), false);
    let mut p = Parser::new("app");
    p.flag(&mut verbose, "v", "verbose", "").unwrap();
    let sub = p.subcommand("sub");
    p[sub].flag(&mut host, "h", "host", "").unwrap();
    p[sub].flag(&mut version, "", "version", "").unwrap();
    p.attach(CommandId::ROOT, sub, 1).unwrap();

    p.parse_args(["sub", "-h", "example.com", "--version", "2", "-v"]).unwrap();
    assert!(p[sub].is_used());
    assert_eq!(host, "example.com");
    assert_eq!(version, "2");
    assert!(verbose);
}

#[test]
fn builtins_apply_where_unclaimed() {
    let mut host = String::new();
    let mut p = Parser::new("app");
    p.set_version("app 2.0");
    let sub = p.subcommand("sub");
    p[sub].flag(&mut host, "h", "host", "").unwrap();
    p.attach(CommandId::ROOT, sub, 1).unwrap();

    let err = p.parse_args(["-h"]).unwrap_err();
    assert!(err.is_help());
    assert!(err.to_string().starts_with("\napp\n"));

    p.reset();
    let err = p.parse_args(["sub", "--help"]).unwrap_err();
    assert!(err.is_help());
    assert!(err.to_string().starts_with("\nsub\n"));

    p.reset();
    let err = p.parse_args(["sub", "-h", "x", "--version"]).unwrap_err();
    assert_eq!(err.to_string(), "app 2.0");

    p.reset();
    let err = p.parse_args(["sub", "-h"]).unwrap_err();
    assert_eq!(err.to_string(), "Expected a following arg for flag `--host`, but it did not exist");
    assert_eq!(host, "");
}

#[test]
fn builtins_can_be_disabled() {
    let mut p = Parser::new("app");
    p.settings_mut().help_flag = false;
    p.settings_mut().version_flag = false;
    let err = p.parse_args(["-h", "--version"]).unwrap_err();
    assert_eq!(err.to_string(), "Unknown arguments supplied: -h --version");
}

#[test]
fn version_request() {
    let mut p = Parser::new("app");
    let err = p.parse_args(["--version"]).unwrap_err();
    assert!(err.is_version());
    assert_eq!(err.to_string(), "app: version not set");

    p.reset();
    p.set_version("app 1.2.3");
    let err = p.parse_args(["stray", "--version"]).unwrap_err();
    assert_eq!(err.to_string(), "app 1.2.3");
    assert_eq!(err.exit_code(), 0);
}

#[cfg(unix)]
#[test]
fn non_utf8_arguments() {
    use std::{ffi::OsString, os::unix::ffi::OsStringExt};

    let mut p = Parser::new("app");
    let err = p.parse_args([OsString::from("ok"), OsString::from_vec(vec![b'a', 0xff])]).unwrap_err();
    assert!(matches!(err, Error::InvalidUtf8(_)));
    assert_eq!(err.to_string(), r#"invalid utf8 in argument: "a\xFF""#);
}

#[test]
fn duplicate_registrations() {
    let (mut a, mut b) = (String::new(), false);
    let mut p = Parser::new("app");
    let sub = p.subcommand("sub");
    p[sub].flag(&mut a, "s", "same", "").unwrap();
    let err = p[sub].flag(&mut b, "x", "same", "").unwrap_err();
    assert_eq!(err.to_string(), "flag `same` added to command `sub` but it is already assigned");
}
