use expect_test::expect;
use flagtree::{CommandId, Parser};

use crate::check;

#[derive(Debug)]
struct Tail {
    test: bool,
    trailing: Vec<String>,
}

fn nested(args: Vec<String>) -> flagtree::Result<Tail> {
    let mut test = false;
    let mut p = Parser::new("app");
    let one = p.subcommand("one");
    let two = p.subcommand("two");
    p[two].flag(&mut test, "t", "test", "")?;
    p.attach(CommandId::ROOT, one, 1)?;
    p.attach(one, two, 1)?;

    p.parse_args(args)?;
    let trailing = p.trailing_arguments().to_vec();
    Ok(Tail { test, trailing })
}

#[test]
fn terminator_is_global() {
    check(
        nested,
        "one two --test -- abc 123 xyz",
        expect![[r#"
            Tail {
                test: true,
                trailing: [
                    "abc",
                    "123",
                    "xyz",
                ],
            }
        "#]],
    );
    check(
        nested,
        "one -- two --test",
        expect![[r#"
            Tail {
                test: false,
                trailing: [
                    "two",
                    "--test",
                ],
            }
        "#]],
    );
}

#[test]
fn only_the_first_terminator_splits() {
    check(
        nested,
        "one two -- a -- b --",
        expect![[r#"
            Tail {
                test: false,
                trailing: [
                    "a",
                    "--",
                    "b",
                    "--",
                ],
            }
        "#]],
    );
    check(
        nested,
        "one two --",
        expect![[r#"
            Tail {
                test: false,
                trailing: [],
            }
        "#]],
    );
}

#[test]
fn flags_before_a_terminator() {
    let (mut follow, mut color) = (false, String::new());
    let mut p = Parser::new("tail");
    p.flag(&mut follow, "f", "follow", "").unwrap();
    p.flag(&mut color, "", "color", "").unwrap();

    p.parse_args(["--follow", "--color", "always", "--", "--follow", "-n", "5"]).unwrap();
    assert_eq!(p.trailing_arguments(), ["--follow", "-n", "5"]);

    assert!(follow);
    assert_eq!(color, "always");
}

#[test]
fn missing_value_does_not_cross_the_terminator() {
    let mut color = String::new();
    let mut p = Parser::new("tail");
    p.flag(&mut color, "", "color", "").unwrap();

    let err = p.parse_args(["--color", "--", "always"]).unwrap_err();
    assert_eq!(err.to_string(), "Expected a following arg for flag `--color`, but it did not exist");
    assert!(p.trailing_arguments().is_empty());
}

#[test]
fn nothing_after_a_failure() {
    let mut p = Parser::new("tail");
    let err = p.parse_args(["--bogus", "--", "kept"]).unwrap_err();
    assert_eq!(err.to_string(), "Unknown arguments supplied: --bogus");
    assert!(p.trailing_arguments().is_empty());
}
