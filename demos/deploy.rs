//! `RUST_LOG=flagtree=debug cargo run --example deploy -- push -f build-42 -- --dry`

use std::time::Duration;

use flagtree::{CommandId, Parser};

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let (mut env, mut timeout, mut labels) = ("staging".to_string(), Duration::from_secs(30), Vec::<String>::new());
    let (mut build, mut force, mut steps) = (String::new(), false, 1u32);

    let mut p = Parser::new("deploy");
    p.set_version(env!("CARGO_PKG_VERSION"));
    p[CommandId::ROOT]
        .set_description("Ship builds to servers.")
        .set_help_append("Arguments after `--` are handed to the remote hook.");
    registered(p.flag(&mut env, "e", "env", "Target environment."));
    registered(p.flag(&mut timeout, "t", "timeout", "Give up after this long."));
    registered(p.flag(&mut labels, "l", "label", "Label the release, repeatable."));

    let push = p.subcommand("push");
    p[push].set_short_name("p").set_description("Upload a build.");
    registered(p[push].flag(&mut force, "f", "force", "Overwrite an existing build."));
    registered(p[push].positional(&mut build, "build", 1, true, "Build to upload."));
    let rollback = p.subcommand("rollback");
    p[rollback].set_description("Undo recent pushes.");
    registered(p[rollback].flag(&mut steps, "n", "steps", "How many pushes to undo."));
    registered(p.attach(CommandId::ROOT, push, 1));
    registered(p.attach(CommandId::ROOT, rollback, 1));

    p.parse_env_or_exit();
    let (pushed, rolled_back) = (p.is_used(push), p.is_used(rollback));
    let hook = p.trailing_arguments().to_vec();

    if pushed {
        println!("push {build} to {env} (force: {force}, timeout: {timeout:?}, labels: {labels:?})");
    } else if rolled_back {
        println!("roll back {steps} push(es) on {env}");
    } else {
        println!("nothing to do, see `deploy --help`");
    }
    if !hook.is_empty() {
        println!("hook arguments: {hook:?}");
    }
}

/// Registration errors are bugs in this program.
fn registered<T>(res: flagtree::Result<T>) {
    if let Err(err) = res {
        eprintln!("{err}");
        std::process::exit(101)
    }
}
