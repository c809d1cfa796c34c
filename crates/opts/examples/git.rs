//! A tiny git-like command line.
//!
//! Try `cargo run --example git -- -v ad -n file.txt` or `RUST_LOG=trace cargo run --example git -- s`.

use std::process::ExitCode;

use opts::{Command, DefinitionError, Evaluation, Opt, Parser};

fn parser() -> Result<Parser, DefinitionError> {
    let add = Command::builder("add")
        .description("Add file contents to the index")
        .option(
            "dry-run",
            Opt::boolean()
                .short('n')
                .long("dry-run")
                .description("Don't actually add the files"),
        )
        .option(
            "interactive",
            Opt::boolean()
                .short('i')
                .long("interactive")
                .description("Add modified contents interactively"),
        )
        .build()?;

    let stash = Command::builder("stash")
        .description("Stash the changes in a dirty working directory away")
        .option(
            "message",
            Opt::string()
                .short('m')
                .long("message")
                .description("Description of the stash entry"),
        )
        .build()?;

    let root = Command::builder("git")
        .description("The stupid content tracker")
        .option(
            "verbose",
            Opt::boolean()
                .short('v')
                .long("verbose")
                .description("Be more verbose"),
        )
        .option(
            "config",
            Opt::multiple()
                .short('c')
                .separated()
                .description("Pass configuration parameters"),
        )
        .command(add)
        .command(Command::builder("stack").build()?)
        .command(stash)
        .build()?;

    Ok(Parser::new(root))
}

fn print_usage(command: &Command) {
    eprintln!("usage: {} [options] <command> [<args>]\n", command.name());

    for option in command.list_options() {
        let short = option.short.map(|c| format!("-{c}")).unwrap_or_default();
        let long = option.long.map(|l| format!("--{l}")).unwrap_or_default();
        eprintln!(
            "   {short:<4}{long:<14}{}",
            option.description.unwrap_or_default()
        );
    }

    eprintln!();
    for subcommand in command.list_subcommands() {
        eprintln!(
            "   {:<18}{}",
            subcommand.name,
            subcommand.description.unwrap_or_default()
        );
    }
}

fn print_evaluation(name: &str, evaluation: &Evaluation, depth: usize) {
    let indent = "  ".repeat(depth);
    println!("{indent}{name}");

    for (key, value) in evaluation.options() {
        println!("{indent}  {key} = {value}");
    }
    if !evaluation.leftovers().is_empty() {
        println!("{indent}  leftovers: {:?}", evaluation.leftovers());
    }

    if let Some((name, nested)) = evaluation.subcommand() {
        print_evaluation(name, nested, depth + 1);
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let parser = match parser() {
        Ok(parser) => parser,
        Err(error) => {
            log::error!("Invalid command line definition: {error}");
            return ExitCode::FAILURE;
        },
    };

    match parser.evaluate_env() {
        Ok(evaluation) => {
            print_evaluation(parser.root().name(), &evaluation, 0);
            ExitCode::SUCCESS
        },
        Err(error) => {
            eprintln!("error: {error}");
            if !error.candidates().is_empty() {
                eprintln!("did you mean one of {}?", error.candidates().join(", "));
            }
            eprintln!();
            print_usage(parser.root());
            ExitCode::FAILURE
        },
    }
}
