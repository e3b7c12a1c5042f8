use std::{fs, path::PathBuf};

use calcrs::{Context, ExprKind};
use clap::Parser;
use log::debug;
use rustyline::{DefaultEditor, error::ReadlineError};

const PROMPT: &str = "eval> ";

/// calcrs is an interactive calculator with variables, user-defined functions
/// and summation/product built-ins.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Imports the built-in math library (constants and functions) at startup.
    #[arg(short, long)]
    math: bool,

    /// Exits once the script has been replayed instead of opening the prompt.
    #[arg(short, long)]
    quit: bool,

    /// A file whose lines are replayed, as if typed at the prompt, before the
    /// session starts.
    script: Option<PathBuf>,
}

/// What the session does after a line has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut context = Context::new();
    if args.math {
        context.import_builtins();
    }

    if let Some(path) = &args.script {
        let script = fs::read_to_string(path).unwrap_or_else(|e| {
                                                   eprintln!("Failed to load the script '{}': {e}",
                                                             path.display());
                                                   std::process::exit(1);
                                               });
        debug!("replaying {}", path.display());
        for line in script.lines() {
            println!("{PROMPT}{line}");
            if handle_line(line, &mut context) == Flow::Exit {
                return;
            }
        }
    }

    if !args.quit {
        run_repl(&mut context);
    }
}

fn run_repl(context: &mut Context) {
    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("error: failed to initialize the prompt: {e}");
            std::process::exit(2);
        },
    };

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = editor.add_history_entry(line.as_str());
                }
                if handle_line(&line, context) == Flow::Exit {
                    return;
                }
            },
            Err(ReadlineError::Interrupted) => {},
            Err(ReadlineError::Eof) => return,
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(2);
            },
        }
    }
}

/// Runs a `!` command or executes an input line, printing the outcome.
fn handle_line(line: &str, context: &mut Context) -> Flow {
    if line.trim().is_empty() {
        return Flow::Continue;
    }

    if let Some(command) = line.strip_prefix('!') {
        match command.trim() {
            "exit" => return Flow::Exit,
            "math" => context.import_builtins(),
            "list" => list(context),
            _ => println!("unknown command"),
        }
        return Flow::Continue;
    }

    match context.exec(line) {
        Ok((ExprKind::Expr, value)) => println!(" = {value}"),
        Ok(_) => {},
        Err(e) => eprintln!("{e}"),
    }
    Flow::Continue
}

fn list(context: &Context) {
    let mut variables = context.variables().iter().collect::<Vec<_>>();
    variables.sort_by(|a, b| a.0.cmp(b.0));
    println!(" - Variables:");
    for (name, value) in variables {
        println!("\t{name} = {value}");
    }

    let mut functions = context.functions().iter().collect::<Vec<_>>();
    functions.sort_by(|a, b| a.0.cmp(b.0));
    println!(" - Functions:");
    for (name, function) in functions {
        println!("\t{name} ({}, {} argument(s))", function.kind(), function.arity());
    }
}
