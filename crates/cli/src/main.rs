use anyhow::{bail, Context, Result};
use clap::{Parser as ClapParser, ValueEnum};
use colored::*;
use log::{debug, LevelFilter};
use simplelog::{Config as LogConfig, WriteLogger};
use std::{
    fs,
    io::{self, Write},
    process,
};

extern crate frontend;
extern crate runtime;

use frontend::lexer::Lexer;
use frontend::parser::Parser;
use frontend::printer;
use runtime::{environment::Env, interpreter::Interpreter};

// Exit codes of a script run
const EXIT_STATIC_ERR: i32 = 65;
const EXIT_RUNTIME_ERR: i32 = 70;


// --------
//   CLI
// --------

#[derive(ClapParser)]
#[command(version)]
#[command(about = "Interpreter for the Lox language")]
struct CLI {
    /// Path to the script to run
    #[arg(conflicts_with = "file")]
    script: Option<String>,

    #[arg(short, long)]
    /// Path to the script to run
    file: Option<String>,

    /// Interactive mode after interpreting a file
    #[arg(short, long)]
    inter: bool,

    /// Prints the AST before running it
    #[arg(short, long, value_enum)]
    ast_print: Option<AstFormat>,

    /// Enables debug logs on stderr
    #[arg(short, long)]
    debug: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum AstFormat {
    /// Lisp like expressions
    Sexpr,
    /// Reverse polish notation
    Rpn,
    /// Box drawing tree
    Tree,
}

// What happened to a piece of code
#[derive(Debug, PartialEq)]
enum Outcome {
    Success,
    StaticErrors,
    RuntimeError,
}

impl Outcome {
    fn exit_code(&self) -> i32 {
        match self {
            Outcome::Success => 0,
            Outcome::StaticErrors => EXIT_STATIC_ERR,
            Outcome::RuntimeError => EXIT_RUNTIME_ERR,
        }
    }
}

// Logs go to stderr to never mix with the program output
fn init_logging(debug: bool) -> Result<()> {
    let filter = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Error
    };

    match WriteLogger::init(filter, LogConfig::default(), io::stderr()) {
        Ok(_) => Ok(()),
        Err(e) => bail!("Failed to init logger: {}", e),
    }
}

fn interpret_file(file_name: &str, env: &mut Env, cli: &CLI) -> Result<Outcome> {
    eprintln!("Reading source file {}...", file_name.green());

    let source_code = fs::read_to_string(file_name)
        .with_context(|| format!("Error opening script file {}", file_name))?;

    Ok(interpretation_sequence(&source_code, env, cli))
}

// Lexing and parsing errors are all reported, the code is run only if
// there are none
fn interpretation_sequence(code: &str, env: &mut Env, cli: &CLI) -> Outcome {
    let mut lexer: Lexer = Default::default();
    let mut parser: Parser = Default::default();
    let mut interp = Interpreter::new(io::stdout());

    let mut has_errors = false;

    if let Err(errs) = lexer.tokenize(code) {
        has_errors = true;
        errs.iter().for_each(|e| eprintln!("{e}"));
    }

    if let Err(errs) = parser.build_ast(std::mem::take(&mut lexer.tokens)) {
        has_errors = true;
        errs.iter().for_each(|e| eprintln!("{e}"));
    }

    if has_errors {
        return Outcome::StaticErrors;
    }

    if let Some(format) = cli.ast_print {
        let printed = match format {
            AstFormat::Sexpr => printer::program(&parser.ast_nodes, printer::sexpr),
            AstFormat::Rpn => printer::program(&parser.ast_nodes, printer::rpn),
            AstFormat::Tree => printer::tree(&parser.ast_nodes),
        };

        println!("{}", "Program AST:".bold());
        print!("{printed}");
    }

    match interp.execute_program(&parser.ast_nodes, env) {
        Ok(_) => Outcome::Success,
        Err(e) => {
            debug!("Runtime error: {:?}", e);
            eprintln!("{}", e.to_code_err());
            Outcome::RuntimeError
        }
    }
}

// REPL. Each line runs in the same environment, errors do not stop it
fn repl(env: &mut Env, cli: &CLI) -> Result<()> {
    println!("\n       --- {} interpreter v{} ---", "Lox".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("{} mode started, 'quit' to exit", "Interactive".yellow().bold());

    // Local variables
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    let mut input = String::new();

    loop {
        input.clear();
        print!("> ");
        stdout.flush()?;

        // End of input
        if stdin.read_line(&mut input).context("Error reading from terminal")? == 0 {
            println!();
            return Ok(());
        }

        let trimmed_input = input.trim();

        match trimmed_input {
            "quit" => return Ok(()),
            "" => continue,
            _ => {
                let outcome = interpretation_sequence(trimmed_input, env, cli);
                debug!("Line outcome: {:?}", outcome);
            }
        }
    }
}

fn main() -> Result<()> {
    // Manage command line args
    let cli = CLI::parse();
    init_logging(cli.debug)?;

    // Create global environment
    let mut env = Env::new();

    match cli.script.as_ref().or(cli.file.as_ref()) {
        Some(file_name) => {
            let outcome = interpret_file(file_name, &mut env, &cli)?;

            // If interactive mode, we use the previous env
            if cli.inter {
                return repl(&mut env, &cli);
            }

            if outcome != Outcome::Success {
                io::stdout().flush()?;
                process::exit(outcome.exit_code());
            }

            Ok(())
        }
        None => repl(&mut env, &cli),
    }
}
