// cparse: dump the tokens and AST of a C source file

use std::fs;
use std::path::PathBuf;
use std::process::exit;

use clap::Parser as CliParser;
use log::debug;

use cparse::parser::lexer::{Lexer, LexerOptions};
use cparse::parser::parse::Parser;

/// Tokenize and parse a C source file, printing the token stream and the AST
#[derive(CliParser, Debug)]
#[clap(name = "cparse", about = "Pratt parser for a small C subset")]
struct Cli {
    /// Input C source file
    #[clap(value_parser)]
    input: PathBuf,

    /// Keep comments as tokens and comment statements
    #[clap(long)]
    keep_comments: bool,

    /// Do not print the token stream
    #[clap(long)]
    no_tokens: bool,

    /// Do not print the AST
    #[clap(long)]
    no_ast: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let source = match fs::read_to_string(&cli.input) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: cannot read '{}': {}", cli.input.display(), e);
            exit(1);
        }
    };

    let options = LexerOptions {
        keep_comments: cli.keep_comments,
    };
    let tokens = match Lexer::with_options(&source, options).tokenize() {
        Ok(tokens) => tokens,
        Err(e) => {
            eprintln!("{}", e);
            exit(1);
        }
    };
    debug!("{} tokens from {}", tokens.len(), cli.input.display());

    if !cli.no_tokens {
        println!("------\nTOKENS\n------");
        for (index, token) in tokens.iter().enumerate() {
            println!("{}", token.debug_line(index));
        }
    }

    let program = match Parser::from_tokens(tokens).parse_program() {
        Ok(program) => program,
        Err(e) => {
            eprintln!("{}", e);
            exit(1);
        }
    };

    if !cli.no_ast {
        println!("\n------\nAST\n------");
        println!("{:#?}", program);
    }
}
