//! Command-line front end for the hexer tracker.
//!
//! Reads one command per line, prints exactly one response line per command,
//! and stops on `Exit` or end of input (neither produces output).

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use hexer_tracker::Session;

#[derive(Parser)]
#[command(
    name = "hexer",
    about = "hexer — track Geralt's ingredients, potions, trophies, and bestiary",
    version
)]
struct Cli {
    /// Read commands from a script file instead of standard input
    script: Option<PathBuf>,

    /// Print a ">> " prompt before each line (interactive use)
    #[arg(long)]
    prompt: bool,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.script {
        Some(path) => run_script(&path),
        None => run_stdin(cli.prompt),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Feed every line of a script file through one session.
fn run_script(path: &Path) -> Result<(), String> {
    let content =
        fs::read_to_string(path).map_err(|e| format!("cannot read {}: {e}", path.display()))?;

    let mut session = Session::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in content.lines() {
        match session.respond(line) {
            Some(reply) => writeln!(out, "{reply}").map_err(|e| e.to_string())?,
            None => break,
        }
    }
    Ok(())
}

/// Interactive loop over standard input.
fn run_stdin(prompt: bool) -> Result<(), String> {
    let mut session = Session::new();
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut line = String::new();
    loop {
        if prompt {
            write!(out, ">> ").map_err(|e| e.to_string())?;
            out.flush().map_err(|e| e.to_string())?;
        }

        line.clear();
        let read = input.read_line(&mut line).map_err(|e| e.to_string())?;
        if read == 0 {
            break;
        }

        let trimmed = line.strip_suffix('\n').unwrap_or(&line);
        let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
        match session.respond(trimmed) {
            Some(reply) => writeln!(out, "{reply}").map_err(|e| e.to_string())?,
            None => break,
        }
    }
    Ok(())
}
