use std::{io, process};

use anyhow::Context;
use clap::{Parser, Subcommand};
use letterboxed::{words, Board, Error, PrefixTree, Solution, Solver, SolverConfig};
use serde::Serialize;
use tracing::{info, Level};

mod play;

#[derive(Debug, Parser)]
#[clap(version, about = "Solve or play a Letter Boxed board")]
struct Args {
    /// path to word list
    dictionary: String,

    /// board sides from the top, clockwise (e.g. tjo-feb-cuy-hil)
    board: String,

    /// log level written to stderr
    #[clap(long, default_value = "warn")]
    log_level: String,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// find the best solution
    Solve(SolveConfig),
    /// play the board yourself
    Play,
}

#[derive(Debug, Parser)]
struct SolveConfig {
    /// longest chain of words to consider
    #[clap(short = 'n', long, default_value_t = 5)]
    max_words: usize,

    /// list every solution, best first
    #[clap(short, long)]
    all: bool,

    /// print results as json
    #[clap(long)]
    json: bool,

    /// search each starting letter on its own thread
    #[clap(short, long)]
    parallel: bool,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    found: usize,
    best: Option<&'a Solution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    solutions: Option<Vec<&'a Solution>>,
}

fn main() {
    if let Err(e) = run(&Args::parse()) {
        eprintln!("{e}");
        process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let level: Level = args.log_level.parse()?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let board: Board = args.board.parse()?;
    let words = words::read_words(&args.dictionary)
        .with_context(|| format!("unable to read word list {}", args.dictionary))?;

    // Words that can't be spelled on this board never take part in a solution.
    let dictionary: PrefixTree = words::playable_on(&board, words).collect();
    info!(words = dictionary.len(), "dictionary loaded");

    match &args.command {
        Command::Solve(config) => solve(&dictionary, board, config),
        Command::Play => {
            play::play(&dictionary, board);
            Ok(())
        }
    }
}

fn solve(dictionary: &PrefixTree, board: Board, config: &SolveConfig) -> anyhow::Result<()> {
    let mut solver = Solver::with_config(
        dictionary,
        board,
        SolverConfig::with_max_words(config.max_words),
    )?;

    if config.parallel {
        solver.find_all_solutions_parallel();
    } else {
        solver.find_all_solutions();
    }

    let best = match solver.find_best_solution() {
        Ok(best) => Some(best.clone()),
        Err(Error::NoSolutionFound { .. }) => None,
        Err(e) => return Err(e.into()),
    };

    let mut ranked: Vec<_> = solver.solutions().iter().collect();
    ranked.sort_by(|a, b| a.cmp_rank(b));
    let found = ranked.len();

    if config.json {
        let report = Report {
            found,
            best: best.as_ref(),
            solutions: config.all.then(|| ranked),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if config.all {
        for solution in &ranked {
            println!("{solution}");
        }
    }

    println!("{found} solutions found.");
    let best = best.ok_or(Error::NoSolutionFound {
        max_words: config.max_words,
    })?;
    println!("The best solution is: {best}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Args, Command};

    #[test]
    fn log_level_defaults_to_warn() {
        let args = Args::try_parse_from(["letterboxed", "words.txt", "tjo-feb-cuy-hil", "play"]).unwrap();
        assert_eq!(args.log_level, "warn");
        assert!(matches!(args.command, Command::Play));
    }

    #[test]
    fn solve_options() {
        let args = Args::try_parse_from([
            "letterboxed",
            "--log-level",
            "debug",
            "words.txt",
            "tjo-feb-cuy-hil",
            "solve",
            "-n",
            "3",
            "--all",
            "--parallel",
        ])
        .unwrap();

        assert_eq!(args.log_level, "debug");
        match args.command {
            Command::Solve(config) => {
                assert_eq!(config.max_words, 3);
                assert!(config.all && config.parallel && !config.json);
            }
            Command::Play => panic!("expected solve"),
        }
    }
}
