//! Command-line front end for the puzzlekit engines.
//!
//! # Usage
//!
//! Print the tokens of a pattern:
//!
//! ```sh
//! puzzlekit tokens '[0-9]{2,3}'
//! ```
//!
//! Match candidates against a pattern (exits with 1 if any is rejected):
//!
//! ```sh
//! puzzlekit match 'colou?r' color colour colouur
//! ```
//!
//! Solve puzzles from a file or stdin, one 81-character line or nine-line
//! grid per puzzle:
//!
//! ```sh
//! puzzlekit solve puzzles.txt --stats
//! puzzlekit --jobs 4 solve < puzzles.txt
//! ```
//!
//! Set `RUST_LOG=debug` to trace solver progress.

use std::{fs, io, path::PathBuf, process};

use clap::{Parser, Subcommand};
use derive_more::{Display, Error, From};
use log::debug;
use puzzlekit_pattern::{PatternError, Regex};
use puzzlekit_solver::{BacktrackSolver, SearchStats};
use rayon::prelude::*;

use self::input::InputError;

mod input;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Number of worker threads for batch solving (default: one per core).
    #[arg(short, long, global = true, value_name = "COUNT")]
    jobs: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the token sequence of a pattern.
    Tokens {
        /// Pattern to tokenize.
        pattern: String,
    },
    /// Match candidates against a pattern.
    Match {
        /// Pattern to match against.
        pattern: String,
        /// Candidate strings.
        #[arg(required = true)]
        candidates: Vec<String>,
    },
    /// Solve sudoku puzzles.
    Solve {
        /// Puzzle file; reads stdin when omitted.
        file: Option<PathBuf>,
        /// Print search counters after each solution.
        #[arg(long)]
        stats: bool,
        /// Disable dead-branch pruning.
        #[arg(long)]
        no_pruning: bool,
    },
}

#[derive(Debug, Display, Error, From)]
enum CliError {
    #[display("invalid pattern: {_0}")]
    Pattern(#[from] PatternError),
    #[display("invalid puzzle input: {_0}")]
    Input(#[from] InputError),
    #[display("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[display("failed to read stdin: {_0}")]
    Stdin(#[from] io::Error),
    #[display("failed to configure worker pool: {_0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// Whether every item of a command produced a positive result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    AllPassed,
    SomeFailed,
}

impl Verdict {
    fn from_passed(passed: bool) -> Self {
        if passed {
            Self::AllPassed
        } else {
            Self::SomeFailed
        }
    }
}

fn main() {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    match run(args) {
        Ok(Verdict::AllPassed) => {}
        Ok(Verdict::SomeFailed) => process::exit(1),
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(2);
        }
    }
}

fn run(args: Args) -> Result<Verdict, CliError> {
    if let Some(jobs) = args.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()?;
    }

    match args.command {
        Command::Tokens { pattern } => print_tokens(&pattern),
        Command::Match {
            pattern,
            candidates,
        } => match_candidates(&pattern, &candidates),
        Command::Solve {
            file,
            stats,
            no_pruning,
        } => {
            let solver = if no_pruning {
                BacktrackSolver::new().without_pruning()
            } else {
                BacktrackSolver::new()
            };
            solve_puzzles(file, &solver, stats)
        }
    }
}

fn print_tokens(pattern: &str) -> Result<Verdict, CliError> {
    let re = Regex::new(pattern)?;
    for token in re.tokens() {
        println!("{token}");
    }
    Ok(Verdict::AllPassed)
}

fn match_candidates(pattern: &str, candidates: &[String]) -> Result<Verdict, CliError> {
    let re = Regex::new(pattern)?;
    let mut passed = true;
    for candidate in candidates {
        match re.validate(candidate) {
            Ok(candidate) => println!("{candidate}: match"),
            Err(err) => {
                println!("{candidate}: no match ({})", err.reason());
                passed = false;
            }
        }
    }
    Ok(Verdict::from_passed(passed))
}

fn read_input(file: Option<PathBuf>) -> Result<String, CliError> {
    match file {
        Some(path) => fs::read_to_string(&path).map_err(|source| CliError::Read { path, source }),
        None => Ok(io::read_to_string(io::stdin())?),
    }
}

fn solve_puzzles(
    file: Option<PathBuf>,
    solver: &BacktrackSolver,
    show_stats: bool,
) -> Result<Verdict, CliError> {
    let text = read_input(file)?;
    let puzzles = input::parse_puzzles(&text)?;
    debug!("solving {} puzzles", puzzles.len());

    let results: Vec<_> = puzzles
        .par_iter()
        .map(|puzzle| {
            let mut stats = SearchStats::new();
            let result = solver.solve_with_stats(&puzzle.board, &mut stats);
            (puzzle.line, result, stats)
        })
        .collect();

    let mut passed = true;
    for (i, (line, result, stats)) in results.iter().enumerate() {
        if i > 0 {
            println!();
        }
        match result {
            Ok(solution) => println!("{solution}"),
            Err(err) => {
                debug!("puzzle at line {line}: {err}");
                println!("unsolvable");
                passed = false;
            }
        }
        if show_stats {
            println!(
                "# line {line}: placements={} backtracks={} pruned={}",
                stats.placements(),
                stats.backtracks(),
                stats.pruned()
            );
        }
    }
    Ok(Verdict::from_passed(passed))
}
