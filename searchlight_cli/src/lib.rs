use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
    time::Instant,
};

use clap::Parser;
use thiserror::Error;

pub trait State: searchlight::State {
    type ParseError: fmt::Debug;

    fn parse(s: &str) -> Result<(Self, Self::Data), Self::ParseError>;
    fn display(&self, data: &Self::Data, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

struct DisplayState<'a, S: State>(&'a S, &'a S::Data);

impl<'a, S: State> fmt::Display for DisplayState<'a, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.display(self.1, f)
    }
}

#[derive(Debug, Parser)]
#[command(about = "Search puzzle levels for shortest solutions", long_about = None)]
struct Args {
    /// Print states along with solutions
    #[arg(short, long)]
    verbose: bool,

    /// Do not print solutions
    #[arg(short, long)]
    quiet: bool,

    /// Paths to level files
    #[arg(required = true)]
    paths: Vec<PathBuf>,
}

pub fn execute<S: State>()
where
    S::Action: fmt::Display,
{
    let args = Args::parse();

    for path in &args.paths {
        if let Err(e) = solve_path::<S>(path, &args) {
            eprintln!("Error while solving '{}':\n{}", path.display(), e);
        }
    }
}

#[derive(Debug, Error)]
enum SolveError<T: fmt::Debug> {
    #[error("failed to read level: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse level: {0:?}")]
    Parse(T),
}

fn solve_path<S: State>(path: &Path, args: &Args) -> Result<(), SolveError<S::ParseError>>
where
    S::Action: fmt::Display,
{
    let now = Instant::now();
    let (initial_state, data) =
        S::parse(&fs::read_to_string(path)?).map_err(SolveError::Parse)?;
    let parse_elapsed = now.elapsed();

    let now = Instant::now();
    let result = searchlight::solve(initial_state.clone(), &data);
    let solve_elapsed = now.elapsed();

    println!("{}:", path.display());
    println!(
        "Parse: {}.{:09}s",
        parse_elapsed.as_secs(),
        parse_elapsed.subsec_nanos()
    );
    println!(
        "Solve: {}.{:09}s",
        solve_elapsed.as_secs(),
        solve_elapsed.subsec_nanos()
    );

    if args.quiet {
        return Ok(());
    }

    if let Some(solution) = result {
        println!("Found solution of length {}:", solution.len());

        if args.verbose {
            println!("{}", DisplayState(&initial_state, &data));
            for (action, state) in &solution {
                println!("{}", action);
                println!("{}", DisplayState(state, &data));
            }
        } else {
            let mut steps = solution.iter();
            if let Some((action, _)) = steps.next() {
                print!("{}", action);
            }
            for (action, _) in steps {
                print!(", {}", action);
            }
            println!();
        }
    } else {
        println!("No solution");
    }

    Ok(())
}
