use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;
use thiserror::Error;
use tracing::debug;

#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Debug, Error)]
enum RunError {
    #[error("The size of the array must be a positive integer.")]
    SizeNotPositive,
    #[error("Each row must contain {expected} elements.")]
    RowWidth { expected: usize },
    #[error("Element '{token}' is not an integer.")]
    NotAnInteger { token: String },
    #[error("Vector X must contain {expected} elements.")]
    VectorWidth { expected: usize },
    #[error(transparent)]
    Io(#[from] io::Error),
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(args.log_level.as_str())
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let outcome = run(&mut stdin.lock(), &mut stdout.lock());
    match outcome {
        Ok(()) => Ok(()),
        Err(RunError::Io(error)) => Err(error.into()),
        // Invalid input ends the run, not the process status.
        Err(error) => {
            println!("Error: {error}");
            Ok(())
        }
    }
}

fn run(input: &mut impl BufRead, output: &mut impl Write) -> Result<(), RunError> {
    write!(output, "Enter the size of the array n (a positive integer): ")?;
    output.flush()?;
    let size_line = read_line(input)?.unwrap_or_default();
    let n = match size_line.trim().parse::<usize>() {
        Ok(n) if n > 0 => n,
        _ => return Err(RunError::SizeNotPositive),
    };

    let mut rows: Vec<Vec<i32>> = Vec::with_capacity(n);
    writeln!(output, "Enter the elements of the array (row by row):")?;
    for index in 1..=n {
        write!(output, "Row {index}: ")?;
        output.flush()?;
        let line = read_line(input)?.unwrap_or_default();
        rows.push(parse_elements(
            &line,
            n,
            RunError::RowWidth { expected: n },
        )?);
    }

    writeln!(output, "Enter the elements of vector X (space-separated):")?;
    let line = read_line(input)?.unwrap_or_default();
    let vector = parse_elements(&line, n, RunError::VectorWidth { expected: n })?;

    for column in (0..n).step_by(2) {
        for (row, value) in rows.iter_mut().zip(&vector) {
            row[column] = *value;
        }
    }
    debug!(n, "replaced even-indexed columns");

    writeln!(output, "\nArray after replacing even columns:")?;
    for row in &rows {
        let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
        writeln!(output, "{}", cells.join("\t"))?;
    }
    Ok(())
}

/// Splits on single spaces, so consecutive spaces yield empty tokens that
/// fail the width check. The width is checked before any token is parsed.
fn parse_elements(line: &str, expected: usize, wrong_width: RunError) -> Result<Vec<i32>, RunError> {
    let tokens: Vec<&str> = line.split(' ').collect();
    if tokens.len() != expected {
        return Err(wrong_width);
    }
    tokens
        .iter()
        .map(|token| {
            token.parse::<i32>().map_err(|_| RunError::NotAnInteger {
                token: (*token).to_string(),
            })
        })
        .collect()
}

fn read_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(Some(line))
}
