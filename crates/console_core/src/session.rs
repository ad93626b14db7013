use std::io::{BufRead, Write};

use anyhow::Result;
use matrix::{Cell, Matrix};
use tracing::{debug, info};

use crate::command::{Command, COMMAND_TABLE};

/// Erase the visible screen, then home the cursor.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[1;1H";

/// Whether the command loop keeps going after a handler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Interactive session over one optional matrix. Generic over its reader and
/// writer so whole transcripts can be tested against in-memory buffers.
pub struct Session<R, W> {
    input: R,
    output: W,
    current: Option<Matrix>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            current: None,
        }
    }

    /// The matrix the session currently holds, if startup got that far.
    pub fn matrix(&self) -> Option<&Matrix> {
        self.current.as_ref()
    }

    /// Prompts for dimensions, fills the initial matrix, then loops on
    /// commands until `exit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        info!("session started");

        let Some(rows) = self.prompt_positive("Enter number of rows for the matrix: ")? else {
            return Ok(());
        };
        let Some(cols) = self.prompt_positive("Enter number of columns for the matrix: ")? else {
            return Ok(());
        };
        let mut matrix = Matrix::new(rows, cols)?;
        let filled = self.fill(&mut matrix)?;
        info!(rows, cols, "matrix created");
        self.current = Some(matrix);
        if filled == Flow::Quit {
            return Ok(());
        }

        loop {
            writeln!(self.output, "\nEnter a command ('help' for command list):")?;
            self.output.flush()?;
            let Some(line) = self.read_line()? else {
                break;
            };
            let normalized = line.to_lowercase();
            match Command::parse(&normalized) {
                Some(command) => {
                    debug!(?command, "dispatching command");
                    if self.dispatch(command)? == Flow::Quit {
                        break;
                    }
                }
                None if normalized.trim().is_empty() => {}
                None => {
                    writeln!(
                        self.output,
                        "Error: select a valid menu item or enter 'help' for assistance."
                    )?;
                }
            }
        }

        info!("session ended");
        Ok(())
    }

    fn dispatch(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Exit => Ok(Flow::Quit),
            Command::Reset => self.reset(),
            Command::Resize => self.resize(),
            Command::Edit => self.edit(),
            Command::Short => self.short(),
            Command::Aver => self.average(),
            Command::Help => self.help(),
            Command::Display => self.display(),
            Command::Clear => self.clear(),
        }
    }

    fn reset(&mut self) -> Result<Flow> {
        match self.current.as_mut() {
            Some(matrix) => {
                matrix.reset();
                writeln!(self.output, "Matrix has been reset and filled with zeros.")?;
            }
            None => writeln!(self.output, "First create a matrix.")?,
        }
        Ok(Flow::Continue)
    }

    fn resize(&mut self) -> Result<Flow> {
        if self.current.is_none() {
            writeln!(self.output, "First create a matrix.")?;
            return Ok(Flow::Continue);
        }
        let Some(rows) = self.prompt_positive("Enter new number of rows: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(cols) = self.prompt_positive("Enter new number of columns: ")? else {
            return Ok(Flow::Quit);
        };
        if let Some(matrix) = self.current.as_mut() {
            matrix.resize(rows, cols)?;
            info!(rows, cols, "matrix resized");
        }
        Ok(Flow::Continue)
    }

    fn edit(&mut self) -> Result<Flow> {
        let Some((rows, cols)) = self.extents() else {
            writeln!(self.output, "First create a matrix.")?;
            return Ok(Flow::Continue);
        };
        let Some(row) = self.prompt_index("Enter row index to change: ", "row", rows)? else {
            return Ok(Flow::Quit);
        };
        let Some(col) = self.prompt_index("Enter column index to change: ", "column", cols)?
        else {
            return Ok(Flow::Quit);
        };
        let prompt = format!("Enter new value for element [{row}, {col}]: ");
        let Some(value) = self.prompt_cell(&prompt)? else {
            return Ok(Flow::Quit);
        };
        if let Some(matrix) = self.current.as_mut() {
            matrix.set(row, col, value)?;
            debug!(row, col, value, "cell updated");
        }
        Ok(Flow::Continue)
    }

    fn short(&mut self) -> Result<Flow> {
        write!(self.output, "Enter a short value to create a matrix: ")?;
        self.output.flush()?;
        let Some(line) = self.read_line()? else {
            return Ok(Flow::Quit);
        };
        // One attempt only; an invalid token falls back to the menu.
        match line.trim().parse::<Cell>() {
            Ok(value) => {
                self.current = Some(Matrix::from_value(value));
                writeln!(self.output, "Matrix created from short value.")?;
                info!(value, "matrix replaced from scalar");
            }
            Err(_) => {
                writeln!(self.output, "Error: please enter a valid short integer.")?;
            }
        }
        Ok(Flow::Continue)
    }

    fn average(&mut self) -> Result<Flow> {
        match self.current.as_ref() {
            Some(matrix) => {
                let average = matrix.average();
                writeln!(self.output, "Average of the elements in the matrix: {average}")?;
            }
            None => writeln!(self.output, "First create a matrix.")?,
        }
        Ok(Flow::Continue)
    }

    fn help(&mut self) -> Result<Flow> {
        for (_, name, description) in COMMAND_TABLE {
            writeln!(self.output, "{name}: {description}")?;
        }
        Ok(Flow::Continue)
    }

    fn display(&mut self) -> Result<Flow> {
        match self.current.as_ref() {
            Some(matrix) => {
                writeln!(self.output, "Matrix:")?;
                write!(self.output, "{matrix}")?;
            }
            None => writeln!(self.output, "First create a matrix.")?,
        }
        Ok(Flow::Continue)
    }

    fn clear(&mut self) -> Result<Flow> {
        write!(self.output, "{CLEAR_SCREEN}")?;
        self.output.flush()?;
        Ok(Flow::Continue)
    }

    fn fill(&mut self, matrix: &mut Matrix) -> Result<Flow> {
        writeln!(
            self.output,
            "Enter elements for a matrix of size {}x{}:",
            matrix.rows(),
            matrix.cols()
        )?;
        for row in 0..matrix.rows() {
            for col in 0..matrix.cols() {
                let prompt = format!("Element [{row}, {col}]: ");
                let Some(value) = self.prompt_cell(&prompt)? else {
                    return Ok(Flow::Quit);
                };
                matrix.set(row, col, value)?;
            }
        }
        Ok(Flow::Continue)
    }

    fn extents(&self) -> Option<(usize, usize)> {
        self.current
            .as_ref()
            .map(|matrix| (matrix.rows(), matrix.cols()))
    }

    /// Asks until a positive integer is entered. `None` means input ended.
    fn prompt_positive(&mut self, prompt: &str) -> Result<Option<usize>> {
        loop {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match line.trim().parse::<usize>() {
                Ok(value) if value > 0 => return Ok(Some(value)),
                _ => writeln!(self.output, "Error: please enter a positive integer.")?,
            }
        }
    }

    /// Asks until the token parses as a cell value. `None` means input ended.
    fn prompt_cell(&mut self, prompt: &str) -> Result<Option<Cell>> {
        loop {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match line.trim().parse::<Cell>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => {
                    writeln!(self.output, "Error: please enter a valid short integer.")?;
                }
            }
        }
    }

    /// Asks until an index below `len` is entered. `None` means input ended.
    fn prompt_index(&mut self, prompt: &str, axis: &str, len: usize) -> Result<Option<usize>> {
        loop {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match line.trim().parse::<usize>() {
                Ok(index) if index < len => return Ok(Some(index)),
                _ => writeln!(
                    self.output,
                    "Error: enter a valid {axis} index from 0 to {}.",
                    len - 1
                )?,
            }
        }
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            debug!("input ended");
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
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
