use crate::calculator;
use crate::tokenizer::Value;
use anyhow::Error;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::{BufRead, Write};
use std::ops::ControlFlow;
use tracing::debug;

const TITLE: &str = "Terminal Math Calculator";
const WIDTH: usize = 50;
// Leaves a blank line above each prompt
const PROMPT: &str = "\n>>> ";
const EXIT_COMMANDS: [&str; 3] = ["quit", "exit", "q"];

#[derive(Debug, PartialEq, Eq)]
pub enum Line<'a> {
    Exit,
    Blank,
    Expr(&'a str),
}

impl<'a> Line<'a> {
    pub fn classify(line: &'a str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            Line::Blank
        } else if EXIT_COMMANDS.iter().any(|cmd| line.eq_ignore_ascii_case(cmd)) {
            Line::Exit
        } else {
            Line::Expr(line)
        }
    }
}

pub fn format_value(value: Value) -> String {
    if value == 0.0 {
        "0".to_owned()
    } else {
        value.to_string()
    }
}

pub fn write_banner<W: Write>(w: &mut W) -> std::io::Result<()> {
    let rule = "=".repeat(WIDTH);
    writeln!(w, "{}", rule)?;
    writeln!(w, "{:^width$}", TITLE, width = WIDTH)?;
    writeln!(w, "{}", rule)?;
    writeln!(w, "\nWelcome! Enter mathematical expressions to calculate.")?;
    writeln!(w, "\nSupported operations:")?;
    writeln!(w, "  + : Addition")?;
    writeln!(w, "  - : Subtraction")?;
    writeln!(w, "  * : Multiplication")?;
    writeln!(w, "  / : Division")?;
    writeln!(w, "  () : Parentheses for grouping")?;
    writeln!(w, "\nExamples:")?;
    writeln!(w, "  2 + 2")?;
    writeln!(w, "  (5 + 3) * 2")?;
    writeln!(w, "  10 / 2 - 1")?;
    writeln!(w, "\nType 'quit' or 'exit' to close the calculator.")?;
    writeln!(w, "{}", rule)
}

pub fn handle_line<W: Write>(w: &mut W, line: &str) -> std::io::Result<ControlFlow<()>> {
    match Line::classify(line) {
        Line::Exit => {
            debug!("exit command");
            writeln!(w, "\nThank you for using {}!", TITLE)?;
            return Ok(ControlFlow::Break(()));
        }
        Line::Blank => {}
        Line::Expr(expr) => match calculator::evaluate(expr) {
            Ok(value) => writeln!(w, "Result: {}", format_value(value))?,
            Err(e) => {
                debug!(expr, error = %e, "rejected");
                writeln!(w, "Error: {}", e)?;
            }
        },
    }
    Ok(ControlFlow::Continue(()))
}

pub fn interactive(show_banner: bool) -> Result<(), Error> {
    let mut w = std::io::stdout();
    let mut editor = DefaultEditor::new()?;

    if show_banner {
        write_banner(&mut w)?;
    }

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                if handle_line(&mut w, &line)?.is_break() {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                writeln!(w, "\nCalculator interrupted. Goodbye!")?;
                break;
            }
            Err(ReadlineError::Eof) => {
                writeln!(w, "\nGoodbye!")?;
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }
    w.flush()?;

    Ok(())
}

pub fn batch<R: BufRead, W: Write>(reader: R, w: &mut W) -> Result<(), Error> {
    for line in reader.lines() {
        if handle_line(w, &line?)?.is_break() {
            break;
        }
    }
    w.flush()?;

    Ok(())
}
