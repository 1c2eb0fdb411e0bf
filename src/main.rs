use anyhow::{bail, Error};
use clap::Parser;
use std::io::Write;
use tracing_subscriber::EnvFilter;

mod calculator;
#[cfg(test)]
mod proptests;
mod repl;
mod tokenizer;
mod validator;

/// Terminal calculator for +, -, *, / and parentheses.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Don't print the welcome banner in interactive mode.
    #[arg(long)]
    no_banner: bool,

    /// Expression to evaluate once. Without one, expressions are read from
    /// stdin.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    expression: Vec<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    if let Err(e) = run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Error> {
    let args = Args::parse();

    let stdout = std::io::stdout();

    if !args.expression.is_empty() {
        let expr = args.expression.join(" ");
        let value = match calculator::evaluate(&expr) {
            Ok(value) => value,
            Err(e) => bail!("Error: {}", e),
        };

        let mut w = std::io::BufWriter::new(stdout.lock());
        writeln!(&mut w, "{}", repl::format_value(value))?;
        w.flush()?;
    } else if atty::is(atty::Stream::Stdin) {
        repl::interactive(!args.no_banner)?;
    } else {
        let reader = std::io::stdin().lock();
        let mut w = std::io::BufWriter::new(stdout.lock());
        repl::batch(reader, &mut w)?;
    }

    Ok(())
}
