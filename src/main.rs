//! CLI entry point for `cm2cortes`.

use std::io;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use cm2cortes::driver::batch::{self, OutputFormat};
use cm2cortes::driver::interactive;

#[derive(Parser)]
#[command(
    name = "cm2cortes",
    about = "Rewrite legacy CM_MILES queries into the CORTES_MILES schema"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rewrite every query in a CSV column and write the records to a file
    Batch {
        /// Input CSV file with a header row
        input: PathBuf,

        /// Output file
        #[arg(long, default_value = "queries_rewritten.csv")]
        output: PathBuf,

        /// Name of the input column holding the queries
        #[arg(long, default_value = "query")]
        column: String,

        /// Output format (csv or json)
        #[arg(long, default_value = "csv")]
        format: OutputFormat,
    },
    /// Read queries from the terminal and print their rewritten form
    Interactive,
    /// Show the conversion of a few built-in sample queries
    Demo,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Batch {
            input,
            output,
            column,
            format,
        } => run_batch(&input, &output, &column, format),
        Command::Interactive => {
            let stdin = io::stdin();
            if let Err(e) = interactive::run(stdin.lock(), &mut io::stdout()) {
                eprintln!("Error: {e}");
                process::exit(2);
            }
        }
        Command::Demo => run_demo(),
    }
}

fn run_batch(input: &Path, output: &Path, column: &str, format: OutputFormat) {
    match batch::run(input, output, column, format) {
        Ok(summary) => {
            for row in &summary.ambiguous_rows {
                eprintln!(
                    "Warning: row {row} carries more than one currency filter; only the first was used"
                );
            }
            println!("Queries read: {}", summary.queries_read);
            println!("Queries generated: {}", summary.queries_generated);
            println!("Output written to {}", output.display());
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(2);
        }
    }
}

const DEMO_QUERIES: [&str; 3] = [
    "SELECT SUM(MONTO) FROM CM_MILES WHERE CONCEPTO IN ('C01', 'C02') AND FECHA_DATOS = '{FD}'",
    "SELECT SUM(MONTO) FROM CM_MILES WHERE CONCEPTO IN ('C01', 'C02') AND MONEDA = 14 AND FECHA_DATOS = '{FD}'",
    "SELECT SUM(MONTO) FROM CM_MILES WHERE CONCEPTO IN ('C01', 'C02') AND MONEDA = 4 AND FECHA_DATOS = '{FD}'",
];

fn run_demo() {
    for (position, query) in DEMO_QUERIES.iter().enumerate() {
        println!("--- Example {} ---", position + 1);
        print!("{}", interactive::render_outcome(query));
        println!();
    }
}
