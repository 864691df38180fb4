use std::io::{self, BufRead, Write};

use crate::rewriter::query_rewriter;

/// Tokens that end the interactive session, compared case-insensitively.
const EXIT_TOKENS: [&str; 3] = ["salir", "exit", "quit"];

/// True when `input` is one of the session exit tokens.
pub fn is_exit_token(input: &str) -> bool {
    EXIT_TOKENS
        .iter()
        .any(|token| input.eq_ignore_ascii_case(token))
}

/// Run the interactive conversion loop.
///
/// Reads one query per line from `input` until an exit token or end of input,
/// writing each rewrite to `output`. Blank lines are skipped. A farewell is
/// printed on every way out of the loop.
pub fn run<R: BufRead, W: Write>(mut input: R, output: &mut W) -> Result<(), String> {
    writeln!(output, "=== CM_MILES -> CORTES_MILES query converter ===").map_err(io_error)?;
    writeln!(
        output,
        "Enter one query per line; 'salir', 'exit' or 'quit' ends the session."
    )
    .map_err(io_error)?;

    let mut line = String::new();
    loop {
        write!(output, "\n> ").map_err(io_error)?;
        output.flush().map_err(io_error)?;

        line.clear();
        if input.read_line(&mut line).map_err(io_error)? == 0 {
            break;
        }
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if is_exit_token(query) {
            break;
        }
        write!(output, "{}", render_outcome(query)).map_err(io_error)?;
    }

    writeln!(output, "Goodbye!").map_err(io_error)?;
    Ok(())
}

/// Format the rewrite of `query` for terminal display.
pub fn render_outcome(query: &str) -> String {
    use std::fmt::Write;

    let outcome = query_rewriter::rewrite(query);
    let mut text = String::new();

    writeln!(text, "Original:").unwrap();
    writeln!(text, "  {query}").unwrap();
    if let Some(filter) = outcome.filter() {
        if filter.is_ambiguous() {
            writeln!(
                text,
                "Warning: {} currency filters found; only the first was used",
                filter.occurrences
            )
            .unwrap();
        }
    }
    for (position, rewritten) in outcome.queries().iter().enumerate() {
        writeln!(
            text,
            "Generated {} [{}, currency {}]:",
            position + 1,
            rewritten.kind,
            rewritten.currency_code
        )
        .unwrap();
        writeln!(text, "  {}", rewritten.sql).unwrap();
    }
    text
}

fn io_error(error: io::Error) -> String {
    format!("Terminal I/O failed: {error}")
}
