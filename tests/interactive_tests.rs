use std::io::Cursor;

use cm2cortes::driver::interactive;

fn run_session(input: &str) -> String {
    let mut output = Vec::new();
    interactive::run(Cursor::new(input.as_bytes()), &mut output)
        .expect("session should complete");
    String::from_utf8(output).expect("session output should be UTF-8")
}

#[test]
fn session_rewrites_queries_until_the_exit_token() {
    let output = run_session(
        "SELECT SUM(MONTO) FROM CM_MILES WHERE A = 1 AND MONEDA = 4\nsalir\n",
    );
    assert!(output.contains("CM_MILES -> CORTES_MILES"));
    assert!(output.contains("SELECT SUM(ME) FROM CORTES_MILES WHERE A = 1"));
    assert!(output.contains("[specific, currency 4]"));
    assert!(output.contains("Goodbye!"));
}

#[test]
fn exit_tokens_work_in_any_casing() {
    for token in ["salir", "SALIR", "Exit", "QUIT", "  quit  "] {
        let output = run_session(&format!("{token}\n"));
        assert!(output.contains("Goodbye!"), "token {token:?} should end the session");
        assert!(!output.contains("Generated"));
    }
}

#[test]
fn end_of_input_ends_the_session_gracefully() {
    let output = run_session("SELECT SUM(MONTO) FROM CM_MILES\n");
    assert!(output.contains("Generated 1 [unfiltered-MN, currency 14]:"));
    assert!(output.contains("Generated 2 [unfiltered-ME, currency 4]:"));
    assert!(output.contains("Goodbye!"));
}

#[test]
fn blank_lines_are_skipped_and_processing_continues() {
    let output = run_session("\n   \nSELECT SUM(MONTO) FROM CM_MILES WHERE A = 1 AND MONEDA = 14\nexit\n");
    assert!(output.contains("SELECT SUM(MN) FROM CORTES_MILES WHERE A = 1"));
}

#[test]
fn one_query_per_line_is_processed_independently() {
    let output = run_session(
        "SELECT SUM(MONTO) FROM CM_MILES WHERE A = 1 AND MONEDA = 4\n\
         not a query at all\n\
         SELECT SUM(MONTO) FROM CM_MILES WHERE B = 2\n\
         quit\n",
    );
    // The malformed middle line passes through and the loop keeps going.
    assert!(output.contains("SELECT SUM(ME) FROM CORTES_MILES WHERE A = 1"));
    assert!(output.contains("not a query at all"));
    assert!(output.contains("SELECT SUM(MN) FROM CORTES_MILES WHERE B = 2"));
    assert!(output.contains("Goodbye!"));
}

#[test]
fn ambiguous_filters_are_surfaced_to_the_user() {
    let output = run_session("x AND MONEDA = 4 AND MONEDA = 14\nsalir\n");
    assert!(output.contains("Warning: 2 currency filters found; only the first was used"));
}
