//! Fixtures and helpers for testing the glider DAC checks.
//!
//! [`glider_dataset`] builds a file that passes every check and
//! [`mock_time_series`] one whose coordinates are entirely fill. The table
//! fixtures write NCEI authority tables to temporary fallback files, and
//! [`TableServer`] serves the same text over HTTP while counting requests.
//!
//! ```ignore
//! use test_utils::{assert_score, glider_dataset, init_tracing};
//! ```

pub mod fixtures;
pub mod server;
pub mod tables;

// fixtures, table text and the server are used straight from the root
pub use fixtures::*;
pub use server::*;
pub use tables::*;

/// Install a test-friendly tracing subscriber.
///
/// Honours `RUST_LOG` and defaults to `debug`. Safe to call from every test.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Assert two converted values agree within `tolerance`.
#[macro_export]
macro_rules! assert_approx_eq {
    ($actual:expr, $expected:expr, $tolerance:expr) => {{
        let (actual, expected): (f64, f64) = ($actual, $expected);
        assert!(
            (actual - expected).abs() <= $tolerance,
            "{} is not within {} of {}",
            actual,
            $tolerance,
            expected
        );
    }};
}

/// Assert that a check result has the given `(score, out_of)`.
///
/// ```ignore
/// assert_score!(check.check_dimensions(&ds), (2, 2));
/// ```
#[macro_export]
macro_rules! assert_score {
    ($result:expr, ($score:expr, $out_of:expr)) => {{
        let result = &$result;
        assert_eq!(
            (result.score, result.out_of),
            ($score, $out_of),
            "unexpected score, messages: {:?}",
            result.messages
        );
    }};
}
