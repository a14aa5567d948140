mod fixture;
pub use fixture::{Fixture, TEST_DATA_DIR};

use std::path::Path;

/// Contents of an expected output file, stored under `tests/test-data/expect`.
pub fn expected(filename: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(TEST_DATA_DIR).join("expect").join(filename);
    std::fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to open {}", path.display()))
}

/// Parse a whitespace-separated command line and run it.
pub fn run_ckmr(args: &str) -> anyhow::Result<()> {
    use clap::Parser;
    let cli = parser::Cli::try_parse_from(args.split_whitespace())?;
    ckmr_rs::run(cli)
}

#[macro_export]
macro_rules! validate_file {
    ($expected_file:expr, $obtained_file:expr) => {
        let want = $crate::common::expected($expected_file);
        let got  = std::fs::read_to_string(&$obtained_file)
            .unwrap_or_else(|_| panic!("Failed to open {:?}", $obtained_file));
        pretty_assertions::assert_eq!(want, got)
    };
}
