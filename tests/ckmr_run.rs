mod common;
use common::{Fixture, run_ckmr};

use std::{fs, path::PathBuf};

struct Inputs {
    source: Fixture,
    target: Fixture,
    lookup: Fixture,
    output_dir: Fixture,
}

impl Inputs {
    fn new() -> Self {
        Self {
            source    : Fixture::copy("geno/source.tsv"),
            target    : Fixture::copy("geno/target.tsv"),
            lookup    : Fixture::copy("lookup/lookup.tsv"),
            output_dir: Fixture::blank("ckmr-test-output"),
        }
    }

    fn ind_pairwise(&self, targets: &str, extra: &str) -> String {
        format!("ckmr-rs ind-pairwise --source {} --target {} --lookup {} --targets {targets} --output-dir {} {extra}",
            self.source, self.target, self.lookup, self.output_dir
        )
    }

    fn geno_id(&self, max_mismatch: i64, extra: &str) -> String {
        format!("ckmr-rs geno-id --source {} --max-mismatch {max_mismatch} --output-dir {} {extra}",
            self.source, self.output_dir
        )
    }

    fn output(&self, ext: &str) -> PathBuf {
        self.output_dir.join(format!("source.{ext}"))
    }
}

#[test]
fn ind_pairwise() -> anyhow::Result<()> {
    let inputs = Inputs::new();
    run_ckmr(&inputs.ind_pairwise("1-2", ""))?;
    validate_file!("source.pairwise", inputs.output("pairwise"));
    Ok(())
}

#[test]
fn ind_pairwise_multithreaded() -> anyhow::Result<()> {
    let inputs = Inputs::new();
    run_ckmr(&inputs.ind_pairwise("2 1 2", "--threads 3"))?;
    validate_file!("source.pairwise", inputs.output("pairwise"));
    Ok(())
}

#[test]
fn ind_pairwise_target_out_of_range() {
    let inputs = Inputs::new();
    let err = run_ckmr(&inputs.ind_pairwise("1-3", "")).expect_err("Only two targets");
    assert!(err.chain().any(|e| e.to_string().contains("target individual 3")));
}

#[test]
fn geno_id() -> anyhow::Result<()> {
    let inputs = Inputs::new();
    run_ckmr(&inputs.geno_id(1, ""))?;
    validate_file!("source.geno-id", inputs.output("geno-id"));
    Ok(())
}

#[test]
fn geno_id_multithreaded() -> anyhow::Result<()> {
    let inputs = Inputs::new();
    run_ckmr(&inputs.geno_id(1, "--threads 4"))?;
    validate_file!("source.geno-id", inputs.output("geno-id"));
    Ok(())
}

#[test]
fn geno_id_exact_duplicates() -> anyhow::Result<()> {
    let inputs = Inputs::new();
    run_ckmr(&inputs.geno_id(0, ""))?;
    let got = fs::read_to_string(inputs.output("geno-id"))?;
    pretty_assertions::assert_eq!(got, "ind1\tind2\tnum_mismatch\tnum_loc\n1\t2\t0\t3\n1\t4\t0\t3\n");
    Ok(())
}

#[test]
fn geno_id_negative_bound() {
    let inputs = Inputs::new();
    assert!(run_ckmr(&inputs.geno_id(-1, "")).is_err());
    assert!(!inputs.output("geno-id").exists());
}

#[test]
fn overwrite_protection() -> anyhow::Result<()> {
    let inputs = Inputs::new();
    run_ckmr(&inputs.geno_id(1, ""))?;
    assert!(run_ckmr(&inputs.geno_id(1, "")).is_err());
    run_ckmr(&inputs.geno_id(0, "--overwrite"))?;
    let got = fs::read_to_string(inputs.output("geno-id"))?;
    assert_eq!(got.lines().count(), 3);
    Ok(())
}

#[test]
fn missing_input_file() {
    let inputs = Inputs::new();
    let args = format!("ckmr-rs geno-id --source {}/missing.tsv --max-mismatch 0", inputs.output_dir);
    assert!(run_ckmr(&args).is_err());
}

#[test]
fn from_yaml_replay() -> anyhow::Result<()> {
    use clap::Parser;
    let inputs = Inputs::new();
    let cli = parser::Cli::try_parse_from(inputs.geno_id(1, "--overwrite").split_whitespace())?;
    let yaml = cli.serialize()?.expect("geno-id arguments are serialized");
    ckmr_rs::run(cli)?;

    fs::remove_file(inputs.output("geno-id"))?;
    run_ckmr(&format!("ckmr-rs from-yaml {}", yaml.display()))?;
    validate_file!("source.geno-id", inputs.output("geno-id"));
    Ok(())
}
