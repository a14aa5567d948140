extern crate parser;
extern crate logger;

use std::fmt::{self, Display, Formatter};

use parser::{Cli, Commands, Common, IndPairwise, GenoId};
use pairwise::{PairwiseLikelihoodScanner, PairwiseRecord, PairwiseResult, DuplicateScanner, MismatchResult, DISPL_SEP};
use ckmr_io::{read, write::GenericWriter, parse::prepare_output_file};
use located_error::*;
use logger::Logger;

use anyhow::Result;
use rayon::ThreadPool;

#[macro_use]
extern crate log;

/// File extension of `ind-pairwise` results.
pub const PAIRWISE_EXT: &str = "pairwise";

/// File extension of `geno-id` results.
pub const GENO_ID_EXT: &str = "geno-id";

/// A likelihood record, tagged with the target individual it was computed against.
struct TargetRecord<'a> {
    target: usize,
    record: &'a PairwiseRecord,
}

impl TargetRecord<'_> {
    fn header() -> String {
        format!("{: <8}{DISPL_SEP}{}", "target", PairwiseResult::header())
    }
}

impl Display for TargetRecord<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{: <8}{DISPL_SEP}{}", self.target, self.record)
    }
}

/// Dedicated thread pool of `threads` workers, or `None` if the user requested a sequential run.
fn build_thread_pool(threads: usize) -> Result<Option<ThreadPool>> {
    if threads == 1 {
        return Ok(None)
    }
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .loc("While building thread pool")?;
    Ok(Some(pool))
}

fn run_ind_pairwise(common: &Common, args: &IndPairwise) -> Result<()> {
    let targets = args.target_indices().loc("While parsing --targets")?;
    if targets.is_empty() {
        warn!("No target individual requested through --targets. Output will only contain a header.");
    }

    let output_file = common.output_file(PAIRWISE_EXT)?;
    prepare_output_file(common.overwrite, &output_file)?;

    // ----------------------------- Read inputs
    let source = read::read_genotype_matrix(&common.source)?;
    let target = read::read_genotype_matrix(&args.target)?;
    let table  = read::read_lookup_table(&args.lookup)?;

    // ----------------------------- Scan each requested target.
    let pool    = build_thread_pool(common.threads)?;
    let scanner = PairwiseLikelihoodScanner::new(&table);
    let pg      = Logger::progress_bar(targets.len() as u64, "Scanning targets");
    let mut results = Vec::with_capacity(targets.len());
    for &target_index in &targets {
        let result = match &pool {
            Some(pool) => pool.install(|| scanner.par_scan(&source, &target, target_index)),
            None       => scanner.scan(&source, &target, target_index),
        }.with_loc(|| format!("While scanning target individual {target_index}"))?;
        results.push((target_index, result));
        pg.inc(1);
    }
    pg.finish_and_clear();

    // ----------------------------- Write results
    info!("Writing results to {}", output_file.display());
    let records = results.iter()
        .flat_map(|(target, result)| result.iter().map(move |record| TargetRecord{target: *target, record}));
    let mut writer = GenericWriter::new(Some(&output_file))?;
    writer.write_iter(std::iter::once(TargetRecord::header()))?;
    writer.write_iter(records)?;
    Ok(())
}

fn run_geno_id(common: &Common, args: &GenoId) -> Result<()> {
    let scanner = DuplicateScanner::new(args.max_mismatch).loc("While parsing --max-mismatch")?;

    let output_file = common.output_file(GENO_ID_EXT)?;
    prepare_output_file(common.overwrite, &output_file)?;

    let source = read::read_genotype_matrix(&common.source)?;

    let result: MismatchResult = match build_thread_pool(common.threads)? {
        Some(pool) => pool.install(|| scanner.par_scan(&source)),
        None       => scanner.scan(&source),
    };
    info!("Found {} pair(s) of individuals with at most {} mismatch(es)", result.len(), scanner.max_mismatch());

    info!("Writing results to {}", output_file.display());
    let mut writer = GenericWriter::new(Some(&output_file))?;
    writer.write_iter(std::iter::once(MismatchResult::header()))?;
    writer.write_iter(result.iter())?;
    Ok(())
}

/// Unpack the command line and run the requested subcommand.
///
/// # Errors
/// - if any input file is invalid, if a scan fails, or if results cannot be written.
pub fn run(cli: Cli) -> Result<()> {
    match cli.commands {
        Commands::IndPairwise {common, pairwise} => run_ind_pairwise(&common, &pairwise),
        Commands::GenoId {common, geno_id}       => run_geno_id(&common, &geno_id),
        Commands::FromYaml {yaml} => {
            let cli = Cli::deserialize(&yaml)?;
            self::run(cli)
        },
    }
}
