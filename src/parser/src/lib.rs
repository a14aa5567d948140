use std::{
    fs::File,
    path::{Path, PathBuf},
    str::FromStr,
    ops::RangeInclusive,
    fmt::{self, Display, Formatter}, ffi::OsStr
};

use located_error::*;

use clap::{Parser, Subcommand, Args};
use serde::{Serialize, Deserialize};
use log::debug;
use anyhow::{anyhow, Result};

mod error;
pub use error::ParserError;

#[derive(Parser, Debug, Serialize, Deserialize)]
#[clap(name="ckmr-rs", author, version, about, long_about = None)]
#[clap(propagate_version = true)]
/// ckmr-rs: pairwise genotype comparisons for close-kin mark-recapture
pub struct Cli {
    ///Set the verbosity level (-v -vv -vvv)
    ///
    /// Set the verbosity level of this program. Multiple levels allowed {n}
    ///
    /// -v: Info  |  -vv: Debug  | -vvv: Trace {n}
    ///
    /// Note that the program will still output warnings by default, even when this flag is off.
    /// Use The --quiet/-q to disable them
    #[clap(short='v', long, parse(from_occurrences), global=true)]
    pub verbose: u8,

    /// Disable warnings.
    ///
    /// By default, warnings are emmited and redirected to the console, even when verbose mode is off.
    /// Use this argument to disable this. Only errors will be displayed.
    #[clap(short='q', long, global=true)]
    pub quiet: bool,

    #[clap(subcommand)]
    pub commands: Commands,
}

impl Cli {
    /// Logger verbosity requested by the user: `0` when `--quiet`, warnings and above otherwise.
    #[must_use]
    pub fn verbosity(&self) -> u8 {
        if self.quiet { 0 } else { self.verbose.saturating_add(1) }
    }

    /// Serialize command line arguments within a `.yaml` file.
    ///
    /// # Behavior
    /// - File naming follows the convention '{current time}-{module name}.yaml'. current time follows the format
    ///   `YYYY`-`MM`-`DD`T`hhmmss`
    /// - File is written at the root of the user-provided `--output-dir` folder.
    /// - `from-yaml` runs are never re-serialized.
    ///
    /// # Errors
    /// - if `serde_yaml` fails to parse `Self` to a string.
    /// - if the output file cannot be written.
    pub fn serialize(&self) -> Result<Option<PathBuf>> {
        use ParserError::{SerializeArgs, WriteArgs};
        let Some(common) = self.commands.common() else {
            return Ok(None)
        };

        // Parse arguments to yaml and print to console.
        let serialized = serde_yaml::to_string(&self)
            .map_err(|err| SerializeArgs(err.to_string()))
            .loc("While serializing command line arguments")?;

        debug!("\n---- Command line args ----\n{}\n---", serialized);

        let current_time = chrono::offset::Local::now().format("%Y-%m-%dT%H%M%S").to_string();
        let output_file = common.output_dir.join(format!("{current_time}-{}.yaml", self.commands.name()));

        std::fs::write(&output_file, serialized)
            .map_err(|err| WriteArgs(output_file.display().to_string(), err))
            .loc("While serializing command line arguments")?;
        Ok(Some(output_file))
    }

    /// Deserialize a `.yaml` file into Command line arguments.
    ///
    /// # Errors
    /// - Returns `FileNotFound` or `PermissionDenied` if the provided `.yaml` is invalid,
    ///   or does not carry read permissions
    /// - if `serde_yaml` fails to parse the provided file to `Self`.
    pub fn deserialize(yaml: &Path) -> Result<Self> {
        let loc_msg = || format!("While deserializing arguments from {}", yaml.display());
        let file = File::open(yaml).with_loc(loc_msg)?;
        serde_yaml::from_reader::<_, Self>(file).with_loc(loc_msg)
    }
}

#[derive(Subcommand, Debug, Serialize, Deserialize)]
pub enum Commands {
    /// Accumulate lookup values between every source individual and one or more target individuals.
    ///
    /// For each requested target, every source individual is scored by summing the lookup value of
    /// its (source genotype, target genotype) pair, over all loci where both individuals carry a call.
    IndPairwise {
        #[clap(flatten)]
        common: Common,
        #[clap(flatten)]
        pairwise: IndPairwise,
    },

    /// Find pairs of source individuals whose genotypes mismatch at no more than --max-mismatch loci.
    ///
    /// Typically used to flag duplicate samples, or recaptures of the same individual.
    GenoId {
        #[clap(flatten)]
        common: Common,
        #[clap(flatten)]
        geno_id: GenoId,
    },

    /// Run ckmr-rs using a previously generated .yaml configuration file.
    ///
    /// This allows users to easily re-apply a ckmr-rs command using the exact same parameters
    /// and arguments.
    FromYaml {
        yaml: PathBuf,
    },
}

impl Commands {
    /// Kebab-case name of the subcommand.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::IndPairwise{..} => "ind-pairwise",
            Self::GenoId{..}      => "geno-id",
            Self::FromYaml{..}    => "from-yaml",
        }
    }

    /// Shared arguments of the subcommand, if any.
    #[must_use]
    pub fn common(&self) -> Option<&Common> {
        match self {
            Self::IndPairwise{common, ..} | Self::GenoId{common, ..} => Some(common),
            Self::FromYaml{..} => None,
        }
    }
}

#[derive(Args, Debug, Serialize, Deserialize)]
pub struct Common {
    /// Source genotype matrix.
    ///
    /// One individual per line, one whitespace-separated integer genotype code per locus. 'NA', '.'
    /// or any negative integer denote a missing call. Lines starting with '#' are ignored.
    #[clap(short='s', long, parse(try_from_os_str=valid_input_file))]
    pub source: PathBuf,

    /// Output directory.
    ///
    /// Results, along with a copy of the arguments of this run, are written within this directory.
    /// The directory is created if it does not exist.
    #[clap(short='o', long, default_value("ckmr-rs-output"), parse(try_from_os_str=valid_output_dir))]
    pub output_dir: PathBuf,

    /// Overwrite existing output files.
    ///
    /// By default, ckmr-rs will refuse to overwrite the results of a previous run.
    #[clap(short='w', long)]
    pub overwrite: bool,

    /// Number of parallel CPU threads.
    ///
    /// Parallelization is dispatched across source individuals. Use '1' to disable multithreading.
    #[clap(short='@', long, default_value("1"))]
    pub threads: usize,
}

impl Common {
    /// Output file path: `{output-dir}/{source file stem}.{ext}`
    ///
    /// # Errors
    /// - if a file stem cannot be extracted from `--source`
    pub fn output_file(&self, ext: &str) -> Result<PathBuf> {
        let file_stem = self.source.file_stem()
            .ok_or_else(|| anyhow!(ParserError::ParseOutputPrefix))
            .loc("While parsing command line arguments")?;

        // set_extension() would clobber dotted file stems.
        Ok(self.output_dir.join(format!("{}.{ext}", file_stem.to_string_lossy())))
    }
}

/// Directional likelihood scan of source individuals against target individuals.
#[derive(Args, Debug, Serialize, Deserialize)]
pub struct IndPairwise {
    /// Target genotype matrix.
    ///
    /// Must follow the same format, and describe the same loci, as --source.
    #[clap(short='t', long, parse(try_from_os_str=valid_input_file))]
    pub target: PathBuf,

    /// Lookup table of precomputed values.
    ///
    /// One locus per line, in locus order. Each line starts with the number of genotypes 'n' of this locus,
    /// followed by the 'n x n' values, row-major, indexed [source genotype][target genotype].
    #[clap(short='l', long, parse(try_from_os_str=valid_input_file))]
    pub lookup: PathBuf,

    /// 1-based indices of the target individuals to scan.
    ///
    /// Argument may accept slices (inclusive) such as '--targets 1-3' and/or discrete integers such as '--targets 1 4 13'.{n}
    /// Example:{n}
    ///   specifying          : '--targets 1-3 7 9-10 '{n}
    ///   ...will be parsed as: [1, 2, 3, 7, 9, 10]
    #[clap(short='T', long, multiple_values(true), required(true))]
    pub targets: Vec<String>,
}

impl IndPairwise {
    /// Sorted, deduplicated target indices requested through `--targets`.
    ///
    /// # Errors
    /// - `ParseArg` if any of the provided ranges cannot be parsed into integers.
    pub fn target_indices(&self) -> Result<Vec<usize>, ParserError> {
        parse_user_ranges(&self.targets, "targets")
    }
}

/// Early-exit search of near-identical genotype pairs within the source matrix.
#[derive(Args, Debug, Serialize, Deserialize)]
pub struct GenoId {
    /// Maximum number of mismatching loci tolerated for a pair to be reported.
    ///
    /// Only loci where both individuals carry a genotype call are compared.
    #[clap(short='m', long, allow_hyphen_values(true))]
    pub max_mismatch: i64,
}

#[derive(Debug, Clone, Copy)]
pub enum FileEntity {File, Directory}

impl Display for FileEntity {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::File      => write!(f, "File"),
            Self::Directory => write!(f, "Directory"),
        }
    }
}

impl FileEntity {
    fn validate(self, path: &Path) -> Result<(), ParserError> {
        use ParserError::InvalidFileEntity;
        let valid = match self {
            Self::File      => path.is_file(),
            Self::Directory => path.is_dir()
        };

        if valid {
            Ok(())
        } else {
            Err(InvalidFileEntity(self, path.display().to_string()))
        }
    }
}

fn assert_filesystem_entity_is_valid(s: &OsStr, entity: FileEntity) -> Result<()> {
    use ParserError::MissingFileEntity;
    let path = Path::new(s);
    if ! path.exists() {
        return Err(MissingFileEntity(entity, path.display().to_string()))
            .loc("While parsing arguments.")
    }

    entity.validate(path).loc("While parsing arguments.")
}

fn valid_input_file(s: &OsStr) -> Result<PathBuf> {
    assert_filesystem_entity_is_valid(s, FileEntity::File)
        .loc("While checking for file validity")?;
    Ok(PathBuf::from(s))
}

fn valid_output_dir(s: &OsStr) -> Result<PathBuf> {
    if ! Path::new(s).exists() {
        std::fs::create_dir_all(s)
            .with_loc(|| format!("While creating output directory {}", Path::new(s).display()))?;
    }
    assert_filesystem_entity_is_valid(s, FileEntity::Directory)
        .loc("While checking for directory validity")?;
    Ok(PathBuf::from(s))
}

/// Convert a user-defined string "range" into a vector of integers.
/// "9-14" thus becomes [9, 10, 11, 12, 13, 14]
/// Note that the range is fully inclusive.
fn parse_user_range<T>(s: &str) -> Result<Vec<T>, <T as FromStr>::Err>
where   T                : FromStr + Ord,
        RangeInclusive<T>: Iterator<Item = T>,
{
    match s.split_once('-') {
        Some((start, end)) => Ok((start.parse::<T>()?..=end.parse::<T>()?).collect()),
        None               => Ok(vec![s.parse::<T>()?])
    }
}

/// Convert a vector of Strings with user-input ranges to a single, sorted and deduplicated vector of integers.
///
/// ```text
/// --> ["1-3", "7"] for the user, becomes [1, 2, 3, 7] for our program.
/// ```
///
/// # Errors
///  returns a `ParseArg` error if the provided ranges cannot be parsed into integers.
pub fn parse_user_ranges<T>(ranges: &[String], arg: &str) -> Result<Vec<T>, ParserError>
where   T                   : FromStr + Ord,
        RangeInclusive<T>   : Iterator<Item = T>,
        <T as FromStr>::Err : ToString,
{
    let mut parsed_ranges = Vec::new();
    for range in ranges {
        let values = parse_user_range(range)
            .map_err(|err| ParserError::ParseArg{arg: arg.to_string(), err: err.to_string()})?;
        parsed_ranges.extend(values);
    }
    parsed_ranges.sort();
    parsed_ranges.dedup();
    Ok(parsed_ranges)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_strings(ranges: &[&str]) -> Vec<String> {
        ranges.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn user_ranges() -> Result<()> {
        let parsed: Vec<usize> = parse_user_ranges(&to_strings(&["7", "1-3", "2"]), "targets")?;
        assert_eq!(parsed, vec![1, 2, 3, 7]);
        Ok(())
    }

    #[test]
    fn user_ranges_invalid() {
        let err = parse_user_ranges::<usize>(&to_strings(&["1-a"]), "targets").expect_err("invalid digit");
        assert!(matches!(err, ParserError::ParseArg{ref arg, ..} if arg == "targets"));
    }

    #[test]
    fn range_ending_at_type_max() -> Result<()> {
        let parsed: Vec<u8> = parse_user_ranges(&to_strings(&["253-255"]), "targets")?;
        assert_eq!(parsed, vec![253, 254, 255]);

        let upper = format!("{}-{}", usize::MAX - 1, usize::MAX);
        let parsed: Vec<usize> = parse_user_ranges(&[upper], "targets")?;
        assert_eq!(parsed, vec![usize::MAX - 1, usize::MAX]);
        Ok(())
    }

    #[test]
    fn reversed_range_is_empty() -> Result<()> {
        let parsed: Vec<usize> = parse_user_ranges(&to_strings(&["5-2"]), "targets")?;
        assert!(parsed.is_empty());
        Ok(())
    }

    #[test]
    fn parse_ind_pairwise() -> Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let source = tmpdir.path().join("source.tsv");
        std::fs::write(&source, "0 1\n")?;
        let output_dir = tmpdir.path().join("out");

        let cli = Cli::try_parse_from([
            "ckmr-rs", "ind-pairwise", "-vv",
            "--source",     source.to_str().unwrap_or_default(),
            "--target",     source.to_str().unwrap_or_default(),
            "--lookup",     source.to_str().unwrap_or_default(),
            "--targets",    "1-2", "4",
            "--output-dir", output_dir.to_str().unwrap_or_default(),
        ])?;

        assert_eq!(cli.verbosity(), 3);
        assert!(output_dir.is_dir());
        let Commands::IndPairwise{common, pairwise} = &cli.commands else {
            panic!("Expected ind-pairwise, got {:?}", cli.commands)
        };
        assert_eq!(pairwise.target_indices()?, vec![1, 2, 4]);
        assert_eq!(common.threads, 1);
        assert!(!common.overwrite);
        assert_eq!(common.output_file("pairwise")?, output_dir.join("source.pairwise"));
        Ok(())
    }

    #[test]
    fn parse_geno_id_negative_bound() -> Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let source = tmpdir.path().join("source.tsv");
        std::fs::write(&source, "0 1\n")?;

        let cli = Cli::try_parse_from([
            "ckmr-rs", "geno-id", "--quiet",
            "--source",       source.to_str().unwrap_or_default(),
            "--max-mismatch", "-2",
            "--output-dir",   tmpdir.path().to_str().unwrap_or_default(),
        ])?;
        assert_eq!(cli.verbosity(), 0);
        let Commands::GenoId{geno_id, ..} = &cli.commands else {
            panic!("Expected geno-id, got {:?}", cli.commands)
        };
        assert_eq!(geno_id.max_mismatch, -2);
        Ok(())
    }

    #[test]
    fn missing_input_file() {
        let result = Cli::try_parse_from([
            "ckmr-rs", "geno-id", "--source", "./this/file/does/not/exist.tsv", "--max-mismatch", "0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn yaml_roundtrip() -> Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let source = tmpdir.path().join("source.tsv");
        std::fs::write(&source, "0 1\n")?;

        let cli = Cli::try_parse_from([
            "ckmr-rs", "geno-id",
            "--source",       source.to_str().unwrap_or_default(),
            "--max-mismatch", "3",
            "--threads",      "4",
            "--output-dir",   tmpdir.path().to_str().unwrap_or_default(),
        ])?;
        let yaml = cli.serialize()?.ok_or_else(|| anyhow!("geno-id should be serialized"))?;
        assert!(yaml.file_name().and_then(OsStr::to_str).is_some_and(|name| name.ends_with("-geno-id.yaml")));

        let replayed = Cli::deserialize(&yaml)?;
        let Commands::GenoId{common, geno_id} = replayed.commands else {
            panic!("Expected geno-id")
        };
        assert_eq!(geno_id.max_mismatch, 3);
        assert_eq!(common.threads, 4);
        assert_eq!(common.source, source);
        Ok(())
    }

    #[test]
    fn from_yaml_is_not_serialized() -> Result<()> {
        let cli = Cli::try_parse_from(["ckmr-rs", "from-yaml", "previous-run.yaml"])?;
        assert!(cli.serialize()?.is_none());
        assert_eq!(cli.commands.name(), "from-yaml");
        Ok(())
    }
}
