use thiserror::Error;
use crate::FileEntity;

#[derive(Error, Debug)]
pub enum ParserError{
    #[error("Invalid slice or value format for --{arg}. [{err}]")]
    ParseArg{arg: String, err: String},

    #[error("{0} {1} does not exist")]
    MissingFileEntity(FileEntity, String),

    #[error("{1} is not a {0}")]
    InvalidFileEntity(FileEntity, String),

    #[error("Failed to generate an output file prefix. Note that file prefixes are generated from the --source filestem")]
    ParseOutputPrefix,

    #[error("Failed to serialize command line arguments. got [{0}]")]
    SerializeArgs(String),

    #[error("Unable to serialize arguments into {0}")]
    WriteArgs(String, #[source] std::io::Error),
}
