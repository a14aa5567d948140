use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("Failed to register the logger within the log facade")]
    SetLogger(#[source] log::SetLoggerError),

    #[error("Logger was initialized twice")]
    AlreadyInitialized,
}
