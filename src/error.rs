use derive_more::{Display, Error};

pub type Error = exn::Exn<ErrorKind>;
pub type Result<T> = std::result::Result<T, Error>;

/// Reasons the scanner refuses to start. Once scanning begins nothing is fatal.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("invalid configuration")]
    Config,
    #[display("cannot build HTTP client")]
    HttpClient,
    #[display("cannot start async runtime")]
    Runtime,
    #[display("cannot write report")]
    Output,
}
