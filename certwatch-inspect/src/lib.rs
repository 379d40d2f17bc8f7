#![warn(missing_docs)]
//! Renders the [certwatch] inventory view of PEM certificates: subject and
//! validity data, the OpenSSL-style extension strings and the HPKP pin,
//! optionally resolved against the certificate of the issuing CA.

mod report;
pub use report::{load_certificate, report};

/// Handy shortcut for the boxed error type used throughout this binary.
pub type Result<T> = std::result::Result<T, Error>;

/// Anything that can go wrong while loading or rendering a certificate.
pub type Error = Box<dyn std::error::Error + Send + Sync>;
