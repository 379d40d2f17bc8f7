use std::fmt;

/// The error type of the certwatch crate
#[derive(Debug, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub enum Error {
	/// The given string could not be parsed as a mail address
	InvalidAddress(String),
	/// An operation was rejected by the certificate's revocation state
	InvalidState(InvalidState),
	/// The given certificate couldn't be parsed
	CouldNotParseCertificate,
	/// A PEM error occurred
	#[cfg(feature = "pem")]
	PemError(String),
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		use self::Error::*;
		match self {
			InvalidAddress(addr) => write!(f, "Invalid mail address: {addr:?}")?,
			InvalidState(state) => state.fmt(f)?,
			CouldNotParseCertificate => write!(f, "Could not parse certificate")?,
			#[cfg(feature = "pem")]
			PemError(e) => write!(f, "PEM error: {e}")?,
		};
		Ok(())
	}
}

impl std::error::Error for Error {}

/// Ways an operation can conflict with a certificate's revocation state
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[non_exhaustive]
pub enum InvalidState {
	/// Revocation details were queried on a certificate that is not revoked
	NotRevoked,
	/// A revocation was recorded on a certificate that is already revoked
	AlreadyRevoked,
}

impl fmt::Display for InvalidState {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			InvalidState::NotRevoked => write!(f, "Certificate is not revoked"),
			InvalidState::AlreadyRevoked => write!(f, "Certificate is already revoked"),
		}
	}
}

impl From<InvalidState> for Error {
	fn from(state: InvalidState) -> Self {
		Error::InvalidState(state)
	}
}

pub(crate) trait ExternalError<T>: Sized {
	/// Convert into `Result<T, Error>`, stringifying the external error.
	fn _err(self) -> Result<T, Error>;
}
