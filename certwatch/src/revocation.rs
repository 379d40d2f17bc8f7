use std::fmt;

use time::OffsetDateTime;

use crate::{Error, InvalidState};

/// Identifies the reason a certificate was revoked.
/// See RFC 5280 §5.3.1[^1]
///
/// [^1] <https://www.rfc-editor.org/rfc/rfc5280#section-5.3.1>
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[allow(missing_docs)] // Not much to add above the code name.
pub enum RevocationReason {
	Unspecified = 0,
	KeyCompromise = 1,
	CaCompromise = 2,
	AffiliationChanged = 3,
	Superseded = 4,
	CessationOfOperation = 5,
	CertificateHold = 6,
	// 7 is not defined.
	RemoveFromCrl = 8,
	PrivilegeWithdrawn = 9,
	AaCompromise = 10,
}

impl fmt::Display for RevocationReason {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		use RevocationReason::*;
		// The ASN.1 identifiers from RFC 5280 §5.3.1.
		let name = match self {
			Unspecified => "unspecified",
			KeyCompromise => "keyCompromise",
			CaCompromise => "cACompromise",
			AffiliationChanged => "affiliationChanged",
			Superseded => "superseded",
			CessationOfOperation => "cessationOfOperation",
			CertificateHold => "certificateHold",
			RemoveFromCrl => "removeFromCRL",
			PrivilegeWithdrawn => "privilegeWithdrawn",
			AaCompromise => "aACompromise",
		};
		write!(f, "{name}")
	}
}

/// Metadata recorded when a certificate is revoked.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Revocation {
	/// The date at which the CA processed the revocation.
	pub time: OffsetDateTime,
	/// An optional reason code identifying why the certificate was revoked.
	pub reason: Option<RevocationReason>,
}

/// Revocation state of a certificate.
///
/// Every certificate starts out [`Active`](RevocationState::Active). Revoking
/// it records a [`Revocation`] and is final; there is no way back to the
/// active state and the recorded metadata is never overwritten.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum RevocationState {
	/// The certificate has not been revoked.
	Active,
	/// The certificate has been revoked at the recorded point in time.
	Revoked(Revocation),
}

impl Default for RevocationState {
	fn default() -> Self {
		RevocationState::Active
	}
}

impl RevocationState {
	/// Records the revocation of an active certificate.
	///
	/// Fails with [`InvalidState::AlreadyRevoked`] if a revocation has
	/// already been recorded; the first record stands.
	pub fn revoke(
		&mut self,
		time: OffsetDateTime,
		reason: Option<RevocationReason>,
	) -> Result<(), Error> {
		match self {
			RevocationState::Active => {
				*self = RevocationState::Revoked(Revocation { time, reason });
				Ok(())
			},
			RevocationState::Revoked(_) => Err(InvalidState::AlreadyRevoked.into()),
		}
	}

	/// Returns the revocation metadata of a revoked certificate.
	///
	/// Fails with [`InvalidState::NotRevoked`] while the certificate is
	/// active; revocation metadata exists only once it has been revoked.
	pub fn get_revocation(&self) -> Result<&Revocation, Error> {
		match self {
			RevocationState::Revoked(revocation) => Ok(revocation),
			RevocationState::Active => Err(InvalidState::NotRevoked.into()),
		}
	}

	/// Whether a revocation has been recorded.
	pub fn revoked(&self) -> bool {
		matches!(self, RevocationState::Revoked(_))
	}
}

#[cfg(test)]
mod revocation_state_tests {
	use time::Duration;

	use super::*;

	fn day(n: i64) -> OffsetDateTime {
		OffsetDateTime::UNIX_EPOCH + Duration::days(n)
	}

	#[test]
	fn active_has_no_revocation() {
		let state = RevocationState::Active;
		assert!(!state.revoked());
		assert_eq!(
			state.get_revocation(),
			Err(Error::InvalidState(InvalidState::NotRevoked))
		);
	}

	#[test]
	fn revoke_records_metadata() {
		let mut state = RevocationState::default();
		state
			.revoke(day(19_000), Some(RevocationReason::KeyCompromise))
			.unwrap();

		assert!(state.revoked());
		let revocation = state.get_revocation().unwrap();
		assert_eq!(revocation.time, day(19_000));
		assert_eq!(revocation.reason, Some(RevocationReason::KeyCompromise));
	}

	#[test]
	fn second_revocation_is_rejected() {
		let mut state = RevocationState::Active;
		state.revoke(day(1), None).unwrap();

		assert_eq!(
			state.revoke(day(2), Some(RevocationReason::Superseded)),
			Err(Error::InvalidState(InvalidState::AlreadyRevoked))
		);
		// The original record is untouched.
		assert_eq!(state.get_revocation().unwrap().time, day(1));
	}

	#[test]
	fn reason_names() {
		assert_eq!(RevocationReason::Unspecified.to_string(), "unspecified");
		assert_eq!(RevocationReason::KeyCompromise.to_string(), "keyCompromise");
		assert_eq!(RevocationReason::CaCompromise.to_string(), "cACompromise");
		assert_eq!(RevocationReason::RemoveFromCrl.to_string(), "removeFromCRL");
	}
}
