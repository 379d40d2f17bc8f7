use std::sync::Arc;

use pki_types::CertificateDer;
use time::OffsetDateTime;
use x509_parser::certificate::X509Certificate;
use x509_parser::extensions::{BasicConstraints, ParsedExtension};

#[cfg(feature = "pem")]
use crate::error::ExternalError;
use crate::revocation::{Revocation, RevocationReason, RevocationState};
use crate::{ext, pin, Error};

/// An issued certificate as the inventory tracks it: the DER bytes, an
/// optional shared reference to the issuing CA's model, and the revocation
/// state.
///
/// A CA is not a separate type; it is a certificate whose basicConstraints
/// say so (see [`is_ca`](Certificate::is_ca)). All textual projections are
/// computed from the stored DER on demand, never cached, so they always
/// reflect exactly what the bytes say.
#[derive(Debug, Clone)]
pub struct Certificate {
	der: CertificateDer<'static>,
	issuer: Option<Arc<Certificate>>,
	state: RevocationState,
}

impl Certificate {
	/// Loads a certificate from its DER encoding.
	///
	/// The bytes are parsed once up front, so a value of this type is known
	/// to decode; fails with [`Error::CouldNotParseCertificate`] otherwise.
	pub fn from_der(der: &[u8]) -> Result<Self, Error> {
		let der = CertificateDer::from(der.to_vec());
		x509_parser::parse_x509_certificate(&der).or(Err(Error::CouldNotParseCertificate))?;

		Ok(Certificate {
			der,
			issuer: None,
			state: RevocationState::Active,
		})
	}

	/// Loads a certificate from the ASCII PEM format.
	#[cfg(feature = "pem")]
	pub fn from_pem(pem_str: &str) -> Result<Self, Error> {
		let certificate = pem::parse(pem_str)._err()?;
		Self::from_der(certificate.contents())
	}

	/// Links the issuing CA of this certificate.
	///
	/// The reference is shared, not owned: all certificates issued by one CA
	/// point at a single model of it.
	pub fn with_issuer(mut self, issuer: Arc<Certificate>) -> Self {
		self.issuer = Some(issuer);
		self
	}

	/// Marks the certificate revoked at construction time, for inventories
	/// whose storage already carries a revocation record.
	pub fn with_revocation(
		mut self,
		time: OffsetDateTime,
		reason: Option<RevocationReason>,
	) -> Self {
		self.state = RevocationState::Revoked(Revocation { time, reason });
		self
	}

	/// Raw DER bytes of the certificate.
	pub fn der(&self) -> &CertificateDer<'static> {
		&self.der
	}

	/// The issuing CA's model, when linked.
	pub fn issuer(&self) -> Option<&Certificate> {
		self.issuer.as_deref()
	}

	/// Whether the certificate has been revoked.
	pub fn revoked(&self) -> bool {
		self.state.revoked()
	}

	/// The revocation state.
	pub fn revocation_state(&self) -> &RevocationState {
		&self.state
	}

	/// Records the revocation of this certificate.
	///
	/// Fails with [`crate::InvalidState::AlreadyRevoked`] when called twice;
	/// the first record stands.
	pub fn revoke(
		&mut self,
		time: OffsetDateTime,
		reason: Option<RevocationReason>,
	) -> Result<(), Error> {
		self.state.revoke(time, reason)
	}

	/// Returns when and why the certificate was revoked.
	///
	/// Fails with [`crate::InvalidState::NotRevoked`] while the certificate
	/// is active.
	pub fn get_revocation(&self) -> Result<&Revocation, Error> {
		self.state.get_revocation()
	}

	/// Subject distinguished name, e.g. `CN=ca.example.com`.
	pub fn subject(&self) -> Result<String, Error> {
		Ok(self.parsed()?.subject().to_string())
	}

	/// Serial number as colon-separated uppercase hex pairs.
	pub fn serial(&self) -> Result<String, Error> {
		Ok(ext::format_colon_hex(&self.parsed()?.serial.to_bytes_be()))
	}

	/// Start of the validity period, as rendered by the parser.
	pub fn not_before(&self) -> Result<String, Error> {
		Ok(self.parsed()?.validity().not_before.to_string())
	}

	/// End of the validity period, as rendered by the parser.
	pub fn not_after(&self) -> Result<String, Error> {
		Ok(self.parsed()?.validity().not_after.to_string())
	}

	/// Whether basicConstraints marks this certificate as a CA. `false` when
	/// the extension is absent.
	pub fn is_ca(&self) -> Result<bool, Error> {
		let x509 = self.parsed()?;
		Ok(Self::basic_constraints_of(&x509).map_or(false, |(_, bc)| bc.ca))
	}

	/// The CA path length constraint, when the certificate is a CA carrying
	/// one.
	pub fn path_len(&self) -> Result<Option<u32>, Error> {
		let x509 = self.parsed()?;
		Ok(Self::basic_constraints_of(&x509)
			.filter(|(_, bc)| bc.ca)
			.and_then(|(_, bc)| bc.path_len_constraint))
	}

	/// The subjectAltName extension as `TYPE:value` pairs joined with `", "`,
	/// in extension order, e.g. `DNS:cert1.example.com`.
	///
	/// Empty string when the certificate carries no such extension.
	pub fn subject_alt_name(&self) -> Result<String, Error> {
		Ok(Self::subject_alt_name_of(&self.parsed()?))
	}

	/// The issuerAltName extension, rendered like
	/// [`subject_alt_name`](Certificate::subject_alt_name).
	///
	/// Certificates usually receive this value from their issuing CA, so when
	/// the extension is absent the linked issuer's subjectAltName is
	/// reported instead; a self-signed certificate without an issuer link
	/// falls back to its own subjectAltName.
	pub fn issuer_alt_name(&self) -> Result<String, Error> {
		let x509 = self.parsed()?;
		let own = x509
			.iter_extensions()
			.find_map(|ext| match ext.parsed_extension() {
				ParsedExtension::IssuerAlternativeName(ian) => {
					Some(ext::format_general_names(&ian.general_names))
				},
				_ => None,
			});
		if let Some(formatted) = own {
			return Ok(formatted);
		}

		match &self.issuer {
			Some(issuer) => issuer.subject_alt_name(),
			None => Ok(Self::subject_alt_name_of(&x509)),
		}
	}

	/// The authority key identifier in OpenSSL's text form:
	/// `keyid:` followed by colon-separated uppercase hex pairs and a
	/// trailing newline.
	///
	/// The newline is part of the contract; values stored by tooling built
	/// around `openssl x509 -text` carry it, and this projection is meant to
	/// compare equal to those. When the certificate has no such extension
	/// the linked issuer's subject key identifier is used; the result is the
	/// empty string when neither source is available.
	pub fn authority_key_identifier(&self) -> Result<String, Error> {
		let x509 = self.parsed()?;
		let key_id = x509
			.iter_extensions()
			.find_map(|ext| match ext.parsed_extension() {
				ParsedExtension::AuthorityKeyIdentifier(aki) => aki
					.key_identifier
					.as_ref()
					.map(|key_id| ext::format_colon_hex(key_id.0)),
				_ => None,
			});

		let key_id = match key_id {
			Some(key_id) => key_id,
			None => match &self.issuer {
				Some(issuer) => issuer.subject_key_identifier()?,
				None => String::new(),
			},
		};
		if key_id.is_empty() {
			return Ok(String::new());
		}
		Ok(format!("keyid:{key_id}\n"))
	}

	/// The subject key identifier as bare colon-separated uppercase hex
	/// pairs, or the empty string when the extension is absent.
	pub fn subject_key_identifier(&self) -> Result<String, Error> {
		let x509 = self.parsed()?;
		let formatted = x509
			.iter_extensions()
			.find_map(|ext| match ext.parsed_extension() {
				ParsedExtension::SubjectKeyIdentifier(key_id) => {
					Some(ext::format_colon_hex(key_id.0))
				},
				_ => None,
			})
			.unwrap_or_default();
		Ok(formatted)
	}

	/// The nameConstraints extension as an indented permitted/excluded
	/// summary.
	///
	/// Empty string when the extension is absent or constrains nothing.
	pub fn name_constraints(&self) -> Result<String, Error> {
		let x509 = self.parsed()?;
		let formatted = x509
			.iter_extensions()
			.find_map(|ext| match ext.parsed_extension() {
				ParsedExtension::NameConstraints(constraints) => {
					let permitted = constraints.permitted_subtrees.as_deref().unwrap_or_default();
					let excluded = constraints.excluded_subtrees.as_deref().unwrap_or_default();
					Some(ext::format_name_constraints(permitted, excluded))
				},
				_ => None,
			})
			.unwrap_or_default();
		Ok(formatted)
	}

	/// The basicConstraints extension, e.g. `critical,CA:TRUE, pathlen:1`,
	/// or the empty string when absent.
	pub fn basic_constraints(&self) -> Result<String, Error> {
		let x509 = self.parsed()?;
		let formatted = Self::basic_constraints_of(&x509)
			.map(|(critical, bc)| {
				ext::format_basic_constraints(critical, bc.ca, bc.path_len_constraint)
			})
			.unwrap_or_default();
		Ok(formatted)
	}

	/// The RFC 7469 pin of the subject public key: base64 of the SHA-256
	/// digest over the DER-encoded SubjectPublicKeyInfo. Always 44
	/// characters ending in `=`; distinct key material yields a distinct pin.
	pub fn hpkp_pin(&self) -> Result<String, Error> {
		let x509 = self.parsed()?;
		Ok(pin::subject_public_key_pin(x509.public_key().raw))
	}

	fn parsed(&self) -> Result<X509Certificate<'_>, Error> {
		let (_remainder, x509) = x509_parser::parse_x509_certificate(&self.der)
			.or(Err(Error::CouldNotParseCertificate))?;
		Ok(x509)
	}

	fn subject_alt_name_of(x509: &X509Certificate<'_>) -> String {
		x509.iter_extensions()
			.find_map(|ext| match ext.parsed_extension() {
				ParsedExtension::SubjectAlternativeName(san) => {
					Some(ext::format_general_names(&san.general_names))
				},
				_ => None,
			})
			.unwrap_or_default()
	}

	fn basic_constraints_of<'a>(
		x509: &'a X509Certificate<'_>,
	) -> Option<(bool, &'a BasicConstraints)> {
		x509.iter_extensions()
			.find_map(|ext| match ext.parsed_extension() {
				ParsedExtension::BasicConstraints(bc) => Some((ext.critical, bc)),
				_ => None,
			})
	}
}


#[cfg(feature = "pem")]
impl<T> ExternalError<T> for Result<T, pem::PemError> {
	fn _err(self) -> Result<T, Error> {
		self.map_err(|e| Error::PemError(e.to_string()))
	}
}
