use std::fmt::Write;
use std::path::Path;
use std::sync::Arc;

use certwatch::{Certificate, RevocationState};

/// Loads a PEM-encoded certificate from `path`, optionally linking it to the
/// certificate of its issuing CA.
pub fn load_certificate(
	path: &Path,
	issuer: Option<&Arc<Certificate>>,
) -> crate::Result<Certificate> {
	let pem = std::fs::read_to_string(path)?;
	let mut cert = Certificate::from_pem(&pem)?;
	if let Some(issuer) = issuer {
		cert = cert.with_issuer(issuer.clone());
	}
	Ok(cert)
}

/// Renders one certificate as a text block, one labelled line per field.
///
/// Extension lines are only written for extensions the certificate carries;
/// the authorityKeyIdentifier value already ends in a newline and the
/// nameConstraints summary spans several lines, so both are written verbatim
/// after their label.
pub fn report(cert: &Certificate) -> crate::Result<String> {
	let mut out = String::new();
	writeln!(out, "Subject: {}", cert.subject()?)?;
	writeln!(out, "Serial: {}", cert.serial()?)?;
	writeln!(out, "Valid from: {}", cert.not_before()?)?;
	writeln!(out, "Valid until: {}", cert.not_after()?)?;
	match cert.revocation_state() {
		RevocationState::Active => writeln!(out, "Status: valid")?,
		RevocationState::Revoked(revocation) => match &revocation.reason {
			Some(reason) => writeln!(out, "Status: revoked ({reason})")?,
			None => writeln!(out, "Status: revoked")?,
		},
	}
	match (cert.is_ca()?, cert.path_len()?) {
		(true, Some(path_len)) => writeln!(out, "CA: yes, pathlen {path_len}")?,
		(true, None) => writeln!(out, "CA: yes")?,
		(false, _) => writeln!(out, "CA: no")?,
	}

	for (label, value) in [
		("subjectAltName", cert.subject_alt_name()?),
		("basicConstraints", cert.basic_constraints()?),
		("issuerAltName", cert.issuer_alt_name()?),
	] {
		if !value.is_empty() {
			writeln!(out, "{label}: {value}")?;
		}
	}
	let aki = cert.authority_key_identifier()?;
	if !aki.is_empty() {
		write!(out, "authorityKeyIdentifier: {aki}")?;
	}
	let name_constraints = cert.name_constraints()?;
	if !name_constraints.is_empty() {
		writeln!(out, "nameConstraints:")?;
		write!(out, "{name_constraints}")?;
	}

	writeln!(out, "HPKP pin: {}", cert.hpkp_pin()?)?;
	Ok(out)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ca() -> crate::Result<(rcgen::Certificate, rcgen::KeyPair)> {
		let key = rcgen::KeyPair::generate()?;
		let mut params = rcgen::CertificateParams::new(vec!["ca.example.com".to_string()])?;
		params.is_ca = rcgen::IsCa::Ca(rcgen::BasicConstraints::Constrained(1));
		let cert = params.self_signed(&key)?;
		Ok((cert, key))
	}

	#[test]
	fn test_report_lines() -> crate::Result<()> {
		let (ca_cert, ca_key) = ca()?;
		let leaf_key = rcgen::KeyPair::generate()?;
		let mut params = rcgen::CertificateParams::new(vec!["cert1.example.com".to_string()])?;
		params.is_ca = rcgen::IsCa::ExplicitNoCa;
		params.use_authority_key_identifier_extension = true;
		let leaf = params.signed_by(&leaf_key, &ca_cert, &ca_key)?;

		let ca_model = Arc::new(Certificate::from_pem(&ca_cert.pem())?);
		let cert = Certificate::from_pem(&leaf.pem())?.with_issuer(ca_model);

		let text = report(&cert)?;
		assert!(text.contains("Status: valid"));
		assert!(text.contains("CA: no"));
		assert!(text.contains("subjectAltName: DNS:cert1.example.com"));
		assert!(text.contains("basicConstraints: critical,CA:FALSE"));
		assert!(text.contains("issuerAltName: DNS:ca.example.com"));
		assert!(text.contains("authorityKeyIdentifier: keyid:"));
		assert!(text.contains("HPKP pin: "));
		assert!(!text.contains("nameConstraints"));
		Ok(())
	}

	#[test]
	fn test_report_revoked() -> crate::Result<()> {
		let (ca_cert, _) = ca()?;
		let cert = Certificate::from_pem(&ca_cert.pem())?.with_revocation(
			rcgen::date_time_ymd(2024, 6, 1),
			Some(certwatch::RevocationReason::KeyCompromise),
		);

		let text = report(&cert)?;
		assert!(text.contains("Status: revoked (keyCompromise)"));
		assert!(text.contains("CA: yes, pathlen 1"));
		assert!(text.contains("basicConstraints: critical,CA:TRUE, pathlen:1"));
		Ok(())
	}

	#[test]
	fn test_load_certificate() -> crate::Result<()> {
		use assert_fs::prelude::*;
		let temp = assert_fs::TempDir::new()?;

		let (ca_cert, _) = ca()?;
		let pem_file = temp.child("ca.pem");
		pem_file.write_str(&ca_cert.pem())?;

		let cert = load_certificate(pem_file.path(), None)?;
		assert_eq!(cert.subject_alt_name()?, "DNS:ca.example.com");
		assert!(load_certificate(&temp.path().join("missing.pem"), None).is_err());

		temp.close()?;
		Ok(())
	}
}
