use std::sync::Arc;

use certwatch::Certificate;
use rcgen::{BasicConstraints, CertificateParams, DnType, IsCa, KeyPair};

/// A CA minted for a test, kept together with its signing material so leaf
/// certificates can be issued from it.
pub struct TestCa {
	pub cert: rcgen::Certificate,
	pub key: KeyPair,
	pub model: Arc<Certificate>,
}

pub fn ca_params(san: &str) -> CertificateParams {
	let mut params = CertificateParams::new(vec![san.to_string()]).unwrap();
	params.distinguished_name.push(DnType::CommonName, san);
	params.is_ca = IsCa::Ca(BasicConstraints::Constrained(1));
	params
}

pub fn leaf_params(san: &str) -> CertificateParams {
	let mut params = CertificateParams::new(vec![san.to_string()]).unwrap();
	params.distinguished_name.push(DnType::CommonName, san);
	params.is_ca = IsCa::ExplicitNoCa;
	params.use_authority_key_identifier_extension = true;
	params
}

pub fn make_ca(san: &str) -> TestCa {
	make_ca_from(ca_params(san))
}

pub fn make_ca_from(params: CertificateParams) -> TestCa {
	let key = KeyPair::generate().unwrap();
	let cert = params.self_signed(&key).unwrap();
	let model = Arc::new(Certificate::from_pem(&cert.pem()).unwrap());
	TestCa { cert, key, model }
}

impl TestCa {
	/// Issues a leaf for `san` and loads it as a model linked to this CA.
	pub fn issue(&self, san: &str) -> Certificate {
		self.issue_from(leaf_params(san))
	}

	/// Signs arbitrary params with this CA and loads the result, linked.
	pub fn issue_from(&self, params: CertificateParams) -> Certificate {
		let key = KeyPair::generate().unwrap();
		let cert = params.signed_by(&key, &self.cert, &self.key).unwrap();
		Certificate::from_pem(&cert.pem())
			.unwrap()
			.with_issuer(self.model.clone())
	}
}
