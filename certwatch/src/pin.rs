use base64::{engine::general_purpose::STANDARD, Engine};
use ring::digest;

/// Computes the RFC 7469 pin of a subject public key.
///
/// The pin is the SHA-256 digest of the DER-encoded `SubjectPublicKeyInfo`
/// structure (algorithm identifier plus public key bits), encoded with the
/// standard padded base64 alphabet. For SHA-256 input the output is always
/// 44 characters and ends in `=`.
///
/// The same value is produced by
/// `openssl x509 -pubkey -noout | openssl pkey -pubin -outform der | openssl dgst -sha256 -binary | base64`.
pub fn subject_public_key_pin(spki_der: &[u8]) -> String {
	let digest = digest::digest(&digest::SHA256, spki_der);
	STANDARD.encode(digest.as_ref())
}

#[cfg(test)]
mod pin_tests {
	use super::*;

	#[test]
	fn pin_shape() {
		let pin = subject_public_key_pin(b"not really an spki");
		assert_eq!(pin.len(), 44);
		assert!(pin.ends_with('='));
	}

	#[test]
	fn pin_is_deterministic() {
		assert_eq!(
			subject_public_key_pin(b"same bytes"),
			subject_public_key_pin(b"same bytes")
		);
		assert_ne!(
			subject_public_key_pin(b"some bytes"),
			subject_public_key_pin(b"other bytes")
		);
	}

	#[test]
	fn known_digest() {
		// SHA-256 of the empty string, base64-encoded.
		assert_eq!(
			subject_public_key_pin(b""),
			"47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU="
		);
	}
}
