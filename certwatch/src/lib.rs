/*!
Certificate inventory core for a certificate authority's backend.

This crate models issued X.509 certificates the way a CA keeps its books:
each [`Certificate`] owns its DER bytes, may point at the model of its
issuing CA, and carries a [`RevocationState`]. From the bytes it computes
the textual projections an operator compares against tooling output: the
OpenSSL-style `subjectAltName` / `basicConstraints` /
`authorityKeyIdentifier` / `nameConstraints` strings and the RFC 7469 HPKP
pin of the subject public key.

Notification contacts are tracked as [`Watcher`] records parsed from
`"Name <mail>"` strings and stored behind the [`WatcherRegistry`] seam.

Certificate *generation* is out of scope; the examples and tests mint their
fixtures with the `rcgen` crate.
*/
#![cfg_attr(
	feature = "pem",
	doc = r##"
## Example

```
use std::sync::Arc;

use certwatch::Certificate;

// Mint a CA with rcgen, then load it into the inventory.
let ca_key = rcgen::KeyPair::generate().unwrap();
let mut ca_params = rcgen::CertificateParams::new(vec!["ca.example.com".into()]).unwrap();
ca_params.is_ca = rcgen::IsCa::Ca(rcgen::BasicConstraints::Constrained(1));
let ca_pem = ca_params.self_signed(&ca_key).unwrap().pem();

let ca = Arc::new(Certificate::from_pem(&ca_pem).unwrap());
assert_eq!(ca.basic_constraints().unwrap(), "critical,CA:TRUE, pathlen:1");
assert_eq!(ca.subject_alt_name().unwrap(), "DNS:ca.example.com");
assert_eq!(ca.hpkp_pin().unwrap().len(), 44);
```"##
)]
#![forbid(unsafe_code)]
#![forbid(non_ascii_idents)]
#![deny(missing_docs)]
#![allow(clippy::complexity, clippy::style, clippy::pedantic)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub use crate::certificate::Certificate;
pub use crate::error::{Error, InvalidState};
pub use crate::pin::subject_public_key_pin;
pub use crate::revocation::{Revocation, RevocationReason, RevocationState};
pub use crate::watcher::{parse_addr, MemoryWatcherRegistry, Watcher, WatcherRegistry};

mod certificate;
mod error;
mod ext;
mod pin;
mod revocation;
mod watcher;
