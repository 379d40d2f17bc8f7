//! Command Line argument parsing
#![allow(missing_docs)]

use std::path::PathBuf;

use bpaf::Bpaf;

#[derive(Clone, Debug, Bpaf)]
#[bpaf(options)]
/// certwatch-inspect Certificate Report Printer
pub struct Options {
	/// PEM certificate to report on (apply multiple times for several)
	#[bpaf(many, long, argument::<PathBuf>("cert.pem"))]
	pub cert: Vec<PathBuf>,
	/// PEM certificate of the issuing CA, consulted for issuer fallbacks
	#[bpaf(long, argument("ca.pem"))]
	pub issuer: Option<PathBuf>,
	/// Print only the HPKP pin of each certificate
	#[bpaf(long)]
	pub pin_only: bool,
}
