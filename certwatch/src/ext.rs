//! Textual rendering of parsed extension values.
//!
//! The output follows the conventions of `openssl x509 -text`: general names
//! as `TYPE:value` pairs joined with `", "`, key identifiers and serials as
//! colon-separated uppercase hex pairs, basic constraints as
//! `critical,CA:TRUE, pathlen:N`. Keeping that shape means the strings can be
//! compared against what the usual toolkits print for the same certificate.

use std::net::{Ipv4Addr, Ipv6Addr};

use x509_parser::extensions::{GeneralName, GeneralSubtree};

/// Renders one general name the way OpenSSL prints subjectAltName entries.
pub(crate) fn format_general_name(name: &GeneralName<'_>) -> String {
	match name {
		GeneralName::DNSName(name) => format!("DNS:{name}"),
		GeneralName::RFC822Name(addr) => format!("email:{addr}"),
		GeneralName::URI(uri) => format!("URI:{uri}"),
		GeneralName::IPAddress(bytes) => format!("IP Address:{}", format_ip(bytes)),
		GeneralName::DirectoryName(dir_name) => format!("DirName:{dir_name}"),
		GeneralName::RegisteredID(oid) => format!("RID:{oid}"),
		GeneralName::OtherName(_, _) => String::from("othername:<unsupported>"),
		_ => String::from("<unsupported>"),
	}
}

pub(crate) fn format_general_names(names: &[GeneralName<'_>]) -> String {
	names
		.iter()
		.map(format_general_name)
		.collect::<Vec<_>>()
		.join(", ")
}

/// Renders basicConstraints, e.g. `critical,CA:TRUE, pathlen:1`.
///
/// The path length is only meaningful on a CA certificate and is dropped
/// otherwise, matching RFC 5280 §4.2.1.9.
pub(crate) fn format_basic_constraints(critical: bool, ca: bool, path_len: Option<u32>) -> String {
	let mut out = String::new();
	if critical {
		out.push_str("critical,");
	}
	out.push_str(if ca { "CA:TRUE" } else { "CA:FALSE" });
	if ca {
		if let Some(path_len) = path_len {
			out.push_str(&format!(", pathlen:{path_len}"));
		}
	}
	out
}

/// Renders bytes as colon-separated uppercase hex pairs, the form key
/// identifiers and serial numbers take in certificate dumps.
pub(crate) fn format_colon_hex(bytes: &[u8]) -> String {
	bytes
		.iter()
		.map(|b| format!("{b:02X}"))
		.collect::<Vec<_>>()
		.join(":")
}

/// Renders permitted/excluded name subtrees as an indented two-section
/// summary. Empty input produces the empty string; a non-empty summary ends
/// with a newline, one entry per line.
pub(crate) fn format_name_constraints(
	permitted: &[GeneralSubtree<'_>],
	excluded: &[GeneralSubtree<'_>],
) -> String {
	let mut out = String::new();
	for (label, subtrees) in [("Permitted:\n", permitted), ("Excluded:\n", excluded)] {
		if subtrees.is_empty() {
			continue;
		}
		out.push_str(label);
		for subtree in subtrees {
			out.push_str("  ");
			out.push_str(&format_subtree_base(&subtree.base));
			out.push('\n');
		}
	}
	out
}

fn format_subtree_base(base: &GeneralName<'_>) -> String {
	match base {
		// In a name constraint the address bytes carry base and mask.
		GeneralName::IPAddress(bytes) => format_ip_subtree(bytes),
		other => format_general_name(other),
	}
}

fn format_ip(bytes: &[u8]) -> String {
	if let Ok(octets) = <[u8; 4]>::try_from(bytes) {
		Ipv4Addr::from(octets).to_string()
	} else if let Ok(octets) = <[u8; 16]>::try_from(bytes) {
		Ipv6Addr::from(octets).to_string()
	} else {
		String::from("<invalid>")
	}
}

fn format_ip_subtree(bytes: &[u8]) -> String {
	let base_and_mask = match bytes.len() {
		8 => Some((format_ip(&bytes[..4]), format_ip(&bytes[4..]))),
		32 => Some((format_ip(&bytes[..16]), format_ip(&bytes[16..]))),
		_ => None,
	};
	match base_and_mask {
		Some((base, mask)) => format!("IP:{base}/{mask}"),
		None => String::from("IP:<invalid>"),
	}
}
