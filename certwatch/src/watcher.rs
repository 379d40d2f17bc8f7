use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::Error;

/// HTML5 e-mail address production, the same check browsers apply to
/// `<input type="email">`.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+(\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+)*@[a-zA-Z0-9]([a-zA-Z0-9-]*[a-zA-Z0-9])?(\.[a-zA-Z0-9]([a-zA-Z0-9-]*[a-zA-Z0-9])?)+$")
		.expect("invalid email regex")
});

/// Splits a free-form mail address into display name and address.
///
/// Accepted forms are `"Name <mail>"`, `"Name<mail>"` (with any amount of
/// whitespace before the angle bracket) and a bare `"mail"`. Surrounding
/// whitespace is stripped from both parts; the returned tuple is
/// `(name, mail)` with an empty name when none was given.
///
/// Fails with [`Error::InvalidAddress`] when the mail part is not a valid
/// address, or when an opening angle bracket is never closed.
pub fn parse_addr(addr: &str) -> Result<(String, String), Error> {
	let (name, mail) = match addr.split_once('<') {
		Some((name, rest)) => match rest.trim_end().strip_suffix('>') {
			Some(mail) => (name.trim(), mail.trim()),
			None => return Err(Error::InvalidAddress(addr.to_string())),
		},
		None => ("", addr.trim()),
	};

	if !EMAIL_REGEX.is_match(mail) {
		return Err(Error::InvalidAddress(addr.to_string()));
	}
	Ok((name.to_string(), mail.to_string()))
}

/// A contact subscribed to notifications about certificates.
///
/// The mail address is the identity of the contact: registering an address a
/// second time with a different display name renames the existing contact
/// instead of creating a duplicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Watcher {
	/// Mail address, the identifying key.
	pub mail: String,
	/// Display name, empty when none is known.
	pub name: String,
}

impl Watcher {
	/// Parses `addr` and registers the result in `registry`.
	///
	/// An existing contact with the same mail address gets its name
	/// overwritten; otherwise a new contact is stored. Returns the stored
	/// record either way.
	pub fn from_addr(registry: &dyn WatcherRegistry, addr: &str) -> Result<Watcher, Error> {
		let (name, mail) = parse_addr(addr)?;
		Ok(registry.upsert(Watcher { mail, name }))
	}
}

impl fmt::Display for Watcher {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		if self.name.is_empty() {
			write!(f, "{}", self.mail)
		} else {
			write!(f, "{} <{}>", self.name, self.mail)
		}
	}
}

/// Storage seam for [`Watcher`] records.
///
/// Implementations keep `mail` unique: `upsert` must replace the record
/// sharing the new record's mail address rather than storing a second one,
/// atomically with respect to concurrent calls for the same address.
pub trait WatcherRegistry {
	/// Looks up a watcher by its mail address.
	fn find_by_mail(&self, mail: &str) -> Option<Watcher>;
	/// Stores the watcher, replacing any record with the same mail address.
	/// Returns the stored record.
	fn upsert(&self, watcher: Watcher) -> Watcher;
}

/// In-memory [`WatcherRegistry`] for embedders without a database of their
/// own. A mutex serializes upserts, so sharing one registry across threads
/// cannot produce two records for one mail address.
#[derive(Debug, Default)]
pub struct MemoryWatcherRegistry {
	watchers: Mutex<HashMap<String, Watcher>>,
}

impl MemoryWatcherRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of stored watchers.
	pub fn len(&self) -> usize {
		self.watchers.lock().unwrap().len()
	}

	/// Whether the registry holds no watchers.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl WatcherRegistry for MemoryWatcherRegistry {
	fn find_by_mail(&self, mail: &str) -> Option<Watcher> {
		self.watchers.lock().unwrap().get(mail).cloned()
	}

	fn upsert(&self, watcher: Watcher) -> Watcher {
		let mut watchers = self.watchers.lock().unwrap();
		watchers.insert(watcher.mail.clone(), watcher.clone());
		watcher
	}
}
