//! `@placeholder@` substitution for user-facing text in features and prerequisites.
//!
//! A trait can carry a replacement map (e.g. `"Skill" -> "Broadsword"`) that fills the
//! placeholders of everything it grants.

use super::StringCriteria;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};

pub trait Nameable {
	fn fill_nameable_keys(&self, keys: &mut BTreeSet<String>);
	fn apply_nameable_keys(&mut self, replacements: &BTreeMap<String, String>);
}

impl Nameable for String {
	fn fill_nameable_keys(&self, keys: &mut BTreeSet<String>) {
		for captures in placeholder_regex().captures_iter(self) {
			keys.insert(captures[1].to_owned());
		}
	}

	fn apply_nameable_keys(&mut self, replacements: &BTreeMap<String, String>) {
		if !self.contains('@') {
			return;
		}
		let replaced = placeholder_regex().replace_all(self.as_str(), |captures: &regex::Captures| {
			// Unknown keys stay as written.
			match replacements.get(&captures[1]) {
				Some(value) => value.clone(),
				None => captures[0].to_owned(),
			}
		});
		*self = replaced.into_owned();
	}
}

fn placeholder_regex() -> &'static Regex {
	lazy_static::lazy_static! {
		static ref RE: Regex = Regex::new("@([^@]+)@").unwrap();
	}
	&RE
}

impl Nameable for StringCriteria {
	fn fill_nameable_keys(&self, keys: &mut BTreeSet<String>) {
		if !self.is_any() {
			self.qualifier.fill_nameable_keys(keys);
		}
	}

	fn apply_nameable_keys(&mut self, replacements: &BTreeMap<String, String>) {
		self.qualifier.apply_nameable_keys(replacements);
	}
}
