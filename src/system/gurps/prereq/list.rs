use super::{Prereq, Subject};
use crate::system::gurps::{criteria::extract_tech_level, nameable::Nameable, Character, NumericCriteria};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Two non-breaking spaces per nesting level.
const INDENT: &str = "\u{a0}\u{a0}";

fn all_by_default() -> bool {
	true
}

/// An AND (`all`) or OR group of prerequisites.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct PrereqList {
	#[serde(default = "all_by_default")]
	pub all: bool,
	/// When set, the group only applies to characters whose tech level matches.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub when_tl: Option<NumericCriteria>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub prereqs: Vec<Prereq>,
}

impl Default for PrereqList {
	fn default() -> Self {
		Self { all: true, when_tl: None, prereqs: Vec::new() }
	}
}

impl PrereqList {
	pub fn all(prereqs: Vec<Prereq>) -> Self {
		Self { all: true, when_tl: None, prereqs }
	}

	pub fn any(prereqs: Vec<Prereq>) -> Self {
		Self { all: false, when_tl: None, prereqs }
	}

	pub fn when_tl(mut self, criteria: NumericCriteria) -> Self {
		self.when_tl = Some(criteria);
		self
	}

	pub fn is_empty(&self) -> bool {
		self.prereqs.is_empty()
	}

	pub fn satisfied(&self, character: &Character, subject: Subject<'_>, tooltip: Option<&mut String>, prefix: &str) -> bool {
		if let Some(when_tl) = &self.when_tl {
			let tech_level = extract_tech_level(character.tech_level());
			if !when_tl.matches(tech_level) {
				return true;
			}
		}

		let mut local = tooltip.is_some().then(String::new);
		let mut count = 0;
		for prereq in &self.prereqs {
			if prereq.satisfied(character, subject, local.as_mut(), prefix) {
				count += 1;
			}
		}
		let satisfied = count == self.prereqs.len() || (!self.all && count > 0);
		if !satisfied {
			if let (Some(tooltip), Some(local)) = (tooltip, local) {
				tooltip.push('\n');
				tooltip.push_str(prefix);
				tooltip.push_str(match self.all {
					true => "Requires all of:",
					false => "Requires at least one of:",
				});
				tooltip.push_str(&local.replace('\n', &format!("\n{INDENT}")));
			}
		}
		satisfied
	}
}

impl Nameable for PrereqList {
	fn fill_nameable_keys(&self, keys: &mut BTreeSet<String>) {
		for prereq in &self.prereqs {
			prereq.fill_nameable_keys(keys);
		}
	}

	fn apply_nameable_keys(&mut self, replacements: &BTreeMap<String, String>) {
		for prereq in &mut self.prereqs {
			prereq.apply_nameable_keys(replacements);
		}
	}
}
