use super::{explain, Subject};
use crate::system::gurps::{Character, NumericCriteria, StringCriteria};
use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SkillPrereq {
	#[serde(default = "super::has_by_default")]
	pub has: bool,
	#[serde(default)]
	pub name: StringCriteria,
	#[serde(default)]
	pub level: NumericCriteria,
	#[serde(default)]
	pub specialization: StringCriteria,
}

impl SkillPrereq {
	pub fn named(name: StringCriteria) -> Self {
		Self { has: true, name, level: NumericCriteria::any(), specialization: StringCriteria::any() }
	}

	pub fn satisfied(&self, character: &Character, subject: Subject<'_>, tooltip: Option<&mut String>, prefix: &str) -> bool {
		let tech_level = subject.tech_level();
		let matched = character.skills().iter().any(|skill| {
			if subject.is(&skill.id) || !self.name.matches(&skill.name) || !self.specialization.matches(&skill.specialization) {
				return false;
			}
			let level_matches = match character.skill_level(skill, None) {
				Some(level) => self.level.matches(level),
				None => self.level.is_any(),
			};
			level_matches
				&& match (tech_level, skill.tech_level.as_deref()) {
					(Some(required), Some(known)) => required == known,
					_ => true,
				}
		});
		let satisfied = matched == self.has;
		if !satisfied {
			let mut detail = format!("a skill whose name {}", self.name);
			if !self.specialization.is_any() {
				detail.push_str(&format!(", specialization {}", self.specialization));
			}
			if !self.level.is_any() {
				detail.push_str(&format!(", and level {}", self.level));
			}
			explain(tooltip, prefix, self.has, format_args!("{detail}"));
		}
		satisfied
	}
}
