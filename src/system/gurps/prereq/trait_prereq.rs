use super::{explain, Subject};
use crate::system::gurps::{Character, NumericCriteria, StringCriteria};
use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct TraitPrereq {
	#[serde(default = "super::has_by_default")]
	pub has: bool,
	#[serde(default)]
	pub name: StringCriteria,
	#[serde(default)]
	pub level: NumericCriteria,
	#[serde(default)]
	pub notes: StringCriteria,
}

impl TraitPrereq {
	pub fn named(name: StringCriteria) -> Self {
		Self { has: true, name, level: NumericCriteria::any(), notes: StringCriteria::any() }
	}

	pub fn satisfied(&self, character: &Character, subject: Subject<'_>, tooltip: Option<&mut String>, prefix: &str) -> bool {
		let mut matched = false;
		for root in character.traits() {
			root.walk_enabled(&[], &mut |item, _| {
				if matched || subject.is(&item.id) {
					return;
				}
				if self.name.matches(&item.name) && self.notes.matches(&item.notes) {
					matched = self.level.matches(item.current_level());
				}
			});
		}
		let satisfied = matched == self.has;
		if !satisfied {
			let mut detail = format!("a trait whose name {}", self.name);
			if !self.notes.is_any() {
				detail.push_str(&format!(", notes {}", self.notes));
			}
			if !self.level.is_any() {
				detail.push_str(&format!(", and level {}", self.level));
			}
			explain(tooltip, prefix, self.has, format_args!("{detail}"));
		}
		satisfied
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::system::gurps::{ContainerType, Trait};
	use rust_decimal::Decimal;
	use rust_decimal_macros::dec;

	fn character() -> Character {
		let mut character = Character::default();
		character.traits_mut().extend([
			Trait::leveled("Acute Vision", Decimal::ZERO, dec!(2), dec!(3)),
			Trait::container("Off", ContainerType::Group, vec![Trait::new("Luck", dec!(15))]).disabled(),
		]);
		character
	}

	#[test]
	fn matches_level() {
		let character = character();
		let mut prereq = TraitPrereq::named(StringCriteria::is("acute vision"));
		prereq.level = NumericCriteria::at_least(3);
		assert!(prereq.satisfied(&character, Subject::None, None, ""));
		prereq.level = NumericCriteria::at_least(4);
		let mut tooltip = String::new();
		assert!(!prereq.satisfied(&character, Subject::None, Some(&mut tooltip), "- "));
		assert_eq!(tooltip, "\n- Has a trait whose name is \"acute vision\", and level is at least 4");
	}

	#[test]
	fn disabled_traits_do_not_count() {
		let prereq = TraitPrereq::named(StringCriteria::is("Luck"));
		assert!(!prereq.satisfied(&character(), Subject::None, None, ""));
	}

	#[test]
	fn has_false_inverts() {
		let character = character();
		let prereq = TraitPrereq { has: false, ..TraitPrereq::named(StringCriteria::is("Luck")) };
		assert!(prereq.satisfied(&character, Subject::None, None, ""));
		let mut tooltip = String::new();
		let prereq = TraitPrereq { has: false, ..TraitPrereq::named(StringCriteria::is("Acute Vision")) };
		assert!(!prereq.satisfied(&character, Subject::None, Some(&mut tooltip), ""));
		assert_eq!(tooltip, "\nDoes not have a trait whose name is \"Acute Vision\"");
	}

	#[test]
	fn subject_is_excluded() {
		let character = character();
		let prereq = TraitPrereq::named(StringCriteria::is("Acute Vision"));
		let subject = &character.traits()[0];
		assert!(!prereq.satisfied(&character, Subject::Trait(subject), None, ""));
	}
}
