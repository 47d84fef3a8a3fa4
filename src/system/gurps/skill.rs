use super::{Feature, PrereqList};
use crate::{impl_enum_key, utility::EnumKey};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, enumset::EnumSetType, Default, Hash)]
pub enum Difficulty {
	#[default]
	Easy,
	Average,
	Hard,
	VeryHard,
}

impl EnumKey for Difficulty {
	fn key(&self) -> &'static str {
		match self {
			Self::Easy => "e",
			Self::Average => "a",
			Self::Hard => "h",
			Self::VeryHard => "vh",
		}
	}
}
impl_enum_key!(Difficulty);

impl Difficulty {
	/// The level relative to the controlling attribute when a single point is spent.
	pub fn base_relative_level(&self) -> Decimal {
		match self {
			Self::Easy => Decimal::ZERO,
			Self::Average => dec!(-1),
			Self::Hard => dec!(-2),
			Self::VeryHard => dec!(-3),
		}
	}
}

/// Level relative to the controlling attribute for `points` spent at `difficulty`.
///
/// Nothing below a single point grants a level.
pub fn relative_level(difficulty: Difficulty, points: Decimal) -> Option<Decimal> {
	if points < Decimal::ONE {
		return None;
	}
	let mut level = difficulty.base_relative_level();
	if points >= dec!(4) {
		level += Decimal::ONE + (points / dec!(4)).floor();
	} else if points > Decimal::ONE {
		level += Decimal::ONE;
	}
	Some(level)
}

fn default_attribute() -> String {
	"dx".into()
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Skill {
	#[serde(default = "Uuid::new_v4")]
	pub id: Uuid,
	pub name: String,
	#[serde(default, skip_serializing_if = "String::is_empty")]
	pub specialization: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub tech_level: Option<String>,
	#[serde(default)]
	pub difficulty: Difficulty,
	#[serde(default = "default_attribute")]
	pub attribute: String,
	#[serde(default)]
	pub points: Decimal,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub categories: Vec<String>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub features: Vec<Feature>,
	#[serde(default)]
	pub prereqs: PrereqList,
}

impl Skill {
	pub fn new(name: impl Into<String>, attribute: impl Into<String>, difficulty: Difficulty, points: Decimal) -> Self {
		Self {
			id: Uuid::new_v4(),
			name: name.into(),
			specialization: String::new(),
			tech_level: None,
			difficulty,
			attribute: attribute.into(),
			points,
			categories: Vec::new(),
			features: Vec::new(),
			prereqs: PrereqList::default(),
		}
	}

	pub fn with_specialization(mut self, specialization: impl Into<String>) -> Self {
		self.specialization = specialization.into();
		self
	}

	pub fn with_tech_level(mut self, tech_level: impl Into<String>) -> Self {
		self.tech_level = Some(tech_level.into());
		self
	}

	pub fn with_prereqs(mut self, prereqs: PrereqList) -> Self {
		self.prereqs = prereqs;
		self
	}

	/// `Name (Specialization)`, or just the name.
	pub fn display_name(&self) -> String {
		match self.specialization.is_empty() {
			true => self.name.clone(),
			false => format!("{} ({})", self.name, self.specialization),
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn relative_levels() {
		assert_eq!(relative_level(Difficulty::Average, dec!(0.5)), None);
		assert_eq!(relative_level(Difficulty::Average, dec!(1)), Some(dec!(-1)));
		assert_eq!(relative_level(Difficulty::Average, dec!(2)), Some(dec!(0)));
		assert_eq!(relative_level(Difficulty::Average, dec!(3)), Some(dec!(0)));
		assert_eq!(relative_level(Difficulty::Average, dec!(4)), Some(dec!(1)));
		assert_eq!(relative_level(Difficulty::Hard, dec!(8)), Some(dec!(1)));
		assert_eq!(relative_level(Difficulty::Easy, dec!(12)), Some(dec!(4)));
		assert_eq!(relative_level(Difficulty::VeryHard, dec!(1)), Some(dec!(-3)));
	}

	#[test]
	fn display_name() {
		let skill = Skill::new("Guns", "dx", Difficulty::Easy, dec!(1)).with_specialization("Pistol");
		assert_eq!(skill.display_name(), "Guns (Pistol)");
		assert_eq!(Difficulty::ensure_valid("vh"), Difficulty::VeryHard);
	}
}
