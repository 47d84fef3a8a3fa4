use super::{name_key, SKILL_NAME, SKILL_POINTS, THIS_WEAPON, WEAPON_NAMED_PREFIX};
use crate::{
	impl_enum_key,
	system::gurps::{LeveledAmount, StringCriteria},
	utility::EnumKey,
};
use serde::{Deserialize, Serialize};

/// What a skill bonus targets.
#[derive(Debug, enumset::EnumSetType, Default, Hash)]
pub enum SkillSelection {
	#[default]
	Name,
	/// The skill used by the weapons of the node granting the bonus.
	ThisWeapon,
	/// The skill used by any weapon whose name (and usage) matches.
	WeaponsWithName,
}

impl EnumKey for SkillSelection {
	fn key(&self) -> &'static str {
		match self {
			Self::Name => "skills_with_name",
			Self::ThisWeapon => "this_weapon",
			Self::WeaponsWithName => "weapons_with_name",
		}
	}
}
impl_enum_key!(SkillSelection);

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SkillBonus {
	#[serde(default)]
	pub selection: SkillSelection,
	#[serde(default)]
	pub name: StringCriteria,
	#[serde(default)]
	pub specialization: StringCriteria,
	#[serde(default)]
	pub category: StringCriteria,
	pub amount: LeveledAmount,
}

impl SkillBonus {
	pub fn named(name: StringCriteria, amount: LeveledAmount) -> Self {
		Self {
			selection: SkillSelection::Name,
			name,
			specialization: StringCriteria::any(),
			category: StringCriteria::any(),
			amount,
		}
	}

	pub fn map_key(&self) -> String {
		let only_name = self.specialization.is_any() && self.category.is_any();
		match self.selection {
			SkillSelection::Name => name_key(SKILL_NAME, &self.name, only_name),
			SkillSelection::ThisWeapon => THIS_WEAPON.to_owned(),
			SkillSelection::WeaponsWithName => name_key(WEAPON_NAMED_PREFIX, &self.name, only_name),
		}
	}

	/// Re-tests every criterion; used for bonuses found in a wildcard bucket.
	pub fn matches<S: AsRef<str>>(&self, name: &str, specialization: &str, categories: &[S]) -> bool {
		self.name.matches(name) && self.specialization.matches(specialization) && self.category.matches_list(categories)
	}
}

/// Extra points counted toward a skill's level without being spent.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SkillPointBonus {
	#[serde(default)]
	pub name: StringCriteria,
	#[serde(default)]
	pub specialization: StringCriteria,
	#[serde(default)]
	pub category: StringCriteria,
	pub amount: LeveledAmount,
}

impl SkillPointBonus {
	pub fn named(name: StringCriteria, amount: LeveledAmount) -> Self {
		Self { name, specialization: StringCriteria::any(), category: StringCriteria::any(), amount }
	}

	pub fn map_key(&self) -> String {
		name_key(SKILL_POINTS, &self.name, self.specialization.is_any() && self.category.is_any())
	}

	pub fn matches<S: AsRef<str>>(&self, name: &str, specialization: &str, categories: &[S]) -> bool {
		self.name.matches(name) && self.specialization.matches(specialization) && self.category.matches_list(categories)
	}
}
