use super::{name_key, tooltip_line, SKILL_NAME, THIS_WEAPON, WEAPON_NAMED_PREFIX};
use crate::{
	impl_enum_key,
	system::gurps::{LeveledAmount, NumericCriteria, StringCriteria},
	utility::EnumKey,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, enumset::EnumSetType, Default, Hash)]
pub enum WeaponSelection {
	#[default]
	WithRequiredSkill,
	ThisWeapon,
	WithName,
}

impl EnumKey for WeaponSelection {
	fn key(&self) -> &'static str {
		match self {
			Self::WithRequiredSkill => "weapons_with_required_skill",
			Self::ThisWeapon => "this_weapon",
			Self::WithName => "weapons_with_name",
		}
	}
}
impl_enum_key!(WeaponSelection);

/// Extra damage for weapons, either flat or as a percentage of the base damage.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct WeaponDamageBonus {
	#[serde(default)]
	pub selection: WeaponSelection,
	/// The skill name, or the weapon name when selecting by weapon name.
	#[serde(default)]
	pub name: StringCriteria,
	/// The skill specialization, or the weapon usage when selecting by weapon name.
	#[serde(default)]
	pub specialization: StringCriteria,
	/// The wielder's level with the weapon relative to the controlling attribute.
	#[serde(default)]
	pub level: NumericCriteria,
	#[serde(default)]
	pub category: StringCriteria,
	pub amount: LeveledAmount,
	#[serde(default, skip_serializing_if = "std::ops::Not::not")]
	pub percent: bool,
}

impl WeaponDamageBonus {
	pub fn new(selection: WeaponSelection, name: StringCriteria, amount: LeveledAmount) -> Self {
		Self {
			selection,
			name,
			specialization: StringCriteria::any(),
			level: NumericCriteria::any(),
			category: StringCriteria::any(),
			amount,
			percent: false,
		}
	}

	pub fn map_key(&self) -> String {
		let only_name = self.specialization.is_any() && self.category.is_any();
		match self.selection {
			WeaponSelection::WithRequiredSkill => name_key(SKILL_NAME, &self.name, only_name && self.level.is_any()),
			WeaponSelection::ThisWeapon => THIS_WEAPON.to_owned(),
			WeaponSelection::WithName => name_key(WEAPON_NAMED_PREFIX, &self.name, only_name),
		}
	}

	pub fn matches_skill<S: AsRef<str>>(&self, skill: &str, specialization: &str, relative_level: Decimal, categories: &[S]) -> bool {
		self.name.matches(skill)
			&& self.specialization.matches(specialization)
			&& self.level.matches(relative_level)
			&& self.category.matches_list(categories)
	}

	pub fn matches_weapon<S: AsRef<str>>(&self, weapon: &str, usage: &str, categories: &[S]) -> bool {
		self.name.matches(weapon) && self.specialization.matches(usage) && self.category.matches_list(categories)
	}

	pub fn tooltip(&self, owner: &str) -> String {
		let amount = self.amount.format("level");
		match self.percent {
			true => tooltip_line(owner, format!("{amount}%")),
			false => tooltip_line(owner, amount),
		}
	}
}
