//! Bonuses granted by nodes of the character tree.
//!
//! Every [`Feature`] knows the map key it is indexed under. Those keys are part of the
//! persisted cross-reference contract and must stay exactly as written here.

use super::{nameable::Nameable, LeveledAmount, StringCompare, StringCriteria};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

mod attribute_bonus;
pub use attribute_bonus::*;
mod dr_bonus;
pub use dr_bonus::*;
mod reduction;
pub use reduction::*;
mod situational;
pub use situational::*;
mod skill_bonus;
pub use skill_bonus::*;
mod spell_bonus;
pub use spell_bonus::*;
mod weapon_bonus;
pub use weapon_bonus::*;

pub const ATTRIBUTE_PREFIX: &str = "attr.";
pub const HIT_LOCATION_PREFIX: &str = "hit_location.";
pub const SKILL_NAME: &str = "skill.name";
pub const SKILL_POINTS: &str = "skill.points";
pub const SPELL_NAME: &str = "spell.name";
pub const SPELL_COLLEGE: &str = "spell.college";
pub const SPELL_POWER_SOURCE: &str = "spell.power_source";
pub const SPELL_POINTS: &str = "spell.points";
pub const SPELL_COLLEGE_POINTS: &str = "spell.college.points";
pub const SPELL_POWER_SOURCE_POINTS: &str = "spell.power_source.points";
pub const WEAPON_NAMED_PREFIX: &str = "weapon_named.";
/// Bonuses that only apply to the weapons of the node that grants them.
pub const THIS_WEAPON: &str = "\u{0001}";
pub const REACTION: &str = "reaction";
pub const CONDITIONAL_MODIFIER: &str = "conditional_modifier";
pub const COST_REDUCTION: &str = "cost_reduction";
pub const CONTAINED_WEIGHT_REDUCTION: &str = "contained_weight_reduction";

pub fn exact_key(prefix: &str, name: &str) -> String {
	format!("{prefix}/{name}")
}

pub fn wildcard_key(prefix: &str) -> String {
	format!("{prefix}*")
}

/// Plain "name is X" bonuses (with no other filters) get their own exact bucket,
/// everything else shares the prefix's wildcard bucket and is re-tested at lookup.
pub(crate) fn name_key(prefix: &str, name: &StringCriteria, other_criteria_are_any: bool) -> String {
	match name.compare == StringCompare::Is && other_criteria_are_any {
		true => exact_key(prefix, &name.qualifier),
		false => wildcard_key(prefix),
	}
}

pub(crate) fn tooltip_line(owner: &str, detail: impl std::fmt::Display) -> String {
	format!("\n{owner} [{detail}]")
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Feature {
	AttributeBonus(AttributeBonus),
	DrBonus(DrBonus),
	SkillBonus(SkillBonus),
	SkillPointBonus(SkillPointBonus),
	SpellBonus(SpellBonus),
	SpellPointBonus(SpellPointBonus),
	ReactionBonus(ReactionBonus),
	ConditionalModifier(ConditionalModifier),
	WeaponDamageBonus(WeaponDamageBonus),
	CostReduction(CostReduction),
	ContainedWeightReduction(ContainedWeightReduction),
}

macro_rules! impl_into_feature {
	($($variant:ident),+) => {
		$(
			impl From<$variant> for Feature {
				fn from(value: $variant) -> Self {
					Self::$variant(value)
				}
			}
		)+
	};
}
impl_into_feature!(
	AttributeBonus,
	DrBonus,
	SkillBonus,
	SkillPointBonus,
	SpellBonus,
	SpellPointBonus,
	ReactionBonus,
	ConditionalModifier,
	WeaponDamageBonus,
	CostReduction,
	ContainedWeightReduction
);

impl Feature {
	/// The key this feature is indexed under (before case folding).
	pub fn map_key(&self) -> String {
		match self {
			Self::AttributeBonus(bonus) => bonus.map_key(),
			Self::DrBonus(bonus) => bonus.map_key(),
			Self::SkillBonus(bonus) => bonus.map_key(),
			Self::SkillPointBonus(bonus) => bonus.map_key(),
			Self::SpellBonus(bonus) => bonus.map_key(),
			Self::SpellPointBonus(bonus) => bonus.map_key(),
			Self::ReactionBonus(_) => REACTION.to_owned(),
			Self::ConditionalModifier(_) => CONDITIONAL_MODIFIER.to_owned(),
			Self::WeaponDamageBonus(bonus) => bonus.map_key(),
			Self::CostReduction(_) => COST_REDUCTION.to_owned(),
			Self::ContainedWeightReduction(_) => CONTAINED_WEIGHT_REDUCTION.to_owned(),
		}
	}

	pub fn amount(&self) -> Option<&LeveledAmount> {
		match self {
			Self::AttributeBonus(bonus) => Some(&bonus.amount),
			Self::DrBonus(bonus) => Some(&bonus.amount),
			Self::SkillBonus(bonus) => Some(&bonus.amount),
			Self::SkillPointBonus(bonus) => Some(&bonus.amount),
			Self::SpellBonus(bonus) => Some(&bonus.amount),
			Self::SpellPointBonus(bonus) => Some(&bonus.amount),
			Self::ReactionBonus(bonus) => Some(&bonus.amount),
			Self::ConditionalModifier(bonus) => Some(&bonus.amount),
			Self::WeaponDamageBonus(bonus) => Some(&bonus.amount),
			Self::CostReduction(_) | Self::ContainedWeightReduction(_) => None,
		}
	}

	fn amount_mut(&mut self) -> Option<&mut LeveledAmount> {
		match self {
			Self::AttributeBonus(bonus) => Some(&mut bonus.amount),
			Self::DrBonus(bonus) => Some(&mut bonus.amount),
			Self::SkillBonus(bonus) => Some(&mut bonus.amount),
			Self::SkillPointBonus(bonus) => Some(&mut bonus.amount),
			Self::SpellBonus(bonus) => Some(&mut bonus.amount),
			Self::SpellPointBonus(bonus) => Some(&mut bonus.amount),
			Self::ReactionBonus(bonus) => Some(&mut bonus.amount),
			Self::ConditionalModifier(bonus) => Some(&mut bonus.amount),
			Self::WeaponDamageBonus(bonus) => Some(&mut bonus.amount),
			Self::CostReduction(_) | Self::ContainedWeightReduction(_) => None,
		}
	}

	pub fn set_level(&mut self, level: rust_decimal::Decimal) {
		if let Some(amount) = self.amount_mut() {
			amount.level = level;
		}
	}

	/// The line this feature contributes to a tooltip, attributed to `owner`.
	pub fn tooltip(&self, owner: &str) -> String {
		match self {
			Self::AttributeBonus(bonus) => bonus.tooltip(owner),
			Self::DrBonus(bonus) => bonus.tooltip(owner),
			Self::WeaponDamageBonus(bonus) => bonus.tooltip(owner),
			Self::CostReduction(reduction) => reduction.tooltip(owner),
			Self::ContainedWeightReduction(reduction) => tooltip_line(owner, &reduction.reduction),
			_ => match self.amount() {
				Some(amount) => tooltip_line(owner, amount.format("level")),
				None => String::new(),
			},
		}
	}

	fn visit_nameables(&self, mut visit: impl FnMut(&dyn Nameable)) {
		match self {
			Self::AttributeBonus(_) | Self::CostReduction(_) | Self::ContainedWeightReduction(_) => {}
			Self::DrBonus(bonus) => visit(&bonus.specialization),
			Self::SkillBonus(bonus) => {
				visit(&bonus.name);
				visit(&bonus.specialization);
				visit(&bonus.category);
			}
			Self::SkillPointBonus(bonus) => {
				visit(&bonus.name);
				visit(&bonus.specialization);
				visit(&bonus.category);
			}
			Self::SpellBonus(bonus) => {
				visit(&bonus.name);
				visit(&bonus.category);
			}
			Self::SpellPointBonus(bonus) => {
				visit(&bonus.name);
				visit(&bonus.category);
			}
			Self::ReactionBonus(bonus) => visit(&bonus.situation),
			Self::ConditionalModifier(bonus) => visit(&bonus.situation),
			Self::WeaponDamageBonus(bonus) => {
				visit(&bonus.name);
				visit(&bonus.specialization);
				visit(&bonus.category);
			}
		}
	}

	fn visit_nameables_mut(&mut self, mut visit: impl FnMut(&mut dyn Nameable)) {
		match self {
			Self::AttributeBonus(_) | Self::CostReduction(_) | Self::ContainedWeightReduction(_) => {}
			Self::DrBonus(bonus) => visit(&mut bonus.specialization),
			Self::SkillBonus(bonus) => {
				visit(&mut bonus.name);
				visit(&mut bonus.specialization);
				visit(&mut bonus.category);
			}
			Self::SkillPointBonus(bonus) => {
				visit(&mut bonus.name);
				visit(&mut bonus.specialization);
				visit(&mut bonus.category);
			}
			Self::SpellBonus(bonus) => {
				visit(&mut bonus.name);
				visit(&mut bonus.category);
			}
			Self::SpellPointBonus(bonus) => {
				visit(&mut bonus.name);
				visit(&mut bonus.category);
			}
			Self::ReactionBonus(bonus) => visit(&mut bonus.situation),
			Self::ConditionalModifier(bonus) => visit(&mut bonus.situation),
			Self::WeaponDamageBonus(bonus) => {
				visit(&mut bonus.name);
				visit(&mut bonus.specialization);
				visit(&mut bonus.category);
			}
		}
	}

	pub fn fill_nameable_keys(&self, keys: &mut BTreeSet<String>) {
		self.visit_nameables(|nameable| nameable.fill_nameable_keys(keys));
	}

	pub fn apply_nameable_keys(&mut self, replacements: &BTreeMap<String, String>) {
		if replacements.is_empty() {
			return;
		}
		self.visit_nameables_mut(|nameable| nameable.apply_nameable_keys(replacements));
	}
}
