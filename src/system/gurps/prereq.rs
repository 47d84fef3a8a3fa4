//! Prerequisite trees and their evaluation against a character.
//!
//! Evaluation never fails: anything that cannot be resolved (an unknown attribute, a
//! missing skill) simply does not match. When a tooltip buffer is supplied, every failing
//! node appends a line describing what was required.

use super::{nameable::Nameable, Character, Equipment, Skill, Spell, Trait};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

mod attribute_prereq;
pub use attribute_prereq::*;
mod contained;
pub use contained::*;
mod list;
pub use list::*;
mod skill_prereq;
pub use skill_prereq::*;
mod spell_prereq;
pub use spell_prereq::*;
mod trait_prereq;
pub use trait_prereq::*;

/// The item whose prerequisites are being checked.
///
/// The subject never satisfies its own prerequisites, and some leaves inspect it directly.
#[derive(Clone, Copy, Debug, Default)]
pub enum Subject<'a> {
	#[default]
	None,
	Trait(&'a Trait),
	Skill(&'a Skill),
	Spell(&'a Spell),
	Equipment(&'a Equipment),
}

impl<'a> Subject<'a> {
	pub fn id(&self) -> Option<Uuid> {
		match self {
			Self::None => None,
			Self::Trait(item) => Some(item.id),
			Self::Skill(skill) => Some(skill.id),
			Self::Spell(spell) => Some(spell.id),
			Self::Equipment(equipment) => Some(equipment.id),
		}
	}

	pub fn is(&self, id: &Uuid) -> bool {
		self.id().as_ref() == Some(id)
	}

	pub fn tech_level(&self) -> Option<&'a str> {
		match self {
			Self::None | Self::Trait(_) => None,
			Self::Skill(skill) => skill.tech_level.as_deref(),
			Self::Spell(spell) => spell.tech_level.as_deref(),
			Self::Equipment(equipment) => equipment.tech_level.as_deref(),
		}
	}

	pub fn name(&self) -> Option<&'a str> {
		match self {
			Self::None => None,
			Self::Trait(item) => Some(&item.name),
			Self::Skill(skill) => Some(&skill.name),
			Self::Spell(spell) => Some(&spell.name),
			Self::Equipment(equipment) => Some(&equipment.name),
		}
	}
}

#[derive(Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Prereq {
	List(PrereqList),
	Trait(TraitPrereq),
	Attribute(AttributePrereq),
	Skill(SkillPrereq),
	Spell(SpellPrereq),
	ContainedQuantity(ContainedQuantityPrereq),
	ContainedWeight(ContainedWeightPrereq),
}

macro_rules! impl_into_prereq {
	($($variant:ident($inner:ident)),+) => {
		$(
			impl From<$inner> for Prereq {
				fn from(value: $inner) -> Self {
					Self::$variant(value)
				}
			}
		)+
	};
}
impl_into_prereq!(
	List(PrereqList),
	Trait(TraitPrereq),
	Attribute(AttributePrereq),
	Skill(SkillPrereq),
	Spell(SpellPrereq),
	ContainedQuantity(ContainedQuantityPrereq),
	ContainedWeight(ContainedWeightPrereq)
);

impl Prereq {
	/// Whether `character` meets this prerequisite on behalf of `subject`.
	///
	/// `prefix` is written at the start of every explanation line this node contributes.
	pub fn satisfied(&self, character: &Character, subject: Subject<'_>, tooltip: Option<&mut String>, prefix: &str) -> bool {
		match self {
			Self::List(list) => list.satisfied(character, subject, tooltip, prefix),
			Self::Trait(prereq) => prereq.satisfied(character, subject, tooltip, prefix),
			Self::Attribute(prereq) => prereq.satisfied(character, tooltip, prefix),
			Self::Skill(prereq) => prereq.satisfied(character, subject, tooltip, prefix),
			Self::Spell(prereq) => prereq.satisfied(character, subject, tooltip, prefix),
			Self::ContainedQuantity(prereq) => prereq.satisfied(subject, tooltip, prefix),
			Self::ContainedWeight(prereq) => prereq.satisfied(subject, tooltip, prefix),
		}
	}

	fn visit_nameables_mut(&mut self, visit: &mut impl FnMut(&mut dyn Nameable)) {
		match self {
			Self::List(list) => {
				for prereq in &mut list.prereqs {
					prereq.visit_nameables_mut(visit);
				}
			}
			Self::Trait(prereq) => {
				visit(&mut prereq.name);
				visit(&mut prereq.notes);
			}
			Self::Skill(prereq) => {
				visit(&mut prereq.name);
				visit(&mut prereq.specialization);
			}
			Self::Spell(prereq) => visit(&mut prereq.qualifier),
			Self::Attribute(_) | Self::ContainedQuantity(_) | Self::ContainedWeight(_) => {}
		}
	}

	fn visit_nameables(&self, visit: &mut impl FnMut(&dyn Nameable)) {
		match self {
			Self::List(list) => {
				for prereq in &list.prereqs {
					prereq.visit_nameables(visit);
				}
			}
			Self::Trait(prereq) => {
				visit(&prereq.name);
				visit(&prereq.notes);
			}
			Self::Skill(prereq) => {
				visit(&prereq.name);
				visit(&prereq.specialization);
			}
			Self::Spell(prereq) => visit(&prereq.qualifier),
			Self::Attribute(_) | Self::ContainedQuantity(_) | Self::ContainedWeight(_) => {}
		}
	}
}

impl Nameable for Prereq {
	fn fill_nameable_keys(&self, keys: &mut BTreeSet<String>) {
		self.visit_nameables(&mut |nameable| nameable.fill_nameable_keys(keys));
	}

	fn apply_nameable_keys(&mut self, replacements: &BTreeMap<String, String>) {
		self.visit_nameables_mut(&mut |nameable| nameable.apply_nameable_keys(replacements));
	}
}

/// The opening of a leaf's explanation line.
pub(crate) fn has_text(has: bool) -> &'static str {
	match has {
		true => "Has",
		false => "Does not have",
	}
}

pub(crate) fn explain(tooltip: Option<&mut String>, prefix: &str, has: bool, detail: std::fmt::Arguments<'_>) {
	if let Some(tooltip) = tooltip {
		tooltip.push('\n');
		tooltip.push_str(prefix);
		tooltip.push_str(has_text(has));
		tooltip.push(' ');
		tooltip.push_str(&detail.to_string());
	}
}

pub(crate) fn has_by_default() -> bool {
	true
}
