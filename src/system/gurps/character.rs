use super::{
	amount::apply_rounding,
	attribute::{AttributeBase, AttributeDef, Limitation},
	nameable::Nameable,
	relative_level, Body, ContainerType, Equipment, LocationId, PrereqList, Skill, Spell, Subject, Trait, TraitModifier,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::{cell::OnceCell, collections::BTreeMap};
use uuid::Uuid;

mod features;
pub use features::*;
mod points;
pub use points::*;
mod settings;
pub use settings::*;

#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
	pub name: String,
	/// Free-form, e.g. "8" or "TL3 (medieval)".
	pub tech_level: String,
}

/// An item whose prerequisites are not met, and why.
#[derive(Clone, PartialEq, Debug)]
pub struct UnsatisfiedPrereq {
	pub id: Uuid,
	pub name: String,
	pub explanation: String,
}

fn standard_attributes() -> Vec<AttributeDef> {
	AttributeDef::standard()
}

/// A character sheet: the tree of items everything is derived from.
///
/// Derived values are computed on demand. The feature index is the one cached result; it is
/// built on first use and dropped by every mutable accessor.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Character {
	#[serde(default)]
	pub profile: Profile,
	#[serde(default)]
	pub settings: SheetSettings,
	#[serde(default = "standard_attributes")]
	attribute_defs: Vec<AttributeDef>,
	/// Points-bought adjustments to each attribute, by id.
	#[serde(default)]
	attributes: BTreeMap<String, Decimal>,
	#[serde(default)]
	traits: Vec<Trait>,
	#[serde(default)]
	skills: Vec<Skill>,
	#[serde(default)]
	spells: Vec<Spell>,
	#[serde(default)]
	equipment: Vec<Equipment>,
	/// Carried elsewhere; never grants features.
	#[serde(default)]
	other_equipment: Vec<Equipment>,
	#[serde(default)]
	body: Body,
	#[serde(skip)]
	features: OnceCell<FeatureIndex>,
}

impl Default for Character {
	fn default() -> Self {
		Self {
			profile: Profile::default(),
			settings: SheetSettings::default(),
			attribute_defs: standard_attributes(),
			attributes: BTreeMap::new(),
			traits: Vec::new(),
			skills: Vec::new(),
			spells: Vec::new(),
			equipment: Vec::new(),
			other_equipment: Vec::new(),
			body: Body::humanoid(),
			features: OnceCell::new(),
		}
	}
}

impl Character {
	pub fn from_json(json: &str) -> anyhow::Result<Self> {
		Ok(serde_json::from_str(json)?)
	}

	pub fn to_json(&self) -> anyhow::Result<String> {
		Ok(serde_json::to_string_pretty(self)?)
	}

	/// The index of every active bonus, rebuilt if anything changed since it was last read.
	pub fn features(&self) -> &FeatureIndex {
		self.features.get_or_init(|| FeatureIndex::build(self))
	}

	fn invalidate(&mut self) {
		if self.features.take().is_some() {
			log::trace!(target: "character", "feature index invalidated");
		}
	}

	pub fn tech_level(&self) -> &str {
		match self.profile.tech_level.trim().is_empty() {
			true => &self.settings.default_tech_level,
			false => &self.profile.tech_level,
		}
	}

	pub fn traits(&self) -> &[Trait] {
		&self.traits
	}

	pub fn traits_mut(&mut self) -> &mut Vec<Trait> {
		self.invalidate();
		&mut self.traits
	}

	pub fn skills(&self) -> &[Skill] {
		&self.skills
	}

	pub fn skills_mut(&mut self) -> &mut Vec<Skill> {
		self.invalidate();
		&mut self.skills
	}

	pub fn spells(&self) -> &[Spell] {
		&self.spells
	}

	pub fn spells_mut(&mut self) -> &mut Vec<Spell> {
		self.invalidate();
		&mut self.spells
	}

	pub fn equipment(&self) -> &[Equipment] {
		&self.equipment
	}

	pub fn equipment_mut(&mut self) -> &mut Vec<Equipment> {
		self.invalidate();
		&mut self.equipment
	}

	pub fn other_equipment(&self) -> &[Equipment] {
		&self.other_equipment
	}

	pub fn other_equipment_mut(&mut self) -> &mut Vec<Equipment> {
		self.invalidate();
		&mut self.other_equipment
	}

	pub fn body(&self) -> &Body {
		&self.body
	}

	pub fn body_mut(&mut self) -> &mut Body {
		self.invalidate();
		&mut self.body
	}

	pub fn attribute_defs(&self) -> &[AttributeDef] {
		&self.attribute_defs
	}

	pub fn attribute_def(&self, id: &str) -> Option<&AttributeDef> {
		self.attribute_defs.iter().find(|def| def.id.eq_ignore_ascii_case(id))
	}

	/// Replaces the attribute definitions, dropping adjustments to attributes that no longer exist.
	pub fn set_attribute_defs(&mut self, defs: Vec<AttributeDef>) {
		self.invalidate();
		self.attributes.retain(|id, _| defs.iter().any(|def| def.id.eq_ignore_ascii_case(id)));
		self.attribute_defs = defs;
	}

	/// Sets the number of levels bought above (or below) the attribute's base value.
	pub fn set_attribute(&mut self, id: impl Into<String>, adjustment: Decimal) {
		self.attributes.insert(id.into().to_lowercase(), adjustment);
	}

	pub fn attribute_adjustment(&self, id: &str) -> Decimal {
		self.attributes.get(&id.to_lowercase()).copied().unwrap_or_default()
	}

	/// The short name of an attribute, or its id when it is not defined.
	pub fn attribute_name(&self, id: &str) -> String {
		match self.attribute_def(id) {
			Some(def) => def.name.clone(),
			None => id.to_owned(),
		}
	}

	/// Base value plus purchased levels plus every unrestricted attribute bonus.
	///
	/// Unknown attributes, and attributes whose base refers back to themselves, have no value.
	pub fn attribute_current(&self, id: &str) -> Option<Decimal> {
		self.resolve_attribute(id, &mut Vec::new())
	}

	fn resolve_attribute(&self, id: &str, visiting: &mut Vec<String>) -> Option<Decimal> {
		let Some(def) = self.attribute_def(id) else {
			log::debug!(target: "character", "no attribute named {id:?}");
			return None;
		};
		if visiting.contains(&def.id) {
			log::warn!(target: "character", "attribute {:?} has a cyclic base ({})", def.id, visiting.join(" -> "));
			return None;
		}
		visiting.push(def.id.clone());
		let base = match &def.base {
			AttributeBase::Value(value) => *value,
			AttributeBase::Attribute(other) => self.resolve_attribute(other, visiting)?,
		};
		visiting.pop();
		let bonus = self.features().attribute_bonus_for(&def.id, Limitation::None, None);
		Some(base + self.attribute_adjustment(&def.id) + bonus)
	}

	/// Points spent on an attribute's adjustment, after any cost reduction.
	pub fn attribute_points(&self, id: &str) -> Decimal {
		let Some(def) = self.attribute_def(id) else {
			return Decimal::ZERO;
		};
		let points = self.attribute_adjustment(&def.id) * Decimal::from(def.cost_per_point);
		let reduction = self.features().cost_reduction_for(&def.id, None);
		apply_rounding(points * (dec!(100) - reduction) / dec!(100), false)
	}

	/// The effective level of a skill, or None if too few points are spent on it.
	pub fn skill_level(&self, skill: &Skill, mut tooltip: Option<&mut String>) -> Option<Decimal> {
		let features = self.features();
		let points =
			skill.points + features.skill_point_bonus_for(&skill.name, &skill.specialization, &skill.categories, tooltip.as_deref_mut());
		let relative = relative_level(skill.difficulty, points)?;
		let attribute = self.attribute_current(&skill.attribute)?;
		let bonus = features.skill_bonus_for(&skill.name, &skill.specialization, &skill.categories, tooltip);
		Some(attribute + relative + bonus)
	}

	/// The effective level of a spell, or None if too few points are spent on it.
	pub fn spell_level(&self, spell: &Spell, mut tooltip: Option<&mut String>) -> Option<Decimal> {
		let features = self.features();
		let points = spell.points
			+ features.spell_point_bonus_for(
				&spell.name,
				&spell.power_source,
				&spell.colleges,
				&spell.categories,
				tooltip.as_deref_mut(),
			);
		let relative = relative_level(spell.difficulty, points)?;
		let attribute = self.attribute_current(&spell.attribute)?;
		let bonus = features.spell_bonus_for(&spell.name, &spell.power_source, &spell.colleges, &spell.categories, tooltip);
		Some(attribute + relative + bonus)
	}

	/// Damage resistance at a body location, keyed by specialization.
	pub fn dr_for(&self, location: LocationId, tooltip: Option<&mut String>) -> BTreeMap<String, i32> {
		self.body.dr(location, Some(self.features()), tooltip)
	}

	pub fn trait_points(&self, item: &Trait) -> Decimal {
		item.adjusted_points(&[], self.settings.use_multiplicative_modifiers)
	}

	pub fn points(&self) -> PointsBreakdown {
		let mut points = PointsBreakdown::default();
		for def in &self.attribute_defs {
			points.add(PointKind::Attributes, self.attribute_points(&def.id));
		}
		for item in &self.traits {
			self.add_trait_points(item, &[], &mut points);
		}
		points.add(PointKind::Skills, self.skills.iter().map(|skill| skill.points).sum());
		points.add(PointKind::Spells, self.spells.iter().map(|spell| spell.points).sum());
		points
	}

	fn add_trait_points(&self, item: &Trait, inherited: &[&TraitModifier], points: &mut PointsBreakdown) {
		if !item.enabled {
			return;
		}
		let multiplicative = self.settings.use_multiplicative_modifiers;
		match item.container_type() {
			Some(ContainerType::Group) => {
				let modifiers = item.enabled_modifiers(inherited);
				for child in item.children() {
					self.add_trait_points(child, &modifiers, points);
				}
			}
			Some(ContainerType::Race) => points.add(PointKind::Race, item.adjusted_points(inherited, multiplicative)),
			_ => {
				let value = item.adjusted_points(inherited, multiplicative);
				let kind = match value {
					value if value == Decimal::NEGATIVE_ONE => PointKind::Quirks,
					value if value > Decimal::ZERO => PointKind::Advantages,
					_ => PointKind::Disadvantages,
				};
				points.add(kind, value);
			}
		}
	}

	pub fn prereqs_satisfied(&self, prereqs: &PrereqList, subject: Subject<'_>, tooltip: Option<&mut String>) -> bool {
		prereqs.satisfied(self, subject, tooltip, "")
	}

	fn check_prereqs(&self, id: Uuid, name: &str, prereqs: &PrereqList, subject: Subject<'_>, unsatisfied: &mut Vec<UnsatisfiedPrereq>) {
		if prereqs.is_empty() {
			return;
		}
		let mut explanation = String::new();
		if !self.prereqs_satisfied(prereqs, subject, Some(&mut explanation)) {
			unsatisfied.push(UnsatisfiedPrereq { id, name: name.to_owned(), explanation });
		}
	}

	/// Every enabled item whose prerequisites are not met, with the explanation of each failure.
	pub fn unsatisfied_prereqs(&self) -> Vec<UnsatisfiedPrereq> {
		let mut unsatisfied = Vec::new();
		for root in &self.traits {
			root.walk_enabled(&[], &mut |item, _| {
				let mut prereqs = item.prereqs.clone();
				prereqs.apply_nameable_keys(&item.replacements);
				self.check_prereqs(item.id, &item.name, &prereqs, Subject::Trait(item), &mut unsatisfied);
			});
		}
		for skill in &self.skills {
			self.check_prereqs(skill.id, &skill.display_name(), &skill.prereqs, Subject::Skill(skill), &mut unsatisfied);
		}
		for spell in &self.spells {
			self.check_prereqs(spell.id, &spell.name, &spell.prereqs, Subject::Spell(spell), &mut unsatisfied);
		}
		let mut stack = self.equipment.iter().chain(&self.other_equipment).collect::<Vec<_>>();
		while let Some(equipment) = stack.pop() {
			let subject = Subject::Equipment(equipment);
			self.check_prereqs(equipment.id, &equipment.name, &equipment.prereqs, subject, &mut unsatisfied);
			stack.extend(&equipment.children);
		}
		log::debug!(target: "prereq", "{} items with unmet prerequisites", unsatisfied.len());
		unsatisfied
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::system::gurps::{
		feature::{AttributeBonus, CostReduction, DrBonus},
		prereq::TraitPrereq,
		Difficulty, LeveledAmount, StringCriteria,
	};

	#[test]
	fn tech_level_falls_back_to_settings() {
		let mut character = Character::default();
		assert_eq!(character.tech_level(), "3");
		character.profile.tech_level = "8".into();
		assert_eq!(character.tech_level(), "8");
	}

	#[test]
	fn derived_attributes_follow_their_base() {
		let mut character = Character::default();
		character.set_attribute("IQ", dec!(2));
		character.set_attribute("will", dec!(1));
		assert_eq!(character.attribute_current("iq"), Some(dec!(12)));
		assert_eq!(character.attribute_current("will"), Some(dec!(13)));
		assert_eq!(character.attribute_current("luck"), None);
		assert_eq!(character.attribute_name("per"), "Per");
	}

	#[test]
	fn cyclic_attribute_has_no_value() {
		let mut character = Character::default();
		character.set_attribute_defs(vec![
			AttributeDef::new("a", "A", AttributeBase::Attribute("b".into()), 5),
			AttributeDef::new("b", "B", AttributeBase::Attribute("a".into()), 5),
		]);
		assert_eq!(character.attribute_current("a"), None);
	}

	#[test]
	fn bonuses_reach_attributes_and_cache_is_rebuilt() {
		let mut character = Character::default();
		assert_eq!(character.attribute_current("st"), Some(dec!(10)));
		character.traits_mut().push(Trait::new("Strong", dec!(0)).with_feature(AttributeBonus::new("st", LeveledAmount::flat(dec!(2)))));
		assert_eq!(character.attribute_current("st"), Some(dec!(12)));
		let limited = AttributeBonus { limitation: Limitation::LiftingOnly, ..AttributeBonus::new("st", LeveledAmount::flat(dec!(5))) };
		character.traits_mut().push(Trait::new("Lifting ST", dec!(0)).with_feature(limited));
		assert_eq!(character.attribute_current("st"), Some(dec!(12)));
	}

	#[test]
	fn attribute_points_with_reduction() {
		let mut character = Character::default();
		character.set_attribute("st", dec!(3));
		assert_eq!(character.attribute_points("st"), dec!(30));
		character.traits_mut().push(Trait::new("Big", dec!(0)).with_feature(CostReduction { attribute: "st".into(), percentage: dec!(10) }));
		assert_eq!(character.attribute_points("st"), dec!(27));
	}

	#[test]
	fn skill_levels() {
		let mut character = Character::default();
		character.set_attribute("dx", dec!(2));
		let broadsword = Skill::new("Broadsword", "dx", Difficulty::Average, dec!(8));
		let untrained = Skill::new("Stealth", "dx", Difficulty::Average, Decimal::ZERO);
		assert_eq!(character.skill_level(&broadsword, None), Some(dec!(14)));
		assert_eq!(character.skill_level(&untrained, None), None);
		let spell = Spell::new("Fireball", vec!["Fire".into()], dec!(1));
		assert_eq!(character.spell_level(&spell, None), Some(dec!(8)));
	}

	#[test]
	fn point_breakdown() {
		let mut character = Character::default();
		character.set_attribute("dx", dec!(1));
		character.traits_mut().extend([
			Trait::container(
				"Advantages",
				ContainerType::Group,
				vec![Trait::new("Combat Reflexes", dec!(15)), Trait::new("Bad Temper", dec!(-10)), Trait::new("Dislikes Cats", dec!(-1))],
			),
			Trait::container("Dwarf", ContainerType::Race, vec![Trait::new("Night Vision", dec!(5)), Trait::new("Greed", dec!(-15))]),
		]);
		character.skills_mut().push(Skill::new("Axe/Mace", "dx", Difficulty::Average, dec!(4)));
		let points = character.points();
		assert_eq!(points[PointKind::Attributes], dec!(20));
		assert_eq!(points[PointKind::Advantages], dec!(15));
		assert_eq!(points[PointKind::Disadvantages], dec!(-10));
		assert_eq!(points[PointKind::Quirks], dec!(-1));
		assert_eq!(points[PointKind::Race], dec!(-10));
		assert_eq!(points[PointKind::Skills], dec!(4));
		assert_eq!(points.total(), dec!(18));
	}

	#[test]
	fn dr_through_character() {
		let mut character = Character::default();
		character.traits_mut().push(Trait::new("Armor", dec!(0)).with_feature(DrBonus::new("torso", LeveledAmount::flat(dec!(3)))));
		let torso = character.body().find_location("torso").unwrap();
		assert_eq!(character.dr_for(torso, None)["all"], 3);
	}

	#[test]
	fn reports_unmet_prerequisites() {
		let mut character = Character::default();
		let prereqs = PrereqList::all(vec![TraitPrereq::named(StringCriteria::is("@Patron@")).into()]);
		character.traits_mut().extend([
			Trait::new("Favor", dec!(1)).with_replacement("Patron", "Wizard").with_prereqs(prereqs.clone()),
			Trait::new("Gift", dec!(1)).with_replacement("Patron", "Favor").with_prereqs(prereqs),
		]);
		let unsatisfied = character.unsatisfied_prereqs();
		assert_eq!(unsatisfied.len(), 1);
		assert_eq!(unsatisfied[0].name, "Favor");
		assert!(unsatisfied[0].explanation.contains("is \"Wizard\""));
	}

	#[test]
	fn json_round_trip_keeps_cache_out() {
		let mut character = Character::default();
		character.profile.name = "Hob".into();
		character.traits_mut().push(Trait::new("Luck", dec!(15)));
		let _ = character.features();
		let json = character.to_json().unwrap();
		assert!(!json.contains("features\":"));
		let loaded = Character::from_json(&json).unwrap();
		assert_eq!(loaded.profile.name, "Hob");
		assert_eq!(loaded.traits().len(), 1);
		assert_eq!(loaded.body().locations().count(), character.body().locations().count());
	}
}
