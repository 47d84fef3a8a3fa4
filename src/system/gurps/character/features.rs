use super::Character;
use crate::system::gurps::{
	amount::as_i32,
	attribute::Limitation,
	feature::{
		exact_key, wildcard_key, AttributeBonus, SkillSelection, WeaponSelection, CONDITIONAL_MODIFIER, COST_REDUCTION,
		HIT_LOCATION_PREFIX, REACTION, SKILL_NAME, SKILL_POINTS, SPELL_COLLEGE, SPELL_COLLEGE_POINTS, SPELL_NAME, SPELL_POINTS,
		SPELL_POWER_SOURCE, SPELL_POWER_SOURCE_POINTS, THIS_WEAPON, WEAPON_NAMED_PREFIX,
	},
	Equipment, Feature, TraitModifier,
};
use multimap::MultiMap;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

const MAX_COST_REDUCTION: Decimal = dec!(80);

/// The node a bonus came from.
#[derive(Clone, PartialEq, Debug)]
pub struct Owner {
	pub id: Uuid,
	pub name: String,
}

/// A feature as granted by a specific node, with its level already applied.
#[derive(Clone, PartialEq, Debug)]
pub struct Bonus {
	pub feature: Feature,
	pub owner: Owner,
}

impl Bonus {
	pub fn value(&self) -> Decimal {
		self.feature.amount().map(|amount| amount.adjusted_amount()).unwrap_or_default()
	}
}

/// Flat and percentage damage bonuses for one weapon.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct WeaponDamage {
	pub flat: Decimal,
	pub percent: Decimal,
}

/// The combined value of every bonus for one situation, and where each came from.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct SituationalBonus {
	pub situation: String,
	pub total: Decimal,
	pub sources: Vec<(String, Decimal)>,
}

/// Every bonus granted by the active nodes of a character, keyed by what it targets.
///
/// Keys are stored lowercase. Bonuses with simple "name is X" criteria sit under an exact
/// `prefix/name` key; anything else sits under the prefix's `*` wildcard key and is re-tested
/// against its full criteria whenever it is looked up.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct FeatureIndex {
	map: MultiMap<String, Bonus>,
	count: usize,
}

impl FeatureIndex {
	pub fn build(character: &Character) -> Self {
		let mut index = Self::default();
		for root in character.traits() {
			root.walk_enabled(&[], &mut |item, _| {
				let owner = Owner { id: item.id, name: item.name.clone() };
				for feature in &item.features {
					index.insert(feature, &item.replacements, &owner, item.current_level());
				}
				let mut modifiers = Vec::new();
				TraitModifier::collect_enabled(&item.modifiers, &mut modifiers);
				for modifier in modifiers {
					let owner = Owner { id: item.id, name: modifier.name.clone() };
					for feature in &modifier.features {
						index.insert(feature, &item.replacements, &owner, modifier.levels());
					}
				}
			});
		}
		let none = BTreeMap::new();
		for skill in character.skills() {
			let owner = Owner { id: skill.id, name: skill.display_name() };
			for feature in &skill.features {
				index.insert(feature, &none, &owner, Decimal::ZERO);
			}
		}
		for spell in character.spells() {
			let owner = Owner { id: spell.id, name: spell.name.clone() };
			for feature in &spell.features {
				index.insert(feature, &none, &owner, Decimal::ZERO);
			}
		}
		for equipment in character.equipment() {
			index.insert_equipment(equipment);
		}
		log::debug!(target: "features", "indexed {} bonuses under {} keys", index.count, index.map.len());
		index
	}

	fn insert_equipment(&mut self, equipment: &Equipment) {
		if !equipment.equipped {
			return;
		}
		let none = BTreeMap::new();
		let owner = Owner { id: equipment.id, name: equipment.name.clone() };
		for feature in &equipment.features {
			self.insert(feature, &none, &owner, Decimal::ZERO);
		}
		for modifier in equipment.modifiers.iter().filter(|modifier| modifier.enabled) {
			let owner = Owner { id: equipment.id, name: modifier.name.clone() };
			for feature in &modifier.features {
				self.insert(feature, &none, &owner, Decimal::ZERO);
			}
		}
		for child in &equipment.children {
			self.insert_equipment(child);
		}
	}

	fn insert(&mut self, feature: &Feature, replacements: &BTreeMap<String, String>, owner: &Owner, level: Decimal) {
		let mut feature = feature.clone();
		feature.apply_nameable_keys(replacements);
		feature.set_level(level);
		let key = feature.map_key().to_lowercase();
		self.map.insert(key, Bonus { feature, owner: owner.clone() });
		self.count += 1;
	}

	/// Number of bonuses in the index.
	pub fn len(&self) -> usize {
		self.count
	}

	pub fn is_empty(&self) -> bool {
		self.count == 0
	}

	/// The bonuses stored under `key` (compared case-insensitively).
	pub fn get(&self, key: &str) -> &[Bonus] {
		self.map.get_vec(&key.to_lowercase()).map(Vec::as_slice).unwrap_or_default()
	}

	fn accumulate(&self, key: &str, mut accept: impl FnMut(&Bonus) -> bool, mut tooltip: Option<&mut String>) -> Decimal {
		let mut total = Decimal::ZERO;
		for bonus in self.get(key) {
			if !accept(bonus) {
				continue;
			}
			total += bonus.value();
			if let Some(tooltip) = tooltip.as_deref_mut() {
				tooltip.push_str(&bonus.feature.tooltip(&bonus.owner.name));
			}
		}
		total
	}

	pub fn attribute_bonus_for(&self, attribute: &str, limitation: Limitation, tooltip: Option<&mut String>) -> Decimal {
		let key = AttributeBonus { attribute: attribute.to_owned(), limitation, amount: Default::default() }.map_key();
		self.accumulate(&key, |bonus| matches!(bonus.feature, Feature::AttributeBonus(_)), tooltip)
	}

	/// The total cost reduction for `attribute`, as a percentage no greater than 80.
	pub fn cost_reduction_for(&self, attribute: &str, mut tooltip: Option<&mut String>) -> Decimal {
		let mut total = Decimal::ZERO;
		for bonus in self.get(COST_REDUCTION) {
			let Feature::CostReduction(reduction) = &bonus.feature else {
				continue;
			};
			if !reduction.attribute.eq_ignore_ascii_case(attribute) {
				continue;
			}
			total += reduction.percentage;
			if let Some(tooltip) = tooltip.as_deref_mut() {
				tooltip.push_str(&bonus.feature.tooltip(&bonus.owner.name));
			}
		}
		total.min(MAX_COST_REDUCTION)
	}

	pub fn skill_bonus_for<S: AsRef<str>>(&self, name: &str, specialization: &str, categories: &[S], mut tooltip: Option<&mut String>) -> Decimal {
		let accept = |bonus: &Bonus| match &bonus.feature {
			Feature::SkillBonus(skill) => skill.selection == SkillSelection::Name && skill.matches(name, specialization, categories),
			_ => false,
		};
		self.accumulate(&exact_key(SKILL_NAME, name), accept, tooltip.as_deref_mut())
			+ self.accumulate(&wildcard_key(SKILL_NAME), accept, tooltip)
	}

	pub fn skill_point_bonus_for<S: AsRef<str>>(
		&self,
		name: &str,
		specialization: &str,
		categories: &[S],
		mut tooltip: Option<&mut String>,
	) -> Decimal {
		let accept = |bonus: &Bonus| match &bonus.feature {
			Feature::SkillPointBonus(points) => points.matches(name, specialization, categories),
			_ => false,
		};
		self.accumulate(&exact_key(SKILL_POINTS, name), accept, tooltip.as_deref_mut())
			+ self.accumulate(&wildcard_key(SKILL_POINTS), accept, tooltip)
	}

	/// Every key a bonus to the spell could be stored under, without duplicates.
	fn spell_keys<S: AsRef<str>>(name_prefix: &str, college_prefix: &str, power_source_prefix: &str, name: &str, power_source: &str, colleges: &[S]) -> Vec<String> {
		let mut keys = vec![college_prefix.to_owned(), exact_key(name_prefix, name), exact_key(power_source_prefix, power_source)];
		let colleges = colleges.iter().map(|college| college.as_ref().to_lowercase()).collect::<BTreeSet<_>>();
		keys.extend(colleges.iter().map(|college| exact_key(college_prefix, college)));
		keys.extend([wildcard_key(name_prefix), wildcard_key(college_prefix), wildcard_key(power_source_prefix)]);
		keys
	}

	pub fn spell_bonus_for<S: AsRef<str>>(
		&self,
		name: &str,
		power_source: &str,
		colleges: &[S],
		categories: &[S],
		mut tooltip: Option<&mut String>,
	) -> Decimal {
		let accept = |bonus: &Bonus| match &bonus.feature {
			Feature::SpellBonus(spell) => spell.matches(name, power_source, colleges, categories),
			_ => false,
		};
		let keys = Self::spell_keys(SPELL_NAME, SPELL_COLLEGE, SPELL_POWER_SOURCE, name, power_source, colleges);
		keys.iter().map(|key| self.accumulate(key, accept, tooltip.as_deref_mut())).sum()
	}

	pub fn spell_point_bonus_for<S: AsRef<str>>(
		&self,
		name: &str,
		power_source: &str,
		colleges: &[S],
		categories: &[S],
		mut tooltip: Option<&mut String>,
	) -> Decimal {
		let accept = |bonus: &Bonus| match &bonus.feature {
			Feature::SpellPointBonus(spell) => spell.matches(name, power_source, colleges, categories),
			_ => false,
		};
		let keys = Self::spell_keys(SPELL_POINTS, SPELL_COLLEGE_POINTS, SPELL_POWER_SOURCE_POINTS, name, power_source, colleges);
		keys.iter().map(|key| self.accumulate(key, accept, tooltip.as_deref_mut())).sum()
	}

	/// Skill bonuses for a weapon: those its `owner` grants to its own weapons, and those for
	/// weapons matching the weapon's name and usage.
	pub fn weapon_skill_bonus_for<S: AsRef<str>>(
		&self,
		owner: Uuid,
		weapon: &str,
		usage: &str,
		categories: &[S],
		mut tooltip: Option<&mut String>,
	) -> Decimal {
		let this_weapon = |bonus: &Bonus| match &bonus.feature {
			Feature::SkillBonus(skill) => {
				skill.selection == SkillSelection::ThisWeapon && bonus.owner.id == owner && skill.specialization.matches(usage)
			}
			_ => false,
		};
		let named = |bonus: &Bonus| match &bonus.feature {
			Feature::SkillBonus(skill) => {
				skill.selection == SkillSelection::WeaponsWithName && skill.matches(weapon, usage, categories)
			}
			_ => false,
		};
		self.accumulate(THIS_WEAPON, this_weapon, tooltip.as_deref_mut())
			+ self.accumulate(&exact_key(WEAPON_NAMED_PREFIX, weapon), named, tooltip.as_deref_mut())
			+ self.accumulate(&wildcard_key(WEAPON_NAMED_PREFIX), named, tooltip)
	}

	/// Damage bonuses for a weapon owned by `owner`, used with `skill` at `relative_level`
	/// (the skill level relative to its controlling attribute).
	#[allow(clippy::too_many_arguments)]
	pub fn weapon_damage_bonus_for<S: AsRef<str>>(
		&self,
		owner: Uuid,
		weapon: &str,
		usage: &str,
		skill: &str,
		specialization: &str,
		relative_level: Decimal,
		categories: &[S],
		mut tooltip: Option<&mut String>,
	) -> WeaponDamage {
		let mut damage = WeaponDamage::default();
		let keys = [
			THIS_WEAPON.to_owned(),
			exact_key(WEAPON_NAMED_PREFIX, weapon),
			wildcard_key(WEAPON_NAMED_PREFIX),
			exact_key(SKILL_NAME, skill),
			wildcard_key(SKILL_NAME),
		];
		for key in &keys {
			for bonus in self.get(key) {
				let Feature::WeaponDamageBonus(damage_bonus) = &bonus.feature else {
					continue;
				};
				let applies = match damage_bonus.selection {
					WeaponSelection::ThisWeapon => {
						key == THIS_WEAPON
							&& bonus.owner.id == owner
							&& damage_bonus.specialization.matches(usage)
							&& damage_bonus.level.matches(relative_level)
					}
					WeaponSelection::WithName => damage_bonus.matches_weapon(weapon, usage, categories),
					WeaponSelection::WithRequiredSkill => {
						damage_bonus.matches_skill(skill, specialization, relative_level, categories)
					}
				};
				if !applies {
					continue;
				}
				match damage_bonus.percent {
					true => damage.percent += bonus.value(),
					false => damage.flat += bonus.value(),
				}
				if let Some(tooltip) = tooltip.as_deref_mut() {
					tooltip.push_str(&bonus.feature.tooltip(&bonus.owner.name));
				}
			}
		}
		damage
	}

	/// Adds the DR bonuses for the location with `location_id` into `dr`, keyed by lowercase specialization.
	pub fn dr_bonuses_for(&self, location_id: &str, mut tooltip: Option<&mut String>, dr: &mut BTreeMap<String, i32>) {
		for bonus in self.get(&format!("{HIT_LOCATION_PREFIX}{location_id}")) {
			let Feature::DrBonus(dr_bonus) = &bonus.feature else {
				continue;
			};
			*dr.entry(dr_bonus.specialization.to_lowercase()).or_default() += as_i32(bonus.value());
			if let Some(tooltip) = tooltip.as_deref_mut() {
				tooltip.push_str(&bonus.feature.tooltip(&bonus.owner.name));
			}
		}
	}

	fn situational(&self, key: &str, mut tooltip: Option<&mut String>) -> Vec<SituationalBonus> {
		let mut groups = BTreeMap::<String, SituationalBonus>::new();
		for bonus in self.get(key) {
			let situation = match &bonus.feature {
				Feature::ReactionBonus(reaction) => &reaction.situation,
				Feature::ConditionalModifier(modifier) => &modifier.situation,
				_ => continue,
			};
			let group = groups.entry(situation.to_lowercase()).or_insert_with(|| SituationalBonus {
				situation: situation.clone(),
				..Default::default()
			});
			group.total += bonus.value();
			group.sources.push((bonus.owner.name.clone(), bonus.value()));
			if let Some(tooltip) = tooltip.as_deref_mut() {
				tooltip.push_str(&bonus.feature.tooltip(&bonus.owner.name));
				tooltip.push_str(&format!(" {situation}"));
			}
		}
		groups.into_values().collect()
	}

	/// Reaction modifiers grouped by situation, in situation order.
	/// Each source also adds a line, followed by its situation, to `tooltip`.
	pub fn reactions(&self, tooltip: Option<&mut String>) -> Vec<SituationalBonus> {
		self.situational(REACTION, tooltip)
	}

	/// Conditional roll modifiers grouped by situation, in situation order.
	pub fn conditional_modifiers(&self, tooltip: Option<&mut String>) -> Vec<SituationalBonus> {
		self.situational(CONDITIONAL_MODIFIER, tooltip)
	}
}
