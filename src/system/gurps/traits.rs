use super::{
	cost::{self, PointBasis},
	modifier::{SelfControlRoll, TraitModifier},
	Feature, PrereqList,
};
use crate::{impl_enum_key, utility::EnumKey};
use itertools::Itertools;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

#[derive(Debug, enumset::EnumSetType, Default, Hash)]
pub enum ContainerType {
	#[default]
	Group,
	MetaTrait,
	Race,
	AlternativeAbilities,
}

impl EnumKey for ContainerType {
	fn key(&self) -> &'static str {
		match self {
			Self::Group => "group",
			Self::MetaTrait => "meta_trait",
			Self::Race => "race",
			Self::AlternativeAbilities => "alternative_abilities",
		}
	}
}
impl_enum_key!(ContainerType);

fn enabled_by_default() -> bool {
	true
}

fn is_true(value: &bool) -> bool {
	*value
}

/// An advantage, disadvantage, perk, or quirk; or a container of them.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Trait {
	#[serde(default = "Uuid::new_v4")]
	pub id: Uuid,
	pub name: String,
	#[serde(default, skip_serializing_if = "String::is_empty")]
	pub notes: String,
	#[serde(default = "enabled_by_default", skip_serializing_if = "is_true")]
	pub enabled: bool,
	pub kind: TraitKind,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub modifiers: Vec<TraitModifier>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub features: Vec<Feature>,
	#[serde(default)]
	pub prereqs: PrereqList,
	#[serde(default)]
	pub cr: SelfControlRoll,
	#[serde(default, skip_serializing_if = "std::ops::Not::not")]
	pub round_cost_down: bool,
	/// Values for the `@key@` placeholders in this trait's features and prerequisites.
	#[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
	pub replacements: BTreeMap<String, String>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub categories: Vec<String>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitKind {
	Item {
		#[serde(default)]
		base_points: Decimal,
		#[serde(default)]
		levels: Decimal,
		#[serde(default)]
		points_per_level: Decimal,
	},
	Container {
		#[serde(default)]
		container_type: ContainerType,
		#[serde(default)]
		children: Vec<Trait>,
	},
}

impl Trait {
	fn with_kind(name: impl Into<String>, kind: TraitKind) -> Self {
		Self {
			id: Uuid::new_v4(),
			name: name.into(),
			notes: String::new(),
			enabled: true,
			kind,
			modifiers: Vec::new(),
			features: Vec::new(),
			prereqs: PrereqList::default(),
			cr: SelfControlRoll::None,
			round_cost_down: false,
			replacements: BTreeMap::new(),
			categories: Vec::new(),
		}
	}

	pub fn new(name: impl Into<String>, base_points: Decimal) -> Self {
		Self::with_kind(name, TraitKind::Item { base_points, levels: Decimal::ZERO, points_per_level: Decimal::ZERO })
	}

	pub fn leveled(name: impl Into<String>, base_points: Decimal, points_per_level: Decimal, levels: Decimal) -> Self {
		Self::with_kind(name, TraitKind::Item { base_points, levels, points_per_level })
	}

	pub fn container(name: impl Into<String>, container_type: ContainerType, children: Vec<Trait>) -> Self {
		Self::with_kind(name, TraitKind::Container { container_type, children })
	}

	pub fn with_modifier(mut self, modifier: TraitModifier) -> Self {
		self.modifiers.push(modifier);
		self
	}

	pub fn with_feature(mut self, feature: impl Into<Feature>) -> Self {
		self.features.push(feature.into());
		self
	}

	pub fn with_prereqs(mut self, prereqs: PrereqList) -> Self {
		self.prereqs = prereqs;
		self
	}

	pub fn with_cr(mut self, cr: SelfControlRoll) -> Self {
		self.cr = cr;
		self
	}

	pub fn with_replacement(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.replacements.insert(key.into(), value.into());
		self
	}

	pub fn disabled(mut self) -> Self {
		self.enabled = false;
		self
	}

	pub fn is_container(&self) -> bool {
		matches!(self.kind, TraitKind::Container { .. })
	}

	pub fn container_type(&self) -> Option<ContainerType> {
		match &self.kind {
			TraitKind::Container { container_type, .. } => Some(*container_type),
			TraitKind::Item { .. } => None,
		}
	}

	pub fn children(&self) -> &[Trait] {
		match &self.kind {
			TraitKind::Container { children, .. } => children,
			TraitKind::Item { .. } => &[],
		}
	}

	pub fn children_mut(&mut self) -> Option<&mut Vec<Trait>> {
		match &mut self.kind {
			TraitKind::Container { children, .. } => Some(children),
			TraitKind::Item { .. } => None,
		}
	}

	pub fn is_leveled(&self) -> bool {
		matches!(&self.kind, TraitKind::Item { points_per_level, .. } if !points_per_level.is_zero())
	}

	/// The level used to scale this trait's per-level features.
	pub fn current_level(&self) -> Decimal {
		match &self.kind {
			TraitKind::Item { levels, .. } if self.enabled && self.is_leveled() => (*levels).max(Decimal::ZERO),
			_ => Decimal::ZERO,
		}
	}

	/// Every enabled cost adjustment that applies to this trait: those inherited from
	/// enclosing containers followed by its own.
	pub fn enabled_modifiers<'a>(&'a self, inherited: &[&'a TraitModifier]) -> Vec<&'a TraitModifier> {
		let mut modifiers = inherited.to_vec();
		TraitModifier::collect_enabled(&self.modifiers, &mut modifiers);
		modifiers
	}

	/// The self-control roll and each enabled modifier with its cost, as shown under the trait's name.
	pub fn modifier_notes(&self, inherited: &[&TraitModifier]) -> String {
		let cr = (self.cr != SelfControlRoll::None).then(|| self.cr.description().to_owned());
		let modifiers = self.enabled_modifiers(inherited).into_iter().filter_map(|modifier| {
			let adjustment = modifier.adjustment_data()?;
			Some(format!("{}, {}", modifier.name, adjustment.cost_description()))
		});
		cr.into_iter().chain(modifiers).join("; ")
	}

	/// The point cost of this trait (or the total of a container's contents).
	///
	/// `inherited` holds the enabled modifiers of every enclosing container.
	pub fn adjusted_points(&self, inherited: &[&TraitModifier], multiplicative: bool) -> Decimal {
		if !self.enabled {
			return Decimal::ZERO;
		}
		let modifiers = self.enabled_modifiers(inherited);
		match &self.kind {
			TraitKind::Item { base_points, levels, points_per_level } => {
				let basis = PointBasis { base_points: *base_points, levels: *levels, points_per_level: *points_per_level };
				let adjustments = modifiers.iter().filter_map(|modifier| modifier.adjustment_data());
				cost::adjusted_points(basis, self.cr, adjustments, self.round_cost_down, multiplicative)
			}
			TraitKind::Container { container_type, children } => {
				let values = children.iter().map(|child| child.adjusted_points(&modifiers, multiplicative));
				match container_type {
					ContainerType::AlternativeAbilities => {
						let values = values.collect::<Vec<_>>();
						cost::alternative_abilities_points(&values, self.round_cost_down)
					}
					_ => values.sum(),
				}
			}
		}
	}

	/// Visits every enabled trait in this subtree (containers included), depth first,
	/// along with the modifiers it inherits. Disabled traits prune their subtree.
	pub fn walk_enabled<'a>(&'a self, inherited: &[&'a TraitModifier], visit: &mut impl FnMut(&'a Trait, &[&'a TraitModifier])) {
		if !self.enabled {
			return;
		}
		visit(self, inherited);
		if let TraitKind::Container { children, .. } = &self.kind {
			let modifiers = self.enabled_modifiers(inherited);
			for child in children {
				child.walk_enabled(&modifiers, visit);
			}
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use rust_decimal_macros::dec;

	#[test]
	fn disabled_costs_nothing() {
		let item = Trait::new("Combat Reflexes", dec!(15)).disabled();
		assert_eq!(item.adjusted_points(&[], false), Decimal::ZERO);
	}

	#[test]
	fn leveled_with_modifiers() {
		let item = Trait::leveled("Damage Resistance", Decimal::ZERO, dec!(5), dec!(4))
			.with_modifier(TraitModifier::percentage("Tough Skin", dec!(-40)))
			.with_modifier(TraitModifier::percentage("Unused", dec!(50)).disabled());
		assert_eq!(item.adjusted_points(&[], false), dec!(12));
		assert_eq!(item.current_level(), dec!(4));
	}

	#[test]
	fn containers_sum_children() {
		let group = Trait::container(
			"Group",
			ContainerType::Group,
			vec![Trait::new("A", dec!(10)), Trait::new("B", dec!(-5)), Trait::new("C", dec!(7)).disabled()],
		);
		assert_eq!(group.adjusted_points(&[], false), dec!(5));
	}

	#[test]
	fn container_modifiers_are_inherited() {
		let group = Trait::container(
			"Magic",
			ContainerType::MetaTrait,
			vec![Trait::new("A", dec!(10)), Trait::new("B", dec!(20))],
		)
		.with_modifier(TraitModifier::percentage("Mana Sensitive", dec!(-10)));
		assert_eq!(group.adjusted_points(&[], false), dec!(27));
	}

	#[test]
	fn alternative_abilities() {
		let group = Trait::container(
			"Blasts",
			ContainerType::AlternativeAbilities,
			vec![Trait::new("Fire", dec!(10)), Trait::new("Ice", dec!(10)), Trait::new("Shock", dec!(5))],
		);
		assert_eq!(group.adjusted_points(&[], false), dec!(13));
	}

	#[test]
	fn walk_prunes_disabled() {
		let tree = Trait::container(
			"Root",
			ContainerType::Group,
			vec![
				Trait::new("A", dec!(1)),
				Trait::container("Off", ContainerType::Group, vec![Trait::new("B", dec!(1))]).disabled(),
			],
		);
		let mut names = Vec::new();
		tree.walk_enabled(&[], &mut |item, _| names.push(item.name.clone()));
		assert_eq!(names, vec!["Root".to_owned(), "A".to_owned()]);
	}

	#[test]
	fn level_only_for_leveled_items() {
		let flat = Trait::leveled("Flat", dec!(5), Decimal::ZERO, dec!(3));
		assert_eq!(flat.current_level(), Decimal::ZERO);
		let negative = Trait::leveled("Neg", Decimal::ZERO, dec!(2), dec!(-1));
		assert_eq!(negative.current_level(), Decimal::ZERO);
	}

	#[test]
	fn modifier_notes() {
		let container = TraitModifier::percentage("Magical", dec!(-10));
		let bad_temper = Trait::new("Bad Temper", dec!(-10))
			.with_cr(SelfControlRoll::Twelve)
			.with_modifier(TraitModifier::percentage("Off", dec!(5)).disabled())
			.with_modifier(TraitModifier::percentage("Always On", dec!(20)));
		assert_eq!(
			bad_temper.modifier_notes(&[&container]),
			"CR: 12 (Resist quite often); Magical, -10%; Always On, +20%"
		);
		assert_eq!(Trait::new("Plain", dec!(5)).modifier_notes(&[]), "");
	}
}
