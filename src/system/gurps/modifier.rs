use super::{amount::signed, Feature};
use crate::{impl_enum_key, utility::EnumKey};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, enumset::EnumSetType, Default, Hash)]
pub enum CostType {
	#[default]
	Percentage,
	Points,
	Multiplier,
}

impl EnumKey for CostType {
	fn key(&self) -> &'static str {
		match self {
			Self::Percentage => "percentage",
			Self::Points => "points",
			Self::Multiplier => "multiplier",
		}
	}
}
impl_enum_key!(CostType);

/// Which portion of a trait's cost a modifier applies to.
#[derive(Debug, enumset::EnumSetType, Default, Hash)]
pub enum Affects {
	#[default]
	Total,
	BaseOnly,
	LevelsOnly,
}

impl EnumKey for Affects {
	fn key(&self) -> &'static str {
		match self {
			Self::Total => "total",
			Self::BaseOnly => "base_only",
			Self::LevelsOnly => "levels_only",
		}
	}
}
impl_enum_key!(Affects);

impl Affects {
	pub fn applies_to_base(&self) -> bool {
		matches!(self, Self::Total | Self::BaseOnly)
	}

	pub fn applies_to_levels(&self) -> bool {
		matches!(self, Self::Total | Self::LevelsOnly)
	}
}

#[derive(Debug, enumset::EnumSetType, Default, Hash)]
pub enum SelfControlRoll {
	#[default]
	None,
	Six,
	Nine,
	Twelve,
	Fifteen,
}

impl EnumKey for SelfControlRoll {
	fn key(&self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Six => "6",
			Self::Nine => "9",
			Self::Twelve => "12",
			Self::Fifteen => "15",
		}
	}
}
impl_enum_key!(SelfControlRoll);

impl SelfControlRoll {
	pub fn multiplier(&self) -> Decimal {
		match self {
			Self::None => Decimal::ONE,
			Self::Six => dec!(2),
			Self::Nine => dec!(1.5),
			Self::Twelve => Decimal::ONE,
			Self::Fifteen => dec!(0.5),
		}
	}

	pub fn description(&self) -> &'static str {
		match self {
			Self::None => "None Required",
			Self::Six => "CR: 6 (Resist rarely)",
			Self::Nine => "CR: 9 (Resist fairly often)",
			Self::Twelve => "CR: 12 (Resist quite often)",
			Self::Fifteen => "CR: 15 (Resist almost all the time)",
		}
	}
}

fn enabled_by_default() -> bool {
	true
}

fn is_true(value: &bool) -> bool {
	*value
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct TraitModifier {
	#[serde(default = "Uuid::new_v4")]
	pub id: Uuid,
	pub name: String,
	#[serde(default = "enabled_by_default", skip_serializing_if = "is_true")]
	pub enabled: bool,
	pub kind: ModifierKind,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub features: Vec<Feature>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierKind {
	Adjustment(Adjustment),
	Container(Vec<TraitModifier>),
}

#[derive(Clone, Copy, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Adjustment {
	#[serde(default)]
	pub cost_type: CostType,
	#[serde(default)]
	pub affects: Affects,
	#[serde(default)]
	pub cost: Decimal,
	#[serde(default)]
	pub levels: Decimal,
}

impl Adjustment {
	/// The cost after applying levels; an unleveled modifier is its raw cost.
	pub fn cost_modifier(&self) -> Decimal {
		match self.levels > Decimal::ZERO {
			true => self.cost * self.levels,
			false => self.cost,
		}
	}

	pub fn cost_description(&self) -> String {
		let cost = self.cost_modifier();
		match self.cost_type {
			CostType::Percentage => format!("{}%", signed(cost)),
			CostType::Points => signed(cost),
			CostType::Multiplier => format!("×{}", cost.normalize()),
		}
	}
}

impl TraitModifier {
	pub fn adjustment(name: impl Into<String>, cost_type: CostType, affects: Affects, cost: Decimal) -> Self {
		Self {
			id: Uuid::new_v4(),
			name: name.into(),
			enabled: true,
			kind: ModifierKind::Adjustment(Adjustment { cost_type, affects, cost, levels: Decimal::ZERO }),
			features: Vec::new(),
		}
	}

	pub fn percentage(name: impl Into<String>, percent: Decimal) -> Self {
		Self::adjustment(name, CostType::Percentage, Affects::Total, percent)
	}

	pub fn container(name: impl Into<String>, children: Vec<TraitModifier>) -> Self {
		Self {
			id: Uuid::new_v4(),
			name: name.into(),
			enabled: true,
			kind: ModifierKind::Container(children),
			features: Vec::new(),
		}
	}

	pub fn with_levels(mut self, levels: Decimal) -> Self {
		if let ModifierKind::Adjustment(adjustment) = &mut self.kind {
			adjustment.levels = levels;
		}
		self
	}

	pub fn with_feature(mut self, feature: impl Into<Feature>) -> Self {
		self.features.push(feature.into());
		self
	}

	pub fn disabled(mut self) -> Self {
		self.enabled = false;
		self
	}

	pub fn is_container(&self) -> bool {
		matches!(self.kind, ModifierKind::Container(_))
	}

	pub fn adjustment_data(&self) -> Option<&Adjustment> {
		match &self.kind {
			ModifierKind::Adjustment(adjustment) => Some(adjustment),
			ModifierKind::Container(_) => None,
		}
	}

	/// The level used when evaluating this modifier's features.
	pub fn levels(&self) -> Decimal {
		self.adjustment_data().map(|adjustment| adjustment.levels).unwrap_or_default()
	}

	/// Collects every enabled, non-container modifier in `modifiers`,
	/// descending into enabled containers.
	pub fn collect_enabled<'a>(modifiers: impl IntoIterator<Item = &'a TraitModifier>, out: &mut Vec<&'a TraitModifier>) {
		for modifier in modifiers {
			if !modifier.enabled {
				continue;
			}
			match &modifier.kind {
				ModifierKind::Adjustment(_) => out.push(modifier),
				ModifierKind::Container(children) => Self::collect_enabled(children, out),
			}
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn leveled_cost_modifier() {
		let modifier = TraitModifier::percentage("Increased Range", dec!(10)).with_levels(dec!(3));
		let adjustment = modifier.adjustment_data().unwrap();
		assert_eq!(adjustment.cost_modifier(), dec!(30));
		assert_eq!(adjustment.cost_description(), "+30%");
	}

	#[test]
	fn cost_descriptions() {
		let points = TraitModifier::adjustment("Extra", CostType::Points, Affects::BaseOnly, dec!(-5));
		assert_eq!(points.adjustment_data().unwrap().cost_description(), "-5");
		let multiplier = TraitModifier::adjustment("Double", CostType::Multiplier, Affects::Total, dec!(2.0));
		assert_eq!(multiplier.adjustment_data().unwrap().cost_description(), "×2");
	}

	#[test]
	fn collect_enabled_skips_disabled_containers() {
		let modifiers = vec![
			TraitModifier::percentage("A", dec!(10)),
			TraitModifier::percentage("B", dec!(10)).disabled(),
			TraitModifier::container("Group", vec![TraitModifier::percentage("C", dec!(5))]),
			TraitModifier::container("Off", vec![TraitModifier::percentage("D", dec!(5))]).disabled(),
		];
		let mut enabled = Vec::new();
		TraitModifier::collect_enabled(&modifiers, &mut enabled);
		let names = enabled.iter().map(|modifier| modifier.name.as_str()).collect::<Vec<_>>();
		assert_eq!(names, vec!["A", "C"]);
	}

	#[test]
	fn self_control_multipliers() {
		assert_eq!(SelfControlRoll::None.multiplier(), Decimal::ONE);
		assert_eq!(SelfControlRoll::Six.multiplier(), dec!(2));
		assert_eq!(SelfControlRoll::Nine.multiplier(), dec!(1.5));
		assert_eq!(SelfControlRoll::Fifteen.multiplier(), dec!(0.5));
		assert_eq!(SelfControlRoll::ensure_valid("12"), SelfControlRoll::Twelve);
	}
}
