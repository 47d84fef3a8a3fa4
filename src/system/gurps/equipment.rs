use super::{
	feature::{Feature, WeightReduction},
	PrereqList,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn one() -> Decimal {
	Decimal::ONE
}

fn enabled_by_default() -> bool {
	true
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct EquipmentModifier {
	#[serde(default = "Uuid::new_v4")]
	pub id: Uuid,
	pub name: String,
	#[serde(default = "enabled_by_default")]
	pub enabled: bool,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub features: Vec<Feature>,
}

impl EquipmentModifier {
	pub fn new(name: impl Into<String>) -> Self {
		Self { id: Uuid::new_v4(), name: name.into(), enabled: true, features: Vec::new() }
	}

	pub fn with_feature(mut self, feature: impl Into<Feature>) -> Self {
		self.features.push(feature.into());
		self
	}
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Equipment {
	#[serde(default = "Uuid::new_v4")]
	pub id: Uuid,
	pub name: String,
	#[serde(default = "one")]
	pub quantity: Decimal,
	/// Pounds per unit.
	#[serde(default)]
	pub weight: Decimal,
	#[serde(default, skip_serializing_if = "std::ops::Not::not")]
	pub container: bool,
	#[serde(default = "enabled_by_default")]
	pub equipped: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub tech_level: Option<String>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub categories: Vec<String>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub features: Vec<Feature>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub modifiers: Vec<EquipmentModifier>,
	#[serde(default)]
	pub prereqs: PrereqList,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub children: Vec<Equipment>,
}

impl Equipment {
	pub fn new(name: impl Into<String>, quantity: Decimal, weight: Decimal) -> Self {
		Self {
			id: Uuid::new_v4(),
			name: name.into(),
			quantity,
			weight,
			container: false,
			equipped: true,
			tech_level: None,
			categories: Vec::new(),
			features: Vec::new(),
			modifiers: Vec::new(),
			prereqs: PrereqList::default(),
			children: Vec::new(),
		}
	}

	pub fn container(name: impl Into<String>, weight: Decimal, children: Vec<Equipment>) -> Self {
		Self { container: true, children, ..Self::new(name, Decimal::ONE, weight) }
	}

	pub fn with_feature(mut self, feature: impl Into<Feature>) -> Self {
		self.features.push(feature.into());
		self
	}

	pub fn with_modifier(mut self, modifier: EquipmentModifier) -> Self {
		self.modifiers.push(modifier);
		self
	}

	pub fn with_prereqs(mut self, prereqs: PrereqList) -> Self {
		self.prereqs = prereqs;
		self
	}

	pub fn unequipped(mut self) -> Self {
		self.equipped = false;
		self
	}

	/// This item's own features followed by those of its enabled modifiers.
	pub fn active_features(&self) -> impl Iterator<Item = &Feature> + '_ {
		let modifier_features = self.modifiers.iter().filter(|modifier| modifier.enabled).flat_map(|modifier| &modifier.features);
		self.features.iter().chain(modifier_features)
	}

	/// The total quantity of the items directly inside this container.
	pub fn contained_quantity(&self) -> Decimal {
		self.children.iter().map(|child| child.quantity).sum()
	}

	/// Weight of the contents after this container's weight reductions.
	pub fn contained_weight(&self) -> Decimal {
		let contents = self.children.iter().map(Self::extended_weight).sum::<Decimal>();
		if contents.is_zero() {
			return contents;
		}
		let mut percent = Decimal::ZERO;
		let mut pounds = Decimal::ZERO;
		for feature in self.active_features() {
			if let Feature::ContainedWeightReduction(reduction) = feature {
				match reduction.reduction {
					WeightReduction::Percent(value) => percent += value,
					WeightReduction::Pounds(value) => pounds += value,
				}
			}
		}
		let reduced = match percent >= dec!(100) {
			true => Decimal::ZERO,
			false => contents - contents * percent / dec!(100),
		};
		(reduced - pounds).max(Decimal::ZERO)
	}

	/// Weight of the whole stack, including (reduced) contents.
	pub fn extended_weight(&self) -> Decimal {
		self.quantity * self.weight + self.contained_weight()
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::system::gurps::feature::ContainedWeightReduction;

	fn backpack(reductions: &[WeightReduction]) -> Equipment {
		let mut pack = Equipment::container(
			"Backpack",
			dec!(3),
			vec![Equipment::new("Rations", dec!(4), dec!(0.5)), Equipment::new("Rope", dec!(1), dec!(8))],
		);
		for reduction in reductions {
			pack = pack.with_feature(ContainedWeightReduction::from(*reduction));
		}
		pack
	}

	#[test]
	fn unreduced() {
		let pack = backpack(&[]);
		assert_eq!(pack.contained_quantity(), dec!(5));
		assert_eq!(pack.contained_weight(), dec!(10));
		assert_eq!(pack.extended_weight(), dec!(13));
	}

	#[test]
	fn percent_then_pounds() {
		let pack = backpack(&[WeightReduction::Percent(dec!(50)), WeightReduction::Pounds(dec!(2))]);
		assert_eq!(pack.contained_weight(), dec!(3));
	}

	#[test]
	fn full_reduction_empties() {
		let pack = backpack(&[WeightReduction::Percent(dec!(60)), WeightReduction::Percent(dec!(40))]);
		assert_eq!(pack.extended_weight(), dec!(3));
		let pack = backpack(&[WeightReduction::Pounds(dec!(25))]);
		assert_eq!(pack.contained_weight(), Decimal::ZERO);
	}

	#[test]
	fn modifier_reductions_apply() {
		let pack = backpack(&[]).with_modifier(
			EquipmentModifier::new("Bag of Holding").with_feature(ContainedWeightReduction::from(WeightReduction::Percent(dec!(100)))),
		);
		assert_eq!(pack.extended_weight(), dec!(3));
	}
}
