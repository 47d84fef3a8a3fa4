use crate::{impl_enum_key, utility::EnumKey};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Restricts an attribute bonus to one use of the attribute.
#[derive(Debug, enumset::EnumSetType, Default, Hash)]
pub enum Limitation {
	#[default]
	None,
	StrikingOnly,
	LiftingOnly,
	ThrowingOnly,
}

impl EnumKey for Limitation {
	fn key(&self) -> &'static str {
		match self {
			Self::None => "none",
			Self::StrikingOnly => "striking_only",
			Self::LiftingOnly => "lifting_only",
			Self::ThrowingOnly => "throwing_only",
		}
	}
}
impl_enum_key!(Limitation);

impl Limitation {
	pub fn description(&self) -> Option<&'static str> {
		match self {
			Self::None => None,
			Self::StrikingOnly => Some("for striking only"),
			Self::LiftingOnly => Some("for lifting only"),
			Self::ThrowingOnly => Some("for throwing only"),
		}
	}
}

/// Where an attribute's unadjusted value comes from.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeBase {
	Value(Decimal),
	/// The current value of another attribute (e.g. Will starts at IQ).
	Attribute(String),
}

impl Default for AttributeBase {
	fn default() -> Self {
		Self::Value(Decimal::from(10))
	}
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct AttributeDef {
	pub id: String,
	pub name: String,
	#[serde(default, skip_serializing_if = "String::is_empty")]
	pub full_name: String,
	#[serde(default)]
	pub base: AttributeBase,
	pub cost_per_point: i32,
}

impl AttributeDef {
	pub fn new(id: impl Into<String>, name: impl Into<String>, base: AttributeBase, cost_per_point: i32) -> Self {
		Self { id: id.into(), name: name.into(), full_name: String::new(), base, cost_per_point }
	}

	pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
		self.full_name = full_name.into();
		self
	}

	/// The full name when one is set, the short name otherwise.
	pub fn display_name(&self) -> &str {
		match self.full_name.is_empty() {
			true => &self.name,
			false => &self.full_name,
		}
	}

	/// The attribute set of a standard human character.
	pub fn standard() -> Vec<Self> {
		let ten = || AttributeBase::Value(Decimal::from(10));
		let of = |id: &str| AttributeBase::Attribute(id.to_owned());
		vec![
			Self::new("st", "ST", ten(), 10).with_full_name("Strength"),
			Self::new("dx", "DX", ten(), 20).with_full_name("Dexterity"),
			Self::new("iq", "IQ", ten(), 20).with_full_name("Intelligence"),
			Self::new("ht", "HT", ten(), 10).with_full_name("Health"),
			Self::new("will", "Will", of("iq"), 5),
			Self::new("per", "Per", of("iq"), 5).with_full_name("Perception"),
			Self::new("hp", "HP", of("st"), 2).with_full_name("Hit Points"),
			Self::new("fp", "FP", of("ht"), 3).with_full_name("Fatigue Points"),
		]
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn standard_ids_are_unique() {
		let defs = AttributeDef::standard();
		let mut ids = defs.iter().map(|def| def.id.as_str()).collect::<Vec<_>>();
		ids.sort();
		ids.dedup();
		assert_eq!(ids.len(), defs.len());
	}

	#[test]
	fn display_name_prefers_full_name() {
		let defs = AttributeDef::standard();
		assert_eq!(defs[0].display_name(), "Strength");
		assert_eq!(defs[4].display_name(), "Will");
	}
}
