use super::explain;
use crate::system::gurps::{Character, NumericCriteria};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct AttributePrereq {
	#[serde(default = "super::has_by_default")]
	pub has: bool,
	pub which: String,
	/// A second attribute whose value is added to the first before comparing.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub combined_with: Option<String>,
	#[serde(default)]
	pub qualifier: NumericCriteria,
}

impl AttributePrereq {
	pub fn at_least(which: impl Into<String>, value: Decimal) -> Self {
		Self { has: true, which: which.into(), combined_with: None, qualifier: NumericCriteria::at_least(value) }
	}

	fn value(&self, character: &Character) -> Option<Decimal> {
		let value = character.attribute_current(&self.which)?;
		match &self.combined_with {
			None => Some(value),
			Some(other) => Some(value + character.attribute_current(other)?),
		}
	}

	pub fn satisfied(&self, character: &Character, tooltip: Option<&mut String>, prefix: &str) -> bool {
		let matched = match self.value(character) {
			Some(value) => self.qualifier.matches(value),
			None => {
				log::debug!(target: "prereq", "attribute prerequisite on {:?} could not be resolved", self.which);
				false
			}
		};
		let satisfied = matched == self.has;
		if !satisfied {
			let mut name = character.attribute_name(&self.which);
			if let Some(other) = &self.combined_with {
				name = format!("{name} combined with {}", character.attribute_name(other));
			}
			explain(tooltip, prefix, self.has, format_args!("{name} which {}", self.qualifier));
		}
		satisfied
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use rust_decimal_macros::dec;

	#[test]
	fn compares_current_value() {
		let mut character = Character::default();
		character.set_attribute("iq", dec!(3));
		assert!(AttributePrereq::at_least("iq", dec!(13)).satisfied(&character, None, ""));
		assert!(!AttributePrereq::at_least("iq", dec!(14)).satisfied(&character, None, ""));
	}

	#[test]
	fn combined_attributes() {
		let character = Character::default();
		let prereq = AttributePrereq { combined_with: Some("dx".into()), ..AttributePrereq::at_least("st", dec!(21)) };
		let mut tooltip = String::new();
		assert!(!prereq.satisfied(&character, Some(&mut tooltip), ""));
		assert_eq!(tooltip, "\nHas ST combined with DX which is at least 21");
	}

	#[test]
	fn unknown_attribute_fails_softly() {
		let character = Character::default();
		assert!(!AttributePrereq::at_least("sanity", dec!(1)).satisfied(&character, None, ""));
		let inverted = AttributePrereq { has: false, ..AttributePrereq::at_least("sanity", dec!(1)) };
		assert!(inverted.satisfied(&character, None, ""));
	}
}
