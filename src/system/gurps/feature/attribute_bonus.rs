use super::{tooltip_line, ATTRIBUTE_PREFIX};
use crate::{
	system::gurps::{attribute::Limitation, LeveledAmount},
	utility::EnumKey,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct AttributeBonus {
	pub attribute: String,
	#[serde(default)]
	pub limitation: Limitation,
	pub amount: LeveledAmount,
}

impl AttributeBonus {
	pub fn new(attribute: impl Into<String>, amount: LeveledAmount) -> Self {
		Self { attribute: attribute.into(), limitation: Limitation::None, amount }
	}

	pub fn map_key(&self) -> String {
		match self.limitation {
			Limitation::None => format!("{ATTRIBUTE_PREFIX}{}", self.attribute),
			limitation => format!("{ATTRIBUTE_PREFIX}{}.{}", self.attribute, limitation.key()),
		}
	}

	pub fn tooltip(&self, owner: &str) -> String {
		let amount = self.amount.format("level");
		match self.limitation.description() {
			Some(limitation) => tooltip_line(owner, format!("{amount} {limitation}")),
			None => tooltip_line(owner, amount),
		}
	}
}
