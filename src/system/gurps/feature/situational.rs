use crate::system::gurps::LeveledAmount;
use serde::{Deserialize, Serialize};

/// A reaction modifier that applies in a named situation (e.g. "from clergy").
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ReactionBonus {
	pub situation: String,
	pub amount: LeveledAmount,
}

impl ReactionBonus {
	pub fn new(situation: impl Into<String>, amount: LeveledAmount) -> Self {
		Self { situation: situation.into(), amount }
	}
}

/// A roll modifier that applies in a named situation (e.g. "to resist poison").
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ConditionalModifier {
	pub situation: String,
	pub amount: LeveledAmount,
}

impl ConditionalModifier {
	pub fn new(situation: impl Into<String>, amount: LeveledAmount) -> Self {
		Self { situation: situation.into(), amount }
	}
}
