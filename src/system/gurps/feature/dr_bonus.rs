use super::{tooltip_line, HIT_LOCATION_PREFIX};
use crate::system::gurps::{amount::signed, LeveledAmount};
use serde::{Deserialize, Serialize};

/// The specialization used for damage resistance that applies to every kind of attack.
pub const ALL_SPECIALIZATION: &str = "all";

fn all_specialization() -> String {
	ALL_SPECIALIZATION.to_owned()
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct DrBonus {
	pub location: String,
	#[serde(default = "all_specialization")]
	pub specialization: String,
	pub amount: LeveledAmount,
}

impl DrBonus {
	pub fn new(location: impl Into<String>, amount: LeveledAmount) -> Self {
		Self { location: location.into(), specialization: all_specialization(), amount }
	}

	pub fn map_key(&self) -> String {
		format!("{HIT_LOCATION_PREFIX}{}", self.location)
	}

	pub fn tooltip(&self, owner: &str) -> String {
		let amount = signed(self.amount.adjusted_amount());
		tooltip_line(owner, format!("{amount} against {} attacks", self.specialization))
	}
}
