use rust_decimal::{prelude::ToPrimitive, Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A bonus value that is either flat or scaled by the level of whatever grants it.
///
/// `level` is transient: it is supplied by the owning node when the amount is evaluated,
/// and is never persisted or compared as part of the amount's identity.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct LeveledAmount {
	pub amount: Decimal,
	#[serde(default, skip_serializing_if = "std::ops::Not::not")]
	pub per_level: bool,
	#[serde(skip)]
	pub level: Decimal,
}

impl PartialEq for LeveledAmount {
	fn eq(&self, other: &Self) -> bool {
		self.amount == other.amount && self.per_level == other.per_level
	}
}

impl From<Decimal> for LeveledAmount {
	fn from(amount: Decimal) -> Self {
		Self::flat(amount)
	}
}

impl From<i32> for LeveledAmount {
	fn from(amount: i32) -> Self {
		Self::flat(Decimal::from(amount))
	}
}

impl LeveledAmount {
	pub fn flat(amount: Decimal) -> Self {
		Self { amount, per_level: false, level: Decimal::ZERO }
	}

	pub fn per_level(amount: Decimal) -> Self {
		Self { amount, per_level: true, level: Decimal::ZERO }
	}

	pub fn with_level(mut self, level: Decimal) -> Self {
		self.level = level;
		self
	}

	pub fn adjusted_amount(&self) -> Decimal {
		if !self.per_level {
			return self.amount;
		}
		if self.level < Decimal::ZERO {
			return Decimal::ZERO;
		}
		self.amount * self.level
	}

	/// `+2` for flat amounts, `+6 (+2 per level)` for leveled ones.
	pub fn format(&self, what: &str) -> String {
		let amount = signed(self.amount);
		match self.per_level {
			false => amount,
			true => format!("{} ({amount} per {what})", signed(self.adjusted_amount())),
		}
	}
}

/// Renders a decimal with an explicit sign and without trailing zeros.
pub fn signed(value: Decimal) -> String {
	let value = value.normalize();
	match value.is_sign_negative() && !value.is_zero() {
		true => value.to_string(),
		false => format!("+{value}"),
	}
}

/// Rounds halves away from zero, or floors when `round_down` is set.
pub fn apply_rounding(value: Decimal, round_down: bool) -> Decimal {
	match round_down {
		true => value.floor(),
		false => value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
	}
}

pub(crate) fn as_i32(value: Decimal) -> i32 {
	value.trunc().to_i32().unwrap_or_default()
}

#[cfg(test)]
mod test {
	use super::*;
	use rust_decimal_macros::dec;

	#[test]
	fn flat_ignores_level() {
		let amount = LeveledAmount::flat(dec!(3)).with_level(dec!(4));
		assert_eq!(amount.adjusted_amount(), dec!(3));
		assert_eq!(amount.format("level"), "+3");
	}

	#[test]
	fn per_level_scales() {
		let amount = LeveledAmount::per_level(dec!(2)).with_level(dec!(3));
		assert_eq!(amount.adjusted_amount(), dec!(6));
		assert_eq!(amount.format("level"), "+6 (+2 per level)");
	}

	#[test]
	fn negative_level_is_zero() {
		let amount = LeveledAmount::per_level(dec!(2)).with_level(dec!(-1));
		assert_eq!(amount.adjusted_amount(), Decimal::ZERO);
	}

	#[test]
	fn level_is_not_identity() {
		let a = LeveledAmount::per_level(dec!(1)).with_level(dec!(1));
		let b = LeveledAmount::per_level(dec!(1)).with_level(dec!(5));
		assert_eq!(a, b);
	}

	#[test]
	fn rounding() {
		assert_eq!(apply_rounding(dec!(7.5), false), dec!(8));
		assert_eq!(apply_rounding(dec!(7.4), false), dec!(7));
		assert_eq!(apply_rounding(dec!(7.5), true), dec!(7));
		assert_eq!(apply_rounding(dec!(-2.5), true), dec!(-3));
		assert_eq!(signed(dec!(-2.50)), "-2.5");
		assert_eq!(signed(Decimal::ZERO), "+0");
	}
}
