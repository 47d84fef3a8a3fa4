//! Point cost of a trait after stacking its cost modifiers.
//!
//! Percentage modifiers are split into enhancements and limitations, separately for the
//! base cost and the leveled cost. Limitations never total below -80%. Point modifiers
//! adjust the base numbers before any percentage is applied, and multiplier modifiers scale
//! the final value along with the self-control roll.

use super::{
	amount::apply_rounding,
	modifier::{Adjustment, Affects, CostType, SelfControlRoll},
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const LIMITATION_FLOOR: Decimal = dec!(-80);
const ALTERNATIVE_ABILITY_PERCENT: Decimal = dec!(20);

/// The unmodified numbers of a (non-container) trait.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct PointBasis {
	pub base_points: Decimal,
	pub levels: Decimal,
	pub points_per_level: Decimal,
}

#[derive(Clone, Copy, PartialEq, Debug, Default)]
struct Accumulators {
	base_enhancement: Decimal,
	base_limitation: Decimal,
	level_enhancement: Decimal,
	level_limitation: Decimal,
}

impl Accumulators {
	fn push(&mut self, affects: Affects, percent: Decimal) {
		let is_limitation = percent < Decimal::ZERO;
		if affects.applies_to_base() {
			match is_limitation {
				true => self.base_limitation += percent,
				false => self.base_enhancement += percent,
			}
		}
		if affects.applies_to_levels() {
			match is_limitation {
				true => self.level_limitation += percent,
				false => self.level_enhancement += percent,
			}
		}
	}

	fn is_empty(&self) -> bool {
		self.base_enhancement.is_zero()
			&& self.base_limitation.is_zero()
			&& self.level_enhancement.is_zero()
			&& self.level_limitation.is_zero()
	}

	fn clamp_limitations(&mut self) {
		self.base_limitation = self.base_limitation.max(LIMITATION_FLOOR);
		self.level_limitation = self.level_limitation.max(LIMITATION_FLOOR);
	}
}

/// `points` adjusted by `percent` percent of itself.
pub fn modify_points(points: Decimal, percent: Decimal) -> Decimal {
	points + points * percent / dec!(100)
}

/// Computes the final cost of a trait from its basis and its enabled cost adjustments.
///
/// Callers pass only enabled, non-container adjustments; disabled ones must not reach
/// any accumulator.
pub fn adjusted_points<'a>(
	basis: PointBasis,
	self_control: SelfControlRoll,
	adjustments: impl IntoIterator<Item = &'a Adjustment>,
	round_down: bool,
	multiplicative: bool,
) -> Decimal {
	let PointBasis { mut base_points, levels, mut points_per_level } = basis;
	let mut accumulators = Accumulators::default();
	let mut multiplier = self_control.multiplier();
	for adjustment in adjustments {
		let modifier = adjustment.cost_modifier();
		match adjustment.cost_type {
			CostType::Percentage => accumulators.push(adjustment.affects, modifier),
			CostType::Points => match adjustment.affects {
				Affects::LevelsOnly => points_per_level += modifier,
				_ => base_points += modifier,
			},
			CostType::Multiplier => multiplier *= modifier,
		}
	}

	let leveled_points = points_per_level * levels;
	let modified_points = match accumulators.is_empty() {
		true => base_points + leveled_points,
		false => {
			accumulators.clamp_limitations();
			let Accumulators { base_enhancement, base_limitation, level_enhancement, level_limitation } = accumulators;
			match multiplicative {
				true => {
					let chain = |points: Decimal, enhancement: Decimal, limitation: Decimal| {
						modify_points(modify_points(points, enhancement), limitation)
					};
					if base_enhancement == level_enhancement && base_limitation == level_limitation {
						chain(base_points + leveled_points, base_enhancement, base_limitation)
					} else {
						chain(base_points, base_enhancement, base_limitation)
							+ chain(leveled_points, level_enhancement, level_limitation)
					}
				}
				false => {
					let base_modifier = base_enhancement + base_limitation;
					let level_modifier = level_enhancement + level_limitation;
					if base_modifier == level_modifier {
						modify_points(base_points + leveled_points, base_modifier)
					} else {
						modify_points(base_points, base_modifier) + modify_points(leveled_points, level_modifier)
					}
				}
			}
		}
	};
	apply_rounding(modified_points * multiplier, round_down)
}

/// The cost of an alternative-abilities group, given the adjusted cost of each alternative.
///
/// The most expensive alternative is paid in full (only its first occurrence),
/// every other alternative costs a fifth of its own value, rounded per alternative.
pub fn alternative_abilities_points(values: &[Decimal], round_down: bool) -> Decimal {
	let Some(max) = values.iter().copied().max() else {
		return Decimal::ZERO;
	};
	let mut points = max;
	let mut found_max = false;
	for value in values {
		if !found_max && *value == max {
			found_max = true;
			continue;
		}
		points += apply_rounding(*value * ALTERNATIVE_ABILITY_PERCENT / dec!(100), round_down);
	}
	points
}

#[cfg(test)]
mod test {
	use super::*;

	fn percent(affects: Affects, cost: Decimal) -> Adjustment {
		Adjustment { cost_type: CostType::Percentage, affects, cost, levels: Decimal::ZERO }
	}

	fn base(points: Decimal) -> PointBasis {
		PointBasis { base_points: points, ..Default::default() }
	}

	fn cost(basis: PointBasis, adjustments: &[Adjustment], multiplicative: bool) -> Decimal {
		adjusted_points(basis, SelfControlRoll::None, adjustments, false, multiplicative)
	}

	#[test]
	fn unmodified() {
		let basis = PointBasis { base_points: dec!(5), levels: dec!(3), points_per_level: dec!(2) };
		assert_eq!(cost(basis, &[], false), dec!(11));
	}

	#[test]
	fn additive_enhancements() {
		let adjustments = [percent(Affects::Total, dec!(10)), percent(Affects::Total, dec!(20))];
		assert_eq!(cost(base(dec!(10)), &adjustments, false), dec!(13));
	}

	#[test]
	fn limitations_clamp_at_eighty_percent() {
		let adjustments = [
			percent(Affects::Total, dec!(-40)),
			percent(Affects::Total, dec!(-40)),
			percent(Affects::Total, dec!(-40)),
		];
		assert_eq!(cost(base(dec!(10)), &adjustments, false), dec!(2));
		assert_eq!(cost(base(dec!(10)), &adjustments, true), dec!(2));
	}

	#[test]
	fn limitation_clamped_before_enhancement_is_added() {
		let adjustments = [percent(Affects::Total, dec!(50)), percent(Affects::Total, dec!(-100))];
		// -100% clamps to -80%, then nets with +50% to -30%.
		assert_eq!(cost(base(dec!(10)), &adjustments, false), dec!(7));
	}

	#[test]
	fn additive_and_multiplicative_diverge() {
		let adjustments = [percent(Affects::Total, dec!(50)), percent(Affects::Total, dec!(-50))];
		assert_eq!(cost(base(dec!(10)), &adjustments, false), dec!(10));
		// 10 * 1.5 * 0.5 = 7.5, rounded half up.
		assert_eq!(cost(base(dec!(10)), &adjustments, true), dec!(8));
	}

	#[test]
	fn multiplicative_split_when_base_and_levels_differ() {
		let basis = PointBasis { base_points: dec!(10), levels: dec!(2), points_per_level: dec!(5) };
		let adjustments = [percent(Affects::BaseOnly, dec!(100)), percent(Affects::LevelsOnly, dec!(-50))];
		// base: 10 * 2 = 20, levels: 10 * 0.5 = 5
		assert_eq!(cost(basis, &adjustments, true), dec!(25));
		assert_eq!(cost(basis, &adjustments, false), dec!(25));
	}

	#[test]
	fn additive_split_when_modifiers_differ() {
		let basis = PointBasis { base_points: dec!(10), levels: dec!(4), points_per_level: dec!(5) };
		let adjustments = [percent(Affects::Total, dec!(10)), percent(Affects::LevelsOnly, dec!(-30))];
		// base: 10 * 1.1 = 11, levels: 20 * 0.8 = 16
		assert_eq!(cost(basis, &adjustments, false), dec!(27));
	}

	#[test]
	fn point_modifiers_adjust_basis() {
		let basis = PointBasis { base_points: dec!(10), levels: dec!(2), points_per_level: dec!(3) };
		let adjustments = [
			Adjustment { cost_type: CostType::Points, affects: Affects::Total, cost: dec!(5), levels: Decimal::ZERO },
			Adjustment { cost_type: CostType::Points, affects: Affects::LevelsOnly, cost: dec!(1), levels: Decimal::ZERO },
			percent(Affects::Total, dec!(50)),
		];
		// (15 + 4 * 2) * 1.5 = 34.5
		assert_eq!(cost(basis, &adjustments, false), dec!(35));
	}

	#[test]
	fn multipliers_and_self_control() {
		let adjustments = [Adjustment { cost_type: CostType::Multiplier, affects: Affects::Total, cost: dec!(3), levels: Decimal::ZERO }];
		assert_eq!(adjusted_points(base(dec!(-10)), SelfControlRoll::Nine, &adjustments, false, false), dec!(-45));
		assert_eq!(adjusted_points(base(dec!(-15)), SelfControlRoll::Fifteen, &[], false, false), dec!(-8));
		assert_eq!(adjusted_points(base(dec!(-15)), SelfControlRoll::Fifteen, &[], true, false), dec!(-8));
		assert_eq!(adjusted_points(base(dec!(15)), SelfControlRoll::Fifteen, &[], true, false), dec!(7));
	}

	#[test]
	fn round_down_floors() {
		let adjustments = [percent(Affects::Total, dec!(50)), percent(Affects::Total, dec!(-50))];
		assert_eq!(adjusted_points(base(dec!(10)), SelfControlRoll::None, &adjustments, true, true), dec!(7));
	}

	#[test]
	fn leveled_modifier_cost() {
		let adjustments = [Adjustment { cost_type: CostType::Percentage, affects: Affects::Total, cost: dec!(10), levels: dec!(3) }];
		assert_eq!(cost(base(dec!(10)), &adjustments, false), dec!(13));
	}

	#[test]
	fn alternative_abilities_credit_max_once() {
		assert_eq!(alternative_abilities_points(&[dec!(10), dec!(10), dec!(5)], false), dec!(13));
		assert_eq!(alternative_abilities_points(&[dec!(5), dec!(30), dec!(12)], false), dec!(33));
		assert_eq!(alternative_abilities_points(&[], false), Decimal::ZERO);
	}
}
