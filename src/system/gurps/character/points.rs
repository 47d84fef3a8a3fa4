use enum_map::{Enum, EnumMap};
use rust_decimal::Decimal;

#[derive(Debug, Enum, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PointKind {
	Attributes,
	Advantages,
	Disadvantages,
	Quirks,
	Race,
	Skills,
	Spells,
}

/// Points spent on a character, split the way the sheet summarizes them.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct PointsBreakdown(EnumMap<PointKind, Decimal>);

impl PointsBreakdown {
	pub fn add(&mut self, kind: PointKind, points: Decimal) {
		self.0[kind] += points;
	}

	pub fn total(&self) -> Decimal {
		self.0.values().sum()
	}

	pub fn iter(&self) -> impl Iterator<Item = (PointKind, &Decimal)> + '_ {
		self.0.iter()
	}
}

impl std::ops::Index<PointKind> for PointsBreakdown {
	type Output = Decimal;

	fn index(&self, kind: PointKind) -> &Self::Output {
		&self.0[kind]
	}
}
