use super::tooltip_line;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lowers the point cost of an attribute by a percentage.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct CostReduction {
	pub attribute: String,
	pub percentage: Decimal,
}

impl CostReduction {
	pub fn tooltip(&self, owner: &str) -> String {
		tooltip_line(owner, format!("-{}% cost for {}", self.percentage.normalize(), self.attribute))
	}
}

#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightReduction {
	Percent(Decimal),
	Pounds(Decimal),
}

impl std::fmt::Display for WeightReduction {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Percent(percent) => write!(f, "{}%", percent.normalize()),
			Self::Pounds(pounds) => write!(f, "{} lb", pounds.normalize()),
		}
	}
}

/// Lowers the weight of the contents of the container that carries it.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ContainedWeightReduction {
	pub reduction: WeightReduction,
}

impl From<WeightReduction> for ContainedWeightReduction {
	fn from(reduction: WeightReduction) -> Self {
		Self { reduction }
	}
}
