use super::{explain, Subject};
use crate::system::gurps::{NumericCriteria, WeightCriteria};
use serde::{Deserialize, Serialize};

/// Compares the quantity of items directly inside the subject container.
///
/// Equipment that is not a container always passes; any other subject never matches.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ContainedQuantityPrereq {
	#[serde(default = "super::has_by_default")]
	pub has: bool,
	#[serde(default)]
	pub qualifier: NumericCriteria,
}

impl ContainedQuantityPrereq {
	pub fn new(qualifier: NumericCriteria) -> Self {
		Self { has: true, qualifier }
	}

	pub fn satisfied(&self, subject: Subject<'_>, tooltip: Option<&mut String>, prefix: &str) -> bool {
		let matched = match subject {
			Subject::Equipment(equipment) => !equipment.container || self.qualifier.matches(equipment.contained_quantity()),
			_ => false,
		};
		let satisfied = matched == self.has;
		if !satisfied {
			explain(tooltip, prefix, self.has, format_args!("a contained quantity which {}", self.qualifier));
		}
		satisfied
	}
}

/// Compares the (reduced) weight of the contents of the subject container.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ContainedWeightPrereq {
	#[serde(default = "super::has_by_default")]
	pub has: bool,
	#[serde(default)]
	pub weight: WeightCriteria,
}

impl ContainedWeightPrereq {
	pub fn new(weight: WeightCriteria) -> Self {
		Self { has: true, weight }
	}

	pub fn satisfied(&self, subject: Subject<'_>, tooltip: Option<&mut String>, prefix: &str) -> bool {
		let matched = match subject {
			Subject::Equipment(equipment) => !equipment.container || self.weight.matches(equipment.contained_weight()),
			_ => false,
		};
		let satisfied = matched == self.has;
		if !satisfied {
			explain(tooltip, prefix, self.has, format_args!("a contained weight which {}", self.weight));
		}
		satisfied
	}
}
