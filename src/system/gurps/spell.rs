use super::{Difficulty, Feature, PrereqList};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn default_difficulty() -> Difficulty {
	Difficulty::Hard
}

fn default_attribute() -> String {
	"iq".into()
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Spell {
	#[serde(default = "Uuid::new_v4")]
	pub id: Uuid,
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub tech_level: Option<String>,
	#[serde(default = "default_difficulty")]
	pub difficulty: Difficulty,
	#[serde(default = "default_attribute")]
	pub attribute: String,
	#[serde(default)]
	pub points: Decimal,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub colleges: Vec<String>,
	#[serde(default, skip_serializing_if = "String::is_empty")]
	pub power_source: String,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub categories: Vec<String>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub features: Vec<Feature>,
	#[serde(default)]
	pub prereqs: PrereqList,
}

impl Spell {
	pub fn new(name: impl Into<String>, colleges: Vec<String>, points: Decimal) -> Self {
		Self {
			id: Uuid::new_v4(),
			name: name.into(),
			tech_level: None,
			difficulty: default_difficulty(),
			attribute: default_attribute(),
			points,
			colleges,
			power_source: String::new(),
			categories: Vec::new(),
			features: Vec::new(),
			prereqs: PrereqList::default(),
		}
	}

	pub fn with_power_source(mut self, power_source: impl Into<String>) -> Self {
		self.power_source = power_source.into();
		self
	}

	pub fn with_prereqs(mut self, prereqs: PrereqList) -> Self {
		self.prereqs = prereqs;
		self
	}
}
