use super::{
	name_key, wildcard_key, SPELL_COLLEGE, SPELL_COLLEGE_POINTS, SPELL_NAME, SPELL_POINTS, SPELL_POWER_SOURCE,
	SPELL_POWER_SOURCE_POINTS,
};
use crate::{
	impl_enum_key,
	system::gurps::{LeveledAmount, StringCriteria},
	utility::EnumKey,
};
use serde::{Deserialize, Serialize};

/// What the name criteria of a spell bonus is tested against.
#[derive(Debug, enumset::EnumSetType, Default, Hash)]
pub enum SpellMatch {
	#[default]
	AllColleges,
	CollegeName,
	PowerSourceName,
	Spell,
}

impl EnumKey for SpellMatch {
	fn key(&self) -> &'static str {
		match self {
			Self::AllColleges => "all_colleges",
			Self::CollegeName => "college_name",
			Self::PowerSourceName => "power_source_name",
			Self::Spell => "spell_name",
		}
	}
}
impl_enum_key!(SpellMatch);

struct SpellKeys {
	name: &'static str,
	college: &'static str,
	power_source: &'static str,
}

const LEVEL_KEYS: SpellKeys = SpellKeys { name: SPELL_NAME, college: SPELL_COLLEGE, power_source: SPELL_POWER_SOURCE };
const POINT_KEYS: SpellKeys =
	SpellKeys { name: SPELL_POINTS, college: SPELL_COLLEGE_POINTS, power_source: SPELL_POWER_SOURCE_POINTS };

fn spell_key(keys: &SpellKeys, match_type: SpellMatch, name: &StringCriteria, category: &StringCriteria) -> String {
	// A category filter can only be tested at lookup time, regardless of what is matched.
	if !category.is_any() {
		return wildcard_key(keys.name);
	}
	match match_type {
		SpellMatch::AllColleges => keys.college.to_owned(),
		SpellMatch::CollegeName => name_key(keys.college, name, true),
		SpellMatch::PowerSourceName => name_key(keys.power_source, name, true),
		SpellMatch::Spell => name_key(keys.name, name, true),
	}
}

fn matches_for_type<S: AsRef<str>>(
	match_type: SpellMatch,
	criteria: &StringCriteria,
	name: &str,
	power_source: &str,
	colleges: &[S],
) -> bool {
	match match_type {
		SpellMatch::AllColleges => true,
		SpellMatch::CollegeName => criteria.matches_list(colleges),
		SpellMatch::PowerSourceName => criteria.matches(power_source),
		SpellMatch::Spell => criteria.matches(name),
	}
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SpellBonus {
	#[serde(default)]
	pub match_type: SpellMatch,
	#[serde(default)]
	pub name: StringCriteria,
	#[serde(default)]
	pub category: StringCriteria,
	pub amount: LeveledAmount,
}

impl SpellBonus {
	pub fn new(match_type: SpellMatch, name: StringCriteria, amount: LeveledAmount) -> Self {
		Self { match_type, name, category: StringCriteria::any(), amount }
	}

	pub fn map_key(&self) -> String {
		spell_key(&LEVEL_KEYS, self.match_type, &self.name, &self.category)
	}

	pub fn matches<S: AsRef<str>>(&self, name: &str, power_source: &str, colleges: &[S], categories: &[S]) -> bool {
		self.category.matches_list(categories) && matches_for_type(self.match_type, &self.name, name, power_source, colleges)
	}
}

/// Extra points counted toward a spell's level without being spent.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SpellPointBonus {
	#[serde(default)]
	pub match_type: SpellMatch,
	#[serde(default)]
	pub name: StringCriteria,
	#[serde(default)]
	pub category: StringCriteria,
	pub amount: LeveledAmount,
}

impl SpellPointBonus {
	pub fn new(match_type: SpellMatch, name: StringCriteria, amount: LeveledAmount) -> Self {
		Self { match_type, name, category: StringCriteria::any(), amount }
	}

	pub fn map_key(&self) -> String {
		spell_key(&POINT_KEYS, self.match_type, &self.name, &self.category)
	}

	pub fn matches<S: AsRef<str>>(&self, name: &str, power_source: &str, colleges: &[S], categories: &[S]) -> bool {
		self.category.matches_list(categories) && matches_for_type(self.match_type, &self.name, name, power_source, colleges)
	}
}
