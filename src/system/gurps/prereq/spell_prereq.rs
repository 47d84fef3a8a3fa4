use super::{explain, Subject};
use crate::{
	impl_enum_key,
	system::gurps::{Character, NumericCriteria, StringCriteria},
	utility::EnumKey,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// What a spell prerequisite counts.
#[derive(Debug, enumset::EnumSetType, Default, Hash)]
pub enum SpellPrereqKind {
	#[default]
	Name,
	Category,
	College,
	/// The number of distinct colleges among known spells.
	CollegeCount,
	Any,
}

impl EnumKey for SpellPrereqKind {
	fn key(&self) -> &'static str {
		match self {
			Self::Name => "name",
			Self::Category => "category",
			Self::College => "college",
			Self::CollegeCount => "college_count",
			Self::Any => "any",
		}
	}
}
impl_enum_key!(SpellPrereqKind);

fn at_least_one() -> NumericCriteria {
	NumericCriteria::at_least(1)
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SpellPrereq {
	#[serde(default = "super::has_by_default")]
	pub has: bool,
	#[serde(default)]
	pub kind: SpellPrereqKind,
	#[serde(default)]
	pub qualifier: StringCriteria,
	#[serde(default = "at_least_one")]
	pub quantity: NumericCriteria,
}

impl SpellPrereq {
	pub fn new(kind: SpellPrereqKind, qualifier: StringCriteria, quantity: NumericCriteria) -> Self {
		Self { has: true, kind, qualifier, quantity }
	}

	fn count(&self, character: &Character, subject: Subject<'_>) -> usize {
		let mut count = 0;
		let mut colleges = BTreeSet::new();
		for spell in character.spells() {
			if subject.is(&spell.id) {
				continue;
			}
			let counted = match self.kind {
				SpellPrereqKind::Name => self.qualifier.matches(&spell.name),
				SpellPrereqKind::Category => self.qualifier.matches_list(&spell.categories),
				SpellPrereqKind::College => self.qualifier.matches_list(&spell.colleges),
				SpellPrereqKind::CollegeCount => {
					colleges.extend(spell.colleges.iter().map(|college| college.to_lowercase()));
					false
				}
				SpellPrereqKind::Any => true,
			};
			if counted {
				count += 1;
			}
		}
		match self.kind {
			SpellPrereqKind::CollegeCount => colleges.len(),
			_ => count,
		}
	}

	pub fn satisfied(&self, character: &Character, subject: Subject<'_>, tooltip: Option<&mut String>, prefix: &str) -> bool {
		let count = Decimal::from(self.count(character, subject) as u64);
		let satisfied = self.quantity.matches(count) == self.has;
		if !satisfied {
			let quantity = &self.quantity;
			match self.kind {
				SpellPrereqKind::CollegeCount => explain(tooltip, prefix, self.has, format_args!("a college count which {quantity}")),
				SpellPrereqKind::Any => explain(tooltip, prefix, self.has, format_args!("spells of any kind, quantity {quantity}")),
				kind => {
					let field = match kind {
						SpellPrereqKind::Category => "category",
						SpellPrereqKind::College => "college",
						_ => "name",
					};
					let qualifier = &self.qualifier;
					explain(tooltip, prefix, self.has, format_args!("spells whose {field} {qualifier}, quantity {quantity}"));
				}
			}
		}
		satisfied
	}
}
