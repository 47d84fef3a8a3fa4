use crate::{impl_enum_key, utility::EnumKey};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, enumset::EnumSetType, Default, Hash)]
pub enum StringCompare {
	#[default]
	Any,
	Is,
	IsNot,
	Contains,
	DoesNotContain,
	StartsWith,
	DoesNotStartWith,
	EndsWith,
	DoesNotEndWith,
}

impl EnumKey for StringCompare {
	fn key(&self) -> &'static str {
		match self {
			Self::Any => "any",
			Self::Is => "is",
			Self::IsNot => "is_not",
			Self::Contains => "contains",
			Self::DoesNotContain => "does_not_contain",
			Self::StartsWith => "starts_with",
			Self::DoesNotStartWith => "does_not_start_with",
			Self::EndsWith => "ends_with",
			Self::DoesNotEndWith => "does_not_end_with",
		}
	}
}
impl_enum_key!(StringCompare);

impl StringCompare {
	pub fn description(&self) -> &'static str {
		match self {
			Self::Any => "is anything",
			Self::Is => "is",
			Self::IsNot => "is not",
			Self::Contains => "contains",
			Self::DoesNotContain => "does not contain",
			Self::StartsWith => "starts with",
			Self::DoesNotStartWith => "does not start with",
			Self::EndsWith => "ends with",
			Self::DoesNotEndWith => "does not end with",
		}
	}

	/// True for the comparisons which are the negation of another comparison.
	pub fn is_negated(&self) -> bool {
		matches!(self, Self::IsNot | Self::DoesNotContain | Self::DoesNotStartWith | Self::DoesNotEndWith)
	}

	pub fn matches(&self, qualifier: &str, data: &str) -> bool {
		let qualifier = qualifier.to_lowercase();
		let data = data.to_lowercase();
		match self {
			Self::Any => true,
			Self::Is => data == qualifier,
			Self::IsNot => data != qualifier,
			Self::Contains => data.contains(&qualifier),
			Self::DoesNotContain => !data.contains(&qualifier),
			Self::StartsWith => data.starts_with(&qualifier),
			Self::DoesNotStartWith => !data.starts_with(&qualifier),
			Self::EndsWith => data.ends_with(&qualifier),
			Self::DoesNotEndWith => !data.ends_with(&qualifier),
		}
	}
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct StringCriteria {
	#[serde(default)]
	pub compare: StringCompare,
	#[serde(default, skip_serializing_if = "String::is_empty")]
	pub qualifier: String,
}

impl StringCriteria {
	pub fn new(compare: StringCompare, qualifier: impl Into<String>) -> Self {
		Self { compare, qualifier: qualifier.into() }
	}

	pub fn any() -> Self {
		Self::default()
	}

	pub fn is(qualifier: impl Into<String>) -> Self {
		Self::new(StringCompare::Is, qualifier)
	}

	pub fn is_any(&self) -> bool {
		self.compare == StringCompare::Any
	}

	pub fn matches(&self, data: &str) -> bool {
		self.compare.matches(&self.qualifier, data)
	}

	/// Tests a set of values (e.g. categories or colleges).
	///
	/// Positive comparisons pass when any value matches; negated comparisons only pass when
	/// every value matches. An empty set is tested as the empty string.
	pub fn matches_list<S: AsRef<str>>(&self, values: &[S]) -> bool {
		if values.is_empty() {
			return self.matches("");
		}
		let matched = values.iter().filter(|value| self.matches(value.as_ref())).count();
		match self.compare.is_negated() {
			false => matched > 0,
			true => matched == values.len(),
		}
	}
}

impl std::fmt::Display for StringCriteria {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self.compare {
			StringCompare::Any => write!(f, "{}", self.compare.description()),
			compare => write!(f, "{} \"{}\"", compare.description(), self.qualifier),
		}
	}
}

#[derive(Debug, enumset::EnumSetType, Default, Hash)]
pub enum NumericCompare {
	#[default]
	Any,
	Equals,
	NotEquals,
	AtLeast,
	AtMost,
}

impl EnumKey for NumericCompare {
	fn key(&self) -> &'static str {
		match self {
			Self::Any => "any",
			Self::Equals => "is",
			Self::NotEquals => "is_not",
			Self::AtLeast => "at_least",
			Self::AtMost => "at_most",
		}
	}
}
impl_enum_key!(NumericCompare);

impl NumericCompare {
	pub fn description(&self) -> &'static str {
		match self {
			Self::Any => "is anything",
			Self::Equals => "is",
			Self::NotEquals => "is not",
			Self::AtLeast => "is at least",
			Self::AtMost => "is at most",
		}
	}

	pub fn matches(&self, qualifier: Decimal, data: Decimal) -> bool {
		match self {
			Self::Any => true,
			Self::Equals => data == qualifier,
			Self::NotEquals => data != qualifier,
			Self::AtLeast => data >= qualifier,
			Self::AtMost => data <= qualifier,
		}
	}
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct NumericCriteria {
	#[serde(default)]
	pub compare: NumericCompare,
	#[serde(default)]
	pub qualifier: Decimal,
}

impl NumericCriteria {
	pub fn new(compare: NumericCompare, qualifier: impl Into<Decimal>) -> Self {
		Self { compare, qualifier: qualifier.into() }
	}

	pub fn any() -> Self {
		Self::default()
	}

	pub fn at_least(qualifier: impl Into<Decimal>) -> Self {
		Self::new(NumericCompare::AtLeast, qualifier)
	}

	pub fn at_most(qualifier: impl Into<Decimal>) -> Self {
		Self::new(NumericCompare::AtMost, qualifier)
	}

	pub fn is_any(&self) -> bool {
		self.compare == NumericCompare::Any
	}

	pub fn matches(&self, data: impl Into<Decimal>) -> bool {
		self.compare.matches(self.qualifier, data.into())
	}
}

impl std::fmt::Display for NumericCriteria {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self.compare {
			NumericCompare::Any => write!(f, "{}", self.compare.description()),
			compare => write!(f, "{} {}", compare.description(), self.qualifier.normalize()),
		}
	}
}

/// A numeric comparison against a weight measured in pounds.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightCriteria(pub NumericCriteria);

impl WeightCriteria {
	pub fn matches(&self, pounds: Decimal) -> bool {
		self.0.matches(pounds)
	}
}

impl std::fmt::Display for WeightCriteria {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self.0.compare {
			NumericCompare::Any => std::fmt::Display::fmt(&self.0, f),
			_ => write!(f, "{} lb", self.0),
		}
	}
}

/// Pulls the numeric portion out of a free-form tech level such as `"TL8^"`.
///
/// Only digits and `.` are kept; anything that fails to parse afterwards is tech level 0.
pub fn extract_tech_level(tech_level: &str) -> Decimal {
	let digits = tech_level.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect::<String>();
	Decimal::from_str(&digits).unwrap_or(Decimal::ZERO)
}
