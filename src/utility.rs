use enumset::{EnumSet, EnumSetType};
use std::cmp::Ordering;

mod error;
pub use error::*;

/// A closed enumeration whose variants persist as stable string keys.
///
/// The first declared variant is the `Default`, and is what unknown keys decode to.
pub trait EnumKey: EnumSetType + Default + std::fmt::Debug + 'static {
	fn key(&self) -> &'static str;

	fn from_key(key: &str) -> Option<Self> {
		EnumSet::<Self>::all().iter().find(|value| value.key() == key)
	}

	fn ensure_valid(key: &str) -> Self {
		match Self::from_key(key) {
			Some(value) => value,
			None => {
				let fallback = Self::default();
				log::warn!(target: "enum_key", "Unknown key {key:?}, falling back to {:?}", fallback.key());
				fallback
			}
		}
	}
}

/// Implements `Display`, strict `FromStr`, and lenient serde for an [`EnumKey`] type.
#[macro_export]
macro_rules! impl_enum_key {
	($target:ty) => {
		impl std::fmt::Display for $target {
			fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
				write!(f, "{}", $crate::utility::EnumKey::key(self))
			}
		}

		impl std::str::FromStr for $target {
			type Err = $crate::utility::InvalidEnumStr<$target>;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				<$target as $crate::utility::EnumKey>::from_key(s).ok_or_else(|| s.into())
			}
		}

		impl serde::Serialize for $target {
			fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
				serializer.serialize_str($crate::utility::EnumKey::key(self))
			}
		}

		impl<'de> serde::Deserialize<'de> for $target {
			fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
				let key = <String as serde::Deserialize>::deserialize(deserializer)?;
				Ok(<$target as $crate::utility::EnumKey>::ensure_valid(&key))
			}
		}
	};
}

/// Orders strings so that embedded runs of digits compare by numeric value ("torso2" < "torso10").
/// Letters compare case-insensitively, with a case-sensitive comparison as the final tie breaker.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
	let mut lhs = a.chars().peekable();
	let mut rhs = b.chars().peekable();
	loop {
		match (lhs.peek().copied(), rhs.peek().copied()) {
			(None, None) => return a.cmp(b),
			(None, Some(_)) => return Ordering::Less,
			(Some(_), None) => return Ordering::Greater,
			(Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
				let l_digits = take_digits(&mut lhs);
				let r_digits = take_digits(&mut rhs);
				let l_trimmed = l_digits.trim_start_matches('0');
				let r_trimmed = r_digits.trim_start_matches('0');
				let ordering = l_trimmed.len().cmp(&r_trimmed.len()).then_with(|| l_trimmed.cmp(r_trimmed));
				if ordering != Ordering::Equal {
					return ordering;
				}
			}
			(Some(l), Some(r)) => {
				let ordering = l.to_lowercase().cmp(r.to_lowercase());
				if ordering != Ordering::Equal {
					return ordering;
				}
				lhs.next();
				rhs.next();
			}
		}
	}
}

fn take_digits(iter: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
	let mut digits = String::new();
	while let Some(c) = iter.peek().copied() {
		if !c.is_ascii_digit() {
			break;
		}
		digits.push(c);
		iter.next();
	}
	digits
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn natural_order() {
		let mut keys = vec!["torso10", "Torso2", "burning", "all", "torso2"];
		keys.sort_by(|a, b| natural_cmp(a, b));
		assert_eq!(keys, vec!["all", "burning", "Torso2", "torso2", "torso10"]);
	}
}
