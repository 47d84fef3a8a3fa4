use crate::GeneralError;
use std::str::FromStr;

/// A dice expression in `NdS+M` form, where an omitted side count means six-sided dice.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Dice {
	count: u32,
	sides: u32,
	modifier: i32,
}

impl Default for Dice {
	fn default() -> Self {
		Self::new(3, 6, 0)
	}
}

impl Dice {
	pub fn new(count: u32, sides: u32, modifier: i32) -> Self {
		Self { count, sides, modifier }
	}

	pub fn count(&self) -> u32 {
		self.count
	}

	pub fn sides(&self) -> u32 {
		self.sides
	}

	pub fn modifier(&self) -> i32 {
		self.modifier
	}

	/// The lowest possible result, saturating at the bounds of `i32`.
	pub fn minimum(&self) -> i32 {
		let per_die = self.sides.min(1) as i32;
		saturate(self.count).saturating_mul(per_die).saturating_add(self.modifier)
	}

	/// The highest possible result, saturating at the bounds of `i32`.
	pub fn maximum(&self) -> i32 {
		saturate(self.count.saturating_mul(self.sides)).saturating_add(self.modifier)
	}

	pub fn roll(&self, rand: &mut impl rand::Rng) -> i32 {
		let mut value = self.modifier;
		if self.sides > 0 {
			for _ in 0..self.count {
				value = value.saturating_add(saturate(rand.gen_range(1..=self.sides)));
			}
		}
		value
	}
}

/// Converts a count to `i32`, clamping at `i32::MAX`.
pub(crate) fn saturate(value: u32) -> i32 {
	i32::try_from(value).unwrap_or(i32::MAX)
}

impl std::fmt::Display for Dice {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}d", self.count)?;
		if self.sides != 6 {
			write!(f, "{}", self.sides)?;
		}
		match self.modifier {
			0 => Ok(()),
			modifier if modifier > 0 => write!(f, "+{modifier}"),
			modifier => write!(f, "{modifier}"),
		}
	}
}

impl FromStr for Dice {
	type Err = anyhow::Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		static EXPECTED: &str = "{int}d[{int}][+/-{int}]";
		let s = s.trim();
		let (count_str, rest) = s
			.split_once(['d', 'D'])
			.ok_or_else(|| GeneralError(format!("Dice string {s:?} missing 'd', expected format {EXPECTED:?}.")))?;
		let count = match count_str.is_empty() {
			true => 1,
			false => parse_bounded(count_str, "count")?,
		};
		let (sides_str, modifier) = match rest.find(['+', '-']) {
			None => (rest, 0),
			Some(idx) => {
				let (sides_str, modifier_str) = rest.split_at(idx);
				let modifier_str = modifier_str.strip_prefix('+').unwrap_or(modifier_str);
				(sides_str, modifier_str.parse::<i32>()?)
			}
		};
		let sides = match sides_str.is_empty() {
			true => 6,
			false => parse_bounded(sides_str, "sides")?,
		};
		Ok(Self { count, sides, modifier })
	}
}

fn parse_bounded(text: &str, part: &str) -> anyhow::Result<u32> {
	let value = text.parse::<u32>()?;
	if i32::try_from(value).is_err() {
		return Err(GeneralError(format!("Dice {part} {value} is larger than {}.", i32::MAX)).into());
	}
	Ok(value)
}

impl serde::Serialize for Dice {
	fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&self.to_string())
	}
}

impl<'de> serde::Deserialize<'de> for Dice {
	fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let text = <String as serde::Deserialize>::deserialize(deserializer)?;
		Self::from_str(&text).map_err(serde::de::Error::custom)
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use rand::SeedableRng;

	#[test]
	fn parse() {
		assert_eq!(Dice::from_str("3d").unwrap(), Dice::new(3, 6, 0));
		assert_eq!(Dice::from_str("1d6").unwrap(), Dice::new(1, 6, 0));
		assert_eq!(Dice::from_str("2d10+2").unwrap(), Dice::new(2, 10, 2));
		assert_eq!(Dice::from_str("d-1").unwrap(), Dice::new(1, 6, -1));
		assert!(Dice::from_str("3").is_err());
		assert!(Dice::from_str("xd6").is_err());
		assert!(Dice::from_str("3000000000d").is_err());
		assert!(Dice::from_str("2d3000000000").is_err());
		assert!(Dice::from_str("3000000000d-2000000000").is_err());
	}

	#[test]
	fn display() {
		assert_eq!(Dice::new(3, 6, 0).to_string(), "3d");
		assert_eq!(Dice::new(2, 10, 2).to_string(), "2d10+2");
		assert_eq!(Dice::new(1, 6, -1).to_string(), "1d-1");
	}

	#[test]
	fn range() {
		let dice = Dice::new(3, 6, 0);
		assert_eq!(dice.minimum(), 3);
		assert_eq!(dice.maximum(), 18);
		assert_eq!(Dice::new(1, 6, 2).minimum(), 3);
		let huge = Dice::new(u32::MAX, u32::MAX, -5);
		assert_eq!(huge.minimum(), i32::MAX - 5);
		assert_eq!(huge.maximum(), i32::MAX - 5);
		assert_eq!(Dice::new(3, 6, i32::MIN).minimum(), i32::MIN + 3);
		let mut rng = rand::rngs::StdRng::seed_from_u64(7);
		for _ in 0..100 {
			let value = dice.roll(&mut rng);
			assert!((3..=18).contains(&value));
		}
	}
}
