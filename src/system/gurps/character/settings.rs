use serde::{Deserialize, Serialize};

/// Per-sheet options that change how derived values are computed.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetSettings {
	/// Apply enhancements and limitations one after the other instead of summing them.
	pub use_multiplicative_modifiers: bool,
	/// Used when the character's profile has no tech level.
	pub default_tech_level: String,
}

impl Default for SheetSettings {
	fn default() -> Self {
		Self { use_multiplicative_modifiers: false, default_tech_level: "3".into() }
	}
}

impl SheetSettings {
	pub fn from_json(json: &str) -> anyhow::Result<Self> {
		Ok(serde_json::from_str(json)?)
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn missing_fields_use_defaults() {
		let settings = SheetSettings::from_json(r#"{"use_multiplicative_modifiers":true}"#).unwrap();
		assert!(settings.use_multiplicative_modifiers);
		assert_eq!(settings.default_tech_level, "3");
	}

	#[test]
	fn malformed() {
		assert!(SheetSettings::from_json("{\"default_tech_level\": 4").is_err());
	}
}
