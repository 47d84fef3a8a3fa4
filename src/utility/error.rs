use super::EnumKey;
use enumset::EnumSet;
use itertools::Itertools;

#[derive(thiserror::Error, Debug)]
#[error("Invalid key {0:?}, expected one of: {}", .1.iter().map(|value| value.key()).join(", "))]
pub struct InvalidEnumStr<T: EnumKey>(String, EnumSet<T>);
impl<S, T> From<S> for InvalidEnumStr<T>
where
	T: EnumKey,
	S: Into<String>,
{
	fn from(value: S) -> Self {
		Self(value.into(), EnumSet::all())
	}
}
