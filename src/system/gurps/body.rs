//! Hit-location tables.
//!
//! A [`Body`] is an arena of tables and locations. Each location may own a sub-table (e.g. the
//! parts of a hand), and links back to the table it belongs to; those back-links are indices,
//! never ownership. The first table is always the root.

use super::{character::FeatureIndex, feature::ALL_SPECIALIZATION};
use crate::utility::natural_cmp;
use std::collections::BTreeMap;

mod definition;
pub use definition::*;
mod dice;
pub use dice::*;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct TableId(usize);

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct LocationId(usize);

#[derive(Clone, PartialEq, Debug)]
pub struct BodyTable {
	/// Only root tables are named; a sub-table is identified by its owning location.
	pub name: Option<String>,
	pub roll: Dice,
	pub locations: Vec<LocationId>,
	pub owning_location: Option<LocationId>,
}

#[derive(Clone, PartialEq, Debug, Default)]
pub struct HitLocation {
	pub id: String,
	pub choice_name: String,
	pub table_name: String,
	pub slots: u32,
	pub hit_penalty: i32,
	pub dr_bonus: i32,
	pub description: String,
	pub sub_table: Option<TableId>,
	pub owning_table: Option<TableId>,
	/// Derived from the slots of the owning table; recomputed on every structural change.
	pub roll_range: String,
}

impl HitLocation {
	pub fn new(id: impl Into<String>, name: impl Into<String>, slots: u32, hit_penalty: i32, dr_bonus: i32) -> Self {
		let name = name.into();
		Self {
			id: id.into(),
			choice_name: name.clone(),
			table_name: name,
			slots,
			hit_penalty,
			dr_bonus,
			..Default::default()
		}
	}
}

#[derive(Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
#[serde(from = "BodyDefinition", into = "BodyDefinition")]
pub struct Body {
	tables: Vec<BodyTable>,
	locations: Vec<HitLocation>,
}

impl Default for Body {
	fn default() -> Self {
		Self::humanoid()
	}
}

impl std::ops::Index<TableId> for Body {
	type Output = BodyTable;
	fn index(&self, index: TableId) -> &Self::Output {
		&self.tables[index.0]
	}
}

impl std::ops::Index<LocationId> for Body {
	type Output = HitLocation;
	fn index(&self, index: LocationId) -> &Self::Output {
		&self.locations[index.0]
	}
}

impl Body {
	pub fn new(name: impl Into<String>, roll: Dice) -> Self {
		Self {
			tables: vec![BodyTable { name: Some(name.into()), roll, locations: Vec::new(), owning_location: None }],
			locations: Vec::new(),
		}
	}

	pub fn root(&self) -> TableId {
		TableId(0)
	}

	pub fn name(&self) -> &str {
		self.tables[0].name.as_deref().unwrap_or_default()
	}

	pub fn locations(&self) -> impl Iterator<Item = (LocationId, &HitLocation)> + '_ {
		self.locations.iter().enumerate().map(|(idx, location)| (LocationId(idx), location))
	}

	/// Appends a location to `table` and recomputes that table's roll ranges.
	pub fn add_location(&mut self, table: TableId, mut location: HitLocation) -> LocationId {
		let id = LocationId(self.locations.len());
		location.owning_table = Some(table);
		location.sub_table = None;
		self.locations.push(location);
		self.tables[table.0].locations.push(id);
		self.update_roll_ranges(table);
		id
	}

	/// Gives `location` an (initially empty) sub-table rolled with `roll`.
	pub fn add_sub_table(&mut self, location: LocationId, roll: Dice) -> TableId {
		if let Some(existing) = self.locations[location.0].sub_table {
			return existing;
		}
		let id = TableId(self.tables.len());
		self.tables.push(BodyTable { name: None, roll, locations: Vec::new(), owning_location: Some(location) });
		self.locations[location.0].sub_table = Some(id);
		id
	}

	pub fn set_slots(&mut self, location: LocationId, slots: u32) {
		self.locations[location.0].slots = slots;
		if let Some(table) = self.locations[location.0].owning_table {
			self.update_roll_ranges(table);
		}
	}

	/// Assigns contiguous roll ranges to the locations of `table` (and, independently, to
	/// every sub-table beneath it), starting at the table's minimum roll.
	pub fn update_roll_ranges(&mut self, table: TableId) {
		let mut start = self.tables[table.0].roll.minimum();
		let ids = self.tables[table.0].locations.clone();
		for id in ids {
			let location = &mut self.locations[id.0];
			let slots = dice::saturate(location.slots);
			location.roll_range = match slots {
				0 => "-".to_owned(),
				1 => start.to_string(),
				slots => format!("{start}-{}", start.saturating_add(slots - 1)),
			};
			start = start.saturating_add(slots);
			if let Some(sub_table) = location.sub_table {
				self.update_roll_ranges(sub_table);
			}
		}
		log::trace!(target: "body", "updated roll ranges of table {}", table.0);
	}

	pub fn find_location(&self, id: &str) -> Option<LocationId> {
		self.locations().find(|(_, location)| location.id == id).map(|(id, _)| id)
	}

	/// The location of `table` whose roll range contains `roll`.
	pub fn location_for_roll(&self, table: TableId, roll: i32) -> Option<LocationId> {
		let mut start = self.tables[table.0].roll.minimum();
		for id in &self.tables[table.0].locations {
			let slots = dice::saturate(self.locations[id.0].slots);
			if slots > 0 && (start..=start.saturating_add(slots - 1)).contains(&roll) {
				return Some(*id);
			}
			start = start.saturating_add(slots);
		}
		None
	}

	/// Rolls on the root table, descending into sub-tables when the rolled location has one.
	pub fn roll_location(&self, rand: &mut impl rand::Rng) -> Option<LocationId> {
		let mut table = self.root();
		loop {
			let roll = self.tables[table.0].roll.roll(rand);
			let location = self.location_for_roll(table, roll)?;
			match self.locations[location.0].sub_table {
				Some(sub_table) if !self.tables[sub_table.0].locations.is_empty() => table = sub_table,
				_ => return Some(location),
			}
		}
	}

	/// Damage resistance at `location`, keyed by lowercase specialization.
	///
	/// Combines the location's own DR (under `"all"`), indexed DR bonuses for the location,
	/// and the same for every location that owns an enclosing sub-table. The raw map keeps
	/// each specialization separate; only the tooltip summary folds `"all"` into the others.
	pub fn dr(&self, location: LocationId, features: Option<&FeatureIndex>, mut tooltip: Option<&mut String>) -> BTreeMap<String, i32> {
		let mut dr = BTreeMap::new();
		self.collect_dr(location, features, tooltip.as_deref_mut(), &mut dr);
		if let Some(tooltip) = tooltip {
			if !dr.is_empty() {
				tooltip.insert_str(0, &Self::dr_summary(&dr));
			}
		}
		dr
	}

	fn collect_dr(&self, location: LocationId, features: Option<&FeatureIndex>, mut tooltip: Option<&mut String>, dr: &mut BTreeMap<String, i32>) {
		let hit_location = &self.locations[location.0];
		if hit_location.dr_bonus != 0 {
			*dr.entry(ALL_SPECIALIZATION.to_owned()).or_default() += hit_location.dr_bonus;
			if let Some(tooltip) = tooltip.as_deref_mut() {
				tooltip.push_str(&format!(
					"\n{} [{:+} against {ALL_SPECIALIZATION} attacks]",
					hit_location.choice_name, hit_location.dr_bonus
				));
			}
		}
		if let Some(features) = features {
			features.dr_bonuses_for(&hit_location.id, tooltip.as_deref_mut(), dr);
		}
		let owner = hit_location.owning_table.and_then(|table| self.tables[table.0].owning_location);
		if let Some(owner) = owner {
			self.collect_dr(owner, features, tooltip, dr);
		}
	}

	fn dr_summary(dr: &BTreeMap<String, i32>) -> String {
		let all = dr.get(ALL_SPECIALIZATION).copied().unwrap_or_default();
		let mut keys = dr.keys().collect::<Vec<_>>();
		keys.sort_by(|a, b| match (a.as_str() == ALL_SPECIALIZATION, b.as_str() == ALL_SPECIALIZATION) {
			(true, false) => std::cmp::Ordering::Less,
			(false, true) => std::cmp::Ordering::Greater,
			_ => natural_cmp(a, b),
		});
		let mut summary = String::from("\n");
		for key in keys {
			let mut value = dr[key];
			if key != ALL_SPECIALIZATION {
				value += all;
			}
			summary.push_str(&format!("\n{value} against {key} attacks"));
		}
		summary.push('\n');
		summary
	}

	/// The standard 3d humanoid hit-location table.
	pub fn humanoid() -> Self {
		let mut body = Self::new("Humanoid", Dice::new(3, 6, 0));
		let root = body.root();
		let locations = [
			HitLocation::new("eye", "Eyes", 0, -9, 0),
			HitLocation::new("skull", "Skull", 2, -7, 2),
			HitLocation::new("face", "Face", 1, -5, 0),
			HitLocation::new("leg", "Right Leg", 2, -2, 0),
			HitLocation::new("arm", "Right Arm", 1, -2, 0),
			HitLocation::new("torso", "Torso", 2, 0, 0),
			HitLocation::new("groin", "Groin", 1, -3, 0),
			HitLocation::new("arm", "Left Arm", 1, -2, 0),
			HitLocation::new("leg", "Left Leg", 2, -2, 0),
			HitLocation::new("hand", "Hand", 1, -4, 0),
			HitLocation::new("foot", "Foot", 1, -4, 0),
			HitLocation::new("neck", "Neck", 2, -5, 0),
			HitLocation::new("vitals", "Vitals", 0, -3, 0),
		];
		for location in locations {
			body.add_location(root, location);
		}
		body
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use rand::SeedableRng;

	fn body_with_slots(slots: &[u32]) -> (Body, Vec<LocationId>) {
		let mut body = Body::new("Test", Dice::new(3, 6, 0));
		let root = body.root();
		let ids = slots
			.iter()
			.enumerate()
			.map(|(idx, slots)| body.add_location(root, HitLocation::new(format!("loc{idx}"), format!("Loc {idx}"), *slots, 0, 0)))
			.collect();
		(body, ids)
	}

	#[test]
	fn roll_ranges_are_contiguous() {
		let (body, ids) = body_with_slots(&[1, 2, 0, 3]);
		let ranges = ids.iter().map(|id| body[*id].roll_range.as_str()).collect::<Vec<_>>();
		assert_eq!(ranges, vec!["3", "4-5", "-", "6-8"]);
	}

	#[test]
	fn set_slots_recomputes() {
		let (mut body, ids) = body_with_slots(&[1, 2, 0, 3]);
		body.set_slots(ids[0], 2);
		assert_eq!(body[ids[0]].roll_range, "3-4");
		assert_eq!(body[ids[3]].roll_range, "7-9");
	}

	#[test]
	fn sub_tables_seed_independently() {
		let (mut body, ids) = body_with_slots(&[1, 2]);
		let sub_table = body.add_sub_table(ids[1], Dice::new(1, 6, 0));
		let finger = body.add_location(sub_table, HitLocation::new("finger", "Finger", 2, -5, 0));
		let palm = body.add_location(sub_table, HitLocation::new("palm", "Palm", 4, -4, 0));
		assert_eq!(body[finger].roll_range, "1-2");
		assert_eq!(body[palm].roll_range, "3-6");
		assert_eq!(body[sub_table].name, None);
		assert_eq!(body[sub_table].owning_location, Some(ids[1]));
	}

	#[test]
	fn humanoid_covers_three_to_eighteen() {
		let body = Body::humanoid();
		let torso = body.find_location("torso").unwrap();
		assert_eq!(body[torso].roll_range, "9-10");
		assert_eq!(body.location_for_roll(body.root(), 3), body.find_location("skull"));
		assert_eq!(body.location_for_roll(body.root(), 18), body.find_location("neck"));
		assert_eq!(body.location_for_roll(body.root(), 19), None);
		let mut rng = rand::rngs::StdRng::seed_from_u64(42);
		for _ in 0..50 {
			assert!(body.roll_location(&mut rng).is_some());
		}
	}

	#[test]
	fn dr_walks_up_to_owning_locations() {
		let mut body = Body::new("Test", Dice::new(3, 6, 0));
		let root = body.root();
		let arm = body.add_location(root, HitLocation::new("arm", "Arm", 3, -2, 2));
		let sub_table = body.add_sub_table(arm, Dice::new(1, 6, 0));
		let hand = body.add_location(sub_table, HitLocation::new("hand", "Hand", 6, -4, 1));

		let mut tooltip = String::new();
		let dr = body.dr(hand, None, Some(&mut tooltip));
		assert_eq!(dr, BTreeMap::from([("all".to_owned(), 3)]));
		assert_eq!(tooltip, "\n\n3 against all attacks\n\nHand [+1 against all attacks]\nArm [+2 against all attacks]");

		let dr = body.dr(arm, None, None);
		assert_eq!(dr, BTreeMap::from([("all".to_owned(), 2)]));
	}

	#[test]
	fn summary_orders_all_first() {
		let dr = BTreeMap::from([("all".to_owned(), 2), ("burning".to_owned(), 3), ("crushing10".to_owned(), 1), ("crushing2".to_owned(), 1)]);
		assert_eq!(
			Body::dr_summary(&dr),
			"\n\n2 against all attacks\n5 against burning attacks\n3 against crushing2 attacks\n3 against crushing10 attacks\n"
		);
	}
}
