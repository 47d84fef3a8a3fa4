use super::{Body, Dice, HitLocation, TableId};
use serde::{Deserialize, Serialize};

/// The persisted (nested) form of a [`Body`].
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct BodyDefinition {
	pub name: String,
	#[serde(default)]
	pub roll: Dice,
	#[serde(default)]
	pub locations: Vec<LocationDefinition>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct LocationDefinition {
	pub id: String,
	pub choice_name: String,
	#[serde(default, skip_serializing_if = "String::is_empty")]
	pub table_name: String,
	#[serde(default)]
	pub slots: u32,
	#[serde(default)]
	pub hit_penalty: i32,
	#[serde(default)]
	pub dr_bonus: i32,
	#[serde(default, skip_serializing_if = "String::is_empty")]
	pub description: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub sub_table: Option<SubTableDefinition>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SubTableDefinition {
	#[serde(default)]
	pub roll: Dice,
	#[serde(default)]
	pub locations: Vec<LocationDefinition>,
}

impl From<BodyDefinition> for Body {
	fn from(definition: BodyDefinition) -> Self {
		let mut body = Body::new(definition.name, definition.roll);
		let root = body.root();
		body.add_definitions(root, definition.locations);
		body
	}
}

impl From<Body> for BodyDefinition {
	fn from(body: Body) -> Self {
		let root = &body[body.root()];
		Self {
			name: body.name().to_owned(),
			roll: root.roll,
			locations: body.definitions(body.root()),
		}
	}
}

impl Body {
	fn add_definitions(&mut self, table: TableId, definitions: Vec<LocationDefinition>) {
		for definition in definitions {
			let location = HitLocation {
				table_name: match definition.table_name.is_empty() {
					true => definition.choice_name.clone(),
					false => definition.table_name,
				},
				description: definition.description,
				..HitLocation::new(definition.id, definition.choice_name, definition.slots, definition.hit_penalty, definition.dr_bonus)
			};
			let id = self.add_location(table, location);
			if let Some(sub_table) = definition.sub_table {
				let sub_id = self.add_sub_table(id, sub_table.roll);
				self.add_definitions(sub_id, sub_table.locations);
			}
		}
	}

	fn definitions(&self, table: TableId) -> Vec<LocationDefinition> {
		let mut definitions = Vec::new();
		for id in &self[table].locations {
			let location = &self[*id];
			definitions.push(LocationDefinition {
				id: location.id.clone(),
				choice_name: location.choice_name.clone(),
				table_name: location.table_name.clone(),
				slots: location.slots,
				hit_penalty: location.hit_penalty,
				dr_bonus: location.dr_bonus,
				description: location.description.clone(),
				sub_table: location.sub_table.map(|sub_table| SubTableDefinition {
					roll: self[sub_table].roll,
					locations: self.definitions(sub_table),
				}),
			});
		}
		definitions
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn nested_tables_load() {
		let json = r#"{
			"name": "Winged",
			"roll": "3d",
			"locations": [
				{ "id": "torso", "choice_name": "Torso", "slots": 4 },
				{
					"id": "wing", "choice_name": "Wing", "slots": 2, "dr_bonus": 1,
					"sub_table": { "roll": "1d", "locations": [{ "id": "feathers", "choice_name": "Feathers", "slots": 6 }] }
				}
			]
		}"#;
		let body: Body = serde_json::from_str(json).unwrap();
		let feathers = body.find_location("feathers").unwrap();
		let wing = body.find_location("wing").unwrap();
		assert_eq!(body[feathers].roll_range, "1-6");
		assert_eq!(body[wing].roll_range, "7-8");
		assert_eq!(body.dr(feathers, None, None).get("all"), Some(&1));

		let definition = BodyDefinition::from(body.clone());
		assert_eq!(definition.locations[1].sub_table.as_ref().map(|table| table.locations.len()), Some(1));
		assert_eq!(definition.locations[0].table_name, "Torso");
	}

	#[test]
	fn oversized_numbers() {
		let json = r#"{"name":"X","roll":"3000000000d-2000000000","locations":[{"id":"a","choice_name":"A","slots":1}]}"#;
		assert!(serde_json::from_str::<Body>(json).is_err());

		let json = r#"{"name":"X","roll":"3d","locations":[
			{"id":"a","choice_name":"A","slots":4294967295},
			{"id":"b","choice_name":"B","slots":1}
		]}"#;
		let body: Body = serde_json::from_str(json).unwrap();
		let a = body.find_location("a").unwrap();
		let b = body.find_location("b").unwrap();
		assert_eq!(body[a].roll_range, format!("3-{}", i32::MAX));
		assert_eq!(body[b].roll_range, i32::MAX.to_string());
		assert_eq!(body.location_for_roll(body.root(), i32::MAX), Some(a));
	}
}
