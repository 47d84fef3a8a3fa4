use integro_gurps::system::gurps::{
	feature::{DrBonus, SpellBonus, SpellMatch},
	prereq::{AttributePrereq, SkillPrereq, TraitPrereq},
	Character, Dice, HitLocation, LeveledAmount, NumericCriteria, PointKind, PrereqList, Spell, StringCriteria, Trait,
	TraitModifier,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

fn wizard() -> Character {
	let mut character = Character::default();
	character.profile.name = "Aldric".into();
	character.set_attribute("iq", dec!(2));
	character.traits_mut().extend([
		Trait::leveled("Magery", dec!(5), dec!(10), dec!(2))
			.with_feature(SpellBonus::new(SpellMatch::AllColleges, StringCriteria::any(), LeveledAmount::per_level(dec!(1)))),
		Trait::leveled("Damage Resistance", Decimal::ZERO, dec!(5), dec!(3))
			.with_modifier(TraitModifier::percentage("Tough Skin", dec!(-40)))
			.with_feature(DrBonus::new("torso", LeveledAmount::per_level(dec!(1)))),
		Trait::new("Staff Bond", dec!(1)).with_prereqs(PrereqList::any(vec![
			TraitPrereq { level: NumericCriteria::at_least(3), ..TraitPrereq::named(StringCriteria::is("Magery")) }.into(),
			AttributePrereq::at_least("iq", dec!(12)).into(),
		])),
		Trait::new("Laser Training", dec!(1)).with_prereqs(
			PrereqList::all(vec![SkillPrereq::named(StringCriteria::is("Beam Weapons")).into()])
				.when_tl(NumericCriteria::at_least(9)),
		),
		Trait::new("Heir", dec!(1))
			.with_prereqs(PrereqList::all(vec![TraitPrereq::named(StringCriteria::is("Wealth")).into()])),
	]);
	character.spells_mut().push(Spell::new("Fireball", vec!["Fire".into()], dec!(1)));

	let skull = character.body().find_location("skull").unwrap();
	let body = character.body_mut();
	let brain_table = body.add_sub_table(skull, Dice::new(1, 6, 0));
	body.add_location(brain_table, HitLocation::new("brain", "Brain", 6, -7, 1));
	character
}

#[test]
fn sheet_survives_persistence() {
	let json = wizard().to_json().unwrap();
	let character = Character::from_json(&json).unwrap();

	assert_eq!(character.profile.name, "Aldric");
	assert_eq!(character.attribute_current("iq"), Some(dec!(12)));
	let fireball = &character.spells()[0];
	assert_eq!(character.spell_level(fireball, None), Some(dec!(12)));

	let points = character.points();
	assert_eq!(points[PointKind::Attributes], dec!(40));
	assert_eq!(points[PointKind::Advantages], dec!(37));
	assert_eq!(points[PointKind::Spells], dec!(1));
	assert_eq!(points.total(), dec!(78));
}

#[test]
fn damage_resistance_with_sources() {
	let character = wizard();
	let torso = character.body().find_location("torso").unwrap();
	let mut tooltip = String::new();
	let dr = character.dr_for(torso, Some(&mut tooltip));
	assert_eq!(dr.get("all"), Some(&3));
	assert_eq!(tooltip, "\n\n3 against all attacks\n\nDamage Resistance [+3 against all attacks]");

	let brain = character.body().find_location("brain").unwrap();
	assert_eq!(character.dr_for(brain, None).get("all"), Some(&3));
	assert_eq!(character.body()[brain].roll_range, "1-6");
}

#[test]
fn sub_table_inherits_specialized_resistance() {
	let mut character = wizard();
	character.traits_mut().push(
		Trait::new("Fireproof Helm", Decimal::ZERO)
			.with_feature(DrBonus { specialization: "burning".into(), ..DrBonus::new("skull", LeveledAmount::flat(dec!(4))) }),
	);
	let brain = character.body().find_location("brain").unwrap();
	let mut tooltip = String::new();
	let dr = character.dr_for(brain, Some(&mut tooltip));
	assert_eq!(dr, BTreeMap::from([("all".to_owned(), 3), ("burning".to_owned(), 4)]));
	assert!(tooltip.starts_with("\n\n3 against all attacks\n7 against burning attacks\n"));
	assert!(tooltip.contains("\nFireproof Helm [+4 against burning attacks]"));
}

#[test]
fn only_unmet_prerequisites_are_reported() {
	let character = wizard();
	let unsatisfied = character.unsatisfied_prereqs();
	let names = unsatisfied.iter().map(|item| item.name.as_str()).collect::<Vec<_>>();
	assert_eq!(names, vec!["Heir"]);
	assert_eq!(unsatisfied[0].explanation, "\nRequires all of:\n\u{a0}\u{a0}Has a trait whose name is \"Wealth\"");
}
