//! Derived-value resolution for GURPS characters.
//!
//! A [`Character`] owns the editable trees (traits, skills, spells, equipment, body table).
//! Everything numeric is derived from those trees on demand: the [`FeatureIndex`] gathers
//! every bonus a node grants, the cost engine stacks trait modifiers into point costs,
//! [`Prereq`] trees decide whether rules are met, and the [`Body`] aggregates damage resistance.

mod amount;
pub use amount::*;

pub mod attribute;
pub use attribute::{AttributeBase, AttributeDef, Limitation};

pub mod body;
pub use body::{Body, BodyTable, Dice, HitLocation, LocationId, TableId};

pub mod character;
pub use character::{Character, FeatureIndex, PointKind, PointsBreakdown, Profile, SheetSettings, UnsatisfiedPrereq};

pub mod cost;

pub mod criteria;
pub use criteria::{NumericCompare, NumericCriteria, StringCompare, StringCriteria, WeightCriteria};

pub mod equipment;
pub use equipment::{Equipment, EquipmentModifier};

pub mod feature;
pub use feature::Feature;

pub mod modifier;
pub use modifier::{Affects, CostType, SelfControlRoll, TraitModifier};

pub mod nameable;

pub mod prereq;
pub use prereq::{Prereq, PrereqList, Subject};

mod skill;
pub use skill::*;

mod spell;
pub use spell::*;

pub mod traits;
pub use traits::{ContainerType, Trait, TraitKind};
