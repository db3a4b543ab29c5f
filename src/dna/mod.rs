// src/dna/mod.rs

//! Reading-DNA core: static type catalogs, the parent quiz scorer, the
//! parent/child compatibility resolver and the family aggregators.
//!
//! Everything here is pure and synchronous. Lookups that can miss resolve to
//! documented default content instead of failing.

pub mod child_types;
pub mod code;
pub mod compatibility;
pub mod family;
pub mod parent_types;
pub mod questions;
pub mod scoring;

use std::fmt;

pub use child_types::{
    ChildDnaType, ChildTypeDetails, Modifier, ModifierDetails, ModifierSet, ReadingDna, TipFocus,
};
pub use code::format_dna_code;
pub use compatibility::{
    CompatibilityInsights, CompatibilityLevel, InsightSource, get_compatibility_insights,
};
pub use family::{
    CompatibilityRecord, FamilyMember, RecommendationCategory, calculate_family_compatibility,
    generate_family_recommendations,
};
pub use parent_types::{ParentDnaType, ParentTypeDetails};
pub use scoring::{ParentDnaResult, QuestionAnswerSet, TraitTally, calculate_parent_dna_type};

/// A type key that is not part of a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKey(pub String);

impl fmt::Display for UnknownKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown type key '{}'", self.0)
    }
}

impl std::error::Error for UnknownKey {}
