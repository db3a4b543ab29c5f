// src/dna/family.rs

use serde::Serialize;

use super::{
    ChildDnaType, CompatibilityInsights, ModifierSet, ParentDnaResult, ReadingDna,
    code::format_dna_code, get_compatibility_insights,
};

/// What the aggregator needs to know about a child.
pub trait FamilyMember {
    fn member_id(&self) -> i64;
    fn first_name(&self) -> &str;
    fn grade(&self) -> &str;
    fn reading_dna(&self) -> Option<&ReadingDna>;
}

/// Compatibility between the parent and one child. Always derived, never stored.
#[derive(Debug, Clone, Serialize)]
pub struct CompatibilityRecord {
    pub student_id: i64,
    pub student_name: String,
    pub grade: String,
    pub student_type: ChildDnaType,
    pub student_modifiers: ModifierSet,
    pub dna_code: String,
    #[serde(flatten)]
    pub insights: CompatibilityInsights,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationCategory {
    pub category: String,
    pub icon: String,
    pub items: Vec<String>,
}

pub const FAMILY_ACTIVITIES_CATEGORY: &str = "Family Activities";

/// Used when a child's record carries no pairing-specific strategies.
const GENERIC_CHILD_STRATEGIES: [&str; 3] = [
    "Let your child choose at least some of what they read",
    "Keep a regular, relaxed time for reading each day",
    "Talk about books the way you would talk about a favourite show",
];

/// One record per child that has a reading DNA type, in input order.
/// Children without a type are skipped.
pub fn calculate_family_compatibility<C: FamilyMember>(
    parent_dna: &ParentDnaResult,
    children: &[C],
) -> Vec<CompatibilityRecord> {
    children
        .iter()
        .filter_map(|child| {
            let dna = child.reading_dna()?;
            let child_type = dna.dna_type?;
            Some(CompatibilityRecord {
                student_id: child.member_id(),
                student_name: child.first_name().to_string(),
                grade: child.grade().to_string(),
                student_type: child_type,
                student_modifiers: dna.modifiers.clone(),
                dna_code: format_dna_code(Some(dna)),
                insights: get_compatibility_insights(
                    parent_dna.parent_type,
                    child_type,
                    &dna.modifiers,
                ),
            })
        })
        .collect()
}

/// Household recommendations: the parent type's family activities first,
/// then one category per child record.
pub fn generate_family_recommendations(
    parent_dna: &ParentDnaResult,
    records: &[CompatibilityRecord],
) -> Vec<RecommendationCategory> {
    let mut categories = Vec::with_capacity(records.len() + 1);

    categories.push(RecommendationCategory {
        category: FAMILY_ACTIVITIES_CATEGORY.to_string(),
        icon: "🏠".to_string(),
        items: parent_dna
            .parent_type
            .family_activities()
            .iter()
            .map(|s| s.to_string())
            .collect(),
    });

    for record in records {
        let items = match &record.insights.key_strategies {
            Some(strategies) if !strategies.is_empty() => strategies.clone(),
            _ => GENERIC_CHILD_STRATEGIES.iter().map(|s| s.to_string()).collect(),
        };
        categories.push(RecommendationCategory {
            category: format!("For {}", record.student_name),
            icon: record.student_type.details().emoji.to_string(),
            items,
        });
    }

    categories
}
