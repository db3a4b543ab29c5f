// src/dna/scoring.rs

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::{ParentDnaType, ParentTypeDetails, questions::traits_for};

/// Question id -> chosen option id.
pub type QuestionAnswerSet = HashMap<String, String>;

/// Trait name -> number of chosen options carrying it.
pub type TraitTally = BTreeMap<String, u32>;

/// Outcome of a completed parent assessment.
///
/// Replaced wholesale when the assessment is retaken; never edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentDnaResult {
    #[serde(rename = "type")]
    pub parent_type: ParentDnaType,
    pub trait_counts: TraitTally,
    pub all_scores: BTreeMap<ParentDnaType, u32>,
    /// Answers that matched a known question and option.
    #[serde(default)]
    pub answered_questions: usize,
    #[serde(default)]
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl ParentDnaResult {
    pub fn details(&self) -> &'static ParentTypeDetails {
        self.parent_type.details()
    }

    pub fn score(&self, parent_type: ParentDnaType) -> u32 {
        self.all_scores.get(&parent_type).copied().unwrap_or(0)
    }

    /// True when no answer contributed to any type, so the winner is only
    /// the tie-break default.
    pub fn is_degenerate(&self) -> bool {
        self.all_scores.values().all(|s| *s == 0)
    }
}

/// Counts trait tags over every recognised answer.
/// Unknown question or option ids are skipped.
fn tally_traits(answers: &QuestionAnswerSet) -> (TraitTally, usize) {
    let mut tally = TraitTally::new();
    let mut answered = 0;

    for (question_id, option_id) in answers {
        let Some(traits) = traits_for(question_id, option_id) else {
            tracing::debug!("Ignoring unknown answer {}={}", question_id, option_id);
            continue;
        };
        answered += 1;
        for t in traits {
            *tally.entry((*t).to_string()).or_insert(0) += 1;
        }
    }

    (tally, answered)
}

/// Scores a set of quiz answers and picks the best-fit parent type.
///
/// Each type's score is the sum of the tally for every trait in its affinity
/// list. The highest score wins; on a tie the type declared first in
/// [`ParentDnaType::ALL`] wins, which also decides the all-zero case.
pub fn calculate_parent_dna_type(answers: &QuestionAnswerSet) -> ParentDnaResult {
    let (trait_counts, answered_questions) = tally_traits(answers);

    let mut all_scores = BTreeMap::new();
    let mut best: Option<(ParentDnaType, u32)> = None;

    for parent_type in ParentDnaType::ALL {
        let score = parent_type
            .details()
            .traits
            .iter()
            .map(|t| trait_counts.get(*t).copied().unwrap_or(0))
            .sum::<u32>();
        all_scores.insert(parent_type, score);

        // Strictly greater keeps the earlier type on ties.
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((parent_type, score));
        }
    }

    let parent_type = best.map_or(ParentDnaType::ALL[0], |(t, _)| t);

    ParentDnaResult {
        parent_type,
        trait_counts,
        all_scores,
        answered_questions,
        completed_at: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(pairs: &[(&str, &str)]) -> QuestionAnswerSet {
        pairs
            .iter()
            .map(|(q, o)| (q.to_string(), o.to_string()))
            .collect()
    }

    #[test]
    fn test_autonomy_only_answers() {
        // bedtime: choice_giving + self_direction, book_choice: choice_giving + independence,
        // weekend: choice_giving
        let input = answers(&[
            ("bedtime", "let_them_decide"),
            ("book_choice", "their_call"),
            ("weekend", "free_choice"),
        ]);
        let result = calculate_parent_dna_type(&input);

        assert_eq!(result.parent_type, ParentDnaType::AutonomySupporter);
        assert_eq!(result.score(ParentDnaType::AutonomySupporter), 5);
        for t in ParentDnaType::ALL.into_iter().skip(1) {
            assert_eq!(result.score(t), 0, "{} should score 0", t);
        }
        assert_eq!(result.trait_counts.get("choice_giving"), Some(&3));
        assert_eq!(result.answered_questions, 3);
    }

    #[test]
    fn test_empty_answers_do_not_panic() {
        let result = calculate_parent_dna_type(&QuestionAnswerSet::new());
        assert!(result.is_degenerate());
        assert_eq!(result.parent_type, ParentDnaType::AutonomySupporter);
        assert_eq!(result.all_scores.len(), 6);
        assert!(result.trait_counts.is_empty());
        assert_eq!(result.answered_questions, 0);
    }

    #[test]
    fn test_unknown_ids_are_ignored() {
        let input = answers(&[
            ("bedtime", "read_my_own"),
            ("not_a_question", "anything"),
            ("screens", "not_an_option"),
        ]);
        let result = calculate_parent_dna_type(&input);
        assert_eq!(result.parent_type, ParentDnaType::AuthenticModeler);
        assert_eq!(result.answered_questions, 1);
    }

    #[test]
    fn test_tie_goes_to_first_declared_type() {
        // connection_creator: 1 (shared_reading), meaning_maker: 1 (discussion)
        let input = answers(&[("screens", "do_it_together"), ("bedtime", "talk_about_it")]);
        let result = calculate_parent_dna_type(&input);
        assert_eq!(result.score(ParentDnaType::ConnectionCreator), 1);
        assert_eq!(result.score(ParentDnaType::MeaningMaker), 1);
        assert_eq!(result.parent_type, ParentDnaType::ConnectionCreator);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let input = answers(&[
            ("bedtime", "praise_stamina"),
            ("struggle", "encourage_effort"),
            ("weekend", "new_genre"),
            ("report_card", "the_levels"),
            ("proud_moment", "finished_hard_book"),
        ]);
        let first = calculate_parent_dna_type(&input);
        for _ in 0..20 {
            assert_eq!(calculate_parent_dna_type(&input), first);
        }
        assert_eq!(first.parent_type, ParentDnaType::GrowthFacilitator);
    }

    #[test]
    fn test_result_serializes_with_type_key() {
        let input = answers(&[("bedtime", "stick_to_plan")]);
        let json = serde_json::to_value(calculate_parent_dna_type(&input)).unwrap();
        assert_eq!(json["type"], "competence_builder");
        assert_eq!(json["all_scores"]["competence_builder"], 1);
    }
}
