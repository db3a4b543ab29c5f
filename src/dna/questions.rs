// src/dna/questions.rs

use std::{collections::HashMap, sync::LazyLock};

use serde::Serialize;

/// One question of the parent reading-support quiz.
#[derive(Debug, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub prompt: &'static str,
    pub options: &'static [AnswerOption],
}

#[derive(Debug, Serialize)]
pub struct AnswerOption {
    pub id: &'static str,
    pub text: &'static str,
    /// Trait tags scored when this option is chosen. Never sent to clients.
    #[serde(skip_serializing)]
    pub traits: &'static [&'static str],
}

impl Question {
    pub fn option(&self, option_id: &str) -> Option<&'static AnswerOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}

pub static QUESTIONS: [Question; 8] = [
    Question {
        id: "bedtime",
        prompt: "It's bedtime and your child wants one more chapter. You usually...",
        options: &[
            AnswerOption {
                id: "let_them_decide",
                text: "Let them decide whether they've earned it",
                traits: &["choice_giving", "self_direction"],
            },
            AnswerOption {
                id: "stick_to_plan",
                text: "Stick to the plan we agreed on: one chapter is the goal",
                traits: &["structure"],
            },
            AnswerOption {
                id: "read_it_together",
                text: "Snuggle up and read it together",
                traits: &["shared_reading", "emotional_connection"],
            },
            AnswerOption {
                id: "talk_about_it",
                text: "Say yes, then ask what they think will happen next",
                traits: &["discussion"],
            },
            AnswerOption {
                id: "praise_stamina",
                text: "Tell them how proud you are that they kept going",
                traits: &["effort_praise"],
            },
            AnswerOption {
                id: "read_my_own",
                text: "Say yes and pick up your own book beside them",
                traits: &["modeling", "personal_reading"],
            },
        ],
    },
    Question {
        id: "book_choice",
        prompt: "At the library, your child heads straight for the comics again. You...",
        options: &[
            AnswerOption {
                id: "their_call",
                text: "Let them, it's their library card",
                traits: &["choice_giving", "independence"],
            },
            AnswerOption {
                id: "one_of_each",
                text: "Suggest one comic plus one chapter book at their level",
                traits: &["skill_building"],
            },
            AnswerOption {
                id: "read_comics_with_them",
                text: "Grab a comic too and read side by side",
                traits: &["relationship"],
            },
            AnswerOption {
                id: "ask_why",
                text: "Ask what they love about comics and find one with a big theme",
                traits: &["values", "discussion"],
            },
            AnswerOption {
                id: "stretch_pick",
                text: "Challenge them to find the hardest comic on the shelf",
                traits: &["challenge"],
            },
            AnswerOption {
                id: "share_my_picks",
                text: "Show them the graphic novel you are reading",
                traits: &["enthusiasm"],
            },
        ],
    },
    Question {
        id: "struggle",
        prompt: "Your child gets stuck on a difficult word. Your first instinct is to...",
        options: &[
            AnswerOption {
                id: "wait",
                text: "Wait quietly and let them work it out",
                traits: &["independence", "self_direction"],
            },
            AnswerOption {
                id: "teach_strategy",
                text: "Walk them through sounding it out step by step",
                traits: &["skill_building", "structure"],
            },
            AnswerOption {
                id: "reassure",
                text: "Give them a hug and reassure them it's okay",
                traits: &["emotional_connection"],
            },
            AnswerOption {
                id: "explore_meaning",
                text: "Talk about what the word might mean from the story",
                traits: &["real_world_links"],
            },
            AnswerOption {
                id: "encourage_effort",
                text: "Remind them that hard words make their brain stronger",
                traits: &["persistence", "effort_praise"],
            },
            AnswerOption {
                id: "show_how",
                text: "Show them how you handle words you don't know",
                traits: &["modeling"],
            },
        ],
    },
    Question {
        id: "weekend",
        prompt: "A free Saturday afternoon. Reading in your house looks like...",
        options: &[
            AnswerOption {
                id: "free_choice",
                text: "Everyone doing whatever they feel like, books included",
                traits: &["choice_giving"],
            },
            AnswerOption {
                id: "reading_goal",
                text: "Finishing the week's reading goal before play",
                traits: &["achievement"],
            },
            AnswerOption {
                id: "family_read",
                text: "A family read-aloud on the sofa",
                traits: &["shared_reading", "relationship"],
            },
            AnswerOption {
                id: "field_trip",
                text: "A trip somewhere connected to what we've been reading",
                traits: &["real_world_links", "values"],
            },
            AnswerOption {
                id: "new_genre",
                text: "Trying a genre nobody has read before",
                traits: &["challenge", "persistence"],
            },
            AnswerOption {
                id: "everyone_reads",
                text: "Me with my novel, them with theirs",
                traits: &["personal_reading"],
            },
        ],
    },
    Question {
        id: "report_card",
        prompt: "Your child's reading report comes home. You focus most on...",
        options: &[
            AnswerOption {
                id: "their_view",
                text: "How they feel about it and what they want to do next",
                traits: &["self_direction"],
            },
            AnswerOption {
                id: "the_levels",
                text: "Their reading level and which skills to work on",
                traits: &["skill_building", "achievement"],
            },
            AnswerOption {
                id: "their_feelings",
                text: "Whether they still enjoy reading with you",
                traits: &["relationship"],
            },
            AnswerOption {
                id: "the_why",
                text: "Whether they understand why reading matters",
                traits: &["values"],
            },
            AnswerOption {
                id: "the_effort",
                text: "The effort comments more than the grades",
                traits: &["effort_praise"],
            },
            AnswerOption {
                id: "my_example",
                text: "Whether our home shows them that reading is valued",
                traits: &["modeling", "enthusiasm"],
            },
        ],
    },
    Question {
        id: "screens",
        prompt: "Screens are winning the evening again. You...",
        options: &[
            AnswerOption {
                id: "negotiate",
                text: "Let them propose their own balance and hold them to it",
                traits: &["independence", "choice_giving"],
            },
            AnswerOption {
                id: "earn_time",
                text: "Use reading minutes to earn screen minutes",
                traits: &["structure", "achievement"],
            },
            AnswerOption {
                id: "do_it_together",
                text: "Suggest reading together instead",
                traits: &["shared_reading"],
            },
            AnswerOption {
                id: "bridge",
                text: "Find the book behind their favourite show and talk about it",
                traits: &["discussion", "real_world_links"],
            },
            AnswerOption {
                id: "reading_challenge",
                text: "Set up a reading challenge that beats the game",
                traits: &["challenge"],
            },
            AnswerOption {
                id: "phones_down",
                text: "Put your own phone away and start reading",
                traits: &["modeling", "personal_reading"],
            },
        ],
    },
    Question {
        id: "proud_moment",
        prompt: "Which moment would make you proudest as a reading parent?",
        options: &[
            AnswerOption {
                id: "found_own_series",
                text: "They discover a series entirely on their own",
                traits: &["self_direction", "independence"],
            },
            AnswerOption {
                id: "level_up",
                text: "They move up a reading level",
                traits: &["achievement"],
            },
            AnswerOption {
                id: "asks_to_read_together",
                text: "They ask you to read with them even though they can read alone",
                traits: &["emotional_connection", "relationship"],
            },
            AnswerOption {
                id: "changed_their_mind",
                text: "A book changes how they think about something",
                traits: &["values", "discussion"],
            },
            AnswerOption {
                id: "finished_hard_book",
                text: "They finish a book they almost gave up on",
                traits: &["persistence"],
            },
            AnswerOption {
                id: "recommends_to_you",
                text: "They recommend a book to you, reader to reader",
                traits: &["enthusiasm"],
            },
        ],
    },
    Question {
        id: "reading_memory",
        prompt: "Your favourite childhood reading memory involves...",
        options: &[
            AnswerOption {
                id: "secret_reading",
                text: "Reading under the covers whatever you wanted",
                traits: &["choice_giving"],
            },
            AnswerOption {
                id: "reading_award",
                text: "Winning a reading award or certificate",
                traits: &["achievement", "skill_building"],
            },
            AnswerOption {
                id: "someone_reading_to_me",
                text: "Someone special reading to you",
                traits: &["shared_reading"],
            },
            AnswerOption {
                id: "book_that_mattered",
                text: "A book that taught you something about life",
                traits: &["values"],
            },
            AnswerOption {
                id: "conquering_a_classic",
                text: "Finally getting through a book that felt too big",
                traits: &["challenge", "persistence"],
            },
            AnswerOption {
                id: "grown_ups_reading",
                text: "Grown-ups around you who were always reading",
                traits: &["modeling"],
            },
        ],
    },
];

static QUESTION_INDEX: LazyLock<HashMap<&'static str, &'static Question>> =
    LazyLock::new(|| QUESTIONS.iter().map(|q| (q.id, q)).collect());

pub fn find_question(id: &str) -> Option<&'static Question> {
    QUESTION_INDEX.get(id).copied()
}

/// Trait tags for a (question, option) pair, or `None` when either is unknown.
pub fn traits_for(question_id: &str, option_id: &str) -> Option<&'static [&'static str]> {
    find_question(question_id)
        .and_then(|q| q.option(option_id))
        .map(|o| o.traits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dna::ParentDnaType;

    #[test]
    fn test_every_option_trait_belongs_to_a_type() {
        for q in &QUESTIONS {
            for o in q.options {
                for t in o.traits {
                    assert!(
                        ParentDnaType::ALL
                            .iter()
                            .any(|p| p.details().traits.contains(t)),
                        "{}/{} has orphan trait {}",
                        q.id,
                        o.id,
                        t
                    );
                }
            }
        }
    }

    #[test]
    fn test_traits_for_unknown_ids() {
        assert!(traits_for("bedtime", "read_my_own").is_some());
        assert!(traits_for("bedtime", "nope").is_none());
        assert!(traits_for("nope", "read_my_own").is_none());
    }

    #[test]
    fn test_serialized_questions_hide_traits() {
        let json = serde_json::to_value(&QUESTIONS[0]).unwrap();
        assert!(json["options"][0].get("traits").is_none());
        assert!(json["options"][0].get("text").is_some());
    }
}
