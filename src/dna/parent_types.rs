// src/dna/parent_types.rs

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::UnknownKey;

/// The six parent reading-support styles.
///
/// Declaration order is significant: it is the order scores are compared in,
/// so the first declared type wins a tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParentDnaType {
    AutonomySupporter,
    CompetenceBuilder,
    ConnectionCreator,
    MeaningMaker,
    GrowthFacilitator,
    AuthenticModeler,
}

impl ParentDnaType {
    pub const ALL: [ParentDnaType; 6] = [
        ParentDnaType::AutonomySupporter,
        ParentDnaType::CompetenceBuilder,
        ParentDnaType::ConnectionCreator,
        ParentDnaType::MeaningMaker,
        ParentDnaType::GrowthFacilitator,
        ParentDnaType::AuthenticModeler,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ParentDnaType::AutonomySupporter => "autonomy_supporter",
            ParentDnaType::CompetenceBuilder => "competence_builder",
            ParentDnaType::ConnectionCreator => "connection_creator",
            ParentDnaType::MeaningMaker => "meaning_maker",
            ParentDnaType::GrowthFacilitator => "growth_facilitator",
            ParentDnaType::AuthenticModeler => "authentic_modeler",
        }
    }

    /// Detail record for this type. Exhaustive, so every type has exactly one.
    pub fn details(self) -> &'static ParentTypeDetails {
        match self {
            ParentDnaType::AutonomySupporter => &AUTONOMY_SUPPORTER,
            ParentDnaType::CompetenceBuilder => &COMPETENCE_BUILDER,
            ParentDnaType::ConnectionCreator => &CONNECTION_CREATOR,
            ParentDnaType::MeaningMaker => &MEANING_MAKER,
            ParentDnaType::GrowthFacilitator => &GROWTH_FACILITATOR,
            ParentDnaType::AuthenticModeler => &AUTHENTIC_MODELER,
        }
    }

    /// Household activities suggested for this parenting style.
    pub fn family_activities(self) -> &'static [&'static str] {
        match self {
            ParentDnaType::AutonomySupporter => &[
                "Host a monthly family 'book pick' night where everyone chooses freely",
                "Give each child a small book budget they manage themselves",
                "Build a reading nook each child can arrange their own way",
            ],
            ParentDnaType::CompetenceBuilder => &[
                "Keep a family reading chart and celebrate milestones together",
                "Try a 'level up' reading challenge with a shared goal",
                "Visit the library together and set a family borrowing target",
            ],
            ParentDnaType::ConnectionCreator => &[
                "Start a weekly family read-aloud night",
                "Pick one book the whole family reads and discuss over dinner",
                "Make a cozy blanket-fort reading session a weekend ritual",
            ],
            ParentDnaType::MeaningMaker => &[
                "Connect a book to a family outing, museum or place nearby",
                "Hold a 'big question' dinner inspired by something someone read",
                "Read a story together and act on its lesson as a family project",
            ],
            ParentDnaType::GrowthFacilitator => &[
                "Share a 'hardest thing I read this week' story at dinner",
                "Try a family reading stretch: one genre nobody has tried yet",
                "Keep a family journal of words everyone learned",
            ],
            ParentDnaType::AuthenticModeler => &[
                "Schedule family quiet-reading time where adults read too",
                "Swap book recommendations in a family 'shelf talk'",
                "Bring books on every outing and let kids see you reading",
            ],
        }
    }
}

impl fmt::Display for ParentDnaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParentDnaType {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParentDnaType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownKey(s.to_string()))
    }
}

/// Descriptive record shown to a parent for their type.
#[derive(Debug, Serialize)]
pub struct ParentTypeDetails {
    pub key: ParentDnaType,
    pub name: &'static str,
    pub emoji: &'static str,
    pub color: &'static str,
    pub description: &'static str,
    pub strengths: &'static [&'static str],
    pub research_basis: &'static str,
    /// Quiz traits that count toward this type.
    pub traits: &'static [&'static str],
    pub strategies: ParentStrategies,
}

#[derive(Debug, Serialize)]
pub struct ParentStrategies {
    pub daily: &'static [&'static str],
    pub weekly: &'static [&'static str],
    pub scenarios: Scenarios,
}

/// Scripted responses for common situations. Not every type has every one.
#[derive(Debug, Serialize)]
pub struct Scenarios {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_choice_struggles: Option<Scenario>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading_resistance: Option<Scenario>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen_time_battles: Option<Scenario>,
}

#[derive(Debug, Serialize)]
pub struct Scenario {
    pub situation: &'static str,
    pub script: &'static str,
}

static AUTONOMY_SUPPORTER: ParentTypeDetails = ParentTypeDetails {
    key: ParentDnaType::AutonomySupporter,
    name: "Autonomy Supporter",
    emoji: "🧭",
    color: "#4F9DDE",
    description: "You believe readers grow best when they steer. You offer choices, \
                  respect your child's tastes and step back so reading feels like theirs.",
    strengths: &[
        "Builds intrinsic motivation through real choice",
        "Respects your child's reading identity",
        "Avoids power struggles over what to read",
    ],
    research_basis: "Self-Determination Theory (Deci & Ryan): autonomy support predicts \
                     durable intrinsic motivation to read.",
    traits: &["choice_giving", "independence", "self_direction"],
    strategies: ParentStrategies {
        daily: &[
            "Offer two or three books and let your child pick",
            "Ask 'what do you feel like reading today?' instead of assigning",
        ],
        weekly: &[
            "Let your child plan one library or bookstore trip",
            "Review the week's reading together and let them set next week's goal",
        ],
        scenarios: Scenarios {
            book_choice_struggles: Some(Scenario {
                situation: "Your child keeps picking books you think are too easy.",
                script: "\"I love that you know what you enjoy. Want to pick one easy one \
                         and one that stretches you a little?\"",
            }),
            reading_resistance: Some(Scenario {
                situation: "Your child refuses to read tonight.",
                script: "\"You get to decide how reading fits in today. Before bed or \
                         after snack, and which book?\"",
            }),
            screen_time_battles: None,
        },
    },
};

static COMPETENCE_BUILDER: ParentTypeDetails = ParentTypeDetails {
    key: ParentDnaType::CompetenceBuilder,
    name: "Competence Builder",
    emoji: "🧱",
    color: "#E8A33D",
    description: "You help your child feel capable. You break reading into achievable \
                  steps, notice progress and build skills with structure.",
    strengths: &[
        "Makes progress visible and motivating",
        "Provides clear, predictable structure",
        "Turns hard books into manageable steps",
    ],
    research_basis: "Competence is a core psychological need; mastery experiences drive \
                     reading self-efficacy (Bandura).",
    traits: &["skill_building", "structure", "achievement"],
    strategies: ParentStrategies {
        daily: &[
            "Set a small, specific reading goal and check it off together",
            "Praise a concrete skill: 'you sounded out that long word!'",
        ],
        weekly: &[
            "Track pages or minutes on a chart and celebrate milestones",
            "Pick one skill to practice this week, like reading with expression",
        ],
        scenarios: Scenarios {
            book_choice_struggles: Some(Scenario {
                situation: "Your child picks a book far above their level.",
                script: "\"Let's read the first page together and count tricky words. \
                         If there are more than five, we'll read it together.\"",
            }),
            reading_resistance: None,
            screen_time_battles: Some(Scenario {
                situation: "Screens keep winning over reading.",
                script: "\"Twenty minutes of reading unlocks your screen time. Let's set \
                         the timer and see how many pages you can do.\"",
            }),
        },
    },
};

static CONNECTION_CREATOR: ParentTypeDetails = ParentTypeDetails {
    key: ParentDnaType::ConnectionCreator,
    name: "Connection Creator",
    emoji: "🤗",
    color: "#D96C8A",
    description: "For you, reading is about togetherness. Shared stories, cuddles and \
                  conversations make books a way your family connects.",
    strengths: &[
        "Makes reading feel warm and safe",
        "Builds strong associations between books and belonging",
        "Keeps read-aloud alive beyond the early years",
    ],
    research_basis: "Relatedness and shared reading: joint book reading predicts \
                     engagement and vocabulary growth.",
    traits: &["shared_reading", "relationship", "emotional_connection"],
    strategies: ParentStrategies {
        daily: &[
            "Read aloud together for ten minutes, even with older kids",
            "Ask how a character made your child feel",
        ],
        weekly: &[
            "Start a two-person book club with your child",
            "Share a book from your own childhood",
        ],
        scenarios: Scenarios {
            book_choice_struggles: None,
            reading_resistance: Some(Scenario {
                situation: "Your child says reading is boring.",
                script: "\"How about we read it together? You read one page, I'll read \
                         the next.\"",
            }),
            screen_time_battles: Some(Scenario {
                situation: "Your child would rather watch a show.",
                script: "\"Let's find the book that show came from and read it side by \
                         side first.\"",
            }),
        },
    },
};

static MEANING_MAKER: ParentTypeDetails = ParentTypeDetails {
    key: ParentDnaType::MeaningMaker,
    name: "Meaning Maker",
    emoji: "💡",
    color: "#7A5CC4",
    description: "You help your child see why stories matter. You connect books to \
                  values, big questions and the world around them.",
    strengths: &[
        "Deepens comprehension through discussion",
        "Links reading to real life and values",
        "Raises thoughtful, reflective readers",
    ],
    research_basis: "Purpose and relevance increase engagement; dialogic reading builds \
                     comprehension and critical thinking.",
    traits: &["discussion", "values", "real_world_links"],
    strategies: ParentStrategies {
        daily: &[
            "Ask one open question about the story at dinner",
            "Point out when something in real life connects to a book",
        ],
        weekly: &[
            "Pick a book that ties into an upcoming trip or event",
            "Talk through a character's choice and what you would do",
        ],
        scenarios: Scenarios {
            book_choice_struggles: Some(Scenario {
                situation: "Your child only wants silly books.",
                script: "\"What makes this one so funny? Funny books can say big things \
                         too. Let's find out what this one is really about.\"",
            }),
            reading_resistance: None,
            screen_time_battles: None,
        },
    },
};

static GROWTH_FACILITATOR: ParentTypeDetails = ParentTypeDetails {
    key: ParentDnaType::GrowthFacilitator,
    name: "Growth Facilitator",
    emoji: "🌱",
    color: "#4CAF7A",
    description: "You champion effort over ease. You encourage your child to stretch, \
                  persist and see mistakes as part of becoming a reader.",
    strengths: &[
        "Builds resilience with challenging texts",
        "Normalises mistakes as learning",
        "Praises effort and strategy over talent",
    ],
    research_basis: "Growth mindset research (Dweck): process praise supports \
                     persistence on difficult reading.",
    traits: &["effort_praise", "persistence", "challenge"],
    strategies: ParentStrategies {
        daily: &[
            "Praise the strategy: 'you reread that part to understand it!'",
            "Share a time you struggled to read something",
        ],
        weekly: &[
            "Try one 'stretch' book alongside a comfortable one",
            "Reflect together on a reading challenge that got easier",
        ],
        scenarios: Scenarios {
            book_choice_struggles: None,
            reading_resistance: Some(Scenario {
                situation: "Your child gives up on a hard chapter.",
                script: "\"Hard means your brain is growing. Let's try one more page \
                         together, then decide.\"",
            }),
            screen_time_battles: Some(Scenario {
                situation: "Your child says games are more fun than books.",
                script: "\"Games get fun once you level up. Reading works the same way. \
                         Let's find your next level.\"",
            }),
        },
    },
};

static AUTHENTIC_MODELER: ParentTypeDetails = ParentTypeDetails {
    key: ParentDnaType::AuthenticModeler,
    name: "Authentic Modeler",
    emoji: "📚",
    color: "#3A8C8C",
    description: "You lead by example. Your child sees you reading, enjoying books and \
                  talking about them, and learns that readers are who your family is.",
    strengths: &[
        "Shows reading as a real, lifelong habit",
        "Shares genuine enthusiasm for books",
        "Creates a home where reading is normal",
    ],
    research_basis: "Social learning theory: children adopt behaviours they see valued \
                     and practised by adults they trust.",
    traits: &["modeling", "personal_reading", "enthusiasm"],
    strategies: ParentStrategies {
        daily: &[
            "Read your own book where your child can see you",
            "Mention something interesting you read today",
        ],
        weekly: &[
            "Visit the library together and pick books for yourself too",
            "Swap favourite passages at the weekend",
        ],
        scenarios: Scenarios {
            book_choice_struggles: Some(Scenario {
                situation: "Your child cannot find anything to read.",
                script: "\"When I'm stuck I reread an old favourite or ask a friend. \
                         Want to see what's on my list?\"",
            }),
            reading_resistance: None,
            screen_time_battles: Some(Scenario {
                situation: "The whole house drifts to screens in the evening.",
                script: "\"I'm putting my phone away to read for twenty minutes. \
                         Come join me.\"",
            }),
        },
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_type_resolves_to_its_own_details() {
        for t in ParentDnaType::ALL {
            let details = t.details();
            assert_eq!(details.key, t);
            assert!(!details.traits.is_empty());
            assert!(!t.family_activities().is_empty());
        }
    }

    #[test]
    fn test_trait_lists_do_not_overlap() {
        let mut seen = std::collections::HashSet::new();
        for t in ParentDnaType::ALL {
            for trait_name in t.details().traits {
                assert!(seen.insert(*trait_name), "duplicate trait {}", trait_name);
            }
        }
    }

    #[test]
    fn test_parse_round_trip() {
        for t in ParentDnaType::ALL {
            assert_eq!(t.as_str().parse::<ParentDnaType>().unwrap(), t);
        }
        assert!("tiger_parent".parse::<ParentDnaType>().is_err());
    }

    #[test]
    fn test_missing_scenarios_are_skipped_when_serialized() {
        let json = serde_json::to_value(ParentDnaType::MeaningMaker.details()).unwrap();
        let scenarios = &json["strategies"]["scenarios"];
        assert!(scenarios.get("book_choice_struggles").is_some());
        assert!(scenarios.get("reading_resistance").is_none());
    }
}
