// src/dna/child_types.rs

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::UnknownKey;

/// The six base reading-DNA types a child can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChildDnaType {
    CreativeExplorer,
    CuriousInvestigator,
    SocialConnector,
    ChallengeSeeker,
    FreedomReader,
    ReflectiveThinker,
}

impl ChildDnaType {
    pub const ALL: [ChildDnaType; 6] = [
        ChildDnaType::CreativeExplorer,
        ChildDnaType::CuriousInvestigator,
        ChildDnaType::SocialConnector,
        ChildDnaType::ChallengeSeeker,
        ChildDnaType::FreedomReader,
        ChildDnaType::ReflectiveThinker,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ChildDnaType::CreativeExplorer => "creative_explorer",
            ChildDnaType::CuriousInvestigator => "curious_investigator",
            ChildDnaType::SocialConnector => "social_connector",
            ChildDnaType::ChallengeSeeker => "challenge_seeker",
            ChildDnaType::FreedomReader => "freedom_reader",
            ChildDnaType::ReflectiveThinker => "reflective_thinker",
        }
    }

    pub fn details(self) -> &'static ChildTypeDetails {
        match self {
            ChildDnaType::CreativeExplorer => &CHILD_TYPES[0],
            ChildDnaType::CuriousInvestigator => &CHILD_TYPES[1],
            ChildDnaType::SocialConnector => &CHILD_TYPES[2],
            ChildDnaType::ChallengeSeeker => &CHILD_TYPES[3],
            ChildDnaType::FreedomReader => &CHILD_TYPES[4],
            ChildDnaType::ReflectiveThinker => &CHILD_TYPES[5],
        }
    }
}

impl fmt::Display for ChildDnaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChildDnaType {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChildDnaType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownKey(s.to_string()))
    }
}

#[derive(Debug, Serialize)]
pub struct ChildTypeDetails {
    pub key: ChildDnaType,
    pub name: &'static str,
    pub emoji: &'static str,
    pub color: &'static str,
    pub description: &'static str,
    /// What tends to make this child want to read.
    pub motivators: &'static [&'static str],
    /// General guidance for any parent of this type.
    pub parent_tips: &'static [&'static str],
}

static CHILD_TYPES: [ChildTypeDetails; 6] = [
    ChildTypeDetails {
        key: ChildDnaType::CreativeExplorer,
        name: "Creative Explorer",
        emoji: "🎨",
        color: "#F2994A",
        description: "Reads to imagine. Loves fantasy, invented worlds and turning stories \
                      into drawings, games and new tales.",
        motivators: &["Imaginative worlds", "Creative responses", "Open-ended stories"],
        parent_tips: &[
            "Invite drawings, comics or alternate endings after reading",
            "Leave room for daydreaming about the story",
        ],
    },
    ChildTypeDetails {
        key: ChildDnaType::CuriousInvestigator,
        name: "Curious Investigator",
        emoji: "🔍",
        color: "#2D9CDB",
        description: "Reads to find out. Devours facts, mysteries and how-things-work books \
                      and asks endless questions.",
        motivators: &["Facts and discovery", "Mysteries", "Answering real questions"],
        parent_tips: &[
            "Follow a question into a nonfiction book together",
            "Treat 'why?' as an invitation to look it up",
        ],
    },
    ChildTypeDetails {
        key: ChildDnaType::SocialConnector,
        name: "Social Connector",
        emoji: "👫",
        color: "#EB5757",
        description: "Reads to connect. Enjoys talking about books, reading with friends \
                      and stories about relationships.",
        motivators: &["Reading with others", "Talking about books", "Relatable characters"],
        parent_tips: &[
            "Set up buddy reading with a sibling, friend or you",
            "Ask who they would recommend the book to",
        ],
    },
    ChildTypeDetails {
        key: ChildDnaType::ChallengeSeeker,
        name: "Challenge Seeker",
        emoji: "🏆",
        color: "#9B51E0",
        description: "Reads to conquer. Motivated by goals, streaks, harder books and \
                      proving what they can do.",
        motivators: &["Goals and streaks", "Harder books", "Visible progress"],
        parent_tips: &[
            "Set stretch goals and celebrate when they are met",
            "Offer a 'boss level' book once a goal is reached",
        ],
    },
    ChildTypeDetails {
        key: ChildDnaType::FreedomReader,
        name: "Freedom Reader",
        emoji: "🦋",
        color: "#27AE60",
        description: "Reads on their own terms. Needs choice over what, when and how, and \
                      pushes back against assigned reading.",
        motivators: &["Choice", "Self-paced reading", "Unusual formats"],
        parent_tips: &[
            "Offer choices instead of assignments",
            "Count comics, audiobooks and magazines as real reading",
        ],
    },
    ChildTypeDetails {
        key: ChildDnaType::ReflectiveThinker,
        name: "Reflective Thinker",
        emoji: "🌙",
        color: "#56CCF2",
        description: "Reads to understand. Takes time, notices feelings and meaning, and \
                      prefers quiet, deep reading.",
        motivators: &["Quiet time", "Meaningful stories", "Room to think"],
        parent_tips: &[
            "Protect calm, unhurried reading time",
            "Ask wondering questions and wait for the answer",
        ],
    },
];

/// Single-letter refinements layered on a child's base type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Modifier {
    #[serde(rename = "A")]
    Anxious,
    #[serde(rename = "E")]
    Emerging,
    #[serde(rename = "S")]
    Social,
    #[serde(rename = "F")]
    Focus,
    #[serde(rename = "I")]
    Independent,
    #[serde(rename = "P")]
    Practical,
    #[serde(rename = "G")]
    Growth,
    #[serde(rename = "R")]
    Routine,
}

impl Modifier {
    pub const ALL: [Modifier; 8] = [
        Modifier::Anxious,
        Modifier::Emerging,
        Modifier::Social,
        Modifier::Focus,
        Modifier::Independent,
        Modifier::Practical,
        Modifier::Growth,
        Modifier::Routine,
    ];

    pub fn code(self) -> char {
        match self {
            Modifier::Anxious => 'A',
            Modifier::Emerging => 'E',
            Modifier::Social => 'S',
            Modifier::Focus => 'F',
            Modifier::Independent => 'I',
            Modifier::Practical => 'P',
            Modifier::Growth => 'G',
            Modifier::Routine => 'R',
        }
    }

    pub fn from_code(code: char) -> Option<Modifier> {
        let code = code.to_ascii_uppercase();
        Modifier::ALL.into_iter().find(|m| m.code() == code)
    }

    pub fn details(self) -> &'static ModifierDetails {
        match self {
            Modifier::Anxious => &MODIFIERS[0],
            Modifier::Emerging => &MODIFIERS[1],
            Modifier::Social => &MODIFIERS[2],
            Modifier::Focus => &MODIFIERS[3],
            Modifier::Independent => &MODIFIERS[4],
            Modifier::Practical => &MODIFIERS[5],
            Modifier::Growth => &MODIFIERS[6],
            Modifier::Routine => &MODIFIERS[7],
        }
    }
}

/// Named single-topic tips a modifier can contribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipFocus {
    Social,
    Confidence,
    Focus,
    Independence,
    Practical,
    Growth,
    Routine,
}

#[derive(Debug, Serialize)]
pub struct ModifierDetails {
    pub code: Modifier,
    pub name: &'static str,
    pub description: &'static str,
    /// Appended to a compatibility bundle's tips.
    pub strategies: &'static [&'static str],
    pub focused_tips: &'static [(TipFocus, &'static str)],
    /// Things to say, appended to a compatibility bundle's phrases.
    pub phrases: &'static [&'static str],
}

static MODIFIERS: [ModifierDetails; 8] = [
    ModifierDetails {
        code: Modifier::Anxious,
        name: "Anxious Reader",
        description: "Worries about getting it wrong or reading aloud in front of others.",
        strategies: &[
            "Keep reading low-pressure: no quizzing right after a chapter",
            "Let them rehearse a passage privately before reading it aloud",
        ],
        focused_tips: &[(
            TipFocus::Confidence,
            "Celebrate attempts, not accuracy, and model making mistakes yourself",
        )],
        phrases: &["\"It's fine to get words wrong. That's how reading grows.\""],
    },
    ModifierDetails {
        code: Modifier::Emerging,
        name: "Emerging Reader",
        description: "Still building decoding fluency; stamina and confidence are growing.",
        strategies: &[
            "Choose high-interest books at a comfortable level",
            "Echo-read: you read a line, they read it back",
        ],
        focused_tips: &[
            (
                TipFocus::Confidence,
                "Reread favourite books; fluency on familiar text builds confidence",
            ),
            (TipFocus::Practical, "Keep sessions short and frequent rather than long"),
        ],
        phrases: &["\"Let's read this one again. You sounded great last time.\""],
    },
    ModifierDetails {
        code: Modifier::Social,
        name: "Social Reader",
        description: "Energised by reading with and talking to other people.",
        strategies: &[
            "Arrange buddy reading with a sibling or friend",
            "Let them tell you about the book instead of writing about it",
        ],
        focused_tips: &[(
            TipFocus::Social,
            "Look for library book clubs or reading groups for their age",
        )],
        phrases: &["\"Who would you like to tell about this book?\""],
    },
    ModifierDetails {
        code: Modifier::Focus,
        name: "Focus Seeker",
        description: "Attention drifts easily; short, active reading works best.",
        strategies: &[
            "Use a timer for short reading bursts with movement breaks",
            "Try audiobooks paired with the print copy",
        ],
        focused_tips: &[(
            TipFocus::Focus,
            "Reduce distractions: one quiet spot, screens out of sight",
        )],
        phrases: &["\"Let's do five minutes, then a stretch break.\""],
    },
    ModifierDetails {
        code: Modifier::Independent,
        name: "Independent Reader",
        description: "Prefers to read alone and make their own decisions about books.",
        strategies: &[
            "Give them a shelf or bin they curate themselves",
            "Check in about books without turning it into a report",
        ],
        focused_tips: &[(
            TipFocus::Independence,
            "Let them set their own reading goals and track them privately",
        )],
        phrases: &["\"You pick. Tell me about it only if you want to.\""],
    },
    ModifierDetails {
        code: Modifier::Practical,
        name: "Practical Reader",
        description: "Wants reading to be useful: instructions, facts, real-world payoff.",
        strategies: &[
            "Offer manuals, recipes and how-to books as real reading",
            "Connect reading to a project they care about",
        ],
        focused_tips: &[(
            TipFocus::Practical,
            "Show how reading helps with something they want to do this week",
        )],
        phrases: &["\"What could we make or do with what you just read?\""],
    },
    ModifierDetails {
        code: Modifier::Growth,
        name: "Growth Reader",
        description: "Responds to challenge and likes seeing themselves improve.",
        strategies: &[
            "Introduce one slightly harder book alongside easy favourites",
            "Keep a log of books finished so progress is visible",
        ],
        focused_tips: &[(
            TipFocus::Growth,
            "Praise strategies they used on hard passages, not just finishing",
        )],
        phrases: &["\"That part was tricky. What did you do to figure it out?\""],
    },
    ModifierDetails {
        code: Modifier::Routine,
        name: "Routine Reader",
        description: "Thrives on predictable reading times and rituals.",
        strategies: &[
            "Anchor reading to the same time each day",
            "Build a small ritual around starting a book",
        ],
        focused_tips: &[(
            TipFocus::Routine,
            "Protect the reading slot even on busy days, even if it is five minutes",
        )],
        phrases: &["\"It's our reading time. Same spot as always?\""],
    },
];

/// An ordered set of modifiers. Duplicates are dropped keeping the first
/// occurrence; input order is preserved for display and tip concatenation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Modifier>")]
pub struct ModifierSet(Vec<Modifier>);

impl ModifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a string of modifier letters such as `"SF"`. Unknown letters
    /// and separators are ignored.
    pub fn parse_codes(codes: &str) -> Self {
        codes.chars().filter_map(Modifier::from_code).collect()
    }

    pub fn insert(&mut self, modifier: Modifier) -> bool {
        if self.0.contains(&modifier) {
            return false;
        }
        self.0.push(modifier);
        true
    }

    pub fn contains(&self, modifier: Modifier) -> bool {
        self.0.contains(&modifier)
    }

    pub fn iter(&self) -> impl Iterator<Item = Modifier> + '_ {
        self.0.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Letters in input order, e.g. `"SF"`.
    pub fn codes(&self) -> String {
        self.0.iter().map(|m| m.code()).collect()
    }
}

impl FromIterator<Modifier> for ModifierSet {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        let mut set = ModifierSet::new();
        for m in iter {
            set.insert(m);
        }
        set
    }
}

impl From<Vec<Modifier>> for ModifierSet {
    fn from(modifiers: Vec<Modifier>) -> Self {
        modifiers.into_iter().collect()
    }
}

/// A child's reading DNA as recorded by the student side of the app.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingDna {
    #[serde(rename = "type")]
    pub dna_type: Option<ChildDnaType>,
    #[serde(default)]
    pub modifiers: ModifierSet,
}

impl ReadingDna {
    pub fn new(dna_type: ChildDnaType, modifiers: ModifierSet) -> Self {
        Self {
            dna_type: Some(dna_type),
            modifiers,
        }
    }

    /// Builds a reading DNA from stored column values. An unrecognised type
    /// key yields `dna_type: None` rather than an error.
    pub fn from_stored(type_key: Option<&str>, modifier_codes: Option<&str>) -> Self {
        let dna_type = type_key.and_then(|key| match key.parse::<ChildDnaType>() {
            Ok(t) => Some(t),
            Err(e) => {
                tracing::warn!("Ignoring stored reading DNA: {}", e);
                None
            }
        });
        Self {
            dna_type,
            modifiers: modifier_codes.map(ModifierSet::parse_codes).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_set_drops_duplicates_and_keeps_order() {
        let set = ModifierSet::parse_codes("SFSA");
        assert_eq!(set.codes(), "SFA");
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_parse_codes_ignores_unknown_letters() {
        let set = ModifierSet::parse_codes("s-x,G");
        assert_eq!(set.codes(), "SG");
    }

    #[test]
    fn test_modifier_set_deserialize_dedupes() {
        let set: ModifierSet = serde_json::from_str(r#"["R","R","I"]"#).unwrap();
        assert_eq!(set.codes(), "RI");
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["R","I"]"#);
    }

    #[test]
    fn test_every_modifier_has_strategies() {
        for m in Modifier::ALL {
            assert_eq!(m.details().code, m);
            assert!(!m.details().strategies.is_empty());
            assert_eq!(Modifier::from_code(m.code()), Some(m));
        }
    }

    #[test]
    fn test_from_stored_tolerates_unknown_type() {
        let dna = ReadingDna::from_stored(Some("dragon_rider"), Some("S"));
        assert_eq!(dna.dna_type, None);
        assert_eq!(dna.modifiers.codes(), "S");

        let dna = ReadingDna::from_stored(Some("freedom_reader"), None);
        assert_eq!(dna.dna_type, Some(ChildDnaType::FreedomReader));
        assert!(dna.modifiers.is_empty());
    }

    #[test]
    fn test_child_details_match_keys() {
        for t in ChildDnaType::ALL {
            assert_eq!(t.details().key, t);
        }
    }
}
