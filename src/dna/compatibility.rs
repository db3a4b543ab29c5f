// src/dna/compatibility.rs

use std::{
    collections::{BTreeMap, HashMap},
    sync::LazyLock,
};

use serde::{Deserialize, Serialize};

use super::{ChildDnaType, Modifier, ModifierSet, ParentDnaType, TipFocus};

/// How well a parent style and a child type are expected to work together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CompatibilityLevel {
    #[serde(rename = "Excellent Match")]
    Excellent,
    #[serde(rename = "Strong Match")]
    Strong,
    #[serde(rename = "Good Match")]
    Good,
    #[serde(rename = "Growing Together")]
    GrowingTogether,
}

impl CompatibilityLevel {
    pub const ALL: [CompatibilityLevel; 4] = [
        CompatibilityLevel::Excellent,
        CompatibilityLevel::Strong,
        CompatibilityLevel::Good,
        CompatibilityLevel::GrowingTogether,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CompatibilityLevel::Excellent => "Excellent Match",
            CompatibilityLevel::Strong => "Strong Match",
            CompatibilityLevel::Good => "Good Match",
            CompatibilityLevel::GrowingTogether => "Growing Together",
        }
    }

    /// Color token used by clients to badge the level.
    pub fn color(self) -> &'static str {
        match self {
            CompatibilityLevel::Excellent => "#27AE60",
            CompatibilityLevel::Strong => "#2D9CDB",
            CompatibilityLevel::Good => "#F2C94C",
            CompatibilityLevel::GrowingTogether => "#F2994A",
        }
    }
}

/// Story of how a pairing tends to play out.
#[derive(Debug, Serialize)]
pub struct Narrative {
    pub honeymoon_phase: &'static str,
    pub tension_points: &'static str,
    pub clash_quote: &'static str,
    pub navigation: &'static str,
    pub growth_opportunity: &'static str,
}

/// Hand-authored entry of the enhanced compatibility matrix.
#[derive(Debug)]
pub struct CompatibilityEntry {
    pub parent: ParentDnaType,
    pub child: ChildDnaType,
    pub level: CompatibilityLevel,
    pub strengths: &'static [&'static str],
    pub considerations: &'static [&'static str],
    pub narrative: Narrative,
    pub strategies: &'static [&'static str],
    pub phrases: &'static [&'static str],
}

/// Entry of the older, shorter compatibility table.
#[derive(Debug)]
pub struct LegacyEntry {
    pub parent: ParentDnaType,
    pub child: ChildDnaType,
    pub level: CompatibilityLevel,
    pub strengths: &'static [&'static str],
    pub considerations: &'static [&'static str],
    pub tips: &'static [&'static str],
}

/// Which table an insight bundle was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightSource {
    Enhanced,
    Legacy,
    Generic,
}

/// Resolved compatibility guidance for one parent/child pairing.
#[derive(Debug, Clone, Serialize)]
pub struct CompatibilityInsights {
    pub level: CompatibilityLevel,
    pub level_color: &'static str,
    pub source: InsightSource,
    pub strengths: Vec<String>,
    pub considerations: Vec<String>,
    pub tips: Vec<String>,
    pub phrases: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrative: Option<&'static Narrative>,
    /// Pairing-specific strategies. Only enhanced entries carry them.
    pub key_strategies: Option<Vec<String>>,
    /// Topic tips contributed by modifiers, every contribution kept in
    /// modifier order.
    pub focused_tips: BTreeMap<TipFocus, Vec<String>>,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl CompatibilityInsights {
    fn base(level: CompatibilityLevel, source: InsightSource) -> Self {
        Self {
            level,
            level_color: level.color(),
            source,
            strengths: Vec::new(),
            considerations: Vec::new(),
            tips: Vec::new(),
            phrases: Vec::new(),
            narrative: None,
            key_strategies: None,
            focused_tips: BTreeMap::new(),
        }
    }

    fn from_enhanced(entry: &'static CompatibilityEntry) -> Self {
        Self {
            strengths: owned(entry.strengths),
            considerations: owned(entry.considerations),
            tips: owned(entry.strategies),
            phrases: owned(entry.phrases),
            narrative: Some(&entry.narrative),
            key_strategies: Some(owned(entry.strategies)),
            ..Self::base(entry.level, InsightSource::Enhanced)
        }
    }

    fn from_legacy(entry: &'static LegacyEntry) -> Self {
        Self {
            strengths: owned(entry.strengths),
            considerations: owned(entry.considerations),
            tips: owned(entry.tips),
            ..Self::base(entry.level, InsightSource::Legacy)
        }
    }

    fn generic(child: ChildDnaType) -> Self {
        let mut tips = owned(GENERIC_TIPS);
        tips.extend(owned(child.details().parent_tips));
        Self {
            strengths: owned(GENERIC_STRENGTHS),
            considerations: owned(GENERIC_CONSIDERATIONS),
            tips,
            ..Self::base(CompatibilityLevel::GrowingTogether, InsightSource::Generic)
        }
    }

    /// Appends a modifier's strategies, phrases and focused tips. Never
    /// removes anything already present.
    fn apply_modifier(&mut self, modifier: Modifier) {
        let details = modifier.details();
        self.tips.extend(owned(details.strategies));
        self.phrases.extend(owned(details.phrases));
        for (focus, tip) in details.focused_tips {
            self.focused_tips
                .entry(*focus)
                .or_default()
                .push(tip.to_string());
        }
    }
}

/// Outcome of looking a pairing up in the static tables.
pub enum MatrixLookup {
    Enhanced(&'static CompatibilityEntry),
    Legacy(&'static LegacyEntry),
    Missing,
}

static ENHANCED_INDEX: LazyLock<HashMap<(ParentDnaType, ChildDnaType), &'static CompatibilityEntry>> =
    LazyLock::new(|| ENHANCED_MATRIX.iter().map(|e| ((e.parent, e.child), e)).collect());

static LEGACY_INDEX: LazyLock<HashMap<(ParentDnaType, ChildDnaType), &'static LegacyEntry>> =
    LazyLock::new(|| LEGACY_MATRIX.iter().map(|e| ((e.parent, e.child), e)).collect());

pub fn lookup(parent: ParentDnaType, child: ChildDnaType) -> MatrixLookup {
    if let Some(entry) = ENHANCED_INDEX.get(&(parent, child)).copied() {
        return MatrixLookup::Enhanced(entry);
    }
    if let Some(entry) = LEGACY_INDEX.get(&(parent, child)).copied() {
        return MatrixLookup::Legacy(entry);
    }
    MatrixLookup::Missing
}

/// Resolves compatibility guidance for a parent type and a child type.
///
/// Always returns a bundle:
/// * enhanced matrix entry when one exists,
/// * otherwise the legacy table entry,
/// * otherwise a generic "Growing Together" bundle.
///
/// Each modifier is then applied in the order given, appending its
/// strategies to `tips`, its phrases to `phrases` and its focused tips to
/// `focused_tips`.
pub fn get_compatibility_insights(
    parent: ParentDnaType,
    child: ChildDnaType,
    modifiers: &ModifierSet,
) -> CompatibilityInsights {
    let mut insights = match lookup(parent, child) {
        MatrixLookup::Enhanced(entry) => CompatibilityInsights::from_enhanced(entry),
        MatrixLookup::Legacy(entry) => CompatibilityInsights::from_legacy(entry),
        MatrixLookup::Missing => {
            tracing::debug!("No compatibility entry for {}/{}, using generic", parent, child);
            CompatibilityInsights::generic(child)
        }
    };

    for modifier in modifiers.iter() {
        insights.apply_modifier(modifier);
    }

    insights
}

const GENERIC_STRENGTHS: &[&str] = &[
    "Every parent-child pairing brings its own strengths to discover",
    "Your interest in how your child reads is already a powerful support",
];

const GENERIC_CONSIDERATIONS: &[&str] = &[
    "Your natural style and your child's preferences may differ at times",
    "Notice what lights your child up and lean into it",
];

const GENERIC_TIPS: &[&str] = &[
    "Ask your child what makes a book great for them",
    "Try one new reading routine together for a week and reflect",
];

static ENHANCED_MATRIX: [CompatibilityEntry; 12] = [
    CompatibilityEntry {
        parent: ParentDnaType::AutonomySupporter,
        child: ChildDnaType::FreedomReader,
        level: CompatibilityLevel::Excellent,
        strengths: &[
            "You naturally give the choice your child craves",
            "Reading stays theirs, which keeps motivation high",
        ],
        considerations: &[
            "Too much hands-off can leave gaps in challenge",
            "Your child may still need help discovering new genres",
        ],
        narrative: Narrative {
            honeymoon_phase: "Reading feels effortless at home: your child picks, you cheer, \
                              nobody argues.",
            tension_points: "Reading can drift into the same comfortable series for months.",
            clash_quote: "\"You said I could read whatever I want!\"",
            navigation: "Keep the choice, widen the menu: offer a curated basket and let them \
                         pick from it.",
            growth_opportunity: "Help your child learn to choose well, not just choose freely.",
        },
        strategies: &[
            "Offer a 'choice basket' of three books you have pre-selected",
            "Let them set the reading time and hold them to it gently",
            "Introduce new genres as options, never assignments",
        ],
        phrases: &[
            "\"What are you in the mood for?\"",
            "\"Want to try one of these, or stick with your series?\"",
        ],
    },
    CompatibilityEntry {
        parent: ParentDnaType::AutonomySupporter,
        child: ChildDnaType::CreativeExplorer,
        level: CompatibilityLevel::Strong,
        strengths: &[
            "You give imaginative readers room to roam",
            "Open-ended choice feeds creative responses",
        ],
        considerations: &["Creative explorers sometimes need a nudge to finish books"],
        narrative: Narrative {
            honeymoon_phase: "Your child's imagination flourishes with the freedom you give.",
            tension_points: "Half-finished books pile up as new ideas take over.",
            clash_quote: "\"I don't want to finish it, I want to make my own ending!\"",
            navigation: "Celebrate the invented ending, then read the real one together to \
                         compare.",
            growth_opportunity: "Channel creative energy into sticking with a story.",
        },
        strategies: &[
            "Invite an alternate ending after they finish the real one",
            "Let them choose a creative project tied to each finished book",
            "Keep art supplies near the reading spot",
        ],
        phrases: &["\"How would you have written that part?\""],
    },
    CompatibilityEntry {
        parent: ParentDnaType::AutonomySupporter,
        child: ChildDnaType::ChallengeSeeker,
        level: CompatibilityLevel::Good,
        strengths: &["Your child gets to set their own ambitious goals"],
        considerations: &[
            "Challenge seekers want structure and targets you may not naturally offer",
            "Without feedback they may lose momentum",
        ],
        narrative: Narrative {
            honeymoon_phase: "Your child thrives on setting their own big reading targets.",
            tension_points: "They want you to track and celebrate; you'd rather step back.",
            clash_quote: "\"Aren't you going to check how many pages I read?\"",
            navigation: "Let them design the challenge and ask you to be the scorekeeper.",
            growth_opportunity: "Learn to give recognition without taking control.",
        },
        strategies: &[
            "Let your child design a reading challenge and you track it",
            "Celebrate milestones they chose",
            "Offer 'level up' books as optional next steps",
        ],
        phrases: &["\"What's your goal this week? Want me to keep score?\""],
    },
    CompatibilityEntry {
        parent: ParentDnaType::CompetenceBuilder,
        child: ChildDnaType::ChallengeSeeker,
        level: CompatibilityLevel::Excellent,
        strengths: &[
            "Your structure matches your child's love of goals",
            "Visible progress keeps you both motivated",
        ],
        considerations: &["Watch that reading doesn't become only about numbers"],
        narrative: Narrative {
            honeymoon_phase: "Charts, goals and milestones: you speak the same language.",
            tension_points: "Pages read can start to matter more than enjoyment.",
            clash_quote: "\"I read fifty pages, do I get the reward now?\"",
            navigation: "Mix in goals about enjoyment and discovery, not only volume.",
            growth_opportunity: "Show your child that skill growth includes loving what you read.",
        },
        strategies: &[
            "Set mixed goals: one for pages, one for trying something new",
            "Celebrate skills gained, not only books finished",
            "Let your child pick the reward for big milestones",
        ],
        phrases: &[
            "\"Which skill did you level up this week?\"",
            "\"What was your favourite part of that challenge?\"",
        ],
    },
    CompatibilityEntry {
        parent: ParentDnaType::CompetenceBuilder,
        child: ChildDnaType::FreedomReader,
        level: CompatibilityLevel::GrowingTogether,
        strengths: &["Your structure can help a free spirit build real stamina"],
        considerations: &[
            "Your child resists assigned reading and plans",
            "Charts and levels can feel like control to them",
        ],
        narrative: Narrative {
            honeymoon_phase: "Early plans feel helpful and your child enjoys the new routine.",
            tension_points: "Your child starts pushing back on every goal you set.",
            clash_quote: "\"Why do I have to read what's on the list?\"",
            navigation: "Keep the skills focus but hand the choices over: they pick the book, \
                         you support the skill.",
            growth_opportunity: "Discover how structure can serve freedom rather than fight it.",
        },
        strategies: &[
            "Let your child set the goal and you design the support",
            "Count any format toward progress: comics, audio, magazines",
            "Replace 'you must' with 'which would you like?'",
        ],
        phrases: &["\"You choose the book, I'll help you crush it.\""],
    },
    CompatibilityEntry {
        parent: ParentDnaType::ConnectionCreator,
        child: ChildDnaType::SocialConnector,
        level: CompatibilityLevel::Excellent,
        strengths: &[
            "Shared reading is exactly what your child loves",
            "Book talk becomes family bonding time",
        ],
        considerations: &["Make room for your child's friends as reading partners too"],
        narrative: Narrative {
            honeymoon_phase: "Read-alouds, book chats and cozy evenings feel natural for you both.",
            tension_points: "Your child may not want to read alone at all.",
            clash_quote: "\"I only like reading when you do it with me.\"",
            navigation: "Keep the togetherness and gradually add independent stretches with a \
                         chat afterwards.",
            growth_opportunity: "Build solo reading confidence while keeping the connection.",
        },
        strategies: &[
            "Alternate pages when reading together",
            "Read the same book separately and meet to talk",
            "Invite a friend over for a reading playdate",
        ],
        phrases: &[
            "\"Read to this bookmark and then tell me everything!\"",
            "\"Who else would love this book?\"",
        ],
    },
    CompatibilityEntry {
        parent: ParentDnaType::ConnectionCreator,
        child: ChildDnaType::ReflectiveThinker,
        level: CompatibilityLevel::Strong,
        strengths: &[
            "Your warmth gives a thoughtful reader a safe space",
            "Quiet shared reading suits you both",
        ],
        considerations: &["Your child may need more quiet than conversation"],
        narrative: Narrative {
            honeymoon_phase: "Calm evenings reading side by side feel close and peaceful.",
            tension_points: "You want to talk about the book; your child wants to sit with it.",
            clash_quote: "\"Can we talk about it tomorrow?\"",
            navigation: "Offer connection without pressure: sit together and let talk come \
                         later.",
            growth_opportunity: "Learn that silence can be connection too.",
        },
        strategies: &[
            "Read silently side by side",
            "Leave a sticky-note question in the book instead of asking aloud",
            "Wait a day before discussing a big story",
        ],
        phrases: &["\"I'm here whenever you want to talk about it.\""],
    },
    CompatibilityEntry {
        parent: ParentDnaType::MeaningMaker,
        child: ChildDnaType::CuriousInvestigator,
        level: CompatibilityLevel::Strong,
        strengths: &[
            "Your big questions feed your child's curiosity",
            "You help facts connect to meaning",
        ],
        considerations: &["Your child may want the facts before the lesson"],
        narrative: Narrative {
            honeymoon_phase: "Dinner turns into lively 'why' conversations.",
            tension_points: "You steer toward the lesson; they want more facts.",
            clash_quote: "\"I don't care what it means, I want to know how it works!\"",
            navigation: "Follow their question first, then wonder aloud about why it matters.",
            growth_opportunity: "Let curiosity lead you both to meaning.",
        },
        strategies: &[
            "Start from your child's question and find a book that answers it",
            "Ask 'why do you think that matters?' after the facts are in",
            "Connect nonfiction to places you can visit",
        ],
        phrases: &["\"Great question. Let's find out, then decide what we think.\""],
    },
    CompatibilityEntry {
        parent: ParentDnaType::MeaningMaker,
        child: ChildDnaType::ReflectiveThinker,
        level: CompatibilityLevel::Excellent,
        strengths: &[
            "You both love the deeper side of stories",
            "Thoughtful conversations come naturally",
        ],
        considerations: &["Leave room for lighter reading too"],
        narrative: Narrative {
            honeymoon_phase: "Stories become long, meaningful conversations.",
            tension_points: "Every book can start to feel like homework about big ideas.",
            clash_quote: "\"Can't a book just be fun?\"",
            navigation: "Balance deep books with light ones and let some stories stay unanalysed.",
            growth_opportunity: "Model that meaning and joy can live in the same book.",
        },
        strategies: &[
            "Alternate a thoughtful book with a purely fun one",
            "Ask one wondering question, not five",
            "Journal together about a favourite character",
        ],
        phrases: &["\"What stayed with you from that story?\""],
    },
    CompatibilityEntry {
        parent: ParentDnaType::GrowthFacilitator,
        child: ChildDnaType::ChallengeSeeker,
        level: CompatibilityLevel::Excellent,
        strengths: &[
            "You both love a stretch",
            "Effort is celebrated, so setbacks don't derail",
        ],
        considerations: &["Make sure comfort reading still has a place"],
        narrative: Narrative {
            honeymoon_phase: "Hard books become exciting quests you tackle together.",
            tension_points: "Constant challenge can burn out even eager readers.",
            clash_quote: "\"I'm tired of hard books!\"",
            navigation: "Schedule easy 'rest' books between the big climbs.",
            growth_opportunity: "Teach that rest is part of growth.",
        },
        strategies: &[
            "Pair every stretch book with a comfort read",
            "Praise the strategy used on hard passages",
            "Keep a 'books I conquered' list",
        ],
        phrases: &["\"That was tough, and you figured it out. How?\""],
    },
    CompatibilityEntry {
        parent: ParentDnaType::GrowthFacilitator,
        child: ChildDnaType::ReflectiveThinker,
        level: CompatibilityLevel::Good,
        strengths: &["Your patience with effort suits a careful reader"],
        considerations: &[
            "Your child's slower pace is depth, not struggle",
            "Push for challenge can feel like pressure",
        ],
        narrative: Narrative {
            honeymoon_phase: "Your encouragement gives a quiet reader confidence.",
            tension_points: "You see room to stretch; they want time to savour.",
            clash_quote: "\"I'm not done thinking about this one yet.\"",
            navigation: "Frame growth as depth: rereading and reflecting count as stretching.",
            growth_opportunity: "Broaden what 'growth' means in your family.",
        },
        strategies: &[
            "Celebrate rereading as a skill",
            "Ask about what they noticed, not how far they got",
            "Offer challenge in ideas rather than difficulty",
        ],
        phrases: &["\"Take your time. What are you noticing?\""],
    },
    CompatibilityEntry {
        parent: ParentDnaType::AuthenticModeler,
        child: ChildDnaType::CreativeExplorer,
        level: CompatibilityLevel::Strong,
        strengths: &[
            "Your visible love of books inspires an imaginative child",
            "You show that readers are creators too",
        ],
        considerations: &["Your tastes and theirs may differ a lot"],
        narrative: Narrative {
            honeymoon_phase: "Your child loves seeing you lost in a book and copies you.",
            tension_points: "Your favourites don't grab them the way you hoped.",
            clash_quote: "\"Your books are boring, mine have dragons.\"",
            navigation: "Share your enthusiasm for their books too, not only yours.",
            growth_opportunity: "Model curiosity about other people's reading tastes.",
        },
        strategies: &[
            "Read one of their favourites and talk about it genuinely",
            "Share what you're imagining while you read",
            "Write or draw alongside them after reading",
        ],
        phrases: &["\"Tell me about your dragons, and I'll tell you about my detective.\""],
    },
];

static LEGACY_MATRIX: [LegacyEntry; 8] = [
    LegacyEntry {
        parent: ParentDnaType::AutonomySupporter,
        child: ChildDnaType::CuriousInvestigator,
        level: CompatibilityLevel::Strong,
        strengths: &["You let curiosity lead the way"],
        considerations: &["Help your child find good sources for their questions"],
        tips: &["Keep a 'questions jar' and pick one to research together each week"],
    },
    LegacyEntry {
        parent: ParentDnaType::CompetenceBuilder,
        child: ChildDnaType::CuriousInvestigator,
        level: CompatibilityLevel::Strong,
        strengths: &["Your structure helps turn curiosity into real knowledge"],
        considerations: &["Don't let levels limit what topics they explore"],
        tips: &["Set research goals around topics they already love"],
    },
    LegacyEntry {
        parent: ParentDnaType::ConnectionCreator,
        child: ChildDnaType::FreedomReader,
        level: CompatibilityLevel::Good,
        strengths: &["Your warmth makes reading feel safe"],
        considerations: &["Your child may prefer to read alone sometimes"],
        tips: &["Offer read-alouds as an invitation, not a routine"],
    },
    LegacyEntry {
        parent: ParentDnaType::ConnectionCreator,
        child: ChildDnaType::ChallengeSeeker,
        level: CompatibilityLevel::Good,
        strengths: &["You make big reading goals feel like team efforts"],
        considerations: &["Your child may want recognition more than company"],
        tips: &["Celebrate finished challenges with a special reading date"],
    },
    LegacyEntry {
        parent: ParentDnaType::MeaningMaker,
        child: ChildDnaType::SocialConnector,
        level: CompatibilityLevel::Good,
        strengths: &["Book discussions suit your social reader"],
        considerations: &["Keep conversations playful rather than instructive"],
        tips: &["Host a family book chat with friends or cousins"],
    },
    LegacyEntry {
        parent: ParentDnaType::GrowthFacilitator,
        child: ChildDnaType::FreedomReader,
        level: CompatibilityLevel::GrowingTogether,
        strengths: &["You believe your child can grow as a reader"],
        considerations: &["Challenges you set may feel imposed"],
        tips: &["Invite your child to pick their own stretch goal"],
    },
    LegacyEntry {
        parent: ParentDnaType::AuthenticModeler,
        child: ChildDnaType::FreedomReader,
        level: CompatibilityLevel::Strong,
        strengths: &["You show reading as a free choice adults make too"],
        considerations: &["Avoid steering them toward your own favourites"],
        tips: &["Read near each other, each with your own book"],
    },
    LegacyEntry {
        parent: ParentDnaType::AuthenticModeler,
        child: ChildDnaType::ReflectiveThinker,
        level: CompatibilityLevel::Strong,
        strengths: &["Quiet, shared reading time suits you both"],
        considerations: &["Share your reflections to invite theirs"],
        tips: &["Tell your child something a book made you think about"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_pair_resolves_to_a_known_level() {
        for parent in ParentDnaType::ALL {
            for child in ChildDnaType::ALL {
                let insights = get_compatibility_insights(parent, child, &ModifierSet::new());
                assert!(CompatibilityLevel::ALL.contains(&insights.level));
                assert_eq!(insights.level_color, insights.level.color());
                assert!(!insights.tips.is_empty(), "{}/{} has no tips", parent, child);
            }
        }
    }

    #[test]
    fn test_three_tier_fallback() {
        let enhanced = get_compatibility_insights(
            ParentDnaType::AutonomySupporter,
            ChildDnaType::FreedomReader,
            &ModifierSet::new(),
        );
        assert_eq!(enhanced.source, InsightSource::Enhanced);
        assert_eq!(enhanced.level, CompatibilityLevel::Excellent);
        assert!(enhanced.narrative.is_some());
        assert!(enhanced.key_strategies.is_some());

        let legacy = get_compatibility_insights(
            ParentDnaType::CompetenceBuilder,
            ChildDnaType::CuriousInvestigator,
            &ModifierSet::new(),
        );
        assert_eq!(legacy.source, InsightSource::Legacy);
        assert!(legacy.narrative.is_none());
        assert!(legacy.key_strategies.is_none());

        let generic = get_compatibility_insights(
            ParentDnaType::GrowthFacilitator,
            ChildDnaType::SocialConnector,
            &ModifierSet::new(),
        );
        assert_eq!(generic.source, InsightSource::Generic);
        assert_eq!(generic.level, CompatibilityLevel::GrowingTogether);
    }

    #[test]
    fn test_no_pair_is_in_both_tables() {
        for e in &LEGACY_MATRIX {
            assert!(!ENHANCED_INDEX.contains_key(&(e.parent, e.child)));
        }
        assert_eq!(ENHANCED_INDEX.len(), ENHANCED_MATRIX.len());
        assert_eq!(LEGACY_INDEX.len(), LEGACY_MATRIX.len());
    }

    #[test]
    fn test_adding_a_modifier_only_appends_tips() {
        for parent in ParentDnaType::ALL {
            for child in ChildDnaType::ALL {
                let base = get_compatibility_insights(parent, child, &ModifierSet::parse_codes("S"));
                let more = get_compatibility_insights(parent, child, &ModifierSet::parse_codes("SG"));
                assert!(more.tips.len() > base.tips.len());
                assert_eq!(&more.tips[..base.tips.len()], &base.tips[..]);
            }
        }
    }

    #[test]
    fn test_modifier_phrases_follow_pairing_phrases_in_order() {
        let plain = get_compatibility_insights(
            ParentDnaType::ConnectionCreator,
            ChildDnaType::SocialConnector,
            &ModifierSet::new(),
        );
        let with = get_compatibility_insights(
            ParentDnaType::ConnectionCreator,
            ChildDnaType::SocialConnector,
            &ModifierSet::parse_codes("RA"),
        );

        let n = plain.phrases.len();
        assert_eq!(&with.phrases[..n], &plain.phrases[..]);
        assert_eq!(with.phrases[n], Modifier::Routine.details().phrases[0]);
        assert_eq!(with.phrases[n + 1], Modifier::Anxious.details().phrases[0]);
    }

    #[test]
    fn test_overlapping_focused_tips_are_all_kept() {
        // Anxious and Emerging both contribute a confidence tip.
        let insights = get_compatibility_insights(
            ParentDnaType::ConnectionCreator,
            ChildDnaType::SocialConnector,
            &ModifierSet::parse_codes("EA"),
        );
        let confidence = &insights.focused_tips[&TipFocus::Confidence];
        assert_eq!(confidence.len(), 2);
        assert!(confidence[0].starts_with("Reread"));
        assert!(insights.focused_tips.contains_key(&TipFocus::Practical));
    }

    #[test]
    fn test_level_serializes_as_label() {
        for level in CompatibilityLevel::ALL {
            assert_eq!(serde_json::to_value(level).unwrap(), level.label());
        }
    }
}
