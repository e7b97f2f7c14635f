//! Static inputs of a card list download: the classes to page through and the languages to fetch.

use std::fmt;

use clap::ValueEnum;

/// A card class (craft). The card list API pages each class separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CardClass(u8);

const CLASS_NAMES: [&str; 8] = [
    "Forestcraft",
    "Swordcraft",
    "Runecraft",
    "Dragoncraft",
    "Shadowcraft",
    "Bloodcraft",
    "Havencraft",
    "Portalcraft",
];

impl CardClass {
    /// Every class, in the ascending order the API is walked.
    pub const ALL: [CardClass; 8] = [
        CardClass(0),
        CardClass(1),
        CardClass(2),
        CardClass(3),
        CardClass(4),
        CardClass(5),
        CardClass(6),
        CardClass(7),
    ];

    pub fn new(id: u8) -> Option<Self> {
        (usize::from(id) < CLASS_NAMES.len()).then_some(CardClass(id))
    }

    pub fn id(self) -> u8 {
        self.0
    }

    pub fn name(self) -> &'static str {
        CLASS_NAMES[usize::from(self.0)]
    }
}

impl fmt::Display for CardClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Language of the card text. Sent both as a query parameter and as a `lang` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Lang {
    En,
    Cht,
}

impl Lang {
    pub const ALL: [Lang; 2] = [Lang::En, Lang::Cht];

    pub fn as_str(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Cht => "cht",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
