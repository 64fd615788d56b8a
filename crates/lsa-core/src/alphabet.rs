//! Ordered alphabets and the cyclic index space used for item shifting.
//!
//! Three named alphabets exist (Latin letters, Greek letter names, symbol
//! glyphs). Each task works against a fixed slice of the full ordered set so
//! that shifting stays meaningful; the slices are bundled as [`AlphabetSet`]
//! profiles. All lookups are by value equality on the exact symbol token.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, LsaError};

/// Latin letters used by the letter-string item pool. The pool is restricted
/// to `a..o` so items can be shifted two positions either way and still
/// mirror the sets administered to people.
const LATIN_ITEMS: &[&str] = &[
    "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o",
];

/// Full lowercase Latin alphabet (instruction lists, rule-check pool).
const LATIN_FULL: &[&str] = &[
    "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o", "p", "q", "r", "s",
    "t", "u", "v", "w", "x", "y", "z",
];

/// Greek letter names in canonical order.
const GREEK: &[&str] = &[
    "alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta", "iota", "kappa",
    "lambda", "mu", "nu", "xi", "omicron", "pi", "rho", "sigma", "tau", "upsilon", "phi", "chi",
    "psi", "omega",
];

/// Ordered symbol glyphs for the letter-string item pool (ASCII order).
const SYMBOL_ITEMS: &[&str] = &[
    "!", "#", "$", "%", "&", "(", ")", "*", "+", "-", ":", ";",
];

/// Symbol glyphs for the rule-check item pool.
const SYMBOL_RULECHECK_ITEMS: &[&str] = &[
    "*", "@", "%", "!", "^", "#", "~", "$", "{", "=", ":", ")", "|", "+", ";",
];

/// Symbol list shown in standard task instructions.
const SYMBOL_DISPLAY: &[&str] = &[
    "*", "@", "%", "!", "^", "#", "~", "$", "{", "=", ":", ")",
];

/// Extended symbol list shown in rule-check instructions.
const SYMBOL_RULECHECK_DISPLAY: &[&str] = &[
    "*", "@", "%", "!", "^", "#", "~", "$", "{", "=", ":", ")", "|", "+", ";", "\\", "(", "<",
    "-", "&", ">", "/",
];

/// Name of one of the three supported alphabets.
///
/// Serialized with the capitalized spelling used in the item files
/// (`Latin`, `Greek`, `Symbol`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlphabetName {
    /// Lowercase Latin letters.
    Latin,
    /// Greek letter names written out (`alpha`, `beta`, ...).
    Greek,
    /// Punctuation glyphs.
    Symbol,
}

impl AlphabetName {
    /// The fixed administration order of alphabets within a testlet.
    pub const ORDERED: [AlphabetName; 3] =
        [AlphabetName::Latin, AlphabetName::Greek, AlphabetName::Symbol];
}

impl fmt::Display for AlphabetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlphabetName::Latin => write!(f, "Latin"),
            AlphabetName::Greek => write!(f, "Greek"),
            AlphabetName::Symbol => write!(f, "Symbol"),
        }
    }
}

impl FromStr for AlphabetName {
    type Err = LsaError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Latin" => Ok(AlphabetName::Latin),
            "Greek" => Ok(AlphabetName::Greek),
            "Symbol" => Ok(AlphabetName::Symbol),
            other => Err(LsaError::Alphabet(
                ErrorInfo::new("alphabet.unknown-name", "unknown alphabet name")
                    .with_context("name", other)
                    .with_hint("expected Latin, Greek or Symbol"),
            )),
        }
    }
}

/// An ordered, finite, duplicate-free symbol sequence.
///
/// Index arithmetic is taken modulo the alphabet length, so the sequence is a
/// cyclic coordinate space: shifting past either end wraps around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alphabet {
    name: AlphabetName,
    symbols: &'static [&'static str],
}

impl Alphabet {
    fn new(name: AlphabetName, symbols: &'static [&'static str]) -> Self {
        Self { name, symbols }
    }

    /// The alphabet's name.
    pub fn name(&self) -> AlphabetName {
        self.name
    }

    /// Number of symbols in the cyclic index space.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the alphabet holds no symbols.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// The ordered symbol sequence.
    pub fn symbols(&self) -> &'static [&'static str] {
        self.symbols
    }

    /// Resolves a symbol to its position in the ordered sequence.
    ///
    /// Lookup is by value equality on the exact token (case-sensitive).
    /// A symbol outside the alphabet is a data-integrity fault for the item
    /// that referenced it.
    pub fn index_of(&self, symbol: &str) -> Result<usize, LsaError> {
        self.symbols
            .iter()
            .position(|candidate| *candidate == symbol)
            .ok_or_else(|| {
                LsaError::Alphabet(
                    ErrorInfo::new("alphabet.unknown-symbol", "symbol not in alphabet")
                        .with_context("alphabet", self.name.to_string())
                        .with_context("symbol", symbol),
                )
            })
    }

    /// Returns the symbol at `distance` cyclic positions from `symbol`.
    ///
    /// Any integer distance is accepted; the result index is reduced with
    /// floor-modulo semantics so it always lands in `[0, len)`.
    pub fn shifted(&self, symbol: &str, distance: i64) -> Result<&'static str, LsaError> {
        let index = self.index_of(symbol)? as i64;
        let len = self.symbols.len() as i64;
        let wrapped = (index + distance).rem_euclid(len) as usize;
        Ok(self.symbols[wrapped])
    }

    /// Space-joined symbol list, the form quoted in task instructions.
    pub fn joined(&self) -> String {
        self.symbols.join(" ")
    }
}

/// Registry supplying one [`Alphabet`] per name for a given task profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlphabetSet {
    latin: Alphabet,
    greek: Alphabet,
    symbol: Alphabet,
}

impl AlphabetSet {
    /// Item pool for the letter-string analogy task: Latin `a..o`, the full
    /// Greek order, and twelve ordered glyphs.
    pub fn items_letterstring() -> Self {
        Self {
            latin: Alphabet::new(AlphabetName::Latin, LATIN_ITEMS),
            greek: Alphabet::new(AlphabetName::Greek, GREEK),
            symbol: Alphabet::new(AlphabetName::Symbol, SYMBOL_ITEMS),
        }
    }

    /// Item pool for the rule-check task: the full Latin alphabet and a
    /// fifteen-glyph symbol list.
    pub fn items_rulecheck() -> Self {
        Self {
            latin: Alphabet::new(AlphabetName::Latin, LATIN_FULL),
            greek: Alphabet::new(AlphabetName::Greek, GREEK),
            symbol: Alphabet::new(AlphabetName::Symbol, SYMBOL_RULECHECK_ITEMS),
        }
    }

    /// Symbol lists quoted in standard task instructions. These are the
    /// lists shown to the model, not the shift space.
    pub fn display_standard() -> Self {
        Self {
            latin: Alphabet::new(AlphabetName::Latin, LATIN_FULL),
            greek: Alphabet::new(AlphabetName::Greek, GREEK),
            symbol: Alphabet::new(AlphabetName::Symbol, SYMBOL_DISPLAY),
        }
    }

    /// Symbol lists quoted in rule-check instructions.
    pub fn display_rulecheck() -> Self {
        Self {
            latin: Alphabet::new(AlphabetName::Latin, LATIN_FULL),
            greek: Alphabet::new(AlphabetName::Greek, GREEK),
            symbol: Alphabet::new(AlphabetName::Symbol, SYMBOL_RULECHECK_DISPLAY),
        }
    }

    /// Looks up the alphabet registered under `name`.
    pub fn get(&self, name: AlphabetName) -> &Alphabet {
        match name {
            AlphabetName::Latin => &self.latin,
            AlphabetName::Greek => &self.greek,
            AlphabetName::Symbol => &self.symbol,
        }
    }
}
