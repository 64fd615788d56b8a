//! The closed set of analogy presentation templates.

use serde::{Deserialize, Serialize};

use lsa_core::{ErrorInfo, LsaError};

/// One of the five fixed textual layouts for an analogy item.
///
/// Template numbers are an external configuration contract (1..=5); an
/// unrecognized number is a hard configuration error, never a silent
/// default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Template {
    /// `If a changes to b, what does j change to ?`
    Sentence,
    /// `a is to b, as j is to`
    Ratio,
    /// `a →  b` over `j → `
    Arrow,
    /// Bracket grid with a "complete the pattern" lead-in.
    PatternIntro,
    /// Bare bracket grid.
    Pattern,
}

impl Template {
    /// All templates in number order.
    pub const ALL: [Template; 5] = [
        Template::Sentence,
        Template::Ratio,
        Template::Arrow,
        Template::PatternIntro,
        Template::Pattern,
    ];

    /// Resolves a template number from configuration or item files.
    pub fn from_nr(nr: u32) -> Result<Self, LsaError> {
        match nr {
            1 => Ok(Template::Sentence),
            2 => Ok(Template::Ratio),
            3 => Ok(Template::Arrow),
            4 => Ok(Template::PatternIntro),
            5 => Ok(Template::Pattern),
            other => Err(LsaError::Template(
                ErrorInfo::new("template.unknown", "unknown template nr")
                    .with_context("template_nr", other.to_string())
                    .with_hint("expected a template nr in 1..=5"),
            )),
        }
    }

    /// The template's number as written into output records.
    pub fn nr(&self) -> u32 {
        match self {
            Template::Sentence => 1,
            Template::Ratio => 2,
            Template::Arrow => 3,
            Template::PatternIntro => 4,
            Template::Pattern => 5,
        }
    }

    /// The worked example shown in full instructions.
    pub fn example(&self) -> &'static str {
        match self {
            Template::Sentence => "if a changes to b, then j changes to k",
            Template::Ratio => "a is to b, as j is to k",
            Template::Arrow => "a \u{2192}  b \n j \u{2192}  k",
            Template::PatternIntro => {
                "Let's try to complete the pattern:\n\n[ a ] [ b ] \n[ j ] [ k ]"
            }
            Template::Pattern => "[ a ] [ b ] \n[ j ] [ k ]",
        }
    }

    /// Renders the unanswered item fragment sent to the provider.
    pub fn item_prompt(&self, a: &str, b: &str, c: &str) -> String {
        match self {
            Template::Sentence => format!("If {a} changes to {b}, what does {c} change to ?"),
            Template::Ratio => format!("{a} is to {b}, as {c} is to"),
            Template::Arrow => format!("{a} \u{2192}  {b}\n{c} \u{2192} "),
            Template::PatternIntro => {
                format!("Let's try to complete the pattern:\n\n[ {a} ] [ {b} ]\n[ {c} ] [")
            }
            Template::Pattern => format!("[ {a} ] [ {b} ]\n[ {c} ] ["),
        }
    }
}
