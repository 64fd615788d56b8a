//! Instruction and prompt composition.

use lsa_core::{Alphabet, ErrorInfo, LsaError};
use lsa_items::Direction;

use crate::template::Template;

/// System prompt for the letter-string analogy tasks.
pub const SYSTEM_PROMPT_LETTERSTRING: &str = "You are a helpful assistant that solves \
letter-string analogies. Only give the answer, no other words or text.\n";

/// System prompt for the prev/next-letter task.
pub const SYSTEM_PROMPT_PUZZLES: &str = "You are a helpful assistant that solves puzzles. \
Only give the answer, no other words or text.\n";

/// Whether an item id marks the first item of a new instructional block.
///
/// Items are numbered so that `id % 10 == 1` signals block start; this
/// numbering convention is a data contract of the item files.
pub fn starts_block(item_id: u32) -> bool {
    item_id % 10 == 1
}

/// Full instruction: lead-in, the alphabet's symbol list, and the
/// template's worked example.
pub fn render_instruction(template: Template, alphabet: &Alphabet) -> String {
    format!(
        "We are going to solve puzzles with the letters or symbols '{}'. \
For example, in the Latin alphabet '{}'.",
        alphabet.joined(),
        template.example()
    )
}

/// Task instruction without a worked example (rule-check prompts).
pub fn render_task_instruction(alphabet: &Alphabet) -> String {
    format!(
        "We are going to solve puzzles with the letters or symbols '{}'.",
        alphabet.joined()
    )
}

/// Short reminder used on non-initial items of an alphabet block. Contains
/// the symbol list but never the worked example.
pub fn render_alphabet_reminder(alphabet: &Alphabet) -> String {
    format!("The letter or symbol list is '{}'.", alphabet.joined())
}

/// Concatenates the optional previous exchange, the instruction or
/// reminder, and the unanswered item fragment with newline separators.
pub fn compose(previous_exchange: &str, instruction: &str, item_fragment: &str) -> String {
    let mut prompt = String::new();
    if !previous_exchange.is_empty() {
        prompt.push_str(previous_exchange);
    }
    prompt.push_str(instruction);
    prompt.push('\n');
    prompt.push_str(item_fragment);
    prompt
}

/// Instruction for the prev/next-letter task: the ordered symbol list.
pub fn render_prev_next_instruction(alphabet: &Alphabet) -> String {
    format!(
        "Here is an ordered list of letters or symbols '{}'.\n",
        alphabet.joined()
    )
}

/// The two phrasings of the prev/next question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrevNextVariant {
    /// `... is two before x ?`
    Bare,
    /// `... is two places before x ?`
    Places,
}

impl PrevNextVariant {
    /// Resolves the prev/next template number (0 or 1).
    pub fn from_nr(nr: u32) -> Result<Self, LsaError> {
        match nr {
            0 => Ok(PrevNextVariant::Bare),
            1 => Ok(PrevNextVariant::Places),
            other => Err(LsaError::Template(
                ErrorInfo::new("template.unknown", "unknown prev/next template nr")
                    .with_context("template_nr", other.to_string())
                    .with_hint("expected 0 or 1"),
            )),
        }
    }

    /// The variant's number as written into output records.
    pub fn nr(&self) -> u32 {
        match self {
            PrevNextVariant::Bare => 0,
            PrevNextVariant::Places => 1,
        }
    }
}

/// Spells out a small distance ("one", "two", ...). Distances in the item
/// files are single digits; anything larger is a data-contract violation.
fn distance_words(distance: u32) -> Result<&'static str, LsaError> {
    const WORDS: [&str; 9] = [
        "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
    ];
    if distance == 0 || distance > 9 {
        return Err(LsaError::Template(
            ErrorInfo::new("template.distance-range", "prev/next distance out of range")
                .with_context("distance", distance.to_string())
                .with_hint("expected a distance in 1..=9"),
        ));
    }
    Ok(WORDS[(distance - 1) as usize])
}

/// Renders the prev/next question for one item.
pub fn render_prev_next_item(
    direction: Direction,
    distance: u32,
    stimulus: &str,
    variant: PrevNextVariant,
) -> Result<String, LsaError> {
    let spelled = distance_words(distance)?;
    let before_after = match direction {
        Direction::Prev => "before",
        Direction::Next => "after",
    };
    let middle = match variant {
        PrevNextVariant::Bare => format!(" {before_after} "),
        PrevNextVariant::Places if distance == 1 => format!(" place {before_after} "),
        PrevNextVariant::Places => format!(" places {before_after} "),
    };
    Ok(format!(
        "Which letter or symbol is {spelled}{middle}{stimulus} ? Respond with only the letter or symbol."
    ))
}
