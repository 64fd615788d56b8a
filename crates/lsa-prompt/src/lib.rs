#![deny(missing_docs)]
#![doc = "Prompt templates and composition for letter-string analogy experiments."]

pub mod compose;
pub mod template;

pub use compose::{
    compose, render_alphabet_reminder, render_instruction, render_prev_next_instruction,
    render_prev_next_item, render_task_instruction, starts_block, PrevNextVariant,
    SYSTEM_PROMPT_LETTERSTRING, SYSTEM_PROMPT_PUZZLES,
};
pub use template::Template;
