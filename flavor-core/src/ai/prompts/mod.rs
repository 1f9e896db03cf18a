//! AI prompt templates.

pub mod transform;

pub use transform::{render_transform_prompt, TRANSFORM_PROMPT_NAME};
