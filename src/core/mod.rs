// src/core/mod.rs — The generate-evaluate-revise loop

pub mod engine;
pub mod prompts;
pub mod result;
pub mod types;
