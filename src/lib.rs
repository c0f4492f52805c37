// src/lib.rs — Library root for tweetforge

pub mod api;
pub mod cli;
pub mod core;
pub mod infra;
pub mod provider;
