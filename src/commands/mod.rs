//! Command implementations for the hookchain CLI

pub mod chain;
pub mod completions;
pub mod helpers;
pub mod resolve;
pub mod run;
pub mod setting;
