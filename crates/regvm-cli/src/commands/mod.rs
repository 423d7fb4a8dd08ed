pub mod check;
pub mod common;
pub mod dump;
pub mod matches;
pub mod replace;
pub mod split;
pub mod trace;

#[cfg(test)]
mod commands_tests;
