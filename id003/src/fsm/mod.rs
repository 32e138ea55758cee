// id003-rs/id003/src/fsm/mod.rs
//! Validator state machine.
//!
//! `RULES` says which trigger moves the validator where; `Machine` applies
//! them and runs the state hooks, which answer with `Signal`s.

pub mod machine;
/// The transition table.
pub mod rules;
pub mod signal;
pub mod state;
pub mod trigger;

pub use machine::Machine;
pub use rules::{RULES, Rule, Sources};
pub use signal::Signal;
pub use state::State;
pub use trigger::Trigger;
