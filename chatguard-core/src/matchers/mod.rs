// chatguard-core/src/matchers/mod.rs
//! Multi-pattern matching: the Aho-Corasick automaton and the compilation
//! of word categories into ready-to-search filter sets.

pub mod automaton;
pub mod compiler;
