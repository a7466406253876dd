// chatguard-core/src/engines/mod.rs
//! Concrete implementations of the `FilterEngine` trait.

pub mod word_engine;
