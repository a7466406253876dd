// chatguard-normalize/src/lib.rs
#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod fold;
pub mod mapping;
pub mod tables;

pub use fold::fold_char;
pub use mapping::{normalize, NormalizedText};
