//! Nutrition math shared by the chat context.

pub mod energy;

pub use energy::{ActivityLevel, Gender};
