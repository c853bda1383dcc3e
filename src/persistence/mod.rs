//! Save data for an external key-value store
//!
//! The core never touches storage itself. It produces and accepts a versioned
//! JSON envelope; the host decides where that string lives.

pub mod envelope;

pub use envelope::{SAVE_KEY, SAVE_VERSION, SaveData};
