//! Human-readable rendering of amounts

pub mod words;

pub use words::amount_in_words;
