//! Data models for the promotion catalog.
//!
//! - `Promotion`: a single offer card with tags and optional terms
//! - `FaqEntry`: a question/answer pair shown in the FAQ section
//!
//! Both are loaded once from the static data feed and never mutated.

pub mod faq;
pub mod promotion;

pub use faq::FaqEntry;
pub use promotion::{collect_tags, Promotion};
