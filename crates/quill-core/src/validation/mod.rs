//! Post input validation: standalone rules and the normalization pipeline.

mod normalize;
mod rules;

pub use normalize::{
    MAX_KEYWORDS, MAX_META_DESCRIPTION_CHARS, MAX_TAG_CHARS, Normalizer, clean_keywords,
    clean_tags,
};
pub use rules::{FutureDate, RuleFailure, SlugFormat, ValidationRule, parse_date, slugify};
