//! Request normalization around validation.
//!
//! `prepare` derives and splits fields before any rule runs, `check` applies
//! the declarative and standalone rules, and `finish` cleans list values once
//! the input is known to be valid.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use validator::{Validate, ValidationErrors};

use crate::domain::{NewPost, Patch, Post, PostChanges, PostInput};
use crate::error::{DomainError, FieldErrors};

use super::rules::{FutureDate, SlugFormat, ValidationRule, parse_date, slugify};

/// Keywords kept from any source.
pub const MAX_KEYWORDS: usize = 10;
/// Per-tag length limit, checked before special characters are stripped.
pub const MAX_TAG_CHARS: usize = 50;
pub const MAX_META_DESCRIPTION_CHARS: usize = 160;

static TAG_NOISE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}\s]").expect("tag pattern is valid"));

const INVALID_DATE: &str = "The publish date must be a valid date.";

const PUBLISH_DATE_REQUIRED: &str =
    "Since you marked the article as \"published\", the publish date must be specified.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Create,
    Update,
}

/// Human-readable field names used inside messages.
fn label(field: &str) -> &'static str {
    match field {
        "title" => "Title",
        "slug" => "Slug",
        "body" => "Content",
        "is_published" => "Publishing Status",
        "published_date" => "Publish Date",
        "meta_description" => "Meta Description",
        "tags" => "Tags",
        "keywords" => "Keywords",
        _ => "Field",
    }
}

/// Input after pre-validation: derived, split and typed, but not yet checked.
#[derive(Debug, Default, Validate)]
pub(crate) struct PostDraft {
    #[validate(length(max = 255, message = "The title may not be greater than 255 characters."))]
    title: Option<String>,
    #[validate(length(max = 255, message = "The slug may not be greater than 255 characters."))]
    slug: Option<String>,
    body: Option<String>,
    is_published: Option<bool>,
    published_date: Patch<DateTime<Utc>>,
    meta_description: Patch<String>,
    tags: Option<Vec<String>>,
    #[validate(length(max = 10, message = "The keywords may not have more than 10 items."))]
    keywords: Option<Vec<String>>,
}

/// Runs the normalize → validate → clean pipeline for post payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    future: FutureDate,
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate future-date checks against a fixed instant.
    #[cfg(test)]
    pub(crate) fn at(now: DateTime<Utc>) -> Self {
        Self {
            future: FutureDate::at(now),
        }
    }

    /// Full pipeline for a create request.
    pub fn create(&self, input: PostInput) -> Result<NewPost, DomainError> {
        let mut errors = FieldErrors::new();
        let draft = prepare(input, Mode::Create, &mut errors);
        self.check(&draft, &mut errors);

        if draft.title.is_none() && !errors.contains("title") {
            errors.add("title", "The title field is required.");
        }
        if draft.slug.is_none() && !errors.contains("slug") {
            errors.add("slug", "The slug field is required.");
        }
        if draft.body.is_none() && !errors.contains("body") {
            errors.add("body", "The article content is required.");
        }
        if draft.is_published == Some(true) && draft.published_date.value().is_none() {
            errors.add("published_date", PUBLISH_DATE_REQUIRED);
        }
        errors.into_result()?;

        let draft = finish(draft);
        let (Some(title), Some(slug), Some(body)) = (draft.title, draft.slug, draft.body) else {
            return Err(DomainError::Internal(
                "required post fields missing after validation".to_string(),
            ));
        };

        Ok(NewPost {
            title,
            slug,
            body,
            is_published: draft.is_published.unwrap_or(false),
            published_date: draft.published_date.into_option(),
            meta_description: draft.meta_description.into_option(),
            tags: draft.tags.unwrap_or_default(),
            keywords: draft.keywords.unwrap_or_default(),
        })
    }

    /// Full pipeline for a partial update of `current`.
    pub fn update(&self, input: PostInput, current: &Post) -> Result<PostChanges, DomainError> {
        let mut errors = FieldErrors::new();
        let draft = prepare(input, Mode::Update, &mut errors);
        self.check(&draft, &mut errors);

        let touches_publishing =
            draft.is_published == Some(true) || matches!(draft.published_date, Patch::Null);
        if touches_publishing {
            let published = draft.is_published.unwrap_or(current.is_published);
            let date = match &draft.published_date {
                Patch::Value(date) => Some(*date),
                Patch::Null => None,
                Patch::Absent => current.published_date,
            };
            if published && date.is_none() {
                errors.add("published_date", PUBLISH_DATE_REQUIRED);
            }
        }
        errors.into_result()?;

        let draft = finish(draft);
        Ok(PostChanges {
            title: draft.title,
            slug: draft.slug,
            body: draft.body,
            is_published: draft.is_published,
            published_date: draft.published_date.into_change(),
            meta_description: draft.meta_description.into_change(),
            tags: draft.tags,
            keywords: draft.keywords,
        })
    }

    /// Declarative field rules plus the standalone rules, collected into one
    /// `ValidationErrors` report.
    fn check(&self, draft: &PostDraft, errors: &mut FieldErrors) {
        let mut report = draft.validate().err().unwrap_or_else(ValidationErrors::new);

        if let Some(slug) = &draft.slug {
            if let Err(failure) = SlugFormat.check(slug.as_str()) {
                report.add("slug", failure.to_validation_error(label("slug")));
            }
        }

        if let Patch::Value(date) = &draft.published_date {
            if let Err(failure) = self.future.check(date) {
                report.add(
                    "published_date",
                    failure.to_validation_error(label("published_date")),
                );
            }
        }

        errors.merge(report.into());

        if let Patch::Value(meta) = &draft.meta_description {
            if meta.chars().count() > MAX_META_DESCRIPTION_CHARS {
                errors.add(
                    "meta_description",
                    format!(
                        "The meta description may not be greater than {} characters.",
                        MAX_META_DESCRIPTION_CHARS
                    ),
                );
            }
        }

        if let Some(tags) = &draft.tags {
            if tags.iter().any(|t| t.chars().count() > MAX_TAG_CHARS) {
                errors.add(
                    "tags",
                    format!("Each tag may not exceed {} characters.", MAX_TAG_CHARS),
                );
            }
        }
    }
}

/// Pre-validation: type-check, trim, derive the slug, split tags and keywords.
fn prepare(input: PostInput, mode: Mode, errors: &mut FieldErrors) -> PostDraft {
    let title = text_field(input.title, "title", errors);
    let slug = text_field(input.slug, "slug", errors);
    let body = text_field(input.body, "body", errors);

    let title = required_text(title, "title", mode, errors);
    let body = required_text(body, "body", mode, errors);

    let slug = if !slug.is_filled() && title.is_some() {
        title
            .as_deref()
            .map(slugify)
            .filter(|derived| !derived.is_empty())
    } else {
        required_text(slug, "slug", mode, errors)
    };

    let is_published = boolean_field(input.is_published, "is_published", errors);

    let published_date = match input.published_date {
        Patch::Value(Value::String(raw)) if raw.trim().is_empty() => Patch::Null,
        Patch::Value(Value::String(raw)) => match parse_date(&raw) {
            Some(date) => Patch::Value(date),
            None => {
                errors.add("published_date", INVALID_DATE);
                Patch::Absent
            }
        },
        Patch::Value(_) => {
            errors.add("published_date", INVALID_DATE);
            Patch::Absent
        }
        Patch::Null => Patch::Null,
        Patch::Absent => Patch::Absent,
    };

    let meta_description = match text_field(input.meta_description, "meta_description", errors) {
        Patch::Value(raw) if raw.trim().is_empty() => Patch::Null,
        Patch::Value(raw) => Patch::Value(raw.trim().to_string()),
        other => other,
    };

    let tags = match input.tags {
        Patch::Value(list) => Some(split_list(&list, Delimiter::Comma, "tags", errors)),
        Patch::Null => Some(Vec::new()),
        Patch::Absent => match mode {
            Mode::Create => Some(Vec::new()),
            Mode::Update => None,
        },
    };

    let keywords = prepare_keywords(&input.keywords, &meta_description, mode, errors);

    PostDraft {
        title,
        slug,
        body,
        is_published,
        published_date,
        meta_description,
        tags,
        keywords,
    }
}

/// Explicit keywords win; otherwise the meta description is tokenized.
fn prepare_keywords(
    keywords: &Patch<Value>,
    meta_description: &Patch<String>,
    mode: Mode,
    errors: &mut FieldErrors,
) -> Option<Vec<String>> {
    let from_meta: Option<Vec<String>> = meta_description
        .value()
        .map(|meta| meta.split_whitespace().map(str::to_string).collect());

    let mut list = match (keywords, mode) {
        (Patch::Value(list), _) if list_is_filled(list) => {
            Some(split_list(list, Delimiter::Whitespace, "keywords", errors))
        }
        (Patch::Value(_) | Patch::Null, Mode::Update) => Some(Vec::new()),
        (_, Mode::Create) => Some(from_meta.unwrap_or_default()),
        (Patch::Absent, Mode::Update) => from_meta,
    };

    if let Some(words) = list.as_mut() {
        words.truncate(MAX_KEYWORDS);
    }
    list
}

/// Strings pass through; any other JSON type is reported against `field`.
fn text_field(
    value: Patch<Value>,
    field: &'static str,
    errors: &mut FieldErrors,
) -> Patch<String> {
    match value {
        Patch::Value(Value::String(text)) => Patch::Value(text),
        Patch::Value(_) => {
            errors.add(field, format!("The {} field must be a string.", label(field)));
            Patch::Absent
        }
        Patch::Null => Patch::Null,
        Patch::Absent => Patch::Absent,
    }
}

/// Accepts `true`, `false`, `0`, `1`, `"0"` and `"1"`.
fn boolean_field(
    value: Patch<Value>,
    field: &'static str,
    errors: &mut FieldErrors,
) -> Option<bool> {
    let flag = match value {
        Patch::Absent => return None,
        Patch::Value(Value::Bool(flag)) => Some(flag),
        Patch::Value(Value::Number(n)) => match n.as_u64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Patch::Value(Value::String(s)) => match s.trim() {
            "0" => Some(false),
            "1" => Some(true),
            _ => None,
        },
        _ => None,
    };
    if flag.is_none() {
        errors.add(field, format!("The {} field must be true or false.", label(field)));
    }
    flag
}

fn required_text(
    value: Patch<String>,
    field: &'static str,
    mode: Mode,
    errors: &mut FieldErrors,
) -> Option<String> {
    match value {
        Patch::Value(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        Patch::Absent => None,
        _ => {
            if mode == Mode::Update {
                errors.add(field, format!("The {} field must not be empty.", label(field)));
            }
            None
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Delimiter {
    Comma,
    Whitespace,
}

fn list_is_filled(list: &Value) -> bool {
    match list {
        Value::String(text) => !text.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Null => false,
        _ => true,
    }
}

/// Split text or collect array entries into trimmed, non-blank strings.
fn split_list(
    list: &Value,
    delimiter: Delimiter,
    field: &'static str,
    errors: &mut FieldErrors,
) -> Vec<String> {
    match list {
        Value::String(text) => match delimiter {
            Delimiter::Comma => text
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            Delimiter::Whitespace => text.split_whitespace().map(str::to_string).collect(),
        },
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            let mut reported = false;
            for item in items {
                match item {
                    Value::String(s) if !s.trim().is_empty() => out.push(s.trim().to_string()),
                    Value::String(_) | Value::Null => {}
                    _ if !reported => {
                        errors.add(
                            field,
                            format!("Each entry in {} must be a string.", label(field)),
                        );
                        reported = true;
                    }
                    _ => {}
                }
            }
            out
        }
        Value::Null => Vec::new(),
        _ => {
            errors.add(
                field,
                format!("The {} field must be a list or a string.", label(field)),
            );
            Vec::new()
        }
    }
}

/// Post-validation cleanup of list fields.
fn finish(mut draft: PostDraft) -> PostDraft {
    draft.keywords = draft.keywords.map(clean_keywords);
    draft.tags = draft.tags.map(clean_tags);
    draft
}

/// Lowercase keywords, dropping blanks.
pub fn clean_keywords(keywords: Vec<String>) -> Vec<String> {
    keywords
        .into_iter()
        .map(|word| word.trim().to_lowercase())
        .filter(|word| !word.is_empty())
        .collect()
}

/// Strip everything but letters, numbers and whitespace; drop blanks and repeats.
pub fn clean_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let cleaned = TAG_NOISE.replace_all(&tag, "").trim().to_string();
        if !cleaned.is_empty() && !out.contains(&cleaned) {
            out.push(cleaned);
        }
    }
    out
}
