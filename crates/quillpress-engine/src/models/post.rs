//! Post entities normalized from scanned source documents.
//!
//! A [`Post`] is built exactly once, by [`Post::from_document`] or
//! [`Post::from_file`]: front matter is decoded, then every derived field
//! (slug, instants, rendered markup, permalink) is computed in one pass.
//! Construction is all-or-nothing; a post is either fully valid or absent.

use std::path::Path;

use chrono::{Datelike, NaiveDateTime};
use serde::Deserialize;

use crate::markdown;
use crate::models::tag::Tag;
use crate::parsing::{self, Document, ScanError};
use crate::placeholder::Replacer;

/// Fixed timestamp layout for the `date` and `update_date` fields.
const TIME_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";

/// Marker cutting a post's content down to its brief.
const BRIEF_SEPARATOR: &str = "<!--more-->";

/// Errors producing a [`Post`].
#[derive(Debug, thiserror::Error)]
pub enum PostError {
    #[error("failed to read post source: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("post source needs a toml block followed by a markdown block")]
    MalformedStructure,
    #[error("invalid post date {value:?}: {source}")]
    InvalidDate {
        value: String,
        source: chrono::ParseError,
    },
    #[error("failed to decode post front matter: {0}")]
    Decode(#[from] toml::de::Error),
}

/// Front-matter fields decoded from the TOML block.
///
/// Every field defaults when absent; the date fields are validated during
/// normalization, not during decoding.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PostMeta {
    pub title: String,
    pub slug: String,
    pub desc: String,
    pub date: String,
    pub update_date: String,
    pub author: String,
    pub thumb: String,
    pub tags: Vec<String>,
}

/// A publishable post, fully derived from one source document.
///
/// Immutable after construction except for the two assembly-time rewrites,
/// [`Post::prefix_paths`] and [`Post::fix_placeholders`].
#[derive(Debug, Clone)]
pub struct Post {
    meta: PostMeta,
    tags: Vec<Tag>,
    created: NaiveDateTime,
    updated: NaiveDateTime,
    raw: String,
    content_html: String,
    brief_html: String,
    perma_url: String,
    post_url: String,
    tree_url: String,
}

impl Post {
    /// Builds a post from a scanned document: a front-matter block optionally
    /// followed by a content block.
    pub fn from_document(document: Document) -> Result<Self, PostError> {
        let mut blocks = document.into_blocks().into_iter();
        let meta_block = match blocks.next() {
            Some(block) if block.is_meta() => block,
            _ => return Err(PostError::MalformedStructure),
        };
        let content = blocks
            .next()
            .map(|block| block.into_string())
            .unwrap_or_default();
        if blocks.next().is_some() {
            return Err(PostError::MalformedStructure);
        }
        let meta: PostMeta = toml::from_str(meta_block.as_str())?;
        let raw = content.trim_matches('\n').to_string();
        Self::normalize(meta, raw)
    }

    /// Reads and parses a post source file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PostError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_document(parsing::scan_str(&source)?)
    }

    /// Normalizes decoded front matter plus raw content into a post.
    ///
    /// Every step is a pure derivation; the first failing date parse aborts
    /// the whole post.
    fn normalize(mut meta: PostMeta, raw: String) -> Result<Self, PostError> {
        if meta.slug.is_empty() {
            // Spaces become hyphens; case, punctuation and unicode pass
            // through untouched.
            meta.slug = meta.title.replace(' ', "-");
        }
        let created = parse_instant(&meta.date)?;
        let updated = if meta.update_date.is_empty() {
            meta.update_date = meta.date.clone();
            created
        } else {
            parse_instant(&meta.update_date)?
        };
        let content_html = markdown::render(&raw);
        // The brief renders from its own source slice, not from a truncation
        // of the full markup, so structures split by the separator are never
        // cut mid-tag.
        let brief_source = match raw.split_once(BRIEF_SEPARATOR) {
            Some((before, _)) => before,
            None => raw.as_str(),
        };
        let brief_html = markdown::render(brief_source);
        let perma_url = format!(
            "/{}/{}/{}/{}",
            created.year(),
            created.month(),
            created.day(),
            meta.slug
        );
        let post_url = format!("{perma_url}.html");
        let tree_url = perma_url.clone();
        let tags = meta.tags.iter().map(|name| Tag::new(name)).collect();
        Ok(Self {
            meta,
            tags,
            created,
            updated,
            raw,
            content_html,
            brief_html,
            perma_url,
            post_url,
            tree_url,
        })
    }

    pub fn title(&self) -> &str {
        &self.meta.title
    }

    pub fn slug(&self) -> &str {
        &self.meta.slug
    }

    pub fn desc(&self) -> &str {
        &self.meta.desc
    }

    pub fn author(&self) -> &str {
        &self.meta.author
    }

    pub fn thumb(&self) -> &str {
        &self.meta.thumb
    }

    /// Publish date exactly as written in the front matter.
    pub fn date(&self) -> &str {
        &self.meta.date
    }

    /// Update date string; equals [`Post::date`] when none was supplied.
    pub fn update_date(&self) -> &str {
        &self.meta.update_date
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn created(&self) -> NaiveDateTime {
        self.created
    }

    pub fn updated(&self) -> NaiveDateTime {
        self.updated
    }

    /// Raw markdown source of the content block.
    pub fn raw_content(&self) -> &str {
        &self.raw
    }

    pub fn content_html(&self) -> &str {
        &self.content_html
    }

    pub fn brief_html(&self) -> &str {
        &self.brief_html
    }

    /// Canonical extension-less identity path of the post.
    pub fn permalink(&self) -> &str {
        &self.perma_url
    }

    /// Permalink plus the `.html` suffix.
    pub fn url(&self) -> &str {
        &self.post_url
    }

    /// Path used to place the post within the content hierarchy.
    pub fn tree_path(&self) -> &str {
        &self.tree_url
    }

    /// Prefixes permalink, URL and tree path with a base path.
    ///
    /// Idempotent in the pipeline only because callers invoke it once per
    /// post during assembly; the rewrite itself does not guard against
    /// repeated prefixing.
    pub fn prefix_paths(&mut self, prefix: &str) {
        self.perma_url = join_path(prefix, &self.perma_url);
        self.post_url = join_path(prefix, &self.post_url);
        self.tree_url = join_path(prefix, &self.tree_url);
    }

    /// Rewrites placeholder tokens: `meta_rules` over the thumbnail path,
    /// `markup_rules` over the rendered content and brief.
    pub fn fix_placeholders(&mut self, meta_rules: &Replacer, markup_rules: &Replacer) {
        self.meta.thumb = meta_rules.replace(&self.meta.thumb);
        self.content_html = markup_rules.replace(&self.content_html);
        self.brief_html = markup_rules.replace(&self.brief_html);
    }
}

/// Orders posts newest first.
///
/// The sort is stable, so posts sharing a publish instant keep their relative
/// order.
pub fn sort_by_created(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.created.cmp(&a.created));
}

fn parse_instant(value: &str) -> Result<NaiveDateTime, PostError> {
    NaiveDateTime::parse_from_str(value, TIME_LAYOUT).map_err(|source| PostError::InvalidDate {
        value: value.to_string(),
        source,
    })
}

fn join_path(prefix: &str, path: &str) -> String {
    format!(
        "{}/{}",
        prefix.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
