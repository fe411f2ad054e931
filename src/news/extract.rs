// src/news/extract.rs
//! Pure text-extraction helpers for the news pipeline. Kept free of any
//! network or store concern so prompt-format drift can be diagnosed with
//! plain unit tests, no live capability call needed.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::model::{SUMMARY_MAX_CHARS, TITLE_MAX_CHARS};

/// Category-specific illustration references, with a "general" fallback.
static CATEGORY_IMAGES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (
            "technology",
            "https://images.unsplash.com/photo-1518770660439-4636190af475?w=800&q=80",
        ),
        (
            "business",
            "https://images.unsplash.com/photo-1460925895917-afdab827c52f?w=800&q=80",
        ),
        (
            "science",
            "https://images.unsplash.com/photo-1532094349884-543bc11b234d?w=800&q=80",
        ),
        (
            "health",
            "https://images.unsplash.com/photo-1505751172876-fa1923c5c528?w=800&q=80",
        ),
        (
            "sports",
            "https://images.unsplash.com/photo-1461896836934-ffe607ba8211?w=800&q=80",
        ),
        (
            "entertainment",
            "https://images.unsplash.com/photo-1514525253161-7a46d19cd819?w=800&q=80",
        ),
        (
            "world",
            "https://images.unsplash.com/photo-1526778548025-fa2f459cd5c1?w=800&q=80",
        ),
        (
            "general",
            "https://images.unsplash.com/photo-1504711434969-e33886168f5c?w=800&q=80",
        ),
    ])
});

/// Resolve the illustration for a category; unknown categories get the
/// "general" image, never an empty value.
pub fn image_for_category(category: &str) -> &'static str {
    CATEGORY_IMAGES
        .get(category)
        .or_else(|| CATEGORY_IMAGES.get("general"))
        .expect("general image present")
}

/// Hard character cut, no ellipsis.
pub fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        s.chars().take(max).collect()
    } else {
        s.to_string()
    }
}

/// Derive a category label from a free-text topic: lower-cased, spaces
/// replaced with underscores.
pub fn normalize_category(topic: &str) -> String {
    topic.to_lowercase().replace(' ', "_")
}

/// Capitalize each whitespace-separated word, lower-casing the rest.
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Heuristic split of free-form agent output into (title, summary).
///
/// Rules, applied in order:
/// - trim the whole response; the title candidate is its first line;
/// - strip a single leading `*` or `-` bullet marker from the title;
/// - if the title then starts with `Title:` or `**`, remove every
///   occurrence of both markers and trim;
/// - the summary is the remaining lines joined back together, falling back
///   to the full response when that leaves nothing. Bullet markers on
///   summary lines are left untouched;
/// - title cut to 200 chars, summary to 500.
pub fn extract_title_summary(content: &str) -> (String, String) {
    let content = content.trim();
    let lines: Vec<&str> = content.split('\n').collect();

    let mut title = lines.first().copied().unwrap_or_default().trim().to_string();
    if let Some(rest) = title.strip_prefix('*').or_else(|| title.strip_prefix('-')) {
        title = rest.trim().to_string();
    }
    if title.starts_with("Title:") || title.starts_with("**") {
        title = title.replace("Title:", "").replace("**", "").trim().to_string();
    }

    let mut summary = if lines.len() > 1 {
        lines[1..].join("\n").trim().to_string()
    } else {
        content.to_string()
    };
    if summary.is_empty() {
        summary = content.to_string();
    }

    (
        truncate_chars(&title, TITLE_MAX_CHARS),
        truncate_chars(&summary, SUMMARY_MAX_CHARS),
    )
}
