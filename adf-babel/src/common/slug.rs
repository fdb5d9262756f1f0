//! Heading anchors.
//!
//! Slugs follow the usual Markdown renderer convention: lower-case, spaces to
//! hyphens, punctuation dropped. Accented letters survive; a small set of
//! emoji common in Confluence headings becomes a word so that headings which
//! differ only by their emoji keep distinct anchors.

const EMOJI_TOKENS: &[(&str, &str)] = &[
    ("✅", "check"),
    ("✔", "check"),
    ("❌", "x"),
    ("⚠", "warning"),
    ("ℹ", "info"),
    ("❗", "exclamation"),
    ("❓", "question"),
    ("🚀", "rocket"),
    ("🔥", "fire"),
    ("💡", "bulb"),
    ("📝", "memo"),
    ("📌", "pushpin"),
    ("🎉", "tada"),
    ("⭐", "star"),
    ("🐛", "bug"),
    ("🔒", "lock"),
];

/// Anchor slug for a heading text.
pub fn slugify(text: &str) -> String {
    let mut expanded = text.to_lowercase();
    for (emoji, token) in EMOJI_TOKENS {
        if expanded.contains(emoji) {
            expanded = expanded.replace(emoji, &format!(" {token} "));
        }
    }

    let mut slug = String::with_capacity(expanded.len());
    let mut pending_hyphen = false;
    for ch in expanded.chars() {
        if ch.is_alphanumeric() || ch == '_' {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else if ch.is_whitespace() || ch == '-' {
            pending_hyphen = true;
        }
    }
    slug
}
