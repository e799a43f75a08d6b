//! Slug derivation.
//!
//! Turns a free-form title into a URL-safe identifier: Cyrillic letters are
//! transliterated to Latin, everything is lowercased, characters other than
//! ASCII letters, digits and `_` are dropped, and runs of whitespace or
//! hyphens become a single hyphen.

use std::sync::LazyLock;

use regex::Regex;

/// Longest slug a note may carry.
pub const SLUG_MAX_LENGTH: usize = 100;

static SLUG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-a-zA-Z0-9_]+$").expect("static slug pattern"));

/// Whether `slug` only contains characters allowed in a slug.
pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_PATTERN.is_match(slug)
}

/// Slug for a note titled `title`, cut to [`SLUG_MAX_LENGTH`].
///
/// `derive_slug(&derive_slug(t)) == derive_slug(t)` for every `t`.
pub fn derive_slug(title: &str) -> String {
    let mut slug = slugify(title);
    if slug.len() > SLUG_MAX_LENGTH {
        // slugify output is ASCII, byte truncation is safe
        slug.truncate(SLUG_MAX_LENGTH);
        let trimmed = slug.trim_end_matches('-').len();
        slug.truncate(trimmed);
    }
    slug
}

/// Transliterate and slugify `input`.
pub fn slugify(input: &str) -> String {
    let lowered = input.to_lowercase().replace('&', " and ");
    let mut slug = String::with_capacity(lowered.len());
    let mut pending_separator = false;

    for ch in lowered.chars() {
        if ch.is_whitespace() || ch == '-' {
            pending_separator = true;
            continue;
        }

        let piece = transliterate(ch);
        if piece.is_empty() {
            continue;
        }
        if pending_separator && !slug.is_empty() {
            slug.push('-');
        }
        pending_separator = false;
        slug.push_str(piece);
    }

    slug
}

/// ASCII form of a single lowercase character, empty when it has none.
fn transliterate(ch: char) -> &'static str {
    match ch {
        'a'..='z' | '0'..='9' | '_' => ascii_str(ch),
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' | 'ґ' => "g",
        'д' => "d",
        'е' | 'э' => "e",
        'ё' => "yo",
        'є' => "ye",
        'ж' => "zh",
        'з' => "z",
        'и' | 'і' => "i",
        'ї' => "yi",
        'й' => "j",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ы' => "y",
        'ю' => "yu",
        'я' => "ya",
        _ => "",
    }
}

fn ascii_str(ch: char) -> &'static str {
    const ASCII: &str = "abcdefghijklmnopqrstuvwxyz0123456789_";
    ASCII
        .find(ch)
        .map(|at| &ASCII[at..at + 1])
        .unwrap_or("")
}
