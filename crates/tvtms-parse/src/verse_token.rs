//! Verse-token cleanup.
//!
//! The verse position of a reference carries more than a number: title
//! pseudo-verses ("Title"), manuscript markers ("18(A)", "25!a", "12*"),
//! and subverse suffixes ("6a", "6.1"). Cleanup extracts the numeric main
//! verse and files the decoration where it belongs.

use std::sync::LazyLock;

use regex::Regex;

static VERSE_PAREN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<num>\d+)\s*\((?P<mark>[^)]+)\)$").expect("Invalid verse marker regex")
});

static VERSE_BANG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<num>\d+)(?P<mark>![A-Za-z0-9]+)$").expect("Invalid verse bang regex")
});

static VERSE_DOT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<num>\d+)\.(?P<sub>[A-Za-z0-9]+)$").expect("Invalid verse subverse regex")
});

static VERSE_LETTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<num>\d+)(?P<sub>[A-Za-z]{1,2})$").expect("Invalid verse letter regex")
});

static VERSE_DECORATED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<num>\d+)(?P<deco>[^A-Za-z0-9]+)$").expect("Invalid verse decoration regex")
});

/// The pieces a verse token breaks into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanVerse {
    pub verse: u32,
    pub subverse: Option<String>,
    pub marker: Option<String>,
    /// Set when cleanup had to repair something; becomes a diagnostic.
    pub repair: Option<String>,
}

impl CleanVerse {
    fn plain(verse: u32) -> Self {
        Self {
            verse,
            subverse: None,
            marker: None,
            repair: None,
        }
    }
}

/// Break a verse token into number, subverse, and marker.
///
/// `Err` means no numeric main verse could be recovered at all.
pub fn clean_verse_token(raw: &str) -> Result<CleanVerse, String> {
    let token = raw.trim();
    if token.is_empty() {
        return Err("empty verse token".to_string());
    }
    if token.eq_ignore_ascii_case("title") {
        // title pseudo-verse
        return Ok(CleanVerse::plain(0));
    }
    if token.bytes().all(|b| b.is_ascii_digit()) {
        return parse_num(token).map(CleanVerse::plain);
    }
    if let Some(caps) = VERSE_PAREN_RE.captures(token) {
        let mut clean = CleanVerse::plain(parse_num(&caps["num"])?);
        clean.marker = Some(caps["mark"].trim().to_string());
        return Ok(clean);
    }
    if let Some(caps) = VERSE_BANG_RE.captures(token) {
        let mut clean = CleanVerse::plain(parse_num(&caps["num"])?);
        clean.marker = Some(caps["mark"].to_string());
        clean.repair = Some(format!(
            "stray '!' marker: kept verse {} with marker {:?}",
            clean.verse, &caps["mark"]
        ));
        return Ok(clean);
    }
    if let Some(caps) = VERSE_DOT_RE.captures(token) {
        let mut clean = CleanVerse::plain(parse_num(&caps["num"])?);
        clean.subverse = Some(caps["sub"].to_string());
        return Ok(clean);
    }
    if let Some(caps) = VERSE_LETTER_RE.captures(token) {
        let mut clean = CleanVerse::plain(parse_num(&caps["num"])?);
        clean.subverse = Some(caps["sub"].to_string());
        return Ok(clean);
    }
    if let Some(caps) = VERSE_DECORATED_RE.captures(token) {
        let mut clean = CleanVerse::plain(parse_num(&caps["num"])?);
        clean.marker = Some(caps["deco"].trim().to_string());
        clean.repair = Some(format!(
            "unrecognized decoration: kept verse {} with marker {:?}",
            clean.verse, &caps["deco"].trim()
        ));
        return Ok(clean);
    }
    Err(format!("no numeric verse in {:?}", token))
}

fn parse_num(digits: &str) -> Result<u32, String> {
    digits
        .parse::<u32>()
        .map_err(|_| format!("verse number out of range: {:?}", digits))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_and_title() {
        assert_eq!(clean_verse_token("18"), Ok(CleanVerse::plain(18)));
        assert_eq!(clean_verse_token("Title"), Ok(CleanVerse::plain(0)));
        assert_eq!(clean_verse_token("TITLE"), Ok(CleanVerse::plain(0)));
    }

    #[test]
    fn paren_marker() {
        let clean = clean_verse_token("18(A)").expect("clean");
        assert_eq!(clean.verse, 18);
        assert_eq!(clean.marker.as_deref(), Some("A"));
        assert!(clean.repair.is_none());
    }

    #[test]
    fn bang_marker_is_a_repair() {
        let clean = clean_verse_token("25!a").expect("clean");
        assert_eq!(clean.verse, 25);
        assert_eq!(clean.marker.as_deref(), Some("!a"));
        assert!(clean.repair.is_some());
    }

    #[test]
    fn subverse_suffixes() {
        let letter = clean_verse_token("6a").expect("clean");
        assert_eq!(letter.verse, 6);
        assert_eq!(letter.subverse.as_deref(), Some("a"));

        let dotted = clean_verse_token("6.1").expect("clean");
        assert_eq!(dotted.verse, 6);
        assert_eq!(dotted.subverse.as_deref(), Some("1"));
    }

    #[test]
    fn trailing_decoration_is_a_repair() {
        let clean = clean_verse_token("12*").expect("clean");
        assert_eq!(clean.verse, 12);
        assert_eq!(clean.marker.as_deref(), Some("*"));
        assert!(clean.repair.is_some());
    }

    #[test]
    fn hopeless_tokens_fail() {
        assert!(clean_verse_token("abc").is_err());
        assert!(clean_verse_token("").is_err());
        assert!(clean_verse_token("99999999999999").is_err());
    }
}
