#![deny(unsafe_code)]

//! Canonical book catalog.
//!
//! One static table drives everything: canonical three-character ids,
//! display names, canon membership, chapter counts, canonical order, and
//! the alias expansion that maps the hundreds of spellings found in the
//! dataset ("1 Kings", "1Ki", "First Kings", "Cant") onto one id.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::Serialize;
use tracing::warn;

use tvtms_model::BookId;

// =============================================================================
// Static book table
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Section {
    OldTestament,
    NewTestament,
    Apocrypha,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::OldTestament => "Old Testament",
            Section::NewTestament => "New Testament",
            Section::Apocrypha => "Apocrypha",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

struct BookSpec {
    id: &'static str,
    name: &'static str,
    section: Section,
    chapters: u32,
    /// 1-4 for numbered books; aliases are then base names combined with
    /// every ordinal prefix spelling.
    ordinal: Option<u8>,
    aliases: &'static [&'static str],
}

const fn plain(
    id: &'static str,
    name: &'static str,
    section: Section,
    chapters: u32,
    aliases: &'static [&'static str],
) -> BookSpec {
    BookSpec {
        id,
        name,
        section,
        chapters,
        ordinal: None,
        aliases,
    }
}

const fn numbered(
    id: &'static str,
    name: &'static str,
    section: Section,
    chapters: u32,
    ordinal: u8,
    bases: &'static [&'static str],
) -> BookSpec {
    BookSpec {
        id,
        name,
        section,
        chapters,
        ordinal: Some(ordinal),
        aliases: bases,
    }
}

#[rustfmt::skip]
static BOOK_SPECS: &[BookSpec] = &[
    // Old Testament, canonical order
    plain("GEN", "Genesis", Section::OldTestament, 50, &["gen", "ge", "gn", "genesis"]),
    plain("EXO", "Exodus", Section::OldTestament, 40, &["exo", "ex", "exod", "exodus"]),
    plain("LEV", "Leviticus", Section::OldTestament, 27, &["lev", "le", "lv", "leviticus"]),
    plain("NUM", "Numbers", Section::OldTestament, 36, &["num", "nu", "nm", "nb", "numbers"]),
    plain("DEU", "Deuteronomy", Section::OldTestament, 34, &["deu", "de", "dt", "deut", "deuteronomy"]),
    plain("JOS", "Joshua", Section::OldTestament, 24, &["jos", "josh", "jsh", "joshua"]),
    plain("JDG", "Judges", Section::OldTestament, 21, &["jdg", "jg", "judg", "jdgs", "judges"]),
    plain("RUT", "Ruth", Section::OldTestament, 4, &["rut", "ru", "rth", "ruth"]),
    numbered("1SA", "1 Samuel", Section::OldTestament, 31, 1, &["sa", "sm", "sam", "saml", "samuel"]),
    numbered("2SA", "2 Samuel", Section::OldTestament, 24, 2, &["sa", "sm", "sam", "saml", "samuel"]),
    numbered("1KI", "1 Kings", Section::OldTestament, 22, 1, &["ki", "kgs", "kin", "kings"]),
    numbered("2KI", "2 Kings", Section::OldTestament, 25, 2, &["ki", "kgs", "kin", "kings"]),
    numbered("1CH", "1 Chronicles", Section::OldTestament, 29, 1, &["ch", "chr", "chron", "chronicles"]),
    numbered("2CH", "2 Chronicles", Section::OldTestament, 36, 2, &["ch", "chr", "chron", "chronicles"]),
    plain("EZR", "Ezra", Section::OldTestament, 10, &["ezr", "ezra"]),
    plain("NEH", "Nehemiah", Section::OldTestament, 13, &["neh", "ne", "nehemiah"]),
    plain("EST", "Esther", Section::OldTestament, 10, &["est", "es", "esth", "esther"]),
    plain("JOB", "Job", Section::OldTestament, 42, &["job", "jb"]),
    plain("PSA", "Psalms", Section::OldTestament, 150, &["psa", "ps", "psm", "pss", "psalm", "psalms", "psalter"]),
    plain("PRO", "Proverbs", Section::OldTestament, 31, &["pro", "pr", "prv", "prov", "proverbs"]),
    plain("ECC", "Ecclesiastes", Section::OldTestament, 12, &["ecc", "ec", "eccl", "eccles", "ecclesiastes", "qoheleth"]),
    plain("SNG", "Song of Songs", Section::OldTestament, 8, &["sng", "sos", "son", "song", "songs", "cant", "canticles", "song of songs", "song of solomon"]),
    plain("ISA", "Isaiah", Section::OldTestament, 66, &["isa", "is", "isaiah"]),
    plain("JER", "Jeremiah", Section::OldTestament, 52, &["jer", "je", "jr", "jeremiah"]),
    plain("LAM", "Lamentations", Section::OldTestament, 5, &["lam", "la", "lamentations"]),
    plain("EZK", "Ezekiel", Section::OldTestament, 48, &["ezk", "eze", "ezek", "ezekiel"]),
    plain("DAN", "Daniel", Section::OldTestament, 12, &["dan", "da", "dn", "daniel"]),
    plain("HOS", "Hosea", Section::OldTestament, 14, &["hos", "ho", "hosea"]),
    plain("JOL", "Joel", Section::OldTestament, 3, &["jol", "joe", "jl", "joel"]),
    plain("AMO", "Amos", Section::OldTestament, 9, &["amo", "am", "amos"]),
    plain("OBA", "Obadiah", Section::OldTestament, 1, &["oba", "ob", "obad", "obadiah"]),
    plain("JON", "Jonah", Section::OldTestament, 4, &["jon", "jnh", "jonah"]),
    plain("MIC", "Micah", Section::OldTestament, 7, &["mic", "mc", "micah"]),
    plain("NAM", "Nahum", Section::OldTestament, 3, &["nam", "na", "nah", "nahum"]),
    plain("HAB", "Habakkuk", Section::OldTestament, 3, &["hab", "hb", "habakkuk"]),
    plain("ZEP", "Zephaniah", Section::OldTestament, 3, &["zep", "zp", "zeph", "zephaniah"]),
    plain("HAG", "Haggai", Section::OldTestament, 2, &["hag", "hg", "haggai"]),
    plain("ZEC", "Zechariah", Section::OldTestament, 14, &["zec", "zc", "zech", "zechariah"]),
    plain("MAL", "Malachi", Section::OldTestament, 4, &["mal", "ml", "malachi"]),
    // New Testament
    plain("MAT", "Matthew", Section::NewTestament, 28, &["mat", "mt", "matt", "matthew"]),
    plain("MRK", "Mark", Section::NewTestament, 16, &["mrk", "mk", "mr", "mark"]),
    plain("LUK", "Luke", Section::NewTestament, 24, &["luk", "lk", "luke"]),
    plain("JHN", "John", Section::NewTestament, 21, &["jhn", "jn", "john"]),
    plain("ACT", "Acts", Section::NewTestament, 28, &["act", "ac", "acts"]),
    plain("ROM", "Romans", Section::NewTestament, 16, &["rom", "ro", "rm", "romans"]),
    numbered("1CO", "1 Corinthians", Section::NewTestament, 16, 1, &["co", "cor", "corinthians"]),
    numbered("2CO", "2 Corinthians", Section::NewTestament, 13, 2, &["co", "cor", "corinthians"]),
    plain("GAL", "Galatians", Section::NewTestament, 6, &["gal", "ga", "galatians"]),
    plain("EPH", "Ephesians", Section::NewTestament, 6, &["eph", "ephes", "ephesians"]),
    plain("PHP", "Philippians", Section::NewTestament, 4, &["php", "phil", "philippians"]),
    plain("COL", "Colossians", Section::NewTestament, 4, &["col", "colossians"]),
    numbered("1TH", "1 Thessalonians", Section::NewTestament, 5, 1, &["th", "thes", "thess", "thessalonians"]),
    numbered("2TH", "2 Thessalonians", Section::NewTestament, 3, 2, &["th", "thes", "thess", "thessalonians"]),
    numbered("1TI", "1 Timothy", Section::NewTestament, 6, 1, &["ti", "tim", "timothy"]),
    numbered("2TI", "2 Timothy", Section::NewTestament, 4, 2, &["ti", "tim", "timothy"]),
    plain("TIT", "Titus", Section::NewTestament, 3, &["tit", "titus"]),
    plain("PHM", "Philemon", Section::NewTestament, 1, &["phm", "phlm", "philem", "philemon"]),
    plain("HEB", "Hebrews", Section::NewTestament, 13, &["heb", "hebrews"]),
    plain("JAS", "James", Section::NewTestament, 5, &["jas", "jm", "jam", "jms", "james"]),
    numbered("1PE", "1 Peter", Section::NewTestament, 5, 1, &["pe", "pt", "pet", "peter"]),
    numbered("2PE", "2 Peter", Section::NewTestament, 3, 2, &["pe", "pt", "pet", "peter"]),
    numbered("1JN", "1 John", Section::NewTestament, 5, 1, &["jn", "jhn", "jo", "john"]),
    numbered("2JN", "2 John", Section::NewTestament, 1, 2, &["jn", "jhn", "jo", "john"]),
    numbered("3JN", "3 John", Section::NewTestament, 1, 3, &["jn", "jhn", "jo", "john"]),
    plain("JUD", "Jude", Section::NewTestament, 1, &["jud", "jude"]),
    plain("REV", "Revelation", Section::NewTestament, 22, &["rev", "re", "revelation", "apocalypse", "apoc"]),
    // Apocrypha / deuterocanon
    plain("TOB", "Tobit", Section::Apocrypha, 14, &["tob", "tb", "tobit"]),
    plain("JDT", "Judith", Section::Apocrypha, 16, &["jdt", "jth", "judith"]),
    plain("ESG", "Esther (Greek)", Section::Apocrypha, 10, &["esg", "gkest", "gkesth", "greek esther", "esther greek", "addesth"]),
    plain("WIS", "Wisdom", Section::Apocrypha, 19, &["wis", "ws", "wisd", "wisdom", "wisdom of solomon"]),
    plain("SIR", "Sirach", Section::Apocrypha, 51, &["sir", "sirach", "ecclus", "ecclesiasticus"]),
    plain("BAR", "Baruch", Section::Apocrypha, 5, &["bar", "baruch"]),
    plain("LJE", "Letter of Jeremiah", Section::Apocrypha, 1, &["lje", "epjer", "letter of jeremiah", "epistle of jeremiah", "epistle of jeremy"]),
    plain("S3Y", "Song of the Three", Section::Apocrypha, 1, &["s3y", "praz", "azariah", "song of the three", "song of three", "prayer of azariah"]),
    plain("SUS", "Susanna", Section::Apocrypha, 1, &["sus", "susanna"]),
    plain("BEL", "Bel and the Dragon", Section::Apocrypha, 1, &["bel", "bel and the dragon"]),
    numbered("1MA", "1 Maccabees", Section::Apocrypha, 16, 1, &["ma", "mac", "macc", "maccabees"]),
    numbered("2MA", "2 Maccabees", Section::Apocrypha, 15, 2, &["ma", "mac", "macc", "maccabees"]),
    numbered("3MA", "3 Maccabees", Section::Apocrypha, 7, 3, &["ma", "mac", "macc", "maccabees"]),
    numbered("4MA", "4 Maccabees", Section::Apocrypha, 18, 4, &["ma", "mac", "macc", "maccabees"]),
    numbered("1ES", "1 Esdras", Section::Apocrypha, 9, 1, &["es", "esd", "esdr", "esdras"]),
    numbered("2ES", "2 Esdras", Section::Apocrypha, 16, 2, &["es", "esd", "esdr", "esdras"]),
    plain("MAN", "Prayer of Manasseh", Section::Apocrypha, 1, &["man", "pma", "manasseh", "manasses", "prayer of manasseh"]),
    plain("PS2", "Psalm 151", Section::Apocrypha, 1, &["ps2", "ps151", "psalm 151", "additional psalm"]),
];

fn ordinal_prefixes(ordinal: u8) -> &'static [&'static str] {
    match ordinal {
        1 => &["1", "1st", "i", "first"],
        2 => &["2", "2nd", "ii", "second"],
        3 => &["3", "3rd", "iii", "third"],
        _ => &["4", "4th", "iv", "fourth"],
    }
}

/// Free-text tokens that show up where a reference could stand but name a
/// language or translation family, not a book.
const SKIP_TOKENS: &[&str] = &[
    "english",
    "na",
    "latin",
    "greek",
    "greek2",
    "hebrew",
    "aramaic",
    "syriac",
    "vulgate",
    "septuagint",
    "lxx",
    "masoretic",
    "kjv",
    "geneva",
    "bishops",
    "coverdale",
    "tyndale",
];

// =============================================================================
// Catalog
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct BookInfo {
    pub id: BookId,
    pub name: &'static str,
    pub section: Section,
    pub chapters: u32,
    /// Position in canonical order, 0-based.
    pub order: usize,
}

/// Outcome of a book-name lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookLookup {
    Resolved(BookId),
    /// A known non-book token; not an error, just nothing to resolve.
    Skip,
    Unknown,
}

#[derive(Debug)]
pub struct BookCatalog {
    books: Vec<BookInfo>,
    by_id: BTreeMap<String, usize>,
    by_alias: BTreeMap<String, usize>,
}

static CATALOG: LazyLock<BookCatalog> = LazyLock::new(BookCatalog::build);

impl BookCatalog {
    pub fn global() -> &'static BookCatalog {
        &CATALOG
    }

    fn build() -> Self {
        let mut books = Vec::with_capacity(BOOK_SPECS.len());
        let mut by_id = BTreeMap::new();
        let mut by_alias: BTreeMap<String, usize> = BTreeMap::new();

        for (order, spec) in BOOK_SPECS.iter().enumerate() {
            let id = BookId::new(spec.id).expect("Invalid static book id");
            books.push(BookInfo {
                id,
                name: spec.name,
                section: spec.section,
                chapters: spec.chapters,
                order,
            });
            by_id.insert(spec.id.to_ascii_lowercase(), order);
            by_alias
                .entry(spec.id.to_ascii_lowercase())
                .or_insert(order);

            match spec.ordinal {
                None => {
                    for alias in spec.aliases {
                        by_alias.entry((*alias).to_string()).or_insert(order);
                        if alias.contains(' ') {
                            let despaced: String =
                                alias.chars().filter(|c| !c.is_whitespace()).collect();
                            by_alias.entry(despaced).or_insert(order);
                        }
                    }
                }
                Some(ordinal) => {
                    for prefix in ordinal_prefixes(ordinal) {
                        for base in spec.aliases {
                            by_alias
                                .entry(format!("{} {}", prefix, base))
                                .or_insert(order);
                            // Only digit prefixes fuse safely: "1sa" is
                            // unambiguous, "isa" is Isaiah.
                            if prefix.starts_with(|c: char| c.is_ascii_digit()) {
                                by_alias
                                    .entry(format!("{}{}", prefix, base))
                                    .or_insert(order);
                            }
                        }
                    }
                }
            }
        }

        Self {
            books,
            by_id,
            by_alias,
        }
    }

    /// Resolve a raw book token to a canonical id, a skip, or unknown.
    pub fn resolve(&self, raw: &str) -> BookLookup {
        let cleaned = clean_token(raw);
        if cleaned.is_empty() {
            return BookLookup::Unknown;
        }
        if let Some(&idx) = self.by_alias.get(&cleaned) {
            return BookLookup::Resolved(self.books[idx].id.clone());
        }
        let despaced: String = cleaned.chars().filter(|c| !c.is_whitespace()).collect();
        if let Some(&idx) = self.by_alias.get(&despaced) {
            return BookLookup::Resolved(self.books[idx].id.clone());
        }
        if SKIP_TOKENS.contains(&cleaned.as_str()) {
            return BookLookup::Skip;
        }
        warn!(book = %raw, "unknown book name");
        BookLookup::Unknown
    }

    /// True when the whole token is a known non-book word ("English",
    /// "NA"); such tokens resolve to nothing without being an error.
    pub fn is_skip_token(&self, raw: &str) -> bool {
        SKIP_TOKENS.contains(&clean_token(raw).as_str())
    }

    pub fn get(&self, id: &BookId) -> Option<&BookInfo> {
        self.by_id
            .get(&id.as_str().to_ascii_lowercase())
            .map(|&idx| &self.books[idx])
    }

    pub fn order_index(&self, id: &BookId) -> Option<usize> {
        self.get(id).map(|info| info.order)
    }

    pub fn by_order(&self, order: usize) -> Option<&BookInfo> {
        self.books.get(order)
    }

    pub fn chapters(&self, id: &BookId) -> Option<u32> {
        self.get(id).map(|info| info.chapters)
    }

    pub fn books(&self) -> &[BookInfo] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn psalms(&self) -> BookId {
        BookId::new("PSA").expect("Invalid static book id")
    }
}

/// Lowercase, strip bracket/asterisk/period decoration, collapse whitespace.
fn clean_token(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let stripped: String = lowered
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | '*' | '.'))
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
