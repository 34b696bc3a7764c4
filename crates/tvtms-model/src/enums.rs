use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How a tradition's verse relates to the standard numbering.
///
/// The dataset spells these a dozen ways ("MergedPrev verse",
/// "SubdividedVerse", "TextMayBeMissing"); `normalize` folds every known
/// spelling onto one member and is total over arbitrary input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingType {
    /// Verse numbering agrees with the standard.
    Standard,
    /// Same verse, different number (includes title renumbering).
    Renumbering,
    /// Verse text is merged into the preceding standard verse.
    MergePrev,
    /// Verse text is merged into the following standard verse.
    MergeNext,
    /// Merge without a stated direction.
    Merge,
    /// One tradition verse splits across several standard verses.
    Split,
    /// Verse absent from this tradition.
    Omit,
    /// Verse present here but absent from the standard at this position.
    Insert,
    /// Produced from a `$` section-range line, not a single data row.
    SectionRange,
    Special,
}

impl MappingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MappingType::Standard => "standard",
            MappingType::Renumbering => "renumbering",
            MappingType::MergePrev => "merge_prev",
            MappingType::MergeNext => "merge_next",
            MappingType::Merge => "merge",
            MappingType::Split => "split",
            MappingType::Omit => "omit",
            MappingType::Insert => "insert",
            MappingType::SectionRange => "section_range",
            MappingType::Special => "special",
        }
    }

    /// Exact spellings first, then substring heuristics. `None` means the
    /// phrase matched nothing known; callers decide whether that deserves
    /// a diagnostic before falling back to `normalize`'s default.
    pub fn recognize(raw: &str) -> Option<Self> {
        let folded = raw.trim().to_ascii_lowercase();
        if folded.is_empty() {
            return None;
        }
        let exact = match folded.as_str() {
            "standard" | "keep verse" | "keepverse" => Some(MappingType::Standard),
            "renumbering" | "renumber" | "renumber verse" | "renumberverse"
            | "startdifferent" | "start different" | "psalm title" | "renumber title" => {
                Some(MappingType::Renumbering)
            }
            "merge_prev" | "mergedprev" | "mergedprev verse" | "merged prev" => {
                Some(MappingType::MergePrev)
            }
            "merge_next" | "mergednext" | "mergednext verse" | "merged next" => {
                Some(MappingType::MergeNext)
            }
            "merge" | "merged" | "merged verse" => Some(MappingType::Merge),
            "split" | "splitverse" | "subdividedverse" | "subdivided verse" => {
                Some(MappingType::Split)
            }
            "omit" | "empty verse" | "emptyverse" | "missing verse" | "missingverse"
            | "textmaybemissing" => Some(MappingType::Omit),
            "insert" | "longverse" | "long verse" | "longverseelsewhere"
            | "longverseduplicated" => Some(MappingType::Insert),
            "section_range" | "sectionrange" | "section range" => Some(MappingType::SectionRange),
            "special" => Some(MappingType::Special),
            _ => None,
        };
        if exact.is_some() {
            return exact;
        }
        if folded.contains("merge") {
            if folded.contains("prev") {
                return Some(MappingType::MergePrev);
            }
            if folded.contains("next") {
                return Some(MappingType::MergeNext);
            }
            return Some(MappingType::Merge);
        }
        if folded.contains("renumber") || folded.contains("startdifferent") {
            return Some(MappingType::Renumbering);
        }
        if folded.contains("split") || folded.contains("subdivide") {
            return Some(MappingType::Split);
        }
        if folded.contains("missing") || folded.contains("empty") || folded.contains("omit") {
            return Some(MappingType::Omit);
        }
        if folded.contains("longverse") || folded.contains("insert") {
            return Some(MappingType::Insert);
        }
        if folded.contains("keep") {
            return Some(MappingType::Standard);
        }
        None
    }

    /// Total normalization: anything unrecognized is `Standard`.
    pub fn normalize(raw: &str) -> Self {
        Self::recognize(raw).unwrap_or(MappingType::Standard)
    }
}

impl fmt::Display for MappingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MappingType {
    type Err = String;

    /// Strict parse: canonical names only. Use `normalize` for dataset
    /// phrases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(MappingType::Standard),
            "renumbering" => Ok(MappingType::Renumbering),
            "merge_prev" => Ok(MappingType::MergePrev),
            "merge_next" => Ok(MappingType::MergeNext),
            "merge" => Ok(MappingType::Merge),
            "split" => Ok(MappingType::Split),
            "omit" => Ok(MappingType::Omit),
            "insert" => Ok(MappingType::Insert),
            "section_range" => Ok(MappingType::SectionRange),
            "special" => Ok(MappingType::Special),
            _ => Err(format!("Unknown mapping type: {}", s)),
        }
    }
}

/// Editorial confidence/necessity classification from the NoteMarker column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// Optional mapping.
    Opt,
    /// Necessary mapping.
    Nec,
    /// Accidental/academic.
    Acd,
    /// Inferential/informational.
    Inf,
    None,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Opt => "Opt",
            Category::Nec => "Nec",
            Category::Acd => "Acd",
            Category::Inf => "Inf",
            Category::None => "None",
        }
    }

    /// Case-insensitive, tolerates the trailing period the dataset writes
    /// ("Opt.") and the long forms. `None` (the Option) means unmatched
    /// non-blank input.
    pub fn recognize(raw: &str) -> Option<Self> {
        let trimmed = raw.trim().trim_end_matches('.');
        match trimmed.to_ascii_lowercase().as_str() {
            "" | "none" => Some(Category::None),
            "opt" | "optional" => Some(Category::Opt),
            "nec" | "necessary" => Some(Category::Nec),
            "acd" | "accidental" | "academic" => Some(Category::Acd),
            "inf" | "inferential" | "informational" => Some(Category::Inf),
            _ => Option::None,
        }
    }

    /// Total normalization: anything unrecognized is `Category::None`.
    pub fn normalize(raw: &str) -> Self {
        Self::recognize(raw).unwrap_or(Category::None)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "opt" => Ok(Category::Opt),
            "nec" => Ok(Category::Nec),
            "acd" => Ok(Category::Acd),
            "inf" => Ok(Category::Inf),
            "none" => Ok(Category::None),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

/// Processing tier for the action replay.
///
/// Tiers run strictly in `rank` order; every mapping of one tier commits
/// before the next tier starts, which is what makes the at-most-once
/// source-row consumption guarantee hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionTier {
    Merged,
    Renumber,
    Keep,
    IfEmpty,
    PsalmTitle,
    RenumberTitle,
}

impl ActionTier {
    pub const IN_PRIORITY_ORDER: [ActionTier; 6] = [
        ActionTier::Merged,
        ActionTier::Renumber,
        ActionTier::Keep,
        ActionTier::IfEmpty,
        ActionTier::PsalmTitle,
        ActionTier::RenumberTitle,
    ];

    pub fn rank(&self) -> u8 {
        match self {
            ActionTier::Merged => 0,
            ActionTier::Renumber => 1,
            ActionTier::Keep => 2,
            ActionTier::IfEmpty => 3,
            ActionTier::PsalmTitle => 4,
            ActionTier::RenumberTitle => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionTier::Merged => "Merged",
            ActionTier::Renumber => "Renumber",
            ActionTier::Keep => "Keep",
            ActionTier::IfEmpty => "IfEmpty",
            ActionTier::PsalmTitle => "Psalm Title",
            ActionTier::RenumberTitle => "Renumber Title",
        }
    }

    /// Classify from the raw action phrase, falling back on the normalized
    /// mapping type when the phrase names no tier.
    pub fn classify(action: &str, mapping_type: MappingType) -> Self {
        let folded = action.trim().to_ascii_lowercase();
        if folded.contains("renumber title") {
            return ActionTier::RenumberTitle;
        }
        if folded.contains("psalm") && folded.contains("title") {
            return ActionTier::PsalmTitle;
        }
        if folded.contains("merge") {
            return ActionTier::Merged;
        }
        if folded.contains("ifempty") || folded.contains("if empty") {
            return ActionTier::IfEmpty;
        }
        if folded.contains("renumber") || folded.contains("startdifferent") {
            return ActionTier::Renumber;
        }
        if folded.contains("keep") {
            return ActionTier::Keep;
        }
        match mapping_type {
            MappingType::MergePrev | MappingType::MergeNext | MappingType::Merge => {
                ActionTier::Merged
            }
            MappingType::Renumbering => ActionTier::Renumber,
            _ => ActionTier::Keep,
        }
    }
}

impl fmt::Display for ActionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "merged" => Ok(ActionTier::Merged),
            "renumber" => Ok(ActionTier::Renumber),
            "keep" => Ok(ActionTier::Keep),
            "ifempty" => Ok(ActionTier::IfEmpty),
            "psalm title" | "psalmtitle" => Ok(ActionTier::PsalmTitle),
            "renumber title" | "renumbertitle" => Ok(ActionTier::RenumberTitle),
            _ => Err(format!("Unknown action tier: {}", s)),
        }
    }
}
