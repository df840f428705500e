//! Text probes used by the stop-condition rules

use aho_corasick::{AhoCorasick, MatchKind};
use regex::Regex;
use std::sync::LazyLock;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("Invalid stop-condition regex")
}

static REQUIRED_YEARS: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)(\d{1,2})\s*\+?\s*years"));
static DIRECT_REPORTS: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)(\d{1,2})\s*\+?\s*(?:direct\s*)?reports"));
static TEAM_OF: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)team\s+of\s+(\d{1,2})"));

static DAYS_THEN_ONSITE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(\d)\s*days?\s*(?:a|per|/)?\s*week[^\n]*on[- ]?site"));
static ONSITE_THEN_DAYS: LazyLock<Regex> = LazyLock::new(|| compile(r"on[- ]?site[^\n.]*?(\d)\s*days?"));
static WEEKDAYS_ONSITE: LazyLock<Regex> = LazyLock::new(|| compile(r"monday.*friday.*on[- ]?site"));

pub static CA_OR_NY: LazyLock<Regex> = LazyLock::new(|| compile(r"california|\bca\b|new\s+york|\bny\b"));
pub static NO_REMOTE: LazyLock<Regex> = LazyLock::new(|| compile(r"no\s*remote|on[- ]?site\s*only"));

pub static ARCHITECT: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)\barchitect\b"));
pub static INDIVIDUAL_CONTRIBUTOR: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)\b(?:individual\s+contributor|ic)\b"));
pub static LEGACY_STACK: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)\b(?:mainframe|cobol|vb6|silverlight|powerbuilder|foxpro|delphi)\b")
});

pub static CLEARANCE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)ts/?sci|ts\s*sci|top\s*secret|secret\s+clearance"));

pub static SECURITY_CONTEXT: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)cyber|it\s*security|security\s+(?:engineer|analyst|operations|architect)")
});
pub static TECHNICAL_CONTEXT: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)engineer|developer|software|system|network|security\s+(?:engineer|analyst|architect)")
});
pub static PHYSICAL_SECURITY: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)physical\s+security"));
// Prefix matches: "audits", "auditing" and "governance-led" count too.
pub static COMPLIANCE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)\b(?:compliance|audit|sox|hipaa|pci)"));
pub static GOVERNANCE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)\b(?:governance|risk\s+management|grc)"));

pub static DEVOPS_ROLE: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)devops|infrastructure"));
pub static QA_ROLE: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)\bqa\b|quality\s+assurance"));
pub static PM_ROLE: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)project\s+manager|scrum\s+master"));
pub static DEV_VOCABULARY: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)developer|engineer"));

/// Terms that disqualify unless they sit in a security context.
pub const OT_TERMS: &[&str] = &["ot", "operational technology", "scada", "industrial controls"];

/// Characters inspected on each side of an OT term.
pub const CONTEXT_WINDOW: usize = 40;

fn first_number(re: &Regex, text: &str) -> Option<u32> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Years of experience stated in free text ("10+ years").
pub fn years_from_text(text: &str) -> Option<u32> {
    first_number(&REQUIRED_YEARS, text)
}

/// Direct reports stated in free text ("6 direct reports", "team of 6").
pub fn direct_reports_from_text(text: &str) -> Option<u32> {
    first_number(&DIRECT_REPORTS, text).or_else(|| first_number(&TEAM_OF, text))
}

/// Onsite days per week stated in lowercased text.
pub fn onsite_days_from_text(lower: &str) -> Option<u32> {
    first_number(&DAYS_THEN_ONSITE, lower)
        .or_else(|| first_number(&ONSITE_THEN_DAYS, lower))
        .or_else(|| WEEKDAYS_ONSITE.is_match(lower).then_some(5))
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// True when `[start, end)` of `text` sits on word boundaries at both ends,
/// with the same semantics as a regex `\b...\b` around the match.
fn on_word_boundaries(text: &str, start: usize, end: usize) -> bool {
    let (Some(first), Some(last)) = (text[start..end].chars().next(), text[start..end].chars().next_back())
    else {
        return false;
    };
    let before = text[..start].chars().next_back().is_some_and(is_word_char);
    let after = text[end..].chars().next().is_some_and(is_word_char);

    is_word_char(first) != before && is_word_char(last) != after
}

/// Case-insensitive whole-word scanner over a fixed keyword list.
pub struct KeywordScanner {
    keywords: Vec<String>,
    matcher: Option<AhoCorasick>,
}

impl KeywordScanner {
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Self {
        let keywords: Vec<String> = keywords
            .iter()
            .map(|k| k.as_ref().trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();

        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::Standard)
            .build(&keywords)
            .ok();

        Self { keywords, matcher }
    }

    /// First whole-word match position of each keyword, in keyword order.
    pub fn find(&self, text: &str) -> Vec<(String, usize)> {
        let Some(matcher) = &self.matcher else {
            return Vec::new();
        };

        let mut first_hit: Vec<Option<usize>> = vec![None; self.keywords.len()];
        for mat in matcher.find_overlapping_iter(text) {
            let slot = &mut first_hit[mat.pattern().as_usize()];
            if slot.is_none() && on_word_boundaries(text, mat.start(), mat.end()) {
                *slot = Some(mat.start());
            }
        }

        self.keywords
            .iter()
            .zip(first_hit)
            .filter_map(|(keyword, hit)| hit.map(|pos| (keyword.clone(), pos)))
            .collect()
    }
}

/// Up to `CONTEXT_WINDOW` characters before `start` and from `start` onward.
pub fn context_window(text: &str, start: usize) -> String {
    let mut before: Vec<char> = text[..start].chars().rev().take(CONTEXT_WINDOW).collect();
    before.reverse();
    before
        .into_iter()
        .chain(text[start..].chars().take(CONTEXT_WINDOW))
        .collect()
}
