//! First-date detection and normalization.
//!
//! Statements print their issue date in many shapes (`Mar 3, 2021`,
//! `3 March 2021`, `03/03/21`, `2021/03/03`) and layout reconstruction often
//! drops the spaces inside them. The normalizer finds the first plausible date,
//! repairs missing spaces and renders it as a filename suffix `-YYYY-Mon-D`.
//!
//! Two-digit years follow chrono's `%y` rule: `00`–`69` map to 2000–2069 and
//! `70`–`99` to 1970–1999.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

const MONTHS: &str = "January|Jan|February|Feb|March|Mar|April|Apr|May|June|Jun|July|Jul|\
                      August|Aug|September|Sep|October|Oct|November|Nov|December|Dec";

/// Layouts tried in order after space repair; the first that parses wins.
///
/// `%b` accepts both abbreviated and full month names, case-insensitively.
const DATE_LAYOUTS: [&str; 5] = ["%b %d %Y", "%d %b %Y", "%m/%d/%y", "%m/%d/%Y", "%Y/%m/%d"];

/// Output layout, e.g. `-2021-Mar-3`.
const SUFFIX_LAYOUT: &str = "-%Y-%b-%-d";

lazy_static! {
    /// Month-day or day-month with a 19xx/20xx year, or a numeric slash date
    static ref RE_DATE: Regex = Regex::new(&format!(
        r"(?i)(({m})\d\d?|\d\d?({m})),?(19|20)\d{{2}}|\d\d?/\d\d?/(19|20)?\d\d|20\d\d/\d\d?/\d\d?",
        m = MONTHS
    ))
    .unwrap();

    /// Space repair: digit directly followed by a letter, letter followed by a
    /// digit, and a numeric run glued to its trailing 4-digit year
    static ref RE_SPACE_REPAIR: [Regex; 3] = [
        Regex::new(r"(\d)([[:alpha:]])").unwrap(),
        Regex::new(r"([[:alpha:]])(\d)").unwrap(),
        Regex::new(r"(\d+)(\d{4})").unwrap(),
    ];
}

/// Find and parse the first plausible date in `text`.
///
/// The raw text is searched first; if that yields no date, the search is
/// retried with all spaces removed, which recovers dates whose characters were
/// positioned individually (`M a r 3 , 2 0 2 1`).
pub fn first_date(text: &str) -> Option<NaiveDate> {
    find_and_parse(text).or_else(|| find_and_parse(&text.replace(' ', "")))
}

fn find_and_parse(text: &str) -> Option<NaiveDate> {
    RE_DATE
        .find(text)
        .and_then(|found| parse_candidate(found.as_str()))
}

/// Normalized first date of `text` as `-YYYY-Mon-D`, or an empty string.
///
/// # Examples
///
/// ```
/// use pdftag::text::date::normalize_first_date;
///
/// assert_eq!(normalize_first_date("Statement date Mar3,2021"), "-2021-Mar-3");
/// assert_eq!(normalize_first_date("no date here"), "");
/// ```
pub fn normalize_first_date(text: &str) -> String {
    first_date(text)
        .map(|date| date.format(SUFFIX_LAYOUT).to_string())
        .unwrap_or_default()
}

/// Repair a matched date string and parse it against [`DATE_LAYOUTS`].
fn parse_candidate(candidate: &str) -> Option<NaiveDate> {
    let mut repaired = candidate.to_lowercase().replacen(',', "", 1);
    for re in RE_SPACE_REPAIR.iter() {
        repaired = re.replace_all(&repaired, "${1} ${2}").into_owned();
    }

    let parsed = DATE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDate::parse_from_str(&repaired, layout).ok());
    if parsed.is_none() {
        log::debug!("date candidate '{}' (repaired '{}') matched no layout", candidate, repaired);
    }
    parsed
}
