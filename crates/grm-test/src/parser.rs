// Corpus line parsing: RULE<sep>input<sep>reference

use crate::HarnessError;

/// Field separator used when none is configured.
pub const DEFAULT_SEPARATOR: char = '\t';

/// One scored test derived from a corpus line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    /// 1-based physical line number in the corpus.
    pub line_number: usize,
    pub rule: String,
    pub input: Vec<u8>,
    pub reference: Vec<u8>,
}

/// What a single corpus line turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Blank line or `#` comment: counted, never scored.
    Comment,
    Test(TestCase),
}

/// Whether `raw` is a blank line or a `#` comment.
#[inline]
pub fn is_comment(raw: &[u8]) -> bool {
    raw.first().is_none_or(|&b| b == b'#')
}

/// Parse one corpus line (without its trailing newline).
///
/// The rule is everything before the first separator, the reference is
/// everything after the last one, and the input is whatever lies between, so
/// the input may itself contain separators. A line with fewer than two
/// separators is a format error for the whole corpus.
///
/// A non-empty `rule_override` replaces the rule named on the line.
pub fn parse_line(
    raw: &[u8],
    line_number: usize,
    separator: char,
    rule_override: Option<&str>,
) -> Result<ParseOutcome, HarnessError> {
    if is_comment(raw) {
        return Ok(ParseOutcome::Comment);
    }

    let mut buf = [0u8; 4];
    let sep = separator.encode_utf8(&mut buf).as_bytes();

    let bounds = find_first(raw, sep).zip(find_last(raw, sep));
    let (rule_end, input_end) = match bounds {
        Some((first, last)) if first < last => (first, last),
        _ => {
            return Err(HarnessError::MalformedLine {
                line: line_number,
                text: String::from_utf8_lossy(raw).into_owned(),
                separator,
            });
        }
    };

    let rule = match rule_override.filter(|name| !name.is_empty()) {
        Some(name) => name.to_string(),
        None => String::from_utf8_lossy(&raw[..rule_end]).into_owned(),
    };

    Ok(ParseOutcome::Test(TestCase {
        line_number,
        rule,
        input: raw[rule_end + sep.len()..input_end].to_vec(),
        reference: raw[input_end + sep.len()..].to_vec(),
    }))
}

fn find_first(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn find_last(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).rposition(|w| w == needle)
}
