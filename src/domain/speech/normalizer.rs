use once_cell::sync::Lazy;
use regex::Regex;

static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*```[^\n]*$").expect("valid code fence regex"));
static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*#{1,6}[ \t]+").expect("valid heading regex"));
static STRAY_MARKUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[*_~`#]").expect("valid markup regex"));
static BLOCK_QUOTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*(?:>[ \t]*)+").expect("valid quote regex"));
static BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("valid newline regex"));
static METADATA_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^\s*(?:(?:title|duration|time|note|meditation|script|guide|introduction)\s*:|\d+[.)])",
    )
    .expect("valid metadata regex")
});

/// Strip markdown and leading metadata from a generated script so that speech
/// providers only read the meditation itself.
///
/// Emphasis, heading, block-quote and code-fence markers are removed, runs of three or
/// more newlines collapse to a single blank line, and leading lines that are blank or
/// look like metadata (`Title:`, `Duration:`, `Note:`, `1.` …) are dropped up to the
/// first real line. Everything after that line is kept as is. The function is
/// idempotent.
pub fn normalize_script(raw: &str) -> String {
    let text = raw.replace("\r\n", "\n");
    let text = CODE_FENCE.replace_all(&text, "");
    let text = HEADING.replace_all(&text, "");
    let text = STRAY_MARKUP.replace_all(&text, "");
    let text = BLOCK_QUOTE.replace_all(&text, "");
    let text = BLANK_RUN.replace_all(&text, "\n\n");

    let lines: Vec<&str> = text.split('\n').collect();
    let first_meaningful = lines
        .iter()
        .position(|line| !line.trim().is_empty() && !METADATA_LINE.is_match(line));

    match first_meaningful {
        Some(start) => lines[start..].join("\n").trim_end().to_string(),
        None => String::new(),
    }
}
