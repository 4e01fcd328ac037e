//! Sentinel rewriting for WordprocessingML runs
//!
//! The host engine leaves raw `\n` characters and escaped `<b>`/`</b>`
//! markers inside run text. Neither is valid WordprocessingML: a hard
//! line break must be a `<w:br/>` element, and a bold span must be its
//! own run with `<w:b/>` in the run properties. Each mutator matches
//! canonical runs and rewrites the sentinel into self-contained valid
//! markup carrying the original run properties forward.

use regex_lite::{Captures, Regex};
use std::sync::OnceLock;

/// Bold span start sentinel, as it appears in escaped run text
pub const BOLD_START: &str = "&lt;b&gt;";
/// Bold span stop sentinel
pub const BOLD_STOP: &str = "&lt;/b&gt;";

/// Ordered rewriting pipeline. Bold runs are split first so the
/// line-break pass still sees canonical `<w:r>` shapes.
const MUTATORS: &[(&str, fn(&str) -> String)] = &[
    ("bold-spans", rewrite_bold_spans),
    ("line-breaks", rewrite_line_breaks),
];

/// Rewrite rendered document.xml text into valid markup.
///
/// Unpaired sentinel contract: every marker is rewritten
/// independently, in document order. An unpaired `<b>` leaves the
/// rest of its run bold; an unpaired `</b>` starts a non-bold run.
/// Malformed input is never an error and never silently dropped.
pub fn clean(rendered: &str) -> String {
    let mut text = rendered.to_string();
    for (name, mutator) in MUTATORS {
        tracing::debug!(mutator = name, "applying docx mutator");
        text = mutator(&text);
    }
    text
}

fn run_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<w:r>(?:<w:rPr>(.*?)</w:rPr>)?<w:t(?: [^>]*)?>([^<]*)</w:t></w:r>")
            .unwrap()
    })
}

/// Replace `\n` inside run text with a native break element
fn rewrite_line_breaks(text: &str) -> String {
    run_regex()
        .replace_all(text, |caps: &Captures| {
            let run = &caps[0];
            if !caps[2].contains('\n') {
                return run.to_string();
            }
            run.replace('\n', "</w:t><w:br/><w:t>")
        })
        .into_owned()
}

/// Split runs around bold sentinels, carrying run properties forward
fn rewrite_bold_spans(text: &str) -> String {
    run_regex()
        .replace_all(text, |caps: &Captures| {
            let run = &caps[0];
            if !caps[2].contains(BOLD_START) && !caps[2].contains(BOLD_STOP) {
                return run.to_string();
            }
            let props = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            let bold_open = format!(
                "</w:t></w:r><w:r><w:rPr>{props}<w:b w:val=\"true\"/></w:rPr><w:t>"
            );
            let bold_close = format!(
                "</w:t></w:r><w:r><w:rPr>{props}<w:b w:val=\"false\"/></w:rPr><w:t>"
            );
            run.replace(BOLD_START, &bold_open)
                .replace(BOLD_STOP, &bold_close)
        })
        .into_owned()
}
