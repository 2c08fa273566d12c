use std::sync::LazyLock;

use regex::Regex;

static EMPHASIS_MARKERS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[*_`]+").unwrap());

static EXPANSIONS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"\bi\.e\.", "that is"),
        (r"\be\.g\.", "for example"),
        (r"\betc\.", "etcetera"),
        (r"\bDr\.", "Doctor"),
        (r"(\d)mg\b", "${1} milligrams"),
        (r"\bmg\b", "milligrams"),
        (r"(\d)ml\b", "${1} milliliters"),
        (r"\bml\b", "milliliters"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), replacement))
    .collect()
});

/// Rewrites model output so a synthesizer reads it naturally: emphasis
/// markers are dropped and common medical abbreviations are spelled out.
pub fn normalize_for_speech(text: &str) -> String {
    let mut spoken = EMPHASIS_MARKERS.replace_all(text, "").into_owned();

    for (pattern, replacement) in EXPANSIONS.iter() {
        spoken = pattern.replace_all(&spoken, *replacement).into_owned();
    }

    spoken.split_whitespace().collect::<Vec<_>>().join(" ")
}
