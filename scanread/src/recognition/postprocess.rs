use once_cell::sync::Lazy;
use regex::Regex;

static EXCESS_NEWLINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("newline pattern is valid"));

static LONE_LOWERCASE_L: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bl\b").expect("lone-l pattern is valid"));

/// Literal confusions fixed in every language, applied in order.
///
/// These are unconditional: "modern" becomes "modem" and "clear" becomes
/// "dear". Kept for output parity with existing clients.
const CONFUSION_FIXES: &[(&str, &str)] = &[("|", "I"), ("rn", "m"), ("cl", "d")];

const LATVIAN_DIACRITICS: &[(char, char)] = &[
    ('ā', 'a'),
    ('č', 'c'),
    ('ē', 'e'),
    ('ģ', 'g'),
    ('ī', 'i'),
    ('ķ', 'k'),
    ('ļ', 'l'),
    ('ņ', 'n'),
    ('š', 's'),
    ('ū', 'u'),
    ('ž', 'z'),
    ('Ā', 'A'),
    ('Č', 'C'),
    ('Ē', 'E'),
    ('Ģ', 'G'),
    ('Ī', 'I'),
    ('Ķ', 'K'),
    ('Ļ', 'L'),
    ('Ņ', 'N'),
    ('Š', 'S'),
    ('Ū', 'U'),
    ('Ž', 'Z'),
];

fn diacritic_table(language: &str) -> Option<&'static [(char, char)]> {
    match language.trim().to_lowercase().as_str() {
        "lav" => Some(LATVIAN_DIACRITICS),
        _ => None,
    }
}

fn strip_diacritics(text: &str, table: &[(char, char)]) -> String {
    text.chars()
        .map(|ch| {
            table
                .iter()
                .find(|(from, _)| *from == ch)
                .map_or(ch, |(_, to)| *to)
        })
        .collect()
}

/// Clean raw engine output for `language`.
///
/// 1. Runs of three or more newlines collapse to a paragraph break.
/// 2. Common confusions are rewritten: `|` and a lone `l` become `I`, `rn`
///    becomes `m`, `cl` becomes `d`.
/// 3. Languages with a diacritic table (Latvian) are folded to base letters.
/// 4. Surrounding whitespace is trimmed.
pub fn post_process(raw: &str, language: &str) -> String {
    let squeezed = EXCESS_NEWLINES.replace_all(raw, "\n\n");

    let mut text = LONE_LOWERCASE_L.replace_all(&squeezed, "I").into_owned();
    for (from, to) in CONFUSION_FIXES {
        text = text.replace(from, to);
    }

    if let Some(table) = diacritic_table(language) {
        text = strip_diacritics(&text, table);
    }

    text.trim().to_string()
}
