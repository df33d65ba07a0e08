//! Book-name canonicalization.
//!
//! Every book inside a version is keyed by a lowercase canonical name such as
//! `genesis` or `1samuel`. Callers may address a book by its abbreviation
//! (`gn`, `1 Sm.`) or by the canonical name itself; [`normalize`] folds both
//! forms onto the same key.
//!
//! Normalization never fails. Input that is not a known abbreviation is
//! returned cleaned but otherwise unchanged, and a lookup miss in the
//! version's collection is what ultimately reports an unknown book.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Abbreviation table, in source order.
///
/// `jo` appears twice (Job, then John). Later entries win when the table is
/// built, so `jo` resolves to `joao` and Job is only reachable by its
/// canonical name or an abbreviation the corpus itself carries.
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("gn", "genesis"),
    ("ex", "exodo"),
    ("lv", "levitico"),
    ("nm", "numeros"),
    ("dt", "deuteronomio"),
    ("js", "josue"),
    ("jz", "juizes"),
    ("rt", "rute"),
    ("1sm", "1samuel"),
    ("2sm", "2samuel"),
    ("1rs", "1reis"),
    ("2rs", "2reis"),
    ("1cr", "1cronicas"),
    ("2cr", "2cronicas"),
    ("ed", "esdras"),
    ("ne", "neemias"),
    ("et", "ester"),
    ("jo", "jo"),
    ("sl", "salmos"),
    ("pv", "proverbios"),
    ("ec", "eclesiastes"),
    ("ct", "cantares"),
    ("is", "isaias"),
    ("jr", "jeremias"),
    ("lm", "lamentacoes"),
    ("ez", "ezequiel"),
    ("dn", "daniel"),
    ("os", "oseias"),
    ("jl", "joel"),
    ("am", "amos"),
    ("ob", "obadias"),
    ("jn", "jonas"),
    ("mq", "miqueias"),
    ("na", "naum"),
    ("hc", "habacuque"),
    ("sf", "sofonias"),
    ("ag", "ageu"),
    ("zc", "zacarias"),
    ("ml", "malaquias"),
    ("mt", "mateus"),
    ("mc", "marcos"),
    ("lc", "lucas"),
    ("jo", "joao"),
    ("at", "atos"),
    ("rm", "romanos"),
    ("1co", "1corintios"),
    ("2co", "2corintios"),
    ("gl", "galatas"),
    ("ef", "efesios"),
    ("fp", "filipenses"),
    ("cl", "colossenses"),
    ("1ts", "1tessalonicenses"),
    ("2ts", "2tessalonicenses"),
    ("1tm", "1timoteo"),
    ("2tm", "2timoteo"),
    ("tt", "tito"),
    ("fm", "filemom"),
    ("hb", "hebreus"),
    ("tg", "tiago"),
    ("1pe", "1pedro"),
    ("2pe", "2pedro"),
    ("1jo", "1joao"),
    ("2jo", "2joao"),
    ("3jo", "3joao"),
    ("jd", "judas"),
    ("ap", "apocalipse"),
];

static TABLE: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| ABBREVIATIONS.iter().copied().collect());

/// Lowercase and strip spaces and periods.
fn clean(input: &str) -> String {
    input
        .chars()
        .filter(|c| *c != ' ' && *c != '.')
        .collect::<String>()
        .to_lowercase()
}

/// Map an abbreviation or loosely formatted book name to its canonical key.
///
/// # Examples
///
/// ```
/// use verbum_types::canon::normalize;
///
/// assert_eq!(normalize("Gn"), "genesis");
/// assert_eq!(normalize("1 Sm."), "1samuel");
/// assert_eq!(normalize("Genesis"), "genesis");
/// assert_eq!(normalize("unknown book"), "unknownbook");
/// ```
pub fn normalize(input: &str) -> String {
    let cleaned = clean(input);
    match TABLE.get(cleaned.as_str()) {
        Some(canonical) => (*canonical).to_string(),
        None => cleaned,
    }
}

/// Human-readable form of a canonical name.
///
/// Every letter that follows a non-letter is uppercased and every other
/// letter lowercased, so `1samuel` becomes `1Samuel`.
pub fn display_name(canonical: &str) -> String {
    let mut out = String::with_capacity(canonical.len());
    let mut prev_letter = false;
    for ch in canonical.chars() {
        if ch.is_alphabetic() {
            if prev_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_letter = true;
        } else {
            out.push(ch);
            prev_letter = false;
        }
    }
    out
}
