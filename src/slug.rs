//! URL slugs from Turkish names: transliterate to ASCII, then lowercase and hyphenate.

use serde_json::Value;
use std::collections::HashMap;

/// Map one Turkish letter to its ASCII counterpart. Other characters pass through.
fn transliterate(c: char) -> char {
    match c {
        'ç' | 'Ç' => 'c',
        'ğ' | 'Ğ' => 'g',
        'ı' | 'I' | 'İ' => 'i',
        'ö' | 'Ö' => 'o',
        'ş' | 'Ş' => 's',
        'ü' | 'Ü' => 'u',
        other => other,
    }
}

/// Build a slug: "Kazı & Hafriyat İşleri" -> "kazi-hafriyat-isleri".
///
/// Output is empty or matches `[a-z0-9]+(-[a-z0-9]+)*`; applying it twice changes nothing.
pub fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_hyphen = false;
    for c in input.chars().map(transliterate) {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(c);
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_hyphen = true;
        }
        // anything else is dropped without introducing a separator
    }
    out
}

/// Fill in or normalise the `slug` field of a create/update body.
/// An explicit slug is re-slugified; a missing or blank one is derived from `source_column`.
/// A `slug` key that yields nothing URL-safe is left empty so required-field checks reject it.
pub fn ensure_slug(body: &mut HashMap<String, Value>, source_column: &str) {
    let explicit = body
        .get("slug")
        .and_then(Value::as_str)
        .map(slugify)
        .filter(|s| !s.is_empty());
    let slug = explicit.or_else(|| {
        body.get(source_column)
            .and_then(Value::as_str)
            .map(slugify)
            .filter(|s| !s.is_empty())
    });
    match slug {
        Some(slug) => {
            body.insert("slug".into(), Value::String(slug));
        }
        None if body.contains_key("slug") => {
            body.insert("slug".into(), Value::String(String::new()));
        }
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transliterates_turkish_letters() {
        assert_eq!(slugify("Çığ Öğüş"), "cig-ogus");
        assert_eq!(slugify("İSTANBUL Şişli"), "istanbul-sisli");
        assert_eq!(slugify("Iğdır"), "igdir");
    }

    #[test]
    fn drops_punctuation_and_collapses_separators() {
        assert_eq!(slugify("Kazı & Hafriyat İşleri"), "kazi-hafriyat-isleri");
        assert_eq!(slugify("  --Yol   Yapımı--  "), "yol-yapimi");
        assert_eq!(slugify("Beton/Yıkım (2024)"), "betonyikim-2024");
        assert_eq!(slugify("a_b"), "a-b");
    }

    #[test]
    fn empty_and_symbol_only_inputs() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!! ???"), "");
    }

    #[test]
    fn is_idempotent() {
        for s in ["Kazı & Hafriyat", "Zemin Etüdü 3. Etap", "çok-güzel  iş"] {
            let once = slugify(s);
            assert_eq!(slugify(&once), once);
        }
    }

    #[test]
    fn ensure_slug_derives_from_source() {
        let mut body = HashMap::new();
        body.insert("title".to_string(), Value::String("Dekapaj Çalışması".into()));
        ensure_slug(&mut body, "title");
        assert_eq!(body["slug"], "dekapaj-calismasi");
    }

    #[test]
    fn ensure_slug_normalises_explicit_value() {
        let mut body = HashMap::new();
        body.insert("title".to_string(), Value::String("Ignored".into()));
        body.insert("slug".to_string(), Value::String("Özel Slug".into()));
        ensure_slug(&mut body, "title");
        assert_eq!(body["slug"], "ozel-slug");
    }

    #[test]
    fn ensure_slug_leaves_body_without_source_untouched() {
        let mut body = HashMap::new();
        body.insert("description".to_string(), Value::String("x".into()));
        ensure_slug(&mut body, "title");
        assert!(!body.contains_key("slug"));
    }

    #[test]
    fn ensure_slug_empties_unsafe_explicit_value() {
        let mut body = HashMap::new();
        body.insert("slug".to_string(), Value::String("!!!".into()));
        ensure_slug(&mut body, "title");
        assert_eq!(body["slug"], "");

        let mut body = HashMap::new();
        body.insert("title".to_string(), Value::String("???".into()));
        body.insert("slug".to_string(), Value::String("§§ / ??".into()));
        ensure_slug(&mut body, "title");
        assert_eq!(body["slug"], "");
    }

    #[test]
    fn ensure_slug_falls_back_to_source_for_unsafe_explicit_value() {
        let mut body = HashMap::new();
        body.insert("title".to_string(), Value::String("Dolgu İşleri".into()));
        body.insert("slug".to_string(), Value::String("???".into()));
        ensure_slug(&mut body, "title");
        assert_eq!(body["slug"], "dolgu-isleri");
    }
}
