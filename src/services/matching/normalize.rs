use unicode_normalization::UnicodeNormalization;

pub const APOSTROPHE: char = '\'';

// Glyphs people (and the dataset) use in place of the Ukrainian apostrophe.
const APOSTROPHE_LIKE: [char; 12] = [
    '`',        // backtick
    '\u{00B4}', // acute accent
    '\u{02B9}', // modifier letter prime
    '\u{02BB}', // modifier letter turned comma
    '\u{02BC}', // modifier letter apostrophe
    '\u{02BD}', // modifier letter reversed comma
    '\u{2018}', // left single quotation mark
    '\u{2019}', // right single quotation mark
    '\u{201B}', // single high-reversed-9 quotation mark
    '\u{2032}', // prime
    '\u{FF07}', // fullwidth apostrophe
    '\u{055A}', // armenian apostrophe
];

fn canonical_apostrophe(ch: char) -> char {
    if APOSTROPHE_LIKE.contains(&ch) {
        APOSTROPHE
    } else {
        ch
    }
}

/// Canonical comparison form of a name field.
pub fn normalize(text: &str) -> String {
    let composed: String = text.nfc().collect();
    let lowered: String = composed.to_lowercase().nfc().collect();

    lowered
        .split_whitespace()
        .map(|word| word.chars().map(canonical_apostrophe).collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Absent values normalize like the empty string.
pub fn normalize_opt(text: Option<&str>) -> String {
    normalize(text.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn trims_and_lowercases_cyrillic() {
        assert_eq!(normalize("  ОСАУЛЕНКО "), "осауленко");
        assert_eq!(normalize("Їжак Ґудзь Єва"), "їжак ґудзь єва");
    }

    #[test]
    fn collapses_inner_whitespace() {
        assert_eq!(normalize("Анна \t Марія"), "анна марія");
    }

    #[test]
    fn absent_is_empty() {
        assert_eq!(normalize_opt(None), "");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn apostrophe_variants_collapse() {
        let expected = "в'ячеслав";
        for variant in ["В'ячеслав", "В’ячеслав", "Вʼячеслав", "В`ячеслав", "В‘ячеслав"] {
            assert_eq!(normalize(variant), expected, "variant {variant}");
        }
    }

    #[test]
    fn decomposed_letters_compose() {
        // "й" written as "и" + combining breve.
        assert_eq!(normalize("Андри\u{0306}"), normalize("Андрій"));
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(s in "[ \tА-ЯЄІЇҐа-яєіїґA-Za-z'`’ʼ-]{0,32}") {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn apostrophe_glyph_does_not_matter(
            left in "[А-Яа-яії]{1,8}",
            right in "[А-Яа-яії]{1,8}",
            a in 0usize..APOSTROPHE_LIKE.len(),
            b in 0usize..APOSTROPHE_LIKE.len(),
        ) {
            let x = format!("{left}{}{right}", APOSTROPHE_LIKE[a]);
            let y = format!("{left}{}{right}", APOSTROPHE_LIKE[b]);
            prop_assert_eq!(normalize(&x), normalize(&y));
        }
    }
}
