//! Pseudolocalization for checking that UIs cope with translated text.

/// Language code that switches lookups to pseudolocalization.
pub const PSEUDO_LANGUAGE: &str = "x-pseudo";

/// Substitutions for the ASCII letters, from the MIT-licensed table of
/// <https://github.com/eirikRude/pseudolocalizer>.
const CHAR_TABLE: [(char, char); 52] = [
    ('A', 'Å'),
    ('B', 'Ƀ'),
    ('C', 'Č'),
    ('D', 'Ɖ'),
    ('E', 'Ǝ'),
    ('F', 'Ƒ'),
    ('G', 'Ǥ'),
    ('H', 'Ӊ'),
    ('I', 'Ì'),
    ('J', 'Ĵ'),
    ('K', 'Ӄ'),
    ('L', 'Ĺ'),
    ('M', 'Ӎ'),
    ('N', 'Ń'),
    ('O', 'ϴ'),
    ('P', 'Ƥ'),
    ('Q', 'Ϙ'),
    ('R', 'Я'),
    ('S', 'Ƨ'),
    ('T', 'Ť'),
    ('U', 'Ų'),
    ('V', 'Ʋ'),
    ('W', 'Ŵ'),
    ('X', 'Ӿ'),
    ('Y', 'Ỵ'),
    ('Z', 'Ƶ'),
    ('a', 'ą'),
    ('b', 'Ƃ'),
    ('c', 'č'),
    ('d', 'ď'),
    ('e', 'ë'),
    ('f', 'ḟ'),
    ('g', 'ḡ'),
    ('h', 'ḧ'),
    ('i', 'ἳ'),
    ('j', 'ĵ'),
    ('k', 'ķ'),
    ('l', 'ľ'),
    ('m', 'ṁ'),
    ('n', 'ņ'),
    ('o', 'ѻ'),
    ('p', 'ҏ'),
    ('q', 'ɖ'),
    ('r', 'ȑ'),
    ('s', 'ᶊ'),
    ('t', 'ț'),
    ('u', 'ữ'),
    ('v', 'ѷ'),
    ('w', 'ŵ'),
    ('x', 'ӿ'),
    ('y', 'ŷ'),
    ('z', 'ȥ'),
];

fn substitute(c: char) -> char {
    CHAR_TABLE.iter().find(|(from, _)| *from == c).map_or(c, |(_, to)| *to)
}

/// Replace every ASCII letter with a decorated look-alike and wrap the
/// result in `[!!! ` / ` !!!]`.
///
/// # Examples
/// ```
/// use po_translate::pseudolocalize;
///
/// assert_eq!(pseudolocalize("Hello!"), "[!!! Ӊëľľѻ! !!!]");
/// ```
#[must_use]
pub fn pseudolocalize(source: &str) -> String {
    let substituted: String = source.chars().map(substitute).collect();
    format!("[!!! {substituted} !!!]")
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::greeting("Hello!", "[!!! Ӊëľľѻ! !!!]")]
    #[case::empty("", "[!!!  !!!]")]
    #[case::digits_and_punctuation("1, 2 & 3?", "[!!! 1, 2 & 3? !!!]")]
    #[case::non_ascii("カレンダー é", "[!!! カレンダー é !!!]")]
    #[case::placeholder("%PRODUCTNAME", "[!!! %ƤЯϴƉŲČŤŃÅӍƎ !!!]")]
    fn pseudolocalizes(#[case] source: &str, #[case] expected: &str) {
        assert_eq!(pseudolocalize(source), expected);
    }

    #[googletest::test]
    fn table_covers_every_ascii_letter_once() {
        let from: HashSet<char> = CHAR_TABLE.iter().map(|(from, _)| *from).collect();
        let to: HashSet<char> = CHAR_TABLE.iter().map(|(_, to)| *to).collect();

        expect_that!(from.len(), eq(52));
        expect_that!(from.iter().all(char::is_ascii_alphabetic), eq(true));
        expect_that!(to.len(), eq(52));
        expect_that!(to.iter().any(char::is_ascii), eq(false));
    }

    #[googletest::test]
    fn is_deterministic() {
        let once = pseudolocalize("The quick brown fox");

        expect_that!(pseudolocalize("The quick brown fox"), eq(once.as_str()));
    }
}
