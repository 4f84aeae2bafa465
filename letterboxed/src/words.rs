use std::{fs, io, path::Path};

use crate::Board;

/// Shortest word the game accepts.
pub const MIN_WORD_LEN: usize = 3;

pub fn read_words(path: impl AsRef<Path>) -> io::Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    Ok(normalize(text.lines()).collect())
}

/// Trims and lowercases each line, dropping anything that isn't a plain
/// alphabetic word of at least [`MIN_WORD_LEN`] letters.
pub fn normalize<'a>(lines: impl Iterator<Item = &'a str> + 'a) -> impl Iterator<Item = String> + 'a {
    lines.map(str::trim).filter_map(|word| {
        (word.len() >= MIN_WORD_LEN && word.bytes().all(|u| u.is_ascii_alphabetic()))
            .then(|| word.to_ascii_lowercase())
    })
}

/// Keeps only the words that can be spelled on `board`.
pub fn playable_on<'a, I>(board: &'a Board, words: I) -> impl Iterator<Item = String> + 'a
where
    I: IntoIterator<Item = String> + 'a,
    I::IntoIter: 'a,
{
    words
        .into_iter()
        .filter(move |word| board.is_legal_sequence(word))
}

#[cfg(test)]
mod tests {
    use super::{normalize, playable_on};
    use crate::Board;

    #[test]
    fn normalize_filters_and_lowercases() {
        let text = "Jute\n  echo \nox\ncan't\n\nfiBula\r\nnaïve\n";
        let words: Vec<_> = normalize(text.lines()).collect();
        assert_eq!(words, ["jute", "echo", "fibula"]);
    }

    #[test]
    fn playable_words() {
        let board: Board = "tjo-feb-cuy-hil".parse().unwrap();
        let words = ["jute", "toe", "echo", "zebra"].map(String::from);
        let playable: Vec<_> = playable_on(&board, words).collect();
        assert_eq!(playable, ["jute", "echo"]);
    }
}
