use thiserror::Error;

use crate::{trie::PrefixTree, words::MIN_WORD_LEN, Board};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Rejection {
    #[error("words must be at least {} letters long", MIN_WORD_LEN)]
    TooShort,

    #[error("your next word must start with '{expected}'")]
    WrongStart { expected: char },

    #[error("'{0}' can't be spelled on this board")]
    IllegalSequence(String),

    #[error("'{0}' is not in the dictionary")]
    UnknownWord(String),
}

/// A game played by hand: words are entered one at a time and checked
/// against the board and the chaining rule.
#[derive(Clone, Debug)]
pub struct Game<'a> {
    dictionary: &'a PrefixTree,
    board: Board,
    played: Vec<String>,
}

impl<'a> Game<'a> {
    pub fn new(dictionary: &'a PrefixTree, mut board: Board) -> Self {
        board.reset();
        Self {
            dictionary,
            board,
            played: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn played(&self) -> &[String] {
        &self.played
    }

    /// The letter the next word has to start with, if any word was played.
    pub fn next_start(&self) -> Option<char> {
        self.played.last().and_then(|word| word.chars().last())
    }

    pub fn is_won(&self) -> bool {
        self.board.is_complete()
    }

    pub fn reset(&mut self) {
        self.board.reset();
        self.played.clear();
    }

    pub fn try_word(&mut self, word: &str) -> Result<(), Rejection> {
        let word = word.trim().to_ascii_lowercase();

        if word.chars().count() < MIN_WORD_LEN {
            return Err(Rejection::TooShort);
        }

        if let Some(expected) = self.next_start() {
            if !word.starts_with(expected) {
                return Err(Rejection::WrongStart { expected });
            }
        }

        if !self.board.is_legal_sequence(&word) {
            return Err(Rejection::IllegalSequence(word));
        }

        if !self.dictionary.is_word(&word) {
            return Err(Rejection::UnknownWord(word));
        }

        self.board.mark_used(&word);
        self.played.push(word);
        Ok(())
    }

    /// Takes back the last word played.
    pub fn undo(&mut self) -> Option<String> {
        let word = self.played.pop()?;
        self.board.mark_unused(&word);
        Some(word)
    }
}

#[cfg(test)]
mod tests {
    use super::{Game, Rejection};
    use crate::{trie::PrefixTree, Board};

    fn dictionary() -> PrefixTree {
        ["jute", "echo", "ofibyl", "juice"].into_iter().collect()
    }

    fn board() -> Board {
        "tjo-feb-cuy-hil".parse().unwrap()
    }

    #[test]
    fn winning_game() {
        let dictionary = dictionary();
        let mut game = Game::new(&dictionary, board());

        for word in ["JUTE", "echo", " ofibyl "] {
            assert!(!game.is_won());
            game.try_word(word).unwrap();
        }

        assert!(game.is_won());
        assert_eq!(game.played(), ["jute", "echo", "ofibyl"]);
    }

    #[test]
    fn rejections() {
        let dictionary = dictionary();
        let mut game = Game::new(&dictionary, board());

        assert_eq!(game.try_word("ju"), Err(Rejection::TooShort));
        assert_eq!(
            game.try_word("toe"),
            Err(Rejection::IllegalSequence("toe".into()))
        );
        assert_eq!(
            game.try_word("jube"),
            Err(Rejection::IllegalSequence("jube".into()))
        );
        assert_eq!(
            game.try_word("jutie"),
            Err(Rejection::UnknownWord("jutie".into()))
        );

        game.try_word("jute").unwrap();
        assert_eq!(game.next_start(), Some('e'));
        assert_eq!(
            game.try_word("juice"),
            Err(Rejection::WrongStart { expected: 'e' })
        );
        assert_eq!(game.played(), ["jute"]);
    }

    #[test]
    fn undo_restores_the_board() {
        let dictionary = dictionary();
        let mut game = Game::new(&dictionary, board());

        game.try_word("jute").unwrap();
        let after_first = game.board().clone();

        game.try_word("echo").unwrap();
        assert_eq!(game.undo().as_deref(), Some("echo"));
        assert_eq!(game.board(), &after_first);

        game.reset();
        assert!(game.played().is_empty());
        assert_eq!(game.board(), &board());
        assert_eq!(game.undo(), None);
    }
}
