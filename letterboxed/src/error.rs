use thiserror::Error;

use crate::board::Side;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("the {0} side of the board has no letters")]
    EmptySide(Side),

    #[error("'{0}' is not a letter")]
    NotALetter(char),

    #[error("the letter '{0}' appears on the board more than once")]
    DuplicateLetter(char),

    #[error("a board needs exactly four sides, found {0}")]
    MalformedBoard(usize),

    #[error("invalid solver configuration: {0}")]
    InvalidConfig(&'static str),

    #[error("no solution uses every letter within {max_words} words")]
    NoSolutionFound { max_words: usize },
}

impl Error {
    /// True for errors caused by bad input shapes rather than by the search itself.
    pub fn is_invalid_argument(&self) -> bool {
        !matches!(self, Error::NoSolutionFound { .. })
    }
}
