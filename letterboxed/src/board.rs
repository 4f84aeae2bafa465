use std::{
    fmt,
    ops::{Deref, DerefMut},
    str::FromStr,
};

use hashbrown::HashMap;

use crate::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Side::Top => "top",
            Side::Right => "right",
            Side::Bottom => "bottom",
            Side::Left => "left",
        })
    }
}

/// One letter on the frame.
///
/// Usage is counted rather than flagged so that marking a word and then
/// unmarking it always lands back on the previous state, whatever was marked
/// before.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LetterSlot {
    letter: char,
    uses: u32,
}

impl LetterSlot {
    fn new(letter: char) -> Self {
        Self { letter, uses: 0 }
    }

    pub fn letter(&self) -> char {
        self.letter
    }

    pub fn is_used(&self) -> bool {
        self.uses > 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    sides: [Vec<LetterSlot>; 4],
    index: HashMap<char, (Side, usize)>,
}

impl Board {
    /// Builds a board from its four sides, normalizing letters to lowercase.
    pub fn new(top: &[char], right: &[char], bottom: &[char], left: &[char]) -> Result<Self> {
        let mut sides: [Vec<LetterSlot>; 4] = Default::default();
        let mut index = HashMap::new();

        for (side, letters) in Side::ALL.into_iter().zip([top, right, bottom, left]) {
            if letters.is_empty() {
                return Err(Error::EmptySide(side));
            }

            for &letter in letters {
                if !letter.is_ascii_alphabetic() {
                    return Err(Error::NotALetter(letter));
                }

                let letter = letter.to_ascii_lowercase();
                let position = (side, sides[side.index()].len());
                if index.insert(letter, position).is_some() {
                    return Err(Error::DuplicateLetter(letter));
                }
                sides[side.index()].push(LetterSlot::new(letter));
            }
        }

        Ok(Self { sides, index })
    }

    pub fn side(&self, side: Side) -> &[LetterSlot] {
        &self.sides[side.index()]
    }

    pub fn side_of(&self, letter: char) -> Option<Side> {
        self.index.get(&letter).map(|&(side, _)| side)
    }

    /// Every letter on the board, side by side starting from the top.
    pub fn letters(&self) -> Vec<char> {
        self.slots().map(LetterSlot::letter).collect()
    }

    fn slots(&self) -> impl Iterator<Item = &LetterSlot> {
        self.sides.iter().flatten()
    }

    fn slots_mut(&mut self) -> impl Iterator<Item = &mut LetterSlot> {
        self.sides.iter_mut().flatten()
    }

    fn slot_mut(&mut self, letter: char) -> Option<&mut LetterSlot> {
        let &(side, idx) = self.index.get(&letter)?;
        Some(&mut self.sides[side.index()][idx])
    }

    pub fn is_used(&self, letter: char) -> bool {
        self.index
            .get(&letter)
            .map_or(false, |&(side, idx)| self.sides[side.index()][idx].is_used())
    }

    pub fn reset(&mut self) {
        for slot in self.slots_mut() {
            slot.uses = 0;
        }
    }

    /// True if every character of `s` is on the board and no two neighbors
    /// share a side. The empty string is not a legal sequence.
    pub fn is_legal_sequence(&self, s: &str) -> bool {
        let mut previous = None;
        for c in s.chars() {
            let side = match self.side_of(c) {
                Some(side) => side,
                None => return false,
            };
            if previous == Some(side) {
                return false;
            }
            previous = Some(side);
        }
        previous.is_some()
    }

    /// Marks every slot whose letter occurs in `word`. Each slot is marked at
    /// most once per call, however often its letter repeats.
    pub fn mark_used(&mut self, word: &str) {
        for slot in self.slots_mut() {
            if word.contains(slot.letter) {
                slot.uses += 1;
            }
        }
    }

    /// Exact inverse of [`Board::mark_used`] for the same word.
    pub fn mark_unused(&mut self, word: &str) {
        for slot in self.slots_mut() {
            if word.contains(slot.letter) {
                debug_assert!(slot.uses > 0, "'{}' was never marked", slot.letter);
                slot.uses = slot.uses.saturating_sub(1);
            }
        }
    }

    pub fn mark_letter_used(&mut self, letter: char) {
        if let Some(slot) = self.slot_mut(letter) {
            slot.uses += 1;
        }
    }

    pub fn mark_letter_unused(&mut self, letter: char) {
        if let Some(slot) = self.slot_mut(letter) {
            debug_assert!(slot.uses > 0, "'{letter}' was never marked");
            slot.uses = slot.uses.saturating_sub(1);
        }
    }

    /// Marks `word` for as long as the returned guard lives.
    pub fn mark<'a>(&'a mut self, word: &'a str) -> Marked<'a> {
        self.mark_used(word);
        Marked { board: self, word }
    }

    /// Unused letters that may follow `letter`: anything not on its side.
    pub fn choices_after(&self, letter: char) -> Vec<char> {
        let restricted = self.side_of(letter);
        Side::ALL
            .into_iter()
            .filter(|&side| Some(side) != restricted)
            .flat_map(|side| self.side(side))
            .filter(|slot| !slot.is_used())
            .map(LetterSlot::letter)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.slots().all(LetterSlot::is_used)
    }
}

impl FromStr for Board {
    type Err = Error;

    /// Parses four letter groups separated by `-`, `,`, `/` or whitespace,
    /// e.g. `tjo-feb-cuy-hil`.
    fn from_str(s: &str) -> Result<Self> {
        let groups: Vec<Vec<char>> = s
            .split(|c: char| c == '-' || c == ',' || c == '/' || c.is_whitespace())
            .filter(|group| !group.is_empty())
            .map(|group| group.chars().collect())
            .collect();

        match groups.as_slice() {
            [top, right, bottom, left] => Board::new(top, right, bottom, left),
            _ => Err(Error::MalformedBoard(groups.len())),
        }
    }
}

impl fmt::Display for Board {
    /// Used letters are shown in uppercase.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for side in Side::ALL {
            write!(f, "{side:<6}")?;
            for slot in self.side(side) {
                let letter = if slot.is_used() {
                    slot.letter.to_ascii_uppercase()
                } else {
                    slot.letter
                };
                write!(f, " {letter}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Guard returned by [`Board::mark`]. Unmarks its word when dropped.
pub struct Marked<'a> {
    board: &'a mut Board,
    word: &'a str,
}

impl Deref for Marked<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Marked<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Marked<'_> {
    fn drop(&mut self) {
        self.board.mark_unused(self.word);
    }
}
