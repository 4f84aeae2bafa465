use std::{
    cmp::Ordering,
    fmt, mem,
    ops::{AddAssign, Deref, DerefMut},
};

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, trace};

use crate::{
    trie::{Cursor, PrefixTree},
    Board, Error, Result,
};

/// A chain of words that together use every letter on the board.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Solution(Vec<String>);

impl Solution {
    pub fn words(&self) -> &[String] {
        &self.0
    }

    /// Number of words in the chain.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Combined length of every word in the chain.
    pub fn total_len(&self) -> usize {
        self.0.iter().map(|word| word.chars().count()).sum()
    }

    /// Orders solutions best first: fewer words, then fewer letters, then
    /// alphabetically by word.
    pub fn cmp_rank(&self, other: &Self) -> Ordering {
        (self.len(), self.total_len(), &self.0).cmp(&(other.len(), other.total_len(), &other.0))
    }
}

impl From<Vec<String>> for Solution {
    fn from(words: Vec<String>) -> Self {
        Self(words)
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" - "))
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SolverConfig {
    /// Longest chain of words a solution may have.
    pub max_words: usize,
    /// Recursion limit. Branches that reach it are abandoned.
    pub max_depth: usize,
}

impl SolverConfig {
    pub fn with_max_words(max_words: usize) -> Self {
        Self {
            max_words,
            ..Default::default()
        }
    }

    fn validate(&self) -> Result<()> {
        if self.max_words == 0 {
            return Err(Error::InvalidConfig("max_words must be at least 1"));
        }
        if self.max_depth == 0 {
            return Err(Error::InvalidConfig("max_depth must be at least 1"));
        }
        Ok(())
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_words: 5,
            max_depth: 256,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub visited: u64,
    /// Extensions abandoned because no word starts with them.
    pub pruned: u64,
    /// Branches abandoned at the word limit.
    pub cutoffs: u64,
    /// Branches abandoned at the recursion limit.
    pub depth_exceeded: u64,
    pub solutions: u64,
}

impl AddAssign for SearchStats {
    fn add_assign(&mut self, other: Self) {
        self.visited += other.visited;
        self.pruned += other.pruned;
        self.cutoffs += other.cutoffs;
        self.depth_exceeded += other.depth_exceeded;
        self.solutions += other.solutions;
    }
}

/// Backtracking search over one board and one dictionary.
///
/// The board is shared by every branch of the search; each branch marks the
/// words it closes through [`Board::mark`], which unmarks them again on the
/// way out. The board is reset when the solver is built, so it has no used
/// letters before a search and none after.
pub struct Solver<'a> {
    dictionary: &'a PrefixTree,
    board: Board,
    config: SolverConfig,
    solutions: Option<Vec<Solution>>,
    best: Option<Solution>,
    stats: SearchStats,
}

impl<'a> Solver<'a> {
    pub fn new(dictionary: &'a PrefixTree, mut board: Board) -> Self {
        board.reset();
        Self {
            dictionary,
            board,
            config: SolverConfig::default(),
            solutions: None,
            best: None,
            stats: SearchStats::default(),
        }
    }

    pub fn with_config(dictionary: &'a PrefixTree, board: Board, config: SolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new(dictionary, board)
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Solutions found so far, in search order. Empty until a search has run.
    pub fn solutions(&self) -> &[Solution] {
        self.solutions.as_deref().unwrap_or_default()
    }

    /// Runs the full search unless it has already run.
    pub fn find_all_solutions(&mut self) -> &[Solution] {
        if self.solutions.is_none() {
            let mut search = Search::new(self.dictionary, self.config);
            for start in self.board.letters() {
                search.run_from(&mut self.board, start);
            }

            self.finish(search.solutions, search.stats);
        }

        self.solutions()
    }

    /// Same result as [`Solver::find_all_solutions`], with each starting
    /// letter searched on its own copy of the board.
    pub fn find_all_solutions_parallel(&mut self) -> &[Solution] {
        if self.solutions.is_none() {
            let dictionary = self.dictionary;
            let config = self.config;
            let board = &self.board;
            let results: Vec<_> = board
                .letters()
                .into_par_iter()
                .map(|start| {
                    let mut board = board.clone();
                    let mut search = Search::new(dictionary, config);
                    search.run_from(&mut board, start);
                    (search.solutions, search.stats)
                })
                .collect();

            let mut solutions = Vec::new();
            let mut stats = SearchStats::default();
            for (found, worker_stats) in results {
                solutions.extend(found);
                stats += worker_stats;
            }

            self.finish(solutions, stats);
        }

        self.solutions()
    }

    fn finish(&mut self, solutions: Vec<Solution>, stats: SearchStats) {
        debug!(
            solutions = solutions.len(),
            visited = stats.visited,
            pruned = stats.pruned,
            cutoffs = stats.cutoffs,
            depth_exceeded = stats.depth_exceeded,
            "search finished"
        );
        self.stats = stats;
        self.solutions = Some(solutions);
    }

    /// The solution with the fewest words, then the fewest letters, then the
    /// alphabetically first words. Runs the search if needed.
    pub fn find_best_solution(&mut self) -> Result<&Solution> {
        if self.best.is_none() {
            let best = self
                .find_all_solutions()
                .iter()
                .min_by(|a, b| a.cmp_rank(b))
                .cloned();
            self.best = best;
        }

        self.best.as_ref().ok_or(Error::NoSolutionFound {
            max_words: self.config.max_words,
        })
    }
}

/// State of one search: the results so far, plus the scratch chain and word.
struct Search<'a> {
    dictionary: &'a PrefixTree,
    config: SolverConfig,
    chain: Vec<String>,
    partial: String,
    solutions: Vec<Solution>,
    stats: SearchStats,
}

impl<'a> Search<'a> {
    fn new(dictionary: &'a PrefixTree, config: SolverConfig) -> Self {
        Self {
            dictionary,
            config,
            chain: Vec::with_capacity(config.max_words),
            partial: String::new(),
            solutions: Vec::new(),
            stats: SearchStats::default(),
        }
    }

    /// Explores every chain whose first word starts with `start`.
    fn run_from(&mut self, board: &mut Board, start: char) {
        let cursor = self.dictionary.advance(self.dictionary.root(), start);

        let mut buf = [0; 4];
        let mut marked = board.mark(start.encode_utf8(&mut buf));
        let mut word = self.push_letter(start);
        word.extend(&mut marked, cursor, 0);
    }

    /// `cursor` is the position of `self.partial` in the dictionary, or None
    /// if no word starts with it.
    fn extend(&mut self, board: &mut Board, cursor: Option<Cursor>, depth: usize) {
        self.stats.visited += 1;

        if board.is_complete() && !self.chain.is_empty() {
            trace!(chain = ?self.chain, "solution");
            self.stats.solutions += 1;
            self.solutions.push(Solution(self.chain.clone()));
            return;
        }

        // Any further word would go past the limit.
        if self.chain.len() >= self.config.max_words {
            self.stats.cutoffs += 1;
            return;
        }

        if depth >= self.config.max_depth {
            self.stats.depth_exceeded += 1;
            return;
        }

        let cursor = match cursor {
            Some(cursor) => cursor,
            None => return,
        };
        let last = match self.partial.chars().last() {
            Some(last) => last,
            None => return,
        };

        for next in board.choices_after(last) {
            let child = match self.dictionary.advance(cursor, next) {
                Some(child) => child,
                None => {
                    self.stats.pruned += 1;
                    continue;
                }
            };

            let mut extended = self.push_letter(next);

            if extended.dictionary.is_terminal(child) {
                extended.close_word(board, next, depth);
            }

            // A word can also be the prefix of a longer one.
            extended.extend(board, Some(child), depth + 1);
        }
    }

    /// Ends the current word here and starts the next one on its last letter.
    fn close_word(&mut self, board: &mut Board, last: char, depth: usize) {
        let word = self.partial.clone();
        let cursor = self.dictionary.advance(self.dictionary.root(), last);

        let mut marked = board.mark(&word);
        let mut next = self.push_word(last);
        next.extend(&mut marked, cursor, depth + 1);
    }

    /// Appends `c` to the word in progress until the guard drops.
    fn push_letter(&mut self, c: char) -> Pushed<'_, 'a> {
        self.partial.push(c);
        Pushed {
            search: self,
            undo: Undo::Letter,
        }
    }

    /// Moves the word in progress onto the chain and starts a new one on
    /// `last`, until the guard drops.
    fn push_word(&mut self, last: char) -> Pushed<'_, 'a> {
        let word = mem::replace(&mut self.partial, String::from(last));
        self.chain.push(word);
        Pushed {
            search: self,
            undo: Undo::Word,
        }
    }
}

enum Undo {
    Letter,
    Word,
}

/// Guard over a [`Search`] that takes back one push when dropped.
struct Pushed<'s, 'a> {
    search: &'s mut Search<'a>,
    undo: Undo,
}

impl<'a> Deref for Pushed<'_, 'a> {
    type Target = Search<'a>;

    fn deref(&self) -> &Search<'a> {
        self.search
    }
}

impl<'a> DerefMut for Pushed<'_, 'a> {
    fn deref_mut(&mut self) -> &mut Search<'a> {
        self.search
    }
}

impl Drop for Pushed<'_, '_> {
    fn drop(&mut self) {
        match self.undo {
            Undo::Letter => {
                self.search.partial.pop();
            }
            Undo::Word => {
                if let Some(word) = self.search.chain.pop() {
                    self.search.partial = word;
                }
            }
        }
    }
}
