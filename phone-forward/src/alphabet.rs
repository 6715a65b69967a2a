//! This module defines the [Alphabet] phone numbers are written in,
//! and the [Symbol]s it maps their characters to.

use std::cmp::Ordering;

use crate::error::Error;

/// Number of distinct symbols a phone number can be composed of,
/// i.e. the fan-out of every trie node.
pub const ALPHABET_SIZE: usize = 12;

/// Number of plain decimal digits in the alphabet
const DIGITS: usize = 10;

/// A single symbol of a phone number, identified by its child slot.
///
/// The order on symbols is the order of their slots, i.e.
/// the digits `0` to `9` followed by the two extended symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u8);

impl Symbol {
    /// Return the symbol occupying the given slot, if the slot exists.
    pub fn from_slot(slot: usize) -> Option<Self> {
        if slot < ALPHABET_SIZE {
            u8::try_from(slot).ok().map(Self)
        } else {
            None
        }
    }

    /// Index of the child slot this symbol selects.
    pub fn slot(self) -> usize {
        usize::from(self.0)
    }
}

/// Character set of phone numbers.
///
/// Besides the digits `0` to `9`, an alphabet contains two extended symbols
/// which act as the digits ten and eleven.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alphabet {
    ten: char,
    eleven: char,
}

impl Default for Alphabet {
    fn default() -> Self {
        Self {
            ten: '*',
            eleven: '#',
        }
    }
}

impl Alphabet {
    /// Create an [Alphabet] with the given extended symbols.
    ///
    /// Both symbols must be ASCII, must not be digits and must differ.
    pub fn new(ten: char, eleven: char) -> Result<Self, Error> {
        let usable = |c: char| c.is_ascii() && !c.is_ascii_digit() && !c.is_ascii_control();

        if !usable(ten) || !usable(eleven) || ten == eleven {
            return Err(Error::InvalidAlphabet(ten, eleven));
        }

        Ok(Self { ten, eleven })
    }

    /// Symbol standing for the digit ten.
    pub fn ten(&self) -> char {
        self.ten
    }

    /// Symbol standing for the digit eleven.
    pub fn eleven(&self) -> char {
        self.eleven
    }

    /// Map a character to its [Symbol], if it belongs to the alphabet.
    pub fn slot(&self, character: char) -> Option<Symbol> {
        match character {
            '0'..='9' => character
                .to_digit(10)
                .and_then(|digit| usize::try_from(digit).ok())
                .and_then(Symbol::from_slot),
            c if c == self.ten => Symbol::from_slot(DIGITS),
            c if c == self.eleven => Symbol::from_slot(DIGITS + 1),
            _ => None,
        }
    }

    /// Map a [Symbol] back to its character.
    pub fn char_of(&self, symbol: Symbol) -> char {
        match symbol.slot() {
            DIGITS => self.ten,
            slot if slot > DIGITS => self.eleven,
            _ => char::from(b'0' + symbol.0),
        }
    }

    /// Translate a phone number into its sequence of [Symbol]s.
    ///
    /// Returns an error if the number is empty
    /// or contains a character outside of the alphabet.
    pub fn symbols(&self, number: &str) -> Result<Vec<Symbol>, Error> {
        if number.is_empty() {
            return Err(Error::InvalidNumber(String::new()));
        }

        let mut result = Vec::new();
        result.try_reserve_exact(number.len())?;

        for character in number.chars() {
            match self.slot(character) {
                Some(symbol) => result.push(symbol),
                None => return Err(Error::InvalidNumber(number.to_owned())),
            }
        }

        Ok(result)
    }

    /// Return whether the given string is a valid phone number.
    pub fn is_number(&self, number: &str) -> bool {
        !number.is_empty() && number.chars().all(|c| self.slot(c).is_some())
    }

    /// Compare two phone numbers symbol by symbol.
    ///
    /// A number sorts before all of its proper extensions.
    /// Characters outside of the alphabet sort after every symbol.
    pub fn compare(&self, left: &str, right: &str) -> Ordering {
        let rank = |c: char| self.slot(c).map_or(ALPHABET_SIZE, Symbol::slot);

        left.chars().map(rank).cmp(right.chars().map(rank))
    }

    /// Convert a sequence of [Symbol]s back into a phone number.
    pub fn spell(&self, symbols: &[Symbol]) -> String {
        symbols.iter().map(|&symbol| self.char_of(symbol)).collect()
    }
}
