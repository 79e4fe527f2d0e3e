//! 🏗 Console input: whitespace separated tokens and menu choices

use std::collections::VecDeque;
use std::io::{self, BufRead};
use std::str::FromStr;

/// Reads whitespace separated tokens, regardless of how they are spread over
/// lines
pub struct Tokens<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    /// Next token, or [`None`] at the end of the input.
    pub fn next_token(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_owned));
        }
    }
}

/// An entry of the main menu
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MenuChoice {
    ParkCar,
    ParkBike,
    RemoveVehicle,
    DisplayStatus,
    Exit,
}

impl MenuChoice {
    pub const MENU: &'static str =
        "1. Park Car\n2. Park Bike\n3. Remove Vehicle\n4. Display Status\n5. Exit";
}

impl FromStr for MenuChoice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<i64>().map_err(|_| ())? {
            1 => Ok(MenuChoice::ParkCar),
            2 => Ok(MenuChoice::ParkBike),
            3 => Ok(MenuChoice::RemoveVehicle),
            4 => Ok(MenuChoice::DisplayStatus),
            5 => Ok(MenuChoice::Exit),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn tokens_span_lines() {
        let mut tokens = Tokens::new(Cursor::new("1 KA-01\n\n  4\n"));
        assert_eq!(tokens.next_token().unwrap().as_deref(), Some("1"));
        assert_eq!(tokens.next_token().unwrap().as_deref(), Some("KA-01"));
        assert_eq!(tokens.next_token().unwrap().as_deref(), Some("4"));
        assert_eq!(tokens.next_token().unwrap(), None);
    }

    #[test]
    fn menu_choices() {
        assert_eq!("1".parse(), Ok(MenuChoice::ParkCar));
        assert_eq!("+5".parse(), Ok(MenuChoice::Exit));
        assert_eq!("0".parse::<MenuChoice>(), Err(()));
        assert_eq!("six".parse::<MenuChoice>(), Err(()));
    }
}
