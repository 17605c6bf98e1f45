use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Масть карты.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Suit {
    Clubs,    // ♣
    Diamonds, // ♦
    Hearts,   // ♥
    Spades,   // ♠
}

/// Ранг карты.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

/// Идентификатор карты на борде. Оценкой рук мы не занимаемся –
/// карта здесь только то, что распознал детектор.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

/// Ошибки разбора идентификатора карты.
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardParseError {
    #[error("идентификатор карты должен иметь вид `Ah`, `Td` или `10c`, получено `{0}`")]
    BadLength(String),

    #[error("неизвестный ранг `{0}`")]
    BadRank(String),

    #[error("неизвестная масть `{0}`")]
    BadSuit(char),
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Разобрать список идентификаторов (как их отдаёт детектор) с сохранением порядка.
    pub fn parse_many<S: AsRef<str>>(ids: &[S]) -> Result<Vec<Card>, CardParseError> {
        ids.iter().map(|s| s.as_ref().trim().parse()).collect()
    }
}

impl Rank {
    fn from_token(token: &str) -> Result<Rank, CardParseError> {
        let rank = match token {
            "2" => Rank::Two,
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "T" | "t" | "10" => Rank::Ten,
            "J" | "j" => Rank::Jack,
            "Q" | "q" => Rank::Queen,
            "K" | "k" => Rank::King,
            "A" | "a" => Rank::Ace,
            other => return Err(CardParseError::BadRank(other.to_string())),
        };
        Ok(rank)
    }
}

impl Suit {
    fn from_char(ch: char) -> Result<Suit, CardParseError> {
        match ch {
            'c' | 'C' => Ok(Suit::Clubs),
            'd' | 'D' => Ok(Suit::Diamonds),
            'h' | 'H' => Ok(Suit::Hearts),
            's' | 'S' => Ok(Suit::Spades),
            other => Err(CardParseError::BadSuit(other)),
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ch = match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        };
        write!(f, "{ch}")
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "T",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        };
        f.write_str(s)
    }
}

impl fmt::Display for Card {
    /// Формат вида `Ah`, `Td`, `7c`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

/// Парсинг строки вида "Ah", "Td", "7c", "10s".
impl FromStr for Card {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let suit_ch = match chars.next_back() {
            Some(ch) => ch,
            None => return Err(CardParseError::BadLength(s.to_string())),
        };
        let rank_part = chars.as_str();
        if rank_part.is_empty() || rank_part.chars().count() > 2 {
            return Err(CardParseError::BadLength(s.to_string()));
        }

        Ok(Card {
            rank: Rank::from_token(rank_part)?,
            suit: Suit::from_char(suit_ch)?,
        })
    }
}
