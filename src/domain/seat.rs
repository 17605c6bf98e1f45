use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;

/// Последний ход игрока в текущем круге.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Move {
    Fold,
    Call,
    Raise,
    Check,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Move::Fold => "fold",
            Move::Call => "call",
            Move::Raise => "raise",
            Move::Check => "check",
        };
        f.write_str(s)
    }
}

/// Место за столом вместе с данными игрока.
///
/// `identity` – стабильный ключ (отображаемое имя), уникальный в пределах стола.
/// Неактивное место (sit out) остаётся в кольце, но пропускается при обходе очереди хода.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Seat {
    identity: String,
    chip_amount: Chips,
    current_bet: Chips,
    last_move: Option<Move>,
    active: bool,
}

impl Seat {
    /// Новый активный игрок без ставки и без хода.
    pub fn new(identity: impl Into<String>, chip_amount: Chips) -> Self {
        Self {
            identity: identity.into(),
            chip_amount,
            current_bet: Chips::ZERO,
            last_move: None,
            active: true,
        }
    }

    /// Тот же игрок, но сидящий вне игры.
    pub fn sitting_out(identity: impl Into<String>, chip_amount: Chips) -> Self {
        Self {
            active: false,
            ..Self::new(identity, chip_amount)
        }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn chip_amount(&self) -> Chips {
        self.chip_amount
    }

    pub fn current_bet(&self) -> Chips {
        self.current_bet
    }

    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_chip_amount(&mut self, amount: Chips) {
        self.chip_amount = amount;
    }

    pub fn set_bet(&mut self, bet: Chips) {
        self.current_bet = bet;
    }

    pub fn set_last_move(&mut self, last_move: Option<Move>) {
        self.last_move = last_move;
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Перезаписать изменяемые поля из факта детектора. Identity не трогаем.
    pub fn apply_fact(&mut self, fact: &PlayerFact) {
        debug_assert_eq!(self.identity, fact.identity);
        self.chip_amount = fact.chip_amount;
        self.current_bet = fact.bet;
        self.last_move = fact.last_move;
        self.active = fact.active;
    }

    /// Совпадают ли изменяемые поля с фактом (повторный факт ничего не меняет).
    pub fn matches_fact(&self, fact: &PlayerFact) -> bool {
        self.chip_amount == fact.chip_amount
            && self.current_bet == fact.bet
            && self.last_move == fact.last_move
            && self.active == fact.active
    }
}

impl From<PlayerFact> for Seat {
    fn from(fact: PlayerFact) -> Self {
        Self {
            identity: fact.identity,
            chip_amount: fact.chip_amount,
            current_bet: fact.bet,
            last_move: fact.last_move,
            active: fact.active,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Seat({}, chips={}, bet={}, move=",
            self.identity, self.chip_amount, self.current_bet
        )?;
        match self.last_move {
            Some(m) => write!(f, "{m}")?,
            None => f.write_str("none")?,
        }
        write!(f, ", active={})", self.active)
    }
}

/// Факт об игроке, пришедший от детектора (или любого другого продюсера).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerFact {
    pub identity: String,
    #[serde(default)]
    pub chip_amount: Chips,
    #[serde(default)]
    pub bet: Chips,
    #[serde(default)]
    pub last_move: Option<Move>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl PlayerFact {
    /// Активный игрок со стеком и без ставки.
    pub fn new(identity: impl Into<String>, chip_amount: Chips) -> Self {
        Self {
            identity: identity.into(),
            chip_amount,
            bet: Chips::ZERO,
            last_move: None,
            active: true,
        }
    }

    pub fn with_bet(mut self, bet: Chips) -> Self {
        self.bet = bet;
        self
    }

    pub fn with_last_move(mut self, last_move: Move) -> Self {
        self.last_move = Some(last_move);
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}
