use crate::error::InvariantViolation;
use crate::model::bid::Bid;
use crate::model::hand::Hand;
use crate::model::player::{PlayerPosition, Team};

/// One of the four chairs at the table and everything that resets per round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    pub position: PlayerPosition,
    pub name: String,
    pub is_ai: bool,
    pub hand: Hand,
    pub bid: Option<Bid>,
    pub tricks_won: u8,
}

impl Seat {
    pub fn new(position: PlayerPosition, name: impl Into<String>, is_ai: bool) -> Self {
        Self {
            position,
            name: name.into(),
            is_ai,
            hand: Hand::new(),
            bid: None,
            tricks_won: 0,
        }
    }

    pub const fn team(&self) -> Team {
        self.position.team()
    }

    /// South is the human, partnered with North; East and West are bots.
    pub fn default_table(human_name: impl Into<String>) -> [Seat; 4] {
        [
            Seat::new(PlayerPosition::North, "Partner", true),
            Seat::new(PlayerPosition::East, "East", true),
            Seat::new(PlayerPosition::South, human_name, false),
            Seat::new(PlayerPosition::West, "West", true),
        ]
    }

    pub fn all_ai() -> [Seat; 4] {
        PlayerPosition::LOOP.map(|position| Seat::new(position, position.to_string(), true))
    }
}

/// Puts every seat at its own position's index, whatever order it arrived in.
pub fn arrange_seats(seats: [Seat; 4]) -> Result<[Seat; 4], InvariantViolation> {
    let mut slots: [Option<Seat>; 4] = Default::default();
    for seat in seats {
        let position = seat.position;
        if slots[position.index()].replace(seat).is_some() {
            return Err(InvariantViolation::SeatOrder { position });
        }
    }
    match slots {
        [Some(north), Some(east), Some(south), Some(west)] => Ok([north, east, south, west]),
        _ => Err(InvariantViolation::SeatOrder {
            position: PlayerPosition::North,
        }),
    }
}

/// Sum of both members' bids; seats that have not bid count as zero.
pub fn team_bid(seats: &[Seat], team: Team) -> u8 {
    seats
        .iter()
        .filter(|seat| seat.team() == team)
        .map(|seat| seat.bid.map(Bid::tricks).unwrap_or(0))
        .sum()
}

pub fn team_tricks(seats: &[Seat], team: Team) -> u8 {
    seats
        .iter()
        .filter(|seat| seat.team() == team)
        .map(|seat| seat.tricks_won)
        .sum()
}
