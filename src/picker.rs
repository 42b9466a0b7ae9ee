//! Pick order randomization for a table of players

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

pub const MIN_PLAYERS: u8 = 2;
pub const MAX_PLAYERS: u8 = 8;
pub const DEFAULT_PLAYERS: u8 = 4;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PickOrderError {
    #[error("player count must be between 2 and 8, got {0}")]
    PlayerCount(u8),
}

/// Number of players at the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickOrder {
    players: u8,
}

impl Default for PickOrder {
    fn default() -> Self {
        PickOrder {
            players: DEFAULT_PLAYERS,
        }
    }
}

impl PickOrder {
    pub fn new(players: u8) -> Result<Self, PickOrderError> {
        if (MIN_PLAYERS..=MAX_PLAYERS).contains(&players) {
            Ok(PickOrder { players })
        } else {
            Err(PickOrderError::PlayerCount(players))
        }
    }

    pub fn players(&self) -> u8 {
        self.players
    }

    /// One more player, stopping at the maximum
    pub fn increment(&mut self) {
        self.players = (self.players + 1).min(MAX_PLAYERS);
    }

    /// One fewer player, stopping at the minimum
    pub fn decrement(&mut self) {
        self.players = self.players.saturating_sub(1).max(MIN_PLAYERS);
    }

    /// Players `1..=N` in random order; index `i` picks `i + 1`-th
    pub fn randomize(&self) -> Vec<u8> {
        self.randomize_with(&mut rand::thread_rng())
    }

    pub fn randomize_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<u8> {
        let mut order: Vec<u8> = (1..=self.players).collect();
        order.shuffle(rng);
        order
    }
}

/// `Pick 1: Player 3` style lines
pub fn format_pick_order(order: &[u8]) -> Vec<String> {
    order
        .iter()
        .enumerate()
        .map(|(i, player)| format!("Pick {}: Player {}", i + 1, player))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_player_count_bounds() {
        assert_eq!(PickOrder::new(1), Err(PickOrderError::PlayerCount(1)));
        assert_eq!(PickOrder::new(9), Err(PickOrderError::PlayerCount(9)));
        assert_eq!(PickOrder::new(2).unwrap().players(), 2);
        assert_eq!(PickOrder::new(8).unwrap().players(), 8);
        assert_eq!(PickOrder::default().players(), 4);
    }

    #[test]
    fn test_spinner_clamps() {
        let mut order = PickOrder::new(MAX_PLAYERS).unwrap();
        order.increment();
        assert_eq!(order.players(), MAX_PLAYERS);

        let mut order = PickOrder::new(MIN_PLAYERS).unwrap();
        order.decrement();
        assert_eq!(order.players(), MIN_PLAYERS);
        order.increment();
        assert_eq!(order.players(), 3);
    }

    #[test]
    fn test_randomize_is_permutation_for_every_count() {
        let mut rng = StdRng::seed_from_u64(42);
        for players in MIN_PLAYERS..=MAX_PLAYERS {
            let order = PickOrder::new(players).unwrap();
            let mut result = order.randomize_with(&mut rng);
            assert_eq!(result.len(), players as usize);
            result.sort_unstable();
            assert_eq!(result, (1..=players).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_format_pick_order() {
        assert_eq!(
            format_pick_order(&[3, 1, 2]),
            ["Pick 1: Player 3", "Pick 2: Player 1", "Pick 3: Player 2"]
        );
    }
}
