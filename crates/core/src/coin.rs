use std::fmt;

use geo::Point;

pub const COLLECTED_MESSAGE: &str = "Collected a coin!";

/// A collectible marker placed on the map.
#[derive(Clone, Debug, PartialEq)]
pub struct Coin<H> {
    pub handle: H,
    /// Where the coin was placed. The surface stays authoritative for the
    /// collection check.
    pub position: Point,
}

impl<H> Coin<H> {
    pub fn new(handle: H, position: Point) -> Self {
        Self { handle, position }
    }
}

/// Live coins in placement order, bounded by `capacity`.
#[derive(Clone, Debug)]
pub struct CoinField<H> {
    coins: Vec<Coin<H>>,
    capacity: usize,
}

impl<H> CoinField<H> {
    pub fn new(capacity: usize) -> Self {
        Self {
            coins: Vec::new(),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.coins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// How many coins are missing to reach capacity.
    pub fn shortfall(&self) -> usize {
        self.capacity.saturating_sub(self.coins.len())
    }

    pub fn is_full(&self) -> bool {
        self.shortfall() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coin<H>> {
        self.coins.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Coin<H>> {
        self.coins.get(index)
    }

    /// Append a coin. Returns it back if the field is already full.
    pub fn push(&mut self, coin: Coin<H>) -> Result<(), Coin<H>> {
        if self.is_full() {
            return Err(coin);
        }

        self.coins.push(coin);
        Ok(())
    }

    /// Remove the coin at `index`, keeping the order of the rest.
    pub fn remove(&mut self, index: usize) -> Option<Coin<H>> {
        (index < self.coins.len()).then(|| self.coins.remove(index))
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Coin<H>> + '_ {
        self.coins.drain(..)
    }
}

/// Number of coins collected so far. Only ever goes up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(u32);

impl Score {
    pub const ZERO: Score = Score(0);

    pub fn value(&self) -> u32 {
        self.0
    }

    pub(crate) fn increment(&mut self) {
        self.0 = self.0.saturating_add(1);
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Score: {}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coin(id: u32) -> Coin<u32> {
        Coin::new(id, Point::new(0.0, 0.0))
    }

    #[test]
    fn test_field_is_bounded() {
        let mut field = CoinField::new(2);
        assert_eq!(field.shortfall(), 2);

        assert!(field.push(coin(1)).is_ok());
        assert!(field.push(coin(2)).is_ok());
        assert!(field.is_full());

        let rejected = field.push(coin(3)).unwrap_err();
        assert_eq!(rejected.handle, 3);
        assert_eq!(field.len(), 2);
    }

    #[test]
    fn test_huge_capacity_does_not_preallocate() {
        let mut field = CoinField::new(usize::MAX);
        assert!(field.is_empty());
        assert!(field.push(coin(1)).is_ok());
        assert_eq!(field.shortfall(), usize::MAX - 1);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut field = CoinField::new(5);
        for id in 1..=4 {
            field.push(coin(id)).unwrap();
        }

        let removed = field.remove(1).unwrap();
        assert_eq!(removed.handle, 2);

        let order: Vec<u32> = field.iter().map(|c| c.handle).collect();
        assert_eq!(order, vec![1, 3, 4]);
        assert!(field.remove(10).is_none());
    }

    #[test]
    fn test_score_display() {
        let mut score = Score::default();
        assert_eq!(score.to_string(), "Score: 0");

        score.increment();
        score.increment();
        assert_eq!(score.value(), 2);
        assert_eq!(format!("{score}"), "Score: 2");
    }

    #[test]
    fn test_score_saturates() {
        let mut score = Score(u32::MAX);
        score.increment();
        assert_eq!(score.value(), u32::MAX);
    }
}
