//! Zobrist position fingerprints.
//!
//! Every `(row, col, occupant)` triple gets an independent 64-bit key; a
//! board's fingerprint is the XOR of the keys of all its cells. Fingerprints
//! ignore the side to move. The whole board is rehashed on every call.

use crate::board::{Board, Color};

/// Occupancy states per cell: empty, black, white.
const OCCUPANCY_STATES: usize = 3;

#[inline]
fn occupancy_index(cell: Option<Color>) -> usize {
    match cell {
        None => 0,
        Some(Color::Black) => 1,
        Some(Color::White) => 2,
    }
}

/// Lazily sized Zobrist key table.
///
/// The keys for a given board size are derived from `(seed, size)`, so a
/// table rebuilt after switching sizes back and forth is bit-identical to
/// the one it replaces. Not safe for concurrent mutation.
#[derive(Clone, Debug)]
pub struct ZobristHasher {
    seed: u64,
    size: usize,
    keys: Vec<[u64; OCCUPANCY_STATES]>,
}

impl Default for ZobristHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl ZobristHasher {
    /// Create a hasher with a random seed.
    pub fn new() -> Self {
        Self::with_seed(fastrand::u64(..))
    }

    /// Create a hasher whose keys are reproducible from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            size: 0,
            keys: Vec::new(),
        }
    }

    /// Board size the current key table was built for (0 before first use).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Build the key table for `size`, unless it is already built.
    pub fn init(&mut self, size: usize) {
        if self.size == size && !self.keys.is_empty() {
            return;
        }
        let size_salt = (size as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        let mut rng = fastrand::Rng::with_seed(self.seed ^ size_salt);
        self.keys = (0..size * size)
            .map(|_| std::array::from_fn(|_| rng.u64(..)))
            .collect();
        self.size = size;
    }

    /// Fingerprint `board`, building the key table for its size if needed.
    pub fn hash(&mut self, board: &Board) -> u64 {
        self.init(board.size());
        board.cells().fold(0u64, |h, (row, col, cell)| {
            h ^ self.keys[row * self.size + col][occupancy_index(cell)]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Move;

    #[test]
    fn test_hash_deterministic() {
        let board = Board::standard(8).unwrap();
        let mut hasher = ZobristHasher::with_seed(7);
        let a = hasher.hash(&board);
        let b = hasher.hash(&board);
        assert_eq!(a, b);

        let mut other = ZobristHasher::with_seed(7);
        assert_eq!(other.hash(&board), a);
    }

    #[test]
    fn test_hash_differs_on_one_cell() {
        let board = Board::standard(8).unwrap();
        let mut changed = board.clone();
        changed.set(0, 0, Some(Color::Black));

        let mut hasher = ZobristHasher::with_seed(11);
        assert_ne!(hasher.hash(&board), hasher.hash(&changed));
    }

    #[test]
    fn test_init_same_size_is_stable() {
        let board = Board::standard(6).unwrap();
        let mut hasher = ZobristHasher::with_seed(3);
        let before = hasher.hash(&board);
        hasher.init(6);
        hasher.init(6);
        assert_eq!(hasher.hash(&board), before);
    }

    #[test]
    fn test_size_switch_preserves_keys() {
        let small = Board::standard(4).unwrap();
        let mut large = Board::standard(8).unwrap();
        large.apply_move(Move::new(2, 3), Color::Black);

        let mut hasher = ZobristHasher::with_seed(99);
        let before = hasher.hash(&large);
        hasher.hash(&small);
        assert_eq!(hasher.size(), 4);
        assert_eq!(hasher.hash(&large), before);
        assert_eq!(hasher.size(), 8);
    }
}
