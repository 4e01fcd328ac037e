//! Generated identifiers for list markup
//!
//! List elements need document-unique ids. The source is injected so
//! tests can supply deterministic values; the default draws from UUID
//! entropy, which makes collisions negligible at document scale
//! without any global coordination.

/// Source of fresh list identifiers
pub trait ListIdSource {
    /// Produce the next identifier
    fn next_id(&mut self) -> u64;
}

const ID_FLOOR: u64 = 100_000_000_000_000_000;
const ID_SPAN: u64 = 800_000_000_000_000_000;

/// Default id source backed by UUID v4 entropy
#[derive(Debug, Default)]
pub struct RandomIdSource;

impl ListIdSource for RandomIdSource {
    fn next_id(&mut self) -> u64 {
        let raw = uuid::Uuid::new_v4().as_u128() as u64;
        ID_FLOOR + raw % ID_SPAN
    }
}

/// Deterministic id source for tests
#[derive(Debug)]
pub struct SequentialIdSource {
    next: u64,
}

impl SequentialIdSource {
    /// Start counting from `first`
    pub fn new(first: u64) -> Self {
        Self { next: first }
    }
}

impl ListIdSource for SequentialIdSource {
    fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_ids_in_range() {
        let mut source = RandomIdSource;
        for _ in 0..100 {
            let id = source.next_id();
            assert!(id >= ID_FLOOR);
            assert!(id < ID_FLOOR + ID_SPAN);
        }
    }

    #[test]
    fn test_sequential_ids() {
        let mut source = SequentialIdSource::new(7);
        assert_eq!(source.next_id(), 7);
        assert_eq!(source.next_id(), 8);
    }
}
