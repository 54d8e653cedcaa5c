//! Grow-only entity pools
//!
//! Transient entities (coins, enemies, particles, dust) are reused rather
//! than destroyed: killing one flips its `exists` flag and a later acquire
//! claims the slot. The pool only ever grows, and entity counts stay in
//! the tens, so a linear scan for a free slot is fine.

/// Implemented by every pooled entity type
pub trait PoolEntity: Default {
    fn exists(&self) -> bool;
}

#[derive(Debug, Default)]
pub struct Pool<T> {
    items: Vec<T>,
}

impl<T: PoolEntity> Pool<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// First non-existing slot, or a freshly constructed one appended to
    /// the pool
    pub fn acquire(&mut self) -> &mut T {
        // NLL quirk: finding the index first avoids holding the search
        // borrow across the push.
        if let Some(i) = self.items.iter().position(|item| !item.exists()) {
            return &mut self.items[i];
        }
        self.items.push(T::default());
        self.items.last_mut().unwrap()
    }

    /// Drop all slots for a fresh run
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Count of live entities
    pub fn active(&self) -> usize {
        self.items.iter().filter(|item| item.exists()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Slot {
        exists: bool,
    }

    impl PoolEntity for Slot {
        fn exists(&self) -> bool {
            self.exists
        }
    }

    #[test]
    fn test_acquire_grows_when_full() {
        let mut pool: Pool<Slot> = Pool::new();
        assert_eq!(pool.len(), 0);

        pool.acquire().exists = true;
        assert_eq!(pool.len(), 1);

        pool.acquire().exists = true;
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_acquire_reuses_free_slot() {
        let mut pool: Pool<Slot> = Pool::new();
        pool.acquire().exists = true;
        pool.acquire().exists = true;

        // Free the first slot; the next acquire must reuse it
        pool.iter_mut().next().unwrap().exists = false;
        pool.acquire().exists = true;
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.active(), 2);
    }

    #[test]
    fn test_growth_is_exactly_one() {
        let mut pool: Pool<Slot> = Pool::new();
        for _ in 0..5 {
            pool.acquire().exists = true;
        }
        let before = pool.len();
        pool.acquire().exists = true;
        assert_eq!(pool.len(), before + 1);
    }
}
