//! Reusable-instance pool for high-churn entities
//!
//! Bullets and particles are created and destroyed many times per second;
//! the pool keeps released instances on a free list so steady-state frames
//! allocate nothing once warmed to peak concurrent usage.
//!
//! Ownership moves through `acquire`/`release`, so a released instance
//! cannot be read or mutated by a stale holder. Single-threaded,
//! frame-synchronous use only.

#[derive(Debug, Default)]
pub struct Pool<T: Default> {
    free: Vec<T>,
}

impl<T: Default> Pool<T> {
    pub fn new() -> Self {
        Self { free: Vec::new() }
    }

    /// Pre-construct `n` instances so the first frames don't allocate.
    pub fn warm(&mut self, n: usize) {
        self.free.reserve(n);
        while self.free.len() < n {
            self.free.push(T::default());
        }
    }

    /// Pop a previously released instance, or construct a fresh one.
    /// The caller reinitializes it (the entity's `reset`) and owns it
    /// while active.
    pub fn acquire(&mut self) -> T {
        self.free.pop().unwrap_or_default()
    }

    /// Return an instance to the free list for future reuse.
    pub fn release(&mut self, item: T) {
        self.free.push(item);
    }

    /// Number of instances currently on the free list.
    pub fn free_len(&self) -> usize {
        self.free.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Probe {
        generation: u32,
    }

    #[test]
    fn test_acquire_reuses_released_instance() {
        let mut pool: Pool<Probe> = Pool::new();

        let mut a = pool.acquire();
        a.generation = 7;
        pool.release(a);
        assert_eq!(pool.free_len(), 1);

        // The recycled instance comes back as-is; reinit is the caller's job
        let b = pool.acquire();
        assert_eq!(b.generation, 7);
        assert_eq!(pool.free_len(), 0);
    }

    #[test]
    fn test_acquire_constructs_when_empty() {
        let mut pool: Pool<Probe> = Pool::new();
        assert_eq!(pool.free_len(), 0);
        let p = pool.acquire();
        assert_eq!(p.generation, 0);
    }

    #[test]
    fn test_warm_preallocates() {
        let mut pool: Pool<Probe> = Pool::new();
        pool.warm(32);
        assert_eq!(pool.free_len(), 32);

        // Warming to a smaller count never shrinks
        pool.warm(8);
        assert_eq!(pool.free_len(), 32);
    }

    #[test]
    fn test_release_grows_free_list_by_one() {
        let mut pool: Pool<Probe> = Pool::new();
        pool.warm(4);
        let item = pool.acquire();
        assert_eq!(pool.free_len(), 3);
        pool.release(item);
        assert_eq!(pool.free_len(), 4);
    }
}
