//! Fixed-capacity pool of scratch vectors for the contact resolver.
//!
//! The pool is a stack: [`ArenaScope::acquire`] hands out the next free slot,
//! zeroed, and dropping the scope returns every slot it took in one step,
//! including on early return through `?`.

use std::ops::{Index, IndexMut};

use glam::Vec2;

use super::error::{PhysicsError, PhysicsResult};

/// Capacity of the arena owned by a default `PhysicsWorld`.
pub const DEFAULT_ARENA_CAPACITY: usize = 256;

/// Handle to a vector acquired from an [`ArenaScope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScratchVec(usize);

/// Pre-allocated pool of 2D vectors.
#[derive(Debug)]
pub struct ScratchArena {
    slots: Vec<Vec2>,
    in_use: usize,
}

impl ScratchArena {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![Vec2::ZERO; capacity],
            in_use: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of vectors that can still be acquired.
    pub fn available(&self) -> usize {
        self.slots.len() - self.in_use
    }

    /// Open a scope; every vector acquired through it is returned on drop.
    pub fn scope(&mut self) -> ArenaScope<'_> {
        ArenaScope {
            arena: self,
            acquired: 0,
        }
    }

    fn acquire(&mut self) -> PhysicsResult<ScratchVec> {
        if self.in_use == self.slots.len() {
            return Err(PhysicsError::ArenaExhausted {
                capacity: self.slots.len(),
            });
        }
        let slot = self.in_use;
        self.slots[slot] = Vec2::ZERO;
        self.in_use += 1;
        Ok(ScratchVec(slot))
    }

    /// Return `count` vectors to the pool.
    pub fn release(&mut self, count: usize) -> PhysicsResult<()> {
        if count > self.in_use {
            return Err(PhysicsError::ArenaOverRelease {
                requested: count,
                outstanding: self.in_use,
            });
        }
        self.in_use -= count;
        Ok(())
    }
}

impl Default for ScratchArena {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_ARENA_CAPACITY)
    }
}

/// Borrow of the arena for the duration of one resolution call.
pub struct ArenaScope<'a> {
    arena: &'a mut ScratchArena,
    acquired: usize,
}

impl ArenaScope<'_> {
    /// Take a zeroed vector from the pool.
    pub fn acquire(&mut self) -> PhysicsResult<ScratchVec> {
        let handle = self.arena.acquire()?;
        self.acquired += 1;
        Ok(handle)
    }

    /// Take a vector from the pool and initialize it.
    pub fn acquire_with(&mut self, value: Vec2) -> PhysicsResult<ScratchVec> {
        let handle = self.acquire()?;
        self[handle] = value;
        Ok(handle)
    }

    /// Number of vectors taken through this scope so far.
    pub fn acquired(&self) -> usize {
        self.acquired
    }
}

impl Index<ScratchVec> for ArenaScope<'_> {
    type Output = Vec2;

    fn index(&self, handle: ScratchVec) -> &Vec2 {
        debug_assert!(handle.0 < self.arena.in_use, "stale scratch handle");
        &self.arena.slots[handle.0]
    }
}

impl IndexMut<ScratchVec> for ArenaScope<'_> {
    fn index_mut(&mut self, handle: ScratchVec) -> &mut Vec2 {
        debug_assert!(handle.0 < self.arena.in_use, "stale scratch handle");
        &mut self.arena.slots[handle.0]
    }
}

impl Drop for ArenaScope<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.arena.release(self.acquired) {
            tracing::error!("{err}");
            if !std::thread::panicking() {
                panic!("{err}");
            }
        }
    }
}
