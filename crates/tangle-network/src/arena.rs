//! Generational slot arena backing the cell and propagator registries.
//!
//! Slots are reused through a free list; every removal bumps the slot's
//! generation, so ids issued for a previous occupant fail to resolve
//! instead of aliasing the new one.

use tangle_core::{CellId, PropagatorId};

/// An id that addresses an arena slot.
pub trait ArenaId: Copy {
    /// Build the id from a slot index and generation.
    fn from_parts(index: u32, generation: u32) -> Self;
    /// Slot index.
    fn slot(&self) -> u32;
    /// Slot generation.
    fn slot_generation(&self) -> u32;
}

impl ArenaId for CellId {
    fn from_parts(index: u32, generation: u32) -> Self {
        CellId::new(index, generation)
    }

    fn slot(&self) -> u32 {
        self.index()
    }

    fn slot_generation(&self) -> u32 {
        self.generation()
    }
}

impl ArenaId for PropagatorId {
    fn from_parts(index: u32, generation: u32) -> Self {
        PropagatorId::new(index, generation)
    }

    fn slot(&self) -> u32 {
        self.index()
    }

    fn slot_generation(&self) -> u32 {
        self.generation()
    }
}

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Slab of `T` addressed by generational ids of type `I`.
#[derive(Debug)]
pub struct Arena<I, T> {
    slots: Vec<Slot<T>>,
    free_list: Vec<u32>,
    live: usize,
    _id: std::marker::PhantomData<I>,
}

impl<I: ArenaId, T> Arena<I, T> {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            live: 0,
            _id: std::marker::PhantomData,
        }
    }

    /// Store `value`, reusing a freed slot when one exists.
    pub fn insert(&mut self, value: T) -> I {
        self.live += 1;
        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(value);
            return I::from_parts(index, slot.generation);
        }
        let index = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
        self.slots.push(Slot {
            generation: 0,
            value: Some(value),
        });
        I::from_parts(index, 0)
    }

    /// Resolve an id.
    pub fn get(&self, id: I) -> Option<&T> {
        let slot = self.slots.get(id.slot() as usize)?;
        if slot.generation != id.slot_generation() {
            return None;
        }
        slot.value.as_ref()
    }

    /// Resolve an id mutably.
    pub fn get_mut(&mut self, id: I) -> Option<&mut T> {
        let slot = self.slots.get_mut(id.slot() as usize)?;
        if slot.generation != id.slot_generation() {
            return None;
        }
        slot.value.as_mut()
    }

    /// Whether the id resolves.
    pub fn contains(&self, id: I) -> bool {
        self.get(id).is_some()
    }

    /// Remove the value, retiring the id.
    pub fn remove(&mut self, id: I) -> Option<T> {
        let slot = self.slots.get_mut(id.slot() as usize)?;
        if slot.generation != id.slot_generation() {
            return None;
        }
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(id.slot());
        self.live -= 1;
        Some(value)
    }

    /// Number of live values.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Whether no values are live.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Slots ever allocated (live and free).
    pub fn total_slots(&self) -> usize {
        self.slots.len()
    }

    /// Live `(id, value)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (I, &T)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.value
                .as_ref()
                .map(|v| (I::from_parts(i as u32, slot.generation), v))
        })
    }

    /// Mutable access to every live value, in slot order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots.iter_mut().filter_map(|slot| slot.value.as_mut())
    }

    /// Live ids in slot order.
    pub fn ids(&self) -> Vec<I> {
        self.iter().map(|(id, _)| id).collect()
    }
}

impl<I: ArenaId, T> Default for Arena<I, T> {
    fn default() -> Self {
        Self::new()
    }
}
