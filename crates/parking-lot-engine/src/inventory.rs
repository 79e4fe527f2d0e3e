//! Implementation of the slot inventory and the per-class free pools

use std::collections::BTreeSet;

use parking_lot_core::VehicleClass;

/// Identifier of a physical slot, starting at 1
pub type SlotId = u32;

/// One physical parking space
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Slot {
    id: SlotId,
    class: VehicleClass,
    occupied: bool,
}

impl Slot {
    #[inline]
    pub fn id(&self) -> SlotId {
        self.id
    }

    #[inline]
    pub fn class(&self) -> VehicleClass {
        self.class
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.occupied
    }
}

/// All slots of the lot together with the free pool of every class
///
/// Car slots get the ids `1..=cars`, bike slots the ids that follow. A slot id
/// is in the free pool of its class iff the slot is not occupied.
#[derive(Clone, Debug)]
pub struct SlotInventory {
    slots: Vec<Slot>,
    free_cars: BTreeSet<SlotId>,
    free_bikes: BTreeSet<SlotId>,
    cars: usize,
}

impl SlotInventory {
    /// Create a new [`SlotInventory`] with every slot free.
    ///
    /// The caller guarantees that `cars + bikes` fits into a [`SlotId`].
    pub fn new(cars: u32, bikes: u32) -> Self {
        let mut slots = Vec::with_capacity(cars as usize + bikes as usize);
        let mut free_cars = BTreeSet::new();
        let mut free_bikes = BTreeSet::new();

        let mut id: SlotId = 1;
        for (class, count) in [(VehicleClass::Car, cars), (VehicleClass::Bike, bikes)] {
            for _ in 0..count {
                slots.push(Slot {
                    id,
                    class,
                    occupied: false,
                });
                match class {
                    VehicleClass::Car => free_cars.insert(id),
                    VehicleClass::Bike => free_bikes.insert(id),
                };
                id += 1;
            }
        }

        Self {
            slots,
            free_cars,
            free_bikes,
            cars: cars as usize,
        }
    }

    fn pool(&self, class: VehicleClass) -> &BTreeSet<SlotId> {
        match class {
            VehicleClass::Car => &self.free_cars,
            VehicleClass::Bike => &self.free_bikes,
        }
    }

    fn pool_mut(&mut self, class: VehicleClass) -> &mut BTreeSet<SlotId> {
        match class {
            VehicleClass::Car => &mut self.free_cars,
            VehicleClass::Bike => &mut self.free_bikes,
        }
    }

    /// All slots ordered by id
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    #[cfg(test)]
    pub fn slot(&self, id: SlotId) -> Option<&Slot> {
        let index = (id as usize).checked_sub(1)?;
        self.slots.get(index)
    }

    /// Total number of slots of `class`
    pub fn capacity(&self, class: VehicleClass) -> usize {
        match class {
            VehicleClass::Car => self.cars,
            VehicleClass::Bike => self.slots.len() - self.cars,
        }
    }

    /// Number of free slots of `class`
    pub fn num_free(&self, class: VehicleClass) -> usize {
        self.pool(class).len()
    }

    #[cfg(test)]
    pub fn num_occupied(&self, class: VehicleClass) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.class == class && slot.occupied)
            .count()
    }

    /// Ids in the free pool of `class`, lowest first
    #[cfg(test)]
    pub fn free_ids(&self, class: VehicleClass) -> impl Iterator<Item = SlotId> + '_ {
        self.pool(class).iter().copied()
    }

    /// Occupy the free slot of `class` with the lowest id.
    ///
    /// Returns [`None`] if the class has no free slot.
    pub fn allocate(&mut self, class: VehicleClass) -> Option<SlotId> {
        let id = self.pool_mut(class).pop_first()?;
        self.slots[id as usize - 1].occupied = true;
        Some(id)
    }

    /// Free the occupied slot `id` and put it back into its pool.
    ///
    /// Returns the class of the slot, or [`None`] if `id` is unknown or the
    /// slot was not occupied (nothing changes in that case).
    pub fn deallocate(&mut self, id: SlotId) -> Option<VehicleClass> {
        let index = (id as usize).checked_sub(1)?;
        let slot = self.slots.get_mut(index)?;
        if !slot.occupied {
            return None;
        }
        slot.occupied = false;
        let class = slot.class;
        self.pool_mut(class).insert(id);
        Some(class)
    }
}
