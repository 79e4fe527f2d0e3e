//! FIFO waiting queues, one per vehicle class

use std::collections::{HashSet, VecDeque};

use parking_lot_core::VehicleClass;

/// A vehicle waiting for a slot
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct QueueEntry {
    pub class: VehicleClass,
    pub vehicle: String,
}

#[derive(Clone, Debug, Default)]
pub struct WaitQueues {
    cars: VecDeque<QueueEntry>,
    bikes: VecDeque<QueueEntry>,
    /// vehicles currently in any queue
    members: HashSet<String>,
}

impl WaitQueues {
    fn queue(&self, class: VehicleClass) -> &VecDeque<QueueEntry> {
        match class {
            VehicleClass::Car => &self.cars,
            VehicleClass::Bike => &self.bikes,
        }
    }

    fn queue_mut(&mut self, class: VehicleClass) -> &mut VecDeque<QueueEntry> {
        match class {
            VehicleClass::Car => &mut self.cars,
            VehicleClass::Bike => &mut self.bikes,
        }
    }

    pub fn contains(&self, vehicle: &str) -> bool {
        self.members.contains(vehicle)
    }

    pub fn len(&self, class: VehicleClass) -> usize {
        self.queue(class).len()
    }

    #[cfg(test)]
    pub fn is_empty(&self, class: VehicleClass) -> bool {
        self.queue(class).is_empty()
    }

    /// Append `vehicle` to the queue of `class`.
    ///
    /// Returns the queue length after insertion, i.e. the 1-based position of
    /// the new entry.
    pub fn push_back(&mut self, class: VehicleClass, vehicle: String) -> usize {
        self.members.insert(vehicle.clone());
        let queue = self.queue_mut(class);
        queue.push_back(QueueEntry { class, vehicle });
        queue.len()
    }

    /// Put a dequeued entry back at the head of its queue.
    pub fn push_front(&mut self, entry: QueueEntry) {
        self.members.insert(entry.vehicle.clone());
        self.queue_mut(entry.class).push_front(entry);
    }

    pub fn pop_front(&mut self, class: VehicleClass) -> Option<QueueEntry> {
        let entry = self.queue_mut(class).pop_front()?;
        self.members.remove(&entry.vehicle);
        Some(entry)
    }

    /// Class and 1-based position of a waiting vehicle
    pub fn position(&self, vehicle: &str) -> Option<(VehicleClass, usize)> {
        if !self.contains(vehicle) {
            return None;
        }
        VehicleClass::ALL.into_iter().find_map(|class| {
            self.iter(class)
                .position(|entry| entry.vehicle == vehicle)
                .map(|index| (class, index + 1))
        })
    }

    /// Waiting vehicles of `class`, head first
    pub fn iter(&self, class: VehicleClass) -> impl Iterator<Item = &QueueEntry> + '_ {
        self.queue(class).iter()
    }
}
