use parking_lot_core::VehicleClass;

use crate::inventory::SlotId;
use crate::ticket::Ticket;

/// Where a vehicle currently is
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum VehicleState {
    /// Not tracked: never admitted, or already released
    Unseen,
    /// On the waiting queue of `class` at 1-based `position`
    Waiting {
        class: VehicleClass,
        position: usize,
    },
    /// Holding a slot
    Parked(Ticket),
}

/// State of one slot in a [`Status`] snapshot
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SlotStatus {
    pub id: SlotId,
    pub class: VehicleClass,
    pub occupied: bool,
    /// Vehicle holding the slot
    pub occupant: Option<String>,
}

/// Snapshot of the whole lot
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Status {
    /// Every slot, ordered by id
    pub slots: Vec<SlotStatus>,
    pub waiting_cars: usize,
    pub waiting_bikes: usize,
}

impl Status {
    pub fn waiting(&self, class: VehicleClass) -> usize {
        match class {
            VehicleClass::Car => self.waiting_cars,
            VehicleClass::Bike => self.waiting_bikes,
        }
    }

    pub fn slot(&self, id: SlotId) -> Option<&SlotStatus> {
        self.slots.iter().find(|slot| slot.id == id)
    }

    pub fn num_occupied(&self, class: VehicleClass) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.class == class && slot.occupied)
            .count()
    }

    pub fn num_free(&self, class: VehicleClass) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.class == class && !slot.occupied)
            .count()
    }
}
