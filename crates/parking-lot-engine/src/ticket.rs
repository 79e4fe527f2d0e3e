//! Entry tickets and the table of active tickets

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot_core::VehicleClass;

use crate::inventory::SlotId;

pub type TicketId = u64;

/// Record binding a parked vehicle to its slot and entry time
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Ticket {
    pub id: TicketId,
    pub slot: SlotId,
    pub vehicle: String,
    pub class: VehicleClass,
    pub entry_time: DateTime<Utc>,
}

/// Active tickets keyed by vehicle
///
/// Ticket ids are handed out from a counter that only ever grows, so ids stay
/// unique across releases.
#[derive(Clone, Debug)]
pub struct TicketBook {
    active: HashMap<String, Ticket>,
    next_id: TicketId,
}

impl Default for TicketBook {
    fn default() -> Self {
        Self {
            active: HashMap::new(),
            next_id: 1,
        }
    }
}

impl TicketBook {
    /// Issue a ticket for `vehicle` parked at `slot`.
    ///
    /// The caller makes sure `vehicle` has no active ticket yet.
    pub fn issue(
        &mut self,
        slot: SlotId,
        class: VehicleClass,
        vehicle: String,
        entry_time: DateTime<Utc>,
    ) -> Ticket {
        let ticket = Ticket {
            id: self.next_id,
            slot,
            vehicle: vehicle.clone(),
            class,
            entry_time,
        };
        self.next_id += 1;
        self.active.insert(vehicle, ticket.clone());
        ticket
    }

    pub fn get(&self, vehicle: &str) -> Option<&Ticket> {
        self.active.get(vehicle)
    }

    pub fn contains(&self, vehicle: &str) -> bool {
        self.active.contains_key(vehicle)
    }

    pub fn remove(&mut self, vehicle: &str) -> Option<Ticket> {
        self.active.remove(vehicle)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Id the next issued ticket will get
    #[cfg(test)]
    pub fn next_id(&self) -> TicketId {
        self.next_id
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ticket> + '_ {
        self.active.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_never_reused() {
        let mut book = TicketBook::default();
        let now = Utc::now();

        let first = book.issue(1, VehicleClass::Car, "A".into(), now);
        book.remove("A");
        let second = book.issue(1, VehicleClass::Car, "A".into(), now);

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(book.next_id(), 3);
        assert_eq!(book.get("A"), Some(&second));
    }
}
