//! Implementation of the allocation engine
use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot_core::{Config, VehicleClass};
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::{EngineError, Result};
use crate::fee::{Fee, FeePolicy};
use crate::inventory::{SlotId, SlotInventory};
use crate::queue::WaitQueues;
use crate::status::{SlotStatus, Status, VehicleState};
use crate::ticket::{Ticket, TicketBook, TicketId};

/// Largest number of slots a lot may have, both classes together
pub const MAX_SLOTS: SlotId = 1_000_000;

/// Outcome of a successful admission
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Admission {
    /// The vehicle got a slot and a ticket
    Parked { slot: SlotId, ticket: TicketId },
    /// No slot of the class was free; the vehicle is waiting at `position`
    Queued { position: usize },
}

/// A waiting vehicle that received the slot freed by a departure
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Promotion {
    pub vehicle: String,
    pub class: VehicleClass,
    pub slot: SlotId,
    pub ticket: TicketId,
}

/// Outcome of a successful release
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Departure {
    /// The freed slot
    pub slot: SlotId,
    /// The ticket the vehicle held until now
    pub ticket: Ticket,
    pub exit_time: DateTime<Utc>,
    pub fee: Fee,
    /// Head of the waiting queue that took over the freed slot
    pub promoted: Option<Promotion>,
}

/// Slot allocation and waiting-queue engine
///
/// Owns the slots, the free pool and waiting queue of every class, and the
/// table of active tickets. Every operation either applies completely or
/// fails without touching any of them.
pub struct AllocationEngine {
    inventory: SlotInventory,
    queues: WaitQueues,
    tickets: TicketBook,
    fees: FeePolicy,
    clock: Arc<dyn Clock>,
}

impl AllocationEngine {
    /// Create a new [`AllocationEngine`] with the default hourly rate.
    ///
    /// Car slots are numbered `1..=car_capacity`, bike slots follow.
    pub fn new(car_capacity: i64, bike_capacity: i64) -> Result<Self> {
        Self::from_config(&Config {
            car_slots: car_capacity,
            bike_slots: bike_capacity,
            ..Config::default()
        })
    }

    /// Create a new [`AllocationEngine`] from `config`, reading the wall clock.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cars = capacity(config, VehicleClass::Car)?;
        let bikes = capacity(config, VehicleClass::Bike)?;
        if cars.checked_add(bikes).map_or(true, |total| total > MAX_SLOTS) {
            return Err(EngineError::InvalidConfig(format!(
                "{cars} car slots and {bikes} bike slots exceed the limit of {MAX_SLOTS} slots"
            )));
        }

        info!(cars, bikes, rate = config.hourly_rate, "parking lot opened");
        Ok(Self {
            inventory: SlotInventory::new(cars, bikes),
            queues: WaitQueues::default(),
            tickets: TicketBook::default(),
            fees: FeePolicy::new(config.hourly_rate),
            clock: Arc::new(SystemClock),
        })
    }

    /// Replace the time source used for entry and exit times.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Admit a vehicle of `class`.
    ///
    /// The vehicle gets the lowest free slot of its class, or is appended to
    /// the waiting queue of its class if there is none. A vehicle that is
    /// already parked or waiting is rejected.
    pub fn admit(&mut self, class: VehicleClass, vehicle: impl Into<String>) -> Result<Admission> {
        let vehicle = vehicle.into();
        if vehicle.is_empty()
            || self.tickets.contains(&vehicle)
            || self.queues.contains(&vehicle)
        {
            warn!(%vehicle, class = class.as_str(), "rejected duplicate vehicle");
            return Err(EngineError::DuplicateVehicle { vehicle });
        }

        match self.inventory.allocate(class) {
            Some(slot) => {
                let ticket = self.issue_ticket(slot, class, vehicle);
                Ok(Admission::Parked { slot, ticket })
            }
            None => {
                let position = self.queues.push_back(class, vehicle.clone());
                info!(%vehicle, class = class.as_str(), position, "no free slot, vehicle queued");
                Ok(Admission::Queued { position })
            }
        }
    }

    /// Release a parked vehicle and charge its stay.
    ///
    /// The freed slot goes back to the pool of its class and is immediately
    /// handed to the head of that class's waiting queue, if any. Waiting
    /// vehicles hold no ticket and cannot be released.
    pub fn release(&mut self, vehicle: &str) -> Result<Departure> {
        let Some(ticket) = self.tickets.remove(vehicle) else {
            warn!(%vehicle, "release of unknown vehicle");
            return Err(EngineError::VehicleNotFound {
                vehicle: vehicle.to_owned(),
            });
        };

        let exit_time = self.clock.now();
        let fee = self.fees.charge(exit_time - ticket.entry_time);
        let slot = ticket.slot;
        self.inventory.deallocate(slot);
        info!(
            %vehicle,
            slot,
            ticket = ticket.id,
            hours = fee.billed_hours,
            fee = fee.amount,
            "vehicle released"
        );

        let promoted = self.promote_next(ticket.class);
        Ok(Departure {
            slot,
            ticket,
            exit_time,
            fee,
            promoted,
        })
    }

    /// Take a snapshot of all slots and waiting queues.
    pub fn status(&self) -> Status {
        let occupants: HashMap<SlotId, &str> = self
            .tickets
            .iter()
            .map(|ticket| (ticket.slot, ticket.vehicle.as_str()))
            .collect();

        let slots = self
            .inventory
            .slots()
            .iter()
            .map(|slot| SlotStatus {
                id: slot.id(),
                class: slot.class(),
                occupied: slot.is_occupied(),
                occupant: occupants.get(&slot.id()).map(|v| v.to_string()),
            })
            .collect();

        let status = Status {
            slots,
            waiting_cars: self.queues.len(VehicleClass::Car),
            waiting_bikes: self.queues.len(VehicleClass::Bike),
        };
        debug!(
            parked = self.tickets.len(),
            waiting_cars = status.waiting_cars,
            waiting_bikes = status.waiting_bikes,
            "status snapshot"
        );
        status
    }

    pub fn vehicle_state(&self, vehicle: &str) -> VehicleState {
        if let Some(ticket) = self.tickets.get(vehicle) {
            return VehicleState::Parked(ticket.clone());
        }
        match self.queues.position(vehicle) {
            Some((class, position)) => VehicleState::Waiting { class, position },
            None => VehicleState::Unseen,
        }
    }

    pub fn ticket(&self, vehicle: &str) -> Option<&Ticket> {
        self.tickets.get(vehicle)
    }

    pub fn capacity(&self, class: VehicleClass) -> usize {
        self.inventory.capacity(class)
    }

    pub fn free_slots(&self, class: VehicleClass) -> usize {
        self.inventory.num_free(class)
    }

    pub fn hourly_rate(&self) -> u32 {
        self.fees.hourly_rate()
    }

    fn issue_ticket(&mut self, slot: SlotId, class: VehicleClass, vehicle: String) -> TicketId {
        let ticket = self.tickets.issue(slot, class, vehicle, self.clock.now());
        info!(
            vehicle = %ticket.vehicle,
            class = class.as_str(),
            slot,
            ticket = ticket.id,
            "vehicle parked"
        );
        ticket.id
    }

    /// Hand a free slot of `class` to the head of its waiting queue.
    fn promote_next(&mut self, class: VehicleClass) -> Option<Promotion> {
        let entry = self.queues.pop_front(class)?;
        let Some(slot) = self.inventory.allocate(entry.class) else {
            self.queues.push_front(entry);
            return None;
        };
        let ticket = self.issue_ticket(slot, entry.class, entry.vehicle.clone());
        info!(vehicle = %entry.vehicle, slot, "waiting vehicle promoted");
        Some(Promotion {
            vehicle: entry.vehicle,
            class: entry.class,
            slot,
            ticket,
        })
    }
}

fn capacity(config: &Config, class: VehicleClass) -> Result<SlotId> {
    let value = config.capacity(class);
    SlotId::try_from(value)
        .ok()
        .filter(|&n| n <= MAX_SLOTS)
        .ok_or_else(|| {
            EngineError::InvalidConfig(format!(
                "{} capacity must be between 0 and {MAX_SLOTS}, got {value}",
                class.as_str(),
            ))
        })
}
