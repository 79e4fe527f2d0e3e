//! The engine behind a lock, for front-ends that serve several callers

use parking_lot::Mutex;
use parking_lot_core::{Command, CommandHandler, VehicleClass};
use tracing::debug;

use crate::engine::{Admission, AllocationEngine, Departure};
use crate::error::{EngineError, Result};
use crate::status::{Status, VehicleState};
use crate::ticket::Ticket;

/// Answer to a [`Command`]
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Reply {
    Admitted {
        class: VehicleClass,
        vehicle: String,
        admission: Admission,
    },
    Departed(Departure),
    Status(Status),
    Rejected(EngineError),
}

/// A parking lot shared between threads
///
/// Each public operation holds the lock for its whole duration, so an
/// admission, a release and the promotion it triggers always observe one
/// consistent state.
pub struct ParkingLot(Mutex<AllocationEngine>);

impl ParkingLot {
    /// Create a new [`ParkingLot`] around `engine`.
    pub fn new(engine: AllocationEngine) -> Self {
        Self(Mutex::new(engine))
    }

    pub fn admit(&self, class: VehicleClass, vehicle: impl Into<String>) -> Result<Admission> {
        self.0.lock().admit(class, vehicle)
    }

    pub fn release(&self, vehicle: &str) -> Result<Departure> {
        self.0.lock().release(vehicle)
    }

    pub fn status(&self) -> Status {
        self.0.lock().status()
    }

    pub fn vehicle_state(&self, vehicle: &str) -> VehicleState {
        self.0.lock().vehicle_state(vehicle)
    }

    pub fn ticket(&self, vehicle: &str) -> Option<Ticket> {
        self.0.lock().ticket(vehicle).cloned()
    }
}

impl CommandHandler for ParkingLot {
    type Reply = Reply;

    fn handle(&self, command: Command) -> Reply {
        debug!(vehicle = command.vehicle(), "handling command");
        let mut engine = self.0.lock();
        match command {
            Command::Park { class, vehicle } => match engine.admit(class, vehicle.as_str()) {
                Ok(admission) => Reply::Admitted {
                    class,
                    vehicle,
                    admission,
                },
                Err(e) => Reply::Rejected(e),
            },
            Command::Remove { vehicle } => match engine.release(&vehicle) {
                Ok(departure) => Reply::Departed(departure),
                Err(e) => Reply::Rejected(e),
            },
            Command::Status => Reply::Status(engine.status()),
        }
    }
}
