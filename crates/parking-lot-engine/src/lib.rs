//! 🅿️ Slot allocation and waiting-queue engine of the parking lot.
//!
//! The [`AllocationEngine`] decides which slot an arriving vehicle gets, queues
//! vehicles when their class is full, hands freed slots to the head of the
//! matching queue and charges a fee on exit. [`ParkingLot`] puts it behind a
//! lock for front-ends with several callers.

use std::sync::Arc;

use parking_lot_core::Config;

mod clock;
mod engine;
mod error;
mod fee;
mod inventory;
mod lot;
mod queue;
mod status;
mod ticket;

pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{Admission, AllocationEngine, Departure, Promotion, MAX_SLOTS};
pub use error::{EngineError, Result};
pub use fee::{Fee, FeePolicy};
pub use inventory::{Slot, SlotId};
pub use lot::{ParkingLot, Reply};
pub use status::{SlotStatus, Status, VehicleState};
pub use ticket::{Ticket, TicketId};

/// Open a parking lot for `config`, reading the wall clock.
pub fn launch(config: &Config) -> Result<ParkingLot> {
    AllocationEngine::from_config(config).map(ParkingLot::new)
}

/// Open a parking lot for `config` with an explicit time source.
pub fn launch_with_clock(config: &Config, clock: Arc<dyn Clock>) -> Result<ParkingLot> {
    let engine = AllocationEngine::from_config(config)?.with_clock(clock);
    Ok(ParkingLot::new(engine))
}
