//! 🏗 Shared vocabulary of the parking lot: configuration, vehicle classes and
//! the commands a front-end sends to the allocation engine.
#![warn(missing_docs)]

mod command;

pub use command::{Command, CommandHandler, VehicleClass};

/// Hourly rate used when nothing else is configured
pub const DEFAULT_HOURLY_RATE: u32 = 20;

/// Configuration of the parking lot
///
/// Capacities are signed so that a negative value coming from user input
/// reaches the engine, which rejects it as an invalid configuration.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Config {
    /// Number of car slots
    pub car_slots: i64,
    /// Number of bike slots
    pub bike_slots: i64,
    /// Fee charged per billed hour
    pub hourly_rate: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            car_slots: 0,
            bike_slots: 0,
            hourly_rate: DEFAULT_HOURLY_RATE,
        }
    }
}

impl Config {
    /// Capacity configured for `class`
    #[inline]
    pub fn capacity(&self, class: VehicleClass) -> i64 {
        match class {
            VehicleClass::Car => self.car_slots,
            VehicleClass::Bike => self.bike_slots,
        }
    }
}
