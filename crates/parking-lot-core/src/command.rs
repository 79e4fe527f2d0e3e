use std::fmt;

/// Class of a vehicle
///
/// Every slot belongs to exactly one class and every class has its own pool
/// of free slots and its own waiting queue.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(u8)]
pub enum VehicleClass {
    /// Cars; their slots are numbered first
    Car,
    /// Bikes; their slots follow the car slots
    Bike,
}

impl VehicleClass {
    /// All classes in slot numbering order
    pub const ALL: [VehicleClass; 2] = [VehicleClass::Car, VehicleClass::Bike];

    /// Lower-case name, e.g. for log fields and messages
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleClass::Car => "car",
            VehicleClass::Bike => "bike",
        }
    }
}

impl fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleClass::Car => f.write_str("Car"),
            VehicleClass::Bike => f.write_str("Bike"),
        }
    }
}

/// Command sent by a front-end (e.g. the interactive menu)
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Command {
    /// Park a vehicle, or put it on the waiting queue of its class
    Park {
        /// Class of the arriving vehicle
        class: VehicleClass,
        /// Vehicle identifier (number plate)
        vehicle: String,
    },

    /// Remove a parked vehicle and charge its fee
    ///
    /// A freed slot is handed to the head of the matching waiting queue.
    Remove {
        /// Vehicle identifier (number plate)
        vehicle: String,
    },

    /// Take a snapshot of all slots and waiting queues
    Status,
}

impl Command {
    /// Vehicle the command refers to, if any
    #[inline]
    pub fn vehicle(&self) -> Option<&str> {
        match self {
            Command::Park { vehicle, .. } | Command::Remove { vehicle } => Some(vehicle),
            Command::Status => None,
        }
    }
}

/// Interface for handling commands from a front-end
pub trait CommandHandler {
    /// Answer produced for every command
    type Reply;

    /// Handle a single command
    ///
    /// Implementations must either apply the command completely or reject it
    /// without changing any state. This method may be called concurrently
    /// from different threads.
    fn handle(&self, command: Command) -> Self::Reply;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vehicle_class_names() {
        assert_eq!(VehicleClass::Car.to_string(), "Car");
        assert_eq!(VehicleClass::Bike.as_str(), "bike");
    }

    #[test]
    fn command_exposes_vehicle() {
        let park = Command::Park {
            class: VehicleClass::Car,
            vehicle: "KA-01".into(),
        };
        assert_eq!(park.vehicle(), Some("KA-01"));
        assert_eq!(Command::Status.vehicle(), None);
    }
}
