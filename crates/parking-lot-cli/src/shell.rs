//! The interactive menu loop

use std::io::{self, BufRead, Write};

use eyre::{eyre, Result};
use parking_lot_core::{Command, CommandHandler, VehicleClass};
use parking_lot_engine::{Admission, Departure, EngineError, Reply, Status};

use crate::menu::{MenuChoice, Tokens};

/// Ask for the number of slots of `class`.
///
/// Anything that is not an integer is asked for again.
pub fn ask_capacity<R: BufRead, W: Write>(
    input: &mut Tokens<R>,
    output: &mut W,
    class: VehicleClass,
) -> Result<i64> {
    loop {
        write!(output, "Enter number of {class} slots: ")?;
        output.flush()?;
        let Some(token) = input.next_token()? else {
            return Err(eyre!("input ended before the number of {class} slots was given"));
        };
        match token.parse() {
            Ok(n) => return Ok(n),
            Err(_) => writeln!(output, "Please enter a whole number.")?,
        }
    }
}

/// Menu loop translating console input into [`Command`]s
pub struct Shell<'a, H, R, W> {
    lot: &'a H,
    input: Tokens<R>,
    output: W,
}

impl<'a, H, R, W> Shell<'a, H, R, W>
where
    H: CommandHandler<Reply = Reply>,
    R: BufRead,
    W: Write,
{
    pub fn new(lot: &'a H, input: Tokens<R>, output: W) -> Self {
        Self { lot, input, output }
    }

    /// Run until the user picks "Exit" or the input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "\n{}", MenuChoice::MENU)?;
            self.output.flush()?;
            let Some(token) = self.input.next_token()? else {
                break;
            };

            let command = match token.parse::<MenuChoice>() {
                Ok(MenuChoice::ParkCar) => match self.ask_vehicle("Enter Car Number: ")? {
                    Some(vehicle) => Command::Park {
                        class: VehicleClass::Car,
                        vehicle,
                    },
                    None => break,
                },
                Ok(MenuChoice::ParkBike) => match self.ask_vehicle("Enter Bike Number: ")? {
                    Some(vehicle) => Command::Park {
                        class: VehicleClass::Bike,
                        vehicle,
                    },
                    None => break,
                },
                Ok(MenuChoice::RemoveVehicle) => {
                    match self.ask_vehicle("Enter Vehicle Number: ")? {
                        Some(vehicle) => Command::Remove { vehicle },
                        None => break,
                    }
                }
                Ok(MenuChoice::DisplayStatus) => Command::Status,
                Ok(MenuChoice::Exit) => break,
                Err(()) => {
                    writeln!(self.output, "Invalid choice.")?;
                    continue;
                }
            };

            let reply = self.lot.handle(command);
            self.print_reply(reply)?;
        }
        self.output.flush()
    }

    fn ask_vehicle(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        self.input.next_token()
    }

    fn print_reply(&mut self, reply: Reply) -> io::Result<()> {
        match reply {
            Reply::Admitted {
                class, admission, ..
            } => match admission {
                Admission::Parked { slot, ticket } => {
                    writeln!(self.output, "{class} parked at slot {slot} (ticket #{ticket})")
                }
                Admission::Queued { position } => writeln!(
                    self.output,
                    "No {} slot free. Added to waiting queue (position {position}).",
                    class.as_str()
                ),
            },
            Reply::Departed(departure) => self.print_departure(&departure),
            Reply::Status(status) => self.print_status(&status),
            Reply::Rejected(err) => match err {
                EngineError::VehicleNotFound { .. } => writeln!(self.output, "Vehicle not found."),
                EngineError::DuplicateVehicle { vehicle } if vehicle.is_empty() => {
                    writeln!(self.output, "Vehicle number must not be empty.")
                }
                EngineError::DuplicateVehicle { vehicle } => writeln!(
                    self.output,
                    "Vehicle {vehicle} is already parked or waiting."
                ),
                err @ EngineError::InvalidConfig(_) => writeln!(self.output, "Error: {err}"),
            },
        }
    }

    fn print_departure(&mut self, departure: &Departure) -> io::Result<()> {
        let hours = departure.fee.billed_hours;
        writeln!(
            self.output,
            "Vehicle removed from slot {}. Fee: Rs {} ({hours} hour{})",
            departure.slot,
            departure.fee.amount,
            if hours == 1 { "" } else { "s" },
        )?;
        if let Some(promoted) = &departure.promoted {
            writeln!(
                self.output,
                "{} {} moved from waiting queue to slot {} (ticket #{})",
                promoted.class, promoted.vehicle, promoted.slot, promoted.ticket
            )?;
        }
        Ok(())
    }

    fn print_status(&mut self, status: &Status) -> io::Result<()> {
        writeln!(self.output, "\n--- Parking Status ---")?;
        for slot in &status.slots {
            match &slot.occupant {
                Some(vehicle) => writeln!(
                    self.output,
                    "Slot {} ({}) : Occupied by {vehicle}",
                    slot.id, slot.class
                )?,
                None if slot.occupied => {
                    writeln!(self.output, "Slot {} ({}) : Occupied", slot.id, slot.class)?
                }
                None => writeln!(self.output, "Slot {} ({}) : Free", slot.id, slot.class)?,
            }
        }
        writeln!(self.output, "Waiting Cars: {}", status.waiting_cars)?;
        writeln!(self.output, "Waiting Bikes: {}", status.waiting_bikes)
    }
}
