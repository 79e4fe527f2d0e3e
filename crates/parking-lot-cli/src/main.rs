//! Interactive parking lot console

#![warn(missing_docs)]

mod logging;
mod menu;
mod settings;
mod shell;

use std::io;
use std::path::PathBuf;

use eyre::{Result, WrapErr};
use parking_lot_core::{Config, VehicleClass};

use menu::Tokens;
use settings::Settings;
use shell::Shell;

/// Command line options
#[derive(Debug, Default)]
struct Opts {
    /// Number of car slots
    car_slots: Option<i64>,
    /// Number of bike slots
    bike_slots: Option<i64>,
    /// Fee per started hour
    hourly_rate: Option<u32>,
    /// Settings file to use instead of the discovered `parking.toml`
    config: Option<PathBuf>,
}

impl Opts {
    fn from_args() -> Self {
        let mut opts = Opts::default();

        let mut option: Option<String> = None;
        for arg in std::env::args().skip(1) {
            if let Some(opt) = option {
                match opt.as_str() {
                    "-car-slots" => opts.car_slots = Some(parse_or_exit(&opt, &arg)),
                    "-bike-slots" => opts.bike_slots = Some(parse_or_exit(&opt, &arg)),
                    "-rate" => opts.hourly_rate = Some(parse_or_exit(&opt, &arg)),
                    "-config" => opts.config = Some(PathBuf::from(arg)),
                    _ => {
                        eprintln!("Error: unknown option {opt}");
                        std::process::exit(1);
                    }
                }
                option = None;
            } else {
                option = Some(arg);
            }
        }
        if let Some(opt) = option {
            eprintln!("Error: option {opt} takes a value");
            std::process::exit(1);
        }

        opts
    }
}

fn parse_or_exit<T: std::str::FromStr>(opt: &str, value: &str) -> T {
    match value.parse() {
        Ok(v) => v,
        Err(_) => {
            eprintln!("Error: {opt} takes a decimal integer, got `{value}`");
            std::process::exit(1);
        }
    }
}

fn main() -> Result<()> {
    logging::init();
    let opts = Opts::from_args();

    let mut settings = Settings::load(opts.config.as_deref())?;
    settings.apply_env()?;
    if let Some(path) = &settings.source {
        tracing::info!(path = %path.display(), "loaded settings");
    }

    let mut config = Config::default();
    settings.merge_into(&mut config);
    let car_slots = opts.car_slots.or(settings.car_slots);
    let bike_slots = opts.bike_slots.or(settings.bike_slots);
    if let Some(rate) = opts.hourly_rate {
        config.hourly_rate = rate;
    }

    let mut input = Tokens::new(io::stdin().lock());
    let mut output = io::stdout().lock();
    config.car_slots = match car_slots {
        Some(n) => n,
        None => shell::ask_capacity(&mut input, &mut output, VehicleClass::Car)?,
    };
    config.bike_slots = match bike_slots {
        Some(n) => n,
        None => shell::ask_capacity(&mut input, &mut output, VehicleClass::Bike)?,
    };

    let lot = parking_lot_engine::launch(&config).wrap_err("cannot open the parking lot")?;
    Shell::new(&lot, input, output)
        .run()
        .wrap_err("console I/O failed")?;
    Ok(())
}
