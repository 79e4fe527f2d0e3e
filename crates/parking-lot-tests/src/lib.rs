use std::sync::Arc;

use chrono::{TimeZone, Utc};
use eyre::{eyre, Result};
use parking_lot_core::{Config, VehicleClass, DEFAULT_HOURLY_RATE};
use parking_lot_engine::{ManualClock, ParkingLot, Status};

mod api;
pub use api::{Api, ApiResult, Driver};

pub struct TestCtxBuilder {
    /// Number of car slots
    pub car_slots: i64,
    /// Number of bike slots
    pub bike_slots: i64,
    /// Fee per started hour
    pub hourly_rate: u32,
    /// Count of worker threads serving the API
    pub workers: u16,
}

impl TestCtxBuilder {
    /// Create a new test context builder initialized with environment defaults
    ///
    /// `PARKING_TEST_WORKERS` overrides the number of worker threads.
    pub fn from_env() -> Result<Self> {
        let workers = match std::env::var("PARKING_TEST_WORKERS") {
            Ok(v) => match v.parse::<u16>() {
                Ok(n) if n > 0 => n,
                _ => return Err(eyre!("PARKING_TEST_WORKERS must be a positive integer")),
            },
            Err(_) => 2,
        };

        Ok(TestCtxBuilder {
            car_slots: 2,
            bike_slots: 2,
            hourly_rate: DEFAULT_HOURLY_RATE,
            workers,
        })
    }

    pub fn with_car_slots(mut self, slots: i64) -> Self {
        self.car_slots = slots;
        self
    }

    pub fn with_bike_slots(mut self, slots: i64) -> Self {
        self.bike_slots = slots;
        self
    }

    pub fn with_rate(mut self, rate: u32) -> Self {
        self.hourly_rate = rate;
        self
    }

    /// Set the number of worker threads to use
    pub fn with_workers(mut self, workers: u16) -> Self {
        assert_ne!(workers, 0);
        self.workers = workers;
        self
    }

    /// Get the [`Config`] for opening the parking lot
    pub fn config(&self) -> Config {
        Config {
            car_slots: self.car_slots,
            bike_slots: self.bike_slots,
            hourly_rate: self.hourly_rate,
        }
    }

    /// Build the test context
    ///
    /// The lot runs on a [`ManualClock`] starting at a fixed instant; move it
    /// with `ctx.clock`.
    pub async fn build(self) -> Result<TestCtx> {
        let config = self.config();
        let start = Utc
            .with_ymd_and_hms(2024, 1, 1, 8, 0, 0)
            .single()
            .ok_or_else(|| eyre!("invalid start time"))?;
        let clock = ManualClock::new(start);
        let lot = parking_lot_engine::launch_with_clock(&config, Arc::new(clock.clone()))?;
        let (desk, api) = api::mock::start(self.workers, lot);

        Ok(TestCtx {
            api,
            clock,
            desk,
            config,
            drop_bomb: DropBomb,
        })
    }
}

/// Test context
pub struct TestCtx {
    /// API allowing to interact with the parking lot
    pub api: Api,
    /// Clock of the parking lot
    pub clock: ManualClock,
    /// Configuration the lot was opened with
    pub config: Config,
    desk: api::mock::MockDesk,

    drop_bomb: DropBomb,
}

impl TestCtx {
    /// Capacity of `class` as configured
    pub fn capacity(&self, class: VehicleClass) -> usize {
        self.config.capacity(class) as usize
    }

    /// Check the slot accounting of a snapshot against the configuration.
    pub fn check_status(&self, status: &Status) {
        for class in VehicleClass::ALL {
            assert_eq!(
                status.num_free(class) + status.num_occupied(class),
                self.capacity(class),
                "free and occupied {class} slots must add up to the capacity"
            );
            if status.waiting(class) > 0 {
                assert_eq!(
                    status.num_free(class),
                    0,
                    "{class}s must not wait while {class} slots are free"
                );
            }
        }
        for slot in &status.slots {
            assert_eq!(
                slot.occupied,
                slot.occupant.is_some(),
                "slot {} must be occupied iff a ticket references it",
                slot.id
            );
        }
    }

    /// Shut the desk down and finish the test
    pub async fn finish(self) -> ParkingLot {
        std::mem::forget(self.drop_bomb);
        drop(self.api);
        self.desk.shutdown().await
    }
}

struct DropBomb;

impl Drop for DropBomb {
    fn drop(&mut self) {
        eprintln!("@TestAuthor: You should call `ctx.finish().await` to shut the parking lot down");
    }
}
