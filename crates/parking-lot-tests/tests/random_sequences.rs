use std::collections::HashMap;

use eyre::Result;
use nanorand::{Rng, WyRand};
use parking_lot_core::VehicleClass;
use parking_lot_engine::{Admission, EngineError};
use parking_lot_tests::TestCtxBuilder;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Expected {
    Parked(VehicleClass),
    Waiting(VehicleClass),
}

/// Drives the lot with a random mix of arrivals and departures and checks
/// every reply against a simple model of who is parked and who is waiting.
#[tokio::test]
#[ntest::timeout(30_000)]
async fn test_random_operations() -> Result<()> {
    let ctx = TestCtxBuilder::from_env()?
        .with_car_slots(3)
        .with_bike_slots(2)
        .build()
        .await?;

    let mut rng = WyRand::new_seed(0x9a41);
    let plates: Vec<String> = (0..15).map(|i| format!("plate-{i}")).collect();
    let mut model: HashMap<String, Expected> = HashMap::new();
    let mut last_ticket = 0;

    for _ in 0..1_000 {
        let plate = &plates[rng.generate_range(0..plates.len())];
        ctx.clock.advance_secs(rng.generate_range(0..7_200u32) as i64);

        if rng.generate_range(0..100u32) < 55 {
            let class = if rng.generate_range(0..2u32) == 0 {
                VehicleClass::Car
            } else {
                VehicleClass::Bike
            };
            match ctx.api.park(class, plate.as_str()).await? {
                Ok(Admission::Parked { ticket, .. }) => {
                    assert!(!model.contains_key(plate));
                    assert!(ticket > last_ticket);
                    last_ticket = ticket;
                    model.insert(plate.clone(), Expected::Parked(class));
                }
                Ok(Admission::Queued { .. }) => {
                    assert!(!model.contains_key(plate));
                    model.insert(plate.clone(), Expected::Waiting(class));
                }
                Err(EngineError::DuplicateVehicle { .. }) => {
                    assert!(model.contains_key(plate), "{plate} is not tracked");
                }
                Err(e) => panic!("unexpected rejection: {e}"),
            }
        } else {
            match ctx.api.remove(plate.as_str()).await? {
                Ok(departure) => {
                    let Some(Expected::Parked(class)) = model.remove(plate) else {
                        panic!("{plate} was released without being parked");
                    };
                    assert_eq!(departure.ticket.class, class);
                    if let Some(promoted) = departure.promoted {
                        assert_eq!(promoted.slot, departure.slot);
                        assert_eq!(
                            model.insert(promoted.vehicle.clone(), Expected::Parked(class)),
                            Some(Expected::Waiting(class))
                        );
                        assert!(promoted.ticket > last_ticket);
                        last_ticket = promoted.ticket;
                    }
                }
                Err(EngineError::VehicleNotFound { .. }) => {
                    assert!(!matches!(model.get(plate), Some(Expected::Parked(_))));
                }
                Err(e) => panic!("unexpected rejection: {e}"),
            }
        }

        let status = ctx.api.status().await?;
        ctx.check_status(&status);
        for class in VehicleClass::ALL {
            let parked = model
                .values()
                .filter(|e| **e == Expected::Parked(class))
                .count();
            let waiting = model
                .values()
                .filter(|e| **e == Expected::Waiting(class))
                .count();
            assert_eq!(status.num_occupied(class), parked);
            assert_eq!(status.waiting(class), waiting);
        }
    }

    ctx.finish().await;
    Ok(())
}
