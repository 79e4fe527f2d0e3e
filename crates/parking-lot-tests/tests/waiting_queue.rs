use eyre::Result;
use parking_lot_core::VehicleClass;
use parking_lot_engine::{EngineError, VehicleState};
use parking_lot_tests::TestCtxBuilder;

mod util;

/// Freed slots go to waiting vehicles in arrival order.
#[tokio::test]
#[ntest::timeout(10_000)]
async fn test_promotion_is_fifo() -> Result<()> {
    let ctx = TestCtxBuilder::from_env()?
        .with_car_slots(2)
        .with_bike_slots(1)
        .build()
        .await?;

    util::park_expecting_slot(&ctx.api, VehicleClass::Car, "c1").await?;
    util::park_expecting_slot(&ctx.api, VehicleClass::Car, "c2").await?;
    for (i, plate) in ["w1", "w2", "w3"].into_iter().enumerate() {
        let position = util::park_expecting_queue(&ctx.api, VehicleClass::Car, plate).await?;
        assert_eq!(position, i + 1);
    }

    let departure = ctx.api.remove("c2").await??;
    let promoted = departure.promoted.expect("w1 must be promoted");
    assert_eq!((promoted.vehicle.as_str(), promoted.slot), ("w1", 2));

    let departure = ctx.api.remove("c1").await??;
    let promoted = departure.promoted.expect("w2 must be promoted");
    assert_eq!((promoted.vehicle.as_str(), promoted.slot), ("w2", 1));

    let status = ctx.api.status().await?;
    ctx.check_status(&status);
    assert_eq!(status.waiting_cars, 1);

    let lot = ctx.finish().await;
    assert_eq!(
        lot.vehicle_state("w3"),
        VehicleState::Waiting {
            class: VehicleClass::Car,
            position: 1
        }
    );
    Ok(())
}

/// A car leaving never promotes a waiting bike and vice versa.
#[tokio::test]
#[ntest::timeout(10_000)]
async fn test_queues_are_per_class() -> Result<()> {
    let ctx = TestCtxBuilder::from_env()?
        .with_car_slots(1)
        .with_bike_slots(1)
        .build()
        .await?;

    util::park_expecting_slot(&ctx.api, VehicleClass::Car, "car").await?;
    util::park_expecting_slot(&ctx.api, VehicleClass::Bike, "bike").await?;
    util::park_expecting_queue(&ctx.api, VehicleClass::Bike, "waiting-bike").await?;

    let departure = ctx.api.remove("car").await??;
    assert!(departure.promoted.is_none());

    let status = ctx.api.status().await?;
    ctx.check_status(&status);
    assert_eq!(status.waiting_bikes, 1);
    assert_eq!(status.num_free(VehicleClass::Car), 1);

    ctx.finish().await;
    Ok(())
}

/// Rejected commands leave the lot untouched.
#[tokio::test]
#[ntest::timeout(10_000)]
async fn test_rejections_change_nothing() -> Result<()> {
    let ctx = TestCtxBuilder::from_env()?
        .with_car_slots(1)
        .with_bike_slots(1)
        .build()
        .await?;

    util::park_expecting_slot(&ctx.api, VehicleClass::Car, "A").await?;
    util::park_expecting_queue(&ctx.api, VehicleClass::Car, "B").await?;
    let before = ctx.api.status().await?;

    let err = ctx.api.park(VehicleClass::Bike, "A").await?.unwrap_err();
    assert_eq!(err, EngineError::DuplicateVehicle { vehicle: "A".into() });

    let err = ctx.api.park(VehicleClass::Car, "B").await?.unwrap_err();
    assert_eq!(err, EngineError::DuplicateVehicle { vehicle: "B".into() });

    let err = ctx.api.park(VehicleClass::Bike, "").await?.unwrap_err();
    assert_eq!(err, EngineError::DuplicateVehicle { vehicle: "".into() });

    for plate in ["nobody", "B"] {
        let err = ctx.api.remove(plate).await?.unwrap_err();
        assert_eq!(err, EngineError::VehicleNotFound { vehicle: plate.into() });
    }

    assert_eq!(ctx.api.status().await?, before);

    // the ticket counter did not move either
    ctx.api.remove("A").await??;
    let lot = ctx.finish().await;
    let VehicleState::Parked(ticket) = lot.vehicle_state("B") else {
        panic!("B must have been promoted");
    };
    assert_eq!(ticket.id, 2);
    Ok(())
}

/// Ticket ids keep growing across releases.
#[tokio::test]
#[ntest::timeout(10_000)]
async fn test_ticket_ids_increase() -> Result<()> {
    let ctx = TestCtxBuilder::from_env()?
        .with_car_slots(1)
        .build()
        .await?;

    let mut last = 0;
    for round in 0..10 {
        let plate = format!("car-{round}");
        util::park_expecting_slot(&ctx.api, VehicleClass::Car, &plate).await?;
        let departure = ctx.api.remove(plate.as_str()).await??;
        assert!(departure.ticket.id > last, "Ticket ids must strictly increase.");
        last = departure.ticket.id;
    }

    ctx.finish().await;
    Ok(())
}
