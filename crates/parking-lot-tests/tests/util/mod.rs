use eyre::{eyre, Result};
use parking_lot_core::VehicleClass;
use parking_lot_engine::{Admission, SlotId};
use parking_lot_tests::Api;

/// Parks `vehicle` and asserts that it got a slot.
#[allow(unused)]
pub async fn park_expecting_slot(api: &Api, class: VehicleClass, vehicle: &str) -> Result<SlotId> {
    match api.park(class, vehicle).await?? {
        Admission::Parked { slot, .. } => Ok(slot),
        Admission::Queued { position } => Err(eyre!(
            "{vehicle} must get a {class} slot, but was queued at position {position}"
        )),
    }
}

/// Parks `vehicle` and asserts that it was queued.
#[allow(unused)]
pub async fn park_expecting_queue(
    api: &Api,
    class: VehicleClass,
    vehicle: &str,
) -> Result<usize> {
    match api.park(class, vehicle).await?? {
        Admission::Queued { position } => Ok(position),
        Admission::Parked { slot, .. } => Err(eyre!(
            "{vehicle} must be queued, but got slot {slot}"
        )),
    }
}

