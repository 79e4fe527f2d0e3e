//! In-process desk serving the [`Api`] from blocking worker threads

use std::sync::Arc;

use parking_lot_core::CommandHandler;
use parking_lot_engine::ParkingLot;
use tokio::task::{self, JoinHandle};

use super::{Api, RequestMsg};

pub struct MockDesk {
    lot: Arc<ParkingLot>,
    join_handles: Vec<JoinHandle<()>>,
}

pub fn start(workers: u16, lot: ParkingLot) -> (MockDesk, Api) {
    let lot = Arc::new(lot);

    let it = (0..workers).map(|_| {
        let (sender, receiver) = flume::bounded::<RequestMsg>(65536);
        let lot = lot.clone();
        let handle = task::spawn_blocking(move || {
            for msg in receiver.into_iter() {
                let reply = lot.handle(msg.command);
                // the client may have given up waiting
                let _ = msg.response_channel.send(reply);
            }
        });
        (sender, handle)
    });
    let (senders, join_handles) = it.unzip();

    let desk = MockDesk { lot, join_handles };
    (desk, Api::new(senders))
}

impl MockDesk {
    /// Wait for all workers, which stop once every [`Api`] is dropped.
    pub async fn shutdown(self) -> ParkingLot {
        for handle in self.join_handles {
            handle.await.unwrap()
        }
        Arc::into_inner(self.lot).expect("workers still hold the lot")
    }
}
