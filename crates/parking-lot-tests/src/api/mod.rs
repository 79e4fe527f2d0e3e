use std::sync::Arc;

use eyre::{eyre, Result};
use flume::Sender;
use parking_lot_core::{Command, VehicleClass};
use parking_lot_engine::{Admission, Departure, EngineError, Reply, Status};
use tokio::sync::oneshot;
use uuid::Uuid;

pub mod mock;

/// Result of a command as seen by a client
pub type ApiResult<T> = std::result::Result<T, EngineError>;

struct RequestMsg {
    command: Command,
    response_channel: oneshot::Sender<Reply>,
}

/// Client side of the parking lot
///
/// Every clone talks to the next worker thread, so clones used from
/// different tasks hit the lot concurrently.
pub struct Api {
    /// One channel per worker thread
    channels: Arc<Vec<Sender<RequestMsg>>>,

    my_channel: Sender<RequestMsg>,
    my_index: usize,
}

impl Api {
    fn new(channels: Vec<Sender<RequestMsg>>) -> Self {
        let my_channel = channels[0].clone();
        Self {
            channels: Arc::new(channels),
            my_channel,
            my_index: 0,
        }
    }
}

impl Clone for Api {
    fn clone(&self) -> Self {
        let my_index = (self.my_index + 1) % self.channels.len();
        Self {
            channels: self.channels.clone(),
            my_channel: self.channels[my_index].clone(),
            my_index,
        }
    }
}

impl Api {
    async fn make_request(&self, command: Command) -> Result<Reply> {
        let (sender, receiver) = oneshot::channel();
        let msg = RequestMsg {
            command,
            response_channel: sender,
        };
        self.my_channel.send_async(msg).await?;
        Ok(receiver.await?)
    }

    /// Park a vehicle or put it on the waiting queue.
    pub async fn park(
        &self,
        class: VehicleClass,
        vehicle: impl Into<String>,
    ) -> Result<ApiResult<Admission>> {
        let command = Command::Park {
            class,
            vehicle: vehicle.into(),
        };
        match self.make_request(command).await? {
            Reply::Admitted { admission, .. } => Ok(Ok(admission)),
            Reply::Rejected(e) => Ok(Err(e)),
            reply => Err(eyre!("park must not be answered by {reply:?}")),
        }
    }

    /// Remove a parked vehicle.
    pub async fn remove(&self, vehicle: impl Into<String>) -> Result<ApiResult<Departure>> {
        let command = Command::Remove {
            vehicle: vehicle.into(),
        };
        match self.make_request(command).await? {
            Reply::Departed(departure) => Ok(Ok(departure)),
            Reply::Rejected(e) => Ok(Err(e)),
            reply => Err(eyre!("remove must not be answered by {reply:?}")),
        }
    }

    pub async fn status(&self) -> Result<Status> {
        match self.make_request(Command::Status).await? {
            Reply::Status(status) => Ok(status),
            reply => Err(eyre!("status must not be answered by {reply:?}")),
        }
    }

    /// Create a driver with a random number plate.
    pub fn create_driver(&self, class: VehicleClass) -> Driver {
        Driver {
            api: self.clone(),
            class,
            plate: Uuid::new_v4().to_string(),
        }
    }
}

/// A single vehicle arriving and leaving
pub struct Driver {
    pub api: Api,
    pub class: VehicleClass,
    pub plate: String,
}

impl Driver {
    pub async fn park(&self) -> Result<ApiResult<Admission>> {
        self.api.park(self.class, self.plate.as_str()).await
    }

    pub async fn leave(&self) -> Result<ApiResult<Departure>> {
        self.api.remove(self.plate.as_str()).await
    }
}
