pub mod room_tests;

use std::sync::Arc;
use tracing::Level;

use tether_server::{RoomHandle, RoomService};

use crate::utils::MockSignalingOutput;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn create_test_service() -> (RoomHandle, MockSignalingOutput) {
    let signaling = MockSignalingOutput::new();
    let rooms = RoomService::spawn(100, Arc::new(signaling.clone()));
    (rooms, signaling)
}
