pub mod room_helpers;

pub use mock_signaling::*;
pub use room_helpers::*;
