//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels.

pub mod radio_rx;
pub mod radio_tx;
pub mod render;
pub mod sync;

pub use radio_rx::radio_rx_task;
pub use radio_tx::radio_tx_task;
pub use render::{render_task, RenderSettings};
pub use sync::sync_task;
