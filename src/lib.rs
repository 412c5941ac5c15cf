mod alarm_store;
mod config;
mod decoder;
mod event_stream;
mod history_store;
mod model;
mod number_format;
#[cfg(feature = "tokio")]
mod pipeline;
mod preferences;
mod projector;
mod session;
mod view_store;

pub use alarm_store::*;
pub use config::*;
pub use decoder::*;
pub use event_stream::*;
pub use history_store::*;
pub use model::*;
pub use number_format::*;
#[cfg(feature = "tokio")]
pub use pipeline::*;
pub use preferences::*;
pub use projector::*;
pub use session::*;
pub use view_store::*;

#[cfg(feature = "tokio")]
pub use tokio_util::sync::CancellationToken;
