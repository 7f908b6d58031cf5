//! MQTT-facing types the will scheduler consumes and produces.
//!
//! - `protocol` - QoS levels and will properties
//! - `session` - Client session records as kept by the session store
//! - `publish` - Will publish messages and the publish service seam
//! - `metrics` - Counters for published wills

pub mod metrics;
pub mod protocol;
pub mod publish;
pub mod session;

pub use self::metrics::{Counter, MetricsHolder};
pub use self::protocol::{Qos, WillProperties};
pub use self::publish::{LoggingPublisher, PublishError, PublishService, PublishStatus, WillPublish};
pub use self::session::{ClientSession, ClientSessionWill};
