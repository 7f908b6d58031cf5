use super::protocol::{Qos, WillProperties};

/// Will message stored with a client session.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ClientSessionWill {
    pub topic: String,
    pub payload: Vec<u8>,
    pub qos: Qos,
    pub retain: bool,
    /// Broker node that accepted the CONNECT carrying this will.
    pub origin_node_id: String,
    pub properties: WillProperties,
}

impl ClientSessionWill {
    pub fn new(topic: impl Into<String>, payload: impl Into<Vec<u8>>, qos: Qos) -> Self {
        Self {
            topic: topic.into(),
            payload: payload.into(),
            qos,
            retain: false,
            origin_node_id: String::new(),
            properties: WillProperties::default(),
        }
    }

    pub fn with_delay_interval(mut self, seconds: u32) -> Self {
        self.properties.delay_interval = seconds;
        self
    }

    pub fn with_retain(mut self, retain: bool) -> Self {
        self.retain = retain;
        self
    }

    pub fn with_origin_node(mut self, node_id: impl Into<String>) -> Self {
        self.origin_node_id = node_id.into();
        self
    }

    pub fn with_user_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties
            .user_properties
            .push((key.into(), value.into()));
        self
    }

    pub fn delay_interval(&self) -> u32 {
        self.properties.delay_interval
    }
}

/// Session record owned by the session store.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ClientSession {
    pub clean_start: bool,
    /// Session expiry interval in seconds.
    pub session_expiry_interval: u32,
    pub will: Option<ClientSessionWill>,
    /// When the record was last persisted (Unix epoch millis).
    pub timestamp: u64,
}

impl ClientSession {
    pub fn new(
        clean_start: bool,
        session_expiry_interval: u32,
        will: Option<ClientSessionWill>,
        timestamp: u64,
    ) -> Self {
        Self {
            clean_start,
            session_expiry_interval,
            will,
            timestamp,
        }
    }

    /// Delay before the will fires: the will cannot outlive the session.
    ///
    /// Returns None when the session carries no will.
    pub fn effective_will_delay(&self) -> Option<u32> {
        self.will
            .as_ref()
            .map(|will| will.delay_interval().min(self.session_expiry_interval))
    }

    /// Copy of this session without its will.
    pub fn without_will(&self) -> Self {
        Self {
            will: None,
            ..self.clone()
        }
    }
}
