use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub i64);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoEvent {
    pub tick: i64,
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEntry {
    pub id: EventId,
    pub event: DemoEvent,
}

impl EventEntry {
    pub fn new(id: EventId, event: DemoEvent) -> Self {
        Self { id, event }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DemoHeader {
    pub map_name: String,
    pub server_name: String,
    pub client_name: String,
    pub playback_ticks: i64,
    pub playback_seconds: f32,
}
