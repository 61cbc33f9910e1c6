use std::sync::Arc;

use flume::Sender;

use crate::event::events::Event;
use crate::export::Exporter;
use crate::http::GeminiClient;

pub struct AppContext {
    pub api: Arc<GeminiClient>,
    pub exporter: Arc<Exporter>,
    pub event_tx: Sender<Event>,
}
