use crate::block::Model;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Something that happened on the page or to the grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum Event {
    PageLoaded,
    /// An empty block was clicked to place a component on it.
    BlockSelected { block_id: usize },
    SelectboxCreated {
        block_id: usize,
        select_box: Vec<usize>,
    },
    ComponentAdded { block_id: usize, component: Model },
    /// A placed component was clicked.
    ComponentSelected { block_id: usize },
    ComponentDeleted { block_id: usize },
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::PageLoaded => "page_loaded",
            Event::BlockSelected { .. } => "block_selected",
            Event::SelectboxCreated { .. } => "selectbox_created",
            Event::ComponentAdded { .. } => "component_added",
            Event::ComponentSelected { .. } => "component_selected",
            Event::ComponentDeleted { .. } => "component_deleted",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub at: DateTime<Utc>,
    #[serde(flatten)]
    pub event: Event,
}

impl EventRecord {
    pub fn now(event: Event) -> Self {
        EventRecord {
            at: Utc::now(),
            event,
        }
    }
}
