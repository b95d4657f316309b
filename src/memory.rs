//! Event log for a block grid and the listeners that react to it.
//!
//! Listeners are plain handler functions kept in a [`ListenerRegistry`]. They
//! run synchronously in the order they were registered and never emit
//! directly: any follow-up events they return are queued and dispatched
//! after the current event has reached every listener.

use crate::block::Model;
use crate::error::GridError;
use crate::events::{Event, EventRecord};
use crate::grid::BlockGrid;
use crate::indexer::BoundaryPolicy;
use std::collections::VecDeque;

/// Upper bound on events dispatched by a single `emit`.
pub const MAX_CASCADE: usize = 64;

/// Settings handed to every listener.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemorySettings {
    pub policy: BoundaryPolicy,
}

pub type Handler = Box<
    dyn Fn(&Event, &mut BlockGrid, &MemorySettings) -> Result<Vec<Event>, GridError>
        + Send
        + Sync,
>;

struct Listener {
    name: &'static str,
    handler: Handler,
}

#[derive(Default)]
pub struct ListenerRegistry {
    listeners: Vec<Listener>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, name: &'static str, handler: F)
    where
        F: Fn(&Event, &mut BlockGrid, &MemorySettings) -> Result<Vec<Event>, GridError>
            + Send
            + Sync
            + 'static,
    {
        self.listeners.push(Listener {
            name,
            handler: Box::new(handler),
        });
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.listeners.iter().map(|l| l.name).collect()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

pub struct BlockGridMemory {
    pub grid: BlockGrid,
    pub settings: MemorySettings,
    events: Vec<EventRecord>,
    listeners: ListenerRegistry,
}

impl BlockGridMemory {
    /// A memory with no listeners registered.
    pub fn new(grid: BlockGrid, settings: MemorySettings) -> Self {
        BlockGridMemory {
            grid,
            settings,
            events: Vec::new(),
            listeners: ListenerRegistry::new(),
        }
    }

    /// A memory wired with the listeners that drive the block grid page.
    pub fn with_default_listeners(grid: BlockGrid, settings: MemorySettings) -> Self {
        let mut memory = Self::new(grid, settings);
        register_default_listeners(&mut memory.listeners);
        memory
    }

    pub fn listeners_mut(&mut self) -> &mut ListenerRegistry {
        &mut self.listeners
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    /// Records `event` and dispatches it, then every follow-up event, to all
    /// listeners.
    pub fn emit(&mut self, event: Event) -> Result<(), GridError> {
        let mut queue = VecDeque::from([event]);
        let mut dispatched = 0;

        while let Some(event) = queue.pop_front() {
            dispatched += 1;
            if dispatched > MAX_CASCADE {
                return Err(GridError::EventCascade(MAX_CASCADE));
            }

            log::debug!("event: {:?}", event);
            self.events.push(EventRecord::now(event.clone()));

            for listener in &self.listeners.listeners {
                let follow_ups = (listener.handler)(&event, &mut self.grid, &self.settings)
                    .inspect_err(|e| {
                        log::warn!("listener {} failed on {}: {}", listener.name, event.name(), e)
                    })?;
                queue.extend(follow_ups);
            }
        }

        Ok(())
    }
}

pub fn register_default_listeners(registry: &mut ListenerRegistry) {
    registry.register("block_selected", on_block_selected);
    registry.register("selectbox_created", on_selectbox_created);
    registry.register("component_added", on_component_added);
    registry.register("component_selected", on_component_selected);
    registry.register("component_deleted", on_component_deleted);
}

fn on_block_selected(
    event: &Event,
    grid: &mut BlockGrid,
    settings: &MemorySettings,
) -> Result<Vec<Event>, GridError> {
    let Event::BlockSelected { block_id } = *event else {
        return Ok(Vec::new());
    };
    if !grid.block(block_id)?.is_empty() {
        return Err(GridError::BlockNotEmpty(block_id));
    }

    let select_box = grid
        .dims
        .selection_box(block_id, Model::ALL.len(), settings.policy)?;

    Ok(vec![Event::SelectboxCreated {
        block_id,
        select_box,
    }])
}

fn on_selectbox_created(
    event: &Event,
    grid: &mut BlockGrid,
    _settings: &MemorySettings,
) -> Result<Vec<Event>, GridError> {
    if let Event::SelectboxCreated {
        block_id,
        select_box,
    } = event
    {
        let offers: Vec<(usize, Model)> = select_box
            .iter()
            .copied()
            .zip(Model::ALL.iter().copied())
            .collect();
        grid.open_selection(*block_id, &offers);
    }
    Ok(Vec::new())
}

fn on_component_added(
    event: &Event,
    grid: &mut BlockGrid,
    _settings: &MemorySettings,
) -> Result<Vec<Event>, GridError> {
    if let Event::ComponentAdded {
        block_id,
        component,
    } = *event
    {
        grid.place(block_id, component)?;
    }
    Ok(Vec::new())
}

fn on_component_selected(
    event: &Event,
    grid: &mut BlockGrid,
    _settings: &MemorySettings,
) -> Result<Vec<Event>, GridError> {
    if let Event::ComponentSelected { block_id } = *event {
        grid.select_component(block_id)?;
    }
    Ok(Vec::new())
}

fn on_component_deleted(
    event: &Event,
    grid: &mut BlockGrid,
    _settings: &MemorySettings,
) -> Result<Vec<Event>, GridError> {
    if let Event::ComponentDeleted { block_id } = *event {
        let model = grid.remove(block_id)?;
        log::info!("removed {} from block {}", model, block_id);
    }
    Ok(Vec::new())
}
