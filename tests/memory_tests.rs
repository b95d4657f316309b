use blockgrid::indexer::{BoundaryPolicy, GridDims};
use blockgrid::{
    BlockGrid, BlockGridMemory, BlockKind, Event, GridError, MemorySettings, Model,
};
use std::sync::{Arc, Mutex};

fn memory_with(policy: BoundaryPolicy) -> BlockGridMemory {
    let grid = BlockGrid::new(GridDims::new(10, 6).unwrap());
    BlockGridMemory::with_default_listeners(grid, MemorySettings { policy })
}

#[test]
fn new_grid_is_all_empty() {
    let grid = BlockGrid::new(GridDims::new(10, 6).unwrap());
    assert_eq!(grid.blocks.len(), 60);
    for (i, block) in grid.iter().enumerate() {
        assert_eq!(block.id, i);
        assert_eq!(block.kind(), BlockKind::Empty);
        assert_eq!(block.css_class(), "block-default empty");
    }
    assert_eq!(grid.block(60), Err(GridError::NoSuchBlock(60)));
}

#[test]
fn selecting_empty_block_opens_selection_box() {
    let mut memory = memory_with(BoundaryPolicy::Shift);
    memory.emit(Event::BlockSelected { block_id: 2 }).unwrap();

    assert_eq!(memory.grid.selection(), vec![2, 3, 4, 12, 13, 14]);
    for (id, model) in [2, 3, 4, 12, 13, 14].into_iter().zip(Model::ALL) {
        let block = memory.grid.block(id).unwrap();
        assert_eq!(block.kind(), BlockKind::Select);
        assert_eq!(block.css_class(), "block-select");
        let offer = block.offer.unwrap();
        assert_eq!(offer.anchor, 2);
        assert_eq!(offer.model, model);
    }

    let names: Vec<&str> = memory.events().iter().map(|r| r.event.name()).collect();
    assert_eq!(names, vec!["block_selected", "selectbox_created"]);
    assert_eq!(
        memory.events()[1].event,
        Event::SelectboxCreated {
            block_id: 2,
            select_box: vec![2, 3, 4, 12, 13, 14]
        }
    );
}

#[test]
fn new_selection_replaces_previous_one() {
    let mut memory = memory_with(BoundaryPolicy::Shift);
    memory.emit(Event::BlockSelected { block_id: 0 }).unwrap();
    memory.emit(Event::BlockSelected { block_id: 40 }).unwrap();
    assert_eq!(memory.grid.selection(), vec![40, 41, 42, 50, 51, 52]);
}

#[test]
fn adding_component_places_it_and_closes_selection() {
    let mut memory = memory_with(BoundaryPolicy::Shift);
    memory.emit(Event::BlockSelected { block_id: 5 }).unwrap();
    memory
        .emit(Event::ComponentAdded {
            block_id: 5,
            component: Model::Mixer,
        })
        .unwrap();

    let block = memory.grid.block(5).unwrap();
    assert_eq!(block.kind(), BlockKind::Component);
    assert_eq!(block.component, Some(Model::Mixer));
    assert_eq!(block.css_class(), "block-default mixer");
    assert!(memory.grid.selection().is_empty());
}

#[test]
fn selection_overlays_components_without_destroying_them() {
    let mut memory = memory_with(BoundaryPolicy::Shift);
    memory
        .emit(Event::ComponentAdded {
            block_id: 3,
            component: Model::Oscillator,
        })
        .unwrap();
    memory.emit(Event::BlockSelected { block_id: 2 }).unwrap();
    assert_eq!(memory.grid.block(3).unwrap().kind(), BlockKind::Select);

    memory
        .emit(Event::ComponentAdded {
            block_id: 2,
            component: Model::Amplifier,
        })
        .unwrap();
    assert_eq!(
        memory.grid.block(3).unwrap().component,
        Some(Model::Oscillator)
    );
    assert_eq!(memory.grid.block(3).unwrap().kind(), BlockKind::Component);
}

#[test]
fn selecting_occupied_block_is_refused() {
    let mut memory = memory_with(BoundaryPolicy::Shift);
    memory
        .emit(Event::ComponentAdded {
            block_id: 7,
            component: Model::FilterLp,
        })
        .unwrap();
    assert_eq!(
        memory.emit(Event::BlockSelected { block_id: 7 }),
        Err(GridError::BlockNotEmpty(7))
    );
    assert_eq!(
        memory.emit(Event::ComponentAdded {
            block_id: 7,
            component: Model::Mixer,
        }),
        Err(GridError::BlockNotEmpty(7))
    );
}

#[test]
fn reject_policy_surfaces_edge_boxes() {
    let mut memory = memory_with(BoundaryPolicy::Reject);
    assert!(matches!(
        memory.emit(Event::BlockSelected { block_id: 9 }),
        Err(GridError::OutOfBounds { .. })
    ));
    assert!(memory.grid.selection().is_empty());
}

#[test]
fn overflow_policy_skips_cells_past_grid_end() {
    let mut memory = memory_with(BoundaryPolicy::Overflow);
    memory.emit(Event::BlockSelected { block_id: 55 }).unwrap();
    assert_eq!(memory.grid.selection(), vec![55, 56, 57]);
}

#[test]
fn component_select_and_delete() {
    let mut memory = memory_with(BoundaryPolicy::Shift);
    for (block_id, component) in [(1, Model::Amplifier), (2, Model::FilterBp)] {
        memory
            .emit(Event::ComponentAdded {
                block_id,
                component,
            })
            .unwrap();
    }

    memory.emit(Event::ComponentSelected { block_id: 1 }).unwrap();
    memory.emit(Event::ComponentSelected { block_id: 2 }).unwrap();
    assert!(!memory.grid.block(1).unwrap().selected);
    assert!(memory.grid.block(2).unwrap().selected);
    assert_eq!(
        memory.grid.block(2).unwrap().css_class(),
        "block-default filter-bp selected"
    );

    memory.emit(Event::ComponentDeleted { block_id: 2 }).unwrap();
    let block = memory.grid.block(2).unwrap();
    assert_eq!(block.kind(), BlockKind::Empty);
    assert!(!block.selected);

    assert_eq!(
        memory.emit(Event::ComponentDeleted { block_id: 2 }),
        Err(GridError::BlockEmpty(2))
    );
    assert_eq!(
        memory.emit(Event::ComponentSelected { block_id: 30 }),
        Err(GridError::BlockEmpty(30))
    );
}

#[test]
fn listeners_run_in_registration_order() {
    let grid = BlockGrid::new(GridDims::new(4, 4).unwrap());
    let mut memory = BlockGridMemory::new(grid, MemorySettings::default());
    let seen = Arc::new(Mutex::new(Vec::new()));

    for name in ["first", "second", "third"] {
        let seen = Arc::clone(&seen);
        memory.listeners_mut().register(name, move |event, _grid, _settings| {
            seen.lock().unwrap().push(format!("{}:{}", name, event.name()));
            Ok(Vec::new())
        });
    }
    assert_eq!(
        memory.listeners_mut().names(),
        vec!["first", "second", "third"]
    );

    memory.emit(Event::PageLoaded).unwrap();
    assert_eq!(
        *seen.lock().unwrap(),
        vec!["first:page_loaded", "second:page_loaded", "third:page_loaded"]
    );
}

#[test]
fn follow_up_events_run_after_current_event() {
    let grid = BlockGrid::new(GridDims::new(4, 4).unwrap());
    let mut memory = BlockGridMemory::new(grid, MemorySettings::default());
    let seen = Arc::new(Mutex::new(Vec::new()));

    memory.listeners_mut().register("chain", |event, _grid, _settings| {
        Ok(match event {
            Event::PageLoaded => vec![Event::ComponentSelected { block_id: 0 }],
            _ => Vec::new(),
        })
    });
    let log = Arc::clone(&seen);
    memory.listeners_mut().register("log", move |event, _grid, _settings| {
        log.lock().unwrap().push(event.name());
        Ok(Vec::new())
    });

    memory.emit(Event::PageLoaded).unwrap();
    assert_eq!(
        *seen.lock().unwrap(),
        vec!["page_loaded", "component_selected"]
    );
    assert_eq!(memory.events().len(), 2);
}

#[test]
fn runaway_cascade_is_cut_off() {
    let grid = BlockGrid::new(GridDims::new(4, 4).unwrap());
    let mut memory = BlockGridMemory::new(grid, MemorySettings::default());
    memory
        .listeners_mut()
        .register("echo", |event, _grid, _settings| Ok(vec![event.clone()]));

    assert!(matches!(
        memory.emit(Event::PageLoaded),
        Err(GridError::EventCascade(_))
    ));
}

#[test]
fn event_log_serializes_with_event_type_tag() {
    let mut memory = memory_with(BoundaryPolicy::Shift);
    memory
        .emit(Event::ComponentAdded {
            block_id: 4,
            component: Model::FilterHp,
        })
        .unwrap();

    let json = serde_json::to_value(memory.events()).unwrap();
    assert_eq!(json[0]["event_type"], "component_added");
    assert_eq!(json[0]["block_id"], 4);
    assert_eq!(json[0]["component"], "filter-hp");
    assert!(json[0]["at"].is_string());
}

#[test]
fn model_names_parse() {
    for model in Model::ALL {
        assert_eq!(model.name().parse::<Model>().unwrap(), model);
        assert!(model.svg().contains("<svg"));
    }
    assert_eq!(
        "theremin".parse::<Model>(),
        Err(GridError::UnknownComponent("theremin".to_string()))
    );
}
