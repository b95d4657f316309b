/*!
# Block Grid

A server-rendered web UI for laying out signal-processing blocks
(amplifiers, filters, mixers, oscillators) on a fixed grid.

## Overview

The page is plain HTML driven by htmx: every click sends a request, the
server updates the grid and answers with the re-rendered grid fragment,
which replaces the old one in place.

## Architecture

### Core
- **indexer**: row-major index ↔ `(x, y)` conversion and the selection box
  neighbourhood, with an explicit [`BoundaryPolicy`] for boxes near the
  grid edges
- **block**: component models and the per-block state
- **grid**: the owned [`BlockGrid`] handed to each request
- **events** / **memory**: the event log and the listener registry that
  turns events into grid updates
- **saving**: gzip-compressed bincode snapshots of the grid
- **config**: server settings from the environment and arguments

### Web Layer (feature `web`)
- **render**: handlebars templates for the page and the grid fragment
- **app**: axum routes, request logging and static files

## Routes

- `GET /` - full page
- `GET /blockgrid` - grid fragment
- `GET /blockgrid/{id}/select` - open a selection box at an empty block
- `POST /blockgrid/{id}/select/{component}` - place a component
- `GET /blockgrid/{id}/component` - select a placed component
- `DELETE /blockgrid/{id}` - remove a placed component
- `GET /events` - event log as JSON
- `POST /snapshot` - save the grid to the configured snapshot file
*/

pub mod block;
pub mod config;
pub mod error;
pub mod events;
pub mod grid;
pub mod indexer;
pub mod memory;
pub mod saving;

#[cfg(feature = "web")]
pub mod app;
#[cfg(feature = "web")]
pub mod render;

pub use block::{Block, BlockKind, Model};
pub use error::GridError;
pub use events::{Event, EventRecord};
pub use grid::BlockGrid;
pub use indexer::*;
pub use memory::{BlockGridMemory, ListenerRegistry, MemorySettings};
