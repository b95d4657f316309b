use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("No such block: {0}")]
    NoSuchBlock(usize),
    #[error("Selection box at block {anchor} leaves the grid (cell {x},{y})")]
    OutOfBounds { anchor: usize, x: usize, y: usize },
    #[error("Selection box of {width}x{height} does not fit a {columns}x{rows} grid")]
    BoxTooLarge {
        width: usize,
        height: usize,
        columns: usize,
        rows: usize,
    },
    #[error("Block {0} already holds a component")]
    BlockNotEmpty(usize),
    #[error("Block {0} holds no component")]
    BlockEmpty(usize),
    #[error("Unknown component: {0}")]
    UnknownComponent(String),
    #[error("Event cascade exceeded {0} events")]
    EventCascade(usize),
}
