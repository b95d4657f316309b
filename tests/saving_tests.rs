use blockgrid::indexer::GridDims;
use blockgrid::saving::{load_grid, read_grid, save_grid, write_grid};
use blockgrid::{BlockGrid, Model};
use std::io::ErrorKind;
use tempfile::tempdir;

#[test]
fn snapshot_restores_placed_components() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("grid.bin.gz");

    let mut grid = BlockGrid::new(GridDims::new(10, 6).unwrap());
    grid.place(12, Model::Oscillator).unwrap();
    grid.place(13, Model::FilterLp).unwrap();
    grid.select_component(13).unwrap();

    save_grid(&grid, &path).unwrap();
    let loaded = load_grid(&path).unwrap();

    assert_eq!(loaded, grid);
    assert_eq!(loaded.block(12).unwrap().component, Some(Model::Oscillator));
    assert!(loaded.block(13).unwrap().selected);
}

#[test]
fn snapshot_is_gzip_compressed() {
    let grid = BlockGrid::new(GridDims::new(3, 3).unwrap());
    let mut buffer = Vec::new();
    write_grid(&grid, &mut buffer).unwrap();
    assert_eq!(&buffer[..2], &[0x1f, 0x8b]);
}

#[test]
fn inconsistent_snapshot_is_rejected() {
    let mut grid = BlockGrid::new(GridDims::new(4, 4).unwrap());
    grid.blocks.pop();

    let mut buffer = Vec::new();
    write_grid(&grid, &mut buffer).unwrap();
    let err = read_grid(buffer.as_slice()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidData);
}

#[test]
fn garbage_is_rejected() {
    assert!(read_grid(&b"not a snapshot"[..]).is_err());
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempdir().unwrap();
    let err = load_grid(dir.path().join("missing.bin.gz")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn snapshot_with_overflowing_dimensions_is_rejected() {
    let grid = BlockGrid {
        dims: GridDims {
            columns: 1 << 33,
            rows: 1 << 33,
        },
        blocks: Vec::new(),
    };

    let mut buffer = Vec::new();
    write_grid(&grid, &mut buffer).unwrap();
    let err = read_grid(buffer.as_slice()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidData);
}

#[test]
fn snapshot_with_zero_rows_is_rejected() {
    let grid = BlockGrid {
        dims: GridDims {
            columns: 10,
            rows: 0,
        },
        blocks: Vec::new(),
    };

    let mut buffer = Vec::new();
    write_grid(&grid, &mut buffer).unwrap();
    let err = read_grid(buffer.as_slice()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidData);
}
