use bincode::{deserialize_from, serialize_into};
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::grid::BlockGrid;
use crate::indexer::GridDims;

pub fn save_grid(grid: &BlockGrid, path: impl AsRef<Path>) -> std::io::Result<()> {
    let file = File::create(path)?;
    write_grid(grid, file)
}

pub fn load_grid(path: impl AsRef<Path>) -> std::io::Result<BlockGrid> {
    let file = File::open(path)?;
    read_grid(file)
}

/// Writes a gzip-compressed bincode snapshot of `grid`.
pub fn write_grid<W: Write>(grid: &BlockGrid, writer: W) -> std::io::Result<()> {
    let encoder = GzEncoder::new(writer, Compression::default());
    let mut writer = std::io::BufWriter::new(encoder);

    serialize_into(&mut writer, grid)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    let encoder = writer.into_inner().map_err(|e| e.into_error())?;
    encoder.finish()?;
    Ok(())
}

pub fn read_grid<R: Read>(reader: R) -> std::io::Result<BlockGrid> {
    let decoder = GzDecoder::new(reader);
    let mut reader = std::io::BufReader::new(decoder);

    let grid: BlockGrid = deserialize_from(&mut reader)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

    let dims = GridDims::new(grid.dims.columns, grid.dims.rows)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    let consistent = grid.blocks.len() == dims.len()
        && grid.blocks.iter().enumerate().all(|(i, b)| b.id == i);
    if !consistent {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "block list does not match grid dimensions",
        ));
    }

    Ok(grid)
}
