use crate::block::{Block, Model, Offer};
use crate::error::GridError;
use crate::indexer::GridDims;
use serde::{Deserialize, Serialize};

/// The blocks of one grid, owned by whoever handles the request.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct BlockGrid {
    pub dims: GridDims,
    pub blocks: Vec<Block>,
}

impl BlockGrid {
    pub fn new(dims: GridDims) -> Self {
        BlockGrid {
            dims,
            blocks: (0..dims.len()).map(Block::create).collect(),
        }
    }

    pub fn columns(&self) -> usize {
        self.dims.columns
    }

    pub fn rows(&self) -> usize {
        self.dims.rows
    }

    pub fn block(&self, id: usize) -> Result<&Block, GridError> {
        self.blocks.get(id).ok_or(GridError::NoSuchBlock(id))
    }

    pub fn block_mut(&mut self, id: usize) -> Result<&mut Block, GridError> {
        self.blocks.get_mut(id).ok_or(GridError::NoSuchBlock(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    /// Replaces any open selection with offers on the given cells.
    ///
    /// Indices past the end of the grid are skipped; they only occur when the
    /// box was computed with the overflow policy.
    pub fn open_selection(&mut self, anchor: usize, offers: &[(usize, Model)]) {
        self.clear_selection();
        for &(id, model) in offers {
            match self.blocks.get_mut(id) {
                Some(block) => block.offer = Some(Offer { anchor, model }),
                None => log::warn!("selection cell {} lies outside the grid", id),
            }
        }
    }

    pub fn clear_selection(&mut self) {
        for block in self.blocks.iter_mut() {
            block.offer = None;
        }
    }

    /// Block ids currently showing an offer, in grid order.
    pub fn selection(&self) -> Vec<usize> {
        self.blocks
            .iter()
            .filter(|b| b.offer.is_some())
            .map(|b| b.id)
            .collect()
    }

    pub fn place(&mut self, id: usize, model: Model) -> Result<(), GridError> {
        let block = self.block_mut(id)?;
        if block.component.is_some() {
            return Err(GridError::BlockNotEmpty(id));
        }
        block.component = Some(model);
        self.clear_selection();
        Ok(())
    }

    /// Marks the component on `id` as the selected one.
    pub fn select_component(&mut self, id: usize) -> Result<(), GridError> {
        if self.block(id)?.is_empty() {
            return Err(GridError::BlockEmpty(id));
        }
        for block in self.blocks.iter_mut() {
            block.selected = block.id == id;
        }
        Ok(())
    }

    pub fn remove(&mut self, id: usize) -> Result<Model, GridError> {
        let block = self.block_mut(id)?;
        let model = block.component.take().ok_or(GridError::BlockEmpty(id))?;
        block.selected = false;
        Ok(model)
    }
}
