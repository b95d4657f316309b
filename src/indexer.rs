//! Row-major grid addressing and the selection box neighbourhood.

use crate::error::GridError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Width of every selection box, in columns.
pub const SELECTION_BOX_WIDTH: usize = 3;

fn check_columns(columns: usize) -> Result<(), GridError> {
    if columns == 0 {
        return Err(GridError::InvalidArgument(
            "column count must be positive".to_string(),
        ));
    }
    Ok(())
}

fn overflow(what: &str) -> GridError {
    GridError::InvalidArgument(format!("{} overflows the index range", what))
}

/// Converts a linear block index into `(x, y)`, `x` being the column.
pub fn to_coordinates(index: usize, columns: usize) -> Result<(usize, usize), GridError> {
    check_columns(columns)?;
    Ok((index % columns, index / columns))
}

/// Converts `(x, y)` back into a linear index.
///
/// `x` is not checked against `columns`: an `x` past the last column wraps
/// into the following row.
pub fn to_index(x: usize, y: usize, columns: usize) -> Result<usize, GridError> {
    check_columns(columns)?;
    y.checked_mul(columns)
        .and_then(|row_start| row_start.checked_add(x))
        .ok_or_else(|| overflow("block index"))
}

/// Number of rows a selection box needs to offer `option_count` choices.
pub fn selection_box_rows(option_count: usize) -> usize {
    option_count.div_ceil(SELECTION_BOX_WIDTH)
}

/// Indices covered by a selection box anchored at `anchor`, row by row.
///
/// No clamping is applied: near the right edge the cells wrap into the next
/// row, near the bottom edge they run past the end of the grid. Use
/// [`GridDims::selection_box`] to apply a [`BoundaryPolicy`].
pub fn selection_box_indices(
    anchor: usize,
    columns: usize,
    option_count: usize,
) -> Result<Vec<usize>, GridError> {
    let (anchor_x, anchor_y) = to_coordinates(anchor, columns)?;
    box_cells(anchor_x, anchor_y, selection_box_rows(option_count))?
        .map(|(x, y)| to_index(x, y, columns))
        .collect()
}

fn box_cells(
    x0: usize,
    y0: usize,
    rows: usize,
) -> Result<impl Iterator<Item = (usize, usize)>, GridError> {
    let x_end = x0
        .checked_add(SELECTION_BOX_WIDTH)
        .ok_or_else(|| overflow("selection box column"))?;
    let y_end = y0
        .checked_add(rows)
        .ok_or_else(|| overflow("selection box row"))?;
    Ok((y0..y_end).flat_map(move |y| (x0..x_end).map(move |x| (x, y))))
}

/// What to do with a selection box that does not fit inside the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryPolicy {
    /// Keep the raw, unclamped indices.
    Overflow,
    /// Move the box left and up until it fits.
    #[default]
    Shift,
    /// Refuse boxes that leave the grid.
    Reject,
}

impl FromStr for BoundaryPolicy {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "overflow" => Ok(BoundaryPolicy::Overflow),
            "shift" => Ok(BoundaryPolicy::Shift),
            "reject" => Ok(BoundaryPolicy::Reject),
            other => Err(GridError::InvalidArgument(format!(
                "unknown boundary policy '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for BoundaryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BoundaryPolicy::Overflow => "overflow",
            BoundaryPolicy::Shift => "shift",
            BoundaryPolicy::Reject => "reject",
        };
        f.write_str(name)
    }
}

/// Dimensions of a block grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDims {
    pub columns: usize,
    pub rows: usize,
}

impl GridDims {
    pub fn new(columns: usize, rows: usize) -> Result<Self, GridError> {
        check_columns(columns)?;
        if rows == 0 {
            return Err(GridError::InvalidArgument(
                "row count must be positive".to_string(),
            ));
        }
        columns
            .checked_mul(rows)
            .ok_or_else(|| overflow("grid size"))?;
        Ok(GridDims { columns, rows })
    }

    /// Block count. Dimensions built through [`GridDims::new`] never overflow.
    pub fn len(&self) -> usize {
        self.columns.saturating_mul(self.rows)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.columns && y < self.rows
    }

    pub fn coordinates(&self, index: usize) -> Result<(usize, usize), GridError> {
        if index >= self.len() {
            return Err(GridError::NoSuchBlock(index));
        }
        to_coordinates(index, self.columns)
    }

    /// Selection box anchored at `anchor`, resolved against this grid.
    ///
    /// Every `Ok` result holds exactly `3 * ceil(option_count / 3)` indices.
    pub fn selection_box(
        &self,
        anchor: usize,
        option_count: usize,
        policy: BoundaryPolicy,
    ) -> Result<Vec<usize>, GridError> {
        let rows = selection_box_rows(option_count);

        let (x0, y0) = match policy {
            BoundaryPolicy::Overflow => {
                return selection_box_indices(anchor, self.columns, option_count);
            }
            BoundaryPolicy::Shift => {
                let (x, y) = self.coordinates(anchor)?;
                if SELECTION_BOX_WIDTH > self.columns || rows > self.rows {
                    return Err(GridError::BoxTooLarge {
                        width: SELECTION_BOX_WIDTH,
                        height: rows,
                        columns: self.columns,
                        rows: self.rows,
                    });
                }
                (
                    x.min(self.columns - SELECTION_BOX_WIDTH),
                    y.min(self.rows - rows),
                )
            }
            BoundaryPolicy::Reject => {
                let (x0, y0) = self.coordinates(anchor)?;
                if let Some((x, y)) = box_cells(x0, y0, rows)?.find(|&(x, y)| !self.contains(x, y)) {
                    return Err(GridError::OutOfBounds { anchor, x, y });
                }
                (x0, y0)
            }
        };

        box_cells(x0, y0, rows)?
            .map(|(x, y)| to_index(x, y, self.columns))
            .collect()
    }
}
