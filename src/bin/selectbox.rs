#![cfg(not(tarpaulin_include))]

use blockgrid::indexer::{BoundaryPolicy, GridDims, to_coordinates};
use blockgrid::Model;
use std::env;

// Prints the selection box a click on <block> would open.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 4 {
        eprintln!("Usage: {} <columns> <rows> <block> [overflow|shift|reject]", args[0]);
        return Ok(());
    }

    let columns: usize = args[1].parse()?;
    let rows: usize = args[2].parse()?;
    let block: usize = args[3].parse()?;
    let policy: BoundaryPolicy = match args.get(4) {
        Some(p) => p.parse()?,
        None => BoundaryPolicy::default(),
    };

    let dims = GridDims::new(columns, rows)?;
    let cells = dims.selection_box(block, Model::ALL.len(), policy)?;
    let (x, y) = to_coordinates(block, columns)?;
    println!("block {} is at ({}, {}), policy {}", block, x, y, policy);

    for r in 0..rows {
        let line: String = (0..columns)
            .map(|c| {
                let id = r * columns + c;
                if id == block {
                    'X'
                } else if cells.contains(&id) {
                    '#'
                } else {
                    '.'
                }
            })
            .collect();
        println!("{}", line);
    }

    for (id, model) in cells.iter().zip(Model::ALL.iter()) {
        println!("{:>4}  {}", id, model);
    }

    Ok(())
}
