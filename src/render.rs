#![cfg(feature = "web")]
//! HTML rendering of the block grid with handlebars.

use crate::block::{Block, BlockKind};
use crate::grid::BlockGrid;
use handlebars::{Handlebars, RenderError, TemplateError};
use serde::Serialize;
use serde_json::json;

const INDEX_TEMPLATE: &str = include_str!("../static/templates/index.hbs");
const BLOCKGRID_TEMPLATE: &str = include_str!("../static/templates/blockgrid.hbs");

// htmx attributes per block kind
const HX_EMPTY: &str =
    r##"hx-get="/blockgrid/{{id}}/select" hx-swap="outerHTML" hx-target="#block-grid""##;
const HX_SELECT: &str = r##"hx-post="/blockgrid/{{anchor}}/select/{{component}}" hx-swap="outerHTML" hx-target="#block-grid""##;
const HX_COMPONENT: &str =
    r##"hx-get="/blockgrid/{{id}}/component" hx-swap="outerHTML" hx-target="#block-grid""##;
const HX_SELECTED: &str = r##"hx-delete="/blockgrid/{{id}}" hx-confirm="Remove this component?" hx-swap="outerHTML" hx-target="#block-grid""##;

/// A block as the templates see it.
#[derive(Serialize, Debug)]
pub struct BlockView {
    pub id: usize,
    #[serde(rename = "type")]
    pub kind: BlockKind,
    pub model: Option<&'static str>,
    pub css_class: String,
    pub hx: String,
}

pub struct Renderer {
    registry: Handlebars<'static>,
}

impl Renderer {
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.register_template_string("index", INDEX_TEMPLATE)?;
        registry.register_template_string("blockgrid", BLOCKGRID_TEMPLATE)?;
        registry.register_template_string("hx_empty", HX_EMPTY)?;
        registry.register_template_string("hx_select", HX_SELECT)?;
        registry.register_template_string("hx_component", HX_COMPONENT)?;
        registry.register_template_string("hx_selected", HX_SELECTED)?;
        Ok(Renderer { registry })
    }

    pub fn hx(&self, block: &Block) -> Result<String, RenderError> {
        match (block.offer, block.component) {
            (Some(offer), _) => self.registry.render(
                "hx_select",
                &json!({ "anchor": offer.anchor, "component": offer.model.name() }),
            ),
            (None, Some(_)) if block.selected => {
                self.registry.render("hx_selected", &json!({ "id": block.id }))
            }
            (None, Some(_)) => self.registry.render("hx_component", &json!({ "id": block.id })),
            (None, None) => self.registry.render("hx_empty", &json!({ "id": block.id })),
        }
    }

    pub fn block_view(&self, block: &Block) -> Result<BlockView, RenderError> {
        Ok(BlockView {
            id: block.id,
            kind: block.kind(),
            model: block.shown_model().map(|m| m.svg()),
            css_class: block.css_class(),
            hx: self.hx(block)?,
        })
    }

    /// Renders the grid alone, or wrapped in the full page.
    pub fn render(&self, grid: &BlockGrid, partial: bool) -> Result<String, RenderError> {
        let blocks = grid
            .iter()
            .map(|b| self.block_view(b))
            .collect::<Result<Vec<_>, _>>()?;
        let data = json!({
            "columns": grid.columns(),
            "rows": grid.rows(),
            "blocks": blocks,
        });
        let template = if partial { "blockgrid" } else { "index" };
        self.registry.render(template, &data)
    }
}
