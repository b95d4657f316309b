use crate::error::GridError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Signal-processing component that can be placed on a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Model {
    Amplifier,
    FilterBp,
    FilterHp,
    FilterLp,
    Mixer,
    Oscillator,
}

impl Model {
    /// Every model, in the order they are offered inside a selection box.
    pub const ALL: [Model; 6] = [
        Model::Amplifier,
        Model::FilterBp,
        Model::FilterHp,
        Model::FilterLp,
        Model::Mixer,
        Model::Oscillator,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Model::Amplifier => "amplifier",
            Model::FilterBp => "filter-bp",
            Model::FilterHp => "filter-hp",
            Model::FilterLp => "filter-lp",
            Model::Mixer => "mixer",
            Model::Oscillator => "oscillator",
        }
    }

    /// Inline SVG figure for the model.
    pub fn svg(&self) -> &'static str {
        match self {
            Model::Amplifier => include_str!("../static/fig/amplifier.svg"),
            Model::FilterBp => include_str!("../static/fig/filter-bp.svg"),
            Model::FilterHp => include_str!("../static/fig/filter-hp.svg"),
            Model::FilterLp => include_str!("../static/fig/filter-lp.svg"),
            Model::Mixer => include_str!("../static/fig/mixer.svg"),
            Model::Oscillator => include_str!("../static/fig/oscillator.svg"),
        }
    }
}

impl FromStr for Model {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Model::ALL
            .iter()
            .copied()
            .find(|m| m.name() == s)
            .ok_or_else(|| GridError::UnknownComponent(s.to_string()))
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a block currently shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Empty,
    Select,
    Component,
}

/// A model offered by a selection box, and the block it would be placed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub anchor: usize,
    pub model: Model,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: usize,
    pub component: Option<Model>,
    pub offer: Option<Offer>,
    pub selected: bool,
}

impl Block {
    pub fn create(id: usize) -> Self {
        Block {
            id,
            component: None,
            offer: None,
            selected: false,
        }
    }

    /// An offer overlays whatever the block holds underneath.
    pub fn kind(&self) -> BlockKind {
        if self.offer.is_some() {
            BlockKind::Select
        } else if self.component.is_some() {
            BlockKind::Component
        } else {
            BlockKind::Empty
        }
    }

    pub fn is_empty(&self) -> bool {
        self.component.is_none()
    }

    pub fn css_class(&self) -> String {
        match (self.offer, self.component) {
            (Some(_), _) => "block-select".to_string(),
            (None, Some(model)) if self.selected => format!("block-default {} selected", model),
            (None, Some(model)) => format!("block-default {}", model),
            (None, None) => "block-default empty".to_string(),
        }
    }

    /// The model drawn on the block, if any.
    pub fn shown_model(&self) -> Option<Model> {
        self.offer.map(|o| o.model).or(self.component)
    }
}
