//! # View State
//!
//! Selection, device viewport, and the preview/live flags. None of these
//! touch the tree; they only decide how it is presented and whether the
//! user may edit it.
//!
//! Editing affordances (drag, drop, inline text editing, delete handles)
//! exist only while both `preview_mode` and `live_mode` are off. The engine
//! does not enforce this; presentation code consults [`ViewState::is_editing`]
//! or [`Affordances`] before issuing structural commands.

use pagesmith_model::{Element, ElementKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Device viewport used to size the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Device {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

impl Device {
    /// Canvas width cap in pixels, `None` for full width
    pub fn max_width(self) -> Option<u32> {
        match self {
            Device::Desktop => None,
            Device::Tablet => Some(850),
            Device::Mobile => Some(420),
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Device::Desktop => "Desktop",
            Device::Tablet => "Tablet",
            Device::Mobile => "Mobile",
        };
        f.write_str(name)
    }
}

impl FromStr for Device {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "desktop" => Ok(Device::Desktop),
            "tablet" => Ok(Device::Tablet),
            "mobile" => Ok(Device::Mobile),
            _ => Err(format!("Invalid device: {}. Use: desktop, tablet, or mobile", s)),
        }
    }
}

/// Presentation state of an editing session
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    selected_id: Option<String>,
    device: Device,
    preview_mode: bool,
    live_mode: bool,
}

impl ViewState {
    /// Initial state: nothing selected, Desktop, edit mode
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_device(device: Device) -> Self {
        Self {
            device,
            ..Self::default()
        }
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn device(&self) -> Device {
        self.device
    }

    pub fn preview_mode(&self) -> bool {
        self.preview_mode
    }

    pub fn live_mode(&self) -> bool {
        self.live_mode
    }

    /// Edit affordances are active only when neither flag is set
    pub fn is_editing(&self) -> bool {
        !self.preview_mode && !self.live_mode
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_id.as_deref() == Some(id)
    }

    pub(crate) fn select(&mut self, id: Option<String>) {
        self.selected_id = id;
    }

    pub(crate) fn set_device(&mut self, device: Device) {
        self.device = device;
    }

    pub(crate) fn set_preview_mode(&mut self, value: bool) {
        self.preview_mode = value;
    }

    pub(crate) fn set_live_mode(&mut self, value: bool) {
        self.live_mode = value;
    }
}

/// What the user may do with one element under the current view state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Affordances {
    /// Clicks select, text is editable inline
    pub editable: bool,
    /// Can be picked up and dragged (never the root)
    pub draggable: bool,
    /// Accepts dropped palette items (containers only)
    pub drop_target: bool,
    /// Shows the name badge of the selected element
    pub show_badge: bool,
    /// Shows the delete handle (selected, not the root)
    pub show_delete: bool,
}

impl Affordances {
    pub fn for_node(view: &ViewState, node: &Element) -> Self {
        if !view.is_editing() {
            return Self::default();
        }

        let is_root = node.kind() == ElementKind::PageRoot;
        let selected = view.is_selected(node.id());

        Self {
            editable: true,
            draggable: !is_root,
            drop_target: node.is_container(),
            show_badge: selected,
            show_delete: selected && !is_root,
        }
    }
}
