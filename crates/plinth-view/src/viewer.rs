use anyhow::{Result, bail};
use plinth_base::Guid;
use plinth_topology::Solid;

use crate::style::DisplayStyle;

/// A display host that shown objects are handed to.
pub trait Viewer {
    fn show_object(&mut self, solid: &Solid, label: &str, style: &DisplayStyle) -> Result<()>;
}

impl<V: Viewer + ?Sized> Viewer for &mut V {
    fn show_object(&mut self, solid: &Solid, label: &str, style: &DisplayStyle) -> Result<()> {
        (**self).show_object(solid, label, style)
    }
}

/// Checks the label and style of a show request and returns the trimmed label.
pub fn check_request<'a>(label: &'a str, style: &DisplayStyle) -> Result<&'a str> {
    let label = label.trim();
    if label.is_empty() {
        bail!("label must not be empty");
    }
    style.validate()?;
    Ok(label)
}

#[derive(Clone, Debug)]
pub struct ShowCall {
    pub id: Guid,
    pub label: String,
    pub style: DisplayStyle,
    pub solid: Solid,
}

/// Keeps every shown object in memory, in call order.
#[derive(Clone, Debug, Default)]
pub struct RecordingViewer {
    calls: Vec<ShowCall>,
}

impl RecordingViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[ShowCall] {
        &self.calls
    }

    pub fn into_calls(self) -> Vec<ShowCall> {
        self.calls
    }
}

impl Viewer for RecordingViewer {
    fn show_object(&mut self, solid: &Solid, label: &str, style: &DisplayStyle) -> Result<()> {
        let label = check_request(label, style)?;
        self.calls.push(ShowCall {
            id: Guid::new(),
            label: label.to_string(),
            style: *style,
            solid: solid.clone(),
        });
        Ok(())
    }
}
