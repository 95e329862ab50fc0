pub mod demo;
pub mod scene;
pub mod style;
pub mod viewer;

pub use demo::{
    SIMPLE_BOX_DIMENSIONS, SIMPLE_BOX_LABEL, SIMPLE_BOX_PLANE, show_simple_box,
    show_simple_box_with, simple_box_style,
};
pub use scene::{Bounds, MANIFEST_FILE, SceneEntry, SceneExporter, SceneManifest};
pub use style::{Color, DisplayStyle};
pub use viewer::{RecordingViewer, ShowCall, Viewer, check_request};
