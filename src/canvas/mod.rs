mod editor;
mod history;

pub use editor::CanvasEditor;
pub use history::History;
