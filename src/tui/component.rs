use ratatui::Frame;
use ratatui::layout::Rect;

/// Something that draws itself into an area of the frame.
///
/// Render takes `&mut self` so a component can keep layout caches and
/// scroll offsets up to date while drawing.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that turns low-level `TuiEvent`s into its own events.
pub trait EventHandler {
    type Event;

    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}
