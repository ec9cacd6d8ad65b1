use ratatui::Frame;
use ratatui::layout::Rect;

/// Something that draws itself into a region of the frame.
///
/// Props are struct fields set by the parent before each render. `render`
/// takes `&mut self` so a component can update presentation state (list
/// selection, horizontal scroll) while drawing, like ratatui's
/// `StatefulWidget`.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that consumes terminal events.
pub trait EventHandler {
    /// The high-level event this component emits.
    type Event;

    /// Handle a `TuiEvent`, optionally emitting a high-level event.
    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}
