use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{FavoritesManager, RestaurantList, TitleBar};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(3)]);
    let full_area = frame.area();
    let [title_area, main_area, input_area] = layout.areas(full_area);

    let mut title_bar = TitleBar::new(
        app.session.query().to_string(),
        app.session.results().len(),
        app.favorites.len(),
        app.status_message.clone(),
    );
    title_bar.render(frame, title_area);

    RestaurantList::new(
        &mut tui.list,
        app.session.results(),
        &app.favorites,
        app.session.phase(),
        spinner_frame,
    )
    .render(frame, main_area);

    tui.search_box.render(frame, input_area);

    // Overlay last so it draws on top
    if let Some(ref mut fm) = tui.favorites_manager {
        FavoritesManager::new(fm).render(frame, full_area);
    }
}
