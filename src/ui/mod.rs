pub mod habits_pane;
pub mod keybindings;
pub mod layout;
pub mod matrix_pane;
pub mod styles;

use crate::app::AppState;
use crate::domain::Quadrant;
use habits_pane::render_habits_pane;
use keybindings::{render_keybindings, render_status_line};
use layout::create_layout;
use matrix_pane::render_quadrant_pane;
use ratatui::Frame;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let layout = create_layout(f.size());

    render_keybindings(f, layout.keybindings_area);

    for &quadrant in Quadrant::all() {
        render_quadrant_pane(f, app, quadrant, layout.quadrant_area(quadrant));
    }
    render_habits_pane(f, app, layout.habits_area);

    render_status_line(f, app, layout.status_area);
}
