use crate::domain::Quadrant;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    /// Matrix cells in `Quadrant::all()` order
    pub quadrant_areas: [Rect; 4],
    pub habits_area: Rect,
    pub status_area: Rect,
    pub keybindings_area: Rect,
}

impl MainLayout {
    pub fn quadrant_area(&self, quadrant: Quadrant) -> Rect {
        match quadrant {
            Quadrant::DoFirst => self.quadrant_areas[0],
            Quadrant::Schedule => self.quadrant_areas[1],
            Quadrant::Delegate => self.quadrant_areas[2],
            Quadrant::Eliminate => self.quadrant_areas[3],
        }
    }
}

/// Create the main layout
/// - Top bar: keybindings (1 row)
/// - Main area: 2x2 matrix (65%) | habits (35%)
/// - Bottom bar: status line (1 row)
///
/// Matrix columns are urgency (urgent left), rows are importance (important top).
pub fn create_layout(area: Rect) -> MainLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Keybindings bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Status line
        ])
        .split(area);

    let horizontal_split = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(65), // Matrix
            Constraint::Percentage(35), // Habits
        ])
        .split(main_chunks[1]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(horizontal_split[0]);

    let split_row = |row: Rect| {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(row)
    };
    let top = split_row(rows[0]);
    let bottom = split_row(rows[1]);

    MainLayout {
        quadrant_areas: [top[0], top[1], bottom[0], bottom[1]],
        habits_area: horizontal_split[1],
        status_area: main_chunks[2],
        keybindings_area: main_chunks[0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_layout() {
        let area = Rect::new(0, 0, 100, 50);
        let layout = create_layout(area);

        assert_eq!(layout.keybindings_area.height, 1);
        assert_eq!(layout.status_area.height, 1);
        assert_eq!(layout.status_area.y, 49);
        assert!(layout.habits_area.width > 0);

        let do_first = layout.quadrant_area(Quadrant::DoFirst);
        let schedule = layout.quadrant_area(Quadrant::Schedule);
        let delegate = layout.quadrant_area(Quadrant::Delegate);
        assert_eq!(do_first.y, schedule.y);
        assert!(schedule.x > do_first.x);
        assert!(delegate.y > do_first.y);
        assert!(layout.habits_area.x >= schedule.x + schedule.width);
    }
}
