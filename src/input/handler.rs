use crate::app::AppState;
use crate::domain::{CounterDelta, Quadrant};
use crate::engine::TaskActions;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle a key press. Returns true when the application should quit.
pub fn handle_key(app: &mut AppState, actions: &dyn TaskActions, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Navigation
        KeyCode::Tab => {
            app.next_pane();
            Ok(false)
        }
        KeyCode::Up => {
            app.move_selection_up();
            Ok(false)
        }
        KeyCode::Down => {
            app.move_selection_down();
            Ok(false)
        }

        // Complete
        KeyCode::Enter => {
            app.complete_selected(actions);
            Ok(false)
        }

        // Counter
        KeyCode::Char('+') | KeyCode::Char('=') => {
            app.bump_selected(actions, CounterDelta::Increment);
            Ok(false)
        }
        KeyCode::Char('-') | KeyCode::Char('_') => {
            app.bump_selected(actions, CounterDelta::Decrement);
            Ok(false)
        }
        KeyCode::Char('0') => {
            app.bump_selected(actions, CounterDelta::Reset);
            Ok(false)
        }

        // Move to quadrant
        KeyCode::Char(c @ '1'..='4') => {
            if let Some(quadrant) = Quadrant::from_tag(&c.to_string()) {
                app.move_selected(actions, quadrant);
            }
            Ok(false)
        }

        // Habit list ordering
        KeyCode::Char('s') | KeyCode::Char('S') => {
            app.cycle_sort();
            Ok(false)
        }
        KeyCode::Char('o') | KeyCode::Char('O') => {
            app.flip_direction();
            Ok(false)
        }
        KeyCode::Char('g') | KeyCode::Char('G') => {
            app.cycle_group();
            Ok(false)
        }

        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.rescan(actions);
            Ok(false)
        }

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Ok(true),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Ok(true),

        _ => Ok(false),
    }
}
