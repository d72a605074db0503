mod actions;
mod engine;
mod input;
mod render;
mod time;

use std::{cell::RefCell, io, rc::Rc};

use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};

use engine::catalog::Difficulty;
use engine::{Session, UpgradeKey};
use input::{ClickState, InputEvent};
use time::FrameClock;

/// Top-level application state.
enum AppState {
    /// Difficulty selection screen.
    Menu,
    /// A running session.
    Playing { session: Session },
}

/// Query the grid container's bounding rect and convert browser pixel
/// coordinates to a terminal cell.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let click_x = mouse_x as f64 - rect.left();
    let click_y = mouse_y as f64 - rect.top();

    let col = input::pixel_x_to_col(click_x, rect.width(), cs.terminal_cols)?;
    let row = input::pixel_y_to_row(click_y, rect.height(), cs.terminal_rows)?;
    Some((col, row))
}

/// Route one normalized input event into the current app state.
fn dispatch(app: &mut AppState, event: InputEvent, seed: u64) {
    match app {
        AppState::Menu => {
            let index = match event {
                InputEvent::Key(c @ '1'..='3') => (c as u8 - b'1') as usize,
                InputEvent::Click(id)
                    if (actions::SELECT_DIFFICULTY_BASE
                        ..actions::SELECT_DIFFICULTY_BASE + 3)
                        .contains(&id) =>
                {
                    (id - actions::SELECT_DIFFICULTY_BASE) as usize
                }
                _ => return,
            };
            if let Some(&difficulty) = Difficulty::all().get(index) {
                *app = AppState::Playing {
                    session: Session::new(difficulty, seed),
                };
            }
        }
        AppState::Playing { session } => match event {
            InputEvent::Key('c') | InputEvent::Key(' ') => session.register_click(),
            InputEvent::Click(actions::CLICK_DROPLET) => session.register_click(),
            InputEvent::Key(c @ '0'..='9') => {
                // Shop rows are labelled 1-9 then 0.
                let index = if c == '0' { 9 } else { (c as u8 - b'1') as usize };
                if let Some(key) = UpgradeKey::from_index(index) {
                    session.purchase(key);
                }
            }
            InputEvent::Click(id) if id >= actions::BUY_UPGRADE_BASE => {
                let index = (id - actions::BUY_UPGRADE_BASE) as usize;
                if let Some(key) = UpgradeKey::from_index(index) {
                    session.purchase(key);
                }
            }
            _ => {}
        },
    }
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();

    let app = Rc::new(RefCell::new(AppState::Menu));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let clock = Rc::new(RefCell::new(FrameClock::new()));

    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // Mouse/touch handler
    terminal.on_mouse_event({
        let app = app.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let cs = click_state.borrow();
            if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                return;
            }
            let Some((col, row)) = dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs) else {
                return;
            };
            let matched = cs.hit_test(col, row);
            drop(cs);

            web_sys::console::log_1(
                &format!("tap: cell=({},{}) action={:?}", col, row, matched).into(),
            );

            if let Some(action_id) = matched {
                dispatch(
                    &mut app.borrow_mut(),
                    InputEvent::Click(action_id),
                    js_sys::Date::now() as u64,
                );
            }
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let app = app.clone();
        move |key_event| {
            if let KeyCode::Char(c) = key_event.code {
                dispatch(
                    &mut app.borrow_mut(),
                    InputEvent::Key(c),
                    js_sys::Date::now() as u64,
                );
            }
        }
    });

    // Frame loop: advance the clock, tick the session, render.
    terminal.draw_web({
        let click_state = click_state.clone();
        move |f| {
            let ticks = clock.borrow_mut().update(now_ms());

            let mut app_ref = app.borrow_mut();
            if let AppState::Playing { session } = &mut *app_ref {
                session.tick(ticks);
            }

            let size = f.area();
            {
                let mut cs = click_state.borrow_mut();
                cs.terminal_cols = size.width;
                cs.terminal_rows = size.height;
                cs.clear_targets();
            }

            match &*app_ref {
                AppState::Menu => render::render_menu(f, size, &click_state),
                AppState::Playing { session } => {
                    render::render_game(session, f, size, &click_state)
                }
            }
        }
    });

    Ok(())
}
