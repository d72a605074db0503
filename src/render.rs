//! Presentation layer: start screen and game screen.
//!
//! Reads engine snapshots, renders panels, and registers click targets.
//! No economy mutation happens here.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::actions;
use crate::engine::catalog::Difficulty;
use crate::engine::logic::format_number;
use crate::engine::Session;
use crate::input::{is_narrow_layout, ClickState};
use crate::time::TICKS_PER_SEC;

/// Water droplet art — 4 lines, 8 chars wide, three idle frames.
const DROPLET_ART: &[&[&str]] = &[
    &["  ╭──╮  ", " ╱    ╲ ", "(  ~~  )", " ╲____╱ "],
    &["  ╭──╮  ", " ╱    ╲ ", "(  ≈≈  )", " ╲____╱ "],
    &["  ╭──╮  ", " ╱    ╲ ", "(  ∼∼  )", " ╲____╱ "],
];

/// Squashed droplet shown for a few ticks after a click.
const DROPLET_CLICK_ART: &[&str] = &[" ╭────╮ ", "╱ ≈≈≈≈ ╲", "(══════)", " ╲____╱ "];

// ── Start screen ───────────────────────────────────────────────

pub fn render_menu(f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(7),
            Constraint::Min(1),
        ])
        .split(area);

    let title = Paragraph::new(Line::from(Span::styled(
        "💧 Drip Clicker",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let hints = ["costs ×1.0", "costs ×1.4", "costs ×2.0, random events"];
    let items: Vec<ListItem> = Difficulty::all()
        .iter()
        .zip(hints)
        .enumerate()
        .map(|(i, (d, hint))| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!(" [{}] ", i + 1),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("{:<8}", d.name()), Style::default().fg(Color::White)),
                Span::styled(format!(" {}", hint), Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    let menu = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue))
            .title(" Select difficulty (tap or 1-3) "),
    );
    f.render_widget(menu, chunks[1]);

    let mut cs = click_state.borrow_mut();
    for i in 0..Difficulty::all().len() {
        cs.add_row_target(
            chunks[1],
            chunks[1].y + 1 + i as u16,
            actions::SELECT_DIFFICULTY_BASE + i as u16,
        );
    }
}

// ── Game screen ────────────────────────────────────────────────

pub fn render_game(
    session: &Session,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let state = session.state();

    // Wide screens get the log on the right, like a second column.
    let (main_area, log_area) = if !is_narrow_layout(area.width) && area.width >= 80 {
        let h_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);
        (h_chunks[0], Some(h_chunks[1]))
    } else {
        (area, None)
    };

    let event_height = {
        let mut n = 0u16;
        if state.banner.is_some() {
            n += 2;
        }
        n += state.active_events.len().min(3) as u16;
        n
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),            // counters
            Constraint::Length(7),            // droplet
            Constraint::Length(event_height), // banner + active events
            Constraint::Min(6),               // shop
        ])
        .split(main_area);

    render_counters(session, f, chunks[0]);
    render_droplet(session, f, chunks[1], click_state);
    if event_height > 0 {
        render_events(session, f, chunks[2]);
    }
    render_shop(session, f, chunks[3], click_state);

    if let Some(log_area) = log_area {
        render_log(session, f, log_area);
    }
}

fn render_counters(session: &Session, f: &mut Frame, area: Rect) {
    let snap = session.snapshot();
    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!("{} ", format_number(snap.drops)),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled("drops", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(Span::styled(
            format!(
                "+{}/click   +{}/sec",
                format_number(snap.per_click),
                format_number(snap.passive_income)
            ),
            Style::default().fg(Color::Gray),
        )),
    ];
    let counters = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue))
                .title(format!(" {} ", session.state().difficulty.name())),
        )
        .alignment(Alignment::Center);
    f.render_widget(counters, area);
}

fn render_droplet(
    session: &Session,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let state = session.state();
    let art: &[&str] = if state.click_flash > 0 {
        DROPLET_CLICK_ART
    } else {
        DROPLET_ART[(state.anim_frame / 5) as usize % DROPLET_ART.len()]
    };

    let mut lines: Vec<Line> = art
        .iter()
        .map(|row| {
            Line::from(Span::styled(
                *row,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ))
        })
        .collect();

    // Floating "+N" particles above the droplet, drifting up as they age.
    let mut particle_line: Vec<Span> = Vec::new();
    for p in state.particles.iter().rev().take(3) {
        let fade = if p.life * 2 > p.max_life {
            Color::White
        } else {
            Color::DarkGray
        };
        particle_line.push(Span::styled(
            format!("{:>width$} ", p.text, width = (7 + p.col_offset).max(1) as usize),
            Style::default().fg(fade),
        ));
    }
    lines.insert(0, Line::from(particle_line));

    let droplet = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" tap to collect "),
        )
        .alignment(Alignment::Center);
    f.render_widget(droplet, area);

    // The whole droplet panel is one big click target.
    let mut cs = click_state.borrow_mut();
    cs.add_click_target(area, actions::CLICK_DROPLET);
}

fn render_events(session: &Session, f: &mut Frame, area: Rect) {
    let state = session.state();
    let mut lines: Vec<Line> = Vec::new();

    if let Some(banner) = &state.banner {
        let color = if banner.adverse { Color::Red } else { Color::Green };
        lines.push(Line::from(Span::styled(
            format!("⚡ {}", banner.title),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            banner.desc,
            Style::default().fg(color),
        )));
    }

    let now = session.now();
    for event in state.active_events.iter().take(3) {
        let secs_left = (event.expires_at.saturating_sub(now) + TICKS_PER_SEC as u64 - 1)
            / TICKS_PER_SEC as u64;
        let color = if event.kind.is_adverse() { Color::Red } else { Color::Green };
        lines.push(Line::from(Span::styled(
            format!("  {} ({}s)", event.kind.name(), secs_left),
            Style::default().fg(color),
        )));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn render_shop(
    session: &Session,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let snap = session.snapshot();

    let items: Vec<ListItem> = snap
        .upgrades
        .iter()
        .enumerate()
        .map(|(i, u)| {
            let key_hint = (i + 1) % 10; // rows 1-9 then 0
            let style = if u.affordable {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!(" [{}] ", key_hint),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("{:<18}", u.key.name()), style),
                Span::styled(
                    format!("{:<12}", u.key.desc()),
                    Style::default().fg(Color::Blue),
                ),
                Span::styled(format!("{:>11} drops", format_number(u.cost)), style),
                Span::styled(
                    format!("  ×{}", u.count),
                    Style::default().fg(Color::Gray),
                ),
            ]))
        })
        .collect();

    let shop = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Shop (tap a row to buy) "),
    );
    f.render_widget(shop, area);

    let mut cs = click_state.borrow_mut();
    for i in 0..snap.upgrades.len() {
        cs.add_row_target(
            area,
            area.y + 1 + i as u16,
            actions::BUY_UPGRADE_BASE + i as u16,
        );
    }
}

fn render_log(session: &Session, f: &mut Frame, area: Rect) {
    let log = &session.state().log;
    let visible = area.height.saturating_sub(2) as usize;
    let start = log.len().saturating_sub(visible);

    let lines: Vec<Line> = log[start..]
        .iter()
        .map(|entry| {
            if entry.is_important {
                Line::from(Span::styled(
                    &entry.text,
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(Span::styled(&entry.text, Style::default().fg(Color::Gray)))
            }
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue))
                .title(" Log "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}
