#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Field dimensions and cell coordinates are tiny, casts between them never lose data
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap},
};

use crate::app::{App, View};
use crate::components::{BrickColor, Position};
use crate::game::{FIELD_HEIGHT, FIELD_WIDTH, MAX_ENERGY};
use crate::piece::Piece;

// Each cell is 2 characters wide and 1 tall to look roughly square
const CELL_WIDTH: u16 = 2;
const BOARD_WIDTH: u16 = FIELD_WIDTH as u16 * CELL_WIDTH + 2;
const BOARD_HEIGHT: u16 = FIELD_HEIGHT as u16 + 2;
const INFO_WIDTH: u16 = 26;

pub fn render(f: &mut Frame, app: &App) {
    let area = f.area();
    if area.width < BOARD_WIDTH + INFO_WIDTH || area.height < BOARD_HEIGHT + 2 {
        let warning = Paragraph::new("Terminal too small!\nPlease resize your terminal.")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("skillblocks"));
        f.render_widget(warning, centered_rect(60, 40, area));
        return;
    }

    if app.view == View::Leaderboard {
        render_leaderboard(f, app, area);
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(BOARD_WIDTH),
            Constraint::Length(INFO_WIDTH),
            Constraint::Fill(1),
        ])
        .split(area);

    let board_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),            // Title
            Constraint::Length(BOARD_HEIGHT), // Field
            Constraint::Fill(1),
        ])
        .split(columns[0]);

    let title = Paragraph::new("SKILLBLOCKS")
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD));
    f.render_widget(title, board_area[0]);

    render_field(f, app, board_area[1]);
    render_info(f, app, columns[1]);
}

fn render_field(f: &mut Frame, app: &App, area: Rect) {
    let session = app.session();
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.settings().show_grid {
        for (y, row) in session.grid().rows().enumerate() {
            for (x, _) in row.iter().enumerate().filter(|(_, occupied)| !**occupied) {
                let cell_x = inner.left() + x as u16 * CELL_WIDTH;
                let cell_y = inner.top() + y as u16;
                if let Some(cell) = f.buffer_mut().cell_mut((cell_x, cell_y)) {
                    cell.set_symbol("·");
                    cell.set_fg(Color::DarkGray);
                }
            }
        }
    }

    for brick in session.grid().bricks() {
        draw_cell(f, inner, brick.position, brick.color);
    }

    if let Some(piece) = session.current_piece() {
        let color = piece.kind().color();
        for cell in piece.cells() {
            draw_cell(f, inner, cell, color);
        }
    }

    if session.is_game_over() {
        let rank = app
            .last_rank
            .map_or_else(String::new, |rank| format!("\nRank #{rank}"));
        let text = format!(
            "GAME OVER\nScore: {}{rank}\n\nR: restart",
            session.final_score().unwrap_or_default()
        );
        let overlay_area = centered_rect(80, 40, inner);
        f.render_widget(Clear, overlay_area);
        f.render_widget(
            Paragraph::new(text)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                .block(Block::default().borders(Borders::ALL)),
            overlay_area,
        );
    } else if app.celebrating {
        let banner_area = centered_rect(80, 20, inner);
        f.render_widget(Clear, banner_area);
        f.render_widget(
            Paragraph::new(format!("*** {} ***", session.score()))
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
                .block(Block::default().borders(Borders::ALL)),
            banner_area,
        );
    }
}

fn draw_cell(f: &mut Frame, area: Rect, position: Position, color: BrickColor) {
    if position.x < 0 || position.y < 0 {
        return;
    }

    let x = area.left() + position.x as u16 * CELL_WIDTH;
    let y = area.top() + position.y as u16;
    if y >= area.bottom() {
        return;
    }

    for dx in 0..CELL_WIDTH {
        if x + dx >= area.right() {
            break;
        }
        if let Some(cell) = f.buffer_mut().cell_mut((x + dx, y)) {
            cell.set_symbol("█");
            cell.set_fg(color.to_color());
            cell.set_bg(Color::Black);
        }
    }
}

fn render_info(f: &mut Frame, app: &App, area: Rect) {
    let session = app.session();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Spacer aligned with the title
            Constraint::Length(4), // Score
            Constraint::Length(6), // Next piece
            Constraint::Length(3), // Energy
            Constraint::Length(2), // Active skill
            Constraint::Min(6),    // Controls
        ])
        .split(area);

    let best = app.leaderboard().best().unwrap_or_default();
    let stats = Paragraph::new(format!(
        "Score: {}\nBest: {}\nDifficulty: {}",
        session.score(),
        best.max(session.score()),
        session.difficulty().name()
    ))
    .block(Block::default().borders(Borders::TOP).title("Info"));
    f.render_widget(stats, rows[1]);

    let next_block = Block::default().borders(Borders::TOP).title("Next");
    let next_area = next_block.inner(rows[2]);
    f.render_widget(next_block, rows[2]);
    render_preview(f, session.next_piece(), next_area);

    let energy = session.energy();
    let ratio = f64::from(energy.min(MAX_ENERGY)) / f64::from(MAX_ENERGY);
    let gauge_color = if session.skill().can_activate() {
        Color::LightGreen
    } else {
        Color::Green
    };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::TOP).title("Energy"))
        .gauge_style(Style::default().fg(gauge_color).bg(Color::DarkGray))
        .ratio(ratio)
        .label(format!("{energy}/{MAX_ENERGY}"));
    f.render_widget(gauge, rows[3]);

    let skill_text = session
        .active_skill()
        .map_or_else(String::new, |skill| format!("Skill: {}", skill.kind.name()));
    f.render_widget(
        Paragraph::new(skill_text).style(Style::default().fg(Color::Yellow)),
        rows[4],
    );

    let controls = Paragraph::new(
        "←/→ A/D: Move\n\
        ↑ W: Rotate\n\
        ↓ S: Soft drop\n\
        Enter: Hard drop\n\
        Space: Skill\n\
        L: Leaderboard\n\
        R: Restart  Q: Quit",
    )
    .block(Block::default().borders(Borders::TOP).title("Controls"))
    .wrap(Wrap { trim: true });
    f.render_widget(controls, rows[5]);
}

fn render_preview(f: &mut Frame, piece: &Piece, area: Rect) {
    let color = piece.kind().color();
    for &(dx, dy) in piece.layout() {
        draw_cell(f, area, Position::new(dx + 1, dy), color);
    }
}

fn render_leaderboard(f: &mut Frame, app: &App, area: Rect) {
    let entries = app.leaderboard().entries();
    let body = if entries.is_empty() {
        "No scores yet".to_string()
    } else {
        entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                format!(
                    "{:>2}. {:>8}  {}",
                    i + 1,
                    entry.score,
                    entry.recorded_label()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let text = format!("{body}\n\nL: back  C: clear");
    let panel = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Leaderboard"));
    f.render_widget(panel, centered_rect(80, 70, area));
}

/// Helper function to create a centered rect using up certain percentage of the available rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
