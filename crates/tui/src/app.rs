use std::io::stdout;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use flamebar_core::model::FlameTree;
use flamebar_core::nav::Cursor;
use flamebar_core::render;
use flamebar_protocol::{Color as MarkupColor, MarkupCommand, NavCommand};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};

const DETAILS_HEIGHT: u16 = 7;

fn to_color(c: MarkupColor) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

/// Write one markup row into the buffer, carrying the active style across
/// directives the way the protocol requires.
fn draw_markup(buf: &mut Buffer, area: Rect, y: u16, commands: &[MarkupCommand]) {
    if y >= area.y + area.height {
        return;
    }
    let mut x = area.x;
    let mut style = Style::default();
    for cmd in commands {
        match cmd {
            MarkupCommand::SetForeground { color } => style = style.fg(to_color(*color)),
            MarkupCommand::SetBackground { color } => style = style.bg(to_color(*color)),
            MarkupCommand::Underline { on } => {
                style = if *on {
                    style.add_modifier(Modifier::UNDERLINED)
                } else {
                    style.remove_modifier(Modifier::UNDERLINED)
                };
            }
            MarkupCommand::Reset => style = Style::default(),
            MarkupCommand::Text { text } => {
                for ch in text.chars() {
                    if x >= area.x + area.width {
                        break;
                    }
                    buf[(x, y)].set_char(ch).set_style(style);
                    x += 1;
                }
            }
        }
    }
}

fn decode_key(code: KeyCode) -> Option<NavCommand> {
    match code {
        KeyCode::Down => Some(NavCommand::IncreaseLevel),
        KeyCode::Up => Some(NavCommand::DecreaseLevel),
        KeyCode::Right => Some(NavCommand::NextColumn),
        KeyCode::Left => Some(NavCommand::PrevColumn),
        KeyCode::Char('q') | KeyCode::Esc => Some(NavCommand::Quit),
        KeyCode::Char('h') => Some(NavCommand::ToggleHelp),
        _ => None,
    }
}

pub fn run(tree: &FlameTree, profile_name: &str, sample_count: usize) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut cursor = Cursor::new();
    let mut show_help = true;

    loop {
        terminal.draw(|frame| {
            let area = frame.area();

            let header_area = Rect::new(0, 0, area.width, 1);
            let header = Block::default()
                .title(format!(
                    " flamebar — {profile_name} | {sample_count} samples | level {} col {} ",
                    cursor.level, cursor.column
                ))
                .style(Style::default().fg(Color::White).bg(Color::DarkGray));
            frame.render_widget(header, header_area);

            let help_height = u16::from(show_help);
            let flame_height = area
                .height
                .saturating_sub(1 + DETAILS_HEIGHT + help_height);
            let flame_area = Rect::new(0, 1, area.width, flame_height);

            // Keep the cursor's row on screen when the tree is deeper than
            // the viewport. Rows are depth 1.., so the cursor row index is
            // level - 1.
            let cursor_row = cursor.level.saturating_sub(1);
            let scroll = cursor_row.saturating_sub(flame_height.saturating_sub(1) as usize);

            let rows = render::render_flame(tree, &cursor, flame_area.width);
            let buf = frame.buffer_mut();
            for (i, row) in rows.iter().enumerate().skip(scroll) {
                let y = flame_area.y + (i - scroll) as u16;
                draw_markup(buf, flame_area, y, row);
            }

            let details_area = Rect::new(
                0,
                1 + flame_height,
                area.width,
                DETAILS_HEIGHT.min(area.height.saturating_sub(1 + flame_height)),
            );
            let details = Paragraph::new(render::describe(tree, cursor.selected_node(tree)))
                .block(Block::default().borders(Borders::ALL).title("Details"));
            frame.render_widget(details, details_area);

            if show_help && area.height > 1 + flame_height + DETAILS_HEIGHT {
                let help_area = Rect::new(0, 1 + flame_height + DETAILS_HEIGHT, area.width, 1);
                let help = Paragraph::new("↑/↓: Level  ←/→: Column  q: Quit  h: Toggle Help")
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::Gray));
                frame.render_widget(help, help_area);
            }
        })?;

        // Block until the next input event; all work for one event finishes
        // before the next is read.
        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match decode_key(key.code) {
                Some(NavCommand::Quit) => break,
                Some(NavCommand::ToggleHelp) => show_help = !show_help,
                Some(cmd) => {
                    cursor.apply(cmd, tree);
                }
                None => {}
            }
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
