use feedctl_core::{ActionView, AppViewModel, FieldView};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use super::constants::{action_key, FOOTER_HINT, HEADING, RESPONSE_TITLE, STATUS_TITLE};
use super::layout::{self, ScreenLayout};

pub fn draw(frame: &mut Frame, view: &AppViewModel) {
    let screen: ScreenLayout = layout::compute(frame.size(), view.fields.len(), view.actions.len());

    let heading = Paragraph::new(Line::from(Span::styled(
        HEADING,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(heading, screen.heading);

    for (field, area) in view.fields.iter().zip(screen.fields.iter().copied()) {
        draw_field(frame, field, area);
    }

    draw_text_region(frame, STATUS_TITLE, &view.status_text, screen.status);

    for (action, area) in view.actions.iter().zip(screen.actions.iter().copied()) {
        draw_action(frame, action, area);
    }

    draw_text_region(frame, RESPONSE_TITLE, &view.response_text, screen.response);

    let footer = Paragraph::new(Span::styled(
        FOOTER_HINT,
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(footer, screen.footer);
}

fn draw_field(frame: &mut Frame, field: &FieldView, area: Rect) {
    let title = match field.hint {
        Some(hint) => format!("{} ({})", field.label, hint),
        None => field.label.to_string(),
    };
    let border_style = if field.focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);

    let content = if field.value.is_empty() {
        Span::styled(field.placeholder, Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(field.value.as_str())
    };
    frame.render_widget(Paragraph::new(content).block(block), area);

    if field.focused && area.width > 2 && area.height > 2 {
        let typed = u16::try_from(field.value.chars().count()).unwrap_or(u16::MAX);
        let column = typed.min(area.width - 3);
        frame.set_cursor(area.x + 1 + column, area.y + 1);
    }
}

fn draw_action(frame: &mut Frame, action: &ActionView, area: Rect) {
    let style = if action.enabled {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let text = format!("[{}] {}", action_key(action.action), action.label);
    let button = Paragraph::new(Span::styled(text, style))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(style));
    frame.render_widget(button, area);
}

fn draw_text_region(frame: &mut Frame, title: &str, text: &str, area: Rect) {
    let lines: Vec<Line> = text.lines().map(Line::from).collect();
    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
