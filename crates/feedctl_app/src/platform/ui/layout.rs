use ratatui::layout::{Constraint, Direction, Layout, Rect};

const FIELD_HEIGHT: u16 = 3;
const STATUS_HEIGHT: u16 = 5;
const ACTIONS_HEIGHT: u16 = 3;

/// Screen regions, top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenLayout {
    pub heading: Rect,
    pub fields: Vec<Rect>,
    pub status: Rect,
    pub actions: Vec<Rect>,
    pub response: Rect,
    pub footer: Rect,
}

pub fn compute(area: Rect, field_count: usize, action_count: usize) -> ScreenLayout {
    let mut constraints = vec![Constraint::Length(1)];
    constraints.extend(std::iter::repeat(Constraint::Length(FIELD_HEIGHT)).take(field_count));
    constraints.extend([
        Constraint::Length(STATUS_HEIGHT),
        Constraint::Length(ACTIONS_HEIGHT),
        Constraint::Min(3),
        Constraint::Length(1),
    ]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let heading = rows[0];
    let fields = rows[1..=field_count].to_vec();
    let status = rows[field_count + 1];
    let actions_row = rows[field_count + 2];
    let response = rows[field_count + 3];
    let footer = rows[field_count + 4];

    let actions = if action_count == 0 {
        Vec::new()
    } else {
        let share = (100 / action_count) as u16;
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints(std::iter::repeat(Constraint::Percentage(share)).take(action_count))
            .split(actions_row)
            .to_vec()
    };

    ScreenLayout {
        heading,
        fields,
        status,
        actions,
        response,
        footer,
    }
}
