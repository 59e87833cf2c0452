use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::error::FetchError;
use crate::query::FetchState;
use crate::types::Product;

/// Placeholder cards shown while a page loads, regardless of page size
pub const SKELETON_CARDS: usize = 6;

const CARD_HEIGHT: u16 = 5;

/// What the list area shows for the current page fetch
#[derive(Debug)]
pub enum ListView<'a> {
    Skeleton,
    Error(&'a FetchError),
    Empty,
    Grid(&'a [Product]),
}

impl<'a> ListView<'a> {
    pub fn from_state(state: Option<&'a FetchState<Vec<Product>>>) -> Self {
        match state {
            None | Some(FetchState::Loading) => ListView::Skeleton,
            Some(FetchState::Error(e)) => ListView::Error(e),
            Some(FetchState::Success(products)) if products.is_empty() => ListView::Empty,
            Some(FetchState::Success(products)) => ListView::Grid(products),
        }
    }
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    match ListView::from_state(app.products.state()) {
        ListView::Skeleton => render_skeleton(frame, area),
        ListView::Error(e) => render_error(frame, e, area),
        ListView::Empty => render_empty(frame, area),
        ListView::Grid(products) => render_grid(frame, products, app.list_index, area),
    }
}

/// Column count by terminal width, like a responsive grid
fn columns_for(width: u16) -> usize {
    match width {
        w if w >= 96 => 3,
        w if w >= 64 => 2,
        _ => 1,
    }
}

/// Split `area` into card slots, row by row.
fn card_slots(area: Rect, count: usize) -> Vec<Rect> {
    let columns = columns_for(area.width);
    let rows = count.div_ceil(columns).max(1);

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            std::iter::repeat(Constraint::Length(CARD_HEIGHT))
                .take(rows)
                .chain(std::iter::once(Constraint::Min(0))),
        )
        .split(area);

    row_areas
        .iter()
        .take(rows)
        .flat_map(|row| {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
                .split(*row)
                .to_vec()
        })
        .take(count)
        .collect()
}

fn render_grid(frame: &mut Frame, products: &[Product], selected: usize, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Products ({}) ", products.len()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Scroll by whole rows so the selected card stays visible.
    let columns = columns_for(inner.width);
    let visible_rows = (inner.height / CARD_HEIGHT).max(1) as usize;
    let selected_row = selected / columns;
    let first_row = selected_row.saturating_sub(visible_rows - 1);
    let skip = first_row * columns;
    let shown = &products[skip.min(products.len())..];

    for (i, (product, slot)) in shown
        .iter()
        .zip(card_slots(inner, shown.len().min(visible_rows * columns)))
        .enumerate()
    {
        render_card(frame, product, skip + i == selected, slot);
    }
}

fn render_card(frame: &mut Frame, product: &Product, is_selected: bool, area: Rect) {
    let border_style = if is_selected {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let title_style = if is_selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let lines = vec![
        Line::from(Span::styled(product.title.clone(), title_style)),
        Line::from(Span::styled(
            product.category.name.clone(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            product.display_price(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
    ];

    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(card, area);
}

fn render_skeleton(frame: &mut Frame, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Products ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let shade = Style::default().fg(Color::DarkGray);
    for slot in card_slots(inner, SKELETON_CARDS) {
        let width = slot.width.saturating_sub(2) as usize;
        let lines = vec![
            Line::from(Span::styled("░".repeat(width * 3 / 4), shade)),
            Line::from(Span::styled("░".repeat(width / 2), shade)),
            Line::from(Span::styled("░".repeat(width / 4), shade)),
        ];
        let card = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(shade),
        );
        frame.render_widget(card, slot);
    }
}

fn render_error(frame: &mut Frame, error: &FetchError, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled("r", Style::default().fg(Color::Yellow)),
            Span::raw(" to retry"),
        ]),
    ];

    let panel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Products "));
    frame.render_widget(panel, area);
}

fn render_empty(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "No products found",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled("g", Style::default().fg(Color::Yellow)),
            Span::raw(" to go to the first page"),
        ]),
    ];

    let panel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Products "));
    frame.render_widget(panel, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::sample_product;

    #[test]
    fn view_follows_fetch_state() {
        assert!(matches!(ListView::from_state(None), ListView::Skeleton));
        assert!(matches!(
            ListView::from_state(Some(&FetchState::Loading)),
            ListView::Skeleton
        ));

        let failed = FetchState::Error(FetchError::Network("reset".into()));
        assert!(matches!(ListView::from_state(Some(&failed)), ListView::Error(_)));

        let empty = FetchState::Success(vec![]);
        assert!(matches!(ListView::from_state(Some(&empty)), ListView::Empty));

        let loaded = FetchState::Success(vec![sample_product(1, "Lamp")]);
        assert!(matches!(
            ListView::from_state(Some(&loaded)),
            ListView::Grid(products) if products[0].id == 1
        ));
    }

    #[test]
    fn grid_columns_by_width() {
        assert_eq!(columns_for(40), 1);
        assert_eq!(columns_for(70), 2);
        assert_eq!(columns_for(120), 3);
    }

    #[test]
    fn skeleton_slot_count_is_fixed() {
        let area = Rect::new(0, 0, 120, 40);
        assert_eq!(card_slots(area, SKELETON_CARDS).len(), SKELETON_CARDS);
        let narrow = Rect::new(0, 0, 40, 40);
        assert_eq!(card_slots(narrow, SKELETON_CARDS).len(), SKELETON_CARDS);
    }
}
