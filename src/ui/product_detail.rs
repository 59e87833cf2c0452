use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::App;
use crate::error::FetchError;
use crate::query::FetchState;
use crate::types::Product;

const SHEET_WIDTH: u16 = 60;

/// What the detail overlay shows
#[derive(Debug)]
pub enum OverlayView<'a> {
    Hidden,
    Skeleton,
    Detail(&'a Product),
    NotFound,
}

impl<'a> OverlayView<'a> {
    pub fn from_state(is_open: bool, state: Option<&'a FetchState<Product>>) -> Self {
        if !is_open {
            return OverlayView::Hidden;
        }
        match state {
            Some(FetchState::Loading) => OverlayView::Skeleton,
            Some(FetchState::Success(product)) => OverlayView::Detail(product),
            Some(FetchState::Error(e)) => {
                tracing::debug!("detail unavailable: {}", e);
                OverlayView::NotFound
            }
            None => OverlayView::NotFound,
        }
    }
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let view = OverlayView::from_state(app.controller.is_overlay_open(), app.product.state());
    if matches!(view, OverlayView::Hidden) {
        return;
    }

    let sheet = sheet_rect(area);
    frame.render_widget(Clear, sheet);

    match view {
        OverlayView::Hidden => {}
        OverlayView::Skeleton => render_skeleton(frame, sheet),
        OverlayView::Detail(product) => render_detail(frame, product, app.image_index, sheet),
        OverlayView::NotFound => render_not_found(frame, app.product.error(), sheet),
    }
}

/// Right-anchored panel over the list, full height
fn sheet_rect(area: Rect) -> Rect {
    let width = SHEET_WIDTH.min(area.width);
    Rect {
        x: area.x + area.width - width,
        y: area.y,
        width,
        height: area.height,
    }
}

fn sheet_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
}

fn render_skeleton(frame: &mut Frame, area: Rect) {
    let shade = Style::default().fg(Color::DarkGray);
    let width = area.width.saturating_sub(2) as usize;

    let mut lines = vec![Line::from("")];
    for bar in [width, width * 3 / 4, width / 2] {
        lines.push(Line::from(Span::styled("░".repeat(bar), shade)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("░".repeat(width / 3), shade),
        Span::raw("   "),
        Span::styled("░".repeat(width / 4), shade),
    ]));
    lines.push(Line::from(""));
    for _ in 0..4 {
        lines.push(Line::from(Span::styled("░".repeat(width), shade)));
    }

    let panel = Paragraph::new(lines).block(sheet_block("Loading Product Details"));
    frame.render_widget(panel, area);
}

fn render_detail(frame: &mut Frame, product: &Product, image_index: usize, area: Rect) {
    let block = sheet_block(&product.title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

    render_carousel(frame, product, image_index, chunks[0]);

    let mut meta = vec![Line::from(vec![
        Span::styled(
            product.display_price(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            product.category.name.clone(),
            Style::default().fg(Color::Gray),
        ),
    ])];
    if let Some(updated) = product.updated_at {
        meta.push(Line::from(Span::styled(
            format!("Updated {}", updated.format("%Y-%m-%d")),
            Style::default().fg(Color::DarkGray),
        )));
    }
    frame.render_widget(Paragraph::new(meta), chunks[1]);

    let description = Paragraph::new(product.description.as_str())
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::TOP).title("Description"));
    frame.render_widget(description, chunks[2]);

    let hint = Paragraph::new(Line::from(Span::styled(
        "h/l: images | y: copy link | Esc: close",
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(hint, chunks[3]);
}

fn render_carousel(frame: &mut Frame, product: &Product, image_index: usize, area: Rect) {
    let lines = match product.images.len() {
        0 => vec![Line::from(Span::styled(
            "No images",
            Style::default().fg(Color::DarkGray),
        ))],
        count => {
            let index = image_index.min(count - 1);
            vec![
                Line::from(vec![
                    Span::styled("‹ ", Style::default().fg(Color::Yellow)),
                    Span::raw(format!("Image {} of {}", index + 1, count)),
                    Span::styled(" ›", Style::default().fg(Color::Yellow)),
                ]),
                Line::from(Span::styled(
                    product.images[index].clone(),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::UNDERLINED),
                )),
            ]
        }
    };

    let carousel = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(carousel, area);
}

fn render_not_found(frame: &mut Frame, error: Option<&FetchError>, area: Rect) {
    let detail = match error {
        Some(e) if !e.is_not_found() => e.to_string(),
        _ => "Please try again".to_string(),
    };
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "No product found",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(detail, Style::default().fg(Color::Gray))),
    ];
    if error.is_some() {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::raw("Press "),
            Span::styled("r", Style::default().fg(Color::Yellow)),
            Span::raw(" to retry, "),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::raw(" to close"),
        ]));
    }

    let panel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(sheet_block("Product"));
    frame.render_widget(panel, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::sample_product;

    #[test]
    fn closed_overlay_is_hidden_whatever_the_state() {
        let loaded = FetchState::Success(sample_product(1, "Lamp"));
        assert!(matches!(
            OverlayView::from_state(false, Some(&loaded)),
            OverlayView::Hidden
        ));
        assert!(matches!(OverlayView::from_state(false, None), OverlayView::Hidden));
    }

    #[test]
    fn open_overlay_follows_fetch_state() {
        assert!(matches!(
            OverlayView::from_state(true, Some(&FetchState::Loading)),
            OverlayView::Skeleton
        ));

        let loaded = FetchState::Success(sample_product(3, "Desk"));
        assert!(matches!(
            OverlayView::from_state(true, Some(&loaded)),
            OverlayView::Detail(product) if product.id == 3
        ));

        let failed = FetchState::Error(FetchError::Http { status: 500 });
        assert!(matches!(
            OverlayView::from_state(true, Some(&failed)),
            OverlayView::NotFound
        ));
        assert!(matches!(OverlayView::from_state(true, None), OverlayView::NotFound));
    }

    #[test]
    fn sheet_hugs_right_edge() {
        let sheet = sheet_rect(Rect::new(0, 1, 100, 20));
        assert_eq!(sheet, Rect::new(40, 1, 60, 20));
        let narrow = sheet_rect(Rect::new(0, 0, 30, 10));
        assert_eq!(narrow, Rect::new(0, 0, 30, 10));
    }
}
