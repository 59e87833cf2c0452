use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::controller::PageSelectionController;

/// Page numbers to list. A current page past the configured total still
/// shows up so the user can see where they are.
pub fn page_numbers(current: u32, total: u32) -> std::ops::RangeInclusive<u32> {
    1..=total.max(current)
}

pub fn pagination_line(controller: &PageSelectionController) -> Line<'static> {
    let current = controller.current_page();
    let total = controller.total_pages();

    let enabled = Style::default().fg(Color::Yellow);
    let disabled = Style::default().fg(Color::DarkGray);

    let mut spans = vec![Span::styled(
        "‹ Prev",
        if current > 1 { enabled } else { disabled },
    )];
    for page in page_numbers(current, total) {
        spans.push(Span::raw("  "));
        if page == current {
            spans.push(Span::styled(
                format!("[{}]", page),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(page.to_string(), Style::default().fg(Color::Gray)));
        }
    }
    spans.push(Span::raw("  "));
    spans.push(Span::styled(
        "Next ›",
        if current < total { enabled } else { disabled },
    ));

    Line::from(spans)
}

pub fn render(frame: &mut Frame, controller: &PageSelectionController, area: Rect) {
    let bar = Paragraph::new(pagination_line(controller)).alignment(Alignment::Center);
    frame.render_widget(bar, area);
}
