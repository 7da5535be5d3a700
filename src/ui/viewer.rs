use crate::app::App;
use crate::ui::layout::calculate_viewer_chunks;
use crate::ui::theme;
use crate::utils::{format_elapsed, truncate_string, wrapped_line_count};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const EMPTY_TITLE: &str = "Flashcard Viewer";
const OPEN_HINT: &str = "Press o to open a question bank (.csv, .xlsx)";

/// Pads `text` with blank lines so it sits roughly in the vertical middle of
/// the bordered `area`.
fn centered_text(text: &str, area: Rect) -> Text<'_> {
    let inner_height = area.height.saturating_sub(2) as usize;
    let inner_width = area.width.saturating_sub(2) as usize;
    let lines = wrapped_line_count(text, inner_width);
    let pad = inner_height.saturating_sub(lines) / 2;

    let mut out = Text::default();
    for _ in 0..pad {
        out.push_line(Line::from(""));
    }
    for line in text.lines() {
        out.push_line(Line::from(line));
    }
    out
}

fn draw_panel(f: &mut Frame, area: Rect, title: &str, text: &str, bg: Color, dim: bool) {
    let style = if dim {
        Style::default().fg(theme::HINT).bg(bg).add_modifier(Modifier::ITALIC)
    } else {
        Style::default().fg(theme::TEXT).bg(bg).add_modifier(Modifier::BOLD)
    };

    let panel = Paragraph::new(centered_text(text, area))
        .style(style)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::BORDER))
                .title(title),
        );
    f.render_widget(panel, area);
}

pub fn draw_viewer(f: &mut Frame, app: &App) {
    let layout = calculate_viewer_chunks(f.area());

    f.render_widget(
        Block::default().style(Style::default().bg(theme::BACKGROUND)),
        f.area(),
    );

    let title = match &app.session {
        Some(session) => {
            let (current, total) = session.progress();
            format!(
                "{} - Question {} / {} - started {}",
                truncate_string(&session.deck_name, layout.header_area.width.saturating_sub(40) as usize),
                current,
                total,
                session.started_wall.format("%H:%M")
            )
        }
        None => EMPTY_TITLE.to_string(),
    };

    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(theme::HEADER)
                .bg(theme::BACKGROUND)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::BORDER)),
        );
    f.render_widget(header, layout.header_area);

    match &app.session {
        Some(session) => {
            draw_panel(
                f,
                layout.question_area,
                "Question",
                session.question_text(),
                theme::QUESTION_BG,
                false,
            );
            draw_panel(
                f,
                layout.answer_area,
                "Answer",
                session.answer_text().unwrap_or(""),
                theme::ANSWER_BG,
                false,
            );
        }
        None => {
            draw_panel(f, layout.question_area, "Question", OPEN_HINT, theme::QUESTION_BG, true);
            draw_panel(f, layout.answer_area, "Answer", "", theme::ANSWER_BG, true);
        }
    }

    let status_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER));

    let status = Paragraph::new(app.status_left())
        .style(Style::default().fg(theme::TEXT).bg(theme::BACKGROUND))
        .block(status_block.clone());
    f.render_widget(status, layout.status_area);

    let elapsed = app
        .session
        .as_ref()
        .map(|s| format_elapsed(s.elapsed()))
        .unwrap_or_default();
    let elapsed = Paragraph::new(elapsed)
        .style(Style::default().fg(theme::TEXT).bg(theme::BACKGROUND))
        .alignment(Alignment::Right)
        .block(status_block);
    f.render_widget(elapsed, layout.elapsed_area);

    let key_style = Style::default()
        .fg(theme::ACCENT)
        .add_modifier(Modifier::BOLD);
    let help = Paragraph::new(Line::from(vec![
        Span::styled("Space/Enter/Click", key_style),
        Span::from(" Reveal / Next  "),
        Span::styled("o", key_style),
        Span::from(" Open  "),
        Span::styled("q/Esc", key_style),
        Span::from(" Quit"),
    ]))
    .style(Style::default().fg(theme::TEXT).bg(theme::BACKGROUND))
    .alignment(Alignment::Center);
    f.render_widget(help, layout.help_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_text_pads_top() {
        let area = Rect::new(0, 0, 20, 12);
        // 10 inner rows, one line of text: 4 blank lines above
        let text = centered_text("Hello", area);
        assert_eq!(text.lines.len(), 5);
        assert_eq!(text.lines[4].to_string(), "Hello");
    }

    #[test]
    fn test_centered_text_overflow_has_no_padding() {
        let area = Rect::new(0, 0, 7, 4);
        let text = centered_text("a long line that wraps a lot", area);
        assert_eq!(text.lines.len(), 1);
    }
}
