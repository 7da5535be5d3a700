use crate::app::ErrorDialog;
use crate::browser::FileBrowser;
use crate::ui::layout::centered_rect;
use crate::ui::theme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

fn key_span(key: &str, color: Color) -> Span<'_> {
    Span::styled(key, Style::default().fg(color).add_modifier(Modifier::BOLD))
}

pub fn draw_error_dialog(f: &mut Frame, error: &ErrorDialog) {
    let popup_area = centered_rect(60, 40, f.area());
    f.render_widget(Clear, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(popup_area);

    let message = Paragraph::new(error.message.as_str())
        .style(Style::default().fg(theme::TEXT).bg(theme::BACKGROUND))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::DANGER))
                .title(Span::styled(
                    format!(" {} ", error.title),
                    Style::default()
                        .fg(theme::DANGER)
                        .add_modifier(Modifier::BOLD),
                )),
        );
    f.render_widget(message, chunks[0]);

    let help = Paragraph::new(Line::from(vec![
        key_span("Enter", theme::ACCENT),
        Span::from(" OK"),
    ]))
    .style(Style::default().fg(theme::TEXT).bg(theme::BACKGROUND))
    .alignment(Alignment::Center);
    f.render_widget(help, chunks[1]);
}

pub fn draw_quit_confirmation(f: &mut Frame) {
    let popup_area = centered_rect(40, 30, f.area());
    f.render_widget(Clear, popup_area);

    let text = vec![
        Line::from(""),
        Line::from("Quit the flashcard viewer?"),
        Line::from(""),
        Line::from(vec![
            key_span("y", Color::Green),
            Span::from(" Yes  "),
            key_span("n", Color::Red),
            Span::from(" No"),
        ]),
    ];

    let popup = Paragraph::new(text)
        .style(Style::default().fg(theme::TEXT).bg(theme::BACKGROUND))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::HEADER))
                .title(" Quit "),
        );
    f.render_widget(popup, popup_area);
}

pub fn draw_file_browser(f: &mut Frame, browser: &FileBrowser) {
    let popup_area = centered_rect(70, 70, f.area());
    f.render_widget(Clear, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(popup_area);

    let items: Vec<ListItem> = if browser.entries.is_empty() {
        vec![ListItem::new("Empty directory").style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        browser
            .entries
            .iter()
            .map(|entry| {
                if entry.is_dir {
                    ListItem::new(format!("{}/", entry.name)).style(
                        Style::default()
                            .fg(theme::ACCENT)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    ListItem::new(entry.name.as_str()).style(Style::default().fg(theme::TEXT))
                }
            })
            .collect()
    };

    let list = List::new(items)
        .style(Style::default().bg(theme::BACKGROUND))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::HEADER))
                .title(format!(" Open question bank: {} ", browser.path.display())),
        )
        .highlight_style(
            Style::default()
                .bg(theme::QUESTION_BG)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !browser.entries.is_empty() {
        state.select(Some(browser.selected));
    }
    f.render_stateful_widget(list, chunks[0], &mut state);

    let help = Paragraph::new(Line::from(vec![
        key_span("↑/↓", theme::ACCENT),
        Span::from(" Navigate  "),
        key_span("Enter", theme::ACCENT),
        Span::from(" Open  "),
        key_span("Backspace", theme::ACCENT),
        Span::from(" Up  "),
        key_span("h", theme::ACCENT),
        Span::from(" Home  "),
        key_span("Esc", theme::ACCENT),
        Span::from(" Cancel"),
    ]))
    .style(Style::default().fg(theme::TEXT).bg(theme::BACKGROUND))
    .alignment(Alignment::Center);
    f.render_widget(help, chunks[1]);
}
