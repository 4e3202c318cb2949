use crate::ui::widgets::popup::{centered_rect, ClearWidget};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

const BINDINGS: &[(&str, &str)] = &[
    ("←/→, Tab", "Switch cuisine"),
    ("↑/↓, j/k", "Move selection"),
    ("PgUp/PgDn", "Jump 10 rows"),
    ("Home/End", "First/Last recipe"),
    ("Enter", "Open recipe details"),
    ("/", "Search names and ingredients"),
    ("Esc", "Clear search or close popup"),
    ("F1, ?", "Toggle this help"),
    ("q", "Quit"),
];

pub fn render_help(f: &mut Frame<'_>) {
    let area = centered_rect(60, 60, f.area());
    f.render_widget(ClearWidget, area);

    let lines: Vec<TextLine<'_>> = BINDINGS
        .iter()
        .map(|(keys, action)| {
            TextLine::from(vec![
                Span::styled(
                    format!("{keys:<12}"),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(*action),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title("Help")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    f.render_widget(paragraph, area);
}
