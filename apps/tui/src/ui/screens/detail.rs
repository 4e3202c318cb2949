use crate::app::actions::DetailView;
use crate::app::App;
use crate::ui::widgets::popup::{centered_rect, ClearWidget};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use recipe_browser::CanonicalRecipe;

pub fn render_detail<R>(app: &App<R>, f: &mut Frame<'_>) {
    let Some(view) = &app.detail else {
        return;
    };

    let area = centered_rect(80, 80, f.area());
    f.render_widget(ClearWidget, area);

    let (title, lines) = match view {
        DetailView::Ready(recipe) => (recipe.name.clone(), recipe_lines(recipe)),
        DetailView::Unavailable { name, message } => (
            name.clone(),
            vec![
                TextLine::from(Span::styled(
                    "Details are not available for this recipe.",
                    Style::default().fg(Color::DarkGray),
                )),
                TextLine::from(""),
                TextLine::from(Span::styled(
                    message.clone(),
                    Style::default().fg(Color::Red),
                )),
            ],
        ),
    };

    let block = Block::default()
        .title(format!("Recipe: {title}"))
        .title_bottom("Esc: Close  ↑/↓: Scroll")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll, 0));

    f.render_widget(paragraph, area);
}

fn recipe_lines(recipe: &CanonicalRecipe) -> Vec<TextLine<'static>> {
    let heading = |text: &'static str| {
        TextLine::from(Span::styled(
            text,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))
    };
    let or_none = |value: &str| {
        if value.is_empty() {
            "(none)".to_string()
        } else {
            value.to_string()
        }
    };

    let mut lines = vec![
        TextLine::from(format!("Area: {}", or_none(&recipe.region))),
        TextLine::from(format!("Category: {}", or_none(&recipe.category))),
        TextLine::from(format!("Source: {}", recipe.source.label())),
        TextLine::from(format!("Image: {}", or_none(&recipe.thumbnail_url))),
        TextLine::from(""),
        heading("Ingredients"),
    ];

    let ingredients = recipe.ingredients.display_lines();
    if ingredients.is_empty() {
        lines.push(TextLine::from("  (none listed)"));
    } else {
        lines.extend(ingredients.into_iter().map(|item| TextLine::from(format!("  • {item}"))));
    }

    lines.push(TextLine::from(""));
    lines.push(heading("Instructions"));
    lines.extend(
        recipe
            .instructions_text()
            .lines()
            .map(|line| TextLine::from(line.to_string())),
    );

    lines
}
