use crate::app::App;
use crate::ui::widgets::tables::{scroll_offset, truncate};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;
use recipe_browser::{CanonicalRecipe, SourceKind};
use throbber_widgets_tui::Throbber;

pub fn render_browse<R>(app: &App<R>, f: &mut Frame<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_area_selector(app, f, chunks[0]);
    render_search_bar(app, f, chunks[1]);
    render_recipe_table(app, f, chunks[2]);
    render_status_line(app, f, chunks[3]);
    render_help_footer(app, f, chunks[4]);
}

fn render_area_selector<R>(app: &App<R>, f: &mut Frame<'_>, area: Rect) {
    let line = TextLine::from(vec![
        Span::raw("◀ "),
        Span::styled(
            app.area_label().to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" ▶"),
        Span::styled(
            format!("   ({} of {})", app.area_index + 1, app.area_count()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .title("Cuisine")
            .borders(Borders::ALL),
    );
    f.render_widget(paragraph, area);
}

fn render_search_bar<R>(app: &App<R>, f: &mut Frame<'_>, area: Rect) {
    let (text, style) = if app.search_active {
        (
            format!("{}█", app.search_query),
            Style::default().fg(Color::Yellow),
        )
    } else if app.search_query.is_empty() {
        (
            "Press / to search by name or ingredient".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (app.search_query.clone(), Style::default())
    };

    let border_style = if app.search_active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let paragraph = Paragraph::new(Span::styled(text, style)).block(
        Block::default()
            .title("Search")
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    f.render_widget(paragraph, area);
}

fn render_recipe_table<R>(app: &App<R>, f: &mut Frame<'_>, area: Rect) {
    let recipes = app.recipes();

    if recipes.is_empty() {
        let message = app
            .listing
            .error
            .as_ref()
            .map_or_else(|| "No recipes found.".to_string(), |err| format!("Error: {err}"));
        let paragraph = Paragraph::new(message)
            .block(
                Block::default()
                    .title("Recipes")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Name"),
        Cell::from("Area"),
        Cell::from("Category"),
        Cell::from("Source"),
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let total_rows = recipes.len();
    let max_visible_rows = area.height.saturating_sub(3) as usize;
    let offset = scroll_offset(total_rows, max_visible_rows, app.selected_index);
    let name_width = area.width.saturating_sub(44) as usize;

    let rows = recipes
        .iter()
        .enumerate()
        .skip(offset)
        .take(max_visible_rows)
        .map(|(i, recipe)| recipe_row(recipe, name_width, i == app.selected_index));

    let widths = [
        Constraint::Min(12),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Length(8),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!(
                    "Recipes ({} of {})",
                    app.selected_index + 1,
                    total_rows
                ))
                .borders(Borders::ALL),
        )
        .column_spacing(1);

    f.render_widget(table, area);
}

fn recipe_row(recipe: &CanonicalRecipe, name_width: usize, selected: bool) -> Row<'static> {
    let style = if selected {
        Style::default()
            .bg(Color::Rgb(0, 0, 238))
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(source_color(recipe.source))
    };

    Row::new(vec![
        Cell::from(truncate(&recipe.name, name_width.max(12))),
        Cell::from(recipe.region.clone()),
        Cell::from(recipe.category.clone()),
        Cell::from(recipe.source.label()),
    ])
    .style(style)
}

const fn source_color(source: SourceKind) -> Color {
    match source {
        SourceKind::Local => Color::LightGreen,
        SourceKind::Remote => Color::White,
    }
}

fn render_status_line<R>(app: &App<R>, f: &mut Frame<'_>, area: Rect) {
    if app.loading {
        let throbber = Throbber::default()
            .label(app.status_message.clone())
            .style(Style::default().fg(Color::Cyan));
        f.render_widget(Paragraph::new(throbber.to_line(&app.throbber)), area);
        return;
    }

    let style = if app.status_message.starts_with("Error") || app.listing.is_error() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    f.render_widget(
        Paragraph::new(Span::styled(app.status_message.clone(), style)),
        area,
    );
}

fn render_help_footer<R>(app: &App<R>, f: &mut Frame<'_>, area: Rect) {
    let key = |label: &'static str| {
        Span::styled(
            label,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    };

    let help_text = if app.search_active {
        vec![
            key("Type"),
            Span::raw(": Filter   "),
            key("Enter"),
            Span::raw(": Done   "),
            key("Esc"),
            Span::raw(": Clear search"),
        ]
    } else {
        vec![
            key("←/→"),
            Span::raw(": Cuisine   "),
            key("↑/↓"),
            Span::raw(": Navigate   "),
            key("Enter"),
            Span::raw(": Details   "),
            key("/"),
            Span::raw(": Search   "),
            key("F1"),
            Span::raw(": Help   "),
            key("q"),
            Span::raw(": Quit"),
        ]
    };

    let help_paragraph = Paragraph::new(TextLine::from(help_text))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    f.render_widget(help_paragraph, area);
}
