use crate::state::{FilterField, ListPhase};
use crate::tui::app::App;
use crate::tui::colors;
use crate::view::{DrawerView, RecipeRow};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap};
use std::rc::Rc;
use unicode_width::UnicodeWidthStr;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Filter bar
            Constraint::Min(5),    // Table
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_filter_bar(frame, app, chunks[0]);
    draw_table(frame, app, chunks[1]);
    draw_status_bar(frame, app, chunks[2]);

    if let Some(drawer) = &app.drawer {
        draw_drawer(frame, drawer, area);
        return;
    }

    // Show the cursor in the focused filter input
    if let Some(field) = app.filters.focused_field() {
        let cells = filter_cells(chunks[0]);
        let cell = cells[field_slot(field)];
        let text = app.state.filter(field);
        let cursor = app.filters.cursor(field);
        let cursor = if cursor <= text.len() && text.is_char_boundary(cursor) {
            cursor
        } else {
            text.len()
        };
        let cursor_x = cell.x + 1 + text[..cursor].width() as u16;
        frame.set_cursor_position(Position::new(
            cursor_x.min(cell.x + cell.width.saturating_sub(2)),
            cell.y + 1,
        ));
    }
}

fn filter_cells(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 5); 5])
        .split(area)
}

fn field_slot(field: FilterField) -> usize {
    match field {
        FilterField::Title => 0,
        FilterField::Cuisine => 1,
        FilterField::Rating => 2,
        FilterField::TotalTime => 3,
        FilterField::Serves => 4,
    }
}

fn draw_filter_bar(frame: &mut Frame, app: &App, area: Rect) {
    let cells = filter_cells(area);

    for field in FilterField::ALL {
        let focused = app.filters.focused_field() == Some(field);
        let border_style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {} ", field.label()));

        let text = app.state.filter(field).to_string();
        let paragraph = Paragraph::new(text)
            .block(block)
            .style(Style::default().fg(Color::White));

        frame.render_widget(paragraph, cells[field_slot(field)]);
    }
}

fn draw_table(frame: &mut Frame, app: &mut App, area: Rect) {
    // Area height minus the header line
    let table_inner_height = area.height.saturating_sub(1) as usize;
    app.table.visible_rows = table_inner_height;

    let header = Row::new(["Title", "Cuisine", "Rating", "Time", "Serves"].map(|name| {
        Cell::from(name).style(
            Style::default()
                .fg(Color::White)
                .bg(colors::BAR_BG)
                .add_modifier(Modifier::BOLD),
        )
    }))
    .height(1);

    // Build visible rows only
    let start = app.table.scroll_offset;
    let end = (start + table_inner_height).min(app.rows.len());

    let rows: Vec<Row> = (start..end)
        .map(|index| {
            let recipe = &app.rows[index];
            let row = RecipeRow::from_recipe(recipe);
            let is_selected = app.table.selected == Some(index);

            // Alternating row background
            let bg = if is_selected {
                colors::SELECTED_BG
            } else if index % 2 == 1 {
                colors::STRIPE_BG
            } else {
                Color::Reset
            };

            let fg_modifier = if is_selected {
                Modifier::BOLD
            } else {
                Modifier::empty()
            };

            Row::new(vec![
                Cell::from(row.title)
                    .style(Style::default().fg(Color::White).bg(bg).add_modifier(fg_modifier)),
                Cell::from(row.cuisine).style(Style::default().fg(Color::Gray).bg(bg)),
                Cell::from(row.stars)
                    .style(Style::default().fg(colors::rating_color(recipe.rating)).bg(bg)),
                Cell::from(row.time).style(Style::default().fg(Color::Green).bg(bg)),
                Cell::from(row.serves).style(Style::default().fg(Color::White).bg(bg)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(26),
        Constraint::Length(16),
        Constraint::Length(8),
        Constraint::Length(10),
        Constraint::Fill(1),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::NONE));

    frame.render_widget(table, area);

    // Empty-state messages replace the row area, never the header
    let message = match app.phase {
        ListPhase::Rows => None,
        ListPhase::NoResults => Some((
            "No recipes match the current filters.",
            Style::default().fg(Color::Yellow),
        )),
        ListPhase::NoData => Some((
            "Recipe data could not be loaded.",
            Style::default().fg(Color::Red),
        )),
    };

    if let Some((text, style)) = message {
        let message_area = Rect::new(
            area.x,
            area.y + 2.min(area.height.saturating_sub(1)),
            area.width,
            1,
        );
        frame.render_widget(
            Paragraph::new(text)
                .style(style)
                .alignment(Alignment::Center),
            message_area,
        );
    }
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let left_text = format!(
        " {} | {} recipes | {} per page{}",
        app.pagination.label(),
        app.pagination.total,
        app.state.per_page,
        if app.in_flight { " | fetching..." } else { "" }
    );

    let right_text =
        " Tab:Filters  \u{2190}\u{2192}:Page  p:Per-page  Enter:Details  Esc:Quit ";

    // Left-aligned text + padding + right-aligned hints
    let available_width = area.width as usize;
    let left_len = left_text.width();
    let right_len = right_text.width();

    let status_str = if left_len + right_len < available_width {
        let padding = available_width - left_len - right_len;
        format!("{}{:padding$}{}", left_text, "", right_text, padding = padding)
    } else {
        // Not enough space, just show the left text
        format!("{:width$}", left_text, width = available_width)
    };

    let status = Paragraph::new(status_str)
        .style(Style::default().fg(Color::White).bg(colors::BAR_BG));

    frame.render_widget(status, area);
}

/// Helper to create a centered popup area
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn draw_drawer(frame: &mut Frame, drawer: &DrawerView, area: Rect) {
    let lines = drawer.lines();

    let width = 64.min(area.width.saturating_sub(4)).max(20);
    let height = (lines.len() as u16 + 2).min(area.height.saturating_sub(2)).max(5);
    let popup_area = centered_rect(width, height, area);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", drawer.heading))
        .title_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));

    let body: Vec<Line> = lines.into_iter().map(Line::from).collect();
    let paragraph = Paragraph::new(body)
        .block(block)
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, popup_area);
}
