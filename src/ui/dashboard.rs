use crate::info::ProgressSource;
use crate::model::{Floor, FloorFilter, StateKind};
use crate::ui::app::{App, FocusPanel};
use crate::ui::viewport;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        Block, Borders, Gauge, List, ListItem, Paragraph,
    },
    Frame,
};

// Palette
const BRAND_DARK: Color = Color::Rgb(0x1F, 0x2F, 0x3C);
const BRAND_SELECT_BG: Color = Color::Rgb(0xC3, 0xD3, 0xE0);
const BRAND_GREEN: Color = Color::Rgb(0x82, 0x9A, 0x68);
const BRAND_ORANGE: Color = Color::Rgb(0x9E, 0x68, 0x3C);
const BRAND_MUTED: Color = Color::Rgb(0x71, 0x65, 0x65);
const SCENE_BG: Color = Color::Rgb(0x22, 0x22, 0x22);

// Styles
const HEADER_STYLE: Style = Style::new().fg(BRAND_DARK).add_modifier(Modifier::BOLD);
const SELECTED_STYLE: Style = Style::new()
    .bg(BRAND_SELECT_BG)
    .fg(BRAND_DARK)
    .add_modifier(Modifier::BOLD);
const COUNT_COLOR: Color = BRAND_GREEN;

const HELP: &str = " ←→ Day | PgUp/PgDn Week | Space Play | Tab Focus | ↑↓ Level/Tilt | wasd Orbit | +/- Zoom | Click Pick | q Quit ";

struct Areas {
    header: Rect,
    timeline: Rect,
    levels: Rect,
    scene: Rect,
    tasks: Rect,
    info: Rect,
    footer: Rect,
}

fn split(area: Rect) -> Areas {
    let rows = Layout::vertical([
        Constraint::Length(3), // Header
        Constraint::Length(3), // Timeline
        Constraint::Min(10),   // Main content
        Constraint::Length(3), // Footer
    ])
    .split(area);

    let columns = Layout::horizontal([
        Constraint::Percentage(15), // Levels
        Constraint::Percentage(55), // Scene
        Constraint::Percentage(30), // Tasks + info
    ])
    .split(rows[2]);

    let side = Layout::vertical([
        Constraint::Min(5),    // Active tasks
        Constraint::Length(8), // Info
    ])
    .split(columns[2]);

    Areas {
        header: rows[0],
        timeline: rows[1],
        levels: columns[0],
        scene: columns[1],
        tasks: side[0],
        info: side[1],
        footer: rows[3],
    }
}

/// Interior of the scene panel for a frame of size `area`, in cells.
#[must_use]
pub fn scene_area(area: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(split(area).scene)
}

pub fn draw_dashboard(frame: &mut Frame, app: &App) {
    let areas = split(frame.area());

    draw_header(frame, areas.header, app);
    draw_timeline(frame, areas.timeline, app);
    draw_levels(frame, areas.levels, app);
    draw_scene(frame, areas.scene, app);
    draw_active_tasks(frame, areas.tasks, app);
    draw_info(frame, areas.info, app);
    draw_footer(frame, areas.footer, HELP);
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let registry = app.viewer.scene().registry();
    let title = format!(
        " 4D Site Viewer | {} | Level: {} | {} tasks | {} elements ",
        app.viewer.project_type(),
        app.viewer.filter().label(),
        registry.task_count(),
        registry.element_count()
    );

    let header = Paragraph::new(title)
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

fn draw_timeline(frame: &mut Frame, area: Rect, app: &App) {
    let date = app.viewer.current_date().map_or_else(
        || "no schedule".to_string(),
        |d| d.format("%Y-%m-%d").to_string(),
    );
    let status = if app.playing { "▶" } else { "⏸" };
    let span = app
        .viewer
        .schedule()
        .and_then(|s| s.span())
        .map(|(start, end)| {
            format!(
                " {} → {} ",
                start.format("%Y-%m-%d"),
                end.format("%Y-%m-%d")
            )
        })
        .unwrap_or_default();

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(format!(" Timeline{span}"))
                .borders(Borders::ALL),
        )
        .gauge_style(Style::default().fg(BRAND_ORANGE))
        .ratio(app.timeline_ratio())
        .label(format!("{status} {date}"));

    frame.render_widget(gauge, area);
}

fn draw_levels(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus_panel == FocusPanel::Levels;
    let current = app.viewer.filter();
    let elements = app.viewer.scene().elements();

    let entry = |filter: FloorFilter| {
        let is_selected = filter == current;
        let style = if is_selected && is_focused {
            SELECTED_STYLE
        } else if is_selected {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let marker = if is_selected { " ◄" } else { "" };
        let count = elements.iter().filter(|e| filter.admits(e.floor)).count();

        ListItem::new(Line::from(vec![
            Span::styled(filter.label(), style),
            Span::styled(format!(" ({count})"), Style::default().fg(COUNT_COLOR)),
            Span::styled(marker, Style::default().fg(BRAND_ORANGE)),
        ]))
    };

    let items: Vec<ListItem> = std::iter::once(FloorFilter::All)
        .chain(Floor::ALL.iter().map(|f| FloorFilter::Only(*f)))
        .map(entry)
        .collect();

    let border_style = if is_focused {
        Style::default().fg(BRAND_ORANGE)
    } else {
        Style::default()
    };

    let list = List::new(items).block(
        Block::default()
            .title(format!(" Levels ({}) ", Floor::ALL.len() + 1))
            .borders(Borders::ALL)
            .border_style(border_style),
    );

    frame.render_widget(list, area);
}

fn draw_scene(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus_panel == FocusPanel::Scene;
    let segments = viewport::wireframe(app.viewer.scene(), app.viewer.camera());

    let border_style = if is_focused {
        Style::default().fg(BRAND_ORANGE)
    } else {
        Style::default()
    };

    let canvas = Canvas::default()
        .block(
            Block::default()
                .title(format!(" Scene | {} ", app.viewer.filter().label()))
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .marker(Marker::Braille)
        .background_color(SCENE_BG)
        .x_bounds([-1.0, 1.0])
        .y_bounds([-1.0, 1.0])
        .paint(|ctx| {
            for s in &segments {
                ctx.draw(&CanvasLine::new(s.x1, s.y1, s.x2, s.y2, s.color));
            }
        });

    frame.render_widget(canvas, area);
}

fn draw_active_tasks(frame: &mut Frame, area: Rect, app: &App) {
    let active = &app.viewer.report().active_tasks;

    let items: Vec<ListItem> = if active.is_empty() {
        vec![ListItem::new(Span::styled(
            "No active tasks...",
            Style::default()
                .fg(BRAND_MUTED)
                .add_modifier(Modifier::ITALIC),
        ))]
    } else {
        active
            .iter()
            .map(|task| {
                ListItem::new(Line::from(vec![
                    Span::raw(task.name.clone()),
                    Span::raw(" "),
                    Span::styled(
                        format!("{}%", task.percent),
                        Style::default().fg(BRAND_ORANGE),
                    ),
                ]))
            })
            .collect()
    };

    let list = List::new(items).block(
        Block::default()
            .title(format!(" Active Tasks ({}) ", active.len()))
            .borders(Borders::ALL),
    );

    frame.render_widget(list, area);
}

fn draw_info(frame: &mut Frame, area: Rect, app: &App) {
    let label = |name: &str| Span::styled(format!("{name:<10}"), Style::default().fg(BRAND_MUTED));

    let lines = match app.picked_info() {
        Some(info) => {
            let state_color = match info.state {
                StateKind::Ghost => BRAND_MUTED,
                StateKind::Active => BRAND_ORANGE,
                StateKind::Done => BRAND_GREEN,
            };
            let source = match info.progress {
                Some((_, ProgressSource::Certified)) => " (certified)",
                Some((_, ProgressSource::Scheduled)) => " (scheduled)",
                None => "",
            };
            vec![
                Line::from(Span::styled(info.task_name.clone(), HEADER_STYLE)),
                Line::from(vec![
                    label("State"),
                    Span::styled(info.state.to_string(), Style::default().fg(state_color)),
                ]),
                Line::from(vec![
                    label("Progress"),
                    Span::raw(info.progress_label()),
                    Span::styled(source, Style::default().fg(BRAND_MUTED)),
                ]),
                Line::from(vec![label("Work done"), Span::raw(info.work_done_label())]),
            ]
        }
        None => vec![Line::from(Span::styled(
            "Click an element to inspect it",
            Style::default().fg(BRAND_MUTED),
        ))],
    };

    let info = Paragraph::new(lines).block(Block::default().title(" Info ").borders(Borders::ALL));
    frame.render_widget(info, area);
}

fn draw_footer(frame: &mut Frame, area: Rect, help: &str) {
    let footer = Paragraph::new(help)
        .style(Style::default().fg(BRAND_MUTED))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(footer, area);
}
