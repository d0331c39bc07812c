use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, ListState, Paragraph, Wrap};
use ratatui::Frame;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::app::state::AppState;
use crate::config::Palette;
use crate::views::{TwoDayView, ViewModel};

pub mod panels;
pub mod sidebar;

pub use sidebar::{build_sidebar, SidebarModel, SidebarRow};

const SIDEBAR_WIDTH: u16 = 44;

/// Screen regions for one frame. `sidebar_list` is the inner list area used
/// for mouse hit-testing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppLayout {
    pub sidebar: Option<Rect>,
    pub sidebar_list: Option<Rect>,
    pub main: Rect,
    pub footer: Rect,
}

pub fn split_layout(area: Rect, sidebar_open: bool) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    if !sidebar_open {
        return AppLayout {
            sidebar: None,
            sidebar_list: None,
            main: vertical[0],
            footer: vertical[1],
        };
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(vertical[0]);
    let sidebar = columns[0];
    AppLayout {
        sidebar: Some(sidebar),
        sidebar_list: Some(inner(sidebar)),
        main: columns[1],
        footer: vertical[1],
    }
}

fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

pub fn draw_app(
    frame: &mut Frame,
    state: &AppState,
    sidebar: &SidebarModel,
    list_state: &mut ListState,
) -> AppLayout {
    let layout = split_layout(frame.size(), state.sidebar_open());
    let palette = state.palette();

    if let Some(area) = layout.sidebar {
        sidebar::render_sidebar(
            frame,
            area,
            sidebar,
            state.store(),
            state.selected_ranks(),
            palette,
            list_state,
        );
    }

    frame.render_widget(Clear, layout.main);
    render_main(frame, layout.main, &state.view_model(), palette);

    let footer = Paragraph::new(footer_line(state)).style(Style::default().fg(palette.muted));
    frame.render_widget(footer, layout.footer);
    layout
}

fn render_main(frame: &mut Frame, area: Rect, model: &ViewModel, palette: &Palette) {
    let (title, text) = match model {
        ViewModel::Greeting(view) => ("Welcome", panels::greeting_text(view, palette)),
        ViewModel::SingleItem(item) => (
            item.item_type().into(),
            panels::single_item_text(item, palette),
        ),
        ViewModel::Day(view) => ("Day", panels::day_text(view, palette)),
        ViewModel::Week(view) => ("Week", panels::week_text(view, palette)),
        ViewModel::TwoDay(view) => {
            render_two_day(frame, area, view, palette);
            return;
        }
    };
    let paragraph = Paragraph::new(text)
        .block(panel_block(title, palette))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_two_day(
    frame: &mut Frame,
    area: Rect,
    view: &TwoDayView,
    palette: &Palette,
) {
    let block = panel_block("Two days", palette);
    let body = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(body);
    let header = Text::from(vec![
        Line::from(Span::styled(
            view.header.clone(),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            view.sub_header.clone(),
            Style::default().fg(palette.muted),
        )),
    ]);
    frame.render_widget(Paragraph::new(header), rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);
    let back = panels::day_summary_text("Look Back", &view.earlier, palette);
    let ahead = panels::day_summary_text("Look Ahead", &view.later, palette);
    frame.render_widget(Paragraph::new(back).wrap(Wrap { trim: false }), columns[0]);
    frame.render_widget(Paragraph::new(ahead).wrap(Wrap { trim: false }), columns[1]);
}

fn panel_block(title: &str, palette: &Palette) -> Block<'static> {
    Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent))
}

fn footer_line(state: &AppState) -> Line<'static> {
    let (granularity, _) = state.resolved_view();
    let selected = state.selected_items().len();
    let scope = if state.selection().is_empty() {
        "nothing selected".to_string()
    } else {
        format!("{granularity} · {selected} selected")
    };
    Line::from(format!(
        " {scope}  |  ↑/↓ move • - zoom out • = zoom in • Ctrl+B timeline • q quit"
    ))
}

/// Cuts `text` to at most `max` display columns on grapheme boundaries,
/// marking the cut with an ellipsis.
pub fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for grapheme in text.graphemes(true) {
        let width = grapheme.width();
        if used + width > max - 1 {
            break;
        }
        out.push_str(grapheme);
        used += width;
    }
    out.push('…');
    out
}
