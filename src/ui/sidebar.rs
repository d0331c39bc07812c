use std::ops::RangeInclusive;

use indexmap::IndexMap;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};
use ratatui::Frame;
use time::{Date, PrimitiveDateTime};
use unicode_width::UnicodeWidthStr;

use super::truncate_to_width;
use crate::config::Palette;
use crate::timeline::{ItemId, TimelineStore};
use crate::views::labels::{clock_time, weekday_month_day};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarRow {
    DayMarker { date: Date, label: String },
    Now,
    Item { id: ItemId, rank: usize },
}

#[derive(Debug, Clone, Default)]
pub struct SidebarModel {
    rows: Vec<SidebarRow>,
    slots: IndexMap<ItemId, usize>,
    now_slot: Option<usize>,
}

impl SidebarModel {
    pub fn rows(&self) -> &[SidebarRow] {
        &self.rows
    }

    pub fn slot_of(&self, id: ItemId) -> Option<usize> {
        self.slots.get(&id).copied()
    }

    pub fn now_slot(&self) -> Option<usize> {
        self.now_slot
    }

    /// Item under a terminal cell inside `list_area`, given the list's
    /// current scroll offset. Markers and blank space yield `None`.
    pub fn item_at(&self, list_area: Rect, offset: usize, column: u16, row: u16) -> Option<ItemId> {
        let inside = column >= list_area.x
            && column < list_area.x.saturating_add(list_area.width)
            && row >= list_area.y
            && row < list_area.y.saturating_add(list_area.height);
        if !inside {
            return None;
        }
        let index = offset + usize::from(row - list_area.y);
        match self.rows.get(index)? {
            SidebarRow::Item { id, .. } => Some(*id),
            _ => None,
        }
    }
}

pub fn marker_label(date: Date, reference: Date) -> String {
    if date == reference {
        "Today".to_string()
    } else if reference.previous_day() == Some(date) {
        "Yesterday".to_string()
    } else if reference.next_day() == Some(date) {
        "Tomorrow".to_string()
    } else {
        weekday_month_day(date)
    }
}

/// Items in store order with a marker before each new day and a "Now" row
/// after the last item not later than `reference`.
pub fn build_sidebar(store: &TimelineStore, reference: PrimitiveDateTime) -> SidebarModel {
    let mut model = SidebarModel::default();
    let mut last_day: Option<Date> = None;
    let reference_day = reference.date();

    let push_marker = |model: &mut SidebarModel, last_day: &mut Option<Date>, date: Date| {
        if *last_day != Some(date) {
            model.rows.push(SidebarRow::DayMarker {
                date,
                label: marker_label(date, reference_day),
            });
            *last_day = Some(date);
        }
    };

    for (rank, item) in store.items().iter().enumerate() {
        if model.now_slot.is_none() && reference < item.timestamp {
            push_marker(&mut model, &mut last_day, reference_day);
            model.now_slot = Some(model.rows.len());
            model.rows.push(SidebarRow::Now);
        }
        push_marker(&mut model, &mut last_day, item.date());
        model.slots.insert(item.id, model.rows.len());
        model.rows.push(SidebarRow::Item { id: item.id, rank });
    }
    if model.now_slot.is_none() {
        push_marker(&mut model, &mut last_day, reference_day);
        model.now_slot = Some(model.rows.len());
        model.rows.push(SidebarRow::Now);
    }
    model
}

pub fn render_sidebar(
    frame: &mut Frame,
    area: Rect,
    model: &SidebarModel,
    store: &TimelineStore,
    selected: Option<RangeInclusive<usize>>,
    palette: &Palette,
    list_state: &mut ListState,
) {
    let width = usize::from(area.width.saturating_sub(2));
    let selected_style = Style::default()
        .fg(palette.selected_fg)
        .bg(palette.selected_bg)
        .add_modifier(Modifier::BOLD);

    let rows: Vec<ListItem> = model
        .rows
        .iter()
        .map(|row| match row {
            SidebarRow::DayMarker { label, .. } => {
                let style = if label == "Today" {
                    Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(palette.marker)
                };
                let text = format!("── {label} ");
                let fill = width.saturating_sub(text.width());
                ListItem::new(Line::from(Span::styled(
                    format!("{text}{}", "─".repeat(fill)),
                    style,
                )))
            }
            SidebarRow::Now => ListItem::new(Line::from(Span::styled(
                format!("━ Now {}", "━".repeat(width.saturating_sub(6))),
                Style::default().fg(palette.now).add_modifier(Modifier::BOLD),
            ))),
            SidebarRow::Item { id, rank } => {
                let Some(item) = store.item(*id) else {
                    return ListItem::new("");
                };
                let line = format!(
                    "{:>8} {} {} · {}",
                    clock_time(item.timestamp),
                    item.item_type().icon(),
                    item.title(),
                    item.detail()
                );
                let row = ListItem::new(truncate_to_width(&line, width));
                if selected.as_ref().is_some_and(|range| range.contains(rank)) {
                    row.style(selected_style)
                } else {
                    row.style(Style::default().fg(palette.text))
                }
            }
        })
        .collect();

    let list = List::new(rows)
        .block(
            Block::default()
                .title("Timeline")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.accent)),
        )
        .highlight_style(selected_style);
    frame.render_stateful_widget(list, area, list_state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::fixtures::note;
    use time::macros::{date, datetime};

    fn store() -> TimelineStore {
        TimelineStore::new(vec![
            note(1, datetime!(2025-07-03 09:00), "thu"),
            note(2, datetime!(2025-07-04 09:00), "fri am"),
            note(3, datetime!(2025-07-04 12:00), "fri noon"),
            note(4, datetime!(2025-07-04 15:00), "fri pm"),
            note(5, datetime!(2025-07-07 09:00), "mon"),
        ])
        .expect("valid fixture")
    }

    #[test]
    fn rows_interleave_markers_and_now() {
        let model = build_sidebar(&store(), datetime!(2025-07-04 12:00));
        let rows = model.rows();
        assert_eq!(
            rows[0],
            SidebarRow::DayMarker {
                date: date!(2025-07-03),
                label: "Yesterday".to_string()
            }
        );
        assert_eq!(rows[1], SidebarRow::Item { id: 1, rank: 0 });
        assert_eq!(
            rows[2],
            SidebarRow::DayMarker {
                date: date!(2025-07-04),
                label: "Today".to_string()
            }
        );
        // Now follows items sharing the reference timestamp.
        assert_eq!(rows[5], SidebarRow::Now);
        assert_eq!(model.now_slot(), Some(5));
        assert_eq!(
            rows[7],
            SidebarRow::DayMarker {
                date: date!(2025-07-07),
                label: "Monday, July 7".to_string()
            }
        );
        assert_eq!(model.slot_of(4), Some(6));
        assert_eq!(model.slot_of(5), Some(8));
    }

    #[test]
    fn now_on_an_empty_day_gets_its_own_marker() {
        let model = build_sidebar(&store(), datetime!(2025-07-05 10:00));
        let rows = model.rows();
        let now = model.now_slot().expect("now row");
        assert_eq!(
            rows[now - 1],
            SidebarRow::DayMarker {
                date: date!(2025-07-05),
                label: "Today".to_string()
            }
        );
        assert_eq!(
            rows[now + 1],
            SidebarRow::DayMarker {
                date: date!(2025-07-07),
                label: "Monday, July 7".to_string()
            }
        );
    }

    #[test]
    fn now_after_everything_closes_the_list() {
        let model = build_sidebar(&store(), datetime!(2025-07-07 18:00));
        assert_eq!(model.rows().last(), Some(&SidebarRow::Now));
    }

    #[test]
    fn hit_testing_honours_offset_and_skips_markers() {
        let model = build_sidebar(&store(), datetime!(2025-07-04 12:00));
        let area = Rect::new(1, 1, 30, 5);
        assert_eq!(model.item_at(area, 0, 5, 1), None);
        assert_eq!(model.item_at(area, 0, 5, 2), Some(1));
        assert_eq!(model.item_at(area, 3, 5, 2), Some(3));
        assert_eq!(model.item_at(area, 0, 40, 2), None);
        assert_eq!(model.item_at(area, 0, 5, 9), None);
    }

    #[test]
    fn marker_labels_are_relative_to_the_reference() {
        let reference = date!(2025-07-04);
        assert_eq!(marker_label(date!(2025-07-05), reference), "Tomorrow");
        assert_eq!(marker_label(date!(2025-07-01), reference), "Tuesday, July 1");
    }
}
