use std::ops::RangeInclusive;

use time::PrimitiveDateTime;

use crate::config::{AppConfig, Palette};
use crate::selection::{
    self, classify, resolve_view, Direction, Granularity, Selection, ViewKind, ZoomDirection,
};
use crate::timeline::{ItemId, TimelineItem, TimelineStore};
use crate::views::{build_view_model, StandoutRules, ViewModel};

/// Everything the event loop mutates. Only the selection and the sidebar
/// flag change after construction.
#[derive(Debug, Clone)]
pub struct AppState {
    store: TimelineStore,
    selection: Selection,
    sidebar_open: bool,
    reference_now: PrimitiveDateTime,
    rules: StandoutRules,
    user_name: String,
    palette: Palette,
}

impl AppState {
    pub fn new(store: TimelineStore, reference_now: PrimitiveDateTime, config: &AppConfig) -> Self {
        Self {
            store,
            selection: Selection::empty(),
            sidebar_open: config.sidebar_open,
            reference_now,
            rules: StandoutRules::from_config(&config.standouts),
            user_name: config.user_name.clone(),
            palette: Palette::for_theme(config.theme),
        }
    }

    pub fn store(&self) -> &TimelineStore {
        &self.store
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    pub fn reference_now(&self) -> PrimitiveDateTime {
        self.reference_now
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
        tracing::debug!(open = self.sidebar_open, "toggled sidebar");
    }

    pub fn move_selection(&mut self, direction: Direction) {
        self.selection =
            selection::move_selection(self.selection, &self.store, self.reference_now, direction);
    }

    pub fn zoom(&mut self, direction: ZoomDirection) {
        self.selection = selection::zoom_selection(self.selection, &self.store, direction);
    }

    pub fn select_item(&mut self, id: ItemId) {
        if self.store.item(id).is_none() {
            tracing::error!(id, "ignoring selection of an id missing from the store");
            return;
        }
        self.selection = selection::select_item(id);
    }

    pub fn extend_to(&mut self, id: ItemId) {
        if self.store.item(id).is_none() {
            tracing::error!(id, "ignoring extension to an id missing from the store");
            return;
        }
        self.selection = selection::extend_to(self.selection, id);
    }

    pub fn granularity(&self) -> Granularity {
        classify(&self.selection, &self.store)
    }

    pub fn selected_items(&self) -> &[TimelineItem] {
        self.selection.selected_items(&self.store)
    }

    /// Rank range of the selection, for row highlighting.
    pub fn selected_ranks(&self) -> Option<RangeInclusive<usize>> {
        self.selection.range(&self.store)
    }

    pub fn resolved_view(&self) -> (Granularity, ViewKind) {
        resolve_view(&self.selection, &self.store)
    }

    pub fn view_model(&self) -> ViewModel {
        let (_, kind) = self.resolved_view();
        build_view_model(
            kind,
            self.selected_items(),
            &self.store,
            self.reference_now,
            &self.rules,
            &self.user_name,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::fixtures::{email, meeting, note};
    use assert_matches::assert_matches;
    use time::macros::datetime;

    fn state() -> AppState {
        let store = TimelineStore::new(vec![
            email(1, datetime!(2025-07-03 09:00), "Hi", "a@example.com"),
            meeting(2, datetime!(2025-07-03 10:00), "Sync", 2),
            note(3, datetime!(2025-07-04 09:00), "Idea"),
            note(4, datetime!(2025-07-04 10:00), "Plan"),
            note(5, datetime!(2025-07-08 09:00), "Next week"),
        ])
        .expect("valid fixture");
        let config = AppConfig {
            user_name: "Ada".to_string(),
            ..AppConfig::default()
        };
        AppState::new(store, datetime!(2025-07-04 12:00), &config)
    }

    #[test]
    fn starts_idle_on_the_greeting() {
        let state = state();
        assert!(state.selection().is_empty());
        assert_eq!(state.granularity(), Granularity::Custom);
        assert_matches!(state.view_model(), ViewModel::Greeting(view) if view.greeting == "Hello, Ada!");
    }

    #[test]
    fn sidebar_toggle_leaves_selection_alone() {
        let mut state = state();
        state.select_item(2);
        state.toggle_sidebar();
        assert!(state.sidebar_open());
        assert_eq!(state.selection(), Selection::point(2));
        state.toggle_sidebar();
        assert!(!state.sidebar_open());
    }

    #[test]
    fn keyboard_walk_from_idle_to_week() {
        let mut state = state();
        state.move_selection(Direction::Forward);
        assert_eq!(state.selection(), Selection::point(3));
        state.zoom(ZoomDirection::Out);
        assert_eq!(state.granularity(), Granularity::Day);
        assert_matches!(state.view_model(), ViewModel::Day(view) if view.header == "Today");
        state.zoom(ZoomDirection::Out);
        assert_eq!(state.granularity(), Granularity::Week);
        state.move_selection(Direction::Forward);
        assert_eq!(state.selected_items().len(), 1);
        assert_eq!(state.selected_ranks(), Some(4..=4));
    }

    #[test]
    fn shift_click_extends_into_a_two_day_view() {
        let mut state = state();
        state.select_item(1);
        state.extend_to(3);
        assert_eq!(state.granularity(), Granularity::Custom);
        assert_matches!(state.view_model(), ViewModel::TwoDay(view) if view.header == "Thursday & Friday");
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut state = state();
        state.select_item(3);
        state.select_item(42);
        state.extend_to(42);
        assert_eq!(state.selection(), Selection::point(3));
    }
}
