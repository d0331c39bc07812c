use std::io::Stdout;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, KeyEventKind, KeyModifiers,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::widgets::ListState;
use ratatui::Terminal;

use crate::ui::{self, AppLayout, SidebarModel};

mod actions;
pub mod state;

pub use actions::Action;
pub use state::AppState;

pub struct App {
    state: AppState,
    sidebar: SidebarModel,
    list_state: ListState,
    layout: AppLayout,
    should_quit: bool,
    scrolled_to_now: bool,
    poll_interval: Duration,
}

impl App {
    pub fn new(state: AppState) -> Self {
        let sidebar = ui::build_sidebar(state.store(), state.reference_now());
        tracing::info!(
            items = state.store().len(),
            rows = sidebar.rows().len(),
            reference = %state.reference_now(),
            "starting timeline"
        );
        Self {
            state,
            sidebar,
            list_state: ListState::default(),
            layout: AppLayout::default(),
            should_quit: false,
            scrolled_to_now: false,
            poll_interval: Duration::from_millis(250),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn run(&mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;
        let result = self.event_loop(&mut terminal);
        restore_terminal(&mut terminal)?;
        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            terminal
                .draw(|frame| {
                    self.sync_list_state(frame.size().height);
                    self.layout =
                        ui::draw_app(frame, &self.state, &self.sidebar, &mut self.list_state);
                })
                .context("rendering frame")?;

            if self.should_quit {
                break;
            }

            if event::poll(self.poll_interval).context("polling for terminal events")? {
                match event::read().context("reading terminal event")? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    // next draw adapts to the new size
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }
        Ok(())
    }

    /// Keeps the focus row visible, or centres "Now" on the first frame
    /// when nothing is selected.
    fn sync_list_state(&mut self, height: u16) {
        let focus_slot = self
            .state
            .selection()
            .focus
            .and_then(|id| self.sidebar.slot_of(id));
        // `select(None)` also rewinds the offset to the top.
        if self.list_state.selected() != focus_slot {
            self.list_state.select(focus_slot);
        }
        if focus_slot.is_none() && !self.scrolled_to_now {
            if let Some(now) = self.sidebar.now_slot() {
                let half = usize::from(height.saturating_sub(2) / 2);
                *self.list_state.offset_mut() = now.saturating_sub(half);
            }
            self.scrolled_to_now = true;
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if let Some(action) = Action::from_key(key) {
            self.handle_action(action);
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ToggleSidebar => self.state.toggle_sidebar(),
            Action::Move(direction) => self.state.move_selection(direction),
            Action::Zoom(direction) => self.state.zoom(direction),
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let Some(list_area) = self.layout.sidebar_list else {
            return;
        };
        let Some(id) = self.sidebar.item_at(
            list_area,
            self.list_state.offset(),
            mouse.column,
            mouse.row,
        ) else {
            return;
        };
        if mouse.modifiers.contains(KeyModifiers::SHIFT) {
            self.state.extend_to(id);
        } else {
            self.state.select_item(id);
        }
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("switching to alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("creating terminal backend")?;
    terminal.hide_cursor().context("hiding cursor")?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    terminal.show_cursor().ok();
    disable_raw_mode().context("disabling raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("restoring screen state")?;
    Ok(())
}
