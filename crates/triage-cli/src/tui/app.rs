//! Main TUI application

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use tui_input::backend::crossterm::EventHandler;

use triage_classifier::PriorityClassifier;
use triage_db::service::TaskStore;

use super::state::{AppState, ClassifierMode, EditField, Focus};
use super::styles::Theme;
use super::view;

pub struct App {
    state: AppState,
    store: TaskStore,
    classifier: PriorityClassifier,
    theme: Theme,
    should_quit: bool,
}

impl App {
    /// Build the app and load the initial task list.
    pub async fn new(
        store: TaskStore,
        classifier: PriorityClassifier,
        mode: ClassifierMode,
    ) -> Self {
        let mut state = AppState::new(mode);
        state.refresh(&store).await;
        Self {
            state,
            store,
            classifier,
            theme: Theme::default(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        terminal.clear()?;
        terminal.draw(|f| self.render(f))?;

        loop {
            if event::poll(Duration::from_millis(50))?
                && let Event::Key(key) = event::read()?
            {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                self.handle_key(key).await;
                if self.should_quit {
                    break;
                }
                terminal.draw(|f| self.render(f))?;
            }
        }

        Ok(())
    }

    fn render(&self, frame: &mut Frame) {
        view::render(frame, &self.state, &self.theme);
    }

    pub async fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.state.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?' | 'q')) {
                self.state.show_help = false;
            }
            return;
        }

        if self.state.editing.is_some() {
            self.handle_edit_key(key).await;
            return;
        }

        match self.state.focus {
            Focus::Description => self.handle_description_key(key).await,
            Focus::Priority => self.handle_priority_key(key).await,
            Focus::List => self.handle_list_key(key).await,
        }
    }

    async fn handle_description_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.state.suggest(&self.classifier).await,
            KeyCode::Tab => self.state.focus = Focus::Priority,
            KeyCode::Esc => self.state.focus = Focus::List,
            _ => {
                let before = self.state.form.input.value().to_string();
                self.state.form.input.handle_event(&Event::Key(key));
                if self.state.form.input.value() != before {
                    self.state.form.description_changed();
                }
            }
        }
    }

    async fn handle_priority_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.state.add_task(&self.store, &self.classifier).await,
            KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right => {
                self.state.form.cycle_priority();
            }
            KeyCode::Tab | KeyCode::Esc => self.state.focus = Focus::List,
            KeyCode::BackTab => self.state.focus = Focus::Description,
            _ => {}
        }
    }

    async fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.state.show_help = true,
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char(' ' | 's') => self.state.toggle_selected_status(&self.store).await,
            KeyCode::Char('p') => self.state.toggle_selected_priority(&self.store).await,
            KeyCode::Char('e') | KeyCode::Enter => self.state.begin_edit(),
            KeyCode::Char('d') | KeyCode::Delete => self.state.delete_selected(&self.store).await,
            KeyCode::Char('r') => self.state.refresh(&self.store).await,
            KeyCode::Char('n' | 'a') | KeyCode::Tab => self.state.focus = Focus::Description,
            _ => {}
        }
    }

    async fn handle_edit_key(&mut self, key: KeyEvent) {
        let Some(edit) = self.state.editing.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.state.cancel_edit(),
            KeyCode::Enter => self.state.save_edit(&self.store).await,
            KeyCode::Tab => edit.field = edit.field.next(),
            _ => match edit.field {
                EditField::Description => {
                    edit.input.handle_event(&Event::Key(key));
                    edit.error = None;
                }
                EditField::Priority => {
                    if matches!(key.code, KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right) {
                        edit.priority = edit.priority.toggled();
                    }
                }
                EditField::Status => {
                    if matches!(key.code, KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right) {
                        edit.status = edit.status.toggled();
                    }
                }
            },
        }
    }
}
