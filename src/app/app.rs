use std::io::{self, Stdout};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::warn;
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    widgets::TableState,
};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

use crate::app::{Portfolio, ui};

#[derive(Clone, Copy, Debug, Default, Display, EnumIter, Eq, PartialEq)]
pub enum Tab {
    #[default]
    Dashboard,
    Assets,
    Transactions,
    #[strum(to_string = "Business Insights")]
    Insights,
}

impl Tab {
    pub fn index(&self) -> usize {
        Tab::iter().position(|tab| tab == *self).unwrap_or(0)
    }

    fn from_index(i: usize) -> Option<Tab> {
        Tab::iter().nth(i)
    }

    fn next(&self) -> Tab {
        Tab::from_index((self.index() + 1) % Tab::iter().len()).unwrap_or_default()
    }

    fn previous(&self) -> Tab {
        let len = Tab::iter().len();
        Tab::from_index((self.index() + len - 1) % len).unwrap_or_default()
    }
}

pub struct App {
    portfolio: Portfolio,
    tab: Tab,
    table_state: TableState,
    popup_message: Option<String>,
    error_popup: Option<String>,
}

impl App {
    pub fn new(portfolio: Portfolio) -> Self {
        Self {
            portfolio,
            tab: Tab::default(),
            table_state: TableState::default(),
            popup_message: None,
            error_popup: None,
        }
    }

    /// Runs the dashboard on the alternate screen. The terminal is restored
    /// even when the event loop fails.
    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = enter_terminal()?;
        let result = self.run_app(&mut terminal).await;
        leave_terminal(&mut terminal)?;
        result
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        terminal.draw(|frame| {
            ui::render(
                frame,
                &self.portfolio,
                self.tab,
                &mut self.table_state,
                &self.popup_message,
                &self.error_popup,
            )
        })?;
        Ok(())
    }

    async fn refresh<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.popup_message = Some("Loading portfolio...".to_string());
        self.draw(terminal)?;

        self.portfolio.refresh().await;

        self.popup_message = None;
        self.clamp_selection();
        Ok(())
    }

    async fn run_app<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.refresh(terminal).await?;

        loop {
            self.draw(terminal)?;

            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                if self.error_popup.is_some() {
                    if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                        self.error_popup = None;
                    }
                    continue;
                }

                match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Esc => self.table_state.select(None),
                    KeyCode::Tab | KeyCode::Right => self.switch_tab(self.tab.next()),
                    KeyCode::BackTab | KeyCode::Left => self.switch_tab(self.tab.previous()),
                    KeyCode::Char(c @ '1'..='4') => {
                        let i = c as usize - '1' as usize;
                        if let Some(tab) = Tab::from_index(i) {
                            self.switch_tab(tab);
                        }
                    }
                    KeyCode::Char('r') | KeyCode::F(5) => self.refresh(terminal).await?,
                    KeyCode::Char('d') | KeyCode::Delete if self.tab == Tab::Transactions => {
                        self.delete_selected_transaction(terminal).await?;
                    }
                    KeyCode::Down => self.select_next(),
                    KeyCode::Up => self.select_previous(),
                    _ => {}
                }
            }
        }
    }

    async fn delete_selected_transaction<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<()> {
        let Some(id) = self
            .table_state
            .selected()
            .and_then(|i| self.portfolio.transactions().get(i))
            .map(|transaction| *transaction.id())
        else {
            return Ok(());
        };

        self.popup_message = Some(format!("Deleting transaction {}...", id));
        self.draw(terminal)?;

        let deleted = self.portfolio.delete_transaction(id).await;

        self.popup_message = None;
        if deleted {
            self.clamp_selection();
        } else {
            warn!("Transaction {} could not be deleted", id);
            self.error_popup =
                Some("Failed to delete transaction. Ensure the ID is correct.".to_string());
        }
        Ok(())
    }

    fn switch_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.table_state.select(None);
    }

    fn row_count(&self) -> usize {
        match self.tab {
            Tab::Dashboard => self.portfolio.holdings().len(),
            Tab::Assets => self.portfolio.assets().len(),
            Tab::Transactions => self.portfolio.transactions().len(),
            Tab::Insights => 0,
        }
    }

    fn clamp_selection(&mut self) {
        let rows = self.row_count();
        if let Some(i) = self.table_state.selected() {
            if rows == 0 {
                self.table_state.select(None);
            } else if i >= rows {
                self.table_state.select(Some(rows - 1));
            }
        }
    }

    fn select_next(&mut self) {
        let rows = self.row_count();
        if rows == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i >= rows - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    fn select_previous(&mut self) {
        let rows = self.row_count();
        if rows == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(0) | None => rows - 1,
            Some(i) => i - 1,
        };
        self.table_state.select(Some(i));
    }
}

fn enter_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn leave_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
