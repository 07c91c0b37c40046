//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation between the form and the result
//! - Input event handling
//! - Prediction and chart export on submit

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::chart::SvgBarChart;
use crate::adapters::linear::LinearPipelineModel;
use crate::application::PredictionService;
use crate::config::AppConfig;
use crate::ports::ChartRenderer;

use super::ui::{
    form::{render_form, FormState},
    render_disclaimer,
    result::{render_result, ResultState},
};

/// Current screen/view in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Form,
    Result,
}

/// Main application state
pub struct App {
    /// Current screen
    screen: Screen,

    /// Whether the app should quit
    should_quit: bool,

    /// Prediction service over the loaded models
    service: PredictionService<LinearPipelineModel>,

    /// Chart exporter; `None` when export is disabled
    chart: Option<SvgBarChart>,

    /// Observation form state
    form_state: FormState,

    /// Result screen state
    result_state: ResultState,
}

impl App {
    /// Create a new application, loading both models named by `config`.
    ///
    /// For more control, use `with_dependencies()`.
    ///
    /// # Errors
    /// Returns error if either model cannot be loaded or verified.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let models = crate::load_model_pair(config).with_context(|| {
            format!(
                "Failed to load models from {:?}. Set BPSENSE_MODEL_DIR to a directory containing {} and {}.",
                config.model_dir, config.systolic_model, config.diastolic_model
            )
        })?;

        let service = PredictionService::new(models);
        let chart = config.chart_path.clone().map(SvgBarChart::new);

        Ok(Self::with_dependencies(service, chart))
    }

    /// Create application with injected dependencies (Composition Root pattern).
    ///
    /// # Arguments
    /// * `service` - Prediction service over already loaded models
    /// * `chart` - Chart exporter, or `None` to skip export
    #[must_use]
    pub fn with_dependencies(
        service: PredictionService<LinearPipelineModel>,
        chart: Option<SvgBarChart>,
    ) -> Self {
        Self {
            screen: Screen::Form,
            should_quit: false,
            service,
            chart,
            form_state: FormState::default(),
            result_state: ResultState::default(),
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(f.area());

                match self.screen {
                    Screen::Form => render_form(f, chunks[0], &self.form_state),
                    Screen::Result => render_result(f, chunks[0], &self.result_state),
                }

                render_disclaimer(f, chunks[1]);
            })?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key.code, key.modifiers);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Form => self.handle_form_key(key),
            Screen::Result => self.handle_result_key(key),
        }
    }

    fn handle_form_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up | KeyCode::BackTab => {
                self.form_state.prev_field();
            }
            KeyCode::Down | KeyCode::Tab => {
                self.form_state.next_field();
            }
            KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right => {
                self.form_state.toggle_choice();
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                self.form_state.clear_sensitive();
            }
            KeyCode::Char(c) => {
                self.form_state.input_char(c);
            }
            KeyCode::Backspace => {
                self.form_state.delete_char();
            }
            KeyCode::Delete => {
                self.form_state.clear_field();
            }
            KeyCode::Enter => {
                self.submit_form();
            }
            _ => {}
        }
    }

    fn handle_result_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.screen = Screen::Form;
            }
            KeyCode::Esc => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn submit_form(&mut self) {
        let observation = match self.form_state.to_observation() {
            Ok(observation) => observation,
            Err(e) => {
                self.form_state.error_message = Some(e);
                return;
            }
        };

        self.result_state = match self.service.predict(&observation) {
            Ok(prediction) => {
                let (chart_path, chart_error) = match &self.chart {
                    Some(chart) => match chart.render(&prediction) {
                        Ok(path) => (Some(path), None),
                        Err(e) => {
                            tracing::warn!("Chart export failed: {}", e);
                            (None, Some(e.to_string()))
                        }
                    },
                    None => (None, None),
                };
                ResultState::Ready {
                    prediction,
                    chart_path,
                    chart_error,
                }
            }
            Err(e) => {
                tracing::error!("Prediction failed: {}", e);
                ResultState::Error {
                    message: e.to_string(),
                }
            }
        };
        self.screen = Screen::Result;

        // Clear typed readings from the UI immediately.
        self.form_state.clear_sensitive();
    }
}
