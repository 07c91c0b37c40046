//! Observation input form.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use zeroize::Zeroize;

use crate::domain::{PatientObservation, YesNo, INPUT_BOUNDS};
use crate::tui::styles::Theme;

/// Editable content of a form field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldInput {
    /// Free-text number checked against inclusive bounds
    Number {
        value: String,
        min: f64,
        max: f64,
        integer: bool,
    },
    /// Two-valued selector
    Choice(YesNo),
}

/// Form field definition
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub input: FieldInput,
}

impl FormField {
    fn number(label: &'static str, min: f64, max: f64, default: f64, integer: bool) -> Self {
        let value = if integer {
            format!("{default:.0}")
        } else {
            format!("{default:.1}")
        };
        Self {
            label,
            input: FieldInput::Number {
                value,
                min,
                max,
                integer,
            },
        }
    }

    fn choice(label: &'static str, default: YesNo) -> Self {
        Self {
            label,
            input: FieldInput::Choice(default),
        }
    }

    fn hint(&self) -> String {
        match &self.input {
            FieldInput::Number { min, max, .. } => format!("{min}-{max}"),
            FieldInput::Choice(_) => "Yes / No".to_string(),
        }
    }

    fn parse_number(&self) -> Result<f64, String> {
        let FieldInput::Number {
            value,
            min,
            max,
            integer,
        } = &self.input
        else {
            return Err(format!("{}: not a numeric field", self.label));
        };

        let parsed: f64 = value
            .trim()
            .parse()
            .map_err(|_| format!("{}: Invalid number", self.label))?;
        if !parsed.is_finite() {
            return Err(format!("{}: Invalid number", self.label));
        }
        if *integer && parsed.fract() != 0.0 {
            return Err(format!("{}: Must be a whole number", self.label));
        }
        if parsed < *min || parsed > *max {
            return Err(format!(
                "{}: Value must be between {} and {}",
                self.label, min, max
            ));
        }
        Ok(parsed)
    }

    fn choice_value(&self) -> Result<YesNo, String> {
        match self.input {
            FieldInput::Choice(v) => Ok(v),
            FieldInput::Number { .. } => Err(format!("{}: not a yes/no field", self.label)),
        }
    }
}

/// Form state
pub struct FormState {
    pub fields: Vec<FormField>,
    pub selected_field: usize,
    pub error_message: Option<String>,
}

impl Default for FormState {
    fn default() -> Self {
        let defaults = PatientObservation::default();
        let numbers = defaults.numeric_inputs();

        let mut fields: Vec<FormField> = INPUT_BOUNDS
            .iter()
            .zip(numbers)
            .enumerate()
            .map(|(i, (&(label, min, max), default))| {
                // Only BMI and the standard deviation take decimals.
                let integer = !matches!(i, 4 | 6);
                FormField::number(label, min, max, default, integer)
            })
            .collect();

        fields.extend([
            FormField::choice("Hypertension", defaults.hypertension),
            FormField::choice("Diabetes", defaults.diabetes),
            FormField::choice("Cerebral Infarction", defaults.cerebral_infarction),
            FormField::choice("Cerebrovascular Disease", defaults.cerebrovascular_disease),
        ]);

        Self {
            fields,
            selected_field: 0,
            error_message: None,
        }
    }
}

impl FormState {
    /// Move to the next field
    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.fields.len();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Add a character to the current numeric field
    pub fn input_char(&mut self, c: char) {
        if let FieldInput::Number { value, .. } = &mut self.fields[self.selected_field].input {
            if c.is_ascii_digit() || c == '.' {
                value.push(c);
                self.error_message = None;
            }
        }
    }

    /// Delete the last character
    pub fn delete_char(&mut self) {
        if let FieldInput::Number { value, .. } = &mut self.fields[self.selected_field].input {
            value.pop();
        }
    }

    /// Clear the current field
    pub fn clear_field(&mut self) {
        if let FieldInput::Number { value, .. } = &mut self.fields[self.selected_field].input {
            value.clear();
        }
    }

    /// Flip the current yes/no field
    pub fn toggle_choice(&mut self) {
        if let FieldInput::Choice(v) = &mut self.fields[self.selected_field].input {
            *v = v.toggled();
            self.error_message = None;
        }
    }

    /// Whether the selected field is a yes/no selector.
    #[must_use]
    pub fn selected_is_choice(&self) -> bool {
        matches!(
            self.fields[self.selected_field].input,
            FieldInput::Choice(_)
        )
    }

    /// Wipe numeric buffers and restore the default values.
    ///
    /// Called after a submission so typed readings do not linger in UI state.
    pub fn clear_sensitive(&mut self) {
        for field in self.fields.iter_mut() {
            if let FieldInput::Number { value, .. } = &mut field.input {
                value.zeroize();
            }
        }
        *self = Self::default();
    }

    /// Validate and convert to a PatientObservation
    pub fn to_observation(&self) -> Result<PatientObservation, String> {
        let mut numbers = [0.0_f64; 10];
        for (slot, field) in numbers.iter_mut().zip(&self.fields[..10]) {
            *slot = field.parse_number()?;
        }

        let [age, height, weight, heart_rate, bmi, bp_mean, bp_std, bp_max, bp_min, bp_median] =
            numbers;
        let choices = &self.fields[10..];

        Ok(PatientObservation {
            // Bounded to 0..=120 and integral by parse_number.
            age: age as u32,
            height,
            weight,
            heart_rate,
            bmi,
            bp_mean,
            bp_std,
            bp_max,
            bp_min,
            bp_median,
            hypertension: choices[0].choice_value()?,
            diabetes: choices[1].choice_value()?,
            cerebral_infarction: choices[2].choice_value()?,
            cerebrovascular_disease: choices[3].choice_value()?,
        })
    }
}

/// Render the observation input form
pub fn render_form(f: &mut Frame, area: Rect, state: &FormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(3), // Footer/error
        ])
        .split(area);

    render_form_header(f, chunks[0]);
    render_form_fields(f, chunks[1], state);
    render_form_footer(f, chunks[2], state);
}

fn render_form_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", Theme::text()),
        Span::styled("Blood Pressure Prediction System", Theme::title()),
        Span::styled(
            " │ Enter the details to predict systolic and diastolic pressure",
            Theme::text_secondary(),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Theme::border()),
    );

    f.render_widget(header, area);
}

fn render_form_fields(f: &mut Frame, area: Rect, state: &FormState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let mid = (state.fields.len() + 1) / 2;
    render_field_column(f, columns[0], &state.fields[..mid], 0, state.selected_field);
    render_field_column(
        f,
        columns[1],
        &state.fields[mid..],
        mid,
        state.selected_field,
    );
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    fields: &[FormField],
    offset: usize,
    selected: usize,
) {
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(3))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        let is_selected = offset + i == selected;
        let (border_style, title_style) = if is_selected {
            (Theme::border_focused(), Theme::focused())
        } else {
            (Theme::border(), Theme::text_secondary())
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", field.label), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let value_display = match &field.input {
            FieldInput::Number { value, .. } if value.is_empty() => {
                Span::styled(field.hint(), Theme::text_muted())
            }
            FieldInput::Number { value, .. } => Span::styled(value.as_str(), Theme::text()),
            FieldInput::Choice(v) => Span::styled(
                format!("◀ {v} ▶"),
                if is_selected {
                    Theme::focused()
                } else {
                    Theme::text()
                },
            ),
        };

        let cursor = match (&field.input, is_selected) {
            (FieldInput::Number { .. }, true) => Span::styled("▌", Theme::cursor()),
            _ => Span::raw(""),
        };

        let content = Paragraph::new(Line::from(vec![Span::raw(" "), value_display, cursor]))
            .block(block);

        f.render_widget(content, chunks[i]);
    }
}

fn render_form_footer(f: &mut Frame, area: Rect, state: &FormState) {
    let content = if let Some(err) = &state.error_message {
        Line::from(vec![
            Span::styled("! ", Theme::danger()),
            Span::styled(err.clone(), Theme::danger()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[↑↓] ", Theme::key_hint()),
            Span::styled("Navigate ", Theme::key_desc()),
            Span::styled("[Space] ", Theme::key_hint()),
            Span::styled("Yes/No ", Theme::key_desc()),
            Span::styled("[Enter] ", Theme::key_hint()),
            Span::styled("Predict Blood Pressure ", Theme::key_desc()),
            Span::styled("[D] ", Theme::key_hint()),
            Span::styled("Defaults ", Theme::key_desc()),
            Span::styled("[Esc] ", Theme::key_hint()),
            Span::styled("Quit", Theme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Theme::border()),
    );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select(state: &mut FormState, label: &str) {
        state.selected_field = state
            .fields
            .iter()
            .position(|f| f.label == label)
            .expect("known label");
    }

    fn set_value(state: &mut FormState, label: &str, text: &str) {
        select(state, label);
        state.clear_field();
        for c in text.chars() {
            state.input_char(c);
        }
    }

    #[test]
    fn test_defaults_match_observation_defaults() {
        let state = FormState::default();
        assert_eq!(state.fields.len(), 14);
        assert_eq!(
            state.to_observation().expect("defaults are valid"),
            PatientObservation::default()
        );
    }

    #[test]
    fn test_toggle_only_affects_choice_fields() {
        let mut state = FormState::default();
        select(&mut state, "Diabetes");
        assert!(state.selected_is_choice());
        state.toggle_choice();
        state.input_char('7');

        let obs = state.to_observation().expect("valid");
        assert_eq!(obs.diabetes, YesNo::No);
        assert_eq!(obs.hypertension, YesNo::Yes);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut state = FormState::default();
        set_value(&mut state, "Max Blood Pressure", "95");
        let err = state.to_observation().expect_err("below min");
        assert!(err.starts_with("Max Blood Pressure"));
    }

    #[test]
    fn test_age_must_be_whole() {
        let mut state = FormState::default();
        set_value(&mut state, "Age (years)", "30.5");
        assert!(state.to_observation().is_err());

        set_value(&mut state, "Age (years)", "0");
        assert_eq!(state.to_observation().expect("zero age").age, 0);
    }

    #[test]
    fn test_whole_number_fields_reject_fractions() {
        for label in [
            "Height (cm)",
            "Weight (kg)",
            "Heart Rate (b/m)",
            "Mean Blood Pressure",
            "Max Blood Pressure",
            "Min Blood Pressure",
            "Median Blood Pressure",
        ] {
            let mut state = FormState::default();
            set_value(&mut state, label, "90.5");
            assert_eq!(
                state.to_observation().expect_err("fraction"),
                format!("{label}: Must be a whole number")
            );
        }
    }

    #[test]
    fn test_whole_number_defaults_have_no_decimals() {
        let state = FormState::default();
        assert_number_text(&state, "Height (cm)", "170");
        assert_number_text(&state, "BMI (kg/m^2)", "24.0");
    }

    fn assert_number_text(state: &FormState, label: &str, expected: &str) {
        let field = state
            .fields
            .iter()
            .find(|f| f.label == label)
            .expect("known label");
        match &field.input {
            FieldInput::Number { value, .. } => assert_eq!(value, expected),
            FieldInput::Choice(_) => panic!("{label} is not numeric"),
        }
    }

    #[test]
    fn test_decimal_fields_accept_fractions() {
        let mut state = FormState::default();
        set_value(&mut state, "BMI (kg/m^2)", "27.35");
        set_value(&mut state, "Blood Pressure Standard Deviation", "12.5");
        let obs = state.to_observation().expect("valid");
        assert_eq!(obs.bmi, 27.35);
        assert_eq!(obs.bp_std, 12.5);
    }

    #[test]
    fn test_empty_field_is_invalid_number() {
        let mut state = FormState::default();
        set_value(&mut state, "Weight (kg)", "");
        assert_eq!(
            state.to_observation().expect_err("empty"),
            "Weight (kg): Invalid number"
        );
    }

    #[test]
    fn test_clear_sensitive_restores_defaults() {
        let mut state = FormState::default();
        set_value(&mut state, "Height (cm)", "181");
        state.error_message = Some("x".into());
        state.clear_sensitive();

        assert_eq!(state.selected_field, 0);
        assert!(state.error_message.is_none());
        assert_eq!(
            state.to_observation().expect("defaults"),
            PatientObservation::default()
        );
    }
}
