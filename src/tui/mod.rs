//! Ratatui-based terminal form.
//!
//! The TUI renders the 26-field intake form in the original front end's four
//! sections, runs one synchronous prediction per submission, and shows the
//! outcome as a success/error-style banner.
//!
//! Artifacts are loaded once before the event loop starts. If loading fails
//! the form still renders, but submission is refused until the process is
//! restarted with valid artifacts (startup-level condition, not retried).

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Terminal,
};

use crate::app::pipeline::{Artifacts, PredictOutput};
use crate::cli::ArtifactArgs;
use crate::domain::Prediction;
use crate::error::AppError;
use crate::features::{Feature, FeatureDraft};
use crate::models::infer;
use crate::registry::Category;

/// Start the TUI.
pub fn run(args: ArtifactArgs) -> Result<(), AppError> {
    // Load before touching the terminal so a startup failure is visible as a
    // status message rather than a broken screen.
    let paths = args.paths();
    let (artifacts, startup_error) = match Artifacts::load(&paths) {
        Ok(artifacts) => (Some(artifacts), None),
        Err(err) => (None, Some(err.to_string())),
    };

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::runtime(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(artifacts, startup_error);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode()
            .map_err(|e| AppError::runtime(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::runtime(format!(
                "Failed to enter alternate screen: {e}"
            )));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// How one form field collects its value.
#[derive(Debug, Clone, Copy)]
enum FieldKind {
    /// Cycle through a category's labels; resolved to a code at submission.
    Choice(Category),
    Int { min: i64, max: i64 },
    Decimal { step: f64 },
}

/// Current value of one form field.
#[derive(Debug, Clone, Copy, PartialEq)]
enum FieldValue {
    /// Index into the category's label list.
    Choice(usize),
    Int(i64),
    Decimal(f64),
}

/// Static descriptor for one of the 26 form fields.
struct FieldSpec {
    feature: Feature,
    label: &'static str,
    section: &'static str,
    kind: FieldKind,
    default: FieldValue,
}

const PERSONAL: &str = "Personal & Demographic";
const APPLICATION: &str = "Application & Course";
const SOCIO_ECONOMIC: &str = "Socio-Economic";
const ACADEMIC: &str = "Academic Performance";

/// The form, in presentation order (sections as in the original front end).
/// Ranges and steps implement the per-field input domains; the assembler
/// does not re-check them.
const FIELDS: [FieldSpec; 26] = [
    FieldSpec {
        feature: Feature::MaritalStatus,
        label: "Marital Status",
        section: PERSONAL,
        kind: FieldKind::Choice(Category::MaritalStatus),
        default: FieldValue::Choice(0),
    },
    FieldSpec {
        feature: Feature::Gender,
        label: "Gender",
        section: PERSONAL,
        kind: FieldKind::Choice(Category::Gender),
        default: FieldValue::Choice(1),
    },
    FieldSpec {
        feature: Feature::AgeAtEnrollment,
        label: "Age at Enrollment",
        section: PERSONAL,
        kind: FieldKind::Int { min: 17, max: 80 },
        default: FieldValue::Int(20),
    },
    FieldSpec {
        feature: Feature::Displaced,
        label: "Displaced (Living away)",
        section: PERSONAL,
        kind: FieldKind::Choice(Category::YesNo),
        default: FieldValue::Choice(1),
    },
    FieldSpec {
        feature: Feature::SpecialNeeds,
        label: "Educational Special Needs",
        section: PERSONAL,
        kind: FieldKind::Choice(Category::YesNo),
        default: FieldValue::Choice(1),
    },
    FieldSpec {
        feature: Feature::Debtor,
        label: "Debtor",
        section: PERSONAL,
        kind: FieldKind::Choice(Category::YesNo),
        default: FieldValue::Choice(1),
    },
    FieldSpec {
        feature: Feature::TuitionUpToDate,
        label: "Tuition Fees Up to Date",
        section: PERSONAL,
        kind: FieldKind::Choice(Category::YesNo),
        default: FieldValue::Choice(1),
    },
    FieldSpec {
        feature: Feature::Scholarship,
        label: "Scholarship Holder",
        section: PERSONAL,
        kind: FieldKind::Choice(Category::YesNo),
        default: FieldValue::Choice(1),
    },
    FieldSpec {
        feature: Feature::ApplicationMode,
        label: "Application Mode (Code)",
        section: APPLICATION,
        kind: FieldKind::Int { min: 0, max: 9999 },
        default: FieldValue::Int(0),
    },
    FieldSpec {
        feature: Feature::ApplicationOrder,
        label: "Application Order (0-9)",
        section: APPLICATION,
        kind: FieldKind::Int { min: 0, max: 9 },
        default: FieldValue::Int(0),
    },
    FieldSpec {
        feature: Feature::Course,
        label: "Course (Code)",
        section: APPLICATION,
        kind: FieldKind::Int { min: 0, max: 9999 },
        default: FieldValue::Int(0),
    },
    FieldSpec {
        feature: Feature::Attendance,
        label: "Attendance Time",
        section: APPLICATION,
        kind: FieldKind::Choice(Category::Attendance),
        default: FieldValue::Choice(0),
    },
    FieldSpec {
        feature: Feature::PreviousQualification,
        label: "Previous Qualification (Code)",
        section: APPLICATION,
        kind: FieldKind::Int { min: 0, max: 9999 },
        default: FieldValue::Int(0),
    },
    FieldSpec {
        feature: Feature::MotherQualification,
        label: "Mother's Qualification",
        section: SOCIO_ECONOMIC,
        kind: FieldKind::Choice(Category::ParentQualification),
        default: FieldValue::Choice(0),
    },
    FieldSpec {
        feature: Feature::MotherOccupation,
        label: "Mother's Occupation",
        section: SOCIO_ECONOMIC,
        kind: FieldKind::Choice(Category::Occupation),
        default: FieldValue::Choice(0),
    },
    FieldSpec {
        feature: Feature::FatherQualification,
        label: "Father's Qualification",
        section: SOCIO_ECONOMIC,
        kind: FieldKind::Choice(Category::ParentQualification),
        default: FieldValue::Choice(0),
    },
    FieldSpec {
        feature: Feature::UnemploymentRate,
        label: "Unemployment Rate (%)",
        section: SOCIO_ECONOMIC,
        kind: FieldKind::Decimal { step: 0.1 },
        default: FieldValue::Decimal(10.0),
    },
    FieldSpec {
        feature: Feature::InflationRate,
        label: "Inflation Rate (%)",
        section: SOCIO_ECONOMIC,
        kind: FieldKind::Decimal { step: 0.1 },
        default: FieldValue::Decimal(1.0),
    },
    FieldSpec {
        feature: Feature::Gdp,
        label: "GDP",
        section: SOCIO_ECONOMIC,
        kind: FieldKind::Decimal { step: 0.1 },
        default: FieldValue::Decimal(0.0),
    },
    FieldSpec {
        feature: Feature::Units1stWithoutEvaluations,
        label: "Units 1st Sem (Without Evals)",
        section: ACADEMIC,
        kind: FieldKind::Int { min: 0, max: 99 },
        default: FieldValue::Int(0),
    },
    FieldSpec {
        feature: Feature::Units2ndCredited,
        label: "Units 2nd Sem (Credited)",
        section: ACADEMIC,
        kind: FieldKind::Int { min: 0, max: 99 },
        default: FieldValue::Int(0),
    },
    FieldSpec {
        feature: Feature::Units2ndEnrolled,
        label: "Units 2nd Sem (Enrolled)",
        section: ACADEMIC,
        kind: FieldKind::Int { min: 0, max: 99 },
        default: FieldValue::Int(0),
    },
    FieldSpec {
        feature: Feature::Units2ndEvaluations,
        label: "Units 2nd Sem (Evaluations)",
        section: ACADEMIC,
        kind: FieldKind::Int { min: 0, max: 99 },
        default: FieldValue::Int(0),
    },
    FieldSpec {
        feature: Feature::Units2ndApproved,
        label: "Units 2nd Sem (Approved)",
        section: ACADEMIC,
        kind: FieldKind::Int { min: 0, max: 99 },
        default: FieldValue::Int(0),
    },
    FieldSpec {
        feature: Feature::Units2ndGrade,
        label: "Units 2nd Sem (Grade)",
        section: ACADEMIC,
        kind: FieldKind::Decimal { step: 0.5 },
        default: FieldValue::Decimal(12.0),
    },
    FieldSpec {
        feature: Feature::Units2ndWithoutEvaluations,
        label: "Units 2nd Sem (Without Evals)",
        section: ACADEMIC,
        kind: FieldKind::Int { min: 0, max: 99 },
        default: FieldValue::Int(0),
    },
];

fn default_values() -> Vec<FieldValue> {
    FIELDS.iter().map(|spec| spec.default).collect()
}

/// Resolve one field's current value to its numeric slot value.
///
/// Choice fields go through the label -> code resolver, exactly the path a
/// submitted dropdown takes.
fn field_to_slot_value(spec: &FieldSpec, value: FieldValue) -> f64 {
    match (spec.kind, value) {
        (FieldKind::Choice(category), FieldValue::Choice(idx)) => {
            let label = category.pairs()[idx].1;
            category.resolve(label) as f64
        }
        (_, FieldValue::Int(v)) => v as f64,
        (_, FieldValue::Decimal(v)) => v,
        // Kind and value are always constructed together.
        _ => 0.0,
    }
}

/// Build the feature draft for the current form values.
fn draft_from_values(values: &[FieldValue]) -> FeatureDraft {
    let mut draft = FeatureDraft::new();
    for (spec, &value) in FIELDS.iter().zip(values) {
        draft.set(spec.feature, field_to_slot_value(spec, value));
    }
    draft
}

struct App {
    values: Vec<FieldValue>,
    selected: usize,
    /// Text buffer while a numeric field is being typed into.
    editing: Option<String>,
    status: String,
    artifacts: Option<Artifacts>,
    startup_error: Option<String>,
    result: Option<PredictOutput>,
}

impl App {
    fn new(artifacts: Option<Artifacts>, startup_error: Option<String>) -> Self {
        let status = match &startup_error {
            Some(err) => format!("Artifacts unavailable: {err}"),
            None => "Ready. Fill the form and press p to predict.".to_string(),
        };
        Self {
            values: default_values(),
            selected: 0,
            editing: None,
            status,
            artifacts,
            startup_error,
            result: None,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::runtime(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::runtime(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::runtime(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns true when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing.is_some() {
            self.handle_edit_key(code);
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Up => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected < FIELDS.len() - 1 {
                    self.selected += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::Enter => self.begin_edit(),
            KeyCode::Char('p') => self.submit(),
            _ => {}
        }

        false
    }

    fn handle_edit_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.editing = None;
                self.status = "Edit canceled.".to_string();
            }
            KeyCode::Enter => self.commit_edit(),
            KeyCode::Backspace => {
                if let Some(buffer) = &mut self.editing {
                    buffer.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(buffer) = &mut self.editing {
                    if c.is_ascii_digit() || c == '.' || c == '-' {
                        buffer.push(c);
                    }
                }
            }
            _ => {}
        }
    }

    fn begin_edit(&mut self) {
        let spec = &FIELDS[self.selected];
        match spec.kind {
            FieldKind::Choice(_) => {
                self.status = "Use Left/Right to change this field.".to_string();
            }
            FieldKind::Int { .. } | FieldKind::Decimal { .. } => {
                self.editing = Some(value_text(spec, self.values[self.selected]));
                self.status = format!(
                    "Editing {}. Enter to apply, Esc to cancel.",
                    spec.label
                );
            }
        }
    }

    fn commit_edit(&mut self) {
        let Some(buffer) = self.editing.take() else {
            return;
        };
        let spec = &FIELDS[self.selected];
        let trimmed = buffer.trim();

        match spec.kind {
            FieldKind::Int { min, max } => match trimmed.parse::<i64>() {
                Ok(v) => {
                    self.values[self.selected] = FieldValue::Int(v.clamp(min, max));
                    self.status = format!("{} set.", spec.label);
                }
                Err(e) => {
                    self.status = format!("Invalid integer '{trimmed}': {e}");
                }
            },
            FieldKind::Decimal { .. } => match trimmed.parse::<f64>() {
                Ok(v) if v.is_finite() => {
                    self.values[self.selected] = FieldValue::Decimal(v);
                    self.status = format!("{} set.", spec.label);
                }
                _ => {
                    self.status = format!("Invalid number '{trimmed}'.");
                }
            },
            FieldKind::Choice(_) => {}
        }
    }

    fn adjust_field(&mut self, delta: i64) {
        let spec = &FIELDS[self.selected];
        let value = self.values[self.selected];
        self.values[self.selected] = match (spec.kind, value) {
            (FieldKind::Choice(category), FieldValue::Choice(idx)) => {
                let len = category.pairs().len() as i64;
                let next = (idx as i64 + delta).rem_euclid(len);
                FieldValue::Choice(next as usize)
            }
            (FieldKind::Int { min, max }, FieldValue::Int(v)) => {
                FieldValue::Int((v + delta).clamp(min, max))
            }
            (FieldKind::Decimal { step }, FieldValue::Decimal(v)) => {
                FieldValue::Decimal(v + delta as f64 * step)
            }
            (_, v) => v,
        };
    }

    fn submit(&mut self) {
        let Some(artifacts) = &self.artifacts else {
            let reason = self
                .startup_error
                .clone()
                .unwrap_or_else(|| "artifacts not loaded".to_string());
            self.status = format!("Prediction disabled: {reason}");
            return;
        };

        let draft = draft_from_values(&self.values);
        let outcome = draft
            .assemble()
            .and_then(|vector| {
                infer(&vector, &artifacts.scaler, &artifacts.model)
                    .map(|prediction| PredictOutput { vector, prediction })
            });

        match outcome {
            Ok(output) => {
                self.status = format!("Prediction: {}", output.prediction.display_name());
                self.result = Some(output);
            }
            Err(err) => {
                // Per-submission failure: report and stay usable.
                self.status = format!("Prediction failed: {err}");
            }
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("gradcast", Style::default().fg(Color::Cyan)),
            Span::raw(" — student outcome prediction"),
        ]));

        let readiness = if self.startup_error.is_some() {
            Span::styled("artifacts: missing (inference disabled)", Style::default().fg(Color::Red))
        } else {
            Span::styled("artifacts: loaded", Style::default().fg(Color::Green))
        };
        lines.push(Line::from(readiness));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
            .split(area);

        self.draw_form(frame, chunks[0]);
        self.draw_result(frame, chunks[1]);
    }

    fn draw_form(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut items: Vec<ListItem> = Vec::new();
        let mut selected_item = 0;
        let mut current_section = "";

        for (idx, (spec, &value)) in FIELDS.iter().zip(&self.values).enumerate() {
            if spec.section != current_section {
                current_section = spec.section;
                items.push(ListItem::new(Line::from(Span::styled(
                    format!("— {current_section} —"),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ))));
            }

            let shown = if idx == self.selected {
                match &self.editing {
                    Some(buffer) => format!("{}▏", buffer),
                    None => value_text(spec, value),
                }
            } else {
                value_text(spec, value)
            };

            if idx == self.selected {
                selected_item = items.len();
            }
            items.push(ListItem::new(format!("  {}: {shown}", spec.label)));
        }

        let list = List::new(items)
            .block(Block::default().title("Student Form").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(selected_item));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_result(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Result").borders(Borders::ALL);

        let mut lines: Vec<Line> = Vec::new();
        if let Some(err) = &self.startup_error {
            lines.push(Line::from(Span::styled(
                "Inference disabled.",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(err.clone()));
        } else if let Some(output) = &self.result {
            let (text, color) = match output.prediction {
                Prediction::Graduate => ("Prediction: GRADUATE", Color::Green),
                Prediction::Dropout => ("Prediction: DROPOUT", Color::Red),
            };
            lines.push(Line::from(Span::styled(
                text,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(format!(
                "age={} grade={:.2} units approved={}",
                output.vector.get(Feature::AgeAtEnrollment),
                output.vector.get(Feature::Units2ndGrade),
                output.vector.get(Feature::Units2ndApproved),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Fill the form and press p to predict.",
                Style::default().fg(Color::Yellow),
            )));
        }

        let p = Paragraph::new(Text::from(lines))
            .block(block)
            .wrap(ratatui::widgets::Wrap { trim: true });
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  Enter edit number  p predict  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Display text for one field's current value.
fn value_text(spec: &FieldSpec, value: FieldValue) -> String {
    match (spec.kind, value) {
        (FieldKind::Choice(category), FieldValue::Choice(idx)) => {
            category.pairs()[idx].1.to_string()
        }
        (FieldKind::Decimal { .. }, FieldValue::Decimal(v)) => format!("{v:.2}"),
        (_, FieldValue::Int(v)) => v.to_string(),
        (_, FieldValue::Decimal(v)) => format!("{v:.2}"),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StudentRecord;
    use crate::features::assemble_record;

    #[test]
    fn form_covers_every_feature_exactly_once() {
        for feature in Feature::ALL {
            let count = FIELDS.iter().filter(|s| s.feature == feature).count();
            assert_eq!(count, 1, "feature {feature:?} appears {count} times");
        }
    }

    #[test]
    fn default_form_matches_default_record_vector() {
        let from_form = draft_from_values(&default_values()).assemble().unwrap();
        let from_record = assemble_record(&StudentRecord::default()).unwrap();
        assert_eq!(from_form, from_record);
    }

    #[test]
    fn choice_fields_resolve_through_their_category() {
        // Marital status is the first field; its last label is code 6.
        let mut values = default_values();
        values[0] = FieldValue::Choice(Category::MaritalStatus.pairs().len() - 1);
        let vector = draft_from_values(&values).assemble().unwrap();
        assert_eq!(vector.get(Feature::MaritalStatus), 6.0);
    }

    #[test]
    fn adjust_wraps_choices_and_clamps_ints() {
        let mut app = App::new(None, None);

        // Field 0 is marital status (6 labels): stepping left from index 0
        // wraps to the last label.
        app.selected = 0;
        app.adjust_field(-1);
        assert_eq!(
            app.values[0],
            FieldValue::Choice(Category::MaritalStatus.pairs().len() - 1)
        );

        // Field 2 is age (17-80): stepping below the minimum clamps.
        app.selected = 2;
        app.values[2] = FieldValue::Int(17);
        app.adjust_field(-1);
        assert_eq!(app.values[2], FieldValue::Int(17));
    }

    #[test]
    fn submit_without_artifacts_is_refused() {
        let mut app = App::new(None, Some("scaler missing".to_string()));
        app.submit();
        assert!(app.result.is_none());
        assert!(app.status.contains("disabled"));
    }
}
