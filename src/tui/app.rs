use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, MouseEvent};
use ratatui::layout::{Alignment, Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::{Frame, Terminal};
use serde_json::{Value, json};

use crate::config::PopupConfig;
use crate::host::{ChartGesture, ChartHost, HostContext, HostEvent, PointerRoute, SeriesRef};
use crate::popup::{FieldRecord, FormOptions, SubmitCallback};

use super::action::Action;
use super::error::AppError;
use super::widgets::{StatusBarContext, draw_popup, draw_status_bar};

/// Top-level application state: a placeholder chart that opens popups.
pub struct App {
    host: ChartHost,
    /// Filled by submit callbacks, drained after every event.
    submissions: Rc<RefCell<Vec<FieldRecord>>>,
    last_submission: Option<FieldRecord>,
    /// Form type of the last show request.
    active_form: Option<String>,
    should_quit: bool,
}

impl App {
    pub fn new(config: PopupConfig, context: HostContext) -> Self {
        Self {
            host: ChartHost::new(config, context),
            submissions: Rc::new(RefCell::new(Vec::new())),
            last_submission: None,
            active_form: None,
            should_quit: false,
        }
    }

    /// A price series for two tickers plus a volume series.
    pub fn demo_context() -> HostContext {
        HostContext::new(vec![
            SeriesRef::new("aapl", "AAPL"),
            SeriesRef::new("msft", "MSFT"),
            SeriesRef::volume("aapl-volume", "AAPL Volume"),
        ])
    }

    /// Main event loop: draw → read events → dispatch → end the turn.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            self.handle_event(event::read()?);
            // Everything already queued belongs to the same turn.
            while event::poll(Duration::ZERO)? {
                self.handle_event(event::read()?);
            }
            self.host.tick();
        }
        Ok(())
    }

    /// Renders the chart placeholder, the popup overlay and the status bar.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn draw(&mut self, frame: &mut Frame) {
        let [chart_area, status_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

        let block = Block::default()
            .title(" chartpop ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let mut lines = vec![Line::from("")];
        lines.extend(
            self.host
                .context()
                .series
                .iter()
                .map(|series| Line::from(format!("~ {} ~", series.name))),
        );
        let chart = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(chart, chart_area);

        if let Some(popup) = self.host.popup_mut() {
            let layout = draw_popup(popup, frame, chart_area);
            popup.set_layout(layout);
        }

        draw_status_bar(&self.status_context(), frame, status_area);
    }

    /// Handles one terminal event, then routes whatever it produced.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse);
            }
            _ => {}
        }
    }

    /// Handles a key event: popup keys while it is shown, chart keys otherwise.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let action = if self.host.popup_visible() {
            self.popup_key(key)
        } else {
            self.chart_key(key)
        };
        self.apply(action);
        self.drain_submissions();
    }

    /// Passes a mouse event to the chart host.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> PointerRoute {
        let route = self.host.handle_mouse(mouse);
        self.drain_submissions();
        for gesture in self.host.take_gestures() {
            if let ChartGesture::Click(position) = gesture {
                tracing::debug!(x = position.x, y = position.y, "chart clicked");
                let action = self.show("flag");
                self.apply(action);
            }
        }
        route
    }

    fn chart_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('i') => self.show("indicators"),
            KeyCode::Char('e') => self.show("annotation-edit"),
            KeyCode::Char('t') => self.show("annotation-toolbar"),
            KeyCode::Char('f') => self.show("flag"),
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            _ => Action::None,
        }
    }

    fn popup_key(&mut self, key: KeyEvent) -> Action {
        let Some(popup) = self.host.popup_mut() else {
            return Action::None;
        };
        match key.code {
            KeyCode::Esc => return Action::Host(HostEvent::ClosePopup),
            KeyCode::Tab | KeyCode::Down => popup.focus_next(),
            KeyCode::BackTab | KeyCode::Up => popup.focus_prev(),
            KeyCode::Left => popup.cycle_option(false),
            KeyCode::Right => popup.cycle_option(true),
            KeyCode::PageUp => popup.scroll_by(-5),
            KeyCode::PageDown => popup.scroll_by(5),
            KeyCode::Enter => {
                popup.activate_focused();
            }
            KeyCode::Backspace => popup.delete_char(),
            KeyCode::Char(ch) => popup.insert_char(ch),
            _ => {}
        }
        Action::None
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Host(event) => {
                if let HostEvent::ShowPopup { form_type, .. } = &event {
                    self.active_form = Some(form_type.clone());
                }
                self.host.dispatch(event);
            }
            Action::Quit => self.should_quit = true,
        }
    }

    /// Builds a show request for `form_type` with canned options.
    fn show(&self, form_type: &str) -> Action {
        Action::Host(HostEvent::show_popup(
            form_type,
            Some(self.host.context().clone()),
            demo_options(form_type),
            self.submit_callback(),
        ))
    }

    fn submit_callback(&self) -> SubmitCallback {
        let sink = Rc::clone(&self.submissions);
        Rc::new(move |record| sink.borrow_mut().push(record))
    }

    fn drain_submissions(&mut self) {
        let records: Vec<FieldRecord> = self.submissions.borrow_mut().drain(..).collect();
        for record in records {
            tracing::info!(%record, "form submitted");
            let from_toolbar = self.active_form.as_deref() == Some("annotation-toolbar");
            if from_toolbar && record.action_type == "edit" {
                let action = self.show("annotation-edit");
                self.apply(action);
            }
            self.last_submission = Some(record);
        }
    }

    fn status_context(&self) -> StatusBarContext {
        let form = self
            .host
            .popup()
            .and_then(|popup| popup.state().current_form())
            .map(ToString::to_string);
        StatusBarContext {
            form,
            last_submission: self.last_submission.as_ref().map(ToString::to_string),
        }
    }

    /// Returns `true` if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn host(&self) -> &ChartHost {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut ChartHost {
        &mut self.host
    }

    /// The most recent record a form submitted.
    pub fn last_submission(&self) -> Option<&FieldRecord> {
        self.last_submission.as_ref()
    }
}

/// Options the demo chart passes along with each form type.
fn demo_options(form_type: &str) -> FormOptions {
    match form_type {
        "indicators" => json!({
            "indicators": [
                {"type": "sma", "name": "SMA", "params": {"period": 14, "index": 3}},
                {"type": "ema", "name": "EMA", "params": {"period": 9}},
                {"type": "mfi", "name": "MFI",
                 "params": {"period": 14, "decimals": 4, "volumeSeriesID": "aapl-volume"}}
            ]
        }),
        "annotation-edit" => json!({
            "type": "circle",
            "langKey": "Circle",
            "shapes": [{"fill": "rgba(0, 0, 0, 0.75)", "stroke": "#000000", "strokeWidth": 1}]
        }),
        "annotation-toolbar" => json!({"type": "circle", "langKey": "Circle"}),
        "flag" => json!({"title": "A", "name": "Flag"}),
        _ => Value::Null,
    }
}
