//! Status bar widget. One line of key help plus the last submission.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

const CHART_KEYS: &str = "i indicators  e edit  t toolbar  f flag  click chart: flag  q quit";
const POPUP_KEYS: &str = "Tab next  \u{2190}/\u{2192} choose  Enter activate  Esc close";

/// Data passed to the status bar widget.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusBarContext {
    /// Form type of the visible popup, if any.
    pub form: Option<String>,
    /// Summary of the most recent submission.
    pub last_submission: Option<String>,
}

/// Renders a one-line status bar.
///
/// Display format:
/// - Popup shown:  `[indicators] Tab next  ...  Esc close`
/// - Popup hidden: `i indicators  ...  q quit`
///
/// The last submission, when there is one, follows in Green.
#[mutants::skip]
pub fn draw_status_bar(ctx: &StatusBarContext, frame: &mut Frame, area: Rect) {
    let cyan = Style::default().fg(Color::Cyan);
    let green = Style::default().fg(Color::Green);

    let mut spans: Vec<Span> = Vec::new();
    match &ctx.form {
        Some(form) => {
            spans.push(Span::styled(format!("[{form}] "), cyan));
            spans.push(Span::styled(POPUP_KEYS, cyan));
        }
        None => spans.push(Span::styled(CHART_KEYS, cyan)),
    }
    if let Some(last) = &ctx.last_submission {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(last.clone(), green));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
        let mut s = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                s.push(buf[(x, y)].symbol().chars().next().unwrap_or(' '));
            }
            s.push('\n');
        }
        s
    }

    fn render_status_bar(ctx: &StatusBarContext, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                draw_status_bar(ctx, frame, frame.area());
            })
            .unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    #[test]
    fn renders_chart_keys_without_popup() {
        let output = render_status_bar(&StatusBarContext::default(), 100, 1);
        assert!(output.contains("i indicators"), "should show chart keys");
        assert!(!output.contains('['), "should not show a form tag");
    }

    #[test]
    fn renders_form_with_popup_keys() {
        let ctx = StatusBarContext {
            form: Some("flag".to_string()),
            last_submission: None,
        };
        let output = render_status_bar(&ctx, 100, 1);
        assert!(output.contains("[flag]"), "should show form in brackets");
        assert!(output.contains("Esc close"), "should show popup keys");
    }

    #[test]
    fn renders_last_submission() {
        let ctx = StatusBarContext {
            form: None,
            last_submission: Some("add linked=aapl type=sma".to_string()),
        };
        let output = render_status_bar(&ctx, 120, 1);
        assert!(output.contains("add linked=aapl type=sma"));
    }
}
