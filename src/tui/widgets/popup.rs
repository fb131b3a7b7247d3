//! Popup overlay widget. Draws the popup's element tree in a bordered box.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::dom::{Document, ElementId, Tag};
use crate::popup::markers::CLOSE_CLASS;
use crate::popup::{PopupController, PopupLayout};

/// Rows taken by the overlay border.
const BORDER_ROWS: u16 = 2;

struct Painter<'a> {
    document: &'a Document,
    focused: Option<ElementId>,
    inner: Rect,
    /// Row of the next element; negative while scrolled out of view.
    cursor: i32,
    hits: Vec<(ElementId, Rect)>,
}

/// Renders the popup centered in `area` and returns where each control was
/// drawn. Returns an empty layout when the popup is hidden.
#[mutants::skip]
pub fn draw_popup(popup: &PopupController, frame: &mut Frame, area: Rect) -> PopupLayout {
    if !popup.is_visible() {
        return PopupLayout::default();
    }
    let document = popup.document();
    let content = popup
        .height()
        .unwrap_or_else(|| document.natural_height(popup.root()));
    let height = content.saturating_add(BORDER_ROWS).min(area.height);
    let width = popup.width().min(area.width);

    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [overlay] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);

    let title = popup
        .state()
        .current_form()
        .map(|form| format!(" {form} "))
        .unwrap_or_default();
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(overlay);
    frame.render_widget(Clear, overlay);
    frame.render_widget(block, overlay);

    let mut painter = Painter {
        document,
        focused: popup.focused(),
        inner,
        cursor: i32::from(inner.y) - i32::from(popup.scroll()),
        hits: Vec::new(),
    };
    painter.draw_children(frame, popup.root());

    PopupLayout {
        area: Some(overlay),
        hits: painter.hits,
    }
}

impl Painter<'_> {
    fn draw_children(&mut self, frame: &mut Frame, parent: ElementId) {
        for &child in self.document.children(parent) {
            let Some(el) = self.document.get(child) else {
                continue;
            };
            if el.hidden || el.tag == Tag::Option {
                continue;
            }
            if el.tag == Tag::Div {
                self.draw_children(frame, child);
                continue;
            }
            let rows = self.document.natural_height(child);
            let top = self.cursor;
            self.cursor += i32::from(rows);
            let bottom = i32::from(self.inner.y) + i32::from(self.inner.height);
            if top < i32::from(self.inner.y) || top + i32::from(rows) > bottom {
                continue;
            }
            let Ok(y) = u16::try_from(top) else {
                continue;
            };
            let rect = Rect::new(self.inner.x, y, self.inner.width, rows);
            self.draw_element(frame, child, rect);
        }
    }

    fn draw_element(&mut self, frame: &mut Frame, id: ElementId, rect: Rect) {
        let Some(el) = self.document.get(id) else {
            return;
        };
        let is_focused = self.focused == Some(id);
        match el.tag {
            Tag::Heading => {
                let style = Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD);
                frame.render_widget(Paragraph::new(Span::styled(el.text.as_str(), style)), rect);
            }
            Tag::Label => {
                let style = Style::default().fg(Color::DarkGray);
                frame.render_widget(Paragraph::new(Span::styled(el.text.as_str(), style)), rect);
            }
            Tag::Span => {
                frame.render_widget(Paragraph::new(el.text.as_str()), rect);
            }
            Tag::Input => {
                let mut spans = vec![Span::raw(el.value.as_str())];
                if is_focused {
                    spans.push(Span::styled(
                        "\u{2588}",
                        Style::default().add_modifier(Modifier::SLOW_BLINK),
                    ));
                }
                let paragraph = Paragraph::new(Line::from(spans)).block(boxed(is_focused));
                frame.render_widget(paragraph, rect);
            }
            Tag::Select => {
                let caption = self
                    .document
                    .checked_option(id)
                    .or_else(|| self.document.children(id).first().copied())
                    .and_then(|option| self.document.get(option))
                    .map(|option| option.text.clone())
                    .unwrap_or_default();
                let paragraph =
                    Paragraph::new(format!("\u{2039} {caption} \u{203a}")).block(boxed(is_focused));
                frame.render_widget(paragraph, rect);
            }
            Tag::Button => {
                let mut style = Style::default().fg(Color::Cyan);
                if is_focused {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                let (label, alignment) = if el.has_class(CLOSE_CLASS) {
                    ("[x]".to_string(), Alignment::Right)
                } else {
                    (format!("[ {} ]", el.text), Alignment::Left)
                };
                let paragraph = Paragraph::new(Span::styled(label, style)).alignment(alignment);
                frame.render_widget(paragraph, rect);
            }
            Tag::Div | Tag::Option => return,
        }
        if el.tag.is_focusable() {
            self.hits.push((id, rect));
        }
    }
}

fn boxed(is_focused: bool) -> Block<'static> {
    let color = if is_focused {
        Color::Yellow
    } else {
        Color::DarkGray
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}
