//! Widgets that register their own tap targets while rendering, so what
//! the player sees and what reacts to a tap cannot drift apart.
//!
//! - [`TabBar`]: one row of tabs.
//! - [`ClickableList`]: lines of text, some of them tappable.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::Paragraph;
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

/// A tab in a [`TabBar`].
struct TabSpec {
    label: String,
    style: Style,
    action_id: u16,
}

/// A single-row tab bar.
///
/// ```ignore
/// TabBar::new("│")
///     .tab("🎮 Game", tab_style(true), TAB_GAME)
///     .tab("🏢 Buildings", tab_style(false), TAB_BUILDINGS)
///     .render(f, area, &mut cs);
/// ```
pub struct TabBar<'a> {
    separator: &'a str,
    tabs: Vec<TabSpec>,
}

impl<'a> TabBar<'a> {
    pub fn new(separator: &'a str) -> Self {
        Self {
            separator,
            tabs: Vec::new(),
        }
    }

    pub fn tab(mut self, label: impl Into<String>, style: Style, action_id: u16) -> Self {
        self.tabs.push(TabSpec {
            label: format!(" {} ", label.into()),
            style,
            action_id,
        });
        self
    }

    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        let separator_style = Style::default().fg(Color::DarkGray);
        let separator_width = Span::raw(self.separator).width() as u16;

        let mut widths = Vec::with_capacity(self.tabs.len());
        let mut spans = Vec::with_capacity(self.tabs.len() * 2);
        for (i, tab) in self.tabs.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(self.separator, separator_style));
            }
            let span = Span::styled(tab.label, tab.style);
            widths.push((span.width() as u16, tab.action_id));
            spans.push(span);
        }

        f.render_widget(Paragraph::new(Line::from(spans)), area);
        cs.register_tab_targets(&widths, separator_width, area);
    }
}

/// Lines paired with tap actions.
///
/// Targets are bound to line positions, so inserting a header above a
/// tappable line moves its target with it.
///
/// ```ignore
/// let mut cl = ClickableList::new();
/// cl.push(Line::from("Buildings"));
/// cl.push_clickable(Line::from("[1] Cursor  $15"), BUY_BUILDING_BASE);
/// cl.register_targets(area, &mut cs, 1, 1);
/// f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
/// ```
#[derive(Default)]
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)`
    actions: Vec<(u16, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        self.actions.push((self.lines.len() as u16, action_id));
        self.lines.push(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register one row target per tappable line.
    ///
    /// `top_offset` / `bottom_offset` are the border rows around the
    /// content. Lines that would fall past the bottom border get no target.
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
    ) {
        let content = Rect {
            y: area.y + top_offset,
            height: area.height.saturating_sub(top_offset + bottom_offset),
            ..area
        };
        for &(line, action_id) in &self.actions {
            cs.add_row_target(content, content.y + line, action_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clickable_rows_follow_line_positions() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("Buildings"));
        cl.push_clickable(Line::from("Cursor"), 100);
        cl.push_clickable(Line::from("Worker"), 101);
        cl.push(Line::from("footer"));
        assert_eq!(cl.len(), 4);

        let area = Rect::new(0, 5, 80, 10);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1);

        assert_eq!(cs.targets.len(), 2);
        assert_eq!(cs.hit_test(10, 6), None);
        assert_eq!(cs.hit_test(10, 7), Some(100));
        assert_eq!(cs.hit_test(10, 8), Some(101));
        assert_eq!(cs.hit_test(10, 9), None);
    }

    #[test]
    fn lines_under_the_border_get_no_target() {
        let mut cl = ClickableList::new();
        for kind in 0..6 {
            cl.push_clickable(Line::from(format!("building {kind}")), 100 + kind);
        }
        // height 5 with borders leaves 3 content rows
        let area = Rect::new(0, 0, 80, 5);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1);

        assert_eq!(cs.targets.len(), 3);
        assert_eq!(cs.hit_test(1, 3), Some(102));
        assert_eq!(cs.hit_test(1, 4), None);
    }

    #[test]
    fn empty_list_registers_nothing() {
        let cl = ClickableList::new();
        assert!(cl.is_empty());
        let mut cs = ClickState::new();
        cl.register_targets(Rect::new(0, 0, 10, 10), &mut cs, 1, 1);
        assert!(cs.targets.is_empty());
    }

    #[test]
    fn tab_bar_registers_one_target_per_tab() {
        use ratzilla::ratatui::backend::TestBackend;
        use ratzilla::ratatui::Terminal;

        let mut terminal = Terminal::new(TestBackend::new(40, 3)).unwrap();
        let mut cs = ClickState::new();
        terminal
            .draw(|f| {
                TabBar::new("│")
                    .tab("Game", Style::default(), 10)
                    .tab("Shop", Style::default(), 11)
                    .render(f, Rect::new(0, 1, 40, 1), &mut cs);
            })
            .unwrap();

        assert_eq!(cs.targets.len(), 2);
        assert_eq!(cs.hit_test(0, 1), Some(10));
        assert_eq!(cs.hit_test(39, 1), Some(11));
        assert_eq!(cs.hit_test(0, 0), None);
    }
}
