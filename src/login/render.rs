use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;
use crate::widgets::ClickableList;

use super::actions::*;
use super::{Field, LoginScreen, Mode};

const FORM_WIDTH: u16 = 48;
const FORM_HEIGHT: u16 = 16;

pub fn render(
    screen: &LoginScreen,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let width = area.width.min(FORM_WIDTH);
    let height = area.height.min(FORM_HEIGHT);
    let form = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );

    let (title, submit_label, toggle_label) = match screen.mode {
        Mode::SignIn => (" 🔐 Sign in ", " [Enter] Sign in", " [Esc] No account? Sign up"),
        Mode::SignUp => (" 📝 Sign up ", " [Enter] Sign up", " [Esc] Have an account? Sign in"),
    };

    let label = Style::default().fg(Color::Gray);
    let field_style = |focused: bool| {
        if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        }
    };
    let cursor = |focused: bool| if focused { "_" } else { "" };

    let email_focused = screen.focus == Field::Email;
    let password_focused = screen.focus == Field::Password;
    let masked: String = "•".repeat(screen.password.chars().count());

    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        " 💸 Cash Flow",
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )));
    cl.push(Line::from(""));
    cl.push_clickable(Line::from(Span::styled(" Email", label)), FOCUS_EMAIL);
    cl.push_clickable(
        Line::from(Span::styled(
            format!(" > {}{}", screen.email, cursor(email_focused)),
            field_style(email_focused),
        )),
        FOCUS_EMAIL,
    );
    cl.push_clickable(Line::from(Span::styled(" Password", label)), FOCUS_PASSWORD);
    cl.push_clickable(
        Line::from(Span::styled(
            format!(" > {}{}", masked, cursor(password_focused)),
            field_style(password_focused),
        )),
        FOCUS_PASSWORD,
    );
    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(Span::styled(
            submit_label,
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        SUBMIT,
    );
    cl.push_clickable(
        Line::from(Span::styled(toggle_label, Style::default().fg(Color::Cyan))),
        TOGGLE_MODE,
    );
    cl.push(Line::from(""));
    if let Some(err) = &screen.error {
        cl.push(Line::from(Span::styled(
            format!(" ⚠ {err}"),
            Style::default().fg(Color::Red),
        )));
    }
    cl.push(Line::from(Span::styled(
        " Demo mode: accounts live in this browser only.",
        Style::default().fg(Color::DarkGray),
    )));
    cl.push(Line::from(Span::styled(
        " Tab switches field.",
        Style::default().fg(Color::DarkGray),
    )));

    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(form, &mut cs, 1, 1);
    }
    let widget = Paragraph::new(cl.into_lines())
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(title),
        );
    f.render_widget(widget, form);
}
