//! Cash Flow rendering: header, tabs, panels, footer and confirm popup.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::leaderboard::rank_label;
use crate::widgets::{ClickableList, TabBar};

use super::actions::*;
use super::logic::{format_income, format_number};
use super::state::{click_upgrade_cost, BuildingKind};
use super::{CashFlowGame, Confirm, Panel, ProfileSection, SyncStatus, Tab};

/// Footer shows this many leaderboard rows.
const FOOTER_TOP: usize = 3;

/// Footer names are cut to this many characters.
const FOOTER_NAME_LEN: usize = 10;

pub fn render(
    game: &CashFlowGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let footer_height = if game.panel == Panel::None {
        FOOTER_TOP as u16 + 2
    } else {
        0
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),             // header
            Constraint::Length(1),             // tab bar
            Constraint::Min(6),                // content
            Constraint::Length(footer_height), // footer
        ])
        .split(area);

    render_header(game, f, chunks[0]);
    render_tab_bar(game, f, chunks[1], click_state);

    match game.panel {
        Panel::Profile => match game.profile_section {
            ProfileSection::Info => render_profile(game, f, chunks[2], click_state),
            ProfileSection::Leaderboard => render_leaderboard(game, f, chunks[2]),
        },
        Panel::Settings => render_settings(f, chunks[2], click_state),
        Panel::None => match game.tab {
            Tab::Game => render_click_tab(game, f, chunks[2], click_state),
            Tab::Buildings => render_buildings(game, f, chunks[2], click_state),
            Tab::Upgrades => render_upgrades(game, f, chunks[2], click_state),
        },
    }

    if footer_height > 0 {
        render_footer(game, f, chunks[3]);
    }

    if let Some(confirm) = game.confirm {
        render_confirm(confirm, f, area, click_state);
    }
}

fn render_header(game: &CashFlowGame, f: &mut Frame, area: Rect) {
    let sync_color = match game.sync {
        SyncStatus::Synced => Color::Green,
        SyncStatus::Saving => Color::Yellow,
        SyncStatus::Failed => Color::Red,
    };
    let income = format_income(game.state.income_per_second());

    let mut balance = vec![Span::styled(
        format!("${}", format_number(game.state.money)),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )];
    // Wide screens fit the income next to the balance
    if !is_narrow_layout(area.width) {
        balance.push(Span::styled(
            format!("   +${income} / sec"),
            Style::default().fg(Color::Green),
        ));
    }

    let mut lines = vec![Line::from(balance)];
    if is_narrow_layout(area.width) {
        lines.push(Line::from(Span::styled(
            format!("+${income} / sec"),
            Style::default().fg(Color::Green),
        )));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" 💸 Cash Flow ")
            .title(Line::from(Span::styled(
                format!(" {} ", game.sync.label()),
                Style::default().fg(sync_color),
            ))
            .right_aligned()),
    );
    f.render_widget(widget, area);
}

fn tab_style(active: bool) -> Style {
    if active {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    }
}

fn render_tab_bar(
    game: &CashFlowGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cs = click_state.borrow_mut();
    match game.panel {
        Panel::None => {
            TabBar::new("│")
                .tab("🎮 Game", tab_style(game.tab == Tab::Game), TAB_GAME)
                .tab("🏢 Buildings", tab_style(game.tab == Tab::Buildings), TAB_BUILDINGS)
                .tab("⚡ Upgrades", tab_style(game.tab == Tab::Upgrades), TAB_UPGRADES)
                .tab("👤", tab_style(false), OPEN_PROFILE)
                .tab("⚙", tab_style(false), OPEN_SETTINGS)
                .render(f, area, &mut cs);
        }
        Panel::Profile => {
            let info = game.profile_section == ProfileSection::Info;
            TabBar::new("│")
                .tab("👤 Profile", tab_style(info), PROFILE_SEC_INFO)
                .tab("🏆 Top 10", tab_style(!info), PROFILE_SEC_LEADERBOARD)
                .tab("✕ Close", tab_style(false), CLOSE_PANEL)
                .render(f, area, &mut cs);
        }
        Panel::Settings => {
            TabBar::new("│")
                .tab("⚙ Settings", tab_style(true), OPEN_SETTINGS)
                .tab("✕ Close", tab_style(false), CLOSE_PANEL)
                .render(f, area, &mut cs);
        }
    }
}

fn content_block(title: &str, color: Color) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(title)
}

fn render_click_tab(
    game: &CashFlowGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let button = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let label = Style::default().fg(Color::Gray);
    let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

    let mut cl = ClickableList::new();
    cl.push_clickable(Line::from(Span::styled("╭────────────────╮", button)), CLICK_MONEY);
    cl.push_clickable(Line::from(Span::styled("│   👆 CLICK!    │", button)), CLICK_MONEY);
    cl.push_clickable(
        Line::from(Span::styled(
            format!("│{:^16}│", format!("+${}", game.state.click_power)),
            button,
        )),
        CLICK_MONEY,
    );
    cl.push_clickable(Line::from(Span::styled("╰────────────────╯", button)), CLICK_MONEY);
    cl.push(Line::from(""));
    cl.push(Line::from(vec![
        Span::styled("⏱ Income/sec   ", label),
        Span::styled(format!("${}", format_income(game.state.income_per_second())), value),
    ]));
    cl.push(Line::from(vec![
        Span::styled("👆 Click power  ", label),
        Span::styled(format!("${}", game.state.click_power), value),
    ]));
    cl.push_clickable(
        Line::from(Span::styled(" [C] click", Style::default().fg(Color::DarkGray))),
        CLICK_MONEY,
    );

    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(area, &mut cs, 1, 1);
    }
    let widget = Paragraph::new(cl.into_lines())
        .alignment(Alignment::Center)
        .block(content_block(" 🎮 Game ", Color::Yellow));
    f.render_widget(widget, area);
}

fn render_buildings(
    game: &CashFlowGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();
    for kind in BuildingKind::all() {
        let building = game.state.building(*kind);
        let cost = building.cost();
        let affordable = game.state.money >= cost;
        let (name_style, cost_style) = if affordable {
            (
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                Style::default().fg(Color::Green),
            )
        } else {
            (
                Style::default().fg(Color::DarkGray),
                Style::default().fg(Color::Red),
            )
        };

        cl.push_clickable(
            Line::from(vec![
                Span::styled(
                    format!(" [{}] ", kind.key()),
                    Style::default().fg(Color::Yellow),
                ),
                Span::raw(format!("{} ", kind.icon())),
                Span::styled(format!("{:<10}", kind.name()), name_style),
                Span::styled(
                    format!("+${:.2}/s ", kind.base_income()),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(format!("×{:<4}", building.count), Style::default().fg(Color::Gray)),
                Span::styled(format!("${}", format_number(cost)), cost_style),
            ]),
            BUY_BUILDING_BASE + kind.index() as u16,
        );
    }

    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(area, &mut cs, 1, 1);
    }
    let widget =
        Paragraph::new(cl.into_lines()).block(content_block(" 🏢 Buildings ", Color::Cyan));
    f.render_widget(widget, area);
}

fn render_upgrades(
    game: &CashFlowGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let cost = click_upgrade_cost(game.state.click_power);
    let cost_style = if game.state.money >= cost {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Red)
    };

    let mut cl = ClickableList::new();
    cl.push_clickable(
        Line::from(vec![
            Span::styled(" [1] ", Style::default().fg(Color::Yellow)),
            Span::styled(
                "⚡ Click upgrade  ",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("${}", format_number(cost)), cost_style),
        ]),
        BUY_CLICK_UPGRADE,
    );
    cl.push_clickable(
        Line::from(Span::styled(
            format!("     Level {} · +1 click power", game.state.click_power),
            Style::default().fg(Color::Gray),
        )),
        BUY_CLICK_UPGRADE,
    );

    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(area, &mut cs, 1, 1);
    }
    let widget =
        Paragraph::new(cl.into_lines()).block(content_block(" ⚡ Upgrades ", Color::Magenta));
    f.render_widget(widget, area);
}

fn render_profile(
    game: &CashFlowGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let label = Style::default().fg(Color::Gray);
    let value = Style::default().fg(Color::White);
    let hint = Style::default().fg(Color::DarkGray);

    let mut cl = ClickableList::new();
    match &game.name_draft {
        Some(draft) => {
            cl.push(Line::from(vec![
                Span::styled(" Name:        ", label),
                Span::styled(
                    format!("{draft}_"),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
            ]));
            cl.push_clickable(Line::from(Span::styled("   [Enter] ✓ save", hint)), SAVE_NAME);
            cl.push_clickable(Line::from(Span::styled("   [Esc] ✕ cancel", hint)), CANCEL_NAME);
        }
        None => {
            let name = if game.state.player_name.is_empty() {
                "Not set"
            } else {
                game.state.player_name.as_str()
            };
            cl.push_clickable(
                Line::from(vec![
                    Span::styled(" Name:        ", label),
                    Span::styled(format!("{name} ✏"), value),
                    Span::styled("  [N]", hint),
                ]),
                EDIT_NAME,
            );
        }
    }
    cl.push(Line::from(vec![
        Span::styled(" Email:       ", label),
        Span::styled(game.session.email().to_string(), value),
    ]));
    cl.push(Line::from(vec![
        Span::styled(" Balance:     ", label),
        Span::styled(format!("${}", format_number(game.state.money)), value),
    ]));
    cl.push(Line::from(vec![
        Span::styled(" Income/sec:  ", label),
        Span::styled(
            format!("${}", format_income(game.state.income_per_second())),
            value,
        ),
    ]));
    cl.push(Line::from(vec![
        Span::styled(" Click level: ", label),
        Span::styled(game.state.click_power.to_string(), value),
    ]));
    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(Span::styled(" [O] 🚪 Log out", Style::default().fg(Color::Red))),
        LOGOUT,
    );

    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(area, &mut cs, 1, 1);
    }
    let widget =
        Paragraph::new(cl.into_lines()).block(content_block(" 🎮 My profile ", Color::Green));
    f.render_widget(widget, area);
}

fn render_leaderboard(game: &CashFlowGame, f: &mut Frame, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();
    if game.leaderboard.is_empty() {
        lines.push(Line::from(Span::styled(
            " No player data",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for (i, entry) in game.leaderboard.iter().enumerate() {
        let is_me = entry.email == game.session.email();
        let name_style = if is_me {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(vec![
            Span::raw(format!(" {:<4}", rank_label(i))),
            Span::styled(entry.display_name.clone(), name_style),
            Span::styled(format!(" ({})", entry.email), Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("  ${}", format_number(entry.money)),
                Style::default().fg(Color::Green),
            ),
        ]));
    }

    let widget = Paragraph::new(lines).block(content_block(" 🏆 Leaderboard ", Color::Yellow));
    f.render_widget(widget, area);
}

fn render_settings(f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        " ⚠ Danger zone",
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    )));
    cl.push_clickable(
        Line::from(Span::styled(" [R] 🗑 Clear progress", Style::default().fg(Color::Red))),
        RESET_PROGRESS,
    );

    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(area, &mut cs, 1, 1);
    }
    let widget = Paragraph::new(cl.into_lines()).block(content_block(" ⚙ Settings ", Color::Gray));
    f.render_widget(widget, area);
}

fn render_footer(game: &CashFlowGame, f: &mut Frame, area: Rect) {
    let lines: Vec<Line> = game
        .leaderboard
        .iter()
        .take(FOOTER_TOP)
        .enumerate()
        .map(|(i, entry)| {
            let name: String = entry.display_name.chars().take(FOOTER_NAME_LEN).collect();
            Line::from(vec![
                Span::raw(format!(" {} ", rank_label(i))),
                Span::styled(format!("{name:<10}"), Style::default().fg(Color::White)),
                Span::styled(
                    format!(" ${}", format_number(entry.money)),
                    Style::default().fg(Color::Green),
                ),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(content_block(" 🏆 Top 3 ", Color::DarkGray));
    f.render_widget(widget, area);
}

fn render_confirm(
    confirm: Confirm,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let question = match confirm {
        Confirm::Logout => "Are you sure you want to log out?",
        Confirm::Reset => "Clear progress? This cannot be undone!",
    };

    let width = area.width.min(44);
    let height = 6.min(area.height);
    let popup = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );

    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        format!(" {question}"),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )));
    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(Span::styled(" [Y] Yes", Style::default().fg(Color::Red))),
        CONFIRM_YES,
    );
    cl.push_clickable(
        Line::from(Span::styled(" [N] No", Style::default().fg(Color::Green))),
        CONFIRM_NO,
    );

    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(popup, &mut cs, 1, 1);
    }
    f.render_widget(Clear, popup);
    let widget = Paragraph::new(cl.into_lines()).block(content_block(" ? ", Color::Red));
    f.render_widget(widget, popup);
}
