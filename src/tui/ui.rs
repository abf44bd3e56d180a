use crate::core::{Mode, TOOL_LINKS, ViewState};
use crate::tui::app::{App, Focus};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

const ACCENT: Color = Color::LightMagenta;

pub fn draw(f: &mut Frame, app: &mut App) {
    let state = app.view_state();
    let cards_height = if app.controller.session().mode.is_some() {
        5
    } else {
        0
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),            // Title
            Constraint::Length(3),            // Link input + trigger
            Constraint::Length(cards_height), // Mode cards
            Constraint::Min(6),               // Detail panel
            Constraint::Length(6),            // Activity
            Constraint::Length(3),            // Help
        ])
        .split(f.area());

    draw_title(f, chunks[0]);
    draw_link_row(f, app, chunks[1], state);

    if let Some(mode) = app.controller.session().mode {
        app.cards.render(f, chunks[2], mode);
    }

    match state {
        ViewState::Idle => draw_idle(f, chunks[3]),
        ViewState::Analyzing => draw_analyzing(f, chunks[3]),
        ViewState::ModeChosen(Mode::Download) => draw_download(f, app, chunks[3]),
        ViewState::ModeChosen(Mode::Tutorial) => draw_tutorial(f, app, chunks[3]),
    }

    app.activity.render(f, chunks[4]);
    draw_help(f, app, chunks[5], state);
}

fn draw_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("BiliDown ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                "Ultra",
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            "Premium bilibili resource fetching",
            Style::default().fg(Color::Gray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn draw_link_row(f: &mut Frame, app: &App, area: Rect, state: ViewState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(18)])
        .split(area);

    app.url_input.render(f, chunks[0]);

    let (label, style) = if state == ViewState::Analyzing {
        ("Analyzing...", Style::default().fg(Color::DarkGray))
    } else {
        (
            "Analyze link",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )
    };
    let trigger = Paragraph::new(format!("⏎ {label}"))
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(style));
    f.render_widget(trigger, chunks[1]);
}

fn draw_idle(f: &mut Frame, area: Rect) {
    let intro = Paragraph::new(
        "Paste a video link (BV/av/ep id or b23.tv short link) and press Enter to analyze it.",
    )
    .style(Style::default().fg(Color::Gray))
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(intro, area);
}

fn draw_analyzing(f: &mut Frame, area: Rect) {
    let waiting = Paragraph::new("Recognising link...")
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(waiting, area);
}

fn draw_download(f: &mut Frame, app: &App, area: Rect) {
    let step = |text: &str| {
        Line::from(vec![
            Span::styled("› ", Style::default().fg(ACCENT)),
            Span::styled(text.to_string(), Style::default().add_modifier(Modifier::BOLD)),
        ])
    };

    let mut lines = vec![step("Step 1: get the tools")];
    for link in TOOL_LINKS {
        let target = match link.url {
            Some(url) => Span::styled(url, Style::default().fg(Color::Cyan)),
            None => Span::styled("(link coming soon)", Style::default().fg(Color::DarkGray)),
        };
        lines.push(Line::from(vec![
            Span::raw(format!("   {}  ", link.label)),
            target,
        ]));
    }

    lines.push(Line::default());
    lines.push(step("Step 2: run the command"));
    lines.push(Line::from(Span::styled(
        format!("   {}", app.controller.compose_command()),
        Style::default().fg(Color::White).bg(Color::Black),
    )));

    let panel = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Download"));
    f.render_widget(panel, area);
}

fn draw_tutorial(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(Span::styled(
        "AI video report",
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(1)])
        .split(inner);

    app.tutorial_progress.render(f, chunks[0]);

    let note = Paragraph::new(
        "Note: this feature needs the bilibili API and an LLM backend; what you see is a preview.",
    )
    .style(Style::default().fg(Color::DarkGray))
    .wrap(Wrap { trim: true });
    f.render_widget(note, chunks[1]);
}

fn draw_help(f: &mut Frame, app: &App, area: Rect, state: ViewState) {
    let text = match (app.focus, state) {
        (_, ViewState::Analyzing) => "[Esc] Cancel  [Ctrl+C] Exit",
        (Focus::Input, ViewState::Idle) => "[Enter] Analyze  [Esc] Exit",
        (Focus::Input, _) => "[Enter] Re-analyze  [Tab] Modes  [Ctrl+U] Clear  [Ctrl+C] Exit",
        (Focus::Cards, ViewState::ModeChosen(Mode::Download)) if cfg!(feature = "clipboard") => {
            "[←→/1-2] Mode  [c] Copy command  [Tab] Edit link  [q] Exit"
        }
        (Focus::Cards, _) => "[←→/1-2] Mode  [Tab] Edit link  [q] Exit",
    };

    let help = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, area);
}
