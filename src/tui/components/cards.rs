use crate::core::Mode;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

struct Card {
    mode: Mode,
    title: &'static str,
    blurb: &'static str,
}

static CARDS: [Card; 2] = [
    Card {
        mode: Mode::Download,
        title: "⇩ Download",
        blurb: "Grab 4K/8K/HDR sources and generate the BBDown command.",
    },
    Card {
        mode: Mode::Tutorial,
        title: "✎ AI tutorial",
        blurb: "Turn the video into illustrated step-by-step notes.",
    },
];

pub struct ModeCards {
    pub focused: bool,
}

impl ModeCards {
    pub fn new() -> Self {
        Self { focused: false }
    }

    /// Card to the left (`-1`) or right (`+1`) of `current`, wrapping around.
    pub fn neighbour(current: Mode, step: isize) -> Mode {
        let idx = CARDS.iter().position(|c| c.mode == current).unwrap_or(0) as isize;
        let next = (idx + step).rem_euclid(CARDS.len() as isize) as usize;
        CARDS[next].mode
    }

    /// Number key (1-based) to mode.
    pub fn by_index(n: usize) -> Option<Mode> {
        n.checked_sub(1).and_then(|i| CARDS.get(i)).map(|c| c.mode)
    }

    pub fn render(&self, f: &mut Frame, area: Rect, selected: Mode) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        for (i, (card, chunk)) in CARDS.iter().zip(chunks.iter()).enumerate() {
            let is_selected = card.mode == selected;

            let (border_style, border_type, text_style) = if is_selected {
                (
                    Style::default().fg(Color::LightMagenta),
                    if self.focused {
                        BorderType::Thick
                    } else {
                        BorderType::Rounded
                    },
                    Style::default().fg(Color::White),
                )
            } else {
                (
                    Style::default().fg(Color::DarkGray),
                    BorderType::Rounded,
                    Style::default().fg(Color::DarkGray),
                )
            };

            let title = Line::from(Span::styled(
                format!("[{}] {}", i + 1, card.title),
                text_style.add_modifier(Modifier::BOLD),
            ));

            let paragraph = Paragraph::new(vec![Line::from(Span::styled(card.blurb, text_style))])
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(border_type)
                        .border_style(border_style)
                        .title(title),
                );
            f.render_widget(paragraph, *chunk);
        }
    }
}

impl Default for ModeCards {
    fn default() -> Self {
        Self::new()
    }
}
