use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub struct ActivityLog {
    pub entries: Vec<String>,
    pub max_entries: usize,
}

impl ActivityLog {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries,
        }
    }

    pub fn push(&mut self, entry: impl AsRef<str>) {
        let timestamp = chrono::Local::now().format("%H:%M:%S");
        self.entries.push(format!("[{timestamp}] {}", entry.as_ref()));

        if self.entries.len() > self.max_entries {
            let overflow = self.entries.len() - self.max_entries;
            self.entries.drain(..overflow);
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        // Newest entries at the bottom; keep whatever fits.
        let visible = area.height.saturating_sub(2) as usize;
        let skip = self.entries.len().saturating_sub(visible);
        let lines: Vec<Line> = self
            .entries
            .iter()
            .skip(skip)
            .map(|entry| Line::from(Span::styled(entry, Style::default().fg(Color::Gray))))
            .collect();

        let paragraph =
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Activity"));
        f.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::ActivityLog;

    #[test]
    fn keeps_only_newest_entries() {
        let mut log = ActivityLog::new(2);
        log.push("one");
        log.push("two");
        log.push("three");

        assert_eq!(log.entries.len(), 2);
        assert!(log.entries[0].ends_with("two"));
        assert!(log.entries[1].ends_with("three"));
        assert!(log.entries[1].starts_with('['));
    }
}
