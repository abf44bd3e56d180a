pub mod app;
#[cfg(feature = "clipboard")]
pub mod clipboard;
pub mod components;
pub mod events;
pub mod ui;

use crate::error::Result;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{io, panic};

pub use app::App;
pub use events::EventHandler;

pub type Tui = Terminal<CrosstermBackend<io::Stdout>>;

pub fn init() -> Result<Tui> {
    execute!(io::stdout(), EnterAlternateScreen)?;
    enable_raw_mode()?;

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    Ok(terminal)
}

pub fn restore() -> Result<()> {
    execute!(io::stdout(), LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

/// Put the terminal back before the panic message is printed, otherwise it
/// lands on the alternate screen in raw mode and is lost.
pub fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore();
        previous(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::install_panic_hook;
    use std::panic;

    #[test]
    fn panic_hook_chains_to_previous_hook() {
        install_panic_hook();
        let caught = panic::catch_unwind(|| panic!("render failed"));
        let _ = panic::take_hook();

        let payload = caught.expect_err("panic propagates through the hook");
        assert_eq!(payload.downcast_ref::<&str>(), Some(&"render failed"));
    }
}
