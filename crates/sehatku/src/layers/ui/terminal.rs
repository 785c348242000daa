use anyhow::Context;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;

pub(crate) type Tui = Terminal<CrosstermBackend<io::Stdout>>;

/// Switches to raw mode on the alternate screen. Raw mode is undone again if
/// any later step fails, so a startup error leaves a usable shell behind.
pub(crate) fn setup_terminal() -> anyhow::Result<Tui> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let terminal = io::stdout()
        .execute(EnterAlternateScreen)
        .map_err(anyhow::Error::from)
        .and_then(|_| Terminal::new(CrosstermBackend::new(io::stdout())).map_err(Into::into));
    match terminal {
        Ok(mut terminal) => {
            terminal.hide_cursor().ok();
            Ok(terminal)
        }
        Err(err) => {
            let _ = io::stdout().execute(LeaveAlternateScreen);
            let _ = disable_raw_mode();
            Err(err.context("failed to open the form screen"))
        }
    }
}

pub(crate) fn restore_terminal(terminal: &mut Tui) -> anyhow::Result<()> {
    disable_raw_mode().context("failed to leave raw mode")?;
    terminal
        .backend_mut()
        .execute(LeaveAlternateScreen)
        .context("failed to leave the alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}
