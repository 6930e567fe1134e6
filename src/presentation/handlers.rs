// Command handlers - Dispatch operator input to the live engine
use crate::presentation::app_state::AppState;
use crate::presentation::commands::{AutoSwitch, Command, HELP};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub async fn handle_command(state: &AppState, command: Command) -> anyhow::Result<Flow> {
    match command {
        Command::Step => state.dashboard.force_step().await?,
        Command::Apply => state.dashboard.apply_filters().await?,
        Command::Set { field, value } => {
            state.dashboard.update_filter(field, value.clone()).await?;
            state
                .renderer
                .notify(&format!("filter {:?} set to {:?} (use `apply` to refresh)", field, value))
                .await?;
        }
        Command::Reset => {
            state.dashboard.reset_filters().await?;
            state.renderer.notify("filters cleared").await?;
        }
        Command::Auto(AutoSwitch::On) => state.dashboard.set_auto_refresh(true).await?,
        Command::Auto(AutoSwitch::Off) => state.dashboard.set_auto_refresh(false).await?,
        Command::Auto(AutoSwitch::Toggle) => state.dashboard.toggle_auto_refresh().await?,
        Command::Export => {
            tracing::info!("export requested");
            state
                .renderer
                .notify("Exporting dashboard... PDF generation simulated.")
                .await?;
        }
        Command::Json => {
            let snapshot = state.dashboard.latest();
            state
                .renderer
                .notify(&serde_json::to_string_pretty(&*snapshot)?)
                .await?;
        }
        Command::Help => state.renderer.notify(HELP).await?,
        Command::Quit => return Ok(Flow::Quit),
    }

    Ok(Flow::Continue)
}

/// Read commands line by line until `quit` or end of input.
pub async fn run_command_loop<R>(state: Arc<AppState>, input: R) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<Command>() {
            Ok(command) => {
                if handle_command(&state, command).await? == Flow::Quit {
                    break;
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, input = %line, "rejected command");
                state
                    .renderer
                    .notify(&format!("{} (type `help` for commands)", e))
                    .await?;
            }
        }
    }

    Ok(())
}
