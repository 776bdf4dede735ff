//! Interactive terminal chat.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use wayfarer_agent::{TravelAssistant, TurnOutcome};

use crate::terminal_output::{note_info, TerminalSink, BOLD, RESET};

const QUIT_COMMANDS: [&str; 3] = ["/quit", "/exit", ":q"];

fn is_quit(line: &str) -> bool {
    QUIT_COMMANDS.contains(&line.trim())
}

pub async fn run(assistant: &TravelAssistant) -> Result<()> {
    let (session_id, welcome) = assistant.start_session().await?;
    println!("{welcome}\n");
    note_info("Type /quit to leave.");

    let sink = TerminalSink::default();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(format!("\n{BOLD}you ›{RESET} ").as_bytes()).await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else { break };
        if is_quit(&line) {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        if let TurnOutcome::Completed { active_agent, .. } =
            assistant.handle_message(&session_id, &line, &sink).await?
        {
            tracing::debug!(agent = %active_agent, "Turn complete");
        }
    }

    assistant.end_session(&session_id).await?;
    println!("\nSafe travels! ✈️");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_commands() {
        assert!(is_quit("/quit"));
        assert!(is_quit("  /exit \n"));
        assert!(!is_quit("quit the job and travel"));
    }
}
