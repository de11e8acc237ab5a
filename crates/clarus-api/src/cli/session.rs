//! Session browsing CLI commands: list sessions, show a transcript.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use clarus_types::chat::MessageRole;

use crate::state::AppState;

const TITLE_DISPLAY_CHARS: usize = 40;

/// List every session, newest first.
///
/// # Examples
///
/// ```bash
/// clarus sessions
/// clarus sessions --json
/// ```
pub async fn list_sessions(state: &AppState, json: bool) -> Result<()> {
    let sessions = state.chat_service.list_sessions().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&sessions)?);
        return Ok(());
    }

    if sessions.is_empty() {
        println!();
        println!("  {} No sessions recorded yet.", style("i").blue().bold());
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Session").fg(Color::White),
        Cell::new("Title").fg(Color::White),
        Cell::new("User").fg(Color::White),
        Cell::new("Created").fg(Color::White),
    ]);

    for session in &sessions {
        table.add_row(vec![
            Cell::new(&session.session_id).fg(Color::Cyan),
            Cell::new(truncate_for_display(&session.title)).fg(Color::White),
            Cell::new(session.user_id.as_deref().unwrap_or("-")).fg(Color::DarkGrey),
            Cell::new(session.created_at.format("%Y-%m-%d %H:%M").to_string())
                .fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} session{}",
        style(sessions.len()).bold(),
        if sessions.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

/// Print the messages of a session, oldest first.
///
/// # Examples
///
/// ```bash
/// clarus history my-session
/// clarus history my-session --json
/// ```
pub async fn show_history(state: &AppState, session_id: &str, json: bool) -> Result<()> {
    let entries = state.chat_service.history(session_id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!();
        println!(
            "  {} No messages for session '{}'.",
            style("i").blue().bold(),
            style(session_id).cyan()
        );
        println!();
        return Ok(());
    }

    println!();
    println!("  Session '{}'", style(session_id).cyan().bold());
    println!();
    for entry in &entries {
        let speaker = match entry.role {
            MessageRole::User => style("you").green().bold(),
            MessageRole::Assistant => style("assistant").magenta().bold(),
        };
        println!(
            "  {} {}",
            speaker,
            style(entry.created_at.format("%H:%M:%S")).dim()
        );
        for line in entry.content.lines() {
            println!("    {line}");
        }
        println!();
    }

    Ok(())
}

fn truncate_for_display(title: &str) -> String {
    if title.chars().count() > TITLE_DISPLAY_CHARS {
        let head: String = title.chars().take(TITLE_DISPLAY_CHARS - 3).collect();
        format!("{head}...")
    } else {
        title.to_string()
    }
}
