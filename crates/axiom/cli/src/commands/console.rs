//! Interactive console

use std::time::Duration;

use axiom_shell::{ActionKind, ActionOutcome, Shell, ShellEvent};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

use crate::error::CliResult;
use crate::output::{self, HistoryRow, OutputFormat};

const HELP: &str = "\
  <text>            synthesize a protocol from <text>
  /chat <message>   talk to the console assistant
  /ask <query>      single-shot fast query
  /history          list synthesized protocols, newest first
  /show <n>         display history entry <n>
  /log              show the session log
  /transcript       show the chat transcript
  /help             show this help
  /quit             leave the console";

/// One line of console input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Generate(String),
    Chat(String),
    Ask(String),
    History,
    Show(usize),
    Log,
    Transcript,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

pub fn parse_line(line: &str) -> ConsoleCommand {
    let line = line.trim();
    if line.is_empty() {
        return ConsoleCommand::Empty;
    }
    let Some(command) = line.strip_prefix('/') else {
        return ConsoleCommand::Generate(line.to_string());
    };

    let (name, rest) = match command.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (command, ""),
    };

    match name {
        "chat" => ConsoleCommand::Chat(rest.to_string()),
        "ask" => ConsoleCommand::Ask(rest.to_string()),
        "history" => ConsoleCommand::History,
        "show" => match rest.parse() {
            Ok(index) => ConsoleCommand::Show(index),
            Err(_) => ConsoleCommand::Unknown(line.to_string()),
        },
        "log" => ConsoleCommand::Log,
        "transcript" => ConsoleCommand::Transcript,
        "help" => ConsoleCommand::Help,
        "quit" | "exit" => ConsoleCommand::Quit,
        _ => ConsoleCommand::Unknown(line.to_string()),
    }
}

/// Execute the interactive console
pub async fn execute(shell: Shell, format: OutputFormat) -> CliResult<()> {
    println!("{}", "AXIOM // protocol synthesis console".bold().cyan());
    println!();

    authorize_with_spinner(&shell).await;
    output::print_info(&format!("Session {}", shell.session_id()));
    println!("{}", HELP.dimmed());
    println!();

    let renderer = tokio::spawn(render_events(shell.clone(), format));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            ConsoleCommand::Empty => {}
            ConsoleCommand::Quit => break,
            ConsoleCommand::Help => println!("{}", HELP),
            ConsoleCommand::Generate(prompt) => spawn_action(&shell, ActionKind::Generate, prompt),
            ConsoleCommand::Chat(message) => spawn_action(&shell, ActionKind::Chat, message),
            ConsoleCommand::Ask(query) => spawn_action(&shell, ActionKind::FastQuery, query),
            ConsoleCommand::History => {
                let state = shell.snapshot();
                let rows = state
                    .history
                    .iter()
                    .enumerate()
                    .map(|(index, result)| HistoryRow::new(index, result))
                    .collect();
                output::print_rows(rows, format)?;
            }
            ConsoleCommand::Show(index) => match shell.select_history(index) {
                Some(result) => output::print_result(&result, format)?,
                None => output::print_warning(&format!("No history entry {}", index)),
            },
            ConsoleCommand::Log => {
                for entry in shell.snapshot().log.iter() {
                    println!("{}", output::render_log(entry));
                }
            }
            ConsoleCommand::Transcript => {
                let state = shell.snapshot();
                if state.transcript.is_empty() {
                    println!("{}", "No messages yet.".dimmed());
                }
                for message in state.transcript.messages() {
                    println!("{}", output::render_chat(message));
                }
            }
            ConsoleCommand::Unknown(input) => {
                output::print_warning(&format!("Unknown command: {} (try /help)", input))
            }
        }
    }

    renderer.abort();
    println!("{}", "Session closed. History, transcript and log discarded.".dimmed());
    Ok(())
}

async fn authorize_with_spinner(shell: &Shell) {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message("AUTH LOCKED");

    let mut events = shell.subscribe();
    let authorize = shell.authorize();
    tokio::pin!(authorize);

    loop {
        tokio::select! {
            phase = &mut authorize => {
                spinner.finish_with_message(format!("AUTH {}", phase.label()));
                break;
            }
            event = events.recv() => {
                if let Ok(ShellEvent::AuthPhaseChanged(phase)) = event {
                    spinner.set_message(format!("AUTH {}", phase.label()));
                }
            }
        }
    }
}

/// Run one action on its own task so the three kinds can overlap.
fn spawn_action(shell: &Shell, kind: ActionKind, text: String) {
    let shell = shell.clone();
    tokio::spawn(async move {
        let ignored = match kind {
            ActionKind::Generate => ignored_reason(shell.submit_generate(&text).await),
            ActionKind::Chat => ignored_reason(shell.submit_chat(&text).await),
            ActionKind::FastQuery => ignored_reason(shell.submit_fast_query(&text).await),
        };
        if let Some(reason) = ignored {
            output::print_warning(&format!("{} ignored: {}", kind, reason));
        }
    });
}

fn ignored_reason<T>(outcome: ActionOutcome<T>) -> Option<axiom_shell::IgnoreReason> {
    match outcome {
        ActionOutcome::Ignored(reason) => Some(reason),
        ActionOutcome::Completed(_) => None,
    }
}

async fn render_events(shell: Shell, format: OutputFormat) {
    let mut events = shell.subscribe();
    loop {
        let event = match events.recv().await {
            Ok(event) => event,
            Err(RecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, "renderer lagged behind shell events");
                continue;
            }
            Err(RecvError::Closed) => break,
        };

        match event {
            ShellEvent::StageEntered { stage, percent } => {
                println!("{} {:>3}% {}", "»".cyan(), percent, stage.label().dimmed());
            }
            ShellEvent::ProtocolReady(result) => {
                if let Err(err) = output::print_result(&result, format) {
                    output::print_error(&err.to_string());
                }
            }
            ShellEvent::ChatReply(message) => println!("{}", output::render_chat(&message)),
            ShellEvent::FastAnswer(answer) => {
                println!("{} {}", "fast>".bold().magenta(), answer);
            }
            ShellEvent::AuthPhaseChanged(_)
            | ShellEvent::LogAppended(_)
            | ShellEvent::BusyChanged { .. } => {}
        }
    }
}
