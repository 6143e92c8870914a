//! REPL for interactive streaming chat.
//!
//! Reads messages at an editable prompt (with persistent history) and
//! streams the assistant's reply to the terminal fragment by fragment. Ctrl-C while a reply is streaming
//! cancels that reply through the [`CancellationCoordinator`]: the
//! local token aborts the transport and the server is asked, best
//! effort, to stop generating.

use std::io::Write as _;
use std::sync::Arc;

use colored::Colorize;
use hub_application::{CancellationCoordinator, RunChatUseCase};
use hub_domain::{ChatRequest, RequestId, StreamPhase};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tokio::sync::mpsc;
use tracing::debug;

use crate::output::console::ConsoleFormatter;

/// Interactive chat REPL
pub struct ChatRepl {
    use_case: Arc<RunChatUseCase>,
    coordinator: Arc<CancellationCoordinator>,
    quiet: bool,
}

impl ChatRepl {
    pub fn new(use_case: Arc<RunChatUseCase>, coordinator: Arc<CancellationCoordinator>) -> Self {
        Self {
            use_case,
            coordinator,
            quiet: false,
        }
    }

    /// Suppress the welcome banner.
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Run the interactive loop until EOF or `/quit`.
    pub async fn run(&self) -> anyhow::Result<()> {
        let mut rl = DefaultEditor::new()?;

        // Try to load history
        let history_path = dirs::data_dir().map(|p| p.join("nexus-call-hub").join("history.txt"));

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        if !self.quiet {
            self.print_welcome();
        }

        loop {
            // The editor blocks on the terminal; keep the runtime's other
            // workers free while it does.
            let readline = tokio::task::block_in_place(|| rl.readline(">>> "));

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }
                    if line.starts_with('/') {
                        if self.handle_command(line) {
                            break;
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line);
                    self.stream_reply(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        // Save history
        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    /// Returns true when the REPL should exit.
    fn handle_command(&self, line: &str) -> bool {
        match line {
            "/quit" | "/exit" | "/q" => true,
            "/help" => {
                println!("Commands: /help  /quit");
                println!("Ctrl-C during a reply cancels that reply.");
                false
            }
            other => {
                println!("Unknown command: {other} (try /help)");
                false
            }
        }
    }

    /// Stream one reply, racing the stream against Ctrl-C.
    async fn stream_reply(&self, message: &str) {
        let (id_tx, mut id_rx) = mpsc::unbounded_channel::<RequestId>();
        let use_case = self.use_case.clone();
        let request = ChatRequest::new(message);

        let mut task = tokio::spawn(async move {
            use_case
                .execute(
                    request,
                    move |id| {
                        let _ = id_tx.send(id.clone());
                    },
                    |fragment| {
                        print!("{fragment}");
                        let _ = std::io::stdout().flush();
                    },
                )
                .await
        });

        // The id arrives before any network work; keep it for cancel.
        let request_id = id_rx.recv().await;

        let result = loop {
            tokio::select! {
                result = &mut task => break result,
                _ = tokio::signal::ctrl_c() => {
                    if let Some(id) = &request_id {
                        debug!("Ctrl-C: cancelling {}", id);
                        let signalled = self.coordinator.cancel(id).await;
                        if !signalled {
                            // Already finished; the task result will say so.
                            debug!("Cancel for {} found nothing in flight", id);
                        }
                    }
                }
            }
        };

        match result {
            Ok(Ok(outcome)) => {
                println!();
                match outcome.phase {
                    StreamPhase::Completed => {}
                    StreamPhase::Cancelled => {
                        println!("{}", "[cancelled by user]".yellow());
                    }
                    _ => {
                        let detail = outcome
                            .error
                            .map(|e| e.to_string())
                            .unwrap_or_else(|| "unknown stream failure".to_string());
                        println!("{}", ConsoleFormatter::error_line(&detail));
                    }
                }
            }
            Ok(Err(e)) => {
                println!();
                println!("{}", ConsoleFormatter::error_line(&e.to_string()));
            }
            Err(e) => {
                println!();
                println!("{}", ConsoleFormatter::error_line(&format!("task failed: {e}")));
            }
        }
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", "Nexus Call Hub - Assistant Chat".cyan().bold());
        println!("Type a message and press Enter. /help for commands.");
        println!();
    }
}
