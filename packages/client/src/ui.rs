//! Terminal input/output for the client.

use std::io::Write;

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;

/// Redisplay the prompt after printing a message
pub fn redisplay_prompt(username: &str) {
    print!("{}> ", username);
    std::io::stdout().flush().ok();
}

/// Spawn a blocking thread reading lines with rustyline.
///
/// The thread outlives individual connections so reconnecting does not
/// start a second reader on the terminal. The returned channel closes when
/// the user presses Ctrl+C or Ctrl+D.
pub fn spawn_input_reader(username: &str) -> mpsc::UnboundedReceiver<String> {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<String>();
    let prompt = format!("{}> ", username);

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    rl.add_history_entry(line).ok();
                    if input_tx.send(line.to_string()).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    input_rx
}
