//! Terminal-backed operator: notices go to stdout, answers come from stdin.

use std::io::Write;

use async_trait::async_trait;
use client_core::Operator;
use tokio::{
    io::{stdin, AsyncBufReadExt, BufReader, Lines, Stdin},
    sync::Mutex,
};

pub struct ConsoleOperator {
    input: Mutex<Lines<BufReader<Stdin>>>,
    assume_yes: bool,
    pending_navigation: Mutex<Option<String>>,
}

impl ConsoleOperator {
    pub fn new(assume_yes: bool) -> Self {
        Self {
            input: Mutex::new(BufReader::new(stdin()).lines()),
            assume_yes,
            pending_navigation: Mutex::new(None),
        }
    }

    /// Prints `prompt` and reads one line. `None` on end of input.
    pub async fn read_line(&self, prompt: &str) -> Option<String> {
        print!("{prompt}");
        if let Err(err) = std::io::stdout().flush() {
            tracing::warn!(error = %err, "failed to flush prompt");
        }
        match self.input.lock().await.next_line().await {
            Ok(line) => line.map(|line| line.trim().to_string()),
            Err(err) => {
                tracing::warn!(error = %err, "failed to read operator input");
                None
            }
        }
    }

    /// Destination requested by the last flow, if any.
    pub async fn take_navigation(&self) -> Option<String> {
        self.pending_navigation.lock().await.take()
    }
}

#[async_trait]
impl Operator for ConsoleOperator {
    async fn notify(&self, message: &str) {
        println!("{message}");
    }

    async fn confirm(&self, question: &str) -> bool {
        if self.assume_yes {
            println!("{question} [y/N] y");
            return true;
        }
        match self.read_line(&format!("{question} [y/N] ")).await {
            Some(answer) => matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"),
            None => false,
        }
    }

    async fn navigate(&self, destination: &str) {
        tracing::debug!(destination, "navigation requested");
        *self.pending_navigation.lock().await = Some(destination.to_string());
    }
}
