use async_trait::async_trait;
use tahfeez_application::{Confirmation, Notifier};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::warn;

/// Prints alerts to stderr.
pub struct TerminalNotifier;

#[async_trait]
impl Notifier for TerminalNotifier {
    async fn alert(&self, message: &str) {
        eprintln!("! {message}");
    }
}

/// Asks yes/no questions on the terminal.
pub struct TerminalConfirmation {
    assume_yes: bool,
}

impl TerminalConfirmation {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

#[async_trait]
impl Confirmation for TerminalConfirmation {
    async fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        let mut stderr = tokio::io::stderr();
        if let Err(error) = stderr
            .write_all(format!("{prompt} [y/N] ").as_bytes())
            .await
        {
            warn!(error = %error, "failed to print confirmation prompt");
            return false;
        }
        let _ = stderr.flush().await;

        let mut answer = String::new();
        match BufReader::new(tokio::io::stdin()).read_line(&mut answer).await {
            Ok(_) => is_affirmative(&answer),
            Err(error) => {
                warn!(error = %error, "failed to read confirmation answer");
                false
            }
        }
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "نعم" | "ن"
    )
}

#[cfg(test)]
mod tests {
    use super::is_affirmative;

    #[test]
    fn only_explicit_yes_confirms() {
        assert!(is_affirmative("y\n"));
        assert!(is_affirmative(" YES "));
        assert!(is_affirmative("نعم"));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("no"));
    }
}
