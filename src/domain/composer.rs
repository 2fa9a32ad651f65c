//! Message-passing link between identity widgets and the message composer.

use std::sync::mpsc::{self, Receiver, SendError, Sender};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposerCommand {
    /// Append a mention token to the end of the draft.
    AppendMention { token: String },
}

#[derive(Debug, Clone)]
pub struct ComposerSender {
    tx: Sender<ComposerCommand>,
}

impl ComposerSender {
    pub fn append_mention(&self, token: String) -> Result<(), SendError<ComposerCommand>> {
        self.tx.send(ComposerCommand::AppendMention { token })
    }
}

pub fn composer_channel() -> (ComposerSender, Receiver<ComposerCommand>) {
    let (tx, rx) = mpsc::channel();
    (ComposerSender { tx }, rx)
}

/// Mention token the composer understands, e.g. `<@01HUSER>`.
pub fn mention_token(user_id: &str) -> String {
    format!("<@{user_id}>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mention_is_delivered_to_the_receiver() {
        let (sender, rx) = composer_channel();

        sender
            .append_mention(mention_token("U1"))
            .expect("receiver is alive");

        assert_eq!(
            rx.try_recv().expect("command should be queued"),
            ComposerCommand::AppendMention {
                token: "<@U1>".to_owned(),
            }
        );
    }

    #[test]
    fn send_fails_once_receiver_is_dropped() {
        let (sender, rx) = composer_channel();
        drop(rx);

        assert!(sender.append_mention(mention_token("U1")).is_err());
    }
}
