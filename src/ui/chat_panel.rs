use uuid::Uuid;

use crate::common::{ChatMessage, ServiceCommand, WasteItem};
use crate::services::{ChatReply, ChatSession};

pub const ASSISTANT_TITLE: &str = "Waste2Worth Assistant";
pub const ASSISTANT_INSTRUCTION: &str = "You are a helpful assistant for the Waste2Worth platform. Answer questions about the platform, bio-waste upcycling, and sustainability.";
pub const CHAT_ERROR: &str = "Sorry, I'm having trouble connecting. Please try again later.";

/// State of one open chat window. Dropped when the window closes.
#[derive(Debug, Clone)]
pub struct ChatPanel {
    id: Uuid,
    pub title: String,
    system_instruction: String,
    pub messages: Vec<ChatMessage>,
    pub input: String,
    pub loading: bool,
    session: Option<ChatSession>,
}

impl ChatPanel {
    pub fn open(title: impl Into<String>, system_instruction: impl Into<String>) -> Self {
        let title = title.into();
        let greeting = format!("Hello! I'm the {title}. How can I help you?");
        Self {
            id: Uuid::new_v4(),
            title,
            system_instruction: system_instruction.into(),
            messages: vec![ChatMessage::bot(greeting)],
            input: String::new(),
            loading: false,
            session: None,
        }
    }

    pub fn assistant() -> Self {
        Self::open(ASSISTANT_TITLE, ASSISTANT_INSTRUCTION)
    }

    /// Panel for reaching out to the provider of `item`.
    pub fn for_listing(item: &WasteItem) -> Self {
        Self::open(
            format!("Chat with {}", item.user.name),
            format!(
                "You are a helpful assistant facilitating a connection between a user and {} regarding their listing for '{}'. Be polite and help them draft an opening message.",
                item.user.name, item.title
            ),
        )
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn can_send(&self) -> bool {
        !self.loading && !self.input.trim().is_empty()
    }

    /// Append the typed message and build the request for it.
    pub fn send(&mut self) -> Option<ServiceCommand> {
        if !self.can_send() {
            return None;
        }
        let message = std::mem::take(&mut self.input);
        self.messages.push(ChatMessage::user(message.clone()));
        self.loading = true;

        Some(ServiceCommand::SendChat {
            panel: self.id,
            session: self.session.clone(),
            message,
            system_instruction: self.system_instruction.clone(),
        })
    }

    pub fn apply_reply(&mut self, result: Result<ChatReply, String>) {
        self.loading = false;
        match result {
            Ok(reply) => {
                self.session = Some(reply.session);
                self.messages.push(ChatMessage::bot(reply.text));
            }
            Err(_) => self.messages.push(ChatMessage::bot(CHAT_ERROR)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Sender;
    use crate::market::seed_listings;

    fn reply_for(command: &ServiceCommand, text: &str) -> ChatReply {
        match command {
            ServiceCommand::SendChat {
                session,
                message,
                system_instruction,
                ..
            } => {
                let mut session = session
                    .clone()
                    .unwrap_or_else(|| ChatSession::new(system_instruction.clone()));
                session.record_turn(message, text);
                ChatReply {
                    session,
                    text: text.to_string(),
                }
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn opening_greets_with_title() {
        let panel = ChatPanel::assistant();
        assert_eq!(
            panel.messages,
            vec![ChatMessage::bot(
                "Hello! I'm the Waste2Worth Assistant. How can I help you?"
            )]
        );
        assert!(panel.session.is_none());
    }

    #[test]
    fn blank_input_is_ignored() {
        let mut panel = ChatPanel::assistant();
        panel.input = "   ".into();
        assert!(panel.send().is_none());
        assert_eq!(panel.messages.len(), 1);
    }

    #[test]
    fn send_appends_user_message_and_blocks_until_reply() {
        let mut panel = ChatPanel::assistant();
        panel.input = "What is biochar?".into();

        let command = panel.send().unwrap();
        assert!(panel.loading);
        assert!(panel.input.is_empty());
        assert_eq!(panel.messages.last().unwrap().sender, Sender::User);

        panel.input = "another".into();
        assert!(panel.send().is_none());

        match &command {
            ServiceCommand::SendChat {
                panel: id,
                session,
                system_instruction,
                ..
            } => {
                assert_eq!(*id, panel.id());
                assert!(session.is_none());
                assert_eq!(system_instruction, ASSISTANT_INSTRUCTION);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn session_is_threaded_through_turns() {
        let mut panel = ChatPanel::assistant();
        panel.input = "first".into();
        let first = panel.send().unwrap();
        panel.apply_reply(Ok(reply_for(&first, "one")));
        let session_id = panel.session.as_ref().unwrap().id();

        panel.input = "second".into();
        match panel.send().unwrap() {
            ServiceCommand::SendChat { session, .. } => {
                assert_eq!(session.unwrap().id(), session_id);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn failure_appends_apology_and_keeps_session() {
        let mut panel = ChatPanel::assistant();
        panel.input = "first".into();
        let first = panel.send().unwrap();
        panel.apply_reply(Ok(reply_for(&first, "one")));
        let before = panel.session.clone();

        panel.input = "second".into();
        panel.send().unwrap();
        panel.apply_reply(Err("timeout".into()));

        assert!(!panel.loading);
        assert_eq!(panel.messages.last().unwrap(), &ChatMessage::bot(CHAT_ERROR));
        assert_eq!(panel.session.clone(), before);
    }

    #[test]
    fn listing_panel_names_provider_and_title() {
        let item = &seed_listings()[2];
        let mut panel = ChatPanel::for_listing(item);
        assert_eq!(panel.title, "Chat with Fresh Juices Inc.");

        panel.input = "hello".into();
        match panel.send().unwrap() {
            ServiceCommand::SendChat {
                system_instruction, ..
            } => {
                assert!(system_instruction.contains("Fresh Juices Inc."));
                assert!(system_instruction.contains("'Citrus Peels'"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
