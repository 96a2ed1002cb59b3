//! Streaming chat session.
//!
//! One conversation with a completion endpoint that answers with a stream of
//! fragments.  The session owns the transcript, the scratch buffer holding
//! the assistant output of the latest stream, and the prompt/instruction
//! inputs.  It never touches the network itself: `begin_send` hands back the
//! request to issue, and the command executor feeds fragments back in via
//! `apply_fragment` / `finish` / `fail`, tagged with the request id.

use crate::models::{ApiChatMessage, ChatMessage, ChatRole};

/// Where the session is in its request lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No request in flight; input enabled.
    Idle,
    /// A request was issued and fragments may arrive.
    Streaming { request_id: u64 },
}

/// A request the caller must send. Produced by [`ChatSession::begin_send`].
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundChat {
    pub request_id: u64,
    pub messages: Vec<ApiChatMessage>,
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    history: Vec<ChatMessage>,
    scratch: String,
    input: String,
    instructions: String,
    phase: SessionPhase,
    last_request_id: u64,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            history: Vec::new(),
            scratch: String::new(),
            input: String::new(),
            instructions: String::new(),
            phase: SessionPhase::Idle,
            last_request_id: 0,
        }
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Assistant output of the latest stream, not yet flushed into history.
    pub fn scratch(&self) -> &str {
        &self.scratch
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_streaming(&self) -> bool {
        matches!(self.phase, SessionPhase::Streaming { .. })
    }

    /// Id of the request currently in flight, if any.
    pub fn in_flight(&self) -> Option<u64> {
        match self.phase {
            SessionPhase::Streaming { request_id } => Some(request_id),
            SessionPhase::Idle => None,
        }
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn set_instructions(&mut self, text: impl Into<String>) {
        self.instructions = text.into();
    }

    pub fn can_submit(&self) -> bool {
        !self.is_streaming() && !self.input.is_empty()
    }

    /// Move from Idle to Streaming.
    ///
    /// Returns `None` (and changes nothing) while a request is in flight or
    /// when the prompt is empty.  Otherwise the scratch buffer is flushed
    /// into history as an assistant entry, the prompt is appended as a user
    /// entry and the input is cleared.
    pub fn begin_send(&mut self) -> Option<OutboundChat> {
        if !self.can_submit() {
            return None;
        }

        if !self.scratch.is_empty() {
            let flushed = std::mem::take(&mut self.scratch);
            self.history.push(ChatMessage::new(ChatRole::Assistant, flushed));
        }

        let prompt = std::mem::take(&mut self.input);
        self.history.push(ChatMessage::new(ChatRole::User, prompt));

        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.phase = SessionPhase::Streaming { request_id };

        Some(OutboundChat {
            request_id,
            messages: self.request_messages(),
        })
    }

    fn request_messages(&self) -> Vec<ApiChatMessage> {
        let mut messages = Vec::with_capacity(self.history.len() + 1);
        if !self.instructions.trim().is_empty() {
            messages.push(ApiChatMessage {
                role: ChatRole::System,
                content: self.instructions.clone(),
            });
        }
        messages.extend(
            self.history
                .iter()
                .filter(|m| matches!(m.role, ChatRole::User | ChatRole::Assistant))
                .map(ApiChatMessage::from),
        );
        messages
    }

    /// Append one fragment to the scratch buffer. Returns `false` when the
    /// fragment belongs to an abandoned request and was dropped.
    pub fn apply_fragment(&mut self, request_id: u64, fragment: &str) -> bool {
        if self.in_flight() != Some(request_id) {
            return false;
        }
        self.scratch.push_str(fragment);
        true
    }

    /// Stream ended normally; the scratch buffer stays pending.
    pub fn finish(&mut self, request_id: u64) -> bool {
        if self.in_flight() != Some(request_id) {
            return false;
        }
        self.phase = SessionPhase::Idle;
        true
    }

    /// Stream failed; the partial assistant output is discarded.
    pub fn fail(&mut self, request_id: u64) -> bool {
        if self.in_flight() != Some(request_id) {
            return false;
        }
        self.scratch.clear();
        self.phase = SessionPhase::Idle;
        true
    }

    /// Stop listening to the in-flight request without touching the
    /// transcript. Later fragments for it are ignored.
    pub fn abandon(&mut self) -> Option<u64> {
        let abandoned = self.in_flight();
        if abandoned.is_some() {
            self.scratch.clear();
            self.phase = SessionPhase::Idle;
        }
        abandoned
    }

    /// Discard history, scratch buffer, input and instructions.
    pub fn clear(&mut self) {
        self.abandon();
        self.history.clear();
        self.scratch.clear();
        self.input.clear();
        self.instructions.clear();
    }

    /// Transcript as displayed: history followed by the scratch buffer
    /// rendered as an assistant entry when non-empty.
    pub fn transcript(&self) -> Vec<(ChatRole, &str)> {
        let mut rows: Vec<(ChatRole, &str)> = self
            .history
            .iter()
            .map(|m| (m.role, m.content.as_str()))
            .collect();
        if !self.scratch.is_empty() {
            rows.push((ChatRole::Assistant, self.scratch.as_str()));
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn send(session: &mut ChatSession, text: &str) -> OutboundChat {
        session.set_input(text);
        session.begin_send().expect("send accepted")
    }

    #[test]
    fn empty_prompt_is_a_no_op() {
        let mut session = ChatSession::new();
        assert!(session.begin_send().is_none());
        assert!(session.history().is_empty());
        assert_eq!(session.phase(), SessionPhase::Idle);
    }

    #[test]
    fn submit_is_rejected_while_streaming() {
        let mut session = ChatSession::new();
        let first = send(&mut session, "hello");
        session.set_input("again");
        assert!(!session.can_submit());
        assert!(session.begin_send().is_none());
        assert_eq!(session.history().len(), 1);

        session.finish(first.request_id);
        assert!(session.can_submit());
    }

    #[test]
    fn fragments_accumulate_in_arrival_order() {
        let mut session = ChatSession::new();
        let out = send(&mut session, "hi");
        for part in ["Hel", "lo", ", ", "world"] {
            assert!(session.apply_fragment(out.request_id, part));
        }
        assert!(session.finish(out.request_id));
        assert_eq!(session.scratch(), "Hello, world");
        assert_eq!(
            session.transcript(),
            vec![(ChatRole::User, "hi"), (ChatRole::Assistant, "Hello, world")]
        );
    }

    #[test]
    fn next_send_flushes_previous_answer_into_history() {
        let mut session = ChatSession::new();
        let first = send(&mut session, "q1");
        session.apply_fragment(first.request_id, "a1");
        session.finish(first.request_id);

        let second = send(&mut session, "q2");
        let roles: Vec<_> = session.history().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![ChatRole::User, ChatRole::Assistant, ChatRole::User]);
        assert_eq!(session.scratch(), "");

        let contents: Vec<_> = second.messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["q1", "a1", "q2"]);
    }

    #[test]
    fn n_sends_interleave_in_submission_order() {
        let mut session = ChatSession::new();
        for i in 0..5 {
            let out = send(&mut session, &format!("q{}", i));
            session.apply_fragment(out.request_id, &format!("a{}", i));
            session.finish(out.request_id);
        }
        let transcript = session.transcript();
        let users: Vec<_> = transcript
            .iter()
            .filter(|(r, _)| *r == ChatRole::User)
            .map(|(_, c)| *c)
            .collect();
        assert_eq!(users, vec!["q0", "q1", "q2", "q3", "q4"]);
        let assistants = transcript.iter().filter(|(r, _)| *r == ChatRole::Assistant).count();
        assert!(assistants <= 5);
        assert_eq!(transcript.last().unwrap(), &(ChatRole::Assistant, "a4"));
    }

    #[test]
    fn failure_discards_partial_output_but_keeps_user_entry() {
        let mut session = ChatSession::new();
        let out = send(&mut session, "question");
        session.apply_fragment(out.request_id, "partial");
        assert!(session.fail(out.request_id));
        assert_eq!(session.scratch(), "");
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history()[0].role, ChatRole::User);
        assert!(!session.is_streaming());
    }

    #[test]
    fn failure_keeps_previously_finalized_history() {
        let mut session = ChatSession::new();
        let first = send(&mut session, "q1");
        session.apply_fragment(first.request_id, "a1");
        session.finish(first.request_id);
        let second = send(&mut session, "q2");
        session.fail(second.request_id);
        assert_eq!(session.history().len(), 3);
    }

    #[test]
    fn clear_resets_everything_at_once() {
        let mut session = ChatSession::new();
        session.set_instructions("Fix the grammar.");
        let out = send(&mut session, "q");
        session.apply_fragment(out.request_id, "a");
        session.finish(out.request_id);
        session.set_input("draft");

        session.clear();
        assert!(session.history().is_empty());
        assert_eq!(session.scratch(), "");
        assert_eq!(session.input(), "");
        assert_eq!(session.instructions(), "");
    }

    #[test]
    fn fragments_of_abandoned_request_are_ignored() {
        let mut session = ChatSession::new();
        let out = send(&mut session, "q");
        session.apply_fragment(out.request_id, "early");
        session.clear();

        assert!(!session.apply_fragment(out.request_id, "late"));
        assert!(!session.finish(out.request_id));
        assert!(session.transcript().is_empty());
    }

    #[test]
    fn stale_request_cannot_touch_newer_one() {
        let mut session = ChatSession::new();
        let first = send(&mut session, "q1");
        session.abandon();
        let second = send(&mut session, "q2");
        assert_ne!(first.request_id, second.request_id);
        assert!(!session.apply_fragment(first.request_id, "stale"));
        assert!(session.apply_fragment(second.request_id, "fresh"));
        assert_eq!(session.scratch(), "fresh");
    }

    #[test]
    fn instructions_become_leading_system_message() {
        let mut session = ChatSession::new();
        session.set_instructions("Be brief.");
        let out = send(&mut session, "hi");
        assert_eq!(out.messages[0].role, ChatRole::System);
        assert_eq!(out.messages[0].content, "Be brief.");
        assert_eq!(out.messages[1].role, ChatRole::User);

        let mut plain = ChatSession::new();
        plain.set_instructions("   ");
        let out = send(&mut plain, "hi");
        assert_eq!(out.messages.len(), 1);
    }
}
