//! Chat Service - rules assistant with a local keyword fallback
//!
//! A message is handled in two phases so the session lock is never held
//! across the provider call: `begin` records the user message (and either
//! answers locally or leaves a pending placeholder), then the caller runs
//! `complete` without the lock and hands the outcome back to `finish`.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::application::ports::outbound::{
    ChatCompletionPort, CompletionRequest, ContentRepositoryPort, LlmError,
};
use crate::domain::aggregates::WizardSession;
use crate::domain::value_objects::{AiProvider, AiSettings, ChatRole};

pub const SYSTEM_PROMPT: &str = "You are a rules assistant for Pathfinder 2e Remaster. \
                                 Explain the rules accurately and concisely.";
pub const THINKING: &str = "Thinking…";
pub const NO_KEY_NOTICE: &str =
    "No API key is configured. Add one in the settings.\n\nAnswering from local data instead:";
pub const NOT_FOUND: &str = "No matching data found. Try a different keyword.";

/// Most local matches shown for one question
pub const LOCAL_ANSWER_LIMIT: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Unknown GM topic: {0}")]
    UnknownTopic(String),
}

/// A remote request waiting to be sent
#[derive(Debug, Clone)]
pub struct PendingChat {
    pub entry_id: u64,
    pub provider: AiProvider,
    pub api_key: String,
    pub message: String,
}

#[derive(Debug)]
pub enum ChatStart {
    /// Blank input, nothing recorded
    Ignored,
    /// Answered locally, transcript is final
    Answered,
    /// Placeholder appended, the remote call is still to be made
    Pending(PendingChat),
}

pub struct ChatService<L: ChatCompletionPort> {
    content: Arc<dyn ContentRepositoryPort>,
    llm: L,
}

impl<L: ChatCompletionPort> ChatService<L> {
    pub fn new(content: Arc<dyn ContentRepositoryPort>, llm: L) -> Self {
        Self { content, llm }
    }

    /// Record the user message and decide how it will be answered
    #[instrument(skip(self, session, settings), fields(session_id = %session.id()))]
    pub fn begin(
        &self,
        session: &mut WizardSession,
        message: &str,
        settings: &AiSettings,
    ) -> ChatStart {
        let message = message.trim();
        if message.is_empty() {
            return ChatStart::Ignored;
        }

        let transcript = session.transcript_mut();
        transcript.push(ChatRole::User, message);

        if !settings.has_credential() {
            debug!("No credential configured, answering locally");
            transcript.push(ChatRole::System, NO_KEY_NOTICE);
            transcript.push(
                ChatRole::Assistant,
                local_answer(self.content.as_ref(), message),
            );
            return ChatStart::Answered;
        }

        let entry_id = transcript.push_pending(THINKING);
        ChatStart::Pending(PendingChat {
            entry_id,
            provider: settings.provider,
            api_key: settings.api_key.trim().to_string(),
            message: message.to_string(),
        })
    }

    /// Call the configured provider. Must not be called while holding the
    /// session lock.
    pub async fn complete(&self, pending: &PendingChat) -> Result<String, LlmError> {
        info!(provider = %pending.provider, "Sending question to remote assistant");
        self.llm
            .complete(
                pending.provider,
                &pending.api_key,
                CompletionRequest::new(SYSTEM_PROMPT, pending.message.clone()),
            )
            .await
    }

    /// Resolve the placeholder left by `begin`
    pub fn finish(
        &self,
        session: &mut WizardSession,
        pending: &PendingChat,
        outcome: Result<String, LlmError>,
    ) {
        let transcript = session.transcript_mut();
        match outcome {
            Ok(reply) => {
                // the placeholder may have been trimmed from a long transcript
                if !transcript.resolve(pending.entry_id, ChatRole::Assistant, reply.clone()) {
                    debug!(entry_id = pending.entry_id, "Pending chat entry was trimmed");
                    transcript.push(ChatRole::Assistant, reply);
                }
            }
            Err(err) => {
                warn!(provider = %pending.provider, error = %err, "Remote assistant failed");
                let notice = format!("Error: {}\nAnswering from local data instead:", err);
                if !transcript.resolve(pending.entry_id, ChatRole::System, notice.clone()) {
                    transcript.push(ChatRole::System, notice);
                }
                transcript.insert_after(
                    pending.entry_id,
                    ChatRole::Assistant,
                    local_answer(self.content.as_ref(), &pending.message),
                );
            }
        }
    }

    /// Post a GM reference topic into the transcript as a system message
    pub fn post_topic(&self, session: &mut WizardSession, topic_id: &str) -> Result<(), ChatError> {
        let topic = self
            .content
            .find_gm_topic(topic_id)
            .ok_or_else(|| ChatError::UnknownTopic(topic_id.to_string()))?;
        session
            .transcript_mut()
            .push(ChatRole::System, format!("[{}] {}", topic.name, topic.description));
        Ok(())
    }
}

/// Keyword answer from the local catalog: conditions, spells, feats and
/// classes whose native name contains the query (case-sensitive) or whose
/// alternate name contains it (case-insensitive)
pub fn local_answer(content: &dyn ContentRepositoryPort, query: &str) -> String {
    let lowered = query.to_lowercase();
    let hit = |name: &str, alt_name: &str| {
        name.contains(query) || alt_name.to_lowercase().contains(&lowered)
    };

    let conditions = content
        .conditions()
        .iter()
        .filter(|c| hit(&c.name, &c.alt_name))
        .map(|c| format!("{} {}", heading(&c.name, &c.alt_name), c.description));
    let spells = content
        .spells()
        .iter()
        .filter(|s| hit(&s.name, &s.alt_name))
        .map(|s| {
            format!(
                "{} Rank {} [{}] {}",
                heading(&s.name, &s.alt_name),
                s.rank,
                s.tradition_labels(),
                s.description
            )
        });
    let feats = content
        .feats()
        .iter()
        .filter(|f| hit(&f.name, &f.alt_name))
        .map(|f| {
            format!(
                "{} Lv{} {} - {}",
                heading(&f.name, &f.alt_name),
                f.level,
                f.class
                    .as_deref()
                    .and_then(|id| content.find_class(id))
                    .map_or(f.category.label(), |class| class.name.as_str()),
                f.description
            )
        });
    let classes = content
        .classes()
        .iter()
        .filter(|c| hit(&c.name, &c.alt_name))
        .map(|c| {
            format!(
                "{} HP{} Key: {} - {}",
                heading(&c.name, &c.alt_name),
                c.hp,
                c.key_ability,
                c.description
            )
        });

    let results: Vec<String> = conditions
        .chain(spells)
        .chain(feats)
        .chain(classes)
        .take(LOCAL_ANSWER_LIMIT)
        .collect();

    if results.is_empty() {
        NOT_FOUND.to_string()
    } else {
        results.join("\n\n")
    }
}

fn heading(name: &str, alt_name: &str) -> String {
    if alt_name.is_empty() || alt_name == name {
        format!("[{}]", name)
    } else {
        format!("[{} ({})]", name, alt_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{ChatTranscript, SessionId};
    use crate::test_fixtures::sample_catalog;
    use std::sync::Mutex;

    /// Records every call and replays a canned outcome
    struct MockLlm {
        reply: Option<String>,
        calls: Mutex<Vec<(AiProvider, String, String)>>,
    }

    impl MockLlm {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Some(reply.to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: None,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl ChatCompletionPort for MockLlm {
        async fn complete(
            &self,
            provider: AiProvider,
            api_key: &str,
            request: CompletionRequest,
        ) -> Result<String, LlmError> {
            self.calls.lock().expect("lock").push((
                provider,
                api_key.to_string(),
                request.user_message,
            ));
            self.reply
                .clone()
                .ok_or_else(|| LlmError::RequestFailed("connection refused".to_string()))
        }
    }

    fn keyed() -> AiSettings {
        AiSettings {
            provider: AiProvider::Google,
            api_key: "key-123".to_string(),
        }
    }

    fn texts(transcript: &ChatTranscript) -> Vec<(ChatRole, &str)> {
        transcript
            .entries()
            .iter()
            .map(|e| (e.role, e.text.as_str()))
            .collect()
    }

    #[test]
    fn test_blank_input_is_ignored() {
        let service = ChatService::new(Arc::new(sample_catalog()), MockLlm::replying("hi"));
        let mut session = WizardSession::new(SessionId::new(), 50);
        assert!(matches!(
            service.begin(&mut session, "   ", &keyed()),
            ChatStart::Ignored
        ));
        assert!(session.transcript().entries().is_empty());
    }

    #[test]
    fn test_without_key_answers_locally() {
        let service = ChatService::new(Arc::new(sample_catalog()), MockLlm::replying("hi"));
        let mut session = WizardSession::new(SessionId::new(), 50);
        let start = service.begin(&mut session, "frightened", &AiSettings::default());
        assert!(matches!(start, ChatStart::Answered));

        let entries = session.transcript().entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].role, ChatRole::User);
        assert_eq!(entries[1].text, NO_KEY_NOTICE);
        assert_eq!(entries[2].role, ChatRole::Assistant);
        assert!(entries[2].text.contains("[Frightened]"));
        assert!(service.llm.calls.lock().expect("lock").is_empty());
    }

    #[tokio::test]
    async fn test_remote_reply_replaces_placeholder() {
        let service = ChatService::new(
            Arc::new(sample_catalog()),
            MockLlm::replying("Flanking grants off-guard."),
        );
        let mut session = WizardSession::new(SessionId::new(), 50);

        let pending = match service.begin(&mut session, "How does flanking work?", &keyed()) {
            ChatStart::Pending(pending) => pending,
            other => panic!("expected pending, got {:?}", other),
        };
        assert!(session.transcript().entries()[1].pending);

        let outcome = service.complete(&pending).await;
        service.finish(&mut session, &pending, outcome);

        assert_eq!(
            texts(session.transcript()),
            vec![
                (ChatRole::User, "How does flanking work?"),
                (ChatRole::Assistant, "Flanking grants off-guard."),
            ]
        );
        let calls = service.llm.calls.lock().expect("lock");
        assert_eq!(calls[0].0, AiProvider::Google);
        assert_eq!(calls[0].1, "key-123");
    }

    #[tokio::test]
    async fn test_remote_failure_falls_back_to_local_answer() {
        let service = ChatService::new(Arc::new(sample_catalog()), MockLlm::failing());
        let mut session = WizardSession::new(SessionId::new(), 50);

        let pending = match service.begin(&mut session, "Fireball", &keyed()) {
            ChatStart::Pending(pending) => pending,
            other => panic!("expected pending, got {:?}", other),
        };
        // the user keeps chatting while the request is in flight
        session.transcript_mut().push(ChatRole::User, "later");

        let outcome = service.complete(&pending).await;
        service.finish(&mut session, &pending, outcome);

        let entries = session.transcript().entries();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[1].role, ChatRole::System);
        assert!(entries[1].text.starts_with("Error: "));
        assert!(!entries[1].pending);
        assert_eq!(entries[2].role, ChatRole::Assistant);
        assert!(entries[2].text.contains("Fireball"));
        assert_eq!(entries[3].text, "later");
    }

    #[tokio::test]
    async fn test_reply_is_appended_when_placeholder_was_trimmed() {
        let service = ChatService::new(Arc::new(sample_catalog()), MockLlm::replying("Yes."));
        let mut session = WizardSession::new(SessionId::new(), 2);

        let pending = match service.begin(&mut session, "Can I delay?", &keyed()) {
            ChatStart::Pending(pending) => pending,
            other => panic!("expected pending, got {:?}", other),
        };
        session.transcript_mut().push(ChatRole::User, "one");
        session.transcript_mut().push(ChatRole::User, "two");

        let outcome = service.complete(&pending).await;
        service.finish(&mut session, &pending, outcome);

        assert_eq!(
            texts(session.transcript()),
            vec![(ChatRole::User, "two"), (ChatRole::Assistant, "Yes.")]
        );
    }

    #[test]
    fn test_local_answer_names_the_feat_class() {
        let catalog = sample_catalog();
        let answer = local_answer(&catalog, "Power Attack");
        assert!(answer.starts_with("[Power Attack] Lv1 Fighter - "), "{}", answer);

        // general feats fall back to the category label
        let feat = catalog
            .feats()
            .iter()
            .find(|f| f.class.is_none())
            .expect("a feat without class");
        let answer = local_answer(&catalog, &feat.name);
        assert!(answer.contains(feat.category.label()), "{}", answer);
    }

    #[test]
    fn test_local_answer_match_rules() {
        let catalog = sample_catalog();

        // native name is case-sensitive, alternate name is not
        let answer = local_answer(&catalog, "fireball");
        assert!(answer.contains("Rank 3"));

        let answer = local_answer(&catalog, "zzzz");
        assert_eq!(answer, NOT_FOUND);

        // "e" hits far more than five records
        let answer = local_answer(&catalog, "e");
        assert_eq!(answer.split("\n\n").count(), LOCAL_ANSWER_LIMIT);
    }

    #[test]
    fn test_post_topic_appends_system_message() {
        let service = ChatService::new(Arc::new(sample_catalog()), MockLlm::failing());
        let mut session = WizardSession::new(SessionId::new(), 50);
        service
            .post_topic(&mut session, "hero-points")
            .expect("topic exists");
        let entry = &session.transcript().entries()[0];
        assert_eq!(entry.role, ChatRole::System);
        assert!(entry.text.starts_with("[Hero Points] "));

        assert!(matches!(
            service.post_topic(&mut session, "nope"),
            Err(ChatError::UnknownTopic(_))
        ));
    }
}
