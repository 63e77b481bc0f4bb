//! SessionController -- the conversation synchronization state machine.
//!
//! Owns the session identity, the conversation log and the busy flag.
//! Every operation claims the busy flag atomically before doing anything
//! else, so at most one request is ever in flight and at most one optimistic
//! message exists. All state is published through a `tokio::sync::watch`
//! channel; subscribers see the optimistic append before the round trip
//! completes and the reconciled (or rolled back) log afterwards.

use tokio::sync::watch;
use tracing::{debug, info, warn};

use advisor_types::error::AdvisorError;
use advisor_types::message::{ConversationLog, Message};
use advisor_types::session::SessionId;

use crate::advisor::service::AdvisorService;

use super::error::{ConversationError, Operation, ValidationError};
use super::snapshot::{ConversationSnapshot, ErrorKind, GREETING_FAILED_NOTICE, Notice};

/// What happened to the automatic greeting of a begin/resume call.
#[derive(Debug)]
pub enum GreetingStatus {
    /// Resumed session, or the new session already had history.
    NotNeeded,
    /// The advisor's opening message is in the log.
    Delivered,
    /// The session is active but the log is empty; the user can start typing.
    Failed(AdvisorError),
}

/// Result of a successful begin/resume.
#[derive(Debug)]
pub struct BeginOutcome {
    pub session_id: SessionId,
    /// `true` when the user supplied a token.
    pub resumed: bool,
    pub greeting: GreetingStatus,
}

impl BeginOutcome {
    /// Confirmation line shown once the session is active.
    pub fn confirmation(&self) -> String {
        if self.resumed {
            format!("Session {} loaded. Let's continue!", self.session_id)
        } else {
            format!(
                "New session started! Your session ID is: {}. Copy it down if you want to resume later.",
                self.session_id
            )
        }
    }
}

/// Drives one conversation with the advisor service.
///
/// Generic over [`AdvisorService`] so `advisor-core` never depends on the
/// HTTP implementation.
pub struct SessionController<S: AdvisorService> {
    service: S,
    state: watch::Sender<ConversationSnapshot>,
}

impl<S: AdvisorService> SessionController<S> {
    /// Create a controller with no session and an empty log.
    pub fn new(service: S) -> Self {
        let (state, _) = watch::channel(ConversationSnapshot::default());
        Self { service, state }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    // --- Observable state ---

    /// A copy of the current state.
    pub fn snapshot(&self) -> ConversationSnapshot {
        self.state.borrow().clone()
    }

    /// Receive every state change from now on.
    pub fn subscribe(&self) -> watch::Receiver<ConversationSnapshot> {
        self.state.subscribe()
    }

    pub fn session_id(&self) -> Option<SessionId> {
        self.state.borrow().session_id.clone()
    }

    pub fn log(&self) -> ConversationLog {
        self.state.borrow().log.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.state.borrow().busy
    }

    pub fn notice(&self) -> Option<Notice> {
        self.state.borrow().notice.clone()
    }

    // --- Input buffers ---

    /// Update the "previous session ID" field.
    ///
    /// Ignored (returns `false`) unless a session can be started.
    pub fn set_session_token_draft(&self, text: &str) -> bool {
        let mut accepted = false;
        self.state.send_if_modified(|s| {
            if !s.can_start_session() {
                return false;
            }
            accepted = true;
            if s.session_token_draft == text {
                return false;
            }
            s.session_token_draft = text.to_string();
            true
        });
        accepted
    }

    /// Update the message input box.
    ///
    /// Ignored (returns `false`) while no session is active or a request is
    /// in flight.
    pub fn set_message_draft(&self, text: &str) -> bool {
        let mut accepted = false;
        self.state.send_if_modified(|s| {
            if !s.can_type() {
                return false;
            }
            accepted = true;
            if s.message_draft == text {
                return false;
            }
            s.message_draft = text.to_string();
            true
        });
        accepted
    }

    /// Begin or resume using the contents of the session token field.
    pub async fn begin_from_draft(&self) -> Result<BeginOutcome, ConversationError> {
        let token = self.state.borrow().session_token_draft.clone();
        self.begin_or_resume(&token).await
    }

    /// Send the contents of the message input box.
    pub async fn submit_draft(&self) -> Result<ConversationLog, ConversationError> {
        let text = self.state.borrow().message_draft.clone();
        self.send_message(&text).await
    }

    // --- Operations ---

    /// Start a new session (blank token) or resume an existing one.
    ///
    /// A brand-new session with no history gets exactly one automatic chat
    /// exchange carrying the start trigger, so the advisor speaks first. A
    /// resumed session is never greeted, even when its history is empty.
    ///
    /// On failure the controller returns to "no session" with an empty log.
    pub async fn begin_or_resume(
        &self,
        input_token: &str,
    ) -> Result<BeginOutcome, ConversationError> {
        let requested = SessionId::parse(input_token);

        let mut admission = Ok(());
        self.state.send_if_modified(|s| {
            if s.busy {
                admission = Err(ConversationError::Busy);
                return false;
            }
            if s.session_id.is_some() {
                admission = Err(ConversationError::SessionAlreadyActive);
                return false;
            }
            s.busy = true;
            s.notice = None;
            true
        });
        if let Err(err) = admission {
            debug!(error = %err, "Begin session rejected");
            return Err(err);
        }
        let guard = InFlight::new(&self.state);

        match &requested {
            Some(id) => info!(session_id = %id, "Resuming advisor session"),
            None => info!("Starting new advisor session"),
        }

        let loaded = match self.service.get_session(requested.as_ref()).await {
            Ok(loaded) => loaded,
            Err(source) => {
                warn!(error = %source, "Failed to load advisor session");
                let err = ConversationError::from_service(Operation::BeginSession, source);
                let notice = err.notice();
                guard.abort(move |s| {
                    s.session_id = None;
                    s.log = ConversationLog::new();
                    s.notice = notice;
                });
                return Err(err);
            }
        };

        let session_id = loaded.session_id;
        let history = ConversationLog::from_server(loaded.history);
        let needs_greeting = requested.is_none() && history.is_empty();

        let (adopted_id, adopted_log) = (session_id.clone(), history.clone());
        self.state.send_modify(move |s| {
            s.session_id = Some(adopted_id);
            s.log = adopted_log;
            s.session_token_draft.clear();
        });
        info!(
            session_id = %session_id,
            history_len = history.len(),
            resumed = requested.is_some(),
            "Advisor session active"
        );

        let greeting = if needs_greeting {
            let contents = history.with_appended(Message::start_trigger());
            debug!(session_id = %session_id, "Requesting opening greeting");
            match self.service.chat(&session_id, contents.messages()).await {
                Ok(returned) => {
                    let log = ConversationLog::from_server(returned);
                    guard.complete(move |s| s.log = log);
                    GreetingStatus::Delivered
                }
                Err(source) => {
                    warn!(session_id = %session_id, error = %source, "Opening greeting failed");
                    let notice = Notice::new(ErrorKind::GreetingFailed, GREETING_FAILED_NOTICE);
                    guard.complete(move |s| s.notice = Some(notice));
                    GreetingStatus::Failed(source)
                }
            }
        } else {
            guard.complete(|_| {});
            GreetingStatus::NotNeeded
        };

        Ok(BeginOutcome {
            session_id,
            resumed: requested.is_some(),
            greeting,
        })
    }

    /// Send a user message and reconcile with the advisor's reply.
    ///
    /// The message is appended to the log (and the input box cleared) before
    /// the request goes out. On success the log is replaced wholesale by the
    /// server's history; on failure it is restored to exactly what it was
    /// before the append. The typed text is not put back in the input box.
    ///
    /// Returns the reconciled log.
    pub async fn send_message(&self, text: &str) -> Result<ConversationLog, ConversationError> {
        let text = text.trim();

        let mut admission = Err(ConversationError::Busy);
        self.state.send_if_modified(|s| {
            if s.busy {
                return false;
            }
            s.notice = None;
            admission = match &s.session_id {
                None => Err(ValidationError::NoActiveSession.into()),
                Some(_) if text.is_empty() => Err(ValidationError::EmptyMessage.into()),
                Some(id) => {
                    let confirmed = s.log.clone();
                    s.log = confirmed.with_appended(Message::user(text));
                    s.message_draft.clear();
                    s.busy = true;
                    Ok((id.clone(), confirmed, s.log.clone()))
                }
            };
            if let Err(err) = &admission {
                s.notice = err.notice();
            }
            true
        });
        let (session_id, confirmed, optimistic) = match admission {
            Ok(admitted) => admitted,
            Err(err) => {
                debug!(error = %err, "Send rejected");
                return Err(err);
            }
        };
        let guard = InFlight::with_rollback(&self.state, confirmed);

        debug!(
            session_id = %session_id,
            history_len = optimistic.len(),
            "Sending message to advisor"
        );

        match self.service.chat(&session_id, optimistic.messages()).await {
            Ok(history) => {
                let reconciled = ConversationLog::from_server(history);
                info!(
                    session_id = %session_id,
                    history_len = reconciled.len(),
                    "Conversation reconciled with advisor history"
                );
                let published = reconciled.clone();
                guard.complete(move |s| s.log = published);
                Ok(reconciled)
            }
            Err(source) => {
                warn!(
                    session_id = %session_id,
                    error = %source,
                    "Advisor chat failed, rolling back optimistic message"
                );
                let err = ConversationError::from_service(Operation::SendMessage, source);
                let notice = err.notice();
                guard.abort(move |s| s.notice = notice);
                Err(err)
            }
        }
    }
}

/// Holds the busy flag for one operation.
///
/// `complete` and `abort` publish the final state and release the flag in a
/// single update. Dropping the guard without either (the operation future was
/// dropped mid-flight) behaves like `abort` with no further changes.
struct InFlight<'a> {
    state: &'a watch::Sender<ConversationSnapshot>,
    rollback: Option<ConversationLog>,
    released: bool,
}

impl<'a> InFlight<'a> {
    fn new(state: &'a watch::Sender<ConversationSnapshot>) -> Self {
        Self {
            state,
            rollback: None,
            released: false,
        }
    }

    /// Restore `confirmed` as the log unless the operation completes.
    fn with_rollback(state: &'a watch::Sender<ConversationSnapshot>, confirmed: ConversationLog) -> Self {
        Self {
            state,
            rollback: Some(confirmed),
            released: false,
        }
    }

    fn complete(mut self, apply: impl FnOnce(&mut ConversationSnapshot)) {
        self.release(false, apply);
    }

    fn abort(mut self, apply: impl FnOnce(&mut ConversationSnapshot)) {
        self.release(true, apply);
    }

    fn release(&mut self, restore: bool, apply: impl FnOnce(&mut ConversationSnapshot)) {
        let rollback = self.rollback.take();
        self.released = true;
        self.state.send_modify(|s| {
            if let (true, Some(log)) = (restore, rollback) {
                s.log = log;
            }
            apply(s);
            s.busy = false;
        });
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.released {
            debug!("In-flight operation dropped, releasing busy flag");
            self.release(true, |_| {});
        }
    }
}
