//! Session and message loop.
//!
//! `TravelAssistant` owns the live sessions and runs one request/response
//! cycle per user message: invoke the active persona, stream its output to the
//! reply sink, follow at most one hand-off per persona, and commit the turn.
//! A failed turn leaves history exactly as it was.

use std::collections::HashSet;
use std::sync::Arc;

use futures::StreamExt;
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use wayfarer_core::{
    ChatMessage, HandoffSignal, LlmRequest, Persona, PersonaId, StreamEvent, WayfarerError,
};
use wayfarer_hooks::{HandoffPayload, HookPipeline, MessagePayload, SessionPayload};
use wayfarer_logging::{ConversationEvent, EventLogger};
use wayfarer_planner::ProviderRegistry;
use wayfarer_routing::{HandoffRouter, RouteDecision, Transition, TransitionTable};

use crate::personas::PersonaRegistry;
use crate::reply::{ReplyEvent, ReplySink};
use crate::session_state::{SessionId, SessionSnapshot, SessionState};
use crate::session_store::SessionStore;

pub const WELCOME_MESSAGE: &str = "\
# ✈️ **Wayfarer Travel Designer** 🌎
🎯 Your personal trip planner, with a team of specialist assistants behind it.

🌟 **What I can help you with:**
- 🗺️ **Discover destinations** that fit your mood and interests.
- ✈️ **Find flights & hotels** with simulated search results.
- 🎭 **Plan activities** and local food experiences.
- 🤝 **Coordinate it all** from first idea to final itinerary.

✨ Behind me are specialists for destinations, bookings and local experiences, \
and I bring in the right one when you need them.

🎒 **Ready?** Tell me about your dream trip, or say \"I want to plan a vacation\" to begin!";

pub const WORKING_MESSAGE: &str = "🧳 Planning your trip...";

/// How a message exchange ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TurnOutcome {
    /// The reply was committed to history.
    Completed {
        reply: String,
        active_agent: PersonaId,
        handoffs: Vec<Transition>,
    },
    /// Backend invocation failed; history is unchanged.
    Failed { error: String },
    /// A pre-message hook refused the message; the backend was not called.
    Rejected { reason: String },
}

impl TurnOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

pub struct TravelAssistant {
    personas: Arc<PersonaRegistry>,
    providers: ProviderRegistry,
    router: HandoffRouter,
    hooks: HookPipeline,
    sessions: SessionStore,
}

impl TravelAssistant {
    pub fn new(personas: Arc<PersonaRegistry>, providers: ProviderRegistry) -> Self {
        let table = TransitionTable::from_personas(personas.iter().map(|p| p.as_ref()));
        Self {
            personas,
            providers,
            router: HandoffRouter::new(table),
            hooks: HookPipeline::default(),
            sessions: SessionStore::new(),
        }
    }

    pub fn with_hooks(mut self, hooks: HookPipeline) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn personas(&self) -> &Arc<PersonaRegistry> {
        &self.personas
    }

    pub fn providers(&self) -> &ProviderRegistry {
        &self.providers
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Start a session with a fresh id. Returns the id and the welcome text.
    pub async fn start_session(&self) -> Result<(SessionId, &'static str), WayfarerError> {
        self.start_session_with_id(Uuid::new_v4().to_string()).await
    }

    /// Start a session under a caller-chosen id. Fails with
    /// `SessionExists` while a session with that id is live.
    pub async fn start_session_with_id(
        &self,
        session_id: impl Into<SessionId>,
    ) -> Result<(SessionId, &'static str), WayfarerError> {
        let entry = self.personas.entry();
        let state = SessionState::new(session_id, &entry);
        let session_id = state.session_id.clone();
        self.sessions.insert(state).await?;

        self.hooks
            .session_start(SessionPayload {
                session_id: session_id.clone(),
                agent: entry.name.clone(),
                is_end: false,
                history_len: 0,
            })
            .await;
        info!(session_id = %session_id, agent = %entry.name, "Session started");

        Ok((session_id, WELCOME_MESSAGE))
    }

    pub async fn end_session(&self, session_id: &str) -> Result<(), WayfarerError> {
        let session = self
            .sessions
            .remove(session_id)
            .await
            .ok_or_else(|| WayfarerError::SessionNotFound(session_id.to_string()))?;
        let state = session.lock().await;

        self.hooks
            .session_end(SessionPayload {
                session_id: state.session_id.clone(),
                agent: state.active_persona.agent_name().to_string(),
                is_end: true,
                history_len: state.history.len(),
            })
            .await;
        info!(session_id = %session_id, "Session ended");
        Ok(())
    }

    pub async fn snapshot(&self, session_id: &str) -> Result<SessionSnapshot, WayfarerError> {
        let session = self
            .sessions
            .get(session_id)
            .await
            .ok_or_else(|| WayfarerError::SessionNotFound(session_id.to_string()))?;
        let state = session.lock().await;
        Ok(state.snapshot())
    }

    /// Process one user message.
    ///
    /// Only an unknown session is reported as `Err`; backend failures are
    /// rendered to the sink and returned as `TurnOutcome::Failed`.
    #[instrument(skip(self, text, sink), fields(session_id = %session_id))]
    pub async fn handle_message(
        &self,
        session_id: &str,
        text: &str,
        sink: &dyn ReplySink,
    ) -> Result<TurnOutcome, WayfarerError> {
        let session = self
            .sessions
            .get(session_id)
            .await
            .ok_or_else(|| WayfarerError::SessionNotFound(session_id.to_string()))?;
        let mut state = session.lock().await;

        sink.send(ReplyEvent::Working(WORKING_MESSAGE.to_string())).await;

        let pre = self
            .hooks
            .pre_message(MessagePayload {
                session_id: session_id.to_string(),
                agent: state.active_persona.agent_name().to_string(),
                role: "user".to_string(),
                content: text.to_string(),
            })
            .await;
        if pre.abort {
            let reason = pre.reason.unwrap_or_else(|| "message rejected".to_string());
            self.report_failure(&state, sink, &WayfarerError::Rejected(reason.clone()))
                .await;
            return Ok(TurnOutcome::Rejected { reason });
        }

        let user_message =
            ChatMessage::user(pre.modified_content.unwrap_or_else(|| text.to_string()));
        // History the backend sees this turn. Committed only on success.
        let mut working = state.history.clone();
        working.push(user_message.clone());

        let mut reply = String::new();
        let mut transitions = Vec::new();
        let mut invoked = HashSet::new();

        loop {
            let persona = self.personas.get(state.active_persona);
            invoked.insert(persona.id);

            let signal = match self.generate(&persona, &working, sink, &mut reply).await {
                Ok(signal) => signal,
                Err(err) => {
                    self.report_failure(&state, sink, &err).await;
                    return Ok(TurnOutcome::Failed {
                        error: err.to_string(),
                    });
                }
            };

            let Some(signal) = signal else { break };
            match self.router.route(persona.id, &signal) {
                RouteDecision::Transition(transition) => {
                    let target = self.personas.get(transition.to);
                    self.accept_handoff(&mut state, &target, &transition.tool_name, sink)
                        .await;
                    transitions.push(transition);
                    if invoked.contains(&target.id) {
                        warn!(agent = %target.name, "Persona already answered this turn");
                        break;
                    }
                }
                RouteDecision::Rejected { reason } => {
                    debug!(%reason, "Hand-off ignored");
                    break;
                }
            }
        }

        let agent = state.active_persona.agent_name().to_string();
        state.commit_turn(user_message.clone(), ChatMessage::assistant(reply.clone()));

        EventLogger::log_event(
            session_id,
            ConversationEvent::Message {
                agent: agent.clone(),
                role: "user".to_string(),
                content: user_message.content,
            },
        );
        EventLogger::log_event(
            session_id,
            ConversationEvent::Message {
                agent: agent.clone(),
                role: "assistant".to_string(),
                content: reply.clone(),
            },
        );

        self.hooks
            .post_message(MessagePayload {
                session_id: session_id.to_string(),
                agent,
                role: "assistant".to_string(),
                content: reply.clone(),
            })
            .await;

        sink.send(ReplyEvent::Committed(reply.clone())).await;
        info!(
            history_len = state.history.len(),
            handoffs = transitions.len(),
            "Turn committed"
        );

        Ok(TurnOutcome::Completed {
            reply,
            active_agent: state.active_persona,
            handoffs: transitions,
        })
    }

    /// Invoke `persona` on `history`, forwarding fragments as they arrive.
    /// Returns the first hand-off signal the backend raised, if any.
    async fn generate(
        &self,
        persona: &Persona,
        history: &[ChatMessage],
        sink: &dyn ReplySink,
        reply: &mut String,
    ) -> Result<Option<HandoffSignal>, WayfarerError> {
        let run_config = &persona.run_config;
        let provider = self.providers.get(&run_config.provider)?;

        let request = LlmRequest {
            model: run_config.model.clone(),
            system_prompt: persona.instructions.clone(),
            messages: history.to_vec(),
            max_tokens: run_config.max_tokens,
            temperature: run_config.temperature,
            handoffs: self.router.handoff_tools(persona),
        };

        debug!(
            agent = %persona.name,
            model = %request.model,
            messages = request.messages.len(),
            "Invoking persona"
        );

        let mut stream = provider
            .stream(&request)
            .await
            .map_err(|e| WayfarerError::Provider {
                provider: provider.name().to_string(),
                message: format!("{e:#}"),
            })?;

        let mut handoff = None;
        while let Some(event) = stream.next().await {
            match event.map_err(|e| WayfarerError::Stream(format!("{e:#}")))? {
                StreamEvent::Delta(text) => {
                    reply.push_str(&text);
                    sink.send(ReplyEvent::Fragment(text)).await;
                }
                StreamEvent::Handoff(signal) => {
                    if handoff.is_none() {
                        handoff = Some(signal);
                    } else {
                        debug!(tool = %signal.tool_name, "Extra hand-off signal ignored");
                    }
                }
            }
        }
        Ok(handoff)
    }

    async fn accept_handoff(
        &self,
        state: &mut SessionState,
        target: &Persona,
        tool_name: &str,
        sink: &dyn ReplySink,
    ) {
        let from = state.active_persona.agent_name().to_string();
        state.switch_to(target);

        EventLogger::log_event(
            &state.session_id,
            ConversationEvent::Handoff {
                from: from.clone(),
                to: target.name.clone(),
            },
        );
        self.hooks
            .handoff(HandoffPayload {
                session_id: state.session_id.clone(),
                from_agent: from.clone(),
                to_agent: target.name.clone(),
                tool_name: tool_name.to_string(),
            })
            .await;

        sink.send(ReplyEvent::Handoff {
            from,
            to: target.name.clone(),
        })
        .await;
    }

    async fn report_failure(&self, state: &SessionState, sink: &dyn ReplySink, err: &WayfarerError) {
        let agent = state.active_persona.agent_name();
        if matches!(err, WayfarerError::Rejected(_)) {
            warn!(agent, error = %err, "Message rejected");
        } else {
            error!(agent, error = %err, "Turn failed");
        }
        EventLogger::log_event(
            &state.session_id,
            ConversationEvent::Error {
                agent: agent.to_string(),
                error_msg: err.to_string(),
            },
        );
        sink.send(ReplyEvent::Error(format!("❌ Error: {err}"))).await;
    }
}
