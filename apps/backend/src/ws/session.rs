use std::collections::HashMap;
use std::str::FromStr;
use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::{ConnectionId, Role, SessionId, SessionSnapshot, Side};
use crate::errors::domain::DraftError;
use crate::state::app_state::AppState;
use crate::ws::hub::HubEvent;
use crate::ws::protocol::{ClientMsg, ErrorCode, ServerMsg, PROTOCOL_VERSION};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let session = WsSession::new(Uuid::new_v4(), app_state);
    ws::start(session, &req, stream)
}

/// One websocket connection: a participant in zero or more sessions.
pub struct WsSession {
    conn_id: ConnectionId,
    app_state: web::Data<AppState>,

    /// Highest snapshot version sent per session; older ones are dropped.
    last_sent: HashMap<SessionId, u64>,

    last_heartbeat: Instant,
    hello_done: bool,
}

impl WsSession {
    fn new(conn_id: ConnectionId, app_state: web::Data<AppState>) -> Self {
        Self {
            conn_id,
            app_state,
            last_sent: HashMap::new(),
            last_heartbeat: Instant::now(),
            hello_done: false,
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound message"),
        }
    }

    fn send_error_and_close(
        &self,
        ctx: &mut ws::WebsocketContext<Self>,
        code: ErrorCode,
        message: impl Into<String>,
    ) {
        let msg = ServerMsg::Error {
            code,
            message: message.into(),
        };
        Self::send_json(ctx, &msg);
        ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
        ctx.stop();
    }

    fn reject(&self, ctx: &mut ws::WebsocketContext<Self>, err: DraftError) {
        debug!(conn_id = %self.conn_id, error = %err, "[WS SESSION] request rejected");
        Self::send_json(
            ctx,
            &ServerMsg::Rejected {
                code: err.code(),
                message: err.to_string(),
            },
        );
    }

    /// Send a snapshot unless this connection already saw that version.
    fn send_state(&mut self, ctx: &mut ws::WebsocketContext<Self>, session: SessionSnapshot) {
        let last = self.last_sent.entry(session.session_id).or_insert(0);
        if session.version > 0 && session.version <= *last {
            return;
        }
        *last = session.version;
        Self::send_json(
            ctx,
            &ServerMsg::SessionState {
                version: session.version,
                session,
            },
        );
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(conn_id = %actor.conn_id, "[WS SESSION] heartbeat timed out");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    fn handle_command(&mut self, cmd: ClientMsg, ctx: &mut ws::WebsocketContext<Self>) {
        if let ClientMsg::Hello { protocol } = cmd {
            if protocol != PROTOCOL_VERSION {
                self.send_error_and_close(ctx, ErrorCode::BadProtocol, "Unsupported protocol version");
                return;
            }
            self.hello_done = true;
            Self::send_json(
                ctx,
                &ServerMsg::HelloAck {
                    protocol: PROTOCOL_VERSION,
                    connection_id: self.conn_id,
                },
            );
            return;
        }

        if !self.hello_done {
            self.send_error_and_close(ctx, ErrorCode::BadRequest, "Must send hello first");
            return;
        }

        let directory = self.app_state.directory.clone();
        let conn_id = self.conn_id;

        match cmd {
            ClientMsg::Hello { .. } => {}

            ClientMsg::CreateSession { name, side } => {
                let result = parse_side(&side).and_then(|side| directory.create(conn_id, &name, side));
                match result {
                    Ok(snapshot) => {
                        let session_id = snapshot.session_id;
                        self.app_state
                            .registry
                            .attach(session_id, conn_id, ctx.address().recipient());
                        let side = snapshot
                            .participants
                            .iter()
                            .find(|p| p.connection_id == conn_id)
                            .map(|p| p.side);
                        if let Some(side) = side {
                            Self::send_json(ctx, &ServerMsg::SessionJoined { session_id, side });
                        }
                        Self::send_json(ctx, &ServerMsg::Waiting { session_id });

                        // An opponent may have joined before we attached.
                        if let Ok(latest) = directory.snapshot(session_id) {
                            if latest.version > 0 {
                                self.send_state(ctx, latest);
                            }
                        }
                    }
                    Err(err) => self.reject(ctx, err),
                }
            }

            ClientMsg::JoinSession { session_id, side } => {
                let parsed = parse_session_id(&session_id)
                    .and_then(|id| parse_side(&side).map(|side| (id, side)));
                let (session_id, side) = match parsed {
                    Ok(v) => v,
                    Err(err) => return self.reject(ctx, err),
                };

                // Attach first so the activation broadcast reaches us too.
                let registry = self.app_state.registry.clone();
                let was_attached = registry.is_attached(session_id, conn_id);
                registry.attach(session_id, conn_id, ctx.address().recipient());
                match directory.join(conn_id, session_id, side) {
                    Ok(_) => {
                        Self::send_json(ctx, &ServerMsg::SessionJoined { session_id, side });
                    }
                    Err(err) => {
                        if !was_attached {
                            registry.detach(session_id, conn_id);
                        }
                        self.reject(ctx, err);
                    }
                }
            }

            ClientMsg::Ban {
                session_id,
                item_id,
            } => {
                let result = parse_session_id(&session_id)
                    .and_then(|id| directory.ban(conn_id, id, &item_id));
                if let Err(err) = result {
                    self.reject(ctx, err);
                }
            }

            ClientMsg::Pick {
                session_id,
                item_id,
                role,
            } => {
                let result = parse_session_id(&session_id).and_then(|id| {
                    let role = parse_role(role.as_deref())?;
                    directory.pick(conn_id, id, &item_id, role)
                });
                if let Err(err) = result {
                    self.reject(ctx, err);
                }
            }

            ClientMsg::Reset { session_id } => {
                let result =
                    parse_session_id(&session_id).and_then(|id| directory.reset(conn_id, id));
                if let Err(err) = result {
                    self.reject(ctx, err);
                }
            }

            ClientMsg::GetSnapshot { session_id } => {
                match parse_session_id(&session_id).and_then(|id| directory.snapshot(id)) {
                    Ok(snapshot) => {
                        self.last_sent
                            .entry(snapshot.session_id)
                            .and_modify(|v| *v = (*v).max(snapshot.version))
                            .or_insert(snapshot.version);
                        Self::send_json(
                            ctx,
                            &ServerMsg::SessionState {
                                version: snapshot.version,
                                session: snapshot,
                            },
                        );
                    }
                    Err(err) => self.reject(ctx, err),
                }
            }

            ClientMsg::ListSessions => {
                Self::send_json(
                    ctx,
                    &ServerMsg::OpenSessions {
                        sessions: directory.list_open(),
                    },
                );
            }
        }
    }
}

fn parse_session_id(raw: &str) -> Result<SessionId, DraftError> {
    SessionId::from_str(raw)
}

fn parse_side(raw: &str) -> Result<Side, DraftError> {
    raw.parse::<Side>()
        .map_err(|_| DraftError::SideInvalid(raw.to_string()))
}

fn parse_role(raw: Option<&str>) -> Result<Role, DraftError> {
    let raw = raw.ok_or_else(|| DraftError::RoleInvalid("missing".to_string()))?;
    raw.parse::<Role>()
        .map_err(|_| DraftError::RoleInvalid(raw.to_string()))
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(conn_id = %self.conn_id, "[WS SESSION] started");
        self.app_state.registry.register_connection(self.conn_id);
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.app_state.registry.unregister_connection(self.conn_id);
        let abandoned = self.app_state.directory.leave(self.conn_id);
        info!(
            conn_id = %self.conn_id,
            abandoned = abandoned.len(),
            "[WS SESSION] stopped"
        );
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();
                match serde_json::from_str::<ClientMsg>(&text) {
                    Ok(cmd) => self.handle_command(cmd, ctx),
                    Err(_) => self.send_error_and_close(ctx, ErrorCode::BadRequest, "Malformed JSON"),
                }
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                self.send_error_and_close(ctx, ErrorCode::BadRequest, "Binary not supported");
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(conn_id = %self.conn_id, error = %err, "[WS SESSION] protocol error");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}

impl Handler<HubEvent> for WsSession {
    type Result = ();

    fn handle(&mut self, msg: HubEvent, ctx: &mut Self::Context) -> Self::Result {
        match msg {
            HubEvent::SessionState(snapshot) => {
                self.send_state(ctx, (*snapshot).clone());
            }
            HubEvent::SessionClosed { session_id } => {
                self.last_sent.remove(&session_id);
                Self::send_json(ctx, &ServerMsg::SessionClosed { session_id });
            }
        }
    }
}
