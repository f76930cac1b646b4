use actix::{Actor, ActorContext, AsyncContext, Handler, Message, Running, StreamHandler};
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use actix_web_actors::ws::{CloseCode, CloseReason};

use system::uuid::Uuid;
use system::{ClientCommand, ConnectionId, ServerEvent};

use crate::connection_tx_storage::ConnectionTx;
use crate::server::{ServerCommand, ServerTx};

#[derive(Debug)]
pub enum ConnectionCommand {
    Connect {
        connection_id: ConnectionId,
        tx: ConnectionTx,
    },
    Disconnect {
        from: ConnectionId,
    },
    ClientCommand {
        from: ConnectionId,
        command: ClientCommand,
    },
}

#[derive(Message)]
#[rtype(result = "()")]
struct ConnectionActorMessage(ServerEvent);

struct ConnectionActor {
    connection_id: ConnectionId,
    srv_tx: ServerTx,
}

impl ConnectionActor {
    fn new(srv_tx: ServerTx) -> Self {
        Self {
            connection_id: Uuid::new_v4(),
            srv_tx,
        }
    }

    /// Returns false once the server loop is gone.
    fn send_to_server(&self, command: ConnectionCommand) -> bool {
        if self.srv_tx.send(ServerCommand::Connection(command)).is_err() {
            log::error!(
                "Server loop is gone, connection {} cannot reach it",
                self.connection_id
            );
            return false;
        }
        true
    }
}

impl Actor for ConnectionActor {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<ServerEvent>();

        // Queued ahead of every frame this socket sends, so the server always
        // knows the connection before its first command.
        if !self.send_to_server(ConnectionCommand::Connect {
            connection_id: self.connection_id,
            tx,
        }) {
            ctx.stop();
            return;
        }

        let addr = ctx.address().recipient();
        let connection_id = self.connection_id;

        tokio::spawn(async move {
            log::debug!("Egress pump for {} started", connection_id);
            while let Some(event) = rx.recv().await {
                addr.do_send(ConnectionActorMessage(event));
            }
            log::debug!("Egress pump for {} terminated", connection_id);
        });
    }

    fn stopping(&mut self, _: &mut Self::Context) -> Running {
        self.send_to_server(ConnectionCommand::Disconnect {
            from: self.connection_id,
        });
        Running::Stop
    }
}

/// Ingress
impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for ConnectionActor {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(msg)) => ctx.pong(&msg),
            Ok(ws::Message::Text(text)) => match ClientCommand::from_json(&text) {
                Ok(command) => {
                    self.send_to_server(ConnectionCommand::ClientCommand {
                        from: self.connection_id,
                        command,
                    });
                }
                Err(err) => {
                    log::warn!(
                        "Dropping malformed frame from {}: {}",
                        self.connection_id,
                        err
                    );
                }
            },
            Ok(ws::Message::Binary(bin)) => {
                log::warn!(
                    "Binary frame ({} bytes) from {} is not supported",
                    bin.len(),
                    self.connection_id
                );
                ctx.close(Some(CloseReason {
                    code: CloseCode::Unsupported,
                    description: Some("expected JSON text frames".into()),
                }));
                ctx.stop();
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Err(err) => {
                log::warn!("Protocol error on {}: {}", self.connection_id, err);
                ctx.stop();
            }
            _ => (),
        }
    }
}

/// Egress
impl Handler<ConnectionActorMessage> for ConnectionActor {
    type Result = ();

    fn handle(
        &mut self,
        msg: ConnectionActorMessage,
        ctx: &mut ws::WebsocketContext<Self>,
    ) -> Self::Result {
        let event = msg.0;
        log::debug!("Egress to {}: {}", self.connection_id, event.kind());
        match event.to_json() {
            Ok(text) => ctx.text(text),
            Err(err) => log::error!("Cannot serialize {}: {}", event.kind(), err),
        }
    }
}

pub async fn ws_index(
    req: HttpRequest,
    stream: web::Payload,
    srv_tx: web::Data<ServerTx>,
) -> Result<HttpResponse, Error> {
    ws::start(ConnectionActor::new(srv_tx.get_ref().clone()), &req, stream)
}
