use actix_web::web;
use actix_web::{HttpResponse, Responder};
use system::RoomId;
use tokio::sync::oneshot;

use crate::admin::AdminCommand;
use crate::error::AdminError;
use crate::server::{ServerCommand, ServerTx};

pub fn configure_room_handlers(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/rooms").route(web::get().to(list_rooms)))
        .service(
            web::resource("/rooms/{room_id}")
                .route(web::get().to(show_room))
                .route(web::delete().to(delete_room)),
        );
}

/// Queues an admin command behind whatever the server loop is processing
/// and waits for its reply.
async fn ask<T>(
    srv_tx: &ServerTx,
    build: impl FnOnce(oneshot::Sender<T>) -> AdminCommand,
) -> Result<T, AdminError> {
    let (tx, rx) = oneshot::channel::<T>();
    srv_tx
        .send(ServerCommand::Admin(build(tx)))
        .map_err(|_| AdminError::ServerUnavailable)?;
    rx.await.map_err(|_| AdminError::ReplyDropped)
}

async fn list_rooms(srv_tx: web::Data<ServerTx>) -> Result<impl Responder, AdminError> {
    let rooms = ask(srv_tx.get_ref(), |tx| AdminCommand::ListRooms { tx }).await?;
    Ok(HttpResponse::Ok().json(rooms))
}

async fn show_room(
    path: web::Path<RoomId>,
    srv_tx: web::Data<ServerTx>,
) -> Result<impl Responder, AdminError> {
    let room_id = path.into_inner();
    let snapshot = ask(srv_tx.get_ref(), |tx| AdminCommand::GetRoom {
        room_id: room_id.clone(),
        tx,
    })
    .await?
    .ok_or(AdminError::RoomNotFound(room_id))?;
    Ok(HttpResponse::Ok().json(snapshot))
}

async fn delete_room(
    path: web::Path<RoomId>,
    srv_tx: web::Data<ServerTx>,
) -> Result<impl Responder, AdminError> {
    let room_id = path.into_inner();
    let deleted = ask(srv_tx.get_ref(), |tx| AdminCommand::DeleteRoom {
        room_id: room_id.clone(),
        tx,
    })
    .await?;
    if deleted {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(AdminError::RoomNotFound(room_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::ConnectionCommand;
    use crate::server::spawn_server;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use system::uuid::Uuid;
    use system::{ClientCommand, RoomSnapshot, ServerEvent};
    use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

    fn join(srv_tx: &ServerTx, room_id: &str) -> UnboundedReceiver<ServerEvent> {
        let (tx, rx) = unbounded_channel();
        let connection_id = Uuid::new_v4();
        srv_tx
            .send(ServerCommand::Connection(ConnectionCommand::Connect {
                connection_id,
                tx,
            }))
            .expect("server loop");
        srv_tx
            .send(ServerCommand::Connection(ConnectionCommand::ClientCommand {
                from: connection_id,
                command: ClientCommand::JoinRoom {
                    room_id: room_id.into(),
                    participant_id: "alice".into(),
                    name: "Alice".into(),
                    color: "#ff0000".into(),
                },
            }))
            .expect("server loop");
        rx
    }

    #[actix_web::test]
    async fn it_lists_and_shows_rooms() {
        let srv_tx = spawn_server();
        let _rx = join(&srv_tx, "demo");
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(srv_tx.clone()))
                .configure(configure_room_handlers),
        )
        .await;

        let req = test::TestRequest::get().uri("/rooms").to_request();
        let rooms: system::serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(rooms[0]["roomId"], "demo");
        assert_eq!(rooms[0]["participants"], 1);

        let req = test::TestRequest::get().uri("/rooms/demo").to_request();
        let snapshot: RoomSnapshot = test::call_and_read_body_json(&app, req).await;
        assert_eq!(snapshot.participants.len(), 1);

        let req = test::TestRequest::get().uri("/rooms/nowhere").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn it_deletes_rooms_and_notifies_members() {
        let srv_tx = spawn_server();
        let mut rx = join(&srv_tx, "demo");
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(srv_tx.clone()))
                .configure(configure_room_handlers),
        )
        .await;

        let req = test::TestRequest::delete().uri("/rooms/demo").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let mut kinds = Vec::new();
        while let Ok(event) = rx.try_recv() {
            kinds.push(event.kind());
        }
        assert_eq!(kinds.last(), Some(&"room-deleted"));

        let req = test::TestRequest::delete().uri("/rooms/demo").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
