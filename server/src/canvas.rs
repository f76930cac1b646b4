use system::{ConnectionId, RoomId, ServerEvent, StreamPoint, Stroke};

use crate::broadcast::BroadcastRouter;
use crate::session_registry::SessionRegistry;

// Every handler here is a silent no-op when the room does not exist.

pub fn append_stroke(
    registry: &mut SessionRegistry,
    router: &BroadcastRouter,
    from: &ConnectionId,
    room_id: &RoomId,
    stroke: Stroke,
) {
    if let Some(room) = registry.get_mut(room_id) {
        room.log.append(stroke.clone());
        router.emit(from, &room.connections, ServerEvent::StrokeAdded { stroke });
    }
}

pub fn undo(
    registry: &mut SessionRegistry,
    router: &BroadcastRouter,
    from: &ConnectionId,
    room_id: &RoomId,
) -> bool {
    let room = match registry.get_mut(room_id) {
        Some(room) => room,
        None => return false,
    };
    match room.log.undo() {
        Some(stroke) => log::debug!("Room {} undid stroke {}", room_id, stroke.id),
        None => return false,
    }
    router.emit(
        from,
        &room.connections,
        ServerEvent::CanvasState {
            strokes: room.log.strokes().to_vec(),
        },
    );
    true
}

pub fn redo(
    registry: &mut SessionRegistry,
    router: &BroadcastRouter,
    from: &ConnectionId,
    room_id: &RoomId,
) -> bool {
    let room = match registry.get_mut(room_id) {
        Some(room) => room,
        None => return false,
    };
    match room.log.redo() {
        Some(stroke) => log::debug!("Room {} redid stroke {}", room_id, stroke.id),
        None => return false,
    }
    router.emit(
        from,
        &room.connections,
        ServerEvent::CanvasState {
            strokes: room.log.strokes().to_vec(),
        },
    );
    true
}

pub fn clear(
    registry: &mut SessionRegistry,
    router: &BroadcastRouter,
    from: &ConnectionId,
    room_id: &RoomId,
) {
    if let Some(room) = registry.get_mut(room_id) {
        room.log.clear();
        router.emit(from, &room.connections, ServerEvent::CanvasCleared);
    }
}

/// In-progress points are relayed and forgotten; only `append_stroke`
/// writes history.
pub fn stream_point(
    registry: &SessionRegistry,
    router: &BroadcastRouter,
    from: &ConnectionId,
    room_id: &RoomId,
    point: StreamPoint,
) {
    if let Some(room) = registry.get(room_id) {
        router.emit(from, &room.connections, ServerEvent::StrokeStream(point));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use system::uuid::Uuid;
    use system::{Point, Tool};
    use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

    fn stroke(id: &str) -> Stroke {
        Stroke {
            id: id.into(),
            points: vec![Point::new(0.0, 0.0)],
            color: "#000".into(),
            width: 1.0,
            tool: Tool::Pen,
            author_id: "a".into(),
            timestamp: 0,
        }
    }

    fn setup() -> (
        SessionRegistry,
        BroadcastRouter,
        ConnectionId,
        UnboundedReceiver<ServerEvent>,
        ConnectionId,
        UnboundedReceiver<ServerEvent>,
    ) {
        let mut registry = SessionRegistry::new();
        let mut router = BroadcastRouter::new();
        let (tx_a, rx_a) = unbounded_channel();
        let (tx_b, rx_b) = unbounded_channel();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        router.register(a, tx_a);
        router.register(b, tx_b);
        let room = registry.get_or_create(&"r1".to_string());
        room.attach(a);
        room.attach(b);
        (registry, router, a, rx_a, b, rx_b)
    }

    #[test]
    fn append_is_not_echoed() {
        let (mut registry, router, a, mut rx_a, _b, mut rx_b) = setup();
        append_stroke(&mut registry, &router, &a, &"r1".into(), stroke("s1"));
        assert!(rx_a.try_recv().is_err());
        assert_eq!(
            rx_b.try_recv().ok(),
            Some(ServerEvent::StrokeAdded {
                stroke: stroke("s1")
            })
        );
    }

    #[test]
    fn empty_undo_and_redo_stay_quiet() {
        let (mut registry, router, a, mut rx_a, _b, mut rx_b) = setup();
        assert!(!undo(&mut registry, &router, &a, &"r1".into()));
        assert!(!redo(&mut registry, &router, &a, &"r1".into()));
        assert!(rx_a.try_recv().is_err());
        assert!(rx_b.try_recv().is_err());
    }

    #[test]
    fn undo_reaches_the_actor() {
        let (mut registry, router, a, mut rx_a, _b, mut rx_b) = setup();
        append_stroke(&mut registry, &router, &a, &"r1".into(), stroke("s1"));
        let _ = rx_b.try_recv();

        assert!(undo(&mut registry, &router, &a, &"r1".into()));
        let expected = Some(ServerEvent::CanvasState { strokes: vec![] });
        assert_eq!(rx_a.try_recv().ok(), expected);
        assert_eq!(rx_b.try_recv().ok(), expected);
    }

    #[test]
    fn unknown_room_is_ignored() {
        let (mut registry, router, a, _rx_a, _b, mut rx_b) = setup();
        let nowhere: RoomId = "nowhere".into();
        append_stroke(&mut registry, &router, &a, &nowhere, stroke("s1"));
        clear(&mut registry, &router, &a, &nowhere);
        assert!(!undo(&mut registry, &router, &a, &nowhere));
        assert!(rx_b.try_recv().is_err());
        assert!(registry.get(&nowhere).is_none());
    }

    #[test]
    fn stream_points_are_never_stored() {
        let (mut registry, router, a, _rx_a, _b, mut rx_b) = setup();
        stream_point(
            &registry,
            &router,
            &a,
            &"r1".into(),
            StreamPoint {
                stroke_id: "s1".into(),
                author_id: "a".into(),
                point: Point::new(3.0, 4.0),
                color: "#000".into(),
                width: 1.0,
                tool: Tool::Pen,
                is_start: true,
            },
        );
        assert!(matches!(rx_b.try_recv(), Ok(ServerEvent::StrokeStream(_))));
        let room = registry.get_mut(&"r1".to_string()).expect("");
        assert!(room.log.is_empty());
    }

    #[test]
    fn clear_reaches_everyone() {
        let (mut registry, router, a, mut rx_a, _b, mut rx_b) = setup();
        append_stroke(&mut registry, &router, &a, &"r1".into(), stroke("s1"));
        let _ = rx_b.try_recv();
        clear(&mut registry, &router, &a, &"r1".into());
        assert_eq!(rx_a.try_recv().ok(), Some(ServerEvent::CanvasCleared));
        assert_eq!(rx_b.try_recv().ok(), Some(ServerEvent::CanvasCleared));
        assert!(registry.get(&"r1".to_string()).map(|r| r.log.is_empty()).unwrap_or(false));
    }
}
