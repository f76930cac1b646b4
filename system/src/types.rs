use euclid::default::Point2D;

pub type ConnectionId = uuid::Uuid;
pub type RoomId = String;
pub type ParticipantId = String;
pub type StrokeId = String;

/// Canvas coordinate. Serialized as an `[x, y]` pair.
pub type Point = Point2D<f32>;

/// Milliseconds since the unix epoch, as reported by the client.
pub type Timestamp = i64;
