use crate::message::Stroke;

/// Stroke history of a room.
///
/// Undo and redo are room-global: they act on the most recent stroke no
/// matter who authored it. Appending a stroke discards everything that was
/// waiting to be redone.
#[derive(Debug, Default, Clone)]
pub struct DrawingLog {
    strokes: Vec<Stroke>,
    redo_buffer: Vec<Stroke>,
}

impl DrawingLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// Undone strokes, the next one to be redone last.
    pub fn redo_buffer(&self) -> &[Stroke] {
        &self.redo_buffer
    }

    pub fn append(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
        self.redo_buffer.clear();
    }

    /// Moves the latest stroke to the redo buffer. `None` when there was
    /// nothing to undo, in which case nothing changed.
    pub fn undo(&mut self) -> Option<&Stroke> {
        let stroke = self.strokes.pop()?;
        self.redo_buffer.push(stroke);
        self.redo_buffer.last()
    }

    pub fn redo(&mut self) -> Option<&Stroke> {
        let stroke = self.redo_buffer.pop()?;
        self.strokes.push(stroke);
        self.strokes.last()
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
        self.redo_buffer.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }
}
