//! Renderer notification port trait.

/// Receives a fire-and-forget refresh hint after each executed trade so an
/// incremental chart redraw can happen. Nothing is returned to the engine;
/// correctness never depends on the renderer.
pub trait RenderPort {
    fn chart_changed(&mut self);
}

/// Renderer that ignores refresh hints, for headless runs.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl RenderPort for NullRenderer {
    fn chart_changed(&mut self) {}
}

/// Counts refresh hints; test double.
#[derive(Debug, Default)]
pub struct CountingRenderer {
    pub notifications: usize,
}

impl RenderPort for CountingRenderer {
    fn chart_changed(&mut self) {
        self.notifications += 1;
    }
}
