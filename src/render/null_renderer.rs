use crate::error::ChartResult;
use crate::render::{ChromeFrame, Renderer};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates frame content and keeps the last frame so tests can
/// compare consecutive draw passes.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_frame: Option<ChromeFrame>,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &ChromeFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}
