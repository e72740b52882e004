use anyhow::Result;

use crate::device::Gpu;
use crate::paint::Color;
use crate::render::{Canvas, CLEAR_COLOR};
use crate::scene::Transform;

use super::pass::SquarePass;
use super::square::{SquareInstance, SquareRenderer};

/// Collects one frame of quads and submits them as a single pass on
/// `present`.
pub struct WgpuCanvas<'a, 'w> {
    gpu: &'a mut Gpu<'w>,
    renderer: &'a mut SquareRenderer,
    clear: Color,
    instances: Vec<SquareInstance>,
}

impl<'a, 'w> WgpuCanvas<'a, 'w> {
    pub fn new(gpu: &'a mut Gpu<'w>, renderer: &'a mut SquareRenderer) -> Self {
        Self {
            gpu,
            renderer,
            clear: CLEAR_COLOR,
            instances: Vec::with_capacity(4),
        }
    }
}

impl Canvas for WgpuCanvas<'_, '_> {
    fn clear(&mut self, color: Color) {
        self.clear = color;
        self.instances.clear();
    }

    fn fill_quad(&mut self, model: &Transform, color: Color) {
        self.instances.push(SquareInstance::new(model, color));
    }

    /// Records every collected quad into one pass and presents it.
    ///
    /// Recoverable surface errors drop the frame; only a fatal one is
    /// returned.
    fn present(&mut self) -> Result<()> {
        let format = self.gpu.surface_format();
        let (renderer, clear, instances) = (&mut *self.renderer, self.clear, &self.instances);

        self.gpu.render_frame(|device, queue, encoder, view| {
            let pass = SquarePass {
                device,
                queue,
                format,
                encoder,
                view,
            };
            renderer.render(pass, clear, instances);
        })?;

        self.instances.clear();
        Ok(())
    }
}
