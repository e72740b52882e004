//! GLES2 square program driven through `glow`.
//!
//! The renderer assumes its GL context is current on the calling thread for
//! its whole lifetime, including `Drop`. Owners keep it inside the scope of
//! the surface that made the context current.

use anyhow::Result;
use glow::HasContext;

use crate::coords::Geometry;
use crate::paint::Color;
use crate::scene::{Transform, QUAD_VERTICES};

use super::canvas::{Canvas, SwapTarget};
use super::shader::{ShaderError, ShaderSources, ShaderStage};

/// Identity; kept as a uniform so the shader matches the classic layout.
const PROJECTION: Transform = Transform::IDENTITY;

struct Locations {
    position: u32,
    projection: Option<glow::UniformLocation>,
    model: Option<glow::UniformLocation>,
    color: Option<glow::UniformLocation>,
}

/// Compiled square program plus the uploaded unit quad.
pub struct GlesRenderer {
    gl: glow::Context,
    program: glow::Program,
    quad_vbo: glow::Buffer,
    loc: Locations,
}

impl GlesRenderer {
    /// Compiles and links `sources`, uploads the quad, and sets the fixed GL
    /// state (back-face culling, depth test with `LEQUAL`).
    ///
    /// Info logs are written to the log even on success; a failed compile or
    /// link is returned with the driver's text.
    pub fn new(gl: glow::Context, sources: &ShaderSources) -> Result<Self, ShaderError> {
        unsafe {
            gl.enable(glow::CULL_FACE);
            gl.enable(glow::DEPTH_TEST);
            // Every quad sits at z = 0; LEQUAL keeps call order as paint order.
            gl.depth_func(glow::LEQUAL);

            log::debug!("GL_VERSION: {}", gl.get_parameter_string(glow::VERSION));
            log::debug!("GL_RENDERER: {}", gl.get_parameter_string(glow::RENDERER));

            let vertex = compile(&gl, ShaderStage::Vertex, sources)?;
            let fragment = match compile(&gl, ShaderStage::Fragment, sources) {
                Ok(s) => s,
                Err(e) => {
                    gl.delete_shader(vertex);
                    return Err(e);
                }
            };

            let linked = link(&gl, vertex, fragment);
            gl.delete_shader(vertex);
            gl.delete_shader(fragment);
            let program = linked?;

            gl.use_program(Some(program));

            let Some(position) = gl.get_attrib_location(program, "position") else {
                gl.delete_program(program);
                return Err(ShaderError::Link {
                    log: "active attribute `position` not found".into(),
                });
            };

            let loc = Locations {
                position,
                projection: gl.get_uniform_location(program, "projection"),
                model: gl.get_uniform_location(program, "model"),
                color: gl.get_uniform_location(program, "color_u"),
            };

            let quad_vbo = match gl.create_buffer() {
                Ok(b) => b,
                Err(msg) => {
                    gl.delete_program(program);
                    return Err(ShaderError::Create(msg));
                }
            };
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(quad_vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(&QUAD_VERTICES),
                glow::STATIC_DRAW,
            );
            gl.vertex_attrib_pointer_f32(loc.position, 2, glow::FLOAT, false, 0, 0);
            gl.enable_vertex_attrib_array(loc.position);

            Ok(Self {
                gl,
                program,
                quad_vbo,
                loc,
            })
        }
    }

    /// Sets the GL viewport to cover `size`.
    pub fn set_viewport(&self, size: Geometry) {
        if size.is_empty() {
            return;
        }
        unsafe { self.gl.viewport(0, 0, size.width, size.height) };
    }

    /// Canvas drawing with this program and presenting through `target`.
    pub fn canvas<'a, T: SwapTarget>(&'a self, target: &'a mut T) -> GlesCanvas<'a, T> {
        GlesCanvas {
            renderer: self,
            target,
        }
    }
}

impl Drop for GlesRenderer {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_buffer(self.quad_vbo);
            self.gl.delete_program(self.program);
        }
    }
}

unsafe fn compile(
    gl: &glow::Context,
    stage: ShaderStage,
    sources: &ShaderSources,
) -> Result<glow::Shader, ShaderError> {
    let kind = match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    };

    unsafe {
        let shader = gl.create_shader(kind).map_err(ShaderError::Create)?;
        gl.shader_source(shader, sources.get(stage));
        gl.compile_shader(shader);

        let info = gl.get_shader_info_log(shader);
        if !gl.get_shader_compile_status(shader) {
            gl.delete_shader(shader);
            return Err(ShaderError::Compile { stage, log: info });
        }

        log::info!("{stage} shader info: {}", info.trim_end());
        Ok(shader)
    }
}

unsafe fn link(
    gl: &glow::Context,
    vertex: glow::Shader,
    fragment: glow::Shader,
) -> Result<glow::Program, ShaderError> {
    unsafe {
        let program = gl.create_program().map_err(ShaderError::Create)?;
        gl.attach_shader(program, vertex);
        gl.attach_shader(program, fragment);
        gl.link_program(program);
        gl.detach_shader(program, vertex);
        gl.detach_shader(program, fragment);

        if !gl.get_program_link_status(program) {
            let log = gl.get_program_info_log(program);
            gl.delete_program(program);
            return Err(ShaderError::Link { log });
        }

        Ok(program)
    }
}

/// One frame's worth of GL draws, presented via a [`SwapTarget`].
pub struct GlesCanvas<'a, T: SwapTarget> {
    renderer: &'a GlesRenderer,
    target: &'a mut T,
}

impl<T: SwapTarget> Canvas for GlesCanvas<'_, T> {
    fn clear(&mut self, color: Color) {
        let gl = &self.renderer.gl;
        unsafe {
            gl.clear_color(color.r, color.g, color.b, color.a);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
    }

    fn fill_quad(&mut self, model: &Transform, color: Color) {
        let r = self.renderer;
        let gl = &r.gl;
        unsafe {
            gl.uniform_matrix_4_f32_slice(r.loc.projection.as_ref(), false, PROJECTION.as_array());
            gl.uniform_matrix_4_f32_slice(r.loc.model.as_ref(), false, model.as_array());
            gl.uniform_4_f32_slice(r.loc.color.as_ref(), &color.to_array());

            gl.bind_buffer(glow::ARRAY_BUFFER, Some(r.quad_vbo));
            gl.vertex_attrib_pointer_f32(r.loc.position, 2, glow::FLOAT, false, 0, 0);
            gl.enable_vertex_attrib_array(r.loc.position);
            gl.draw_arrays(glow::TRIANGLE_FAN, 0, QUAD_VERTICES.len() as i32);
        }
    }

    fn present(&mut self) -> Result<()> {
        self.target.swap()
    }
}
