use std::rc::Rc;

use glow::HasContext;
use tracing::debug;

use crate::color::Color;
use crate::error::Error;

/// An offscreen GL render target: an RGBA8 color texture plus an 8-bit
/// stencil renderbuffer, attached to one framebuffer object.
///
/// The stencil attachment is not optional; the engine rasterizes fills and
/// strokes through the stencil buffer, so rendering into a framebuffer
/// without one silently produces nothing.
///
/// A `FrameBuffer` owns its three GL handles and deletes them exactly once
/// when dropped. Creation and deletion must happen while the GL context the
/// owning [`Canvas`](crate::Canvas) was built with is current.
pub struct FrameBuffer {
    gl: Rc<glow::Context>,
    framebuffer: glow::NativeFramebuffer,
    color: glow::NativeTexture,
    stencil: glow::NativeRenderbuffer,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    /// Allocates the color texture, stencil renderbuffer and framebuffer,
    /// attaches them, and clears the fresh target to `clear` so it never
    /// holds stale VRAM contents.
    ///
    /// GL bindings that the setup touches are saved and put back, so this is
    /// safe to call mid-frame from host-application code. Any GL failure
    /// along the way releases whatever was already created and reports the
    /// failing stage.
    pub(crate) fn new(
        gl: Rc<glow::Context>,
        width: u32,
        height: u32,
        clear: Color,
    ) -> Result<Self, Error> {
        debug_assert!(width > 0 && height > 0);
        unsafe {
            let prev_framebuffer = gl.get_parameter_i32(glow::DRAW_FRAMEBUFFER_BINDING);
            let prev_texture = gl.get_parameter_i32(glow::TEXTURE_BINDING_2D);
            let prev_renderbuffer = gl.get_parameter_i32(glow::RENDERBUFFER_BINDING);
            let prev_stencil_mask = gl.get_parameter_i32(glow::STENCIL_WRITEMASK) as u32;
            let scissor_was_enabled = gl.is_enabled(glow::SCISSOR_TEST);

            let color = gl
                .create_texture()
                .map_err(|detail| Error::framebuffer("allocating the color texture", detail))?;
            gl.bind_texture(glow::TEXTURE_2D, Some(color));
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA8 as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                None,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::NEAREST as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::NEAREST as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_S,
                glow::CLAMP_TO_EDGE as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_T,
                glow::CLAMP_TO_EDGE as i32,
            );

            let stencil = match gl.create_renderbuffer() {
                Ok(renderbuffer) => renderbuffer,
                Err(detail) => {
                    gl.delete_texture(color);
                    return Err(Error::framebuffer(
                        "allocating the stencil renderbuffer",
                        detail,
                    ));
                }
            };
            gl.bind_renderbuffer(glow::RENDERBUFFER, Some(stencil));
            gl.renderbuffer_storage(
                glow::RENDERBUFFER,
                glow::STENCIL_INDEX8,
                width as i32,
                height as i32,
            );

            let framebuffer = match gl.create_framebuffer() {
                Ok(framebuffer) => framebuffer,
                Err(detail) => {
                    gl.delete_renderbuffer(stencil);
                    gl.delete_texture(color);
                    return Err(Error::framebuffer("allocating the framebuffer", detail));
                }
            };
            gl.bind_framebuffer(glow::FRAMEBUFFER, Some(framebuffer));
            gl.framebuffer_texture_2d(
                glow::FRAMEBUFFER,
                glow::COLOR_ATTACHMENT0,
                glow::TEXTURE_2D,
                Some(color),
                0,
            );
            gl.framebuffer_renderbuffer(
                glow::FRAMEBUFFER,
                glow::STENCIL_ATTACHMENT,
                glow::RENDERBUFFER,
                Some(stencil),
            );

            let status = gl.check_framebuffer_status(glow::FRAMEBUFFER);
            let gl_error = gl.get_error();
            if status != glow::FRAMEBUFFER_COMPLETE || gl_error != glow::NO_ERROR {
                gl.delete_framebuffer(framebuffer);
                gl.delete_renderbuffer(stencil);
                gl.delete_texture(color);
                return Err(Error::framebuffer(
                    "attaching color and stencil",
                    format!("status 0x{status:x}, GL error 0x{gl_error:x}"),
                ));
            }

            if scissor_was_enabled {
                gl.disable(glow::SCISSOR_TEST);
            }
            gl.stencil_mask(0xffff_ffff);
            let [r, g, b, a] = clear.normalize();
            gl.clear_color(r, g, b, a);
            gl.clear_stencil(0);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::STENCIL_BUFFER_BIT);

            gl.stencil_mask(prev_stencil_mask);
            if scissor_was_enabled {
                gl.enable(glow::SCISSOR_TEST);
            }
            gl.bind_framebuffer(glow::FRAMEBUFFER, raw_framebuffer(prev_framebuffer));
            gl.bind_renderbuffer(glow::RENDERBUFFER, raw_renderbuffer(prev_renderbuffer));
            gl.bind_texture(glow::TEXTURE_2D, raw_texture(prev_texture));

            debug!("Allocated {}x{} offscreen framebuffer", width, height);

            Ok(Self {
                gl,
                framebuffer,
                color,
                stencil,
                width,
                height,
            })
        }
    }

    /// Makes this framebuffer the render target for both draw and read
    /// operations.
    pub fn bind(&self) {
        unsafe {
            self.gl
                .bind_framebuffer(glow::FRAMEBUFFER, Some(self.framebuffer));
        }
    }

    /// Rebinds the default framebuffer.
    ///
    /// [`Frame`](crate::Frame) restores the exact previous binding on drop;
    /// this is for callers driving the framebuffer by hand.
    pub fn unbind(&self) {
        unsafe {
            self.gl.bind_framebuffer(glow::FRAMEBUFFER, None);
        }
    }

    /// Clears the color attachment to `color` and the stencil attachment to
    /// zero. The framebuffer must currently be bound.
    ///
    /// The stencil write mask is forced to all-ones first; the engine's flush
    /// leaves it narrowed.
    pub fn clear(&self, color: Color) {
        let [r, g, b, a] = color.normalize();
        unsafe {
            self.gl.stencil_mask(0xffff_ffff);
            self.gl.clear_color(r, g, b, a);
            self.gl.clear_stencil(0);
            self.gl
                .clear(glow::COLOR_BUFFER_BIT | glow::STENCIL_BUFFER_BIT);
        }
    }

    /// Copies the color attachment into the currently bound draw framebuffer.
    ///
    /// The destination rectangle is given in viewport coordinates with the
    /// origin at the top-left, matching the canvas coordinate system; the
    /// conversion to GL's bottom-left window space uses the current viewport.
    /// Scaled copies are filtered linearly, 1:1 copies use nearest sampling.
    /// The read-framebuffer binding is saved and put back.
    pub fn blit(&self, x: f32, y: f32, width: f32, height: f32) {
        let gl = &self.gl;
        unsafe {
            let mut viewport = [0i32; 4];
            gl.get_parameter_i32_slice(glow::VIEWPORT, &mut viewport);
            let prev_read = gl.get_parameter_i32(glow::READ_FRAMEBUFFER_BINDING);
            gl.bind_framebuffer(glow::READ_FRAMEBUFFER, Some(self.framebuffer));

            let dst_width = width.round() as i32;
            let dst_height = height.round() as i32;
            let dst_x0 = viewport[0] + x.round() as i32;
            let dst_y1 = viewport[1] + viewport[3] - y.round() as i32;
            let dst_y0 = dst_y1 - dst_height;
            let dst_x1 = dst_x0 + dst_width;

            let filter = if dst_width == self.width as i32 && dst_height == self.height as i32 {
                glow::NEAREST
            } else {
                glow::LINEAR
            };
            gl.blit_framebuffer(
                0,
                0,
                self.width as i32,
                self.height as i32,
                dst_x0,
                dst_y0,
                dst_x1,
                dst_y1,
                glow::COLOR_BUFFER_BIT,
                filter,
            );

            gl.bind_framebuffer(glow::READ_FRAMEBUFFER, raw_framebuffer(prev_read));
        }
    }

    /// Reads back the color attachment as tightly packed RGBA8 rows, top row
    /// first.
    pub fn read_pixels(&self) -> Vec<u8> {
        let width = self.width as usize;
        let height = self.height as usize;
        let stride = width * 4;
        let mut data = vec![0u8; stride * height];
        let gl = &self.gl;
        unsafe {
            let prev_read = gl.get_parameter_i32(glow::READ_FRAMEBUFFER_BINDING);
            gl.bind_framebuffer(glow::READ_FRAMEBUFFER, Some(self.framebuffer));
            gl.read_pixels(
                0,
                0,
                self.width as i32,
                self.height as i32,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelPackData::Slice(&mut data),
            );
            gl.bind_framebuffer(glow::READ_FRAMEBUFFER, raw_framebuffer(prev_read));
        }

        // GL returns the bottom row first; flip into canvas order.
        for row in 0..height / 2 {
            let top = row * stride;
            let bottom = (height - 1 - row) * stride;
            for offset in 0..stride {
                data.swap(top + offset, bottom + offset);
            }
        }
        data
    }

    /// Width of the render target in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the render target in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The GL framebuffer handle.
    pub fn framebuffer(&self) -> glow::NativeFramebuffer {
        self.framebuffer
    }

    /// The GL handle of the color attachment texture.
    pub fn color_texture(&self) -> glow::NativeTexture {
        self.color
    }

    /// The GL handle of the stencil attachment renderbuffer.
    pub fn stencil_renderbuffer(&self) -> glow::NativeRenderbuffer {
        self.stencil
    }
}

impl Drop for FrameBuffer {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_framebuffer(self.framebuffer);
            self.gl.delete_renderbuffer(self.stencil);
            self.gl.delete_texture(self.color);
        }
    }
}

fn raw_framebuffer(raw: i32) -> Option<glow::NativeFramebuffer> {
    std::num::NonZeroU32::new(raw as u32).map(glow::NativeFramebuffer)
}

fn raw_renderbuffer(raw: i32) -> Option<glow::NativeRenderbuffer> {
    std::num::NonZeroU32::new(raw as u32).map(glow::NativeRenderbuffer)
}

fn raw_texture(raw: i32) -> Option<glow::NativeTexture> {
    std::num::NonZeroU32::new(raw as u32).map(glow::NativeTexture)
}
