use std::num::NonZeroU32;

use glow::HasContext;

/// Snapshot of the pieces of GL state a render pass touches.
///
/// The GL state machine is process-global, so everything the frame bracket
/// changes (render target, viewport, enable bits, bound program and buffers,
/// blend and stencil functions, write masks) has to be put back before
/// control returns to the host application. A snapshot is captured when a
/// frame begins and restored when it ends; the listed state is everything
/// the engine's flush and our own framebuffer handling are known to modify.
pub(crate) struct GlState {
    draw_framebuffer: Option<glow::NativeFramebuffer>,
    read_framebuffer: Option<glow::NativeFramebuffer>,
    viewport: [i32; 4],
    scissor_box: [i32; 4],
    program: Option<glow::NativeProgram>,
    vertex_array: Option<glow::NativeVertexArray>,
    array_buffer: Option<glow::NativeBuffer>,
    active_texture: u32,
    texture_2d: Option<glow::NativeTexture>,
    blend_src_rgb: u32,
    blend_dst_rgb: u32,
    blend_src_alpha: u32,
    blend_dst_alpha: u32,
    // The engine's concave-fill pass leaves its stencil func and ops set
    // (only STENCIL_TEST gets disabled), and its flush forces the color
    // mask on, so all of that is part of the snapshot.
    stencil_front: StencilFace,
    stencil_back: StencilFace,
    color_writemask: [i32; 4],
    blend: bool,
    cull_face: bool,
    depth_test: bool,
    scissor_test: bool,
    stencil_test: bool,
}

impl GlState {
    pub(crate) fn capture(gl: &glow::Context) -> Self {
        unsafe {
            let mut viewport = [0i32; 4];
            gl.get_parameter_i32_slice(glow::VIEWPORT, &mut viewport);
            let mut scissor_box = [0i32; 4];
            gl.get_parameter_i32_slice(glow::SCISSOR_BOX, &mut scissor_box);
            let mut color_writemask = [0i32; 4];
            gl.get_parameter_i32_slice(glow::COLOR_WRITEMASK, &mut color_writemask);

            Self {
                draw_framebuffer: framebuffer_binding(gl, glow::DRAW_FRAMEBUFFER_BINDING),
                read_framebuffer: framebuffer_binding(gl, glow::READ_FRAMEBUFFER_BINDING),
                viewport,
                scissor_box,
                program: non_zero(gl.get_parameter_i32(glow::CURRENT_PROGRAM))
                    .map(glow::NativeProgram),
                vertex_array: non_zero(gl.get_parameter_i32(glow::VERTEX_ARRAY_BINDING))
                    .map(glow::NativeVertexArray),
                array_buffer: non_zero(gl.get_parameter_i32(glow::ARRAY_BUFFER_BINDING))
                    .map(glow::NativeBuffer),
                active_texture: gl.get_parameter_i32(glow::ACTIVE_TEXTURE) as u32,
                texture_2d: non_zero(gl.get_parameter_i32(glow::TEXTURE_BINDING_2D))
                    .map(glow::NativeTexture),
                blend_src_rgb: gl.get_parameter_i32(glow::BLEND_SRC_RGB) as u32,
                blend_dst_rgb: gl.get_parameter_i32(glow::BLEND_DST_RGB) as u32,
                blend_src_alpha: gl.get_parameter_i32(glow::BLEND_SRC_ALPHA) as u32,
                blend_dst_alpha: gl.get_parameter_i32(glow::BLEND_DST_ALPHA) as u32,
                stencil_front: StencilFace::capture(gl, StencilFace::FRONT),
                stencil_back: StencilFace::capture(gl, StencilFace::BACK),
                color_writemask,
                blend: gl.is_enabled(glow::BLEND),
                cull_face: gl.is_enabled(glow::CULL_FACE),
                depth_test: gl.is_enabled(glow::DEPTH_TEST),
                scissor_test: gl.is_enabled(glow::SCISSOR_TEST),
                stencil_test: gl.is_enabled(glow::STENCIL_TEST),
            }
        }
    }

    pub(crate) fn restore(&self, gl: &glow::Context) {
        unsafe {
            gl.bind_framebuffer(glow::DRAW_FRAMEBUFFER, self.draw_framebuffer);
            gl.bind_framebuffer(glow::READ_FRAMEBUFFER, self.read_framebuffer);
            gl.viewport(
                self.viewport[0],
                self.viewport[1],
                self.viewport[2],
                self.viewport[3],
            );
            gl.scissor(
                self.scissor_box[0],
                self.scissor_box[1],
                self.scissor_box[2],
                self.scissor_box[3],
            );
            gl.use_program(self.program);
            gl.bind_vertex_array(self.vertex_array);
            gl.bind_buffer(glow::ARRAY_BUFFER, self.array_buffer);
            // Restore the 2D binding of the unit that was active at capture
            // time, then leave that unit active.
            gl.active_texture(self.active_texture);
            gl.bind_texture(glow::TEXTURE_2D, self.texture_2d);
            gl.blend_func_separate(
                self.blend_src_rgb,
                self.blend_dst_rgb,
                self.blend_src_alpha,
                self.blend_dst_alpha,
            );
            self.stencil_front.restore(gl, glow::FRONT);
            self.stencil_back.restore(gl, glow::BACK);
            gl.color_mask(
                self.color_writemask[0] != 0,
                self.color_writemask[1] != 0,
                self.color_writemask[2] != 0,
                self.color_writemask[3] != 0,
            );
            set_cap(gl, glow::BLEND, self.blend);
            set_cap(gl, glow::CULL_FACE, self.cull_face);
            set_cap(gl, glow::DEPTH_TEST, self.depth_test);
            set_cap(gl, glow::SCISSOR_TEST, self.scissor_test);
            set_cap(gl, glow::STENCIL_TEST, self.stencil_test);
        }
    }
}

/// Stencil function, operations and write mask for one face.
struct StencilFace {
    func: u32,
    reference: i32,
    valuemask: u32,
    fail: u32,
    zfail: u32,
    zpass: u32,
    writemask: u32,
}

impl StencilFace {
    const FRONT: [u32; 7] = [
        glow::STENCIL_FUNC,
        glow::STENCIL_REF,
        glow::STENCIL_VALUE_MASK,
        glow::STENCIL_FAIL,
        glow::STENCIL_PASS_DEPTH_FAIL,
        glow::STENCIL_PASS_DEPTH_PASS,
        glow::STENCIL_WRITEMASK,
    ];
    const BACK: [u32; 7] = [
        glow::STENCIL_BACK_FUNC,
        glow::STENCIL_BACK_REF,
        glow::STENCIL_BACK_VALUE_MASK,
        glow::STENCIL_BACK_FAIL,
        glow::STENCIL_BACK_PASS_DEPTH_FAIL,
        glow::STENCIL_BACK_PASS_DEPTH_PASS,
        glow::STENCIL_BACK_WRITEMASK,
    ];

    fn capture(gl: &glow::Context, pnames: [u32; 7]) -> Self {
        let [func, reference, valuemask, fail, zfail, zpass, writemask] = pnames;
        unsafe {
            Self {
                func: gl.get_parameter_i32(func) as u32,
                reference: gl.get_parameter_i32(reference),
                valuemask: gl.get_parameter_i32(valuemask) as u32,
                fail: gl.get_parameter_i32(fail) as u32,
                zfail: gl.get_parameter_i32(zfail) as u32,
                zpass: gl.get_parameter_i32(zpass) as u32,
                writemask: gl.get_parameter_i32(writemask) as u32,
            }
        }
    }

    fn restore(&self, gl: &glow::Context, face: u32) {
        unsafe {
            gl.stencil_func_separate(face, self.func, self.reference, self.valuemask);
            gl.stencil_op_separate(face, self.fail, self.zfail, self.zpass);
            gl.stencil_mask_separate(face, self.writemask);
        }
    }
}

fn framebuffer_binding(gl: &glow::Context, target: u32) -> Option<glow::NativeFramebuffer> {
    let raw = unsafe { gl.get_parameter_i32(target) };
    non_zero(raw).map(glow::NativeFramebuffer)
}

// Binding queries report 0 for "none"; glow handles are non-zero by type.
fn non_zero(raw: i32) -> Option<NonZeroU32> {
    NonZeroU32::new(raw as u32)
}

fn set_cap(gl: &glow::Context, cap: u32, enabled: bool) {
    unsafe {
        if enabled {
            gl.enable(cap);
        } else {
            gl.disable(cap);
        }
    }
}
