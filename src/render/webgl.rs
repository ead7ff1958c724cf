use web_sys::{
    HtmlImageElement, WebGl2RenderingContext, WebGlFramebuffer, WebGlProgram, WebGlShader,
    WebGlTexture, WebGlUniformLocation,
};

/// WebGL2 context plus the handful of calls the effect passes need
pub struct GlContext {
    pub gl: WebGl2RenderingContext,
}

impl GlContext {
    pub fn new(gl: WebGl2RenderingContext) -> Self {
        Self { gl }
    }

    /// Compile one stage; the error carries the driver's info log
    pub fn compile_shader(&self, shader_type: u32, source: &str) -> Result<WebGlShader, String> {
        let gl = &self.gl;
        let stage = match shader_type {
            WebGl2RenderingContext::VERTEX_SHADER => "vertex",
            _ => "fragment",
        };

        let shader = gl
            .create_shader(shader_type)
            .ok_or_else(|| format!("cannot allocate {} shader", stage))?;
        gl.shader_source(&shader, source);
        gl.compile_shader(&shader);

        let compiled = gl
            .get_shader_parameter(&shader, WebGl2RenderingContext::COMPILE_STATUS)
            .as_bool()
            .unwrap_or(false);
        if !compiled {
            let info = gl.get_shader_info_log(&shader).unwrap_or_default();
            gl.delete_shader(Some(&shader));
            return Err(format!("{} shader: {}", stage, info.trim()));
        }
        Ok(shader)
    }

    /// Build a program from the shared vertex stage and an effect's fragment stage
    pub fn create_program(&self, vertex: &str, fragment: &str) -> Result<WebGlProgram, String> {
        let gl = &self.gl;

        let stages = [
            self.compile_shader(WebGl2RenderingContext::VERTEX_SHADER, vertex)?,
            self.compile_shader(WebGl2RenderingContext::FRAGMENT_SHADER, fragment)?,
        ];
        let program = gl.create_program().ok_or("cannot allocate program")?;
        for shader in &stages {
            gl.attach_shader(&program, shader);
        }
        gl.link_program(&program);
        for shader in &stages {
            gl.detach_shader(&program, shader);
            gl.delete_shader(Some(shader));
        }

        let linked = gl
            .get_program_parameter(&program, WebGl2RenderingContext::LINK_STATUS)
            .as_bool()
            .unwrap_or(false);
        if !linked {
            let info = gl.get_program_info_log(&program).unwrap_or_default();
            gl.delete_program(Some(&program));
            return Err(format!("link: {}", info.trim()));
        }
        Ok(program)
    }

    /// Create an empty render-target texture
    pub fn create_texture(&self, width: i32, height: i32) -> Result<WebGlTexture, String> {
        let gl = &self.gl;

        let texture = gl.create_texture().ok_or("Failed to create texture")?;
        gl.bind_texture(WebGl2RenderingContext::TEXTURE_2D, Some(&texture));

        gl.tex_image_2d_with_i32_and_i32_and_i32_and_format_and_type_and_opt_u8_array(
            WebGl2RenderingContext::TEXTURE_2D,
            0,
            WebGl2RenderingContext::RGBA as i32,
            width,
            height,
            0,
            WebGl2RenderingContext::RGBA,
            WebGl2RenderingContext::UNSIGNED_BYTE,
            None,
        ).map_err(|e| format!("Failed to create texture: {:?}", e))?;

        self.set_sampling(WebGl2RenderingContext::CLAMP_TO_EDGE);
        gl.bind_texture(WebGl2RenderingContext::TEXTURE_2D, None);
        Ok(texture)
    }

    /// Upload a decoded image, flipped so that uv (0, 0) is its bottom-left
    pub fn upload_image(&self, image: &HtmlImageElement) -> Result<WebGlTexture, String> {
        let gl = &self.gl;

        let texture = gl.create_texture().ok_or("Failed to create texture")?;
        gl.bind_texture(WebGl2RenderingContext::TEXTURE_2D, Some(&texture));
        gl.pixel_storei(WebGl2RenderingContext::UNPACK_FLIP_Y_WEBGL, 1);

        let uploaded = gl.tex_image_2d_with_u32_and_u32_and_html_image_element(
            WebGl2RenderingContext::TEXTURE_2D,
            0,
            WebGl2RenderingContext::RGBA as i32,
            WebGl2RenderingContext::RGBA,
            WebGl2RenderingContext::UNSIGNED_BYTE,
            image,
        );

        gl.pixel_storei(WebGl2RenderingContext::UNPACK_FLIP_Y_WEBGL, 0);
        uploaded.map_err(|e| format!("Failed to upload image: {:?}", e))?;

        self.set_sampling(WebGl2RenderingContext::CLAMP_TO_EDGE);
        gl.bind_texture(WebGl2RenderingContext::TEXTURE_2D, None);
        Ok(texture)
    }

    /// Linear filtering on the bound texture
    fn set_sampling(&self, wrap: u32) {
        let gl = &self.gl;
        gl.tex_parameteri(
            WebGl2RenderingContext::TEXTURE_2D,
            WebGl2RenderingContext::TEXTURE_MIN_FILTER,
            WebGl2RenderingContext::LINEAR as i32,
        );
        gl.tex_parameteri(
            WebGl2RenderingContext::TEXTURE_2D,
            WebGl2RenderingContext::TEXTURE_MAG_FILTER,
            WebGl2RenderingContext::LINEAR as i32,
        );
        gl.tex_parameteri(
            WebGl2RenderingContext::TEXTURE_2D,
            WebGl2RenderingContext::TEXTURE_WRAP_S,
            wrap as i32,
        );
        gl.tex_parameteri(
            WebGl2RenderingContext::TEXTURE_2D,
            WebGl2RenderingContext::TEXTURE_WRAP_T,
            wrap as i32,
        );
    }

    /// Create a framebuffer with a texture attachment
    pub fn create_framebuffer(&self, texture: &WebGlTexture) -> Result<WebGlFramebuffer, String> {
        let gl = &self.gl;

        let fbo = gl.create_framebuffer().ok_or("Failed to create framebuffer")?;
        gl.bind_framebuffer(WebGl2RenderingContext::FRAMEBUFFER, Some(&fbo));

        gl.framebuffer_texture_2d(
            WebGl2RenderingContext::FRAMEBUFFER,
            WebGl2RenderingContext::COLOR_ATTACHMENT0,
            WebGl2RenderingContext::TEXTURE_2D,
            Some(texture),
            0,
        );

        let status = gl.check_framebuffer_status(WebGl2RenderingContext::FRAMEBUFFER);
        gl.bind_framebuffer(WebGl2RenderingContext::FRAMEBUFFER, None);
        if status != WebGl2RenderingContext::FRAMEBUFFER_COMPLETE {
            return Err(format!("Framebuffer incomplete: {}", status));
        }

        Ok(fbo)
    }

    /// Get uniform location; `None` for uniforms the compiler dropped
    pub fn get_uniform_location(
        &self,
        program: &WebGlProgram,
        name: &str,
    ) -> Option<WebGlUniformLocation> {
        self.gl.get_uniform_location(program, name)
    }

    pub fn uniform_1f(&self, location: Option<&WebGlUniformLocation>, value: f32) {
        self.gl.uniform1f(location, value);
    }

    pub fn uniform_2f(&self, location: Option<&WebGlUniformLocation>, x: f32, y: f32) {
        self.gl.uniform2f(location, x, y);
    }

    pub fn uniform_4fv(&self, location: Option<&WebGlUniformLocation>, data: &[f32; 4]) {
        self.gl.uniform4fv_with_f32_array(location, data);
    }

    pub fn uniform_1i(&self, location: Option<&WebGlUniformLocation>, value: i32) {
        self.gl.uniform1i(location, value);
    }

    /// Bind `texture` to texture unit `unit`
    pub fn bind_texture_unit(&self, unit: u32, texture: Option<&WebGlTexture>) {
        self.gl.active_texture(WebGl2RenderingContext::TEXTURE0 + unit);
        self.gl.bind_texture(WebGl2RenderingContext::TEXTURE_2D, texture);
    }

    pub fn clear(&self, r: f32, g: f32, b: f32, a: f32) {
        self.gl.clear_color(r, g, b, a);
        self.gl.clear(WebGl2RenderingContext::COLOR_BUFFER_BIT);
    }

    pub fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.gl.viewport(x, y, width, height);
    }
}
