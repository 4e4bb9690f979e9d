/// WebGL2 rasterization backend
use cubeview_core::{Mesh, RenderBackend, RenderError};
use nalgebra::Matrix4;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as Gl, WebGlBuffer, WebGlProgram, WebGlShader,
    WebGlUniformLocation,
};

const VERTEX_SHADER: &str = r#"#version 300 es
in vec3 vPosition;
in vec3 vColor;

uniform mat4 modelViewMatrix;
uniform mat4 projectionMatrix;

out vec4 fColor;

void main() {
    gl_Position = projectionMatrix * modelViewMatrix * vec4(vPosition, 1.0);
    fColor = vec4(vColor, 1.0);
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 300 es
precision mediump float;

in vec4 fColor;
out vec4 outColor;

void main() {
    outColor = fColor;
}
"#;

/// Draws the cube through a WebGL2 context with one shader program
pub struct WebGlBackend {
    gl: Gl,
    program: WebGlProgram,
    model_view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    buffers: Vec<WebGlBuffer>,
}

impl WebGlBackend {
    /// Acquire a `webgl2` context and prepare the program and fixed state
    pub fn from_canvas(canvas: &HtmlCanvasElement) -> Result<Self, RenderError> {
        let gl = canvas
            .get_context("webgl2")
            .map_err(js_error)?
            .ok_or(RenderError::ContextUnavailable)?
            .dyn_into::<Gl>()
            .map_err(|_| RenderError::ContextUnavailable)?;

        let vertex = compile_shader(&gl, Gl::VERTEX_SHADER, VERTEX_SHADER)?;
        let fragment = compile_shader(&gl, Gl::FRAGMENT_SHADER, FRAGMENT_SHADER)?;
        let program = link_program(&gl, &vertex, &fragment)?;
        gl.use_program(Some(&program));

        gl.viewport(0, 0, canvas.width() as i32, canvas.height() as i32);
        gl.enable(Gl::DEPTH_TEST);
        gl.clear_color(0.0, 0.0, 0.0, 0.5);

        let model_view = gl.get_uniform_location(&program, "modelViewMatrix");
        let projection = gl.get_uniform_location(&program, "projectionMatrix");

        // Identity clip space until a projection is supplied
        let identity = Matrix4::<f32>::identity();
        gl.uniform_matrix4fv_with_f32_array(projection.as_ref(), false, identity.as_slice());
        gl.uniform_matrix4fv_with_f32_array(model_view.as_ref(), false, identity.as_slice());

        Ok(Self {
            gl,
            program,
            model_view,
            projection,
            buffers: Vec::new(),
        })
    }

    fn create_buffer(&mut self, target: u32, data: &[u8]) -> Result<(), RenderError> {
        let buffer = self
            .gl
            .create_buffer()
            .ok_or_else(|| RenderError::Backend("failed to create buffer".to_string()))?;
        self.gl.bind_buffer(target, Some(&buffer));
        self.gl.buffer_data_with_u8_array(target, data, Gl::STATIC_DRAW);
        self.buffers.push(buffer);
        Ok(())
    }

    /// Upload `data` as a 3-component float attribute bound to `name`
    fn upload_attribute(&mut self, name: &str, data: &[f32]) -> Result<(), RenderError> {
        let bytes: Vec<u8> = data.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.create_buffer(Gl::ARRAY_BUFFER, &bytes)?;

        let location = self.gl.get_attrib_location(&self.program, name);
        if location < 0 {
            return Err(RenderError::Shader(format!("attribute {} not found", name)));
        }
        let location = location as u32;
        self.gl
            .vertex_attrib_pointer_with_i32(location, 3, Gl::FLOAT, false, 0, 0);
        self.gl.enable_vertex_attrib_array(location);
        Ok(())
    }
}

impl RenderBackend for WebGlBackend {
    fn upload_mesh(&mut self, mesh: &Mesh) -> Result<(), RenderError> {
        for buffer in self.buffers.drain(..) {
            self.gl.delete_buffer(Some(&buffer));
        }
        self.upload_attribute("vPosition", &mesh.position_data())?;
        self.create_buffer(Gl::ELEMENT_ARRAY_BUFFER, &mesh.indices)?;
        self.upload_attribute("vColor", &mesh.color_data())?;
        Ok(())
    }

    fn clear(&mut self) {
        self.gl.clear(Gl::COLOR_BUFFER_BIT | Gl::DEPTH_BUFFER_BIT);
    }

    fn set_model_view(&mut self, matrix: &Matrix4<f32>) {
        self.gl
            .uniform_matrix4fv_with_f32_array(self.model_view.as_ref(), false, matrix.as_slice());
    }

    fn set_projection(&mut self, matrix: &Matrix4<f32>) {
        self.gl
            .uniform_matrix4fv_with_f32_array(self.projection.as_ref(), false, matrix.as_slice());
    }

    fn draw_indexed(&mut self, index_count: usize) -> Result<(), RenderError> {
        self.gl
            .draw_elements_with_i32(Gl::TRIANGLES, index_count as i32, Gl::UNSIGNED_BYTE, 0);
        match self.gl.get_error() {
            Gl::NO_ERROR => Ok(()),
            code => Err(RenderError::Backend(format!("GL error 0x{:04x}", code))),
        }
    }
}

fn compile_shader(gl: &Gl, kind: u32, source: &str) -> Result<WebGlShader, RenderError> {
    let shader = gl
        .create_shader(kind)
        .ok_or_else(|| RenderError::Shader("unable to create shader object".to_string()))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    let compiled = gl
        .get_shader_parameter(&shader, Gl::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false);
    if compiled {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(RenderError::Shader(log))
    }
}

fn link_program(
    gl: &Gl,
    vertex: &WebGlShader,
    fragment: &WebGlShader,
) -> Result<WebGlProgram, RenderError> {
    let program = gl
        .create_program()
        .ok_or_else(|| RenderError::Shader("unable to create program object".to_string()))?;
    gl.attach_shader(&program, vertex);
    gl.attach_shader(&program, fragment);
    gl.link_program(&program);

    let linked = gl
        .get_program_parameter(&program, Gl::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);
    if linked {
        Ok(program)
    } else {
        let log = gl.get_program_info_log(&program).unwrap_or_default();
        gl.delete_program(Some(&program));
        Err(RenderError::Shader(log))
    }
}

fn js_error(value: JsValue) -> RenderError {
    RenderError::Backend(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}
