use std::borrow::Cow;
use std::fmt;

/// Pipeline stage a shader belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Source text for the square program.
#[derive(Debug, Clone)]
pub struct ShaderSources {
    pub vertex: Cow<'static, str>,
    pub fragment: Cow<'static, str>,
}

impl ShaderSources {
    /// GLSL ES 1.00 pair for the GLES2 path.
    pub fn gles2() -> Self {
        Self {
            vertex: Cow::Borrowed(include_str!("shaders/square.vert")),
            fragment: Cow::Borrowed(include_str!("shaders/square.frag")),
        }
    }

    /// WGSL pair for the wgpu path. Entry points are `vs_main` and `fs_main`.
    pub fn wgsl() -> Self {
        Self {
            vertex: Cow::Borrowed(include_str!("shaders/square_vs.wgsl")),
            fragment: Cow::Borrowed(include_str!("shaders/square_fs.wgsl")),
        }
    }

    pub fn get(&self, stage: ShaderStage) -> &str {
        match stage {
            ShaderStage::Vertex => &self.vertex,
            ShaderStage::Fragment => &self.fragment,
        }
    }
}

/// Shader program construction failure. Carries the driver's diagnostic text.
#[derive(Debug, Clone, PartialEq)]
pub enum ShaderError {
    Compile { stage: ShaderStage, log: String },
    Link { log: String },
    /// The driver refused to hand out an object name.
    Create(String),
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Compile { stage, log } => {
                write!(f, "{stage} shader failed to compile: {}", log.trim_end())
            }
            ShaderError::Link { log } => {
                write!(f, "shader program failed to link: {}", log.trim_end())
            }
            ShaderError::Create(msg) => write!(f, "failed to create GL object: {msg}"),
        }
    }
}

impl std::error::Error for ShaderError {}
