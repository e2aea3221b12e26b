mod context;
mod frame;
mod render;

pub use context::GpuContext;
pub use frame::FrameTexture;
pub use render::RenderPipeline;
