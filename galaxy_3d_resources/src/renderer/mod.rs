/// Renderer module - backend capability and the built-in backends

pub mod renderer;
pub mod headless_renderer;
#[cfg(test)]
pub(crate) mod mock_renderer;

pub use renderer::*;
pub use headless_renderer::HeadlessRenderer;
