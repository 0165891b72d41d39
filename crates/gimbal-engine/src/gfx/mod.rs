//! GPU-facing seams.
//!
//! The engine never talks to a graphics API directly. It hands collapsed
//! matrices and opaque handles to a [`Painter`], obtains handles from a
//! [`ResourceLoader`], and routes handle destruction through the
//! [`ReleaseQueue`] so it always happens on the rendering thread.

mod handle;
mod painter;
mod release;
mod shader;

pub use handle::{ResourceError, ResourceLoader, ShaderId, TextureId};
pub use painter::{Color, Painter};
pub use release::ReleaseQueue;
pub use shader::ShaderContext;
