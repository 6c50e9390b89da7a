#[macro_use]
extern crate tracing;

pub mod background;
pub mod camera;
pub mod march;
pub mod math;
pub mod normal;
pub mod parsing;
pub mod profile;
pub mod renderer;
pub mod scene;
pub mod sdf;
pub mod shader;
pub mod tonemap;
pub mod vec2d;
