//! Generation of resolver type declarations and library SDL from a DMMF
//! schema graph.

mod config;
mod emitter;
mod emptiness;
mod input_type;
mod renderer;
mod sdl;

pub use config::{ConfigError, GeneratorConfig};
pub use emitter::GenerateTypes;
pub use emptiness::EmptinessCheck;
pub use input_type::{Position, ResolvedType, TypeReference, resolve, select_input_type};
pub use sdl::SdlInputs;
