/*!
# Galaxy 3D Resources

Named-resource caching and lifecycle core for the Galaxy 3D engine.

Backend resources (textures, materials) are identified by name, shared
through reference counting and stored in fixed-capacity caches whose
bookkeeping is carved out of one allocation per cache at startup. Nothing
resizes after initialisation.

## Architecture

- **TaggedAllocator**: Allocation accounting per `MemoryTag`
- **Arena**: Bump allocator carving sub-regions out of one block
- **HashIndex**: Fixed-capacity, direct-addressed string-keyed table
- **ResourceCache**: Reference-counted cache generic over the resource type
- **Renderer**: Backend capability creating and destroying resources
- **ResourceSystems**: Explicit context owning all of the above

All access is single-threaded: callers serialize every call, normally from
the simulation/render thread.
*/

// Internal modules
mod error;
mod engine;
mod resource_systems;
pub mod log;
pub mod memory;
pub mod containers;
pub mod renderer;
pub mod resource;
pub mod utils;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging front door
    pub use crate::engine::Engine;

    // Resource systems context
    pub use crate::resource_systems::{ResourceSystems, ResourceSystemsConfig};

    // Renderer capability
    pub use crate::renderer::Renderer;

    // Logging sub-module (types only; the engine_* macros are exported at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Memory accounting and arenas
    pub mod memory {
        pub use crate::memory::*;
    }

    // Fixed-capacity containers
    pub mod containers {
        pub use crate::containers::*;
    }

    // Render sub-module with the renderer capability and backends
    pub mod render {
        pub use crate::renderer::*;
    }

    // Resource sub-module
    pub mod resource {
        pub use crate::resource::*;
    }
}

// Re-export math library at crate root
pub use glam;
