/// Allocation categories used for memory accounting.
///
/// Every tracked allocation is filed under exactly one tag. The tag has no
/// influence on how memory is obtained, only on which statistics bucket the
/// bytes are added to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemoryTag {
    /// Temporary tag; allocations using it should be re-classed
    Unknown,
    Array,
    Arena,
    HashIndex,
    String,
    Application,
    Job,
    Texture,
    Material,
    Renderer,
    Game,
    Transform,
    Entity,
    Scene,
}

impl MemoryTag {
    /// Number of tags (size of the per-tag statistics table)
    pub const COUNT: usize = 14;

    /// Every tag, in statistics-table order
    pub const ALL: [MemoryTag; MemoryTag::COUNT] = [
        MemoryTag::Unknown,
        MemoryTag::Array,
        MemoryTag::Arena,
        MemoryTag::HashIndex,
        MemoryTag::String,
        MemoryTag::Application,
        MemoryTag::Job,
        MemoryTag::Texture,
        MemoryTag::Material,
        MemoryTag::Renderer,
        MemoryTag::Game,
        MemoryTag::Transform,
        MemoryTag::Entity,
        MemoryTag::Scene,
    ];

    /// Position of this tag in the statistics table
    pub fn index(self) -> usize {
        self as usize
    }

    /// Fixed-width label used by the usage report
    pub fn label(self) -> &'static str {
        match self {
            MemoryTag::Unknown => "UNKNOWN    ",
            MemoryTag::Array => "ARRAY      ",
            MemoryTag::Arena => "ARENA      ",
            MemoryTag::HashIndex => "HASH_INDEX ",
            MemoryTag::String => "STRING     ",
            MemoryTag::Application => "APPLICATION",
            MemoryTag::Job => "JOB        ",
            MemoryTag::Texture => "TEXTURE    ",
            MemoryTag::Material => "MATERIAL   ",
            MemoryTag::Renderer => "RENDERER   ",
            MemoryTag::Game => "GAME       ",
            MemoryTag::Transform => "TRANSFORM  ",
            MemoryTag::Entity => "ENTITY     ",
            MemoryTag::Scene => "SCENE      ",
        }
    }
}
