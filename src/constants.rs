//! Application-wide constants
//!
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3006;

// =============================================================================
// BACKEND DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;

/// Default Redis URL for the attribute cache
pub const DEFAULT_REDIS_URL: &str = "redis://localhost:6379";

/// Default lifetime of a cached difficulty calculation
pub const DEFAULT_ATTRIBUTE_CACHE_TTL_SECONDS: u64 = 3600;

/// Default osu! API base URL
pub const DEFAULT_OSU_API_URL: &str = "https://osu.ppy.sh";

/// Default calculation engine URL
pub const DEFAULT_CALCULATOR_URL: &str = "http://localhost:3007";

/// Default timeout for outbound HTTP calls
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

// =============================================================================
// REQUEST FIELDS
// =============================================================================

/// Parameter names read by the interceptor chain
pub mod fields {
    pub const KEY: &str = "key";
    pub const GAMEMODE: &str = "gamemode";
    pub const CALCULATION_METHOD: &str = "calculationmethod";
    pub const BEATMAP_ID: &str = "beatmapid";
    pub const BEATMAP_HASH: &str = "beatmaphash";
    pub const MODS: &str = "mods";
    pub const MAX_COMBO: &str = "maxcombo";
    pub const N300: &str = "n300";
    pub const N100: &str = "n100";
    pub const N50: &str = "n50";
    pub const NMISS: &str = "nmiss";
    pub const SLIDER_TICKS_MISSED: &str = "sliderticksmissed";
    pub const SLIDER_ENDS_DROPPED: &str = "sliderendsdropped";
    pub const AIM_SLIDER_CHEESE_PENALTY: &str = "aimslidercheesepenalty";
    pub const TAP_PENALTY: &str = "tappenalty";
    pub const FLASHLIGHT_SLIDER_CHEESE_PENALTY: &str = "flashlightslidercheesepenalty";
    pub const VISUAL_SLIDER_CHEESE_PENALTY: &str = "visualslidercheesepenalty";
    pub const UID: &str = "uid";

    /// Hit count fields, validated as one group
    pub const HIT_COUNTS: [&str; 4] = [N300, N100, N50, NMISS];
}

// =============================================================================
// DOMAIN VALUES
// =============================================================================

/// Length of an MD5 beatmap hash in hexadecimal characters
pub const BEATMAP_HASH_LENGTH: usize = 32;

/// Cache key prefix for difficulty attributes
pub const DIFFICULTY_CACHE_PREFIX: &str = "difficulty";
