/// Scene layout, smoothing and atmosphere tuning constants.
///
/// These constants express intended behavior (offsets along the travel axis,
/// blend windows, per-frame damping) and keep magic numbers out of the
/// stations and the composer.

// Station offsets along the travel axis (world Z). Non-increasing.
pub const STATION_Z_INTRO: f32 = 0.0;
pub const STATION_Z_MESSAGING: f32 = -25.0;
pub const STATION_Z_GAME: f32 = -50.0;
pub const STATION_Z_FINANCE: f32 = -75.0;
pub const STATION_Z_ABOUT: f32 = -100.0;

// Travel smoothing
pub const TRAVEL_DAMPING_PER_FRAME: f32 = 0.1; // fraction of remaining distance closed each frame
pub const TRAVEL_REFERENCE_FPS: f32 = 60.0; // frame rate the per-frame damping was tuned at

// Game station scroll window (shared by the atmosphere blend and the cannonball)
pub const GAME_WINDOW_START: f32 = 0.35;
pub const GAME_WINDOW_END: f32 = 0.65;
pub const GAME_WINDOW_MID: f32 = 0.5;

// Atmosphere endpoints: base (dark blue) and game (darker, green-ish)
pub const BG_BASE: [f32; 3] = [0.039, 0.039, 0.059];
pub const BG_GAME: [f32; 3] = [0.051, 0.063, 0.051];
pub const FOG_NEAR_BASE: f32 = 20.0;
pub const FOG_NEAR_GAME: f32 = 15.0;
pub const FOG_FAR_BASE: f32 = 100.0;
pub const FOG_FAR_GAME: f32 = 60.0;
pub const AMBIENT_BASE: f32 = 0.3;
pub const AMBIENT_GAME: f32 = 0.25;
pub const DIRECTIONAL_BASE: f32 = 0.5;
pub const DIRECTIONAL_GAME: f32 = 0.4;
pub const DIRECTIONAL_LIGHT_POS: [f32; 3] = [10.0, 10.0, 5.0];

// Cannonball arc
pub const PROJECTILE_X_START: f32 = 0.0;
pub const PROJECTILE_X_END: f32 = 12.0;
pub const PROJECTILE_Y_START: f32 = 0.5;
pub const PROJECTILE_ARC_HEIGHT: f32 = 2.5;
pub const PROJECTILE_TURNS: f32 = 3.0; // full revolutions over the arc
pub const PROJECTILE_SCALE_BASE: f32 = 0.8;
pub const PROJECTILE_SCALE_VARIANCE: f32 = 0.2;
pub const PROJECTILE_VISIBLE_MIN: f32 = 0.02;
pub const PROJECTILE_VISIBLE_MAX: f32 = 0.98;

// Camera
pub const CAMERA_Z: f32 = 10.0;
pub const CAMERA_FOV_Y_DEG: f32 = 60.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 200.0;

// Canvas
pub const DEFAULT_MAX_DEVICE_PIXEL_RATIO: f64 = 2.0;

// Renderer limits
pub const MAX_POINT_LIGHTS: usize = 16;
pub const MAX_DRAW_ITEMS: usize = 512;

// Intro star field
pub const STAR_COUNT: usize = 12;
pub const STAR_SEED: u64 = 42;

// Texture assets (logical paths, resolved against the base path)
pub const TEX_PARLEY_SCREEN: &str = "/textures/parley-screen.png";
pub const TEX_TANK: &str = "/textures/tanksinc-tank.png";
pub const TEX_CANNONBALL: &str = "/textures/tanksinc-cannonball.png";
pub const TEX_FLOOR: &str = "/textures/tanksinc-floor.png";
