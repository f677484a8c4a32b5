pub const RENDER_WIDTH: i32 = 1920;           // Width of the composition (world units)
pub const RENDER_HEIGHT: i32 = 1080;          // Height of the composition (world units)
pub const FPS: u32 = 60;                      // Target frames per second

pub const FRAME_THROTTLE: f64 = 0.033;        // Minimum time between processed scroll frames (~30fps)
pub const CAPTION_SWAP_DELAY: f64 = 0.25;     // Caption text is replaced after the exit animation
pub const RESTART_SETTLE_DELAY: f64 = 0.4;    // Wait for the smooth scroll before reactivating scene 0
pub const CAMERA_TRANSITION: f32 = 1.6;       // Duration of the eased camera move (seconds)
pub const CAPTION_FADE: f32 = 0.25;           // Caption fade in/out (seconds)
pub const SMOOTH_SCROLL_DURATION: f32 = 0.35; // Duration of a programmatic smooth scroll

pub const REFERENCE_LINE: f32 = 0.55;         // Fraction of the viewport height used to pick the active chapter
pub const MAX_PAN_X: f32 = 420.0;             // Dynamic target pans never exceed these offsets
pub const MAX_PAN_Y: f32 = 320.0;
pub const PERSPECTIVE: f32 = 1400.0;          // Perspective distance applied to the camera (px)

pub const CHAPTER_HEIGHT: f32 = 0.9;          // Chapter card height as a fraction of the viewport
pub const CHAPTER_GAP: f32 = 40.0;            // Vertical space between chapter cards (px)

pub const DEFAULT_SCENE_DURATION: f32 = 5.0;  // Used when a scene does not declare a duration
