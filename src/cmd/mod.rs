pub mod play;
pub mod resume;
pub mod score;
pub mod stats;
