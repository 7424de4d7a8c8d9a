pub mod bio;
pub mod bio_tui;
