pub mod catalog;
pub mod preferences;
pub mod projection;
pub mod settings_tree;
pub mod stats;
