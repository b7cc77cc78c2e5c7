pub mod refresher;
pub mod snapshot_loader;
