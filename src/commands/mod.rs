pub mod serve;

pub use serve::handle_serve;
