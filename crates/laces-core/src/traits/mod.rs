pub mod component;
pub mod media;

pub use component::Component;
pub use media::HasMedia;
