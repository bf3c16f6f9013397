use crate::media::Media;
use crate::traits::component::Component;

/// Anything that declares media. This is all a
/// [`MediaContainer`](crate::MediaContainer) requires of its items.
pub trait HasMedia {
    fn media(&self) -> Media;
}

impl<T: Component + ?Sized> HasMedia for T {
    fn media(&self) -> Media {
        Component::media(self)
    }
}
