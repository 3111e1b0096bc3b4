//! The frame subscription seam.
//!
//! A frame source (a bus interface, a replayed capture) delivers frames one
//! at a time, in bus order, to a [`Listener`]. Each call completes before the
//! next one starts; `&mut self` makes that a compile-time guarantee.

use crate::{CanMessage, Result};

/// Receiver of CAN frame notifications.
pub trait Listener {
    /// Handle one frame. An error means the listener can no longer make
    /// progress (typically its sink failed).
    fn on_message_received(&mut self, msg: &CanMessage) -> Result<()>;

    /// Called once when the frame stream ends.
    fn stop(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Deliver `frames` to `listener` in order, then stop it.
///
/// Delivery ends at the first error, which is returned without calling
/// [`Listener::stop`]. On success the number of frames delivered is returned.
pub fn dispatch<L, I>(listener: &mut L, frames: I) -> Result<usize>
where
    L: Listener + ?Sized,
    I: IntoIterator<Item = CanMessage>,
{
    let mut delivered = 0;
    for msg in frames {
        listener.on_message_received(&msg)?;
        delivered += 1;
    }
    listener.stop()?;
    Ok(delivered)
}
