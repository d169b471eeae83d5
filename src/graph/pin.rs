//! Pins: the attachment points of a node.
//!
//! Each node kind declares its pins via static `PinDescriptor` arrays. At
//! construction the graph turns them into `Pin`s and assigns their IDs.

use crate::graph::buffer::ImageBuffer;
use crate::graph::id::PinId;

/// Whether a pin is an input or output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinDirection {
    Input,
    Output,
}

/// Static descriptor for a node's pin.
#[derive(Debug, Clone)]
pub struct PinDescriptor {
    pub name: &'static str,
    pub direction: PinDirection,
}

impl PinDescriptor {
    pub const fn input(name: &'static str) -> Self {
        Self {
            name,
            direction: PinDirection::Input,
        }
    }

    pub const fn output(name: &'static str) -> Self {
        Self {
            name,
            direction: PinDirection::Output,
        }
    }
}

/// A pin instance owned by a node. Holds at most one buffer.
#[derive(Debug, Clone)]
pub struct Pin {
    pub id: PinId,
    pub name: String,
    pub data: Option<ImageBuffer>,
    pub connected: bool,
}

impl Pin {
    /// Unassigned pin built from a descriptor; the graph sets `id` on insertion.
    pub fn from_descriptor(desc: &PinDescriptor) -> Self {
        Self {
            id: PinId::INVALID,
            name: desc.name.to_string(),
            data: None,
            connected: false,
        }
    }

    /// Whether the pin currently holds a non-empty buffer.
    pub fn has_data(&self) -> bool {
        self.data.as_ref().is_some_and(|d| !d.is_empty())
    }

    /// Drop the held buffer.
    pub fn clear(&mut self) {
        self.data = None;
    }
}

/// Position of the pin with `id` in `pins`.
pub fn pin_index(pins: &[Pin], id: PinId) -> Option<usize> {
    pins.iter().position(|p| p.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_from_descriptor() {
        static DESC: PinDescriptor = PinDescriptor::input("Image");
        let pin = Pin::from_descriptor(&DESC);
        assert_eq!(pin.name, "Image");
        assert!(!pin.id.is_valid());
        assert!(!pin.connected);
        assert!(!pin.has_data());
    }

    #[test]
    fn test_has_data_ignores_empty_buffer() {
        let mut pin = Pin::from_descriptor(&PinDescriptor::output("out"));
        pin.data = Some(ImageBuffer::default());
        assert!(!pin.has_data());
        pin.data = Some(ImageBuffer::filled(1, 1, 1, 0.0));
        assert!(pin.has_data());
        pin.clear();
        assert!(pin.data.is_none());
    }

    #[test]
    fn test_pin_index() {
        let mut a = Pin::from_descriptor(&PinDescriptor::input("a"));
        let mut b = Pin::from_descriptor(&PinDescriptor::input("b"));
        a.id = PinId(3);
        b.id = PinId(4);
        let pins = vec![a, b];
        assert_eq!(pin_index(&pins, PinId(4)), Some(1));
        assert_eq!(pin_index(&pins, PinId(9)), None);
    }
}
