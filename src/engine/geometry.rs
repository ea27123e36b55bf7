use slotmap::SecondaryMap;

use crate::{engine::handles::ElementId, foundation::core::Rect};

/// Element geometry supplied by the presentation tree.
///
/// Bounds are in document coordinates. `None` means the element has not been
/// laid out yet; dependent sources report "unavailable" for that frame.
pub trait Geometry {
    fn bounds(&self, element: ElementId) -> Option<Rect>;
}

/// Plain bounds table keyed by element handle.
#[derive(Clone, Debug, Default)]
pub struct GeometryMap {
    bounds: SecondaryMap<ElementId, Rect>,
}

impl GeometryMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, element: ElementId, bounds: Rect) {
        self.bounds.insert(element, bounds);
    }

    pub fn clear(&mut self, element: ElementId) -> Option<Rect> {
        self.bounds.remove(element)
    }
}

impl Geometry for GeometryMap {
    fn bounds(&self, element: ElementId) -> Option<Rect> {
        self.bounds.get(element).copied()
    }
}

impl<F> Geometry for F
where
    F: Fn(ElementId) -> Option<Rect>,
{
    fn bounds(&self, element: ElementId) -> Option<Rect> {
        self(element)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/geometry.rs"]
mod tests;
