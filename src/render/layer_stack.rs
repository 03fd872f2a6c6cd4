use serde::{Deserialize, Serialize};

/// Drawing layers of one frame, painted in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanvasLayerKind {
    Background,
    Grid,
    Axis,
    Series,
    Overlay,
    Legend,
    Controls,
    Crosshair,
}

impl CanvasLayerKind {
    /// Canonical paint order: background first, crosshair last.
    pub const PAINT_ORDER: [Self; 8] = [
        Self::Background,
        Self::Grid,
        Self::Axis,
        Self::Series,
        Self::Overlay,
        Self::Legend,
        Self::Controls,
        Self::Crosshair,
    ];
}
