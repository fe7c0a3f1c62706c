// Copyright (c) 2025 Steven Rosenthal smr@dt3.org
// See LICENSE file in root directory for license terms.

// Maps pointer positions over a displayed image into the solver's native
// pixel space.
//
// Both axes are scaled by the width ratio only: displayed images are assumed
// to have square pixels and uniform scaling. The plate solution matrices are
// fitted under the same assumption, so X and Y must not be scaled
// independently.

/// Reference image width, in pixels, that plate solution matrices are fitted
/// against. Also the fallback when the natural width is unknown.
pub const HD_WIDTH: f64 = 1824.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MappingOptions {
    // Interpret pointer positions as document-relative (client) coordinates,
    // for fullscreen/overlay viewers. Otherwise element-relative offsets are
    // used.
    pub use_client_coords: bool,

    // Replaces the image's reported natural width.
    pub natural_width_override: Option<f64>,

    // Rendered/reference ratio supplied by a zoomed viewer where DOM
    // measurement is unreliable. When present, points are passed through
    // unscaled and the solver applies this instead.
    pub explicit_scale: Option<f64>,
}

/// An element's bounding box in client coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundingRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl BoundingRect {
    pub fn from_size(left: f64, top: f64, width: f64, height: f64) -> Self {
        BoundingRect{left, top, right: left + width, bottom: top + height}
    }

    /// Edges are inside.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

/// Measured geometry of the displayed image element.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ImageGeometry {
    pub rect: BoundingRect,
    // On-screen width after CSS scaling.
    pub rendered_width: f64,
    // Intrinsic pixel width, if known.
    pub natural_width: Option<f64>,
}

impl ImageGeometry {
    pub fn natural_width(&self, options: &MappingOptions) -> f64 {
        options.natural_width_override
            .or(self.natural_width)
            .filter(|w| w.is_finite() && *w > 0.0)
            .unwrap_or(HD_WIDTH)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerEvent {
    // Document/viewport relative.
    pub client_x: f64,
    pub client_y: f64,
    // Relative to the image element.
    pub offset_x: f64,
    pub offset_y: f64,
}

/// A position in solver space, plus the scale override (if any) that the
/// solver must apply to it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SolverPoint {
    pub x: f64,
    pub y: f64,
    pub scale: Option<f64>,
}

/// Maps `event` according to `options.use_client_coords`. Returns None if
/// the point cannot be mapped (client mode pointer outside the element, or
/// degenerate geometry).
pub fn map_pointer(event: &PointerEvent,
                   geometry: &ImageGeometry,
                   options: &MappingOptions) -> Option<SolverPoint> {
    if options.use_client_coords {
        map_client(event.client_x, event.client_y, geometry,
                   options.explicit_scale)
    } else {
        map_offset(event.offset_x, event.offset_y, geometry, options)
    }
}

/// Client mode: rejects pointers outside the element's bounding rect, then
/// scales the element-relative position by HD_WIDTH / rendered width.
pub fn map_client(client_x: f64, client_y: f64,
                  geometry: &ImageGeometry,
                  explicit_scale: Option<f64>) -> Option<SolverPoint> {
    if !geometry.rect.contains(client_x, client_y) {
        return None;
    }
    map_unbounded(client_x - geometry.rect.left,
                  client_y - geometry.rect.top,
                  geometry, explicit_scale)
}

/// Client mode scaling of an element-relative position, without the bounds
/// check. Points outside the element are mapped too.
pub fn map_unbounded(relative_x: f64, relative_y: f64,
                     geometry: &ImageGeometry,
                     explicit_scale: Option<f64>) -> Option<SolverPoint> {
    if let Some(scale) = explicit_scale {
        return finite_point(relative_x, relative_y, Some(scale));
    }
    if !(geometry.rendered_width > 0.0) {
        return None;
    }
    let ratio = HD_WIDTH / geometry.rendered_width;
    finite_point(relative_x * ratio, relative_y * ratio, None)
}

/// Offset mode: scale is rendered width / min(natural width, HD_WIDTH).
pub fn map_offset(offset_x: f64, offset_y: f64,
                  geometry: &ImageGeometry,
                  options: &MappingOptions) -> Option<SolverPoint> {
    if let Some(scale) = options.explicit_scale {
        return finite_point(offset_x, offset_y, Some(scale));
    }
    let reference_width = geometry.natural_width(options).min(HD_WIDTH);
    let scale = geometry.rendered_width / reference_width;
    if !(scale > 0.0) {
        return None;
    }
    finite_point(offset_x / scale, offset_y / scale, None)
}

fn finite_point(x: f64, y: f64, scale: Option<f64>) -> Option<SolverPoint> {
    let scale_ok = scale.map_or(true, |s| s.is_finite() && s > 0.0);
    if x.is_finite() && y.is_finite() && scale_ok {
        Some(SolverPoint{x, y, scale})
    } else {
        None
    }
}

// mod tests.
