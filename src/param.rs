//! Typed parameter bundles and the build context.
//!
//! The original tool flattened the host's nested property groups into a
//! keyword map by runtime reflection. Here every feature gets an explicit
//! parameter struct with defaults and an up-front `validate`, and strategy
//! choices (fill style, floorplan style) are tagged unions dispatched once at
//! the orchestrator boundary.

use nalgebra::{Vector2, Vector3};

use crate::error::{BuildError, Result};
use crate::mesh::{EdgeId, FaceId, PolyMesh};

fn check_non_negative(name: &'static str, value: f64) -> Result<()> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(BuildError::invalid_param(name, value, "must be non-negative"))
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(BuildError::invalid_param(name, value, "must be positive"))
    }
}

// ==================== Fill ====================

/// Flat paneling parameters.
#[derive(Debug, Clone)]
pub struct PanelParams {
    /// Number of horizontal panel rows.
    pub count_x: usize,
    /// Number of vertical panel columns.
    pub count_y: usize,
    /// Border between panels and the face boundary.
    pub border: f64,
    /// Thickness of each panel's own inset.
    pub thickness: f64,
    /// Outward panel displacement along the face normal.
    pub depth: f64,
}

impl Default for PanelParams {
    fn default() -> Self {
        Self {
            count_x: 1,
            count_y: 1,
            border: 0.1,
            thickness: 0.1,
            depth: 0.05,
        }
    }
}

impl PanelParams {
    /// Validate all fields.
    pub fn validate(&self) -> Result<()> {
        check_non_negative("panel_border", self.border)?;
        check_non_negative("panel_thickness", self.thickness)?;
        Ok(())
    }
}

/// Recessed glass-pane parameters.
#[derive(Debug, Clone)]
pub struct PaneParams {
    /// Number of horizontal pane rows.
    pub count_x: usize,
    /// Number of vertical pane columns.
    pub count_y: usize,
    /// Pane frame inset thickness.
    pub thickness: f64,
    /// Inward pane displacement against the face normal.
    pub depth: f64,
}

impl Default for PaneParams {
    fn default() -> Self {
        Self {
            count_x: 1,
            count_y: 1,
            thickness: 0.05,
            depth: 0.01,
        }
    }
}

impl PaneParams {
    /// Validate all fields.
    pub fn validate(&self) -> Result<()> {
        check_non_negative("pane_thickness", self.thickness)?;
        check_non_negative("pane_depth", self.depth)?;
        Ok(())
    }
}

/// Bar-grid (railing) parameters.
#[derive(Debug, Clone)]
pub struct BarParams {
    /// Number of horizontal bars.
    pub count_x: usize,
    /// Number of vertical bars.
    pub count_y: usize,
    /// Bar thickness across its axis.
    pub thickness: f64,
    /// Bar depth along the face normal.
    pub depth: f64,
}

impl Default for BarParams {
    fn default() -> Self {
        Self {
            count_x: 1,
            count_y: 1,
            thickness: 0.1,
            depth: 0.1,
        }
    }
}

impl BarParams {
    /// Validate all fields.
    pub fn validate(&self) -> Result<()> {
        check_positive("bar_thickness", self.thickness)?;
        check_non_negative("bar_depth", self.depth)?;
        Ok(())
    }
}

/// Louver (angled slat) parameters.
#[derive(Debug, Clone)]
pub struct LouverParams {
    /// Number of louver blades.
    pub count: usize,
    /// Optional inset margin around the louver area.
    pub margin: f64,
    /// Blade depth along the face normal.
    pub depth: f64,
    /// Extra blade overlap beyond its strip.
    pub border: f64,
}

impl Default for LouverParams {
    fn default() -> Self {
        Self {
            count: 3,
            margin: 0.1,
            depth: 0.1,
            border: 0.1,
        }
    }
}

impl LouverParams {
    /// Validate all fields.
    pub fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(BuildError::invalid_param(
                "louver_count",
                self.count,
                "must be at least 1",
            ));
        }
        check_non_negative("louver_margin", self.margin)?;
        check_non_negative("louver_border", self.border)?;
        Ok(())
    }
}

/// How to populate an opening's inner face with repeating detail.
#[derive(Debug, Clone)]
pub enum FillStyle {
    /// Leave the inner face untouched.
    None,
    /// Flat paneling.
    Panel(PanelParams),
    /// Recessed glass panes.
    GlassPanes(PaneParams),
    /// A grid of 3D bars.
    Bar(BarParams),
    /// Angled louver slats.
    Louver(LouverParams),
}

impl FillStyle {
    /// Validate the variant's parameters.
    pub fn validate(&self) -> Result<()> {
        match self {
            FillStyle::None => Ok(()),
            FillStyle::Panel(p) => p.validate(),
            FillStyle::GlassPanes(p) => p.validate(),
            FillStyle::Bar(p) => p.validate(),
            FillStyle::Louver(p) => p.validate(),
        }
    }
}

// ==================== Floorplan ====================

/// Ground-plan outline generator selection and parameters.
#[derive(Debug, Clone)]
pub enum FloorplanStyle {
    /// A plain rectangle.
    Rectangular {
        /// Half-extent along x.
        width: f64,
        /// Half-extent along y.
        length: f64,
    },
    /// A segmented circle.
    Circular {
        /// Circle radius.
        radius: f64,
        /// Number of segments.
        segments: usize,
        /// Cap with a triangle fan instead of an n-gon.
        cap_tris: bool,
    },
    /// A cross of four arms around a base rectangle.
    Composite {
        /// Base half-extent along x.
        width: f64,
        /// Base half-extent along y.
        length: f64,
        /// Arm lengths: bottom, left, right, top. Zero skips an arm.
        extensions: [f64; 4],
    },
    /// An H/I footprint with independently sized wing tips.
    HShaped {
        /// Base half-extent along x.
        width: f64,
        /// Base half-extent along y.
        length: f64,
        /// Tip length extensions: bottom-left, bottom-right, top-left,
        /// top-right. Zero skips a tip.
        lengths: [f64; 4],
        /// Tip width extensions, same order.
        widths: [f64; 4],
    },
    /// A randomized irregular outline, reproducible per seed.
    Random {
        /// RNG seed.
        seed: u64,
        /// Base half-extent along x.
        width: f64,
        /// Base half-extent along y.
        length: f64,
    },
}

impl Default for FloorplanStyle {
    fn default() -> Self {
        FloorplanStyle::Rectangular {
            width: 2.0,
            length: 2.0,
        }
    }
}

impl FloorplanStyle {
    /// Validate the variant's parameters.
    pub fn validate(&self) -> Result<()> {
        match *self {
            FloorplanStyle::Rectangular { width, length } => {
                check_positive("width", width)?;
                check_positive("length", length)
            }
            FloorplanStyle::Circular { radius, segments, .. } => {
                check_positive("radius", radius)?;
                if segments < 3 {
                    return Err(BuildError::invalid_param(
                        "segments",
                        segments,
                        "must be at least 3",
                    ));
                }
                Ok(())
            }
            FloorplanStyle::Composite {
                width,
                length,
                extensions,
            } => {
                check_positive("width", width)?;
                check_positive("length", length)?;
                for ext in extensions {
                    check_non_negative("extension", ext)?;
                }
                Ok(())
            }
            FloorplanStyle::HShaped {
                width,
                length,
                lengths,
                widths,
            } => {
                check_positive("width", width)?;
                check_positive("length", length)?;
                for v in lengths.iter().chain(widths.iter()) {
                    check_non_negative("tip extension", *v)?;
                }
                Ok(())
            }
            FloorplanStyle::Random { width, length, .. } => {
                check_positive("width", width)?;
                check_positive("length", length)
            }
        }
    }
}

// ==================== Floor ====================

/// Multi-story extrusion parameters.
#[derive(Debug, Clone)]
pub struct FloorParams {
    /// Number of stories.
    pub floor_count: usize,
    /// Story height between slabs.
    pub floor_height: f64,
    /// Slab plate thickness.
    pub slab_thickness: f64,
    /// Horizontal slab overhang.
    pub slab_outset: f64,
}

impl Default for FloorParams {
    fn default() -> Self {
        Self {
            floor_count: 1,
            floor_height: 2.0,
            slab_thickness: 0.1,
            slab_outset: 0.1,
        }
    }
}

impl FloorParams {
    /// Validate all fields.
    pub fn validate(&self) -> Result<()> {
        if self.floor_count == 0 {
            return Err(BuildError::invalid_param(
                "floor_count",
                self.floor_count,
                "must be at least 1",
            ));
        }
        check_positive("floor_height", self.floor_height)?;
        check_non_negative("slab_thickness", self.slab_thickness)?;
        check_non_negative("slab_outset", self.slab_outset)?;
        Ok(())
    }
}

// ==================== Window / Door ====================

/// Window assembly parameters.
#[derive(Debug, Clone)]
pub struct WindowParams {
    /// Opening size as (horizontal, vertical) ratios of the wall face.
    /// A ratio at or above 1.0 skips splitting that axis.
    pub size: Vector2<f64>,
    /// Opening offset from the wall face center.
    pub off: Vector3<f64>,
    /// Window frame border thickness.
    pub frame_thickness: f64,
    /// Window frame recess depth.
    pub frame_depth: f64,
    /// Fill applied to the inner face.
    pub fill: FillStyle,
}

impl Default for WindowParams {
    fn default() -> Self {
        Self {
            size: Vector2::new(0.5, 0.5),
            off: Vector3::zeros(),
            frame_thickness: 0.1,
            frame_depth: 0.1,
            fill: FillStyle::GlassPanes(PaneParams::default()),
        }
    }
}

impl WindowParams {
    /// Validate all fields.
    pub fn validate(&self) -> Result<()> {
        check_positive("size.x", self.size.x)?;
        check_positive("size.y", self.size.y)?;
        check_non_negative("frame_thickness", self.frame_thickness)?;
        check_non_negative("frame_depth", self.frame_depth)?;
        self.fill.validate()
    }
}

/// Door assembly parameters.
#[derive(Debug, Clone)]
pub struct DoorParams {
    /// Opening size as (horizontal, vertical) ratios of the wall face.
    pub size: Vector2<f64>,
    /// Horizontal offset from the wall face center; the door is always
    /// anchored to the bottom edge.
    pub off: Vector3<f64>,
    /// Door frame border thickness.
    pub frame_thickness: f64,
    /// Door frame recess depth.
    pub frame_depth: f64,
    /// Fill applied to the door face.
    pub fill: FillStyle,
}

impl Default for DoorParams {
    fn default() -> Self {
        Self {
            size: Vector2::new(0.4, 0.8),
            off: Vector3::zeros(),
            frame_thickness: 0.1,
            frame_depth: 0.05,
            fill: FillStyle::Panel(PanelParams::default()),
        }
    }
}

impl DoorParams {
    /// Validate all fields.
    pub fn validate(&self) -> Result<()> {
        check_positive("size.x", self.size.x)?;
        check_positive("size.y", self.size.y)?;
        check_non_negative("frame_thickness", self.frame_thickness)?;
        check_non_negative("frame_depth", self.frame_depth)?;
        self.fill.validate()
    }
}

// ==================== Context ====================

/// Explicit build context threaded through every feature build.
///
/// Replaces the original's implicit global host state: the mesh handle and
/// the selection reads/writes live here and nowhere else.
pub struct BuildContext<'m> {
    /// The host-owned mesh being edited in place.
    pub mesh: &'m mut PolyMesh,
}

impl<'m> BuildContext<'m> {
    /// Wrap a mesh handle for a single build call.
    pub fn new(mesh: &'m mut PolyMesh) -> Self {
        Self { mesh }
    }

    /// The currently selected faces.
    pub fn selected_faces(&self) -> Vec<FaceId> {
        self.mesh.selected_faces()
    }

    /// Edges on the open boundary of the mesh.
    pub fn boundary_edges(&self) -> Vec<EdgeId> {
        self.mesh.boundary_edges()
    }

    /// Clear all selection state after a feature consumed it.
    pub fn deselect_all(&mut self) {
        self.mesh.deselect_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        WindowParams::default().validate().unwrap();
        DoorParams::default().validate().unwrap();
        FloorParams::default().validate().unwrap();
        FloorplanStyle::default().validate().unwrap();
    }

    #[test]
    fn test_bad_params_rejected() {
        let mut w = WindowParams::default();
        w.size.x = 0.0;
        assert!(w.validate().is_err());

        let f = FloorParams {
            floor_count: 0,
            ..Default::default()
        };
        assert!(f.validate().is_err());

        let fp = FloorplanStyle::Circular {
            radius: 1.0,
            segments: 2,
            cap_tris: false,
        };
        assert!(fp.validate().is_err());

        let l = LouverParams {
            count: 0,
            ..Default::default()
        };
        assert!(l.validate().is_err());
    }
}
