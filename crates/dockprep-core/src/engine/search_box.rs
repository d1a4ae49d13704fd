use super::error::EngineError;
use crate::core::models::atom::AtomTable;
use crate::core::utils::geometry::Bounds;
use nalgebra::{Point3, Vector3};

const AXES: [char; 3] = ['x', 'y', 'z'];

/// The region Vina searches for ligand poses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchBox {
    /// Ligand centroid.
    pub center: Point3<f64>,
    /// Half the receptor extent plus padding, per axis.
    pub size: Vector3<f64>,
}

impl SearchBox {
    /// Centers the box on the ligand centroid and sizes it from the receptor bounds:
    /// `size_a = (max_a - min_a) / 2 + padding`.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NoAtoms`] if either table has no atoms.
    /// - [`EngineError::LigandOutsideReceptor`] if the ligand centroid lies outside the
    ///   receptor bounds on any axis (bounds inclusive). This usually means the wrong
    ///   structure was taken as the ligand.
    pub fn from_tables(
        ligand: &AtomTable,
        receptor: &AtomTable,
        padding: f64,
    ) -> Result<Self, EngineError> {
        let center = ligand
            .centroid()
            .ok_or(EngineError::NoAtoms { what: "ligand" })?;
        let bounds = receptor
            .bounds()
            .ok_or(EngineError::NoAtoms { what: "receptor" })?;
        Self::from_center_and_bounds(center, &bounds, padding)
    }

    pub fn from_center_and_bounds(
        center: Point3<f64>,
        bounds: &Bounds,
        padding: f64,
    ) -> Result<Self, EngineError> {
        if let Some(&axis) = bounds.axes_outside(&center).first() {
            return Err(EngineError::LigandOutsideReceptor {
                axis: AXES[axis],
                value: center[axis],
                min: bounds.min[axis],
                max: bounds.max[axis],
            });
        }
        let size = bounds.extent() / 2.0 + Vector3::repeat(padding);
        Ok(Self { center, size })
    }
}
