//! Dense field containers over the (farm, crop, cell) domain
//!
//! Every quantity in the simulation is a dense 3-D tensor indexed by
//! (farm, crop, grid cell). Values are stored as a flat `Vec` in row-major
//! order so that whole-tensor transforms are simple linear scans.

use serde::{Deserialize, Serialize};

use crate::error::{CropError, CropResult};

/// Dimensions of the (farm, crop, cell) domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldShape {
    /// Number of farms
    pub farms: usize,
    /// Number of crops grown on each farm
    pub crops: usize,
    /// Number of grid cells
    pub cells: usize,
}

impl FieldShape {
    /// Create a new shape
    #[must_use]
    pub const fn new(farms: usize, crops: usize, cells: usize) -> Self {
        Self {
            farms,
            crops,
            cells,
        }
    }

    /// Total number of (farm, crop, cell) entries
    #[must_use]
    pub const fn len(&self) -> usize {
        self.farms * self.crops * self.cells
    }

    /// Whether the domain is empty
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flat index of a (farm, crop, cell) position
    ///
    /// # Panics
    ///
    /// Panics if any coordinate is out of bounds
    #[must_use]
    pub fn index(&self, farm: usize, crop: usize, cell: usize) -> usize {
        assert!(
            farm < self.farms && crop < self.crops && cell < self.cells,
            "Coordinates out of bounds"
        );
        (farm * self.crops + crop) * self.cells + cell
    }

    /// Grid-cell coordinate of a flat index
    #[must_use]
    pub const fn cell_of(&self, index: usize) -> usize {
        index % self.cells
    }

    /// Crop coordinate of a flat index
    #[must_use]
    pub const fn crop_of(&self, index: usize) -> usize {
        (index / self.cells) % self.crops
    }
}

/// Field data container for one per-cell quantity
///
/// Stores 3-D field data as a flat `Vec<T>` in row-major order
/// (farm-major, then crop, then grid cell).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropField<T> {
    data: Vec<T>,
    shape: FieldShape,
}

impl<T: Copy> CropField<T> {
    /// Create a new field with every entry set to `value`
    #[must_use]
    pub fn filled(shape: FieldShape, value: T) -> Self {
        Self {
            data: vec![value; shape.len()],
            shape,
        }
    }

    /// Field shape
    #[must_use]
    pub const fn shape(&self) -> FieldShape {
        self.shape
    }

    /// Get value at a flat index
    #[must_use]
    pub fn get(&self, index: usize) -> T {
        self.data[index]
    }

    /// Set value at a flat index
    pub fn set(&mut self, index: usize, value: T) {
        self.data[index] = value;
    }

    /// Get value at a (farm, crop, cell) position
    #[must_use]
    pub fn at(&self, farm: usize, crop: usize, cell: usize) -> T {
        self.data[self.shape.index(farm, crop, cell)]
    }

    /// Set value at a (farm, crop, cell) position
    pub fn set_at(&mut self, farm: usize, crop: usize, cell: usize, value: T) {
        let index = self.shape.index(farm, crop, cell);
        self.data[index] = value;
    }

    /// Get reference to field data
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get mutable reference to field data
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Fill entire field with a value
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }
}

impl<T: Copy + Default> CropField<T> {
    /// Create a zero-initialized field
    #[must_use]
    pub fn zeros(shape: FieldShape) -> Self {
        Self::filled(shape, T::default())
    }
}

impl CropField<f64> {
    /// Broadcast per-crop values across farms and grid cells
    ///
    /// `values` must have length 1 (one value shared by every crop) or
    /// length equal to the number of crops. Any other length is a shape
    /// mismatch; `name` identifies the offending parameter in the error.
    pub fn broadcast_crop(shape: FieldShape, name: &str, values: &[f64]) -> CropResult<Self> {
        if values.len() != 1 && values.len() != shape.crops {
            return Err(CropError::ShapeMismatch {
                name: name.to_string(),
                len: values.len(),
                crops: shape.crops,
            });
        }
        let mut field = Self::zeros(shape);
        for farm in 0..shape.farms {
            for crop in 0..shape.crops {
                let value = if values.len() == 1 {
                    values[0]
                } else {
                    values[crop]
                };
                for cell in 0..shape.cells {
                    field.set_at(farm, crop, cell, value);
                }
            }
        }
        Ok(field)
    }
}

impl CropField<bool> {
    /// Create an all-false flag field
    #[must_use]
    pub fn falses(shape: FieldShape) -> Self {
        Self::filled(shape, false)
    }

    /// Whether any entry is set
    #[must_use]
    pub fn any(&self) -> bool {
        self.data.iter().any(|&v| v)
    }

    /// Number of entries set
    #[must_use]
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_indexing() {
        let shape = FieldShape::new(2, 3, 5);
        assert_eq!(shape.len(), 30);
        assert_eq!(shape.index(0, 0, 0), 0);
        assert_eq!(shape.index(1, 2, 4), 29);
        assert_eq!(shape.index(0, 1, 0), 5);
        assert_eq!(shape.crop_of(shape.index(1, 2, 3)), 2);
        assert_eq!(shape.cell_of(shape.index(1, 2, 3)), 3);
    }

    #[test]
    #[should_panic(expected = "Coordinates out of bounds")]
    fn test_shape_bounds_check() {
        let shape = FieldShape::new(2, 3, 5);
        let _ = shape.index(2, 0, 0);
    }

    #[test]
    fn test_zeros_infers_element_type() {
        // One constructor serves every element type, so unqualified
        // calls resolve from the binding alone
        let shape = FieldShape::new(1, 2, 3);
        let values: CropField<f64> = CropField::zeros(shape);
        let days: CropField<i32> = CropField::zeros(shape);
        assert!(values.as_slice().iter().all(|&v| v == 0.0));
        assert!(days.as_slice().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_field_get_set() {
        let shape = FieldShape::new(2, 2, 4);
        let mut field = CropField::<f64>::zeros(shape);
        field.set_at(1, 0, 3, 12.5);
        assert_eq!(field.at(1, 0, 3), 12.5);

        // Verify row-major layout
        let index = (1 * 2) * 4 + 3;
        assert_eq!(field.as_slice()[index], 12.5);
    }

    #[test]
    fn test_broadcast_single_value() {
        let shape = FieldShape::new(2, 3, 4);
        let field = CropField::broadcast_crop(shape, "Tbase", &[8.0]).unwrap();
        assert!(field.as_slice().iter().all(|&v| v == 8.0));
    }

    #[test]
    fn test_broadcast_per_crop() {
        let shape = FieldShape::new(2, 3, 2);
        let field = CropField::broadcast_crop(shape, "Tbase", &[1.0, 2.0, 3.0]).unwrap();
        for farm in 0..2 {
            for cell in 0..2 {
                assert_eq!(field.at(farm, 0, cell), 1.0);
                assert_eq!(field.at(farm, 1, cell), 2.0);
                assert_eq!(field.at(farm, 2, cell), 3.0);
            }
        }
    }

    #[test]
    fn test_broadcast_rejects_bad_length() {
        let shape = FieldShape::new(1, 3, 2);
        let err = CropField::broadcast_crop(shape, "CCx", &[0.9, 0.8]).unwrap_err();
        assert!(err.to_string().contains("CCx"));
    }

    #[test]
    fn test_bool_field_counters() {
        let shape = FieldShape::new(1, 2, 3);
        let mut flags = CropField::falses(shape);
        assert!(!flags.any());
        flags.set(4, true);
        assert!(flags.any());
        assert_eq!(flags.count(), 1);
    }
}
