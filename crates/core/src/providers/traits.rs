//! Crop trait resolution
//!
//! Traits resolve through ordered provider tiers, mirroring the AquaCrop
//! configuration layering: explicit per-run overrides first, then the
//! default parameter table. A trait missing from every tier is a fatal
//! [`CropError::TraitResolution`]; a value list with the wrong length is a
//! fatal [`CropError::ShapeMismatch`]. There are no silent defaults.

use rustc_hash::FxHashMap;

use crate::core_types::{CropField, CropTraits, FieldShape};
use crate::error::{CropError, CropResult};

/// One tier of crop parameter values
pub trait TraitSource {
    /// Per-crop values for a named trait, or `None` when this tier does
    /// not carry the trait. Length must be 1 (shared) or the crop count.
    fn lookup(&self, name: &str) -> Option<Vec<f64>>;
}

/// Inline per-run overrides, keyed by trait name
#[derive(Debug, Clone, Default)]
pub struct TraitOverrides {
    values: FxHashMap<String, Vec<f64>>,
}

impl TraitOverrides {
    /// Create an empty override set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the values for one trait
    pub fn set(&mut self, name: &str, values: Vec<f64>) {
        self.values.insert(name.to_string(), values);
    }

    /// Build from an iterator of (name, values) pairs
    pub fn from_pairs<I: IntoIterator<Item = (String, Vec<f64>)>>(pairs: I) -> Self {
        Self {
            values: pairs.into_iter().collect(),
        }
    }
}

impl TraitSource for TraitOverrides {
    fn lookup(&self, name: &str) -> Option<Vec<f64>> {
        self.values.get(name).cloned()
    }
}

/// Default crop parameter table keyed by crop identifier
///
/// In-memory replacement for the AquaCrop crop parameter database: one
/// row of named values per crop id. A lookup succeeds only when every
/// crop in the simulation carries the trait.
#[derive(Debug, Clone)]
pub struct ParameterTable {
    crop_ids: Vec<u32>,
    rows: FxHashMap<u32, FxHashMap<String, f64>>,
}

impl ParameterTable {
    /// Create an empty table for the given simulation crop ids
    #[must_use]
    pub fn new(crop_ids: Vec<u32>) -> Self {
        Self {
            crop_ids,
            rows: FxHashMap::default(),
        }
    }

    /// Insert one named value for a crop
    pub fn insert(&mut self, crop_id: u32, name: &str, value: f64) {
        self.rows
            .entry(crop_id)
            .or_default()
            .insert(name.to_string(), value);
    }

    /// Table pre-loaded with the reference maize parameter set (crop id 1)
    ///
    /// Calendar-day stage lengths and conservative AquaCrop maize
    /// parameters; handy for demos and smoke tests.
    #[must_use]
    pub fn reference_maize() -> Self {
        let mut table = Self::new(vec![1]);
        for (name, value) in [
            ("CropType", 3.0),
            ("Determinant", 1.0),
            ("PlantingDate", 100.0),
            ("HarvestDate", 250.0),
            ("Emergence", 6.0),
            ("MaxRooting", 108.0),
            ("Senescence", 107.0),
            ("Maturity", 132.0),
            ("HIstart", 66.0),
            ("Flowering", 13.0),
            ("YldForm", 61.0),
            ("Tbase", 8.0),
            ("Tupp", 30.0),
            ("Tmax_up", 40.0),
            ("Tmax_lo", 45.0),
            ("Tmin_up", 10.0),
            ("Tmin_lo", 5.0),
            ("PlantPop", 75_000.0),
            ("SeedSize", 6.5),
            ("CCx", 0.96),
            ("CGC", 0.163),
            ("CDC", 0.117),
            ("HI0", 0.48),
            ("HIini", 0.01),
            ("dHI0", 15.0),
            ("SxTopQ", 0.045),
            ("SxBotQ", 0.011),
            ("WP", 33.7),
            ("fsink", 0.5),
            ("bsted", 0.000138),
            ("bface", 0.001165),
        ] {
            table.insert(1, name, value);
        }
        table
    }
}

impl TraitSource for ParameterTable {
    fn lookup(&self, name: &str) -> Option<Vec<f64>> {
        self.crop_ids
            .iter()
            .map(|id| self.rows.get(id).and_then(|row| row.get(name)).copied())
            .collect()
    }
}

/// Ordered trait resolver over the provider tiers
pub struct TraitCatalog<'a> {
    shape: FieldShape,
    sources: Vec<&'a dyn TraitSource>,
}

impl<'a> TraitCatalog<'a> {
    /// Create a catalog; earlier sources take precedence
    #[must_use]
    pub fn new(shape: FieldShape, sources: Vec<&'a dyn TraitSource>) -> Self {
        Self { shape, sources }
    }

    /// Resolve one trait to a broadcast field
    pub fn resolve(&self, name: &str) -> CropResult<CropField<f64>> {
        for source in &self.sources {
            if let Some(values) = source.lookup(name) {
                return CropField::broadcast_crop(self.shape, name, &values);
            }
        }
        Err(CropError::TraitResolution {
            name: name.to_string(),
        })
    }

    /// Resolve a trait holding integer day-of-year or count values
    pub fn resolve_days(&self, name: &str) -> CropResult<CropField<i32>> {
        let float = self.resolve(name)?;
        let mut field = CropField::<i32>::zeros(self.shape);
        for (index, &value) in float.as_slice().iter().enumerate() {
            field.set(index, value.round() as i32);
        }
        Ok(field)
    }

    /// Resolve a 0/1 flag trait
    pub fn resolve_flag(&self, name: &str) -> CropResult<CropField<bool>> {
        let float = self.resolve(name)?;
        let mut field = CropField::falses(self.shape);
        for (index, &value) in float.as_slice().iter().enumerate() {
            field.set(index, value.round() as i32 == 1);
        }
        Ok(field)
    }
}

/// Load the full trait set through the catalog
///
/// Every trait the core consumes is enumerated here, statically; a
/// resolution failure names the offending trait and aborts
/// initialization.
pub fn load_crop_traits(catalog: &TraitCatalog<'_>) -> CropResult<CropTraits> {
    Ok(CropTraits {
        crop_type: catalog.resolve_days("CropType")?,
        determinant: catalog.resolve_flag("Determinant")?,
        planting_date: catalog.resolve_days("PlantingDate")?,
        harvest_date: catalog.resolve_days("HarvestDate")?,
        emergence: catalog.resolve("Emergence")?,
        max_rooting: catalog.resolve("MaxRooting")?,
        senescence: catalog.resolve("Senescence")?,
        maturity: catalog.resolve("Maturity")?,
        hi_start: catalog.resolve("HIstart")?,
        flowering: catalog.resolve("Flowering")?,
        yld_form: catalog.resolve("YldForm")?,
        tbase: catalog.resolve("Tbase")?,
        tupp: catalog.resolve("Tupp")?,
        tmax_up: catalog.resolve("Tmax_up")?,
        tmax_lo: catalog.resolve("Tmax_lo")?,
        tmin_up: catalog.resolve("Tmin_up")?,
        tmin_lo: catalog.resolve("Tmin_lo")?,
        plant_pop: catalog.resolve("PlantPop")?,
        seed_size: catalog.resolve("SeedSize")?,
        ccx: catalog.resolve("CCx")?,
        cgc: catalog.resolve("CGC")?,
        cdc: catalog.resolve("CDC")?,
        hi0: catalog.resolve("HI0")?,
        hi_ini: catalog.resolve("HIini")?,
        dhi0: catalog.resolve("dHI0")?,
        sx_top_q: catalog.resolve("SxTopQ")?,
        sx_bot_q: catalog.resolve("SxBotQ")?,
        wp: catalog.resolve("WP")?,
        fsink: catalog.resolve("fsink")?,
        bsted: catalog.resolve("bsted")?,
        bface: catalog.resolve("bface")?,
    })
}
