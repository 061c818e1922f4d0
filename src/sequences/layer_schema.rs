//! Validated layer-capacity schemas for [`TieredSequence`](crate::sequences::TieredSequence).
use anyhow::Result;

use crate::Error;

/// Layer capacities of the preset schemas, from the root down to the leaves,
/// keyed by the width of the value domain they are sized for.
const PRESETS: &[(usize, &[usize])] = &[
    // 3 + 3 + 3 + 7
    (16, &[8, 8, 8, 128]),
    // 4 + 4 + 4 + 8
    (20, &[16, 16, 16, 256]),
    // 4 + 4 + 4 + 4 + 8
    (24, &[16, 16, 16, 16, 256]),
    // 5 + 5 + 5 + 5 + 8
    (28, &[32, 32, 32, 32, 256]),
    // 5 + 5 + 6 + 6 + 8
    (30, &[32, 32, 64, 64, 256]),
    // 5 + 6 + 6 + 6 + 9
    (32, &[32, 64, 64, 64, 512]),
];

/// Immutable layer-capacity schema `(c1, …, ck)` of a tiered sequence.
///
/// A node at depth `d` holds `c(d+1)` children, and a leaf holds `ck` elements,
/// so that the total capacity is the product of all layer capacities.
///
/// Schemas are built with [`LayerSchemaBuilder`] or picked from the presets
/// with [`LayerSchema::for_value_bits()`].
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use dysuc::sequences::LayerSchema;
///
/// let schema = LayerSchema::builder().layer(4).layer(4).layer(16).build()?;
/// assert_eq!(schema.capacity(), 256);
/// assert_eq!(schema.depth(), 3);
/// assert_eq!(schema.leaf_capacity(), 16);
///
/// let preset = LayerSchema::for_value_bits(16)?;
/// assert_eq!(preset.capacity(), 1 << 16);
/// assert_eq!(preset.value_bits(), Some(16));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LayerSchema {
    layers: Vec<usize>,
    // spans[d] is the capacity of a node at depth d; spans[k] == 1.
    spans: Vec<usize>,
    value_bits: Option<usize>,
}

impl LayerSchema {
    /// Creates a builder of a new schema.
    pub fn builder() -> LayerSchemaBuilder {
        LayerSchemaBuilder::new()
    }

    /// Returns the preset schema sized for values of `bits` bits,
    /// i.e., whose capacity is `2^bits`.
    ///
    /// Presets exist for 16, 20, 24, 28, 30, and 32 bits.
    ///
    /// # Errors
    ///
    /// An error [`Error::InvalidSchema`] is returned if no preset exists for `bits`.
    pub fn for_value_bits(bits: usize) -> Result<Self> {
        let (_, layers) = PRESETS
            .iter()
            .find(|(b, _)| *b == bits)
            .ok_or_else(|| Error::InvalidSchema(format!("no preset for {bits}-bit values.")))?;
        layers
            .iter()
            .fold(LayerSchemaBuilder::new(), |b, &c| b.layer(c))
            .value_bits(bits)
            .build()
    }

    /// Returns the widths of the value domains having a preset.
    pub fn preset_value_bits() -> impl Iterator<Item = usize> {
        PRESETS.iter().map(|(b, _)| *b)
    }

    /// Returns the layer capacities from the root down to the leaves.
    #[inline(always)]
    pub fn layers(&self) -> &[usize] {
        &self.layers
    }

    /// Returns the number of layers.
    #[inline(always)]
    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    /// Returns the total number of elements a sequence with this schema can hold.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.spans[0]
    }

    /// Returns the number of elements a leaf holds.
    #[inline(always)]
    pub fn leaf_capacity(&self) -> usize {
        self.layers[self.layers.len() - 1]
    }

    /// Returns the width of the value domain the schema is sized for, if declared.
    #[inline(always)]
    pub fn value_bits(&self) -> Option<usize> {
        self.value_bits
    }

    /// Returns the number of elements a node at `depth` holds.
    #[inline(always)]
    pub(crate) fn span(&self, depth: usize) -> usize {
        self.spans[depth]
    }

    /// Checks if nodes at `depth` are leaves.
    #[inline(always)]
    pub(crate) fn is_leaf(&self, depth: usize) -> bool {
        depth + 1 == self.layers.len()
    }
}

/// Builder of [`LayerSchema`], validating the capacities in [`Self::build()`].
#[derive(Debug, Default, Clone)]
pub struct LayerSchemaBuilder {
    layers: Vec<usize>,
    value_bits: Option<usize>,
}

impl LayerSchemaBuilder {
    /// Creates a builder with no layers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a layer of capacity `capacity` below the current ones.
    /// The last appended layer gives the leaf capacity.
    #[must_use]
    pub fn layer(mut self, capacity: usize) -> Self {
        self.layers.push(capacity);
        self
    }

    /// Declares that the schema is sized for values of `bits` bits,
    /// requiring the total capacity to be `2^bits`.
    #[must_use]
    pub fn value_bits(mut self, bits: usize) -> Self {
        self.value_bits = Some(bits);
        self
    }

    /// Validates the layers and builds the schema.
    ///
    /// # Errors
    ///
    /// An error [`Error::InvalidSchema`] is returned if
    ///
    ///  - no layer is given,
    ///  - a layer has capacity zero,
    ///  - the total capacity overflows `usize`, or
    ///  - a declared value domain does not match the total capacity.
    pub fn build(self) -> Result<LayerSchema> {
        if self.layers.is_empty() {
            return Err(Error::InvalidSchema("at least one layer is required.".to_string()).into());
        }
        if let Some(d) = self.layers.iter().position(|&c| c == 0) {
            return Err(Error::InvalidSchema(format!("layer {d} has capacity zero.")).into());
        }
        let mut spans = vec![1usize; self.layers.len() + 1];
        for d in (0..self.layers.len()).rev() {
            spans[d] = spans[d + 1].checked_mul(self.layers[d]).ok_or_else(|| {
                Error::InvalidSchema(format!(
                    "capacity of layers {:?} overflows usize.",
                    self.layers
                ))
            })?;
        }
        if let Some(bits) = self.value_bits {
            if bits >= usize::BITS as usize || spans[0] != 1 << bits {
                return Err(Error::InvalidSchema(format!(
                    "capacity {} does not match {bits}-bit values.",
                    spans[0]
                ))
                .into());
            }
        }
        log::debug!(
            "built layer schema {:?} with capacity {}",
            self.layers,
            spans[0]
        );
        Ok(LayerSchema {
            layers: self.layers,
            spans,
            value_bits: self.value_bits,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        for bits in LayerSchema::preset_value_bits() {
            let schema = LayerSchema::for_value_bits(bits).unwrap();
            assert_eq!(schema.capacity(), 1 << bits);
            assert_eq!(schema.value_bits(), Some(bits));
        }
        assert_eq!(LayerSchema::for_value_bits(16).unwrap().layers(), &[8, 8, 8, 128]);
        assert_eq!(
            LayerSchema::for_value_bits(32).unwrap().layers(),
            &[32, 64, 64, 64, 512]
        );
    }

    #[test]
    fn test_no_preset() {
        let e = LayerSchema::for_value_bits(17);
        assert_eq!(
            e.err().map(|x| x.to_string()),
            Some("invalid layer schema: no preset for 17-bit values.".to_string())
        );
    }

    #[test]
    fn test_empty() {
        let e = LayerSchema::builder().build();
        assert_eq!(
            e.err().map(|x| x.to_string()),
            Some("invalid layer schema: at least one layer is required.".to_string())
        );
    }

    #[test]
    fn test_zero_layer() {
        let e = LayerSchema::builder().layer(4).layer(0).build();
        assert_eq!(
            e.err().map(|x| x.to_string()),
            Some("invalid layer schema: layer 1 has capacity zero.".to_string())
        );
    }

    #[test]
    fn test_overflow() {
        let e = LayerSchema::builder()
            .layer(1 << 32)
            .layer(1 << 32)
            .build()
            .unwrap_err();
        assert!(matches!(
            e.downcast_ref::<Error>(),
            Some(Error::InvalidSchema(_))
        ));
    }

    #[test]
    fn test_value_bits_mismatch() {
        let e = LayerSchema::builder().layer(4).layer(4).value_bits(5).build();
        assert_eq!(
            e.err().map(|x| x.to_string()),
            Some("invalid layer schema: capacity 16 does not match 5-bit values.".to_string())
        );
    }

    #[test]
    fn test_degenerate_layers() {
        for layers in [&[1][..], &[1, 1, 1][..], &[2, 1, 3][..], &[1, 5, 1][..]] {
            let schema = layers
                .iter()
                .fold(LayerSchema::builder(), |b, &c| b.layer(c))
                .build()
                .unwrap();
            assert_eq!(schema.capacity(), layers.iter().product::<usize>());
            assert_eq!(schema.span(schema.depth()), 1);
            assert_eq!(schema.leaf_capacity(), *layers.last().unwrap());
        }
    }

    #[test]
    fn test_spans() {
        let schema = LayerSchema::builder().layer(2).layer(3).layer(5).build().unwrap();
        assert_eq!(schema.span(0), 30);
        assert_eq!(schema.span(1), 15);
        assert_eq!(schema.span(2), 5);
        assert!(schema.is_leaf(2));
        assert!(!schema.is_leaf(1));
    }
}
