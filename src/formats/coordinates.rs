use super::pointxyz::PointXyz;

/// Positions of `x`, `y` and `z` within a record's field or property list.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct CoordinateIndices {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl CoordinateIndices {
    /// Looks up every coordinate by name.
    ///
    /// On failure returns the names of the coordinates that are absent, in
    /// `x`, `y`, `z` order.
    pub fn resolve<S: AsRef<str>>(names: &[S]) -> Result<Self, Vec<&'static str>> {
        let x = position_of(names, "x");
        let y = position_of(names, "y");
        let z = position_of(names, "z");
        match (x, y, z) {
            (Some(x), Some(y), Some(z)) => Ok(Self { x, y, z }),
            _ => Err([("x", x), ("y", y), ("z", z)]
                .into_iter()
                .filter(|(_, idx)| idx.is_none())
                .map(|(name, _)| name)
                .collect()),
        }
    }

    /// Looks up every coordinate by name, falling back to positions 0, 1, 2
    /// for `x`, `y`, `z` respectively when a name is absent.
    pub fn resolve_or_positional<S: AsRef<str>>(names: &[S]) -> Self {
        Self {
            x: position_of(names, "x").unwrap_or(0),
            y: position_of(names, "y").unwrap_or(1),
            z: position_of(names, "z").unwrap_or(2),
        }
    }

    /// Picks the coordinates out of one decoded record. `None` if the record
    /// is too short for any of the indices.
    pub fn select<T: Copy>(&self, record: &[T]) -> Option<PointXyz<T>> {
        Some(PointXyz::new(
            *record.get(self.x)?,
            *record.get(self.y)?,
            *record.get(self.z)?,
        ))
    }
}

fn position_of<S: AsRef<str>>(names: &[S], wanted: &str) -> Option<usize> {
    names.iter().position(|name| name.as_ref() == wanted)
}

#[cfg(test)]
mod tests {
    use super::CoordinateIndices;
    use crate::formats::pointxyz::PointXyz;

    #[test]
    fn resolve_finds_reordered_fields() {
        let indices = CoordinateIndices::resolve(&["intensity", "z", "x", "y"]).unwrap();
        assert_eq!(indices, CoordinateIndices { x: 2, y: 3, z: 1 });
        assert_eq!(
            indices.select(&[9.0, 3.0, 1.0, 2.0]),
            Some(PointXyz::new(1.0, 2.0, 3.0))
        );
    }

    #[test]
    fn resolve_reports_missing_names() {
        assert_eq!(CoordinateIndices::resolve(&["x", "y"]), Err(vec!["z"]));
        assert_eq!(
            CoordinateIndices::resolve(&["nx", "y"]),
            Err(vec!["x", "z"])
        );
    }

    #[test]
    fn positional_fallback_only_replaces_missing_names() {
        let indices = CoordinateIndices::resolve_or_positional(&["a", "b", "c", "x"]);
        assert_eq!(indices, CoordinateIndices { x: 3, y: 1, z: 2 });
    }

    #[test]
    fn select_rejects_short_records() {
        let indices = CoordinateIndices { x: 0, y: 1, z: 4 };
        assert_eq!(indices.select(&[1.0, 2.0, 3.0]), None);
    }
}
