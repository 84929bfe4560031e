use nalgebra::Point3;

/// An atom of either interaction partner.
///
/// The element symbol is stored upper-cased (e.g. `"C"`, `"ZN"`, `"CL"`) so that every
/// lookup table in the crate can match it directly.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Upper-cased element symbol.
    pub element: String,
    /// Cartesian coordinates in Angstroms.
    pub position: Point3<f64>,
    /// Set by the structure reader when the atom belongs to an aromatic system.
    pub aromatic: bool,
}

impl Atom {
    /// Creates a non-aromatic atom, normalizing the element symbol.
    pub fn new(element: &str, position: Point3<f64>) -> Self {
        Self {
            element: element.trim().to_ascii_uppercase(),
            position,
            aromatic: false,
        }
    }

    pub fn aromatic(element: &str, position: Point3<f64>) -> Self {
        Self {
            aromatic: true,
            ..Self::new(element, position)
        }
    }

    /// Case-insensitive element comparison.
    pub fn is_element(&self, symbol: &str) -> bool {
        self.element.eq_ignore_ascii_case(symbol.trim())
    }

    pub fn is_carbon(&self) -> bool {
        self.element == "C"
    }

    pub fn is_hydrogen(&self) -> bool {
        self.element == "H" || self.element == "D"
    }
}
