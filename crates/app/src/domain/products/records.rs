//! Product Records

/// A product promotions can target, identified by its product code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProductRecord {
    /// Catalog id.
    pub id: u32,
    /// Product code promotions refer to, e.g. `A0001`.
    pub code: &'static str,
    /// Display name.
    pub name: &'static str,
}

const fn product(id: u32, code: &'static str, name: &'static str) -> ProductRecord {
    ProductRecord { id, code, name }
}

/// Demo catalog the dashboard ships with.
pub const DEMO_PRODUCTS: [ProductRecord; 12] = [
    product(1, "A0001", "Panadol Extra Strength"),
    product(2, "A0002", "Ibuprofen 400mg"),
    product(3, "A0003", "Aspirin 325mg"),
    product(4, "B0001", "Vitamin C 1000mg"),
    product(5, "B0002", "Multivitamin Daily"),
    product(6, "C0001", "Allergy Relief Tablets"),
    product(7, "C0002", "Cough Syrup"),
    product(8, "D0001", "Antibiotic Ointment"),
    product(9, "D0002", "Bandages Assorted"),
    product(10, "E0001", "Eye Drops"),
    product(11, "F0001", "Hand Sanitizer"),
    product(12, "F0002", "Face Masks 50pk"),
];
