/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// PROPERTY CONSTANTS
// =============================================================================

/// Key inside `products.properties_data` holding the canonical model code
pub const PROPERTY_MODEL_CODE: &str = "model";

/// Delimiter of composite property values ("model|finish|color")
pub const PROPERTY_VALUE_DELIMITER: char = '|';

/// Photo type marking the cover photo of a property combination
pub const PHOTO_TYPE_COVER: &str = "cover";

/// Photo type for additional gallery photos
pub const PHOTO_TYPE_GALLERY: &str = "gallery";
