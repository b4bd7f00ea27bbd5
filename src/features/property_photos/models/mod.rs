mod property_photo;

pub use property_photo::PropertyPhoto;
