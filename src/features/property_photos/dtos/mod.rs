mod photo_dto;

pub use photo_dto::{
    ListPropertyPhotosQuery, PropertyPhotoResponseDto, UploadPropertyPhotoDto,
    ALLOWED_PHOTO_MIME_TYPES, MAX_PHOTO_SIZE,
};
