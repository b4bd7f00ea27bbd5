mod document_dto;

pub use document_dto::{
    CommentResponseDto, CreateCommentDto, CreateDocumentDto, DocumentDetailDto, DocumentLineDto,
    DocumentResponseDto, HistoryResponseDto, ListDocumentsQuery, UpdateDocumentStatusDto,
};
