mod project_dto;

pub use project_dto::ProjectResponseDto;
