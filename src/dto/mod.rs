pub mod talent_dto;
