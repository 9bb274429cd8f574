pub mod excel_write;
pub mod json_write;
pub mod manad_read;
