pub mod dataset;
pub mod excel_read;
pub mod excel_write;
