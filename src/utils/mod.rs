pub mod html;
pub mod spreadsheet;
