pub mod columns;
pub mod json;
