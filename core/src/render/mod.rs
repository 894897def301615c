pub mod card;
pub mod export;
pub mod format;
pub mod page;
