pub mod directory;
pub mod records;
pub mod storage_traits;
