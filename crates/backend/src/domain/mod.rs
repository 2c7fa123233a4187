pub mod a001_order;
pub mod a002_return;
pub mod a003_person;
