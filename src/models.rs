pub mod customer;
pub mod logs;
pub mod note;
