pub mod categories;
pub mod items;
pub mod pages;
pub mod shop;
