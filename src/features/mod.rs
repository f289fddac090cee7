pub mod contact;
pub mod geolocation;
pub mod migration;
pub mod pages;
pub mod visitors;
