pub mod health;
pub mod site;
pub mod weather;
