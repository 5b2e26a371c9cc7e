pub mod dashboard;
pub mod health;
pub mod items;
pub mod machine;
pub mod users;
