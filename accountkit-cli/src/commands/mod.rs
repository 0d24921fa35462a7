pub mod accounts;
pub mod delete_account;
