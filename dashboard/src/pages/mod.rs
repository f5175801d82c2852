pub mod manager_status;
