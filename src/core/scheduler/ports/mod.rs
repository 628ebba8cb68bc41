pub mod unit_executor;
