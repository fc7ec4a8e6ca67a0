pub mod tasks_service;
