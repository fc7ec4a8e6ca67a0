pub mod emails_service;
